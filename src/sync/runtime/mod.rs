pub mod controller;


pub use controller::{ActionOutcome, ActionReport, Snapshot, SyncController};
