pub mod domain;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod runtime;
pub mod types;
