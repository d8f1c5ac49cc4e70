pub mod api;
pub mod decode;
pub mod memory;

#[cfg(test)]
mod tests;

pub use api::{ContractGateway, RawOutput};
pub use decode::decode_output;
pub use memory::{ContractState, InMemoryGateway};
