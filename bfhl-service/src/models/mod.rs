pub mod envelope;
pub mod request;

pub use envelope::{BfhlData, Envelope};
pub use request::BfhlRequest;
