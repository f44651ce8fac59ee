pub mod bfhl;
pub mod health;

pub use bfhl::bfhl;
pub use health::{health_check, root};
