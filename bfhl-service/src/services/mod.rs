pub mod ai;
pub mod dispatch;
pub mod math;
pub mod providers;

pub use ai::AiDelegate;
pub use dispatch::Dispatcher;
