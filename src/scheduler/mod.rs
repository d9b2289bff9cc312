pub mod queue;
pub mod sweeper;
pub mod tokens;

pub use queue::{Delivery, InProcessQueue, TaskHandler, TaskQueue};
pub use tokens::TokenKind;
