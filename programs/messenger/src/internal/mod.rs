pub mod dispatch;
pub mod handle_message;
pub mod mint;

pub use dispatch::*;
pub use handle_message::*;
pub use mint::*;
