pub mod messenger;
pub mod received_message;

pub use messenger::*;
pub use received_message::*;
