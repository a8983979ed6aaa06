pub mod config;
pub use config::*;

pub mod initialize;
pub use initialize::*;

pub mod initialize_pool;
pub use initialize_pool::*;

pub mod post_message;
pub use post_message::*;

pub mod relay_message;
pub use relay_message::*;

pub mod send_message;
pub use send_message::*;
