pub mod config;
pub use config::*;

pub mod handle_message;
pub use handle_message::*;

pub mod initialize;
pub use initialize::*;

pub mod manage_funds;
pub use manage_funds::*;

pub mod process_withdrawal;
pub use process_withdrawal::*;

pub mod report;
pub use report::*;

pub mod views;
pub use views::*;
