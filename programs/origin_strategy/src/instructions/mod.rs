pub mod config;
pub use config::*;

pub mod deposit;
pub use deposit::*;

pub mod handle_message;
pub use handle_message::*;

pub mod harvest_and_report;
pub use harvest_and_report::*;

pub mod initialize;
pub use initialize::*;

pub mod views;
pub use views::*;

pub mod withdraw;
pub use withdraw::*;
