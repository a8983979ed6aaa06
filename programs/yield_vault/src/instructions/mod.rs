pub mod deposit;
pub use deposit::*;

pub mod initialize_vault;
pub use initialize_vault::*;

pub mod open_position;
pub use open_position::*;

pub mod redeem;
pub use redeem::*;

pub mod set_deposit_cap;
pub use set_deposit_cap::*;
