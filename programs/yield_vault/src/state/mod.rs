pub mod position;
pub mod yield_vault;

pub use position::*;
pub use yield_vault::*;
