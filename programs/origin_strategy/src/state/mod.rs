pub mod origin_strategy;

pub use origin_strategy::*;
