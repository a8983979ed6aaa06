pub mod remote_strategy;

pub use remote_strategy::*;
