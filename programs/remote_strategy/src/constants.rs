use anchor_lang::prelude::*;

#[constant]
pub const STRATEGY_SEED: &[u8] = b"remote_strategy";

/// Token account holding bridged funds not yet deployed.
#[constant]
pub const STRATEGY_TOKEN_SEED: &[u8] = b"strategy_token";
