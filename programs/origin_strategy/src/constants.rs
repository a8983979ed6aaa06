use anchor_lang::prelude::*;

#[constant]
pub const STRATEGY_SEED: &[u8] = b"origin_strategy";

/// Token account holding the strategy's idle funds.
#[constant]
pub const STRATEGY_TOKEN_SEED: &[u8] = b"strategy_token";
