use anchor_lang::prelude::*;

#[constant]
pub const VAULT_SEED: &[u8] = b"vault";

#[constant]
pub const RESERVE_SEED: &[u8] = b"reserve";

#[constant]
pub const POSITION_SEED: &[u8] = b"position";
