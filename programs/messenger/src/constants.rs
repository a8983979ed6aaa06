use anchor_lang::prelude::*;

#[constant]
pub const MESSENGER_SEED: &[u8] = b"messenger";

#[constant]
pub const RECEIVED_MESSAGE_SEED: &[u8] = b"received_message";

/// Signs the `handle_message` call on behalf of a remote sender.
#[constant]
pub const MESSENGER_AUTHORITY_SEED: &[u8] = b"messenger_authority";

/// Custody account for bridged tokens of one mint.
#[constant]
pub const POOL_SEED: &[u8] = b"pool";

pub const MAX_PAYLOAD_SIZE: usize = 512;

/// Instruction every message receiver must expose.
pub const HANDLE_MESSAGE_IX_NAME: &str = "global:handle_message";
