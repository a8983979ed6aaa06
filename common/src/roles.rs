use anchor_lang::prelude::*;

pub const MAX_KEEPERS: usize = 8;

/// Governance and keeper set of a strategy.
///
/// Governance can do everything a keeper can.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct Roles {
    pub governance: Pubkey,
    #[max_len(MAX_KEEPERS)]
    pub keepers: Vec<Pubkey>,
}

impl Roles {
    pub fn new(governance: Pubkey) -> Self {
        Self {
            governance,
            keepers: Vec::new(),
        }
    }

    pub fn is_governance(&self, key: &Pubkey) -> bool {
        self.governance == *key
    }

    pub fn is_keeper(&self, key: &Pubkey) -> bool {
        self.is_governance(key) || self.keepers.contains(key)
    }

    pub fn require_governance(&self, key: &Pubkey) -> Result<()> {
        require!(self.is_governance(key), RoleError::Unauthorized);
        Ok(())
    }

    pub fn require_keeper(&self, key: &Pubkey) -> Result<()> {
        require!(self.is_keeper(key), RoleError::NotKeeper);
        Ok(())
    }

    /// Adds or removes `keeper`. Both directions are idempotent.
    pub fn set_keeper(&mut self, keeper: Pubkey, allowed: bool) -> Result<()> {
        let position = self.keepers.iter().position(|k| *k == keeper);

        match (position, allowed) {
            (None, true) => {
                require!(self.keepers.len() < MAX_KEEPERS, RoleError::TooManyKeepers);
                self.keepers.push(keeper);
            }
            (Some(index), false) => {
                self.keepers.swap_remove(index);
            }
            _ => {}
        }

        Ok(())
    }
}

#[error_code]
pub enum RoleError {
    #[msg("Caller is not governance")]
    Unauthorized = 700,
    #[msg("Caller is not a keeper")]
    NotKeeper,
    #[msg("Keeper set is full")]
    TooManyKeepers,
}
