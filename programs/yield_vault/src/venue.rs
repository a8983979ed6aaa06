//! Exposes a position in this program as a [`Vault`] for the accounting core.
//!
//! Amounts reported by [`Vault::deposit`] and [`Vault::redeem`] are measured on the owner's
//! token account, so they reflect what actually moved.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;
use common::vault::Vault;

use crate::{
    cpi,
    state::{Position, YieldVault},
};

pub struct YieldVaultAccounts<'info> {
    pub program: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub position: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub reserve: AccountInfo<'info>,
    pub owner_token_account: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

pub struct YieldVaultVenue<'a, 'info> {
    accounts: YieldVaultAccounts<'info>,
    /// Position owner, signed for with `signer_seeds`.
    owner: AccountInfo<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
}

impl<'a, 'info> YieldVaultVenue<'a, 'info> {
    pub fn new(
        accounts: YieldVaultAccounts<'info>,
        owner: AccountInfo<'info>,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Result<Self> {
        require_keys_eq!(
            accounts.program.key(),
            crate::ID,
            VenueError::IncorrectVaultProgram
        );

        let position = load::<Position>(&accounts.position)?;
        require_keys_eq!(position.owner, owner.key(), VenueError::IncorrectPosition);
        require_keys_eq!(
            position.vault,
            accounts.vault.key(),
            VenueError::IncorrectPosition
        );

        Ok(Self {
            accounts,
            owner,
            signer_seeds,
        })
    }

    fn vault_state(&self) -> Result<YieldVault> {
        load(&self.accounts.vault)
    }

    fn shares(&self) -> Result<u64> {
        Ok(load::<Position>(&self.accounts.position)?.shares)
    }

    fn total_assets(&self) -> Result<u64> {
        token_balance(&self.accounts.reserve)
    }
}

impl Vault for YieldVaultVenue<'_, '_> {
    fn valuation(&self) -> Result<u64> {
        self.vault_state()?
            .convert_to_assets(self.shares()?, self.total_assets()?)
    }

    fn max_deposit(&self) -> Result<u64> {
        Ok(self.vault_state()?.max_deposit(self.total_assets()?))
    }

    /// Every asset sits in the reserve, so the whole position is redeemable.
    fn max_redeem(&self) -> Result<u64> {
        self.valuation()
    }

    fn deposit(&mut self, assets: u64) -> Result<u64> {
        // Amounts too small to mint a share stay idle instead of failing the caller.
        let shares = self
            .vault_state()?
            .convert_to_shares(assets, self.total_assets()?)?;
        if shares == 0 {
            return Ok(0);
        }

        let before = token_balance(&self.accounts.owner_token_account)?;

        let cpi_ctx = CpiContext::new_with_signer(
            self.accounts.program.clone(),
            cpi::accounts::Deposit {
                owner: self.owner.clone(),
                vault: self.accounts.vault.clone(),
                position: self.accounts.position.clone(),
                mint: self.accounts.mint.clone(),
                reserve: self.accounts.reserve.clone(),
                owner_token_account: self.accounts.owner_token_account.clone(),
                token_program: self.accounts.token_program.clone(),
            },
            self.signer_seeds,
        );
        cpi::deposit(cpi_ctx, assets)?;

        let after = token_balance(&self.accounts.owner_token_account)?;
        Ok(before - after)
    }

    fn redeem(&mut self, assets: u64) -> Result<u64> {
        let held = self.shares()?;
        let shares = if assets >= self.valuation()? {
            held
        } else {
            self.vault_state()?
                .preview_withdraw(assets, self.total_assets()?)?
                .min(held)
        };
        if shares == 0 {
            return Ok(0);
        }

        let before = token_balance(&self.accounts.owner_token_account)?;

        let cpi_ctx = CpiContext::new_with_signer(
            self.accounts.program.clone(),
            cpi::accounts::Redeem {
                owner: self.owner.clone(),
                vault: self.accounts.vault.clone(),
                position: self.accounts.position.clone(),
                mint: self.accounts.mint.clone(),
                reserve: self.accounts.reserve.clone(),
                receiver_token_account: self.accounts.owner_token_account.clone(),
                token_program: self.accounts.token_program.clone(),
            },
            self.signer_seeds,
        );
        cpi::redeem(cpi_ctx, shares)?;

        let after = token_balance(&self.accounts.owner_token_account)?;
        Ok(after - before)
    }
}

fn load<T: AccountDeserialize>(account: &AccountInfo) -> Result<T> {
    require_keys_eq!(*account.owner, crate::ID, VenueError::IncorrectOwner);
    T::try_deserialize(&mut &account.try_borrow_data()?[..])
}

fn token_balance(account: &AccountInfo) -> Result<u64> {
    Ok(TokenAccount::try_deserialize(&mut &account.try_borrow_data()?[..])?.amount)
}

#[error_code]
pub enum VenueError {
    #[msg("Incorrect vault program")]
    IncorrectVaultProgram = 2400,
    #[msg("Position does not belong to the owner and vault")]
    IncorrectPosition,
    #[msg("Account is not owned by the vault program")]
    IncorrectOwner,
}
