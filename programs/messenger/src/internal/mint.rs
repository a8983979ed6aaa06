use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::{
    extension::{BaseStateWithExtensions, ExtensionType, PodStateWithExtensions},
    pod::PodMint,
};

/// Whether transfers of this mint can withhold a fee from the recipient.
///
/// Mints without extensions, including every legacy token program mint, never charge one.
pub fn has_transfer_fee(mint_data: &[u8]) -> Result<bool> {
    let mint_with_extension = PodStateWithExtensions::<PodMint>::unpack(mint_data)?;
    Ok(mint_with_extension
        .get_extension_types()?
        .contains(&ExtensionType::TransferFeeConfig))
}
