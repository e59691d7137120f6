//! Cross-contract calls into PSP22 tokens.

use ink::env::call::{build_call, ExecutionInput, Selector};
use ink::env::DefaultEnvironment;
use ink::prelude::string::String;
use ink::prelude::vec::Vec;
use ink::primitives::AccountId;

/// `PSP22::transfer_from`
pub const TRANSFER_FROM_SELECTOR: [u8; 4] = [0x54, 0xb3, 0xc7, 0x6e];

/// Error type returned by PSP22 tokens. Variant order must match the
/// standard so replies decode.
#[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum PSP22Error {
    Custom(String),
    InsufficientBalance,
    InsufficientAllowance,
    ZeroRecipientAddress,
    ZeroSenderAddress,
    SafeTransferCheckFailed(String),
}

/// Outcome of a failed token call
#[derive(Debug, PartialEq, Eq)]
pub enum CallError {
    /// The token ran and returned an error
    Rejected(PSP22Error),
    /// The call trapped, hit a language error, or could not be decoded
    Failed,
}

/// Moves `value` of `token` from `from` to `to`, spending the calling
/// contract's allowance.
pub fn transfer_from(
    token: AccountId,
    from: AccountId,
    to: AccountId,
    value: u128,
) -> Result<(), CallError> {
    let result = build_call::<DefaultEnvironment>()
        .call(token)
        .exec_input(
            ExecutionInput::new(Selector::new(TRANSFER_FROM_SELECTOR))
                .push_arg(from)
                .push_arg(to)
                .push_arg(value)
                .push_arg(Vec::<u8>::new()),
        )
        .returns::<Result<(), PSP22Error>>()
        .try_invoke();

    match result {
        Ok(Ok(Ok(()))) => Ok(()),
        Ok(Ok(Err(error))) => Err(CallError::Rejected(error)),
        Ok(Err(_)) | Err(_) => Err(CallError::Failed),
    }
}
