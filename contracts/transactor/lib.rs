#![cfg_attr(not(feature = "std"), no_std, no_main)]

mod psp22;
mod reward;

pub use reward::{compute_reward, REWARD_SCALE};

/// PayGuppy Transactor Smart Contract
///
/// Settles a buyer -> merchant payment in an organization's payment token and,
/// in the same call, credits the buyer with reward tokens pulled from the
/// organization's treasury. Payments are not stored; history lives in the
/// emitted `PaymentSent` events.
#[ink::contract]
mod transactor {
    use crate::psp22::{self, CallError, PSP22Error};
    use crate::reward;

    use ink::storage::Mapping;

    /// Opaque organization key
    pub type OrganizationId = [u8; 32];

    /// Reward program of one organization
    #[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(
        feature = "std",
        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
    )]
    pub struct OrganizationRewardConfig {
        /// PSP22 token buyers pay in
        pub payment_token: AccountId,
        /// 18-decimal fixed-point ratio, zero disables rewards
        pub reward_multiplier: u128,
        /// PSP22 token paid out as reward
        pub reward_token: AccountId,
        /// Holder of the reward supply, must approve this contract
        pub treasury: AccountId,
    }

    /// Errors that can occur in the transactor
    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Caller is not the contract owner
        NotOwner,
        /// A configuration address is the zero address
        InvalidConfig,
        /// New owner is the zero address
        InvalidOwner,
        /// No reward configuration for the organization
        UnknownOrganization,
        /// Payment token differs from the organization's configured token
        TokenMismatch,
        /// Payment amount is zero
        ZeroAmount,
        /// Only the buyer may spend the buyer's allowance
        CallerNotBuyer,
        /// Reward does not fit in a balance
        RewardOverflow,
        /// A token leg lacked balance
        InsufficientBalance,
        /// A token leg lacked allowance
        InsufficientAllowance,
        /// A token leg failed for any other reason
        TransferFailed,
    }

    impl From<CallError> for Error {
        fn from(e: CallError) -> Self {
            match e {
                CallError::Rejected(PSP22Error::InsufficientBalance) => Error::InsufficientBalance,
                CallError::Rejected(PSP22Error::InsufficientAllowance) => {
                    Error::InsufficientAllowance
                }
                CallError::Rejected(_) | CallError::Failed => Error::TransferFailed,
            }
        }
    }

    pub type Result<T> = core::result::Result<T, Error>;

    #[ink(storage)]
    pub struct Transactor {
        /// Only account allowed to write reward configurations
        owner: AccountId,
        organizations: Mapping<OrganizationId, OrganizationRewardConfig>,
    }

    #[ink(event)]
    pub struct OrganizationRewardsSet {
        #[ink(topic)]
        organization_id: OrganizationId,
        payment_token: AccountId,
        reward_multiplier: u128,
        reward_token: AccountId,
        treasury: AccountId,
    }

    #[ink(event)]
    pub struct PaymentSent {
        #[ink(topic)]
        buyer: AccountId,
        #[ink(topic)]
        merchant: AccountId,
        amount: Balance,
        payment_token: AccountId,
        #[ink(topic)]
        organization_id: OrganizationId,
        reward: Balance,
    }

    #[ink(event)]
    pub struct OwnershipTransferred {
        #[ink(topic)]
        previous_owner: AccountId,
        #[ink(topic)]
        new_owner: AccountId,
    }

    impl Default for Transactor {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transactor {
        /// Constructor - the deployer becomes the owner
        #[ink(constructor)]
        pub fn new() -> Self {
            Self {
                owner: Self::env().caller(),
                organizations: Mapping::default(),
            }
        }

        /// Create or overwrite the reward program of an organization (only owner)
        #[ink(message)]
        pub fn set_organization_rewards(
            &mut self,
            organization_id: OrganizationId,
            payment_token: AccountId,
            reward_multiplier: u128,
            reward_token: AccountId,
            treasury: AccountId,
        ) -> Result<()> {
            self.ensure_owner()?;

            if is_zero(&payment_token) || is_zero(&reward_token) || is_zero(&treasury) {
                return Err(Error::InvalidConfig);
            }

            let config = OrganizationRewardConfig {
                payment_token,
                reward_multiplier,
                reward_token,
                treasury,
            };
            self.organizations.insert(organization_id, &config);

            self.env().emit_event(OrganizationRewardsSet {
                organization_id,
                payment_token,
                reward_multiplier,
                reward_token,
                treasury,
            });
            Ok(())
        }

        /// Pay a merchant and credit the buyer's reward
        ///
        /// # Arguments
        /// * `buyer` - Account the payment is pulled from, must be the caller
        /// * `merchant` - Account the payment is pushed to
        /// * `amount` - Payment amount in `payment_token` units
        /// * `payment_token` - Must equal the organization's payment token
        /// * `organization_id` - Organization whose reward program applies
        ///
        /// # Returns
        /// The reward credited to the buyer
        ///
        /// The caller must be `buyer` itself, so a relayer cannot submit the
        /// payment on the buyer's behalf (no meta-transactions).
        #[ink(message)]
        pub fn send_payment(
            &self,
            buyer: AccountId,
            merchant: AccountId,
            amount: Balance,
            payment_token: AccountId,
            organization_id: OrganizationId,
        ) -> Result<Balance> {
            // 1. Only the buyer spends the buyer's allowance
            if self.env().caller() != buyer {
                return Err(Error::CallerNotBuyer);
            }

            // 2. Validate amount
            if amount == 0 {
                return Err(Error::ZeroAmount);
            }

            // 3. Resolve the reward program
            let config = self
                .organizations
                .get(organization_id)
                .ok_or(Error::UnknownOrganization)?;
            if config.payment_token != payment_token {
                return Err(Error::TokenMismatch);
            }

            // 4. Compute the reward before any token moves
            let reward = reward::compute_reward(amount, config.reward_multiplier)
                .ok_or(Error::RewardOverflow)?;

            // 5. Buyer -> merchant
            psp22::transfer_from(payment_token, buyer, merchant, amount).map_err(|e| {
                ink::env::debug_println!("payment leg failed: {:?}", e);
                Error::from(e)
            })?;

            // 6. Treasury -> buyer. An error here reverts the payment leg too.
            if reward > 0 {
                psp22::transfer_from(config.reward_token, config.treasury, buyer, reward)
                    .map_err(|e| {
                        ink::env::debug_println!("reward leg failed: {:?}", e);
                        Error::from(e)
                    })?;
            }

            self.env().emit_event(PaymentSent {
                buyer,
                merchant,
                amount,
                payment_token,
                organization_id,
                reward,
            });

            Ok(reward)
        }

        /// Get the reward program of an organization
        #[ink(message)]
        pub fn organization_rewards(
            &self,
            organization_id: OrganizationId,
        ) -> Option<OrganizationRewardConfig> {
            self.organizations.get(organization_id)
        }

        /// Reward `send_payment` would credit for `amount`
        #[ink(message)]
        pub fn preview_reward(
            &self,
            organization_id: OrganizationId,
            amount: Balance,
        ) -> Result<Balance> {
            let config = self
                .organizations
                .get(organization_id)
                .ok_or(Error::UnknownOrganization)?;
            reward::compute_reward(amount, config.reward_multiplier).ok_or(Error::RewardOverflow)
        }

        /// Get contract owner
        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        /// Hand the contract over to `new_owner` (only owner)
        #[ink(message)]
        pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<()> {
            self.ensure_owner()?;
            if is_zero(&new_owner) {
                return Err(Error::InvalidOwner);
            }

            let previous_owner = self.owner;
            self.owner = new_owner;
            self.env().emit_event(OwnershipTransferred {
                previous_owner,
                new_owner,
            });
            Ok(())
        }

        fn ensure_owner(&self) -> Result<()> {
            if self.env().caller() != self.owner {
                return Err(Error::NotOwner);
            }
            Ok(())
        }
    }

    fn is_zero(account: &AccountId) -> bool {
        let bytes: &[u8; 32] = account.as_ref();
        bytes == &[0u8; 32]
    }


}
