#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// PayGuppy Token - minimal PSP22 fungible token
///
/// Used both as the payment token buyers settle in (a stablecoin stand-in)
/// and as the reward token a treasury pays out. Messages carry the PSP22
/// standard selectors so the transactor can reach any PSP22 token the
/// same way it reaches this one.
#[ink::contract]
pub mod token {
    use ink::prelude::string::String;
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;

    /// PSP22 error types
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

    pub type Result<T> = core::result::Result<T, PSP22Error>;

    /// Token storage
    #[ink(storage)]
    pub struct Token {
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        /// Keyed by (owner, spender)
        allowances: Mapping<(AccountId, AccountId), Balance>,
        name: Option<String>,
        symbol: Option<String>,
        decimals: u8,
    }

    /// Events
    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: Option<AccountId>,
        #[ink(topic)]
        to: Option<AccountId>,
        value: Balance,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        spender: AccountId,
        amount: Balance,
    }

    impl Token {
        /// Mints `total_supply` to the caller.
        #[ink(constructor)]
        pub fn new(
            total_supply: Balance,
            name: Option<String>,
            symbol: Option<String>,
            decimals: u8,
        ) -> Self {
            let caller = Self::env().caller();
            let mut balances = Mapping::default();
            balances.insert(caller, &total_supply);

            Self::env().emit_event(Transfer {
                from: None,
                to: Some(caller),
                value: total_supply,
            });

            Self {
                total_supply,
                balances,
                allowances: Mapping::default(),
                name,
                symbol,
                decimals,
            }
        }

        // ============================================================
        // PSP22 QUERIES
        // ============================================================

        #[ink(message, selector = 0x162df8c2)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message, selector = 0x6568382f)]
        pub fn balance_of(&self, owner: AccountId) -> Balance {
            self.balances.get(owner).unwrap_or(0)
        }

        #[ink(message, selector = 0x4d47d921)]
        pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
            self.allowances.get((owner, spender)).unwrap_or(0)
        }

        #[ink(message, selector = 0x3d261bd4)]
        pub fn token_name(&self) -> Option<String> {
            self.name.clone()
        }

        #[ink(message, selector = 0x34205be5)]
        pub fn token_symbol(&self) -> Option<String> {
            self.symbol.clone()
        }

        #[ink(message, selector = 0x7271b782)]
        pub fn token_decimals(&self) -> u8 {
            self.decimals
        }

        // ============================================================
        // PSP22 TRANSFERS
        // ============================================================

        /// Moves `value` from the caller to `to`.
        #[ink(message, selector = 0xdb20f9f5)]
        pub fn transfer(&mut self, to: AccountId, value: Balance, _data: Vec<u8>) -> Result<()> {
            let from = self.env().caller();
            self.transfer_from_to(from, to, value)
        }

        /// Moves `value` from `from` to `to` on behalf of the caller,
        /// consuming the caller's allowance.
        #[ink(message, selector = 0x54b3c76e)]
        pub fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
            _data: Vec<u8>,
        ) -> Result<()> {
            let caller = self.env().caller();
            if from == caller || value == 0 {
                return self.transfer_from_to(from, to, value);
            }

            let allowance = self.allowance(from, caller);
            let new_allowance = allowance
                .checked_sub(value)
                .ok_or(PSP22Error::InsufficientAllowance)?;

            self.transfer_from_to(from, to, value)?;
            self.allowances.insert((from, caller), &new_allowance);

            self.env().emit_event(Approval {
                owner: from,
                spender: caller,
                amount: new_allowance,
            });
            Ok(())
        }

        /// Sets the caller's allowance for `spender` to `value`.
        #[ink(message, selector = 0xb20f1bbd)]
        pub fn approve(&mut self, spender: AccountId, value: Balance) -> Result<()> {
            let owner = self.env().caller();
            self.set_allowance(owner, spender, value);
            Ok(())
        }

        #[ink(message, selector = 0x96d6b57a)]
        pub fn increase_allowance(&mut self, spender: AccountId, delta_value: Balance) -> Result<()> {
            let owner = self.env().caller();
            let allowance = self
                .allowance(owner, spender)
                .checked_add(delta_value)
                .ok_or(PSP22Error::Custom(String::from("Overflow")))?;
            self.set_allowance(owner, spender, allowance);
            Ok(())
        }

        #[ink(message, selector = 0xfecb57d5)]
        pub fn decrease_allowance(&mut self, spender: AccountId, delta_value: Balance) -> Result<()> {
            let owner = self.env().caller();
            let allowance = self
                .allowance(owner, spender)
                .checked_sub(delta_value)
                .ok_or(PSP22Error::InsufficientAllowance)?;
            self.set_allowance(owner, spender, allowance);
            Ok(())
        }

        // ============================================================
        // PRIVATE HELPER FUNCTIONS
        // ============================================================

        fn set_allowance(&mut self, owner: AccountId, spender: AccountId, amount: Balance) {
            self.allowances.insert((owner, spender), &amount);
            self.env().emit_event(Approval { owner, spender, amount });
        }

        /// Internal transfer helper
        fn transfer_from_to(&mut self, from: AccountId, to: AccountId, value: Balance) -> Result<()> {
            if is_zero(&to) {
                return Err(PSP22Error::ZeroRecipientAddress);
            }
            if is_zero(&from) {
                return Err(PSP22Error::ZeroSenderAddress);
            }
            if from == to || value == 0 {
                return Ok(());
            }

            let from_balance = self.balance_of(from);
            let new_from_balance = from_balance
                .checked_sub(value)
                .ok_or(PSP22Error::InsufficientBalance)?;
            self.balances.insert(from, &new_from_balance);

            let to_balance = self.balance_of(to);
            let new_to_balance = to_balance
                .checked_add(value)
                .ok_or(PSP22Error::Custom(String::from("Overflow")))?;
            self.balances.insert(to, &new_to_balance);

            self.env().emit_event(Transfer {
                from: Some(from),
                to: Some(to),
                value,
            });

            Ok(())
        }
    }

    fn is_zero(account: &AccountId) -> bool {
        let bytes: &[u8; 32] = account.as_ref();
        bytes == &[0u8; 32]
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use ink::env::{test, DefaultEnvironment};

        type Env = DefaultEnvironment;

        const SUPPLY: Balance = 1_000_000_000_000_000_000_000;

        fn accounts() -> test::DefaultAccounts<Env> {
            test::default_accounts::<Env>()
        }

        fn deploy() -> Token {
            test::set_caller::<Env>(accounts().alice);
            Token::new(
                SUPPLY,
                Some(String::from("Mock USDC")),
                Some(String::from("USDC")),
                18,
            )
        }

        #[ink::test]
        fn new_mints_supply_to_deployer() {
            let token = deploy();
            assert_eq!(token.total_supply(), SUPPLY);
            assert_eq!(token.balance_of(accounts().alice), SUPPLY);
            assert_eq!(token.balance_of(accounts().bob), 0);
            assert_eq!(token.token_symbol(), Some(String::from("USDC")));
            assert_eq!(token.token_decimals(), 18);
            assert_eq!(test::recorded_events().count(), 1);
        }

        #[ink::test]
        fn transfer_moves_balance() {
            let mut token = deploy();
            let accs = accounts();

            assert_eq!(token.transfer(accs.bob, 100, Vec::new()), Ok(()));
            assert_eq!(token.balance_of(accs.bob), 100);
            assert_eq!(token.balance_of(accs.alice), SUPPLY - 100);
        }

        #[ink::test]
        fn transfer_rejects_insufficient_balance() {
            let mut token = deploy();
            let accs = accounts();

            test::set_caller::<Env>(accs.bob);
            assert_eq!(
                token.transfer(accs.charlie, 1, Vec::new()),
                Err(PSP22Error::InsufficientBalance)
            );
        }

        #[ink::test]
        fn transfer_rejects_zero_recipient() {
            let mut token = deploy();
            assert_eq!(
                token.transfer(AccountId::from([0u8; 32]), 1, Vec::new()),
                Err(PSP22Error::ZeroRecipientAddress)
            );
        }

        #[ink::test]
        fn transfer_from_consumes_allowance() {
            let mut token = deploy();
            let accs = accounts();

            assert_eq!(token.approve(accs.bob, 60), Ok(()));
            assert_eq!(token.allowance(accs.alice, accs.bob), 60);

            test::set_caller::<Env>(accs.bob);
            assert_eq!(token.transfer_from(accs.alice, accs.charlie, 40, Vec::new()), Ok(()));
            assert_eq!(token.balance_of(accs.charlie), 40);
            assert_eq!(token.allowance(accs.alice, accs.bob), 20);
        }

        #[ink::test]
        fn transfer_from_rejects_insufficient_allowance() {
            let mut token = deploy();
            let accs = accounts();

            assert_eq!(token.approve(accs.bob, 10), Ok(()));

            test::set_caller::<Env>(accs.bob);
            assert_eq!(
                token.transfer_from(accs.alice, accs.charlie, 11, Vec::new()),
                Err(PSP22Error::InsufficientAllowance)
            );
            assert_eq!(token.balance_of(accs.charlie), 0);
            assert_eq!(token.allowance(accs.alice, accs.bob), 10);
        }

        #[ink::test]
        fn transfer_from_keeps_allowance_when_balance_short() {
            let mut token = deploy();
            let accs = accounts();

            test::set_caller::<Env>(accs.bob);
            assert_eq!(token.approve(accs.charlie, 50), Ok(()));

            test::set_caller::<Env>(accs.charlie);
            assert_eq!(
                token.transfer_from(accs.bob, accs.django, 50, Vec::new()),
                Err(PSP22Error::InsufficientBalance)
            );
            assert_eq!(token.allowance(accs.bob, accs.charlie), 50);
        }

        #[ink::test]
        fn allowance_can_be_adjusted() {
            let mut token = deploy();
            let accs = accounts();

            assert_eq!(token.increase_allowance(accs.bob, 30), Ok(()));
            assert_eq!(token.increase_allowance(accs.bob, 20), Ok(()));
            assert_eq!(token.allowance(accs.alice, accs.bob), 50);
            assert_eq!(token.decrease_allowance(accs.bob, 45), Ok(()));
            assert_eq!(token.allowance(accs.alice, accs.bob), 5);
            assert_eq!(
                token.decrease_allowance(accs.bob, 6),
                Err(PSP22Error::InsufficientAllowance)
            );
        }

        #[ink::test]
        fn zero_value_transfer_is_noop() {
            let mut token = deploy();
            let accs = accounts();

            test::set_caller::<Env>(accs.bob);
            assert_eq!(token.transfer_from(accs.alice, accs.charlie, 0, Vec::new()), Ok(()));
            assert_eq!(token.balance_of(accs.alice), SUPPLY);
        }
    }
}
