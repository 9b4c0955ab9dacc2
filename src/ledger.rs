multiversx_sc::imports!();

use crate::types::{Account, Fingerprint, TimelockOutcome};
use crate::{ERR_FROZEN, ERR_INSUFFICIENT_BALANCE, ERR_INVALID_AMOUNT};

const FREEZE_TAG: &[u8] = b"freeze";
const UNFREEZE_TAG: &[u8] = b"unfreeze";

/// Freezing is protective and applies on the first knock.
const FREEZE_DELAY: u64 = 0;

#[multiversx_sc::module]
pub trait LedgerModule:
    crate::events::EventsModule
    + crate::access::AccessModule
    + crate::timelock::TimelockModule
{
    // ========================================================
    // Custody
    // ========================================================

    #[endpoint(deposit)]
    #[payable("EGLD")]
    fn deposit(&self) {
        let caller = self.blockchain().get_caller();
        let amount = self.call_value().egld_value().clone_value();
        require!(amount > 0u64, ERR_INVALID_AMOUNT);

        self.credit(&caller, &amount);
        self.deposit_event(&caller, &amount);
    }

    #[endpoint(withdraw)]
    fn withdraw(&self, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        require!(amount > 0u64, ERR_INVALID_AMOUNT);

        let mut account = self.account(&caller);
        require!(!account.frozen, ERR_FROZEN);
        require!(account.balance >= amount, ERR_INSUFFICIENT_BALANCE);
        account.balance -= &amount;
        self.accounts(&caller).set(&account);

        self.send().direct_egld(&caller, &amount);
        self.withdraw_event(&caller, &amount);
    }

    #[endpoint(transfer)]
    fn transfer(&self, to: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        self.move_balance(&caller, &to, &amount);
        self.transfer_event(&caller, &to, &amount);
    }

    // ========================================================
    // Freezing (owners only, per account through the timelock)
    // ========================================================

    #[endpoint(freezeAccounts)]
    fn freeze_accounts(
        &self,
        accounts: MultiValueEncoded<ManagedAddress>,
    ) -> MultiValueEncoded<TimelockOutcome> {
        self.require_not_halted();
        let caller = self.blockchain().get_caller();
        self.require_owner(&caller);

        let mut outcomes = MultiValueEncoded::new();
        for address in accounts.into_iter() {
            outcomes.push(self.freeze_one(&address));
        }
        outcomes
    }

    #[endpoint(unfreezeAccounts)]
    fn unfreeze_accounts(
        &self,
        accounts: MultiValueEncoded<ManagedAddress>,
    ) -> MultiValueEncoded<TimelockOutcome> {
        self.require_not_halted();
        let caller = self.blockchain().get_caller();
        self.require_owner(&caller);

        let mut outcomes = MultiValueEncoded::new();
        for address in accounts.into_iter() {
            outcomes.push(self.unfreeze_one(&address));
        }
        outcomes
    }

    fn freeze_one(&self, address: &ManagedAddress) -> TimelockOutcome {
        let mut account = self.account(address);
        if account.frozen {
            return TimelockOutcome::AlreadyExecuted;
        }

        let fingerprint = self.account_fingerprint(FREEZE_TAG, address, account.epoch);
        let outcome = self.pass_timelock(&fingerprint, FREEZE_DELAY);
        if outcome == TimelockOutcome::Ready {
            account.frozen = true;
            account.frozen_at = self.blockchain().get_block_timestamp();
            account.frozen_balance = core::mem::replace(&mut account.balance, BigUint::zero());
            self.accounts(address).set(&account);
            self.account_frozen_event(address, account.epoch, &account.frozen_balance);
        }
        outcome
    }

    fn unfreeze_one(&self, address: &ManagedAddress) -> TimelockOutcome {
        let mut account = self.account(address);
        // Nothing to undo: the account is already where unfreeze would leave it.
        if !account.frozen {
            return TimelockOutcome::AlreadyExecuted;
        }

        let delay = self.config().get().delay_duration;
        let fingerprint = self.account_fingerprint(UNFREEZE_TAG, address, account.epoch);
        let outcome = self.pass_timelock(&fingerprint, delay);
        if outcome == TimelockOutcome::Ready {
            let restored = core::mem::replace(&mut account.frozen_balance, BigUint::zero());
            account.balance += &restored;
            account.frozen = false;
            account.frozen_at = 0;
            let epoch = account.epoch;
            account.epoch += 1;
            self.accounts(address).set(&account);
            self.account_unfrozen_event(address, epoch, &restored);
        }
        outcome
    }

    // ========================================================
    // Internal bookkeeping
    // ========================================================

    fn account(&self, address: &ManagedAddress) -> Account<Self::Api> {
        let mapper = self.accounts(address);
        if mapper.is_empty() {
            Account::default()
        } else {
            mapper.get()
        }
    }

    /// Credits spendable balance, or the frozen balance if the account is frozen.
    fn credit(&self, address: &ManagedAddress, amount: &BigUint) {
        let mut account = self.account(address);
        if account.frozen {
            account.frozen_balance += amount;
        } else {
            account.balance += amount;
        }
        self.accounts(address).set(&account);
    }

    fn move_balance(&self, from: &ManagedAddress, to: &ManagedAddress, amount: &BigUint) {
        let mut sender = self.account(from);
        require!(!sender.frozen, ERR_FROZEN);
        require!(!self.account(to).frozen, ERR_FROZEN);
        require!(sender.balance >= *amount, ERR_INSUFFICIENT_BALANCE);

        sender.balance -= amount;
        self.accounts(from).set(&sender);

        let mut receiver = self.account(to);
        receiver.balance += amount;
        self.accounts(to).set(&receiver);
    }

    /// Hands the whole frozen balance of `address` to the caller. The account
    /// stays frozen with nothing left behind.
    fn take_frozen(&self, address: &ManagedAddress) -> BigUint {
        let mut account = self.account(address);
        if !account.frozen {
            return BigUint::zero();
        }
        let taken = core::mem::replace(&mut account.frozen_balance, BigUint::zero());
        self.accounts(address).set(&account);
        taken
    }

    fn account_fingerprint(
        &self,
        tag: &[u8],
        address: &ManagedAddress,
        epoch: u64,
    ) -> Fingerprint<Self::Api> {
        let mut preimage = ManagedBuffer::new_from_bytes(tag);
        preimage.append(address.as_managed_buffer());
        preimage.append_bytes(&epoch.to_be_bytes());
        self.fingerprint(&preimage)
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(balanceOf)]
    fn balance_of(&self, address: &ManagedAddress) -> BigUint {
        self.account(address).balance
    }

    #[view(frozenValue)]
    fn frozen_value(&self, address: &ManagedAddress) -> BigUint {
        self.account(address).frozen_balance
    }

    #[view(isFrozen)]
    fn is_frozen(&self, address: &ManagedAddress) -> bool {
        self.account(address).frozen
    }

    #[view(getAccount)]
    fn get_account(&self, address: &ManagedAddress) -> Account<Self::Api> {
        self.account(address)
    }

    #[view(freezeFingerprint)]
    fn freeze_fingerprint(&self, address: &ManagedAddress) -> ManagedByteArray<Self::Api, 32> {
        let epoch = self.account(address).epoch;
        self.account_fingerprint(FREEZE_TAG, address, epoch)
    }

    #[view(unfreezeFingerprint)]
    fn unfreeze_fingerprint(&self, address: &ManagedAddress) -> ManagedByteArray<Self::Api, 32> {
        let epoch = self.account(address).epoch;
        self.account_fingerprint(UNFREEZE_TAG, address, epoch)
    }

    #[storage_mapper("accounts")]
    fn accounts(&self, address: &ManagedAddress) -> SingleValueMapper<Account<Self::Api>>;
}
