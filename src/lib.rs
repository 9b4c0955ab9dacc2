#![no_std]

multiversx_sc::imports!();

pub mod access;
pub mod award;
pub mod charity;
pub mod events;
pub mod governance;
pub mod ledger;
pub mod timelock;
pub mod types;

use types::{ClaimPolicy, PoolConfig};

// ============================================================
// Errors
// ============================================================

pub const ERR_UNAUTHORIZED: &str = "ERR_UNAUTHORIZED";
pub const ERR_HALTED: &str = "ERR_HALTED";
pub const ERR_INSUFFICIENT_BALANCE: &str = "ERR_INSUFFICIENT_BALANCE";
pub const ERR_FROZEN: &str = "ERR_FROZEN";
pub const ERR_INVALID_AMOUNT: &str = "ERR_INVALID_AMOUNT";
pub const ERR_INVALID_CONFIG: &str = "ERR_INVALID_CONFIG";
pub const ERR_EMPTY_ACCOUNTS: &str = "ERR_EMPTY_ACCOUNTS";
pub const ERR_DUPLICATE_ACCOUNT: &str = "ERR_DUPLICATE_ACCOUNT";
pub const ERR_NOT_REGISTERED: &str = "ERR_NOT_REGISTERED";
pub const ERR_ALREADY_REGISTERED: &str = "ERR_ALREADY_REGISTERED";
pub const ERR_ROUND_EXISTS: &str = "ERR_ROUND_EXISTS";

// ============================================================
// Contract
// ============================================================

/// Trustee-governed value pool that awards frozen surplus to charities.
///
/// Owners freeze accounts, register charities and propose award rounds;
/// every such action waits out a timelock, and award rounds additionally
/// need a ratifying vote. The master can halt all governed operations.
#[multiversx_sc::contract]
pub trait Ibis:
    events::EventsModule
    + access::AccessModule
    + timelock::TimelockModule
    + ledger::LedgerModule
    + charity::CharityModule
    + governance::GovernanceModule
    + award::AwardModule
{
    #[allow(clippy::too_many_arguments)]
    #[init]
    fn init(
        &self,
        master: ManagedAddress,
        quorum: u32,
        delay_duration: u64,
        vote_duration: u64,
        frozen_min_time: u64,
        award_min_time: u64,
        claim_policy: ClaimPolicy,
        owners: MultiValueEncoded<ManagedAddress>,
    ) {
        require!(!master.is_zero(), ERR_INVALID_CONFIG);
        require!(delay_duration > 0, ERR_INVALID_CONFIG);
        require!(vote_duration > 0, ERR_INVALID_CONFIG);

        for owner in owners.into_iter() {
            require!(!owner.is_zero(), ERR_INVALID_CONFIG);
            require!(self.owners().insert(owner), ERR_INVALID_CONFIG);
        }
        let owner_count = self.owners().len();
        require!(owner_count > 0, ERR_INVALID_CONFIG);
        require!(
            quorum > 0 && quorum as usize <= owner_count,
            ERR_INVALID_CONFIG
        );

        self.config().set(PoolConfig {
            master,
            quorum,
            delay_duration,
            vote_duration,
            frozen_min_time,
            award_min_time,
            claim_policy,
        });
        self.halted().set(false);
    }

    /// Logic upgrades leave configuration and every table untouched.
    #[upgrade]
    fn upgrade(&self) {}
}
