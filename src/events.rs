multiversx_sc::imports!();

use crate::types::{Ballot, VoterGroup};

#[multiversx_sc::module]
pub trait EventsModule {
    // ── Ledger ──

    #[event("deposit")]
    fn deposit_event(&self, #[indexed] account: &ManagedAddress, amount: &BigUint);

    #[event("withdraw")]
    fn withdraw_event(&self, #[indexed] account: &ManagedAddress, amount: &BigUint);

    #[event("transfer")]
    fn transfer_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("accountFrozen")]
    fn account_frozen_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] epoch: u64,
        frozen_balance: &BigUint,
    );

    #[event("accountUnfrozen")]
    fn account_unfrozen_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] epoch: u64,
        restored: &BigUint,
    );

    // ── Timelock ──

    #[event("operationProposed")]
    fn operation_proposed_event(
        &self,
        #[indexed] fingerprint: &ManagedByteArray<Self::Api, 32>,
        proposed_at: u64,
    );

    #[event("operationExecuted")]
    fn operation_executed_event(
        &self,
        #[indexed] fingerprint: &ManagedByteArray<Self::Api, 32>,
        executed_at: u64,
    );

    // ── Charities ──

    #[event("charityPending")]
    fn charity_pending_event(&self, #[indexed] charity: &ManagedAddress, proposed_at: u64);

    #[event("charityActivated")]
    fn charity_activated_event(&self, #[indexed] charity: &ManagedAddress, activated_at: u64);

    // ── Governance ──

    #[event("voterRegistered")]
    fn voter_registered_event(&self, #[indexed] voter: &ManagedAddress, group: VoterGroup);

    #[event("issueOpened")]
    fn issue_opened_event(
        &self,
        #[indexed] fingerprint: &ManagedByteArray<Self::Api, 32>,
        deadline: u64,
    );

    #[event("ballotCast")]
    fn ballot_cast_event(
        &self,
        #[indexed] fingerprint: &ManagedByteArray<Self::Api, 32>,
        #[indexed] voter: &ManagedAddress,
        ballot: Ballot,
    );

    // ── Awards ──

    #[event("awardFinalized")]
    fn award_finalized_event(
        &self,
        #[indexed] award_time: u64,
        #[indexed] fingerprint: &ManagedByteArray<Self::Api, 32>,
        total_value: &BigUint,
    );

    #[event("awardClaimed")]
    fn award_claimed_event(
        &self,
        #[indexed] award_time: u64,
        #[indexed] charity: &ManagedAddress,
        distance: &BigUint,
    );

    #[event("awardCashed")]
    fn award_cashed_event(
        &self,
        #[indexed] award_time: u64,
        #[indexed] charity: &ManagedAddress,
        amount: &BigUint,
    );

    // ── Master ──

    #[event("haltChanged")]
    fn halt_changed_event(&self, #[indexed] master: &ManagedAddress, halted: bool);
}
