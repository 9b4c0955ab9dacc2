multiversx_sc::imports!();

use crate::types::{Ballot, Fingerprint, Issue, Tally, VoteOutcome, VoterGroup};
use crate::{ERR_ALREADY_REGISTERED, ERR_NOT_REGISTERED, ERR_UNAUTHORIZED};

/// Ballots on operation fingerprints. Issues and ballots are kept forever
/// as an audit trail; the tally is always recomputed on read from the
/// ballots of the fingerprint's current issue.
#[multiversx_sc::module]
pub trait GovernanceModule:
    crate::events::EventsModule
    + crate::access::AccessModule
    + crate::timelock::TimelockModule
    + crate::ledger::LedgerModule
{
    #[endpoint(registerVoter)]
    fn register_voter(&self, group: VoterGroup) {
        self.require_not_halted();
        let caller = self.blockchain().get_caller();
        require!(!self.voters().contains(&caller), ERR_ALREADY_REGISTERED);

        match group {
            VoterGroup::Owner => self.require_owner(&caller),
            VoterGroup::Holder => {
                let account = self.account(&caller);
                require!(
                    account.balance > 0u64 || account.frozen_balance > 0u64,
                    ERR_UNAUTHORIZED
                );
            }
        }

        self.voters().insert(caller.clone());
        self.voter_group(&caller).set(group);
        self.voter_registered_event(&caller, group);
    }

    /// Last ballot per voter wins. Voting on a fingerprint nobody has raised
    /// yet opens an issue for it. Nothing is recorded while the fingerprint
    /// waits out its timelock; the award engine opens a fresh issue once the
    /// delay is over.
    #[endpoint(vote)]
    fn vote(&self, fingerprint: ManagedByteArray<Self::Api, 32>, ballot: Ballot) -> VoteOutcome {
        self.require_not_halted();
        let caller = self.blockchain().get_caller();
        require!(self.voters().contains(&caller), ERR_NOT_REGISTERED);

        let now = self.blockchain().get_block_timestamp();
        if self.is_awaiting_timelock(&fingerprint) {
            return VoteOutcome::NotYetOpen;
        }
        let issue = self.open_issue(&fingerprint, now);
        if now >= issue.deadline {
            return VoteOutcome::IssueClosed;
        }

        self.ballots(&fingerprint, issue.id).insert(caller.clone(), ballot);
        self.ballot_cast_event(&fingerprint, &caller, ballot);
        VoteOutcome::Recorded
    }

    /// Returns the existing issue, or opens one running `vote_duration` from now.
    fn open_issue(&self, fingerprint: &Fingerprint<Self::Api>, now: u64) -> Issue {
        let mapper = self.issues(fingerprint);
        if !mapper.is_empty() {
            return mapper.get();
        }
        self.reopen_issue(fingerprint, now)
    }

    /// Opens a new issue under a fresh id, replacing any earlier one. Ballots
    /// of the replaced issue stay stored but no longer count.
    fn reopen_issue(&self, fingerprint: &Fingerprint<Self::Api>, now: u64) -> Issue {
        let id = self.last_issue_id().update(|last| {
            *last += 1;
            *last
        });
        let issue = Issue {
            id,
            opened_at: now,
            deadline: now.saturating_add(self.config().get().vote_duration),
        };
        self.issues(fingerprint).set(issue);
        self.issue_opened_event(fingerprint, issue.deadline);
        issue
    }

    fn is_voting_closed(&self, fingerprint: &Fingerprint<Self::Api>, now: u64) -> bool {
        let mapper = self.issues(fingerprint);
        !mapper.is_empty() && now >= mapper.get().deadline
    }

    #[view(getTally)]
    fn get_tally(&self, fingerprint: &ManagedByteArray<Self::Api, 32>) -> Tally {
        let mut yes = 0u32;
        let mut no = 0u32;
        let mut owner_yes = 0u32;

        let issue_mapper = self.issues(fingerprint);
        if !issue_mapper.is_empty() {
            let issue_id = issue_mapper.get().id;
            for (voter, ballot) in self.ballots(fingerprint, issue_id).iter() {
                match ballot {
                    Ballot::Yes => {
                        yes += 1;
                        if self.voter_group(&voter).get() == VoterGroup::Owner {
                            owner_yes += 1;
                        }
                    }
                    Ballot::No => no += 1,
                }
            }
        }

        let quorum = self.config().get().quorum;
        Tally {
            yes,
            no,
            owner_yes,
            quorum_met: owner_yes >= quorum && yes > no,
        }
    }

    #[view(getIssue)]
    fn get_issue(&self, fingerprint: &ManagedByteArray<Self::Api, 32>) -> OptionalValue<Issue> {
        let mapper = self.issues(fingerprint);
        if mapper.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(mapper.get())
        }
    }

    #[view(getBallot)]
    fn get_ballot(
        &self,
        fingerprint: &ManagedByteArray<Self::Api, 32>,
        voter: &ManagedAddress,
    ) -> OptionalValue<Ballot> {
        let issue_mapper = self.issues(fingerprint);
        if issue_mapper.is_empty() {
            return OptionalValue::None;
        }
        self.ballots(fingerprint, issue_mapper.get().id).get(voter).into()
    }

    #[view(getVoterGroup)]
    fn get_voter_group(&self, address: &ManagedAddress) -> OptionalValue<VoterGroup> {
        if self.voters().contains(address) {
            OptionalValue::Some(self.voter_group(address).get())
        } else {
            OptionalValue::None
        }
    }

    #[view(isVoter)]
    fn is_voter(&self, address: &ManagedAddress) -> bool {
        self.voters().contains(address)
    }

    #[view(getVoterCount)]
    fn get_voter_count(&self) -> usize {
        self.voters().len()
    }

    #[storage_mapper("voters")]
    fn voters(&self) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("voterGroup")]
    fn voter_group(&self, voter: &ManagedAddress) -> SingleValueMapper<VoterGroup>;

    #[storage_mapper("issues")]
    fn issues(&self, fingerprint: &ManagedByteArray<Self::Api, 32>) -> SingleValueMapper<Issue>;

    #[storage_mapper("lastIssueId")]
    fn last_issue_id(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("ballots")]
    fn ballots(
        &self,
        fingerprint: &ManagedByteArray<Self::Api, 32>,
        issue_id: u64,
    ) -> MapMapper<ManagedAddress, Ballot>;
}
