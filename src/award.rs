multiversx_sc::imports!();

use crate::types::{
    AwardAttempt, AwardClaim, AwardOutcome, AwardRound, AwardStage, CashOutcome, CharityStatus,
    ClaimOutcome, ClaimPolicy, Fingerprint, TimelockOutcome,
};
use crate::{ERR_DUPLICATE_ACCOUNT, ERR_EMPTY_ACCOUNTS, ERR_ROUND_EXISTS, ERR_UNAUTHORIZED};

const AWARD_TAG: &[u8] = b"award";

/// Turns frozen balances into a charity award.
///
/// Lifecycle of one attempt, keyed by its fingerprint:
/// timelock (`Proposed` → `Ready`) → governance issue (`VotingOpened`) →
/// finalization once the vote has closed with quorum (`Finalized`).
/// The finalized round is keyed by its finalization timestamp. Charities
/// then claim with a distance derived from the round target; the smallest
/// distance may cash out after `award_min_time`.
#[multiversx_sc::module]
pub trait AwardModule:
    crate::events::EventsModule
    + crate::access::AccessModule
    + crate::timelock::TimelockModule
    + crate::ledger::LedgerModule
    + crate::charity::CharityModule
    + crate::governance::GovernanceModule
{
    // ========================================================
    // ENDPOINT: proposeAward
    // Repeated owner calls with the same accounts drive the attempt.
    // ========================================================

    #[endpoint(proposeAward)]
    fn propose_award(&self, accounts: MultiValueEncoded<ManagedAddress>) -> AwardOutcome {
        self.require_not_halted();
        let caller = self.blockchain().get_caller();
        self.require_owner(&caller);

        let accounts = self.collect_award_accounts(accounts);
        let fingerprint = self.award_fingerprint_of(&accounts);
        let now = self.blockchain().get_block_timestamp();

        let attempt_mapper = self.award_attempts(&fingerprint);
        if attempt_mapper.is_empty() {
            let config = self.config().get();
            return match self.pass_timelock(&fingerprint, config.delay_duration) {
                TimelockOutcome::Proposed => AwardOutcome::Proposed,
                TimelockOutcome::NotYetDue => AwardOutcome::NotYetDue,
                TimelockOutcome::AlreadyExecuted => AwardOutcome::AlreadyExecuted,
                TimelockOutcome::Ready => {
                    // Ballots cast before this point belong to a stale issue.
                    self.reopen_issue(&fingerprint, now);
                    attempt_mapper.set(AwardAttempt {
                        accounts,
                        stage: AwardStage::Voting,
                        award_time: 0,
                    });
                    AwardOutcome::VotingOpened
                }
            };
        }

        let attempt = attempt_mapper.get();
        if attempt.stage == AwardStage::Finalized {
            return AwardOutcome::AlreadyExecuted;
        }
        if !self.is_voting_closed(&fingerprint, now) {
            return AwardOutcome::VotingOpen;
        }
        if !self.get_tally(&fingerprint).quorum_met {
            return AwardOutcome::QuorumNotMet;
        }
        if !self.frozen_long_enough(&attempt.accounts, now) {
            return AwardOutcome::FrozenTooRecently;
        }

        self.finalize_round(&fingerprint, attempt, now);
        AwardOutcome::Finalized(now)
    }

    fn finalize_round(
        &self,
        fingerprint: &Fingerprint<Self::Api>,
        mut attempt: AwardAttempt<Self::Api>,
        now: u64,
    ) {
        require!(self.award_rounds(now).is_empty(), ERR_ROUND_EXISTS);

        let mut total_value = BigUint::zero();
        for address in attempt.accounts.iter() {
            total_value += self.take_frozen(&address);
        }

        let target = self.round_target(fingerprint);
        self.award_rounds(now).set(AwardRound {
            award_time: now,
            fingerprint: fingerprint.clone(),
            total_value: total_value.clone(),
            target,
            best: None,
            cashed: false,
        });

        attempt.stage = AwardStage::Finalized;
        attempt.award_time = now;
        self.award_attempts(fingerprint).set(attempt);

        self.award_finalized_event(now, fingerprint, &total_value);
    }

    fn collect_award_accounts(
        &self,
        accounts: MultiValueEncoded<ManagedAddress>,
    ) -> ManagedVec<Self::Api, ManagedAddress> {
        let mut collected: ManagedVec<Self::Api, ManagedAddress> = ManagedVec::new();
        for address in accounts.into_iter() {
            require!(!collected.contains(&address), ERR_DUPLICATE_ACCOUNT);
            collected.push(address);
        }
        require!(!collected.is_empty(), ERR_EMPTY_ACCOUNTS);
        collected
    }

    /// Frozen accounts must have been frozen for `frozen_min_time`.
    /// Accounts that were never frozen pass and contribute nothing.
    fn frozen_long_enough(
        &self,
        accounts: &ManagedVec<Self::Api, ManagedAddress>,
        now: u64,
    ) -> bool {
        let frozen_min_time = self.config().get().frozen_min_time;
        accounts.iter().all(|address| {
            let account = self.account(&address);
            !account.frozen || now >= account.frozen_at.saturating_add(frozen_min_time)
        })
    }

    fn award_fingerprint_of(
        &self,
        accounts: &ManagedVec<Self::Api, ManagedAddress>,
    ) -> Fingerprint<Self::Api> {
        let mut preimage = ManagedBuffer::new_from_bytes(AWARD_TAG);
        for address in accounts.iter() {
            preimage.append(address.as_managed_buffer());
            preimage.append_bytes(&self.account(&address).epoch.to_be_bytes());
        }
        self.fingerprint(&preimage)
    }

    /// The block random seed is unknown to everyone until the finalizing
    /// block is produced.
    fn round_target(
        &self,
        fingerprint: &Fingerprint<Self::Api>,
    ) -> ManagedByteArray<Self::Api, 32> {
        let seed = self.blockchain().get_block_random_seed();
        let mut preimage = ManagedBuffer::new();
        preimage.append(seed.as_managed_buffer());
        preimage.append(fingerprint.as_managed_buffer());
        self.crypto().keccak256(&preimage)
    }

    fn distance_to_target(
        &self,
        target: &ManagedByteArray<Self::Api, 32>,
        charity: &ManagedAddress,
    ) -> BigUint {
        let mut preimage = ManagedBuffer::new();
        preimage.append(target.as_managed_buffer());
        preimage.append(charity.as_managed_buffer());
        let digest = self.crypto().keccak256(&preimage);
        BigUint::from_bytes_be_buffer(digest.as_managed_buffer())
    }

    // ========================================================
    // ENDPOINT: claimAward
    // An active charity records its distance for a round.
    // ========================================================

    #[endpoint(claimAward)]
    fn claim_award(&self, award_time: u64, charity: ManagedAddress) -> ClaimOutcome {
        self.require_not_halted();
        let caller = self.blockchain().get_caller();
        require!(caller == charity, ERR_UNAUTHORIZED);
        require!(
            self.charity_status(&charity) == CharityStatus::Active,
            ERR_UNAUTHORIZED
        );

        let round_mapper = self.award_rounds(award_time);
        if round_mapper.is_empty() {
            return ClaimOutcome::RoundNotFinalized;
        }

        let mut round = round_mapper.get();
        if round.cashed {
            return ClaimOutcome::AlreadyCashed;
        }

        let mut claims = self.award_claims(award_time);
        let one_shot = self.config().get().claim_policy == ClaimPolicy::OneShot;
        if one_shot && claims.contains_key(&charity) {
            return ClaimOutcome::AlreadyClaimed;
        }

        let distance = self.distance_to_target(&round.target, &charity);
        claims.insert(charity.clone(), distance.clone());

        // Strictly smaller only: on a tie the earlier claimant keeps the lead.
        let takes_lead = match &round.best {
            Some(best) => distance < best.distance,
            None => true,
        };
        if takes_lead {
            round.best = Some(AwardClaim {
                charity: charity.clone(),
                distance: distance.clone(),
            });
            round_mapper.set(round);
        }

        self.award_claimed_event(award_time, &charity, &distance);
        ClaimOutcome::Recorded
    }

    // ========================================================
    // ENDPOINT: cashAward
    // Anyone may trigger payout to the current closest charity.
    // ========================================================

    #[endpoint(cashAward)]
    fn cash_award(&self, award_time: u64, charity: ManagedAddress) -> CashOutcome {
        self.require_not_halted();

        let round_mapper = self.award_rounds(award_time);
        if round_mapper.is_empty() {
            return CashOutcome::RoundNotFinalized;
        }

        let mut round = round_mapper.get();
        if round.cashed {
            return CashOutcome::AlreadyCashed;
        }

        let now = self.blockchain().get_block_timestamp();
        let award_min_time = self.config().get().award_min_time;
        if now < award_time.saturating_add(award_min_time) {
            return CashOutcome::TooEarly;
        }

        let is_winner = match &round.best {
            Some(best) => best.charity == charity,
            None => false,
        };
        if !is_winner {
            return CashOutcome::NotWinner;
        }

        round.cashed = true;
        let amount = round.total_value.clone();
        round_mapper.set(round);
        self.credit(&charity, &amount);

        self.award_cashed_event(award_time, &charity, &amount);
        CashOutcome::Paid
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(awardFingerprint)]
    fn award_fingerprint(
        &self,
        accounts: MultiValueEncoded<ManagedAddress>,
    ) -> ManagedByteArray<Self::Api, 32> {
        let accounts = self.collect_award_accounts(accounts);
        self.award_fingerprint_of(&accounts)
    }

    #[view(awardValue)]
    fn award_value(&self, award_time: u64) -> BigUint {
        let mapper = self.award_rounds(award_time);
        if mapper.is_empty() {
            BigUint::zero()
        } else {
            mapper.get().total_value
        }
    }

    #[view(awardClosest)]
    fn award_closest(&self, award_time: u64) -> OptionalValue<BigUint> {
        let mapper = self.award_rounds(award_time);
        if mapper.is_empty() {
            return OptionalValue::None;
        }
        mapper.get().best.map(|best| best.distance).into()
    }

    #[view(awardWinner)]
    fn award_winner(&self, award_time: u64) -> OptionalValue<ManagedAddress> {
        let mapper = self.award_rounds(award_time);
        if mapper.is_empty() {
            return OptionalValue::None;
        }
        mapper.get().best.map(|best| best.charity).into()
    }

    #[view(awardTarget)]
    fn award_target(&self, award_time: u64) -> OptionalValue<ManagedByteArray<Self::Api, 32>> {
        let mapper = self.award_rounds(award_time);
        if mapper.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(mapper.get().target)
        }
    }

    /// Recomputes a charity's distance so anyone can check a claim before
    /// the round is cashed.
    #[view(awardDistance)]
    fn award_distance(&self, award_time: u64, charity: ManagedAddress) -> OptionalValue<BigUint> {
        let mapper = self.award_rounds(award_time);
        if mapper.is_empty() {
            return OptionalValue::None;
        }
        OptionalValue::Some(self.distance_to_target(&mapper.get().target, &charity))
    }

    #[view(getAwardClaim)]
    fn get_award_claim(&self, award_time: u64, charity: ManagedAddress) -> OptionalValue<BigUint> {
        self.award_claims(award_time).get(&charity).into()
    }

    #[view(getAwardRound)]
    fn get_award_round(&self, award_time: u64) -> OptionalValue<AwardRound<Self::Api>> {
        let mapper = self.award_rounds(award_time);
        if mapper.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(mapper.get())
        }
    }

    #[view(getAwardAttempt)]
    fn get_award_attempt(
        &self,
        fingerprint: ManagedByteArray<Self::Api, 32>,
    ) -> OptionalValue<AwardAttempt<Self::Api>> {
        let mapper = self.award_attempts(&fingerprint);
        if mapper.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(mapper.get())
        }
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("awardAttempts")]
    fn award_attempts(
        &self,
        fingerprint: &ManagedByteArray<Self::Api, 32>,
    ) -> SingleValueMapper<AwardAttempt<Self::Api>>;

    #[storage_mapper("awardRounds")]
    fn award_rounds(&self, award_time: u64) -> SingleValueMapper<AwardRound<Self::Api>>;

    #[storage_mapper("awardClaims")]
    fn award_claims(&self, award_time: u64) -> MapMapper<ManagedAddress, BigUint>;
}
