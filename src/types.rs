multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// keccak256 digest of an operation's canonical arguments.
pub type Fingerprint<M> = ManagedByteArray<M, 32>;

// ============================================================
// Configuration, fixed at init and never written again
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClaimPolicy {
    /// A charity records one claim per round; repeats are rejected.
    OneShot,
    /// A charity may claim again; the new distance replaces the old one.
    Overwrite,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct PoolConfig<M: ManagedTypeApi> {
    pub master: ManagedAddress<M>,
    /// Owner yes votes needed to ratify a governed operation. Holders never
    /// count toward it, but every ballot counts in the yes/no majority, so
    /// holders registered before the deadline can still outvote the owners.
    pub quorum: u32,
    pub delay_duration: u64,
    pub vote_duration: u64,
    /// Minimum time an account must sit frozen before its value can be awarded.
    pub frozen_min_time: u64,
    /// Minimum time between finalizing a round and cashing it out.
    pub award_min_time: u64,
    pub claim_policy: ClaimPolicy,
}

// ============================================================
// Ledger
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Account<M: ManagedTypeApi> {
    pub balance: BigUint<M>,
    pub frozen: bool,
    /// Value held back while frozen. Zero whenever `frozen` is false.
    pub frozen_balance: BigUint<M>,
    pub frozen_at: u64,
    /// Bumped on every completed unfreeze so the next freeze cycle
    /// gets fresh fingerprints.
    pub epoch: u64,
}

impl<M: ManagedTypeApi> Default for Account<M> {
    fn default() -> Self {
        Account {
            balance: BigUint::zero(),
            frozen: false,
            frozen_balance: BigUint::zero(),
            frozen_at: 0,
            epoch: 0,
        }
    }
}

// ============================================================
// Timelock
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub struct PendingOperation {
    pub proposed_at: u64,
    pub executed: bool,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimelockOutcome {
    /// First sighting of the fingerprint. Nothing applied yet.
    Proposed,
    /// Delay elapsed; the caller applies the effect now, exactly once.
    Ready,
    /// Still inside the delay window. Re-knock later.
    NotYetDue,
    /// Effect already applied (or already in the target state).
    AlreadyExecuted,
}

/// Result of `try_execute` on its own, before any proposal bookkeeping.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExecuteCheck {
    Ready,
    NotYetDue,
    AlreadyExecuted,
    Unknown,
}

// ============================================================
// Charity registry
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum CharityStatus {
    Unregistered,
    Pending,
    Active,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum CharityOutcome {
    PendingAdded,
    /// Second call came too early; `proposed_at` is left alone.
    StillPending,
    Activated,
    AlreadyActive,
}

// ============================================================
// Governance
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum VoterGroup {
    Owner,
    Holder,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Ballot {
    Yes,
    No,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Issue {
    /// Ballots are stored per issue id, so a reopened issue starts empty.
    pub id: u64,
    pub opened_at: u64,
    pub deadline: u64,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tally {
    pub yes: u32,
    pub no: u32,
    /// Yes ballots from the owner group; only these count toward `quorum`.
    pub owner_yes: u32,
    pub quorum_met: bool,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum VoteOutcome {
    Recorded,
    IssueClosed,
    /// The fingerprint is still inside its timelock delay.
    NotYetOpen,
}

// ============================================================
// Award engine
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum AwardStage {
    /// Timelock passed, issue open for votes.
    Voting,
    /// Round created under `award_time`.
    Finalized,
}

/// One proposal to award a fixed set of frozen accounts, keyed by fingerprint.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct AwardAttempt<M: ManagedTypeApi> {
    pub accounts: ManagedVec<M, ManagedAddress<M>>,
    pub stage: AwardStage,
    pub award_time: u64,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct AwardClaim<M: ManagedTypeApi> {
    pub charity: ManagedAddress<M>,
    pub distance: BigUint<M>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct AwardRound<M: ManagedTypeApi> {
    pub award_time: u64,
    pub fingerprint: Fingerprint<M>,
    pub total_value: BigUint<M>,
    pub target: ManagedByteArray<M, 32>,
    /// Running minimum. Earliest claim keeps the lead on ties.
    pub best: Option<AwardClaim<M>>,
    pub cashed: bool,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum AwardOutcome {
    Proposed,
    NotYetDue,
    VotingOpened,
    VotingOpen,
    QuorumNotMet,
    FrozenTooRecently,
    Finalized(u64),
    AlreadyExecuted,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClaimOutcome {
    Recorded,
    RoundNotFinalized,
    AlreadyClaimed,
    AlreadyCashed,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum CashOutcome {
    Paid,
    NotWinner,
    AlreadyCashed,
    TooEarly,
    RoundNotFinalized,
}
