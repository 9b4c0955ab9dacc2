#![allow(dead_code, deprecated)]

use multiversx_sc::types::{Address, ManagedAddress, ManagedByteArray, MultiValueEncoded};
use multiversx_sc_scenario::{
    api::DebugApi, managed_address, num_bigint, rust_biguint, whitebox_legacy::*,
};

use ibis::award::AwardModule;
use ibis::charity::CharityModule;
use ibis::governance::GovernanceModule;
use ibis::ledger::LedgerModule;
use ibis::types::{
    AwardOutcome, Ballot, CashOutcome, CharityOutcome, ClaimOutcome, ClaimPolicy, TimelockOutcome,
    VoteOutcome, VoterGroup,
};
use ibis::Ibis;

pub const WASM_PATH: &str = "output/ibis.wasm";

pub const START: u64 = 1_000;
pub const DELAY: u64 = 100;
pub const VOTE: u64 = 200;
pub const FROZEN_MIN: u64 = 50;
pub const AWARD_MIN: u64 = 300;
pub const QUORUM: u32 = 2;

pub const USER_FUNDS: u64 = 10_000_000_000;
pub const DEPOSIT_1: u64 = 2_000_000_000;
pub const TRANSFER_1: u64 = 1_000_000_000;

pub struct PoolSetup<IbisObjBuilder>
where
    IbisObjBuilder: 'static + Copy + Fn() -> ibis::ContractObj<DebugApi>,
{
    pub b_mock: BlockchainStateWrapper,
    pub owners: [Address; 3],
    pub master: Address,
    pub user1: Address,
    pub user2: Address,
    pub charity1: Address,
    pub charity2: Address,
    pub outsider: Address,
    pub sc_wrapper: ContractObjWrapper<ibis::ContractObj<DebugApi>, IbisObjBuilder>,
    pub now: u64,
    pub owners_registered: bool,
}

pub fn setup_pool<IbisObjBuilder>(
    builder: IbisObjBuilder,
    claim_policy: ClaimPolicy,
) -> PoolSetup<IbisObjBuilder>
where
    IbisObjBuilder: 'static + Copy + Fn() -> ibis::ContractObj<DebugApi>,
{
    setup_pool_with(builder, claim_policy, FROZEN_MIN)
}

pub fn setup_pool_with<IbisObjBuilder>(
    builder: IbisObjBuilder,
    claim_policy: ClaimPolicy,
    frozen_min_time: u64,
) -> PoolSetup<IbisObjBuilder>
where
    IbisObjBuilder: 'static + Copy + Fn() -> ibis::ContractObj<DebugApi>,
{
    let rust_zero = rust_biguint!(0u64);
    let mut b_mock = BlockchainStateWrapper::new();

    let owner1 = b_mock.create_user_account(&rust_zero);
    let owner2 = b_mock.create_user_account(&rust_zero);
    let owner3 = b_mock.create_user_account(&rust_zero);
    let master = b_mock.create_user_account(&rust_zero);
    let user1 = b_mock.create_user_account(&rust_biguint!(USER_FUNDS));
    let user2 = b_mock.create_user_account(&rust_biguint!(USER_FUNDS));
    let charity1 = b_mock.create_user_account(&rust_zero);
    let charity2 = b_mock.create_user_account(&rust_zero);
    let outsider = b_mock.create_user_account(&rust_zero);

    let sc_wrapper = b_mock.create_sc_account(&rust_zero, Some(&owner1), builder, WASM_PATH);

    b_mock.set_block_timestamp(START);
    b_mock
        .execute_tx(&owner1, &sc_wrapper, &rust_zero, |sc| {
            let mut owners = MultiValueEncoded::new();
            owners.push(managed_address!(&owner1));
            owners.push(managed_address!(&owner2));
            owners.push(managed_address!(&owner3));
            sc.init(
                managed_address!(&master),
                QUORUM,
                DELAY,
                VOTE,
                frozen_min_time,
                AWARD_MIN,
                claim_policy,
                owners,
            );
        })
        .assert_ok();

    PoolSetup {
        b_mock,
        owners: [owner1, owner2, owner3],
        master,
        user1,
        user2,
        charity1,
        charity2,
        outsider,
        sc_wrapper,
        now: START,
        owners_registered: false,
    }
}

impl<IbisObjBuilder> PoolSetup<IbisObjBuilder>
where
    IbisObjBuilder: 'static + Copy + Fn() -> ibis::ContractObj<DebugApi>,
{
    pub fn owner(&self, index: usize) -> Address {
        self.owners[index].clone()
    }

    pub fn advance(&mut self, seconds: u64) {
        self.now += seconds;
        self.b_mock.set_block_timestamp(self.now);
    }

    pub fn deposit(&mut self, who: &Address, amount: u64) {
        self.b_mock
            .execute_tx(who, &self.sc_wrapper, &rust_biguint!(amount), |sc| {
                sc.deposit();
            })
            .assert_ok();
    }

    pub fn freeze(&mut self, caller: &Address, accounts: &[Address]) -> Vec<TimelockOutcome> {
        let mut outcomes = Vec::new();
        self.b_mock
            .execute_tx(caller, &self.sc_wrapper, &rust_biguint!(0u64), |sc| {
                outcomes = sc.freeze_accounts(address_args(accounts)).into_iter().collect();
            })
            .assert_ok();
        outcomes
    }

    pub fn unfreeze(&mut self, caller: &Address, accounts: &[Address]) -> Vec<TimelockOutcome> {
        let mut outcomes = Vec::new();
        self.b_mock
            .execute_tx(caller, &self.sc_wrapper, &rust_biguint!(0u64), |sc| {
                outcomes = sc.unfreeze_accounts(address_args(accounts)).into_iter().collect();
            })
            .assert_ok();
        outcomes
    }

    pub fn add_charity(&mut self, caller: &Address, charity: &Address) -> CharityOutcome {
        let mut outcome = CharityOutcome::PendingAdded;
        self.b_mock
            .execute_tx(caller, &self.sc_wrapper, &rust_biguint!(0u64), |sc| {
                outcome = sc.add_charity(managed_address!(charity));
            })
            .assert_ok();
        outcome
    }

    /// Two calls a full delay apart. Leaves the clock advanced.
    pub fn activate_charity(&mut self, charity: &Address) {
        let owner = self.owner(0);
        assert_eq!(self.add_charity(&owner, charity), CharityOutcome::PendingAdded);
        self.advance(DELAY);
        assert_eq!(self.add_charity(&owner, charity), CharityOutcome::Activated);
    }

    pub fn register_voter(&mut self, who: &Address, group: VoterGroup) {
        self.b_mock
            .execute_tx(who, &self.sc_wrapper, &rust_biguint!(0u64), |sc| {
                sc.register_voter(group);
            })
            .assert_ok();
    }

    pub fn register_owners(&mut self) {
        if self.owners_registered {
            return;
        }
        self.owners_registered = true;
        for index in 0..3 {
            let owner = self.owner(index);
            self.register_voter(&owner, VoterGroup::Owner);
        }
    }

    pub fn vote(&mut self, who: &Address, fingerprint: &[u8; 32], ballot: Ballot) -> VoteOutcome {
        let mut outcome = VoteOutcome::IssueClosed;
        self.b_mock
            .execute_tx(who, &self.sc_wrapper, &rust_biguint!(0u64), |sc| {
                outcome = sc.vote(ManagedByteArray::new_from_bytes(fingerprint), ballot);
            })
            .assert_ok();
        outcome
    }

    pub fn propose_award(&mut self, caller: &Address, accounts: &[Address]) -> AwardOutcome {
        let mut outcome = AwardOutcome::Proposed;
        self.b_mock
            .execute_tx(caller, &self.sc_wrapper, &rust_biguint!(0u64), |sc| {
                outcome = sc.propose_award(address_args(accounts));
            })
            .assert_ok();
        outcome
    }

    pub fn award_fingerprint(&mut self, accounts: &[Address]) -> [u8; 32] {
        let mut fingerprint = [0u8; 32];
        self.b_mock
            .execute_query(&self.sc_wrapper, |sc| {
                fingerprint = sc.award_fingerprint(address_args(accounts)).to_byte_array();
            })
            .assert_ok();
        fingerprint
    }

    pub fn claim(&mut self, charity: &Address, award_time: u64) -> ClaimOutcome {
        let mut outcome = ClaimOutcome::RoundNotFinalized;
        self.b_mock
            .execute_tx(charity, &self.sc_wrapper, &rust_biguint!(0u64), |sc| {
                outcome = sc.claim_award(award_time, managed_address!(charity));
            })
            .assert_ok();
        outcome
    }

    pub fn cash(&mut self, caller: &Address, award_time: u64, charity: &Address) -> CashOutcome {
        let mut outcome = CashOutcome::RoundNotFinalized;
        self.b_mock
            .execute_tx(caller, &self.sc_wrapper, &rust_biguint!(0u64), |sc| {
                outcome = sc.cash_award(award_time, managed_address!(charity));
            })
            .assert_ok();
        outcome
    }

    /// Distance of `charity` to the round target, as a plain big integer.
    pub fn distance(&mut self, award_time: u64, charity: &Address) -> num_bigint::BigUint {
        let mut bytes = Vec::new();
        self.b_mock
            .execute_query(&self.sc_wrapper, |sc| {
                let distance = sc
                    .award_distance(award_time, managed_address!(charity))
                    .into_option()
                    .unwrap();
                bytes = distance.to_bytes_be().as_slice().to_vec();
            })
            .assert_ok();
        num_bigint::BigUint::from_bytes_be(&bytes)
    }

    /// Drives an award over `accounts` through timelock, a two-owner yes
    /// vote and finalization. Returns the award time.
    pub fn finalize_award(&mut self, accounts: &[Address]) -> u64 {
        let owner = self.owner(0);
        assert_eq!(self.propose_award(&owner, accounts), AwardOutcome::Proposed);
        self.advance(DELAY);
        assert_eq!(self.propose_award(&owner, accounts), AwardOutcome::VotingOpened);

        let fingerprint = self.award_fingerprint(accounts);
        self.register_owners();
        for index in 0..2 {
            let voter = self.owner(index);
            assert_eq!(self.vote(&voter, &fingerprint, Ballot::Yes), VoteOutcome::Recorded);
        }

        self.advance(VOTE);
        let award_time = self.now;
        assert_eq!(
            self.propose_award(&owner, accounts),
            AwardOutcome::Finalized(award_time)
        );
        award_time
    }
}

pub fn address_args(accounts: &[Address]) -> MultiValueEncoded<DebugApi, ManagedAddress<DebugApi>> {
    let mut args = MultiValueEncoded::new();
    for account in accounts {
        args.push(managed_address!(account));
    }
    args
}
