multiversx_sc::imports!();

use crate::types::{ExecuteCheck, Fingerprint, PendingOperation, TimelockOutcome};

/// Two-phase gate shared by freezes, charity registration and award rounds.
///
/// An operation is identified by the keccak256 digest of its canonical
/// arguments. The first call records `proposed_at`; a later call at or after
/// `proposed_at + delay` is `Ready` exactly once. Entries are never removed,
/// so a spent fingerprint stays spent.
#[multiversx_sc::module]
pub trait TimelockModule: crate::events::EventsModule {
    fn fingerprint(&self, preimage: &ManagedBuffer) -> Fingerprint<Self::Api> {
        self.crypto().keccak256(preimage)
    }

    /// Records a first sighting. Re-proposing a live fingerprint keeps the
    /// original `proposed_at`.
    fn propose(&self, fingerprint: &Fingerprint<Self::Api>, now: u64) -> TimelockOutcome {
        let mapper = self.pending_operations(fingerprint);
        if mapper.is_empty() {
            mapper.set(PendingOperation {
                proposed_at: now,
                executed: false,
            });
            self.operation_proposed_event(fingerprint, now);
            return TimelockOutcome::Proposed;
        }

        if mapper.get().executed {
            TimelockOutcome::AlreadyExecuted
        } else {
            TimelockOutcome::NotYetDue
        }
    }

    /// Read-only readiness check.
    fn check_execute(
        &self,
        fingerprint: &Fingerprint<Self::Api>,
        now: u64,
        delay: u64,
    ) -> ExecuteCheck {
        let mapper = self.pending_operations(fingerprint);
        if mapper.is_empty() {
            return ExecuteCheck::Unknown;
        }

        let operation = mapper.get();
        if operation.executed {
            ExecuteCheck::AlreadyExecuted
        } else if now < operation.proposed_at.saturating_add(delay) {
            ExecuteCheck::NotYetDue
        } else {
            ExecuteCheck::Ready
        }
    }

    /// Consumes the fingerprint when its delay has elapsed.
    fn try_execute(
        &self,
        fingerprint: &Fingerprint<Self::Api>,
        now: u64,
        delay: u64,
    ) -> ExecuteCheck {
        let check = self.check_execute(fingerprint, now, delay);
        if check == ExecuteCheck::Ready {
            self.pending_operations(fingerprint).update(|op| op.executed = true);
            self.operation_executed_event(fingerprint, now);
        }
        check
    }

    /// One knock on the gate: propose on first sighting, execute when due.
    /// With a zero delay the first knock is already `Ready`.
    fn pass_timelock(&self, fingerprint: &Fingerprint<Self::Api>, delay: u64) -> TimelockOutcome {
        let now = self.blockchain().get_block_timestamp();
        let proposed = self.propose(fingerprint, now);
        if proposed == TimelockOutcome::AlreadyExecuted {
            return proposed;
        }
        if proposed == TimelockOutcome::Proposed && delay > 0 {
            return proposed;
        }

        match self.try_execute(fingerprint, now, delay) {
            ExecuteCheck::Ready => TimelockOutcome::Ready,
            ExecuteCheck::AlreadyExecuted => TimelockOutcome::AlreadyExecuted,
            // propose() just wrote the entry, so Unknown cannot come back here
            ExecuteCheck::NotYetDue | ExecuteCheck::Unknown => TimelockOutcome::NotYetDue,
        }
    }

    fn is_awaiting_timelock(&self, fingerprint: &Fingerprint<Self::Api>) -> bool {
        let mapper = self.pending_operations(fingerprint);
        !mapper.is_empty() && !mapper.get().executed
    }

    #[view(getPendingOperation)]
    fn get_pending_operation(
        &self,
        fingerprint: ManagedByteArray<Self::Api, 32>,
    ) -> OptionalValue<PendingOperation> {
        let mapper = self.pending_operations(&fingerprint);
        if mapper.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(mapper.get())
        }
    }

    #[storage_mapper("pendingOperations")]
    fn pending_operations(
        &self,
        fingerprint: &ManagedByteArray<Self::Api, 32>,
    ) -> SingleValueMapper<PendingOperation>;
}
