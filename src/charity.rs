multiversx_sc::imports!();

use crate::types::{CharityOutcome, CharityStatus, Fingerprint, TimelockOutcome};

const CHARITY_TAG: &[u8] = b"charity";

#[multiversx_sc::module]
pub trait CharityModule:
    crate::events::EventsModule
    + crate::access::AccessModule
    + crate::timelock::TimelockModule
{
    /// First call puts the charity in `Pending`; a repeat call once
    /// `delay_duration` has passed makes it `Active`.
    #[endpoint(addCharity)]
    fn add_charity(&self, charity: ManagedAddress) -> CharityOutcome {
        self.require_not_halted();
        let caller = self.blockchain().get_caller();
        self.require_owner(&caller);

        if self.charity_status(&charity) == CharityStatus::Active {
            return CharityOutcome::AlreadyActive;
        }

        let delay = self.config().get().delay_duration;
        let fingerprint = self.charity_fingerprint(&charity);
        let now = self.blockchain().get_block_timestamp();
        match self.pass_timelock(&fingerprint, delay) {
            TimelockOutcome::Proposed => {
                self.charities(&charity).set(CharityStatus::Pending);
                self.charity_pending_event(&charity, now);
                CharityOutcome::PendingAdded
            }
            TimelockOutcome::NotYetDue => CharityOutcome::StillPending,
            TimelockOutcome::Ready => {
                self.charities(&charity).set(CharityStatus::Active);
                self.charity_activated_event(&charity, now);
                CharityOutcome::Activated
            }
            TimelockOutcome::AlreadyExecuted => CharityOutcome::AlreadyActive,
        }
    }

    #[view(charityStatus)]
    fn charity_status(&self, charity: &ManagedAddress) -> CharityStatus {
        let mapper = self.charities(charity);
        if mapper.is_empty() {
            CharityStatus::Unregistered
        } else {
            mapper.get()
        }
    }

    #[view(charityFingerprint)]
    fn charity_fingerprint(&self, charity: &ManagedAddress) -> Fingerprint<Self::Api> {
        let mut preimage = ManagedBuffer::new_from_bytes(CHARITY_TAG);
        preimage.append(charity.as_managed_buffer());
        self.fingerprint(&preimage)
    }

    #[storage_mapper("charities")]
    fn charities(&self, charity: &ManagedAddress) -> SingleValueMapper<CharityStatus>;
}
