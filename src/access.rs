multiversx_sc::imports!();

use crate::types::PoolConfig;
use crate::{ERR_HALTED, ERR_UNAUTHORIZED};

/// Owner set, master override and the halt switch the master controls.
#[multiversx_sc::module]
pub trait AccessModule: crate::events::EventsModule {
    #[endpoint(setHalted)]
    fn set_halted(&self, halted: bool) {
        let caller = self.blockchain().get_caller();
        self.require_master(&caller);
        self.halted().set(halted);
        self.halt_changed_event(&caller, halted);
    }

    fn require_owner(&self, caller: &ManagedAddress) {
        require!(self.owners().contains(caller), ERR_UNAUTHORIZED);
    }

    fn require_master(&self, caller: &ManagedAddress) {
        require!(self.is_master(caller), ERR_UNAUTHORIZED);
    }

    fn require_not_halted(&self) {
        require!(!self.halted().get(), ERR_HALTED);
    }

    #[view(isOwner)]
    fn is_owner(&self, address: &ManagedAddress) -> bool {
        self.owners().contains(address)
    }

    #[view(isMaster)]
    fn is_master(&self, address: &ManagedAddress) -> bool {
        self.config().get().master == *address
    }

    #[view(isHalted)]
    fn is_halted(&self) -> bool {
        self.halted().get()
    }

    #[view(getOwners)]
    fn get_owners(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for owner in self.owners().iter() {
            result.push(owner);
        }
        result
    }

    #[view(getConfig)]
    fn get_config(&self) -> PoolConfig<Self::Api> {
        self.config().get()
    }

    #[storage_mapper("config")]
    fn config(&self) -> SingleValueMapper<PoolConfig<Self::Api>>;

    #[storage_mapper("owners")]
    fn owners(&self) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("halted")]
    fn halted(&self) -> SingleValueMapper<bool>;
}
