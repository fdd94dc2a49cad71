//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the profile core and the outside world. Adapters implement these ports.
//!
//! - `ProfileGateway` - single-row lookup in the remote profile table
//! - `KeyValueStore` - device-local string storage backing the profile cache
//! - `IdentityProvider` - the signed-in user and its change notifications

mod identity_provider;
mod key_value_store;
mod profile_gateway;

pub use identity_provider::IdentityProvider;
pub use key_value_store::{KeyValueStore, StoreError};
pub use profile_gateway::{
    FetchOutcome, GatewayError, GatewayResponse, ProfileGateway, NOT_ACCEPTABLE_STATUS,
    ROW_NOT_FOUND_CODE,
};
