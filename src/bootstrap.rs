//! Wiring from configuration to a running profile view-model.
//!
//! ```ignore
//! let config = AppConfig::load_validated()?;
//! telemetry::init(&config.telemetry)?;
//! let identity = Arc::new(SessionIdentity::signed_out());
//! let vm = bootstrap::start_view_model(&config, identity.clone())?;
//! ```

use std::sync::Arc;

use crate::adapters::{FileKeyValueStore, PostgrestConfig, PostgrestProfileGateway};
use crate::application::{
    LocalProfileStore, ProfileViewModel, ReconcileProfileHandler, SaveProfileHandler,
};
use crate::config::{AppConfig, GatewayConfig};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::IdentityProvider;

/// Builds the PostgREST gateway described by `config`.
pub fn build_gateway(config: &GatewayConfig) -> Result<PostgrestProfileGateway, DomainError> {
    let mut postgrest = PostgrestConfig::new(config.url.clone(), config.anon_key.clone())
        .with_table(config.table.clone());
    if let Some(timeout) = config.timeout() {
        postgrest = postgrest.with_timeout(timeout);
    }

    PostgrestProfileGateway::new(postgrest)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.message))
}

/// Builds an unmounted view-model from validated configuration.
pub fn build_view_model(
    config: &AppConfig,
    identity: Arc<dyn IdentityProvider>,
) -> Result<ProfileViewModel, DomainError> {
    config.validate().map_err(|e| {
        DomainError::new(ErrorCode::ValidationFailed, e.to_string())
    })?;

    let gateway = Arc::new(build_gateway(&config.gateway)?);
    let cache = LocalProfileStore::new(
        Arc::new(FileKeyValueStore::new(&config.cache.dir)),
        config.cache.key.clone(),
    );

    tracing::info!(
        gateway = %config.gateway.url,
        table = %config.gateway.table,
        cache_dir = %config.cache.dir.display(),
        "Profile sync configured"
    );

    Ok(ProfileViewModel::new(
        ReconcileProfileHandler::new(gateway, cache.clone())
            .with_load_error_message(config.messages.load_error.clone()),
        SaveProfileHandler::new(cache),
        identity,
    ))
}

/// Builds the view-model and mounts it. Must run inside a Tokio runtime.
pub fn start_view_model(
    config: &AppConfig,
    identity: Arc<dyn IdentityProvider>,
) -> Result<ProfileViewModel, DomainError> {
    Ok(build_view_model(config, identity)?.mount())
}
