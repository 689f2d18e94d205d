//! Backend resolution: flags, then environment, then the selected profile.

use std::env;
use std::time::Duration;

use notetaker_core::config::normalize_text_option;
use notetaker_core::{BackendAuth, BackendConfig, GraphQlNoteStore, NoteListController};

use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

const ENV_ENDPOINT: &str = "NOTETAKER_GRAPHQL_ENDPOINT";
const ENV_API_KEY: &str = "NOTETAKER_API_KEY";
const ENV_AUTH_TOKEN: &str = "NOTETAKER_AUTH_TOKEN";
const ENV_TIMEOUT_SECS: &str = "NOTETAKER_TIMEOUT_SECS";

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct BackendOverrides {
    pub profile: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub auth_token: Option<String>,
}

/// Build a controller for the resolved backend.
pub fn open_controller(
    overrides: &BackendOverrides,
) -> Result<NoteListController<GraphQlNoteStore>, CliError> {
    let config = load_backend_config(overrides)?;
    tracing::debug!(
        endpoint = %config.endpoint,
        auth = config.auth.label(),
        "Resolved backend configuration"
    );
    let store = GraphQlNoteStore::new(&config)?;
    Ok(NoteListController::new(store))
}

pub fn load_backend_config(overrides: &BackendOverrides) -> Result<BackendConfig, CliError> {
    let profiles = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = profiles.resolve_profile_name(overrides.profile.as_deref());
    let profile = profiles.profile(&profile_name).cloned().unwrap_or_default();
    resolve_backend_config(overrides, &profile, |key| env::var(key).ok())
}

/// Merge overrides, environment lookups, and profile values into a config.
pub fn resolve_backend_config(
    overrides: &BackendOverrides,
    profile: &CliProfile,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<BackendConfig, CliError> {
    let endpoint = normalize_text_option(overrides.endpoint.clone())
        .or_else(|| normalize_text_option(env_lookup(ENV_ENDPOINT)))
        .or_else(|| profile.graphql_endpoint())
        .ok_or(CliError::BackendNotConfigured)?;
    let api_key = normalize_text_option(overrides.api_key.clone())
        .or_else(|| normalize_text_option(env_lookup(ENV_API_KEY)))
        .or_else(|| profile.api_key());
    let auth_token = normalize_text_option(overrides.auth_token.clone())
        .or_else(|| normalize_text_option(env_lookup(ENV_AUTH_TOKEN)));

    let timeout_secs = match normalize_text_option(env_lookup(ENV_TIMEOUT_SECS)) {
        Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
            CliError::Config(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))
        })?),
        None => profile.request_timeout_secs,
    };

    let config = BackendConfig::new(endpoint, BackendAuth::from_credentials(api_key, auth_token))?;
    Ok(match timeout_secs {
        Some(0) => config.with_request_timeout(None),
        Some(secs) => config.with_request_timeout(Some(Duration::from_secs(secs))),
        None => config,
    })
}
