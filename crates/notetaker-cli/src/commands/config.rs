use std::env;

use notetaker_core::config::normalize_text_option;

use crate::backend::BackendOverrides;
use crate::cli::ConfigCommands;
use crate::config_profiles::{CliProfilesConfig, PROFILE_ENV};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, overrides: &BackendOverrides) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            timeout_secs,
            no_activate,
        } => run_config_init(overrides, timeout_secs, no_activate),
        ConfigCommands::Show => run_config_show(overrides),
    }
}

pub fn run_config_init(
    overrides: &BackendOverrides,
    timeout_secs: Option<u64>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(overrides.profile.as_deref());

    if overrides.auth_token.is_some() {
        println!("Note: --auth-token is never saved; pass it per command or set NOTETAKER_AUTH_TOKEN.");
    }

    apply_profile_update(
        &mut config,
        &profile_name,
        normalize_text_option(overrides.endpoint.clone()),
        normalize_text_option(overrides.api_key.clone()),
        timeout_secs,
        no_activate,
    )?;

    let path = config.save().map_err(CliError::Config)?;
    println!("Saved profile '{profile_name}' to {}", path.display());
    Ok(())
}

/// Merge explicit values into a profile, keeping existing values when omitted.
pub fn apply_profile_update(
    config: &mut CliProfilesConfig,
    profile_name: &str,
    endpoint: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut profile = config.profile(profile_name).cloned().unwrap_or_default();
    if let Some(endpoint) = endpoint {
        profile.graphql_endpoint = Some(endpoint);
    }
    if let Some(api_key) = api_key {
        profile.api_key = Some(api_key);
    }
    if let Some(timeout_secs) = timeout_secs {
        profile.request_timeout_secs = Some(timeout_secs);
    }
    profile.validate().map_err(CliError::Config)?;

    *config.profile_mut_or_default(profile_name) = profile;
    if !no_activate || config.active_profile.is_none() {
        config.active_profile = Some(profile_name.to_string());
    }
    Ok(())
}

pub fn run_config_show(overrides: &BackendOverrides) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(overrides.profile.as_deref());
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();

    println!("profile:  {profile_name}");
    if let Ok(selected) = env::var(PROFILE_ENV) {
        println!("          (selected via {PROFILE_ENV}={selected})");
    }
    println!(
        "endpoint: {}",
        profile.graphql_endpoint().as_deref().unwrap_or("(not set)")
    );
    println!(
        "api key:  {}",
        if profile.api_key().is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    match profile.request_timeout_secs {
        Some(0) => println!("timeout:  disabled"),
        Some(secs) => println!("timeout:  {secs}s"),
        None => println!("timeout:  default"),
    }
    Ok(())
}
