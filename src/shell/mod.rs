//! The `arsenal` command-line shell.
//!
//! The shell is built from a [`CommandRegistry`] created once at startup.
//! [`run`] turns the global options into an [`ArsenalConfig`], connects a
//! client and dispatches the selected subcommand:
//!
//! ```text
//! arsenal --arsenal-url http://127.0.0.1:6385 resource-list --limit 0
//! arsenal resource-update <uuid> replace description="spare switch"
//! ```

mod commands;
mod errors;
mod format;
mod resource;

use std::io::Write;
use std::time::Duration;

use clap::ArgMatches;

use crate::clients::connect;
use crate::config::{ApiVersion, ArsenalConfig, Endpoint};
use crate::error::ConfigError;
use crate::version_cache::VersionCache;

pub use commands::*;
pub use errors::ShellError;
pub use format::{print_dict, print_list, OutputFormat};
pub use resource::{
    do_resource_create, do_resource_delete, do_resource_list, do_resource_show,
    do_resource_update,
};

/// Exit code for any error.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code after Ctrl-C.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Builds the client configuration from the global options.
///
/// # Errors
///
/// Returns [`ShellError::Command`] for out-of-range retry options and
/// [`ShellError::Config`] for a missing or invalid endpoint or API version.
pub fn config_from_matches(matches: &ArgMatches) -> Result<ArsenalConfig, ShellError> {
    let url = matches
        .get_one::<String>(PARAMETER_ARSENAL_URL)
        .ok_or(ConfigError::MissingEndpoint)?;

    let mut builder = ArsenalConfig::builder()
        .endpoint(Endpoint::new(url)?)
        .insecure(matches.get_flag(PARAMETER_INSECURE))
        .user_agent_prefix(format!("arsenal/{}", env!("CARGO_PKG_VERSION")));

    if let Some(version) = matches.get_one::<String>(PARAMETER_API_VERSION) {
        builder = builder.api_version(version.parse::<ApiVersion>()?);
    }

    if let Some(&retries) = matches.get_one::<i64>(PARAMETER_MAX_RETRIES) {
        let retries = u32::try_from(retries).map_err(|_| {
            ShellError::Command("You must provide value >= 0 for --max-retries".to_string())
        })?;
        builder = builder.max_retries(retries);
    }

    if let Some(&interval) = matches.get_one::<i64>(PARAMETER_RETRY_INTERVAL) {
        let interval = u64::try_from(interval)
            .ok()
            .filter(|seconds| *seconds >= 1)
            .ok_or_else(|| {
                ShellError::Command("You must provide value >= 1 for --retry-interval".to_string())
            })?;
        builder = builder.retry_interval(Duration::from_secs(interval));
    }

    if let Some(&timeout) = matches.get_one::<u64>(PARAMETER_TIMEOUT) {
        if timeout > 0 {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
    }

    Ok(builder.build()?)
}

/// Runs the selected subcommand against the configured endpoint.
///
/// # Errors
///
/// Returns any configuration, validation, transport or output error.
pub async fn run<W: Write>(matches: &ArgMatches, out: &mut W) -> Result<(), ShellError> {
    let Some((name, sub_matches)) = matches.subcommand() else {
        return Err(ShellError::Command("No command given".to_string()));
    };

    let config = config_from_matches(matches)?;
    let client = connect(&config, VersionCache::default_location())?;
    let format = OutputFormat::from_json_flag(matches.get_flag(PARAMETER_JSON));
    let manager = client.resource();

    tracing::debug!("Running {} against {}", name, config.endpoint());
    match name {
        COMMAND_RESOURCE_SHOW => do_resource_show(&manager, sub_matches, format, out).await,
        COMMAND_RESOURCE_LIST => do_resource_list(&manager, sub_matches, format, out).await,
        COMMAND_RESOURCE_CREATE => do_resource_create(&manager, sub_matches, format, out).await,
        COMMAND_RESOURCE_DELETE => do_resource_delete(&manager, sub_matches, out).await,
        COMMAND_RESOURCE_UPDATE => do_resource_update(&manager, sub_matches, format, out).await,
        other => Err(ShellError::Command(format!("Unknown command: {other}"))),
    }
}
