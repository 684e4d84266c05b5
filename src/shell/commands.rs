//! Command definitions and the command registry.
//!
//! Every subcommand is declared once, in [`CommandRegistry::new`]. The
//! registry builds the `clap` command tree; nothing registers itself as a
//! side effect.

use clap::{value_parser, Arg, ArgAction, Command};

use crate::rest::{PatchOp, SortDir};

// Resource commands
pub const COMMAND_RESOURCE_SHOW: &str = "resource-show";
pub const COMMAND_RESOURCE_LIST: &str = "resource-list";
pub const COMMAND_RESOURCE_CREATE: &str = "resource-create";
pub const COMMAND_RESOURCE_DELETE: &str = "resource-delete";
pub const COMMAND_RESOURCE_UPDATE: &str = "resource-update";

// Global parameter names
pub const PARAMETER_JSON: &str = "json";
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_ARSENAL_URL: &str = "arsenal-url";
pub const PARAMETER_API_VERSION: &str = "api-version";
pub const PARAMETER_MAX_RETRIES: &str = "max-retries";
pub const PARAMETER_RETRY_INTERVAL: &str = "retry-interval";
pub const PARAMETER_TIMEOUT: &str = "timeout";
pub const PARAMETER_INSECURE: &str = "insecure";

// Resource parameter names
pub const PARAMETER_RESOURCE: &str = "resource";
pub const PARAMETER_FIELDS: &str = "fields";
pub const PARAMETER_DETAIL: &str = "detail";
pub const PARAMETER_LIMIT: &str = "limit";
pub const PARAMETER_MARKER: &str = "marker";
pub const PARAMETER_SORT_KEY: &str = "sort-key";
pub const PARAMETER_SORT_DIR: &str = "sort-dir";
pub const PARAMETER_DESCRIPTION: &str = "description";
pub const PARAMETER_TYPE: &str = "type";
pub const PARAMETER_ATTRIBUTES: &str = "attributes";
pub const PARAMETER_UUID: &str = "uuid";
pub const PARAMETER_OP: &str = "op";

/// Environment variables backing the global options.
pub const ENV_ARSENAL_URL: &str = "ARSENAL_URL";
pub const ENV_API_VERSION: &str = "ARSENAL_API_VERSION";
pub const ENV_MAX_RETRIES: &str = "ARSENAL_MAX_RETRIES";
pub const ENV_RETRY_INTERVAL: &str = "ARSENAL_RETRY_INTERVAL";

/// Default request timeout, in seconds. Zero disables it.
pub const DEFAULT_TIMEOUT_SECS: &str = "600";

/// A registered subcommand.
#[derive(Clone, Copy, Debug)]
pub struct CommandSpec {
    /// The subcommand name.
    pub name: &'static str,
    /// Builds the subcommand's arguments.
    pub build: fn() -> Command,
}

/// The set of subcommands the shell offers.
#[derive(Clone, Debug)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates the registry with every resource command.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: vec![
                CommandSpec {
                    name: COMMAND_RESOURCE_SHOW,
                    build: resource_show_command,
                },
                CommandSpec {
                    name: COMMAND_RESOURCE_LIST,
                    build: resource_list_command,
                },
                CommandSpec {
                    name: COMMAND_RESOURCE_CREATE,
                    build: resource_create_command,
                },
                CommandSpec {
                    name: COMMAND_RESOURCE_DELETE,
                    build: resource_delete_command,
                },
                CommandSpec {
                    name: COMMAND_RESOURCE_UPDATE,
                    build: resource_update_command,
                },
            ],
        }
    }

    /// Returns the registered subcommands, in registration order.
    #[must_use]
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Returns the registered subcommand names.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name).collect()
    }

    /// Builds the complete command tree.
    #[must_use]
    pub fn cli(&self) -> Command {
        self.commands.iter().fold(global_command(), |cli, spec| {
            cli.subcommand((spec.build)())
        })
    }
}

fn global_command() -> Command {
    Command::new("arsenal")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Command-line interface to the Arsenal inventory API")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(PARAMETER_JSON)
                .long(PARAMETER_JSON)
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print results as JSON"),
        )
        .arg(
            Arg::new(PARAMETER_VERBOSE)
                .short('v')
                .long(PARAMETER_VERBOSE)
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print debugging output"),
        )
        .arg(
            Arg::new(PARAMETER_ARSENAL_URL)
                .long(PARAMETER_ARSENAL_URL)
                .env(ENV_ARSENAL_URL)
                .value_name("URL")
                .global(true)
                .help("Arsenal API endpoint, e.g. http://127.0.0.1:6385"),
        )
        .arg(
            Arg::new(PARAMETER_API_VERSION)
                .long(PARAMETER_API_VERSION)
                .env(ENV_API_VERSION)
                .value_name("VERSION")
                .global(true)
                .help("Arsenal API version, e.g. 1.1 or latest"),
        )
        .arg(
            Arg::new(PARAMETER_MAX_RETRIES)
                .long(PARAMETER_MAX_RETRIES)
                .env(ENV_MAX_RETRIES)
                .value_name("COUNT")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .global(true)
                .help("Maximum number of retries on a conflict error, 0 disables retrying"),
        )
        .arg(
            Arg::new(PARAMETER_RETRY_INTERVAL)
                .long(PARAMETER_RETRY_INTERVAL)
                .env(ENV_RETRY_INTERVAL)
                .value_name("SECONDS")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .global(true)
                .help("Seconds to wait between retries on a conflict error"),
        )
        .arg(
            Arg::new(PARAMETER_TIMEOUT)
                .long(PARAMETER_TIMEOUT)
                .value_name("SECONDS")
                .value_parser(value_parser!(u64))
                .default_value(DEFAULT_TIMEOUT_SECS)
                .global(true)
                .help("Request timeout in seconds, 0 for none"),
        )
        .arg(
            Arg::new(PARAMETER_INSECURE)
                .long(PARAMETER_INSECURE)
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Do not verify the server's TLS certificate"),
        )
}

fn fields_arg(help: &'static str) -> Arg {
    Arg::new(PARAMETER_FIELDS)
        .long(PARAMETER_FIELDS)
        .value_name("FIELD")
        .num_args(1..)
        .action(ArgAction::Append)
        .help(help)
}

fn resource_show_command() -> Command {
    Command::new(COMMAND_RESOURCE_SHOW)
        .about("Show detailed information about a resource")
        .arg(
            Arg::new(PARAMETER_RESOURCE)
                .value_name("RESOURCE")
                .required(true)
                .help("UUID of the resource"),
        )
        .arg(fields_arg(
            "One or more resource fields. Only these fields will be fetched from the server",
        ))
}

fn resource_list_command() -> Command {
    Command::new(COMMAND_RESOURCE_LIST)
        .about("List resources")
        .arg(
            Arg::new(PARAMETER_DETAIL)
                .long(PARAMETER_DETAIL)
                .action(ArgAction::SetTrue)
                .help("Show detailed information about the resources"),
        )
        .arg(
            Arg::new(PARAMETER_LIMIT)
                .long(PARAMETER_LIMIT)
                .value_name("LIMIT")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help(
                    "Maximum number of resources to return per request, 0 for no limit. \
                     Default is the maximum used by the Arsenal API service",
                ),
        )
        .arg(
            Arg::new(PARAMETER_MARKER)
                .long(PARAMETER_MARKER)
                .value_name("RESOURCE")
                .help("Resource UUID after which to start listing, e.g. the last one of a previous page"),
        )
        .arg(
            Arg::new(PARAMETER_SORT_KEY)
                .long(PARAMETER_SORT_KEY)
                .value_name("FIELD")
                .help("Resource field that will be used for sorting"),
        )
        .arg(
            Arg::new(PARAMETER_SORT_DIR)
                .long(PARAMETER_SORT_DIR)
                .value_name("DIRECTION")
                .help(format!(
                    "Sort direction: {} (\"asc\" is the default)",
                    SortDir::CHOICES.join(" or ")
                )),
        )
        .arg(fields_arg(
            "One or more resource fields. Only these fields will be fetched from the server. \
             Can not be used with --detail",
        ))
}

fn resource_create_command() -> Command {
    Command::new(COMMAND_RESOURCE_CREATE)
        .about("Create a new resource")
        .arg(
            Arg::new(PARAMETER_DESCRIPTION)
                .short('d')
                .long(PARAMETER_DESCRIPTION)
                .value_name("DESCRIPTION")
                .help("Description of the resource"),
        )
        .arg(
            Arg::new(PARAMETER_TYPE)
                .short('t')
                .long(PARAMETER_TYPE)
                .value_name("TYPE")
                .help("Type of the resource"),
        )
        .arg(
            Arg::new(PARAMETER_ATTRIBUTES)
                .short('a')
                .long(PARAMETER_ATTRIBUTES)
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .help("Record an arbitrary key/value attribute. Can be specified multiple times"),
        )
        .arg(
            Arg::new(PARAMETER_UUID)
                .short('u')
                .long(PARAMETER_UUID)
                .value_name("UUID")
                .help("UUID of the resource"),
        )
}

fn resource_delete_command() -> Command {
    Command::new(COMMAND_RESOURCE_DELETE)
        .about("Delete one or more resources")
        .arg(
            Arg::new(PARAMETER_RESOURCE)
                .value_name("RESOURCE")
                .required(true)
                .num_args(1..)
                .help("UUID of the resource"),
        )
}

fn resource_update_command() -> Command {
    Command::new(COMMAND_RESOURCE_UPDATE)
        .about("Update information about a resource")
        .arg(
            Arg::new(PARAMETER_RESOURCE)
                .value_name("RESOURCE")
                .required(true)
                .help("UUID of the resource"),
        )
        .arg(
            Arg::new(PARAMETER_OP)
                .value_name("OP")
                .required(true)
                .help(format!("Operation: {}", PatchOp::CHOICES.join(", "))),
        )
        .arg(
            Arg::new(PARAMETER_ATTRIBUTES)
                .value_name("PATH=VALUE")
                .required(true)
                .num_args(1..)
                .help(
                    "Attribute to add, replace, or remove. Can be specified multiple times. \
                     For 'remove', only PATH is necessary",
                ),
        )
}
