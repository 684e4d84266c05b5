use arsenal_client::shell::{self, CommandRegistry, EXIT_FAILURE, EXIT_INTERRUPTED, PARAMETER_VERBOSE};
use tracing_subscriber::EnvFilter;

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let registry = CommandRegistry::new();
    let matches = registry.cli().get_matches();

    // Initialize the logging subsystem; RUST_LOG overrides --verbose
    let default_level = if matches.get_flag(PARAMETER_VERBOSE) {
        "arsenal_client=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut stdout = std::io::stdout().lock();
    tokio::select! {
        result = shell::run(&matches, &mut stdout) => {
            if let Err(e) = result {
                eprintln!("ERROR: {e}");
                ::std::process::exit(EXIT_FAILURE);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            eprintln!("... terminating arsenal client");
            ::std::process::exit(EXIT_INTERRUPTED);
        }
    }
}
