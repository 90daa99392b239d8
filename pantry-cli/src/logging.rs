use tracing_subscriber::{EnvFilter, fmt};

/// Log to stderr so stdout stays clean for `--json` output.
/// `RUST_LOG` overrides the default level; `pantry` prefixes every workspace crate.
pub fn init(verbose: bool) {
    let default = if verbose { "pantry=debug" } else { "pantry=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
