use tracing::info;
use tracing_subscriber::EnvFilter;

use tap_pendo::config::{parse_args, REQUIRED_CONFIG_KEYS};

fn main() -> anyhow::Result<()> {
    // Records and state go to stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting tap-pendo");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let (config, state) = parse_args(REQUIRED_CONFIG_KEYS)?;
    info!(
        config_keys = config.len(),
        bookmarks = state.len(),
        "Configuration loaded"
    );

    for (entity, bookmark) in state.iter() {
        info!(entity = %entity, bookmark = %bookmark, "Resuming from bookmark");
    }

    println!("{}", state.to_json_string()?);
    Ok(())
}
