use anyhow::Context;
use holiday_collector::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("unable to load configuration")?;
    if !config.is_default_endpoint() {
        tracing::info!(base_url = %config.client.base_url, "using custom holidays endpoint");
    }

    let written = holiday_collector::collect(&config).context("holiday collection failed")?;
    tracing::info!(files = written.len(), dir = %config.output_dir.display(), "done");

    Ok(())
}
