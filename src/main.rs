use splittea_ledger::{bot, cli::CLI};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env()))
        .init();

    info!(database = %CLI.database.display(), "Initializing splittea ledger...");
    bot::run(&CLI).await?;

    Ok(())
}
