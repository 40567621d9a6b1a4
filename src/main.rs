use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use order_match_engine::cli;

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    cli::run_cli()?;
    Ok(())
}
