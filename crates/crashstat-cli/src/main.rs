use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;
mod format;
mod tui;
mod util;

fn main() -> anyhow::Result<()> {
    // Log to stderr so `report` output on stdout stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    command::run()
}
