use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_widget::app::{load_record, run};
use weather_widget::{Config, TerminalSurface};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_widget=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::parse();
    tracing::info!("Starting weather widget");

    let location = config.location_provider()?;
    let client = config.forecast_client()?;

    let mut surface = TerminalSurface::stdout();
    let stdin = BufReader::new(tokio::io::stdin());

    let load = load_record(location.as_ref(), &client, config.days);
    run(load, stdin, &mut surface).await
}
