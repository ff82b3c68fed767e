mod app_config;
mod menu;

use anyhow::Context;
use apache_order::BookingRegistry;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app_config::Config;
use crate::menu::Session;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apache_cli=info,apache_order=info,apache_catalog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::load().context("Failed to load config")?;
    config.cabin.validate().context("Invalid cabin layout")?;
    tracing::info!(
        airline = %config.airline_name,
        rows = config.cabin.rows,
        columns = %config.cabin.columns,
        "Starting booking session"
    );

    let registry = BookingRegistry::from_layout(&config.cabin);
    let stdin = io::stdin();
    let mut session = Session::new(config.airline_name, registry, stdin.lock(), io::stdout());
    session.run()
}
