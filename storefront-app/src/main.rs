use std::sync::Arc;

use anyhow::Context;
use storefront_app::console::HELP;
use storefront_app::{Command, ConsoleSurface, Storefront};
use storefront_core::app_config::Config;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_app=debug,storefront_order=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(endpoint = %config.endpoint.url, "Starting storefront");

    let surface = Arc::new(ConsoleSurface::new());
    let storefront = Storefront::from_config(&config, surface.clone())
        .context("Failed to create order gateway")?;

    println!("{}", HELP);
    storefront.refresh().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        // Failures are already on the status line; nothing else to do here.
        match command {
            Command::Add { name, price } => {
                let _ = storefront.add_to_cart(&name, price).await;
            }
            Command::Name(name) => surface.set_customer_name(&name),
            Command::Order => {
                let _ = storefront.place_order().await;
            }
            Command::Show => {
                storefront.refresh().await;
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    tracing::info!("Storefront closed");
    Ok(())
}
