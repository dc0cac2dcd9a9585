//! AnimeAV1 command-line client
//!
//! Runs one pipeline stage per invocation and prints its result as JSON on
//! stdout. Logs go to stderr; set `RUST_LOG` to adjust them.

mod cli;

use animeav1_rs::{Provider, ProviderConfig, SearchQuery};
use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,animeav1_rs=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ProviderConfig::load_or_default(cli.config.as_deref());
    tracing::debug!("Using site {} (cdn {})", config.base_url, config.cdn_url);

    let provider = Provider::new(config).context("Failed to create provider")?;

    match cli.command {
        Command::Search { text, dub } => {
            let query = SearchQuery {
                text,
                ..SearchQuery::default()
            }
            .dub(dub);
            let results = provider.search(&query).await;
            print_json(&results, cli.compact)
        }
        Command::Episodes { id } => {
            let episodes = provider
                .list_episodes(&id)
                .await
                .with_context(|| format!("Could not list episodes for {}", id))?;
            print_json(&episodes, cli.compact)
        }
        Command::Server { id, server } => {
            let resolved = provider
                .resolve_server(&id, &server)
                .await
                .context("Could not resolve stream server")?;
            print_json(&resolved, cli.compact)
        }
        Command::Settings => print_json(&provider.settings(), cli.compact),
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", json);
    Ok(())
}
