mod render;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vidwatch_core::Provider;
use vidwatch_metadata::{ClientConfig, HttpMetadataClient};
use vidwatch_session::PlaybackSession;

#[derive(Parser)]
#[command(name = "vidwatch")]
#[command(about = "Resolve a watch session and print its embed URL")]
struct Cli {
    /// Navigation query, e.g. `type=tv&id=1399`
    #[arg(default_value = "")]
    query: String,

    /// Base URL of the metadata backend
    #[arg(long, env = "VIDWATCH_API_BASE", default_value = "http://localhost:3000")]
    api_base: String,

    /// Server number as shown in the selector (1-7)
    #[arg(long, default_value_t = 1)]
    server: usize,

    #[arg(long)]
    season: Option<u32>,

    #[arg(long)]
    episode: Option<u32>,

    /// Navigate to the n-th recommendation (1-based) before applying selections
    #[arg(long)]
    recommendation: Option<usize>,

    /// Print the session view as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long, env = "VIDWATCH_LOG_JSON")]
    log_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let provider = Provider::from_index(cli.server.wrapping_sub(1))
        .with_context(|| format!("server must be between 1 and {}", Provider::ALL.len()))?;

    info!(api_base = %cli.api_base, "using metadata backend");
    let client = HttpMetadataClient::new(ClientConfig {
        base_url: cli.api_base.clone(),
        ..Default::default()
    });
    let mut session = PlaybackSession::new(Arc::new(client));

    if session.initialize_from_query(&cli.query).is_err() {
        print_view(&session, cli.json)?;
        return Ok(ExitCode::from(2));
    }
    session.settle().await;

    if let Some(position) = cli.recommendation {
        let identifier = session
            .select_recommendation(position.wrapping_sub(1))
            .with_context(|| format!("no recommendation at position {position}"))?;
        info!(%identifier, "following recommendation");
        session.settle().await;
    }

    session.set_provider(provider);
    if let Some(season) = cli.season {
        session
            .select_season(season)
            .with_context(|| format!("cannot select season {season}"))?;
        session.settle().await;
    }
    if let Some(episode) = cli.episode {
        session
            .select_episode(episode)
            .with_context(|| format!("cannot select episode {episode}"))?;
    }

    print_view(&session, cli.json)?;
    Ok(ExitCode::SUCCESS)
}

fn print_view(session: &PlaybackSession, json: bool) -> anyhow::Result<()> {
    let view = session.view();
    if json {
        let out = serde_json::to_string_pretty(&view).context("failed to serialize view")?;
        println!("{out}");
    } else {
        print!("{}", render::render_text(&view));
    }
    Ok(())
}
