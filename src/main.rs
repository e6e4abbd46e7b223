use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use research_digest::{
    config::Config, presentation::render_markdown, routes::create_router, utils::init_logger,
    AppState, ResearchAssistant,
};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "research-digest", version, about = "Find research papers and digest them with LLM agents")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web UI and JSON API (default)
    Serve {
        /// Override the PORT setting
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one query and print the results as Markdown
    Search {
        /// Research topic
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing credential stops everything before any fetch.
    let mut config = Config::from_env()?;
    let _log_guard = init_logger(config.logging.log_dir.as_deref())?;
    info!(llm = ?config.llm, "Configuration loaded");

    let assistant = Arc::new(ResearchAssistant::from_config(&config));

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Search { query } => {
            let query = query.trim();
            if query.is_empty() {
                anyhow::bail!("Enter a research topic.");
            }
            let papers = assistant.run(query).await;
            print!("{}", render_markdown(&papers));
        }
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }

            let host: std::net::IpAddr = config
                .server
                .host
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid HOST {:?}: {}", config.server.host, e))?;
            let addr = SocketAddr::new(host, config.server.port);

            let state = AppState { config, assistant };
            let app = create_router(state);

            info!("Server listening on {}", addr);
            let listener = TcpListener::bind(addr).await?;
            axum::serve(listener, app)
                .await
                .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;
        }
    }

    Ok(())
}
