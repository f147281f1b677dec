/// Plex Refresher - browse a Plex library and trigger metadata refreshes
use clap::{Parser, Subcommand};
use plex_client::PlexClient;
use plex_refresher::{
    config::ServerConfig,
    create_router,
    lookup::{find_episode, find_item},
    state::AppState,
};
use refresher_core::{Child, ItemId, LibraryBackend, Refresher, SectionId, Selection};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "plex-refresher")]
#[command(about = "Browse a Plex library and trigger metadata refreshes", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// List library sections
    Sections,
    /// List the items of a section
    Items {
        /// Section id
        section_id: String,
    },
    /// List the seasons of a show or the episodes of a season
    Children {
        /// Show or season id
        item_id: String,
    },
    /// Refresh a section, one of its items, or one episode
    Refresh {
        /// Section id
        section_id: String,
        /// Refresh this item of the section
        #[arg(long, conflicts_with_all = ["episode", "season"])]
        item: Option<String>,
        /// Refresh this episode (requires --season)
        #[arg(long, requires = "season")]
        episode: Option<String>,
        /// Season the episode belongs to (requires --episode)
        #[arg(long, requires = "episode")]
        season: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Development convenience: PLEX_URL / PLEX_TOKEN from .env
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "plex_refresher=info,plex_client=info,refresher_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        Ok(path) => tracing::debug!("Loaded .env from {}", path.display()),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    let cli = Cli::parse();

    // Missing URL or token is fatal before any request is served
    let config = ServerConfig::load_from(&cli.config)?;
    config.validate()?;

    let client = Arc::new(PlexClient::new(config.plex_config())?);

    match cli.command {
        Commands::Serve => serve(&config, client).await?,
        Commands::Sections => list_sections(client.as_ref()).await?,
        Commands::Items { section_id } => {
            list_items(client.as_ref(), &SectionId::new(section_id)).await?;
        }
        Commands::Children { item_id } => {
            list_children(client.as_ref(), &ItemId::new(item_id)).await?;
        }
        Commands::Refresh {
            section_id,
            item,
            episode,
            season,
        } => {
            let section_id = SectionId::new(section_id);
            let selection = match (item, episode, season) {
                (Some(item_id), None, None) => Selection::Item {
                    item: find_item(client.as_ref(), &section_id, &ItemId::new(item_id)).await?,
                },
                (None, Some(episode_id), Some(season_id)) => Selection::Episode {
                    episode: find_episode(
                        client.as_ref(),
                        &ItemId::new(season_id),
                        &ItemId::new(episode_id),
                    )
                    .await?,
                    section_id,
                },
                (None, None, None) => Selection::Library { section_id },
                // Never widen a scoped request to the whole section
                _ => anyhow::bail!("--episode and --season must be given together"),
            };

            let target = Refresher::new(client).refresh(selection).await?;
            match target.path() {
                Some(path) => println!(
                    "Refresh triggered for {} in section {}",
                    path,
                    target.section_id()
                ),
                None => println!("Refresh triggered for section {}", target.section_id()),
            }
        }
    }

    Ok(())
}

async fn serve(config: &ServerConfig, client: Arc<PlexClient>) -> anyhow::Result<()> {
    tracing::info!("Starting Plex Refresher");
    tracing::info!("Upstream: {}", client.url());
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = AppState::new(client);
    let app = create_router(app_state, config.server.web_dir.clone());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_sections(backend: &dyn LibraryBackend) -> anyhow::Result<()> {
    let sections = backend.list_sections().await?;

    println!("Sections:");
    for section in sections {
        println!("  {} - {} ({:?})", section.id, section.title, section.kind);
    }

    Ok(())
}

async fn list_items(backend: &dyn LibraryBackend, section_id: &SectionId) -> anyhow::Result<()> {
    let listing = backend.list_items(section_id).await?;

    println!("{}:", listing.title);
    for item in listing.items {
        match item.path.as_deref().or(item.location.as_deref()) {
            Some(path) => println!("  {} - {} [{}]", item.id, item.title, path),
            None => println!("  {} - {}", item.id, item.title),
        }
    }

    Ok(())
}

async fn list_children(backend: &dyn LibraryBackend, item_id: &ItemId) -> anyhow::Result<()> {
    let listing = backend.list_children(item_id).await?;

    match &listing.grandparent_title {
        Some(show) => println!("{} - {}:", show, listing.title),
        None => println!("{}:", listing.title),
    }
    for child in &listing.children {
        match child {
            Child::Season(season) => {
                println!("  {} - season {}: {}", season.id, season.index, season.title);
            }
            Child::Episode(episode) => println!(
                "  {} - episode {}: {} [{}]",
                episode.id, episode.index, episode.title, episode.path
            ),
        }
    }

    Ok(())
}
