//! ISS tracker CLI
//!
//! Runs the REST API and answers one-off questions about the station's
//! position from the command line.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use iss_api::{ApiConfig, ApiServer, AppState};
use iss_core::constants::{DEFAULT_FEED_URL, SECONDS_PER_HOUR};
use iss_core::types::Location;
use iss_feed::{FeedClient, FeedConfig};

/// ISS tracker - where is the International Space Station?
#[derive(Parser)]
#[command(name = "iss-tracker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Download the feed and summarize it
    Fetch {
        /// OEM feed URL
        #[arg(long, env = "ISS_FEED_URL", default_value = DEFAULT_FEED_URL)]
        url: String,
    },

    /// Show where the station is now
    Now,

    /// Show the station's speed at an epoch
    Speed {
        /// Epoch, e.g. 2024-047T12:00:00.000Z
        epoch: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "iss=debug,info"
    } else {
        "iss=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, &bind).await,
        Commands::Fetch { url } => cmd_fetch(&url).await,
        Commands::Now => cmd_now(cli.verbose).await,
        Commands::Speed { epoch } => cmd_speed(&epoch).await,
    }
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// State for one-off commands: in-process store, feed loaded on first query.
fn local_state() -> Result<AppState> {
    AppState::new(ApiConfig::from_env()).context("Failed to set up feed and geocoder clients")
}

fn print_location(location: &Location) {
    println!("   {} {}", "Epoch:".dimmed(), location.epoch);
    println!("   {} {:.4}°", "Latitude:".yellow(), location.position.latitude);
    println!("   {} {:.4}°", "Longitude:".yellow(), location.position.longitude);
    println!("   {} {:.1} km", "Altitude:".yellow(), location.position.altitude);
    println!("   {} {}", "Over:".green(), location.geoposition);
}

/// Run the API server
async fn cmd_serve(port: u16, bind: &str) -> Result<()> {
    println!("{}", "🛰  Starting ISS tracker API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let config = ApiConfig::from_env();
    let server = ApiServer::from_config(config)
        .await
        .context("Failed to initialize server state")?;

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;
    server.run(addr).await?;

    Ok(())
}

/// Download the feed and print a summary
async fn cmd_fetch(url: &str) -> Result<()> {
    println!("{} {}", "📡 Fetching:".cyan().bold(), url);

    let config = ApiConfig::from_env();
    let client =
        FeedClient::with_config(FeedConfig::new(url).with_timeout(config.http_timeout_secs))?;

    let pb = spinner("Downloading ephemeris...")?;
    let result = client.download().await;
    pb.finish_and_clear();
    let ephemeris = result.context("Feed download failed")?;

    let header = &ephemeris.header;
    let meta = &ephemeris.metadata;
    let unknown = "-".dimmed().to_string();
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| unknown.clone());

    println!("\n{}", "✅ Feed loaded:".green().bold());
    println!("   {} {}", "Object:".dimmed(), show(&meta.object_name));
    println!("   {} {}", "Object ID:".dimmed(), show(&meta.object_id));
    println!("   {} {}", "Originator:".dimmed(), show(&header.originator));
    println!("   {} {}", "Created:".dimmed(), show(&header.creation_date));
    println!("   {} {}", "Frame:".dimmed(), show(&meta.ref_frame));
    println!(
        "   {} {} → {}",
        "Span:".dimmed(),
        show(&meta.start_time),
        show(&meta.stop_time)
    );
    println!("   {} {}", "State vectors:".yellow(), ephemeris.len());

    if let (Some(first), Some(last)) = (ephemeris.vectors.first(), ephemeris.vectors.last()) {
        println!("   {} {}", "First epoch:".dimmed(), first.epoch);
        println!("   {} {}", "Last epoch:".dimmed(), last.epoch);
    }

    Ok(())
}

/// Show the location at the epoch nearest to now
async fn cmd_now(verbose: bool) -> Result<()> {
    let state = local_state()?;

    let pb = spinner("Locating the station...")?;
    let result = state.service.get_now().await;
    pb.finish_and_clear();
    let location = result.context("Could not determine the current position")?;

    println!("{}", "🌍 The ISS is now:".cyan().bold());
    print_location(&location);

    if verbose {
        println!("\n{}", serde_json::to_string_pretty(&location)?);
    }

    Ok(())
}

/// Show the speed at one epoch
async fn cmd_speed(epoch: &str) -> Result<()> {
    let state = local_state()?;

    let pb = spinner("Loading ephemeris...")?;
    let result = state.service.get_speed(epoch).await;
    pb.finish_and_clear();
    let speed = result.with_context(|| format!("No speed for epoch {}", epoch))?;

    println!("{} {}", "🚀 Speed at".cyan().bold(), epoch);
    println!(
        "   {} {:.2} km/h ({:.3} km/s)",
        "Speed:".yellow(),
        speed,
        speed / SECONDS_PER_HOUR
    );

    Ok(())
}
