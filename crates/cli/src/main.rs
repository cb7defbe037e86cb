//! Farmstand CLI - Drive the storefront and farmer dashboard from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the farm directory and products
//! farmstand catalog farms
//! farmstand catalog products --farm 2 --category dairy-and-eggs
//! farmstand catalog farm 1
//!
//! # Run a full checkout against the seed catalog
//! farmstand checkout --add 1 --add 1 --add 4 \
//!     --first-name Ada --last-name Lovelace --email ada@example.com \
//!     --phone 555-0100 --street "1 Lane" --city Springfield --state IL --zip 62701 \
//!     --card-number "4242 4242 4242 4242" --expiry 12/29 --cvc 123
//!
//! # Farmer dashboard views
//! farmstand dashboard orders --status pending
//! farmstand --json dashboard insights
//! ```
//!
//! # Environment Variables
//!
//! See `farmstand_storefront::config` for the `FARMSTAND_*` settings.
//! `RUST_LOG` overrides the log filter.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use farmstand_storefront::config::StorefrontConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::catalog::CatalogCommand;
use commands::checkout::CheckoutArgs;
use commands::dashboard::DashboardCommand;
use output::Output;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "farmstand=info,farmstand_storefront=info,farmstand_dashboard=info";

#[derive(Parser)]
#[command(name = "farmstand")]
#[command(author, version, about = "Farmstand marketplace demo")]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse farms and products
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },
    /// Fill a cart and walk it through checkout
    Checkout(CheckoutArgs),
    /// Farmer dashboard views
    Dashboard {
        #[command(subcommand)]
        action: DashboardCommand,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Log whether error tracking is on. Call after the subscriber is installed.
fn log_sentry_status(enabled: bool) {
    if enabled {
        tracing::info!("Sentry initialized");
    }
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt().init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
    log_sentry_status(sentry_guard.is_some());

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let out = Output::new(cli.json);
    match cli.command {
        Commands::Catalog { action } => commands::catalog::run(config, action, &out)?,
        Commands::Checkout(args) => commands::checkout::run(config, args, &out).await?,
        Commands::Dashboard { action } => commands::dashboard::run(&action, &out)?,
    }
    Ok(())
}
