//! SchemaScope CLI - one pass over the `app` and `auth` schemas.
//!
//! # Usage
//!
//! ```bash
//! # Redirect repositories to literal schema.table names (default)
//! schemascope
//!
//! # Rely on each model's declared table name instead
//! schemascope --scope declared
//!
//! # Print the result sets as JSON
//! schemascope --format json
//! ```
//!
//! Connection settings come from `SCHEMASCOPE_DB_*` environment variables and
//! default to a local `postgres`/`postgres` database; see
//! [`schemascope_cli::config`].
//!
//! Exits with status 1 on any configuration, connection, schema, migration or
//! query failure.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schemascope_cli::config::DatabaseConfig;
use schemascope_cli::db::{self, ScopeMode};
use schemascope_cli::output::{self, OutputFormat};

#[derive(Parser)]
#[command(name = "schemascope")]
#[command(author, version, about = "Create schemas, auto-migrate, write one user and order, read them back")]
struct Cli {
    /// How repositories choose their table
    #[arg(long, value_enum, default_value_t = ScopeMode::Explicit)]
    scope: ScopeMode,

    /// Output format for the fetched result sets
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "schemascope=info,schemascope_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.dbname,
        "Connecting to database..."
    );
    let pool = db::create_pool(&config).await?;
    tracing::info!("Connected to database");

    let report = schemascope_cli::run::run(&pool, cli.scope).await?;
    let rendered = output::render(&report, cli.format)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }

    pool.close().await;
    Ok(())
}
