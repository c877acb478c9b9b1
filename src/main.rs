//! MSL School server CLI
//!
//! ```sh
//! # Serve with the default config (~/.config/msl-school/config.toml)
//! msl-school
//!
//! # Custom config path
//! msl-school --config /etc/msl-school/config.toml serve
//!
//! # Apply migrations / load sample data and exit
//! msl-school migrate
//! msl-school seed
//!
//! # Validate config without starting
//! msl-school check
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use msl_school::application::run_seed;
use msl_school::config::AppConfig;
use msl_school::server::{init_tracing, ServerHandle, ServerOptions};
use msl_school::{default_config_path, init_database, run_migrations, SeaOrmRepositoryProvider};

/// MSL School administration server.
#[derive(Parser, Debug)]
#[command(
    name = "msl-school",
    version,
    about = "MSL School administration server",
    long_about = "RPC-over-HTTP server for MSL School: authentication, sessions \
                  and academic records.\n\n\
                  Default config: ~/.config/msl-school/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "MSL_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Run the RPC server (default).
    Serve {
        /// Skip database migrations on startup.
        #[arg(long)]
        no_migrate: bool,
    },
    /// Apply database migrations and exit.
    Migrate,
    /// Load the sample school data (idempotent) and exit.
    Seed,
    /// Validate the configuration and print the effective values.
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            cfg.apply_env_overrides();
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            // Init tracing first so subsequent logs are formatted properly
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            if matches!(cli.command, Some(Command::Check)) {
                eprintln!("Configuration is invalid: {}", e);
                eprintln!("   Config file : {}", config_path.display());
                std::process::exit(1);
            }
            // Fallback tracing init
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
        config.logging.level = level.clone();
    }

    match cli.command.unwrap_or(Command::Serve { no_migrate: false }) {
        Command::Check => {
            println!("Configuration is valid");
            println!("   Config file : {}", config_path.display());
            println!("   Address     : {}", config.address());
            println!("   Auth URL    : {}", config.auth.base_url);
            println!("   CORS origin : {}", config.cors.origin);
            println!("   Database    : {}", config.database.redacted_url());
            println!("   Log level   : {}", config.logging.level);
            if config.uses_dev_secret() {
                println!("   Warning     : using the development auth secret");
            }
            Ok(())
        }
        Command::Migrate => {
            let db = init_database(&config.database).await?;
            run_migrations(&db).await?;
            info!("Migrations completed");
            db.close().await?;
            Ok(())
        }
        Command::Seed => {
            let db = init_database(&config.database).await?;
            run_migrations(&db).await?;
            let repos = SeaOrmRepositoryProvider::new(db.clone());
            let summary = run_seed(&repos).await?;
            info!(
                roles = summary.roles,
                users = summary.users,
                accounts = summary.accounts,
                academic_records = summary.academic_records,
                "Seed completed; sample users admin, teacher1, student1 (password: password)"
            );
            db.close().await?;
            Ok(())
        }
        Command::Serve { no_migrate } => {
            let handle = ServerHandle::start(ServerOptions {
                config,
                auto_migrate: !no_migrate,
            })
            .await?;

            // Install OS signal handlers (SIGTERM, SIGINT)
            handle.install_signal_handler();

            info!("Press Ctrl+C to shutdown gracefully.");

            // Wait for shutdown signal, then clean up
            handle.shutdown_signal().wait().await;
            handle.wait().await;

            Ok(())
        }
    }
}
