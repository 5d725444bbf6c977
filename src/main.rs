use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use swallowtail::api::GraphQlClient;
use swallowtail::app::App;
use swallowtail::auth::credential_store;
use swallowtail::config::Config;
use swallowtail::logging;
use swallowtail::signup::pages::{EMAIL, FIRST_NAME, LAST_NAME, PASSWORD};
use swallowtail::signup::{signup_schema, SubmissionPipeline, SIGNUP_FIELDS};
use swallowtail::wizard::FormValues;

#[derive(Parser)]
#[command(name = "swallowtail")]
#[command(about = "Landing page and sign-up for the Swallowtail trading bot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account without the interactive wizard
    Register {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        /// Account password (at least 8 Latin characters)
        #[arg(long)]
        password: String,
    },

    /// Print the stored access token
    Token,

    /// Forget the stored access token
    Logout,

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    // No subcommand = interactive landing screen
    let is_tui_mode = cli.command.is_none();

    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Register {
            first_name,
            last_name,
            email,
            password,
        }) => {
            cmd_register(&config, first_name, last_name, email, password).await?;
        }
        Some(Commands::Token) => cmd_token(&config)?,
        Some(Commands::Logout) => cmd_logout(&config)?,
        Some(Commands::Config) => print!("{}", config.to_toml()?),
        None => {
            run_tui(config, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run().await;

    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

async fn cmd_register(
    config: &Config,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
) -> Result<()> {
    let values: FormValues = [
        (FIRST_NAME, first_name),
        (LAST_NAME, last_name),
        (EMAIL, email),
        (PASSWORD, password),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect();

    let errors = signup_schema().validate(&values);
    if !errors.is_empty() {
        for field in SIGNUP_FIELDS {
            if let Some(message) = errors.get(*field) {
                eprintln!("  {}: {}", field, message);
            }
        }
        bail!("invalid registration details");
    }

    let credentials = credential_store(config);
    let client = GraphQlClient::from_config(&config.api);
    let pipeline = SubmissionPipeline::new(Arc::new(client), Arc::clone(&credentials));
    pipeline.run(&values).await?;

    if config.credentials.persist {
        println!(
            "Registered. Token stored at {}",
            config.credentials_path().display()
        );
    } else {
        println!("Registered. Token kept for this session only (credentials.persist = false)");
    }
    Ok(())
}

fn cmd_token(config: &Config) -> Result<()> {
    match credential_store(config).access_token() {
        Some(token) => println!("{}", token),
        None => bail!("no stored access token; run `swallowtail register` first"),
    }
    Ok(())
}

fn cmd_logout(config: &Config) -> Result<()> {
    credential_store(config).clear()?;
    println!("Signed out");
    Ok(())
}
