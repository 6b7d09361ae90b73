//! Publisher CLI - query a Malloy Publisher server from the command line

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use publisher_sdk::api::connections::get_tablesource::{
    GetTableSourceRequest, GetTableSourceResponse, get_table_source_blocking_detailed,
    get_table_source_detailed,
};
use publisher_sdk::client::{ENV_BASE_URL, ENV_TOKEN};
use publisher_sdk::{ApiError, ParsedResponse, PublisherClient};
use thiserror::Error;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Exit code when the server answers with a documented error body.
const EXIT_SERVER_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "publisher")]
#[command(version)]
#[command(about = "Query a Malloy Publisher server", long_about = None)]
struct Cli {
    /// Base URL of the publisher API (e.g. http://localhost:4000/api/v0)
    #[arg(long, env = ENV_BASE_URL, value_name = "URL")]
    base_url: Url,

    /// Bearer token sent with every request
    #[arg(long, env = ENV_TOKEN, hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    timeout: u64,

    /// Fail on response statuses the endpoint does not document
    #[arg(long)]
    raise_on_unexpected_status: bool,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a table source of a connection
    TableSource {
        /// Project name
        #[arg(value_name = "PROJECT")]
        project: String,

        /// Connection name
        #[arg(value_name = "CONNECTION")]
        connection: String,

        /// Table key (e.g. a fully qualified table name)
        #[arg(long, value_name = "KEY")]
        table_key: Option<String>,

        /// Table path (e.g. a file path for file-backed connections)
        #[arg(long, value_name = "PATH")]
        table_path: Option<String>,

        /// Use the blocking client instead of the async one
        #[arg(long)]
        blocking: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),

    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,publisher_sdk=info".to_string(),
            2 => "info,publisher_sdk=debug".to_string(),
            _ => "debug,publisher_sdk=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn build_client(cli: &Cli) -> Result<PublisherClient, ApiError> {
    let mut builder = PublisherClient::builder(cli.base_url.clone())
        .timeout(Duration::from_secs(cli.timeout))
        .raise_on_unexpected_status(cli.raise_on_unexpected_status)
        .verify_ssl(!cli.insecure);
    if let Some(token) = &cli.token {
        builder = builder.token(token);
    }
    builder.build()
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let client = build_client(&cli)?;

    match cli.command {
        Commands::TableSource {
            project,
            connection,
            table_key,
            table_path,
            blocking,
        } => {
            let request = GetTableSourceRequest {
                table_key: table_key.into(),
                table_path: table_path.into(),
                ..GetTableSourceRequest::new(project, connection)
            };

            let response = if blocking {
                get_table_source_blocking_detailed(&client, &request)?
            } else {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(CliError::Runtime)?;
                runtime.block_on(get_table_source_detailed(&client, &request))?
            };

            render(response)
        }
    }
}

fn render(response: GetTableSourceResponse) -> Result<ExitCode, CliError> {
    match response.parsed {
        Some(ParsedResponse::Success(source)) => {
            println!("{}", serde_json::to_string_pretty(&source)?);
            Ok(ExitCode::SUCCESS)
        }
        Some(ParsedResponse::Failure(error)) => {
            println!("{}", serde_json::to_string_pretty(&error)?);
            eprintln!("Server returned {}: {}", response.status, error);
            Ok(ExitCode::from(EXIT_SERVER_ERROR))
        }
        None => {
            eprintln!(
                "Unexpected response status {}: {}",
                response.status,
                String::from_utf8_lossy(&response.content)
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    tracing::debug!(base_url = %cli.base_url, "Publisher CLI starting");

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
