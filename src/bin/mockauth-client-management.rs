//! Mockauth Client Management CLI Tool
//!
//! A command-line interface for managing OAuth 2.0 clients on a running
//! mockauth server. Supports dynamic client registration, public client
//! metadata lookup, and requesting access tokens through the Client
//! Credentials grant.
//!
//! ## Usage Examples
//!
//! ### Register a new client
//! ```bash
//! # Server-issued mode: the server generates the credentials
//! mockauth-client-management --base-url http://localhost:8080 register \
//!   --name "nhnace-ai-search-test"
//!
//! # Caller-issued mode: supply the credentials yourself
//! mockauth-client-management --base-url http://localhost:8080 register \
//!   --name "my-client" \
//!   --client-id "my-client-id" \
//!   --client-secret "at-least-eight-chars"
//! ```
//!
//! ### Get public client information
//! ```bash
//! mockauth-client-management --base-url http://localhost:8080 get \
//!   --client-id "client_id_here"
//! ```
//!
//! ### Request an access token
//! ```bash
//! mockauth-client-management --base-url http://localhost:8080 token \
//!   --client-id "client_id_here" \
//!   --client-secret "client_secret_here"
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Success
//! - 1: General error (network, parsing)
//! - 2: Client management error
//! - 3: Authentication error

use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::process;

/// Registration request body submitted to the server
#[derive(Debug, Serialize)]
struct RegisterRequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<String>,
}

/// Main CLI application structure
#[derive(Parser)]
#[command(
    name = "mockauth-client-management",
    about = "Mockauth OAuth Client Management CLI Tool",
    long_about = "A command-line interface for managing OAuth 2.0 clients on a mockauth server. \
                  Supports dynamic client registration and the Client Credentials token grant.",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Base URL of the mockauth server
    #[arg(
        long,
        default_value = "http://localhost:8080",
        help = "Base URL of the mockauth server"
    )]
    base_url: String,

    /// Enable verbose output
    #[arg(short, long, help = "Enable verbose output for debugging")]
    verbose: bool,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "json",
        help = "Output format for responses"
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// JSON formatted output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Register a new OAuth client
    Register(RegisterArgs),
    /// Get public information about an existing client
    Get(GetArgs),
    /// Request an access token using the Client Credentials grant
    Token(TokenArgs),
}

/// Arguments for client registration
#[derive(Args)]
struct RegisterArgs {
    /// Human-readable name for the client
    #[arg(long, help = "Human-readable name for the OAuth client")]
    name: Option<String>,

    /// Client identifier, for servers running in caller-issued mode
    #[arg(
        long,
        help = "Client identifier to register (caller-issued mode only)"
    )]
    client_id: Option<String>,

    /// Client secret, for servers running in caller-issued mode
    #[arg(
        long,
        help = "Client secret to register, at least 8 characters (caller-issued mode only)"
    )]
    client_secret: Option<String>,
}

/// Arguments for client retrieval
#[derive(Args)]
struct GetArgs {
    /// Client ID
    #[arg(long, help = "OAuth client ID to look up")]
    client_id: String,
}

/// Arguments for requesting an access token
#[derive(Args)]
struct TokenArgs {
    /// Client ID
    #[arg(long, help = "OAuth client ID")]
    client_id: String,

    /// Client secret
    #[arg(long, help = "OAuth client secret")]
    client_secret: String,
}

/// Application errors
#[derive(Debug)]
enum AppError {
    /// Network or HTTP client errors
    Network(reqwest::Error),
    /// JSON parsing or serialization errors
    Json(serde_json::Error),
    /// Client registration or management errors
    ClientManagement(String),
    /// Authentication errors
    Authentication(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Network(err) => write!(f, "Network error: {}", err),
            AppError::Json(err) => write!(f, "JSON error: {}", err),
            AppError::ClientManagement(msg) => write!(f, "Client management error: {}", msg),
            AppError::Authentication(msg) => write!(f, "Authentication error: {}", msg),
        }
    }
}

/// Main application entry point
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Register(args) => register_client(&cli, args).await,
        Commands::Get(args) => get_client(&cli, args).await,
        Commands::Token(args) => request_token(&cli, args).await,
    };

    match result {
        Ok(()) => process::exit(0),
        Err(err @ AppError::ClientManagement(_)) => {
            eprintln!("Error: {err}");
            process::exit(2);
        }
        Err(err @ AppError::Authentication(_)) => {
            eprintln!("Error: {err}");
            process::exit(3);
        }
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

/// Register a new OAuth client
async fn register_client(cli: &Cli, args: &RegisterArgs) -> Result<(), AppError> {
    if cli.verbose {
        eprintln!("Registering OAuth client with server: {}", cli.base_url);
    }

    let request = RegisterRequestBody {
        client_name: args.name.clone(),
        client_id: args.client_id.clone(),
        client_secret: args.client_secret.clone(),
    };

    if cli.verbose {
        eprintln!(
            "Registration request: {}",
            serde_json::to_string_pretty(&request)?
        );
    }

    let client = Client::new();
    let url = format!("{}/register", cli.base_url);

    let response = client.post(&url).json(&request).send().await?;

    if cli.verbose {
        eprintln!("Response status: {}", response.status());
    }

    match response.status() {
        StatusCode::CREATED => {
            let registered: Value = response.json().await?;
            output_response(&cli.format, &registered)?;
            Ok(())
        }
        status => {
            let error_text = response.text().await?;
            Err(AppError::ClientManagement(format!(
                "Registration failed with status {}: {}",
                status, error_text
            )))
        }
    }
}

/// Get public information about an existing client
async fn get_client(cli: &Cli, args: &GetArgs) -> Result<(), AppError> {
    if cli.verbose {
        eprintln!("Getting client information for: {}", args.client_id);
    }

    let client = Client::new();
    let url = format!("{}/register/{}", cli.base_url, args.client_id);

    let response = client.get(&url).send().await?;

    if cli.verbose {
        eprintln!("Response status: {}", response.status());
    }

    match response.status() {
        StatusCode::OK => {
            let client_info: Value = response.json().await?;
            output_response(&cli.format, &client_info)?;
            Ok(())
        }
        StatusCode::NOT_FOUND => Err(AppError::ClientManagement(format!(
            "Client '{}' not found",
            args.client_id
        ))),
        status => {
            let error_text = response.text().await?;
            Err(AppError::ClientManagement(format!(
                "Failed to get client with status {}: {}",
                status, error_text
            )))
        }
    }
}

/// Request an access token using the Client Credentials grant
async fn request_token(cli: &Cli, args: &TokenArgs) -> Result<(), AppError> {
    if cli.verbose {
        eprintln!("Requesting access token from server: {}", cli.base_url);
    }

    let client = Client::new();
    let url = format!("{}/token", cli.base_url);

    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", args.client_id.as_str()),
        ("client_secret", args.client_secret.as_str()),
    ];
    let response = client.post(&url).form(&form).send().await?;

    if cli.verbose {
        eprintln!("Response status: {}", response.status());
    }

    match response.status() {
        StatusCode::OK => {
            let token: Value = response.json().await?;
            output_response(&cli.format, &token)?;
            Ok(())
        }
        StatusCode::UNAUTHORIZED => Err(AppError::Authentication(
            "Invalid client credentials".to_string(),
        )),
        status => {
            let error_text = response.text().await?;
            Err(AppError::ClientManagement(format!(
                "Token request failed with status {}: {}",
                status, error_text
            )))
        }
    }
}

/// Output response data in the requested format
fn output_response<T: Serialize>(format: &OutputFormat, data: &T) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(data)?);
        }
        OutputFormat::JsonPretty => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}
