//! Beeper CLI - command-line client for the Beeper Desktop API
//!
//! Reads and sends messages across the chat networks connected to a local
//! Beeper Desktop instance.

mod api;
mod config;
mod models;
mod output;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::ApiClient;
use config::Config;
use output::Format;

#[derive(Parser)]
#[command(name = "beeper")]
#[command(about = "Command-line client for the Beeper Desktop API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, markdown); overrides the configured default
    #[arg(short, long, global = true)]
    output: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List and inspect chats
    Chats {
        #[command(subcommand)]
        command: ChatsCommands,
    },

    /// Retrieve messages from chats
    Messages {
        #[command(subcommand)]
        command: MessagesCommands,
    },

    /// Send a message to a chat
    Send {
        /// Chat ID to send to (from `chats list` output)
        #[arg(long)]
        chat_id: String,

        /// Message text
        #[arg(long)]
        message: String,
    },

    /// Search messages across all chats
    Search {
        /// Search query text
        #[arg(long)]
        query: String,

        /// Maximum number of results
        #[arg(long, default_value = "100")]
        limit: usize,
    },

    /// Auto-discover the Beeper Desktop API endpoint and save it
    Discover,

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ChatsCommands {
    /// List all chats
    List,

    /// Get details of a specific chat
    Get {
        /// Chat ID
        chat_id: String,
    },
}

#[derive(Subcommand)]
enum MessagesCommands {
    /// List messages from a chat
    List {
        /// Chat ID to retrieve messages from
        #[arg(long)]
        chat_id: String,

        /// Maximum number of messages to retrieve
        #[arg(long, default_value = "50")]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set the Beeper Desktop API URL
    SetUrl {
        /// Base URL, e.g. http://localhost:39867
        url: String,
    },

    /// Set the default output format (json, text, markdown)
    SetFormat {
        /// Format name
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut cfg = Config::load()?;

    // An explicitly requested format is validated strictly; only values
    // read back from the config file get the lossy fallback.
    let format = match cli.output {
        Some(ref name) => name.parse::<Format>()?,
        None => cfg.format(),
    };

    match cli.command {
        Commands::Chats { command } => match command {
            ChatsCommands::List => {
                let client = client_from(&cfg)?;
                let chats = client.list_chats().await.context("Failed to list chats")?;
                print!("{}", output::format_chats(&chats, format));
            }
            ChatsCommands::Get { chat_id } => {
                require_value(&chat_id, "chat ID")?;
                let client = client_from(&cfg)?;
                let chat = client.get_chat(&chat_id).await.context("Failed to get chat")?;
                // Single-item collection keeps the output shape uniform
                print!("{}", output::format_chats(&[chat], format));
            }
        },
        Commands::Messages { command } => match command {
            MessagesCommands::List { chat_id, limit } => {
                require_value(&chat_id, "--chat-id")?;
                let client = client_from(&cfg)?;
                let messages = client
                    .list_messages(&chat_id, limit)
                    .await
                    .context("Failed to list messages")?;
                print!("{}", output::format_messages(&messages, format));
            }
        },
        Commands::Send { chat_id, message } => {
            require_value(&chat_id, "--chat-id")?;
            require_value(&message, "--message")?;
            tracing::info!("Sending message...");
            let client = client_from(&cfg)?;
            let result = client
                .send_message(&chat_id, &message)
                .await
                .context("Failed to send message")?;
            print!("{}", output::format_send_result(&result, format));
        }
        Commands::Search { query, limit } => {
            require_value(&query, "--query")?;
            let client = client_from(&cfg)?;
            let messages = client
                .search_messages(&query, limit)
                .await
                .context("Failed to search messages")?;
            print!("{}", output::format_messages(&messages, format));
        }
        Commands::Discover => {
            tracing::info!("Discovering Beeper Desktop API...");
            let url = api::discover().await.context(
                "Discovery failed. Ensure Beeper Desktop is running, \
                 or set the URL manually with `beeper config set-url <url>`",
            )?;
            println!("Found Beeper Desktop API at: {}", url);
            cfg.api_url = url;
            cfg.save().context("Failed to save config")?;
            println!("Configuration saved.");
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                println!("api_url: {}", cfg.api_url);
                println!("output_format: {}", cfg.output_format);
                println!(
                    "token: {}",
                    if cfg.token().is_some() { "set" } else { "unset" }
                );
            }
            ConfigCommands::SetUrl { url } => {
                require_value(&url, "URL")?;
                cfg.api_url = url;
                cfg.save().context("Failed to save config")?;
                println!("API URL set to: {}", cfg.api_url);
            }
            ConfigCommands::SetFormat { format } => {
                let parsed = format.parse::<Format>()?;
                cfg.output_format = parsed.to_string();
                cfg.save().context("Failed to save config")?;
                println!("Output format set to: {}", cfg.output_format);
            }
        },
    }

    Ok(())
}

/// Build an API client from the configuration.
fn client_from(cfg: &Config) -> Result<ApiClient> {
    if cfg.api_url.trim().is_empty() {
        bail!("No API URL configured. Run `beeper discover` or `beeper config set-url <url>`.");
    }
    Ok(ApiClient::new(cfg.api_url.clone(), cfg.token()))
}

/// Reject empty required values before any request goes out.
fn require_value(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{} must not be empty", name);
    }
    Ok(())
}
