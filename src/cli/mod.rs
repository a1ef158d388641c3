pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

use crate::client::ApiClient;

#[derive(Parser)]
#[command(name = "canchas")]
#[command(about = "Canchas CLI - browse, publish and review sports courts")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "CANCHAS_API_URL", default_value = "http://localhost:3000", help = "API base URL")]
    pub url: String,

    #[arg(long, global = true, env = "CANCHAS_TOKEN", hide_env_values = true, help = "Bearer token from `auth login`")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Account registration, login and profile")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Court listings")]
    Courts {
        #[command(subcommand)]
        cmd: commands::courts::CourtCommands,
    },

    #[command(about = "Court reviews")]
    Reviews {
        #[command(subcommand)]
        cmd: commands::reviews::ReviewCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// What every command handler needs: the client, the caller's token and the output format
pub struct Context {
    pub client: ApiClient,
    pub token: Option<String>,
    pub output: OutputFormat,
}

impl Context {
    /// The bearer token, required by every protected command
    pub fn token(&self) -> anyhow::Result<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow::anyhow!("this command requires a token: pass --token or set CANCHAS_TOKEN"))
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context {
        client: ApiClient::new(&cli.url)?,
        token: cli.token.clone(),
        output: OutputFormat::from_cli(&cli),
    };

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx).await,
        Commands::Courts { cmd } => commands::courts::handle(cmd, &ctx).await,
        Commands::Reviews { cmd } => commands::reviews::handle(cmd, &ctx).await,
    }
}
