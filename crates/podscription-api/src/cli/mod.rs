//! CLI command definitions and dispatch for the `podscription` binary.
//!
//! Uses clap derive macros for argument parsing. Every configuration value
//! can also come from its environment variable; explicit flags win.

pub mod ask;
pub mod sessions;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use secrecy::SecretString;
use uuid::Uuid;

use podscription_infra::config::ConfigOverrides;

/// Kubernetes troubleshooting consultations, served over REST or asked locally.
#[derive(Parser)]
#[command(name = "podscription", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as newline-delimited JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Path to a TOML configuration file.
    #[arg(long, global = true, env = "PODSCRIPTION_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub llm: LlmArgs,

    /// Session snapshot file; empty keeps sessions in memory only.
    #[arg(long, global = true, env = "STORE_PATH")]
    pub store_path: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Model backend settings.
#[derive(clap::Args)]
pub struct LlmArgs {
    /// API key for the OpenAI-compatible endpoint.
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint.
    #[arg(long, global = true, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,

    /// Model identifier.
    #[arg(long, global = true, env = "OPENAI_MODEL")]
    pub model: Option<String>,

    /// Sampling temperature for diagnoses.
    #[arg(long, global = true, env = "OPENAI_TEMPERATURE")]
    pub temperature: Option<f64>,

    /// Token cap for diagnoses.
    #[arg(long, global = true, env = "OPENAI_MAX_TOKENS")]
    pub max_tokens: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, env = "SERVER_PORT")]
        port: Option<u16>,

        /// Host to bind to.
        #[arg(long, env = "SERVER_HOST")]
        host: Option<String>,
    },

    /// Describe a problem and get a prescription.
    Ask {
        /// Continue an existing session.
        #[arg(long, short)]
        session: Option<Uuid>,

        /// The problem description.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Inspect stored sessions.
    Sessions {
        #[command(subcommand)]
        action: SessionsAction,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SessionsAction {
    /// List all sessions.
    #[command(alias = "ls")]
    List,

    /// Show a session's full conversation.
    Show {
        /// Session ID.
        id: Uuid,
    },
}

impl Cli {
    /// Configuration values supplied on the command line or environment.
    pub fn overrides(&self) -> ConfigOverrides {
        let (host, port) = match &self.command {
            Commands::Serve { host, port } => (host.clone(), *port),
            _ => (None, None),
        };

        ConfigOverrides {
            host,
            port,
            base_url: self.llm.base_url.clone(),
            model: self.llm.model.clone(),
            temperature: self.llm.temperature,
            max_tokens: self.llm.max_tokens,
            store_path: self.store_path.clone(),
        }
    }

    /// The API key, if one was supplied. Blank values count as missing.
    pub fn api_key(&self) -> Option<SecretString> {
        self.llm
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| SecretString::from(key.to_string()))
    }
}
