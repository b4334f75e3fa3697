use clap::Parser;
use std::env;

use crate::cli::command::Command;
use crate::directory::GitHubDirectory;
use crate::storage::StoreKind;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Serve a user's repositories with locally editable descriptions",
    long_about = "Lists an owner's repositories from the GitHub API and overlays description overrides kept in a local store. Without a subcommand the HTTP API is started.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long = "user",
        env = "GITHUB_USER",
        default_value = "profile",
        value_name = "OWNER",
        help = "Owner listed when a request does not name one"
    )]
    pub user: String,

    #[arg(
        long,
        env = "REPO_OVERLAY_HOST",
        default_value = "127.0.0.1",
        value_name = "ADDR",
        help = "Address the HTTP API binds to"
    )]
    pub host: std::net::IpAddr,

    #[arg(
        long,
        env = "PORT",
        default_value_t = 3001u16,
        value_name = "PORT",
        help = "Port the HTTP API listens on"
    )]
    pub port: u16,

    #[arg(
        long,
        env = "REPO_OVERLAY_DATA_DIR",
        default_value = "data/",
        value_name = "DIR",
        help = "Directory to store persistent data"
    )]
    pub data_dir: String,

    #[arg(
        long,
        env = "REPO_OVERLAY_STORE",
        value_enum,
        default_value_t = StoreKind::Json,
        help = "Override store backend"
    )]
    pub store: StoreKind,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted overrides before starting"
    )]
    pub reset: bool,

    #[arg(
        long,
        env = "GITHUB_API_URL",
        default_value = GitHubDirectory::DEFAULT_BASE_URL,
        value_name = "URL",
        help = "Base URL of the GitHub REST API"
    )]
    pub github_api_url: url::Url,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true,
        help = "Token for the outbound GitHub listing call (optional)"
    )]
    pub github_token: Option<String>,

    #[arg(
        long,
        env = "REPO_OVERLAY_UPSTREAM_TIMEOUT_SECS",
        default_value_t = 10u64,
        value_name = "SECS",
        help = "Timeout of the GitHub listing call"
    )]
    pub upstream_timeout_secs: u64,

    #[arg(
        long,
        env = "REPO_OVERLAY_MAX_DESCRIPTION_LEN",
        default_value_t = crate::overlay::DEFAULT_MAX_DESCRIPTION_LEN,
        value_name = "CHARS",
        help = "Longest accepted override text, after trimming"
    )]
    pub max_description_len: usize,

    #[arg(
        long = "log-file",
        env = "REPO_OVERLAY_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
