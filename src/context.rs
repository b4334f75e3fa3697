use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::storage::StoreKind;

/// Runtime settings resolved from the command line and environment.
#[derive(Clone, Debug)]
pub struct Context {
    pub default_owner: String,
    pub api_listen: SocketAddr,
    pub data_dir: PathBuf,
    pub store: StoreKind,
    pub reset: bool,
    pub github_api_url: url::Url,
    pub github_token: Option<String>,
    pub upstream_timeout: Duration,
    pub max_description_len: usize,
    pub log_file: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            default_owner: cli.user.trim().to_string(),
            api_listen: SocketAddr::new(cli.host, cli.port),
            data_dir: PathBuf::from(&cli.data_dir),
            store: cli.store,
            reset: cli.reset,
            github_api_url: cli.github_api_url.clone(),
            github_token: cli.github_token.clone(),
            upstream_timeout: Duration::from_secs(cli.upstream_timeout_secs),
            max_description_len: cli.max_description_len,
            log_file: cli.log_file.as_ref().map(PathBuf::from),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(self.store.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn from_cli_builds_listen_address_and_store_path() {
        let cli = crate::cli::Cli::try_parse_from([
            "repo-overlay",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--data-dir",
            "/tmp/overlay",
            "--store",
            "sqlite",
            "--user",
            " octocat ",
        ])
        .unwrap();
        let ctx = Context::from_cli(&cli);

        assert_eq!(ctx.api_listen, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(ctx.store_path(), PathBuf::from("/tmp/overlay/overrides.sqlite"));
        assert_eq!(ctx.default_owner, "octocat");
    }
}
