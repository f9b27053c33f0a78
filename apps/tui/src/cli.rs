use clap::{CommandFactory, Parser};
use ocean_dash::config::{BASE_URL_VAR, LOG_FILE_VAR, TIMEOUT_VAR};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ocean_dash", version, about = "Marine data dashboard")]
pub struct CliArgs {
    /// Backend base address
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (0 waits forever)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Load every view once, print where the data came from and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Log file path
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    /// Flags win over the environment and `.env`.
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.base_url {
            std::env::set_var(BASE_URL_VAR, url);
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var(TIMEOUT_VAR, timeout.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var(LOG_FILE_VAR, path);
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_flag() {
        let args = CliArgs::parse_from([
            "ocean_dash",
            "--base-url",
            "http://ocean:9000",
            "--timeout",
            "0",
            "--headless",
            "--json",
            "--debug",
            "--log-file",
            "/tmp/ocean.log",
        ]);

        assert_eq!(args.base_url.as_deref(), Some("http://ocean:9000"));
        assert_eq!(args.timeout, Some(0));
        assert!(args.headless && args.json && args.debug);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/ocean.log")));
    }

    #[test]
    fn help_lists_the_backend_flag() {
        assert!(CliArgs::help_text().contains("--base-url"));
    }
}
