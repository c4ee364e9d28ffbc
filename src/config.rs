use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Host to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Assistant endpoint URL
    #[arg(long, env = "CHAT_ENDPOINT")]
    pub chat_endpoint: Option<String>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub chat: ChatConfig,
    pub resilience: ResilienceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// Assistant endpoint the widget posts each message to. The endpoint
    /// (and its CSRF policy) is operated by the surrounding deployment.
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    pub timeout_disabled: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder();

        // Defaults
        builder = builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("chat.endpoint", "http://127.0.0.1:8001/api/chat/")?
            .set_default("resilience.timeout_disabled", false)?;

        // Config file: explicit path (flag or CONFIG_FILE), else ./config.yaml
        // if present.
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else {
            builder = builder.add_source(File::with_name("config").required(false));
        }

        // Environment variables prefixed with METRO_, e.g. METRO_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("METRO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // CLI overrides win over file and environment sources.
        // Priority: CLI flag > CLI env var > METRO_ env > config file > defaults.
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(host) = &cli.host {
            builder = builder.set_override("server.host", host.clone())?;
        }
        if let Some(endpoint) = &cli.chat_endpoint {
            builder = builder.set_override("chat.endpoint", endpoint.clone())?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("resilience.timeout_disabled", td)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        // Parse with a bare argv so test-runner flags don't leak in.
        let config = AppConfig::load_from_args(["metro-induction"]).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.chat.endpoint.ends_with("/api/chat/"));
        assert!(!config.resilience.timeout_disabled);
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let config = AppConfig::load_from_args([
            "metro-induction",
            "--port",
            "9090",
            "--chat-endpoint",
            "http://assistant.local/api/chat/",
        ])
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.chat.endpoint, "http://assistant.local/api/chat/");
    }

}
