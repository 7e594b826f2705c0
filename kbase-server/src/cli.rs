use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use kbase_core::KbaseConfig;

#[derive(Debug, Parser)]
#[command(name = "kbase-server")]
#[command(about = "Answer questions about a data model over newline-delimited JSON")]
pub struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long, short, env = "KBASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides `server.bind_addr`).
    #[arg(long, env = "KBASE_BIND")]
    pub bind: Option<String>,

    /// Knowledge model JSON to load (overrides `server.knowledge_path`).
    #[arg(long, short, env = "KBASE_KNOWLEDGE")]
    pub knowledge: Option<PathBuf>,

    /// Emit JSON log lines.
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<KbaseConfig> {
        let mut config = match &self.config {
            Some(path) => KbaseConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => KbaseConfig::default(),
        };
        if let Some(bind) = &self.bind {
            config.server.bind_addr = bind.clone();
        }
        if let Some(knowledge) = &self.knowledge {
            config.server.knowledge_path = Some(knowledge.display().to_string());
        }
        if self.json_logs {
            config.observability.json_logs = true;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let cli = Cli::parse_from([
            "kbase-server",
            "--bind",
            "0.0.0.0:9000",
            "--knowledge",
            "model.json",
            "--json-logs",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.server.knowledge_path.as_deref(), Some("model.json"));
        assert!(config.observability.json_logs);
        assert_eq!(config.retrieval.top_k, 5);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["kbase-server", "--config", "/no/such/kbase.toml"]);
        assert!(cli.resolve().is_err());
    }
}
