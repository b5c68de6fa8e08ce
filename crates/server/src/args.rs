//! Command-line arguments.
//!
//! Every flag falls back to an environment variable, so a `.env` file loaded
//! before parsing can supply defaults.

use clap::{Parser, ValueEnum};
use claims_engine::telemetry::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "claims-server")]
#[command(about = "Token-issuance claims provider resolving on-premises UPNs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// HTTP listen address (overrides CLAIMS_BIND_ADDR)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Text, env = "CLAIMS_LOG_FORMAT")]
    pub log_format: LogFormatArg,

    /// OTLP endpoint for trace export (e.g., http://localhost:4317)
    #[arg(long, env = "CLAIMS_OTLP_ENDPOINT", value_name = "URL")]
    pub otlp_endpoint: Option<String>,

    /// Serve Prometheus metrics on this address (e.g., 0.0.0.0:9090)
    #[arg(long, env = "CLAIMS_METRICS_BIND", value_name = "ADDR")]
    pub metrics_bind: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["claims-server"]).unwrap();
        assert_eq!(cli.bind, None);
        assert_eq!(cli.log_format, LogFormatArg::Text);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "claims-server",
            "--bind",
            "127.0.0.1:8080",
            "--log-format",
            "json",
            "--metrics-bind",
            "127.0.0.1:9090",
        ])
        .unwrap();
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1:8080"));
        assert_eq!(LogFormat::from(cli.log_format), LogFormat::Json);
        assert_eq!(cli.metrics_bind.as_deref(), Some("127.0.0.1:9090"));
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        assert!(Cli::try_parse_from(["claims-server", "--log-format", "xml"]).is_err());
    }
}
