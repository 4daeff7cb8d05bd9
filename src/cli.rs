//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// StayVision - try a property before you book it
#[derive(Parser)]
#[command(
    name = "stayvision",
    about = "Conversational stay simulator for rental properties",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a stay simulation in the terminal
    Simulate {
        /// Property id (see `stayvision properties`)
        #[arg(value_name = "PROPERTY")]
        property_id: String,
    },

    /// List the property catalog
    Properties {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for the properties listing
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => {
                debug!("OutputFormat::from_str: matched Text");
                Ok(Self::Text)
            }
            "json" => {
                debug!("OutputFormat::from_str: matched Json");
                Ok(Self::Json)
            }
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text or json", s))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["stayvision"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["stayvision", "serve"]);
        assert!(matches!(cli.command, Some(Command::Serve { port: None })));

        let cli = Cli::parse_from(["stayvision", "serve", "--port", "8080"]);
        assert!(matches!(cli.command, Some(Command::Serve { port: Some(8080) })));
    }

    #[test]
    fn test_cli_parse_simulate() {
        let cli = Cli::parse_from(["stayvision", "simulate", "wildhouse-farm"]);
        if let Some(Command::Simulate { property_id }) = cli.command {
            assert_eq!(property_id, "wildhouse-farm");
        } else {
            panic!("Expected Simulate command");
        }
    }

    #[test]
    fn test_cli_parse_properties_format() {
        let cli = Cli::parse_from(["stayvision", "properties", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Some(Command::Properties {
                format: OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("invalid".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["stayvision", "-c", "/path/to/config.yml", "properties"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }
}
