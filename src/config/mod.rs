#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::OutputFormat;
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

/// `-` 代表 stdin / stdout
pub const STDIO_PATH: &str = "-";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "courier")]
#[command(about = "Estimate delivery cost and delivery time for a batch of packages")]
pub struct CliConfig {
    /// Batch input file, `-` for stdin
    #[arg(short, long, default_value = STDIO_PATH)]
    pub input: String,

    /// Where to write the results, `-` for stdout
    #[arg(short, long, default_value = STDIO_PATH)]
    pub output: String,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// TOML rate card with pricing and offer codes
    #[arg(short, long)]
    pub tariff: Option<String>,

    /// Emit results even when some packages cannot be scheduled
    #[arg(long)]
    pub allow_partial: bool,

    /// Parse and validate the batch, print a summary, compute nothing
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn allow_partial(&self) -> bool {
        self.allow_partial
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output", &self.output)?;
        if let Some(tariff) = &self.tariff {
            validation::validate_path("tariff", tariff)?;
        }
        Ok(())
    }
}
