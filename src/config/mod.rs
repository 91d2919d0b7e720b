pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

pub use toml_config::ScrapeConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "hebtv-live")]
#[command(about = "Scrape the Hebei TV live page for an m3u8 stream and write an M3U playlist")]
pub struct CliConfig {
    /// Optional TOML file overriding the built-in source, fallback and output settings
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the playlist is written to
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Built-in defaults, then the TOML file, then command-line overrides.
    pub fn load(&self) -> crate::utils::error::Result<ScrapeConfig> {
        let mut config = match &self.config {
            Some(path) => ScrapeConfig::from_file(path)?,
            None => ScrapeConfig::default(),
        };

        if let Some(output_path) = &self.output_path {
            config.output.output_path = output_path.clone();
        }

        Ok(config)
    }
}
