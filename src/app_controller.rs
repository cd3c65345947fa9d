use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::path::Path;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::formatter::SrtFormatter;
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for subtitle formatting

/// Where formatted output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Write to standard output
    Stdout,
    /// Overwrite the input file
    InPlace,
}

/// Main application controller: read a file, format it, write the result
pub struct Controller {
    // @field: Formatting pipeline built from the configuration
    formatter: SrtFormatter,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let formatter = SrtFormatter::new(config.format_options());

        Ok(Self { formatter })
    }

    /// Read and parse `input_file` completely
    pub fn parse_file(&self, input_file: &Path) -> Result<SubtitleCollection> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let raw = FileManager::read_bytes(input_file)?;
        debug!("Read {} bytes from {:?}", raw.len(), input_file);

        self.formatter
            .parse(&raw)
            .with_context(|| format!("Failed to format {:?}", input_file))
    }

    /// Read `input_file` and return its canonical SRT bytes
    pub fn format_file(&self, input_file: &Path) -> Result<Vec<u8>> {
        Ok(self.parse_file(input_file)?.to_srt_bytes())
    }

    /// Format `input_file` and send the result to stdout or back into the file.
    ///
    /// Nothing is written unless the whole file parsed.
    pub fn run(&self, input_file: &Path, mode: OutputMode) -> Result<()> {
        let collection = self.parse_file(input_file)?;

        match mode {
            OutputMode::InPlace => {
                FileManager::write_bytes(input_file, &collection.to_srt_bytes())?;
                info!("Saved {} cue(s) to {:?}", collection.len(), input_file);
            }
            OutputMode::Stdout => {
                let mut stdout = std::io::stdout().lock();
                collection
                    .write_srt(&mut stdout)
                    .context("Failed to write formatted subtitles to stdout")?;
            }
        }

        Ok(())
    }
}
