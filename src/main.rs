// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use srtformat::app_config::{self, Config};
use srtformat::app_controller::{Controller, OutputMode};
use srtformat::encoding::Charset;

/// CLI Wrapper for Charset to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliEncoding {
    Utf8,
    Gb18030,
    Big5,
    Utf16le,
    Utf16be,
}

impl From<CliEncoding> for Charset {
    fn from(cli_encoding: CliEncoding) -> Self {
        match cli_encoding {
            CliEncoding::Utf8 => Charset::Utf8,
            CliEncoding::Gb18030 => Charset::Gb18030,
            CliEncoding::Big5 => Charset::Big5,
            CliEncoding::Utf16le => Charset::Utf16le,
            CliEncoding::Utf16be => Charset::Utf16be,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// srtformat - normalize SubRip subtitle files
///
/// Reads an .srt file in UTF-8, UTF-16, GB18030 or Big5, and prints it back as
/// canonical UTF-8 SRT with renumbered cues and zero-padded timestamps.
#[derive(Parser, Debug)]
#[command(name = "srtformat")]
#[command(version)]
#[command(about = "Normalize SubRip (.srt) subtitle files")]
#[command(long_about = "srtformat rewrites an SRT file into canonical UTF-8 SRT.

EXAMPLES:
    srtformat movie.srt                    # Print the formatted file to stdout
    srtformat --save movie.srt             # Rewrite movie.srt in place
    srtformat -e big5 movie.srt            # Skip detection, decode as Big5
    srtformat --no-coalesce movie.srt      # Keep repeated back-to-back cues
    srtformat --config conf.json movie.srt # Load options from a JSON file
    srtformat --completions bash > srtformat.bash")]
struct CommandLineOptions {
    /// Subtitle file to format
    #[arg(value_name = "INPUT_SRT")]
    input_path: Option<PathBuf>,

    /// Save formatted srt instead of printing it out
    #[arg(long)]
    save: bool,

    /// Do not merge contiguous cues with identical text
    #[arg(long)]
    no_coalesce: bool,

    /// Decode input with this encoding instead of detecting it
    #[arg(short, long, value_enum)]
    encoding: Option<CliEncoding>,

    /// Configuration file path (JSON)
    #[arg(short, long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

// @struct: Custom logger implementation, writes to stderr only
struct CustomLogger {
    level: LevelFilter,
    color: bool,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            color: std::io::stderr().is_terminal(),
        }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = if self.color {
                writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args())
            } else {
                writeln!(stderr, "{} {} {}", now, tag, record.args())
            };
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Accept everything here; the effective level is set through log::set_max_level
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }
    log::set_max_level(LevelFilter::Info);

    let cli = match CommandLineOptions::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    if let Some(shell) = cli.completions {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "srtformat", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    let Some(input_path) = cli.input_path.clone() else {
        let help = CommandLineOptions::command().render_help();
        eprintln!("error: INPUT_SRT is required\n\n{}", help);
        return ExitCode::FAILURE;
    };

    match run_format(cli, input_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_format(options: CommandLineOptions, input_path: PathBuf) -> Result<()> {
    // If log level is set via command line, apply it before loading anything
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    let mut config = match &options.config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config file: {:?}", path))?,
        None => Config::default(),
    };

    // Override config with CLI options if provided
    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }
    if options.no_coalesce {
        config.coalesce = false;
    }
    if let Some(encoding) = options.encoding {
        config.encoding = Some(encoding.into());
    }

    log::set_max_level(config.log_level.into());

    let mode = if options.save {
        OutputMode::InPlace
    } else {
        OutputMode::Stdout
    };

    let controller = Controller::with_config(config)?;
    controller.run(&input_path, mode)
}
