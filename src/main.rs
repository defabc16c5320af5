// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{error, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use jsonextractor::app_config::{self, Config};
use jsonextractor::app_controller::Controller;
use jsonextractor::{Alignment, MissingTranslation};

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract label texts from a JSON document (or every document in a directory)
    Extract(ExtractArgs),

    /// Write translated lines back into a JSON document
    Reinject(ReinjectArgs),

    /// Extract, then reinject, saving both files in one directory
    Run(RunArgs),

    /// Generate shell completions for jsonextractor
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// JSON document or directory of documents
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output text file (single document only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

#[derive(Args, Debug)]
struct ReinjectArgs {
    /// JSON document to update
    #[arg(value_name = "JSON_FILE")]
    json_file: PathBuf,

    /// Translated text file, one line per label
    #[arg(value_name = "TRANSLATION_FILE")]
    translation_file: PathBuf,

    /// Output JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    options: ReinjectOptions,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// JSON document to extract from and update
    #[arg(value_name = "JSON_FILE")]
    json_file: PathBuf,

    /// Translated text file, one line per label
    #[arg(value_name = "TRANSLATION_FILE")]
    translation_file: PathBuf,

    /// Directory receiving both output files
    #[arg(short = 'd', long, default_value = ".")]
    output_dir: PathBuf,

    #[command(flatten)]
    options: ReinjectOptions,
}

#[derive(Args, Debug)]
struct ReinjectOptions {
    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Fail when the label and line counts differ
    #[arg(long)]
    strict: bool,

    /// Fail when a label has no Translation field instead of creating it
    #[arg(long)]
    require_translation: bool,

    /// Pretty print the updated JSON
    #[arg(long)]
    pretty: bool,
}

impl ReinjectOptions {
    fn apply(&self, config: &mut Config) {
        if self.strict {
            config.reinject.alignment = Alignment::Strict;
        }
        if self.require_translation {
            config.reinject.missing_translation = MissingTranslation::Require;
        }
        if self.pretty {
            config.output.pretty_json = true;
        }
    }
}

/// jsonextractor - Label text extraction and reinjection
///
/// Extracts the texts of a JSON translation document to a plain text file
/// for translation, and writes the translated lines back into the document.
#[derive(Parser, Debug)]
#[command(name = "jsonextractor")]
#[command(version)]
#[command(about = "Extract and reinject JSON translation labels")]
#[command(long_about = "jsonextractor moves the Text of every label in a TranslationLabels array \
to a text file, one label per line, and writes translated lines back into the Translation fields.

EXAMPLES:
    jsonextractor extract labels.json                       # Writes extracted_texts.txt
    jsonextractor extract -o texts.txt labels.json          # Choose the output file
    jsonextractor extract /translations/                    # Every *.json in a directory
    jsonextractor reinject labels.json translated.txt       # Writes updated_translation.json
    jsonextractor reinject --strict labels.json fr.txt      # Reject partial translation files
    jsonextractor run -d out/ labels.json translated.txt    # Both steps in one go
    jsonextractor completions bash > jsonextractor.bash     # Generate bash completions

LINE FORMAT:
    Line N of the text file belongs to label N. Line feeds inside a Text are
    written as the two characters \\n. Translated lines are injected verbatim.

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // The logger accepts everything; the max level filters
    if CustomLogger::init(LevelFilter::Trace).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    let cli = CommandLineOptions::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "jsonextractor", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;

    // Update log level in config if specified via command line
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(level_filter(&config.log_level));

    match cli.command {
        Commands::Extract(args) => run_extract(config, &cli.config_path, args),
        Commands::Reinject(args) => {
            args.options.apply(&mut config);
            run_reinject(config, args)
        }
        Commands::Run(args) => {
            args.options.apply(&mut config);
            run_session(config, args)
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn run_extract(config: Config, config_path: &str, args: ExtractArgs) -> Result<()> {
    let controller = Controller::with_config(config)?.excluding(config_path);

    if args.input_path.is_file() {
        controller.extract_file(&args.input_path, args.output, args.force_overwrite)?;
    } else if args.input_path.is_dir() {
        if args.output.is_some() {
            return Err(anyhow!("--output cannot be used with a directory input"));
        }
        let summary = controller.extract_folder(&args.input_path, args.force_overwrite)?;
        if summary.failed > 0 {
            return Err(anyhow!("{} document(s) could not be extracted", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}

fn run_reinject(config: Config, args: ReinjectArgs) -> Result<()> {
    ensure_file(&args.json_file)?;
    ensure_file(&args.translation_file)?;

    let controller = Controller::with_config(config)?;
    if let Some((_, report)) = controller.reinject_file(
        &args.json_file,
        &args.translation_file,
        args.output,
        args.options.force_overwrite,
    )? {
        info!("Updated {} of {} labels", report.applied, report.label_count);
    }

    Ok(())
}

fn run_session(config: Config, args: RunArgs) -> Result<()> {
    ensure_file(&args.json_file)?;
    ensure_file(&args.translation_file)?;

    let controller = Controller::with_config(config)?;
    let outcome = controller.run_session(
        &args.json_file,
        &args.translation_file,
        &args.output_dir,
        args.options.force_overwrite,
    )?;

    match outcome.report {
        Some(report) => info!("Updated {} of {} labels", report.applied, report.label_count),
        None => info!("Updated document was not written"),
    }

    Ok(())
}

fn ensure_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(anyhow!("Input file does not exist: {:?}", path));
    }
    Ok(())
}
