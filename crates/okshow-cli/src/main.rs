use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use log::debug;
use miette::Diagnostic;
use okshow_core::{
    Config, ConfigError, Discard, Document, GroupingLevel, HeadingAlign, NameAlign,
    NumberingPolicy, Renderer, Resolution, ShowError, Warning, WarningSink, decode,
};
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};
use thiserror::Error;

const EXIT_FAILURE: u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;
const EXIT_AMBIGUOUS: u8 = 3;

/// Show the ok-file colorized (or just one line)
#[derive(Parser, Debug)]
#[command(name = "ok-show", version, about)]
struct Args {
    /// 0=quiet, 1=normal, 2=verbose
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=2))]
    verbose: u8,

    /// Label alignment: 0=none, 1=numbers only, 2=numbers and names [default: 2]
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=2))]
    name_align: Option<u8>,

    /// Heading alignment: 0=none, 1=with the colons, 2=with the code [default: 1]
    #[arg(short = 'H', long, value_parser = clap::value_parser!(u8).range(0..=2))]
    heading_align: Option<u8>,

    /// Comment alignment: 0=none, 1=consecutive lines, 2=including blank lines, 3=all [default: 2]
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=3))]
    comment_align: Option<u8>,

    /// Number of columns of the terminal [default: width of stdout's terminal, else 80]
    #[arg(short, long, env = "COLUMNS")]
    terminal_width: Option<usize>,

    /// Internal commands of ok, which cannot be used as named lines
    #[arg(short = 'I', long, value_delimiter = ',')]
    internal_commands: Option<Vec<String>>,

    /// Which lines get a number
    #[arg(long, value_enum)]
    numbering: Option<NumberingPolicy>,

    /// Read the ok-file from this path instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// TOML file with default settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// The command name or line number to show
    command: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        match level {
            0 => Self::Quiet,
            1 => Self::Normal,
            _ => Self::Verbose,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let verbosity = Verbosity::from(args.verbose);
    init_logging(verbosity);

    match run(&args, verbosity) {
        Ok(code) => code,
        Err(e) => {
            report_error(&e, verbosity);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Log filter used when `RUST_LOG` is not set.
const fn default_log_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Verbose => "debug",
        Verbosity::Quiet | Verbosity::Normal => "warn",
    }
}

fn init_logging(verbosity: Verbosity) {
    let env = env_logger::Env::default().default_filter_or(default_log_filter(verbosity));
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(args: &Args, verbosity: Verbosity) -> Result<ExitCode, Error> {
    let config = build_config(args)?;
    let bytes = read_input(args)?;
    let source = decode(&bytes)?;

    match &args.command {
        None => list(&config, source, verbosity),
        Some(query) => show_one(&config, source, query, verbosity),
    }
}

/// Defaults, then the config file, then explicit flags, then color variables.
fn build_config(args: &Args) -> Result<Config, Error> {
    let (mut config, width_in_file) = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let table: toml::Table = text.parse()?;
            (toml::from_str(&text)?, table.contains_key("terminal_width"))
        }
        None => (Config::default(), false),
    };

    if let Some(level) = args.name_align.and_then(NameAlign::from_level) {
        config.name_align = level;
    }
    if let Some(level) = args.heading_align.and_then(HeadingAlign::from_level) {
        config.heading_align = level;
    }
    if let Some(level) = args.comment_align.and_then(GroupingLevel::from_level) {
        config.grouping = level;
    }
    if let Some(width) = pick_terminal_width(args.terminal_width, width_in_file, detect_width) {
        config.terminal_width = width;
    }
    if let Some(names) = &args.internal_commands {
        config.reserved_names.clone_from(names);
    }
    if let Some(numbering) = args.numbering {
        config.numbering = numbering;
    }

    let palette = &mut config.palette;
    if let Ok(value) = std::env::var("_OK_C_NUMBER") {
        palette.number_rest.clone_from(&value);
        palette.number = value;
    }
    for (var, slot) in [
        ("_OK_C_HEADING", &mut palette.heading),
        ("_OK_C_COMMENT", &mut palette.comment),
        ("_OK_C_COMMAND", &mut palette.command),
    ] {
        if let Ok(value) = std::env::var(var) {
            *slot = value;
        }
    }

    config.validate()?;
    debug!("effective config: {config:?}");
    Ok(config)
}

/// An explicit width wins, then one set in the config file, then the
/// detected terminal. `None` keeps the configured value.
fn pick_terminal_width<F>(explicit: Option<usize>, width_in_file: bool, detect: F) -> Option<usize>
where
    F: FnOnce() -> Option<usize>,
{
    match explicit {
        Some(width) => Some(width),
        None if width_in_file => None,
        None => detect(),
    }
}

/// Columns of the terminal on stdout, if stdout is one.
fn detect_width() -> Option<usize> {
    let width = terminal_size().map(|(Width(columns), _)| usize::from(columns));
    debug!("detected terminal width: {width:?}");
    width
}

fn read_input(args: &Args) -> Result<Vec<u8>, Error> {
    match &args.file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}

/// Prints warnings to stderr as they are found.
struct StderrWarnings;

impl WarningSink for StderrWarnings {
    fn warn(&mut self, warning: Warning) {
        eprintln!("{} {warning}", "WARNING:".yellow());
    }
}

fn list(config: &Config, source: &str, verbosity: Verbosity) -> Result<ExitCode, Error> {
    let mut stdout = io::stdout().lock();
    if verbosity == Verbosity::Verbose {
        writeln!(stdout, "    name_align: {:?}", config.name_align)?;
        writeln!(stdout, " heading_align: {:?}", config.heading_align)?;
        writeln!(stdout, " comment_align: {:?}", config.grouping)?;
        writeln!(stdout, "terminal_width: {}", config.terminal_width)?;
        writeln!(stdout, "     numbering: {:?}", config.numbering)?;
    }

    let document = if verbosity >= Verbosity::Normal {
        Document::analyze(source, config, &mut StderrWarnings)
    } else {
        Document::analyze(source, config, &mut Discard)
    };
    let renderer = Renderer::new(&document, config);
    stdout.write_all(renderer.document(&document).as_bytes())?;

    if document.commands().next().is_none() {
        return Ok(ExitCode::from(EXIT_FAILURE));
    }
    Ok(ExitCode::SUCCESS)
}

fn show_one(
    config: &Config,
    source: &str,
    query: &str,
    verbosity: Verbosity,
) -> Result<ExitCode, Error> {
    let document = Document::analyze(source, config, &mut Discard);

    match document.resolve(query) {
        Resolution::NotFound { suggestions } => {
            eprint!("{}", not_found_message(query, &suggestions));
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        }
        Resolution::Ambiguous { candidates } => {
            eprintln!("Command '{query}' is ambiguous, which command did you mean:");
            eprintln!("\t{}", join_alternatives(&candidates));
            Ok(ExitCode::from(EXIT_AMBIGUOUS))
        }
        Resolution::Found { line, kind } => {
            let label = line.label();
            if verbosity == Verbosity::Verbose && label != query {
                eprintln!(
                    "Matched argument '{query}' with command '{label}' because it was the only match ({kind:?})"
                );
            }
            if verbosity >= Verbosity::Normal {
                let renderer = Renderer::new(&document, config);
                eprintln!("{}", renderer.command(line));
            }
            writeln!(io::stdout().lock(), "{}", line.text)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn not_found_message(query: &str, suggestions: &[String]) -> String {
    match suggestions {
        [] => format!("Entered command '{query}' could not be found\n"),
        [_] => format!(
            "Entered command '{query}' could not be found, suggested item:\n\t{}\n",
            join_alternatives(suggestions)
        ),
        _ => format!(
            "Entered command '{query}' could not be found, suggested items:\n\t{}\n",
            join_alternatives(suggestions)
        ),
    }
}

/// `a, b or c`.
fn join_alternatives(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}

fn report_error(error: &Error, verbosity: Verbosity) {
    eprintln!("{} {error}", "ERROR:".yellow());
    if let Error::Show(show) = error {
        if let Some(help) = show.help() {
            eprintln!("  = help: {help}");
        }
        if verbosity == Verbosity::Verbose {
            let ShowError::Encoding {
                location,
                valid_up_to,
                invalid,
            } = show;
            eprintln!("* line____: {}", location.line);
            eprintln!("* column__: {}", location.column);
            eprintln!("* offset__: {valid_up_to}");
            eprintln!("* bytes___: {invalid:02x?}");
        }
    }
}

#[derive(Debug, Error)]
enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Show(#[from] ShowError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not parse config file: {0}")]
    ConfigFile(#[from] toml::de::Error),
}
