mod commands;
mod error;
mod logging;
mod workspace;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use songfix_generate::SystemClock;

use commands::{
    GenerateRequest, generate_fixtures, list_schemas, load_catalog, resolve_schemas_path,
};
use error::CliError;
use logging::init_logging;
use workspace::{DEFAULT_SETTINGS_PATH, FixtureSettings, LogFormat, load_settings, save_settings};

#[derive(Parser, Debug)]
#[command(
    name = "songfix",
    version,
    about = "Linked FASTA/TSV test fixtures from registry schemas"
)]
struct Cli {
    /// Settings file.
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,
    /// Log output format (overrides the settings file).
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default settings file.
    Init(InitArgs),
    /// List schema names and their versions.
    List(ListArgs),
    /// Generate one linked FASTA/TSV fixture pair.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct InitArgs {
    /// Overwrite an existing settings file.
    #[arg(long, default_value_t = false)]
    force: bool,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Registry response document (JSON).
    #[arg(long, value_name = "FILE")]
    schemas: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Registry response document (JSON).
    #[arg(long, value_name = "FILE")]
    schemas: Option<PathBuf>,
    /// Schema name; defaults to the first schema in the document.
    #[arg(long)]
    name: Option<String>,
    /// Schema version; defaults to the highest published version.
    #[arg(long = "schema-version", value_name = "VERSION")]
    version: Option<u32>,
    /// Output directory for the fixture pair.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Print the outcome as JSON instead of plain paths.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?;
    let log_format = cli.log_format.unwrap_or(settings.log_format);
    init_logging(log_format, settings.log_file.as_deref())?;

    match cli.command {
        Command::Init(args) => run_init(&cli.config, args),
        Command::List(args) => run_list(args, &settings),
        Command::Generate(args) => run_generate(args, &settings),
    }
}

fn run_init(path: &Path, args: InitArgs) -> Result<(), CliError> {
    if path.exists() && !args.force {
        return Err(CliError::InvalidConfig(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    save_settings(path, &FixtureSettings::default())?;
    tracing::info!(path = %path.display(), "settings written");
    Ok(())
}

fn run_list(args: ListArgs, settings: &FixtureSettings) -> Result<(), CliError> {
    let path = resolve_schemas_path(args.schemas, settings)?;
    let catalog = load_catalog(&path)?;
    for line in list_schemas(&catalog) {
        println!("{line}");
    }
    Ok(())
}

fn run_generate(args: GenerateArgs, settings: &FixtureSettings) -> Result<(), CliError> {
    let request = GenerateRequest {
        schemas: args.schemas,
        name: args.name,
        version: args.version,
        out: args.out,
    };
    let outcome = generate_fixtures(request, settings, &SystemClock)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.delivered.sequence_path.display());
        println!("{}", outcome.delivered.table_path.display());
    }
    Ok(())
}
