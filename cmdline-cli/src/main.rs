//! Command-line interface for rpi-cmdline
//! Adds or merges kernel parameters in a Raspberry Pi `/boot/cmdline.txt`.
//!
//! Usage:
//!   rpi-cmdline --key `<key>` --values `<v1,v2>` [--after `<key>` | --before `<key>`]
//!   rpi-cmdline --atom `<atom>` [--after `<key>` | --before `<key>`]
//!
//! Options not given on the command line come from the embedded defaults, then
//! `/etc/rpi-cmdline.toml` if it exists, then an optional `--config` file.

mod edit;
mod error;
mod request;

use clap::{Arg, ArgAction, ArgMatches, Command};
use cmdline_config::{CmdlineConfig, Loader, OutputFormat, SYSTEM_CONFIG};
use edit::{EditOutcome, WriteOptions};
use error::EditError;
use request::EditRequest;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    let matches = cli().get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cli() -> Command {
    Command::new("rpi-cmdline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Set or change parameters in a Raspberry Pi /boot/cmdline.txt")
        .arg_required_else_help(true)
        .arg(
            Arg::new("cmdline")
                .long("cmdline")
                .help("Location of the cmdline.txt file [default: /boot/cmdline.txt]"),
        )
        .arg(
            Arg::new("key")
                .long("key")
                .short('k')
                .help("Key to add, or to add values to. Requires --values"),
        )
        .arg(
            Arg::new("values")
                .long("values")
                .short('v')
                .help("Values for --key, comma separated or repeated")
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("atom")
                .long("atom")
                .short('a')
                .help("Single atom (a key without value) to add"),
        )
        .arg(
            Arg::new("before")
                .long("before")
                .help("Insert before the first occurrence of this key"),
        )
        .arg(
            Arg::new("after")
                .long("after")
                .help("Insert after the last occurrence of this key (e.g. 'rootwait')"),
        )
        .arg(
            Arg::new("non-unique")
                .long("non-unique")
                .help("Always add a new key=value pair or atom instead of merging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Additional TOML configuration file"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Report format [default: text]")
                .value_parser(["text", "json"]),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Report what would change without writing the file")
                .action(ArgAction::SetTrue),
        )
}

fn run(matches: &ArgMatches) -> Result<(), EditError> {
    let config = load_config(matches)?;
    let edit = request_from(matches, &config).validate()?;
    tracing::debug!(?edit, path = %config.file.path.display(), "validated edit");

    let options = WriteOptions {
        trailing_newline: config.file.trailing_newline,
        dry_run: matches.get_flag("dry-run"),
    };
    let outcome = edit::edit_file(&config.file.path, &edit, options)?;
    print_report(&outcome, config.output.format)
}

/// Defaults, then the system file, then `--config`, then individual flags.
fn load_config(matches: &ArgMatches) -> Result<CmdlineConfig, EditError> {
    let mut loader = Loader::new().with_optional_file(SYSTEM_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(path) = matches.get_one::<String>("cmdline") {
        loader = loader.set_override("file.path", path.as_str())?;
    }
    if matches.get_flag("non-unique") {
        loader = loader.set_override("edit.unique", false)?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    loader.build().map_err(EditError::from)
}

fn request_from(matches: &ArgMatches, config: &CmdlineConfig) -> EditRequest {
    let string = |id: &str| matches.get_one::<String>(id).cloned();
    EditRequest {
        key: string("key"),
        values: matches
            .get_many::<String>("values")
            .map(|values| values.cloned().collect()),
        atom: string("atom"),
        before: string("before"),
        after: string("after"),
        unique: config.edit.unique,
    }
}

fn print_report(outcome: &EditOutcome, format: OutputFormat) -> Result<(), EditError> {
    match format {
        OutputFormat::Text => {
            println!("{}", outcome.original_message);
            println!("{}", outcome.message);
            println!("{}", if outcome.changed { "changed" } else { "unchanged" });
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
    }
    Ok(())
}
