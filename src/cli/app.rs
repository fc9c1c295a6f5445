//! Main CLI application
//!
//! The binary builds a `Cli` from the commands declared in a manifest and
//! routes every unknown subcommand through it. Two built-in subcommands
//! serve shell completion: `complete <index> <line>` answers a completion
//! request and `completion` prints the script that issues those requests.

use crate::cli::Cli;
use crate::command::{Command, CompletionHandler, OptionParams, ParsedInput};
use crate::config::{
    parse_manifest_auto, parse_manifest_file, validate_manifest, CommandDef, CompletionDef,
    Manifest, OptionDef,
};
use crate::error::ArgotError;
use crate::logger::{LoggerConfig, Verbosity};
use crate::runner::{default_interpreter, execute_capture, execute_lines, interpolate_strict, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command as ClapCommand};
use futures::executor::block_on;
use futures::future;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Hidden subcommand answering completion requests
pub const COMPLETE_SUBCOMMAND: &str = "complete";

/// Subcommand printing the completion script
pub const SCRIPT_SUBCOMMAND: &str = "completion";

/// CLI application
pub struct App {
    /// The clap command
    command: ClapCommand,
    /// Router built from the manifest
    cli: Cli,
}

impl App {
    /// Create a new app from the discovered manifest
    pub fn new() -> Result<Self, ArgotError> {
        let (manifest, manifest_path) = parse_manifest_auto()?;
        Self::from_manifest(&manifest, &manifest_path)
    }

    /// Create app with a specific manifest file
    pub fn with_manifest_file(path: PathBuf) -> Result<Self, ArgotError> {
        let manifest = parse_manifest_file(&path)?;
        Self::from_manifest(&manifest, &path)
    }

    /// Validate `manifest` and build the app; commands run next to the manifest file
    pub fn from_manifest(manifest: &Manifest, manifest_path: &Path) -> Result<Self, ArgotError> {
        validate_manifest(manifest)?;

        let working_dir = manifest_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(App {
            command: build_command(manifest),
            cli: build_cli(manifest, working_dir)?,
        })
    }

    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Run the application with command line arguments
    pub fn run<I, T>(self, args: I) -> Result<(), ArgotError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = self.command;
        let matches = command.clone().get_matches_from(args);

        let verbosity = get_verbosity(&matches);
        let logger = LoggerConfig::from_env().with_verbosity(verbosity).build();
        let cli = self.cli.with_logger(logger);

        match matches.subcommand() {
            Some((COMPLETE_SUBCOMMAND, sub_matches)) => {
                let index = sub_matches.get_one::<usize>("index").copied().unwrap_or(0);
                let line = sub_matches
                    .get_one::<String>("line")
                    .map(String::as_str)
                    .unwrap_or_default();

                let candidates = block_on(cli.complete_line(index, line));
                if !candidates.is_empty() {
                    println!("{}", candidates);
                }
            }
            Some((SCRIPT_SUBCOMMAND, _)) => {
                print!("{}", cli.completion_script());
            }
            Some((name, sub_matches)) => {
                let mut argv = vec![name.to_string()];
                argv.extend(
                    sub_matches
                        .get_many::<String>("")
                        .into_iter()
                        .flatten()
                        .cloned(),
                );

                let output = block_on(cli.process(&argv))?;
                if !output.is_empty() && verbosity > Verbosity::Silent {
                    println!("{}", output);
                }
            }
            None => {
                command.print_help()?;
                println!();
            }
        }

        Ok(())
    }
}

/// Build the clap command from the manifest
fn build_command(manifest: &Manifest) -> ClapCommand {
    let mut about = manifest
        .usage
        .clone()
        .unwrap_or_else(|| "Declarative command router with shell completion".to_string());

    let listing = command_listing(manifest);
    if !listing.is_empty() {
        about = format!("{}\n\nCommands:\n{}", about, listing);
    }

    ClapCommand::new(manifest.program().to_string())
        .version(env!("CARGO_PKG_VERSION"))
        .about(about)
        .disable_help_subcommand(true)
        .allow_external_subcommands(true)
        .external_subcommand_value_parser(value_parser!(String))
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to argot.yml manifest")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            ClapCommand::new(COMPLETE_SUBCOMMAND)
                .hide(true)
                .about("Print completion candidates for a command line")
                .arg(
                    Arg::new("index")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("line")
                        .required(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(ClapCommand::new(SCRIPT_SUBCOMMAND).about("Print the shell completion script"))
}

/// One line per visible command: pattern and description
fn command_listing(manifest: &Manifest) -> String {
    manifest
        .commands
        .iter()
        .filter(|def| def.help)
        .map(|def| match &def.description {
            Some(description) => format!("  {}\t{}", def.pattern, description),
            None => format!("  {}", def.pattern),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the router from manifest commands
pub fn build_cli(manifest: &Manifest, working_dir: PathBuf) -> Result<Cli, ArgotError> {
    let base = Context::new()
        .with_working_dir(working_dir)
        .with_interpreter(
            manifest
                .interpreter
                .clone()
                .unwrap_or_else(default_interpreter),
        );

    let mut cli = Cli::new(manifest.program());
    if let Some(usage) = &manifest.usage {
        cli = cli.with_description(usage.clone());
    }

    for def in &manifest.commands {
        let command = cli.command(&def.pattern)?;
        configure_command(command, def, &base);
    }

    Ok(cli)
}

fn configure_command(command: &mut Command, def: &CommandDef, base: &Context) {
    if def.help {
        command.help(def.description.clone().unwrap_or_default());
    } else {
        command.disable_help();
        if let Some(description) = &def.description {
            command.description(description.clone());
        }
    }

    for option in &def.options {
        command.option(&option.name, option_params(option));
    }

    let mut names: Vec<String> = command
        .pattern()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect();
    names.extend(def.options.iter().map(|option| option.name.clone()));

    for (name, completion) in &def.completions {
        command.completion_with(completion_handler(name, completion, base, &names));
    }

    if let Some(template) = def.output.clone() {
        command.action(move |input: &ParsedInput| -> anyhow::Result<String> {
            Ok(interpolate_strict(&template, &command_vars(&names, input))?)
        });
    } else if let Some(exec) = def.run.clone() {
        let base = base.clone();
        command.action(move |input: &ParsedInput| -> anyhow::Result<String> {
            let ctx = base.clone().with_vars(command_vars(&names, input));
            Ok(execute_capture(&exec, &ctx)?)
        });
    }
}

fn option_params(option: &OptionDef) -> OptionParams {
    let mut params = OptionParams::new(option.kind).help(option.help);

    if let Some(alias) = option.alias {
        params = params.alias(alias);
    }
    if let Some(default) = &option.default {
        params = params.default_value(default.to_value(option.kind));
    }
    if let Some(description) = &option.description {
        params = params.description(description.clone());
    }

    params
}

fn completion_handler(
    name: &str,
    completion: &CompletionDef,
    base: &Context,
    names: &[String],
) -> CompletionHandler {
    match completion {
        CompletionDef::List(values) => {
            let values = values.clone();
            CompletionHandler::new(name, move |_| values.clone())
        }
        CompletionDef::Command(source) => {
            let exec = source.command.clone();
            let base = base.clone();
            let names = names.to_vec();
            let handler = CompletionHandler::from_async(name, move |input: ParsedInput| {
                let ctx = base.clone().with_vars(command_vars(&names, &input));
                future::ready(execute_lines(&exec, &ctx).map_err(anyhow::Error::from))
            });

            if source.filter {
                handler.filtered()
            } else {
                handler
            }
        }
    }
}

/// Variables for templates and shell commands; unset names are empty
fn command_vars(names: &[String], input: &ParsedInput) -> HashMap<String, String> {
    let mut vars: HashMap<String, String> = names
        .iter()
        .map(|name| (name.clone(), String::new()))
        .collect();
    vars.extend(input.vars());
    vars
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<(), ArgotError> {
    let args: Vec<String> = std::env::args().collect();

    let app = match extract_file_arg(&args) {
        Some(path) => App::with_manifest_file(path)?,
        None => App::new()?,
    };

    app.run(args)
}

/// Extract --file argument before clap parsing.
///
/// Only flags before the first command word are considered; everything
/// after it belongs to the routed command.
fn extract_file_arg(args: &[String]) -> Option<PathBuf> {
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        if arg == "--file" || arg == "-f" {
            return rest.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--file=") {
            return Some(PathBuf::from(path));
        }
        if !arg.starts_with('-') {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_manifest;

    fn cli_from(yaml: &str) -> Cli {
        let manifest = parse_manifest(yaml).unwrap();
        validate_manifest(&manifest).unwrap();
        build_cli(&manifest, PathBuf::from(".")).unwrap()
    }

    #[test]
    fn test_get_verbosity_normal() {
        let cmd = ClapCommand::new("test")
            .arg(Arg::new("quiet").long("quiet").action(ArgAction::SetTrue))
            .arg(Arg::new("silent").long("silent").action(ArgAction::SetTrue))
            .arg(Arg::new("verbose").long("verbose").action(ArgAction::SetTrue));
        let matches = cmd.get_matches_from(vec!["test"]);
        assert_eq!(get_verbosity(&matches), Verbosity::Normal);
    }

    #[test]
    fn test_extract_file_arg() {
        let args = vec!["ws".to_string(), "--file".to_string(), "argot.yml".to_string()];
        assert_eq!(extract_file_arg(&args), Some(PathBuf::from("argot.yml")));

        let args = vec!["ws".to_string(), "-f".to_string(), "argot.yml".to_string()];
        assert_eq!(extract_file_arg(&args), Some(PathBuf::from("argot.yml")));

        let args = vec!["ws".to_string(), "-f".to_string()];
        assert_eq!(extract_file_arg(&args), None);

        let args = vec!["ws".to_string(), "--file=x.yml".to_string()];
        assert_eq!(extract_file_arg(&args), Some(PathBuf::from("x.yml")));

        let args = vec!["ws".to_string(), "deploy".to_string(), "-f".to_string(), "x".to_string()];
        assert_eq!(extract_file_arg(&args), None);
    }

    #[test]
    fn test_output_template() {
        let cli = cli_from(
            r#"
name: ws
commands:
  - pattern: "test [action]"
    options:
      - name: user
        type: string
        alias: u
    output: "${user}@${action}"
"#,
        );

        assert_eq!(block_on(cli.process(&["test"])).unwrap(), "@");
        assert_eq!(
            block_on(cli.process(&["test", "run", "-u", "me"])).unwrap(),
            "me@run"
        );
    }

    #[test]
    fn test_run_command() {
        let cli = cli_from(
            r#"
commands:
  - pattern: "greet <name>"
    run: "echo hello ${name}"
"#,
        );

        assert_eq!(block_on(cli.process(&["greet", "bob"])).unwrap(), "hello bob");
    }

    #[test]
    fn test_option_defaults() {
        let cli = cli_from(
            r#"
commands:
  - pattern: serve
    options:
      - name: port
        type: number
        default: 8080
      - name: force
    output: "${port} ${force}"
"#,
        );

        assert_eq!(block_on(cli.process(&["serve"])).unwrap(), "8080 false");
        assert_eq!(
            block_on(cli.process(&["serve", "--port=9000", "--force"])).unwrap(),
            "9000 true"
        );
    }

    #[test]
    fn test_static_and_command_completions() {
        let cli = cli_from(
            r#"
commands:
  - pattern: "test [action]"
    completions:
      action: [foo, bar]
  - pattern: "use <env>"
    completions:
      env: { command: "printf 'dev\nprod\n'", filter: true }
"#,
        );

        assert_eq!(block_on(cli.complete(&["test", ""])), vec!["foo", "bar"]);
        assert_eq!(block_on(cli.complete(&["use", "p"])), vec!["prod"]);
    }

    #[test]
    fn test_hidden_command_has_no_completions() {
        let cli = cli_from(
            r#"
commands:
  - pattern: internal
    help: false
    output: ok
"#,
        );

        assert!(block_on(cli.complete(&["in"])).is_empty());
        assert_eq!(block_on(cli.process(&["internal"])).unwrap(), "ok");
    }

    #[test]
    fn test_help_output() {
        let cli = cli_from(
            r#"
name: ws
commands:
  - pattern: "test [action]"
    description: Run a test
    options:
      - name: user
        type: string
        alias: u
        description: User name
    output: ran
"#,
        );

        let usage = block_on(cli.process(&["test", "--help"])).unwrap();
        assert!(usage.contains("Usage: ws test [action]"));
        assert!(usage.contains("Run a test"));
        assert!(usage.contains("-u, --user"));
    }

    #[test]
    fn test_command_listing() {
        let manifest = parse_manifest(
            r#"
commands:
  - pattern: init
    description: Initialize
  - pattern: secret
    help: false
"#,
        )
        .unwrap();

        let listing = command_listing(&manifest);
        assert!(listing.contains("init\tInitialize"));
        assert!(!listing.contains("secret"));
    }
}
