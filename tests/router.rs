//! Integration tests for routing and completion

use argot::command::Argument;
use argot::{Cli, CliError, OptionParams, ParsedInput};
use futures::executor::block_on;

fn workspace() -> Cli {
    let mut cli = Cli::new("ws");

    cli.command("init")
        .unwrap()
        .option("name", OptionParams::string().alias('n'))
        .completion("name", |_| vec!["foo", "bar"])
        .action(|_: &ParsedInput| "init");

    cli.command("test:<command>")
        .unwrap()
        .option("name", OptionParams::string().alias('n'))
        .completion("command", |_| vec!["command"])
        .action(|input: &ParsedInput| {
            format!(
                "{}:{}",
                input.value("command").unwrap_or_default(),
                input.option_str("name").unwrap_or_default()
            )
        });

    cli.command("test [action]")
        .unwrap()
        .option(
            "user",
            OptionParams::string().alias('u').description("User name"),
        )
        .option(
            "password",
            OptionParams::string().alias('p').description("User password"),
        )
        .help("Run a test action")
        .completion("action", |_| vec!["foo", "bar"])
        .action(|input: &ParsedInput| {
            format!(
                "{}:{}@{}",
                input.option_str("user").unwrap_or_default(),
                input.option_str("password").unwrap_or_default(),
                input.value("action").unwrap_or_default()
            )
        });

    cli.command("config:set [...configs]")
        .unwrap()
        .action(|input: &ParsedInput| input.values("configs").join(","));

    cli
}

#[test]
fn test_parse_init() {
    let mut cli = workspace();
    let input = cli.command("init").unwrap().parse(&["init"]).unwrap();
    assert!(input.arguments().is_empty());
    assert!(input.options().is_empty());
}

#[test]
fn test_parse_literal_with_param() {
    let mut cli = workspace();
    let command = cli.command("test:<command>").unwrap();

    let input = command.parse(&["test:command"]).unwrap();
    assert_eq!(input.value("command"), Some("command"));
    assert!(input.options().is_empty());

    let input = command.parse(&["test:command", "-n=foo"]).unwrap();
    assert_eq!(input.option_str("name"), Some("foo"));

    let input = command.parse(&["test:command", "--name", "foo"]).unwrap();
    assert_eq!(input.option_str("name"), Some("foo"));
}

#[test]
fn test_parse_spread() {
    let mut cli = workspace();
    let input = cli
        .command("config:set [...configs]")
        .unwrap()
        .parse(&["config:set", "KEY=value", "KEY2=value2"])
        .unwrap();

    assert_eq!(
        input.argument("configs"),
        Some(&Argument::List(vec![
            "KEY=value".to_string(),
            "KEY2=value2".to_string()
        ]))
    );
}

#[test]
fn test_process_init() {
    assert_eq!(block_on(workspace().process(&["init"])).unwrap(), "init");
}

#[test]
fn test_process_optional_action() {
    assert_eq!(block_on(workspace().process(&["test"])).unwrap(), ":@");
}

#[test]
fn test_process_inline_options() {
    let output = block_on(workspace().process(&["test", "action", "-u=foo", "-p=bar"])).unwrap();
    assert_eq!(output, "foo:bar@action");
}

#[test]
fn test_process_separate_options() {
    let output =
        block_on(workspace().process(&["test", "action", "-u", "foo", "-p", "bar"])).unwrap();
    assert_eq!(output, "foo:bar@action");
}

#[test]
fn test_process_literal_with_param() {
    let output = block_on(workspace().process(&["test:action", "-n", "project"])).unwrap();
    assert_eq!(output, "action:project");
}

#[test]
fn test_process_spread() {
    let output = block_on(workspace().process(&["config:set", "A=1", "B=2"])).unwrap();
    assert_eq!(output, "A=1,B=2");
}

#[test]
fn test_process_unknown_command() {
    let result = block_on(workspace().process(&["deploy", "now"]));
    assert!(matches!(result, Err(CliError::CommandNotFound)));
}

#[test]
fn test_process_help() {
    let output = block_on(workspace().process(&["test", "-h"])).unwrap();
    assert!(output.contains("Usage: ws test [action]"));
    assert!(output.contains("-u, --user\t\tUser name"));
    assert!(output.contains("-p, --password\t\tUser password"));
}

#[test]
fn test_complete_first_word() {
    assert_eq!(block_on(workspace().complete(&["i"])), vec!["init"]);
}

#[test]
fn test_complete_optional_argument() {
    assert_eq!(
        block_on(workspace().complete(&["test", ""])),
        vec!["foo", "bar"]
    );
}

#[test]
fn test_complete_literal_with_param() {
    assert_eq!(
        block_on(workspace().complete(&["test:"])),
        vec!["test:command"]
    );
}

#[test]
fn test_complete_option_value() {
    assert_eq!(
        block_on(workspace().complete(&["init", "--name", ""])),
        vec!["foo", "bar"]
    );
    assert_eq!(
        block_on(workspace().complete(&["init", "-n="])),
        vec!["-n=foo", "-n=bar"]
    );
}

#[test]
fn test_complete_option_names() {
    assert_eq!(
        block_on(workspace().complete(&["test", "foo", "--"])),
        vec!["--user", "--password", "--help"]
    );
}

#[test]
fn test_complete_line_protocol() {
    let cli = workspace();
    assert_eq!(block_on(cli.complete_line(2, "ws test ")), "foo\nbar");
    assert_eq!(block_on(cli.complete_line(1, "ws test:")), "test:command");
}

#[test]
fn test_complete_is_repeatable() {
    let cli = workspace();
    let first = block_on(cli.complete(&["test", ""]));
    let second = block_on(cli.complete(&["test", ""]));
    assert_eq!(first, second);
}

#[test]
fn test_process_tries_next_command_with_same_literal() {
    let mut cli = Cli::new("ws");
    cli.command("test")
        .unwrap()
        .action(|_: &ParsedInput| "first");
    cli.command("test [action]")
        .unwrap()
        .action(|input: &ParsedInput| {
            format!("second:{}", input.value("action").unwrap_or_default())
        });

    assert_eq!(block_on(cli.process(&["test"])).unwrap(), "first");
    assert_eq!(block_on(cli.process(&["test", "x"])).unwrap(), "second:x");
}
