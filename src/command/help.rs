//! Usage text rendering

use crate::command::command::Command;

/// Render the usage block shown for `--help`
pub fn render_usage(program: &str, command: &Command) -> String {
    let usage = if program.is_empty() {
        format!("Usage: {}", command.name())
    } else {
        format!("Usage: {} {}", program, command.name())
    };

    let mut lines = vec![String::new(), usage, String::new()];

    if let Some(description) = command.description_text() {
        lines.push(description.to_string());
        lines.push(String::new());
    }

    let options: Vec<_> = command.options().visible().collect();
    if !options.is_empty() {
        lines.push("Options:".to_string());
        for option in options {
            let alias = match option.alias {
                Some(alias) => format!("-{},", alias),
                None => "   ".to_string(),
            };
            lines.push(format!(
                "  {} --{}\t\t{}",
                alias,
                option.name,
                option.description.as_deref().unwrap_or_default()
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::option::OptionParams;

    #[test]
    fn test_usage_without_options() {
        let command = Command::new("init").unwrap();
        assert_eq!(render_usage("ws", &command), "\nUsage: ws init\n");
    }

    #[test]
    fn test_usage_with_options() {
        let mut command = Command::new("test [action]").unwrap();
        command
            .help("Run a test")
            .option("user", OptionParams::string().alias('u').description("User name"))
            .option("dry", OptionParams::boolean());

        let usage = render_usage("ws", &command);
        assert_eq!(
            usage,
            "\nUsage: ws test [action]\n\nRun a test\n\nOptions:\n  -u, --user\t\tUser name\n      --dry\t\t\n"
        );
    }

    #[test]
    fn test_usage_without_program() {
        let command = Command::new("init").unwrap();
        assert!(render_usage("", &command).contains("Usage: init"));
    }
}
