//! Shell completion script generation
//!
//! The script registers a bash completion function that calls back into
//! `<program> complete <index> <line>` and reads one candidate per line.
//! zsh loads it through `bashcompinit`.

/// Render the completion script for `program`
pub fn completion_script(program: &str) -> String {
    let function = format!("_{}_completion", function_name(program));

    format!(
        r#"###-begin-{program}-completion-###
if [ -n "$ZSH_VERSION" ]; then
  autoload -U +X bashcompinit && bashcompinit
fi

{function}() {{
  local IFS=$'\n'
  COMP_WORDBREAKS=${{COMP_WORDBREAKS/=/}}
  COMP_WORDBREAKS=${{COMP_WORDBREAKS/:/}}
  COMPREPLY=($({program} complete "$COMP_CWORD" "$COMP_LINE" 2>/dev/null))
}}

complete -o nospace -F {function} {program}
###-end-{program}-completion-###
"#,
        program = program,
        function = function,
    )
}

/// Shell-safe function name fragment
fn function_name(program: &str) -> String {
    program
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_references_program() {
        let script = completion_script("ws");
        assert!(script.contains("_ws_completion()"));
        assert!(script.contains("ws complete \"$COMP_CWORD\" \"$COMP_LINE\""));
        assert!(script.contains("complete -o nospace -F _ws_completion ws"));
        assert!(script.contains("bashcompinit"));
    }

    #[test]
    fn test_function_name_is_sanitized() {
        assert_eq!(function_name("my-tool.sh"), "my_tool_sh");
        assert!(completion_script("my-tool").contains("_my_tool_completion()"));
    }
}
