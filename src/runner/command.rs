//! Command execution
//!
//! This module runs manifest shell commands and captures their output.

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{interpolate_strict, Context};
use std::process::{Command as StdCommand, Stdio};

/// Run `exec` through the context's interpreter and return its stdout.
///
/// `${var}` references are interpolated first and the variables are also
/// exported to the child environment. Trailing newlines are trimmed.
pub fn execute_capture(exec: &str, ctx: &Context) -> ExecutionResult<String> {
    let exec_str = interpolate_strict(exec, &ctx.vars)?;

    let (program, args) = ctx
        .interpreter
        .split_first()
        .ok_or(ExecutionError::EmptyInterpreter)?;

    let mut command = StdCommand::new(program);
    command.args(args);
    command.arg(&exec_str);
    command.current_dir(&ctx.working_dir);

    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::inherit());

    for (key, value) in &ctx.vars {
        command.env(key, value);
    }

    let output = command.output().map_err(|e| ExecutionError::Spawn {
        program: program.clone(),
        error: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(ExecutionError::CommandFailed(output.status.code()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.trim_end_matches(['\n', '\r']).to_string())
}

/// Run `exec` and return its non-empty output lines
pub fn execute_lines(exec: &str, ctx: &Context) -> ExecutionResult<Vec<String>> {
    let stdout = execute_capture(exec, ctx)?;

    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
