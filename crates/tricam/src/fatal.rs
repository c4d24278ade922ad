use std::io::{BufRead, IsTerminal, Write};

/// Exit code for a normal stop (escape key or window close).
pub const EXIT_OK: i32 = 0;

/// Exit code for any failure during initialization or the render loop.
pub const EXIT_FAILURE: i32 = -1;

/// Process exit code for the outcome of the run.
pub fn exit_code(result: &anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_OK,
        Err(_) => EXIT_FAILURE,
    }
}

/// Formats an error chain for standard error, one cause per line.
pub fn describe(err: &anyhow::Error) -> String {
    let mut out = format!("error: {err}");
    for cause in err.chain().skip(1) {
        out.push_str(&format!("\n  caused by: {cause}"));
    }
    out
}

/// Prints `err` to standard error and waits for Enter so a console window
/// opened just for this program stays readable. Does not wait when stdin is
/// not a terminal.
pub fn report(err: &anyhow::Error) {
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", describe(err));

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        let _ = write!(stderr, "press Enter to exit...");
        let _ = stderr.flush();
        let mut line = String::new();
        let _ = stdin.lock().read_line(&mut line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn describe_lists_causes() {
        let err = std::fs::read("/definitely/not/here")
            .context("loading shader")
            .unwrap_err();
        let text = describe(&err);
        assert!(text.starts_with("error: loading shader"));
        assert!(text.contains("caused by:"));
    }

    #[test]
    fn failed_run_exits_with_minus_one() {
        let failed: anyhow::Result<()> = Err(anyhow::anyhow!("failed to create window"));
        assert_eq!(exit_code(&failed), -1);
        assert_eq!(exit_code(&Ok(())), 0);
    }
}
