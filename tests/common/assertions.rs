//! Assertions on hook exit codes and host log output

use std::process::Output;

/// Host exit code for success
pub const EXIT_SUCCESS: i32 = 93;
/// Host exit code for errors
pub const EXIT_ERROR: i32 = 94;
/// Host exit code for "nothing done"
pub const EXIT_NONE: i32 = 95;

/// Stdout as host log lines
pub fn log_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Assert the exit code, dumping the log on mismatch
pub fn assert_exit(output: &Output, expected: i32) {
    assert_eq!(
        output.status.code(),
        Some(expected),
        "unexpected exit code\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Assert that some log line starts with `prefix` and contains `needle`
pub fn assert_logged(output: &Output, prefix: &str, needle: &str) {
    let lines = log_lines(output);
    assert!(
        lines
            .iter()
            .any(|l| l.starts_with(prefix) && l.contains(needle)),
        "no {prefix} line containing {needle:?} in:\n{}",
        lines.join("\n")
    );
}
