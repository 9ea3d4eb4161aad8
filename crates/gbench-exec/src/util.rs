use std::process::{Output, Stdio};

use tokio::process::Command;

pub fn cmd_program(program: &str, args: &[String]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args.iter().map(|s| s.as_str()));
    cmd
}

/// Pipe stdout and keep stdin closed. stderr is piped too unless `inherit_stderr` is set.
pub fn capture(cmd: &mut Command, inherit_stderr: bool) {
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    if inherit_stderr {
        cmd.stderr(Stdio::inherit());
    } else {
        cmd.stderr(Stdio::piped());
    }
    cmd.kill_on_drop(true);
}

/// stdout followed by stderr, lossily decoded.
pub fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}
