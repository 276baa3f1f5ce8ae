use std::{
    fmt, io,
    path::{Path, PathBuf},
    process::{Output, Stdio},
    time::Duration,
};

use tokio::process::Command;
use tracing::debug;

use crate::config::Config;

pub const NOT_AVAILABLE: &str = "n/a";
pub const TIMED_OUT: &str = "n/a (timed out)";

const LAUNCHER_CATEGORY: &str = "android.intent.category.LAUNCHER";

#[derive(Debug)]
pub enum AdbFailure {
    NotFound,
    Io(String),
    Exit {
        status: i32,
        stdout: String,
        stderr: String,
    },
    TimedOut(Duration),
}

impl fmt::Display for AdbFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&adb_failure_message(self))
    }
}

impl std::error::Error for AdbFailure {}

/// Result of a single remote shell query. Failures are data, not errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellOutput {
    Value(String),
    NotAvailable,
    TimedOut,
}

impl ShellOutput {
    pub fn value(&self) -> Option<&str> {
        match self {
            ShellOutput::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ShellOutput::Value(value) => value,
            ShellOutput::NotAvailable => NOT_AVAILABLE,
            ShellOutput::TimedOut => TIMED_OUT,
        }
    }
}

impl fmt::Display for ShellOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can run a command in a device's remote shell.
#[allow(async_fn_in_trait)]
pub trait Shell {
    async fn shell(&self, serial: Option<&str>, command: &str) -> ShellOutput;
}

#[derive(Clone, Debug)]
pub struct Adb {
    path: PathBuf,
    command_timeout: Duration,
}

impl Adb {
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.adb_path.clone(),
            command_timeout: config.command_timeout,
        }
    }

    pub async fn output(&self, args: &[&str], timeout: Duration) -> Result<Output, AdbFailure> {
        adb_output(&self.path, args, timeout).await
    }

    /// Runs `command` in the remote shell of `serial` (or the default device)
    /// and returns its trimmed output, or a sentinel when it fails.
    pub async fn shell_with_timeout(
        &self,
        serial: Option<&str>,
        command: &str,
        timeout: Duration,
    ) -> ShellOutput {
        let mut args = Vec::with_capacity(4);
        if let Some(serial) = serial {
            args.extend(["-s", serial]);
        }
        args.extend(["shell", command]);

        match self.output(&args, timeout).await {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                let combined = format!("{stdout}{stderr}");
                let trimmed = combined.trim();
                if trimmed.is_empty() {
                    debug!("adb shell '{command}': empty output");
                    ShellOutput::NotAvailable
                } else {
                    ShellOutput::Value(trimmed.to_string())
                }
            }
            Err(AdbFailure::TimedOut(elapsed)) => {
                debug!(
                    "adb shell '{command}': timed out after {}",
                    format_duration(elapsed)
                );
                ShellOutput::TimedOut
            }
            Err(err) => {
                debug!("adb shell '{command}': {}", adb_failure_message(&err));
                ShellOutput::NotAvailable
            }
        }
    }

    pub async fn devices(&self) -> Result<String, AdbFailure> {
        let output = self.output(&["devices"], self.command_timeout).await?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    pub async fn reboot(&self, serial: &str) -> Result<(), AdbFailure> {
        let _ = self
            .output(&["-s", serial, "reboot"], self.command_timeout)
            .await?;
        Ok(())
    }

    pub async fn launch_app(&self, serial: &str, package: &str) -> Result<String, AdbFailure> {
        let package = package.trim();
        if package.is_empty() {
            return Err(AdbFailure::Io("package name is required".into()));
        }
        let args = [
            "-s",
            serial,
            "shell",
            "monkey",
            "-p",
            package,
            "-c",
            LAUNCHER_CATEGORY,
            "1",
        ];
        let output = self.output(&args, self.command_timeout).await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub async fn list_packages(&self, serial: &str) -> Result<Vec<String>, AdbFailure> {
        let args = ["-s", serial, "shell", "pm", "list", "packages"];
        let output = self.output(&args, self.command_timeout).await?;
        Ok(parse_packages(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl Shell for Adb {
    async fn shell(&self, serial: Option<&str>, command: &str) -> ShellOutput {
        self.shell_with_timeout(serial, command, self.command_timeout)
            .await
    }
}

pub(crate) async fn adb_output(
    path: &Path,
    args: &[&str],
    timeout: Duration,
) -> Result<Output, AdbFailure> {
    let timeout = timeout.max(Duration::from_millis(1));
    let mut cmd = Command::new(path);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    let child = cmd.spawn().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            AdbFailure::NotFound
        } else {
            AdbFailure::Io(e.to_string())
        }
    })?;

    // Dropping the wait future on timeout drops the child, which kills it.
    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|e| AdbFailure::Io(e.to_string()))?,
        Err(_) => return Err(AdbFailure::TimedOut(timeout)),
    };

    if output.status.success() {
        Ok(output)
    } else {
        Err(AdbFailure::Exit {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

pub(crate) fn parse_packages(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.strip_prefix("package:").unwrap_or(line).to_string())
        .collect()
}

pub fn format_adb_output(stdout: &str, stderr: &str) -> String {
    let stdout = stdout.trim();
    let stderr = stderr.trim();
    let mut out = String::new();

    if !stdout.is_empty() {
        out.push_str("stdout:\n");
        out.push_str(stdout);
        out.push('\n');
    }
    if !stderr.is_empty() {
        out.push_str("stderr:\n");
        out.push_str(stderr);
        out.push('\n');
    }

    out
}

fn format_adb_failure_message(status: i32, stdout: &str, stderr: &str) -> String {
    let detail = format_adb_output(stdout, stderr);
    if detail.trim().is_empty() {
        format!("adb command failed with exit {status}")
    } else {
        format!("adb command failed with exit {status}: {}", detail.trim())
    }
}

pub fn adb_failure_message(err: &AdbFailure) -> String {
    match err {
        AdbFailure::NotFound => "adb not found (set ADBCTL_ADB_PATH or ANDROID_SDK_ROOT)".into(),
        AdbFailure::Io(msg) => msg.clone(),
        AdbFailure::Exit {
            status,
            stdout,
            stderr,
        } => format_adb_failure_message(*status, stdout, stderr),
        AdbFailure::TimedOut(timeout) => {
            format!("adb command timed out after {}", format_duration(*timeout))
        }
    }
}

pub fn format_duration(duration: Duration) -> String {
    if duration.subsec_millis() == 0 && duration.as_secs() > 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::testutil::{fake_adb, LOCAL_SHELL};

    fn adb_at(path: PathBuf, timeout: Duration) -> Adb {
        Adb::new(&Config {
            adb_path: path,
            command_timeout: timeout,
            ..Config::default()
        })
    }

    // A killed but unreaped child shows up as a zombie; it no longer runs.
    #[cfg(target_os = "linux")]
    fn is_running(pid: &str) -> bool {
        let Ok(stat) = std::fs::read_to_string(format!("/proc/{pid}/stat")) else {
            return false;
        };
        let state = stat
            .rsplit_once(')')
            .and_then(|(_, rest)| rest.split_whitespace().next());
        !matches!(state, Some("Z" | "X"))
    }

    #[tokio::test]
    async fn shell_output_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let adb = adb_at(fake_adb(dir.path(), LOCAL_SHELL), Duration::from_secs(5));

        let out = adb.shell(Some("emulator-5554"), "printf '  hello\\n\\n'").await;
        assert_eq!(out, ShellOutput::Value("hello".into()));
    }

    #[tokio::test]
    async fn stderr_is_part_of_the_output() {
        let dir = tempfile::tempdir().unwrap();
        let adb = adb_at(fake_adb(dir.path(), LOCAL_SHELL), Duration::from_secs(5));

        let out = adb.shell(Some("serial"), "echo oops >&2").await;
        assert_eq!(out.as_str(), "oops");
    }

    #[tokio::test]
    async fn non_zero_exit_is_not_available() {
        let dir = tempfile::tempdir().unwrap();
        let adb = adb_at(fake_adb(dir.path(), LOCAL_SHELL), Duration::from_secs(5));

        let out = adb.shell(Some("serial"), "echo partial; exit 3").await;
        assert_eq!(out, ShellOutput::NotAvailable);
        assert_eq!(out.to_string(), NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn empty_output_is_not_available() {
        let dir = tempfile::tempdir().unwrap();
        let adb = adb_at(fake_adb(dir.path(), LOCAL_SHELL), Duration::from_secs(5));

        assert_eq!(
            adb.shell(Some("serial"), "true").await,
            ShellOutput::NotAvailable
        );
    }

    #[tokio::test]
    async fn missing_binary_is_not_available() {
        let dir = tempfile::tempdir().unwrap();
        let adb = adb_at(dir.path().join("no-such-adb"), Duration::from_secs(5));

        assert_eq!(
            adb.shell(Some("serial"), "getprop ro.product.model").await,
            ShellOutput::NotAvailable
        );
        let err = adb.devices().await.unwrap_err();
        assert!(matches!(err, AdbFailure::NotFound));
    }

    #[tokio::test]
    async fn slow_command_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let adb = adb_at(fake_adb(dir.path(), LOCAL_SHELL), Duration::from_millis(200));

        let started = Instant::now();
        let out = adb.shell(Some("serial"), "echo early; sleep 5").await;
        assert_eq!(out, ShellOutput::TimedOut);
        assert_eq!(out.as_str(), TIMED_OUT);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn timed_out_child_is_killed() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");
        let adb = adb_at(fake_adb(dir.path(), LOCAL_SHELL), Duration::from_millis(500));

        let command = format!("echo $$ > {}; exec sleep 5", pid_file.display());
        assert_eq!(
            adb.shell(Some("serial"), &command).await,
            ShellOutput::TimedOut
        );

        let pid = std::fs::read_to_string(&pid_file).unwrap().trim().to_string();
        assert!(!pid.is_empty());
        let deadline = Instant::now() + Duration::from_secs(2);
        while is_running(&pid) && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(!is_running(&pid), "child {pid} outlived its timeout");
    }

    #[tokio::test]
    async fn serial_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let script = "#!/bin/sh\necho \"$#:$1\"\n";
        let adb = adb_at(fake_adb(dir.path(), script), Duration::from_secs(5));

        assert_eq!(adb.shell(None, "id").await.as_str(), "2:shell");
        assert_eq!(adb.shell(Some("abc"), "id").await.as_str(), "4:-s");
    }

    #[tokio::test]
    async fn launch_app_rejects_empty_package() {
        let dir = tempfile::tempdir().unwrap();
        let adb = adb_at(fake_adb(dir.path(), LOCAL_SHELL), Duration::from_secs(5));

        assert!(adb.launch_app("serial", "  ").await.is_err());
    }

    #[tokio::test]
    async fn launch_app_passes_monkey_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let script = "#!/bin/sh\necho \"$*\"\n";
        let adb = adb_at(fake_adb(dir.path(), script), Duration::from_secs(5));

        let out = adb.launch_app("serial", "com.example.app").await.unwrap();
        assert_eq!(
            out,
            "-s serial shell monkey -p com.example.app -c android.intent.category.LAUNCHER 1"
        );
    }

    #[tokio::test]
    async fn reboot_reports_exit_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = "#!/bin/sh\necho \"error: device not found\" >&2\nexit 1\n";
        let adb = adb_at(fake_adb(dir.path(), script), Duration::from_secs(5));

        let err = adb.reboot("serial").await.unwrap_err();
        let message = adb_failure_message(&err);
        assert!(message.contains("exit 1"), "{message}");
        assert!(message.contains("device not found"), "{message}");
    }

    #[test]
    fn packages_are_stripped() {
        let out = "package:com.android.settings\n\npackage:com.amazon.tv.launcher\r\n";
        assert_eq!(
            parse_packages(out),
            vec!["com.android.settings", "com.amazon.tv.launcher"]
        );
    }

    #[test]
    fn durations_format_compactly() {
        assert_eq!(format_duration(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
    }
}
