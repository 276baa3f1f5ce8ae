mod menu;
mod present;

use std::{
    error::Error,
    fmt::Display,
    io::{self, BufRead, Write},
    process::ExitCode,
    time::Duration,
};

use adbctl_device::{
    check_connectivity, collect_device_info, collect_memory_info, directory::find_device,
    list_devices, select_device, Adb, Config,
};
use adbctl_util::{init_tracing, parse_secs};
use clap::Parser;
use tracing::debug;

use crate::{menu::run_menu, present::Presenter};

#[derive(Parser)]
#[command(
    name = "adbctl",
    version,
    about = "Inspect and control Android and Fire OS devices through adb"
)]
struct Cli {
    /// Show detailed memory information and exit
    #[arg(long)]
    memory: bool,
    /// Show general device information and exit
    #[arg(long, conflicts_with = "memory")]
    info: bool,
    /// Print --memory or --info reports as JSON
    #[arg(long)]
    json: bool,
    /// Device serial to use instead of prompting
    #[arg(long, short)]
    serial: Option<String>,
    /// Timeout for each adb command, in seconds
    #[arg(long, value_parser = parse_timeout)]
    timeout: Option<Duration>,
    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    parse_secs(value).ok_or_else(|| format!("invalid timeout '{value}': expected seconds > 0"))
}

fn fatal(err: impl Display) -> ExitCode {
    eprintln!("{err}");
    ExitCode::FAILURE
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(timeout) = cli.timeout {
        config.command_timeout = timeout;
    }
    init_tracing(config.verbose)?;
    debug!("using {}", config.adb_path.display());

    let stdin = io::stdin();
    run(&cli, &config, stdin.lock(), io::stdout()).await
}

/// Drives one session: list, select, probe, then a report or the menu.
/// Fatal conditions are printed to stderr and map to a failing exit code.
async fn run<R: BufRead, W: Write>(
    cli: &Cli,
    config: &Config,
    mut input: R,
    mut out: W,
) -> Result<ExitCode, Box<dyn Error>> {
    let interactive = !(cli.memory || cli.info);
    let presenter = Presenter::new(config, !cli.no_color && !cli.json);
    let adb = Adb::new(config);

    if interactive {
        writeln!(
            out,
            "Welcome to adbctl - Your Android Device Management Companion"
        )?;
    }

    let devices = match list_devices(&adb).await {
        Ok(devices) => devices,
        Err(err) => return Ok(fatal(err)),
    };

    let selected = match cli.serial.as_deref() {
        Some(serial) => find_device(&devices, serial),
        None => select_device(&devices, &mut input, &mut out),
    };
    let serial = match selected {
        Ok(serial) => serial,
        Err(err) => return Ok(fatal(err)),
    };
    debug!("selected device {serial}");

    if let Err(err) = check_connectivity(&adb, &serial, config.probe_timeout).await {
        return Ok(fatal(err));
    }

    if cli.memory {
        let info = collect_memory_info(&adb, &serial).await;
        if cli.json {
            writeln!(out, "{}", presenter.json(&serial, &info.detailed_lines())?)?;
        } else {
            write!(out, "{}", presenter.memory(&info))?;
        }
    } else if cli.info {
        let info = collect_device_info(&adb, &serial).await;
        if cli.json {
            writeln!(out, "{}", presenter.json(&serial, &info)?)?;
        } else {
            write!(out, "{}", presenter.report(&info))?;
        }
    } else {
        run_menu(&adb, &serial, &presenter, &mut input, &mut out).await?;
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(all(test, unix))]
mod tests {
    use std::{
        fs,
        io::Cursor,
        os::unix::fs::PermissionsExt,
        path::{Path, PathBuf},
    };

    use super::*;

    // Lists `emu-1` for `adb devices` and echoes its arguments for anything
    // else, so the connectivity check sees "connected".
    const ONE_DEVICE: &str = "#!/bin/sh\n\
        if [ \"$1\" = devices ]; then\n\
        printf 'List of devices attached\\nemu-1\\tdevice\\n'\n\
        exit 0\n\
        fi\n\
        echo \"$*\"\n";

    fn write_adb(dir: &Path, script: &str) -> PathBuf {
        let path = dir.join("adb");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn config_for(adb_path: PathBuf) -> Config {
        Config {
            adb_path,
            command_timeout: Duration::from_secs(2),
            probe_timeout: Duration::from_secs(2),
            ..Config::default()
        }
    }

    async fn session(args: &[&str], adb_path: PathBuf, input: &str) -> (ExitCode, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let code = run(&cli, &config_for(adb_path), Cursor::new(input), &mut out)
            .await
            .unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn empty_listing_fails() {
        let dir = tempfile::tempdir().unwrap();
        let adb = write_adb(dir.path(), "#!/bin/sh\necho 'List of devices attached'\n");

        let (code, _) = session(&["adbctl", "--info"], adb.clone(), "").await;
        assert_eq!(code, ExitCode::FAILURE);
        let (code, _) = session(&["adbctl", "--info", "-s", "emu-1"], adb, "").await;
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn missing_adb_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (code, out) = session(&["adbctl"], dir.path().join("missing"), "").await;
        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.starts_with("Welcome to adbctl"));
    }

    #[tokio::test]
    async fn failed_connectivity_check_fails() {
        let dir = tempfile::tempdir().unwrap();
        let script = "#!/bin/sh\n\
            if [ \"$1\" = devices ]; then\n\
            printf 'List of devices attached\\nemu-1\\tdevice\\n'\n\
            exit 0\n\
            fi\n\
            exit 1\n";
        let (code, out) = session(&["adbctl", "--info"], write_adb(dir.path(), script), "").await;
        assert_eq!(code, ExitCode::FAILURE);
        assert!(!out.contains("Device Information"));
    }

    #[tokio::test]
    async fn closed_input_during_selection_fails() {
        let dir = tempfile::tempdir().unwrap();
        let script = "#!/bin/sh\nprintf 'List of devices attached\\na\\tdevice\\nb\\tdevice\\n'\n";
        let (code, out) = session(&["adbctl"], write_adb(dir.path(), script), "").await;
        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.contains("Multiple devices found"));
    }

    #[tokio::test]
    async fn unknown_serial_fails() {
        let dir = tempfile::tempdir().unwrap();
        let adb = write_adb(dir.path(), ONE_DEVICE);
        let (code, _) = session(&["adbctl", "--info", "--serial", "nope"], adb, "").await;
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn info_report_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let adb = write_adb(dir.path(), ONE_DEVICE);

        let (code, out) = session(&["adbctl", "--info", "--no-color"], adb, "").await;
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.starts_with("Device Information\n"));
        assert!(out.contains("[ Hardware ]"));
    }

    #[tokio::test]
    async fn memory_json_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let adb = write_adb(dir.path(), ONE_DEVICE);

        let (code, out) = session(&["adbctl", "--memory", "--json", "-s", "emu-1"], adb, "").await;
        assert_eq!(code, ExitCode::SUCCESS);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["serial"], "emu-1");
    }

    #[tokio::test]
    async fn menu_exits_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let adb = write_adb(dir.path(), ONE_DEVICE);

        let (code, out) = session(&["adbctl", "--no-color"], adb, "6\n").await;
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.ends_with("Exiting. Goodbye!\n"));
    }
}
