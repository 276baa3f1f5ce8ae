use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::adb::{adb_failure_message, format_duration, Adb, AdbFailure};

pub const PROBE_TOKEN: &str = "connected";

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("device connection timed out after {}", format_duration(*.0))]
    TimedOut(Duration),
    #[error("failed to connect to device: {0}")]
    Failed(String),
}

/// Round-trips `echo connected` through the device shell.
pub async fn check_connectivity(
    adb: &Adb,
    serial: &str,
    timeout: Duration,
) -> Result<(), ProbeError> {
    let args = ["-s", serial, "shell", "echo", PROBE_TOKEN];
    match adb.output(&args, timeout).await {
        Ok(output) => {
            let reply = String::from_utf8_lossy(&output.stdout);
            if reply.contains(PROBE_TOKEN) {
                debug!("device {serial} answered the probe");
                Ok(())
            } else {
                Err(ProbeError::Failed(format!(
                    "unexpected reply {:?}",
                    reply.trim()
                )))
            }
        }
        Err(AdbFailure::TimedOut(elapsed)) => Err(ProbeError::TimedOut(elapsed)),
        Err(err) => Err(ProbeError::Failed(adb_failure_message(&err))),
    }
}
