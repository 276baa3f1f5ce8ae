use std::io::{self, BufRead, Write};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::adb::{Adb, AdbFailure};

pub const SELECT_PROMPT: &str = "Enter the number of the device you want to use: ";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Device {
    pub serial: String,
    /// Rest of the listing line, usually the adb state (`device`, `unauthorized`).
    pub state: String,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(
        "No devices connected.\n\
         Please connect a device using 'adb connect <ip:port>' or ensure USB debugging is enabled.\n\
         After connecting, run this tool again."
    )]
    NoDevices,
    #[error("Error running adb devices: {0}")]
    ListFailed(#[source] AdbFailure),
    #[error("device {0} is not attached")]
    UnknownSerial(String),
    #[error("input closed before a device was selected")]
    InputClosed,
    #[error("console error: {0}")]
    Io(#[from] io::Error),
}

/// Parses `adb devices` output: the header line is skipped, blank lines and
/// lines ending in `offline` are dropped, listing order is kept.
pub fn parse_devices(output: &str) -> Vec<Device> {
    output
        .lines()
        .skip(1)
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty() && !line.ends_with("offline"))
        .filter_map(|line| {
            let line = line.trim_start();
            let mut parts = line.splitn(2, char::is_whitespace);
            let serial = parts.next()?.to_string();
            let state = parts.next().unwrap_or_default().trim().to_string();
            Some(Device { serial, state })
        })
        .collect()
}

pub async fn list_devices(adb: &Adb) -> Result<Vec<Device>, DirectoryError> {
    let stdout = adb.devices().await.map_err(DirectoryError::ListFailed)?;
    let devices = parse_devices(&stdout);
    debug!("adb devices: {} usable", devices.len());
    Ok(devices)
}

/// Looks up an explicitly requested serial. An empty listing reports
/// [`DirectoryError::NoDevices`] rather than an unknown serial.
pub fn find_device(devices: &[Device], serial: &str) -> Result<String, DirectoryError> {
    if devices.is_empty() {
        return Err(DirectoryError::NoDevices);
    }
    devices
        .iter()
        .find(|device| device.serial == serial)
        .map(|device| device.serial.clone())
        .ok_or_else(|| DirectoryError::UnknownSerial(serial.to_string()))
}

/// Resolves the device to work with. A single device is returned without
/// touching `input`; several devices are listed and the user is asked until a
/// valid 1-based index is entered.
pub fn select_device<R: BufRead, W: Write>(
    devices: &[Device],
    mut input: R,
    mut out: W,
) -> Result<String, DirectoryError> {
    match devices {
        [] => return Err(DirectoryError::NoDevices),
        [only] => return Ok(only.serial.clone()),
        _ => {}
    }

    writeln!(out, "Multiple devices found. Please select a device:")?;
    for (i, device) in devices.iter().enumerate() {
        if device.state.is_empty() {
            writeln!(out, "{}. {}", i + 1, device.serial)?;
        } else {
            writeln!(out, "{}. {}\t{}", i + 1, device.serial, device.state)?;
        }
    }

    let mut line = String::new();
    loop {
        write!(out, "{SELECT_PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(DirectoryError::InputClosed);
        }
        match line.trim().parse::<usize>() {
            Ok(index) if (1..=devices.len()).contains(&index) => {
                return Ok(devices[index - 1].serial.clone());
            }
            _ => writeln!(out, "Invalid selection. Please try again.")?,
        }
    }
}
