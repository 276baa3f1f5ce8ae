use serde::Serialize;
use tracing::debug;

use crate::{
    adb::{Shell, ShellOutput, NOT_AVAILABLE},
    meminfo::{kb_to_gb, MemInfo, MEMINFO_COMMAND},
    tables::{map_cpu_abi, map_fire_os_model},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Section {
    Device,
    Hardware,
    Display,
    Other,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Device => "Device",
            Section::Hardware => "Hardware",
            Section::Display => "Display",
            Section::Other => "Other",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub section: Section,
    pub label: String,
    pub value: String,
}

impl DeviceInfo {
    pub fn new(section: Section, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            section,
            label: label.into(),
            value: value.into(),
        }
    }
}

struct PropertyQuery {
    label: &'static str,
    section: Section,
    commands: &'static [&'static str],
    render: fn(&[&str]) -> String,
}

const fn query(
    label: &'static str,
    section: Section,
    commands: &'static [&'static str],
) -> PropertyQuery {
    query_with(label, section, commands, first_value)
}

const fn query_with(
    label: &'static str,
    section: Section,
    commands: &'static [&'static str],
    render: fn(&[&str]) -> String,
) -> PropertyQuery {
    PropertyQuery {
        label,
        section,
        commands,
        render,
    }
}

// Grouped by section so the rendered report keeps query order.
static QUERIES: &[PropertyQuery] = &[
    query_with(
        "Model",
        Section::Device,
        &["getprop ro.product.model"],
        render_model,
    ),
    query("Manufacturer", Section::Device, &["getprop ro.product.manufacturer"]),
    query("Android Version", Section::Device, &["getprop ro.build.version.release"]),
    query("API Level", Section::Device, &["getprop ro.build.version.sdk"]),
    query("Build Number", Section::Device, &["getprop ro.build.display.id"]),
    query("Fire OS Version", Section::Device, &["getprop ro.build.version.name"]),
    query("Fire OS Build Number", Section::Device, &["getprop ro.build.version.number"]),
    query(
        "IP Address",
        Section::Device,
        &["ip addr show wlan0 | grep 'inet ' | awk '{print $2}' | cut -d/ -f1"],
    ),
    query(
        "WiFi SSID",
        Section::Device,
        &["dumpsys wifi | grep 'mWifiInfo' | grep -o 'SSID:.*' | awk -F', ' '{print $1}' | sed 's/SSID: //'"],
    ),
    query_with(
        "CPU",
        Section::Hardware,
        &["cat /proc/cpuinfo", "top -n 1 | grep 'CPU:'"],
        render_cpu,
    ),
    query_with(
        "CPU ABI",
        Section::Hardware,
        &["getprop ro.product.cpu.abi"],
        render_abi,
    ),
    query_with("Memory", Section::Hardware, &[MEMINFO_COMMAND], render_memory),
    query_with("Storage", Section::Hardware, &["df -k /data"], render_storage),
    query("Screen Resolution", Section::Display, &["wm size"]),
    query("Screen Density", Section::Display, &["wm density"]),
    query(
        "Battery Level",
        Section::Other,
        &["dumpsys battery | grep level | awk '{print $2}'"],
    ),
];

fn single<'a>(out: &[&'a str]) -> &'a str {
    out.first().copied().unwrap_or(NOT_AVAILABLE)
}

fn first_value(out: &[&str]) -> String {
    single(out).to_string()
}

fn render_model(out: &[&str]) -> String {
    map_fire_os_model(single(out))
}

fn render_abi(out: &[&str]) -> String {
    map_cpu_abi(single(out))
}

fn render_cpu(out: &[&str]) -> String {
    match out {
        [cpuinfo, usage] => cpu_summary(cpuinfo, usage),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn render_memory(out: &[&str]) -> String {
    MemInfo::parse(single(out)).summary()
}

fn render_storage(out: &[&str]) -> String {
    storage_summary(single(out))
}

/// Runs every property query against `serial`, one after another. A row whose
/// queries did not all succeed carries the sentinel instead of a value.
pub async fn collect_device_info<S: Shell>(shell: &S, serial: &str) -> Vec<DeviceInfo> {
    let mut info = Vec::with_capacity(QUERIES.len());
    for query in QUERIES {
        let mut outputs = Vec::with_capacity(query.commands.len());
        for command in query.commands {
            outputs.push(shell.shell(Some(serial), command).await);
        }
        info.push(DeviceInfo::new(query.section, query.label, render(query, &outputs)));
    }
    info
}

fn render(query: &PropertyQuery, outputs: &[ShellOutput]) -> String {
    if let Some(failed) = outputs
        .iter()
        .find(|out| matches!(out, ShellOutput::TimedOut))
        .or_else(|| outputs.iter().find(|out| out.value().is_none()))
    {
        debug!("{}: {failed}", query.label);
        return failed.to_string();
    }
    let values: Vec<&str> = outputs.iter().map(ShellOutput::as_str).collect();
    (query.render)(&values)
}

/// Core count from `/proc/cpuinfo` and usage from the `CPU:` line of `top`.
pub fn cpu_summary(cpuinfo: &str, usage_line: &str) -> String {
    let cores = cpuinfo
        .lines()
        .filter(|line| line.starts_with("processor"))
        .count();
    let used = usage_line
        .split_whitespace()
        .nth(3)
        .and_then(|field| field.trim_end_matches('%').parse::<f64>().ok())
        .unwrap_or(0.0);
    format!("{cores} cores ({used:.2}% used)")
}

/// Totals from the second line of `df -k`.
pub fn storage_summary(df: &str) -> String {
    let fields: Vec<&str> = match df.lines().nth(1) {
        Some(line) => line.split_whitespace().collect(),
        None => return ShellOutput::NotAvailable.to_string(),
    };
    if fields.len() < 4 {
        return ShellOutput::NotAvailable.to_string();
    }
    let kb = |field: &str| field.parse::<i64>().unwrap_or(0);
    let total = kb(fields[1]);
    format!(
        "{:.2} GB / {} kB ({:.2} GB used, {:.2} GB free)",
        kb_to_gb(total),
        total,
        kb_to_gb(kb(fields[2])),
        kb_to_gb(kb(fields[3])),
    )
}
