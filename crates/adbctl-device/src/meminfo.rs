use serde::Serialize;

use crate::adb::Shell;

pub const MEMINFO_COMMAND: &str = "cat /proc/meminfo";

const KB_PER_MB: i64 = 1024;
const KB_PER_GB: i64 = 1024 * 1024;

const HIGHLIGHTED: &[(&str, &str)] = &[
    ("MemTotal", "Total RAM"),
    ("MemAvailable", "Available RAM"),
    ("MemFree", "Free RAM"),
    ("SwapTotal", "Total Swap"),
    ("SwapFree", "Free Swap"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryLineKind {
    Highlighted,
    UsedRam,
    UsedSwap,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemoryLine {
    pub kind: MemoryLineKind,
    pub label: String,
    pub kb: i64,
}

/// `/proc/meminfo` values in kB, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemInfo {
    entries: Vec<(String, i64)>,
}

impl MemInfo {
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .filter_map(|line| {
                let mut fields = line.split_whitespace();
                let key = fields.next()?.trim_end_matches(':');
                let kb = fields.next()?.parse::<i64>().ok()?;
                Some((key.to_string(), kb))
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, kb)| *kb)
    }

    fn get_or_zero(&self, key: &str) -> i64 {
        self.get(key).unwrap_or(0)
    }

    pub fn total_kb(&self) -> i64 {
        self.get_or_zero("MemTotal")
    }

    pub fn used_kb(&self) -> i64 {
        self.total_kb()
            .saturating_sub(self.get_or_zero("MemAvailable"))
    }

    pub fn used_swap_kb(&self) -> i64 {
        self.get_or_zero("SwapTotal")
            .saturating_sub(self.get_or_zero("SwapFree"))
    }

    /// One-line summary used by the general report.
    pub fn summary(&self) -> String {
        let total = self.total_kb();
        format!(
            "{:.2} GB / {} kB ({:.2} GB used, {:.2} GB free)",
            kb_to_gb(total),
            total,
            kb_to_gb(self.used_kb()),
            kb_to_gb(self.get_or_zero("MemFree")),
        )
    }

    /// Highlighted fields that are present, the derived used values, then
    /// every remaining key.
    pub fn detailed_lines(&self) -> Vec<MemoryLine> {
        let mut lines = Vec::with_capacity(self.entries.len() + 2);
        for (key, label) in HIGHLIGHTED {
            if let Some(kb) = self.get(key) {
                lines.push(MemoryLine {
                    kind: MemoryLineKind::Highlighted,
                    label: (*label).to_string(),
                    kb,
                });
            }
        }
        lines.push(MemoryLine {
            kind: MemoryLineKind::UsedRam,
            label: "Used RAM".into(),
            kb: self.used_kb(),
        });
        lines.push(MemoryLine {
            kind: MemoryLineKind::UsedSwap,
            label: "Used Swap".into(),
            kb: self.used_swap_kb(),
        });
        lines.extend(
            self.entries
                .iter()
                .filter(|(key, _)| !HIGHLIGHTED.iter().any(|(h, _)| h == key))
                .map(|(key, kb)| MemoryLine {
                    kind: MemoryLineKind::Other,
                    label: key.clone(),
                    kb: *kb,
                }),
        );
        lines
    }
}

pub fn kb_to_gb(kb: i64) -> f64 {
    kb as f64 / KB_PER_GB as f64
}

pub fn format_size(kb: i64) -> String {
    if kb > KB_PER_GB {
        format!("{:.2} GB", kb_to_gb(kb))
    } else if kb > KB_PER_MB {
        format!("{:.2} MB", kb as f64 / KB_PER_MB as f64)
    } else {
        format!("{kb} KB")
    }
}

/// Reads `/proc/meminfo`; a failed query yields an empty report.
pub async fn collect_memory_info<S: Shell>(shell: &S, serial: &str) -> MemInfo {
    let output = shell.shell(Some(serial), MEMINFO_COMMAND).await;
    output.value().map(MemInfo::parse).unwrap_or_default()
}
