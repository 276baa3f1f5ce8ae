use std::fmt::Write as _;

use adbctl_device::{
    meminfo::{format_size, MemoryLineKind},
    tables::property_icon,
    Config, DeviceInfo, MemInfo, Section,
};
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

const REPORT_RULE_WIDTH: usize = 70;
const MEMORY_RULE_WIDTH: usize = 30;
const OTHER_RULE_WIDTH: usize = 25;

#[derive(Clone, Debug)]
pub(crate) struct Presenter {
    color: bool,
    show_icons: bool,
}

#[derive(Serialize)]
struct JsonReport<'a, T> {
    serial: &'a str,
    entries: &'a [T],
}

impl Presenter {
    pub(crate) fn new(config: &Config, color: bool) -> Self {
        Self {
            color,
            show_icons: config.show_icons,
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub(crate) fn report(&self, info: &[DeviceInfo]) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}",
            self.paint("Device Information", Style::new().cyan().bold())
        );
        let _ = writeln!(out, "{}", "=".repeat(REPORT_RULE_WIDTH));

        let mut section: Option<Section> = None;
        for entry in info {
            if section != Some(entry.section) {
                out.push('\n');
                let header = format!("[ {} ]", entry.section.title());
                let _ = writeln!(out, "{}", self.paint(&header, Style::new().yellow().bold()));
                section = Some(entry.section);
            }
            let icon = property_icon(&entry.label, self.show_icons);
            let label = format!("{icon:<3} {:<20} : ", entry.label);
            let _ = writeln!(
                out,
                "{}{}",
                self.paint(&label, Style::new().green()),
                self.paint(&entry.value, Style::new().white())
            );
        }
        out.push('\n');
        out
    }

    pub(crate) fn memory(&self, info: &MemInfo) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}",
            self.paint("Detailed Memory Information", Style::new().cyan().bold())
        );
        let _ = writeln!(out, "{}\n", "=".repeat(MEMORY_RULE_WIDTH));

        let mut previous = None;
        for line in info.detailed_lines() {
            let style = match line.kind {
                MemoryLineKind::Highlighted => Style::new().yellow().bold(),
                MemoryLineKind::UsedRam => Style::new().red().bold(),
                MemoryLineKind::UsedSwap => Style::new().magenta().bold(),
                MemoryLineKind::Other => Style::new().green(),
            };
            match (previous, line.kind) {
                (Some(MemoryLineKind::Highlighted), MemoryLineKind::UsedRam)
                | (None, MemoryLineKind::UsedRam) => out.push('\n'),
                (Some(MemoryLineKind::UsedSwap), MemoryLineKind::Other) => {
                    let _ = writeln!(out, "\nOther Memory Information:");
                    let _ = writeln!(out, "{}", "-".repeat(OTHER_RULE_WIDTH));
                }
                _ => {}
            }
            let label = format!("{:<20} : ", line.label);
            let _ = writeln!(
                out,
                "{}{}",
                self.paint(&label, style),
                self.paint(&format_size(line.kb), Style::new().white())
            );
            previous = Some(line.kind);
        }
        out
    }

    pub(crate) fn packages(&self, packages: &[String]) -> String {
        let mut out = String::from("Installed Applications:\n");
        for package in packages {
            out.push_str(package);
            out.push('\n');
        }
        out
    }

    pub(crate) fn json<T: Serialize>(
        &self,
        serial: &str,
        entries: &[T],
    ) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&JsonReport { serial, entries })
    }
}
