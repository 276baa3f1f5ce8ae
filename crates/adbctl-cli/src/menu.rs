use std::io::{self, BufRead, Write};

use adbctl_device::{collect_device_info, collect_memory_info, Adb};

use crate::present::Presenter;

const MENU: &str = "\nWhat action would you like to perform?\n\
    1. Show General Device Information\n\
    2. Show Detailed Memory Information\n\
    3. Reboot Device\n\
    4. Start Application\n\
    5. List Installed Applications\n\
    6. Exit\n";
const CHOICE_PROMPT: &str = "Enter your choice (1-6): ";
const PACKAGE_PROMPT: &str = "Enter the package name of the application to start: ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    GeneralInfo,
    MemoryInfo,
    Reboot,
    StartApp,
    ListApps,
    Exit,
}

impl MenuChoice {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::GeneralInfo),
            "2" => Some(Self::MemoryInfo),
            "3" => Some(Self::Reboot),
            "4" => Some(Self::StartApp),
            "5" => Some(Self::ListApps),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Interactive loop over the device actions. Returns when the user exits or
/// input runs out.
pub(crate) async fn run_menu<R: BufRead, W: Write>(
    adb: &Adb,
    serial: &str,
    presenter: &Presenter,
    mut input: R,
    mut out: W,
) -> io::Result<()> {
    loop {
        write!(out, "{MENU}{CHOICE_PROMPT}")?;
        out.flush()?;

        let Some(line) = read_line(&mut input)? else {
            writeln!(out)?;
            return Ok(());
        };
        let Some(choice) = MenuChoice::parse(&line) else {
            writeln!(out, "Invalid choice. Please try again.")?;
            continue;
        };

        match choice {
            MenuChoice::GeneralInfo => {
                let info = collect_device_info(adb, serial).await;
                write!(out, "{}", presenter.report(&info))?;
            }
            MenuChoice::MemoryInfo => {
                let info = collect_memory_info(adb, serial).await;
                write!(out, "{}", presenter.memory(&info))?;
            }
            MenuChoice::Reboot => {
                writeln!(out, "Rebooting device...")?;
                match adb.reboot(serial).await {
                    Ok(()) => writeln!(out, "Device is rebooting. Please wait...")?,
                    Err(err) => writeln!(out, "Error rebooting device: {err}")?,
                }
            }
            MenuChoice::StartApp => {
                write!(out, "{PACKAGE_PROMPT}")?;
                out.flush()?;
                let package = read_line(&mut input)?.unwrap_or_default();
                match adb.launch_app(serial, &package).await {
                    Ok(_) => writeln!(out, "Application {package} started successfully.")?,
                    Err(err) => writeln!(out, "Error starting application: {err}")?,
                }
            }
            MenuChoice::ListApps => match adb.list_packages(serial).await {
                Ok(packages) => write!(out, "{}", presenter.packages(&packages))?,
                Err(err) => writeln!(out, "Error listing installed applications: {err}")?,
            },
            MenuChoice::Exit => {
                writeln!(out, "Exiting. Goodbye!")?;
                return Ok(());
            }
        }
    }
}
