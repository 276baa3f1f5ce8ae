//! Device discovery, selection and querying on top of the `adb` command line.
//!
//! Every device interaction is one `adb` child process bounded by a timeout.
//! Query failures come back as [`ShellOutput`] sentinels; only the directory
//! and the connectivity probe produce errors that stop the program.

pub mod adb;
pub mod config;
pub mod directory;
pub mod meminfo;
pub mod probe;
pub mod report;
pub mod tables;

pub use adb::{Adb, AdbFailure, Shell, ShellOutput, NOT_AVAILABLE, TIMED_OUT};
pub use config::Config;
pub use directory::{list_devices, select_device, Device, DirectoryError};
pub use meminfo::{collect_memory_info, MemInfo, MemoryLine};
pub use probe::{check_connectivity, ProbeError};
pub use report::{collect_device_info, DeviceInfo, Section};
