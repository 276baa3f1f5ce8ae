use std::time::Duration;

pub fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn env_flag(key: &str) -> bool {
    env_value(key).map(|value| parse_flag(&value)).unwrap_or(false)
}

pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Reads a whole number of seconds from `key`. Malformed or zero values are
/// reported and ignored.
pub fn env_secs(key: &str) -> Option<Duration> {
    let raw = env_value(key)?;
    match parse_secs(&raw) {
        Some(duration) => Some(duration),
        None => {
            eprintln!("Ignoring {key}={raw}: expected a positive number of seconds");
            None
        }
    }
}

pub fn parse_secs(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}

pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.parse()?),
        )
        .init();
    Ok(())
}
