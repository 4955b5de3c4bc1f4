//! Diagnostic log setup

use tracing::Level;

/// Log level for a count of `-v` flags
///
/// Quiet runs only report warnings; each `-v` lowers the threshold one step from info.
pub const fn level_for(verbosity: u8, quiet: bool) -> Level {
    if quiet {
        return Level::WARN;
    }
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global stderr subscriber
///
/// Returns false if a subscriber was already installed.
pub fn init(verbosity: u8, quiet: bool) -> bool {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level_for(verbosity, quiet))
        .with_target(false)
        .try_init()
        .is_ok()
}
