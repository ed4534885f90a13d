//! Process and host metadata lookups

/// Source of the values behind `Logger::with_pid` and `Logger::with_hostname`
///
/// Both lookups must be synchronous and free of side effects.
pub trait ProcessInfo {
    fn pid(&self) -> u32;
    fn hostname(&self) -> String;
}

/// Reads the running process and the local host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessInfo;

impl ProcessInfo for SystemProcessInfo {
    fn pid(&self) -> u32 {
        std::process::id()
    }

    /// Empty when the OS refuses the lookup
    fn hostname(&self) -> String {
        hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
