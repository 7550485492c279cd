//! Process-wide capability probes.

use std::fmt::Display;
use std::sync::OnceLock;

use log::debug;

static PASSIVE_EVENTS: OnceLock<bool> = OnceLock::new();

/// Whether the host supports passive event listeners.
///
/// `probe` runs at most once per process; later calls return the cached
/// answer without calling their probe. A failing probe counts as
/// unsupported.
pub fn passive_event_supported<E, F>(probe: F) -> bool
where
    E: Display,
    F: FnOnce() -> Result<bool, E>,
{
    *PASSIVE_EVENTS.get_or_init(|| match probe() {
        Ok(supported) => {
            debug!("Passive event support: {supported}");
            supported
        }
        Err(e) => {
            debug!("Passive event probe failed: {e}");
            false
        }
    })
}
