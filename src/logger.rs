//! Injected logging capability
use log::Level;

/// Components that report progress or anomalies receive a [Recorder]
/// rather than relying on process wide state.
pub trait Recorder {
    /// Record a message at said [Level].
    fn record(&self, message: &str, level: Level);
}

/// [Recorder] forwarding everything to the [log] facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRecorder;

impl Recorder for LogRecorder {
    fn record(&self, message: &str, level: Level) {
        log::log!(target: "orbit_track", level, "{}", message);
    }
}

impl<R: Recorder + ?Sized> Recorder for &R {
    fn record(&self, message: &str, level: Level) {
        (**self).record(message, level)
    }
}

impl<R: Recorder + ?Sized> Recorder for Box<R> {
    fn record(&self, message: &str, level: Level) {
        (**self).record(message, level)
    }
}
