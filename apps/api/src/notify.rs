use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Success,
    Error,
}

/// Toast surface. Fire-and-forget: nothing waits for acknowledgment.
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, variant: Variant);
}

/// Emits each notification as a structured log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, message: &str, variant: Variant) {
        match variant {
            Variant::Success => info!(target: "hireboard::notify", "{message}"),
            Variant::Error => warn!(target: "hireboard::notify", "{message}"),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Keeps every notification for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub shown: Mutex<Vec<(String, Variant)>>,
    }

    impl RecordingNotifier {
        pub fn messages(&self) -> Vec<(String, Variant)> {
            self.shown.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn show(&self, message: &str, variant: Variant) {
            self.shown
                .lock()
                .unwrap()
                .push((message.to_string(), variant));
        }
    }
}
