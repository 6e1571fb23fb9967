//! Route transitions triggered after an identity swap.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Performs page transitions. Both calls are fire-and-forget.
pub trait Navigator: Send + Sync {
    /// Client-side transition to `route`.
    fn go_to(&self, route: &str);

    /// Hard reload of `route` after `delay`, so state read only at load time
    /// picks up the new identity.
    fn reload(&self, route: &str, delay: Duration);
}

/// Navigation emitted as `tracing` events, for hosts without a router.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn go_to(&self, route: &str) {
        tracing::info!(route, "navigate");
    }

    fn reload(&self, route: &str, delay: Duration) {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        tracing::info!(route, delay_ms, "reload");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    GoTo(String),
    Reload { route: String, delay: Duration },
}

/// Records every navigation instead of performing it.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavigationEvent>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, event: NavigationEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, route: &str) {
        self.push(NavigationEvent::GoTo(route.to_string()));
    }

    fn reload(&self, route: &str, delay: Duration) {
        self.push(NavigationEvent::Reload {
            route: route.to_string(),
            delay,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_navigator_keeps_order() {
        let nav = RecordingNavigator::new();
        nav.go_to("/admin/dashboard");
        nav.reload("/admin/dashboard", Duration::from_millis(100));

        assert_eq!(
            nav.events(),
            vec![
                NavigationEvent::GoTo("/admin/dashboard".into()),
                NavigationEvent::Reload {
                    route: "/admin/dashboard".into(),
                    delay: Duration::from_millis(100),
                },
            ]
        );
    }
}
