//! Broadcast of identity swaps to interested views.
//!
//! Views that show the logged-in user subscribe here and refresh when an
//! impersonation starts or ends, without a full reload.

use fleet_core::{CompanyRef, IdentitySummary};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityChangeKind {
    Started,
    Ended,
}

/// Published after every successful identity swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityChanged {
    pub kind: IdentityChangeKind,
    /// The identity now held in the current-user cache.
    pub identity: IdentitySummary,
    /// The impersonated company, `None` once impersonation ended.
    pub company: Option<CompanyRef>,
}

#[derive(Debug, Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<IdentityChanged>,
}

impl ChangeBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<IdentityChanged> {
        self.tx.subscribe()
    }

    /// Returns how many subscribers received the event. Zero subscribers is
    /// not an error.
    pub fn publish(&self, event: IdentityChanged) -> usize {
        self.tx.send(event).unwrap_or(0)
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::Role;

    fn event() -> IdentityChanged {
        IdentityChanged {
            kind: IdentityChangeKind::Started,
            identity: IdentitySummary::new("Acme Admin", "admin@acme.test", Role::Admin),
            company: Some(CompanyRef::new("co42", "Acme")),
        }
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let bus = ChangeBus::default();
        assert_eq!(bus.publish(event()), 0);
    }

    #[test]
    fn subscribers_receive_events() {
        let bus = ChangeBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        assert_eq!(bus.publish(event()), 2);
        assert_eq!(first.try_recv().unwrap(), event());
        assert_eq!(second.try_recv().unwrap(), event());
    }
}
