use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use storefront_core::app_config::{ClearPolicy, NotifierConfig};
use storefront_core::{DisplaySurface, StatusKind, StatusMessage};
use tracing::debug;

/// Shows transient status text and clears it after a fixed delay.
#[derive(Clone)]
pub struct Notifier {
    surface: Arc<dyn DisplaySurface>,
    clear_after: Duration,
    policy: ClearPolicy,
    generation: Arc<AtomicU64>,
    current: Arc<Mutex<Option<StatusMessage>>>,
}

impl Notifier {
    pub fn new(surface: Arc<dyn DisplaySurface>, clear_after: Duration, policy: ClearPolicy) -> Self {
        Self {
            surface,
            clear_after,
            policy,
            generation: Arc::new(AtomicU64::new(0)),
            current: Arc::new(Mutex::new(None)),
        }
    }

    pub fn from_config(surface: Arc<dyn DisplaySurface>, config: &NotifierConfig) -> Self {
        Self::new(surface, config.clear_after(), config.clear_policy)
    }

    /// Display `text` and schedule its clear. Under [`ClearPolicy::EachMessage`]
    /// the timer fires unconditionally, so it may erase a newer message.
    pub fn notify(&self, text: impl Into<String>, kind: StatusKind) -> StatusMessage {
        let now = Utc::now();
        // A delay past chrono's range never expires in practice
        let expires_at = chrono::Duration::from_std(self.clear_after)
            .ok()
            .and_then(|delay| now.checked_add_signed(delay))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let status = StatusMessage {
            text: text.into(),
            kind,
            shown_at: now,
            expires_at,
        };

        self.surface.show_status(&status);
        *lock(&self.current) = Some(status.clone());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Without a runtime there is nothing to drive the timer; the message
        // simply stays until the next one replaces it.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No runtime, status will not auto-clear");
            return status;
        };

        let surface = self.surface.clone();
        let current = self.current.clone();
        let latest = self.generation.clone();
        let policy = self.policy;
        let clear_after = self.clear_after;
        handle.spawn(async move {
            tokio::time::sleep(clear_after).await;
            if policy == ClearPolicy::LatestOnly && latest.load(Ordering::SeqCst) != generation {
                debug!(generation, "Newer status on display, skipping clear");
                return;
            }
            surface.clear_status();
            *lock(&current) = None;
            debug!(generation, "Status cleared");
        });

        status
    }

    pub fn success(&self, text: impl Into<String>) -> StatusMessage {
        self.notify(text, StatusKind::Success)
    }

    pub fn error(&self, text: impl Into<String>) -> StatusMessage {
        self.notify(text, StatusKind::Error)
    }

    /// Status currently on display, if any.
    pub fn current(&self) -> Option<StatusMessage> {
        lock(&self.current).clone()
    }
}

fn lock(current: &Mutex<Option<StatusMessage>>) -> MutexGuard<'_, Option<StatusMessage>> {
    current.lock().unwrap_or_else(PoisonError::into_inner)
}
