use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use storefront_shared::CartView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Success,
    Error,
}

/// Transient status text shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Whatever hosts the widget: three output regions (cart lines, total,
/// status) and two controls (customer name field, submit trigger).
pub trait DisplaySurface: Send + Sync {
    /// Replace the cart region, including the total footer.
    fn show_cart(&self, view: &CartView);

    fn show_status(&self, status: &StatusMessage);

    fn clear_status(&self);

    fn set_submit_enabled(&self, enabled: bool, label: &str);

    /// Current raw contents of the customer name field.
    fn customer_name(&self) -> String;

    fn clear_customer_name(&self);
}

/// Everything a [`RecordingSurface`] has been told to display.
#[derive(Debug, Clone)]
pub struct SurfaceState {
    pub cart: Option<CartView>,
    pub status: Option<StatusMessage>,
    pub status_history: Vec<StatusMessage>,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub customer_name: String,
    /// Every (enabled, label) the trigger went through, in order.
    pub trigger_history: Vec<(bool, String)>,
}

/// Headless surface that keeps what it was asked to show; used by tests and
/// by hosts that render elsewhere.
#[derive(Debug)]
pub struct RecordingSurface {
    state: Mutex<SurfaceState>,
}

impl RecordingSurface {
    pub fn new(submit_label: &str) -> Self {
        Self {
            state: Mutex::new(SurfaceState {
                cart: None,
                status: None,
                status_history: Vec::new(),
                submit_enabled: true,
                submit_label: submit_label.to_string(),
                customer_name: String::new(),
                trigger_history: Vec::new(),
            }),
        }
    }

    pub fn set_customer_name(&self, name: &str) {
        self.lock().customer_name = name.to_string();
    }

    pub fn snapshot(&self) -> SurfaceState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DisplaySurface for RecordingSurface {
    fn show_cart(&self, view: &CartView) {
        self.lock().cart = Some(view.clone());
    }

    fn show_status(&self, status: &StatusMessage) {
        let mut state = self.lock();
        state.status = Some(status.clone());
        state.status_history.push(status.clone());
    }

    fn clear_status(&self) {
        self.lock().status = None;
    }

    fn set_submit_enabled(&self, enabled: bool, label: &str) {
        let mut state = self.lock();
        state.submit_enabled = enabled;
        state.submit_label = label.to_string();
        state.trigger_history.push((enabled, label.to_string()));
    }

    fn customer_name(&self) -> String {
        self.lock().customer_name.clone()
    }

    fn clear_customer_name(&self) {
        self.lock().customer_name.clear();
    }
}
