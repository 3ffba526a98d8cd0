//! The notification sink: transient success and error messages.

use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

/// Accepts notifications without acknowledging them.
pub trait Notifier {
    fn notify(&self, notification: Notification);

    fn success(&self, title: &str, description: impl Into<String>) {
        self.notify(Notification {
            title: title.to_string(),
            description: description.into(),
            variant: Variant::Success,
        });
    }

    fn destructive(&self, title: &str, description: impl Into<String>) {
        self.notify(Notification {
            title: title.to_string(),
            description: description.into(),
            variant: Variant::Destructive,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub notification: Notification,
    pub duration: Option<u32>, // milliseconds, None for no auto-dismiss
}

impl Toast {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: Uuid::new_v4(),
            notification,
            duration: Some(5000), // 5 seconds default
        }
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    pub fn no_auto_dismiss(mut self) -> Self {
        self.duration = None;
        self
    }
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Add(Toast),
    Remove(Uuid),
    Clear,
}

impl ToastState {
    pub fn reduce(&mut self, action: ToastAction) {
        match action {
            ToastAction::Add(toast) => {
                self.toasts.push(toast);
            }
            ToastAction::Remove(id) => {
                self.toasts.retain(|toast| toast.id != id);
            }
            ToastAction::Clear => {
                self.toasts.clear();
            }
        }
    }
}

/// Shared handle onto the toast list. Clones see the same toasts; the
/// renderer removes each one once its duration has elapsed.
#[derive(Debug, Clone, Default)]
pub struct ToastHandle {
    state: Rc<RefCell<ToastState>>,
}

impl ToastHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, toast: Toast) -> Uuid {
        let id = toast.id;
        self.state.borrow_mut().reduce(ToastAction::Add(toast));
        id
    }

    pub fn remove(&self, id: Uuid) {
        self.state.borrow_mut().reduce(ToastAction::Remove(id));
    }

    pub fn clear(&self) {
        self.state.borrow_mut().reduce(ToastAction::Clear);
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.state.borrow().toasts.clone()
    }

    /// Just the notifications, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.state
            .borrow()
            .toasts
            .iter()
            .map(|toast| toast.notification.clone())
            .collect()
    }
}

impl Notifier for ToastHandle {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            Variant::Success => {
                tracing::debug!(title = %notification.title, "success toast")
            }
            Variant::Destructive => tracing::debug!(
                title = %notification.title,
                description = %notification.description,
                "error toast"
            ),
        }
        let toast = Toast::new(notification);
        // errors stay until dismissed so they aren't missed
        let toast = match toast.notification.variant {
            Variant::Success => toast,
            Variant::Destructive => toast.no_auto_dismiss(),
        };
        self.add(toast);
    }
}
