//! Notification (toast) queue
//!
//! In-memory, per-session queue of short-lived messages. Each toast with a
//! non-zero duration removes itself once the duration elapses; a zero
//! duration keeps it until removed by id or cleared.

use std::sync::{Arc, Weak};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use uuid::Uuid;

use crate::config::NotificationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub title: String,
    pub message: Option<String>,
    /// Zero means "until dismissed"
    pub duration: Duration,
}

/// What the caller supplies when raising a toast
#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    pub title: String,
    pub message: Option<String>,
    /// Overrides the kind's default duration
    pub duration: Option<Duration>,
}

impl ToastOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn persistent(self) -> Self {
        self.duration(Duration::ZERO)
    }
}

#[derive(Clone)]
pub struct ToastQueue {
    defaults: NotificationConfig,
    toasts: Arc<watch::Sender<Vec<Toast>>>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(&NotificationConfig::default())
    }
}

impl ToastQueue {
    pub fn new(defaults: &NotificationConfig) -> Self {
        let (toasts, _) = watch::channel(Vec::new());
        Self {
            defaults: defaults.clone(),
            toasts: Arc::new(toasts),
        }
    }

    pub fn default_duration(&self, kind: ToastKind) -> Duration {
        let ms = match kind {
            ToastKind::Success => self.defaults.success_ms,
            ToastKind::Error => self.defaults.error_ms,
            ToastKind::Warning => self.defaults.warning_ms,
            ToastKind::Info => self.defaults.info_ms,
        };
        Duration::from_millis(ms)
    }

    /// Enqueue a toast and return its id
    pub fn push(&self, kind: ToastKind, options: ToastOptions) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let duration = options.duration.unwrap_or_else(|| self.default_duration(kind));

        let toast = Toast {
            id: id.clone(),
            kind,
            title: options.title,
            message: options.message,
            duration,
        };
        self.toasts.send_modify(|toasts| toasts.push(toast));

        if !duration.is_zero() {
            self.schedule_expiry(id.clone(), duration);
        }
        id
    }

    pub fn success(&self, options: ToastOptions) -> String {
        self.push(ToastKind::Success, options)
    }

    pub fn error(&self, options: ToastOptions) -> String {
        self.push(ToastKind::Error, options)
    }

    pub fn warning(&self, options: ToastOptions) -> String {
        self.push(ToastKind::Warning, options)
    }

    pub fn info(&self, options: ToastOptions) -> String {
        self.push(ToastKind::Info, options)
    }

    /// Returns whether a toast with this id was queued
    pub fn remove(&self, id: &str) -> bool {
        remove_from(&self.toasts, id)
    }

    pub fn clear(&self) {
        self.toasts.send_if_modified(|toasts| {
            let had_any = !toasts.is_empty();
            toasts.clear();
            had_any
        });
    }

    /// Queued toasts, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.toasts.subscribe()
    }

    fn schedule_expiry(&self, id: String, duration: Duration) {
        let toasts: Weak<watch::Sender<Vec<Toast>>> = Arc::downgrade(&self.toasts);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    if let Some(toasts) = toasts.upgrade() {
                        remove_from(&toasts, &id);
                    }
                });
            }
            Err(_) => {
                tracing::warn!("No async runtime, toast {} will not expire", id);
            }
        }
    }
}

fn remove_from(toasts: &watch::Sender<Vec<Toast>>, id: &str) -> bool {
    toasts.send_if_modified(|toasts| {
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_duration() {
        let queue = ToastQueue::default();
        let id = queue.info(ToastOptions::new("Saved").duration(Duration::from_millis(100)));
        assert_eq!(queue.toasts()[0].id, id);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(queue.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_persists_until_removed() {
        let queue = ToastQueue::default();
        let id = queue.error(ToastOptions::new("Sync failed").persistent());

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert_eq!(queue.toasts().len(), 1);

        assert!(queue.remove(&id));
        assert!(!queue.remove(&id));
        assert!(queue.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_kind_default_durations() {
        let queue = ToastQueue::default();
        queue.success(ToastOptions::new("a"));
        queue.error(ToastOptions::new("b"));
        queue.warning(ToastOptions::new("c").message("details"));
        queue.info(ToastOptions::new("d"));

        let durations: Vec<u128> = queue.toasts().iter().map(|t| t.duration.as_millis()).collect();
        assert_eq!(durations, vec![5000, 7000, 6000, 5000]);
        assert_eq!(queue.toasts()[2].message.as_deref(), Some("details"));

        tokio::time::sleep(Duration::from_millis(5500)).await;
        let kinds: Vec<ToastKind> = queue.toasts().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![ToastKind::Error, ToastKind::Warning]);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(queue.toasts().len(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_clear_empties() {
        let queue = ToastQueue::default();
        let a = queue.success(ToastOptions::new("one"));
        let b = queue.success(ToastOptions::new("two"));
        assert_ne!(a, b);

        queue.clear();
        assert!(queue.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let queue = ToastQueue::default();
        let mut rx = queue.subscribe();
        queue.warning(ToastOptions::new("Low stock"));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update()[0].title, "Low stock");
    }

    #[test]
    fn test_push_outside_runtime_keeps_toast() {
        let queue = ToastQueue::default();
        queue.info(ToastOptions::new("No runtime"));
        assert_eq!(queue.toasts().len(), 1);
    }
}
