use super::view::{Element, Node};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Error => "x-circle",
            Severity::Warning => "alert-triangle",
            Severity::Info => "info",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "green",
            Severity::Error => "red",
            Severity::Warning => "yellow",
            Severity::Info => "blue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
}

/// Transient toasts. One instance is owned by the application and shared
/// with every component that reports to the user.
pub struct NotificationCenter {
    active: Arc<Mutex<Vec<Notification>>>,
    history: Mutex<Vec<Notification>>,
    default_duration: Duration,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl NotificationCenter {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            active: Arc::new(Mutex::new(Vec::new())),
            history: Mutex::new(Vec::new()),
            default_duration,
        }
    }

    /// Shows a notification that removes itself after `duration` (or the
    /// default). Needs a Tokio runtime for the timer; without one the
    /// notification stays until dismissed.
    pub fn show(&self, message: impl Into<String>, severity: Severity, duration: Option<Duration>) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            duration: duration.unwrap_or(self.default_duration),
            created_at: Utc::now(),
        };
        let id = notification.id;

        match severity {
            Severity::Error => tracing::error!("[notification] {}", notification.message),
            Severity::Warning => tracing::warn!("[notification] {}", notification.message),
            Severity::Success | Severity::Info => tracing::info!("[notification] {}", notification.message),
        }

        {
            let mut history = lock(&self.history);
            history.push(notification.clone());
            if history.len() > HISTORY_LIMIT {
                let overflow = history.len() - HISTORY_LIMIT;
                history.drain(..overflow);
            }
        }

        let lifetime = notification.duration;
        lock(&self.active).push(notification);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let active = self.active.clone();
                handle.spawn(async move {
                    tokio::time::sleep(lifetime).await;
                    lock(&active).retain(|n| n.id != id);
                });
            }
            Err(_) => tracing::debug!("No runtime available; notification {} will not auto-dismiss", id),
        }

        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.show(message, Severity::Success, None)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.show(message, Severity::Error, None)
    }

    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.show(message, Severity::Warning, None)
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.show(message, Severity::Info, None)
    }

    /// Manual close. Returns false when the notification was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut active = lock(&self.active);
        let before = active.len();
        active.retain(|n| n.id != id);
        active.len() != before
    }

    pub fn active(&self) -> Vec<Notification> {
        lock(&self.active).clone()
    }

    /// Everything shown so far, oldest first, including dismissed entries.
    pub fn history(&self) -> Vec<Notification> {
        lock(&self.history).clone()
    }

    pub fn last(&self) -> Option<Notification> {
        lock(&self.history).last().cloned()
    }

    pub fn render(&self) -> Node {
        Element::new("div")
            .attr("id", "notification-container")
            .class("fixed top-4 right-4 z-50 space-y-2")
            .children(self.active().iter().map(render_notification))
            .into()
    }
}

fn render_notification(notification: &Notification) -> Element {
    let color = notification.severity.color();
    Element::new("div")
        .class("notification max-w-sm w-full bg-white shadow-lg rounded-lg")
        .attr("data-id", notification.id.to_string())
        .attr("data-severity", color)
        .child(
            Element::new("div").class("p-4 flex items-start").children([
                Element::new("i")
                    .attr("data-lucide", notification.severity.icon())
                    .class(&format!("w-5 h-5 text-{}-500", color)),
                Element::new("p")
                    .class("ml-3 text-sm font-medium text-gray-900")
                    .text(notification.message.as_str()),
                Element::new("button")
                    .class("notification-close ml-4")
                    .attr("data-dismiss", notification.id.to_string())
                    .child(Element::new("span").class("sr-only").text("Close")),
            ]),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_after_default_duration() {
        let center = NotificationCenter::new(Duration::from_millis(5000));
        center.success("Schéma généré avec succès !");
        assert_eq!(center.active().len(), 1);

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert_eq!(center.active().len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(center.active().is_empty());
        assert_eq!(center.history().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_duration() {
        let center = NotificationCenter::new(Duration::from_millis(5000));
        center.show("Bienvenue", Severity::Info, Some(Duration::from_millis(8000)));

        tokio::time::sleep(Duration::from_millis(6000)).await;
        assert_eq!(center.active().len(), 1);

        tokio::time::sleep(Duration::from_millis(2001)).await;
        assert!(center.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_dismiss_before_timer() {
        let center = NotificationCenter::new(Duration::from_millis(5000));
        let id = center.error("Erreur serveur");
        let other = center.warning("Attention");

        assert!(center.dismiss(id));
        assert!(!center.dismiss(id));
        let active = center.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, other);

        // The timer of the dismissed entry firing later is harmless.
        tokio::time::sleep(Duration::from_millis(6000)).await;
        assert!(center.active().is_empty());
    }

    #[test]
    fn test_without_runtime_notification_persists() {
        let center = NotificationCenter::new(Duration::from_millis(1));
        let id = center.info("Hors runtime");
        assert_eq!(center.active().len(), 1);
        assert!(center.dismiss(id));
    }

    #[tokio::test]
    async fn test_render_lists_active_notifications() {
        let center = NotificationCenter::new(Duration::from_secs(60));
        center.warning("Cette exigence a déjà été ajoutée.");

        let view = center.render();
        let cards = view.find_by_class("notification");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].attribute("data-severity"), Some("yellow"));
        assert!(view.text_content().contains("Cette exigence a déjà été ajoutée."));
    }
}
