use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules;

/// Maximum length of a notification message, enforced at validation and by a
/// database check constraint.
pub const MAX_MESSAGE_LENGTH: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: String,
    pub recipient_id: String,
    /// Optional vehicle the notification refers to.
    pub vehicle_id: Option<String>,
    pub message: String,
    pub kind: NotificationKind,
    /// Mutable only by the recipient marking the notification read.
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Default)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

impl Serialize for NotificationKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NotificationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "info" => Ok(NotificationKind::Info),
            "warning" => Ok(NotificationKind::Warning),
            "error" => Ok(NotificationKind::Error),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["info", "warning", "error"],
            )),
        }
    }
}

impl Notification {
    pub fn new(
        recipient_id: String,
        vehicle_id: Option<String>,
        message: String,
        kind: NotificationKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            recipient_id,
            vehicle_id,
            message,
            kind,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Short description used in audit details.
    pub fn summary(&self) -> String {
        let head: String = self.message.chars().take(50).collect();
        format!("for {}: {}", self.recipient_id, head)
    }
}

impl crate::policies::Owned for Notification {
    fn owner_account_id(&self) -> Option<&str> {
        Some(&self.recipient_id)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotification {
    #[validate(custom(function = "rules::validate_message"))]
    pub message: String,
    #[serde(default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub vehicle_id: Option<String>,
}
