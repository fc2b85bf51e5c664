use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;

/// One immutable row in the audit trail. Entries are only ever inserted;
/// the application never updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    pub id: String,
    /// Nullable: the acting account may be deleted after the fact.
    pub actor_id: Option<String>,
    pub path: String,
    pub http_method: String,
    pub status_code: i16,
    pub entity_kind: String,
    pub entity_id: String,
    pub action: AuditAction,
    pub detail: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::Updated => "updated",
            AuditAction::Deleted => "deleted",
        }
    }
}

impl Serialize for AuditAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AuditAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "created" => Ok(AuditAction::Created),
            "updated" => Ok(AuditAction::Updated),
            "deleted" => Ok(AuditAction::Deleted),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["created", "updated", "deleted"],
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_value(AuditAction::Deleted).unwrap(),
            serde_json::Value::String("deleted".into())
        );
        let parsed: AuditAction = serde_json::from_str("\"updated\"").unwrap();
        assert_eq!(parsed, AuditAction::Updated);
    }
}
