use crate::domain::error::DomainError;
use crate::domain::values::account_status::AccountStatus;
use crate::domain::values::timestamp::{self, TimestampValue};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A driver document as held by the store, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverDocument {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub fleet_manager_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub username: Option<String>,
    pub account_status: Option<String>,
    pub face_embedding: Option<String>,
    pub created_at: TimestampValue,
    pub updated_at: TimestampValue,
    pub last_login: TimestampValue,
}

impl DriverDocument {
    /// Builds a document from an exported JSON object. Accepts `_id` as a
    /// plain string or `{"$oid": ..}`, and the embedding either as a JSON
    /// array or as its serialized text under `face_embedding_url`.
    pub fn from_json(v: &Value) -> Result<Self, DomainError> {
        let obj = v.as_object().ok_or_else(|| {
            DomainError::InvalidInput("driver document must be a JSON object".into())
        })?;

        let text = |key: &str| obj.get(key).and_then(json_text);
        let id = obj
            .get("_id")
            .or_else(|| obj.get("id"))
            .and_then(|v| match v {
                Value::Object(m) => m.get("$oid").and_then(json_text),
                other => json_text(other),
            });
        let face_embedding = obj
            .get("face_embedding_url")
            .or_else(|| obj.get("face_embedding"))
            .and_then(|v| match v {
                Value::Array(_) => Some(v.to_string()),
                other => json_text(other),
            });
        let time = |key: &str| obj.get(key).map(TimestampValue::from).unwrap_or_default();

        Ok(Self {
            id,
            user_id: text("user_id"),
            fleet_manager_id: text("fleet_manager_id"),
            first_name: text("first_name"),
            last_name: text("last_name"),
            email: text("email"),
            phone: text("phone"),
            license_number: text("license_number"),
            username: text("username"),
            account_status: text("account_status"),
            face_embedding,
            created_at: time("created_at"),
            updated_at: time("updated_at"),
            last_login: time("last_login"),
        })
    }

    pub fn label(&self) -> &str {
        self.user_id.as_deref().unwrap_or("unknown")
    }
}

fn json_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    Missing(&'static str),
    Empty(&'static str),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Missing(field) => write!(f, "missing {field}"),
            FieldIssue::Empty(field) => write!(f, "empty {field}"),
            FieldIssue::Invalid { field, reason } => write!(f, "invalid {field} ({reason})"),
        }
    }
}

/// Every problem found while validating one driver document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordValidationError {
    pub record: String,
    pub issues: Vec<FieldIssue>,
}

impl RecordValidationError {
    pub fn fields(&self) -> Vec<&'static str> {
        self.issues
            .iter()
            .map(|i| match i {
                FieldIssue::Missing(f) | FieldIssue::Empty(f) => *f,
                FieldIssue::Invalid { field, .. } => *field,
            })
            .collect()
    }
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let issues: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        write!(f, "driver {}: {}", self.record, issues.join(", "))
    }
}

impl std::error::Error for RecordValidationError {}

/// A validated driver record.
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub id: String,
    pub user_id: String,
    pub fleet_manager_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub username: String,
    pub account_status: AccountStatus,
    pub face_embedding: String,
    pub created_at: TimestampValue,
    pub updated_at: TimestampValue,
    pub last_login: TimestampValue,
}

impl TryFrom<DriverDocument> for Driver {
    type Error = RecordValidationError;

    fn try_from(doc: DriverDocument) -> Result<Self, Self::Error> {
        let mut issues = Vec::new();
        let record = doc.label().to_string();

        let mut required = |value: Option<String>, field: &'static str| -> String {
            match value {
                Some(v) => v,
                None => {
                    issues.push(FieldIssue::Missing(field));
                    String::new()
                }
            }
        };

        let id = required(doc.id, "_id");
        let user_id = required(doc.user_id, "user_id");
        let fleet_manager_id = required(doc.fleet_manager_id, "fleet_manager_id");
        let first_name = required(doc.first_name, "first_name");
        let last_name = required(doc.last_name, "last_name");
        let email = required(doc.email, "email");
        let phone = required(doc.phone, "phone");
        let license_number = required(doc.license_number, "license_number");
        let username = required(doc.username, "username");
        let status_text = doc.account_status;
        let face_embedding = required(doc.face_embedding, "face_embedding_url");

        if user_id.trim().is_empty() && !issues.contains(&FieldIssue::Missing("user_id")) {
            issues.push(FieldIssue::Empty("user_id"));
        }

        let account_status = match status_text.as_deref().map(str::parse::<AccountStatus>) {
            Some(Ok(status)) => Some(status),
            Some(Err(reason)) => {
                issues.push(FieldIssue::Invalid { field: "account_status", reason });
                None
            }
            None => {
                issues.push(FieldIssue::Missing("account_status"));
                None
            }
        };

        match account_status {
            Some(account_status) if issues.is_empty() => Ok(Driver {
                id,
                user_id,
                fleet_manager_id,
                first_name,
                last_name,
                email,
                phone,
                license_number,
                username,
                account_status,
                face_embedding,
                created_at: doc.created_at,
                updated_at: doc.updated_at,
                last_login: doc.last_login,
            }),
            _ => Err(RecordValidationError { record, issues }),
        }
    }
}

impl Driver {
    pub fn normalize(&self) -> NormalizedDriver {
        self.normalize_at(timestamp::now_millis())
    }

    /// Output form with every time field in epoch milliseconds.
    pub fn normalize_at(&self, now_ms: i64) -> NormalizedDriver {
        NormalizedDriver {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            fleet_manager_id: self.fleet_manager_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            license_number: self.license_number.clone(),
            username: self.username.clone(),
            account_status: self.account_status,
            face_embedding_url: self.face_embedding.clone(),
            created_at: timestamp::normalize_at(&self.created_at, now_ms),
            updated_at: timestamp::normalize_at(&self.updated_at, now_ms),
            last_login: timestamp::normalize_at(&self.last_login, now_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedDriver {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub fleet_manager_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub username: String,
    pub account_status: AccountStatus,
    pub face_embedding_url: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_login: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::embedding::FeatureVector;
    use serde_json::json;

    fn sample_json() -> Value {
        json!({
            "_id": {"$oid": "65536e1f2a"},
            "user_id": "drv-001",
            "fleet_manager_id": "fm-9",
            "first_name": "Amira",
            "last_name": "Khan",
            "email": "amira@example.com",
            "phone": 5551234,
            "license_number": "LIC-42",
            "username": "amira",
            "account_status": "Active",
            "face_embedding_url": "[0.1, 0.2, 0.3]",
            "created_at": 1700000000,
            "updated_at": "2023-11-14T00:00:00Z",
        })
    }

    #[test]
    fn test_from_json_reads_fields() {
        let doc = DriverDocument::from_json(&sample_json()).unwrap();
        assert_eq!(doc.id.as_deref(), Some("65536e1f2a"));
        assert_eq!(doc.phone.as_deref(), Some("5551234"));
        assert_eq!(doc.created_at, TimestampValue::Integer(1_700_000_000));
        assert_eq!(doc.last_login, TimestampValue::Absent);
    }

    #[test]
    fn test_from_json_accepts_embedding_array() {
        let mut v = sample_json();
        v.as_object_mut().unwrap().remove("face_embedding_url");
        v["face_embedding"] = json!([0.5, 0.5]);
        let doc = DriverDocument::from_json(&v).unwrap();
        let driver = Driver::try_from(doc).unwrap();
        assert_eq!(
            FeatureVector::decode(&driver.face_embedding).unwrap(),
            FeatureVector::new(vec![0.5, 0.5])
        );
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            DriverDocument::from_json(&json!([1, 2])),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_valid_document_parses() {
        let driver = Driver::try_from(DriverDocument::from_json(&sample_json()).unwrap()).unwrap();
        assert_eq!(driver.account_status, AccountStatus::Active);
        assert_eq!(driver.first_name, "Amira");
        assert_eq!(driver.last_name, "Khan");
    }

    #[test]
    fn test_validation_enumerates_every_bad_field() {
        let doc = DriverDocument {
            user_id: Some("drv-7".into()),
            first_name: Some("Li".into()),
            account_status: Some("Retired".into()),
            ..Default::default()
        };
        let err = Driver::try_from(doc).unwrap_err();
        assert_eq!(err.record, "drv-7");
        let fields = err.fields();
        for f in [
            "_id",
            "fleet_manager_id",
            "last_name",
            "email",
            "phone",
            "license_number",
            "username",
            "face_embedding_url",
            "account_status",
        ] {
            assert!(fields.contains(&f), "expected {f} in {fields:?}");
        }
        assert!(!fields.contains(&"first_name"));
        assert!(err.to_string().contains("invalid account_status"));
    }

    #[test]
    fn test_blank_user_id_is_rejected() {
        let mut doc = DriverDocument::from_json(&sample_json()).unwrap();
        doc.user_id = Some("  ".into());
        let err = Driver::try_from(doc).unwrap_err();
        assert_eq!(err.issues, vec![FieldIssue::Empty("user_id")]);
    }

    #[test]
    fn test_normalize_converts_all_time_fields() {
        let driver = Driver::try_from(DriverDocument::from_json(&sample_json()).unwrap()).unwrap();
        let n = driver.normalize_at(42);
        assert_eq!(n.created_at, 1_700_000_000_000);
        assert_eq!(n.updated_at, 1_699_920_000_000);
        assert_eq!(n.last_login, 42);
    }

    #[test]
    fn test_normalized_serializes_wire_names() {
        let driver = Driver::try_from(DriverDocument::from_json(&sample_json()).unwrap()).unwrap();
        let v = serde_json::to_value(driver.normalize_at(0)).unwrap();
        assert_eq!(v["_id"], "65536e1f2a");
        assert_eq!(v["account_status"], "Active");
        assert_eq!(v["face_embedding_url"], "[0.1, 0.2, 0.3]");
    }
}
