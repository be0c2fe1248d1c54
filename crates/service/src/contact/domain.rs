use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::Fields;

/// Stored in place of an omitted optional contact field.
pub const PLACEHOLDER: &str = "N/A";

/// Inquiry submitted through the contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: String,
}

fn or_placeholder(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER.to_string(),
    }
}

impl ContactInput {
    /// Record fields with `phone`/`company` defaulted to [`PLACEHOLDER`].
    pub fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::String(self.name));
        fields.insert("phone".into(), Value::String(or_placeholder(self.phone)));
        fields.insert("email".into(), Value::String(self.email));
        fields.insert("company".into(), Value::String(or_placeholder(self.company)));
        fields.insert("message".into(), Value::String(self.message));
        fields
    }
}
