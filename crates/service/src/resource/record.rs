use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Caller-supplied top-level fields of a record or singleton.
pub type Fields = Map<String, Value>;

pub const ID: &str = "id";
pub const CREATED_AT: &str = "created_at";

pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time as RFC 3339 with millisecond precision.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Add a fresh `id` and `created_at` to `fields`; generated values win.
pub fn stamp(mut fields: Fields) -> Fields {
    fields.insert(ID.into(), Value::String(new_record_id()));
    fields.insert(CREATED_AT.into(), Value::String(timestamp_now()));
    fields
}

/// Overwrite top-level keys of `target` with those of `patch`.
pub fn shallow_merge(target: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}

/// Whether `record` carries the given id. Numeric ids written by older tools
/// are compared by their decimal form.
pub fn has_id(record: &Value, id: &str) -> bool {
    match record.get(ID) {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: Value) -> Fields {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn stamp_overrides_supplied_id() {
        let rec = stamp(fields(json!({"id": "mine", "title": "Hello"})));
        assert_ne!(rec[ID], "mine");
        assert_eq!(rec["title"], "Hello");
        let created = rec[CREATED_AT].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(created).is_ok());
    }

    #[test]
    fn ids_are_unique() {
        let a = stamp(Fields::new());
        let b = stamp(Fields::new());
        assert_ne!(a[ID], b[ID]);
    }

    #[test]
    fn merge_is_shallow() {
        let mut target = fields(json!({"a": 1, "nested": {"x": 1, "y": 2}}));
        shallow_merge(&mut target, fields(json!({"b": 2, "nested": {"x": 9}})));
        assert_eq!(Value::Object(target), json!({"a": 1, "b": 2, "nested": {"x": 9}}));
    }

    #[test]
    fn has_id_matches_strings_and_numbers() {
        assert!(has_id(&json!({"id": "17"}), "17"));
        assert!(has_id(&json!({"id": 17}), "17"));
        assert!(!has_id(&json!({"id": "18"}), "17"));
        assert!(!has_id(&json!({"title": "no id"}), "17"));
    }
}
