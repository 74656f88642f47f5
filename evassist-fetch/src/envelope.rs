//! Response envelope normalization.
//!
//! The backend sometimes wraps payloads as `{"data": {...}}` and sometimes
//! returns them bare. Endpoint clients call [`unwrap_data`] once, before
//! decoding, and never look for the wrapper again.

use serde_json::Value;

/// Returns the object under `data` if there is one, else `value` unchanged.
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwraps_object_data() {
        let wrapped = json!({"data": {"mechanics": [], "page": 2}, "status": "ok"});
        assert_eq!(unwrap_data(wrapped), json!({"mechanics": [], "page": 2}));
    }

    #[test]
    fn test_bare_payload_unchanged() {
        let bare = json!({"mechanics": [{"id": 1}], "page": 1});
        assert_eq!(unwrap_data(bare.clone()), bare);
    }

    #[test]
    fn test_non_object_data_unchanged() {
        let list = json!({"data": [1, 2, 3]});
        assert_eq!(unwrap_data(list.clone()), list);

        let null = json!({"data": null, "page": 1});
        assert_eq!(unwrap_data(null.clone()), null);
    }

    #[test]
    fn test_non_object_root_unchanged() {
        assert_eq!(unwrap_data(json!([1, 2])), json!([1, 2]));
        assert_eq!(unwrap_data(json!("text")), json!("text"));
    }

    #[test]
    fn test_unwraps_one_level_only() {
        let nested = json!({"data": {"data": {"page": 3}}});
        assert_eq!(unwrap_data(nested), json!({"data": {"page": 3}}));
    }
}
