use rampart_core::{DomainError, Failure};
use serde_json::Value;

/// Split a JSON document into failures
///
/// An array yields one failure per element; any other value is a single
/// failure.
pub fn failures(document: Value) -> Vec<Failure<String>> {
    match document {
        Value::Array(items) => items.into_iter().map(failure).collect(),
        other => vec![failure(other)],
    }
}

/// Objects with string `code` and `message` members are domain errors,
/// with optional `meta` object and `operational` flag. Anything else is
/// an arbitrary value.
fn failure(value: Value) -> Failure<String> {
    let Value::Object(mut object) = value else {
        return Failure::Value(value);
    };

    let (Some(Value::String(code)), Some(Value::String(message))) = (object.get("code"), object.get("message")) else {
        return Failure::Value(Value::Object(object));
    };

    let mut err = DomainError::new(code.clone(), message.clone());

    if let Some(Value::Object(meta)) = object.remove("meta") {
        err = err.with_meta(meta);
    }

    if object.get("operational").and_then(Value::as_bool) == Some(false) {
        err = err.non_operational();
    }

    Failure::Domain(err)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn object_with_code_and_message_is_a_domain_error() {
        let input = json!({
            "code": "VAL_ERR",
            "message": "Bad email",
            "meta": { "field": "email" },
            "operational": false
        });

        let [Failure::Domain(err)]: [Failure<String>; 1] = failures(input).try_into().unwrap() else {
            panic!("expected one domain error");
        };
        assert_eq!(err.code(), "VAL_ERR");
        assert_eq!(err.message(), "Bad email");
        assert_eq!(err.meta().unwrap()["field"], "email");
        assert!(!err.is_operational());
    }

    #[test]
    fn other_values_stay_values() {
        let parsed = failures(json!(["boom", { "code": 7, "message": "x" }, { "reason": "?" }, 42]));
        assert_eq!(parsed.len(), 4);
        assert!(parsed.iter().all(|f| matches!(f, Failure::Value(_))));
    }

    #[test]
    fn non_object_meta_is_ignored() {
        let parsed: [Failure<String>; 1] = failures(json!({ "code": "A", "message": "m", "meta": [1] })).try_into().unwrap();
        let [Failure::Domain(err)] = parsed else {
            panic!("expected one domain error");
        };
        assert!(err.meta().is_none());
        assert!(err.is_operational());
    }
}
