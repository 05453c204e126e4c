//! Helpers for JSON values that may hold "one or many" items.

use serde_json::Value;

/// Call `f` for every item of an optional-array value, in order.
///
/// - `null` yields nothing;
/// - an array yields each element, `null` elements included;
/// - any other value yields itself once.
pub fn for_each_item(value: Value, mut f: impl FnMut(Value)) {
    match value {
        Value::Null => {}
        Value::Array(items) => items.into_iter().for_each(f),
        other => f(other),
    }
}

/// Number of items [`for_each_item`] would yield for `value`.
#[must_use]
pub fn item_count(value: &Value) -> usize {
    match value {
        Value::Null => 0,
        Value::Array(items) => items.len(),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn collect(value: Value) -> Vec<Value> {
        let mut seen = Vec::new();
        for_each_item(value, |item| seen.push(item));
        seen
    }

    #[test]
    fn should_yield_nothing_when_value_is_null() {
        assert!(collect(Value::Null).is_empty());
        assert_eq!(item_count(&Value::Null), 0);
    }

    #[test]
    fn should_yield_elements_in_order_when_value_is_array() {
        let seen = collect(json!([1, "two", {"three": 3}]));
        assert_eq!(seen, vec![json!(1), json!("two"), json!({"three": 3})]);
    }

    #[test]
    fn should_pass_null_elements_through() {
        let seen = collect(json!([null, {"uid": "a"}]));
        assert_eq!(seen, vec![Value::Null, json!({"uid": "a"})]);
    }

    #[test]
    fn should_yield_single_object_once() {
        let seen = collect(json!({"uid": "solo"}));
        assert_eq!(seen, vec![json!({"uid": "solo"})]);
        assert_eq!(item_count(&json!({"uid": "solo"})), 1);
    }

    #[test]
    fn should_yield_nothing_for_empty_array() {
        assert!(collect(json!([])).is_empty());
    }
}
