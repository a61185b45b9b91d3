use serde_json::{Map, Value};

use super::entity::NewOrder;
use super::errors::ValidationError;
use super::value_objects::{Customer, LineItem};

// ============================================================================
// Order Submission Schema
// ============================================================================
//
// Two passes over the request body:
// 1. Presence: every required field must exist and be non-falsy
//    (not null, false, 0 or ""). All missing fields are reported together.
// 2. Shape: each field must have its declared JSON type, then the nested
//    records are decoded and checked.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Array,
    Object,
    Number,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
            FieldKind::Number => value.is_number(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            FieldKind::Array => "must be an array",
            FieldKind::Object => "must be an object",
            FieldKind::Number => "must be a number",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

pub const ORDER_SCHEMA: [FieldRule; 3] = [
    FieldRule { name: "items", required: true, kind: FieldKind::Array },
    FieldRule { name: "customer", required: true, kind: FieldKind::Object },
    FieldRule { name: "total", required: true, kind: FieldKind::Number },
];

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn check_schema(body: &Map<String, Value>) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = ORDER_SCHEMA
        .iter()
        .filter(|rule| rule.required)
        .filter(|rule| body.get(rule.name).map_or(true, is_falsy))
        .map(|rule| rule.name)
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    for rule in &ORDER_SCHEMA {
        if let Some(value) = body.get(rule.name) {
            if !rule.kind.matches(value) {
                return Err(ValidationError::invalid(rule.name, rule.kind.describe()));
            }
        }
    }

    Ok(())
}

fn parse_item(index: usize, raw: &Value) -> Result<LineItem, ValidationError> {
    let field = |name: &str| format!("items[{index}].{name}");

    let obj = raw
        .as_object()
        .ok_or_else(|| ValidationError::invalid(format!("items[{index}]"), "must be an object"))?;

    match obj.get("sku") {
        Some(Value::String(s)) if !s.trim().is_empty() => {}
        _ => return Err(ValidationError::invalid(field("sku"), "must be a non-empty string")),
    }

    match obj.get("qty").and_then(Value::as_u64) {
        Some(q) if q > 0 && q <= u64::from(u32::MAX) => {}
        _ => return Err(ValidationError::invalid(field("qty"), "must be a positive integer")),
    }

    serde_json::from_value(raw.clone())
        .map_err(|e| ValidationError::invalid(format!("items[{index}]"), e.to_string()))
}

fn parse_customer(raw: &Value) -> Result<Customer, ValidationError> {
    match raw.get("name") {
        Some(Value::String(s)) if !s.trim().is_empty() => {}
        _ => return Err(ValidationError::invalid("customer.name", "must be a non-empty string")),
    }

    // Omit `email` rather than sending null; a stored customer must echo
    // back exactly as submitted.
    match raw.get("email") {
        None | Some(Value::String(_)) => {}
        _ => return Err(ValidationError::invalid("customer.email", "must be a string")),
    }

    serde_json::from_value(raw.clone())
        .map_err(|e| ValidationError::invalid("customer", e.to_string()))
}

/// Validates a raw order submission and decodes it into a [`NewOrder`].
pub fn validate_submission(body: &Value) -> Result<NewOrder, ValidationError> {
    let obj = body.as_object().ok_or(ValidationError::NotAnObject)?;
    check_schema(obj)?;

    let raw_items = obj
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if raw_items.is_empty() {
        return Err(ValidationError::invalid("items", "must contain at least one item"));
    }
    let items = raw_items
        .iter()
        .enumerate()
        .map(|(i, raw)| parse_item(i, raw))
        .collect::<Result<Vec<_>, _>>()?;

    let customer = parse_customer(obj.get("customer").unwrap_or(&Value::Null))?;

    let total = obj.get("total").and_then(Value::as_f64).unwrap_or_default();
    if !total.is_finite() || total <= 0.0 {
        return Err(ValidationError::invalid("total", "must be greater than zero"));
    }

    Ok(NewOrder { items, customer, total })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "items": [{"sku": "A1", "qty": 2}],
            "customer": {"name": "Jo"},
            "total": 19.99
        })
    }

    #[test]
    fn test_valid_submission() {
        let order = validate_submission(&valid_body()).unwrap();

        assert_eq!(order.items, vec![LineItem::new("A1", 2)]);
        assert_eq!(order.customer, Customer::new("Jo"));
        assert_eq!(order.total, 19.99);
    }

    #[test]
    fn test_missing_total_is_reported() {
        let body = json!({"items": [], "customer": {"name": "Jo"}});
        let err = validate_submission(&body).unwrap_err();

        assert_eq!(err, ValidationError::MissingFields(vec!["total"]));
    }

    #[test]
    fn test_all_missing_fields_are_reported_together() {
        let err = validate_submission(&json!({})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["items", "customer", "total"])
        );
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        for (field, falsy) in [
            ("total", json!(0)),
            ("total", json!(null)),
            ("customer", json!("")),
            ("items", json!(false)),
        ] {
            let mut body = valid_body();
            body[field] = falsy;
            let err = validate_submission(&body).unwrap_err();
            assert_eq!(err, ValidationError::MissingFields(vec![field]), "field {field}");
        }
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let mut body = valid_body();
        body["total"] = json!("19.99");
        let err = validate_submission(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["total".to_string()]);

        let mut body = valid_body();
        body["items"] = json!({"sku": "A1"});
        let err = validate_submission(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["items".to_string()]);
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut body = valid_body();
        body["items"] = json!([]);
        let err = validate_submission(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["items".to_string()]);
    }

    #[test]
    fn test_item_shape_is_checked() {
        let mut body = valid_body();
        body["items"] = json!([{"sku": "A1", "qty": 1}, {"sku": "", "qty": 1}]);
        let err = validate_submission(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["items[1].sku".to_string()]);

        let mut body = valid_body();
        body["items"] = json!([{"sku": "A1", "qty": 0}]);
        let err = validate_submission(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["items[0].qty".to_string()]);
    }

    #[test]
    fn test_customer_requires_name() {
        let mut body = valid_body();
        body["customer"] = json!({"email": "jo@example.com"});
        let err = validate_submission(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["customer.name".to_string()]);
    }

    #[test]
    fn test_customer_email_must_be_string_when_present() {
        for email in [json!(null), json!(42), json!({"addr": "jo@example.com"})] {
            let mut body = valid_body();
            body["customer"]["email"] = email.clone();
            let err = validate_submission(&body).unwrap_err();
            assert_eq!(err.fields(), vec!["customer.email".to_string()], "email {email}");
        }
    }

    #[test]
    fn test_accepted_customer_round_trips_unchanged() {
        for customer in [
            json!({"name": "Jo"}),
            json!({"name": "Jo", "email": "jo@example.com"}),
            json!({"name": "Jo", "email": "", "tier": null}),
        ] {
            let mut body = valid_body();
            body["customer"] = customer.clone();
            let order = validate_submission(&body).unwrap();
            assert_eq!(serde_json::to_value(&order.customer).unwrap(), customer);
        }
    }

    #[test]
    fn test_negative_total_rejected() {
        let mut body = valid_body();
        body["total"] = json!(-5.0);
        let err = validate_submission(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["total".to_string()]);
    }

    #[test]
    fn test_non_object_body() {
        assert_eq!(
            validate_submission(&json!([1, 2])).unwrap_err(),
            ValidationError::NotAnObject
        );
    }

    #[test]
    fn test_extra_attributes_survive_validation() {
        let mut body = valid_body();
        body["items"][0]["price"] = json!(9.995);
        body["customer"]["phone"] = json!("555-0100");

        let order = validate_submission(&body).unwrap();
        assert_eq!(order.items[0].extra.get("price"), Some(&json!(9.995)));
        assert_eq!(order.customer.extra.get("phone"), Some(&json!("555-0100")));
    }
}
