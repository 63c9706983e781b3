//! Field contracts over raw JSON payloads.
//!
//! Validation works on [`serde_json::Value`] rather than typed DTOs so the
//! contract can distinguish "missing" from "present with the wrong type" and
//! report both in the caller's words. Each field checks presence, then type,
//! then its constraints in declared order; the first failure wins, so a
//! field never contributes more than one message.

use serde_json::{Map, Value};
use thiserror::Error;

// ───────────────────────────── Violations ─────────────────────────────

/// Ordered, human-readable violation messages for one payload.
///
/// Order is the schema's field declaration order, never the payload's key
/// order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("validation failed: {}", .messages.join("; "))]
pub struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

// ───────────────────────────── Field rules ─────────────────────────────

/// JSON type a field's value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
}

impl FieldType {
    fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
        }
    }
}

/// A single rule applied to a present, correctly-typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    MinLen(usize),
    MaxLen(usize),
    Alphanumeric,
    Email,
    Positive,
}

impl Constraint {
    /// The violation message for `label`, or `None` when the rule holds.
    ///
    /// Rules that do not apply to the value's type (a length bound on a
    /// number, say) hold vacuously; the type rule has already run by the
    /// time constraints are checked.
    fn check(&self, label: &str, value: &Value) -> Option<String> {
        match self {
            Constraint::MinLen(min) => {
                let text = value.as_str()?;
                (text.chars().count() < *min)
                    .then(|| format!("{label} must be {min} or more characters long"))
            }
            Constraint::MaxLen(max) => {
                let text = value.as_str()?;
                (text.chars().count() > *max)
                    .then(|| format!("{label} must be {max} or fewer characters long"))
            }
            Constraint::Alphanumeric => {
                let text = value.as_str()?;
                let holds = !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric());
                (!holds).then(|| format!("{label} must be alphanumeric"))
            }
            Constraint::Email => {
                let text = value.as_str()?;
                (!looks_like_email(text)).then(|| "Invalid email".to_string())
            }
            Constraint::Positive => {
                let number = value.as_f64()?;
                (number <= 0.0).then(|| format!("{label} must be positive"))
            }
        }
    }
}

/// One field of a schema: key, expected type, and its rule chain.
#[derive(Debug, Clone)]
pub struct Field {
    key: &'static str,
    label: String,
    ty: FieldType,
    required: bool,
    constraints: Vec<Constraint>,
}

impl Field {
    /// A required string field named `key`.
    pub fn string(key: &'static str) -> Self {
        Self::new(key, FieldType::String)
    }

    /// A required number field named `key`.
    pub fn number(key: &'static str) -> Self {
        Self::new(key, FieldType::Number)
    }

    fn new(key: &'static str, ty: FieldType) -> Self {
        Self {
            key,
            label: capitalize(key),
            ty,
            required: true,
            constraints: Vec::new(),
        }
    }

    /// Mark the field optional: absent is fine, present must still conform.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn min_len(self, min: usize) -> Self {
        self.constraint(Constraint::MinLen(min))
    }

    pub fn max_len(self, max: usize) -> Self {
        self.constraint(Constraint::MaxLen(max))
    }

    pub fn alphanumeric(self) -> Self {
        self.constraint(Constraint::Alphanumeric)
    }

    pub fn email(self) -> Self {
        self.constraint(Constraint::Email)
    }

    pub fn positive(self) -> Self {
        self.constraint(Constraint::Positive)
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// First violated rule for this field, if any.
    fn check(&self, payload: Option<&Map<String, Value>>) -> Option<String> {
        let value = payload.and_then(|map| map.get(self.key));
        let Some(value) = value else {
            return self.required.then(|| format!("{} is required", self.label));
        };
        if !self.ty.matches(value) {
            return Some(format!("{} must be a {}", self.label, self.ty.name()));
        }
        self.constraints
            .iter()
            .find_map(|constraint| constraint.check(&self.label, value))
    }
}

// ───────────────────────────── Schema ─────────────────────────────

/// An ordered field contract for one request payload.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Validate `payload` against the contract.
    ///
    /// Walks the fields in declaration order and collects every violation,
    /// one message per failing field. Unknown payload keys are ignored. A
    /// non-object payload is treated as carrying no fields at all, so every
    /// required field reports as missing.
    pub fn validate(&self, payload: &Value) -> Result<(), Violations> {
        let object = payload.as_object();
        let messages: Vec<String> = self
            .fields
            .iter()
            .filter_map(|field| field.check(object))
            .collect();
        if messages.is_empty() {
            Ok(())
        } else {
            Err(Violations { messages })
        }
    }
}

/// Message label for a key: first character upper-cased, rest untouched.
fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Light shape check: one `@`, non-empty local part, dotted domain with a
/// plausible TLD, no whitespace. Not an RFC 5322 validator.
fn looks_like_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && !host.starts_with('.')
        && !host.ends_with('.')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account_schema() -> Schema {
        Schema::new(vec![
            Field::string("username").min_len(3).max_len(30).alphanumeric(),
            Field::string("password").min_len(6).max_len(200),
            Field::string("email").email(),
        ])
    }

    fn listing_schema() -> Schema {
        Schema::new(vec![
            Field::string("title").max_len(100),
            Field::number("price").positive(),
            Field::string("description"),
        ])
    }

    #[test]
    fn empty_payload_reports_every_required_field_in_declaration_order() {
        let err = account_schema().validate(&json!({})).unwrap_err();
        assert_eq!(
            err.messages(),
            [
                "Username is required",
                "Password is required",
                "Email is required"
            ]
        );
    }

    #[test]
    fn message_order_ignores_payload_key_order() {
        let payload = json!({ "email": 5, "username": 7 });
        let err = account_schema().validate(&payload).unwrap_err();
        assert_eq!(
            err.messages(),
            [
                "Username must be a string",
                "Password is required",
                "Email must be a string"
            ]
        );
    }

    #[test]
    fn first_failing_rule_wins_per_field() {
        let payload = json!({ "username": "a!", "password": "secret1", "email": "a@example.com" });
        let err = account_schema().validate(&payload).unwrap_err();
        assert_eq!(err.messages(), ["Username must be 3 or more characters long"]);

        let payload = json!({ "username": "ab!", "password": "secret1", "email": "a@example.com" });
        let err = account_schema().validate(&payload).unwrap_err();
        assert_eq!(err.messages(), ["Username must be alphanumeric"]);
    }

    #[test]
    fn wrong_type_is_reported_before_constraints() {
        let payload = json!({ "title": 123, "price": 10, "description": "d" });
        let err = listing_schema().validate(&payload).unwrap_err();
        assert_eq!(err.messages(), ["Title must be a string"]);
    }

    #[test]
    fn null_counts_as_the_wrong_type_not_as_missing() {
        let payload = json!({ "title": null, "price": 10, "description": "d" });
        let err = listing_schema().validate(&payload).unwrap_err();
        assert_eq!(err.messages(), ["Title must be a string"]);
    }

    #[test]
    fn numeric_strings_do_not_satisfy_number_fields() {
        let payload = json!({ "title": "t", "price": "1300", "description": "d" });
        let err = listing_schema().validate(&payload).unwrap_err();
        assert_eq!(err.messages(), ["Price must be a number"]);
    }

    #[test]
    fn zero_and_negative_prices_are_rejected() {
        for price in [json!(0), json!(-1), json!(-0.01)] {
            let payload = json!({ "title": "t", "price": price, "description": "d" });
            let err = listing_schema().validate(&payload).unwrap_err();
            assert_eq!(err.messages(), ["Price must be positive"]);
        }
    }

    #[test]
    fn fractional_prices_are_accepted() {
        let payload = json!({ "title": "t", "price": 0.5, "description": "d" });
        assert!(listing_schema().validate(&payload).is_ok());
    }

    #[test]
    fn email_violations_use_the_fixed_message_without_a_label() {
        let payload = json!({ "username": "user1", "password": "secret1", "email": "not-an-email" });
        let err = account_schema().validate(&payload).unwrap_err();
        assert_eq!(err.messages(), ["Invalid email"]);
    }

    #[test]
    fn email_shape_check_covers_the_obvious_cases() {
        for ok in ["user@example.com", "a.b@sub.domain.org", "x+tag@host.io"] {
            assert!(looks_like_email(ok), "{ok} should pass");
        }
        for bad in [
            "invalid-email",
            "@example.com",
            "user@",
            "user@host",
            "user@host.",
            "user@.com",
            "two@@host.com",
            "spaced user@host.com",
            "user@host.c",
        ] {
            assert!(!looks_like_email(bad), "{bad} should fail");
        }
    }

    #[test]
    fn overlong_values_report_the_upper_bound() {
        let payload = json!({
            "title": "x".repeat(101),
            "price": 10,
            "description": "d"
        });
        let err = listing_schema().validate(&payload).unwrap_err();
        assert_eq!(err.messages(), ["Title must be 100 or fewer characters long"]);
    }

    #[test]
    fn length_rules_count_characters_not_bytes() {
        let schema = Schema::new(vec![Field::string("title").max_len(3)]);
        let payload = json!({ "title": "äöü" });
        assert!(schema.validate(&payload).is_ok());
    }

    #[test]
    fn optional_fields_may_be_absent_but_must_conform_when_present() {
        let schema = Schema::new(vec![
            Field::string("title"),
            Field::string("note").optional().max_len(5),
        ]);
        assert!(schema.validate(&json!({ "title": "t" })).is_ok());

        let err = schema
            .validate(&json!({ "title": "t", "note": "too long" }))
            .unwrap_err();
        assert_eq!(err.messages(), ["Note must be 5 or fewer characters long"]);
    }

    #[test]
    fn alphanumeric_rejects_the_empty_string() {
        let schema = Schema::new(vec![Field::string("code").alphanumeric()]);
        let err = schema.validate(&json!({ "code": "" })).unwrap_err();
        assert_eq!(err.messages(), ["Code must be alphanumeric"]);
    }

    #[test]
    fn unknown_payload_keys_are_ignored() {
        let payload = json!({
            "username": "user1",
            "password": "secret1",
            "email": "user1@example.com",
            "role": "admin"
        });
        assert!(account_schema().validate(&payload).is_ok());
    }

    #[test]
    fn non_object_payloads_report_every_required_field() {
        for payload in [json!([]), json!("text"), json!(42), Value::Null] {
            let err = listing_schema().validate(&payload).unwrap_err();
            assert_eq!(
                err.messages(),
                [
                    "Title is required",
                    "Price is required",
                    "Description is required"
                ]
            );
        }
    }

    #[test]
    fn violations_display_joins_the_messages() {
        let err = listing_schema().validate(&json!({})).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.starts_with("validation failed: "));
        assert!(rendered.contains("Title is required"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn missing_fields_report_in_declaration_order(
                has_title in any::<bool>(),
                has_price in any::<bool>(),
                has_description in any::<bool>(),
            ) {
                let mut payload = serde_json::Map::new();
                if has_title {
                    payload.insert("title".into(), json!("t"));
                }
                if has_price {
                    payload.insert("price".into(), json!(10));
                }
                if has_description {
                    payload.insert("description".into(), json!("d"));
                }

                let expected: Vec<String> = [
                    (has_title, "Title is required"),
                    (has_price, "Price is required"),
                    (has_description, "Description is required"),
                ]
                .iter()
                .filter(|(present, _)| !present)
                .map(|(_, message)| (*message).to_string())
                .collect();

                match listing_schema().validate(&Value::Object(payload)) {
                    Ok(()) => prop_assert!(expected.is_empty()),
                    Err(violations) => prop_assert_eq!(violations.messages(), expected.as_slice()),
                }
            }

            #[test]
            fn well_formed_usernames_pass(name in "[a-zA-Z0-9]{3,30}") {
                let payload = json!({
                    "username": name,
                    "password": "secret1",
                    "email": "user@example.com"
                });
                prop_assert!(account_schema().validate(&payload).is_ok());
            }

            #[test]
            fn overlong_usernames_hit_the_upper_bound(name in "[a-z0-9]{31,64}") {
                let payload = json!({
                    "username": name,
                    "password": "secret1",
                    "email": "user@example.com"
                });
                let err = account_schema().validate(&payload).unwrap_err();
                prop_assert_eq!(
                    err.messages(),
                    ["Username must be 30 or fewer characters long"]
                );
            }

            #[test]
            fn positive_prices_pass(price in 0.01f64..1_000_000.0) {
                let payload = json!({ "title": "t", "price": price, "description": "d" });
                prop_assert!(listing_schema().validate(&payload).is_ok());
            }
        }
    }
}
