//! Request schemas for the item endpoints.
//!
//! Rules run against the raw JSON body so that a missing field, a field of
//! the wrong type and a field violating a constraint each get their own
//! message. Every field is evaluated; violations are reported in rule order,
//! at most one per field.

use axum_helpers::{FieldViolation, ValidatePayload};
use serde_json::{Map, Value};

use crate::models::{CreateItem, UpdateItem};

pub const NAME_REQUIRED: &str = r#"Field "name" is required"#;
pub const NAME_NOT_STRING: &str = r#"Field "name" must be a string"#;
pub const NAME_EMPTY: &str = r#"Field "name" is not allowed to be empty"#;
pub const PRICE_REQUIRED: &str = r#"Field "price" is required"#;
pub const PRICE_NOT_NUMBER: &str = r#"Field "price" must be a number"#;
pub const PRICE_NEGATIVE: &str = r#"Field "price" cannot be negative"#;
pub const ALL_FIELDS_REQUIRED: &str = r#"All fields ("name" and "price") must be provided"#;
pub const AT_LEAST_ONE_FIELD: &str = r#"At least one field ("name" or "price") must be provided"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    None,
    NonEmpty,
    NonNegative,
    Positive,
}

impl Constraint {
    fn holds(self, value: &Value) -> bool {
        match self {
            Constraint::None => true,
            Constraint::NonEmpty => value.as_str().is_some_and(|s| !s.is_empty()),
            Constraint::NonNegative => value.as_f64().is_some_and(|n| n >= 0.0),
            Constraint::Positive => value.as_f64().is_some_and(|n| n > 0.0),
        }
    }
}

/// One field of a schema and the message for each way it can fail.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub constraint: Constraint,
    pub missing: &'static str,
    pub wrong_type: &'static str,
    pub invalid: &'static str,
}

impl FieldRule {
    fn check(&self, body: &Map<String, Value>) -> Option<FieldViolation> {
        let message = match body.get(self.field) {
            None if self.required => self.missing,
            None => return None,
            Some(value) if !self.kind_matches(value) => self.wrong_type,
            Some(value) if !self.constraint.holds(value) => self.invalid,
            Some(_) => return None,
        };
        Some(FieldViolation::new(self.field, message))
    }

    fn kind_matches(&self, value: &Value) -> bool {
        match self.kind {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
        }
    }
}

/// An object schema: field rules plus the body-level rules.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub rules: &'static [FieldRule],
    /// Message when the body is not a JSON object.
    pub not_an_object: &'static str,
    /// When set, at least one declared field must be present.
    pub at_least_one: Option<&'static str>,
}

impl Schema {
    /// Evaluate every rule and hand back the object on success.
    pub fn evaluate<'a>(&self, payload: &'a Value) -> Result<&'a Map<String, Value>, Vec<FieldViolation>> {
        let Some(body) = payload.as_object() else {
            return Err(vec![FieldViolation::new("", self.not_an_object)]);
        };

        let mut errors: Vec<FieldViolation> =
            self.rules.iter().filter_map(|rule| rule.check(body)).collect();

        errors.extend(
            body.keys()
                .filter(|key| !self.rules.iter().any(|rule| rule.field == key.as_str()))
                .map(|key| FieldViolation::new(key.as_str(), format!(r#"Field "{key}" is not allowed"#))),
        );

        if let Some(message) = self.at_least_one {
            if !self.rules.iter().any(|rule| body.contains_key(rule.field)) {
                errors.push(FieldViolation::new("", message));
            }
        }

        if errors.is_empty() {
            Ok(body)
        } else {
            Err(errors)
        }
    }
}

pub const CREATE_ITEM_SCHEMA: Schema = Schema {
    rules: &[
        FieldRule {
            field: "name",
            kind: FieldKind::String,
            required: true,
            constraint: Constraint::NonEmpty,
            missing: NAME_REQUIRED,
            wrong_type: NAME_NOT_STRING,
            invalid: NAME_REQUIRED,
        },
        FieldRule {
            field: "price",
            kind: FieldKind::Number,
            required: true,
            constraint: Constraint::NonNegative,
            missing: PRICE_REQUIRED,
            wrong_type: PRICE_NOT_NUMBER,
            invalid: PRICE_NEGATIVE,
        },
    ],
    not_an_object: ALL_FIELDS_REQUIRED,
    at_least_one: None,
};

pub const UPDATE_ITEM_SCHEMA: Schema = Schema {
    rules: &[
        FieldRule {
            field: "name",
            kind: FieldKind::String,
            required: false,
            constraint: Constraint::NonEmpty,
            missing: NAME_REQUIRED,
            wrong_type: NAME_NOT_STRING,
            invalid: NAME_EMPTY,
        },
        FieldRule {
            field: "price",
            kind: FieldKind::Number,
            required: false,
            // zero is accepted on create but not here
            constraint: Constraint::Positive,
            missing: PRICE_REQUIRED,
            wrong_type: PRICE_NOT_NUMBER,
            invalid: PRICE_NEGATIVE,
        },
    ],
    not_an_object: AT_LEAST_ONE_FIELD,
    at_least_one: Some(AT_LEAST_ONE_FIELD),
};

fn string_field(body: &Map<String, Value>, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_owned)
}

fn number_field(body: &Map<String, Value>, field: &str) -> Option<f64> {
    body.get(field).and_then(Value::as_f64)
}

impl ValidatePayload for CreateItem {
    fn validate_payload(payload: &Value) -> Result<Self, Vec<FieldViolation>> {
        let body = CREATE_ITEM_SCHEMA.evaluate(payload)?;
        match (string_field(body, "name"), number_field(body, "price")) {
            (Some(name), Some(price)) => Ok(CreateItem { name, price }),
            // evaluate() only succeeds when both are present and typed
            _ => Err(vec![FieldViolation::new("", ALL_FIELDS_REQUIRED)]),
        }
    }
}

impl ValidatePayload for UpdateItem {
    fn validate_payload(payload: &Value) -> Result<Self, Vec<FieldViolation>> {
        let body = UPDATE_ITEM_SCHEMA.evaluate(payload)?;
        Ok(UpdateItem {
            name: string_field(body, "name"),
            price: number_field(body, "price"),
        })
    }
}
