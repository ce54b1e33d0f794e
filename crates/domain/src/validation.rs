//! Request validation pipeline.
//!
//! Every mutating operation runs an ordered list of checks against the
//! request's `data` object before its terminal handler executes. The first
//! failing check ends the request; later checks and the handler never run.

use common::EntityId;
use serde_json::{Map, Value};

use crate::error::DomainError;

/// Largest integer a JSON client can represent exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// The `data` object of a request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Extracts the payload from a full request body (`{ "data": {...} }`).
    ///
    /// A missing, `null`, or non-object `data` yields an empty payload.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut fields) => fields
                .remove("data")
                .map(Self::from_data)
                .unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Wraps an already-unwrapped `data` value.
    pub fn from_data(data: Value) -> Self {
        match data {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    /// Returns the raw value of a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns a required text field.
    pub(crate) fn text(&self, entity: &str, field: &str) -> Result<String, DomainError> {
        match self.get(field) {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            Some(Value::String(_)) | Some(Value::Null) | None => Err(DomainError::validation(
                format!("{entity} must include a {field}"),
            )),
            Some(_) => Err(DomainError::validation(format!(
                "{entity} {field} must be a string"
            ))),
        }
    }

    /// Returns the payload `id` when it is set and differs from `route_id`.
    ///
    /// Unset means absent or falsy (`null`, `""`, `0`, `false`).
    pub(crate) fn conflicting_id(&self, route_id: &EntityId) -> Option<String> {
        match self.get("id")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() || route_id == s.as_str() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A single precondition over a request payload.
pub trait Check: Send + Sync {
    /// Short name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Passes with `Ok(())` or ends the request with an error.
    fn check(&self, payload: &Payload) -> Result<(), DomainError>;
}

/// An ordered, fail-fast chain of checks.
#[derive(Default)]
pub struct Pipeline {
    checks: Vec<Box<dyn Check>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a check.
    pub fn then(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Appends a [`RequiredField`] check.
    pub fn require(self, entity: &'static str, field: &'static str) -> Self {
        self.then(RequiredField::new(entity, field))
    }

    /// Returns the check names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Runs the checks in order, returning the first failure.
    pub fn run(&self, payload: &Payload) -> Result<(), DomainError> {
        for check in &self.checks {
            if let Err(err) = check.check(payload) {
                tracing::debug!(check = check.name(), error = %err, "request rejected");
                metrics::counter!("validation_rejections_total", "check" => check.name())
                    .increment(1);
                return Err(err);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("checks", &self.names())
            .finish()
    }
}

/// Requires a field to be a non-empty string or a non-empty array.
#[derive(Debug, Clone, Copy)]
pub struct RequiredField {
    entity: &'static str,
    field: &'static str,
}

impl RequiredField {
    pub fn new(entity: &'static str, field: &'static str) -> Self {
        Self { entity, field }
    }
}

impl Check for RequiredField {
    fn name(&self) -> &'static str {
        self.field
    }

    fn check(&self, payload: &Payload) -> Result<(), DomainError> {
        let present = match payload.get(self.field) {
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            _ => false,
        };
        if present {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "{} must include a {}",
                self.entity, self.field
            )))
        }
    }
}

/// Returns the value as an integer >= 1.
///
/// Integral floats such as `2.0` count as integers.
pub(crate) fn positive_integer(value: &Value) -> Option<u64> {
    let number = value.as_number()?;
    if let Some(n) = number.as_u64() {
        return (n >= 1).then_some(n);
    }
    let f = number.as_f64()?;
    (f >= 1.0 && f.fract() == 0.0 && f <= MAX_SAFE_INTEGER).then_some(f as u64)
}
