//! Body path expressions
//!
//! A small selector language for navigating parsed JSON bodies:
//!
//! - dotted field access: `MRData.CircuitTable.Circuits`
//! - numeric indexing: `Circuits[1]`, `Location[0].country`
//! - implicit projection: accessing a field on an array yields that field
//!   from every element (`Circuits.circuitId` is the sequence of all ids).
//!
//! Evaluation keeps "the path did not resolve" (missing field, index out of
//! range) separate from every other failure so callers can report missing
//! and mismatching values differently.

use serde_json::Value;
use thiserror::Error;

use crate::error::{DomainError, DomainResult};

/// A single step in a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Access a named field (projects over arrays).
    Field(String),
    /// Index into a sequence.
    Index(usize),
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(name) => write!(f, "{name}"),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Error produced when a path expression does not resolve against a body.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// The expression walked off the document: a field was absent, an index
    /// was out of range, or a scalar was reached too early.
    #[error("path '{path}' did not resolve at '{segment}': {reason}")]
    Missing {
        /// The full expression being evaluated.
        path: String,
        /// The segment that failed to resolve.
        segment: String,
        /// Why the segment failed.
        reason: String,
    },
}

/// A parsed body path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    source: String,
    segments: Vec<PathSegment>,
}

impl PathExpr {
    /// Parses a path expression.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPathExpression`] if the expression is
    /// empty, has an empty segment, or has malformed index brackets.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidPathExpression(
                "expression is empty".to_string(),
            ));
        }

        let mut segments = Vec::new();
        for piece in trimmed.split('.') {
            if piece.is_empty() {
                return Err(DomainError::InvalidPathExpression(format!(
                    "empty segment in '{trimmed}'"
                )));
            }
            parse_segment(piece, &mut segments)?;
        }

        Ok(Self {
            source: trimmed.to_string(),
            segments,
        })
    }

    /// Returns the original expression text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Evaluates the expression against a parsed body.
    ///
    /// Field access on an array projects: the result is the array of that
    /// field across every element, skipping elements that lack it. A
    /// projection over a non-empty array where no element carries the field
    /// counts as missing.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Missing`] when the expression does not resolve.
    pub fn evaluate(&self, root: &Value) -> Result<Value, PathError> {
        let mut current = root.clone();

        for segment in &self.segments {
            current = match segment {
                PathSegment::Field(name) => self.access_field(current, name)?,
                PathSegment::Index(index) => self.access_index(current, *index)?,
            };
        }

        Ok(current)
    }

    fn access_field(&self, current: Value, name: &str) -> Result<Value, PathError> {
        match current {
            Value::Object(map) => map
                .get(name)
                .cloned()
                .ok_or_else(|| self.missing(name, "no such field")),
            Value::Array(items) => {
                let projected: Vec<Value> = items
                    .iter()
                    .filter_map(|element| element.get(name).cloned())
                    .collect();
                if projected.is_empty() && !items.is_empty() {
                    return Err(self.missing(name, "no element carries this field"));
                }
                Ok(Value::Array(projected))
            }
            other => Err(self.missing(
                name,
                &format!("cannot access a field on {}", value_kind(&other)),
            )),
        }
    }

    fn access_index(&self, current: Value, index: usize) -> Result<Value, PathError> {
        match current {
            Value::Array(items) => {
                let len = items.len();
                items.into_iter().nth(index).ok_or_else(|| {
                    self.missing(
                        &format!("[{index}]"),
                        &format!("index out of range (length {len})"),
                    )
                })
            }
            other => Err(self.missing(
                &format!("[{index}]"),
                &format!("cannot index into {}", value_kind(&other)),
            )),
        }
    }

    fn missing(&self, segment: &str, reason: &str) -> PathError {
        PathError::Missing {
            path: self.source.clone(),
            segment: segment.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for PathExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::str::FromStr for PathExpr {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::parse(s)
    }
}

/// Parses one dotted piece (`name`, `name[0]`, `name[0][1]`, `[0]`) into
/// segments.
fn parse_segment(piece: &str, segments: &mut Vec<PathSegment>) -> DomainResult<()> {
    let bracket_start = piece.find('[').unwrap_or(piece.len());
    let (name, mut rest) = piece.split_at(bracket_start);

    if name.is_empty() && rest.is_empty() {
        return Err(DomainError::InvalidPathExpression(format!(
            "empty segment '{piece}'"
        )));
    }

    if !name.is_empty() {
        segments.push(PathSegment::Field(name.to_string()));
    }

    while !rest.is_empty() {
        let Some(stripped) = rest.strip_prefix('[') else {
            return Err(DomainError::InvalidPathExpression(format!(
                "unexpected text after index in '{piece}'"
            )));
        };
        let Some(close) = stripped.find(']') else {
            return Err(DomainError::InvalidPathExpression(format!(
                "unclosed '[' in '{piece}'"
            )));
        };
        let index: usize = stripped[..close].parse().map_err(|_| {
            DomainError::InvalidPathExpression(format!(
                "index '{}' is not a number in '{piece}'",
                &stripped[..close]
            ))
        })?;
        segments.push(PathSegment::Index(index));
        rest = &stripped[close + 1..];
    }

    Ok(())
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn circuits() -> Value {
        json!({
            "MRData": {
                "CircuitTable": {
                    "Circuits": [
                        {"circuitId": "albert_park", "Location": {"country": "Australia"}},
                        {"circuitId": "americas", "Location": {"country": "USA", "lat": "30.1328"}},
                        {"circuitId": "bahrain", "Location": {"country": "Bahrain"}}
                    ]
                }
            }
        })
    }

    #[test]
    fn test_parse_dotted_fields() {
        let expr = PathExpr::parse("MRData.CircuitTable.Circuits").unwrap();
        assert_eq!(expr.segments().len(), 3);
        assert_eq!(expr.to_string(), "MRData.CircuitTable.Circuits");
    }

    #[test]
    fn test_parse_indexes() {
        let expr = PathExpr::parse("Circuits[1].Location[0]").unwrap();
        assert_eq!(
            expr.segments(),
            &[
                PathSegment::Field("Circuits".to_string()),
                PathSegment::Index(1),
                PathSegment::Field("Location".to_string()),
                PathSegment::Index(0),
            ]
        );
    }

    #[test]
    fn test_parse_bare_index_segment() {
        let expr = PathExpr::parse("Circuits.[0]").unwrap();
        assert_eq!(
            expr.segments(),
            &[
                PathSegment::Field("Circuits".to_string()),
                PathSegment::Index(0),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(PathExpr::parse("").is_err());
        assert!(PathExpr::parse("a..b").is_err());
        assert!(PathExpr::parse("a[x]").is_err());
        assert!(PathExpr::parse("a[1").is_err());
        assert!(PathExpr::parse("a[1]b").is_err());
    }

    #[test]
    fn test_evaluate_field_access() {
        let expr = PathExpr::parse("MRData.CircuitTable.Circuits").unwrap();
        let value = expr.evaluate(&circuits()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_evaluate_projection_over_array() {
        let expr = PathExpr::parse("MRData.CircuitTable.Circuits.circuitId").unwrap();
        let value = expr.evaluate(&circuits()).unwrap();
        assert_eq!(value, json!(["albert_park", "americas", "bahrain"]));
    }

    #[test]
    fn test_evaluate_projection_then_index() {
        let expr = PathExpr::parse("MRData.CircuitTable.Circuits.circuitId[1]").unwrap();
        assert_eq!(expr.evaluate(&circuits()).unwrap(), json!("americas"));
    }

    #[test]
    fn test_evaluate_projection_into_nested_object() {
        let expr = PathExpr::parse("MRData.CircuitTable.Circuits.Location[1].country").unwrap();
        assert_eq!(expr.evaluate(&circuits()).unwrap(), json!("USA"));
    }

    #[test]
    fn test_evaluate_missing_field() {
        let expr = PathExpr::parse("MRData.DriverTable").unwrap();
        let err = expr.evaluate(&circuits()).unwrap_err();
        assert!(matches!(err, PathError::Missing { .. }));
    }

    #[test]
    fn test_evaluate_index_out_of_range() {
        let expr = PathExpr::parse("MRData.CircuitTable.Circuits[9]").unwrap();
        let err = expr.evaluate(&circuits()).unwrap_err();
        let PathError::Missing { reason, .. } = err;
        assert!(reason.contains("out of range"));
    }

    #[test]
    fn test_evaluate_field_on_scalar_is_missing() {
        let expr = PathExpr::parse("MRData.CircuitTable.Circuits[0].circuitId.nope").unwrap();
        assert!(expr.evaluate(&circuits()).is_err());
    }

    #[test]
    fn test_evaluate_projection_skips_elements_without_field() {
        let data = json!({"items": [{"id": 1}, {"name": "x"}, {"id": 3}]});
        let expr = PathExpr::parse("items.id").unwrap();
        assert_eq!(expr.evaluate(&data).unwrap(), json!([1, 3]));
    }

    #[test]
    fn test_evaluate_projection_all_absent_is_missing() {
        let data = json!({"items": [{"name": "x"}, {"name": "y"}]});
        let expr = PathExpr::parse("items.id").unwrap();
        assert!(expr.evaluate(&data).is_err());
    }

    #[test]
    fn test_evaluate_projection_over_empty_array() {
        let data = json!({"items": []});
        let expr = PathExpr::parse("items.id").unwrap();
        assert_eq!(expr.evaluate(&data).unwrap(), json!([]));
    }
}
