//! URL template placeholders
//!
//! Parses `{name}` placeholders out of a URL template and substitutes them
//! from a request's path parameters. An unresolved placeholder is left as its
//! literal text; the remote service decides what a `{name}` path segment
//! means.

use std::ops::Range;

use super::params::PathParams;

/// A parsed placeholder reference in a URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRef {
    /// The placeholder name (without braces).
    pub name: String,
    /// Byte range in the original template where this reference appears.
    pub span: Range<usize>,
}

impl PlaceholderRef {
    /// Creates a new placeholder reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Parses a URL template and extracts all `{name}` placeholder references.
///
/// Empty braces and an unclosed `{` are not placeholders and are left for the
/// caller to ship verbatim.
#[must_use]
pub fn parse_placeholders(template: &str) -> Vec<PlaceholderRef> {
    let mut references = Vec::new();
    let mut chars = template.char_indices();

    while let Some((start, ch)) = chars.next() {
        if ch != '{' {
            continue;
        }

        let mut name = String::new();
        let mut end = None;
        for (i, c) in chars.by_ref() {
            if c == '}' {
                end = Some(i + 1);
                break;
            }
            name.push(c);
        }

        let Some(end) = end else {
            // Unclosed brace: nothing after this can be a placeholder.
            break;
        };

        let trimmed = name.trim();
        if !trimmed.is_empty() && !trimmed.contains('{') {
            references.push(PlaceholderRef::new(trimmed, start..end));
        }
    }

    references
}

/// Result of substituting placeholders in a URL template.
#[derive(Debug, Clone)]
pub struct SubstitutionResult {
    /// The template with every matched placeholder replaced.
    pub resolved: String,
    /// Names of placeholders that were substituted.
    pub substituted: Vec<String>,
    /// Names of placeholders with no matching parameter.
    pub unresolved: Vec<String>,
}

impl SubstitutionResult {
    /// Returns true if every placeholder had a matching parameter.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Substitutes every `{name}` placeholder in `template` with the matching
/// value from `params`.
///
/// Substitution is plain string interpolation; values are inserted exactly as
/// supplied. Placeholders with no matching parameter keep their literal
/// `{name}` text, and parameters that the template never references are
/// ignored.
#[must_use]
pub fn substitute(template: &str, params: &PathParams) -> SubstitutionResult {
    let references = parse_placeholders(template);

    if references.is_empty() {
        return SubstitutionResult {
            resolved: template.to_string(),
            substituted: Vec::new(),
            unresolved: Vec::new(),
        };
    }

    let mut substituted = Vec::new();
    let mut unresolved = Vec::new();
    let mut result = String::with_capacity(template.len());
    let mut last_end = 0;

    for reference in &references {
        result.push_str(&template[last_end..reference.span.start]);

        if let Some(value) = params.get(&reference.name) {
            result.push_str(value);
            substituted.push(reference.name.clone());
        } else {
            result.push_str(&template[reference.span.clone()]);
            unresolved.push(reference.name.clone());
        }

        last_end = reference.span.end;
    }

    result.push_str(&template[last_end..]);

    SubstitutionResult {
        resolved: result,
        substituted,
        unresolved,
    }
}
