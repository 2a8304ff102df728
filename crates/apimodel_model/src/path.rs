//! URI path templates.
//!
//! A template such as `/orders/{id: [0-9]+}/items` parses into ordered
//! segments: literal `orders`, variable `id` constrained by `[0-9]+`,
//! literal `items`. Splitting on `/` never happens inside braces, so
//! constraints may themselves contain slashes.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One segment of a path template.
///
/// Variable segments always carry the bare `{name}` form in `value`; the
/// constraint is kept separately in `regex`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathSegment {
    /// Literal text, or `{name}` for a variable.
    pub value: String,
    /// Constraint pattern of a variable, verbatim.
    pub regex: Option<String>,
    variable: Option<String>,
}

impl PathSegment {
    /// Creates a literal segment.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            regex: None,
            variable: None,
        }
    }

    /// Creates a variable segment.
    #[must_use]
    pub fn variable(name: impl Into<String>, regex: Option<String>) -> Self {
        let name = name.into();
        Self {
            value: format!("{{{name}}}"),
            regex,
            variable: Some(name),
        }
    }

    /// Returns the variable name, if this is a variable segment.
    #[must_use]
    pub fn variable_name(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    /// Returns true for variable segments.
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        self.variable.is_some()
    }

    fn parse(text: &str) -> Self {
        let inner = text
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .filter(|inner| is_balanced(inner));
        let Some(inner) = inner else {
            return Self::literal(text);
        };
        match inner.split_once(':') {
            Some((name, pattern)) => {
                let pattern = pattern.trim();
                let regex = (!pattern.is_empty()).then(|| pattern.to_string());
                Self::variable(name.trim(), regex)
            }
            None => Self::variable(inner.trim(), None),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Returns true if every `{` in `text` is closed before the end and no `}`
/// closes a brace that was never opened.
fn is_balanced(text: &str) -> bool {
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '{' => depth += 1,
            '}' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

/// An ordered list of path segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathTemplate {
    segments: Vec<PathSegment>,
}

impl PathTemplate {
    /// Parses a template.
    ///
    /// Empty segments are discarded, so leading, doubled and trailing
    /// slashes have no effect. Parsing never fails: anything that is not a
    /// well-formed `{name}` or `{name: pattern}` is a literal.
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;

        for ch in template.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    current.push(ch);
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    current.push(ch);
                }
                '/' if depth == 0 => {
                    push_segment(&mut segments, &current);
                    current.clear();
                }
                _ => current.push(ch),
            }
        }
        push_segment(&mut segments, &current);

        Self { segments }
    }

    /// Creates a template from segments.
    #[must_use]
    pub const fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Returns the segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root template `/`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns this template followed by `child`.
    #[must_use]
    pub fn join(&self, child: &PathTemplate) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        Self { segments }
    }

    /// Iterates over variable names in order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(PathSegment::variable_name)
    }

    /// Returns the constraint of the named variable.
    #[must_use]
    pub fn constraint(&self, variable: &str) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.variable_name() == Some(variable))
            .and_then(|s| s.regex.as_deref())
    }

    /// Returns true if the template has a variable with the given name.
    #[must_use]
    pub fn has_variable(&self, variable: &str) -> bool {
        self.variables().any(|v| v == variable)
    }

    /// Returns a dispatcher pattern: the literal prefix up to the first
    /// variable, followed by `*`.
    ///
    /// A template without variables yields its own rendering.
    #[must_use]
    pub fn servlet_pattern(&self) -> String {
        let Some(first) = self.segments.iter().position(PathSegment::is_variable) else {
            return self.to_string();
        };
        let mut pattern = String::from("/");
        for segment in &self.segments[..first] {
            pattern.push_str(&segment.value);
            pattern.push('/');
        }
        pattern.push('*');
        pattern
    }
}

fn push_segment(segments: &mut Vec<PathSegment>, raw: &str) {
    let text = raw.trim();
    if !text.is_empty() {
        segments.push(PathSegment::parse(text));
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for PathTemplate {
    fn from(template: &str) -> Self {
        Self::parse(template)
    }
}
