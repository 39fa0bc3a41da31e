//! # Field Validation
//!
//! Validation never fails an edit. It produces a report of errors attached
//! to field paths (`body.2.hypertext.0.href`), which the editor shows next to
//! the offending control and which blocks export until empty.

use crate::visitor::Visitor;
use crate::Article;
use serde::{Serialize, Serializer};
use std::fmt;

pub const REQUIRED: &str = "This field is required";
pub const INVALID_URL: &str = "Invalid URL";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(&'static str),
    Index(usize),
}

/// Typed path to a field inside an article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &'static str) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Key(key));
        next
    }

    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Index(index));
        next
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                PathSegment::Key(key) => f.write_str(key)?,
                PathSegment::Index(index) => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: FieldPath,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// First error attached to exactly this path
    pub fn error_at(&self, path: &FieldPath) -> Option<&FieldError> {
        self.errors.iter().find(|e| &e.path == path)
    }

    /// Errors attached to this path or anything below it
    pub fn errors_under<'a>(&'a self, prefix: &'a FieldPath) -> impl Iterator<Item = &'a FieldError> {
        self.errors.iter().filter(move |e| e.path.starts_with(prefix))
    }

    fn push(&mut self, path: &FieldPath, message: &str) {
        self.errors.push(FieldError {
            path: path.clone(),
            message: message.to_string(),
        });
    }
}

/// Whitespace-only counts as empty.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Syntactically valid absolute URL: scheme plus a non-empty host.
pub fn is_valid_url(value: &str) -> bool {
    if value.is_empty() || value.trim() != value {
        return false;
    }

    match value.parse::<http::Uri>() {
        Ok(uri) => {
            uri.scheme().is_some()
                && uri
                    .authority()
                    .map(|authority| !authority.host().is_empty())
                    .unwrap_or(false)
        }
        Err(_) => false,
    }
}

/// Text-line list rule: non-empty, no blank entries.
pub fn validate_lines(lines: &[String]) -> Option<&'static str> {
    if lines.is_empty() || lines.iter().any(|line| is_blank(line)) {
        Some(REQUIRED)
    } else {
        None
    }
}

pub fn validate_article(article: &Article) -> ValidationReport {
    let mut validator = Validator::default();
    validator.visit_article(article);
    validator.report
}

#[derive(Default)]
struct Validator {
    report: ValidationReport,
}

impl Visitor for Validator {
    fn visit_required_text(&mut self, path: &FieldPath, value: &str) {
        if is_blank(value) {
            self.report.push(path, REQUIRED);
        }
    }

    fn visit_url(&mut self, path: &FieldPath, value: &str) {
        if is_blank(value) {
            self.report.push(path, REQUIRED);
        } else if !is_valid_url(value) {
            self.report.push(path, INVALID_URL);
        }
    }

    fn visit_text_lines(&mut self, path: &FieldPath, lines: &[String]) {
        if let Some(message) = validate_lines(lines) {
            self.report.push(path, message);
        }
    }

    fn visit_entries(&mut self, path: &FieldPath, len: usize, required: bool) {
        if required && len == 0 {
            self.report.push(path, REQUIRED);
        }
    }
}
