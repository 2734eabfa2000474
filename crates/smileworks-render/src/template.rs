//! Lightweight HTML templates for block markup.
//!
//! Section markup is simple enough that string interpolation beats a heavy
//! template engine. Variables are `{{ name }}` placeholders; `{{ name? }}`
//! marks a variable that may be absent and renders as empty. Context values
//! are HTML-escaped on insertion unless added through `insert_raw`.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, HTML-escaping the value.
    pub fn insert(&mut self, key: impl Into<String>, value: &str) {
        self.variables
            .insert(key.into(), html_escape::encode_text(value).into_owned());
    }

    /// Insert a variable without escaping (trusted markup, e.g. rich text
    /// from the CMS or nested template output).
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Builder-style escaped insert.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style escaped insert of an optional value; `None` inserts
    /// nothing, which renders as empty through `{{ name? }}`.
    #[must_use]
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Builder-style raw insert.
    #[must_use]
    pub fn with_raw(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_raw(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A template supporting `{{ variable }}` interpolation.
#[derive(Debug, Clone)]
pub struct Template {
    content: &'static str,
}

impl Template {
    /// Wrap a static template string.
    #[must_use]
    pub const fn new(content: &'static str) -> Self {
        Self { content }
    }

    /// Render the template with the given context.
    ///
    /// Replaces all `{{ variable }}` placeholders with context values;
    /// `{{ variable? }}` placeholders tolerate absence.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.to_string();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();

            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped, true),
                None => (var_name, false),
            };

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            };

            result.replace_range(start..end, &value);
            pos = start + value.len();
        }

        Ok(result)
    }
}
