//! Logic-less placeholder substitution.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use regex::{Captures, Regex};
use tracing::{debug, info};

use crate::error::{TemplateError, TemplateResult};
use crate::tags::tag_regex;

/// What to do with a tag that has no value in the data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Fail the render and name every unresolved tag.
    #[default]
    Error,
    /// Leave the tag text untouched.
    Keep,
    /// Substitute an empty string.
    Empty,
}

impl MissingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingPolicy::Error => "error",
            MissingPolicy::Keep => "keep",
            MissingPolicy::Empty => "empty",
        }
    }
}

impl FromStr for MissingPolicy {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(MissingPolicy::Error),
            "keep" => Ok(MissingPolicy::Keep),
            "empty" => Ok(MissingPolicy::Empty),
            other => Err(TemplateError::UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Substitutes data-file values into `{{ name }}` tags.
///
/// Values are inserted as literal text. A value is never escaped or parsed,
/// so `"Port": {{ port }}` yields a JSON number while `"Port": "{{ port }}"`
/// yields a string.
pub struct TemplateRenderer {
    tag_pattern: Regex,
    missing: MissingPolicy,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Create a renderer that rejects unresolved tags.
    pub fn new() -> Self {
        Self {
            tag_pattern: tag_regex(),
            missing: MissingPolicy::default(),
        }
    }

    /// Set the policy for tags without a value.
    pub fn with_missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.missing = policy;
        self
    }

    /// Render template text against the substitution context.
    pub fn render(&self, text: &str, values: &BTreeMap<String, String>) -> TemplateResult<String> {
        if self.missing == MissingPolicy::Error {
            let missing = self.unresolved(text, values);
            if !missing.is_empty() {
                return Err(TemplateError::MissingValues(missing.into_iter().collect()));
            }
        }

        let rendered = self
            .tag_pattern
            .replace_all(text, |caps: &Captures| match values.get(&caps[1]) {
                Some(value) => value.clone(),
                None => match self.missing {
                    MissingPolicy::Empty => String::new(),
                    _ => caps[0].to_string(),
                },
            })
            .into_owned();

        Ok(rendered)
    }

    /// Read a template from disk and render it.
    pub fn render_file(
        &self,
        path: &Path,
        values: &BTreeMap<String, String>,
    ) -> TemplateResult<String> {
        if !path.is_file() {
            return Err(TemplateError::NotFound(path.to_path_buf()));
        }

        info!("Rendering template {:?}", path);
        let text = fs::read_to_string(path)?;
        let rendered = self.render(&text, values)?;
        debug!("Rendered {} bytes from {:?}", rendered.len(), path);
        Ok(rendered)
    }

    /// Tags in `text` that have no entry in `values`.
    pub fn unresolved(&self, text: &str, values: &BTreeMap<String, String>) -> BTreeSet<String> {
        self.tag_pattern
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .filter(|name| !values.contains_key(name))
            .collect()
    }
}
