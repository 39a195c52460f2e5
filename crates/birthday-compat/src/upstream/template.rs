use regex::{NoExpand, Regex};
use std::fmt;
use thiserror::Error;

/// Value substituted for one uppercase token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(f64),
    Integer(i64),
    /// Percent-encoded on substitution.
    Text(String),
}

impl TokenValue {
    fn rendered(&self) -> String {
        match self {
            TokenValue::Number(value) => value.to_string(),
            TokenValue::Integer(value) => value.to_string(),
            TokenValue::Text(value) => urlencoding::encode(value).into_owned(),
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered())
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for TokenValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for TokenValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for TokenValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Tokens applied in insertion order. Re-inserting a name replaces its value
/// but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSet {
    entries: Vec<(String, TokenValue)>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<TokenValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("token '{token}' does not form a valid pattern")]
    InvalidToken {
        token: String,
        #[source]
        source: regex::Error,
    },
}

/// Replaces whole-word occurrences of every token, then collapses whitespace
/// runs to one space and trims.
pub fn fill(template: &str, tokens: &TokenSet) -> Result<String, TemplateError> {
    let mut out = template.to_string();

    for (name, value) in tokens.iter() {
        let pattern = format!(r"\b{}\b", regex::escape(name));
        let re = Regex::new(&pattern).map_err(|source| TemplateError::InvalidToken {
            token: name.to_string(),
            source,
        })?;
        let rendered = value.rendered();
        out = re.replace_all(&out, NoExpand(&rendered)).into_owned();
    }

    Ok(out.split_whitespace().collect::<Vec<_>>().join(" "))
}
