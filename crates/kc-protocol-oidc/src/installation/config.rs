//! Line-oriented environment configuration files.

use std::fmt;

/// One line of a rendered environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLine {
    /// Active `KEY="value"` assignment.
    Assignment {
        /// Variable name.
        key: String,
        /// Unquoted value.
        value: String,
    },
    /// Commented-out example assignment (`#KEY="value"`).
    Example {
        /// Variable name.
        key: String,
        /// Unquoted value.
        value: String,
    },
    /// Free-text comment (`# text`).
    Comment(String),
    /// Empty separator line.
    Blank,
}

impl ConfigLine {
    /// Returns the key if this line is an active assignment.
    #[must_use]
    pub fn active_key(&self) -> Option<&str> {
        match self {
            Self::Assignment { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assignment { key, value } => write!(f, "{key}=\"{}\"", escape(value)),
            Self::Example { key, value } => write!(f, "#{key}=\"{}\"", escape(value)),
            Self::Comment(text) => write!(f, "# {}", text.replace(['\r', '\n'], " ")),
            Self::Blank => Ok(()),
        }
    }
}

// Keeps a value inside its double quotes and on its own line.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// An ordered environment file.
///
/// Active keys are unique; assigning a key twice replaces the earlier value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedConfig {
    lines: Vec<ConfigLine>,
}

impl RenderedConfig {
    /// Creates an empty file.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Appends or replaces an active assignment.
    pub fn assign(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        let existing = self.lines.iter_mut().find_map(|line| match line {
            ConfigLine::Assignment { key: k, value: v } if *k == key => Some(v),
            _ => None,
        });

        match existing {
            Some(slot) => *slot = value,
            None => self.lines.push(ConfigLine::Assignment { key, value }),
        }
        self
    }

    /// Appends a commented-out example assignment.
    pub fn example(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.lines.push(ConfigLine::Example {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a comment line.
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(ConfigLine::Comment(text.into()));
        self
    }

    /// Appends an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(ConfigLine::Blank);
        self
    }

    /// Returns the lines in emission order.
    #[must_use]
    pub fn lines(&self) -> &[ConfigLine] {
        &self.lines
    }

    /// Returns the value of an active assignment.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            ConfigLine::Assignment { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Returns whether `key` is assigned (ignoring commented examples).
    #[must_use]
    pub fn is_assigned(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Iterates over the active keys in emission order.
    pub fn active_keys(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(ConfigLine::active_key)
    }
}

impl fmt::Display for RenderedConfig {
    /// Writes every line followed by a newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
