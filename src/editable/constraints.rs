//! Edit constraints for single-line and multi-line editing.
//!
//! Constraints define whether newlines and vertical movement are allowed and
//! which text values an edit may produce.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Predicate every resulting text value must satisfy
pub type TextPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Partial input that may still become a valid number
fn is_number_prefix(input: &str, allow_dot: bool) -> bool {
    input.is_empty() || input == "-" || (allow_dot && input == ".")
}

/// Integer input, accepting the empty string and a lone `-` while typing
pub fn is_integer_input(input: &str) -> bool {
    is_number_prefix(input, false) || input.parse::<i32>().is_ok()
}

/// Single-precision float input, accepting `""`, `"-"` and `"."` while typing
pub fn is_float_input(input: &str) -> bool {
    is_number_prefix(input, true) || input.parse::<f32>().is_ok()
}

/// Double-precision float input, accepting `""`, `"-"` and `"."` while typing
pub fn is_double_input(input: &str) -> bool {
    is_number_prefix(input, true) || input.parse::<f64>().is_ok()
}

/// Built-in validators, selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validator {
    Integer,
    Float,
    Double,
}

impl Validator {
    pub fn predicate(self) -> TextPredicate {
        match self {
            Validator::Integer => Arc::new(is_integer_input),
            Validator::Float => Arc::new(is_float_input),
            Validator::Double => Arc::new(is_double_input),
        }
    }

    /// Whether `text` is a complete value rather than an in-progress prefix
    pub fn is_complete(self, text: &str) -> bool {
        match self {
            Validator::Integer => text.parse::<i32>().is_ok(),
            Validator::Float => text.parse::<f32>().is_ok(),
            Validator::Double => text.parse::<f64>().is_ok(),
        }
    }
}

impl std::str::FromStr for Validator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(Validator::Integer),
            "float" => Ok(Validator::Float),
            "double" => Ok(Validator::Double),
            other => Err(format!("unknown validator '{}'", other)),
        }
    }
}

/// Constraints that limit what edits are allowed in an editing context.
#[derive(Clone, Default)]
pub struct EditConstraints {
    /// Allow multiple rows (Enter inserts a newline, up/down move between rows)
    pub allow_multiline: bool,

    /// Text predicate (None = every value allowed)
    pub predicate: Option<TextPredicate>,
}

impl fmt::Debug for EditConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditConstraints")
            .field("allow_multiline", &self.allow_multiline)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

impl EditConstraints {
    /// Text area constraints
    pub fn multi_line() -> Self {
        Self {
            allow_multiline: true,
            predicate: None,
        }
    }

    /// Single-line input constraints
    pub fn single_line() -> Self {
        Self {
            allow_multiline: false,
            predicate: None,
        }
    }

    pub fn integer() -> Self {
        Self::validated(Validator::Integer)
    }

    pub fn float() -> Self {
        Self::validated(Validator::Float)
    }

    pub fn double() -> Self {
        Self::validated(Validator::Double)
    }

    /// Single-line input checked by a built-in validator
    pub fn validated(validator: Validator) -> Self {
        Self {
            allow_multiline: false,
            predicate: Some(validator.predicate()),
        }
    }

    pub fn with_predicate(
        mut self,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Check a candidate text value against the newline rule and the predicate
    pub fn accepts(&self, text: &str) -> bool {
        if !self.allow_multiline && text.contains('\n') {
            return false;
        }
        match &self.predicate {
            Some(predicate) => predicate(text),
            None => true,
        }
    }
}
