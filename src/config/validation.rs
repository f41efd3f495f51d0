//! Configuration validation.
//!
//! # Responsibilities
//! - Evaluate per-section requirement rules after a section has been read
//! - Produce human-readable messages, one per violated rule
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - A rule borrows the values it checks; evaluation is a pure function
//! - "Set" and "truthy" are distinct: an empty string is set but not truthy

use std::collections::BTreeMap;

/// How a field value counts towards a rule.
pub trait Presence {
    /// The option was present in the file (or has a default).
    fn is_set(&self) -> bool;

    /// Set and non-empty; `false` booleans are not truthy.
    fn is_truthy(&self) -> bool;
}

impl Presence for bool {
    fn is_set(&self) -> bool {
        true
    }

    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Presence for String {
    fn is_set(&self) -> bool {
        true
    }

    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for Vec<T> {
    fn is_set(&self) -> bool {
        true
    }

    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Presence for BTreeMap<K, V> {
    fn is_set(&self) -> bool {
        true
    }

    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for u16 {
    fn is_set(&self) -> bool {
        true
    }

    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_set(&self) -> bool {
        self.is_some()
    }

    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_truthy)
    }
}

/// Borrow field values as a `Vec<&dyn Presence>` for the multi-value rules.
macro_rules! fields {
    ($($field:expr),+ $(,)?) => {
        vec![$(&$field as &dyn $crate::config::validation::Presence),+]
    };
}
pub(crate) use fields;

/// A single requirement over one or more borrowed field values.
pub enum Rule<'a> {
    /// The value must be set.
    Required {
        value: &'a dyn Presence,
        message: String,
    },
    /// At least one of the values must be truthy.
    AnyOf {
        values: Vec<&'a dyn Presence>,
        message: String,
    },
    /// At least one of the values must be set.
    AnySet {
        values: Vec<&'a dyn Presence>,
        message: String,
    },
    /// Every value must be truthy.
    AllOf {
        values: Vec<&'a dyn Presence>,
        message: String,
    },
    /// The value must be one of a closed set.
    OneOf {
        value: &'a str,
        allowed: &'static [&'static str],
        message: String,
    },
    /// The value must be set whenever `condition` holds.
    RequiredIf {
        condition: bool,
        value: &'a dyn Presence,
        message: String,
    },
}

impl<'a> Rule<'a> {
    pub fn required(value: &'a dyn Presence, message: impl Into<String>) -> Self {
        Rule::Required {
            value,
            message: message.into(),
        }
    }

    pub fn any_of(values: Vec<&'a dyn Presence>, message: impl Into<String>) -> Self {
        Rule::AnyOf {
            values,
            message: message.into(),
        }
    }

    pub fn any_set(values: Vec<&'a dyn Presence>, message: impl Into<String>) -> Self {
        Rule::AnySet {
            values,
            message: message.into(),
        }
    }

    pub fn all_of(values: Vec<&'a dyn Presence>, message: impl Into<String>) -> Self {
        Rule::AllOf {
            values,
            message: message.into(),
        }
    }

    /// Message is `<prefix> should be one of <a>, <b>, ....`
    pub fn one_of(value: &'a str, allowed: &'static [&'static str], prefix: &str) -> Self {
        Rule::OneOf {
            value,
            allowed,
            message: format!("{prefix} should be one of {}.", allowed.join(", ")),
        }
    }

    pub fn required_if(
        condition: bool,
        value: &'a dyn Presence,
        message: impl Into<String>,
    ) -> Self {
        Rule::RequiredIf {
            condition,
            value,
            message: message.into(),
        }
    }

    /// `None` when satisfied, otherwise the failure message.
    pub fn check(&self) -> Option<&str> {
        let (ok, message) = match self {
            Rule::Required { value, message } => (value.is_set(), message),
            Rule::AnyOf { values, message } => (values.iter().any(|v| v.is_truthy()), message),
            Rule::AnySet { values, message } => (values.iter().any(|v| v.is_set()), message),
            Rule::AllOf { values, message } => (values.iter().all(|v| v.is_truthy()), message),
            Rule::OneOf {
                value,
                allowed,
                message,
            } => (allowed.iter().any(|candidate| candidate == value), message),
            Rule::RequiredIf {
                condition,
                value,
                message,
            } => (!condition || value.is_set(), message),
        };
        (!ok).then_some(message.as_str())
    }
}

/// Evaluate rules in order and collect every failure message.
pub fn evaluate(rules: &[Rule<'_>]) -> Vec<String> {
    rules
        .iter()
        .filter_map(Rule::check)
        .map(str::to_string)
        .collect()
}
