//! Structured annotations attached to an [`ErrorInfo`](crate::types::ErrorInfo).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Display;

/// A single annotation on a failure.
///
/// Contexts are pushed as a failure travels outward through a pipeline, so the
/// most recent entry describes the outermost layer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    /// Free-form description.
    Message(Cow<'static, str>),
    /// The pipeline stage that produced the failure (1-based).
    Step { index: usize, name: Cow<'static, str> },
    /// Short categorical label.
    Tag(Cow<'static, str>),
    /// Key/value pair.
    Metadata { key: Cow<'static, str>, value: Cow<'static, str> },
}

impl ErrorContext {
    #[inline]
    pub fn new<S: Into<Cow<'static, str>>>(message: S) -> Self {
        Self::Message(message.into())
    }

    #[inline]
    pub fn step<S: Into<Cow<'static, str>>>(index: usize, name: S) -> Self {
        Self::Step { index, name: name.into() }
    }

    #[inline]
    pub fn tag<S: Into<Cow<'static, str>>>(tag: S) -> Self {
        Self::Tag(tag.into())
    }

    #[inline]
    pub fn metadata<K, V>(key: K, value: V) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        Self::Metadata { key: key.into(), value: value.into() }
    }

    /// Renders the context the way it appears in an error chain.
    pub fn message(&self) -> String {
        match self {
            Self::Message(s) => s.to_string(),
            Self::Step { index, name } => format!("step {} ({})", index, name),
            Self::Tag(t) => format!("[{}]", t),
            Self::Metadata { key, value } => format!("{}={}", key, value),
        }
    }

    /// Returns `(index, name)` for step markers.
    #[inline]
    pub fn as_step(&self) -> Option<(usize, &str)> {
        match self {
            Self::Step { index, name } => Some((*index, name.as_ref())),
            _ => None,
        }
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
