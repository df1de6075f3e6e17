//! Rendering of failure chains.
//!
//! A chain is the context stack (most recent first), then the failure message,
//! then optionally the deeper causes from the source error.

use crate::types::ErrorInfo;
use std::fmt::Display;

/// Layout of a rendered chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFormatConfig {
    pub separator: String,
    pub context_prefix: Option<String>,
    pub root_prefix: Option<String>,
    pub cascade: bool,
    pub indent: String,
    pub show_code: bool,
    pub show_causes: bool,
}

impl Default for ErrorFormatConfig {
    fn default() -> Self {
        Self {
            separator: " -> ".into(),
            context_prefix: None,
            root_prefix: None,
            cascade: false,
            indent: "  ".into(),
            show_code: true,
            show_causes: false,
        }
    }
}

impl ErrorFormatConfig {
    /// Tree-like multi-line output including the cause chain.
    #[inline]
    pub fn pretty() -> Self {
        Self {
            separator: "\n".into(),
            context_prefix: Some("├─ ".into()),
            root_prefix: Some("└─ ".into()),
            show_causes: true,
            ..Default::default()
        }
    }

    /// One item per line, each indented one level deeper than the previous.
    #[inline]
    pub fn cascaded() -> Self {
        Self { separator: "\n".into(), cascade: true, ..Default::default() }
    }

    #[inline]
    pub fn compact() -> Self {
        Self { separator: " | ".into(), ..Default::default() }
    }

    #[inline]
    pub fn no_code() -> Self {
        Self { show_code: false, ..Default::default() }
    }
}

impl ErrorFormatConfig {
    /// Joins the rendered items. The last item is the root of the chain.
    pub fn render(&self, items: &[&dyn Display]) -> String {
        let mut out = String::with_capacity(items.len() * 32);

        for (depth, item) in items.iter().enumerate() {
            if depth > 0 {
                out.push_str(&self.separator);
                if self.cascade {
                    out.extend(std::iter::repeat(self.indent.as_str()).take(depth));
                }
            }

            let is_root = depth + 1 == items.len();
            let prefix = match (&self.context_prefix, &self.root_prefix) {
                (_, Some(root)) if is_root => Some(root),
                (context, _) => context.as_ref(),
            };
            if let Some(prefix) = prefix {
                out.push_str(prefix);
            }
            out.push_str(&item.to_string());
        }
        out
    }
}

/// Builder for customizing how an [`ErrorInfo`] is displayed.
///
/// ```
/// use step_rail::{ErrorContext, ErrorInfo};
///
/// let err = ErrorInfo::new("token rejected")
///     .with_context(ErrorContext::step(3, "authenticate"))
///     .set_code(401);
///
/// assert_eq!(err.fmt().show_code(false).to_string(), "step 3 (authenticate) -> token rejected");
/// assert_eq!(err.fmt().compact().to_string(), "step 3 (authenticate) | token rejected (code: 401)");
/// ```
pub struct ErrorFormatBuilder<'a> {
    pub(crate) error: &'a ErrorInfo,
    pub(crate) config: ErrorFormatConfig,
    pub(crate) reverse_context: bool,
}

impl<'a> ErrorFormatBuilder<'a> {
    pub fn new(error: &'a ErrorInfo) -> Self {
        Self { error, config: ErrorFormatConfig::default(), reverse_context: false }
    }

    pub fn with_config(mut self, config: ErrorFormatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.separator = separator.into();
        self
    }

    /// Lists contexts oldest first instead of most recent first.
    pub fn reverse_context(mut self, reverse: bool) -> Self {
        self.reverse_context = reverse;
        self
    }

    pub fn show_code(mut self, show: bool) -> Self {
        self.config.show_code = show;
        self
    }

    pub fn show_causes(mut self, show: bool) -> Self {
        self.config.show_causes = show;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.config = ErrorFormatConfig::pretty();
        self
    }

    pub fn compact(mut self) -> Self {
        self.config = ErrorFormatConfig::compact();
        self
    }

    pub fn cascaded(mut self) -> Self {
        self.config = ErrorFormatConfig::cascaded();
        self
    }
}

impl<'a> Display for ErrorFormatBuilder<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The first cause usually repeats the message, so only differing ones are listed.
        let causes: Vec<String> = if self.config.show_causes {
            self.error
                .causes()
                .map(|cause| cause.to_string())
                .filter(|cause| cause.as_str() != self.error.message())
                .collect()
        } else {
            Vec::new()
        };
        let mut items: Vec<&dyn Display> = Vec::with_capacity(self.error.context.len() + 2);

        if self.reverse_context {
            items.extend(self.error.context_iter().rev().map(|ctx| ctx as &dyn Display));
        } else {
            items.extend(self.error.context_iter().map(|ctx| ctx as &dyn Display));
        }

        let message: &dyn Display = &self.error.message;
        items.push(message);

        items.extend(causes.iter().map(|cause| cause as &dyn Display));

        f.write_str(&self.config.render(&items))?;

        if self.config.show_code {
            if let Some(code) = self.error.code() {
                write!(f, " (code: {})", code)?;
            }
        }

        Ok(())
    }
}
