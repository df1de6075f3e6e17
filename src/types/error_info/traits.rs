use super::ErrorInfo;
use std::fmt::Display;

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !f.alternate() {
            return Display::fmt(&self.fmt(), f);
        }
        Display::fmt(&self.fmt().cascaded(), f)
    }
}

impl std::error::Error for ErrorInfo {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// Sources are compared by their rendered text; two failures wrapping distinct
// but equally-described causes are equal.
impl PartialEq for ErrorInfo {
    fn eq(&self, other: &Self) -> bool {
        let same_source = match (&self.source, &other.source) {
            (None, None) => true,
            (Some(a), Some(b)) => a.to_string() == b.to_string(),
            _ => false,
        };
        same_source
            && self.message == other.message
            && self.code == other.code
            && self.context == other.context
    }
}

impl Eq for ErrorInfo {}

impl From<&'static str> for ErrorInfo {
    #[inline]
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ErrorInfo {
    #[inline]
    fn from(message: String) -> Self {
        Self::new(message)
    }
}
