use std::fmt;

/// Structured error for stylesheet resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StylesheetError {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
    /// Property being resolved, when known.
    pub property: Option<Box<str>>,
    /// Raw value that failed, when known.
    pub value: Option<Box<str>>,
}

impl StylesheetError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into().into_boxed_str(),
            property: None,
            value: None,
        }
    }

    pub(crate) fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into().into_boxed_str());
        self
    }

    pub(crate) fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into().into_boxed_str());
        self
    }
}

impl fmt::Display for StylesheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(property) = self.property.as_deref() {
            write!(f, " [property={}]", property)?;
        }
        if let Some(value) = self.value.as_deref() {
            write!(f, " [value={}]", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for StylesheetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = StylesheetError::new("STYLE_BAD_LENGTH", "unrecognized unit")
            .with_property("width")
            .with_value("12qq");
        assert_eq!(
            err.to_string(),
            "STYLE_BAD_LENGTH: unrecognized unit [property=width] [value=12qq]"
        );
    }
}
