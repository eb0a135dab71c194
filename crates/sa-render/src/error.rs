//! Error types for the sa-render crate.

/// Errors raised during column type resolution.
///
/// Type resolution failures are fatal for the whole generation run: a
/// schema containing a column the generator cannot type never produces
/// partial output.
///
/// # Examples
///
/// ```
/// use sa_render::TypeError;
///
/// let error = TypeError::unsupported("geometry", "POINT");
/// assert!(error.to_string().contains("POINT"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// The resolved base type token is not a supported database type.
    #[error("unsupported database type '{token}' on column '{column}'")]
    Unsupported {
        /// The column whose type failed to resolve.
        column: String,
        /// The unrecognized base type token.
        token: String,
    },
}

impl TypeError {
    /// Creates a new [`TypeError::Unsupported`] error.
    #[inline]
    pub fn unsupported(column: impl Into<String>, token: impl Into<String>) -> Self {
        Self::Unsupported {
            column: column.into(),
            token: token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = TypeError::unsupported("location", "POINT");
        let msg = err.to_string();
        assert!(msg.contains("location"));
        assert!(msg.contains("POINT"));
    }
}
