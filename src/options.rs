//! Configuration options for content extraction.
//!
//! The thresholds here are empirically tuned heuristics, not fixed law. They
//! are exposed so callers can tune the substance filter and the quality gate.

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use article_press::Options;
///
/// let options = Options {
///     min_nodes: 3,
///     ..Options::default()
/// };
/// assert_eq!(options.min_text_len, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Minimum plain-text length (characters) for a non-image node in the
    /// first normalization pass.
    ///
    /// Default: `10`
    pub min_text_len: usize,

    /// Minimum plain-text length (characters) in the relaxed second pass.
    ///
    /// The relaxed pass only collects headings and paragraphs and demands more
    /// substance from each of them.
    ///
    /// Default: `20`
    pub relaxed_min_text_len: usize,

    /// Node count below which the quality gate reruns normalization with the
    /// relaxed configuration.
    ///
    /// Default: `5`
    pub min_nodes: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_text_len: 10,
            relaxed_min_text_len: 20,
            min_nodes: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.min_text_len, 10);
        assert_eq!(options.relaxed_min_text_len, 20);
        assert_eq!(options.min_nodes, 5);
    }

    #[test]
    fn test_struct_update_keeps_other_defaults() {
        let options = Options {
            relaxed_min_text_len: 40,
            ..Options::default()
        };
        assert_eq!(options.relaxed_min_text_len, 40);
        assert_eq!(options.min_nodes, 5);
    }
}
