/// Outcome definitions for product items
///
/// Every discovered product URL ends in exactly one of these states, and each
/// state yields exactly one output record.
use std::fmt;

/// Represents how a single product URL was processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemOutcome {
    /// Page fetched and a record extracted from its markup
    Extracted,

    /// Page could not be fetched (timeout, connection error, non-2xx);
    /// a placeholder record was emitted
    Unreachable,

    /// Processing failed after the fetch (e.g. image folder not writable);
    /// a placeholder record was emitted
    Failed,
}

impl ItemOutcome {
    /// Short lowercase label used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extracted => "extracted",
            Self::Unreachable => "unreachable",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ItemOutcome::Extracted.to_string(), "extracted");
        assert_eq!(ItemOutcome::Unreachable.to_string(), "unreachable");
        assert_eq!(ItemOutcome::Failed.to_string(), "failed");
    }
}
