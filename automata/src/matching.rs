use std::ops::Range;

/// A confirmed or still-extendable match reported by the simulation engine.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Match {
    /// Start position of the match: the offset at which the winning attempt
    /// began.
    pub start: usize,
    /// Position of the last character matched + 1.
    pub end: usize,
    /// The symbols consumed by the winning attempt. Present only when the
    /// matcher was asked to record spans.
    pub span: Option<Vec<char>>,
}

impl Match {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Match {
            start,
            end,
            span: None,
        }
    }

    #[inline]
    pub fn with_span(start: usize, end: usize, span: Vec<char>) -> Self {
        Match {
            start,
            end,
            span: Some(span),
        }
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The number of symbols matched.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether this is an empty match.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}
