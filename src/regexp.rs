use crate::parser::Parser;
use crate::token::Scanner;

use automata::{Automaton, Matcher};

pub use crate::parser::ParseResult;

/// A match found in an input string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Match {
    /// The char offset of the first character of the match.
    start: usize,
    /// The char offset of the last character of the match, plus one.
    end: usize,
    /// The matched text.
    pub span: String,
}

impl Match {
    #[inline]
    pub fn new(start: usize, end: usize, span: String) -> Self {
        Match { start, end, span }
    }

    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The range of char offsets covered by the match.
    #[inline]
    pub const fn range(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

/// A compiled regular expression for matching strings. It may be used to
/// determine if given strings are within the language described by the
/// regular expression, and to find where in a string that language first
/// occurs.
#[derive(Clone, Debug)]
pub struct RegExp {
    /// The regular expression represented by this structure.
    expr: String,
    /// The compiled automaton used to evaluate input strings.
    automaton: Automaton,
}

impl RegExp {
    /// Compile a regular expression.
    pub fn new(expr: &str) -> ParseResult<Self> {
        let parser = Parser::new(Scanner::new(expr));

        Ok(RegExp {
            expr: expr.to_owned(),
            automaton: parser.parse()?,
        })
    }

    /// The text of the regular expression.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.expr
    }

    /// The compiled automaton.
    #[inline]
    pub const fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// A fresh matcher over the compiled automaton, for feeding input one
    /// symbol at a time.
    #[inline]
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.automaton)
    }

    /// Determine if the whole input string is within the language described
    /// by the regular expression.
    pub fn is_exact_match(&self, input: &str) -> bool {
        let mut matcher = Matcher::new_anchored(&self.automaton);
        match matcher.match_all(input.chars()) {
            Some(m) => m.end == input.chars().count(),
            None => false,
        }
    }

    /// Find the leftmost-longest match in the input string, if any. Offsets
    /// in the returned [`Match`] are char offsets into the input.
    pub fn find(&self, input: &str) -> Option<Match> {
        self.find_at(input, 0)
    }

    /// Find the leftmost-longest match beginning at or after the char
    /// offset `start`.
    pub fn find_at(&self, input: &str, start: usize) -> Option<Match> {
        let mut matcher = Matcher::new(&self.automaton).with_spans();
        matcher.match_all(input.chars().skip(start)).map(|m| {
            Match::new(
                m.start + start,
                m.end + start,
                m.span.unwrap_or_default().into_iter().collect(),
            )
        })
    }
}
