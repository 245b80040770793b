use std::fmt;

/// A single token of a pattern.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    /// One exact character.
    Literal(char),
    /// The `.` metacharacter, matching any single character.
    AnyChar,
    LParen,
    RParen,
    /// The `|` alternation operator.
    Union,
    /// The `*` repetition operator.
    Star,
    /// The end of the pattern.
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(c) => write!(f, "'{}'", c),
            Token::AnyChar => write!(f, "'.'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Union => write!(f, "'|'"),
            Token::Star => write!(f, "'*'"),
            Token::End => write!(f, "end of pattern"),
        }
    }
}

/// A stream of pattern tokens with one token of lookahead. The parser works
/// against this interface and never sees the pattern text itself.
pub trait TokenStream {
    /// The current token. A stream is never exhausted: once the last token
    /// is consumed, this keeps answering [`Token::End`].
    fn peek(&self) -> Token;

    /// Consume the current token.
    fn advance(&mut self);

    /// The char offset of the current token in the pattern.
    fn position(&self) -> usize;
}

/// Tokenizes a whole pattern up front. `|`, `*`, `(` and `)` are operators
/// and `.` is the any-character token; a backslash forces the character
/// after it to be an ordinary literal. Everything else is a literal of
/// itself.
#[derive(Clone, Debug)]
pub struct Scanner {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
}

impl Scanner {
    pub fn new(pattern: &str) -> Self {
        let len = pattern.chars().count();
        let mut tokens = Vec::with_capacity(len + 1);

        let mut chars = pattern.chars().enumerate();
        while let Some((pos, c)) = chars.next() {
            let token = match c {
                '\\' => match chars.next() {
                    Some((_, escaped)) => Token::Literal(escaped),
                    // A trailing lone backslash escapes nothing.
                    None => break,
                },
                '|' => Token::Union,
                '*' => Token::Star,
                '(' => Token::LParen,
                ')' => Token::RParen,
                '.' => Token::AnyChar,
                _ => Token::Literal(c),
            };
            // Escaped literals report the position of the backslash.
            tokens.push((token, pos));
        }
        tokens.push((Token::End, len));

        Scanner { tokens, cursor: 0 }
    }
}

impl TokenStream for Scanner {
    #[inline]
    fn peek(&self) -> Token {
        self.tokens[self.cursor].0
    }

    #[inline]
    fn advance(&mut self) {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
    }

    #[inline]
    fn position(&self) -> usize {
        self.tokens[self.cursor].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut scanner: Scanner) -> Vec<(Token, usize)> {
        let mut tokens = Vec::new();
        loop {
            let token = scanner.peek();
            tokens.push((token, scanner.position()));
            if token == Token::End {
                return tokens;
            }
            scanner.advance();
        }
    }

    #[test]
    fn test_operators_and_literals() {
        let tokens = drain(Scanner::new("a.(b|c)*"));
        assert_eq!(
            tokens,
            vec![
                (Token::Literal('a'), 0),
                (Token::AnyChar, 1),
                (Token::LParen, 2),
                (Token::Literal('b'), 3),
                (Token::Union, 4),
                (Token::Literal('c'), 5),
                (Token::RParen, 6),
                (Token::Star, 7),
                (Token::End, 8),
            ]
        );
    }

    #[test]
    fn test_escapes_force_literals() {
        let tokens = drain(Scanner::new(r"\*a\\"));
        assert_eq!(
            tokens,
            vec![
                (Token::Literal('*'), 0),
                (Token::Literal('a'), 2),
                (Token::Literal('\\'), 3),
                (Token::End, 5),
            ]
        );
    }

    #[test]
    fn test_trailing_backslash_is_dropped() {
        let tokens = drain(Scanner::new("a\\"));
        assert_eq!(tokens, vec![(Token::Literal('a'), 0), (Token::End, 2)]);
    }

    #[test]
    fn test_empty_pattern() {
        let tokens = drain(Scanner::new(""));
        assert_eq!(tokens, vec![(Token::End, 0)]);
    }

    #[test]
    fn test_advance_saturates_at_end() {
        let mut scanner = Scanner::new("a");
        scanner.advance();
        scanner.advance();
        scanner.advance();
        assert_eq!(scanner.peek(), Token::End);
        assert_eq!(scanner.position(), 1);
    }
}
