use crate::token::{Token, TokenStream};

use automata::{Automaton, Fragment, Label, StateGraph};

/// Alias for [`Result`] with the error type [`SyntaxError`].
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Error returned when a pattern does not conform to the grammar. Carries
/// the offending token, its char offset in the pattern, and the name of
/// the production that rejected it.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unexpected {token} at position {position} in {production}")]
pub struct SyntaxError {
    pub position: usize,
    pub token: Token,
    pub production: &'static str,
}

/// A recursive descent parser that compiles a token stream directly into a
/// state graph, one [`Fragment`] per production. No intermediate syntax
/// tree is built.
///
/// The grammar, decided with one token of lookahead:
///
/// ```text
/// expr        ::= term expr_rest
/// expr_rest   ::= '|' expr
///               | (empty)
/// term        ::= factor term_rest
/// term_rest   ::= term
///               | (empty)
/// factor      ::= atom factor_rest
/// factor_rest ::= '*'
///               | (empty)
/// atom        ::= literal
///               | '.'
///               | '(' expr ')'
/// ```
pub struct Parser<S: TokenStream> {
    tokens: S,
    graph: StateGraph,
}

impl<S: TokenStream> Parser<S> {
    pub fn new(tokens: S) -> Self {
        Parser {
            tokens,
            graph: StateGraph::new(),
        }
    }

    /// Parse the whole token stream into an automaton. The stream must be
    /// a single well-formed expression; anything left over after it, such
    /// as an unbalanced `)`, is an error.
    pub fn parse(mut self) -> ParseResult<Automaton> {
        let fragment = self.parse_expr()?;
        match self.tokens.peek() {
            Token::End => Ok(Automaton::new(self.graph, fragment)),
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_expr(&mut self) -> ParseResult<Fragment> {
        let term = self.parse_term()?;
        self.parse_expr_rest(term)
    }

    fn parse_expr_rest(&mut self, left: Fragment) -> ParseResult<Fragment> {
        match self.tokens.peek() {
            Token::Union => {
                self.tokens.advance();
                let right = self.parse_expr()?;
                Ok(self.graph.union(left, right))
            }
            _ => Ok(left),
        }
    }

    fn parse_term(&mut self) -> ParseResult<Fragment> {
        let factor = self.parse_factor()?;
        self.parse_term_rest(factor)
    }

    fn parse_term_rest(&mut self, left: Fragment) -> ParseResult<Fragment> {
        match self.tokens.peek() {
            Token::Literal(_) | Token::AnyChar | Token::LParen => {
                let right = self.parse_term()?;
                Ok(self.graph.concat(left, right))
            }
            Token::End | Token::Union | Token::RParen => Ok(left),
            _ => Err(self.unexpected("term")),
        }
    }

    fn parse_factor(&mut self) -> ParseResult<Fragment> {
        let atom = self.parse_atom()?;
        Ok(self.parse_factor_rest(atom))
    }

    fn parse_factor_rest(&mut self, inner: Fragment) -> Fragment {
        match self.tokens.peek() {
            Token::Star => {
                self.tokens.advance();
                self.graph.star(inner)
            }
            _ => inner,
        }
    }

    fn parse_atom(&mut self) -> ParseResult<Fragment> {
        match self.tokens.peek() {
            Token::Literal(c) => {
                self.tokens.advance();
                Ok(self.graph.literal(Label::Literal(c)))
            }
            Token::AnyChar => {
                self.tokens.advance();
                Ok(self.graph.literal(Label::AnyChar))
            }
            Token::LParen => {
                self.tokens.advance();
                let inner = self.parse_expr()?;
                match self.tokens.peek() {
                    Token::RParen => {
                        self.tokens.advance();
                        Ok(inner)
                    }
                    _ => Err(self.unexpected("group")),
                }
            }
            _ => Err(self.unexpected("atom")),
        }
    }

    fn unexpected(&self, production: &'static str) -> SyntaxError {
        SyntaxError {
            position: self.tokens.position(),
            token: self.tokens.peek(),
            production,
        }
    }
}
