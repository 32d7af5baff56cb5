//! # Syntax
//! Parse R source code into an Abstract Syntax Tree
//!
//! A pratt parser, based on [Crafting Interpreters](https://craftinginterpreters.com/parsing-expressions.html).
//!
//! The source is first tokenised and then subsequently a tree is built from the tokens,
//! with the tree referencing the tokens. All references for tokens and expressions are
//! done with integers to save space - so when the tree is accessed the ast needs to be
//! passed as a reference.
//!
//! Tries to be error tolerant, and recover from errors to continue parsing, as code being
//! edited is rarely complete. If a token is expected but is not found it will just assume
//! it exists and continue parsing (adding an error). Otherwise the parser skips to the
//! next point it can continue from, the next comma in an argument list or the next line.
//! Malformed input always produces a tree, with the errors stored alongside it.

pub mod ast;
mod comments;
mod error;
mod parser;
mod span;
mod stream;
mod tokeniser;

#[cfg(test)]
mod test;

/// Parses a source code string into an AST.
///
/// # Examples
/// ```
/// use rlang_syntax::parse;
/// let ast = parse("x <- 5 + 3".to_owned());
///
/// assert!(ast.is_valid());
/// ```
pub fn parse(source: String) -> AST {
  let range = Span::new(0, u32::try_from(source.len()).unwrap_or(u32::MAX));
  parse_range(source, range)
}

/// Parses part of a source code string into an AST.
///
/// Positions in the tree are relative to the start of the whole source. The range is
/// clamped to the source.
///
/// # Examples
/// ```
/// use rlang_syntax::{Span, parse_range};
/// let ast = parse_range("f(a, b)  g(".to_owned(), Span::new(0, 7));
///
/// assert!(ast.is_valid());
/// assert_eq!(ast.root_expressions().len(), 1);
/// ```
///
/// # Panics
/// Panics if the source is longer than `u32::MAX` bytes, or the range does not fall on
/// character boundaries
pub fn parse_range(source: String, range: Span) -> AST {
  let length = u32::try_from(source.len()).unwrap_or(u32::MAX);
  let end = range.end.min(length);
  let range = Span::new(range.start.min(end), end);
  let mut ast = AST::new(source, range);

  let mut tokens = Vec::new();
  for token in tokeniser::Tokeniser::new(&ast.source, range) {
    if token.kind == TokenKind::Comment {
      ast.comments.push(token.into());
    } else {
      tokens.push(token);
    }
  }

  parser::Parser::new(&mut ast, tokens).parse();
  ast
}

/// Get the tokens from a source code string, including comments
pub fn tokenise(source: &str) -> impl Iterator<Item = Token> + '_ {
  tokeniser::Tokeniser::from(source)
}

pub use ast::AST;
pub use comments::CommentSet;
pub use error::{ErrorLocation, ParseError};
pub use span::{LineIndex, Span};
pub use tokeniser::{Token, TokenKind};
