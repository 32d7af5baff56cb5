//! # Parse Errors

use crate::{
  span::Span,
  tokeniser::{Token, TokenKind},
};
use std::{error, fmt};

/// Where an error is, relative to its token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorLocation {
  /// The error covers the token
  Token,
  /// Something is missing after the token
  AfterToken,
}

/// An error found while parsing
///
/// Errors are never fatal, parsing always continues to produce a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
  /// Expected a token of a certain kind
  Expected {
    /// Expected Token Kind to be
    expected: TokenKind,
    /// The token after which it was expected
    after: Token,
    /// Received this Token instead
    received: Token,
  },
  /// Expected Expression
  ExpectedExpression(Token),
  /// Expected Identifier
  ExpectedIdentifier(Token),
  /// Expected Parameter, found an empty slot in a parameter list
  ExpectedParameter(Token),
  /// A token which doesn't fit where it is
  UnexpectedToken(Token),
  /// A closing bracket without an opening bracket
  UnmatchedClosing(Token),
  /// A bracket was opened but never closed
  MissingClosing {
    /// The bracket which was opened
    opening: Token,
    /// The last token before the missing bracket
    after: Token,
  },
  /// Unknown Character
  UnknownCharacter(Token),
  /// Unterminated String Literal
  UnterminatedString(Token),
  /// Number with a missing exponent or digits
  InvalidNumber(Token),
  /// A parameter name used more than once
  DuplicateParameter(Token),
}
impl ParseError {
  /// The title of the error message
  #[must_use]
  pub fn title(&self) -> String {
    match self {
      Self::Expected { expected, .. } => format!("Expected {expected}"),
      Self::ExpectedExpression(_) => "Expected Expression".into(),
      Self::ExpectedIdentifier(_) => "Expected Identifier".into(),
      Self::ExpectedParameter(_) => "Expected Parameter".into(),
      Self::UnexpectedToken(_) => "Unexpected Token".into(),
      Self::UnmatchedClosing(_) => "Unmatched Closing Bracket".into(),
      Self::MissingClosing { .. } => "Missing Closing Bracket".into(),
      Self::UnknownCharacter(_) => "Unknown Character".into(),
      Self::UnterminatedString(_) => "Unterminated String".into(),
      Self::InvalidNumber(_) => "Invalid Number".into(),
      Self::DuplicateParameter(_) => "Duplicate Parameter".into(),
    }
  }

  /// The body of the error message describing what has gone wrong
  #[must_use]
  pub fn message(&self) -> String {
    match self {
      Self::Expected {
        expected, received, ..
      } => {
        format!("expected {expected} but got {}", received.kind)
      }
      Self::ExpectedExpression(t) => format!("expected expression but got {}", t.kind),
      Self::ExpectedIdentifier(t) => format!("expected identifier but got {}", t.kind),
      Self::ExpectedParameter(t) => format!("expected parameter name but got {}", t.kind),
      Self::UnexpectedToken(t) => format!("unexpected {}", t.kind),
      Self::UnmatchedClosing(t) => format!("found `{}` without a matching opening bracket", t.kind),
      Self::MissingClosing { opening, .. } => {
        format!("`{}` was opened but never closed", opening.kind)
      }
      Self::UnknownCharacter(_) => "got unknown character".into(),
      Self::UnterminatedString(_) => "missing closing quote for string".into(),
      Self::InvalidNumber(_) => "number is missing digits".into(),
      Self::DuplicateParameter(_) => "parameter names must be unique within a function".into(),
    }
  }

  /// The title and message of the error in a combined string
  #[must_use]
  pub fn full_message(&self) -> String {
    let mut message = self.title();
    message.push('\n');
    message.push_str(&self.message());
    message
  }

  /// The token the error is attached to
  #[must_use]
  pub fn token(&self) -> Token {
    match self {
      Self::Expected { after, .. } | Self::MissingClosing { after, .. } => *after,
      Self::ExpectedExpression(token)
      | Self::ExpectedIdentifier(token)
      | Self::ExpectedParameter(token)
      | Self::UnexpectedToken(token)
      | Self::UnmatchedClosing(token)
      | Self::UnknownCharacter(token)
      | Self::UnterminatedString(token)
      | Self::InvalidNumber(token)
      | Self::DuplicateParameter(token) => *token,
    }
  }

  /// Is the error about the token, or about something missing after it?
  pub fn location(&self) -> ErrorLocation {
    match self {
      Self::Expected { .. } | Self::MissingClosing { .. } => ErrorLocation::AfterToken,
      _ => ErrorLocation::Token,
    }
  }

  /// The location of the error
  ///
  /// When something is missing, it is the zero width position after the token.
  pub fn span(&self) -> Span {
    let token = self.token();

    match self.location() {
      ErrorLocation::Token => token.into(),
      ErrorLocation::AfterToken => Span::at(token.end()),
    }
  }
}
impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message())
  }
}
impl error::Error for ParseError {}
