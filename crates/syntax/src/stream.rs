//! A cursor over the tokens of the source
//!
//! The stream never re-scans the source, it only moves forwards over the tokens produced
//! by the [`Tokeniser`](crate::tokeniser::Tokeniser). The only way to move backwards is to
//! [`restore`](TokenStream::restore) a [`Checkpoint`], used for lookahead decisions.

use crate::{
  ast::TokenIdx,
  tokeniser::{Token, TokenKind},
};

/// A saved position of the stream, to return to after looking ahead
#[derive(Clone, Copy, Debug)]
pub(crate) struct Checkpoint {
  position: usize,
  previous: Option<usize>,
}

pub(crate) struct TokenStream {
  tokens: Vec<Token>,

  /// The current token
  position: usize,
  /// The last token which was advanced over, ignoring new lines
  previous: Option<usize>,
  /// Are new lines currently skipped over, as within brackets?
  newlines_ignored: bool,
}
impl TokenStream {
  /// Create a stream from a sequence of tokens, which must end in an end of file token
  pub fn new(mut tokens: Vec<Token>) -> Self {
    if tokens.last().is_none_or(|token| token.kind != TokenKind::EndOfFile) {
      let end = tokens.last().map_or(0, Token::end);
      tokens.push(Token {
        kind: TokenKind::EndOfFile,
        start: end,
        length: 0,
      });
    }

    Self {
      tokens,
      position: 0,
      previous: None,
      newlines_ignored: false,
    }
  }

  /// Give back the tokens, to be stored in the AST
  pub fn into_tokens(self) -> Vec<Token> {
    self.tokens
  }

  pub fn token(&self, index: TokenIdx) -> Token {
    self.tokens[index.index()]
  }

  pub fn current_idx(&self) -> TokenIdx {
    TokenIdx::from(self.position)
  }

  pub fn current(&self) -> Token {
    self.tokens[self.position]
  }

  pub fn current_kind(&self) -> TokenKind {
    self.tokens[self.position].kind
  }

  /// The kind of the token after the current one
  ///
  /// New lines are skipped if they are currently ignored.
  pub fn next_kind(&self) -> TokenKind {
    self.tokens[self.position + 1..]
      .iter()
      .map(|token| token.kind)
      .find(|kind| !self.newlines_ignored || *kind != TokenKind::EndOfLine)
      .unwrap_or(TokenKind::EndOfFile)
  }

  /// The last token which was advanced over
  pub fn previous(&self) -> Option<Token> {
    self.previous.map(|position| self.tokens[position])
  }

  pub fn previous_idx(&self) -> Option<TokenIdx> {
    self.previous.map(TokenIdx::from)
  }

  pub fn is_finished(&self) -> bool {
    self.current_kind() == TokenKind::EndOfFile
  }

  /// Move to the next token, returning the kind and index of the token moved over
  ///
  /// Never moves past the end of file token.
  #[must_use]
  pub fn advance(&mut self) -> (TokenKind, TokenIdx) {
    let result = (self.current_kind(), self.current_idx());

    if result.0 != TokenKind::EndOfFile {
      if result.0 != TokenKind::EndOfLine {
        self.previous = Some(self.position);
      }
      self.position += 1;
      self.skip_ignored_newlines();
    }

    result
  }

  /// Advance if the current token is of a given kind
  pub fn matches(&mut self, kind: TokenKind) -> Option<TokenIdx> {
    if self.current_kind() == kind {
      Some(self.advance().1)
    } else {
      None
    }
  }

  pub fn skip_newlines(&mut self) {
    while self.current_kind() == TokenKind::EndOfLine {
      self.position += 1;
    }
  }

  fn skip_ignored_newlines(&mut self) {
    if self.newlines_ignored {
      self.skip_newlines();
    }
  }

  /// Set whether new lines should be skipped, returning the previous setting to restore later
  pub fn ignore_newlines(&mut self, ignored: bool) -> bool {
    let previous = self.newlines_ignored;
    self.newlines_ignored = ignored;
    self.skip_ignored_newlines();
    previous
  }

  pub fn checkpoint(&self) -> Checkpoint {
    Checkpoint {
      position: self.position,
      previous: self.previous,
    }
  }

  pub fn restore(&mut self, checkpoint: Checkpoint) {
    self.position = checkpoint.position;
    self.previous = checkpoint.previous;
  }
}
