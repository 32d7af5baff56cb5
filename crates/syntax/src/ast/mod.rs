//! # AST
//!
//! The definition of the Abstract Syntax Tree (AST)
//!
//! Nodes are stored in an arena within the [`AST`], and refer to each other and to tokens
//! by index. The tree is built once per parse and never modified afterwards, a new parse
//! always creates a new [`AST`].

use crate::{
  LineIndex, Span,
  comments::CommentSet,
  error::ParseError,
  tokeniser::{Token, TokenKind},
};
use std::{cell::OnceCell, num::NonZero, ops};

pub mod argument;
pub mod expression;
mod node;
mod prettyprint;

pub use argument::{Argument, Parameter};
pub use expression::Expression;
pub use node::{AstNode, Node};

/// Abstract Syntax Tree representing the source
#[must_use]
#[derive(Debug)]
pub struct AST {
  /// The source code which the AST is for
  pub source: String,
  /// The range of the source which was parsed
  range: Span,
  /// Index of line locations, lazily constructed when required
  line_index: OnceCell<LineIndex>,
  /// The tokens of the source, excluding comments
  pub tokens: Vec<Token>,
  /// The locations of the comments in the source
  pub comments: CommentSet,

  /// The top level expressions of the source
  pub(crate) root_expressions: Vec<ExpressionIdx>,
  /// The expressions in the source
  pub expressions: Vec<Expression>,

  /// Errors found during parsing, ordered by position
  pub errors: Vec<ParseError>,
}
impl AST {
  pub(crate) fn new(source: String, range: Span) -> Self {
    Self {
      source,
      range,
      line_index: OnceCell::new(),
      tokens: Vec::new(),
      comments: CommentSet::default(),

      root_expressions: Vec::new(),
      expressions: Vec::new(),

      errors: Vec::new(),
    }
  }

  /// Is the parsed AST valid, with no errors found during parsing?
  #[must_use]
  pub fn is_valid(&self) -> bool {
    self.errors.is_empty()
  }

  /// The range of the source which was parsed
  pub fn range(&self) -> Span {
    self.range
  }

  /// The line index for the AST, the locations of the new lines in the source code
  ///
  /// It is lazily initialised, and will be initialised on the first call
  pub fn line_index(&self) -> &LineIndex {
    self
      .line_index
      .get_or_init(|| LineIndex::from_source(&self.source))
  }

  /// The top level expressions, in source order
  pub fn root_expressions(
    &self,
  ) -> impl DoubleEndedIterator<Item = &Expression> + ExactSizeIterator {
    self.root_expressions.iter().map(|index| &self[*index])
  }

  /// The top level nodes, in source order
  pub fn children(&self) -> impl DoubleEndedIterator<Item = Node<'_>> + ExactSizeIterator {
    self.root_expressions().map(Node::Expression)
  }

  /// Is a position within a comment?
  #[must_use]
  pub fn is_in_comment(&self, position: u32) -> bool {
    self.comments.contains(position)
  }

  pub(crate) fn add_expression(&mut self, expression: impl Into<Expression>) -> ExpressionIdx {
    self.expressions.push(expression.into());
    ExpressionIdx::from(self.expressions.len() - 1)
  }

  /// Remove all expressions created after a checkpoint from [`AST::expression_checkpoint`]
  pub(crate) fn discard_expressions(&mut self, checkpoint: usize) {
    self.expressions.truncate(checkpoint);
  }

  pub(crate) fn expression_checkpoint(&self) -> usize {
    self.expressions.len()
  }

  pub(crate) fn get_token_text(&self, token: TokenIdx) -> &str {
    Span::from(self[token]).source_text(&self.source)
  }

  pub(crate) fn token_span(&self, token: TokenIdx) -> Span {
    Span::from(self[token])
  }

  pub(crate) fn token_kind(&self, token: TokenIdx) -> TokenKind {
    self[token].kind
  }
}

impl ops::Index<ExpressionIdx> for AST {
  type Output = Expression;

  fn index(&self, index: ExpressionIdx) -> &Self::Output {
    &self.expressions[index.index()]
  }
}
impl ops::Index<TokenIdx> for AST {
  type Output = Token;

  fn index(&self, index: TokenIdx) -> &Self::Output {
    &self.tokens[index.index()]
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ExpressionIdx(NonZero<u32>);
impl ExpressionIdx {
  fn index(self) -> usize {
    usize::try_from(self.0.get()).unwrap_or(usize::MAX) - 1
  }
}
impl From<usize> for ExpressionIdx {
  fn from(value: usize) -> Self {
    let id = u32::try_from(value + 1).unwrap_or(u32::MAX);
    Self(NonZero::new(id).unwrap_or(NonZero::<u32>::MAX))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct TokenIdx(NonZero<u32>);
impl TokenIdx {
  pub(crate) fn index(self) -> usize {
    usize::try_from(self.0.get()).unwrap_or(usize::MAX) - 1
  }

  /// The tokens from this token to another, inclusive
  pub(crate) fn range(self, end: Self) -> impl Iterator<Item = Self> {
    (self.0.get()..=end.0.get()).filter_map(|x| NonZero::new(x).map(Self))
  }
}
impl From<usize> for TokenIdx {
  fn from(value: usize) -> Self {
    let id = u32::try_from(value + 1).unwrap_or(u32::MAX);
    Self(NonZero::new(id).unwrap_or(NonZero::<u32>::MAX))
  }
}
