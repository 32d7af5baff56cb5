//! # Arguments and Parameters
//!
//! The items of comma separated lists, the arguments of calls and indexes, and the
//! parameters of function definitions. Every item may end with a comma.

use crate::{
  ast::{AST, ExpressionIdx, TokenIdx, expression::Expression},
  span::Span,
  tokeniser::Token,
};
use std::fmt;

/// An argument to a call or index
#[derive(Debug)]
pub enum Argument {
  /// A positional argument, e.g. `f(x)`
  Expression(ExpressionArgument),
  /// A named argument, e.g. `f(x = 1)`
  Named(NamedArgument),
  /// Passing on extra arguments, `f(...)`
  Ellipsis(EllipsisArgument),
  /// An empty slot, e.g. the first argument of `x[, 1]`
  Missing(MissingArgument),
  /// A placeholder for an unfinished list, e.g. `f(`
  Stub(StubArgument),
  /// Tokens which could not be parsed as an argument
  Error(ErrorArgument),
}
impl Argument {
  /// The location of the argument, including its trailing comma
  ///
  /// A [`StubArgument`] doesn't exist in the source, so has no location.
  #[must_use]
  pub fn span(&self, ast: &AST) -> Option<Span> {
    match self {
      Self::Expression(argument) => Some(argument.span(ast)),
      Self::Named(argument) => Some(argument.span(ast)),
      Self::Ellipsis(argument) => Some(argument.span(ast)),
      Self::Missing(argument) => argument.span(ast),
      Self::Stub(_) => None,
      Self::Error(argument) => Some(argument.span(ast)),
    }
  }

  /// The name of the argument, if it is named
  #[must_use]
  pub fn name<'a>(&self, ast: &'a AST) -> Option<&'a str> {
    match self {
      Self::Named(argument) => Some(argument.name(ast)),
      _ => None,
    }
  }

  /// The value passed as the argument
  #[must_use]
  pub fn value<'a>(&self, ast: &'a AST) -> Option<&'a Expression> {
    match self {
      Self::Expression(argument) => Some(argument.value(ast)),
      Self::Named(argument) => argument.value(ast),
      _ => None,
    }
  }

  /// Is the argument a synthetic placeholder, not from the source?
  #[must_use]
  pub fn is_stub(&self) -> bool {
    matches!(self, Self::Stub(_))
  }

  /// The comma which ended the argument
  #[must_use]
  pub fn comma<'a>(&self, ast: &'a AST) -> Option<&'a Token> {
    self.comma_idx().map(|comma| &ast[comma])
  }

  fn comma_idx(&self) -> Option<TokenIdx> {
    match self {
      Self::Expression(argument) => argument.comma,
      Self::Named(argument) => argument.comma,
      Self::Ellipsis(argument) => argument.comma,
      Self::Missing(argument) => argument.comma,
      Self::Stub(_) => None,
      Self::Error(argument) => argument.comma,
    }
  }

  /// The name of the argument kind
  #[must_use]
  pub fn kind_name(&self) -> &'static str {
    match self {
      Self::Expression(_) => "ExpressionArgument",
      Self::Named(_) => "NamedArgument",
      Self::Ellipsis(_) => "EllipsisArgument",
      Self::Missing(_) => "MissingArgument",
      Self::Stub(_) => "StubArgument",
      Self::Error(_) => "ErrorArgument",
    }
  }
}

/// A parameter of a function definition
#[derive(Debug)]
pub enum Parameter {
  /// A named parameter, with an optional default value, e.g. `function(x, y = 2)`
  Named(NamedParameter),
  /// Accepting any extra arguments, `function(...)`
  Ellipsis(EllipsisArgument),
  /// An empty slot, e.g. `function(x, , y)`
  Missing(MissingArgument),
  /// A placeholder for an unfinished list, e.g. `function(`
  Stub(StubArgument),
  /// Tokens which could not be parsed as a parameter
  Error(ErrorArgument),
}
impl Parameter {
  /// The location of the parameter, including its trailing comma
  #[must_use]
  pub fn span(&self, ast: &AST) -> Option<Span> {
    match self {
      Self::Named(parameter) => Some(parameter.span(ast)),
      Self::Ellipsis(parameter) => Some(parameter.span(ast)),
      Self::Missing(parameter) => parameter.span(ast),
      Self::Stub(_) => None,
      Self::Error(parameter) => Some(parameter.span(ast)),
    }
  }

  /// The name of the parameter, `...` for an ellipsis
  #[must_use]
  pub fn name<'a>(&self, ast: &'a AST) -> Option<&'a str> {
    match self {
      Self::Named(parameter) => Some(parameter.name(ast)),
      Self::Ellipsis(_) => Some("..."),
      _ => None,
    }
  }

  /// The comma which ended the parameter
  #[must_use]
  pub fn comma<'a>(&self, ast: &'a AST) -> Option<&'a Token> {
    self.comma_idx().map(|comma| &ast[comma])
  }

  fn comma_idx(&self) -> Option<TokenIdx> {
    match self {
      Self::Named(parameter) => parameter.comma,
      Self::Ellipsis(parameter) => parameter.comma,
      Self::Missing(parameter) => parameter.comma,
      Self::Stub(_) => None,
      Self::Error(parameter) => parameter.comma,
    }
  }

  /// The name of the parameter kind
  #[must_use]
  pub fn kind_name(&self) -> &'static str {
    match self {
      Self::Named(_) => "NamedParameter",
      Self::Ellipsis(_) => "EllipsisArgument",
      Self::Missing(_) => "MissingArgument",
      Self::Stub(_) => "StubArgument",
      Self::Error(_) => "ErrorArgument",
    }
  }
}

fn with_comma(span: Span, comma: Option<TokenIdx>, ast: &AST) -> Span {
  match comma {
    Some(comma) => span.merge(ast.token_span(comma)),
    None => span,
  }
}

/// A positional argument, e.g. `f(x)`
#[derive(Debug)]
pub struct ExpressionArgument {
  pub(crate) value: ExpressionIdx,
  pub(crate) comma: Option<TokenIdx>,
}
impl ExpressionArgument {
  /// The value of the argument
  pub fn value<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.value]
  }

  /// The location of the argument
  pub fn span(&self, ast: &AST) -> Span {
    with_comma(self.value(ast).span(ast), self.comma, ast)
  }
}

/// A named argument, e.g. `f(x = 1)`, `f("x" = 1)`
///
/// The value may be empty, as in `switch(x, a = , b = 2)`.
#[derive(Debug)]
pub struct NamedArgument {
  pub(crate) name: TokenIdx,
  pub(crate) equals: TokenIdx,
  pub(crate) value: Option<ExpressionIdx>,
  pub(crate) comma: Option<TokenIdx>,
}
impl NamedArgument {
  /// The name of the argument, the text of the name token
  #[must_use]
  pub fn name<'a>(&self, ast: &'a AST) -> &'a str {
    ast.get_token_text(self.name)
  }
  /// The value of the argument
  #[must_use]
  pub fn value<'a>(&self, ast: &'a AST) -> Option<&'a Expression> {
    self.value.map(|value| &ast[value])
  }

  /// The location of the argument
  pub fn span(&self, ast: &AST) -> Span {
    let span = ast.token_span(self.name).merge(ast.token_span(self.equals));
    let span = match self.value(ast) {
      Some(value) => span.merge(value.span(ast)),
      None => span,
    };

    with_comma(span, self.comma, ast)
  }
}

/// A named parameter, e.g. `x`, `y = 2`
#[derive(Debug)]
pub struct NamedParameter {
  pub(crate) name: TokenIdx,
  pub(crate) equals: Option<TokenIdx>,
  pub(crate) default: Option<ExpressionIdx>,
  pub(crate) comma: Option<TokenIdx>,
}
impl NamedParameter {
  /// The name of the parameter
  #[must_use]
  pub fn name<'a>(&self, ast: &'a AST) -> &'a str {
    ast.get_token_text(self.name)
  }
  /// The default value of the parameter
  #[must_use]
  pub fn default<'a>(&self, ast: &'a AST) -> Option<&'a Expression> {
    self.default.map(|default| &ast[default])
  }

  /// The location of the parameter
  pub fn span(&self, ast: &AST) -> Span {
    let mut span = ast.token_span(self.name);
    if let Some(equals) = self.equals {
      span = span.merge(ast.token_span(equals));
    }
    if let Some(default) = self.default(ast) {
      span = span.merge(default.span(ast));
    }

    with_comma(span, self.comma, ast)
  }
}

/// Passing on or accepting extra arguments, `...`
#[derive(Debug)]
pub struct EllipsisArgument {
  pub(crate) token: TokenIdx,
  pub(crate) comma: Option<TokenIdx>,
}
impl EllipsisArgument {
  /// The location of the ellipsis
  pub fn span(&self, ast: &AST) -> Span {
    with_comma(ast.token_span(self.token), self.comma, ast)
  }
}
impl fmt::Display for EllipsisArgument {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "...")
  }
}

/// An empty slot in a list, only its comma exists in the source
#[derive(Debug)]
pub struct MissingArgument {
  pub(crate) comma: Option<TokenIdx>,
}
impl MissingArgument {
  /// The location of the comma ending the slot
  #[must_use]
  pub fn span(&self, ast: &AST) -> Option<Span> {
    self.comma.map(|comma| ast.token_span(comma))
  }
}

/// A placeholder item for a list which was never closed
///
/// It has no location in the source, so is never found by position.
#[derive(Debug, Default)]
pub struct StubArgument;

/// Tokens which could not be parsed as a list item, kept as written
#[derive(Debug)]
pub struct ErrorArgument {
  pub(crate) first: TokenIdx,
  pub(crate) last: TokenIdx,
  pub(crate) comma: Option<TokenIdx>,
}
impl ErrorArgument {
  /// The tokens which make up the item, excluding the comma
  pub fn tokens<'a>(&self, ast: &'a AST) -> impl Iterator<Item = &'a Token> {
    self.first.range(self.last).map(|token| &ast[token])
  }

  /// The source text of the item, excluding the comma
  #[must_use]
  pub fn text<'a>(&self, ast: &'a AST) -> &'a str {
    ast
      .token_span(self.first)
      .merge(ast.token_span(self.last))
      .source_text(&ast.source)
  }

  /// The location of the item
  pub fn span(&self, ast: &AST) -> Span {
    let span = ast.token_span(self.first).merge(ast.token_span(self.last));
    with_comma(span, self.comma, ast)
  }
}
