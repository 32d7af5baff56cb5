//! Comma separated lists, the arguments of calls and indexes, and function parameters
//!
//! Each item is classified from the current tokens, then parsed as that kind. If an item
//! fails to parse, its tokens are skipped to the next comma or the end of the list and
//! kept as an error item, so the rest of the list is still parsed. Only a `}` belonging
//! to an enclosing block abandons the whole list.

use super::Parser;
use crate::{
  ast::{
    TokenIdx,
    argument::{
      Argument, EllipsisArgument, ErrorArgument, ExpressionArgument, MissingArgument,
      NamedArgument, NamedParameter, Parameter, StubArgument,
    },
  },
  error::ParseError,
  stream::TokenStream,
  tokeniser::{Token, TokenKind},
};
use rustc_hash::FxHashSet;
use thin_vec::ThinVec;

/// How a list finished
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ListEnd {
  /// The closing token was found
  Closed(TokenIdx),
  /// The end of the file was reached first
  Unclosed,
  /// A `}` for an enclosing block was found first
  Aborted,
}
impl ListEnd {
  pub fn closing(self) -> Option<TokenIdx> {
    match self {
      Self::Closed(token) => Some(token),
      Self::Unclosed | Self::Aborted => None,
    }
  }
}

/// The items of a kind of list, and how to decide which item comes next
pub(super) trait ListGrammar {
  /// The kinds of item which can be chosen from the current token
  type Kind: Copy;
  /// An item of the list
  type Item;

  /// Choose what kind of item the tokens start
  fn classify(stream: &TokenStream) -> Self::Kind;
  /// Parse an item of the chosen kind, not including its comma
  fn parse_item(parser: &mut Parser<'_>, kind: Self::Kind, terminator: TokenKind) -> Self::Item;

  /// An item made of tokens which couldn't be parsed
  fn error_item(error: ErrorArgument) -> Self::Item;
  /// A placeholder item for a list which is never closed
  fn stub_item() -> Self::Item;
  /// Attach the comma which ends the item
  fn set_comma(item: &mut Self::Item, comma: TokenIdx);

  /// Check a comma directly before the closing token
  fn trailing_comma(_parser: &mut Parser<'_>) {}
}

/// Does the current token end an item?
fn is_item_end(kind: TokenKind, terminator: TokenKind) -> bool {
  kind == terminator
    || matches!(
      kind,
      TokenKind::Comma | TokenKind::RightCurly | TokenKind::EndOfFile
    )
}

impl Parser<'_> {
  /// Parse a comma separated list, after its opening bracket
  ///
  /// Gives `None` rather than an empty list when there are no items, or the list was
  /// abandoned. When the end of the file is reached where an item could start, a stub
  /// item ends the list.
  pub(super) fn comma_list<G: ListGrammar>(
    &mut self,
    opening: TokenIdx,
    terminator: TokenKind,
  ) -> (Option<ThinVec<G::Item>>, ListEnd) {
    let newlines_ignored = self.stream.ignore_newlines(true);
    let checkpoint = self.ast.expression_checkpoint();
    let mut items = ThinVec::new();
    let mut open_slot = true;

    let end = loop {
      match self.stream.current_kind() {
        kind if kind == terminator => {
          if open_slot && !items.is_empty() {
            G::trailing_comma(self);
          }
          self.stream.ignore_newlines(newlines_ignored);
          break ListEnd::Closed(self.stream.advance().1);
        }
        TokenKind::EndOfFile => break ListEnd::Unclosed,
        TokenKind::RightCurly => break ListEnd::Aborted,
        _ => {}
      }

      let (item, has_comma) = self.list_item::<G>(terminator);
      items.push(item);
      open_slot = has_comma;
    };
    self.stream.ignore_newlines(newlines_ignored);

    match end {
      ListEnd::Closed(_) => {}
      ListEnd::Unclosed => {
        if open_slot {
          items.push(G::stub_item());
        }
        self.missing_closing(opening);
      }
      ListEnd::Aborted => {
        self.ast.discard_expressions(checkpoint);
        self.missing_closing(opening);
        return (None, end);
      }
    }

    let items = if items.is_empty() { None } else { Some(items) };
    (items, end)
  }

  /// Parse an item and its trailing comma, if it has one
  fn list_item<G: ListGrammar>(&mut self, terminator: TokenKind) -> (G::Item, bool) {
    let first = self.stream.current_idx();
    let checkpoint = self.ast.expression_checkpoint();

    let kind = G::classify(&self.stream);
    let mut item = G::parse_item(self, kind, terminator);

    let current = self.stream.current_kind();
    if !self.should_resync && !is_item_end(current, terminator) {
      self.add_error(ParseError::UnexpectedToken(self.current_token()));
      self.should_resync = true;
    }

    if self.should_resync {
      self.ast.discard_expressions(checkpoint);
      self.resync(&[TokenKind::Comma, terminator]);

      let last = self
        .stream
        .previous_idx()
        .filter(|last| *last >= first)
        .unwrap_or(first);
      item = G::error_item(ErrorArgument {
        first,
        last,
        comma: None,
      });
    }

    let comma = self.stream.matches(TokenKind::Comma);
    if let Some(comma) = comma {
      G::set_comma(&mut item, comma);
    }

    (item, comma.is_some())
  }

  pub(super) fn check_duplicate_parameters(&mut self, parameters: &[Parameter]) {
    let mut seen = FxHashSet::default();
    let duplicates: Vec<Token> = parameters
      .iter()
      .filter_map(|parameter| match parameter {
        Parameter::Named(parameter) => Some(parameter.name),
        _ => None,
      })
      .filter(|name| !seen.insert(self.token_text(*name)))
      .map(|name| self.stream.token(name))
      .collect();

    for token in duplicates {
      self.add_error(ParseError::DuplicateParameter(token));
    }
  }
}

/// The kinds of argument
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ArgumentKind {
  Ellipsis,
  Missing,
  Named,
  Expression,
}

/// The arguments of a call or an index
pub(super) struct ArgumentList;
impl ListGrammar for ArgumentList {
  type Kind = ArgumentKind;
  type Item = Argument;

  fn classify(stream: &TokenStream) -> ArgumentKind {
    match stream.current_kind() {
      TokenKind::Ellipsis => ArgumentKind::Ellipsis,
      TokenKind::Comma => ArgumentKind::Missing,
      TokenKind::Identifier | TokenKind::String if stream.next_kind() == TokenKind::Equal => {
        ArgumentKind::Named
      }
      _ => ArgumentKind::Expression,
    }
  }

  fn parse_item(parser: &mut Parser<'_>, kind: ArgumentKind, terminator: TokenKind) -> Argument {
    match kind {
      ArgumentKind::Ellipsis => Argument::Ellipsis(EllipsisArgument {
        token: parser.stream.advance().1,
        comma: None,
      }),
      ArgumentKind::Missing => Argument::Missing(MissingArgument { comma: None }),
      ArgumentKind::Named => {
        let (_, name) = parser.stream.advance();
        let (_, equals) = parser.stream.advance();
        let value = (!is_item_end(parser.stream.current_kind(), terminator))
          .then(|| parser.parse_expression());

        Argument::Named(NamedArgument {
          name,
          equals,
          value,
          comma: None,
        })
      }
      ArgumentKind::Expression => Argument::Expression(ExpressionArgument {
        value: parser.parse_expression(),
        comma: None,
      }),
    }
  }

  fn error_item(error: ErrorArgument) -> Argument {
    Argument::Error(error)
  }

  fn stub_item() -> Argument {
    Argument::Stub(StubArgument)
  }

  fn set_comma(item: &mut Argument, comma: TokenIdx) {
    match item {
      Argument::Expression(argument) => argument.comma = Some(comma),
      Argument::Named(argument) => argument.comma = Some(comma),
      Argument::Ellipsis(argument) => argument.comma = Some(comma),
      Argument::Missing(argument) => argument.comma = Some(comma),
      Argument::Error(argument) => argument.comma = Some(comma),
      Argument::Stub(_) => {}
    }
  }
}

/// The kinds of parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ParameterKind {
  Ellipsis,
  Missing,
  Named,
  Invalid,
}

/// The parameters of a function definition
pub(super) struct ParameterList;
impl ListGrammar for ParameterList {
  type Kind = ParameterKind;
  type Item = Parameter;

  fn classify(stream: &TokenStream) -> ParameterKind {
    match stream.current_kind() {
      TokenKind::Ellipsis => ParameterKind::Ellipsis,
      TokenKind::Comma => ParameterKind::Missing,
      TokenKind::Identifier => ParameterKind::Named,
      _ => ParameterKind::Invalid,
    }
  }

  fn parse_item(parser: &mut Parser<'_>, kind: ParameterKind, terminator: TokenKind) -> Parameter {
    match kind {
      ParameterKind::Ellipsis => Parameter::Ellipsis(EllipsisArgument {
        token: parser.stream.advance().1,
        comma: None,
      }),
      ParameterKind::Missing => {
        parser.add_error(ParseError::ExpectedParameter(parser.current_token()));
        Parameter::Missing(MissingArgument { comma: None })
      }
      ParameterKind::Named => {
        let (_, name) = parser.stream.advance();
        let equals = parser.stream.matches(TokenKind::Equal);

        let default = match equals {
          Some(_) if is_item_end(parser.stream.current_kind(), terminator) => {
            parser.add_error(ParseError::ExpectedExpression(parser.current_token()));
            None
          }
          Some(_) => Some(parser.parse_expression()),
          None => None,
        };

        Parameter::Named(NamedParameter {
          name,
          equals,
          default,
          comma: None,
        })
      }
      ParameterKind::Invalid => {
        parser.add_error(ParseError::ExpectedIdentifier(parser.current_token()));
        parser.should_resync = true;
        Parameter::Stub(StubArgument)
      }
    }
  }

  fn error_item(error: ErrorArgument) -> Parameter {
    Parameter::Error(error)
  }

  fn stub_item() -> Parameter {
    Parameter::Stub(StubArgument)
  }

  fn set_comma(item: &mut Parameter, comma: TokenIdx) {
    match item {
      Parameter::Named(parameter) => parameter.comma = Some(comma),
      Parameter::Ellipsis(parameter) => parameter.comma = Some(comma),
      Parameter::Missing(parameter) => parameter.comma = Some(comma),
      Parameter::Error(parameter) => parameter.comma = Some(comma),
      Parameter::Stub(_) => {}
    }
  }

  fn trailing_comma(parser: &mut Parser<'_>) {
    parser.add_error(ParseError::ExpectedParameter(parser.current_token()));
  }
}
