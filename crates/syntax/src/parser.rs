use crate::{
  ast::{AST, ExpressionIdx, TokenIdx, expression::*},
  error::ParseError,
  span::Span,
  stream::TokenStream,
  tokeniser::{Token, TokenKind},
};
use thin_vec::ThinVec;

mod list;

use list::{ArgumentList, ListEnd, ParameterList};

/// The state of a single parse, thrown away once the tree is built
pub struct Parser<'ast> {
  /// The AST being built up by the parser
  ast: &'ast mut AST,
  /// The tokens of the source
  stream: TokenStream,

  /// How many blocks are we currently in
  block_depth: usize,
  /// Have we encountered an error, and want to resync at the next chance?
  should_resync: bool,
}
impl<'ast> Parser<'ast> {
  pub fn new(ast: &'ast mut AST, tokens: Vec<Token>) -> Self {
    Self {
      ast,
      stream: TokenStream::new(tokens),
      block_depth: 0,
      should_resync: false,
    }
  }

  pub fn parse(mut self) {
    let expressions = self.statement_sequence();
    self.ast.root_expressions = expressions.into_iter().collect();

    self.ast.tokens = self.stream.into_tokens();
    self.ast.errors.sort_by_key(|error| error.span().start);
  }

  fn add_error(&mut self, error: ParseError) {
    self.ast.errors.push(error);
  }

  fn current_token(&self) -> Token {
    self.stream.current()
  }

  /// The last token moved over, or the current token if at the start
  fn previous_token(&self) -> Token {
    self.stream.previous().unwrap_or_else(|| self.stream.current())
  }

  fn token_text(&self, token: TokenIdx) -> &str {
    Span::from(self.stream.token(token)).source_text(&self.ast.source)
  }

  fn expect(&mut self, kind: TokenKind) -> Option<TokenIdx> {
    let token = self.stream.matches(kind);

    if token.is_none() {
      self.add_error(ParseError::Expected {
        expected: kind,
        after: self.previous_token(),
        received: self.current_token(),
      });
    }

    token
  }

  /// Skip forward to a token which parsing can continue from
  ///
  /// Stops at one of the given kinds, a `}` or the end of the file, ignoring any which
  /// are within brackets opened while skipping.
  fn resync(&mut self, stops: &[TokenKind]) {
    let mut depth = 0_usize;

    while !self.stream.is_finished() {
      let kind = self.stream.current_kind();
      match kind {
        _ if depth == 0 && (kind == TokenKind::RightCurly || stops.contains(&kind)) => break,
        TokenKind::LeftDoubleSquare => depth += 2,
        _ if kind.is_opening_bracket() => depth += 1,
        _ if kind.is_closing_bracket() => depth = depth.saturating_sub(1),
        _ => {}
      }

      _ = self.stream.advance();
    }

    self.should_resync = false;
  }

  fn resync_if_error(&mut self, stops: &[TokenKind]) {
    if self.should_resync {
      self.resync(stops);
    }
  }

  /// Expressions separated by new lines or semicolons, until a `}` or the end of the file
  fn statement_sequence(&mut self) -> ThinVec<ExpressionIdx> {
    let mut expressions = ThinVec::new();

    loop {
      while matches!(
        self.stream.current_kind(),
        TokenKind::EndOfLine | TokenKind::Semicolon
      ) {
        _ = self.stream.advance();
      }

      match self.stream.current_kind() {
        TokenKind::EndOfFile => break,
        TokenKind::RightCurly if self.block_depth > 0 => break,
        TokenKind::RightCurly | TokenKind::RightParen | TokenKind::RightSquare => {
          self.add_error(ParseError::UnmatchedClosing(self.current_token()));
          _ = self.stream.advance();
          continue;
        }
        _ => {}
      }

      expressions.push(self.parse_expression());
      self.resync_if_error(&[TokenKind::EndOfLine, TokenKind::Semicolon]);

      match self.stream.current_kind() {
        TokenKind::EndOfLine
        | TokenKind::Semicolon
        | TokenKind::EndOfFile
        | TokenKind::RightCurly
        | TokenKind::RightParen
        | TokenKind::RightSquare => {}
        _ => self.add_error(ParseError::UnexpectedToken(self.current_token())),
      }
    }

    expressions
  }

  fn parse_expression(&mut self) -> ExpressionIdx {
    self.parse_expression_with_precedence(ParsePrecedence::LOWEST)
  }

  fn parse_expression_with_precedence(&mut self, precedence: ParsePrecedence) -> ExpressionIdx {
    let mut previous = match self.prefix_expression() {
      Ok(expression) => expression,
      Err((error, token)) => {
        self.add_error(error);
        self.should_resync = true;
        return self.ast.add_expression(Invalid { token });
      }
    };

    while precedence <= ParsePrecedence::from(self.stream.current_kind()) {
      let (kind, token) = self.stream.advance();
      previous = self.infix_expression(previous, kind, token);
    }

    previous
  }

  /// Parse a prefix expression
  ///
  /// An expression which starts/ makes up the first part of the expression
  fn prefix_expression(&mut self) -> Result<ExpressionIdx, (ParseError, TokenIdx)> {
    if !can_start_expression(self.stream.current_kind()) {
      let token = self.stream.current_idx();
      return Err((ParseError::ExpectedExpression(self.current_token()), token));
    }

    let (kind, token) = self.stream.advance();
    match kind {
      TokenKind::Identifier | TokenKind::String
        if matches!(
          self.stream.current_kind(),
          TokenKind::ColonColon | TokenKind::ColonColonColon
        ) =>
      {
        Ok(self.namespace(token))
      }

      TokenKind::Number
      | TokenKind::String
      | TokenKind::True
      | TokenKind::False
      | TokenKind::Null
      | TokenKind::Na
      | TokenKind::Inf
      | TokenKind::NaN => Ok(self.ast.add_expression(Literal { token })),
      TokenKind::InvalidNumber => {
        self.add_error(ParseError::InvalidNumber(self.stream.token(token)));
        Ok(self.ast.add_expression(Literal { token }))
      }
      TokenKind::Identifier | TokenKind::Ellipsis => {
        Ok(self.ast.add_expression(Variable { token }))
      }

      TokenKind::LeftCurly => Ok(self.block(token)),
      TokenKind::LeftParen => Ok(self.group(token)),
      TokenKind::Function | TokenKind::Backslash => Ok(self.function(token)),

      TokenKind::Minus | TokenKind::Plus => Ok(self.unary(token, ParsePrecedence::UnaryMinus)),
      TokenKind::Bang => Ok(self.unary(token, ParsePrecedence::Not)),
      TokenKind::Tilde => Ok(self.unary(token, ParsePrecedence::Tilde)),
      TokenKind::Question => Ok(self.unary(token, ParsePrecedence::Help)),

      TokenKind::If => Ok(self.if_(token)),
      TokenKind::For => Ok(self.for_(token)),
      TokenKind::While => Ok(self.while_(token)),
      TokenKind::Repeat => Ok(self.repeat(token)),
      TokenKind::Break | TokenKind::Next => Ok(self.ast.add_expression(Control { token })),

      TokenKind::Unknown => Err((ParseError::UnknownCharacter(self.stream.token(token)), token)),
      TokenKind::UnterminatedString => Err((
        ParseError::UnterminatedString(self.stream.token(token)),
        token,
      )),
      _ => Err((ParseError::ExpectedExpression(self.stream.token(token)), token)),
    }
  }

  /// Parse an infix expression
  ///
  /// An expression which relies on a previous expression to be complete.
  /// Passes the previously parsed expression to make up the start of the expression.
  /// It takes the relevant token as the operator, and the sub-function to parse the rest
  fn infix_expression(
    &mut self,
    lhs: ExpressionIdx,
    kind: TokenKind,
    operator: TokenIdx,
  ) -> ExpressionIdx {
    match kind {
      TokenKind::LeftParen => self.call(lhs, operator),
      TokenKind::LeftSquare | TokenKind::LeftDoubleSquare => self.index(lhs, operator),
      TokenKind::Dollar | TokenKind::At => self.member(lhs, operator),
      TokenKind::LeftAssign
      | TokenKind::LeftSuperAssign
      | TokenKind::RightAssign
      | TokenKind::RightSuperAssign
      | TokenKind::ColonEqual
      | TokenKind::Equal => self.assignment(lhs, kind, operator),
      _ => self.binary(lhs, kind, operator),
    }
  }

  /// The right hand side of an operator, which can start on the next line
  fn operand(&mut self, kind: TokenKind) -> ExpressionIdx {
    let precedence = ParsePrecedence::from(kind);
    let precedence = if is_right_associative(kind) {
      precedence
    } else {
      precedence.next()
    };

    self.stream.skip_newlines();
    self.parse_expression_with_precedence(precedence)
  }

  /// A name after `$`, `@` or `::`, an identifier or a string
  fn member_name(&mut self) -> Option<TokenIdx> {
    match self.stream.current_kind() {
      TokenKind::Identifier | TokenKind::String => Some(self.stream.advance().1),
      _ => {
        self.add_error(ParseError::ExpectedIdentifier(self.current_token()));
        None
      }
    }
  }

  /// Open a bracketed region, where new lines are insignificant
  ///
  /// Gives the opening bracket and whether new lines were ignored before.
  fn open_bracket(&mut self) -> Option<(TokenIdx, bool)> {
    let opening = self.expect(TokenKind::LeftParen)?;
    Some((opening, self.stream.ignore_newlines(true)))
  }

  /// Close a bracketed region, skipping anything before the closing bracket
  fn close_bracket(&mut self, opened: Option<(TokenIdx, bool)>) -> Option<TokenIdx> {
    let (opening, newlines_ignored) = opened?;

    if !self.should_resync
      && !matches!(
        self.stream.current_kind(),
        TokenKind::RightParen | TokenKind::RightCurly | TokenKind::EndOfFile
      )
    {
      self.add_error(ParseError::UnexpectedToken(self.current_token()));
      self.should_resync = true;
    }
    self.resync_if_error(&[TokenKind::RightParen]);

    self.stream.ignore_newlines(newlines_ignored);
    let closing = self.stream.matches(TokenKind::RightParen);
    if closing.is_none() {
      self.missing_closing(opening);
    }

    closing
  }

  fn missing_closing(&mut self, opening: TokenIdx) {
    self.add_error(ParseError::MissingClosing {
      opening: self.stream.token(opening),
      after: self.previous_token(),
    });
  }

  /// A body of a function or control flow, which can start on the next line
  fn body(&mut self) -> ExpressionIdx {
    self.stream.skip_newlines();
    self.parse_expression()
  }
}
// Expressions
impl Parser<'_> {
  fn assignment(
    &mut self,
    left: ExpressionIdx,
    kind: TokenKind,
    operator: TokenIdx,
  ) -> ExpressionIdx {
    let right = self.operand(kind);

    self.ast.add_expression(Assignment {
      left,
      operator,
      right,
    })
  }

  fn binary(&mut self, left: ExpressionIdx, kind: TokenKind, operator: TokenIdx) -> ExpressionIdx {
    let right = self.operand(kind);

    self.ast.add_expression(Binary {
      left,
      operator,
      right,
    })
  }

  fn block(&mut self, opening: TokenIdx) -> ExpressionIdx {
    let newlines_ignored = self.stream.ignore_newlines(false);

    self.block_depth += 1;
    let expressions = self.statement_sequence();
    self.block_depth -= 1;

    self.stream.ignore_newlines(newlines_ignored);
    let closing = self.stream.matches(TokenKind::RightCurly);
    if closing.is_none() {
      self.missing_closing(opening);
    }

    self.ast.add_expression(Block {
      opening,
      expressions,
      closing,
    })
  }

  fn call(&mut self, callee: ExpressionIdx, opening: TokenIdx) -> ExpressionIdx {
    let (arguments, end) = self.comma_list::<ArgumentList>(opening, TokenKind::RightParen);

    self.ast.add_expression(Call {
      callee,
      opening,
      arguments,
      closing: end.closing(),
    })
  }

  fn for_(&mut self, keyword: TokenIdx) -> ExpressionIdx {
    let opened = self.open_bracket();

    let variable = if self.stream.current_kind() == TokenKind::Identifier {
      let (_, token) = self.stream.advance();
      Some(self.ast.add_expression(Variable { token }))
    } else {
      self.add_error(ParseError::ExpectedIdentifier(self.current_token()));
      None
    };

    self.expect(TokenKind::In);
    let sequence = self.parse_expression();
    let closing = self.close_bracket(opened);

    let body = self.body();

    self.ast.add_expression(For {
      keyword,
      variable,
      sequence,
      closing,
      body,
    })
  }

  fn function(&mut self, keyword: TokenIdx) -> ExpressionIdx {
    let Some(opening) = self.expect(TokenKind::LeftParen) else {
      return self.ast.add_expression(Function {
        keyword,
        opening: None,
        parameters: None,
        closing: None,
        body: None,
      });
    };

    let (parameters, end) = self.comma_list::<ParameterList>(opening, TokenKind::RightParen);
    if let Some(parameters) = &parameters {
      self.check_duplicate_parameters(parameters);
    }

    let body = match end {
      ListEnd::Closed(_) => Some(self.body()),
      ListEnd::Unclosed | ListEnd::Aborted => None,
    };

    self.ast.add_expression(Function {
      keyword,
      opening: Some(opening),
      parameters,
      closing: end.closing(),
      body,
    })
  }

  fn group(&mut self, start: TokenIdx) -> ExpressionIdx {
    let newlines_ignored = self.stream.ignore_newlines(true);

    if self.stream.current_kind() == TokenKind::RightParen {
      self.stream.ignore_newlines(newlines_ignored);
      return self.empty_group(start);
    }

    let expression = self.parse_expression();
    let end = self.close_bracket(Some((start, newlines_ignored)));

    self.ast.add_expression(Group {
      start,
      expression,
      end,
    })
  }

  fn empty_group(&mut self, start: TokenIdx) -> ExpressionIdx {
    let (_, end) = self.stream.advance();
    let expression = self.ast.add_expression(Invalid { token: end });
    self.add_error(ParseError::ExpectedExpression(self.stream.token(end)));

    self.ast.add_expression(Group {
      start,
      expression,
      end: Some(end),
    })
  }

  fn if_(&mut self, keyword: TokenIdx) -> ExpressionIdx {
    let opened = self.open_bracket();
    let condition = self.parse_expression();
    self.close_bracket(opened);

    let then = self.body();

    let otherwise = if self.else_follows() {
      _ = self.stream.advance();
      Some(self.body())
    } else {
      None
    };

    self.ast.add_expression(If {
      keyword,
      condition,
      then,
      otherwise,
    })
  }

  /// Is the next token an `else`?
  ///
  /// Within a block, the `else` can be on a following line.
  fn else_follows(&mut self) -> bool {
    if self.stream.current_kind() == TokenKind::Else {
      return true;
    }
    if self.block_depth == 0 {
      return false;
    }

    let checkpoint = self.stream.checkpoint();
    self.stream.skip_newlines();

    if self.stream.current_kind() == TokenKind::Else {
      true
    } else {
      self.stream.restore(checkpoint);
      false
    }
  }

  fn index(&mut self, target: ExpressionIdx, opening: TokenIdx) -> ExpressionIdx {
    let (arguments, end) = self.comma_list::<ArgumentList>(opening, TokenKind::RightSquare);

    let is_double = self.stream.token(opening).kind == TokenKind::LeftDoubleSquare;
    let closing = match end {
      ListEnd::Closed(closing) if is_double => {
        let second = self.stream.matches(TokenKind::RightSquare);
        if second.is_none() {
          self.add_error(ParseError::Expected {
            expected: TokenKind::RightSquare,
            after: self.stream.token(closing),
            received: self.current_token(),
          });
        }
        second.or(Some(closing))
      }
      _ => end.closing(),
    };

    self.ast.add_expression(Index {
      target,
      opening,
      arguments,
      closing,
    })
  }

  fn member(&mut self, target: ExpressionIdx, operator: TokenIdx) -> ExpressionIdx {
    let name = self.member_name();

    self.ast.add_expression(Member {
      target,
      operator,
      name,
    })
  }

  fn namespace(&mut self, package: TokenIdx) -> ExpressionIdx {
    let (_, operator) = self.stream.advance();
    let name = self.member_name();

    self.ast.add_expression(Namespace {
      package,
      operator,
      name,
    })
  }

  fn repeat(&mut self, keyword: TokenIdx) -> ExpressionIdx {
    let body = self.body();
    self.ast.add_expression(Repeat { keyword, body })
  }

  fn unary(&mut self, operator: TokenIdx, precedence: ParsePrecedence) -> ExpressionIdx {
    self.stream.skip_newlines();
    let expression = self.parse_expression_with_precedence(precedence);

    self.ast.add_expression(Unary {
      operator,
      expression,
    })
  }

  fn while_(&mut self, keyword: TokenIdx) -> ExpressionIdx {
    let opened = self.open_bracket();
    let condition = self.parse_expression();
    self.close_bracket(opened);

    let body = self.body();

    self.ast.add_expression(While {
      keyword,
      condition,
      body,
    })
  }
}

/// Can a token be the start of an expression?
///
/// Tokens which end or separate expressions are left for the enclosing construct.
fn can_start_expression(kind: TokenKind) -> bool {
  !matches!(
    kind,
    TokenKind::RightParen
      | TokenKind::RightCurly
      | TokenKind::RightSquare
      | TokenKind::Comma
      | TokenKind::Semicolon
      | TokenKind::EndOfLine
      | TokenKind::EndOfFile
      | TokenKind::Else
      | TokenKind::In
  )
}

fn is_right_associative(kind: TokenKind) -> bool {
  matches!(
    kind,
    TokenKind::Caret
      | TokenKind::Equal
      | TokenKind::LeftAssign
      | TokenKind::LeftSuperAssign
      | TokenKind::ColonEqual
  )
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
enum ParsePrecedence {
  None = 1,
  Help,        // ?
  Equal,       // =
  LeftAssign,  // <- <<- :=
  RightAssign, // -> ->>
  Tilde,       // ~
  Or,          // | ||
  And,         // & &&
  Not,         // !
  Comparison,  // == != < > <= >=
  Term,        // + -
  Factor,      // * /
  Special,     // %any% |>
  Range,       // :
  UnaryMinus,  // - +
  Power,       // ^
  Postfix,     // () [] [[]] $ @
  Primary,     // literals, variables, ::
}
impl ParsePrecedence {
  const LOWEST: Self = Self::Help;

  fn next(self) -> Self {
    match self {
      Self::None => Self::Help,
      Self::Help => Self::Equal,
      Self::Equal => Self::LeftAssign,
      Self::LeftAssign => Self::RightAssign,
      Self::RightAssign => Self::Tilde,
      Self::Tilde => Self::Or,
      Self::Or => Self::And,
      Self::And => Self::Not,
      Self::Not => Self::Comparison,
      Self::Comparison => Self::Term,
      Self::Term => Self::Factor,
      Self::Factor => Self::Special,
      Self::Special => Self::Range,
      Self::Range => Self::UnaryMinus,
      Self::UnaryMinus => Self::Power,
      Self::Power => Self::Postfix,
      Self::Postfix | Self::Primary => Self::Primary,
    }
  }
}
impl From<TokenKind> for ParsePrecedence {
  /// The precedence of a token used as an infix or postfix operator
  fn from(kind: TokenKind) -> Self {
    match kind {
      TokenKind::Question => Self::Help,
      TokenKind::Equal => Self::Equal,
      TokenKind::LeftAssign | TokenKind::LeftSuperAssign | TokenKind::ColonEqual => {
        Self::LeftAssign
      }
      TokenKind::RightAssign | TokenKind::RightSuperAssign => Self::RightAssign,
      TokenKind::Tilde => Self::Tilde,
      TokenKind::Or | TokenKind::OrOr => Self::Or,
      TokenKind::And | TokenKind::AndAnd => Self::And,
      TokenKind::BangEqual
      | TokenKind::EqualEqual
      | TokenKind::Greater
      | TokenKind::GreaterEqual
      | TokenKind::Less
      | TokenKind::LessEqual => Self::Comparison,
      TokenKind::Plus | TokenKind::Minus => Self::Term,
      TokenKind::Star | TokenKind::Slash => Self::Factor,
      TokenKind::Special | TokenKind::Pipe => Self::Special,
      TokenKind::Colon => Self::Range,
      TokenKind::Caret => Self::Power,
      TokenKind::LeftParen
      | TokenKind::LeftSquare
      | TokenKind::LeftDoubleSquare
      | TokenKind::Dollar
      | TokenKind::At => Self::Postfix,
      _ => Self::None,
    }
  }
}
