//! # Expressions

use crate::{
  ast::{AST, ExpressionIdx, TokenIdx, argument::Argument, argument::Parameter},
  span::Span,
  tokeniser::TokenKind,
};
use std::fmt;
use thin_vec::ThinVec;

/// An expression, R code is made up entirely of expressions
#[must_use]
#[derive(Debug)]
pub enum Expression {
  /// An assignment, e.g. `x <- 1`, `1 -> x`, `x = 1`
  Assignment(Assignment),
  /// A binary expression, e.g. `1 + 2`, `a %in% b`
  Binary(Binary),
  /// A block of expressions, e.g. `{ .. }`
  Block(Block),
  /// A function call, e.g. `foo(1, b = 2)`
  Call(Call),
  /// A loop control keyword, `break` or `next`
  Control(Control),
  /// A for loop, e.g. `for (i in 1:10) print(i)`
  For(For),
  /// A function definition, e.g. `function(x, y = 2) x + y`, `\(x) x`
  Function(Function),
  /// An expression in parentheses, e.g. `(1 + 2)`
  Group(Group),
  /// An if expression, e.g. `if (x) 1 else 2`
  If(If),
  /// Indexing into a value, e.g. `x[1, 2]`, `x[[1]]`
  Index(Index),
  /// A literal value or constant, e.g. `1`, `"hello"`, `TRUE`, `NULL`
  Literal(Literal),
  /// Accessing a component of a value, e.g. `x$name`, `x@slot`
  Member(Member),
  /// Accessing a name from a package, e.g. `stats::median`
  Namespace(Namespace),
  /// A repeat loop, e.g. `repeat { break }`
  Repeat(Repeat),
  /// A unary expression, e.g. `-1`, `!x`, `~ y`
  Unary(Unary),
  /// A variable, e.g. `x`, `` `my var` ``
  Variable(Variable),
  /// A while loop, e.g. `while (x) x <- f(x)`
  While(While),
  /// An invalid expression
  Invalid(Invalid),
}
impl Expression {
  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    match self {
      Self::Assignment(assignment) => assignment.span(ast),
      Self::Binary(binary) => binary.span(ast),
      Self::Block(block) => block.span(ast),
      Self::Call(call) => call.span(ast),
      Self::Control(control) => control.span(ast),
      Self::For(for_) => for_.span(ast),
      Self::Function(function) => function.span(ast),
      Self::Group(group) => group.span(ast),
      Self::If(if_) => if_.span(ast),
      Self::Index(index) => index.span(ast),
      Self::Literal(literal) => literal.span(ast),
      Self::Member(member) => member.span(ast),
      Self::Namespace(namespace) => namespace.span(ast),
      Self::Repeat(repeat) => repeat.span(ast),
      Self::Unary(unary) => unary.span(ast),
      Self::Variable(variable) => variable.span(ast),
      Self::While(while_) => while_.span(ast),
      Self::Invalid(invalid) => invalid.span(ast),
    }
  }

  /// The name of the node type
  #[must_use]
  pub fn kind_name(&self) -> &'static str {
    match self {
      Self::Assignment(_) => "Assignment",
      Self::Binary(_) => "Binary",
      Self::Block(_) => "Block",
      Self::Call(_) => "Call",
      Self::Control(_) => "Control",
      Self::For(_) => "For",
      Self::Function(_) => "Function",
      Self::Group(_) => "Group",
      Self::If(_) => "If",
      Self::Index(_) => "Index",
      Self::Literal(_) => "Literal",
      Self::Member(_) => "Member",
      Self::Namespace(_) => "Namespace",
      Self::Repeat(_) => "Repeat",
      Self::Unary(_) => "Unary",
      Self::Variable(_) => "Variable",
      Self::While(_) => "While",
      Self::Invalid(_) => "Invalid",
    }
  }
}

fn merge_optional_token(span: Span, token: Option<TokenIdx>, ast: &AST) -> Span {
  match token {
    Some(token) => span.merge(ast.token_span(token)),
    None => span,
  }
}

/// An assignment, e.g. `x <- 1`, `1 -> x`, `x = 1`
#[derive(Debug)]
pub struct Assignment {
  pub(crate) left: ExpressionIdx,
  pub(crate) operator: TokenIdx,
  pub(crate) right: ExpressionIdx,
}
impl Assignment {
  /// The operator of the assignment
  pub fn operator(&self, ast: &AST) -> AssignmentOperator {
    match ast.token_kind(self.operator) {
      TokenKind::LeftAssign => AssignmentOperator::Left,
      TokenKind::LeftSuperAssign => AssignmentOperator::LeftSuper,
      TokenKind::RightAssign => AssignmentOperator::Right,
      TokenKind::RightSuperAssign => AssignmentOperator::RightSuper,
      TokenKind::ColonEqual => AssignmentOperator::ColonEqual,
      _ => AssignmentOperator::Equal,
    }
  }

  /// The value being assigned to, the left side unless it is a rightwards assignment
  pub fn target<'a>(&self, ast: &'a AST) -> &'a Expression {
    if self.operator(ast).is_rightward() {
      &ast[self.right]
    } else {
      &ast[self.left]
    }
  }

  /// The value being assigned, the right side unless it is a rightwards assignment
  pub fn value<'a>(&self, ast: &'a AST) -> &'a Expression {
    if self.operator(ast).is_rightward() {
      &ast[self.left]
    } else {
      &ast[self.right]
    }
  }

  /// The name being assigned to, if the target is a variable or a string
  #[must_use]
  pub fn name<'a>(&self, ast: &'a AST) -> Option<&'a str> {
    match self.target(ast) {
      Expression::Variable(variable) => Some(variable.name(ast)),
      Expression::Literal(literal) if ast.token_kind(literal.token) == TokenKind::String => {
        Some(literal.raw_value(ast))
      }
      _ => None,
    }
  }

  /// The left hand side, as written in the source
  pub fn left<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.left]
  }
  /// The right hand side, as written in the source
  pub fn right<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.right]
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    self
      .left(ast)
      .span(ast)
      .merge(ast.token_span(self.operator))
      .merge(self.right(ast).span(ast))
  }
}

/// A binary expression, e.g. `1 + 2`, `a %in% b`
#[derive(Debug)]
pub struct Binary {
  pub(crate) left: ExpressionIdx,
  pub(crate) operator: TokenIdx,
  pub(crate) right: ExpressionIdx,
}
impl Binary {
  /// The left hand side of the operation
  pub fn left<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.left]
  }
  /// The right hand side of the operation
  pub fn right<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.right]
  }

  /// The operator of the operation
  pub fn operator(&self, ast: &AST) -> BinaryOperator {
    match ast.token_kind(self.operator) {
      TokenKind::Plus => BinaryOperator::Add,
      TokenKind::Minus => BinaryOperator::Subtract,
      TokenKind::Star => BinaryOperator::Multiply,
      TokenKind::Slash => BinaryOperator::Divide,
      TokenKind::Caret => BinaryOperator::Power,
      TokenKind::Special => BinaryOperator::Special,
      TokenKind::Pipe => BinaryOperator::Pipe,
      TokenKind::Colon => BinaryOperator::Sequence,
      TokenKind::Tilde => BinaryOperator::Formula,
      TokenKind::Question => BinaryOperator::Help,
      TokenKind::BangEqual => BinaryOperator::NotEqual,
      TokenKind::EqualEqual => BinaryOperator::Equal,
      TokenKind::Greater => BinaryOperator::Greater,
      TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
      TokenKind::Less => BinaryOperator::Less,
      TokenKind::LessEqual => BinaryOperator::LessEqual,
      TokenKind::And => BinaryOperator::And,
      TokenKind::AndAnd => BinaryOperator::AndAnd,
      TokenKind::Or => BinaryOperator::Or,
      _ => BinaryOperator::OrOr,
    }
  }

  /// The source text of the operator, e.g. `+`, `%in%`
  #[must_use]
  pub fn operator_text<'a>(&self, ast: &'a AST) -> &'a str {
    ast.get_token_text(self.operator)
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    self
      .left(ast)
      .span(ast)
      .merge(ast.token_span(self.operator))
      .merge(self.right(ast).span(ast))
  }
}

/// A block of expressions, e.g. `{ .. }`
#[derive(Debug)]
pub struct Block {
  pub(crate) opening: TokenIdx,
  pub(crate) expressions: ThinVec<ExpressionIdx>,
  pub(crate) closing: Option<TokenIdx>,
}
impl Block {
  /// How many expressions are in a block
  #[must_use]
  pub fn len(&self) -> usize {
    self.expressions.len()
  }
  /// Does the block have any expressions?
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.expressions.is_empty()
  }
  /// Was the block closed?
  #[must_use]
  pub fn is_closed(&self) -> bool {
    self.closing.is_some()
  }

  /// The expressions in a block
  #[must_use]
  pub fn expressions<'a>(
    &'a self,
    ast: &'a AST,
  ) -> impl DoubleEndedIterator<Item = &'a Expression> + ExactSizeIterator {
    self.expressions.iter().map(|expression| &ast[*expression])
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    let span = self
      .expressions(ast)
      .fold(ast.token_span(self.opening), |span, expression| {
        span.merge(expression.span(ast))
      });

    merge_optional_token(span, self.closing, ast)
  }
}

/// A function call, e.g. `foo(1, b = 2)`
#[derive(Debug)]
pub struct Call {
  pub(crate) callee: ExpressionIdx,
  pub(crate) opening: TokenIdx,
  pub(crate) arguments: Option<ThinVec<Argument>>,
  pub(crate) closing: Option<TokenIdx>,
}
impl Call {
  /// The expression which will be called
  pub fn callee<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.callee]
  }
  /// The arguments passed to the call
  ///
  /// Empty if there is no argument list, either as there are no arguments or as an
  /// error occurred before any argument.
  #[must_use]
  pub fn arguments(&self) -> &[Argument] {
    self.arguments.as_deref().unwrap_or_default()
  }
  /// Does the call have an argument list?
  #[must_use]
  pub fn has_argument_list(&self) -> bool {
    self.arguments.is_some()
  }
  /// Was the call closed with a `)`?
  #[must_use]
  pub fn is_closed(&self) -> bool {
    self.closing.is_some()
  }

  /// The span for the arguments (includes the brackets)
  pub fn argument_span(&self, ast: &AST) -> Span {
    let span = arguments_span(ast.token_span(self.opening), self.arguments(), ast);
    merge_optional_token(span, self.closing, ast)
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    self.callee(ast).span(ast).merge(self.argument_span(ast))
  }
}

fn arguments_span(start: Span, arguments: &[Argument], ast: &AST) -> Span {
  arguments
    .iter()
    .filter_map(|argument| argument.span(ast))
    .fold(start, Span::merge)
}

/// A loop control keyword, `break` or `next`
#[derive(Debug)]
pub struct Control {
  pub(crate) token: TokenIdx,
}
impl Control {
  /// Is the keyword `break`?
  #[must_use]
  pub fn is_break(&self, ast: &AST) -> bool {
    ast.token_kind(self.token) == TokenKind::Break
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    ast.token_span(self.token)
  }
}

/// A for loop, e.g. `for (i in 1:10) print(i)`
#[derive(Debug)]
pub struct For {
  pub(crate) keyword: TokenIdx,
  pub(crate) variable: Option<ExpressionIdx>,
  pub(crate) sequence: ExpressionIdx,
  pub(crate) closing: Option<TokenIdx>,
  pub(crate) body: ExpressionIdx,
}
impl For {
  /// The loop variable, missing if it wasn't an identifier
  #[must_use]
  pub fn variable<'a>(&self, ast: &'a AST) -> Option<&'a Variable> {
    match self.variable.map(|variable| &ast[variable]) {
      Some(Expression::Variable(variable)) => Some(variable),
      _ => None,
    }
  }
  /// The sequence being looped over
  pub fn sequence<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.sequence]
  }
  /// The body of the loop
  pub fn body<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.body]
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    let span = ast
      .token_span(self.keyword)
      .merge(self.sequence(ast).span(ast));
    let span = merge_optional_token(span, self.closing, ast);
    let span = self.variable(ast).map_or(span, |v| span.merge(v.span(ast)));

    span.merge(self.body(ast).span(ast))
  }
}

/// A function definition, e.g. `function(x, y = 2) x + y`, `\(x) x`
#[derive(Debug)]
pub struct Function {
  pub(crate) keyword: TokenIdx,
  pub(crate) opening: Option<TokenIdx>,
  pub(crate) parameters: Option<ThinVec<Parameter>>,
  pub(crate) closing: Option<TokenIdx>,
  pub(crate) body: Option<ExpressionIdx>,
}
impl Function {
  /// The parameters of the function
  #[must_use]
  pub fn parameters(&self) -> &[Parameter] {
    self.parameters.as_deref().unwrap_or_default()
  }
  /// The names of the parameters, in order
  pub fn parameter_names<'a>(&'a self, ast: &'a AST) -> impl Iterator<Item = &'a str> {
    self
      .parameters()
      .iter()
      .filter_map(|parameter| parameter.name(ast))
  }
  /// The body of the function, missing if the parameters were not closed
  #[must_use]
  pub fn body<'a>(&self, ast: &'a AST) -> Option<&'a Expression> {
    self.body.map(|body| &ast[body])
  }
  /// Was the function defined using the `\(x)` shorthand?
  #[must_use]
  pub fn is_lambda(&self, ast: &AST) -> bool {
    ast.token_kind(self.keyword) == TokenKind::Backslash
  }

  /// The location of the function's signature, from the keyword to the closing bracket
  pub fn signature_span(&self, ast: &AST) -> Span {
    let span = merge_optional_token(ast.token_span(self.keyword), self.opening, ast);
    let span = self
      .parameters()
      .iter()
      .filter_map(|parameter| parameter.span(ast))
      .fold(span, Span::merge);

    merge_optional_token(span, self.closing, ast)
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    let span = self.signature_span(ast);

    match self.body(ast) {
      Some(body) => span.merge(body.span(ast)),
      None => span,
    }
  }
}

/// An expression in parentheses, e.g. `(1 + 2)`
#[derive(Debug)]
pub struct Group {
  pub(crate) start: TokenIdx,
  pub(crate) expression: ExpressionIdx,
  pub(crate) end: Option<TokenIdx>,
}
impl Group {
  /// The expression within the parentheses
  pub fn expression<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.expression]
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    let span = ast
      .token_span(self.start)
      .merge(self.expression(ast).span(ast));

    merge_optional_token(span, self.end, ast)
  }
}

/// An if expression, e.g. `if (x) 1 else 2`
#[derive(Debug)]
pub struct If {
  pub(crate) keyword: TokenIdx,
  pub(crate) condition: ExpressionIdx,
  pub(crate) then: ExpressionIdx,
  pub(crate) otherwise: Option<ExpressionIdx>,
}
impl If {
  /// The condition
  pub fn condition<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.condition]
  }
  /// The first branch, evaluated if the condition is true
  pub fn then<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.then]
  }
  /// A second optional branch, evaluated if the condition is false
  #[must_use]
  pub fn otherwise<'a>(&self, ast: &'a AST) -> Option<&'a Expression> {
    self.otherwise.map(|otherwise| &ast[otherwise])
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    let span = ast
      .token_span(self.keyword)
      .merge(self.condition(ast).span(ast))
      .merge(self.then(ast).span(ast));

    match self.otherwise(ast) {
      Some(otherwise) => span.merge(otherwise.span(ast)),
      None => span,
    }
  }
}

/// Indexing into a value, e.g. `x[1, 2]`, `x[[1]]`
#[derive(Debug)]
pub struct Index {
  pub(crate) target: ExpressionIdx,
  pub(crate) opening: TokenIdx,
  pub(crate) arguments: Option<ThinVec<Argument>>,
  pub(crate) closing: Option<TokenIdx>,
}
impl Index {
  /// The value being indexed
  pub fn target<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.target]
  }
  /// The arguments used to index
  #[must_use]
  pub fn arguments(&self) -> &[Argument] {
    self.arguments.as_deref().unwrap_or_default()
  }
  /// Is it a `[[` index, selecting a single element?
  #[must_use]
  pub fn is_double(&self, ast: &AST) -> bool {
    ast.token_kind(self.opening) == TokenKind::LeftDoubleSquare
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    let span = self.target(ast).span(ast).merge(ast.token_span(self.opening));
    let span = arguments_span(span, self.arguments(), ast);

    merge_optional_token(span, self.closing, ast)
  }
}

/// A literal value or constant, e.g. `1`, `"hello"`, `TRUE`, `NULL`
#[derive(Debug)]
pub struct Literal {
  pub(crate) token: TokenIdx,
}
impl Literal {
  /// The value of the literal
  pub fn value<'a>(&self, ast: &'a AST) -> LiteralValue<'a> {
    match ast.token_kind(self.token) {
      TokenKind::Number => self.number_value(ast),
      TokenKind::String => LiteralValue::String(self.string_value(ast)),
      TokenKind::True => LiteralValue::Boolean(true),
      TokenKind::False => LiteralValue::Boolean(false),
      TokenKind::Inf => LiteralValue::Number(f64::INFINITY),
      TokenKind::NaN => LiteralValue::Number(f64::NAN),
      TokenKind::Null => LiteralValue::Null,
      _ => LiteralValue::Na,
    }
  }
  /// The underlying raw string contents of the literal
  #[must_use]
  pub fn raw_value<'a>(&self, ast: &'a AST) -> &'a str {
    ast.get_token_text(self.token)
  }

  #[allow(clippy::cast_possible_truncation, reason = "R integers are 32 bit")]
  fn number_value<'a>(&self, ast: &'a AST) -> LiteralValue<'a> {
    let raw = ast.get_token_text(self.token);

    if let Some(digits) = raw.strip_suffix('L') {
      match parse_number(digits) {
        Some(value) if value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) => {
          LiteralValue::Integer(value as i32)
        }
        Some(value) => LiteralValue::Number(value),
        None => LiteralValue::Na,
      }
    } else if let Some(digits) = raw.strip_suffix('i') {
      parse_number(digits).map_or(LiteralValue::Na, LiteralValue::Complex)
    } else {
      parse_number(raw).map_or(LiteralValue::Na, LiteralValue::Number)
    }
  }

  /// The contents of a string, without the quotes
  ///
  /// Escape sequences are left as written.
  fn string_value<'a>(&self, ast: &'a AST) -> &'a str {
    let string = ast.get_token_text(self.token);

    if matches!(string.as_bytes().first(), Some(b'r' | b'R')) {
      // r"--(...)--" has the quote, dashes and bracket on each side
      let dashes = string[2..].bytes().take_while(|c| *c == b'-').count();
      let trim = 3 + dashes;
      return string.get(trim..string.len() - (trim - 1)).unwrap_or_default();
    }

    string.get(1..(string.len() - 1)).unwrap_or_default()
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    ast.token_span(self.token)
  }
}

fn parse_number(raw: &str) -> Option<f64> {
  if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
    let (digits, exponent) = match hex.find(['p', 'P']) {
      Some(position) => (&hex[..position], hex[position + 1..].parse::<i32>().ok()?),
      None => (hex, 0),
    };

    #[allow(clippy::cast_precision_loss, reason = "R stores numbers as doubles")]
    let value = u64::from_str_radix(digits, 16).ok()? as f64;
    return Some(value * 2f64.powi(exponent));
  }

  raw.parse().ok()
}

/// Accessing a component of a value, e.g. `x$name`, `x@slot`
#[derive(Debug)]
pub struct Member {
  pub(crate) target: ExpressionIdx,
  pub(crate) operator: TokenIdx,
  pub(crate) name: Option<TokenIdx>,
}
impl Member {
  /// The value being accessed
  pub fn target<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.target]
  }
  /// The name of the component being accessed, empty if it is missing
  #[must_use]
  pub fn name<'a>(&self, ast: &'a AST) -> &'a str {
    self
      .name
      .map(|name| ast.get_token_text(name))
      .unwrap_or_default()
  }
  /// Is it a slot access using `@`?
  #[must_use]
  pub fn is_slot(&self, ast: &AST) -> bool {
    ast.token_kind(self.operator) == TokenKind::At
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    let span = self.target(ast).span(ast).merge(ast.token_span(self.operator));
    merge_optional_token(span, self.name, ast)
  }
}

/// Accessing a name from a package, e.g. `stats::median`, `pkg:::internal`
#[derive(Debug)]
pub struct Namespace {
  pub(crate) package: TokenIdx,
  pub(crate) operator: TokenIdx,
  pub(crate) name: Option<TokenIdx>,
}
impl Namespace {
  /// The package being accessed
  #[must_use]
  pub fn package<'a>(&self, ast: &'a AST) -> &'a str {
    ast.get_token_text(self.package)
  }
  /// The name being accessed from the package, empty if it is missing
  #[must_use]
  pub fn name<'a>(&self, ast: &'a AST) -> &'a str {
    self
      .name
      .map(|name| ast.get_token_text(name))
      .unwrap_or_default()
  }
  /// Is it accessing an internal name, using `:::`?
  #[must_use]
  pub fn is_internal(&self, ast: &AST) -> bool {
    ast.token_kind(self.operator) == TokenKind::ColonColonColon
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    let span = ast.token_span(self.package).merge(ast.token_span(self.operator));
    merge_optional_token(span, self.name, ast)
  }
}

/// A repeat loop, e.g. `repeat { break }`
#[derive(Debug)]
pub struct Repeat {
  pub(crate) keyword: TokenIdx,
  pub(crate) body: ExpressionIdx,
}
impl Repeat {
  /// The body of the loop
  pub fn body<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.body]
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    ast.token_span(self.keyword).merge(self.body(ast).span(ast))
  }
}

/// A unary expression, e.g. `-1`, `!x`, `~ y`
#[derive(Debug)]
pub struct Unary {
  pub(crate) operator: TokenIdx,
  pub(crate) expression: ExpressionIdx,
}
impl Unary {
  /// The operator of the expression
  pub fn operator(&self, ast: &AST) -> UnaryOperator {
    match ast.token_kind(self.operator) {
      TokenKind::Minus => UnaryOperator::Minus,
      TokenKind::Plus => UnaryOperator::Plus,
      TokenKind::Tilde => UnaryOperator::Formula,
      TokenKind::Question => UnaryOperator::Help,
      _ => UnaryOperator::Not,
    }
  }
  /// The expression being operated on
  pub fn expression<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.expression]
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    ast
      .token_span(self.operator)
      .merge(self.expression(ast).span(ast))
  }
}

/// A variable, e.g. `x`, `` `my var` ``
#[derive(Clone, Debug)]
pub struct Variable {
  pub(crate) token: TokenIdx,
}
impl Variable {
  /// The name of the variable, as written in the source
  #[must_use]
  pub fn name<'a>(&self, ast: &'a AST) -> &'a str {
    ast.get_token_text(self.token)
  }

  /// The location of the variable
  pub fn span(&self, ast: &AST) -> Span {
    ast.token_span(self.token)
  }
}

/// A while loop, e.g. `while (x) x <- f(x)`
#[derive(Debug)]
pub struct While {
  pub(crate) keyword: TokenIdx,
  pub(crate) condition: ExpressionIdx,
  pub(crate) body: ExpressionIdx,
}
impl While {
  /// The condition
  pub fn condition<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.condition]
  }
  /// The body of the loop
  pub fn body<'a>(&self, ast: &'a AST) -> &'a Expression {
    &ast[self.body]
  }

  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    ast
      .token_span(self.keyword)
      .merge(self.condition(ast).span(ast))
      .merge(self.body(ast).span(ast))
  }
}

/// An invalid expression
#[derive(Debug)]
pub struct Invalid {
  pub(crate) token: TokenIdx,
}
impl Invalid {
  /// The location of the expression
  pub fn span(&self, ast: &AST) -> Span {
    ast.token_span(self.token)
  }
}

macro_rules! impl_from_expression {
  ($($variant:ident),* $(,)?) => {
    $(
      impl From<$variant> for Expression {
        fn from(value: $variant) -> Self {
          Self::$variant(value)
        }
      }
    )*
  };
}
impl_from_expression!(
  Assignment, Binary, Block, Call, Control, For, Function, Group, If, Index, Literal, Member,
  Namespace, Repeat, Unary, Variable, While, Invalid,
);

/// The operators which can be used in assignments
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssignmentOperator {
  /// `<-`
  Left,
  /// `<<-`
  LeftSuper,
  /// `->`
  Right,
  /// `->>`
  RightSuper,
  /// `=`
  Equal,
  /// `:=`
  ColonEqual,
}
impl AssignmentOperator {
  /// Is the value on the left, and the target on the right?
  #[must_use]
  pub fn is_rightward(self) -> bool {
    matches!(self, Self::Right | Self::RightSuper)
  }

  /// The string representation of the operator
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Left => "<-",
      Self::LeftSuper => "<<-",
      Self::Right => "->",
      Self::RightSuper => "->>",
      Self::Equal => "=",
      Self::ColonEqual => ":=",
    }
  }
}
impl fmt::Display for AssignmentOperator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// The operators which can be used in binary expressions
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
  /// `+`
  Add,
  /// `-`
  Subtract,
  /// `*`
  Multiply,
  /// `/`
  Divide,
  /// `^`
  Power,
  /// `%any%`, the text of the operator is found with [`Binary::operator_text`]
  Special,
  /// `|>`
  Pipe,
  /// `:`
  Sequence,
  /// `~`
  Formula,
  /// `?`
  Help,
  /// `!=`
  NotEqual,
  /// `==`
  Equal,
  /// `>`
  Greater,
  /// `>=`
  GreaterEqual,
  /// `<`
  Less,
  /// `<=`
  LessEqual,
  /// `&`
  And,
  /// `&&`
  AndAnd,
  /// `|`
  Or,
  /// `||`
  OrOr,
}

/// The operators which can be used in unary expressions
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOperator {
  /// `!`
  Not,
  /// `-`
  Minus,
  /// `+`
  Plus,
  /// `~`
  Formula,
  /// `?`
  Help,
}
impl UnaryOperator {
  /// The string representation of the operator
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Not => "!",
      Self::Minus => "-",
      Self::Plus => "+",
      Self::Formula => "~",
      Self::Help => "?",
    }
  }
}
impl fmt::Display for UnaryOperator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// The types of literals
#[must_use]
#[derive(Debug, PartialEq)]
pub enum LiteralValue<'source> {
  /// `TRUE` or `FALSE`
  Boolean(bool),
  /// A double, including `Inf` and `NaN`
  Number(f64),
  /// An integer, e.g. `5L`
  Integer(i32),
  /// The imaginary part of a complex number, e.g. `2i`
  Complex(f64),
  /// A string literal, without its quotes
  String(&'source str),
  /// `NULL`
  Null,
  /// A missing value `NA`, or a number which could not be read
  Na,
}
