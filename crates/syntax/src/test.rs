use crate::{
  AST, ErrorLocation, ParseError, Span, TokenKind,
  ast::{
    Argument, Expression, Node, Parameter,
    expression::{Call, LiteralValue, Variable},
  },
};
use indoc::indoc;

fn parse(source: &str) -> AST {
  crate::parse(source.to_owned())
}
impl AST {
  fn is_ok(&self) -> bool {
    self.errors.is_empty()
  }

  fn is_err(&self) -> bool {
    !self.is_ok()
  }

  fn first(&self) -> &Expression {
    self.root_expressions().next().unwrap()
  }

  fn first_call(&self) -> &Call {
    match self.first() {
      Expression::Call(call) => call,
      other => panic!("expected call, got {other:?}"),
    }
  }

  fn index_arguments(&self) -> &[Argument] {
    match self.first() {
      Expression::Index(index) => index.arguments(),
      other => panic!("expected index, got {other:?}"),
    }
  }
}

fn parse_to_string(source: &str) -> String {
  crate::parse(source.to_owned()).to_string()
}

fn token_kinds(source: &str) -> Vec<TokenKind> {
  crate::tokenise(source).map(|token| token.kind).collect()
}

#[test]
fn space_at_end() {
  assert!(parse("22 + 44 ").is_ok());
  assert!(parse("22 + 44    ").is_ok());
  assert!(parse("22 + 44  \t  ").is_ok());
  assert!(parse("22 + 44\n\n\n").is_ok());
  assert!(parse("x <- f(1)\n\n\n").is_ok());
}

#[test]
fn empty_string() {
  assert!(parse("\n\n\n").is_ok());
  assert!(parse("    ").is_ok());
  assert!(parse("").is_ok());
  assert!(parse("  \n    \n   \n ").is_ok());
  assert_eq!(parse("").root_expressions().len(), 0);
}

#[test]
fn unterminated_string() {
  assert!(parse("'unterminated string").is_err());
  assert!(parse("\"un").is_err());
  assert!(parse("r\"(raw").is_err());

  assert!(parse("''").is_ok());
  assert!(parse("'it\\'s'").is_ok());
  assert!(parse("r\"(a \"quoted\" string)\"").is_ok());
}

#[test]
fn unknown_character() {
  assert!(parse("¬").is_err());
  assert!(parse("3 ¬ 4").is_err());
  assert!(parse("🤗").is_err());
  assert!(parse("%in").is_err());

  // Having unknown characters in strings or comments are fine
  assert!(parse("'¬'").is_ok());
  assert!(parse("'🤗'").is_ok());
  assert!(parse("# 🤗").is_ok());

  assert!(matches!(
    parse("¬").errors.as_slice(),
    [ParseError::UnknownCharacter(_)]
  ));
}

#[test]
fn tokens() {
  use TokenKind::*;

  assert_eq!(
    token_kinds("x <- y"),
    [Identifier, LeftAssign, Identifier, EndOfFile]
  );
  assert_eq!(
    token_kinds("a ->> b <<- c := d"),
    [
      Identifier,
      RightSuperAssign,
      Identifier,
      LeftSuperAssign,
      Identifier,
      ColonEqual,
      Identifier,
      EndOfFile
    ]
  );
  assert_eq!(
    token_kinds("x[[1]] %in% y |> f"),
    [
      Identifier,
      LeftDoubleSquare,
      Number,
      RightSquare,
      RightSquare,
      Special,
      Identifier,
      Pipe,
      Identifier,
      EndOfFile
    ]
  );
  assert_eq!(
    token_kinds("stats::median base:::f"),
    [Identifier, ColonColon, Identifier, Identifier, ColonColonColon, Identifier, EndOfFile]
  );
  assert_eq!(
    token_kinds("... ..1 .x `a b`"),
    [Ellipsis, Identifier, Identifier, Identifier, EndOfFile]
  );
  assert_eq!(
    token_kinds("if else repeat while function for in next break"),
    [If, Else, Repeat, While, Function, For, In, Next, Break, EndOfFile]
  );
  assert_eq!(
    token_kinds("TRUE FALSE NULL NA NA_integer_ Inf NaN"),
    [True, False, Null, Na, Na, Inf, NaN, EndOfFile]
  );
  assert_eq!(
    token_kinds("a # comment\nb"),
    [Identifier, Comment, EndOfLine, Identifier, EndOfFile]
  );
  assert_eq!(token_kinds("2 ** 3"), [Number, Caret, Number, EndOfFile]);
  assert_eq!(token_kinds("\\(x)"), [Backslash, LeftParen, Identifier, RightParen, EndOfFile]);
}

#[test]
fn number_tokens() {
  use TokenKind::*;

  assert_eq!(
    token_kinds("1 1.5 .5 1e-3 0x1F 5L 2i 1e"),
    [Number, Number, Number, Number, Number, Number, Number, InvalidNumber, EndOfFile]
  );
  assert_eq!(token_kinds("0x"), [InvalidNumber, EndOfFile]);
}

#[test]
fn string_tokens() {
  use TokenKind::*;

  assert_eq!(token_kinds("'a' \"b\""), [String, String, EndOfFile]);
  assert_eq!(token_kinds("r\"(a)\" R'[b]' r\"{c}\""), [String, String, String, EndOfFile]);
  assert_eq!(token_kinds("r\"--(a)\")--\""), [String, EndOfFile]);
  assert_eq!(token_kinds("'a"), [UnterminatedString, EndOfFile]);
  assert_eq!(token_kinds("r(1)"), [Identifier, LeftParen, Number, RightParen, EndOfFile]);
}

#[test]
fn token_positions_are_absolute_in_range() {
  let source = "aa bb cc";
  let tokens: Vec<_> = crate::tokeniser::Tokeniser::new(source, Span::new(3, 5)).collect();

  assert_eq!(tokens.len(), 2);
  assert_eq!(tokens[0].start, 3);
  assert_eq!(tokens[0].length, 2);
  assert_eq!(tokens[1].kind, TokenKind::EndOfFile);
  assert_eq!(tokens[1].start, 5);
}

#[test]
fn binary() {
  let ast = parse_to_string("4 + 23");
  let expected = indoc! {"
    ├─ Binary (+)
    │  ├─ Literal (4)
    │  ╰─ Literal (23)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("1 + 2 * 3");
  let expected = indoc! {"
    ├─ Binary (+)
    │  ├─ Literal (1)
    │  ╰─ Binary (*)
    │     ├─ Literal (2)
    │     ╰─ Literal (3)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("a %in% b == c");
  let expected = indoc! {"
    ├─ Binary (==)
    │  ├─ Binary (%in%)
    │  │  ├─ Variable (a)
    │  │  ╰─ Variable (b)
    │  ╰─ Variable (c)
  "};
  assert_eq!(ast, expected);
}

#[test]
fn power_is_right_associative() {
  let ast = parse_to_string("2 ^ 3 ^ 4");
  let expected = indoc! {"
    ├─ Binary (^)
    │  ├─ Literal (2)
    │  ╰─ Binary (^)
    │     ├─ Literal (3)
    │     ╰─ Literal (4)
  "};
  assert_eq!(ast, expected);
}

#[test]
fn unary() {
  let ast = parse_to_string("-2 ^ 2");
  let expected = indoc! {"
    ├─ Unary (-)
    │  ╰─ Binary (^)
    │     ├─ Literal (2)
    │     ╰─ Literal (2)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("-1:3");
  let expected = indoc! {"
    ├─ Binary (:)
    │  ├─ Unary (-)
    │  │  ╰─ Literal (1)
    │  ╰─ Literal (3)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("!a & b");
  let expected = indoc! {"
    ├─ Binary (&)
    │  ├─ Unary (!)
    │  │  ╰─ Variable (a)
    │  ╰─ Variable (b)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("~ x + y");
  let expected = indoc! {"
    ├─ Unary (~)
    │  ╰─ Binary (+)
    │     ├─ Variable (x)
    │     ╰─ Variable (y)
  "};
  assert_eq!(ast, expected);
}

#[test]
fn assignment() {
  let ast = parse_to_string("a <- b <- 1");
  let expected = indoc! {"
    ├─ Assignment (<-)
    │  ├─ Variable (a)
    │  ╰─ Assignment (<-)
    │     ├─ Variable (b)
    │     ╰─ Literal (1)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("x = y ~ z");
  let expected = indoc! {"
    ├─ Assignment (=)
    │  ├─ Variable (x)
    │  ╰─ Binary (~)
    │     ├─ Variable (y)
    │     ╰─ Variable (z)
  "};
  assert_eq!(ast, expected);
}

#[test]
fn assignment_direction() {
  let ast = parse("1 -> x");
  let Expression::Assignment(assignment) = ast.first() else {
    panic!("expected assignment");
  };

  assert!(assignment.operator(&ast).is_rightward());
  assert_eq!(assignment.name(&ast), Some("x"));
  assert!(matches!(assignment.value(&ast), Expression::Literal(_)));

  let ast = parse("x <<- 1");
  let Expression::Assignment(assignment) = ast.first() else {
    panic!("expected assignment");
  };
  assert_eq!(assignment.name(&ast), Some("x"));
  assert!(matches!(assignment.target(&ast), Expression::Variable(_)));
}

#[test]
fn call_arguments() {
  let ast = parse_to_string("f(a=1, b)");
  let expected = indoc! {"
    ├─ Call
    │  ├─ Variable (f)
    │  ├─ NamedArgument (a)
    │  │  ╰─ Literal (1)
    │  ╰─ ExpressionArgument
    │     ╰─ Variable (b)
  "};
  assert_eq!(ast, expected);

  let ast = parse("f(a=1, b)");
  let call = ast.first_call();
  assert!(ast.is_ok());
  assert_eq!(call.arguments()[0].name(&ast), Some("a"));
  assert!(matches!(
    call.arguments()[0].value(&ast),
    Some(Expression::Literal(_))
  ));
  assert!(matches!(call.arguments()[1], Argument::Expression(_)));
}

#[test]
fn empty_argument_list() {
  let ast = parse("f()");
  let call = ast.first_call();

  assert!(ast.is_ok());
  assert!(!call.has_argument_list());
  assert!(call.arguments().is_empty());
  assert!(call.is_closed());
}

#[test]
fn trailing_missing_argument_is_dropped() {
  let ast = parse("x[2,]");
  assert!(ast.is_ok());
  assert_eq!(ast.index_arguments().len(), 1);
  assert!(matches!(ast.index_arguments()[0], Argument::Expression(_)));
  assert!(ast.index_arguments()[0].comma(&ast).is_some());
}

#[test]
fn leading_missing_argument_is_kept() {
  let ast = parse("x[,2]");
  assert!(ast.is_ok());
  assert_eq!(ast.index_arguments().len(), 2);
  assert!(matches!(ast.index_arguments()[0], Argument::Missing(_)));
  assert!(matches!(ast.index_arguments()[1], Argument::Expression(_)));

  let ast = parse("x[1, , 3]");
  assert_eq!(ast.index_arguments().len(), 3);
  assert!(matches!(ast.index_arguments()[1], Argument::Missing(_)));
}

#[test]
fn double_index() {
  let ast = parse_to_string("x[[1]][2]");
  let expected = indoc! {"
    ├─ Index ([)
    │  ├─ Index ([[)
    │  │  ├─ Variable (x)
    │  │  ╰─ ExpressionArgument
    │  │     ╰─ Literal (1)
    │  ╰─ ExpressionArgument
    │     ╰─ Literal (2)
  "};
  assert_eq!(ast, expected);

  assert!(parse("x[[a[1]]]").is_ok());
  assert!(parse("x[[1]").is_err());
}

#[test]
fn unterminated_call_has_stub_argument() {
  let ast = parse("f(");
  let call = ast.first_call();

  assert_eq!(call.arguments().len(), 1);
  assert!(call.arguments()[0].is_stub());
  assert_eq!(call.arguments()[0].span(&ast), None);
  assert!(!call.is_closed());

  assert!(matches!(
    ast.errors.as_slice(),
    [ParseError::MissingClosing { .. }]
  ));
  assert!(
    ast
      .nodes_at(2)
      .iter()
      .all(|node| node.span(&ast).is_some())
  );
  assert!(ast.node_at::<Argument>(2).is_none());
}

#[test]
fn unterminated_call_keeps_arguments() {
  let ast = parse("f(a, b");
  let call = ast.first_call();

  assert!(!call.is_closed());
  assert_eq!(call.arguments().len(), 2);
  assert!(matches!(call.arguments()[0], Argument::Expression(_)));
  assert!(matches!(call.arguments()[1], Argument::Expression(_)));

  let ast = parse("f(a,");
  let call = ast.first_call();

  assert_eq!(call.arguments().len(), 2);
  assert!(matches!(call.arguments()[0], Argument::Expression(_)));
  assert!(call.arguments()[0].comma(&ast).is_some());
  assert!(call.arguments()[1].is_stub());

  let ast = parse("x[1, y");
  let Expression::Index(index) = ast.first() else {
    panic!("expected index");
  };
  assert_eq!(index.arguments().len(), 2);
  assert!(!index.arguments().iter().any(Argument::is_stub));
}

#[test]
fn multiple_errors_in_arguments() {
  let ast = parse("f(a b, c+, d)");
  let call = ast.first_call();

  assert!(ast.errors.len() >= 2);
  assert_eq!(call.arguments().len(), 3);
  assert!(matches!(call.arguments()[0], Argument::Error(_)));
  assert!(matches!(call.arguments()[1], Argument::Error(_)));
  assert!(matches!(call.arguments()[2], Argument::Expression(_)));

  let Argument::Error(error) = &call.arguments()[0] else {
    unreachable!()
  };
  assert_eq!(error.text(&ast), "a b");
  assert_eq!(error.tokens(&ast).count(), 2);
}

#[test]
fn errors_are_ordered() {
  let ast = parse("f(a b, c+, d)\ng(,]\n)");

  assert!(ast.errors.len() >= 3);
  assert!(
    ast
      .errors
      .windows(2)
      .all(|pair| pair[0].span().start <= pair[1].span().start)
  );
}

#[test]
fn ellipsis_argument() {
  let ast = parse("f(x, ...)");
  let call = ast.first_call();

  assert!(ast.is_ok());
  assert_eq!(call.arguments().len(), 2);
  assert!(matches!(call.arguments()[0], Argument::Expression(_)));

  let Argument::Ellipsis(ellipsis) = &call.arguments()[1] else {
    panic!("expected ellipsis");
  };
  assert_eq!(ellipsis.to_string(), "...");
}

#[test]
fn named_argument_forms() {
  let ast = parse("switch(x, a = , b = 2)");
  let call = ast.first_call();
  assert!(ast.is_ok());
  assert_eq!(call.arguments().len(), 3);
  assert_eq!(call.arguments()[1].name(&ast), Some("a"));
  assert!(call.arguments()[1].value(&ast).is_none());

  let ast = parse("list('a' = 1, `b c` = 2)");
  let call = ast.first_call();
  assert!(ast.is_ok());
  assert_eq!(call.arguments()[0].name(&ast), Some("'a'"));
  assert_eq!(call.arguments()[1].name(&ast), Some("`b c`"));
}

#[test]
fn closing_brace_abandons_argument_list() {
  let ast = parse("{ f(a }");

  let Expression::Block(block) = ast.first() else {
    panic!("expected block");
  };
  let Some(Expression::Call(call)) = block.expressions(&ast).next() else {
    panic!("expected call");
  };

  assert!(block.is_closed());
  assert!(!call.has_argument_list());
  assert!(matches!(
    ast.errors.as_slice(),
    [ParseError::MissingClosing { .. }]
  ));
}

#[test]
fn missing_closing_is_after_token() {
  let ast = parse("f(a");
  let error = &ast.errors[0];

  assert_eq!(error.location(), ErrorLocation::AfterToken);
  assert_eq!(error.span(), Span::at(3));
  assert_eq!(error.title(), "Missing Closing Bracket");
}

#[test]
fn unmatched_closing() {
  let ast = parse(")");
  assert!(matches!(
    ast.errors.as_slice(),
    [ParseError::UnmatchedClosing(_)]
  ));
  assert_eq!(ast.root_expressions().len(), 0);

  assert!(parse("x <- 1 ]").is_err());
  assert!(parse("{ a ) }").is_err());
}

#[test]
fn nested_brackets_in_arguments() {
  let ast = parse("f(a, {b}, c(1, 2))");
  assert!(ast.is_ok());
  assert_eq!(ast.first_call().arguments().len(), 3);

  let ast = parse("f(a[1 2], b)");
  assert!(ast.is_err());
  assert_eq!(ast.first_call().arguments().len(), 2);
}

#[test]
fn function() {
  let ast = parse_to_string("function(x, y = 2, ...) x + y");
  let expected = indoc! {"
    ├─ Function
    │  ├─ NamedParameter (x)
    │  ├─ NamedParameter (y)
    │  │  ╰─ Literal (2)
    │  ├─ EllipsisArgument (...)
    │  ╰─ Binary (+)
    │     ├─ Variable (x)
    │     ╰─ Variable (y)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("\\(x) x");
  let expected = indoc! {"
    ├─ Function (\\)
    │  ├─ NamedParameter (x)
    │  ╰─ Variable (x)
  "};
  assert_eq!(ast, expected);

  assert!(parse("f <- function() {\n  1\n}").is_ok());
  assert!(parse("function(x)\n  x").is_ok());
}

#[test]
fn function_parameters() {
  let ast = parse("function(a, b = 1, ...) NULL");
  let Expression::Function(function) = ast.first() else {
    panic!("expected function");
  };
  assert_eq!(
    function.parameter_names(&ast).collect::<Vec<_>>(),
    ["a", "b", "..."]
  );
  assert!(function.parameters()[0].comma(&ast).is_some());
  assert!(function.parameters()[2].comma(&ast).is_none());

  let ast = parse("function(x, x) 1");
  assert!(matches!(
    ast.errors.as_slice(),
    [ParseError::DuplicateParameter(_)]
  ));

  let ast = parse("function(x, , y) 1");
  assert!(matches!(
    ast.errors.as_slice(),
    [ParseError::ExpectedParameter(_)]
  ));

  let ast = parse("function(x, ) 1");
  let [ParseError::ExpectedParameter(token)] = ast.errors.as_slice() else {
    panic!("expected a parameter error");
  };
  assert_eq!(token.kind, TokenKind::RightParen);
  assert!(parse("f(x, )").is_ok());
  assert!(parse("x[1, ]").is_ok());

  let ast = parse("function(x, 1, y) 1");
  let Expression::Function(function) = ast.first() else {
    panic!("expected function");
  };
  assert!(ast.is_err());
  assert_eq!(function.parameters().len(), 3);
  assert!(matches!(function.parameters()[1], Parameter::Error(_)));
  assert!(function.body(&ast).is_some());
}

#[test]
fn unclosed_function_has_no_body() {
  let ast = parse("function(x, ");
  let Expression::Function(function) = ast.first() else {
    panic!("expected function");
  };

  assert!(ast.is_err());
  assert!(function.body(&ast).is_none());
  assert!(matches!(function.parameters().last(), Some(Parameter::Stub(_))));
}

#[test]
fn if_else() {
  let ast = parse_to_string("if (a) b else c");
  let expected = indoc! {"
    ├─ If
    │  ├─ Variable (a)
    │  ├─ Variable (b)
    │  ╰─ Variable (c)
  "};
  assert_eq!(ast, expected);

  assert!(parse("{\n  if (a) b\n  else c\n}").is_ok());
  assert!(parse("(if (a) b\n else c)").is_ok());
  assert!(parse("if (a) b\nelse c").is_err());
  assert!(parse("if (x y) 1").is_err());
}

#[test]
fn loops() {
  let ast = parse_to_string("for (i in 1:10) print(i)");
  let expected = indoc! {"
    ├─ For
    │  ├─ Variable (i)
    │  ├─ Binary (:)
    │  │  ├─ Literal (1)
    │  │  ╰─ Literal (10)
    │  ╰─ Call
    │     ├─ Variable (print)
    │     ╰─ ExpressionArgument
    │        ╰─ Variable (i)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("while (TRUE) break");
  let expected = indoc! {"
    ├─ While
    │  ├─ Literal (TRUE)
    │  ╰─ Control (break)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("repeat {\n  next\n}");
  let expected = indoc! {"
    ├─ Repeat
    │  ╰─ Block
    │     ╰─ Control (next)
  "};
  assert_eq!(ast, expected);

  assert!(parse("for (1 in x) y").is_err());
  assert!(parse("for (i x) y").is_err());
}

#[test]
fn blocks_and_separators() {
  let ast = parse_to_string("{ a; b\n c }");
  let expected = indoc! {"
    ├─ Block
    │  ├─ Variable (a)
    │  ├─ Variable (b)
    │  ╰─ Variable (c)
  "};
  assert_eq!(ast, expected);

  assert_eq!(parse("a; b; c").root_expressions().len(), 3);
  assert!(parse("{ a b }").is_err());
  assert!(parse("{ a").is_err());
}

#[test]
fn newlines() {
  assert!(parse("f(a,\n  b)").is_ok());
  assert!(parse("(1 +\n 2)").is_ok());
  assert!(parse("x <-\n  1").is_ok());
  assert!(parse("x[\n1\n]").is_ok());

  let ast = parse_to_string("x\n+1");
  let expected = indoc! {"
    ├─ Variable (x)
    ├─ Unary (+)
    │  ╰─ Literal (1)
  "};
  assert_eq!(ast, expected);

  assert!(parse("a b").is_err());
}

#[test]
fn members_and_namespaces() {
  let ast = parse_to_string("stats::median(x$y)");
  let expected = indoc! {"
    ├─ Call
    │  ├─ Namespace (stats::median)
    │  ╰─ ExpressionArgument
    │     ╰─ Member ($y)
    │        ╰─ Variable (x)
  "};
  assert_eq!(ast, expected);

  let ast = parse_to_string("obj@slot");
  let expected = indoc! {"
    ├─ Member (@slot)
    │  ╰─ Variable (obj)
  "};
  assert_eq!(ast, expected);

  assert!(parse("pkg:::internal").is_ok());
  assert!(parse("x$").is_err());
  assert!(parse("pkg::").is_err());
}

#[test]
fn groups() {
  let ast = parse_to_string("(1 + 2) * 3");
  let expected = indoc! {"
    ├─ Binary (*)
    │  ├─ Group
    │  │  ╰─ Binary (+)
    │  │     ├─ Literal (1)
    │  │     ╰─ Literal (2)
    │  ╰─ Literal (3)
  "};
  assert_eq!(ast, expected);

  assert!(parse("()").is_err());
  assert!(parse("(1 + )").is_err());
  assert!(parse("(1").is_err());
}

#[test]
fn literal_values() {
  let cases: [(&str, LiteralValue); 9] = [
    ("5L", LiteralValue::Integer(5)),
    ("0x10", LiteralValue::Number(16.0)),
    ("1e3", LiteralValue::Number(1000.0)),
    ("2i", LiteralValue::Complex(2.0)),
    ("'hi'", LiteralValue::String("hi")),
    ("r\"(raw)\"", LiteralValue::String("raw")),
    ("TRUE", LiteralValue::Boolean(true)),
    ("NULL", LiteralValue::Null),
    ("NA", LiteralValue::Na),
  ];

  for (source, expected) in cases {
    let ast = parse(source);
    let Expression::Literal(literal) = ast.first() else {
      panic!("expected literal for {source}");
    };
    assert_eq!(literal.value(&ast), expected, "{source}");
  }
}

#[test]
fn invalid_number_is_still_a_literal() {
  let ast = parse("1e");
  assert!(matches!(ast.first(), Expression::Literal(_)));
  assert!(matches!(
    ast.errors.as_slice(),
    [ParseError::InvalidNumber(_)]
  ));
}

#[test]
fn comments() {
  let ast = parse("x <- 1 # hello\ny");

  assert!(ast.is_ok());
  assert_eq!(ast.root_expressions().len(), 2);
  assert_eq!(ast.comments.len(), 1);
  assert!(ast.tokens.iter().all(|token| token.kind != TokenKind::Comment));

  assert!(ast.is_in_comment(7));
  assert!(ast.is_in_comment(10));
  assert!(ast.is_in_comment(14));
  assert!(!ast.is_in_comment(3));
  assert!(!ast.is_in_comment(15));

  assert!(parse("f(a, # first\n  b)").is_ok());
}

#[test]
fn nodes_at_position() {
  let ast = parse("f(a, g(b))");

  let kinds: Vec<_> = ast.nodes_at(7).iter().map(|node| node.kind_name()).collect();
  assert_eq!(
    kinds,
    ["Call", "ExpressionArgument", "Call", "ExpressionArgument", "Variable"]
  );

  let inner = ast.node_at::<Call>(7).unwrap();
  assert!(matches!(inner.callee(&ast), Expression::Variable(v) if v.name(&ast) == "g"));

  let argument = ast.node_at::<Argument>(2).unwrap();
  assert!(matches!(argument.value(&ast), Some(Expression::Variable(v)) if v.name(&ast) == "a"));

  assert_eq!(ast.node_at::<Variable>(7).map(|v| v.name(&ast)), Some("b"));
  assert!(ast.nodes_at(100).is_empty());
}

#[test]
fn parent_of_node() {
  let ast = parse("f(a, g(b))");

  let b = ast.node_at::<Expression>(7).unwrap();
  let argument = ast.parent(Node::Expression(b)).unwrap();
  assert_eq!(argument.kind_name(), "ExpressionArgument");

  let call = ast.parent(argument).unwrap();
  assert!(matches!(
    call.cast::<Call>().map(|call| call.callee(&ast)),
    Some(Expression::Variable(v)) if v.name(&ast) == "g"
  ));

  let root = ast.first();
  assert!(ast.parent(Node::Expression(root)).is_none());
}

#[test]
fn walk_visits_every_node() {
  let ast = parse("f(a=1, b)");
  let kinds: Vec<_> = ast.walk().map(Node::kind_name).collect();

  assert_eq!(
    kinds,
    [
      "Call",
      "Variable",
      "NamedArgument",
      "Literal",
      "ExpressionArgument",
      "Variable"
    ]
  );
}

#[test]
fn spans() {
  let ast = parse("  f(a, b)  ");
  assert_eq!(ast.first().span(&ast), Span::new(2, 9));

  let call = ast.first_call();
  assert_eq!(call.arguments()[0].span(&ast), Some(Span::new(4, 6)));
  assert_eq!(call.argument_span(&ast), Span::new(3, 9));
}

#[test]
fn parse_part_of_source() {
  let ast = crate::parse_range("f(a, b)\ng(".to_owned(), Span::new(8, 10));

  assert_eq!(ast.range(), Span::new(8, 10));
  assert_eq!(ast.root_expressions().len(), 1);
  assert_eq!(ast.first().span(&ast), Span::new(8, 10));
  assert!(matches!(
    ast.errors.as_slice(),
    [ParseError::MissingClosing { .. }]
  ));
}

#[test]
fn range_is_clamped_to_source() {
  let ast = crate::parse_range("x <- 1".to_owned(), Span::new(2, 100));
  assert_eq!(ast.range(), Span::new(2, 6));

  let ast = crate::parse_range("x <- 1".to_owned(), Span::new(50, 100));
  assert_eq!(ast.range(), Span::new(6, 6));
  assert_eq!(ast.root_expressions().len(), 0);
}
