//! # Parser Property Tests
//!
//! Check the guarantees the parser makes for any input, valid or not.

use indoc::indoc;
use rlang_syntax::{
  AST,
  ast::{Argument, Expression, Node},
  parse,
};

const PROGRAM: &str = indoc! {r#"
  # Summarise a data frame by group
  summarise <- function(data, by = "group", ..., .f = mean) {
    groups <- split(data[, -1], data[[by]])
    result <- vapply(groups, \(g) .f(g$value, na.rm = TRUE), numeric(1))

    if (length(result) == 0L) {
      stop("no groups")
    } else if (any(is.na(result))) {
      warning('missing values')
    }

    for (name in names(result)) cat(name, ":", result[[name]], "\n")
    result |> sort(decreasing = TRUE)
  }

  x <- c(1, 2, 3)[-1]
  stats::median(x) -> m; repeat break
  while (m > 0) m <<- m - 1
  y = list(a = , `b c` = 2, 'd' = x %in% 1:10)
"#};

const MALFORMED: [&str; 10] = [
  "f(a b, c+, d)",
  "x[[1, ]",
  "{ f(a }",
  "function(x, x, 1) { x",
  "if (a b) else",
  "for (i x in y) }",
  ")]}",
  "f(g(h(",
  "a <- 'unterminated",
  "x$ @ :: ::: ,,",
];

fn spans_are_nested(ast: &AST) {
  for node in ast.walk() {
    let Some(span) = node.span(ast) else {
      continue;
    };
    assert!(ast.range().contains(span), "{} outside the range", node.kind_name());

    for child in node.children(ast) {
      if let Some(child_span) = child.span(ast) {
        assert!(
          span.contains(child_span),
          "{} {span:?} does not contain {} {child_span:?}",
          node.kind_name(),
          child.kind_name(),
        );
      }
    }
  }
}

fn argument_lists(ast: &AST) -> Vec<&[Argument]> {
  ast
    .walk()
    .filter_map(|node| match node {
      Node::Expression(Expression::Call(call)) => Some(call.arguments()),
      Node::Expression(Expression::Index(index)) => Some(index.arguments()),
      _ => None,
    })
    .collect()
}

/// Every byte offset which is the end of a character
fn prefixes(source: &str) -> impl Iterator<Item = &str> {
  (0..=source.len())
    .filter(|end| source.is_char_boundary(*end))
    .map(|end| &source[..end])
}

#[test]
fn program_is_valid() {
  let ast = parse(PROGRAM.to_owned());

  assert!(ast.is_valid(), "{:?}", ast.errors);
  assert_eq!(ast.root_expressions().len(), 6);
  assert_eq!(ast.comments.len(), 1);
}

#[test]
fn parsing_is_deterministic() {
  for source in MALFORMED.iter().copied().chain([PROGRAM]) {
    let first = parse(source.to_owned());
    let second = parse(source.to_owned());

    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.errors, second.errors);
  }
}

#[test]
fn children_are_within_parents() {
  for source in MALFORMED.iter().copied().chain([PROGRAM]) {
    spans_are_nested(&parse(source.to_owned()));
  }
}

#[test]
fn every_prefix_produces_a_tree() {
  for source in prefixes(PROGRAM) {
    let ast = parse(source.to_owned());

    spans_are_nested(&ast);
    assert!(
      ast
        .errors
        .windows(2)
        .all(|pair| pair[0].span().start <= pair[1].span().start)
    );
  }
}

#[test]
fn only_the_last_argument_lacks_a_comma() {
  for source in MALFORMED.iter().copied().chain([PROGRAM]) {
    let ast = parse(source.to_owned());

    for arguments in argument_lists(&ast) {
      let Some((_, leading)) = arguments.split_last() else {
        continue;
      };
      assert!(leading.iter().all(|argument| argument.comma(&ast).is_some()));
    }
  }
}

#[test]
fn one_more_argument_than_commas() {
  let sources = [
    "f(1)",
    "f(1, 2, 3)",
    "x[a, , b]",
    "x[, 2]",
    "g(a = 1, ..., 'b' = c)",
    "h(\n  x,\n  y\n)",
  ];

  for source in sources {
    let ast = parse(source.to_owned());
    let commas = ast
      .tokens
      .iter()
      .filter(|token| token.kind == rlang_syntax::TokenKind::Comma)
      .count();

    assert!(ast.is_valid(), "{source}");
    assert_eq!(argument_lists(&ast)[0].len(), commas + 1, "{source}");
  }
}

#[test]
fn stubs_only_fill_open_slots() {
  for source in MALFORMED.iter().copied().chain(["f(", "f(a,", "f(a, g(b,", "x[[1, y"]) {
    let ast = parse(source.to_owned());

    for arguments in argument_lists(&ast) {
      let stubs = arguments.iter().filter(|argument| argument.is_stub()).count();
      assert!(stubs <= 1, "{source}");

      let Some((last, leading)) = arguments.split_last() else {
        continue;
      };
      if last.is_stub() {
        assert!(leading.last().is_none_or(|item| item.comma(&ast).is_some()), "{source}");
      }
    }
  }
}

#[test]
fn stub_arguments_end_unclosed_lists() {
  let ast = parse("f(g(h(".to_owned());
  let lists = argument_lists(&ast);

  assert_eq!(lists.len(), 3);
  assert_eq!(
    lists.iter().filter(|arguments| arguments.iter().any(Argument::is_stub)).count(),
    1
  );

  let ast = parse("f(1, g(2,".to_owned());
  for arguments in argument_lists(&ast) {
    assert_eq!(arguments.len(), 2);
  }
  assert!(
    argument_lists(&ast)
      .iter()
      .any(|arguments| arguments.last().is_some_and(Argument::is_stub))
  );
}

#[test]
fn stubs_are_never_found_by_position() {
  let source = "f(a, g(";
  let ast = parse(source.to_owned());

  for position in 0..=7 {
    for node in ast.nodes_at(position) {
      assert!(node.span(&ast).is_some());
      assert!(!matches!(node, Node::Argument(Argument::Stub(_))));
    }
  }
}

#[test]
fn comments_are_not_tokens() {
  let ast = parse(PROGRAM.to_owned());
  let comment = ast.comments.iter().next().unwrap();

  assert!(ast.is_in_comment(comment.start + 3));
  assert!(
    ast
      .tokens
      .iter()
      .all(|token| token.end() <= comment.start || token.start >= comment.end)
  );
}
