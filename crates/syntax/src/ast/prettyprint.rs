//! Pretty-print the AST into a human readable format.
//!
//! Based upon this [blog post](https://www.georgevreilly.com/blog/2023/01/24/TreeInRust2PrintingTrees.html)

use super::{AST, Argument, Expression, Node, Parameter};
use std::fmt;

impl fmt::Display for AST {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for node in self.children() {
      node.pretty(f, self, "", false)?;
    }

    Ok(())
  }
}

const OTHER_CHILD: &str = "│  ";
const OTHER_ENTRY: &str = "├─ ";
const FINAL_CHILD: &str = "   ";
const FINAL_ENTRY: &str = "╰─ ";

pub trait PrettyPrint {
  fn pretty(&self, f: &mut fmt::Formatter, ast: &AST, prefix: &str, last: bool) -> fmt::Result;
}

impl PrettyPrint for Node<'_> {
  fn pretty(&self, f: &mut fmt::Formatter, ast: &AST, prefix: &str, last: bool) -> fmt::Result {
    let connector = if last { FINAL_ENTRY } else { OTHER_ENTRY };
    writeln!(f, "{prefix}{connector}{}", label(*self, ast))?;

    let prefix = format!("{prefix}{}", if last { FINAL_CHILD } else { OTHER_CHILD });
    let children = self.children(ast);
    if let Some((last_child, children)) = children.split_last() {
      for child in children {
        child.pretty(f, ast, &prefix, false)?;
      }
      last_child.pretty(f, ast, &prefix, true)?;
    }

    Ok(())
  }
}

fn label(node: Node<'_>, ast: &AST) -> String {
  match node {
    Node::Expression(expression) => expression_label(expression, ast),
    Node::Argument(argument) => argument_label(argument, ast),
    Node::Parameter(parameter) => parameter_label(parameter, ast),
  }
}

fn expression_label(expression: &Expression, ast: &AST) -> String {
  match expression {
    Expression::Assignment(x) => format!("Assignment ({})", x.operator(ast)),
    Expression::Binary(x) => format!("Binary ({})", x.operator_text(ast)),
    Expression::Block(x) if !x.is_closed() => "Block (unclosed)".into(),
    Expression::Call(x) if !x.is_closed() => "Call (unclosed)".into(),
    Expression::Control(x) if x.is_break(ast) => "Control (break)".into(),
    Expression::Control(_) => "Control (next)".into(),
    Expression::Function(x) if x.is_lambda(ast) => "Function (\\)".into(),
    Expression::Index(x) if x.is_double(ast) => "Index ([[)".into(),
    Expression::Index(_) => "Index ([)".into(),
    Expression::Literal(x) => format!("Literal ({})", x.raw_value(ast)),
    Expression::Member(x) if x.is_slot(ast) => format!("Member (@{})", x.name(ast)),
    Expression::Member(x) => format!("Member (${})", x.name(ast)),
    Expression::Namespace(x) if x.is_internal(ast) => {
      format!("Namespace ({}:::{})", x.package(ast), x.name(ast))
    }
    Expression::Namespace(x) => format!("Namespace ({}::{})", x.package(ast), x.name(ast)),
    Expression::Unary(x) => format!("Unary ({})", x.operator(ast)),
    Expression::Variable(x) => format!("Variable ({})", x.name(ast)),
    _ => expression.kind_name().into(),
  }
}

fn argument_label(argument: &Argument, ast: &AST) -> String {
  match argument {
    Argument::Named(x) => format!("NamedArgument ({})", x.name(ast)),
    Argument::Ellipsis(x) => format!("EllipsisArgument ({x})"),
    Argument::Error(x) => format!("ErrorArgument ({})", x.text(ast)),
    _ => argument.kind_name().into(),
  }
}

fn parameter_label(parameter: &Parameter, ast: &AST) -> String {
  match parameter {
    Parameter::Named(x) => format!("NamedParameter ({})", x.name(ast)),
    Parameter::Ellipsis(x) => format!("EllipsisArgument ({x})"),
    Parameter::Error(x) => format!("ErrorArgument ({})", x.text(ast)),
    _ => parameter.kind_name().into(),
  }
}
