//! # Nodes
//!
//! A uniform view over every kind of node in the tree, for walking it and finding
//! nodes by position. Nodes don't store their parent, it is found by searching from
//! the root instead.

use super::{
  AST,
  argument::{
    Argument, EllipsisArgument, ErrorArgument, ExpressionArgument, MissingArgument,
    NamedArgument, NamedParameter, Parameter,
  },
  expression::{
    Assignment, Binary, Block, Call, Control, Expression, For, Function, Group, If, Index,
    Invalid, Literal, Member, Namespace, Repeat, Unary, Variable, While,
  },
};
use crate::span::Span;
use std::{iter, ptr};

/// A reference to any node of the tree
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
  /// An expression
  Expression(&'a Expression),
  /// An argument of a call or index
  Argument(&'a Argument),
  /// A parameter of a function definition
  Parameter(&'a Parameter),
}
impl<'a> Node<'a> {
  /// The location of the node, `None` if it has no location in the source
  #[must_use]
  pub fn span(self, ast: &AST) -> Option<Span> {
    match self {
      Self::Expression(expression) => Some(expression.span(ast)),
      Self::Argument(argument) => argument.span(ast),
      Self::Parameter(parameter) => parameter.span(ast),
    }
  }

  /// The name of the node type
  #[must_use]
  pub fn kind_name(self) -> &'static str {
    match self {
      Self::Expression(expression) => expression.kind_name(),
      Self::Argument(argument) => argument.kind_name(),
      Self::Parameter(parameter) => parameter.kind_name(),
    }
  }

  /// The direct children of the node, in source order
  #[must_use]
  pub fn children(self, ast: &'a AST) -> Vec<Node<'a>> {
    match self {
      Self::Expression(expression) => expression_children(expression, ast),
      Self::Argument(argument) => {
        argument.value(ast).map(Node::Expression).into_iter().collect()
      }
      Self::Parameter(Parameter::Named(parameter)) => {
        parameter.default(ast).map(Node::Expression).into_iter().collect()
      }
      Self::Parameter(_) => Vec::new(),
    }
  }

  /// Are two nodes the same node of the tree?
  #[must_use]
  pub fn is_same(self, other: Self) -> bool {
    match (self, other) {
      (Self::Expression(a), Self::Expression(b)) => ptr::eq(a, b),
      (Self::Argument(a), Self::Argument(b)) => ptr::eq(a, b),
      (Self::Parameter(a), Self::Parameter(b)) => ptr::eq(a, b),
      _ => false,
    }
  }

  /// Try to view the node as a specific type
  #[must_use]
  pub fn cast<T: AstNode>(self) -> Option<&'a T> {
    T::from_node(self)
  }
}

fn expression_children<'a>(expression: &'a Expression, ast: &'a AST) -> Vec<Node<'a>> {
  let node = Node::Expression;

  match expression {
    Expression::Assignment(assignment) => {
      vec![node(assignment.left(ast)), node(assignment.right(ast))]
    }
    Expression::Binary(binary) => vec![node(binary.left(ast)), node(binary.right(ast))],
    Expression::Block(block) => block.expressions(ast).map(node).collect(),
    Expression::Call(call) => {
      let arguments = call.arguments().iter().map(Node::Argument);
      iter::once(node(call.callee(ast))).chain(arguments).collect()
    }
    Expression::For(for_) => {
      let variable = for_.variable.map(|variable| node(&ast[variable]));
      let rest = [node(for_.sequence(ast)), node(for_.body(ast))];
      variable.into_iter().chain(rest).collect()
    }
    Expression::Function(function) => {
      let parameters = function.parameters().iter().map(Node::Parameter);
      parameters.chain(function.body(ast).map(node)).collect()
    }
    Expression::Group(group) => vec![node(group.expression(ast))],
    Expression::If(if_) => {
      let branches = [node(if_.condition(ast)), node(if_.then(ast))];
      branches.into_iter().chain(if_.otherwise(ast).map(node)).collect()
    }
    Expression::Index(index) => {
      let arguments = index.arguments().iter().map(Node::Argument);
      iter::once(node(index.target(ast))).chain(arguments).collect()
    }
    Expression::Member(member) => vec![node(member.target(ast))],
    Expression::Repeat(repeat) => vec![node(repeat.body(ast))],
    Expression::Unary(unary) => vec![node(unary.expression(ast))],
    Expression::While(while_) => vec![node(while_.condition(ast)), node(while_.body(ast))],
    Expression::Control(_)
    | Expression::Literal(_)
    | Expression::Namespace(_)
    | Expression::Variable(_)
    | Expression::Invalid(_) => Vec::new(),
  }
}

/// A type of node which can be found in the tree
pub trait AstNode {
  /// View a node as this type, if it is of this type
  fn from_node(node: Node<'_>) -> Option<&Self>;
}
impl AstNode for Expression {
  fn from_node(node: Node<'_>) -> Option<&Self> {
    match node {
      Node::Expression(expression) => Some(expression),
      _ => None,
    }
  }
}
impl AstNode for Argument {
  fn from_node(node: Node<'_>) -> Option<&Self> {
    match node {
      Node::Argument(argument) => Some(argument),
      _ => None,
    }
  }
}
impl AstNode for Parameter {
  fn from_node(node: Node<'_>) -> Option<&Self> {
    match node {
      Node::Parameter(parameter) => Some(parameter),
      _ => None,
    }
  }
}

macro_rules! impl_ast_node {
  ($($node:ident => $($outer:ident::$variant:ident)|+),* $(,)?) => {
    $(
      impl AstNode for $node {
        fn from_node(node: Node<'_>) -> Option<&Self> {
          match node {
            $(Node::$outer($outer::$variant(inner)) => Some(inner),)+
            _ => None,
          }
        }
      }
    )*
  };
}
impl_ast_node!(
  Assignment => Expression::Assignment,
  Binary => Expression::Binary,
  Block => Expression::Block,
  Call => Expression::Call,
  Control => Expression::Control,
  For => Expression::For,
  Function => Expression::Function,
  Group => Expression::Group,
  If => Expression::If,
  Index => Expression::Index,
  Literal => Expression::Literal,
  Member => Expression::Member,
  Namespace => Expression::Namespace,
  Repeat => Expression::Repeat,
  Unary => Expression::Unary,
  Variable => Expression::Variable,
  While => Expression::While,
  Invalid => Expression::Invalid,
  ExpressionArgument => Argument::Expression,
  NamedArgument => Argument::Named,
  NamedParameter => Parameter::Named,
  EllipsisArgument => Argument::Ellipsis | Parameter::Ellipsis,
  MissingArgument => Argument::Missing | Parameter::Missing,
  ErrorArgument => Argument::Error | Parameter::Error,
);

impl AST {
  /// The path of nodes containing a position, from the outermost to the innermost
  ///
  /// A position at the end of a node is counted as within it. Where siblings both
  /// contain the position, the later one is chosen. Nodes without a location in the
  /// source are never included.
  #[must_use]
  pub fn nodes_at(&self, position: u32) -> Vec<Node<'_>> {
    let mut path = Vec::new();
    let mut candidates: Vec<Node<'_>> = self.children().collect();

    loop {
      let containing = candidates.iter().rev().copied().find(|node| {
        node
          .span(self)
          .is_some_and(|span| span.contains_position(position))
      });
      let Some(node) = containing else { break };

      path.push(node);
      candidates = node.children(self);
    }

    path
  }

  /// The innermost node of a given type which contains a position
  #[must_use]
  pub fn node_at<T: AstNode>(&self, position: u32) -> Option<&T> {
    self
      .nodes_at(position)
      .into_iter()
      .rev()
      .find_map(Node::cast::<T>)
  }

  /// The parent of a node, `None` if it is a top level node or not in this tree
  #[must_use]
  pub fn parent<'a>(&'a self, node: Node<'a>) -> Option<Node<'a>> {
    self
      .walk()
      .find(|candidate| candidate.children(self).iter().any(|child| child.is_same(node)))
  }

  /// Every node of the tree, parents before their children, in source order
  pub fn walk(&self) -> impl Iterator<Item = Node<'_>> {
    let mut stack: Vec<Node<'_>> = self.children().rev().collect();

    iter::from_fn(move || {
      let node = stack.pop()?;
      stack.extend(node.children(self).into_iter().rev());
      Some(node)
    })
  }
}
