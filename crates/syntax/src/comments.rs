//! The locations of comments in the source
//!
//! Comments are removed from the tokens before parsing, so aren't part of the tree.

use crate::span::Span;

/// A set of non-overlapping comment spans, ordered by position
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentSet {
  spans: Vec<Span>,
}
impl CommentSet {
  /// Add a comment, which must come after all the existing comments
  pub(crate) fn push(&mut self, span: Span) {
    debug_assert!(self.spans.last().is_none_or(|last| last.end <= span.start));
    self.spans.push(span);
  }

  /// Is a position within a comment?
  ///
  /// The end of a comment is included, as a cursor at the end of a line is still in the
  /// comment.
  #[must_use]
  pub fn contains(&self, position: u32) -> bool {
    self.get(position).is_some()
  }

  /// The comment which contains a position
  #[must_use]
  pub fn get(&self, position: u32) -> Option<Span> {
    let index = self.spans.partition_point(|span| span.end < position);

    self
      .spans
      .get(index)
      .filter(|span| span.contains_position(position))
      .copied()
  }

  /// How many comments there are
  #[must_use]
  pub fn len(&self) -> usize {
    self.spans.len()
  }

  /// Are there no comments?
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.spans.is_empty()
  }

  /// Iterate over the comments, in source order
  pub fn iter(&self) -> impl ExactSizeIterator<Item = Span> + '_ {
    self.spans.iter().copied()
  }
}
