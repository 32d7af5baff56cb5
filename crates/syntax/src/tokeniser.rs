use crate::span::Span;
use std::{fmt, iter};

/// Convert a range of source code into an [Iterator] of [Token]s
///
/// The final token is always an [`TokenKind::EndOfFile`] token at the end of the range.
pub struct Tokeniser<'source> {
  /// The source code to tokenise
  source: &'source str,
  /// The current position in the source code
  position: usize,
  /// Where to stop tokenising, exclusive
  end: usize,
  /// Has the end of file token been emitted?
  finished: bool,
}
impl<'source> From<&'source str> for Tokeniser<'source> {
  /// Create a new [Tokeniser] over the whole of a source code string
  ///
  /// # Panics
  /// Panics if the length of the source code is greater than `u32::MAX`
  fn from(value: &'source str) -> Self {
    assert!(value.len() < u32::MAX as usize);

    Self {
      source: value,
      position: 0,
      end: value.len(),
      finished: false,
    }
  }
}
impl<'source> Tokeniser<'source> {
  /// Create a new [Tokeniser] over part of a source code string
  ///
  /// The range is clamped to the source, and token positions are relative to the
  /// start of the whole source rather than the range.
  ///
  /// # Panics
  /// Panics if the source is longer than `u32::MAX`, or if the range does not
  /// fall on character boundaries
  pub fn new(source: &'source str, range: Span) -> Self {
    assert!(source.len() < u32::MAX as usize);

    let end = (range.end as usize).min(source.len());
    let start = (range.start as usize).min(end);
    assert!(source.is_char_boundary(start) && source.is_char_boundary(end));

    Self {
      source,
      position: start,
      end,
      finished: false,
    }
  }

  /// Has the end of the range been reached?
  fn is_end(&self, position: usize) -> bool {
    position >= self.end
  }

  fn byte(&self, position: usize) -> Option<u8> {
    if self.is_end(position) {
      None
    } else {
      Some(self.source.as_bytes()[position])
    }
  }

  /// Get the next token from the source code
  fn get_next_token(&mut self) -> (TokenKind, usize) {
    let Some(character) = self.byte(self.position) else {
      return (TokenKind::EndOfFile, 0);
    };
    let next_character = self.byte(self.position + 1);
    let third_character = self.byte(self.position + 2);

    match character {
      // Whitespace + Comments
      b' ' | b'\r' | b'\t' | 0x0C => {
        self.position += 1;
        self.get_next_token()
      }
      b'\n' => (TokenKind::EndOfLine, 1),
      b'#' => self.comment(),

      // Values
      b'r' | b'R' if self.is_raw_string_start() => self.raw_string(),
      quote @ (b'"' | b'\'') => self.string(quote, TokenKind::String),
      b'`' => self.string(b'`', TokenKind::Identifier),
      b'0'..=b'9' => self.number(),
      b'.' if matches!(next_character, Some(b'0'..=b'9')) => self.number(),
      b'.' | b'a'..=b'z' | b'A'..=b'Z' => self.identifier(),

      // Brackets + Separators
      b'(' => (TokenKind::LeftParen, 1),
      b')' => (TokenKind::RightParen, 1),
      b'{' => (TokenKind::LeftCurly, 1),
      b'}' => (TokenKind::RightCurly, 1),
      b'[' if matches!(next_character, Some(b'[')) => (TokenKind::LeftDoubleSquare, 2),
      b'[' => (TokenKind::LeftSquare, 1),
      b']' => (TokenKind::RightSquare, 1),
      b',' => (TokenKind::Comma, 1),
      b';' => (TokenKind::Semicolon, 1),

      // Assignment
      b'<' if next_character == Some(b'<') && third_character == Some(b'-') => {
        (TokenKind::LeftSuperAssign, 3)
      }
      b'<' if matches!(next_character, Some(b'-')) => (TokenKind::LeftAssign, 2),
      b'-' if next_character == Some(b'>') && third_character == Some(b'>') => {
        (TokenKind::RightSuperAssign, 3)
      }
      b'-' if matches!(next_character, Some(b'>')) => (TokenKind::RightAssign, 2),
      b':' if matches!(next_character, Some(b'=')) => (TokenKind::ColonEqual, 2),

      // Access
      b':' if next_character == Some(b':') && third_character == Some(b':') => {
        (TokenKind::ColonColonColon, 3)
      }
      b':' if matches!(next_character, Some(b':')) => (TokenKind::ColonColon, 2),
      b'$' => (TokenKind::Dollar, 1),
      b'@' => (TokenKind::At, 1),

      // Logical Operators
      b'&' if matches!(next_character, Some(b'&')) => (TokenKind::AndAnd, 2),
      b'&' => (TokenKind::And, 1),
      b'|' if matches!(next_character, Some(b'|')) => (TokenKind::OrOr, 2),
      b'|' if matches!(next_character, Some(b'>')) => (TokenKind::Pipe, 2),
      b'|' => (TokenKind::Or, 1),

      // Operators
      b'+' => (TokenKind::Plus, 1),
      b'-' => (TokenKind::Minus, 1),
      b'*' if matches!(next_character, Some(b'*')) => (TokenKind::Caret, 2),
      b'*' => (TokenKind::Star, 1),
      b'/' => (TokenKind::Slash, 1),
      b'^' => (TokenKind::Caret, 1),
      b'%' => self.special(),
      b':' => (TokenKind::Colon, 1),
      b'~' => (TokenKind::Tilde, 1),
      b'?' => (TokenKind::Question, 1),
      b'\\' => (TokenKind::Backslash, 1),

      // Equalities
      b'!' if matches!(next_character, Some(b'=')) => (TokenKind::BangEqual, 2),
      b'=' if matches!(next_character, Some(b'=')) => (TokenKind::EqualEqual, 2),
      b'<' if matches!(next_character, Some(b'=')) => (TokenKind::LessEqual, 2),
      b'>' if matches!(next_character, Some(b'=')) => (TokenKind::GreaterEqual, 2),
      b'!' => (TokenKind::Bang, 1),
      b'=' => (TokenKind::Equal, 1),
      b'<' => (TokenKind::Less, 1),
      b'>' => (TokenKind::Greater, 1),

      // Identifiers in other scripts, or an unknown character
      x if x >= 0x80 => match self.character_at(self.position) {
        Some(c) if c.is_alphabetic() => self.identifier(),
        Some(c) => (TokenKind::Unknown, c.len_utf8()),
        None => (TokenKind::Unknown, 1),
      },
      _ => (TokenKind::Unknown, 1),
    }
  }

  fn character_at(&self, position: usize) -> Option<char> {
    if self.is_end(position) {
      return None;
    }

    self.source[position..self.end].chars().next()
  }

  /// Skip to the end of a comment token (a newline)
  fn comment(&self) -> (TokenKind, usize) {
    let length = self.source.as_bytes()[self.position..self.end]
      .iter()
      .take_while(|c| **c != b'\n')
      .count();

    (TokenKind::Comment, length)
  }

  /// Go to the end of a quoted token, the closing quote
  ///
  /// A backslash escapes the following character, so an escaped quote does not end the token.
  fn string(&self, quote: u8, kind: TokenKind) -> (TokenKind, usize) {
    let mut position = self.position + 1;

    loop {
      match self.byte(position) {
        None => break (TokenKind::UnterminatedString, self.end - self.position),
        Some(b'\\') => position += 2,
        Some(c) if c == quote => break (kind, position - self.position + 1),
        Some(_) => position += 1,
      }
    }
  }

  /// Is the current position the start of a raw string, e.g. `r"(...)"`, `R'--[...]--'`
  fn is_raw_string_start(&self) -> bool {
    if !matches!(self.byte(self.position + 1), Some(b'"' | b'\'')) {
      return false;
    }

    let mut position = self.position + 2;
    while self.byte(position) == Some(b'-') {
      position += 1;
    }

    matches!(self.byte(position), Some(b'(' | b'[' | b'{'))
  }

  /// Go to the end of a raw string, where the closing bracket, dashes and quote match the opening
  fn raw_string(&self) -> (TokenKind, usize) {
    let bytes = self.source.as_bytes();
    let quote = bytes[self.position + 1];

    let dashes_start = self.position + 2;
    let mut position = dashes_start;
    while self.byte(position) == Some(b'-') {
      position += 1;
    }
    let dashes = position - dashes_start;
    let closing = match bytes[position] {
      b'(' => b')',
      b'[' => b']',
      _ => b'}',
    };
    position += 1;

    while !self.is_end(position) {
      if bytes[position] == closing {
        let dashes_end = position + 1 + dashes;
        let dashes_match = (position + 1..dashes_end).all(|i| self.byte(i) == Some(b'-'));

        if dashes_match && self.byte(dashes_end) == Some(quote) {
          return (TokenKind::String, dashes_end + 1 - self.position);
        }
      }
      position += 1;
    }

    (TokenKind::UnterminatedString, self.end - self.position)
  }

  /// Get a `%any%` operator token, which must be closed on the same line
  fn special(&self) -> (TokenKind, usize) {
    let mut position = self.position + 1;

    loop {
      match self.byte(position) {
        None | Some(b'\n') => break (TokenKind::Unknown, 1),
        Some(b'%') => break (TokenKind::Special, position - self.position + 1),
        Some(_) => position += 1,
      }
    }
  }

  fn count_while(&self, from: usize, predicate: impl Fn(u8) -> bool) -> usize {
    (from..self.end)
      .take_while(|position| predicate(self.source.as_bytes()[*position]))
      .count()
  }

  /// Get a number token, either decimal or hexadecimal, with an optional `L` or `i` suffix
  fn number(&self) -> (TokenKind, usize) {
    let mut position = self.position;
    let mut kind = TokenKind::Number;

    let is_hex = self.byte(position) == Some(b'0')
      && matches!(self.byte(position + 1), Some(b'x' | b'X'));

    if is_hex {
      position += 2;
      let digits = self.count_while(position, |c| c.is_ascii_hexdigit());
      if digits == 0 {
        kind = TokenKind::InvalidNumber;
      }
      position += digits;

      if matches!(self.byte(position), Some(b'p' | b'P')) {
        position = self.exponent(position + 1, &mut kind);
      }
    } else {
      position += self.count_while(position, |c| c.is_ascii_digit());

      if self.byte(position) == Some(b'.') {
        position += 1;
        position += self.count_while(position, |c| c.is_ascii_digit());
      }

      if matches!(self.byte(position), Some(b'e' | b'E')) {
        position = self.exponent(position + 1, &mut kind);
      }
    }

    if matches!(self.byte(position), Some(b'L' | b'i')) {
      position += 1;
    }

    (kind, position - self.position)
  }

  /// Match the digits of an exponent, with an optional sign
  fn exponent(&self, mut position: usize, kind: &mut TokenKind) -> usize {
    if matches!(self.byte(position), Some(b'+' | b'-')) {
      position += 1;
    }

    let digits = self.count_while(position, |c| c.is_ascii_digit());
    if digits == 0 {
      *kind = TokenKind::InvalidNumber;
    }

    position + digits
  }

  /// Get an identifier token, a letter or `.` followed by letters, digits, `.` and `_`
  fn identifier(&self) -> (TokenKind, usize) {
    let mut position = self.position;

    while let Some(character) = self.character_at(position) {
      if character.is_alphanumeric() || character == '.' || character == '_' {
        position += character.len_utf8();
      } else {
        break;
      }
    }

    let length = position - self.position;
    (self.identifier_type(length), length)
  }

  /// Determines the type of the identifier, is it a keyword or a standard identifier
  fn identifier_type(&self, length: usize) -> TokenKind {
    match &self.source[self.position..self.position + length] {
      "if" => TokenKind::If,
      "else" => TokenKind::Else,
      "repeat" => TokenKind::Repeat,
      "while" => TokenKind::While,
      "function" => TokenKind::Function,
      "for" => TokenKind::For,
      "in" => TokenKind::In,
      "next" => TokenKind::Next,
      "break" => TokenKind::Break,
      "TRUE" => TokenKind::True,
      "FALSE" => TokenKind::False,
      "NULL" => TokenKind::Null,
      "NA" | "NA_integer_" | "NA_real_" | "NA_character_" | "NA_complex_" => TokenKind::Na,
      "Inf" => TokenKind::Inf,
      "NaN" => TokenKind::NaN,
      "..." => TokenKind::Ellipsis,
      _ => TokenKind::Identifier,
    }
  }
}
impl Iterator for Tokeniser<'_> {
  type Item = Token;

  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }

    let (kind, len) = self.get_next_token();
    let start = self.position;
    self.position += len;
    self.finished = kind == TokenKind::EndOfFile;

    Some(Token {
      kind,
      start: u32::try_from(start).unwrap_or(u32::MAX),
      length: u32::try_from(len).unwrap_or(u32::MAX),
    })
  }
}
impl iter::FusedIterator for Tokeniser<'_> {}

/// A Token of source code, a lexeme of the language
///
/// With the type of token, start position and length of the token in the source code
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Token {
  /// The type of the token
  pub kind: TokenKind,
  /// The byte offset of the start of the token
  pub start: u32,
  /// The length of the token in bytes
  pub length: u32,
}
impl Token {
  /// The byte offset of the end of the token
  #[must_use]
  pub fn end(&self) -> u32 {
    self.start + self.length
  }
}
impl From<Token> for Span {
  fn from(token: Token) -> Self {
    Self {
      start: token.start,
      end: token.end(),
    }
  }
}
impl From<&Token> for Span {
  fn from(token: &Token) -> Self {
    Self::from(*token)
  }
}

/// The type of a token
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
  // Brackets
  /// `(`
  LeftParen,
  /// `)`
  RightParen,
  /// `{`
  LeftCurly,
  /// `}`
  RightCurly,
  /// `[`
  LeftSquare,
  /// `[[`
  LeftDoubleSquare,
  /// `]`
  RightSquare,

  // Separators
  /// `,`
  Comma,
  /// `;`
  Semicolon,

  // Operators
  /// `-`
  Minus,
  /// `+`
  Plus,
  /// `/`
  Slash,
  /// `*`
  Star,
  /// `^` or `**`
  Caret,
  /// `%any%`, e.g. `%in%`, `%%`
  Special,
  /// `|>`
  Pipe,
  /// `:`
  Colon,
  /// `~`
  Tilde,
  /// `?`
  Question,
  /// `!`
  Bang,
  /// `&`
  And,
  /// `&&`
  AndAnd,
  /// `|`
  Or,
  /// `||`
  OrOr,
  /// `\`, shorthand for `function`
  Backslash,

  // Assignment
  /// `<-`
  LeftAssign,
  /// `<<-`
  LeftSuperAssign,
  /// `->`
  RightAssign,
  /// `->>`
  RightSuperAssign,
  /// `:=`
  ColonEqual,
  /// `=`
  Equal,

  // Access
  /// `$`
  Dollar,
  /// `@`
  At,
  /// `::`
  ColonColon,
  /// `:::`
  ColonColonColon,

  // Comparators
  /// `!=`
  BangEqual,
  /// `==`
  EqualEqual,
  /// `>`
  Greater,
  /// `>=`
  GreaterEqual,
  /// `<`
  Less,
  /// `<=`
  LessEqual,

  // Values
  /// A name, a sequence of letters, digits, `.` and `_`, or any characters between backticks
  Identifier,
  /// A number, decimal or hexadecimal, with an optional `L` or `i` suffix
  Number,
  /// A string, any characters between `'` or `"`, or a raw string
  String,
  /// `...`
  Ellipsis,

  // Keywords
  /// `if`
  If,
  /// `else`
  Else,
  /// `repeat`
  Repeat,
  /// `while`
  While,
  /// `function`
  Function,
  /// `for`
  For,
  /// `in`
  In,
  /// `next`
  Next,
  /// `break`
  Break,

  // Constants
  /// `TRUE`
  True,
  /// `FALSE`
  False,
  /// `NULL`
  Null,
  /// `NA`, `NA_integer_`, `NA_real_`, `NA_character_`, `NA_complex_`
  Na,
  /// `Inf`
  Inf,
  /// `NaN`
  NaN,

  // Whitespace + Comments
  /// A comment, consisting of `#` then any number of characters before a newline
  Comment,
  /// The end of a line, indicating a `\n`
  EndOfLine,
  /// A token to indicate the end of the file
  EndOfFile,

  // Error
  /// An unknown character, not known to fit in a [`TokenKind`]
  #[default]
  Unknown,
  /// A string where the end of the file has been reached, thus unterminated
  UnterminatedString,
  /// A number with a missing exponent or missing hexadecimal digits
  InvalidNumber,
}
impl TokenKind {
  /// Is the token a reserved word
  #[must_use]
  pub fn is_keyword(self) -> bool {
    matches!(
      self,
      Self::If
        | Self::Else
        | Self::Repeat
        | Self::While
        | Self::Function
        | Self::For
        | Self::In
        | Self::Next
        | Self::Break
        | Self::True
        | Self::False
        | Self::Null
        | Self::Na
        | Self::Inf
        | Self::NaN
    )
  }

  /// Is the token always the same length
  #[must_use]
  pub fn has_fixed_length(self) -> bool {
    !matches!(
      self,
      Self::Identifier
        | Self::Number
        | Self::String
        | Self::Special
        | Self::Na
        | Self::Comment
        | Self::Unknown
        | Self::UnterminatedString
        | Self::InvalidNumber
    )
  }

  /// Does the token open a bracketed region
  #[must_use]
  pub fn is_opening_bracket(self) -> bool {
    matches!(
      self,
      Self::LeftParen | Self::LeftCurly | Self::LeftSquare | Self::LeftDoubleSquare
    )
  }

  /// Does the token close a bracketed region
  #[must_use]
  pub fn is_closing_bracket(self) -> bool {
    matches!(self, Self::RightParen | Self::RightCurly | Self::RightSquare)
  }
}
impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      // Brackets
      Self::LeftParen => write!(f, "("),
      Self::RightParen => write!(f, ")"),
      Self::LeftCurly => write!(f, "{{"),
      Self::RightCurly => write!(f, "}}"),
      Self::LeftSquare => write!(f, "["),
      Self::LeftDoubleSquare => write!(f, "[["),
      Self::RightSquare => write!(f, "]"),

      // Separators
      Self::Comma => write!(f, ","),
      Self::Semicolon => write!(f, ";"),

      // Operators
      Self::Minus => write!(f, "-"),
      Self::Plus => write!(f, "+"),
      Self::Slash => write!(f, "/"),
      Self::Star => write!(f, "*"),
      Self::Caret => write!(f, "^"),
      Self::Special => write!(f, "Special Operator"),
      Self::Pipe => write!(f, "|>"),
      Self::Colon => write!(f, ":"),
      Self::Tilde => write!(f, "~"),
      Self::Question => write!(f, "?"),
      Self::Bang => write!(f, "!"),
      Self::And => write!(f, "&"),
      Self::AndAnd => write!(f, "&&"),
      Self::Or => write!(f, "|"),
      Self::OrOr => write!(f, "||"),
      Self::Backslash => write!(f, "\\"),

      // Assignment
      Self::LeftAssign => write!(f, "<-"),
      Self::LeftSuperAssign => write!(f, "<<-"),
      Self::RightAssign => write!(f, "->"),
      Self::RightSuperAssign => write!(f, "->>"),
      Self::ColonEqual => write!(f, ":="),
      Self::Equal => write!(f, "="),

      // Access
      Self::Dollar => write!(f, "$"),
      Self::At => write!(f, "@"),
      Self::ColonColon => write!(f, "::"),
      Self::ColonColonColon => write!(f, ":::"),

      // Equalities
      Self::BangEqual => write!(f, "!="),
      Self::EqualEqual => write!(f, "=="),
      Self::Greater => write!(f, ">"),
      Self::GreaterEqual => write!(f, ">="),
      Self::Less => write!(f, "<"),
      Self::LessEqual => write!(f, "<="),

      // With Values
      Self::Identifier => write!(f, "Identifier"),
      Self::Number => write!(f, "Number"),
      Self::String => write!(f, "String"),
      Self::Ellipsis => write!(f, "..."),

      // Keywords
      Self::If => write!(f, "if"),
      Self::Else => write!(f, "else"),
      Self::Repeat => write!(f, "repeat"),
      Self::While => write!(f, "while"),
      Self::Function => write!(f, "function"),
      Self::For => write!(f, "for"),
      Self::In => write!(f, "in"),
      Self::Next => write!(f, "next"),
      Self::Break => write!(f, "break"),

      // Constants
      Self::True => write!(f, "TRUE"),
      Self::False => write!(f, "FALSE"),
      Self::Null => write!(f, "NULL"),
      Self::Na => write!(f, "NA"),
      Self::Inf => write!(f, "Inf"),
      Self::NaN => write!(f, "NaN"),

      // Whitespace + Comments
      Self::Comment => write!(f, "Comment"),
      Self::EndOfLine => write!(f, "New Line"),
      Self::EndOfFile => write!(f, "End of File"),

      // Errors
      Self::Unknown => write!(f, "Unknown Character"),
      Self::UnterminatedString => write!(f, "Unterminated String"),
      Self::InvalidNumber => write!(f, "Invalid Number"),
    }
  }
}
