use owo_colors::{OwoColorize, Style};
use rlang_syntax::{LineIndex, ParseError, Span, TokenKind, tokenise};
use std::fmt;

#[derive(Debug)]
pub enum Severity {
  Error,
  Warning,
}
pub struct Message {
  pub title: String,
  pub body: String,
  pub hint: Option<String>,
  pub severity: Severity,
}
impl Message {
  pub fn error(message: String) -> Self {
    Self {
      title: message,
      body: String::new(),
      hint: None,
      severity: Severity::Error,
    }
  }
  pub fn warning(message: String) -> Self {
    Self {
      title: message,
      body: String::new(),
      hint: None,
      severity: Severity::Warning,
    }
  }
}
impl fmt::Display for Message {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.severity {
      Severity::Error => write!(f, "{}", "✕ Error".bold().red()),
      Severity::Warning => write!(f, "{}", "⚠ Warning".bold().yellow()),
    }?;
    writeln!(f, "{} {}", ":".bold(), &self.title.bold())?;

    if !self.body.is_empty() {
      writeln!(f, "{}", &self.body)?;
    }

    if let Some(hint) = &self.hint {
      writeln!(f, "{} {}", "hint:".italic().cyan(), hint)?;
    }

    Ok(())
  }
}
impl From<&ParseError> for Message {
  fn from(error: &ParseError) -> Self {
    Self {
      title: error.title(),
      body: error.message(),
      hint: hint(error),
      severity: Severity::Error,
    }
  }
}

fn hint(error: &ParseError) -> Option<String> {
  match error {
    ParseError::MissingClosing { opening, .. } => {
      let closing = match opening.kind {
        TokenKind::LeftParen => ")",
        TokenKind::LeftSquare => "]",
        TokenKind::LeftDoubleSquare => "]]",
        _ => "}",
      };
      Some(format!("add a `{closing}` to close it"))
    }
    ParseError::DuplicateParameter(_) => Some("rename one of the parameters".into()),
    _ => None,
  }
}

pub struct CodeFrame<'a> {
  title: &'a str,
  source: &'a str,
  span: Span,

  lines: LineIndex,
}
impl<'a> CodeFrame<'a> {
  pub fn new(title: &'a str, source: &'a str, span: Span) -> Self {
    Self {
      title: if title == "-" { "STDIN" } else { title },
      source,
      span,
      lines: LineIndex::from_source(source),
    }
  }
}
impl fmt::Display for CodeFrame<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let start_line = self.lines.line(self.span).max(1);
    let end_line = self.lines.final_line(self.span).max(start_line);

    writeln!(
      f,
      "    {}{}{}{}{}",
      "╭─[".dimmed(),
      self.title,
      ":".dimmed(),
      start_line,
      "]".dimmed()
    )?;

    for line in start_line..=end_line {
      let line_text = self.lines.line_span(line).source_text(self.source);
      write!(f, "{line:>3} {}", "│".dimmed())?;
      if !line_text.is_empty() {
        write!(f, " ")?;
      }
      highlight_source(f, line_text)?;
      if !line_text.ends_with('\n') {
        writeln!(f)?;
      }
    }

    write!(f, "{}", "────╯".dimmed())
  }
}

/// Write a line of source, with colours for each kind of token
pub fn highlight_source(output: &mut dyn fmt::Write, source: &str) -> fmt::Result {
  let mut last = 0;
  for token in tokenise(source) {
    // if there is a gap between tokens, add spaces for the gap
    for _ in last..token.start {
      write!(output, " ")?;
    }

    let style = match token.kind {
      TokenKind::Number
      | TokenKind::True
      | TokenKind::False
      | TokenKind::Null
      | TokenKind::Na
      | TokenKind::Inf
      | TokenKind::NaN => Style::new().blue(),
      TokenKind::String | TokenKind::UnterminatedString => Style::new().green(),
      TokenKind::Function | TokenKind::Backslash => Style::new().magenta(),
      kind if kind.is_keyword() => Style::new().cyan(),
      TokenKind::Comment => Style::new().dimmed(),
      _ => Style::new(),
    };
    let token_text = Span::from(token).source_text(source);
    write!(output, "{}", token_text.style(style))?;

    last = token.end();
  }

  Ok(())
}
