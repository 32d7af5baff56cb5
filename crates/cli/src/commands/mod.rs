use super::diagnostics::{CodeFrame, Message};

use rlang_syntax::{AST, tokenise};

use anstream::{eprintln, print, println};
use std::fs;

pub enum CommandStatus {
  /// Command was successful, no problems were found
  Success,
  /// Command ran, but problems were found
  Failure,
}

fn read_file(filename: &str) -> Result<String, ()> {
  if filename == "-" {
    return read_stdin();
  }

  match fs::read_to_string(filename) {
    Ok(file) if file.is_empty() => {
      eprintln!("{}", Message::warning(format!("Empty file `{filename}`")));
      Err(())
    }
    Ok(file) if file.len() >= u32::MAX as usize => {
      eprintln!("{}", Message::error("File too large - max size 4GB".into()));
      Err(())
    }
    Ok(file) => Ok(file),
    Err(_) => {
      eprintln!("{}", Message::error(format!("File not found `{filename}`")));
      Err(())
    }
  }
}

fn read_stdin() -> Result<String, ()> {
  use std::io::{self, Read};

  let mut buffer = Vec::new();
  let mut stdin = io::stdin().lock();

  match stdin.read_to_end(&mut buffer) {
    Ok(_) if buffer.len() >= u32::MAX as usize => {
      eprintln!("{}", Message::error("File too large - max size 4GB".into()));
      Err(())
    }
    Ok(_) => String::from_utf8(buffer).map_err(|_| {
      eprintln!("{}", Message::error("STDIN is not valid UTF-8".into()));
    }),
    Err(_) => {
      eprintln!("{}", Message::error("Problem Reading from STDIN".into()));
      Err(())
    }
  }
}

fn display_name(filename: &str) -> &str {
  if filename == "-" { "STDIN" } else { filename }
}

fn report_errors(filename: &str, ast: &AST) {
  for error in &ast.errors {
    eprintln!("{}", Message::from(error));
    eprintln!("{}", CodeFrame::new(filename, &ast.source, error.span()));
  }
}

pub fn check(filename: &str) -> Result<CommandStatus, ()> {
  let source = read_file(filename)?;
  let ast = rlang_syntax::parse(source);

  report_errors(filename, &ast);

  if ast.is_valid() {
    Ok(CommandStatus::Success)
  } else {
    Ok(CommandStatus::Failure)
  }
}

pub fn print_tokens(filename: &str) -> Result<CommandStatus, ()> {
  let source = read_file(filename)?;
  let filename = display_name(filename);

  println!("    ╭─[Tokens: {filename}]");
  for token in tokenise(&source) {
    print!("{:>3} │ {}", token.start, token.kind);
    if !token.kind.has_fixed_length() {
      print!(" (length: {})", token.length);
    }
    println!();
  }
  println!("────╯");

  Ok(CommandStatus::Success)
}

pub fn print_ast(filename: &str) -> Result<CommandStatus, ()> {
  let source = read_file(filename)?;
  let ast = rlang_syntax::parse(source);

  if !ast.is_valid() {
    report_errors(filename, &ast);
    println!();
  }

  println!("╭─[Abstract Syntax Tree: {}]", display_name(filename));
  print!("{ast}");
  println!("╯");

  Ok(CommandStatus::Success)
}

pub fn query(filename: &str, offset: u32) -> Result<CommandStatus, ()> {
  let source = read_file(filename)?;
  let ast = rlang_syntax::parse(source);

  if offset > ast.range().end {
    eprintln!(
      "{}",
      Message::error(format!("Offset {offset} is past the end of the file"))
    );
    return Ok(CommandStatus::Failure);
  }

  let mut found: Vec<String> = ast
    .nodes_at(offset)
    .into_iter()
    .filter_map(|node| {
      let span = node.span(&ast)?;
      Some(format!("{} ({}..{})", node.kind_name(), span.start, span.end))
    })
    .collect();
  if let Some(comment) = ast.comments.get(offset) {
    found.push(format!("Comment ({}..{})", comment.start, comment.end));
  }

  println!("╭─[Query: {}:{offset}]", display_name(filename));
  match found.split_last() {
    Some((last, rest)) => {
      for line in rest {
        println!("├─ {line}");
      }
      println!("╰─ {last}");
    }
    None => println!("╰─ Nothing Found"),
  }

  Ok(CommandStatus::Success)
}
