// Text transport the inspectors talk through. Show writes
// to it and edit blocks on it for one whitespace delimited
// token, the same way formatted stream extraction does

use std::{collections::VecDeque, io::{self, BufRead, StdinLock, Stdout, Write}};

use crate::error::InspectError;

// Called with the selecting Registry locked, an implementation
// must not touch that registry
pub trait Console {
  fn write_text(&mut self, text: &str) -> Result<(), InspectError>;

  // Blocks until one token is available, or returns
  // EndOfInput once the source is exhausted
  fn read_token(&mut self) -> Result<String, InspectError>;
}

pub struct StreamConsole<R: BufRead, W: Write> {
  reader: R,
  writer: W,
  pending: VecDeque<String>
}

pub type StdConsole = StreamConsole<StdinLock<'static>, Stdout>;

impl StdConsole {
  pub fn stdio() -> Self {
    StreamConsole::new(io::stdin().lock(), io::stdout())
  }
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
  pub fn new(reader: R, writer: W) -> Self {
    Self {
      reader,
      writer,
      pending: VecDeque::new()
    }
  }

  pub fn writer(&self) -> &W {
    &self.writer
  }

  pub fn into_parts(self) -> (R, W) {
    (self.reader, self.writer)
  }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
  fn write_text(&mut self, text: &str) -> Result<(), InspectError> {
    self.writer.write_all(text.as_bytes())?;
    // Prompts must be visible before blocking on input
    self.writer.flush()?;
    Ok(())
  }

  fn read_token(&mut self) -> Result<String, InspectError> {
    let mut line = String::new();
    while self.pending.is_empty() {
      line.clear();
      if self.reader.read_line(&mut line)? == 0 {
        return Err(InspectError::EndOfInput);
      }

      self.pending.extend(line.split_whitespace().map(str::to_owned));
    }

    self.pending.pop_front().ok_or(InspectError::EndOfInput)
  }
}
