use std::io;

use thiserror::Error;

// NOTE: This type is considered to be part of public API
#[derive(Debug, Error)]
pub enum InspectError {
  #[error("cannot parse {input:?} as {type_name}: {reason}")]
  Parse {
    input: String,
    type_name: &'static str,
    reason: String
  },

  #[error("text source ran out of input")]
  EndOfInput,

  #[error("console I/O failed: {0}")]
  Io(#[from] io::Error)
}

impl InspectError {
  pub fn is_parse(&self) -> bool {
    matches!(self, Self::Parse { .. })
  }
}
