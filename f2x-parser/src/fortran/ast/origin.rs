//! Node provenance
//!
//!     A node originates from the physical line where its logical line starts. Statements
//!     lifted out of an inline trailing clause (`if (x) call foo`) share the physical line of
//!     the statement that carried them and get a synthetic ordinal so they remain distinct.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Origin {
    pub physical_line: usize,
    pub synthetic_ordinal: Option<u32>,
}

impl Origin {
    pub fn new(physical_line: usize) -> Self {
        Self {
            physical_line,
            synthetic_ordinal: None,
        }
    }

    /// Origin for the n-th statement synthesized from this one's trailing clause.
    pub fn synthetic(self, ordinal: u32) -> Self {
        Self {
            physical_line: self.physical_line,
            synthetic_ordinal: Some(ordinal),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic_ordinal.is_some()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.synthetic_ordinal {
            Some(ordinal) => write!(f, "{}.{}", self.physical_line, ordinal),
            None => write!(f, "{}", self.physical_line),
        }
    }
}
