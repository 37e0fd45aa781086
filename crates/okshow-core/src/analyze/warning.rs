//! Non-fatal diagnostics raised while classifying.

use std::fmt;

/// A recoverable problem found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A name was declared twice, or shadows a reserved name. The line keeps
    /// its number but loses the name.
    DuplicateName {
        name: String,
        /// 1-indexed physical line.
        line: usize,
        number: Option<usize>,
    },
    /// Something that looks like a name declaration but does not follow the
    /// identifier grammar. Classification is unaffected.
    MalformedName {
        candidate: String,
        /// 1-indexed physical line.
        line: usize,
        number: Option<usize>,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name, number, .. } => {
                write!(f, "Duplicate named command '{name}'")?;
                match number {
                    Some(number) => write!(f, "; mapped to {number}."),
                    None => write!(f, "; ignored."),
                }
            }
            Self::MalformedName {
                candidate, number, ..
            } => {
                write!(
                    f,
                    "Possible unrecognized named command '{candidate}' detected with illegal characters"
                )?;
                match number {
                    Some(number) => write!(f, " (mapped to {number})"),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Receives warnings as they are found.
pub trait WarningSink {
    fn warn(&mut self, warning: Warning);
}

impl WarningSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// Discards every warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl WarningSink for Discard {
    fn warn(&mut self, _warning: Warning) {}
}
