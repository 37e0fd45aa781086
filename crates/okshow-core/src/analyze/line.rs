//! The line table produced by classification.

use indexmap::IndexSet;

/// Every name known to one scan: reserved names first, then declared names
/// in declaration order.
pub type NameSet = IndexSet<String>;

/// The kind of a line, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Heading,
    Blank,
    Command,
}

/// One physical input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Heading(Heading),
    Blank(Blank),
    Command(Command),
}

impl Line {
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Heading(_) => Category::Heading,
            Self::Blank(_) => Category::Blank,
            Self::Command(_) => Category::Command,
        }
    }

    #[must_use]
    pub const fn as_command(&self) -> Option<&Command> {
        match self {
            Self::Command(command) => Some(command),
            Self::Heading(_) | Self::Blank(_) => None,
        }
    }
}

/// A line whose first non-blank character is `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// The line as written.
    pub text: String,
    /// Column of the `#` marker.
    pub marker_column: usize,
}

/// An empty or whitespace-only line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blank {
    /// The line as written.
    pub text: String,
}

/// An executable line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command text with any name declaration and leading whitespace removed.
    pub text: String,
    /// Byte offset in `text` where the inline comment starts.
    pub comment_offset: Option<usize>,
    /// 1-based sequence number, when the numbering policy assigns one.
    pub number: Option<usize>,
    /// Declared name, if any.
    pub name: Option<String>,
    /// Length in characters of the shortest prefix that identifies `name`.
    pub prefix_len: usize,
    /// Padding inserted before the comment.
    pub indent: usize,
}

impl Command {
    /// The name if declared, otherwise the sequence number.
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.name, self.number) {
            (Some(name), _) => name.clone(),
            (None, Some(number)) => number.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Text before the comment.
    #[must_use]
    pub fn code(&self) -> &str {
        self.comment_offset
            .map_or(self.text.as_str(), |offset| &self.text[..offset])
    }

    /// The comment, including its `#`.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment_offset.map(|offset| &self.text[offset..])
    }
}
