use serde::Deserialize;
use thiserror::Error;

/// Built-in commands of the wrapper shell. Documents may not redeclare them.
pub const DEFAULT_RESERVED_NAMES: &[&str] = &[
    "list",
    "l",
    "list-once",
    "L",
    "list-prompt",
    "p",
    "help",
    "h",
];

/// How comments are grouped when aligning them to a shared column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingLevel {
    /// No alignment.
    None,
    /// Align runs of consecutive commands; headings and blank lines resync.
    Blocks,
    /// Align everything under one heading, blank lines included (default).
    #[default]
    Sections,
    /// Align the whole document as one group.
    Global,
}

impl GroupingLevel {
    /// Map the numeric level used on the command line (0-3).
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::None),
            1 => Some(Self::Blocks),
            2 => Some(Self::Sections),
            3 => Some(Self::Global),
            _ => None,
        }
    }
}

/// Which command lines consume a sequence number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum NumberingPolicy {
    /// Every command line gets the next number, named or not (default).
    #[default]
    All,
    /// Named lines are addressed by name only and get no number.
    UnnamedOnly,
}

/// Width of the label column in front of each command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameAlign {
    /// No label column padding.
    None,
    /// Pad to the widest line number.
    Numbers,
    /// Pad to the widest label, names included (default).
    #[default]
    Labels,
}

impl NameAlign {
    /// Map the numeric level used on the command line (0-2).
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::None),
            1 => Some(Self::Numbers),
            2 => Some(Self::Labels),
            _ => None,
        }
    }
}

/// Where headings start relative to the label column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingAlign {
    /// Headings start at column zero.
    None,
    /// Headings line up with the label colons (default).
    #[default]
    Colon,
    /// Headings line up with the command text.
    Code,
}

impl HeadingAlign {
    /// Map the numeric level used on the command line (0-2).
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::None),
            1 => Some(Self::Colon),
            2 => Some(Self::Code),
            _ => None,
        }
    }
}

/// Escape sequences used when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Resets all attributes.
    pub reset: String,
    /// Heading lines.
    pub heading: String,
    /// The minimal unique prefix of a label.
    pub number: String,
    /// The remainder of a label and its colon.
    pub number_rest: String,
    /// Inline comments.
    pub comment: String,
    /// Command text.
    pub command: String,
}

impl Palette {
    /// A palette without any escape sequences.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            reset: String::new(),
            heading: String::new(),
            number: String::new(),
            number_rest: String::new(),
            comment: String::new(),
            command: String::new(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            reset: "\x1b[0m".to_string(),
            heading: "\x1b[0;31m".to_string(),
            number: "\x1b[1;36m".to_string(),
            number_rest: "\x1b[0;36m".to_string(),
            comment: "\x1b[0;34m".to_string(),
            command: "\x1b[0m".to_string(),
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigError {
    /// Description of the validation error.
    pub message: String,
}

/// Options for one analysis run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comment alignment grouping.
    pub grouping: GroupingLevel,
    /// Label column width mode.
    pub name_align: NameAlign,
    /// Heading start column mode.
    pub heading_align: HeadingAlign,
    /// Which command lines are numbered.
    pub numbering: NumberingPolicy,
    /// Names the document may not declare.
    pub reserved_names: Vec<String>,
    /// Terminal columns available for a rendered line.
    pub terminal_width: usize,
    /// Colors used when rendering.
    pub palette: Palette,
}

impl Config {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal width is zero or the reserved-name
    /// list is empty or holds an empty name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terminal_width == 0 {
            return Err(ConfigError {
                message: "terminal_width must be at least 1, got 0".to_string(),
            });
        }
        if self.reserved_names.is_empty() {
            return Err(ConfigError {
                message: "reserved_names must contain at least one name".to_string(),
            });
        }
        if let Some(index) = self.reserved_names.iter().position(String::is_empty) {
            return Err(ConfigError {
                message: format!("reserved_names[{index}] is empty"),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grouping: GroupingLevel::default(),
            name_align: NameAlign::default(),
            heading_align: HeadingAlign::default(),
            numbering: NumberingPolicy::default(),
            reserved_names: DEFAULT_RESERVED_NAMES
                .iter()
                .map(ToString::to_string)
                .collect(),
            terminal_width: 80,
            palette: Palette::default(),
        }
    }
}
