//! Analysis library for ok-files.
//!
//! Classifies the lines of an ok-file, works out the shortest prefix that
//! addresses each named line, aligns inline comments ("elastic tabs"), and
//! resolves a number or name fragment to a single line.

mod analyze;
mod config;
mod render;

pub use analyze::{
    Blank, Category, Classifier, Command, CommentLocator, Discard, Document, EditDistance,
    Heading, HeuristicLocator, LABEL_SUFFIX, Levenshtein, Line, MatchKind, NameSet, Resolution,
    ShowError, SourceLocation, Warning, WarningSink, align, assign_prefixes, classify, decode,
    resolve, unique_prefix_len, visible_width,
};
pub use config::{
    Config, ConfigError, DEFAULT_RESERVED_NAMES, GroupingLevel, HeadingAlign, NameAlign,
    NumberingPolicy, Palette,
};
pub use render::Renderer;
