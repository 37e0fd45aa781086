//! The analysis pipeline: classify, name, align, resolve.
//!
//! [`Document::analyze`] runs the classifier, computes minimal name prefixes
//! and aligns comments, producing the line table that both list mode and
//! single-line mode work from.

mod align;
mod classify;
mod error;
mod line;
mod namer;
mod resolve;
mod warning;

pub use align::{LABEL_SUFFIX, align, visible_width};
pub use classify::{Classifier, CommentLocator, HeuristicLocator, classify};
pub use error::{ShowError, SourceLocation, decode};
pub use line::{Blank, Category, Command, Heading, Line, NameSet};
pub use namer::{assign_prefixes, unique_prefix_len};
pub use resolve::{EditDistance, Levenshtein, MatchKind, Resolution, resolve};
pub use warning::{Discard, Warning, WarningSink};

use crate::{Config, NameAlign};

/// A fully analyzed ok-file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    names: NameSet,
    label_width: usize,
}

impl Document {
    /// Analyze `source` with the default comment locator.
    pub fn analyze<S: WarningSink>(source: &str, config: &Config, sink: &mut S) -> Self {
        Self::analyze_with(source, config, &HeuristicLocator, sink)
    }

    /// Analyze `source`, splitting comments with `locator`.
    pub fn analyze_with<L, S>(source: &str, config: &Config, locator: &L, sink: &mut S) -> Self
    where
        L: CommentLocator,
        S: WarningSink,
    {
        let classifier = Classifier::new(
            config.reserved_names.iter().cloned(),
            config.numbering,
            locator,
            sink,
        );
        let (mut lines, names) = classifier.run(source.lines());
        assign_prefixes(&mut lines, &names);
        let label_width = label_width(&lines, config.name_align);
        align(
            &mut lines,
            config.grouping,
            label_width,
            config.terminal_width,
        );
        Self {
            lines,
            names,
            label_width,
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Reserved and declared names, in that order.
    #[must_use]
    pub const fn names(&self) -> &NameSet {
        &self.names
    }

    /// Width of the label column.
    #[must_use]
    pub const fn label_width(&self) -> usize {
        self.label_width
    }

    #[must_use]
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.lines.iter().filter_map(Line::as_command)
    }

    /// Find the line `query` refers to.
    #[must_use]
    pub fn resolve(&self, query: &str) -> Resolution<'_> {
        resolve(&self.lines, &self.names, query, &Levenshtein)
    }

    /// Find the line `query` refers to, scoring suggestions with `scorer`.
    #[must_use]
    pub fn resolve_with<D: EditDistance>(&self, query: &str, scorer: &D) -> Resolution<'_> {
        resolve(&self.lines, &self.names, query, scorer)
    }
}

/// Width of the label column for the given mode.
fn label_width(lines: &[Line], mode: NameAlign) -> usize {
    let commands = lines.iter().filter_map(Line::as_command);
    match mode {
        NameAlign::None => 0,
        NameAlign::Numbers => commands
            .filter_map(|c| c.number)
            .map(|n| n.to_string().len())
            .max()
            .unwrap_or(0),
        NameAlign::Labels => commands
            .map(|c| c.label().chars().count())
            .max()
            .unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GroupingLevel, NumberingPolicy};

    const SOURCE: &str = "\
# Build
build: cargo build # debug
release: cargo build --release # optimized

# Check
cargo test
cargo clippy # lint";

    fn analyze(source: &str, config: &Config) -> (Document, Vec<Warning>) {
        let mut warnings = Vec::new();
        let document = Document::analyze(source, config, &mut warnings);
        (document, warnings)
    }

    #[test]
    fn test_pipeline() {
        let (document, warnings) = analyze(SOURCE, &Config::default());
        assert!(warnings.is_empty());
        assert_eq!(document.lines().len(), 7);
        assert_eq!(document.commands().count(), 4);
        assert_eq!(document.label_width(), 7);

        let build = document.commands().next().unwrap();
        assert_eq!(build.prefix_len, 1);
        assert_eq!(build.number, Some(1));
        assert_eq!(build.indent, 10);
    }

    #[test]
    fn test_numbers_strictly_increase() {
        for numbering in [NumberingPolicy::All, NumberingPolicy::UnnamedOnly] {
            let config = Config {
                numbering,
                ..Config::default()
            };
            let (document, _) = analyze(SOURCE, &config);
            let numbers: Vec<usize> = document.commands().filter_map(|c| c.number).collect();
            let expected: Vec<usize> = (1..=numbers.len()).collect();
            assert_eq!(numbers, expected);
        }
    }

    #[test]
    fn test_label_width_modes() {
        let source = "a-long-name: ls\n".to_string() + &"pwd\n".repeat(10);
        let width = |name_align| {
            let config = Config {
                name_align,
                ..Config::default()
            };
            analyze(&source, &config).0.label_width()
        };
        assert_eq!(width(NameAlign::None), 0);
        assert_eq!(width(NameAlign::Numbers), 2);
        assert_eq!(width(NameAlign::Labels), 11);
    }

    #[test]
    fn test_resolve_through_document() {
        let (document, _) = analyze(SOURCE, &Config::default());
        let Resolution::Found { line, kind } = document.resolve("r") else {
            panic!("expected a match");
        };
        assert_eq!(line.text, "cargo build --release # optimized");
        assert_eq!(kind, MatchKind::Prefix);
        assert!(matches!(
            document.resolve("relaese"),
            Resolution::NotFound { suggestions } if suggestions == ["release"]
        ));
    }

    #[test]
    fn test_grouping_from_config() {
        let config = Config {
            grouping: GroupingLevel::None,
            ..Config::default()
        };
        let (document, _) = analyze(SOURCE, &config);
        assert!(document.commands().all(|c| c.indent == 0));
    }

    #[test]
    fn test_empty_source() {
        let (document, warnings) = analyze("", &Config::default());
        assert!(document.lines().is_empty());
        assert_eq!(document.commands().count(), 0);
        assert_eq!(document.label_width(), 0);
        assert!(warnings.is_empty());
    }
}
