//! Turn raw lines into typed line records.

use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;

use super::line::{Blank, Command, Heading, Line, NameSet};
use super::warning::{Warning, WarningSink};
use crate::NumberingPolicy;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(#)").expect("heading pattern is valid"));

static BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*$").expect("blank pattern is valid"));

static NAMED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*([A-Za-z_][-A-Za-z0-9_.]*)[ \t]*:").expect("name pattern is valid")
});

/// Anything up to 20 characters directly before a colon.
static LOOSE_NAMED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[ \t]*([^:"][^ :"]{0,19})[ \t]*:"#).expect("loose name pattern is valid")
});

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Finds where the inline comment of a command starts.
pub trait CommentLocator {
    /// Byte offset of the comment start in `text`, if there is one.
    fn locate(&self, text: &str) -> Option<usize>;
}

/// The first `#` at the start of the text or after whitespace, unless it
/// opens `#{`.
///
/// This ignores quoting, so `echo "a #b"` is split at the `#`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicLocator;

impl CommentLocator for HeuristicLocator {
    fn locate(&self, text: &str) -> Option<usize> {
        let mut previous: Option<char> = None;
        let mut chars = text.char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            if c == '#'
                && previous.is_none_or(char::is_whitespace)
                && chars.peek().is_none_or(|&(_, next)| next != '{')
            {
                return Some(offset);
            }
            previous = Some(c);
        }
        None
    }
}

/// Classifies lines in one pass, collecting declared names.
pub struct Classifier<'a, L, S> {
    locator: &'a L,
    sink: &'a mut S,
    numbering: NumberingPolicy,
    names: NameSet,
    counter: usize,
}

impl<'a, L: CommentLocator, S: WarningSink> Classifier<'a, L, S> {
    /// Start a scan. `reserved` seeds the name set.
    pub fn new<I, N>(reserved: I, numbering: NumberingPolicy, locator: &'a L, sink: &'a mut S) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            locator,
            sink,
            numbering,
            names: reserved.into_iter().map(Into::<String>::into).collect(),
            counter: 0,
        }
    }

    /// Classify every line and return the table with the final name set.
    #[must_use]
    pub fn run<'l, I>(mut self, lines: I) -> (Vec<Line>, NameSet)
    where
        I: IntoIterator<Item = &'l str>,
    {
        let mut table = Vec::new();
        for (index, raw) in lines.into_iter().enumerate() {
            let raw = if index == 0 {
                raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw)
            } else {
                raw
            };
            table.push(self.classify(index + 1, raw));
        }
        debug!(
            "classified {} lines, {} names known",
            table.len(),
            self.names.len()
        );
        (table, self.names)
    }

    fn classify(&mut self, line_no: usize, raw: &str) -> Line {
        if let Some(marker) = HEADING.captures(raw).and_then(|c| c.get(1)) {
            return Line::Heading(Heading {
                text: raw.to_string(),
                marker_column: raw[..marker.start()].chars().count(),
            });
        }
        if BLANK.is_match(raw) {
            return Line::Blank(Blank {
                text: raw.to_string(),
            });
        }
        Line::Command(self.classify_command(line_no, raw))
    }

    fn classify_command(&mut self, line_no: usize, raw: &str) -> Command {
        let mut rest = raw;
        let mut name = None;
        let mut duplicate = None;
        let mut malformed = None;

        if let Some(captures) = NAMED_LINE.captures(raw) {
            let declared = &captures[1];
            if self.names.contains(declared) {
                duplicate = Some(declared.to_string());
            } else {
                trace!("line {line_no} declares '{declared}'");
                self.names.insert(declared.to_string());
                name = Some(declared.to_string());
            }
            rest = &raw[captures.get(0).map_or(0, |m| m.end())..];
        } else if let Some(captures) = LOOSE_NAMED_LINE.captures(raw) {
            malformed = Some(captures[1].to_string());
        }

        let number = if name.is_none() || self.numbering == NumberingPolicy::All {
            self.counter += 1;
            Some(self.counter)
        } else {
            None
        };

        if let Some(name) = duplicate {
            self.sink.warn(Warning::DuplicateName {
                name,
                line: line_no,
                number,
            });
        }
        if let Some(candidate) = malformed {
            self.sink.warn(Warning::MalformedName {
                candidate,
                line: line_no,
                number,
            });
        }

        let text = rest.trim_start_matches([' ', '\t']);
        Command {
            text: text.to_string(),
            comment_offset: self.locator.locate(text),
            number,
            name,
            prefix_len: 0,
            indent: 0,
        }
    }
}

/// Classify `lines` with the default comment locator.
pub fn classify<'l, I, N, S>(
    lines: I,
    reserved: &[N],
    numbering: NumberingPolicy,
    sink: &mut S,
) -> (Vec<Line>, NameSet)
where
    I: IntoIterator<Item = &'l str>,
    N: AsRef<str>,
    S: WarningSink,
{
    let locator = HeuristicLocator;
    Classifier::new(
        reserved.iter().map(|name| name.as_ref().to_string()),
        numbering,
        &locator,
        sink,
    )
    .run(lines)
}
