//! Find the line a query refers to.

use log::debug;

use super::line::{Command, Line, NameSet};

/// Scores how far apart two strings are. Lower is closer.
pub trait EditDistance {
    fn distance(&self, a: &str, b: &str) -> usize;
}

/// Levenshtein distance over code points.
#[derive(Debug, Default, Clone, Copy)]
pub struct Levenshtein;

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        if a == b {
            return 0;
        }
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut prev: Vec<usize> = (0..=b.len()).collect();
        let mut curr = vec![0; b.len() + 1];

        for (i, ca) in a.iter().enumerate() {
            curr[0] = i + 1;
            for (j, cb) in b.iter().enumerate() {
                let cost = usize::from(ca != cb);
                curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[b.len()]
    }
}

/// How a found line matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The query is the line's sequence number.
    Number,
    /// The query is the line's full name.
    ExactName,
    /// The query is a proper prefix of the line's name.
    Prefix,
}

/// Outcome of resolving a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Found { line: &'a Command, kind: MatchKind },
    /// Labels of every matching line, in table order.
    Ambiguous { candidates: Vec<String> },
    /// Known names closest to the query, lowercased.
    NotFound { suggestions: Vec<String> },
}

/// Resolve `query` against the command lines of `lines`.
///
/// A line matches when its number equals the query or its name starts with
/// it. Among several matches, a single exact match wins.
#[must_use]
pub fn resolve<'a, D: EditDistance>(
    lines: &'a [Line],
    names: &NameSet,
    query: &str,
    scorer: &D,
) -> Resolution<'a> {
    let matches: Vec<(&Command, MatchKind)> = lines
        .iter()
        .filter_map(Line::as_command)
        .filter_map(|command| match_kind(command, query).map(|kind| (command, kind)))
        .collect();

    let resolution = match matches.as_slice() {
        [] => Resolution::NotFound {
            suggestions: suggest(names, query, scorer),
        },
        [(line, kind)] => Resolution::Found {
            line: *line,
            kind: *kind,
        },
        _ => {
            let mut exact = matches.iter().filter(|(_, kind)| *kind != MatchKind::Prefix);
            match (exact.next(), exact.next()) {
                (Some(&(line, kind)), None) => Resolution::Found { line, kind },
                _ => Resolution::Ambiguous {
                    candidates: matches.iter().map(|(line, _)| line.label()).collect(),
                },
            }
        }
    };
    debug!("query '{query}' resolved to {resolution:?}");
    resolution
}

fn match_kind(command: &Command, query: &str) -> Option<MatchKind> {
    if command.number.is_some_and(|n| n.to_string() == query) {
        return Some(MatchKind::Number);
    }
    match &command.name {
        Some(name) if name == query => Some(MatchKind::ExactName),
        Some(name) if name.starts_with(query) => Some(MatchKind::Prefix),
        _ => None,
    }
}

/// Names at the smallest edit distance from `query`, ignoring case and
/// single-character names.
fn suggest<D: EditDistance>(names: &NameSet, query: &str, scorer: &D) -> Vec<String> {
    let query = query.to_lowercase();
    let mut best = usize::MAX;
    let mut suggestions: Vec<String> = Vec::new();
    for name in names.iter().filter(|n| n.chars().count() > 1) {
        let name = name.to_lowercase();
        let score = scorer.distance(&query, &name);
        if score < best {
            best = score;
            suggestions.clear();
        }
        if score == best && !suggestions.contains(&name) {
            suggestions.push(name);
        }
    }
    suggestions
}
