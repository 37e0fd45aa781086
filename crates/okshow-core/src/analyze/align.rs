//! Elastic tabs: line up inline comments within alignment groups.
//!
//! A group is a maximal run of lines that contains no reset line for the
//! grouping level. Inside a group every comment is pushed to the column just
//! past the widest code, unless that would make a line wrap.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use super::line::{Category, Command, Line};
use crate::GroupingLevel;

/// Separator printed between a label and its command.
pub const LABEL_SUFFIX: &str = ": ";

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[.*?m").expect("escape pattern is valid"));

/// Rendered width of `text`: code points, not counting color escapes.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    ANSI_ESCAPE.replace_all(text, "").chars().count()
}

/// Whether a line of this category ends the current group.
const fn resets(level: GroupingLevel, category: Category) -> bool {
    match level {
        GroupingLevel::None | GroupingLevel::Global => false,
        GroupingLevel::Blocks => matches!(category, Category::Heading | Category::Blank),
        GroupingLevel::Sections => matches!(category, Category::Heading),
    }
}

/// Compute `indent` for every command.
///
/// `label_width` is the width of the label column printed before each
/// command; it and the label suffix are taken off `terminal_width`.
pub fn align(lines: &mut [Line], level: GroupingLevel, label_width: usize, terminal_width: usize) {
    let usable = terminal_width.saturating_sub(label_width + LABEL_SUFFIX.len());

    if level == GroupingLevel::None {
        for line in lines.iter_mut() {
            if let Line::Command(command) = line {
                command.indent = 0;
            }
        }
        return;
    }

    let mut start = None;
    let mut column = 0;
    for i in 0..lines.len() {
        if start.is_none() && !resets(level, lines[i].category()) {
            start = Some(i);
            column = 0;
        }
        let Some(first) = start else {
            continue;
        };

        if let Line::Command(command) = &lines[i] {
            column = column.max(visible_width(command.code()));
        }

        let closes = lines
            .get(i + 1)
            .is_none_or(|next| resets(level, next.category()));
        if closes {
            trace!("group {first}..={i} aligns comments at column {column}");
            for line in &mut lines[first..=i] {
                if let Line::Command(command) = line {
                    command.indent = indent_for(command, column, usable);
                }
            }
            start = None;
        }
    }
}

fn indent_for(command: &Command, column: usize, usable: usize) -> usize {
    let Some(offset) = command.comment_offset else {
        return 0;
    };
    let ideal = column.saturating_sub(visible_width(&command.text[..offset]));
    avoid_wrap(ideal, visible_width(&command.text), usable)
}

/// Shrink `indent` so the line fits in `usable` columns. A line that is too
/// wide on its own keeps the full indent.
const fn avoid_wrap(indent: usize, line_width: usize, usable: usize) -> usize {
    if line_width <= usable && line_width + indent > usable {
        usable - line_width
    } else {
        indent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::classify::classify;
    use crate::analyze::warning::Discard;
    use crate::NumberingPolicy;

    fn table(source: &str) -> Vec<Line> {
        classify(source.lines(), &["list"], NumberingPolicy::All, &mut Discard).0
    }

    fn indents(lines: &[Line]) -> Vec<usize> {
        lines
            .iter()
            .filter_map(Line::as_command)
            .map(|c| c.indent)
            .collect()
    }

    const SOURCE: &str = "\
ls # list
make all # build

cargo test --all # test
# Deploy
scp a b:c # copy
rsync -a x y # sync";

    #[test]
    fn test_visible_width_ignores_escapes() {
        assert_eq!(visible_width("\x1b[1;36mls\x1b[0m -la"), 6);
        assert_eq!(visible_width("héllo"), 5);
    }

    #[test]
    fn test_no_alignment() {
        let mut lines = table(SOURCE);
        align(&mut lines, GroupingLevel::None, 0, 80);
        assert_eq!(indents(&lines), vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_blocks_resync_at_blank() {
        let mut lines = table(SOURCE);
        align(&mut lines, GroupingLevel::Blocks, 0, 80);
        assert_eq!(indents(&lines), vec![6, 0, 0, 3, 0]);
    }

    #[test]
    fn test_sections_keep_blank_in_group() {
        let mut lines = table(SOURCE);
        align(&mut lines, GroupingLevel::Sections, 0, 80);
        assert_eq!(indents(&lines), vec![14, 8, 0, 3, 0]);
    }

    #[test]
    fn test_global_group() {
        let mut lines = table(SOURCE);
        align(&mut lines, GroupingLevel::Global, 0, 80);
        assert_eq!(indents(&lines), vec![14, 8, 0, 7, 4]);
    }

    #[test]
    fn test_line_without_comment_widens_group() {
        let mut lines = table("ls # list\nmake install");
        align(&mut lines, GroupingLevel::Blocks, 0, 80);
        assert_eq!(indents(&lines), vec![9, 0]);
    }

    #[test]
    fn test_comment_only_command() {
        let mut lines = table("ls -la # list\nnote: # nothing to run");
        align(&mut lines, GroupingLevel::Blocks, 0, 80);
        assert_eq!(indents(&lines), vec![0, 7]);
    }

    #[test]
    fn test_escapes_do_not_count() {
        let mut lines = table("\x1b[1mls\x1b[0m # list\nmake # build");
        align(&mut lines, GroupingLevel::Blocks, 0, 80);
        assert_eq!(indents(&lines), vec![2, 0]);
    }

    #[test]
    fn test_avoid_wrap_clamps() {
        assert_eq!(avoid_wrap(10, 75, 80), 5);
        assert_eq!(avoid_wrap(10, 70, 80), 10);
        assert_eq!(avoid_wrap(10, 80, 80), 0);
        assert_eq!(avoid_wrap(10, 90, 80), 10);
    }

    #[test]
    fn test_wrap_avoidance_uses_label_width() {
        let long = format!("{} # long", "x".repeat(60));
        let source = format!("ls # short\n{}\n{long}", "y".repeat(70));
        let mut lines = table(&source);
        // 80 columns minus a 4 wide label and ": " leaves 74.
        align(&mut lines, GroupingLevel::Blocks, 4, 80);
        assert_eq!(indents(&lines), vec![64, 0, 7]);
    }

    #[test]
    fn test_too_wide_line_keeps_ideal_indent() {
        let long = format!("{} # long", "x".repeat(90));
        let source = format!("{}\n{long}", "y".repeat(95));
        let mut lines = table(&source);
        align(&mut lines, GroupingLevel::Blocks, 0, 80);
        assert_eq!(indents(&lines), vec![0, 4]);
    }

    #[test]
    fn test_realigning_is_a_fixed_point() {
        for level in [
            GroupingLevel::None,
            GroupingLevel::Blocks,
            GroupingLevel::Sections,
            GroupingLevel::Global,
        ] {
            let mut lines = table(SOURCE);
            align(&mut lines, level, 3, 60);
            let once = lines.clone();
            align(&mut lines, level, 3, 60);
            assert_eq!(lines, once);
        }
    }
}
