//! Turn analyzed lines into display strings.

use std::fmt::Write;

use crate::analyze::{Command, Document, LABEL_SUFFIX, Line};
use crate::{Config, HeadingAlign, Palette};

/// Renders lines of one document with a fixed label column.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    palette: &'a Palette,
    label_width: usize,
    heading_indent: usize,
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(document: &Document, config: &'a Config) -> Self {
        let label_width = document.label_width();
        let heading_indent = match config.heading_align {
            HeadingAlign::None => 0,
            HeadingAlign::Colon => label_width,
            HeadingAlign::Code => label_width + LABEL_SUFFIX.len(),
        };
        Self {
            palette: &config.palette,
            label_width,
            heading_indent,
        }
    }

    /// Render one line, without a trailing newline.
    #[must_use]
    pub fn line(&self, line: &Line) -> String {
        let p = self.palette;
        match line {
            Line::Heading(heading) => format!(
                "{}{:indent$}{}{}",
                p.heading,
                "",
                heading.text,
                p.reset,
                indent = self.heading_indent
            ),
            Line::Blank(blank) => format!("{}{}", p.reset, blank.text),
            Line::Command(command) => self.command(command),
        }
    }

    /// Render a command line, without a trailing newline.
    #[must_use]
    pub fn command(&self, command: &Command) -> String {
        let p = self.palette;
        let label = command.label();
        let split = if command.name.is_some() {
            label
                .char_indices()
                .nth(command.prefix_len)
                .map_or(label.len(), |(offset, _)| offset)
        } else {
            label.len()
        };
        let (prefix, rest) = label.split_at(split);

        let mut out = String::new();
        let _ = write!(
            out,
            "{}{:>width$}{}{rest}{LABEL_SUFFIX}",
            p.number,
            prefix,
            p.number_rest,
            width = self.label_width.saturating_sub(rest.chars().count()),
        );
        match command.comment() {
            Some(comment) => {
                let _ = write!(
                    out,
                    "{}{}{:indent$}{}{comment}",
                    p.command,
                    command.code(),
                    "",
                    p.comment,
                    indent = command.indent
                );
            }
            None => {
                let _ = write!(out, "{}{}", p.command, command.text);
            }
        }
        out.push_str(&p.reset);
        out
    }

    /// Render every line of `document`, each followed by a newline.
    #[must_use]
    pub fn document(&self, document: &Document) -> String {
        let mut out = String::new();
        for line in document.lines() {
            out.push_str(&self.line(line));
            out.push('\n');
        }
        out
    }
}
