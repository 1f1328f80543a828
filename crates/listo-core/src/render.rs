use std::io::{self, IsTerminal, Write};

use listo_shared::view::EMPTY_STATE_TEXT;
use listo_shared::{ListView, Theme};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color = cfg.color()?;
        Ok(Self {
            color: color && io::stdout().is_terminal(),
        })
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    #[tracing::instrument(skip(self, view))]
    pub fn print_list(&self, view: &ListView) -> anyhow::Result<()> {
        let out = io::stdout().lock();
        self.write_list(out, view)
    }

    pub fn write_list<W: Write>(&self, mut out: W, view: &ListView) -> anyhow::Result<()> {
        let palette = Palette::for_theme(if view.dark {
            Theme::Dark
        } else {
            Theme::Light
        });

        if view.is_empty() {
            writeln!(out, "{}", self.paint(EMPTY_STATE_TEXT, palette.muted))?;
            return Ok(());
        }

        let headers = vec![
            "#".to_string(),
            "ID".to_string(),
            "Done".to_string(),
            "Task".to_string(),
            "Created".to_string(),
        ];

        let mut rows = Vec::with_capacity(view.rows.len());
        for (idx, row) in view.rows.iter().enumerate() {
            let position = (idx + 1).to_string();
            let id = self.paint(&row.id.to_string(), palette.id);
            let done = if row.completed { "[x]" } else { "[ ]" }.to_string();
            let text = literal(&row.text);
            let text = if row.completed {
                self.paint(&text, palette.completed)
            } else {
                text
            };
            let created = self.paint(&literal(&row.created_at), palette.muted);

            rows.push(vec![position, id, done, text, created]);
        }

        write_table(&mut out, headers, rows)?;
        writeln!(out)?;
        writeln!(out, "{}", view.status_text())?;
        Ok(())
    }

    pub fn print_line(&self, line: &str) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    id: &'static str,
    muted: &'static str,
    completed: &'static str,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                id: "34",
                muted: "90",
                completed: "2;9",
            },
            Theme::Dark => Self {
                id: "93",
                muted: "37",
                completed: "2;9;37",
            },
        }
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Shows control characters in user text as visible escapes so they can
/// neither drive the terminal nor break a table row.
fn literal(text: &str) -> String {
    if !text.chars().any(char::is_control) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        if ch.is_control() {
            out.extend(ch.escape_debug());
        } else {
            out.push(ch);
        }
    }
    out
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
