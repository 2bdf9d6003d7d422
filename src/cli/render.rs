//! Output formatting for definition listings.

use crossterm::style::{Color, SetForegroundColor};
use crossterm::tty::IsTty;
use std::io::{self, Write};

use crate::constants;
use crate::definitions::{HighlightStyle, Listing};

/// Picks red ANSI markers for a colour terminal, brackets otherwise.
#[must_use]
pub fn highlight_style(color: bool) -> HighlightStyle {
    if color {
        HighlightStyle::new(
            SetForegroundColor(Color::Red).to_string(),
            SetForegroundColor(Color::Reset).to_string(),
        )
    } else {
        HighlightStyle::new(constants::HIGHLIGHT_PLAIN_OPEN, constants::HIGHLIGHT_PLAIN_CLOSE)
    }
}

/// Whether stdout is an interactive terminal.
#[must_use]
pub fn stdout_is_tty() -> bool {
    io::stdout().is_tty()
}

/// Formats one listing row: ordinal left-aligned to width 3, then the name.
#[must_use]
pub fn format_entry(ordinal: usize, display: &str) -> String {
    format!("{ordinal:<3} {display}")
}

/// Writes `listing` one entry per line.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_listing<W: Write>(out: &mut W, listing: &Listing) -> io::Result<()> {
    for entry in listing {
        writeln!(out, "{}", format_entry(entry.ordinal, &entry.display))?;
    }
    Ok(())
}

/// Writes `listing` as a pretty-printed JSON array.
///
/// # Errors
///
/// Propagates serialization and write failures.
pub fn write_json<W: Write>(out: &mut W, listing: &Listing) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, listing)?;
    writeln!(out)
}
