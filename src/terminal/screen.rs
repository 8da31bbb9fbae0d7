//! `Screen`: owns the real terminal for the lifetime of a run.
//!
//! `init` takes the terminal over (raw mode, alternate screen, wrap off,
//! cursor hidden) and `Drop` restores it, so the shell comes back intact
//! however the pipeline exits. Each draw composes a full frame into an
//! [`OutputBuffer`] and flushes it in one write.

use super::output::OutputBuffer;
use crate::error::Error;
use crossterm::terminal::{
    self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use std::io::{self, Stdout};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The display surface the renderer paints full snapshots onto.
pub struct Screen {
    stdout: Stdout,
    frame: OutputBuffer,
    width: u16,
    height: u16,
}

impl Screen {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Terminal`] if the terminal cannot be set up; the
    /// caller treats this as fatal before any role starts.
    pub fn init() -> Result<Self, Error> {
        let (width, height) = terminal::size().map_err(Error::Terminal)?;
        terminal::enable_raw_mode().map_err(Error::Terminal)?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, DisableLineWrap, cursor::Hide)
            .map_err(Error::Terminal)?;

        Ok(Self {
            stdout,
            frame: OutputBuffer::with_capacity(65536),
            width,
            height,
        })
    }

    /// Repaint the whole surface from `text` in a single flush.
    pub fn draw(&mut self, text: &str) -> io::Result<()> {
        // Re-query geometry: a repaint forced by a resize bump must use
        // the new bounds.
        if let Ok((width, height)) = terminal::size() {
            self.width = width;
            self.height = height;
        }

        compose(text, self.width, self.height, &mut self.frame);
        self.frame.flush_to(&mut self.stdout)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        // Restore errors are ignored; the process is on its way out.
        let _ = execute!(
            self.stdout,
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Compose one full frame of `text` into `out`.
///
/// The frame clears the surface, homes the cursor, and writes graphemes
/// left to right: `\n` advances a row, `\r` returns to column 0, and
/// everything else advances by its display width, counting zero-width
/// graphemes as one column. Content past the right or bottom edge is
/// clipped; each row starts with an absolute cursor move so the last row
/// never scrolls.
pub(crate) fn compose(text: &str, width: u16, height: u16, out: &mut OutputBuffer) {
    out.clear();
    out.clear_screen();
    out.cursor_move(0, 0);

    if width == 0 || height == 0 {
        return;
    }

    let mut col: u16 = 0;
    let mut row: u16 = 0;

    for grapheme in text.graphemes(true) {
        match grapheme {
            "\n" | "\r\n" => {
                row += 1;
                if row >= height {
                    return;
                }
                col = 0;
                out.cursor_move(0, row);
            }
            "\r" => {
                col = 0;
                out.cursor_move(0, row);
            }
            _ if grapheme.chars().next().is_some_and(char::is_control) => {
                // Raw control bytes in command output would desync the
                // stream; give them a blank column instead.
                if col < width {
                    out.write_str(" ");
                    col += 1;
                }
            }
            _ => {
                let cells = UnicodeWidthStr::width(grapheme).max(1);
                if usize::from(col) + cells > usize::from(width) {
                    // Clipped at the right edge until the next line.
                    col = width;
                    continue;
                }
                out.write_str(grapheme);
                col += u16::try_from(cells).unwrap_or(u16::MAX);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str, width: u16, height: u16) -> vt100::Parser {
        let mut out = OutputBuffer::new();
        compose(text, width, height, &mut out);
        let mut parser = vt100::Parser::new(height, width, 0);
        parser.process(out.as_bytes());
        parser
    }

    fn cell(parser: &vt100::Parser, row: u16, col: u16) -> String {
        parser.screen().cell(row, col).unwrap().contents()
    }

    #[test]
    fn test_lines_lay_out_top_to_bottom() {
        let parser = render("ab\ncd", 10, 4);
        assert_eq!(cell(&parser, 0, 0), "a");
        assert_eq!(cell(&parser, 0, 1), "b");
        assert_eq!(cell(&parser, 1, 0), "c");
        assert_eq!(cell(&parser, 1, 1), "d");
    }

    #[test]
    fn test_carriage_return_overwrites_the_line() {
        let parser = render("ab\rc", 10, 2);
        assert_eq!(cell(&parser, 0, 0), "c");
        assert_eq!(cell(&parser, 0, 1), "b");
    }

    #[test]
    fn test_crlf_counts_as_one_newline() {
        let parser = render("a\r\nb", 10, 4);
        assert_eq!(parser.screen().contents(), "a\nb");
    }

    #[test]
    fn test_wide_character_occupies_two_columns() {
        let parser = render("日x", 10, 2);
        assert_eq!(cell(&parser, 0, 0), "日");
        assert_eq!(cell(&parser, 0, 2), "x");
    }

    #[test]
    fn test_long_lines_clip_at_the_right_edge() {
        let parser = render("abcdef\nz", 3, 4);
        assert_eq!(parser.screen().contents(), "abc\nz");
    }

    #[test]
    fn test_wide_character_never_straddles_the_edge() {
        // Two columns needed, one available: the glyph is dropped.
        let parser = render("a日", 2, 2);
        assert_eq!(parser.screen().contents(), "a");
    }

    #[test]
    fn test_extra_rows_clip_at_the_bottom() {
        let parser = render("a\nb\nc\nd", 10, 2);
        assert_eq!(parser.screen().contents(), "a\nb");
    }

    #[test]
    fn test_redraw_replaces_the_previous_frame() {
        let mut out = OutputBuffer::new();
        let mut parser = vt100::Parser::new(4, 10, 0);

        compose("hello", 10, 4, &mut out);
        parser.process(out.as_bytes());
        assert_eq!(parser.screen().contents(), "hello");

        compose("hi", 10, 4, &mut out);
        parser.process(out.as_bytes());
        assert_eq!(parser.screen().contents(), "hi");
    }

    #[test]
    fn test_control_bytes_render_blank() {
        let parser = render("a\tb", 10, 2);
        assert_eq!(cell(&parser, 0, 0), "a");
        assert_eq!(cell(&parser, 0, 2), "b");
    }

    #[test]
    fn test_empty_frame_clears_everything() {
        let mut out = OutputBuffer::new();
        let mut parser = vt100::Parser::new(4, 10, 0);

        compose("leftover", 10, 4, &mut out);
        parser.process(out.as_bytes());
        compose("", 10, 4, &mut out);
        parser.process(out.as_bytes());

        assert_eq!(parser.screen().contents(), "");
    }
}
