//! A thin batched abstraction over crossterm's terminal commands: accumulate
//! a frame's worth of cursor moves, line clears, and colored glyphs, then
//! flush them to stdout in one write.
//!
//! Grounded on the teacher's own command-queue `Writer` — positions remain
//! absolute, ordering is preserved, and nothing is written until `flush`.
//! Extended here to carry per-cell foreground/background colors, since the
//! genome viewer paints color pairs per nucleotide rather than plain text.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, ResetColor, SetColors, Colors},
    terminal::{Clear, ClearType, ScrollDown, ScrollUp},
};
use std::io::{stdout, Write};

#[derive(Debug)]
pub enum Command {
    MoveTo(u16, u16),
    ClearLine(u16, u16),
    /// Set the foreground/background for subsequent prints; `None` in
    /// either slot means the terminal's own default, matching `ColorPair`'s
    /// unknown/no-override resolution.
    SetColors(Colors),
    ResetColors,
    Print(char),
    /// Physically scroll the terminal's content up/down by `n` rows, the
    /// same effect as curses's `screen.scroll(1)`/`scroll(-1)`. Must be
    /// paired with a matching [`Frame::shift_up`]/[`shift_down`] so the
    /// in-memory grid agrees with what the terminal now shows.
    ///
    /// [`Frame::shift_up`]: crate::Frame::shift_up
    /// [`shift_down`]: crate::Frame::shift_down
    ScrollUp(u16),
    ScrollDown(u16),
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn clear_line(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::ClearLine(x, y));
    }

    pub fn set_colors(&mut self, colors: Colors) {
        self.cmds.push(Command::SetColors(colors));
    }

    pub fn reset_colors(&mut self) {
        self.cmds.push(Command::ResetColors);
    }

    pub fn print_char(&mut self, ch: char) {
        self.cmds.push(Command::Print(ch));
    }

    pub fn print_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.print_char(ch);
        }
    }

    pub fn scroll_up(&mut self, n: u16) {
        if n > 0 {
            self.cmds.push(Command::ScrollUp(n));
        }
    }

    pub fn scroll_down(&mut self, n: u16) {
        if n > 0 {
            self.cmds.push(Command::ScrollDown(n));
        }
    }

    pub fn flush(self) -> Result<()> {
        let mut out = stdout();
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::ClearLine(_, _) => {
                    queue!(out, Clear(ClearType::CurrentLine))?;
                }
                Command::SetColors(colors) => {
                    queue!(out, SetColors(colors))?;
                }
                Command::ResetColors => {
                    queue!(out, ResetColor)?;
                }
                Command::Print(ch) => {
                    queue!(out, Print(ch))?;
                }
                Command::ScrollUp(n) => {
                    queue!(out, ScrollUp(n))?;
                }
                Command::ScrollDown(n) => {
                    queue!(out, ScrollDown(n))?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}
