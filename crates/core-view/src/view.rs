//! The scroll engine: walks `top_pos` up or down by whole screen lines,
//! bounded by [`Position::can_scroll_down`]/[`can_scroll_up`].
//!
//! Mirrors `View.scroll_down`/`View.scroll_up` in the reference
//! implementation, minus the terminal-scroll and repaint side effects
//! (`screen.scroll`, `fill`) — those live in `core-terminal`/`core-render`,
//! which a caller composes with the line count this returns.

use std::path::Path;

use core_reader::ReaderOpenError;

use crate::{Position, ReaderCache};

pub struct View {
    pub top_pos: Position,
    cache: ReaderCache,
}

impl View {
    pub fn new(top_pos: Position, base_dir: impl AsRef<Path>) -> View {
        View {
            top_pos,
            cache: ReaderCache::new(base_dir),
        }
    }

    pub fn cache_mut(&mut self) -> &mut ReaderCache {
        &mut self.cache
    }

    /// Move `top_pos` down by up to `n` lines, stopping early once
    /// `can_scroll_down` is false. Returns the number of lines actually
    /// moved — how many bottom rows the caller needs to repaint.
    pub fn scroll_down(&mut self, n: u32, scrw: u16, scrh: u16) -> Result<u32, ReaderOpenError> {
        let mut moved = 0;
        for _ in 0..n {
            if !self.top_pos.can_scroll_down(scrw, scrh, &mut self.cache)? {
                break;
            }
            self.top_pos.next_line(scrw, &mut self.cache)?;
            moved += 1;
        }
        Ok(moved)
    }

    /// Move `top_pos` up by up to `n` lines, stopping early once
    /// `can_scroll_up` is false. Returns the number of lines actually moved.
    pub fn scroll_up(&mut self, n: u32, scrw: u16) -> Result<u32, ReaderOpenError> {
        let mut moved = 0;
        for _ in 0..n {
            if !self.top_pos.can_scroll_up() {
                break;
            }
            self.top_pos.prev_line(scrw, &mut self.cache)?;
            moved += 1;
        }
        Ok(moved)
    }
}
