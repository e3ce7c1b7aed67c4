//! A chromosome-boundary-aware cursor.
//!
//! The reference implementation tracks a single sequence position that
//! keeps ticking (into negative territory) while the viewer shows a
//! chromosome's title banner, relying on `next_ch`/`prev_ch`'s arithmetic to
//! land on the right row once the title ends. That coupling has no clean
//! Rust expression without carrying stale numeric state through a variant
//! that logically has none, so this is a genuine tagged union instead: a
//! title cursor carries only its row, and becomes `InSequence { pos: 1 }`
//! the instant the title finishes (see DESIGN.md).

use std::sync::Arc;

use core_format::chromosome;
use core_reader::ReaderOpenError;

use crate::ReaderCache;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// `title_row` counts from `-10` (first blank row) to `-1` (last row of
    /// the 7-row ASCII-art name); it becomes `InSequence { pos: 1 }` the
    /// instant it would advance to `0`.
    InTitle { chromosome: Arc<str>, title_row: i8 },
    /// `1..=ch_size` is on-screen content; `pos < 1` or `pos > ch_size` is
    /// margin, produced transiently while filling a row that straddles a
    /// chromosome boundary.
    InSequence { chromosome: Arc<str>, pos: i64 },
}

impl Position {
    pub fn start_of(chromosome: impl Into<Arc<str>>) -> Position {
        Position::InSequence {
            chromosome: chromosome.into(),
            pos: 1,
        }
    }

    pub fn chromosome(&self) -> &Arc<str> {
        match self {
            Position::InTitle { chromosome, .. } => chromosome,
            Position::InSequence { chromosome, .. } => chromosome,
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, Position::InTitle { .. })
    }

    pub fn title_row(&self) -> Option<i8> {
        match self {
            Position::InTitle { title_row, .. } => Some(*title_row),
            Position::InSequence { .. } => None,
        }
    }

    pub fn sequence_pos(&self) -> Option<i64> {
        match self {
            Position::InTitle { .. } => None,
            Position::InSequence { pos, .. } => Some(*pos),
        }
    }

    /// True when this position falls outside the chromosome's valid
    /// `1..=ch_size` range and should render as a blank cell. Title rows are
    /// never margin — they're painted by the title glyph renderer instead.
    ///
    /// For an on-screen position this also reconciles the underlying reader
    /// to `pos` before returning, mirroring `Pos.ismargin()`'s call to
    /// `sync_reader()` in the reference implementation: a position that
    /// moved by line arithmetic alone (a screen-line seek, a
    /// chromosome-boundary pre-roll) carries no guarantee that the reader it
    /// shares is still sitting at the same cursor, and every subsequent cell
    /// read assumes it is.
    pub fn is_margin(&self, cache: &mut ReaderCache) -> Result<bool, ReaderOpenError> {
        match self {
            Position::InTitle { .. } => Ok(false),
            Position::InSequence { chromosome, pos } => {
                if *pos < 1 {
                    return Ok(true);
                }
                let ch_size = cache.ch_size(chromosome.as_ref())? as i64;
                if *pos > ch_size {
                    return Ok(true);
                }
                self.sync_reader(cache)?;
                Ok(false)
            }
        }
    }

    /// Reconcile the reader's cursor to `pos` before a cell at this position
    /// is read. A no-op if it's already there, a single cheap `advance()` if
    /// it's exactly one base behind (the common case while walking a row
    /// left to right), otherwise an absolute `jump_to`. Mirrors
    /// `Pos.sync_reader`.
    fn sync_reader(&self, cache: &mut ReaderCache) -> Result<(), ReaderOpenError> {
        if let Position::InSequence { chromosome, pos } = self {
            // Caller has already established `1 <= *pos <= ch_size`.
            let target = *pos as u32;
            let reader = cache.get_or_open(chromosome.as_ref())?;
            if reader.pos() == target {
                // already in sync
            } else if reader.pos() + 1 == target {
                reader.advance();
            } else {
                reader.jump_to(target);
            }
        }
        Ok(())
    }

    /// Move one nucleotide forward, syncing the underlying reader when this
    /// position is on-screen content. Used to walk a row cell-by-cell while
    /// filling, not to move whole screen lines.
    pub fn advance(&mut self, cache: &mut ReaderCache) -> Result<(), ReaderOpenError> {
        if let Position::InSequence { chromosome, pos } = self {
            *pos += 1;
            let ch_size = cache.ch_size(chromosome.as_ref())? as i64;
            if *pos >= 1 && *pos <= ch_size {
                let reader = cache.get_or_open(chromosome.as_ref())?;
                if *pos == 1 {
                    reader.jump_to(1);
                } else {
                    reader.advance();
                }
            }
        }
        Ok(())
    }

    /// If this position has run past the chromosome's last base (e.g. after
    /// filling a row cell-by-cell past the boundary) and a following
    /// chromosome exists, re-anchor to that chromosome's title. Called once
    /// per filled content row; mirrors `Reader.check_ch_end`.
    pub fn check_ch_end(&mut self, cache: &mut ReaderCache) -> Result<(), ReaderOpenError> {
        if let Position::InSequence { chromosome, pos } = self {
            let ch_size = cache.ch_size(chromosome.as_ref())? as i64;
            if *pos > ch_size {
                if let Some(next) = chromosome::next(chromosome.as_ref()) {
                    *self = Position::InTitle {
                        chromosome: Arc::from(next),
                        title_row: -10,
                    };
                }
            }
        }
        Ok(())
    }

    /// Advance the top-of-screen cursor by one screen line (`scrw - 1`
    /// columns wide).
    pub fn next_line(&mut self, scrw: u16, cache: &mut ReaderCache) -> Result<(), ReaderOpenError> {
        let width = scrw as i64 - 1;
        match self {
            Position::InTitle {
                chromosome,
                title_row,
            } => {
                *title_row += 1;
                if *title_row == 0 {
                    let ch = chromosome.clone();
                    cache.get_or_open(&ch)?.jump_to(1);
                    *self = Position::InSequence {
                        chromosome: ch,
                        pos: 1,
                    };
                }
            }
            Position::InSequence { chromosome, pos } => {
                let ch_size = cache.ch_size(chromosome.as_ref())? as i64;
                if *pos + width > ch_size {
                    if let Some(next) = chromosome::next(chromosome.as_ref()) {
                        *self = Position::InTitle {
                            chromosome: Arc::from(next),
                            title_row: -10,
                        };
                    } else {
                        *pos += width;
                    }
                } else {
                    *pos += width;
                }
            }
        }
        Ok(())
    }

    /// Retreat the top-of-screen cursor by one screen line.
    pub fn prev_line(&mut self, scrw: u16, cache: &mut ReaderCache) -> Result<(), ReaderOpenError> {
        let width = scrw as i64 - 1;
        match self {
            Position::InTitle {
                chromosome,
                title_row,
            } => {
                if *title_row == -10 {
                    if let Some(prev) = chromosome::prev(chromosome.as_ref()) {
                        let prev_ch_size = cache.ch_size(prev)? as i64;
                        // Row start nearest the end, aligned to the same
                        // width-wide grid next_line advances along from 1.
                        let last_row_pos = 1 + ((prev_ch_size - 1) / width) * width;
                        cache.get_or_open(prev)?.jump_to(last_row_pos as u32);
                        *self = Position::InSequence {
                            chromosome: Arc::from(prev),
                            pos: last_row_pos,
                        };
                    }
                } else {
                    *title_row -= 1;
                }
            }
            Position::InSequence { chromosome, pos } => {
                if *pos <= 1 {
                    *self = Position::InTitle {
                        chromosome: chromosome.clone(),
                        title_row: -1,
                    };
                } else {
                    *pos -= width;
                }
            }
        }
        Ok(())
    }

    pub fn can_scroll_down(
        &self,
        scrw: u16,
        scrh: u16,
        cache: &mut ReaderCache,
    ) -> Result<bool, ReaderOpenError> {
        match self {
            Position::InTitle { .. } => Ok(true),
            Position::InSequence { chromosome, pos } => {
                let ch_size = cache.ch_size(chromosome.as_ref())? as i64;
                let screenful = (scrw as i64 - 1) * scrh as i64;
                Ok(*pos + screenful <= ch_size || chromosome::next(chromosome.as_ref()).is_some())
            }
        }
    }

    pub fn can_scroll_up(&self) -> bool {
        match self {
            Position::InSequence { .. } => true,
            Position::InTitle {
                chromosome,
                title_row,
            } => *title_row > -10 || chromosome::prev(chromosome.as_ref()).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_sequence(dir: &Path, chromosome: &str, size: u32) {
        let mut bytes = size.to_le_bytes().to_vec();
        bytes.extend(std::iter::repeat(0u8).take(size.div_ceil(4) as usize));
        std::fs::write(dir.join(format!("{chromosome}.bin")), bytes).unwrap();
    }

    #[test]
    fn next_line_stays_within_chromosome_when_room_remains() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), "1", 100);
        let mut cache = ReaderCache::new(dir.path());
        let mut pos = Position::start_of("1");
        pos.next_line(21, &mut cache).unwrap(); // width 20
        assert_eq!(pos, Position::InSequence { chromosome: Arc::from("1"), pos: 21 });
    }

    #[test]
    fn next_line_crosses_into_next_chromosome_title() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), "1", 25);
        write_sequence(dir.path(), "2", 25);
        let mut cache = ReaderCache::new(dir.path());
        let mut pos = Position::InSequence {
            chromosome: Arc::from("1"),
            pos: 10,
        };
        pos.next_line(21, &mut cache).unwrap(); // 10+20=30 > 25
        assert_eq!(
            pos,
            Position::InTitle {
                chromosome: Arc::from("2"),
                title_row: -10
            }
        );
    }

    #[test]
    fn title_runs_exactly_ten_rows_then_enters_sequence() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), "2", 25);
        let mut cache = ReaderCache::new(dir.path());
        let mut pos = Position::InTitle {
            chromosome: Arc::from("2"),
            title_row: -10,
        };
        for _ in 0..9 {
            pos.next_line(21, &mut cache).unwrap();
            assert!(pos.is_title());
        }
        pos.next_line(21, &mut cache).unwrap();
        assert_eq!(pos, Position::start_of("2"));
    }

    #[test]
    fn prev_line_from_start_enters_title_then_previous_chromosome() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), "1", 50);
        write_sequence(dir.path(), "2", 25);
        let mut cache = ReaderCache::new(dir.path());
        let mut pos = Position::start_of("2");
        pos.prev_line(21, &mut cache).unwrap();
        assert_eq!(
            pos,
            Position::InTitle {
                chromosome: Arc::from("2"),
                title_row: -1
            }
        );
        for _ in 0..9 {
            pos.prev_line(21, &mut cache).unwrap();
        }
        // now at title_row == -10; one more prev_line crosses into "1"'s
        // last row, aligned to the same 20-wide grid as next_line: rows
        // start at 1, 21, 41 (last full-or-partial row covering base 50).
        pos.prev_line(21, &mut cache).unwrap();
        assert_eq!(
            pos,
            Position::InSequence {
                chromosome: Arc::from("1"),
                pos: 41
            }
        );
    }

    #[test]
    fn is_margin_true_past_chromosome_end() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), "1", 10);
        let mut cache = ReaderCache::new(dir.path());
        let pos = Position::InSequence {
            chromosome: Arc::from("1"),
            pos: 11,
        };
        assert!(pos.is_margin(&mut cache).unwrap());
        let pos = Position::InSequence {
            chromosome: Arc::from("1"),
            pos: 10,
        };
        assert!(!pos.is_margin(&mut cache).unwrap());
    }

    #[test]
    fn is_margin_syncs_a_reader_left_stale_by_a_jump_forward() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), "1", 100);
        let mut cache = ReaderCache::new(dir.path());
        // Leave the shared reader far ahead of where this Position sits, the
        // way a previous fill() row (or a different Position) would.
        cache.get_or_open("1").unwrap().jump_to(80);

        let pos = Position::InSequence {
            chromosome: Arc::from("1"),
            pos: 5,
        };
        assert!(!pos.is_margin(&mut cache).unwrap());
        assert_eq!(cache.get_or_open("1").unwrap().pos(), 5);
    }

    #[test]
    fn is_margin_advances_a_reader_left_one_base_behind() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), "1", 100);
        let mut cache = ReaderCache::new(dir.path());
        cache.get_or_open("1").unwrap().jump_to(9);

        let pos = Position::InSequence {
            chromosome: Arc::from("1"),
            pos: 10,
        };
        assert!(!pos.is_margin(&mut cache).unwrap());
        assert_eq!(cache.get_or_open("1").unwrap().pos(), 10);
    }

    #[test]
    fn can_scroll_down_false_at_last_chromosome_end() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), "mt", 30);
        let mut cache = ReaderCache::new(dir.path());
        let pos = Position::InSequence {
            chromosome: Arc::from("mt"),
            pos: 25,
        };
        // screenful = 20*2 = 40; 25+40=65 > 30, and "mt" has no successor.
        assert!(!pos.can_scroll_down(21, 2, &mut cache).unwrap());
    }

    #[test]
    fn can_scroll_up_false_at_very_first_title_row() {
        let pos = Position::InTitle {
            chromosome: Arc::from("1"),
            title_row: -10,
        };
        assert!(!pos.can_scroll_up());
    }
}
