//! The `fill(x, y, h)` paint orchestration: walks a cloned top-of-screen
//! cursor through `h` screen rows, writing each cell's glyph and color pair
//! into a persistent [`Frame`], then recomposes the status line.
//!
//! Grounded on `View.fill`/`View.print_title_line`/`View.print_status` in
//! the reference implementation. `top_pos` itself is never mutated here —
//! only a local walking copy is — matching the original's `copy.copy` of
//! its `Pos` object (a shallow copy that keeps the same underlying
//! `Reader`, so the Reader's cursor does move as the row is painted, but the
//! screen's own notion of "the top position" does not).

use core_reader::ReaderOpenError;
use core_state::AppState;
use core_view::View;

use crate::color::ColorPair;
use crate::{consensus, dominance, status, title, Cell, Frame};

/// Paint `h` rows starting at screen row `y`, column `x`, and return the
/// composed status line (also written into row 0 of `frame`).
pub fn fill(
    frame: &mut Frame,
    view: &mut View,
    state: &AppState,
    x: u16,
    y: u16,
    h: u16,
) -> Result<String, ReaderOpenError> {
    let scrw = state.scrw;
    let content_width = scrw.saturating_sub(1);

    let mut pos = view.top_pos.clone();
    for _ in 0..y {
        pos.next_line(scrw, view.cache_mut())?;
    }

    for row in 0..h {
        let fy = y + row;
        let mut fx = x;
        if pos.is_title() {
            let chromosome = pos.chromosome().to_string();
            let title_row = pos.title_row().expect("checked is_title");
            for ch in title::title_row_cells(&chromosome, title_row, scrw) {
                frame.set(fx, fy, Cell { ch, pair: ColorPair::UNK });
                fx += 1;
            }
            pos.next_line(scrw, view.cache_mut())?;
        } else {
            while fx < content_width {
                if pos.is_margin(view.cache_mut())? {
                    frame.set(fx, fy, Cell { ch: ' ', pair: ColorPair::UNK });
                } else {
                    let chromosome = pos.chromosome().clone();
                    let reader = view.cache_mut().get_or_open(&chromosome)?;
                    let (nucleotide, pair) = dominance::dominant(reader);
                    let mut pair = pair;

                    if state.highlights.cpg && consensus::matches(reader.last_nucleotides(), &consensus::CPG) {
                        pair = ColorPair::HIGHLIGHT;
                        reach_back(frame, fx, fy, consensus::CPG.pattern.len() as u16 - 1);
                    }
                    if state.highlights.tata && consensus::matches(reader.last_nucleotides(), &consensus::TATA) {
                        pair = ColorPair::HIGHLIGHT;
                        reach_back(frame, fx, fy, consensus::TATA.pattern.len() as u16 - 1);
                    }

                    let ch = core_format::nucleotide_char(nucleotide);
                    frame.set(fx, fy, Cell { ch, pair });
                }
                pos.advance(view.cache_mut())?;
                fx += 1;
            }
            pos.check_ch_end(view.cache_mut())?;
        }
    }

    let status_line = compose_status(view, state)?;
    write_status(frame, &status_line);
    Ok(status_line)
}

/// Recolor the `count` cells preceding `(x, y)` (not including it) to
/// `PAIR_HIGHLIGHT`, stopping early if the walk runs off the top of the
/// frame. Mirrors `View.set_prev_pairs`.
fn reach_back(frame: &mut Frame, x: u16, y: u16, count: u16) {
    let mut cur = (x, y);
    for _ in 0..count {
        let Some(prev) = frame.prev_coord(cur.0, cur.1) else {
            break;
        };
        cur = prev;
        if let Some(mut cell) = frame.get(cur.0, cur.1) {
            cell.pair = ColorPair::HIGHLIGHT;
            frame.set(cur.0, cur.1, cell);
        }
    }
}

/// Build the status line for the screen's canonical (unmoved) top position.
/// While the top of screen sits in a chromosome's title, there is no
/// meaningful sequence position or percentage to show, so the line is just
/// the chromosome name — a deliberate simplification the tagged-union
/// `Position` design makes natural (see DESIGN.md).
fn compose_status(view: &mut View, state: &AppState) -> Result<String, ReaderOpenError> {
    let chromosome = view.top_pos.chromosome().clone();
    if view.top_pos.is_title() {
        return Ok(chromosome.to_string());
    }
    let pos = view.top_pos.sequence_pos().expect("checked not title") as u32;
    let reader = view.cache_mut().get_or_open(&chromosome)?;
    let ch_size = reader.ch_size();
    let gene = reader.current_gene().filter(|_| {
        reader
            .prev_info_pos()
            .is_some_and(|prev| status::gene_still_visible(prev, pos, state.scrw, state.scrh))
    });
    Ok(status::build(pos, ch_size, gene.map(|g| (g.name.as_str(), g.strand))))
}

fn write_status(frame: &mut Frame, status_line: &str) {
    for (i, ch) in status_line.chars().enumerate() {
        frame.set(i as u16, 0, Cell { ch, pair: ColorPair::UNK });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::{HighlightToggles, PlayState};
    use core_view::Position;
    use std::path::Path;

    fn write_sequence(dir: &Path, chromosome: &str, nucleotides: &[u8]) {
        let mut bytes = (nucleotides.len() as u32).to_le_bytes().to_vec();
        for chunk in nucleotides.chunks(4) {
            let mut byte = 0u8;
            for (i, &n) in chunk.iter().enumerate() {
                byte |= n << (2 * (3 - i));
            }
            bytes.push(byte);
        }
        std::fs::write(dir.join(format!("{chromosome}.bin")), bytes).unwrap();
    }

    fn state(scrw: u16, scrh: u16) -> AppState {
        AppState::new(scrw, scrh, PlayState::Paused, HighlightToggles::default())
    }

    #[test]
    fn minimal_sequence_renders_default_pairs() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), "1", &[0, 1, 2, 3]);
        let mut view = View::new(Position::start_of("1"), dir.path());
        let mut frame = Frame::new(10, 3);
        let st = state(6, 3);
        fill(&mut frame, &mut view, &st, 0, 0, 1).unwrap();

        assert_eq!(frame.get(0, 0).unwrap().ch, 'A');
        assert_eq!(frame.get(1, 0).unwrap().ch, 'C');
        assert_eq!(frame.get(2, 0).unwrap().ch, 'G');
        assert_eq!(frame.get(3, 0).unwrap().ch, 'T');
    }

    #[test]
    fn cpg_highlight_recolors_both_cells() {
        let dir = tempfile::tempdir().unwrap();
        // A C G T -> highlight should hit cells 1,2 (C,G)
        write_sequence(dir.path(), "1", &[0, 1, 2, 3]);
        let mut view = View::new(Position::start_of("1"), dir.path());
        let mut frame = Frame::new(10, 3);
        let mut st = state(6, 3);
        st.highlights.cpg = true;
        fill(&mut frame, &mut view, &st, 0, 0, 1).unwrap();

        assert_eq!(frame.get(1, 0).unwrap().pair, ColorPair::HIGHLIGHT);
        assert_eq!(frame.get(2, 0).unwrap().pair, ColorPair::HIGHLIGHT);
        assert_ne!(frame.get(0, 0).unwrap().pair, ColorPair::HIGHLIGHT);
    }

    #[test]
    fn fill_after_scrolling_reads_the_reader_at_the_new_row_not_the_old_one() {
        // All A (0) except two uniquely-placed markers: C (1) at position 1,
        // G (2) at position 17. A periodic sequence (e.g. plain A C G T
        // repeating) wouldn't catch a stale reader here, since every
        // scroll below moves top_pos by a multiple of the row width and
        // would alias onto the same phase; these markers don't repeat
        // anywhere else, so only the *exact* position being rendered can
        // produce them.
        let dir = tempfile::tempdir().unwrap();
        let mut bases = vec![0u8; 40];
        bases[0] = 1; // position 1 -> C
        bases[16] = 2; // position 17 -> G
        write_sequence(dir.path(), "1", &bases);
        let mut view = View::new(Position::start_of("1"), dir.path());
        let mut frame = Frame::new(10, 3);
        let st = state(5, 3); // content width 4

        fill(&mut frame, &mut view, &st, 0, 0, 1).unwrap();
        assert_eq!(frame.get(0, 0).unwrap().ch, 'C');

        // Scrolling down only moves top_pos's arithmetic; it never touches
        // the Reader. Without re-syncing before a cell is read, this row
        // would render whatever base the Reader's cursor was left at by the
        // previous fill (position 5, itself 'A'), not the marker at 17.
        view.scroll_down(4, 5, 3).unwrap();
        fill(&mut frame, &mut view, &st, 0, 0, 1).unwrap();
        assert_eq!(frame.get(0, 0).unwrap().ch, 'G');

        // Scroll back up to the very start and confirm the reverse
        // direction resyncs too.
        view.scroll_up(4, 5).unwrap();
        fill(&mut frame, &mut view, &st, 0, 0, 1).unwrap();
        assert_eq!(frame.get(0, 0).unwrap().ch, 'C');
    }

    #[test]
    fn status_line_written_into_row_zero() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), "1", &[0; 20]);
        let mut view = View::new(Position::start_of("1"), dir.path());
        let mut frame = Frame::new(40, 3);
        let st = state(21, 3);
        let status_line = fill(&mut frame, &mut view, &st, 0, 0, 3).unwrap();
        assert!(status_line.starts_with("1 ("));
        assert_eq!(frame.get(0, 0).unwrap().ch, status_line.chars().next().unwrap());
    }
}
