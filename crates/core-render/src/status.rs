//! Status line composition: the cursor's position and, when a gene is
//! active nearby, its name and strand.
//!
//! Grounded on `View.print_status` in the reference implementation. The
//! line is always `"{pos} ({pct:.3f}%)"`; the gene name suffix only appears
//! while `current_gene` is set and the top of screen hasn't yet scrolled
//! more than one full screen past the gene's defining position — DESIGN.md
//! records the `(scrw-1)*scrh` reading of that distance (one source draft
//! used `scrw*scrh` instead; the narrower reading is the one that keeps the
//! name visible across exactly one screenful).

use core_format::Strand;

/// Build the status line text for a reader sitting at `pos` out of
/// `ch_size`, optionally naming a nearby gene.
pub fn build(pos: u32, ch_size: u32, gene: Option<(&str, Strand)>) -> String {
    let pct = pos as f64 * 100.0 / ch_size as f64;
    let mut status = format!("{pos} ({pct:.3}%)");
    if let Some((name, strand)) = gene {
        status.push_str(&format!(" {name} ({})", strand.as_char()));
    }
    status
}

/// Whether a gene defined at `prev_info_pos` is still within the window the
/// status line keeps showing it across: from the current top of screen out
/// to one full `(scrw-1) * scrh` screen below it. Scrolling down drops the
/// name the instant the top passes the gene's defining position; scrolling
/// up drops it once the gene is more than a screenful ahead of the new top.
pub fn gene_still_visible(prev_info_pos: u32, top_pos: u32, scrw: u16, scrh: u16) -> bool {
    let screenful = (scrw as i64 - 1) * scrh as i64;
    let prev_info_pos = prev_info_pos as i64;
    let top_pos = top_pos as i64;
    prev_info_pos >= top_pos && prev_info_pos <= top_pos + screenful
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_status_has_no_gene_suffix() {
        assert_eq!(build(1, 4, None), "1 (25.000%)");
    }

    #[test]
    fn status_with_gene_matches_worked_example() {
        assert_eq!(build(1, 4, Some(("GENE1", Strand::Plus))), "1 (25.000%) GENE1 (+)");
    }

    #[test]
    fn gene_visible_up_to_one_screenful_below_top() {
        // screenful = (20-1)*5 = 95
        assert!(gene_still_visible(195, 100, 20, 5));
        assert!(!gene_still_visible(196, 100, 20, 5));
    }

    #[test]
    fn gene_hidden_once_top_has_scrolled_past_it() {
        assert!(!gene_still_visible(99, 100, 20, 5));
        assert!(gene_still_visible(100, 100, 20, 5));
    }
}
