//! IUPAC-aware consensus-sequence matching, used to highlight CpG islands
//! and TATA boxes against the trailing window of decoded nucleotides.
//!
//! Grounded on `match_consensus`/`apply_highlight`/`highlighter` in the
//! reference implementation. One deviation: the reference implementation
//! indexes `nucleotide_decoding` with whatever `last_nucleotides` holds,
//! including the `None` placeholders it seeds a chromosome's ring buffer
//! with — a lookup that has no `None` entry and would raise at the start of
//! every chromosome. Here a `None` ring entry (not enough preceding history)
//! is instead treated as a forced mismatch, which only ever suppresses a
//! highlight match in the first `RING_SIZE` bases of a chromosome rather
//! than crashing — see DESIGN.md.

use std::collections::VecDeque;

/// A consensus pattern (IUPAC codes, oldest base first, matching the order
/// `core_reader::Reader::last_nucleotides` returns) plus the maximum number
/// of mismatches still counted as a match.
pub struct Highlighter {
    pub pattern: &'static str,
    pub tolerance: u8,
}

/// CpG island: `CG` with no tolerance for mismatch.
pub const CPG: Highlighter = Highlighter { pattern: "CG", tolerance: 0 };
/// TATA box: `TATAWAWR` with up to one mismatch.
pub const TATA: Highlighter = Highlighter { pattern: "TATAWAWR", tolerance: 1 };

fn decode(code: u8) -> char {
    core_format::nucleotide_char(code)
}

/// Whether a decoded base satisfies an IUPAC ambiguity code.
fn matches_code(base: char, consensus: char) -> bool {
    match consensus {
        'N' => true,
        'W' => matches!(base, 'A' | 'T'),
        'S' => matches!(base, 'C' | 'G'),
        'R' => matches!(base, 'A' | 'G'),
        'Y' => matches!(base, 'C' | 'T'),
        'M' => matches!(base, 'A' | 'C'),
        'K' => matches!(base, 'G' | 'T'),
        'B' => matches!(base, 'C' | 'G' | 'T'),
        'D' => matches!(base, 'A' | 'G' | 'T'),
        'H' => matches!(base, 'A' | 'C' | 'T'),
        'V' => matches!(base, 'A' | 'C' | 'G'),
        other => base == other,
    }
}

/// Whether `ring` (oldest-first, as returned by `last_nucleotides`) ends
/// with a sequence matching `highlighter` within its mismatch tolerance. A
/// `None` entry (insufficient history) always counts as a mismatch.
pub fn matches(ring: &VecDeque<Option<u8>>, highlighter: &Highlighter) -> bool {
    let pattern: Vec<char> = highlighter.pattern.chars().collect();
    if pattern.len() > ring.len() {
        return false;
    }

    let mut differences = 0u8;
    for (offset, &consensus) in pattern.iter().rev().enumerate() {
        let ring_value = ring[ring.len() - 1 - offset];
        let is_match = match ring_value {
            Some(code) => matches_code(decode(code), consensus),
            None => false,
        };
        if !is_match {
            differences += 1;
            if differences > highlighter.tolerance {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(values: &[Option<u8>]) -> VecDeque<Option<u8>> {
        VecDeque::from(values.to_vec())
    }

    #[test]
    fn cpg_matches_exact_cg() {
        // C=1, G=2
        assert!(matches(&ring(&[Some(0), Some(1), Some(2)]), &CPG));
    }

    #[test]
    fn cpg_rejects_mismatch() {
        assert!(!matches(&ring(&[Some(0), Some(1), Some(0)]), &CPG));
    }

    #[test]
    fn none_entries_are_forced_mismatches() {
        assert!(!matches(&ring(&[None, None]), &CPG));
    }

    #[test]
    fn tata_tolerates_one_mismatch() {
        // T=3 A=0 T=3 A=0 W A=0 W R: TATAWAWR, substitute last base (R -> A)
        let bases = [3u8, 0, 3, 0, 0, 0, 0, 0];
        assert!(matches(&ring(&bases.map(Some)), &TATA));
    }

    #[test]
    fn tata_rejects_two_mismatches() {
        let bases = [3u8, 0, 3, 0, 1, 0, 1, 1];
        assert!(!matches(&ring(&bases.map(Some)), &TATA));
    }

    #[test]
    fn shorter_ring_than_pattern_never_matches() {
        assert!(!matches(&ring(&[Some(3), Some(0)]), &TATA));
    }
}
