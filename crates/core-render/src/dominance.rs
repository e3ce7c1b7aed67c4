//! Dominant-feature resolution: given the reader's active-feature multiset
//! at the cursor, decide which single category governs this cell's color.
//!
//! Grounded on `get_nucleotide_and_pair` in the reference implementation.
//! Priority, highest first: gap, CDS (phase-shaded), tRNA, rRNA, miRNA,
//! exon-in-gene (UTR), exon-in-pseudogene, exon alone (no offset), gene or
//! pseudogene without an enclosing exon (intron), otherwise no feature.
//! `core-reader::get_cds_phase` is a closed-form function of cursor position
//! (see its own docs), so there is no need to replicate the reference
//! implementation's incrementing `current_cds_phase` counter here — calling
//! it fresh for every CDS cell already gives the same alternation.

use core_format::FeatureKind;
use core_reader::Reader;

use crate::color::ColorPair;

/// Nucleotide code for an unknown/gap base — never a real decoded base, only
/// a rendering placeholder (spec.md §3's "4 = '?' rendering-only").
pub const GAP_NUCLEOTIDE: u8 = 4;

/// The nucleotide code and base `ColorPair` (nucleotide offset already
/// applied where the category takes one) for the reader's current position.
pub fn dominant(reader: &mut Reader) -> (u8, u8) {
    let nucleotide = reader.current_nucleotide().unwrap_or(0);
    let features = reader.current_features();

    if features.contains(FeatureKind::Gap) {
        return (GAP_NUCLEOTIDE, ColorPair::UNK);
    }
    if features.contains(FeatureKind::Cds) {
        let phase = reader.get_cds_phase();
        let base = if phase & 0b100 != 0 { ColorPair::CDS2 } else { ColorPair::CDS };
        return (nucleotide, base + nucleotide);
    }
    if features.contains(FeatureKind::Trna) {
        return (nucleotide, ColorPair::TRNA + nucleotide);
    }
    if features.contains(FeatureKind::Rrna) {
        return (nucleotide, ColorPair::RRNA + nucleotide);
    }
    if features.contains(FeatureKind::Mirna) {
        return (nucleotide, ColorPair::MIRNA + nucleotide);
    }
    if features.contains(FeatureKind::Exon) {
        if features.contains(FeatureKind::Gene) {
            return (nucleotide, ColorPair::UTR_GENE + nucleotide);
        }
        if features.contains(FeatureKind::Pseudogene) {
            return (nucleotide, ColorPair::EXON_PSEUDO + nucleotide);
        }
        return (nucleotide, ColorPair::UNK);
    }
    if features.contains(FeatureKind::Gene) || features.contains(FeatureKind::Pseudogene) {
        return (nucleotide, ColorPair::INTRON + nucleotide);
    }
    (nucleotide, ColorPair::NONE + nucleotide)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_format::{END_BIT, FeatureKind as FK};
    use std::path::Path;
    use tempfile::tempdir;

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

    fn plain_record(pos: u32, kind: FK, is_end: bool) -> Vec<u8> {
        let mut out = pos.to_le_bytes().to_vec();
        out.push(kind.code() | if is_end { END_BIT } else { 0 });
        out
    }

    fn write_metadata(dir: &Path, chromosome: &str, records: &[Vec<u8>]) {
        use std::io::Write;
        let mut file = std::fs::File::create(dir.join(format!("{chromosome}.dat"))).unwrap();
        for record in records {
            file.write_all(record).unwrap();
        }
    }

    #[test]
    fn gap_wins_over_everything_and_renders_placeholder() {
        let dir = tempdir().unwrap();
        write_sequence(dir.path(), "1", &[0; 20]);
        write_metadata(
            dir.path(),
            "1",
            &[
                plain_record(1, FK::Gap, false),
                plain_record(1, FK::Exon, false),
                plain_record(10, FK::Gap, true),
                plain_record(10, FK::Exon, true),
            ],
        );
        let mut reader = core_reader::Reader::open("1", dir.path()).unwrap();
        reader.jump_to(5);
        let (nucleotide, pair) = dominant(&mut reader);
        assert_eq!(nucleotide, GAP_NUCLEOTIDE);
        assert_eq!(pair, ColorPair::UNK);
    }

    #[test]
    fn bare_exon_has_no_nucleotide_offset() {
        let dir = tempdir().unwrap();
        write_sequence(dir.path(), "1", &[0; 20]);
        write_metadata(dir.path(), "1", &[plain_record(1, FK::Exon, false), plain_record(10, FK::Exon, true)]);
        let mut reader = core_reader::Reader::open("1", dir.path()).unwrap();
        reader.jump_to(5);
        let (_, pair) = dominant(&mut reader);
        assert_eq!(pair, ColorPair::UNK);
    }

    #[test]
    fn gene_without_exon_is_intron() {
        let dir = tempdir().unwrap();
        write_sequence(dir.path(), "1", &[1; 20]);
        write_metadata(dir.path(), "1", &[plain_record(1, FK::Gene, false), plain_record(10, FK::Gene, true)]);
        let mut reader = core_reader::Reader::open("1", dir.path()).unwrap();
        reader.jump_to(5);
        let (nucleotide, pair) = dominant(&mut reader);
        assert_eq!(pair, ColorPair::INTRON + nucleotide);
    }

    #[test]
    fn no_feature_falls_back_to_none_plus_offset() {
        let dir = tempdir().unwrap();
        write_sequence(dir.path(), "1", &[2; 20]);
        let mut reader = core_reader::Reader::open("1", dir.path()).unwrap();
        reader.jump_to(5);
        let (nucleotide, pair) = dominant(&mut reader);
        assert_eq!(nucleotide, 2);
        assert_eq!(pair, ColorPair::NONE + 2);
    }
}
