//! `ColorPair` numbering: a base pair per dominance category, with the four
//! nucleotide-offset slots following each region pair, plus resolution of a
//! pair into actual `crossterm` foreground/background colors via a
//! `core_config::Palette`.
//!
//! Grounded on the reference implementation's `curses.init_pair` table:
//! pair 0 is the terminal default (`PAIR_UNK`), pair 1 is the reversed-video
//! consensus highlight (`PAIR_HIGHLIGHT`), and from pair 8 on each region gets
//! four consecutive pairs — one per nucleotide (A, C, G, T) — so that
//! `region_pair + nucleotide` selects the right foreground/background
//! combination in one step.

use core_config::Palette;
use crossterm::style::Color;

/// Base `ColorPair` values. Add a nucleotide code (0-3) to any of the region
/// pairs (`NONE` and below) to select that region's nucleotide-specific
/// variant; `UNK` and `HIGHLIGHT` never take an offset.
pub struct ColorPair;

impl ColorPair {
    pub const UNK: u8 = 0;
    pub const HIGHLIGHT: u8 = 1;
    pub const NONE: u8 = 8;
    pub const EXON_PSEUDO: u8 = 12;
    pub const UTR_GENE: u8 = 16;
    pub const CDS: u8 = 20;
    pub const CDS2: u8 = 24;
    pub const INTRON: u8 = 28;
    pub const TRNA: u8 = 32;
    pub const RRNA: u8 = 36;
    pub const MIRNA: u8 = 40;
}

/// Resolve a `ColorPair` value (already offset by nucleotide, where
/// applicable) to the `(foreground, background)` colors it should be drawn
/// with. `UNK` renders with the terminal's own default colors; `HIGHLIGHT`
/// swaps the configured highlight color into the background with no
/// foreground override, matching curses reversed video.
pub fn resolve(pair: u8, palette: &Palette) -> (Option<Color>, Option<Color>) {
    if pair == ColorPair::UNK {
        return (None, None);
    }
    if pair == ColorPair::HIGHLIGHT {
        return (None, ansi(palette.highlight));
    }

    let (region_base, nucleotide) = (pair - pair % 4, pair % 4);
    let fg = ansi(nucleotide_fg(nucleotide, palette));
    let bg = ansi(region_bg(region_base, palette));
    (fg, bg)
}

fn nucleotide_fg(nucleotide: u8, palette: &Palette) -> i16 {
    match nucleotide {
        0 => palette.nucleotide.a,
        1 => palette.nucleotide.c,
        2 => palette.nucleotide.g,
        3 => palette.nucleotide.t,
        _ => palette.nucleotide.other,
    }
}

fn region_bg(region_base: u8, palette: &Palette) -> i16 {
    match region_base {
        ColorPair::NONE => palette.region.none,
        ColorPair::EXON_PSEUDO => palette.region.exon_pseudo,
        ColorPair::UTR_GENE => palette.region.utr_gene,
        ColorPair::CDS => palette.region.cds,
        ColorPair::CDS2 => palette.region.cds2,
        ColorPair::INTRON => palette.region.intron,
        ColorPair::TRNA => palette.region.trna,
        ColorPair::RRNA => palette.region.rrna,
        ColorPair::MIRNA => palette.region.mirna,
        _ => palette.region.none,
    }
}

/// `-1` means "no color override" in the palette; anything else is a
/// 256-color palette index.
fn ansi(value: i16) -> Option<Color> {
    if value < 0 {
        None
    } else {
        Some(Color::AnsiValue(value as u8))
    }
}
