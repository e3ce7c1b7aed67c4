//! Color palette model: built-in defaults plus any overrides read from
//! `config.ini`.
//!
//! Grounded on the `nucleotide_colors`/`region_colors`/`other_colors` dicts
//! in the reference implementation. Values are raw 256-color palette
//! indices (0-255), or -1 for "no color" (terminal default background) —
//! `core-render` is the one that turns these into actual `ColorPair`s.

/// Foreground color per decoded nucleotide, indexed `A, C, G, T, other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NucleotideColors {
    pub a: i16,
    pub c: i16,
    pub g: i16,
    pub t: i16,
    pub other: i16,
}

impl Default for NucleotideColors {
    fn default() -> Self {
        NucleotideColors {
            a: 9,
            c: 11,
            g: 10,
            t: 14,
            other: 5,
        }
    }
}

/// Background color per feature-dominance category. `none` is `-1`,
/// meaning "leave the terminal's default background alone".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionColors {
    pub none: i16,
    pub exon_pseudo: i16,
    pub utr_gene: i16,
    pub cds: i16,
    pub cds2: i16,
    pub intron: i16,
    pub trna: i16,
    pub rrna: i16,
    pub mirna: i16,
}

impl Default for RegionColors {
    fn default() -> Self {
        RegionColors {
            none: -1,
            exon_pseudo: 102,
            utr_gene: 170,
            cds: 63,
            cds2: 105,
            intron: 232,
            trna: 106,
            rrna: 65,
            mirna: 136,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    pub nucleotide: NucleotideColors,
    pub region: RegionColors,
    /// Reversed-video highlight background (consensus-sequence matches).
    pub highlight: i16,
}

impl Palette {
    pub fn built_in() -> Palette {
        Palette {
            nucleotide: NucleotideColors::default(),
            region: RegionColors::default(),
            highlight: 11,
        }
    }
}
