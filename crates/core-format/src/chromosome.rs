//! The fixed chromosome ordering used for boundary-crossing navigation.
//!
//! Mirrors the `chromosomes` list in the reference implementation: autosomes
//! 1-22 in numeric order, then X, Y, then the mitochondrial genome.

/// Chromosome names in traversal order. `mt` has no successor.
pub const CHROMOSOMES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y", "mt",
];

/// Index of `name` within [`CHROMOSOMES`], or `None` if not a valid chromosome.
pub fn index_of(name: &str) -> Option<usize> {
    CHROMOSOMES.iter().position(|&c| c == name)
}

/// The chromosome preceding `name` in traversal order, if any.
pub fn prev(name: &str) -> Option<&'static str> {
    let idx = index_of(name)?;
    idx.checked_sub(1).map(|i| CHROMOSOMES[i])
}

/// The chromosome following `name` in traversal order, if any.
pub fn next(name: &str) -> Option<&'static str> {
    let idx = index_of(name)?;
    CHROMOSOMES.get(idx + 1).copied()
}

/// Validate a chromosome name against the CLI grammar: `1-9`, `X`, `Y`,
/// `10-19`, `20-22`, or `mt`.
pub fn is_valid(name: &str) -> bool {
    index_of(name).is_some()
}
