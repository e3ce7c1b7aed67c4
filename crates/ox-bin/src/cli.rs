//! Positional-argument parsing for the `viewer [CHR[.POS[%]]] [hl=NAME[,NAME...]]`
//! command line.
//!
//! Grounded on `get_start_pos`/`parse_options` in the reference
//! implementation: each option is its own regex, tried in turn against every
//! argument, first match wins, unrecognized arguments are silently ignored.

use regex::Regex;

use core_state::HighlightToggles;

/// The chromosome/position spec resolved from the command line, before the
/// starting chromosome's size is known (percent and negative-from-end
/// positions need it — see [`resolve_position`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartSpec {
    pub chromosome: String,
    pub pos: Option<i64>,
    pub percent: bool,
    /// The reference implementation only starts paused when an explicit
    /// position was given on the command line; with no position argument it
    /// starts auto-scrolling from chromosome 1, position 1.
    pub paused: bool,
    pub highlights: HighlightToggles,
}

impl Default for StartSpec {
    fn default() -> Self {
        StartSpec {
            chromosome: "1".to_string(),
            pos: None,
            percent: false,
            paused: false,
            highlights: HighlightToggles::default(),
        }
    }
}

/// Parse the free-form positional arguments into a [`StartSpec`].
pub fn parse(args: &[String]) -> StartSpec {
    let mut spec = StartSpec::default();

    let chr_re = Regex::new(r"^([1-9XY]|1\d|2[0-2]|mt)(?:\.(-?\d+)(%)?)?$").expect("valid regex");
    for arg in args {
        if let Some(caps) = chr_re.captures(arg) {
            spec.chromosome = caps[1].to_string();
            if let Some(pos_str) = caps.get(2) {
                spec.pos = pos_str.as_str().parse::<i64>().ok();
                spec.percent = caps.get(3).is_some();
                spec.paused = true;
            }
            break;
        }
    }

    let hl_re = Regex::new(r"^hl=([a-zA-Z0-9,]*)$").expect("valid regex");
    for arg in args {
        if let Some(caps) = hl_re.captures(arg) {
            for name in caps[1].split(',').filter(|s| !s.is_empty()) {
                spec.highlights.enable(name);
            }
            break;
        }
    }

    spec
}

/// Resolve a parsed `POS` into an absolute `1..=ch_size` position, mirroring
/// `Reader.__init__`'s percent conversion (`pos * ch_size // 100`) and its
/// negative from-the-end handling (`ch_size + pos + 1`). Clamped into range
/// as a defensive addition the source lacks: an out-of-range literal
/// position (e.g. `1.999999999`) would otherwise desync the reader from the
/// cursor arithmetic in `core-view`.
pub fn resolve_position(ch_size: u32, pos: Option<i64>, percent: bool) -> u32 {
    let mut p = pos.unwrap_or(1);
    if percent {
        p = (p * ch_size as i64) / 100;
    }
    if p <= 0 {
        p = ch_size as i64 + p + 1;
    }
    p.clamp(1, ch_size.max(1) as i64) as u32
}
