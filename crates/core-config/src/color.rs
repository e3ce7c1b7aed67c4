//! 256-color palette arithmetic: parsing a color literal from `config.ini`
//! and mapping an `R,G,B` triple to the nearest xterm-256 cell.
//!
//! Grounded on `convert_color`/`get_config_color`/`index_closest` in the
//! reference implementation.

use std::sync::LazyLock;

/// The 6 intensity levels used by the 216-color RGB cube (indices 16-231).
const CUBE_STEPS: [u16; 6] = [0, 95, 135, 175, 215, 255];

/// A handful of exact RGB triples the reference implementation maps to the
/// 8 low ANSI colors (0-7) rather than the nearest cube/grayscale cell —
/// matching terminal emulators' actual palettes for those slots more
/// closely than the formulaic mapping would.
static BASIC_COLORS: LazyLock<[((u8, u8, u8), u8); 9]> = LazyLock::new(|| {
    [
        ((0, 0, 0), 0),
        ((128, 0, 0), 1),
        ((0, 120, 0), 2),
        ((128, 128, 0), 3),
        ((0, 0, 128), 4),
        ((128, 0, 128), 5),
        ((0, 128, 128), 6),
        ((192, 192, 192), 7),
        ((128, 128, 128), 8),
    ]
});

/// Index of the element of `steps` closest to `val`; ties favor the earlier
/// (lower) step, matching `bisect_left`'s tie-breaking in the reference.
fn index_closest(steps: &[u16], val: u16) -> usize {
    let pos = steps.partition_point(|&s| s < val);
    if pos == 0 || pos == steps.len() {
        return pos.min(steps.len() - 1);
    }
    let before = steps[pos - 1];
    let after = steps[pos];
    if after - val < val - before {
        pos
    } else {
        pos - 1
    }
}

/// Map an 8-bit RGB triple to a 256-color terminal palette index.
pub fn convert_color(r: u8, g: u8, b: u8) -> u8 {
    if let Some(&(_, idx)) = BASIC_COLORS.iter().find(|&&(rgb, _)| rgb == (r, g, b)) {
        return idx;
    }
    if r == g && g == b && r < 243 {
        let v = (r as i16 - 3) / 10;
        return (v.max(0) as u8) + 232;
    }
    let ri = index_closest(&CUBE_STEPS, r as u16);
    let gi = index_closest(&CUBE_STEPS, g as u16);
    let bi = index_closest(&CUBE_STEPS, b as u16);
    (ri * 36 + gi * 6 + bi + 16) as u8
}

/// Parse one config value: a bare `0..=255` integer, `#RRGGBB`, or
/// `rgb(r, g, b)`. Returns `None` for anything else, matching
/// `get_config_color`'s silent no-op on an unrecognized string.
pub fn parse_color(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u16>() {
        if n <= 255 {
            return Some(n as u8);
        }
        return None;
    }
    if let Some(hex) = raw.strip_prefix('#') {
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(convert_color(r, g, b));
        }
        return None;
    }
    let lower = raw.to_ascii_lowercase();
    if let Some(inner) = lower
        .strip_prefix("rgb(")
        .and_then(|s| s.strip_suffix(')'))
    {
        let mut parts = inner.split(',').map(|p| p.trim().parse::<u16>());
        let (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        if r > 255 || g > 255 || b > 255 {
            return None;
        }
        return Some(convert_color(r as u8, g as u8, b as u8));
    }
    None
}
