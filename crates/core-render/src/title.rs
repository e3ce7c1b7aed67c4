//! The 7-row ASCII-art chromosome name banner shown across the first ten
//! title rows of each chromosome.
//!
//! Grounded on `print_title_line` in the reference implementation. Glyphs
//! exist for `0`-`9`, `X`, `Y`, `m`, `t` — every character `core_format`'s
//! chromosome names can contain. Row visibility follows the exact formula
//! the reference implementation computes (`n = height + title_row + 1`,
//! shown only for `0 <= n < height`): with `height == 7` and `title_row`
//! ranging `-10..=-1`, rows `-10` and `-9` are blank lead-in, rows `-8..=-2`
//! show the seven glyph rows, and row `-1` is a trailing blank — not the
//! "10 blank rows then the name" a looser reading of the banner's row count
//! might suggest.

const GLYPH_HEIGHT: usize = 7;

fn glyph(ch: char) -> &'static [&'static str; GLYPH_HEIGHT] {
    match ch {
        '0' => &[
            "  #####    ",
            " ##   ##   ",
            "##     ##  ",
            "##     ##  ",
            "##     ##  ",
            " ##   ##   ",
            "  #####    ",
        ],
        '1' => &[
            "  ##   ", "####   ", "  ##   ", "  ##   ", "  ##   ", "  ##   ", "###### ",
        ],
        '2' => &[
            " #######  ",
            "##     ## ",
            "       ## ",
            " #######  ",
            "##        ",
            "##        ",
            "######### ",
        ],
        '3' => &[
            " #######  ",
            "##     ## ",
            "       ## ",
            " #######  ",
            "       ## ",
            "##     ## ",
            " #######  ",
        ],
        '4' => &[
            "##        ",
            "##    ##  ",
            "##    ##  ",
            "##    ##  ",
            "######### ",
            "      ##  ",
            "      ##  ",
        ],
        '5' => &[
            "######## ", "##       ", "##       ", "#######  ", "      ## ", "##    ## ", " ######  ",
        ],
        '6' => &[
            " #######  ",
            "##     ## ",
            "##        ",
            "########  ",
            "##     ## ",
            "##     ## ",
            " #######  ",
        ],
        '7' => &[
            "######## ", "##    ## ", "    ##   ", "   ##    ", "  ##     ", "  ##     ", "  ##     ",
        ],
        '8' => &[
            " #######  ",
            "##     ## ",
            "##     ## ",
            " #######  ",
            "##     ## ",
            "##     ## ",
            " #######  ",
        ],
        '9' => &[
            " #######  ",
            "##     ## ",
            "##     ## ",
            " ######## ",
            "       ## ",
            "##     ## ",
            " #######  ",
        ],
        'X' => &[
            "##     ## ",
            " ##   ##  ",
            "  ## ##   ",
            "   ###    ",
            "  ## ##   ",
            " ##   ##  ",
            "##     ## ",
        ],
        'Y' => &[
            "##    ## ", " ##  ##  ", "  ####   ", "   ##    ", "   ##    ", "   ##    ", "   ##    ",
        ],
        'm' => &[
            "           ",
            "           ",
            "## ##  ##  ",
            "### ### ## ",
            "##  ##  ## ",
            "##  ##  ## ",
            "##  ##  ## ",
        ],
        't' => &[
            "         ", "   ##    ", "######## ", "   ##    ", "   ##    ", "   ##    ", "    #### ",
        ],
        _ => &[
            "       ", "       ", "       ", "       ", "       ", "       ", "       ",
        ],
    }
}

/// Build one row of the title banner: `scrw - 1` characters wide, blank on
/// the lead-in/trailing rows, the centered chromosome name glyph otherwise.
pub fn title_row_cells(chromosome: &str, title_row: i8, scrw: u16) -> Vec<char> {
    let content_width = scrw.saturating_sub(1) as usize;
    let n = GLYPH_HEIGHT as i16 + title_row as i16 + 1;
    if !(0..GLYPH_HEIGHT as i16).contains(&n) {
        return vec![' '; content_width];
    }
    let n = n as usize;

    let length: usize = chromosome.chars().map(|c| glyph(c)[0].chars().count()).sum();
    let pad = (scrw as i64 - length as i64) / 2;
    let pad = pad.max(0) as usize;

    let mut cells = vec![' '; pad.min(content_width)];
    for c in chromosome.chars() {
        if cells.len() >= content_width {
            break;
        }
        for gc in glyph(c)[n].chars() {
            if cells.len() >= content_width {
                break;
            }
            cells.push(gc);
        }
    }
    cells.resize(content_width, ' ');
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_in_and_trailing_rows_are_blank() {
        assert!(title_row_cells("1", -10, 80).iter().all(|&c| c == ' '));
        assert!(title_row_cells("1", -9, 80).iter().all(|&c| c == ' '));
        assert!(title_row_cells("1", -1, 80).iter().all(|&c| c == ' '));
    }

    #[test]
    fn glyph_rows_are_not_blank() {
        let row = title_row_cells("1", -8, 80);
        assert!(row.iter().any(|&c| c == '#'));
    }

    #[test]
    fn row_is_exactly_scrw_minus_one_wide() {
        for title_row in -10..=-1 {
            assert_eq!(title_row_cells("mt", title_row, 40).len(), 39);
        }
    }

    #[test]
    fn mt_uses_lowercase_glyphs() {
        let row = title_row_cells("mt", -5, 80);
        assert!(row.iter().any(|&c| c == '#'));
    }
}
