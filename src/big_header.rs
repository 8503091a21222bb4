/*
 *  big_header.rs
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 *
 *  Five row block-letter banner
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use crate::constants::{GLYPH_ROWS, HEADER_GUTTER, HEADER_MAX_CHARS};
use crate::glyph_font::{self, Glyph};

/// Renders `text` as a centered block-letter banner of exactly five rows.
///
/// The text is upper-cased and cut to `HEADER_MAX_CHARS` characters. Glyphs
/// are joined with a one cell gutter, trailing blanks are trimmed from each
/// row, and every row gets the same left padding so the banner stays
/// aligned. A banner wider than `width` is returned unpadded and may
/// overflow; the screen composer clamps it.
pub fn make_big_header(text: &str, width: usize) -> [String; GLYPH_ROWS] {
    let glyphs: Vec<Glyph> = text
        .to_uppercase()
        .chars()
        .take(HEADER_MAX_CHARS)
        .map(glyph_font::lookup)
        .collect();

    let raw_rows: [String; GLYPH_ROWS] = std::array::from_fn(|row| {
        glyphs
            .iter()
            .map(|g| g.rows()[row])
            .collect::<Vec<_>>()
            .join(HEADER_GUTTER)
    });

    // all raw rows share one length, so one pad value centres the whole banner
    let raw_len = raw_rows[0].chars().count();
    let pad = width.saturating_sub(raw_len) / 2;

    raw_rows.map(|raw| format!("{}{}", " ".repeat(pad), raw.trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GLYPH_FILL, SCREEN_WIDTH};

    fn leading_spaces(s: &str) -> usize {
        s.chars().take_while(|c| *c == ' ').count()
    }

    #[test]
    fn test_hi_is_five_centered_rows() {
        let rows = make_big_header("hi", SCREEN_WIDTH);
        assert_eq!(rows.len(), 5);
        // H(4) + gutter + I(4) = 9 wide, (40 - 9) / 2 = 15
        for row in &rows {
            assert!(row.chars().count() <= SCREEN_WIDTH);
            assert_eq!(leading_spaces(row), 15, "row {row:?}");
            assert!(!row.ends_with(' '));
        }
        assert_eq!(rows[0], format!("{}█  █ ███", " ".repeat(15)));
        assert_eq!(rows[2], format!("{}████  █", " ".repeat(15)));
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        assert_eq!(make_big_header("news", 40), make_big_header("NEWS", 40));
    }

    #[test]
    fn test_truncates_to_sixteen_characters() {
        let long = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        assert_eq!(make_big_header(long, 200), make_big_header(&long[..16], 200));
        // 16 glyphs of 4 plus 15 gutters, centred in 200
        assert_eq!(leading_spaces(&make_big_header(long, 200)[0]), (200 - 79) / 2);
    }

    #[test]
    fn test_overflow_is_not_padded() {
        let rows = make_big_header("WWWWWWWWWW", SCREEN_WIDTH);
        for row in &rows {
            assert!(row.chars().count() > SCREEN_WIDTH);
            assert!(row.starts_with(GLYPH_FILL));
        }
    }

    #[test]
    fn test_upper_cases_whole_text_before_truncating() {
        assert_eq!(make_big_header("straße", 40), make_big_header("STRASSE", 40));
        // the expansion of ß counts towards the sixteen character limit
        assert_eq!(
            make_big_header("ßßßßßßßßß", 200),
            make_big_header(&"S".repeat(16), 200)
        );
    }

    #[test]
    fn test_blank_rows_keep_their_padding() {
        let rows = make_big_header("-", SCREEN_WIDTH);
        // hyphen is 3 wide, (40 - 3) / 2 = 18
        assert_eq!(rows[0], " ".repeat(18));
        assert_eq!(rows[2], format!("{}███", " ".repeat(18)));
        assert_eq!(rows[4], " ".repeat(18));
    }

    #[test]
    fn test_empty_and_blank_text() {
        assert!(make_big_header("", SCREEN_WIDTH).iter().all(|r| *r == " ".repeat(20)));
        for text in ["   ", "!!!"] {
            // three 2-wide space glyphs and two gutters, (40 - 8) / 2 = 16
            let rows = make_big_header(text, SCREEN_WIDTH);
            assert!(rows.iter().all(|r| *r == " ".repeat(16)), "text {text:?}");
        }
    }

    #[test]
    fn test_zero_width_never_panics() {
        let rows = make_big_header("A", 0);
        assert_eq!(rows[0], " ██");
    }
}
