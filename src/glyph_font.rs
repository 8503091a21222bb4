/*
 *  glyph_font.rs
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 *
 *  Block-pixel font used for the big page header
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

use crate::constants::GLYPH_ROWS;

type Rows = [&'static str; GLYPH_ROWS];

/// A single character of the block font.
///
/// Every glyph has exactly `GLYPH_ROWS` rows and all rows of one glyph
/// share a width. Letters and digits are 4 cells wide, space and hyphen
/// are narrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    rows: &'static Rows,
}

impl Glyph {
    /// Pixel rows, top to bottom.
    pub fn rows(&self) -> &'static Rows {
        self.rows
    }

    /// Width in character cells.
    pub fn width(&self) -> usize {
        self.rows[0].chars().count()
    }
}

const SPACE: Rows = ["  ", "  ", "  ", "  ", "  "];
const HYPHEN: Rows = ["   ", "   ", "███", "   ", "   "];

const A: Rows = [" ██ ", "█  █", "████", "█  █", "█  █"];
const B: Rows = ["███ ", "█  █", "███ ", "█  █", "███ "];
const C: Rows = [" ███", "█   ", "█   ", "█   ", " ███"];
const D: Rows = ["███ ", "█  █", "█  █", "█  █", "███ "];
const E: Rows = ["████", "█   ", "███ ", "█   ", "████"];
const F: Rows = ["████", "█   ", "███ ", "█   ", "█   "];
const G: Rows = [" ███", "█   ", "█ ██", "█  █", " ███"];
const H: Rows = ["█  █", "█  █", "████", "█  █", "█  █"];
const I: Rows = ["███ ", " █  ", " █  ", " █  ", "███ "];
const J: Rows = ["   █", "   █", "   █", "█  █", " ██ "];
const K: Rows = ["█  █", "█ █ ", "██  ", "█ █ ", "█  █"];
const L: Rows = ["█   ", "█   ", "█   ", "█   ", "████"];
const M: Rows = ["█  █", "████", "████", "█  █", "█  █"];
const N: Rows = ["█  █", "██ █", "█ ██", "█  █", "█  █"];
const O: Rows = [" ██ ", "█  █", "█  █", "█  █", " ██ "];
const P: Rows = ["███ ", "█  █", "███ ", "█   ", "█   "];
const Q: Rows = [" ██ ", "█  █", "█  █", "█ ██", " ███"];
const R: Rows = ["███ ", "█  █", "███ ", "█ █ ", "█  █"];
const S: Rows = [" ███", "█   ", " ██ ", "   █", "███ "];
const T: Rows = ["████", " █  ", " █  ", " █  ", " █  "];
const U: Rows = ["█  █", "█  █", "█  █", "█  █", " ██ "];
const V: Rows = ["█  █", "█  █", "█  █", " ██ ", " ██ "];
const W: Rows = ["█  █", "█  █", "████", "████", "█  █"];
const X: Rows = ["█  █", "█  █", " ██ ", "█  █", "█  █"];
const Y: Rows = ["█  █", "█  █", " ██ ", " █  ", " █  "];
const Z: Rows = ["████", "   █", " ██ ", "█   ", "████"];

const D0: Rows = ["████", "█  █", "█  █", "█  █", "████"];
const D1: Rows = [" █  ", "██  ", " █  ", " █  ", "███ "];
const D2: Rows = ["███ ", "   █", " ██ ", "█   ", "████"];
const D3: Rows = ["███ ", "   █", " ██ ", "   █", "███ "];
const D4: Rows = ["█  █", "█  █", "████", "   █", "   █"];
const D5: Rows = ["████", "█   ", "███ ", "   █", "███ "];
const D6: Rows = [" ██ ", "█   ", "███ ", "█  █", " ██ "];
const D7: Rows = ["████", "   █", "  █ ", " █  ", " █  "];
const D8: Rows = [" ██ ", "█  █", " ██ ", "█  █", " ██ "];
const D9: Rows = [" ██ ", "█  █", " ███", "   █", " ██ "];

/// Looks up the glyph for `character`, folding to upper case first.
///
/// Anything outside A-Z, 0-9, space and hyphen maps to the space glyph,
/// so the lookup never fails.
pub fn lookup(character: char) -> Glyph {
    let rows: &'static Rows = match character.to_ascii_uppercase() {
        'A' => &A,
        'B' => &B,
        'C' => &C,
        'D' => &D,
        'E' => &E,
        'F' => &F,
        'G' => &G,
        'H' => &H,
        'I' => &I,
        'J' => &J,
        'K' => &K,
        'L' => &L,
        'M' => &M,
        'N' => &N,
        'O' => &O,
        'P' => &P,
        'Q' => &Q,
        'R' => &R,
        'S' => &S,
        'T' => &T,
        'U' => &U,
        'V' => &V,
        'W' => &W,
        'X' => &X,
        'Y' => &Y,
        'Z' => &Z,
        '0' => &D0,
        '1' => &D1,
        '2' => &D2,
        '3' => &D3,
        '4' => &D4,
        '5' => &D5,
        '6' => &D6,
        '7' => &D7,
        '8' => &D8,
        '9' => &D9,
        '-' => &HYPHEN,
        _ => &SPACE,
    };
    Glyph { rows }
}
