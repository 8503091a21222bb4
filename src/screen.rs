/*
 *  screen.rs
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 *
 *  Screen composer - status row, banner and body into a fixed grid
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

use crate::big_header::make_big_header;
use crate::constants::{BODY_ROWS, HEADER_ROWS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::markup::{render_line, render_line_ansi, strip_markup};
use crate::page::Page;

/// Right-pads with spaces or right-truncates so the result is exactly
/// `width` characters long.
pub fn pad_or_trim(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.chars().take(width).collect()
    } else {
        let mut out = String::with_capacity(s.len() + (width - len));
        out.push_str(s);
        out.extend(std::iter::repeat_n(' ', width - len));
        out
    }
}

/// The composed grid: always `SCREEN_HEIGHT` rows of `SCREEN_WIDTH` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    rows: Vec<String>,
}

impl ScreenBuffer {
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Rows run through the markup renderer and joined by newlines, ready
    /// for a monospace `<pre>` container.
    pub fn to_html(&self) -> String {
        self.join_with(render_line)
    }

    /// Terminal rendition of the same rows.
    pub fn to_ansi(&self) -> String {
        self.join_with(render_line_ansi)
    }

    /// Rows with colour tags dropped.
    pub fn to_plain(&self) -> String {
        self.join_with(|row| strip_markup(row).to_string())
    }

    fn join_with(&self, render: impl Fn(&str) -> String) -> String {
        self.rows
            .iter()
            .map(|row| render(row))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Composes `page` into a 40x24 grid.
///
/// Row 0 is the status line, rows 1-5 the banner (blank without one) and
/// rows 6-23 the body. Every row is padded or truncated to the width and
/// surplus body lines are dropped, so any page, however malformed, yields
/// the same shape.
pub fn build_screen(page: &Page) -> ScreenBuffer {
    let mut rows = Vec::with_capacity(SCREEN_HEIGHT);

    rows.push(pad_or_trim(page.status_line(), SCREEN_WIDTH));

    match page.big_header() {
        Some(text) => {
            rows.extend(make_big_header(text, SCREEN_WIDTH).iter().map(|r| pad_or_trim(r, SCREEN_WIDTH)));
        }
        None => {
            rows.extend(std::iter::repeat_n(" ".repeat(SCREEN_WIDTH), HEADER_ROWS));
        }
    }

    rows.extend(
        page.lines
            .iter()
            .map(String::as_str)
            .chain(std::iter::repeat(""))
            .take(BODY_ROWS)
            .map(|line| pad_or_trim(line, SCREEN_WIDTH)),
    );

    debug_assert_eq!(rows.len(), SCREEN_HEIGHT);
    ScreenBuffer { rows }
}
