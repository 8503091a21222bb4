/*
 *  markup.rs
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 *
 *  Colour tag grammar and per-line rendering
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

//! A line may open with a colour tag:
//!
//! ```text
//! line := tag? text
//! tag  := '{' code '}'
//! code := 'Y' | 'C' | 'G' | 'W' | 'R' | 'M' | 'B'
//! ```
//!
//! Matching is exact and case-sensitive. Anything else, including `{c}` or a
//! tag that is not at column 0, is ordinary text.

use nu_ansi_term::Color as AnsiColor;

/// The teletext palette. Yellow is the display default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeletextColor {
    Yellow,
    Cyan,
    Green,
    White,
    Red,
    Magenta,
    Blue,
}

impl TeletextColor {
    /// Strict decode of a tag code; `None` for anything outside the grammar.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'Y' => Some(TeletextColor::Yellow),
            'C' => Some(TeletextColor::Cyan),
            'G' => Some(TeletextColor::Green),
            'W' => Some(TeletextColor::White),
            'R' => Some(TeletextColor::Red),
            'M' => Some(TeletextColor::Magenta),
            'B' => Some(TeletextColor::Blue),
            _ => None,
        }
    }

    /// Lenient decode used when rendering: unknown codes fall back to white.
    pub fn from_code_or_white(code: char) -> Self {
        Self::from_code(code).unwrap_or(TeletextColor::White)
    }

    /// Semantic colour name, used as the span class.
    pub fn name(&self) -> &'static str {
        match self {
            TeletextColor::Yellow => "yellow",
            TeletextColor::Cyan => "cyan",
            TeletextColor::Green => "green",
            TeletextColor::White => "white",
            TeletextColor::Red => "red",
            TeletextColor::Magenta => "magenta",
            TeletextColor::Blue => "blue",
        }
    }

    /// Yellow needs no explicit styling.
    pub fn is_default(&self) -> bool {
        *self == TeletextColor::Yellow
    }

    pub fn ansi(&self) -> AnsiColor {
        match self {
            TeletextColor::Yellow => AnsiColor::Yellow,
            TeletextColor::Cyan => AnsiColor::Cyan,
            TeletextColor::Green => AnsiColor::Green,
            TeletextColor::White => AnsiColor::White,
            TeletextColor::Red => AnsiColor::Red,
            TeletextColor::Magenta => AnsiColor::Magenta,
            TeletextColor::Blue => AnsiColor::Blue,
        }
    }
}

/// Splits a leading colour tag from the rest of the line.
///
/// Returns the tag code (if the line opens with a well formed tag) and the
/// remaining text. Without a tag the whole line is returned as text.
pub fn parse_tag(line: &str) -> (Option<char>, &str) {
    let mut chars = line.chars();
    if let (Some('{'), Some(code), Some('}')) = (chars.next(), chars.next(), chars.next()) {
        if TeletextColor::from_code(code).is_some() {
            // '{' and '}' are one byte each
            let start = 2 + code.len_utf8();
            return (Some(code), &line[start..]);
        }
    }
    (None, line)
}

/// Escapes the three characters that matter inside a `<pre>` block.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders one screen row as HTML-safe markup.
///
/// Untagged and `{Y}` lines come back escaped and unwrapped, any other tag
/// wraps the escaped text in `<span class="c-<colour>">`.
pub fn render_line(line: &str) -> String {
    match parse_tag(line) {
        (None, text) => escape_html(text),
        (Some(code), text) => {
            let color = TeletextColor::from_code_or_white(code);
            let escaped = escape_html(text);
            if color.is_default() {
                escaped
            } else {
                format!("<span class=\"c-{}\">{}</span>", color.name(), escaped)
            }
        }
    }
}

/// Renders one screen row for a colour terminal. No escaping is applied and
/// every line is painted, untagged lines in the default yellow.
pub fn render_line_ansi(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }
    let (code, text) = parse_tag(line);
    let color = code
        .map(TeletextColor::from_code_or_white)
        .unwrap_or(TeletextColor::Yellow);
    color.ansi().paint(text).to_string()
}

/// Drops a leading colour tag, leaving the literal text.
pub fn strip_markup(line: &str) -> &str {
    parse_tag(line).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyan_tag_wraps_in_span() {
        assert_eq!(render_line("{C}HELLO"), "<span class=\"c-cyan\">HELLO</span>");
    }

    #[test]
    fn test_untagged_and_yellow_are_plain() {
        assert_eq!(render_line("HELLO"), "HELLO");
        assert_eq!(render_line("{Y}HI"), "HI");
    }

    #[test]
    fn test_every_code_maps_to_its_colour() {
        for (code, name) in [
            ('C', "cyan"),
            ('G', "green"),
            ('W', "white"),
            ('R', "red"),
            ('M', "magenta"),
            ('B', "blue"),
        ] {
            let line = format!("{{{code}}}x");
            assert_eq!(render_line(&line), format!("<span class=\"c-{name}\">x</span>"));
        }
    }

    #[test]
    fn test_escapes_only_amp_lt_gt() {
        assert_eq!(render_line("a<b>&c\"d'"), "a&lt;b&gt;&amp;c\"d'");
        assert_eq!(
            render_line("{R}<script>"),
            "<span class=\"c-red\">&lt;script&gt;</span>"
        );
    }

    #[test]
    fn test_malformed_tags_are_text() {
        for line in ["{c}lower", "{X}nope", "{C", "C}x", " {C}x", "{CC}x", "{}x"] {
            assert_eq!(parse_tag(line), (None, line), "line {line:?}");
            assert_eq!(render_line(line), escape_html(line));
        }
    }

    #[test]
    fn test_tag_only_line_renders_empty_span() {
        assert_eq!(parse_tag("{G}"), (Some('G'), ""));
        assert_eq!(render_line("{G}"), "<span class=\"c-green\"></span>");
        assert_eq!(render_line("{Y}"), "");
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(render_line(""), "");
        assert_eq!(render_line_ansi(""), "");
    }

    #[test]
    fn test_multibyte_text_after_tag() {
        assert_eq!(parse_tag("{M}Ää"), (Some('M'), "Ää"));
        assert_eq!(strip_markup("{M}Ää"), "Ää");
    }

    #[test]
    fn test_unknown_code_defaults_to_white() {
        assert_eq!(TeletextColor::from_code_or_white('?'), TeletextColor::White);
        assert_eq!(TeletextColor::from_code('y'), None);
    }

    #[test]
    fn test_ansi_rendition_paints_without_escaping() {
        let out = render_line_ansi("{R}a<b");
        assert!(out.contains("a<b"));
        assert_eq!(out, AnsiColor::Red.paint("a<b").to_string());
        assert_eq!(render_line_ansi("plain"), AnsiColor::Yellow.paint("plain").to_string());
    }
}
