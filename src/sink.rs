/*
 *  sink.rs
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display surfaces - the only place a composed screen leaves the engine
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

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::markup::escape_html;
use crate::screen::ScreenBuffer;

const CLEAR_AND_HOME: &str = "\x1b[2J\x1b[H";

/// What a tick hands to the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A composed page.
    Screen(ScreenBuffer),
    /// Literal text shown when a page could not be loaded.
    Fallback(String),
}

impl Frame {
    /// Display output as HTML-safe markup; fallback text is escaped.
    pub fn to_html(&self) -> String {
        match self {
            Frame::Screen(screen) => screen.to_html(),
            Frame::Fallback(text) => escape_html(text),
        }
    }
}

/// The single side-effecting step of a tick.
pub trait ScreenSink: Send {
    fn show(&mut self, frame: &Frame) -> io::Result<()>;
}

impl<T: ScreenSink + ?Sized> ScreenSink for Box<T> {
    fn show(&mut self, frame: &Frame) -> io::Result<()> {
        (**self).show(frame)
    }
}

/// Shows every frame on each inner sink in turn. All sinks are tried even
/// if one fails; the first error is returned.
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn ScreenSink>>,
}

impl MultiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: impl ScreenSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ScreenSink for MultiSink {
    fn show(&mut self, frame: &Frame) -> io::Result<()> {
        let mut first_err = None;
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.show(frame) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

/// Writes the HTML display output to any writer, one frame after another.
pub struct HtmlSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> HtmlSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> ScreenSink for HtmlSink<W> {
    fn show(&mut self, frame: &Frame) -> io::Result<()> {
        writeln!(self.out, "{}", frame.to_html())?;
        self.out.flush()
    }
}

/// Rewrites a standalone HTML document on every frame.
///
/// The document is written next to the target and renamed over it so a
/// browser polling the file never reads half a page.
pub struct HtmlFileSink {
    path: PathBuf,
}

impl HtmlFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn document(frame: &Frame) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n\
             pre.teletext {{ background: #000; color: #ff0; font-family: monospace; }}\n\
             .c-cyan {{ color: #0ff; }} .c-green {{ color: #0f0; }} .c-white {{ color: #fff; }}\n\
             .c-red {{ color: #f00; }} .c-magenta {{ color: #f0f; }} .c-blue {{ color: #00f; }}\n\
             </style>\n</head>\n<body>\n<pre class=\"teletext\">{}</pre>\n</body>\n</html>\n",
            frame.to_html()
        )
    }
}

impl ScreenSink for HtmlFileSink {
    fn show(&mut self, frame: &Frame) -> io::Result<()> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, Self::document(frame))?;
        fs::rename(&tmp, &self.path)
    }
}

/// Colour terminal output.
pub struct AnsiSink<W: Write + Send> {
    out: W,
    clear: bool,
}

impl<W: Write + Send> AnsiSink<W> {
    pub fn new(out: W, clear: bool) -> Self {
        Self { out, clear }
    }
}

impl<W: Write + Send> ScreenSink for AnsiSink<W> {
    fn show(&mut self, frame: &Frame) -> io::Result<()> {
        if self.clear {
            write!(self.out, "{}", CLEAR_AND_HOME)?;
        }
        match frame {
            Frame::Screen(screen) => writeln!(self.out, "{}", screen.to_ansi())?,
            Frame::Fallback(text) => writeln!(self.out, "{}", nu_ansi_term::Color::Red.paint(text.as_str()))?,
        }
        self.out.flush()
    }
}

/// Uncoloured text with tags stripped.
pub struct PlainSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> PlainSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> ScreenSink for PlainSink<W> {
    fn show(&mut self, frame: &Frame) -> io::Result<()> {
        match frame {
            Frame::Screen(screen) => writeln!(self.out, "{}", screen.to_plain())?,
            Frame::Fallback(text) => writeln!(self.out, "{}", text)?,
        }
        self.out.flush()
    }
}

/// Hands the joined HTML display output to a callback.
pub struct CallbackSink<F: FnMut(String) + Send> {
    callback: F,
}

impl<F: FnMut(String) + Send> CallbackSink<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F: FnMut(String) + Send> ScreenSink for CallbackSink<F> {
    fn show(&mut self, frame: &Frame) -> io::Result<()> {
        (self.callback)(frame.to_html());
        Ok(())
    }
}

/// Records every frame for inspection in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().map(|f| f.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Frame> {
        self.frames.lock().ok().and_then(|f| f.last().cloned())
    }
}

impl ScreenSink for MemorySink {
    fn show(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames
            .lock()
            .map_err(|_| io::Error::other("memory sink poisoned"))?
            .push(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use crate::screen::build_screen;

    fn screen() -> ScreenBuffer {
        build_screen(&Page {
            status_line: Some("P100".into()),
            big_header: None,
            lines: vec!["{C}<hi>".into()],
        })
    }

    #[test]
    fn test_html_sink_writes_24_rows() {
        let mut out = Vec::new();
        HtmlSink::new(&mut out).show(&Frame::Screen(screen())).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 24);
        assert!(text.contains("<span class=\"c-cyan\">&lt;hi&gt;"));
    }

    #[test]
    fn test_fallback_is_escaped_in_html() {
        let frame = Frame::Fallback("ERROR loading <b>\nboom".into());
        assert_eq!(frame.to_html(), "ERROR loading &lt;b&gt;\nboom");
    }

    #[test]
    fn test_plain_sink_strips_tags() {
        let mut out = Vec::new();
        PlainSink::new(&mut out).show(&Frame::Screen(screen())).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().nth(6).map(str::trim_end), Some("<hi>"));
    }

    #[test]
    fn test_ansi_sink_clears_screen() {
        let mut out = Vec::new();
        AnsiSink::new(&mut out, true).show(&Frame::Fallback("x".into())).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(CLEAR_AND_HOME));
    }

    #[test]
    fn test_callback_sink_receives_joined_output() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let mut sink = CallbackSink::new(move |html| log.lock().unwrap().push(html));
        sink.show(&Frame::Screen(screen())).unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], screen().to_html());
    }

    #[test]
    fn test_html_file_sink_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.html");
        let mut sink = HtmlFileSink::new(&path);
        sink.show(&Frame::Fallback("first".into())).unwrap();
        sink.show(&Frame::Screen(screen())).unwrap();
        let doc = fs::read_to_string(&path).unwrap();
        assert!(doc.contains("<pre class=\"teletext\">P100"));
        assert!(!doc.contains("first"));
        assert!(!dir.path().join("screen.html.tmp").exists());
    }

    #[test]
    fn test_multi_sink_fans_out() {
        let a = MemorySink::new();
        let b = MemorySink::new();
        let mut multi = MultiSink::new();
        multi.push(a.clone());
        multi.push(b.clone());
        assert_eq!(multi.len(), 2);
        multi.show(&Frame::Fallback("x".into())).unwrap();
        assert_eq!(a.frames().len(), 1);
        assert_eq!(b.frames().len(), 1);
    }

    #[test]
    fn test_memory_sink_records() {
        let mut sink = MemorySink::new();
        let probe = sink.clone();
        sink.show(&Frame::Fallback("a".into())).unwrap();
        sink.show(&Frame::Fallback("b".into())).unwrap();
        assert_eq!(probe.frames().len(), 2);
        assert_eq!(probe.last(), Some(Frame::Fallback("b".into())));
    }
}
