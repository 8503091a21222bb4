/*
 *  lib.rs
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 *
 *  Teletext style page composer and playout engine
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

//! Pages are JSON documents composed onto a fixed 40x24 grid: a status
//! row, a five row block-letter banner and eighteen body rows with inline
//! colour tags. A channel descriptor lists the pages; the [`scheduler`]
//! cycles through them, one fetch-compose-show per tick.

pub mod big_header;
pub mod config;
pub mod constants;
pub mod deutils;
pub mod error;
pub mod glyph_font;
pub mod markup;
pub mod page;
pub mod scheduler;
pub mod screen;
pub mod sink;
pub mod source;

pub use error::{FetchError, PlayoutError};
pub use page::{ChannelDescriptor, Page};
pub use scheduler::{Scheduler, TickOutcome};
pub use screen::{ScreenBuffer, build_screen};
pub use sink::{Frame, ScreenSink};
pub use source::PageSource;
