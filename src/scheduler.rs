/*
 *  scheduler.rs
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 *
 *  Playlist scheduler - load a channel, then fetch, compose and show one
 *  page per tick
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

use log::{debug, error, info, warn};
use std::time::Duration;
use tokio::sync::watch;

use crate::error::PlayoutError;
use crate::page::{ChannelDescriptor, Page};
use crate::screen::build_screen;
use crate::sink::{Frame, ScreenSink};
use crate::source::PageSource;

/// Whether a tick has anything to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Empty playlist: ticks are silent no-ops.
    Idle,
    /// At least one page to cycle through.
    Active,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Shown { locator: String },
    Failed { locator: String, message: String },
}

/// Text shown in place of a page that could not be loaded.
pub fn fallback_text(locator: &str, message: &str) -> String {
    format!("ERROR loading {}\n{}", locator, message)
}

/// Owns the playlist and drives the display.
///
/// The cursor only ever grows and is taken modulo the playlist length.
/// Ticks never overlap: `run` schedules the next tick only once the
/// current one has settled, success or failure.
pub struct Scheduler<S: PageSource, D: ScreenSink> {
    source: S,
    sink: D,
    pages: Vec<String>,
    interval: Duration,
    interval_override: Option<Duration>,
    cursor: u64,
}

impl<S: PageSource, D: ScreenSink> Scheduler<S, D> {
    /// A scheduler with an empty playlist; call `load` before running.
    pub fn new(source: S, sink: D) -> Self {
        let defaults = ChannelDescriptor::default();
        let interval = defaults.interval();
        Self {
            source,
            sink,
            pages: defaults.pages,
            interval,
            interval_override: None,
            cursor: 0,
        }
    }

    /// Forces the tick interval regardless of the descriptor.
    pub fn with_interval_override(mut self, interval: Option<Duration>) -> Self {
        self.interval_override = interval;
        self
    }

    /// Fetches and applies the channel descriptor. A failure here is fatal
    /// to the session, the caller decides how to surface it.
    pub async fn load(&mut self, channel: &str) -> Result<(), PlayoutError> {
        let text = self.source.fetch(channel).await?;
        let descriptor = ChannelDescriptor::from_json(&text).map_err(|e| PlayoutError::parse(channel, e))?;
        self.apply(descriptor);
        info!(
            "Loaded channel {}: {} page(s), {:?} per page",
            channel,
            self.pages.len(),
            self.interval()
        );
        Ok(())
    }

    /// Installs a playlist directly.
    pub fn apply(&mut self, descriptor: ChannelDescriptor) {
        self.interval = descriptor.interval();
        self.pages = descriptor.pages;
    }

    pub fn phase(&self) -> Phase {
        if self.pages.is_empty() {
            Phase::Idle
        } else {
            Phase::Active
        }
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn interval(&self) -> Duration {
        self.interval_override.unwrap_or(self.interval)
    }

    /// One playlist step: pick the next page, fetch it, compose it and hand
    /// it to the sink. Fetch and parse failures are shown as fallback text
    /// and never escape the tick.
    pub async fn tick(&mut self) -> TickOutcome {
        if self.phase() == Phase::Idle {
            debug!("Playlist empty, nothing to show");
            return TickOutcome::Idle;
        }

        let index = (self.cursor % self.pages.len() as u64) as usize;
        self.cursor = self.cursor.wrapping_add(1);
        let locator = self.pages[index].clone();
        debug!("Tick {} -> {}", self.cursor, locator);

        let fetched = self.fetch_page(&locator).await;
        let (frame, outcome) = match fetched {
            Ok(page) => (
                Frame::Screen(build_screen(&page)),
                TickOutcome::Shown { locator },
            ),
            Err(e) => {
                let message = e.message();
                warn!("Page {} failed: {}", locator, message);
                (
                    Frame::Fallback(fallback_text(&locator, &message)),
                    TickOutcome::Failed { locator, message },
                )
            }
        };

        if let Err(e) = self.sink.show(&frame) {
            error!("Failed to update display: {}", e);
        }
        outcome
    }

    async fn fetch_page(&self, locator: &str) -> Result<Page, PlayoutError> {
        let text = self.source.fetch(locator).await?;
        Page::from_json(&text).map_err(|e| PlayoutError::parse(locator, e))
    }

    /// Ticks until `stop` turns true or its sender goes away.
    ///
    /// The first tick runs immediately. Stopping abandons an in-flight tick
    /// before it reaches the sink and cancels the pending sleep, so nothing
    /// is written after `run` returns.
    pub async fn run(&mut self, mut stop: watch::Receiver<bool>) {
        info!("Playout started, {:?} per page", self.interval());
        loop {
            if *stop.borrow_and_update() {
                break;
            }
            tokio::select! {
                outcome = self.tick() => {
                    if let TickOutcome::Failed { locator, .. } = &outcome {
                        debug!("Continuing after failure on {}", locator);
                    }
                }
                _ = stopped(&mut stop) => break,
            }

            let interval = self.interval();
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = stopped(&mut stop) => break,
            }
        }
        info!("Playout stopped after {} tick(s)", self.cursor);
    }
}

async fn stopped(stop: &mut watch::Receiver<bool>) {
    loop {
        if *stop.borrow_and_update() {
            return;
        }
        if stop.changed().await.is_err() {
            return;
        }
    }
}
