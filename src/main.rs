/*
 *  main.rs
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 *
 *  Command line player: cycle a channel, preview or normalize one page
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

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::io;
use tokio::sync::watch;

use teleplay::config::{self, Cli, Command, Config, OutputFormat};
use teleplay::page::Page;
use teleplay::scheduler::Scheduler;
use teleplay::screen::build_screen;
use teleplay::sink::{AnsiSink, Frame, HtmlFileSink, HtmlSink, MultiSink, PlainSink, ScreenSink};
use teleplay::source::{self, PageSource};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Waits for SIGINT, SIGTERM or SIGHUP and logs which one arrived.
#[cfg(unix)]
async fn signal_handler() -> Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Initiating graceful shutdown.");
    Ok(())
}

/// Stdout in the configured format, plus the HTML document file if asked.
fn build_sink(cfg: &Config, clear: bool) -> MultiSink {
    let mut sink = MultiSink::new();
    match cfg.output() {
        OutputFormat::Ansi => sink.push(AnsiSink::new(io::stdout(), clear)),
        OutputFormat::Html => sink.push(HtmlSink::new(io::stdout())),
        OutputFormat::Plain => sink.push(PlainSink::new(io::stdout())),
    }
    if let Some(path) = cfg.html_out.as_ref() {
        info!("Writing HTML document to {}", path.display());
        sink.push(HtmlFileSink::new(path.clone()));
    }
    sink
}

async fn play(cfg: &Config) -> Result<()> {
    let (source, channel) = source::for_channel(cfg.channel(), cfg.timeouts())
        .with_context(|| format!("opening channel {}", cfg.channel()))?;

    let mut scheduler = Scheduler::new(source, build_sink(cfg, cfg.clear_screen()))
        .with_interval_override(cfg.interval_override());
    scheduler
        .load(&channel)
        .await
        .with_context(|| format!("loading channel {}", channel))?;

    let (stop_tx, stop_rx) = watch::channel(false);
    let shutdown = async move {
        if let Err(e) = signal_handler().await {
            error!("Signal handler failed: {}", e);
        }
        // the scheduler drops any pending tick as soon as this lands
        let _ = stop_tx.send(true);
    };
    tokio::join!(scheduler.run(stop_rx), shutdown);
    Ok(())
}

async fn fetch_page(locator: &str, cfg: &Config) -> Result<Page> {
    let (source, locator) = source::for_channel(locator, cfg.timeouts())?;
    let text = source
        .fetch(&locator)
        .await
        .with_context(|| format!("fetching {}", locator))?;
    Page::from_json(&text).with_context(|| format!("parsing {}", locator))
}

async fn render(locator: &str, cfg: &Config) -> Result<()> {
    let page = fetch_page(locator, cfg).await?;
    let mut sink = build_sink(cfg, false);
    sink.show(&Frame::Screen(build_screen(&page)))
        .context("writing screen")?;
    Ok(())
}

async fn normalize(locator: &str, cfg: &Config) -> Result<()> {
    let page = fetch_page(locator, cfg).await?;
    println!("{}", page.to_pretty_json()?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli).context("loading configuration")?;

    if cli.dump_config {
        print!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("{} - forty by twenty-four", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(&cfg).await,
        Command::Render { page } => render(&page, &cfg).await,
        Command::Normalize { page } => normalize(&page, &cfg).await,
    }
}
