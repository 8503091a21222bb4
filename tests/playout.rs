/*
 *  tests/playout.rs
 *
 *  End to end playout against file backed channels
 *
 *  teleplay - forty by twenty-four
 *  (c) 2020-26 Stuart Hunter
 */

use std::fs;
use std::path::Path;
use std::time::Duration;

use teleplay::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use teleplay::markup::strip_markup;
use teleplay::scheduler::{Phase, Scheduler, TickOutcome};
use teleplay::sink::{Frame, MemorySink};
use teleplay::source::{self, Timeouts};

fn write(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
}

fn channel_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());
    dir
}

fn populate(dir: &Path) {
    write(
        dir,
        "channel.json",
        r#"{"secondsPerPage": 4, "pages": ["pages/100.json", "pages/missing.json", "pages/101.json"]}"#,
    );
    write(
        dir,
        "pages/100.json",
        r#"{"statusLine":"P100  TELEPLAY","bigHeader":"news","lines":["{C}Top stories","plain row"]}"#,
    );
    write(dir, "pages/101.json", r#"{"statusLine":"P101","lines":null}"#);
}

fn screen(frame: &Frame) -> Vec<String> {
    match frame {
        Frame::Screen(s) => s.rows().to_vec(),
        other => panic!("expected a screen, got {other:?}"),
    }
}

#[tokio::test]
async fn test_file_channel_cycles_with_fallback() {
    let dir = channel_dir();
    let channel = dir.path().join("channel.json");
    let (source, locator) = source::for_channel(&channel.to_string_lossy(), Timeouts::default()).unwrap();

    let sink = MemorySink::new();
    let mut sched = Scheduler::new(source, sink.clone());
    sched.load(&locator).await.unwrap();
    assert_eq!(sched.phase(), Phase::Active);
    assert_eq!(sched.interval(), Duration::from_secs(4));

    assert_eq!(sched.tick().await, TickOutcome::Shown { locator: "pages/100.json".into() });
    assert!(matches!(sched.tick().await, TickOutcome::Failed { ref locator, .. } if locator == "pages/missing.json"));
    assert_eq!(sched.tick().await, TickOutcome::Shown { locator: "pages/101.json".into() });
    assert_eq!(sched.tick().await, TickOutcome::Shown { locator: "pages/100.json".into() });

    let frames = sink.frames();
    assert_eq!(frames.len(), 4);

    let first = screen(&frames[0]);
    assert_eq!(first.len(), SCREEN_HEIGHT);
    assert!(first.iter().all(|r| r.chars().count() == SCREEN_WIDTH));
    assert_eq!(first[0].trim_end(), "P100  TELEPLAY");
    assert!(first[1].contains('█'));
    assert_eq!(first[6].trim_end(), "{C}Top stories");
    assert_eq!(strip_markup(&first[6]).trim_end(), "Top stories");

    match &frames[1] {
        Frame::Fallback(text) => assert!(text.starts_with("ERROR loading pages/missing.json\n")),
        other => panic!("expected fallback, got {other:?}"),
    }

    let third = screen(&frames[2]);
    assert_eq!(third[0].trim_end(), "P101");
    assert!(third[1..].iter().all(|r| r.trim().is_empty()));
}

#[tokio::test]
async fn test_missing_channel_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let channel = dir.path().join("nope.json");
    let (source, locator) = source::for_channel(&channel.to_string_lossy(), Timeouts::default()).unwrap();

    let mut sched = Scheduler::new(source, MemorySink::new());
    assert!(sched.load(&locator).await.is_err());
    assert_eq!(sched.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_relative_channel_path_resolves_pages_beside_it() {
    // created under the working directory, so its path stays relative
    let dir = tempfile::tempdir_in(".").unwrap();
    populate(dir.path());
    let relative = dir.path().join("channel.json");
    assert!(relative.is_relative());

    let (source, locator) = source::for_channel(&relative.to_string_lossy(), Timeouts::default()).unwrap();
    assert!(Path::new(&locator).is_absolute());
    let sink = MemorySink::new();
    let mut sched = Scheduler::new(source, sink.clone());
    sched.load(&locator).await.unwrap();
    assert_eq!(sched.tick().await, TickOutcome::Shown { locator: "pages/100.json".into() });
}
