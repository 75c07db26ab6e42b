//! Terminal tilefall runner (default binary).
//!
//! Drives a [`GameLoop`] from a fixed frame timer, feeds it crossterm key
//! events and flushes each frame through the diffing renderer.
//!
//! Logging goes to a file because the alternate screen owns the terminal:
//! set `TILEFALL_LOG_PATH` to enable it and `TILEFALL_LOG_LEVEL` to pick the level.

use std::env;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

use tilefall::core::{GameConfig, GameLoop};
use tilefall::input::{map_key, should_quit, ReleaseTracker};
use tilefall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tilefall::types::FRAME_MS;

fn main() -> Result<()> {
    init_log()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("exiting with error: {:#}", e);
    }
    result
}

/// Set up file logging when `TILEFALL_LOG_PATH` is set.
fn init_log() -> Result<()> {
    let Some(path) = env::var("TILEFALL_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };
    let level = env::var("TILEFALL_LOG_LEVEL")
        .ok()
        .and_then(|s| s.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
        )))
        .build(path)?;
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut config = GameConfig::from_env();
    if !GameConfig::env_has_seed() {
        config.seed = clock_seed();
    }
    log::info!("starting with {:?}", config);

    let mut game = GameLoop::new(config);
    let view = GameView::default();
    let mut releases = ReleaseTracker::from_env();
    let mut fb = FrameBuffer::new(0, 0);

    let clock = Instant::now();
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut next_frame = clock;
    let now_ms = || clock.elapsed().as_millis() as u64;

    loop {
        let now = now_ms();
        for key in releases.expire(now) {
            game.key_up(key);
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let info = view.frame(&mut game, now, Viewport::new(w, h), &mut fb);
        if info.lines_cleared > 0 {
            log::info!(
                "{} lines cleared, {} points",
                info.lines_cleared,
                game.telemetry().points()
            );
        }
        term.present(&mut fb)?;

        // Input until the next frame is due.
        next_frame += frame;
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    let Some(k) = map_key(key.code) else {
                        continue;
                    };
                    match key.kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            let now = now_ms();
                            if releases.press(k, now) {
                                game.key_down(k, now);
                            }
                        }
                        KeyEventKind::Release => {
                            if releases.release(k) {
                                game.key_up(k);
                            }
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Don't try to catch up after a stall.
        if Instant::now() > next_frame + frame {
            next_frame = Instant::now();
        }
    }
}
