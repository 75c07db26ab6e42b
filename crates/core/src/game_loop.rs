//! Game loop - frame-driven scheduler around a [`GameSession`]
//!
//! The caller owns the clock and the surface. Each call to
//! [`GameLoop::frame`] runs, in order:
//!
//! 1. animations (skipped while paused)
//! 2. particles (skipped while paused)
//! 3. key repeat timers (only while playing)
//! 4. gravity (only while playing)
//! 5. render
//!
//! Key presses between frames are applied immediately by
//! [`GameLoop::key_down`].

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::keys::KeyTimers;
use crate::render::{DrawOptions, Surface};
use crate::session::{GameSession, SessionState};
use crate::telemetry::Telemetry;
use crate::types::{GameAction, Key};

/// Length of the window frames per second is measured over
const FPS_WINDOW_MS: u64 = 1000;

/// Summary of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Time since the previous frame
    pub dt_ms: u32,
    pub state: SessionState,
    /// Rows cleared since the previous frame, including by key presses
    pub lines_cleared: u32,
    /// Whether gravity pulled the active tile this frame
    pub gravity_step: bool,
}

/// Drives a session from frame callbacks and key events
#[derive(Debug, Clone)]
pub struct GameLoop {
    session: GameSession,
    keys: KeyTimers,
    draw: DrawOptions,
    cell_size: f32,
    last_frame_ms: Option<u64>,
    last_gravity_ms: u64,
    lines_seen: u32,
    play_ms: u64,
    frames: u64,
    fps: f32,
    fps_window_start_ms: u64,
    fps_window_frames: u32,
}

impl GameLoop {
    pub fn new(config: GameConfig) -> Self {
        Self::with_session(GameSession::new(config))
    }

    pub fn with_session(session: GameSession) -> Self {
        let keys = KeyTimers::new(session.config());
        Self {
            session,
            keys,
            draw: DrawOptions::default(),
            cell_size: 1.0,
            last_frame_ms: None,
            last_gravity_ms: 0,
            lines_seen: 0,
            play_ms: 0,
            frames: 0,
            fps: 0.0,
            fps_window_start_ms: 0,
            fps_window_frames: 0,
        }
    }

    /// Surface units per board cell.
    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.cell_size = cell_size;
    }

    pub fn set_draw_options(&mut self, draw: DrawOptions) {
        self.draw = draw;
    }

    /// Advance one frame and draw it.
    pub fn frame<S: Surface + ?Sized>(&mut self, now_ms: u64, surface: &mut S) -> FrameInfo {
        let dt_ms = self
            .last_frame_ms
            .map(|last| now_ms.saturating_sub(last))
            .unwrap_or(0);
        self.last_frame_ms = Some(now_ms);
        let dt = dt_ms.min(u32::MAX as u64) as u32;

        if !self.session.is_paused() {
            self.session.run_animations(now_ms);
            self.session.tick_particles(dt);
        }

        let mut gravity_step = false;
        if self.session.is_playing() {
            self.play_ms += dt_ms;

            let mut due: ArrayVec<Key, 6> = ArrayVec::new();
            self.keys.update(now_ms, |k| due.push(k));
            for key in due {
                self.fire(key, now_ms);
            }

            if self.session.is_playing()
                && now_ms.saturating_sub(self.last_gravity_ms) >= self.session.gravity_ms() as u64
            {
                self.last_gravity_ms = now_ms;
                self.session.step_down();
                gravity_step = true;
            }
        }

        self.session.render(surface, self.cell_size, &self.draw);
        self.count_frame(now_ms);

        let lines = self.session.lines();
        let lines_cleared = lines.saturating_sub(self.lines_seen);
        self.lines_seen = lines;

        FrameInfo {
            dt_ms: dt,
            state: self.session.state(),
            lines_cleared,
            gravity_step,
        }
    }

    fn count_frame(&mut self, now_ms: u64) {
        self.frames += 1;
        self.fps_window_frames += 1;
        let window = now_ms.saturating_sub(self.fps_window_start_ms);
        if window >= FPS_WINDOW_MS {
            self.fps = self.fps_window_frames as f32 * 1000.0 / window as f32;
            self.fps_window_start_ms = now_ms;
            self.fps_window_frames = 0;
        }
    }

    /// A named key went down.
    pub fn key_down(&mut self, key: Key, now_ms: u64) {
        let fires = self.keys.press(key, now_ms);
        if !fires {
            return;
        }
        self.session.set_clock(now_ms);
        if key == Key::Enter {
            self.start_or_pause(now_ms);
        } else if self.session.is_playing() {
            self.fire(key, now_ms);
        }
    }

    /// A named key went up.
    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
    }

    fn fire(&mut self, key: Key, now_ms: u64) {
        match key.action() {
            GameAction::SoftDrop => {
                self.session.step_down();
                self.last_gravity_ms = now_ms;
            }
            GameAction::StartOrPause => self.start_or_pause(now_ms),
            action => {
                self.session.apply(action);
            }
        }
    }

    fn start_or_pause(&mut self, now_ms: u64) {
        let before = self.session.state();
        self.session.apply(GameAction::StartOrPause);
        match (before, self.session.state()) {
            (SessionState::NotStarted | SessionState::GameOver, SessionState::Playing) => {
                self.play_ms = 0;
                self.lines_seen = 0;
                self.last_gravity_ms = now_ms;
            }
            (SessionState::Paused, SessionState::Playing) => {
                self.last_gravity_ms = now_ms;
            }
            _ => {}
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    /// Time spent playing in the current game.
    pub fn play_ms(&self) -> u64 {
        self.play_ms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry::capture(&self.session, self.play_ms, self.fps)
    }
}
