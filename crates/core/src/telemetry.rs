//! Telemetry - a serializable summary of the running game for presentation layers

use serde::{Deserialize, Serialize};

use crate::session::{GameSession, SessionState};
use crate::types::TileKind;

/// Point-in-time figures about a session and the loop driving it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Points awarded by the most recent settle
    pub current_score: u32,
    /// Points from every earlier settle
    pub total_score: u32,
    /// Milliseconds spent in the playing state
    pub play_ms: u64,
    pub fps: f32,
    pub level: u32,
    pub lines: u32,
    pub state: SessionState,
    pub paused: bool,
    pub game_over: bool,
    /// Upcoming kinds, next first
    pub preview: Vec<TileKind>,
}

impl Telemetry {
    pub fn capture(session: &GameSession, play_ms: u64, fps: f32) -> Self {
        let score = session.score();
        Self {
            current_score: score.current,
            total_score: score.total,
            play_ms,
            fps,
            level: session.level(),
            lines: session.lines(),
            state: session.state(),
            paused: session.is_paused(),
            game_over: session.is_game_over(),
            preview: session.preview().collect(),
        }
    }

    /// Grand total including the pending award.
    pub fn points(&self) -> u32 {
        self.current_score + self.total_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_json_field_names() {
        let mut session = GameSession::new(GameConfig::default());
        session.start();
        let t = Telemetry::capture(&session, 1234, 60.0);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["current_score"], 0);
        assert_eq!(json["total_score"], 0);
        assert_eq!(json["play_ms"], 1234);
        assert_eq!(json["state"], "playing");
        assert_eq!(json["paused"], false);
        assert_eq!(json["game_over"], false);
        assert_eq!(json["preview"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_round_trip_through_json() {
        let session = GameSession::new(GameConfig::default());
        let t = Telemetry::capture(&session, 0, 0.0);
        let text = serde_json::to_string(&t).unwrap();
        let back: Telemetry = serde_json::from_str(&text).unwrap();
        assert_eq!(back, t);
        assert_eq!(back.state, SessionState::NotStarted);
    }
}
