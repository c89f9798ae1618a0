//! # Overlay Events
//!
//! Event records handed to the renderer by the upstream detector.
//!
//! Every event carries an inclusive frame window `[start_frame, end_frame]`
//! and a precomputed description. The set of variants is closed: passes,
//! pressure, and possession changes.

use serde::{Deserialize, Serialize};

/// Tracking identifier of a player.
pub type PlayerId = u32;

/// Team identifier as assigned by the detector.
pub type TeamId = u32;

/// Fields shared by every event variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventBase {
    /// First frame of the window (inclusive)
    pub start_frame: u32,
    /// Last frame of the window (inclusive)
    pub end_frame: u32,
    /// Human-readable text produced by the detector
    pub description: String,
    #[serde(default)]
    pub players_involved: Vec<PlayerId>,
    #[serde(default)]
    pub teams_involved: Vec<TeamId>,
    /// Pitch zone label, e.g. "middle_third"
    #[serde(default)]
    pub field_zone: String,
    /// Detector confidence (0.0 - 1.0)
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    1.0
}

impl EventBase {
    pub fn new(start_frame: u32, end_frame: u32, description: impl Into<String>) -> Self {
        Self {
            start_frame,
            end_frame,
            description: description.into(),
            players_involved: Vec::new(),
            teams_involved: Vec::new(),
            field_zone: String::new(),
            confidence: default_confidence(),
        }
    }

    /// Window length in frames, counting both ends.
    pub fn duration_frames(&self) -> u32 {
        self.end_frame.saturating_sub(self.start_frame) + 1
    }

    pub fn contains(&self, frame: u32) -> bool {
        self.start_frame <= frame && frame <= self.end_frame
    }

    /// Fractional position of `frame` inside the window.
    ///
    /// Returns `None` outside the window. A single-frame window
    /// (`start_frame == end_frame`) reports `1.0` on its only frame.
    pub fn progress_at(&self, frame: u32) -> Option<f64> {
        if !self.contains(frame) {
            return None;
        }
        let span = self.end_frame - self.start_frame;
        if span == 0 {
            return Some(1.0);
        }
        Some(f64::from(frame - self.start_frame) / f64::from(span))
    }
}

/// Ball played from one player towards another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PassEvent {
    #[serde(flatten)]
    pub base: EventBase,
    pub passer_id: PlayerId,
    /// `None` while the pass has no confirmed receiver
    #[serde(default)]
    pub receiver_id: Option<PlayerId>,
    #[serde(default)]
    pub pass_type: String,
    #[serde(default)]
    pub pass_success: bool,
}

impl PassEvent {
    pub fn new(
        start_frame: u32,
        end_frame: u32,
        passer_id: PlayerId,
        receiver_id: Option<PlayerId>,
    ) -> Self {
        let description = match receiver_id {
            Some(receiver) => format!("Pass: Player {} to Player {}", passer_id, receiver),
            None => format!("Pass: Player {}", passer_id),
        };
        Self {
            base: EventBase::new(start_frame, end_frame, description),
            passer_id,
            receiver_id,
            pass_type: String::new(),
            pass_success: receiver_id.is_some(),
        }
    }

    /// Stable identity used to recognise a re-emitted pass.
    pub fn identity(&self) -> (PlayerId, Option<PlayerId>, u32, u32) {
        (self.passer_id, self.receiver_id, self.base.start_frame, self.base.end_frame)
    }

    pub fn banner_text(&self) -> String {
        format!(
            "PASS IN PROGRESS: Player {} \u{2192} Player {}",
            self.passer_id,
            display_optional(self.receiver_id)
        )
    }
}

/// One player closing down another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PressureEvent {
    #[serde(flatten)]
    pub base: EventBase,
    pub pressuring_player_id: PlayerId,
    pub pressured_player_id: PlayerId,
    /// 0.0 = light, 1.0 = maximum
    pub pressure_intensity: f32,
}

impl PressureEvent {
    pub fn new(
        start_frame: u32,
        end_frame: u32,
        pressuring_player_id: PlayerId,
        pressured_player_id: PlayerId,
        pressure_intensity: f32,
    ) -> Self {
        let description = format!(
            "Pressure: Player {} on Player {} ({:.0}%)",
            pressuring_player_id,
            pressured_player_id,
            pressure_intensity * 100.0
        );
        Self {
            base: EventBase::new(start_frame, end_frame, description),
            pressuring_player_id,
            pressured_player_id,
            pressure_intensity,
        }
    }

    pub fn banner_text(&self) -> String {
        format!(
            "PRESSURE: Player {} on Player {}",
            self.pressuring_player_id, self.pressured_player_id
        )
    }
}

/// Ball changing hands between teams. Instantaneous.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PossessionChangeEvent {
    #[serde(flatten)]
    pub base: EventBase,
    pub previous_team: TeamId,
    pub new_team: TeamId,
    #[serde(default)]
    pub cause: String,
    #[serde(default)]
    pub field_position: (f32, f32),
}

impl PossessionChangeEvent {
    pub fn new(frame: u32, previous_team: TeamId, new_team: TeamId) -> Self {
        let description =
            format!("Possession: Team {} to Team {}", previous_team, new_team);
        Self {
            base: EventBase::new(frame, frame, description),
            previous_team,
            new_team,
            cause: String::new(),
            field_position: (0.0, 0.0),
        }
    }

    pub fn banner_text(&self) -> String {
        format!(
            "POSSESSION CHANGE: Team {} \u{2192} Team {}",
            self.previous_team, self.new_team
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Pass(PassEvent),
    Pressure(PressureEvent),
    PossessionChange(PossessionChangeEvent),
}

impl Event {
    pub fn base(&self) -> &EventBase {
        match self {
            Event::Pass(e) => &e.base,
            Event::Pressure(e) => &e.base,
            Event::PossessionChange(e) => &e.base,
        }
    }

    pub fn start_frame(&self) -> u32 {
        self.base().start_frame
    }

    pub fn end_frame(&self) -> u32 {
        self.base().end_frame
    }

    pub fn description(&self) -> &str {
        &self.base().description
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Event::Pass(_) => "pass",
            Event::Pressure(_) => "pressure",
            Event::PossessionChange(_) => "possession_change",
        }
    }
}

impl From<PassEvent> for Event {
    fn from(e: PassEvent) -> Self {
        Event::Pass(e)
    }
}

impl From<PressureEvent> for Event {
    fn from(e: PressureEvent) -> Self {
        Event::Pressure(e)
    }
}

impl From<PossessionChangeEvent> for Event {
    fn from(e: PossessionChangeEvent) -> Self {
        Event::PossessionChange(e)
    }
}

fn display_optional(id: Option<PlayerId>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_midpoint_is_exact() {
        let pass = PassEvent::new(10, 20, 7, Some(9));
        assert_eq!(pass.base.progress_at(15), Some(0.5));
        assert_eq!(pass.base.progress_at(10), Some(0.0));
        assert_eq!(pass.base.progress_at(20), Some(1.0));
    }

    #[test]
    fn test_progress_outside_window() {
        let pass = PassEvent::new(10, 20, 7, Some(9));
        assert_eq!(pass.base.progress_at(9), None);
        assert_eq!(pass.base.progress_at(21), None);
    }

    #[test]
    fn test_degenerate_window_is_complete() {
        let base = EventBase::new(42, 42, "instant");
        assert_eq!(base.progress_at(42), Some(1.0));
        assert_eq!(base.progress_at(41), None);
        assert_eq!(base.progress_at(43), None);
        assert_eq!(base.duration_frames(), 1);
    }

    #[test]
    fn test_pass_banner_without_receiver() {
        let pass = PassEvent::new(0, 5, 4, None);
        let text = pass.banner_text();
        assert!(text.contains("Player None"), "got {text}");
        assert!(text.starts_with("PASS IN PROGRESS: Player 4"));
    }

    #[test]
    fn test_banner_texts() {
        let pressure = PressureEvent::new(3, 3, 5, 11, 0.9);
        assert_eq!(pressure.banner_text(), "PRESSURE: Player 5 on Player 11");

        let change = PossessionChangeEvent::new(8, 1, 2);
        assert_eq!(change.banner_text(), "POSSESSION CHANGE: Team 1 \u{2192} Team 2");
        assert_eq!(change.base.start_frame, change.base.end_frame);
    }

    #[test]
    fn test_event_json_tagging() {
        let json = r#"{
            "kind": "pass",
            "start_frame": 10,
            "end_frame": 20,
            "description": "long ball",
            "passer_id": 7,
            "receiver_id": null
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        match &event {
            Event::Pass(pass) => {
                assert_eq!(pass.passer_id, 7);
                assert_eq!(pass.receiver_id, None);
                assert_eq!(pass.base.confidence, 1.0);
            }
            other => panic!("expected pass, got {:?}", other),
        }
        assert_eq!(event.kind_name(), "pass");
        assert_eq!(event.description(), "long ball");

        let back = serde_json::to_value(&event).unwrap();
        assert_eq!(back["kind"], "pass");
        assert_eq!(back["start_frame"], 10);
    }

    #[test]
    fn test_possession_change_json() {
        let json = r#"{
            "kind": "possession_change",
            "start_frame": 30,
            "end_frame": 30,
            "description": "turnover",
            "previous_team": 0,
            "new_team": 1,
            "cause": "interception",
            "field_position": [52.5, 34.0]
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        let Event::PossessionChange(change) = event else {
            panic!("expected possession change");
        };
        assert_eq!(change.new_team, 1);
        assert_eq!(change.cause, "interception");
        assert_eq!(change.field_position, (52.5, 34.0));
    }
}
