//! Camera/event feed parsing.
//!
//! A feed is the JSON document the incident store hands the widget:
//!
//! ```json
//! { "cameras": [{ "id": 1, "name": "Camera - 01" }],
//!   "events":  [{ "id": 2, "camera_id": 1, "type": "Face Recognised",
//!                 "time": "14:45", "show_time": true }] }
//! ```
//!
//! Events carry either a `time` or a legacy `left` percentage (a number or a
//! CSS-style string such as `"61.5%"`). When both are present the time wins.

use camline_protocol::{
    Camera, CameraId, EventId, EventKind, EventPlacement, TimeOfDay, TimeParseError,
    TimelineEvent,
};
use serde::Deserialize;
use thiserror::Error;

use crate::model::Session;

/// A small three-camera feed for demos and first runs.
pub const DEMO_FEED: &[u8] = include_bytes!("../assets/demo-feed.json");

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid feed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event {event_id}: {source}")]
    InvalidTime {
        event_id: EventId,
        #[source]
        source: TimeParseError,
    },
    #[error("event {event_id}: invalid track percentage {value:?}")]
    InvalidPercent { event_id: EventId, value: String },
    #[error("event {event_id} has neither a time nor a track position")]
    MissingPlacement { event_id: EventId },
    #[error("camera id {0} appears more than once")]
    DuplicateCamera(CameraId),
}

#[derive(Deserialize)]
struct RawFeed {
    #[serde(default)]
    cameras: Vec<Camera>,
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Deserialize)]
struct RawEvent {
    id: EventId,
    #[serde(alias = "camera")]
    camera_id: CameraId,
    #[serde(rename = "type")]
    kind: EventKind,
    time: Option<String>,
    left: Option<RawPercent>,
    label: Option<String>,
    #[serde(default, alias = "showTime")]
    show_time: bool,
    #[serde(default, alias = "hasTriangle")]
    has_overflow: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPercent {
    Number(f64),
    Text(String),
}

impl RawEvent {
    fn into_event(self) -> Result<TimelineEvent, FeedError> {
        let event_id = self.id;
        let placement = match (self.time, self.left) {
            (Some(time), _) => {
                let t: TimeOfDay = time
                    .parse()
                    .map_err(|source| FeedError::InvalidTime { event_id, source })?;
                EventPlacement::Timestamp(t)
            }
            (None, Some(left)) => EventPlacement::LiteralPercent(parse_percent(event_id, left)?),
            (None, None) => return Err(FeedError::MissingPlacement { event_id }),
        };

        Ok(TimelineEvent {
            id: self.id,
            camera_id: self.camera_id,
            kind: self.kind,
            placement,
            label: self.label,
            show_time: self.show_time,
            has_overflow: self.has_overflow,
        })
    }
}

fn parse_percent(event_id: EventId, raw: RawPercent) -> Result<f64, FeedError> {
    let value = match raw {
        RawPercent::Number(n) => n,
        RawPercent::Text(text) => {
            let trimmed = text.trim();
            let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
            digits
                .parse::<f64>()
                .map_err(|_| FeedError::InvalidPercent {
                    event_id,
                    value: text.clone(),
                })?
        }
    };
    if !value.is_finite() {
        return Err(FeedError::InvalidPercent {
            event_id,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Parse a feed document into a [`Session`].
pub fn parse_feed(data: &[u8]) -> Result<Session, FeedError> {
    let raw: RawFeed = serde_json::from_slice(data)?;
    let events = raw
        .events
        .into_iter()
        .map(RawEvent::into_event)
        .collect::<Result<Vec<_>, _>>()?;
    Session::new(raw.cameras, events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timestamped_and_legacy_events() {
        let data = br#"{
            "cameras": [{"id": 1, "name": "Camera - 01"}, {"id": 2, "name": "Camera - 02"}],
            "events": [
                {"id": 1, "camera_id": 1, "type": "Unauthorised Access", "left": "20.8%"},
                {"id": 2, "camera_id": 1, "type": "Face Recognised", "time": "14:45",
                 "left": "61.5%", "show_time": true},
                {"id": 3, "camera": 2, "type": "Multiple Events", "left": 93.75, "hasTriangle": true}
            ]
        }"#;
        let Ok(session) = parse_feed(data) else {
            panic!("feed should parse");
        };
        assert_eq!(session.len(), 2);
        let events = session.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].placement, EventPlacement::LiteralPercent(20.8));
        assert_eq!(
            events[1].placement,
            EventPlacement::Timestamp(TimeOfDay::from_hms(14, 45, 0).unwrap())
        );
        assert!(events[1].show_time);
        assert_eq!(events[2].camera_id, 2);
        assert!(events[2].has_overflow);
    }

    #[test]
    fn missing_placement_is_an_error() {
        let data = br#"{"cameras": [{"id": 1, "name": "A"}],
            "events": [{"id": 9, "camera_id": 1, "type": "Face Recognised"}]}"#;
        assert!(matches!(
            parse_feed(data),
            Err(FeedError::MissingPlacement { event_id: 9 })
        ));
    }

    #[test]
    fn bad_time_reports_event() {
        let data = br#"{"cameras": [{"id": 1, "name": "A"}],
            "events": [{"id": 4, "camera_id": 1, "type": "Face Recognised", "time": "25:10"}]}"#;
        assert!(matches!(
            parse_feed(data),
            Err(FeedError::InvalidTime { event_id: 4, .. })
        ));
    }

    #[test]
    fn bad_percent_reports_event() {
        let data = br#"{"cameras": [{"id": 1, "name": "A"}],
            "events": [{"id": 5, "camera_id": 1, "type": "Face Recognised", "left": "half"}]}"#;
        assert!(matches!(
            parse_feed(data),
            Err(FeedError::InvalidPercent { event_id: 5, .. })
        ));
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let data = br#"{"cameras": [{"id": 1, "name": "A"}],
            "events": [{"id": 1, "camera_id": 1, "type": "Loitering", "time": "10:00"}]}"#;
        assert!(matches!(parse_feed(data), Err(FeedError::Json(_))));
    }

    #[test]
    fn empty_document_is_an_empty_session() {
        let Ok(session) = parse_feed(b"{}") else {
            panic!("empty feed should parse");
        };
        assert!(session.is_empty());
    }
}
