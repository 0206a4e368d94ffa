use serde::{Deserialize, Serialize};

use crate::commands::Icon;
use crate::theme::ThemeToken;
use crate::time::TimeOfDay;

pub type CameraId = u32;
pub type EventId = u32;

/// A camera row on the timeline. Order of the camera list is row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub id: CameraId,
    pub name: String,
}

/// The closed set of incident types a camera can report.
///
/// Serialized with the display strings the incident store uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "Unauthorised Access")]
    UnauthorisedAccess,
    #[serde(rename = "Face Recognised")]
    FaceRecognised,
    #[serde(rename = "Traffic congestion")]
    TrafficCongestion,
    #[serde(rename = "Multiple Events")]
    MultipleEvents,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        Self::UnauthorisedAccess,
        Self::FaceRecognised,
        Self::TrafficCongestion,
        Self::MultipleEvents,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::UnauthorisedAccess => "Unauthorised Access",
            Self::FaceRecognised => "Face Recognised",
            Self::TrafficCongestion => "Traffic congestion",
            Self::MultipleEvents => "Multiple Events",
        }
    }

    /// Badge fill color.
    pub fn theme_token(&self) -> ThemeToken {
        match self {
            Self::UnauthorisedAccess => ThemeToken::EventUnauthorisedAccess,
            Self::FaceRecognised => ThemeToken::EventFaceRecognised,
            Self::TrafficCongestion => ThemeToken::EventTrafficCongestion,
            Self::MultipleEvents => ThemeToken::EventMultiple,
        }
    }

    /// Leading badge icon. Aggregated badges carry none.
    pub fn icon(&self) -> Option<Icon> {
        match self {
            Self::UnauthorisedAccess => Some(Icon::Lock),
            Self::FaceRecognised => Some(Icon::Person),
            Self::TrafficCongestion => Some(Icon::Vehicle),
            Self::MultipleEvents => None,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Where an event sits along the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventPlacement {
    /// Positioned from its wall-clock time at the current zoom.
    Timestamp(TimeOfDay),
    /// A stored percentage of the full track, applied as-is regardless of
    /// zoom. Kept for feeds that predate timestamps.
    LiteralPercent(f64),
}

/// A discrete incident reported by one camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: EventId,
    pub camera_id: CameraId,
    pub kind: EventKind,
    pub placement: EventPlacement,
    /// Overrides the kind's display name on the badge.
    pub label: Option<String>,
    /// Append the event time to the badge text.
    pub show_time: bool,
    /// The badge stands for more events than it shows.
    pub has_overflow: bool,
}

impl TimelineEvent {
    pub fn timestamp(&self) -> Option<TimeOfDay> {
        match self.placement {
            EventPlacement::Timestamp(t) => Some(t),
            EventPlacement::LiteralPercent(_) => None,
        }
    }

    /// Badge caption: the label, or the kind's display name.
    pub fn badge_name(&self) -> &str {
        self.label.as_deref().unwrap_or(self.kind.display_name())
    }

    /// `HH:MM` drawn after the name when `show_time` is set on a timed event.
    pub fn badge_time(&self) -> Option<String> {
        self.timestamp()
            .filter(|_| self.show_time)
            .map(|t| t.to_hhmm())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn event(placement: EventPlacement, show_time: bool) -> TimelineEvent {
        TimelineEvent {
            id: 2,
            camera_id: 1,
            kind: EventKind::FaceRecognised,
            placement,
            label: None,
            show_time,
            has_overflow: false,
        }
    }

    #[test]
    fn kind_uses_store_strings() {
        let json = serde_json::to_string(&EventKind::TrafficCongestion).unwrap();
        assert_eq!(json, "\"Traffic congestion\"");
        let kind: Option<EventKind> = serde_json::from_str("\"Unauthorised Access\"").ok();
        assert_eq!(kind, Some(EventKind::UnauthorisedAccess));
        assert!(serde_json::from_str::<EventKind>("\"Loitering\"").is_err());
    }

    #[test]
    fn every_kind_has_distinct_color() {
        let tokens: HashSet<ThemeToken> =
            EventKind::ALL.iter().map(EventKind::theme_token).collect();
        assert_eq!(tokens.len(), EventKind::ALL.len());
    }

    #[test]
    fn badge_time_only_when_requested() {
        let at = TimeOfDay::from_hms(14, 45, 0).unwrap();
        let shown = event(EventPlacement::Timestamp(at), true);
        assert_eq!(shown.badge_name(), "Face Recognised");
        assert_eq!(shown.badge_time().as_deref(), Some("14:45"));
        assert_eq!(event(EventPlacement::Timestamp(at), false).badge_time(), None);
        // No timestamp to show.
        assert_eq!(event(EventPlacement::LiteralPercent(50.0), true).badge_time(), None);
    }

    #[test]
    fn label_overrides_kind_name() {
        let mut e = event(EventPlacement::LiteralPercent(10.0), false);
        e.label = Some("Gate 3".into());
        assert_eq!(e.badge_name(), "Gate 3");
    }
}
