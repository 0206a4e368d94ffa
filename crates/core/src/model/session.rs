use std::collections::HashSet;

use camline_protocol::{Camera, CameraId, TimelineEvent};
use serde::{Deserialize, Serialize};

use crate::feed::FeedError;

/// The camera roster and event list a timeline displays.
///
/// Supplied once by the host and immutable afterwards. Construction checks
/// that camera ids are unique and drops events that reference a camera not
/// in the roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    cameras: Vec<Camera>,
    events: Vec<TimelineEvent>,
}

impl Session {
    pub fn new(cameras: Vec<Camera>, events: Vec<TimelineEvent>) -> Result<Self, FeedError> {
        let mut ids = HashSet::with_capacity(cameras.len());
        for camera in &cameras {
            if !ids.insert(camera.id) {
                return Err(FeedError::DuplicateCamera(camera.id));
            }
        }

        let total = events.len();
        let events: Vec<TimelineEvent> = events
            .into_iter()
            .filter(|event| {
                let known = ids.contains(&event.camera_id);
                if !known {
                    log::warn!(
                        "dropping event {} for unknown camera {}",
                        event.id,
                        event.camera_id
                    );
                }
                known
            })
            .collect();

        log::debug!(
            "session: {} cameras, {} of {} events kept",
            cameras.len(),
            events.len(),
            total
        );
        Ok(Self { cameras, events })
    }

    /// Cameras in row order.
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    /// All events in feed order.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Row index of a camera.
    pub fn row_of(&self, id: CameraId) -> Option<usize> {
        self.cameras.iter().position(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}
