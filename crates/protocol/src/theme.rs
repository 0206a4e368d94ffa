use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Border,

    // Toolbar
    ToolbarText,
    ToolbarMuted,
    ButtonBackground,
    ButtonDisabled,

    // Camera column and rows
    CameraLabelText,
    RowBackground,
    RowSelected,

    // Axis
    TickMajor,
    TickMinor,
    TickLabel,

    // Scrub cursor
    CursorLine,
    CursorBadge,
    CursorBadgeText,

    // Event badges
    EventUnauthorisedAccess,
    EventFaceRecognised,
    EventTrafficCongestion,
    EventMultiple,
    EventText,
    EventTimeText,
}
