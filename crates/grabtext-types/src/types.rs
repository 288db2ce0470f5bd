use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CONVERT_LABEL: &str = "Convert to Text";
pub const CONVERTING_LABEL: &str = "Converting...";

#[derive(Debug, Clone)]
pub enum AppEvent {
    // Inbound: platform layer and presentation bridge -> app
    HotkeyPressed,
    Overlay(OverlayEvent),
    ProcessCapture,
    CloseResults,

    // Outbound: app -> presentation layer
    OverlayOpened {
        session: SessionId,
    },
    OverlayHole {
        session: SessionId,
        rect: ScreenRect,
    },
    OverlayHidden {
        session: SessionId,
    },
    OverlayClosed {
        session: SessionId,
    },
    CaptureReady {
        session: SessionId,
        width: u32,
        height: u32,
    },
    ButtonState {
        session: SessionId,
        state: UiState,
    },
    UpdateResults {
        session: SessionId,
        html: String,
        plain: String,
    },
    CaptureFailed {
        session: SessionId,
        message: String,
    },
}

/// Identifies one hotkey-initiated capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangle in virtual-screen coordinates, origin always top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Axis-aligned box spanning two corners, in whatever order they were dragged.
    pub fn spanning(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn contains_rect(&self, other: &ScreenRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Clip `self` to `bounds`.
    ///
    /// Returns an empty rect at the clamped origin when they don't overlap.
    pub fn intersect(&self, bounds: &ScreenRect) -> ScreenRect {
        let left = (self.x as i64).max(bounds.x as i64);
        let top = (self.y as i64).max(bounds.y as i64);
        let right = self.right().min(bounds.right());
        let bottom = self.bottom().min(bounds.bottom());

        ScreenRect {
            x: left as i32,
            y: top as i32,
            width: (right - left).max(0) as u32,
            height: (bottom - top).max(0) as u32,
        }
    }
}

impl fmt::Display for ScreenRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Input delivered to the capture overlay by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    PointerDown {
        position: Point,
        button: PointerButton,
    },
    PointerMove {
        position: Point,
        primary_held: bool,
    },
    PointerUp {
        position: Point,
        button: PointerButton,
    },
    /// Escape key
    Cancel,
}

/// Convert button state shown by the result surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub disabled: bool,
    pub label: String,
}

impl UiState {
    pub fn busy() -> Self {
        Self {
            disabled: true,
            label: CONVERTING_LABEL.to_string(),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            disabled: false,
            label: CONVERT_LABEL.to_string(),
        }
    }
}
