mod capture;
mod error;
mod hotkey;
mod overlay;
mod selection;

pub use capture::{CapturedImage, ScreenRasterizer, XcapRasterizer};
pub use error::CaptureError;
pub use hotkey::{HotkeyHandle, HotkeyManager, HotkeyRegistrar, parse_combo};
pub use overlay::{Overlay, dimmed_bands};
pub use selection::{Phase, RegionSelector, SelectionOutcome};
