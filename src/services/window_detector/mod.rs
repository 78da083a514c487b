//! WindowDetector service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for asking the window
//! manager which window is active and returning its title/class. Turning a
//! title into a file path belongs to the selection detector.

mod hyprctl;
mod kdotool;
mod sway;
mod window_detector;
mod xdotool;
mod r#trait;

pub use self::r#trait::ActiveWindowSource;
pub use self::window_detector::{ActiveWindowDetector, DesktopEnvironment};
