//! Chrome stage for the Director.
//!
//! Drives a real Chrome tab over the DevTools protocol: device emulation,
//! the subtitle/timer/cursor overlays, pointer input, scroll surfaces and a
//! timestamped screencast of everything that happens on screen.
//!
//! ```text
//! ┌──────────────────┐    WebSocket     ┌──────────────────┐
//! │   BrowserStage   │ ◄──────────────► │   Chrome/Edge    │
//! │  + Recorder      │       CDP        │ window.__director│
//! └──────────────────┘                  └──────────────────┘
//! ```

pub mod cdp;
pub mod manager;
pub mod recorder;
pub mod script;
pub mod stage;

pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
pub use recorder::{CaptureOptions, Capture, CapturedFrame, ScreencastRecorder};
pub use stage::{BrowserStage, DeviceProfile};
