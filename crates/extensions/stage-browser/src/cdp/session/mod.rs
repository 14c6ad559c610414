//! CDP page session for driving a single tab.

mod core;
mod emulation;
mod input;
mod js;
mod navigation;
mod screencast;

pub use self::core::PageSession;
pub use self::emulation::MOBILE_USER_AGENT;
