//! Error types for the Director protocol layer.

mod media;
mod schedule;
mod stage;
mod synthesis;

pub use media::*;
pub use schedule::*;
pub use stage::*;
pub use synthesis::*;
