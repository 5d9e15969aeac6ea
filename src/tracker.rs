mod droplet;
mod keyframes;
mod rect;
mod registry;
mod session;

pub use droplet::Droplet;
pub use keyframes::KeyframeSet;
pub use rect::Rect;
pub use registry::DropletRegistry;
pub use session::{TrackingSession, ViewMode};
