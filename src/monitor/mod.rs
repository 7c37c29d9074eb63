pub mod enumerate;
pub mod report;
pub mod types;

pub use enumerate::{enumerate_screens, find_screen};
pub use report::{SystemProfiler, resolve_display_id};
pub use types::{Frame, ScreenInfo};
