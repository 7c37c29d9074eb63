use winit::event_loop::ActiveEventLoop;
use winit::monitor::MonitorHandle;

use super::types::{Frame, ScreenInfo};
use crate::error::FlashError;

/// Snapshot every monitor the event loop currently knows about.
pub fn enumerate_screens(event_loop: &ActiveEventLoop) -> Vec<ScreenInfo> {
    event_loop
        .available_monitors()
        .map(|handle| screen_info(&handle))
        .collect()
}

fn screen_info(handle: &MonitorHandle) -> ScreenInfo {
    ScreenInfo {
        native_id: native_id(handle),
        name: handle.name(),
        // Each monitor reports pixels at its own scale.
        frame: Frame::from_physical(handle.position(), handle.size(), handle.scale_factor()),
    }
}

#[cfg(target_os = "macos")]
fn native_id(handle: &MonitorHandle) -> Option<u32> {
    use winit::platform::macos::MonitorHandleExtMacOS;

    Some(handle.native_id())
}

#[cfg(not(target_os = "macos"))]
fn native_id(_handle: &MonitorHandle) -> Option<u32> {
    None
}

/// Pick the first screen whose native id equals `display_id`.
pub fn find_screen(screens: &[ScreenInfo], display_id: u32) -> Result<&ScreenInfo, FlashError> {
    for (i, screen) in screens.iter().enumerate() {
        log::debug!(
            "  [{}] {} id={:?} {}x{} at ({}, {})",
            i,
            screen.name.as_deref().unwrap_or("<unnamed>"),
            screen.native_id,
            screen.frame.width,
            screen.frame.height,
            screen.frame.x,
            screen.frame.y,
        );
    }

    screens
        .iter()
        .find(|screen| screen.native_id == Some(display_id))
        .ok_or(FlashError::ScreenNotFound)
}
