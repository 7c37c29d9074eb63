use anyhow::{Context, Result};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowLevel};

use super::config::FlashConfig;

/// Title of the flash window. Never visible; shows up in accessibility tools.
pub const FLASH_WINDOW_TITLE: &str = "E-ink Flash";

/// `NSScreenSaverWindowLevel` (`kCGScreenSaverWindowLevel`).
#[cfg(target_os = "macos")]
const SCREEN_SAVER_WINDOW_LEVEL: isize = 1000;

/// Attributes for a borderless, topmost window covering `config.frame`.
///
/// The frame is in logical points, so the window lands on the right screen
/// even when that screen's scale factor differs from the main screen's.
pub fn flash_attributes(config: &FlashConfig) -> WindowAttributes {
    let attributes = Window::default_attributes()
        .with_title(FLASH_WINDOW_TITLE)
        .with_decorations(false)
        .with_resizable(false)
        .with_window_level(WindowLevel::AlwaysOnTop)
        .with_position(config.frame.position())
        .with_inner_size(config.frame.size())
        .with_active(true);

    #[cfg(target_os = "macos")]
    let attributes = {
        use winit::platform::macos::WindowAttributesExtMacOS;
        attributes.with_has_shadow(false)
    };

    attributes
}

/// Create the flash window, paint it white and bring it to the front.
///
/// A window that cannot be made white is dropped and reported as an error.
pub fn create_flash_window(event_loop: &ActiveEventLoop, config: &FlashConfig) -> Result<Window> {
    let window = event_loop
        .create_window(flash_attributes(config))
        .context("failed to create flash window")?;

    apply_native_style(&window).context("failed to style flash window")?;
    window.focus_window();

    Ok(window)
}

/// White background and screen-saver level on the underlying `NSWindow`.
#[cfg(target_os = "macos")]
fn apply_native_style(window: &Window) -> Result<()> {
    use anyhow::bail;
    use objc2_app_kit::{NSColor, NSView};
    use raw_window_handle::{HasWindowHandle, RawWindowHandle};

    let RawWindowHandle::AppKit(handle) = window.window_handle()?.as_raw() else {
        bail!("flash window is not backed by AppKit");
    };

    unsafe {
        let view: &NSView = handle.ns_view.cast::<NSView>().as_ref();
        let ns_window = view
            .window()
            .context("flash view is not attached to a window")?;
        ns_window.setBackgroundColor(Some(&NSColor::whiteColor()));
        ns_window.setLevel(SCREEN_SAVER_WINDOW_LEVEL);
    }

    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn apply_native_style(_window: &Window) -> Result<()> {
    log::debug!("No native styling for flash window on this platform");
    Ok(())
}
