use winit::dpi::{LogicalPosition, LogicalSize, PhysicalPosition, PhysicalSize};

/// Snapshot of a live monitor taken from the event loop.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenInfo {
    /// Numeric display id reported by the OS (`CGDirectDisplayID` on macOS).
    /// `None` on platforms that do not expose one.
    pub native_id: Option<u32>,
    /// Human readable name, if the platform provides one.
    pub name: Option<String>,
    /// Full frame of the monitor in logical points.
    pub frame: Frame,
}

/// Position and size of a monitor in virtual-screen space, in logical points.
///
/// Points stay valid across monitors with different scale factors; physical
/// pixels only make sense relative to the monitor they came from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    /// X coordinate of the top-left corner.
    pub x: f64,
    /// Y coordinate of the top-left corner.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Convert a monitor's physical geometry using that monitor's own scale factor.
    pub fn from_physical(
        position: PhysicalPosition<i32>,
        size: PhysicalSize<u32>,
        scale_factor: f64,
    ) -> Self {
        let position: LogicalPosition<f64> = position.to_logical(scale_factor);
        let size: LogicalSize<f64> = size.to_logical(scale_factor);
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn position(&self) -> LogicalPosition<f64> {
        LogicalPosition::new(self.x, self.y)
    }

    pub fn size(&self) -> LogicalSize<f64> {
        LogicalSize::new(self.width, self.height)
    }
}
