use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use crate::error::FlashError;
use crate::monitor::{ScreenInfo, enumerate_screens, find_screen};
use crate::overlay::config::{FlashConfig, FlashPhase};
use crate::overlay::window::create_flash_window;

/// What the event loop handler has to do next.
#[derive(Clone, Debug, PartialEq)]
pub enum FlashAction {
    /// Create the flash window with this config.
    Show(FlashConfig),
    /// The screen is missing; stop without a window.
    Fail(FlashError),
    /// Drop the window and stop.
    Close,
    /// Nothing to do yet.
    Wait,
}

/// Event loop handler that maps a display id to a live screen and flashes it.
///
/// At most one window is ever created. Every path ends with
/// [`ActiveEventLoop::exit`], whether the flash ran or the screen was missing.
pub struct FlashController {
    display_id: u32,
    duration: Duration,
    phase: FlashPhase,
    window: Option<Window>,
    outcome: Result<(), FlashError>,
}

impl FlashController {
    pub fn new(display_id: u32, duration: Duration) -> Self {
        Self {
            display_id,
            duration,
            phase: FlashPhase::NotShown,
            window: None,
            outcome: Ok(()),
        }
    }

    /// Result of the run, available once the event loop has returned.
    pub fn into_outcome(self) -> Result<(), FlashError> {
        self.outcome
    }

    /// Decide what to do with the screens visible on resume.
    fn on_resumed(&mut self, screens: &[ScreenInfo]) -> FlashAction {
        if self.phase != FlashPhase::NotShown {
            return FlashAction::Wait;
        }

        match find_screen(screens, self.display_id) {
            Ok(screen) => FlashAction::Show(FlashConfig::for_screen(screen, self.duration)),
            Err(e) => {
                self.outcome = Err(e.clone());
                self.phase = FlashPhase::Closed;
                FlashAction::Fail(e)
            }
        }
    }

    /// The window is up; start the close timer.
    fn on_shown(&mut self, now: Instant) -> Option<Instant> {
        self.phase = FlashPhase::shown_at(now, self.duration);
        self.phase.deadline()
    }

    /// Window creation failed; there is nothing left to flash.
    fn on_show_failed(&mut self, err: &anyhow::Error) {
        log::error!("{:#}", err);
        self.phase = FlashPhase::Closed;
    }

    fn on_wake(&self, now: Instant) -> FlashAction {
        // Other wakeups may arrive before the deadline; only the timer closes.
        if self.phase.is_due(now) {
            FlashAction::Close
        } else {
            FlashAction::Wait
        }
    }

    fn on_window_event(&self, event: &WindowEvent) -> FlashAction {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => FlashAction::Close,
            _ => FlashAction::Wait,
        }
    }

    /// Drop the window, if any.
    fn close(&mut self) {
        if self.window.take().is_some() {
            log::info!("Flash window closed");
        }
        self.phase = FlashPhase::Closed;
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, action: FlashAction) {
        match action {
            FlashAction::Show(config) => match create_flash_window(event_loop, &config) {
                Ok(window) => {
                    self.window = Some(window);
                    if let Some(deadline) = self.on_shown(Instant::now()) {
                        event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
                    }
                    log::info!(
                        "Flashing display {} ({}x{} at ({}, {}))",
                        self.display_id,
                        config.frame.width,
                        config.frame.height,
                        config.frame.x,
                        config.frame.y,
                    );
                }
                Err(e) => {
                    self.on_show_failed(&e);
                    event_loop.exit();
                }
            },
            FlashAction::Fail(_) | FlashAction::Close => {
                self.close();
                event_loop.exit();
            }
            FlashAction::Wait => {}
        }
    }
}

impl ApplicationHandler for FlashController {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, _cause: StartCause) {
        let action = self.on_wake(Instant::now());
        self.apply(event_loop, action);
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.phase != FlashPhase::NotShown {
            return;
        }
        let screens = enumerate_screens(event_loop);
        log::debug!("Found {} screen(s)", screens.len());
        let action = self.on_resumed(&screens);
        self.apply(event_loop, action);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let action = self.on_window_event(&event);
        self.apply(event_loop, action);
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::monitor::Frame;

    const EINK_ID: u32 = 724042646;

    fn screens() -> Vec<ScreenInfo> {
        vec![
            ScreenInfo {
                native_id: Some(1),
                name: Some("Built-in Retina Display".into()),
                frame: Frame {
                    x: 0.0,
                    y: 0.0,
                    width: 1512.0,
                    height: 982.0,
                },
            },
            ScreenInfo {
                native_id: Some(EINK_ID),
                name: Some("EINK".into()),
                frame: Frame {
                    x: 1512.0,
                    y: 0.0,
                    width: 1872.0,
                    height: 1404.0,
                },
            },
        ]
    }

    fn controller() -> FlashController {
        FlashController::new(EINK_ID, Duration::from_millis(500))
    }

    #[test_log::test]
    fn starts_not_shown_and_successful() {
        let controller = controller();
        assert_eq!(controller.phase, FlashPhase::NotShown);
        assert!(controller.window.is_none());
        assert_eq!(controller.into_outcome(), Ok(()));
    }

    #[test_log::test]
    fn matched_screen_is_shown_with_its_frame() {
        let mut controller = controller();
        let screens = screens();

        let action = controller.on_resumed(&screens);
        assert_eq!(
            action,
            FlashAction::Show(FlashConfig {
                frame: screens[1].frame,
                duration: Duration::from_millis(500),
            })
        );
        assert_eq!(controller.into_outcome(), Ok(()));
    }

    #[test_log::test]
    fn missing_screen_fails_without_window() {
        let mut controller = FlashController::new(99, Duration::from_millis(500));

        let action = controller.on_resumed(&screens());
        assert_eq!(action, FlashAction::Fail(FlashError::ScreenNotFound));
        assert_eq!(controller.phase, FlashPhase::Closed);
        assert!(controller.window.is_none());
        assert_eq!(controller.into_outcome(), Err(FlashError::ScreenNotFound));
    }

    #[test_log::test]
    fn second_resume_does_not_show_again() {
        let mut controller = controller();
        let screens = screens();

        assert!(matches!(controller.on_resumed(&screens), FlashAction::Show(_)));
        controller.on_shown(Instant::now());
        assert_eq!(controller.on_resumed(&screens), FlashAction::Wait);

        let mut failed = FlashController::new(99, Duration::from_millis(500));
        failed.on_resumed(&screens);
        assert_eq!(failed.on_resumed(&screens), FlashAction::Wait);
    }

    #[test_log::test]
    fn failed_window_creation_ends_the_run() {
        let mut controller = controller();
        assert!(matches!(controller.on_resumed(&screens()), FlashAction::Show(_)));

        controller.on_show_failed(&anyhow!("failed to style flash window"));
        assert_eq!(controller.phase, FlashPhase::Closed);
        assert_eq!(controller.on_resumed(&screens()), FlashAction::Wait);
        assert_eq!(controller.on_wake(Instant::now() + Duration::from_secs(5)), FlashAction::Wait);
    }

    #[test_log::test]
    fn closes_once_deadline_is_reached() {
        let mut controller = controller();
        let start = Instant::now();

        assert_eq!(controller.on_wake(start), FlashAction::Wait);
        let deadline = controller.on_shown(start);
        assert_eq!(deadline, Some(start + Duration::from_millis(500)));

        assert_eq!(controller.on_wake(start + Duration::from_millis(100)), FlashAction::Wait);
        assert_eq!(controller.on_wake(start + Duration::from_millis(500)), FlashAction::Close);

        controller.close();
        assert_eq!(controller.phase, FlashPhase::Closed);
        assert!(controller.window.is_none());
        assert_eq!(controller.on_wake(start + Duration::from_secs(1)), FlashAction::Wait);
    }

    #[test_log::test]
    fn close_request_closes_early() {
        let mut controller = controller();
        controller.on_shown(Instant::now());

        assert_eq!(
            controller.on_window_event(&WindowEvent::CloseRequested),
            FlashAction::Close
        );
        assert_eq!(controller.on_window_event(&WindowEvent::Destroyed), FlashAction::Close);

        controller.close();
        assert_eq!(controller.phase, FlashPhase::Closed);
        assert!(controller.window.is_none());
    }

    #[test_log::test]
    fn redraws_need_no_action() {
        let controller = controller();
        assert_eq!(
            controller.on_window_event(&WindowEvent::RedrawRequested),
            FlashAction::Wait
        );
        assert_eq!(
            controller.on_window_event(&WindowEvent::Focused(false)),
            FlashAction::Wait
        );
    }
}
