mod config;
mod error;
mod monitor;
mod overlay;

use anyhow::Result;
use winit::event_loop::EventLoop;

use crate::config::FlashSettings;
use crate::monitor::{SystemProfiler, resolve_display_id};
use crate::overlay::FlashController;

fn main() -> Result<()> {
    // Quiet by default: a successful flash prints nothing.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    let settings = FlashSettings::from_env();
    log::info!("Target display: '{}'", settings.target_name);

    // Resolve the name before touching the window server.
    let display_id = match resolve_display_id(&settings.target_name, &SystemProfiler) {
        Ok(id) => id,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    let event_loop = build_event_loop()?;
    let mut controller = FlashController::new(display_id, settings.duration);
    event_loop.run_app(&mut controller)?;

    if let Err(e) = controller.into_outcome() {
        println!("{}", e);
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn build_event_loop() -> Result<EventLoop<()>> {
    use winit::platform::macos::{ActivationPolicy, EventLoopBuilderExtMacOS};

    // No Dock icon or menu bar for a half-second window.
    let event_loop = EventLoop::builder()
        .with_activation_policy(ActivationPolicy::Accessory)
        .with_default_menu(false)
        .build()?;
    Ok(event_loop)
}

#[cfg(not(target_os = "macos"))]
fn build_event_loop() -> Result<EventLoop<()>> {
    Ok(EventLoop::new()?)
}
