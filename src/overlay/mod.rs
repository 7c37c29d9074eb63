pub mod config;
pub mod flash;
pub mod window;

pub use flash::FlashController;
