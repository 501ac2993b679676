pub mod controls;
pub mod progress;
pub mod settings;
