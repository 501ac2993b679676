pub mod timer_worker;
pub mod virtual_device;
pub mod window_directory;

pub use timer_worker::TimerWorker;
pub use virtual_device::{KeystrokeInjector, VirtualDevice};
pub use window_directory::{WindowBackend, WindowDirectory};
