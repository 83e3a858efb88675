pub mod console;

pub use console::run_console;
pub use console::run_demo;
