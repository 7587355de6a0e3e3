pub mod log;
pub mod memory;
