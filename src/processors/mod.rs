pub mod cpu;
pub mod disk;
pub mod files;
pub mod memory;

pub use files::{FileDirectory, FileOutcome};
