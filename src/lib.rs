pub mod error;
pub mod models;
pub mod output;
pub mod processors;
pub mod utils;

// 주요 기능 재내보내기(re-exporting)
pub use error::WorkloadError;
pub use models::{
    AllocationPolicy, CpuPolicy, DiskPolicy, DiskSchedulingResult, HeadDirection, MemoryBlock,
    Process, SchedulingResult,
};
pub use processors::{cpu, disk, files, memory};
