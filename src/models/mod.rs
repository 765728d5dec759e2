mod disk_request;
mod execution_block;
mod file_item;
mod memory_block;
mod policy;
mod process;
mod scheduling_result;

pub use disk_request::{Cylinder, DiskRequest, DiskSchedulingResult, SeekOperation};
pub use execution_block::{ExecutionBlock, Occupant};
pub use file_item::{FileId, FileItem, FileKind};
pub use memory_block::{AllocationOutcome, BlockId, FragmentationReport, MemoryBlock, Tenant};
pub use policy::{AllocationPolicy, CpuPolicy, DiskPolicy, HeadDirection};
pub use process::{Process, ProcessMetrics, ScheduledProcess, Ticks};
pub use scheduling_result::SchedulingResult;
