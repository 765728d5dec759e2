pub mod charts;
mod csv;
mod json;
pub mod replay;
mod statistics;

pub use self::csv::{save_disk_to_csv, save_memory_to_csv, save_schedule_to_csv};
pub use charts::{create_gantt_chart, create_head_movement_chart, PlottersConfig};
pub use json::save_json;
pub use replay::{SeekReplay, SeekStep};
pub use statistics::{
    print_comparison, print_cpu_statistics, print_disk_statistics, print_memory_outcome,
    print_memory_statistics, MetricStats,
};
