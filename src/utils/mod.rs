pub mod color;
pub mod config;
pub mod constants;
pub mod logger;
pub mod workload;

pub use self::config::RunConfig;
pub use self::logger::Logger;
pub use self::workload::{
    load_workload, parse_cylinder_list, parse_memory_command, parse_process_list,
    parse_size_list, random_cylinders, random_processes, MemoryCommand, Workload,
};
