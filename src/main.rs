use ossim::models::{
    AllocationPolicy, CpuPolicy, DiskPolicy, FileKind, HeadDirection, Process, Ticks,
};
use ossim::output::{
    create_gantt_chart, create_head_movement_chart, print_comparison, print_cpu_statistics,
    print_disk_statistics, print_memory_outcome, print_memory_statistics, save_disk_to_csv,
    save_json, save_memory_to_csv, save_schedule_to_csv, PlottersConfig, SeekReplay,
};
use ossim::processors::files::format_size;
use ossim::processors::{cpu, disk, memory, FileDirectory};
use ossim::utils::constants::{
    DEFAULT_BLOCK_SIZES, DEFAULT_HEAD_POSITION, DEFAULT_MAX_CYLINDER, DEFAULT_QUANTUM,
};
use ossim::utils::{
    load_workload, parse_cylinder_list, parse_memory_command, parse_process_list,
    parse_size_list, random_cylinders, random_processes, Logger, MemoryCommand, RunConfig,
};
use ossim::{log, log_error};
use std::env;
use std::error::Error;
use std::io;
use std::thread;
use std::time::Instant;

// 무작위 워크로드 생성 범위
const RANDOM_MAX_ARRIVAL: Ticks = 10;
const RANDOM_MAX_BURST: Ticks = 10;
const DEFAULT_SEED: u64 = 42;

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {} cpu [options]     - Simulate CPU scheduling", program);
    eprintln!("  {} memory [options]  - Simulate fixed-partition memory allocation", program);
    eprintln!("  {} disk [options]    - Simulate disk head scheduling", program);
    eprintln!("  {} files [options]   - Manage an in-memory file directory", program);
    eprintln!("\nCPU options:");
    eprintln!("  --policy <p>        - fcfs, sjf-np, sjf-p, priority-np, priority-p, rr[:quantum] (default: fcfs)");
    eprintln!("  --quantum <n>       - Round robin time quantum (default: {})", DEFAULT_QUANTUM);
    eprintln!("  --processes <list>  - id:arrival:burst[:priority],... Example: P1:0:5:2,P2:1:3");
    eprintln!("  --compare           - Run every policy on the same workload");
    eprintln!("\nMemory options:");
    eprintln!("  --policy <p>        - first-fit, best-fit, worst-fit (default: first-fit)");
    eprintln!("  --blocks <sizes>    - Partition sizes in KB (default: 500,300,200,400,600,250,350)");
    eprintln!("  --op <command>      - alloc:<name>:<size>, free:<name>, add:<size> (repeatable)");
    eprintln!("\nDisk options:");
    eprintln!("  --policy <p>        - fcfs, sstf, scan, look (default: fcfs)");
    eprintln!("  --head <n>          - Initial head position (default: {})", DEFAULT_HEAD_POSITION);
    eprintln!("  --max <n>           - Last cylinder number (default: {})", DEFAULT_MAX_CYLINDER);
    eprintln!("  --direction <d>     - left or right, for scan/look (default: right)");
    eprintln!("  --requests <list>   - Cylinder numbers. Example: 98,183,37,122");
    eprintln!("\nFile options:");
    eprintln!("  --create <spec>     - name[:kind[:content]], kind is text, binary or image (repeatable)");
    eprintln!("  --delete <name>     - Delete a file by name (repeatable)");
    eprintln!("  --search <query>    - List files whose name contains the query");
    eprintln!("  --empty             - Start without the sample files");
    eprintln!("\nWorkload options (cpu, memory, disk):");
    eprintln!("  --workload <file>   - JSON workload with processes, block_sizes, cylinders");
    eprintln!("  --random <n>        - Generate n random processes or requests");
    eprintln!("  --seed <n>          - Seed for --random (default: {})", DEFAULT_SEED);
    eprintln!("\nCommon options:");
    eprintln!("  -o <prefix>         - Output prefix for exported files and the result log");
    eprintln!("  --csv               - Export results to CSV");
    eprintln!("  --json              - Export results to JSON");
    eprintln!("  --chart             - Export PNG charts");
    eprintln!("  --step <ms>         - Replay disk head movement step by step with a delay");
}

fn option_value(args: &[String], i: usize) -> Result<&str, String> {
    args.get(i + 1)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{} option requires a value", args[i]))
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize) -> Result<T, String> {
    let value = option_value(args, i)?;
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid value for {}: {}", args[i], value))
}

// -o 가 지정된 경우에만 결과 로그 파일을 연다
fn init_logger(config: &RunConfig) {
    if let Some(prefix) = &config.output_prefix {
        Logger::init(prefix);
    }
}

fn run_cpu(args: &[String]) -> Result<(), Box<dyn Error>> {
    let mut config = RunConfig::default();
    let mut policy = CpuPolicy::Fcfs;
    let mut quantum: Option<Ticks> = None;
    let mut processes: Option<Vec<Process>> = None;
    let mut random_count: Option<usize> = None;
    let mut seed = DEFAULT_SEED;
    let mut compare = false;

    let mut i = 0;
    while i < args.len() {
        if let Some(consumed) = config.consume_option(args, i)? {
            i += consumed;
            continue;
        }
        match args[i].as_str() {
            "--policy" | "-p" => {
                policy = option_value(args, i)?.parse::<CpuPolicy>()?;
                i += 2;
            }
            "--quantum" | "-q" => {
                quantum = Some(parse_number(args, i)?);
                i += 2;
            }
            "--processes" => {
                processes = Some(parse_process_list(option_value(args, i)?)?);
                i += 2;
            }
            "--workload" | "-w" => {
                processes = Some(load_workload(option_value(args, i)?)?.processes);
                i += 2;
            }
            "--random" => {
                random_count = Some(parse_number(args, i)?);
                i += 2;
            }
            "--seed" => {
                seed = parse_number(args, i)?;
                i += 2;
            }
            "--compare" => {
                compare = true;
                i += 1;
            }
            other => return Err(format!("Unknown cpu option: {}", other).into()),
        }
    }

    init_logger(&config);

    let processes = match (processes, random_count) {
        (Some(list), _) => list,
        (None, Some(count)) => {
            log!("Generated {} random processes (seed {})", count, seed);
            random_processes(count, seed, RANDOM_MAX_ARRIVAL, RANDOM_MAX_BURST)
        }
        (None, None) => return Err("No processes given (use --processes, --workload or --random)".into()),
    };

    // --quantum 은 round robin 에만 적용
    if let (CpuPolicy::RoundRobin { .. }, Some(q)) = (policy, quantum) {
        policy = CpuPolicy::RoundRobin { quantum: q };
    }

    let started = Instant::now();
    let runs = if compare {
        cpu::compare(&processes, quantum.unwrap_or(DEFAULT_QUANTUM))?
    } else {
        vec![(policy, cpu::schedule(&processes, policy)?)]
    };
    let elapsed = started.elapsed();

    for (policy, result) in &runs {
        print_cpu_statistics(*policy, result);
    }
    if compare {
        print_comparison(&runs);
    }
    log!("\nScheduling took {:.3} ms", elapsed.as_secs_f64() * 1000.0);

    if !config.wants_files() {
        return Ok(());
    }

    let prefix = config.prefix_or("cpu");
    let chart_config = PlottersConfig::default();
    for (policy, result) in &runs {
        // 비교 모드에서는 정책 이름을 접두사에 붙인다
        let run_prefix = if compare {
            format!("{}_{}", prefix, policy.to_string().replace(':', "_q"))
        } else {
            prefix.clone()
        };

        if config.export_csv {
            match save_schedule_to_csv(result, &run_prefix) {
                Ok(_) => log!("CSV written with prefix '{}'", run_prefix),
                Err(e) => log_error!("Error writing CSV: {}", e),
            }
        }
        if config.export_json {
            match save_json(result, &run_prefix, "schedule") {
                Ok(path) => log!("JSON written to '{}'", path),
                Err(e) => log_error!("Error writing JSON: {}", e),
            }
        }
        if config.export_chart {
            match create_gantt_chart(result, policy.display_name(), &run_prefix, &chart_config) {
                Ok(path) => log!("Gantt chart saved to '{}'", path),
                Err(e) => log_error!("Error generating Gantt chart: {}", e),
            }
        }
    }

    Ok(())
}

fn run_memory(args: &[String]) -> Result<(), Box<dyn Error>> {
    let mut config = RunConfig::default();
    let mut policy = AllocationPolicy::FirstFit;
    let mut block_sizes: Vec<u64> = DEFAULT_BLOCK_SIZES.to_vec();
    let mut commands: Vec<MemoryCommand> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        if let Some(consumed) = config.consume_option(args, i)? {
            i += consumed;
            continue;
        }
        match args[i].as_str() {
            "--policy" | "-p" => {
                policy = option_value(args, i)?.parse::<AllocationPolicy>()?;
                i += 2;
            }
            "--blocks" => {
                block_sizes = parse_size_list(option_value(args, i)?)?;
                i += 2;
            }
            "--workload" | "-w" => {
                let workload = load_workload(option_value(args, i)?)?;
                if !workload.block_sizes.is_empty() {
                    block_sizes = workload.block_sizes;
                }
                i += 2;
            }
            "--op" => {
                commands.push(parse_memory_command(option_value(args, i)?)?);
                i += 2;
            }
            other => return Err(format!("Unknown memory option: {}", other).into()),
        }
    }

    init_logger(&config);

    let mut blocks = memory::create_blocks(&block_sizes);
    log!("\n=== Memory Allocation: {} ===", policy);
    log!("Blocks: {:?}", block_sizes);

    for command in &commands {
        match command {
            MemoryCommand::Allocate { name, size } => {
                let outcome = memory::allocate(&blocks, name, *size, policy);
                print_memory_outcome(&outcome);
                blocks = outcome.blocks;
            }
            MemoryCommand::Deallocate { name } => {
                let outcome = memory::deallocate(&blocks, name);
                print_memory_outcome(&outcome);
                blocks = outcome.blocks;
            }
            MemoryCommand::AddBlock { size } => {
                blocks = memory::add_block(&blocks, *size);
                if let Some(block) = blocks.last() {
                    log!("  OK   Block {} ({}KB) added", block.id, size);
                }
            }
        }
    }

    let report = memory::fragmentation(&blocks);
    print_memory_statistics(&blocks, &report);

    let prefix = config.prefix_or("memory");
    if config.export_csv {
        match save_memory_to_csv(&blocks, &prefix) {
            Ok(_) => log!("CSV written with prefix '{}'", prefix),
            Err(e) => log_error!("Error writing CSV: {}", e),
        }
    }
    if config.export_json {
        match save_json(&blocks, &prefix, "blocks") {
            Ok(path) => log!("JSON written to '{}'", path),
            Err(e) => log_error!("Error writing JSON: {}", e),
        }
        match save_json(&report, &prefix, "fragmentation") {
            Ok(path) => log!("JSON written to '{}'", path),
            Err(e) => log_error!("Error writing JSON: {}", e),
        }
    }
    if config.export_chart {
        log_error!("No chart is available for memory runs");
    }

    Ok(())
}

fn run_disk(args: &[String]) -> Result<(), Box<dyn Error>> {
    let mut config = RunConfig::default();
    let mut policy = DiskPolicy::Fcfs;
    let mut head = DEFAULT_HEAD_POSITION;
    let mut max_cylinder = DEFAULT_MAX_CYLINDER;
    let mut direction = HeadDirection::default();
    let mut request_list: Option<String> = None;
    let mut cylinders: Option<Vec<u64>> = None;
    let mut random_count: Option<usize> = None;
    let mut seed = DEFAULT_SEED;

    let mut i = 0;
    while i < args.len() {
        if let Some(consumed) = config.consume_option(args, i)? {
            i += consumed;
            continue;
        }
        match args[i].as_str() {
            "--policy" | "-p" => {
                policy = option_value(args, i)?.parse::<DiskPolicy>()?;
                i += 2;
            }
            "--head" => {
                head = parse_number(args, i)?;
                i += 2;
            }
            "--max" => {
                max_cylinder = parse_number(args, i)?;
                i += 2;
            }
            "--direction" | "-d" => {
                direction = option_value(args, i)?.parse::<HeadDirection>()?;
                i += 2;
            }
            "--requests" => {
                // --max 가 뒤에 올 수 있으므로 나중에 파싱
                request_list = Some(option_value(args, i)?.to_string());
                i += 2;
            }
            "--workload" | "-w" => {
                cylinders = Some(load_workload(option_value(args, i)?)?.cylinders);
                i += 2;
            }
            "--random" => {
                random_count = Some(parse_number(args, i)?);
                i += 2;
            }
            "--seed" => {
                seed = parse_number(args, i)?;
                i += 2;
            }
            other => return Err(format!("Unknown disk option: {}", other).into()),
        }
    }

    init_logger(&config);

    let cylinders = match (request_list, cylinders, random_count) {
        (Some(list), _, _) => parse_cylinder_list(&list, max_cylinder)?,
        (None, Some(list), _) => list,
        (None, None, Some(count)) => {
            log!("Generated {} random requests (seed {})", count, seed);
            random_cylinders(count, seed, max_cylinder)
        }
        (None, None, None) => return Err("No requests given (use --requests, --workload or --random)".into()),
    };

    let requests = disk::requests_from_cylinders(&cylinders);
    let result = disk::schedule(&requests, head, policy, max_cylinder, direction)?;
    print_disk_statistics(policy, head, &result);

    if let Some(delay) = config.step_delay {
        log!("\nReplay:");
        for step in SeekReplay::new(&result) {
            thread::sleep(delay);
            log!(
                "  step {:>3}: {:>4} -> {:>4}  seek {:>4}  total {:>5}",
                step.index,
                step.operation.from,
                step.position,
                step.operation.seek,
                step.cumulative_seek
            );
        }
    }

    let prefix = config.prefix_or("disk");
    if config.export_csv {
        match save_disk_to_csv(&result, &prefix) {
            Ok(_) => log!("CSV written with prefix '{}'", prefix),
            Err(e) => log_error!("Error writing CSV: {}", e),
        }
    }
    if config.export_json {
        match save_json(&result, &prefix, "disk") {
            Ok(path) => log!("JSON written to '{}'", path),
            Err(e) => log_error!("Error writing JSON: {}", e),
        }
    }
    if config.export_chart {
        let chart_config = PlottersConfig::default();
        match create_head_movement_chart(&result, policy.display_name(), max_cylinder, &prefix, &chart_config) {
            Ok(path) => log!("Head movement chart saved to '{}'", path),
            Err(e) => log_error!("Error generating head movement chart: {}", e),
        }
    }

    Ok(())
}

fn parse_create_spec(spec: &str) -> Result<(String, FileKind, String), String> {
    let mut parts = spec.splitn(3, ':');
    let name = parts.next().unwrap_or_default().to_string();
    let kind = match parts.next() {
        Some(kind) => kind.parse::<FileKind>()?,
        None => FileKind::Text,
    };
    let content = parts.next().unwrap_or_default().to_string();
    Ok((name, kind, content))
}

fn run_files(args: &[String]) -> Result<(), Box<dyn Error>> {
    let mut config = RunConfig::default();
    let mut with_samples = true;
    let mut creates: Vec<(String, FileKind, String)> = Vec::new();
    let mut deletes: Vec<String> = Vec::new();
    let mut query: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        if let Some(consumed) = config.consume_option(args, i)? {
            i += consumed;
            continue;
        }
        match args[i].as_str() {
            "--create" => {
                creates.push(parse_create_spec(option_value(args, i)?)?);
                i += 2;
            }
            "--delete" => {
                deletes.push(option_value(args, i)?.to_string());
                i += 2;
            }
            "--search" => {
                query = Some(option_value(args, i)?.to_string());
                i += 2;
            }
            "--empty" => {
                with_samples = false;
                i += 1;
            }
            other => return Err(format!("Unknown files option: {}", other).into()),
        }
    }

    init_logger(&config);

    let mut dir = if with_samples {
        FileDirectory::with_samples()
    } else {
        FileDirectory::new()
    };

    for (name, kind, content) in &creates {
        let outcome = dir.create(name, *kind, content);
        if outcome.success {
            log!("  OK   {}", outcome.message);
        } else {
            log!("  FAIL {}", outcome.message);
        }
    }
    for name in &deletes {
        let outcome = match dir.find_by_name(name).map(|f| f.id) {
            Some(id) => dir.delete(id),
            None => {
                log!("  FAIL File \"{}\" not found", name);
                continue;
            }
        };
        log!("  OK   {}", outcome.message);
    }

    let listed = match &query {
        Some(q) => dir.search(q),
        None => dir.files().iter().collect(),
    };

    log!("\n=== Files ===");
    log!("{:<4} | {:<20} | {:<6} | {:>10} | {:<19}", "Id", "Name", "Kind", "Size", "Created");
    for file in &listed {
        log!(
            "{:<4} | {:<20} | {:<6} | {:>10} | {:<19}",
            file.id,
            file.name,
            file.kind,
            format_size(file.size),
            file.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    log!("\n{} file(s), {} total", dir.len(), format_size(dir.total_size()));

    if config.export_json {
        let prefix = config.prefix_or("files");
        match save_json(dir.files(), &prefix, "files") {
            Ok(path) => log!("JSON written to '{}'", path),
            Err(e) => log_error!("Error writing JSON: {}", e),
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    // 인자가 없으면 사용법 출력
    if args.len() <= 1 {
        eprintln!("Error: No arguments provided");
        print_usage(&args[0]);
        return Ok(());
    }

    let rest = &args[2..];
    let outcome = match args[1].as_str() {
        "cpu" => run_cpu(rest),
        "memory" | "mem" => run_memory(rest),
        "disk" => run_disk(rest),
        "files" => run_files(rest),
        "-h" | "--help" | "help" => {
            print_usage(&args[0]);
            return Ok(());
        }
        other => Err(format!("Unknown command: {}", other).into()),
    };

    if let Err(e) = outcome {
        log_error!("Error: {}", e);
        print_usage(&args[0]);
    }

    Logger::flush()
}
