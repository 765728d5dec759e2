use crate::models::{DiskSchedulingResult, MemoryBlock, SchedulingResult};
use csv::Writer;
use std::error::Error;
use std::fs::File;

/// CSV export for a CPU schedule: per-process metrics and the timeline
pub fn save_schedule_to_csv(result: &SchedulingResult, output_prefix: &str) -> Result<(), Box<dyn Error>> {
    let filename = format!("{}_processes.csv", output_prefix);
    let file = File::create(&filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "id",
        "arrival_time",
        "burst_time",
        "priority",
        "start_time",
        "completion_time",
        "waiting_time",
        "turnaround_time",
        "response_time",
    ])?;

    for p in &result.processes {
        writer.write_record(&[
            p.process.id.clone(),
            p.process.arrival_time.to_string(),
            p.process.burst_time.to_string(),
            p.process.priority.to_string(),
            p.metrics.start_time.to_string(),
            p.metrics.completion_time.to_string(),
            p.metrics.waiting_time.to_string(),
            p.metrics.turnaround_time.to_string(),
            p.metrics.response_time.to_string(),
        ])?;
    }
    writer.flush()?;

    let filename = format!("{}_timeline.csv", output_prefix);
    let file = File::create(&filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["occupant", "start", "end", "duration", "color"])?;
    for block in &result.timeline {
        writer.write_record(&[
            block.occupant.label().to_string(),
            block.start.to_string(),
            block.end.to_string(),
            block.duration().to_string(),
            block.color().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// CSV export for the memory block table
pub fn save_memory_to_csv(blocks: &[MemoryBlock], output_prefix: &str) -> Result<(), Box<dyn Error>> {
    let filename = format!("{}_memory.csv", output_prefix);
    let file = File::create(&filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["block_id", "size", "process", "process_size", "internal_fragmentation"])?;

    for block in blocks {
        // 빈 블록은 빈 칸
        let (name, size) = match &block.tenant {
            Some(t) => (t.name.clone(), t.size.to_string()),
            None => (String::new(), String::new()),
        };
        writer.write_record(&[
            block.id.to_string(),
            block.size.to_string(),
            name,
            size,
            block
                .internal_fragmentation()
                .map(|v| v.to_string())
                .unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// CSV export for disk seek operations
pub fn save_disk_to_csv(result: &DiskSchedulingResult, output_prefix: &str) -> Result<(), Box<dyn Error>> {
    let filename = format!("{}_seeks.csv", output_prefix);
    let file = File::create(&filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["step", "from", "to", "seek", "request", "cumulative_seek"])?;

    let mut cumulative = 0u64;
    for (step, op) in result.seek_operations.iter().enumerate() {
        cumulative += op.seek;
        writer.write_record(&[
            (step + 1).to_string(),
            op.from.to_string(),
            op.to.to_string(),
            op.seek.to_string(),
            op.request.map(|id| id.to_string()).unwrap_or_default(),
            cumulative.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CpuPolicy, DiskPolicy, HeadDirection, Process};
    use crate::processors::{cpu, disk, memory};
    use std::fs;

    fn temp_prefix(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("ossim_csv_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join("run").to_string_lossy().into_owned()
    }

    #[test]
    fn test_save_schedule_to_csv() {
        let processes = vec![Process::new("P1", 0, 3, 0), Process::new("P2", 5, 2, 0)];
        let result = cpu::schedule(&processes, CpuPolicy::Fcfs).unwrap();
        let prefix = temp_prefix("cpu");

        save_schedule_to_csv(&result, &prefix).unwrap();

        let timeline = fs::read_to_string(format!("{prefix}_timeline.csv")).unwrap();
        let lines: Vec<&str> = timeline.lines().collect();
        assert_eq!(lines[0], "occupant,start,end,duration,color");
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("IDLE,3,5,2,"));

        let rows = fs::read_to_string(format!("{prefix}_processes.csv")).unwrap();
        assert_eq!(rows.lines().count(), 3);
    }

    #[test]
    fn test_save_memory_and_disk_to_csv() {
        let blocks = memory::create_blocks(&[100, 200]);
        let outcome = memory::allocate(&blocks, "A", 150, crate::models::AllocationPolicy::FirstFit);
        let prefix = temp_prefix("mem");

        save_memory_to_csv(&outcome.blocks, &prefix).unwrap();
        let table = fs::read_to_string(format!("{prefix}_memory.csv")).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[1], "0,100,,,");
        assert_eq!(lines[2], "1,200,A,150,50");

        let requests = disk::requests_from_cylinders(&[60, 10]);
        let result = disk::schedule(&requests, 50, DiskPolicy::Scan, 99, HeadDirection::Right).unwrap();
        save_disk_to_csv(&result, &prefix).unwrap();
        let seeks = fs::read_to_string(format!("{prefix}_seeks.csv")).unwrap();
        let lines: Vec<&str> = seeks.lines().collect();
        assert_eq!(lines[2], "2,60,99,39,,49");
        assert_eq!(lines[3], "3,99,10,89,1,138");
    }
}
