use crate::models::{
    AllocationOutcome, CpuPolicy, DiskPolicy, DiskSchedulingResult, FragmentationReport,
    MemoryBlock, SchedulingResult,
};
use crate::log;
use std::cmp::Ordering;

// 통계 계산을 위한 헬퍼 구조체
#[derive(Default)]
pub struct MetricStats {
    values: Vec<f64>,
    sum: f64,
    min: f64,
    max: f64,
}

impl MetricStats {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            sum: 0.0,
            min: f64::MAX,
            max: 0.0,
        }
    }

    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut stats = Self::new();
        for value in values {
            stats.add(value);
        }
        stats
    }

    pub fn add(&mut self, value: f64) {
        self.values.push(value);
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.min
        }
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn avg(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.sum / self.values.len() as f64
        }
    }

    pub fn median(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }

        let sorted = self.sorted();
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }

    pub fn std_dev(&self) -> f64 {
        if self.values.len() <= 1 {
            return 0.0;
        }
        let avg = self.avg();
        let variance = self
            .values
            .iter()
            .map(|&v| {
                let diff = avg - v;
                diff * diff
            })
            .sum::<f64>()
            / (self.values.len() - 1) as f64;
        variance.sqrt()
    }

    pub fn percentile(&self, p: f64) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let sorted = self.sorted();
        let idx = (p / 100.0 * (sorted.len() - 1) as f64).round() as usize;
        sorted[idx]
    }

    fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        sorted
    }
}

fn print_metric_row(name: &str, stats: &MetricStats) {
    log!(
        "{:<12} | {:>8.2} | {:>8.2} | {:>8.2} | {:>8.2} | {:>8.2} | {:>8.2}",
        name,
        stats.avg(),
        stats.min(),
        stats.median(),
        stats.max(),
        stats.std_dev(),
        stats.percentile(90.0)
    );
}

pub fn print_cpu_statistics(policy: CpuPolicy, result: &SchedulingResult) {
    log!("\n=== CPU Scheduling: {} ===", policy.display_name());

    log!(
        "{:<8} | {:>7} | {:>5} | {:>8} | {:>5} | {:>10} | {:>7} | {:>10} | {:>8}",
        "Process", "Arrival", "Burst", "Priority", "Start", "Completion", "Waiting", "Turnaround", "Response"
    );
    for p in &result.processes {
        log!(
            "{:<8} | {:>7} | {:>5} | {:>8} | {:>5} | {:>10} | {:>7} | {:>10} | {:>8}",
            p.process.id,
            p.process.arrival_time,
            p.process.burst_time,
            p.process.priority,
            p.metrics.start_time,
            p.metrics.completion_time,
            p.metrics.waiting_time,
            p.metrics.turnaround_time,
            p.metrics.response_time
        );
    }

    // Gantt 차트 텍스트 표현
    log!("\nTimeline:");
    let segments: Vec<String> = result
        .timeline
        .iter()
        .map(|b| format!("[{} {}-{}]", b.occupant.label(), b.start, b.end))
        .collect();
    log!("  {}", segments.join(" "));

    log!("\nSummary:");
    log!("  Makespan: {}", result.makespan());
    log!("  Idle time: {}", result.idle_time());
    log!("  Context switches: {}", result.context_switches());
    log!("  Average waiting time: {:.2}", result.average_waiting_time);
    log!("  Average turnaround time: {:.2}", result.average_turnaround_time);
    log!("  Average response time: {:.2}", result.average_response_time);
    log!("  CPU utilization: {:.2}%", result.cpu_utilization * 100.0);

    if result.processes.len() > 1 {
        log!(
            "\n{:<12} | {:>8} | {:>8} | {:>8} | {:>8} | {:>8} | {:>8}",
            "Metric", "avg", "min", "median", "max", "std", "p90"
        );
        let waiting = MetricStats::from_values(result.processes.iter().map(|p| p.metrics.waiting_time as f64));
        let turnaround =
            MetricStats::from_values(result.processes.iter().map(|p| p.metrics.turnaround_time as f64));
        let response = MetricStats::from_values(result.processes.iter().map(|p| p.metrics.response_time as f64));
        print_metric_row("waiting", &waiting);
        print_metric_row("turnaround", &turnaround);
        print_metric_row("response", &response);
    }
}

/// 정책별 비교 표 (같은 워크로드)
pub fn print_comparison(results: &[(CpuPolicy, SchedulingResult)]) {
    log!("\n=== CPU Scheduling Comparison ===");
    log!(
        "{:<28} | {:>8} | {:>10} | {:>8} | {:>8} | {:>8} | {:>8}",
        "Policy", "Waiting", "Turnaround", "Response", "Util(%)", "Makespan", "Switches"
    );
    for (policy, result) in results {
        log!(
            "{:<28} | {:>8.2} | {:>10.2} | {:>8.2} | {:>8.2} | {:>8} | {:>8}",
            policy.display_name(),
            result.average_waiting_time,
            result.average_turnaround_time,
            result.average_response_time,
            result.cpu_utilization * 100.0,
            result.makespan(),
            result.context_switches()
        );
    }

    // 평균 대기 시간이 가장 짧은 정책
    let best = results.iter().min_by(|a, b| {
        a.1.average_waiting_time
            .partial_cmp(&b.1.average_waiting_time)
            .unwrap_or(Ordering::Equal)
    });
    if let Some((policy, result)) = best {
        log!(
            "\nLowest average waiting time: {} ({:.2})",
            policy.display_name(),
            result.average_waiting_time
        );
    }
}

pub fn print_memory_outcome(outcome: &AllocationOutcome) {
    if outcome.success {
        log!("  OK   {}", outcome.message);
    } else {
        log!("  FAIL {}", outcome.message);
    }
}

pub fn print_memory_statistics(blocks: &[MemoryBlock], report: &FragmentationReport) {
    log!("\n=== Memory Blocks ===");
    log!(
        "{:<6} | {:>8} | {:<12} | {:>8} | {:>9}",
        "Block", "Size(KB)", "Process", "Used(KB)", "Internal"
    );
    for block in blocks {
        match &block.tenant {
            Some(tenant) => log!(
                "{:<6} | {:>8} | {:<12} | {:>8} | {:>9}",
                block.id,
                block.size,
                tenant.name,
                tenant.size,
                block.size - tenant.size
            ),
            None => log!(
                "{:<6} | {:>8} | {:<12} | {:>8} | {:>9}",
                block.id, block.size, "-", "-", "-"
            ),
        }
    }

    log!("\nFragmentation:");
    log!("  Total capacity: {}KB", report.total_capacity);
    log!("  Allocated: {}KB", report.total_allocated_memory);
    log!("  Free: {}KB", report.total_free_memory);
    log!("  Internal fragmentation: {}KB", report.internal_fragmentation);
    log!("  External fragmentation: {}KB", report.external_fragmentation);
    log!("  Utilization: {:.2}%", report.utilization_percentage);
}

pub fn print_disk_statistics(policy: DiskPolicy, head: u64, result: &DiskSchedulingResult) {
    log!("\n=== Disk Scheduling: {} ===", policy.display_name());
    log!("Initial head position: {}", head);

    if result.is_empty() {
        log!("{}", result.message());
        return;
    }

    let path: Vec<String> = result.sequence.iter().map(|c| c.to_string()).collect();
    log!("Sequence: {}", path.join(" -> "));

    log!("\n{:<5} | {:>6} | {:>6} | {:>6} | {:>8}", "Step", "From", "To", "Seek", "Request");
    for (step, op) in result.seek_operations.iter().enumerate() {
        let request = op
            .request
            .map(|id| id.to_string())
            .unwrap_or_else(|| "edge".to_string());
        log!(
            "{:<5} | {:>6} | {:>6} | {:>6} | {:>8}",
            step + 1,
            op.from,
            op.to,
            op.seek,
            request
        );
    }

    let seeks = MetricStats::from_values(result.seek_operations.iter().map(|op| op.seek as f64));
    log!("\nSummary:");
    log!("  Requests served: {}", result.served_requests());
    log!("  Total seek time: {}", result.total_seek_time);
    log!("  Average seek per request: {:.2}", result.average_seek_time());
    log!("  Longest single seek: {:.0}", seeks.max());
    log!("  Seek std deviation: {:.2}", seeks.std_dev());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_stats() {
        let stats = MetricStats::from_values([4.0, 1.0, 3.0, 2.0]);
        assert_eq!(stats.len(), 4);
        assert_eq!(stats.avg(), 2.5);
        assert_eq!(stats.median(), 2.5);
        assert_eq!(stats.min(), 1.0);
        assert_eq!(stats.max(), 4.0);
        assert_eq!(stats.percentile(100.0), 4.0);
        assert!((stats.std_dev() - 1.290_994).abs() < 1e-6);
    }

    #[test]
    fn test_metric_stats_empty() {
        let stats = MetricStats::new();
        assert!(stats.is_empty());
        assert_eq!(stats.avg(), 0.0);
        assert_eq!(stats.min(), 0.0);
        assert_eq!(stats.median(), 0.0);
        assert_eq!(stats.percentile(90.0), 0.0);
    }
}
