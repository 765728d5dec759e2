use super::execution_block::ExecutionBlock;
use super::process::{ScheduledProcess, Ticks};
use serde::{Deserialize, Serialize};

/// CPU 스케줄링 1회 실행 결과 (불변)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SchedulingResult {
    pub timeline: Vec<ExecutionBlock>,
    pub processes: Vec<ScheduledProcess>,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
    pub cpu_utilization: f64, // 1 - idle / makespan
}

impl SchedulingResult {
    pub fn makespan(&self) -> Ticks {
        self.timeline.last().map(|b| b.end).unwrap_or(0)
    }

    pub fn idle_time(&self) -> Ticks {
        self.timeline
            .iter()
            .filter(|b| b.occupant.is_idle())
            .map(|b| b.duration())
            .sum()
    }

    /// 특정 프로세스의 총 실행 시간 (모든 구간 합)
    pub fn service_time(&self, process_id: &str) -> Ticks {
        self.timeline
            .iter()
            .filter(|b| b.occupant.label() == process_id && !b.occupant.is_idle())
            .map(|b| b.duration())
            .sum()
    }

    /// 구간 간 전환 횟수 (idle 포함)
    pub fn context_switches(&self) -> usize {
        self.timeline.len().saturating_sub(1)
    }

    pub fn process(&self, process_id: &str) -> Option<&ScheduledProcess> {
        self.processes.iter().find(|p| p.process.id == process_id)
    }
}
