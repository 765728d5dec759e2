use serde::{Deserialize, Serialize};

// 시뮬레이션 시간 단위 (정수 tick)
pub type Ticks = u64;

/// 스케줄러에 입력되는 프로세스 정의
///
/// 파생 값(시작/완료/대기 시간 등)은 여기에 없고, 엔진이 실행을 마친 뒤
/// [`ScheduledProcess`]로만 돌려준다.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub id: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    #[serde(default)]
    pub priority: u32, // 낮을수록 우선
}

impl Process {
    pub fn new(id: impl Into<String>, arrival_time: Ticks, burst_time: Ticks, priority: u32) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority,
        }
    }
}

/// 한 번의 스케줄링 실행으로 계산된 프로세스별 지표
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessMetrics {
    pub start_time: Ticks,      // 최초 dispatch 시각
    pub completion_time: Ticks,
    pub waiting_time: Ticks,    // turnaround - burst
    pub turnaround_time: Ticks, // completion - arrival
    pub response_time: Ticks,   // start - arrival
}

impl ProcessMetrics {
    pub fn derive(process: &Process, start_time: Ticks, completion_time: Ticks) -> Self {
        let turnaround_time = completion_time - process.arrival_time;
        Self {
            start_time,
            completion_time,
            waiting_time: turnaround_time - process.burst_time,
            turnaround_time,
            response_time: start_time - process.arrival_time,
        }
    }
}

/// 입력 프로세스 + 파생 지표
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScheduledProcess {
    #[serde(flatten)]
    pub process: Process,
    #[serde(flatten)]
    pub metrics: ProcessMetrics,
    // 원래 입력 목록에서의 위치 (색상 매핑용)
    pub input_index: usize,
}
