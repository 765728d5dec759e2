// 엔진별 정책 열거형 정의
use super::process::Ticks;
use crate::utils::constants::DEFAULT_QUANTUM;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CPU 스케줄링 정책
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CpuPolicy {
    Fcfs,
    SjfNonPreemptive,
    SjfPreemptive,
    PriorityNonPreemptive,
    PriorityPreemptive,
    RoundRobin { quantum: Ticks },
}

impl FromStr for CpuPolicy {
    type Err = String;

    // "round-robin" 또는 "round-robin:<quantum>" / "rr:<quantum>"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (name, quantum) = match lower.split_once(':') {
            Some((name, q)) => {
                let quantum = q
                    .parse::<Ticks>()
                    .map_err(|_| format!("Invalid quantum value: {q}"))?;
                (name.to_string(), Some(quantum))
            }
            None => (lower, None),
        };

        let policy = match name.as_str() {
            "fcfs" => CpuPolicy::Fcfs,
            "sjf-np" | "sjf" => CpuPolicy::SjfNonPreemptive,
            "sjf-p" | "srtf" => CpuPolicy::SjfPreemptive,
            "priority-np" | "priority" => CpuPolicy::PriorityNonPreemptive,
            "priority-p" => CpuPolicy::PriorityPreemptive,
            "round-robin" | "rr" => CpuPolicy::RoundRobin {
                quantum: quantum.unwrap_or(DEFAULT_QUANTUM),
            },
            _ => return Err(format!("Unknown CPU scheduling policy: {s}")),
        };

        if quantum.is_some() && !matches!(policy, CpuPolicy::RoundRobin { .. }) {
            return Err(format!("Quantum is only valid for round-robin: {s}"));
        }

        Ok(policy)
    }
}

impl CpuPolicy {
    /// 비교 모드에서 사용하는 전체 정책 목록
    pub fn all(quantum: Ticks) -> [CpuPolicy; 6] {
        [
            CpuPolicy::Fcfs,
            CpuPolicy::SjfNonPreemptive,
            CpuPolicy::SjfPreemptive,
            CpuPolicy::PriorityNonPreemptive,
            CpuPolicy::PriorityPreemptive,
            CpuPolicy::RoundRobin { quantum },
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CpuPolicy::Fcfs => "First Come First Serve",
            CpuPolicy::SjfNonPreemptive => "SJF (Non-Preemptive)",
            CpuPolicy::SjfPreemptive => "SJF (Preemptive / SRTF)",
            CpuPolicy::PriorityNonPreemptive => "Priority (Non-Preemptive)",
            CpuPolicy::PriorityPreemptive => "Priority (Preemptive)",
            CpuPolicy::RoundRobin { .. } => "Round Robin",
        }
    }
}

impl fmt::Display for CpuPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuPolicy::Fcfs => write!(f, "fcfs"),
            CpuPolicy::SjfNonPreemptive => write!(f, "sjf-np"),
            CpuPolicy::SjfPreemptive => write!(f, "sjf-p"),
            CpuPolicy::PriorityNonPreemptive => write!(f, "priority-np"),
            CpuPolicy::PriorityPreemptive => write!(f, "priority-p"),
            CpuPolicy::RoundRobin { quantum } => write!(f, "round-robin:{quantum}"),
        }
    }
}

/// 메모리 할당 정책
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationPolicy {
    FirstFit,
    BestFit,
    WorstFit,
}

impl FromStr for AllocationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first-fit" | "first" => Ok(AllocationPolicy::FirstFit),
            "best-fit" | "best" => Ok(AllocationPolicy::BestFit),
            "worst-fit" | "worst" => Ok(AllocationPolicy::WorstFit),
            _ => Err(format!("Unknown allocation policy: {s}")),
        }
    }
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AllocationPolicy::FirstFit => "first-fit",
            AllocationPolicy::BestFit => "best-fit",
            AllocationPolicy::WorstFit => "worst-fit",
        };
        f.pad(name)
    }
}

/// 디스크 스케줄링 정책
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiskPolicy {
    Fcfs,
    Sstf,
    Scan,
    Look,
}

impl FromStr for DiskPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" => Ok(DiskPolicy::Fcfs),
            "sstf" => Ok(DiskPolicy::Sstf),
            "scan" => Ok(DiskPolicy::Scan),
            "look" => Ok(DiskPolicy::Look),
            _ => Err(format!("Unknown disk scheduling policy: {s}")),
        }
    }
}

impl DiskPolicy {
    pub fn display_name(&self) -> &'static str {
        match self {
            DiskPolicy::Fcfs => "FCFS",
            DiskPolicy::Sstf => "Shortest Seek Time First",
            DiskPolicy::Scan => "SCAN (Elevator)",
            DiskPolicy::Look => "LOOK",
        }
    }
}

/// SCAN/LOOK 초기 이동 방향
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeadDirection {
    Left,
    #[default]
    Right,
}

impl FromStr for HeadDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "down" => Ok(HeadDirection::Left),
            "right" | "up" => Ok(HeadDirection::Right),
            _ => Err(format!("Unknown head direction: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_policy_parsing() {
        assert_eq!("fcfs".parse::<CpuPolicy>(), Ok(CpuPolicy::Fcfs));
        assert_eq!("SJF-P".parse::<CpuPolicy>(), Ok(CpuPolicy::SjfPreemptive));
        assert_eq!(
            "round-robin".parse::<CpuPolicy>(),
            Ok(CpuPolicy::RoundRobin {
                quantum: DEFAULT_QUANTUM
            })
        );
        assert_eq!(
            "rr:4".parse::<CpuPolicy>(),
            Ok(CpuPolicy::RoundRobin { quantum: 4 })
        );
        assert!("fcfs:3".parse::<CpuPolicy>().is_err());
        assert!("lottery".parse::<CpuPolicy>().is_err());
    }

    #[test]
    fn test_cpu_policy_display_round_trips() {
        for policy in CpuPolicy::all(3) {
            assert_eq!(policy.to_string().parse::<CpuPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_disk_and_memory_policy_parsing() {
        assert_eq!("LOOK".parse::<DiskPolicy>(), Ok(DiskPolicy::Look));
        assert_eq!("best-fit".parse::<AllocationPolicy>(), Ok(AllocationPolicy::BestFit));
        assert_eq!(format!("{:<10}|", AllocationPolicy::BestFit), "best-fit  |");
        assert_eq!("left".parse::<HeadDirection>(), Ok(HeadDirection::Left));
        assert_eq!(HeadDirection::default(), HeadDirection::Right);
        assert!("elevator".parse::<DiskPolicy>().is_err());
    }
}
