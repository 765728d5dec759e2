use serde::{Deserialize, Serialize};

pub type Cylinder = u64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskRequest {
    pub id: u64,
    pub cylinder: Cylinder,
}

/// 연속된 두 헤드 위치 사이의 이동
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekOperation {
    pub from: Cylinder,
    pub to: Cylinder,
    pub seek: u64, // |to - from|
    // SCAN의 경계 이동은 요청이 없으므로 None
    pub request: Option<u64>,
}

impl SeekOperation {
    pub fn new(from: Cylinder, to: Cylinder, request: Option<u64>) -> Self {
        Self {
            from,
            to,
            seek: from.abs_diff(to),
            request,
        }
    }
}

/// 디스크 스케줄링 결과
///
/// `sequence[0]`은 시작 헤드 위치이고 이후 항목은 방문 순서다.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DiskSchedulingResult {
    pub sequence: Vec<Cylinder>,
    pub seek_operations: Vec<SeekOperation>,
    pub total_seek_time: u64,
}

impl DiskSchedulingResult {
    pub fn is_empty(&self) -> bool {
        self.seek_operations.is_empty()
    }

    pub fn average_seek_time(&self) -> f64 {
        let served = self.served_requests();
        if served == 0 {
            0.0
        } else {
            self.total_seek_time as f64 / served as f64
        }
    }

    /// 호출자가 그대로 보여줄 수 있는 결과 메시지. 요청이 없는 경우도 정상 결과다.
    pub fn message(&self) -> String {
        if self.is_empty() {
            "No requests to schedule".to_string()
        } else {
            format!(
                "Served {} requests, total seek {}",
                self.served_requests(),
                self.total_seek_time
            )
        }
    }

    /// 실제 요청을 처리한 이동 수 (경계 이동 제외)
    pub fn served_requests(&self) -> usize {
        self.seek_operations
            .iter()
            .filter(|op| op.request.is_some())
            .count()
    }
}
