use crate::error::WorkloadError;
use crate::models::{
    Cylinder, DiskPolicy, DiskRequest, DiskSchedulingResult, HeadDirection, SeekOperation,
};

/// 실린더 목록에 순서대로 id(0부터)를 붙여 요청 목록을 만든다.
pub fn requests_from_cylinders(cylinders: &[Cylinder]) -> Vec<DiskRequest> {
    cylinders
        .iter()
        .enumerate()
        .map(|(id, &cylinder)| DiskRequest {
            id: id as u64,
            cylinder,
        })
        .collect()
}

/// 대기 중인 요청의 방문 순서와 총 탐색 거리를 계산한다.
///
/// `direction`은 SCAN/LOOK에서만 의미가 있다. 요청이 없으면 시작 위치만
/// 담긴 빈 결과를 돌려주고, 그 사실은 [`DiskSchedulingResult::message`]로 전달된다.
pub fn schedule(
    requests: &[DiskRequest],
    head_position: Cylinder,
    policy: DiskPolicy,
    max_cylinder: Cylinder,
    direction: HeadDirection,
) -> Result<DiskSchedulingResult, WorkloadError> {
    validate(requests, head_position, max_cylinder)?;

    let mut head = Head::new(head_position);
    match policy {
        DiskPolicy::Fcfs => {
            for request in requests {
                head.visit(request);
            }
        }
        DiskPolicy::Sstf => sstf(&mut head, requests),
        DiskPolicy::Scan => sweep(&mut head, requests, direction, Some(max_cylinder)),
        DiskPolicy::Look => sweep(&mut head, requests, direction, None),
    }

    Ok(head.finish())
}

fn validate(requests: &[DiskRequest], head: Cylinder, max: Cylinder) -> Result<(), WorkloadError> {
    if head > max {
        return Err(WorkloadError::HeadOutOfRange { head, max });
    }
    match requests.iter().find(|r| r.cylinder > max) {
        Some(r) => Err(WorkloadError::CylinderOutOfRange {
            request: r.id,
            cylinder: r.cylinder,
            max,
        }),
        None => Ok(()),
    }
}

// 헤드 이동을 기록하는 누적기
struct Head {
    position: Cylinder,
    sequence: Vec<Cylinder>,
    seek_operations: Vec<SeekOperation>,
}

impl Head {
    fn new(position: Cylinder) -> Self {
        Self {
            position,
            sequence: vec![position],
            seek_operations: Vec::new(),
        }
    }

    fn move_to(&mut self, cylinder: Cylinder, request: Option<u64>) {
        self.seek_operations
            .push(SeekOperation::new(self.position, cylinder, request));
        self.sequence.push(cylinder);
        self.position = cylinder;
    }

    fn visit(&mut self, request: &DiskRequest) {
        self.move_to(request.cylinder, Some(request.id));
    }

    fn finish(self) -> DiskSchedulingResult {
        let total_seek_time = self.seek_operations.iter().map(|op| op.seek).sum();
        DiskSchedulingResult {
            sequence: self.sequence,
            seek_operations: self.seek_operations,
            total_seek_time,
        }
    }
}

fn sstf(head: &mut Head, requests: &[DiskRequest]) {
    let mut remaining: Vec<&DiskRequest> = requests.iter().collect();

    while !remaining.is_empty() {
        // min_by_key 는 동률일 때 첫 번째를 돌려준다
        let closest = remaining
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| r.cylinder.abs_diff(head.position))
            .map(|(index, _)| index)
            .unwrap_or(0);

        let request = remaining.remove(closest);
        head.visit(request);
    }
}

// SCAN(boundary = Some) / LOOK(boundary = None)
fn sweep(head: &mut Head, requests: &[DiskRequest], direction: HeadDirection, boundary: Option<Cylinder>) {
    let start = head.position;

    // 현재 위치 아래는 내림차순, 이상은 오름차순. 같은 실린더는 입력 순서 유지.
    let mut lower: Vec<&DiskRequest> = requests.iter().filter(|r| r.cylinder < start).collect();
    let mut upper: Vec<&DiskRequest> = requests.iter().filter(|r| r.cylinder >= start).collect();
    lower.sort_by(|a, b| b.cylinder.cmp(&a.cylinder));
    upper.sort_by_key(|r| r.cylinder);

    let (first, second, edge) = match direction {
        HeadDirection::Right => (upper, lower, boundary),
        HeadDirection::Left => (lower, upper, boundary.map(|_| 0)),
    };

    for request in &first {
        head.visit(request);
    }

    if second.is_empty() {
        return;
    }

    // SCAN 은 반대편 요청이 남아 있으면 끝까지 갔다가 돌아온다
    if let Some(edge) = edge {
        if head.position != edge {
            head.move_to(edge, None);
        }
    }

    for request in &second {
        head.visit(request);
    }
}
