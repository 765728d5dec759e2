use crate::error::WorkloadError;
use crate::models::{
    CpuPolicy, ExecutionBlock, Occupant, Process, ProcessMetrics, ScheduledProcess,
    SchedulingResult, Ticks,
};
use std::collections::{HashSet, VecDeque};

/// 프로세스 목록과 정책으로 전체 실행 타임라인과 지표를 계산한다.
///
/// 입력은 읽기만 하며, 같은 입력에는 항상 같은 결과를 돌려준다.
/// 선점형 정책은 1 tick 단위 재평가와 동일한 구간 경계를 만들되,
/// 다음 도착 또는 완료 시점까지 한 번에 진행한다.
pub fn schedule(processes: &[Process], policy: CpuPolicy) -> Result<SchedulingResult, WorkloadError> {
    validate(processes, policy)?;

    let mut run = Run::new(processes);
    match policy {
        // 도착 시간만으로 정렬 (동률은 입력 순서)
        CpuPolicy::Fcfs => run.non_preemptive(|_| 0),
        CpuPolicy::SjfNonPreemptive => run.non_preemptive(|p| p.burst_time),
        CpuPolicy::PriorityNonPreemptive => run.non_preemptive(|p| Ticks::from(p.priority)),
        CpuPolicy::SjfPreemptive => run.preemptive(|_, remaining| remaining),
        CpuPolicy::PriorityPreemptive => run.preemptive(|p, _| Ticks::from(p.priority)),
        CpuPolicy::RoundRobin { quantum } => run.round_robin(quantum),
    }

    Ok(run.finish())
}

/// 같은 워크로드를 모든 정책으로 차례로 실행한다.
pub fn compare(processes: &[Process], quantum: Ticks) -> Result<Vec<(CpuPolicy, SchedulingResult)>, WorkloadError> {
    CpuPolicy::all(quantum)
        .into_iter()
        .map(|policy| schedule(processes, policy).map(|result| (policy, result)))
        .collect()
}

fn validate(processes: &[Process], policy: CpuPolicy) -> Result<(), WorkloadError> {
    if let CpuPolicy::RoundRobin { quantum: 0 } = policy {
        return Err(WorkloadError::ZeroQuantum);
    }

    let mut seen = HashSet::with_capacity(processes.len());
    for process in processes {
        if process.id.trim().is_empty() {
            return Err(WorkloadError::EmptyProcessId);
        }
        if process.burst_time == 0 {
            return Err(WorkloadError::ZeroBurst(process.id.clone()));
        }
        if !seen.insert(process.id.as_str()) {
            return Err(WorkloadError::DuplicateProcessId(process.id.clone()));
        }
    }

    Ok(())
}

// 연속된 같은 점유자 구간을 하나로 합치는 타임라인 빌더
#[derive(Default)]
struct Timeline {
    blocks: Vec<ExecutionBlock>,
}

impl Timeline {
    fn push(&mut self, occupant: Occupant, input_index: Option<usize>, start: Ticks, end: Ticks) {
        if end <= start {
            return;
        }

        if let Some(last) = self.blocks.last_mut() {
            debug_assert_eq!(last.end, start, "timeline must stay contiguous");
            if last.occupant == occupant {
                last.end = end;
                return;
            }
        }

        self.blocks.push(ExecutionBlock {
            occupant,
            start,
            end,
            input_index,
        });
    }
}

// 한 번의 시뮬레이션 실행 상태. 입력 인덱스 기준으로 관리한다.
struct Run<'a> {
    processes: &'a [Process],
    remaining: Vec<Ticks>,
    first_dispatch: Vec<Option<Ticks>>,
    completion: Vec<Option<Ticks>>,
    unfinished: usize,
    timeline: Timeline,
    clock: Ticks,
}

impl<'a> Run<'a> {
    fn new(processes: &'a [Process]) -> Self {
        Self {
            processes,
            remaining: processes.iter().map(|p| p.burst_time).collect(),
            first_dispatch: vec![None; processes.len()],
            completion: vec![None; processes.len()],
            unfinished: processes.len(),
            timeline: Timeline::default(),
            clock: 0,
        }
    }

    fn is_ready(&self, index: usize) -> bool {
        self.completion[index].is_none() && self.processes[index].arrival_time <= self.clock
    }

    // key 최소, 동률이면 먼저 도착, 그 다음 입력 순서
    fn pick(&self, key: impl Fn(usize) -> Ticks) -> Option<usize> {
        (0..self.processes.len())
            .filter(|&i| self.is_ready(i))
            .min_by_key(|&i| (key(i), self.processes[i].arrival_time, i))
    }

    // 현재 시각 이후 가장 이른 미완료 프로세스 도착 시각
    fn next_arrival_after(&self, time: Ticks) -> Option<Ticks> {
        self.processes
            .iter()
            .zip(&self.completion)
            .filter(|(p, done)| done.is_none() && p.arrival_time > time)
            .map(|(p, _)| p.arrival_time)
            .min()
    }

    // 준비된 프로세스가 없을 때 다음 도착까지 한 번에 idle 구간을 만든다
    fn idle_until_next_arrival(&mut self) {
        if let Some(next) = self.next_arrival_after(self.clock) {
            self.timeline.push(Occupant::Idle, None, self.clock, next);
            self.clock = next;
        }
    }

    fn execute(&mut self, index: usize, duration: Ticks) {
        debug_assert!(duration > 0 && duration <= self.remaining[index]);

        // 최초 dispatch 시각은 한 번만 기록
        self.first_dispatch[index].get_or_insert(self.clock);

        let start = self.clock;
        self.clock += duration;
        self.remaining[index] -= duration;
        self.timeline.push(
            Occupant::Process(self.processes[index].id.clone()),
            Some(index),
            start,
            self.clock,
        );

        if self.remaining[index] == 0 {
            self.completion[index] = Some(self.clock);
            self.unfinished -= 1;
        }
    }

    fn non_preemptive(&mut self, key: impl Fn(&Process) -> Ticks) {
        let processes = self.processes;
        while self.unfinished > 0 {
            match self.pick(|i| key(&processes[i])) {
                Some(index) => self.execute(index, self.remaining[index]),
                None => self.idle_until_next_arrival(),
            }
        }
    }

    // 선택 결과는 도착 또는 완료 시점에만 바뀔 수 있으므로 그 사이를 한 번에 실행
    fn preemptive(&mut self, key: impl Fn(&Process, Ticks) -> Ticks) {
        let processes = self.processes;
        while self.unfinished > 0 {
            let picked = {
                let remaining = &self.remaining;
                self.pick(|i| key(&processes[i], remaining[i]))
            };

            match picked {
                Some(index) => {
                    let until_done = self.remaining[index];
                    let slice = match self.next_arrival_after(self.clock) {
                        Some(arrival) => until_done.min(arrival - self.clock),
                        None => until_done,
                    };
                    self.execute(index, slice);
                }
                None => self.idle_until_next_arrival(),
            }
        }
    }

    fn round_robin(&mut self, quantum: Ticks) {
        let processes = self.processes;
        let mut arrivals: Vec<usize> = (0..processes.len()).collect();
        arrivals.sort_by_key(|&i| (processes[i].arrival_time, i));

        let mut cursor = 0;
        let mut ready: VecDeque<usize> = VecDeque::with_capacity(processes.len());

        // 현재 시각까지 도착한 프로세스를 도착 순서대로 큐에 넣는다
        let admit = |cursor: &mut usize, ready: &mut VecDeque<usize>, clock: Ticks| {
            while *cursor < arrivals.len() && processes[arrivals[*cursor]].arrival_time <= clock {
                ready.push_back(arrivals[*cursor]);
                *cursor += 1;
            }
        };

        while self.unfinished > 0 {
            admit(&mut cursor, &mut ready, self.clock);

            let Some(index) = ready.pop_front() else {
                self.idle_until_next_arrival();
                continue;
            };

            let slice = quantum.min(self.remaining[index]);
            self.execute(index, slice);

            // 실행 중 (start, end]에 도착한 프로세스가 재진입 프로세스보다 앞선다
            admit(&mut cursor, &mut ready, self.clock);
            if self.remaining[index] > 0 {
                ready.push_back(index);
            }
        }
    }

    fn finish(self) -> SchedulingResult {
        let processes: Vec<ScheduledProcess> = self
            .processes
            .iter()
            .enumerate()
            .map(|(i, process)| {
                let start = self.first_dispatch[i].expect("finished process without dispatch");
                let completion = self.completion[i].expect("finished process without completion");
                ScheduledProcess {
                    process: process.clone(),
                    metrics: ProcessMetrics::derive(process, start, completion),
                    input_index: i,
                }
            })
            .collect();

        let mean = |f: fn(&ProcessMetrics) -> Ticks| {
            if processes.is_empty() {
                0.0
            } else {
                processes.iter().map(|p| f(&p.metrics)).sum::<Ticks>() as f64 / processes.len() as f64
            }
        };
        let average_waiting_time = mean(|m| m.waiting_time);
        let average_turnaround_time = mean(|m| m.turnaround_time);
        let average_response_time = mean(|m| m.response_time);

        let blocks = self.timeline.blocks;
        let makespan = blocks.last().map(|b| b.end).unwrap_or(0);
        let idle: Ticks = blocks
            .iter()
            .filter(|b| b.occupant.is_idle())
            .map(|b| b.duration())
            .sum();
        let cpu_utilization = if makespan == 0 {
            0.0
        } else {
            1.0 - idle as f64 / makespan as f64
        };

        SchedulingResult {
            timeline: blocks,
            processes,
            average_waiting_time,
            average_turnaround_time,
            average_response_time,
            cpu_utilization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str, arrival: Ticks, burst: Ticks) -> Process {
        Process::new(id, arrival, burst, 0)
    }

    fn pp(id: &str, arrival: Ticks, burst: Ticks, priority: u32) -> Process {
        Process::new(id, arrival, burst, priority)
    }

    // (label, start, end) 형태로 비교
    fn spans(result: &SchedulingResult) -> Vec<(String, Ticks, Ticks)> {
        result
            .timeline
            .iter()
            .map(|b| (b.occupant.label().to_string(), b.start, b.end))
            .collect()
    }

    fn span(label: &str, start: Ticks, end: Ticks) -> (String, Ticks, Ticks) {
        (label.to_string(), start, end)
    }

    fn waiting(result: &SchedulingResult) -> Vec<Ticks> {
        result.processes.iter().map(|p| p.metrics.waiting_time).collect()
    }

    fn textbook() -> Vec<Process> {
        vec![p("P1", 0, 5), p("P2", 1, 3), p("P3", 2, 8)]
    }

    fn mixed() -> Vec<Process> {
        vec![p("P1", 0, 7), p("P2", 2, 4), p("P3", 4, 1), p("P4", 5, 4)]
    }

    fn all_policies() -> [CpuPolicy; 8] {
        [
            CpuPolicy::Fcfs,
            CpuPolicy::SjfNonPreemptive,
            CpuPolicy::SjfPreemptive,
            CpuPolicy::PriorityNonPreemptive,
            CpuPolicy::PriorityPreemptive,
            CpuPolicy::RoundRobin { quantum: 1 },
            CpuPolicy::RoundRobin { quantum: 2 },
            CpuPolicy::RoundRobin { quantum: 5 },
        ]
    }

    #[test]
    fn test_fcfs_textbook_example() {
        let result = schedule(&textbook(), CpuPolicy::Fcfs).unwrap();

        assert_eq!(
            spans(&result),
            vec![span("P1", 0, 5), span("P2", 5, 8), span("P3", 8, 16)]
        );
        assert_eq!(waiting(&result), vec![0, 4, 6]);
        assert!((result.average_waiting_time - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.cpu_utilization, 1.0);
    }

    #[test]
    fn test_fcfs_ties_keep_input_order() {
        let processes = vec![p("B", 0, 2), p("A", 0, 1)];
        let result = schedule(&processes, CpuPolicy::Fcfs).unwrap();
        assert_eq!(spans(&result), vec![span("B", 0, 2), span("A", 2, 3)]);
    }

    #[test]
    fn test_sjf_non_preemptive_textbook_example() {
        let result = schedule(&textbook(), CpuPolicy::SjfNonPreemptive).unwrap();
        assert_eq!(
            spans(&result),
            vec![span("P1", 0, 5), span("P2", 5, 8), span("P3", 8, 16)]
        );
        assert_eq!(result.makespan(), 16);
    }

    #[test]
    fn test_sjf_non_preemptive_picks_shortest_then_earliest() {
        let result = schedule(&mixed(), CpuPolicy::SjfNonPreemptive).unwrap();
        assert_eq!(
            spans(&result),
            vec![
                span("P1", 0, 7),
                span("P3", 7, 8),
                span("P2", 8, 12),
                span("P4", 12, 16)
            ]
        );
    }

    #[test]
    fn test_srtf_preempts_on_arrival() {
        let result = schedule(&mixed(), CpuPolicy::SjfPreemptive).unwrap();

        assert_eq!(
            spans(&result),
            vec![
                span("P1", 0, 2),
                span("P2", 2, 4),
                span("P3", 4, 5),
                span("P2", 5, 7),
                span("P4", 7, 11),
                span("P1", 11, 16)
            ]
        );
        assert_eq!(waiting(&result), vec![9, 1, 0, 2]);
        assert!((result.average_waiting_time - 3.0).abs() < 1e-9);

        // 선점 후 재실행해도 최초 dispatch 시각은 유지
        let p1 = result.process("P1").unwrap();
        assert_eq!(p1.metrics.start_time, 0);
        assert_eq!(p1.metrics.response_time, 0);
        assert_eq!(result.process("P4").unwrap().metrics.response_time, 2);
    }

    #[test]
    fn test_srtf_coalesces_uninterrupted_runs() {
        let processes = vec![p("P1", 0, 5), p("P2", 2, 6)];
        let result = schedule(&processes, CpuPolicy::SjfPreemptive).unwrap();
        assert_eq!(spans(&result), vec![span("P1", 0, 5), span("P2", 5, 11)]);
    }

    #[test]
    fn test_srtf_tie_prefers_earlier_arrival() {
        // t=1 에서 P1 남은 시간 3, P2 버스트 3 → 먼저 도착한 P1 유지
        let processes = vec![p("P1", 0, 4), p("P2", 1, 3)];
        let result = schedule(&processes, CpuPolicy::SjfPreemptive).unwrap();
        assert_eq!(spans(&result), vec![span("P1", 0, 4), span("P2", 4, 7)]);
    }

    #[test]
    fn test_priority_non_preemptive() {
        let processes = vec![pp("P1", 0, 4, 2), pp("P2", 1, 3, 1), pp("P3", 2, 1, 3)];
        let result = schedule(&processes, CpuPolicy::PriorityNonPreemptive).unwrap();
        assert_eq!(
            spans(&result),
            vec![span("P1", 0, 4), span("P2", 4, 7), span("P3", 7, 8)]
        );
    }

    #[test]
    fn test_priority_preemptive() {
        let processes = vec![pp("P1", 0, 4, 2), pp("P2", 1, 3, 1), pp("P3", 2, 1, 3)];
        let result = schedule(&processes, CpuPolicy::PriorityPreemptive).unwrap();
        assert_eq!(
            spans(&result),
            vec![
                span("P1", 0, 1),
                span("P2", 1, 4),
                span("P1", 4, 7),
                span("P3", 7, 8)
            ]
        );
        assert_eq!(result.process("P1").unwrap().metrics.start_time, 0);
        assert_eq!(result.process("P1").unwrap().metrics.completion_time, 7);
    }

    #[test]
    fn test_priority_tie_prefers_earlier_arrival() {
        // A 와 B 는 우선순위가 같고, B 가 입력은 뒤지만 먼저 도착
        let processes = vec![pp("W", 0, 4, 0), pp("A", 2, 2, 3), pp("B", 1, 2, 3)];
        for policy in [CpuPolicy::PriorityNonPreemptive, CpuPolicy::PriorityPreemptive] {
            let result = schedule(&processes, policy).unwrap();
            assert_eq!(
                spans(&result),
                vec![span("W", 0, 4), span("B", 4, 6), span("A", 6, 8)],
                "{policy}"
            );
        }
    }

    #[test]
    fn test_priority_tie_with_same_arrival_keeps_input_order() {
        let processes = vec![pp("W", 0, 4, 0), pp("Q", 1, 2, 3), pp("P", 1, 2, 3)];
        for policy in [CpuPolicy::PriorityNonPreemptive, CpuPolicy::PriorityPreemptive] {
            let result = schedule(&processes, policy).unwrap();
            assert_eq!(
                spans(&result),
                vec![span("W", 0, 4), span("Q", 4, 6), span("P", 6, 8)],
                "{policy}"
            );
        }
    }

    #[test]
    fn test_priority_preemptive_equal_priority_does_not_preempt() {
        let processes = vec![pp("R", 0, 4, 2), pp("S", 1, 2, 2)];
        let result = schedule(&processes, CpuPolicy::PriorityPreemptive).unwrap();
        assert_eq!(spans(&result), vec![span("R", 0, 4), span("S", 4, 6)]);
        assert_eq!(result.process("S").unwrap().metrics.waiting_time, 3);
    }

    #[test]
    fn test_round_robin_hand_traced_queue() {
        let processes = vec![p("P1", 0, 5), p("P2", 1, 3)];
        let result = schedule(&processes, CpuPolicy::RoundRobin { quantum: 2 }).unwrap();
        assert_eq!(
            spans(&result),
            vec![
                span("P1", 0, 2),
                span("P2", 2, 4),
                span("P1", 4, 6),
                span("P2", 6, 7),
                span("P1", 7, 8)
            ]
        );
        assert_eq!(result.process("P2").unwrap().metrics.response_time, 1);
    }

    #[test]
    fn test_round_robin_arrivals_before_requeue() {
        // P2, P3 는 P1 실행 중 도착 → P1 보다 먼저 큐에 들어간다
        let processes = vec![p("P1", 0, 5), p("P2", 1, 2), p("P3", 1, 2)];
        let result = schedule(&processes, CpuPolicy::RoundRobin { quantum: 3 }).unwrap();
        assert_eq!(
            spans(&result),
            vec![
                span("P1", 0, 3),
                span("P2", 3, 5),
                span("P3", 5, 7),
                span("P1", 7, 9)
            ]
        );
    }

    #[test]
    fn test_round_robin_arrival_at_slice_end_goes_first() {
        let processes = vec![p("P1", 0, 4), p("P2", 2, 2)];
        let result = schedule(&processes, CpuPolicy::RoundRobin { quantum: 2 }).unwrap();
        assert_eq!(
            spans(&result),
            vec![span("P1", 0, 2), span("P2", 2, 4), span("P1", 4, 6)]
        );
    }

    #[test]
    fn test_round_robin_single_process_is_one_block() {
        let processes = vec![p("P1", 0, 5)];
        let result = schedule(&processes, CpuPolicy::RoundRobin { quantum: 2 }).unwrap();
        assert_eq!(spans(&result), vec![span("P1", 0, 5)]);
    }

    #[test]
    fn test_idle_gaps_are_single_blocks() {
        let processes = vec![p("P1", 2, 3), p("P2", 10, 1)];
        for policy in all_policies() {
            let result = schedule(&processes, policy).unwrap();
            assert_eq!(
                spans(&result),
                vec![
                    span("IDLE", 0, 2),
                    span("P1", 2, 5),
                    span("IDLE", 5, 10),
                    span("P2", 10, 11)
                ],
                "policy {policy}"
            );
            assert_eq!(result.idle_time(), 7);
            assert!((result.cpu_utilization - 4.0 / 11.0).abs() < 1e-9);
            assert_eq!(result.timeline[0].input_index, None);
        }
    }

    #[test]
    fn test_timeline_is_contiguous_and_conserves_work() {
        let workloads = vec![
            textbook(),
            mixed(),
            vec![pp("A", 3, 2, 1), pp("B", 0, 9, 5), pp("C", 3, 4, 0), pp("D", 20, 3, 2)],
            vec![pp("X", 1, 1, 0), pp("Y", 1, 1, 0), pp("Z", 1, 6, 0)],
        ];

        for processes in &workloads {
            for policy in all_policies() {
                let result = schedule(processes, policy).unwrap();
                let timeline = &result.timeline;

                assert_eq!(timeline[0].start, 0, "policy {policy}");
                for pair in timeline.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start, "policy {policy}");
                    assert_ne!(pair[0].occupant, pair[1].occupant, "policy {policy}");
                }
                for process in processes {
                    assert_eq!(
                        result.service_time(&process.id),
                        process.burst_time,
                        "policy {policy}, process {}",
                        process.id
                    );
                }
                for scheduled in &result.processes {
                    let m = scheduled.metrics;
                    assert_eq!(m.turnaround_time, m.waiting_time + scheduled.process.burst_time);
                    assert_eq!(m.response_time, m.start_time - scheduled.process.arrival_time);
                    assert!(m.completion_time <= result.makespan());
                }
            }
        }
    }

    #[test]
    fn test_processes_keep_input_order_and_colors() {
        let result = schedule(&mixed(), CpuPolicy::SjfPreemptive).unwrap();
        let ids: Vec<&str> = result.processes.iter().map(|p| p.process.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2", "P3", "P4"]);

        for block in &result.timeline {
            let index = block.input_index.unwrap();
            assert_eq!(result.processes[index].process.id, block.occupant.label());
        }
    }

    #[test]
    fn test_schedule_is_deterministic() {
        for policy in all_policies() {
            let first = schedule(&mixed(), policy).unwrap();
            let second = schedule(&mixed(), policy).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_empty_workload() {
        let result = schedule(&[], CpuPolicy::Fcfs).unwrap();
        assert!(result.timeline.is_empty());
        assert_eq!(result.average_waiting_time, 0.0);
        assert_eq!(result.cpu_utilization, 0.0);
    }

    #[test]
    fn test_contract_violations_are_reported() {
        assert_eq!(
            schedule(&[p("P1", 0, 1), p("P1", 2, 1)], CpuPolicy::Fcfs),
            Err(WorkloadError::DuplicateProcessId("P1".to_string()))
        );
        assert_eq!(
            schedule(&[p("P1", 0, 0)], CpuPolicy::Fcfs),
            Err(WorkloadError::ZeroBurst("P1".to_string()))
        );
        assert_eq!(
            schedule(&[p(" ", 0, 1)], CpuPolicy::Fcfs),
            Err(WorkloadError::EmptyProcessId)
        );
        assert_eq!(
            schedule(&textbook(), CpuPolicy::RoundRobin { quantum: 0 }),
            Err(WorkloadError::ZeroQuantum)
        );
    }

    #[test]
    fn test_compare_runs_every_policy() {
        let results = compare(&textbook(), 2).unwrap();
        assert_eq!(results.len(), 6);
        assert_eq!(results[0].0, CpuPolicy::Fcfs);
        assert!(results.iter().all(|(_, r)| r.makespan() == 16));
    }
}
