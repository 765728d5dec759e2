//! 워크로드 입력 처리 (인라인 문자열, JSON 파일, 시드 기반 무작위 생성)
//!
//! 원시 입력의 검증은 여기서 끝내고, 엔진에는 형식이 맞는 값만 넘긴다.

use crate::models::{Cylinder, Process, Ticks};
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

lazy_static! {
    // id:arrival:burst[:priority]
    static ref PROCESS_SPEC_RE: Regex =
        Regex::new(r"^\s*([^:,\s]+):(\d+):(\d+)(?::(\d+))?\s*$").unwrap();
    // alloc:<name>:<size> | free:<name> | add:<size>
    static ref MEMORY_OP_RE: Regex =
        Regex::new(r"^\s*(alloc|free|add):([^:\s]+)(?::(\d+))?\s*$").unwrap();
}

/// JSON 워크로드 파일 형식. 모든 항목은 생략 가능.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Workload {
    #[serde(default)]
    pub processes: Vec<Process>,
    #[serde(default)]
    pub block_sizes: Vec<u64>,
    #[serde(default)]
    pub cylinders: Vec<Cylinder>,
}

pub fn load_workload(path: impl AsRef<Path>) -> Result<Workload, Box<dyn Error>> {
    let text = fs::read_to_string(path.as_ref())?;
    let workload: Workload = serde_json::from_str(&text)?;
    Ok(workload)
}

/// 단일 프로세스 스펙 파싱
pub fn parse_process_spec(spec: &str) -> Result<Process, String> {
    let caps = PROCESS_SPEC_RE
        .captures(spec)
        .ok_or_else(|| format!("Invalid process spec: '{spec}'. Expected id:arrival:burst[:priority]"))?;

    let id = caps[1].to_string();
    let arrival_time = caps[2]
        .parse::<Ticks>()
        .map_err(|_| format!("Invalid arrival time in '{spec}'"))?;
    let burst_time = caps[3]
        .parse::<Ticks>()
        .map_err(|_| format!("Invalid burst time in '{spec}'"))?;
    let priority = match caps.get(4) {
        Some(m) => m
            .as_str()
            .parse::<u32>()
            .map_err(|_| format!("Invalid priority in '{spec}'"))?,
        None => 0,
    };

    if burst_time == 0 {
        return Err(format!("Burst time must be positive: '{spec}'"));
    }

    Ok(Process::new(id, arrival_time, burst_time, priority))
}

/// 쉼표로 구분된 프로세스 목록 파싱. id 중복도 여기서 거른다.
pub fn parse_process_list(value_str: &str) -> Result<Vec<Process>, String> {
    let mut processes: Vec<Process> = Vec::new();

    for spec in value_str.split(',').filter(|s| !s.trim().is_empty()) {
        let process = parse_process_spec(spec)?;
        if processes.iter().any(|p| p.id == process.id) {
            return Err(format!("Duplicate process id: {}", process.id));
        }
        processes.push(process);
    }

    if processes.is_empty() {
        return Err("No valid process specs provided".to_string());
    }

    Ok(processes)
}

/// 쉼표로 구분된 양의 정수 목록 (블록 크기 등)
pub fn parse_size_list(value_str: &str) -> Result<Vec<u64>, String> {
    let mut values = Vec::new();

    for val in value_str.split(',') {
        match val.trim().parse::<u64>() {
            Ok(v) if v > 0 => values.push(v),
            Ok(_) => return Err("Size values must be positive".to_string()),
            Err(_) => return Err(format!("Invalid size value: {val}")),
        }
    }

    Ok(values)
}

/// 실린더 목록 파싱 및 범위 검사
pub fn parse_cylinder_list(value_str: &str, max_cylinder: Cylinder) -> Result<Vec<Cylinder>, String> {
    let mut cylinders = Vec::new();

    for val in value_str.split(',').filter(|s| !s.trim().is_empty()) {
        let cylinder = val
            .trim()
            .parse::<Cylinder>()
            .map_err(|_| format!("Invalid cylinder value: {val}"))?;
        if cylinder > max_cylinder {
            return Err(format!(
                "Cylinder {cylinder} is outside the disk (0..={max_cylinder})"
            ));
        }
        cylinders.push(cylinder);
    }

    Ok(cylinders)
}

/// 메모리 시뮬레이터에 순서대로 적용할 명령
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryCommand {
    Allocate { name: String, size: u64 },
    Deallocate { name: String },
    AddBlock { size: u64 },
}

pub fn parse_memory_command(op: &str) -> Result<MemoryCommand, String> {
    let caps = MEMORY_OP_RE
        .captures(op)
        .ok_or_else(|| format!("Invalid memory operation: '{op}'"))?;
    let size = caps.get(3).and_then(|m| m.as_str().parse::<u64>().ok());

    match (&caps[1], size) {
        ("alloc", Some(size)) => Ok(MemoryCommand::Allocate {
            name: caps[2].to_string(),
            size,
        }),
        ("free", None) => Ok(MemoryCommand::Deallocate {
            name: caps[2].to_string(),
        }),
        // add:<size> 형태라 두 번째 필드가 크기다
        ("add", None) => caps[2]
            .parse::<u64>()
            .ok()
            .filter(|s| *s > 0)
            .map(|size| MemoryCommand::AddBlock { size })
            .ok_or_else(|| format!("Invalid block size in '{op}'")),
        _ => Err(format!("Invalid memory operation: '{op}'")),
    }
}

/// 시드 기반 무작위 프로세스 생성. 같은 시드면 항상 같은 목록.
pub fn random_processes(count: usize, seed: u64, max_arrival: Ticks, max_burst: Ticks) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            Process::new(
                format!("P{}", i + 1),
                rng.random_range(0..=max_arrival),
                rng.random_range(1..=max_burst.max(1)),
                rng.random_range(0..=9),
            )
        })
        .collect()
}

pub fn random_cylinders(count: usize, seed: u64, max_cylinder: Cylinder) -> Vec<Cylinder> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| rng.random_range(0..=max_cylinder))
        .collect()
}
