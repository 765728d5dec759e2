use super::process::Ticks;
use crate::utils::color::{color_of, IDLE_COLOR};
use crate::utils::constants::IDLE_LABEL;
use serde::{Deserialize, Serialize};

/// 타임라인 구간을 점유하는 주체
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Occupant {
    Process(String),
    Idle,
}

impl Occupant {
    pub fn label(&self) -> &str {
        match self {
            Occupant::Process(id) => id,
            Occupant::Idle => IDLE_LABEL,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Occupant::Idle)
    }
}

/// Gantt 차트의 한 구간 `[start, end)`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecutionBlock {
    pub occupant: Occupant,
    pub start: Ticks,
    pub end: Ticks,
    // idle 구간은 None
    pub input_index: Option<usize>,
}

impl ExecutionBlock {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    pub fn color(&self) -> &'static str {
        match self.input_index {
            Some(index) => color_of(index),
            None => IDLE_COLOR,
        }
    }
}
