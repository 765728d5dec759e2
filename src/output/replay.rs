//! Step-by-step playback of a finished disk schedule.
//!
//! The result is only borrowed; playback state lives in the iterator.

use crate::models::{Cylinder, DiskSchedulingResult, SeekOperation};

/// One frame of the head animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekStep {
    pub index: usize, // 1부터
    pub position: Cylinder,
    pub operation: SeekOperation,
    pub cumulative_seek: u64,
}

pub struct SeekReplay<'a> {
    operations: std::slice::Iter<'a, SeekOperation>,
    index: usize,
    cumulative_seek: u64,
}

impl<'a> SeekReplay<'a> {
    pub fn new(result: &'a DiskSchedulingResult) -> Self {
        Self {
            operations: result.seek_operations.iter(),
            index: 0,
            cumulative_seek: 0,
        }
    }
}

impl Iterator for SeekReplay<'_> {
    type Item = SeekStep;

    fn next(&mut self) -> Option<SeekStep> {
        let operation = *self.operations.next()?;
        self.index += 1;
        self.cumulative_seek += operation.seek;
        Some(SeekStep {
            index: self.index,
            position: operation.to,
            operation,
            cumulative_seek: self.cumulative_seek,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.operations.size_hint()
    }
}

impl ExactSizeIterator for SeekReplay<'_> {}
