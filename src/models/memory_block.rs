use serde::{Deserialize, Serialize};

pub type BlockId = u64;

/// 할당된 블록을 점유하는 프로세스
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    pub name: String,
    pub size: u64,
}

/// 고정 파티션 메모리 블록
///
/// 빈 블록은 `tenant`가 `None`이다. 할당된 블록은 항상 `tenant.size <= size`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MemoryBlock {
    pub id: BlockId,
    pub size: u64,
    pub tenant: Option<Tenant>,
}

impl MemoryBlock {
    pub fn free(id: BlockId, size: u64) -> Self {
        Self {
            id,
            size,
            tenant: None,
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.tenant.is_some()
    }

    pub fn tenant_name(&self) -> Option<&str> {
        self.tenant.as_ref().map(|t| t.name.as_str())
    }

    /// 블록 크기 - 점유 크기 (빈 블록은 None)
    pub fn internal_fragmentation(&self) -> Option<u64> {
        self.tenant.as_ref().map(|t| self.size - t.size)
    }
}

/// allocate / deallocate 결과. 실패도 정상 반환값이다.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    pub blocks: Vec<MemoryBlock>,
    pub success: bool,
    pub block_id: Option<BlockId>,
    pub message: String,
}

impl AllocationOutcome {
    pub fn succeeded(blocks: Vec<MemoryBlock>, block_id: BlockId, message: String) -> Self {
        Self {
            blocks,
            success: true,
            block_id: Some(block_id),
            message,
        }
    }

    pub fn failed(blocks: Vec<MemoryBlock>, message: String) -> Self {
        Self {
            blocks,
            success: false,
            block_id: None,
            message,
        }
    }
}

/// 단편화 보고서
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FragmentationReport {
    pub internal_fragmentation: u64,
    // 블록은 병합/분할되지 않으므로 빈 블록 합계가 곧 외부 단편화
    pub external_fragmentation: u64,
    pub total_free_memory: u64,
    pub total_allocated_memory: u64,
    pub total_capacity: u64,
    pub utilization_percentage: f64,
}
