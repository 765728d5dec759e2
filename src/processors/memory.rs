use crate::models::{
    AllocationOutcome, AllocationPolicy, BlockId, FragmentationReport, MemoryBlock, Tenant,
};

/// 초기 파티션 테이블 생성 (id 0..n)
pub fn create_blocks(sizes: &[u64]) -> Vec<MemoryBlock> {
    sizes
        .iter()
        .enumerate()
        .map(|(index, &size)| MemoryBlock::free(index as BlockId, size))
        .collect()
}

/// 정책에 맞는 빈 블록에 프로세스를 배치한다.
///
/// 입력 블록 목록은 건드리지 않고 새 목록을 돌려준다. 빈 이름, 중복 이름,
/// 0 크기, 맞는 블록 없음은 모두 `success: false`로 보고한다.
pub fn allocate(
    blocks: &[MemoryBlock],
    tenant_name: &str,
    size: u64,
    policy: AllocationPolicy,
) -> AllocationOutcome {
    let mut new_blocks = blocks.to_vec();

    if tenant_name.trim().is_empty() {
        return AllocationOutcome::failed(new_blocks, "Process name is required".to_string());
    }
    if size == 0 {
        return AllocationOutcome::failed(
            new_blocks,
            format!("Invalid size for {tenant_name}: size must be positive"),
        );
    }
    if blocks.iter().any(|b| b.tenant_name() == Some(tenant_name)) {
        return AllocationOutcome::failed(
            new_blocks,
            format!("Process \"{tenant_name}\" is already in memory"),
        );
    }

    let Some(index) = select_block(blocks, size, policy) else {
        return AllocationOutcome::failed(
            new_blocks,
            format!("No suitable block found for {tenant_name} ({size}KB) using {policy}"),
        );
    };

    let block = &mut new_blocks[index];
    block.tenant = Some(Tenant {
        name: tenant_name.to_string(),
        size,
    });
    let message = format!(
        "{tenant_name} ({size}KB) allocated to Block {} ({}KB)",
        block.id, block.size
    );
    let block_id = block.id;

    AllocationOutcome::succeeded(new_blocks, block_id, message)
}

// 후보: 비어 있고 size 이상인 블록. 동률은 앞쪽 블록이 이긴다.
fn select_block(blocks: &[MemoryBlock], size: u64, policy: AllocationPolicy) -> Option<usize> {
    let mut candidates = blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| !b.is_allocated() && b.size >= size)
        .map(|(index, b)| (index, b.size - size));

    match policy {
        AllocationPolicy::FirstFit => candidates.next().map(|(index, _)| index),
        AllocationPolicy::BestFit => candidates
            .min_by_key(|&(index, leftover)| (leftover, index))
            .map(|(index, _)| index),
        AllocationPolicy::WorstFit => candidates
            .fold(None, |best: Option<(usize, u64)>, (index, leftover)| match best {
                Some((_, best_leftover)) if best_leftover >= leftover => best,
                _ => Some((index, leftover)),
            })
            .map(|(index, _)| index),
    }
}

/// 이름으로 점유 블록을 찾아 해제한다.
pub fn deallocate(blocks: &[MemoryBlock], tenant_name: &str) -> AllocationOutcome {
    let mut new_blocks = blocks.to_vec();

    let Some(index) = blocks
        .iter()
        .position(|b| b.tenant_name() == Some(tenant_name))
    else {
        return AllocationOutcome::failed(
            new_blocks,
            format!("Process \"{tenant_name}\" not found in memory"),
        );
    };

    let block = &mut new_blocks[index];
    block.tenant = None;
    let block_id = block.id;
    let message = format!("{tenant_name} deallocated from Block {block_id}");

    AllocationOutcome::succeeded(new_blocks, block_id, message)
}

/// 새 빈 블록을 끝에 추가한다. id는 기존 최대값 + 1 (비어 있으면 0).
pub fn add_block(blocks: &[MemoryBlock], size: u64) -> Vec<MemoryBlock> {
    debug_assert!(size > 0, "block size must be positive");

    let next_id = blocks.iter().map(|b| b.id + 1).max().unwrap_or(0);
    let mut new_blocks = blocks.to_vec();
    new_blocks.push(MemoryBlock::free(next_id, size));
    new_blocks
}

/// 블록 목록의 단편화/사용률 집계
pub fn fragmentation(blocks: &[MemoryBlock]) -> FragmentationReport {
    let internal_fragmentation: u64 = blocks.iter().filter_map(|b| b.internal_fragmentation()).sum();
    let total_free_memory: u64 = blocks
        .iter()
        .filter(|b| !b.is_allocated())
        .map(|b| b.size)
        .sum();
    let total_allocated_memory: u64 = blocks
        .iter()
        .filter_map(|b| b.tenant.as_ref())
        .map(|t| t.size)
        .sum();
    let total_capacity: u64 = blocks.iter().map(|b| b.size).sum();

    let utilization_percentage = if total_capacity > 0 {
        total_allocated_memory as f64 / total_capacity as f64 * 100.0
    } else {
        0.0
    };

    FragmentationReport {
        internal_fragmentation,
        external_fragmentation: total_free_memory,
        total_free_memory,
        total_allocated_memory,
        total_capacity,
        utilization_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<MemoryBlock> {
        create_blocks(&[500, 300, 200, 400])
    }

    fn tenant_block(outcome: &AllocationOutcome, name: &str) -> Option<BlockId> {
        outcome
            .blocks
            .iter()
            .find(|b| b.tenant_name() == Some(name))
            .map(|b| b.id)
    }

    #[test]
    fn test_best_fit_picks_smallest_leftover() {
        let outcome = allocate(&sample(), "A", 150, AllocationPolicy::BestFit);
        assert!(outcome.success);
        assert_eq!(outcome.block_id, Some(2));
        assert_eq!(outcome.blocks[2].internal_fragmentation(), Some(50));
        assert_eq!(outcome.message, "A (150KB) allocated to Block 2 (200KB)");
    }

    #[test]
    fn test_first_and_worst_fit() {
        let first = allocate(&sample(), "A", 150, AllocationPolicy::FirstFit);
        assert_eq!(first.block_id, Some(0));

        let worst = allocate(&sample(), "A", 150, AllocationPolicy::WorstFit);
        assert_eq!(worst.block_id, Some(0));

        let blocks = create_blocks(&[300, 500, 500]);
        let worst = allocate(&blocks, "B", 100, AllocationPolicy::WorstFit);
        assert_eq!(tenant_block(&worst, "B"), Some(1));
    }

    #[test]
    fn test_best_fit_tie_prefers_first_block() {
        let blocks = create_blocks(&[400, 200, 200]);
        let outcome = allocate(&blocks, "A", 150, AllocationPolicy::BestFit);
        assert_eq!(outcome.block_id, Some(1));
    }

    #[test]
    fn test_allocate_skips_occupied_blocks() {
        let first = allocate(&sample(), "A", 150, AllocationPolicy::BestFit);
        let second = allocate(&first.blocks, "B", 150, AllocationPolicy::BestFit);
        assert_eq!(second.block_id, Some(1));
    }

    #[test]
    fn test_allocate_failures_leave_blocks_unchanged() {
        let blocks = sample();

        let too_big = allocate(&blocks, "A", 600, AllocationPolicy::FirstFit);
        assert!(!too_big.success);
        assert_eq!(too_big.blocks, blocks);
        assert_eq!(
            too_big.message,
            "No suitable block found for A (600KB) using first-fit"
        );

        assert!(!allocate(&blocks, "", 10, AllocationPolicy::FirstFit).success);
        assert!(!allocate(&blocks, "A", 0, AllocationPolicy::FirstFit).success);

        let placed = allocate(&blocks, "A", 10, AllocationPolicy::FirstFit);
        let duplicate = allocate(&placed.blocks, "A", 10, AllocationPolicy::FirstFit);
        assert!(!duplicate.success);
        assert_eq!(duplicate.blocks, placed.blocks);
    }

    #[test]
    fn test_deallocate_clears_tenant() {
        let placed = allocate(&sample(), "A", 150, AllocationPolicy::BestFit);
        let freed = deallocate(&placed.blocks, "A");
        assert!(freed.success);
        assert_eq!(freed.block_id, Some(2));
        assert_eq!(freed.blocks, sample());
        assert_eq!(freed.message, "A deallocated from Block 2");

        let missing = deallocate(&freed.blocks, "A");
        assert!(!missing.success);
        assert_eq!(missing.message, "Process \"A\" not found in memory");
    }

    #[test]
    fn test_add_block_uses_next_id() {
        let blocks = add_block(&[], 100);
        assert_eq!(blocks[0].id, 0);

        let blocks = add_block(&[MemoryBlock::free(0, 10), MemoryBlock::free(7, 10)], 100);
        assert_eq!(blocks.last().map(|b| b.id), Some(8));
        assert!(!blocks[2].is_allocated());
    }

    #[test]
    fn test_fragmentation_literal_definitions() {
        let blocks = sample();
        let outcome = allocate(&blocks, "A", 150, AllocationPolicy::BestFit);
        let outcome = allocate(&outcome.blocks, "B", 450, AllocationPolicy::FirstFit);
        let report = fragmentation(&outcome.blocks);

        // A: 200 블록에 150, B: 500 블록에 450
        assert_eq!(report.total_allocated_memory, 600);
        assert_eq!(report.internal_fragmentation, 100);
        assert_eq!(report.total_free_memory, 700);
        assert_eq!(report.external_fragmentation, 700);
        assert_eq!(report.total_capacity, 1400);
        // 내부 단편화는 free 에도 allocated 에도 포함되지 않는다
        assert_eq!(
            report.total_allocated_memory + report.total_free_memory + report.internal_fragmentation,
            report.total_capacity
        );
        assert!((report.utilization_percentage - 600.0 / 1400.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_fragmentation_of_empty_list() {
        let report = fragmentation(&[]);
        assert_eq!(report.total_capacity, 0);
        assert_eq!(report.utilization_percentage, 0.0);
    }
}
