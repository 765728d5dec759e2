// idle 구간 표시용 식별자
pub const IDLE_LABEL: &str = "IDLE";

// Round Robin 기본 time quantum
pub const DEFAULT_QUANTUM: u64 = 2;

// 디스크 기본값 (헤드 위치, 최대 실린더)
pub const DEFAULT_HEAD_POSITION: u64 = 53;
pub const DEFAULT_MAX_CYLINDER: u64 = 199;

// 기본 메모리 파티션 크기 (KB)
pub const DEFAULT_BLOCK_SIZES: [u64; 7] = [500, 300, 200, 400, 600, 250, 350];

// 빈 파일의 기본 크기 (bytes)
pub const EMPTY_FILE_SIZE: u64 = 256;
