//! 프로세스별 고정 색상 할당

/// 표시용 팔레트 (순서 고정)
pub const PALETTE: [&str; 8] = [
    "hsl(174, 72%, 56%)", // Cyan
    "hsl(35, 100%, 55%)", // Amber
    "hsl(270, 70%, 60%)", // Purple
    "hsl(142, 72%, 55%)", // Green
    "hsl(210, 100%, 60%)", // Blue
    "hsl(0, 72%, 55%)",   // Red
    "hsl(320, 70%, 60%)", // Pink
    "hsl(60, 80%, 50%)",  // Yellow
];

pub const IDLE_COLOR: &str = "hsl(222, 30%, 25%)";

// PNG 차트용 RGB 값 (PALETTE와 같은 순서)
pub const PALETTE_RGB: [(u8, u8, u8); 8] = [
    (72, 219, 202),
    (255, 157, 26),
    (153, 92, 214),
    (69, 219, 122),
    (51, 153, 255),
    (219, 57, 57),
    (214, 92, 173),
    (230, 230, 25),
];

pub const IDLE_RGB: (u8, u8, u8) = (45, 52, 83);

/// 원래 입력 순서 기준 색상. dispatch 순서와 무관하게 항상 같은 값을 준다.
pub fn color_of(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn rgb_of(index: usize) -> (u8, u8, u8) {
    PALETTE_RGB[index % PALETTE_RGB.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_wraps_around_palette() {
        assert_eq!(color_of(0), "hsl(174, 72%, 56%)");
        assert_eq!(color_of(8), color_of(0));
        assert_eq!(color_of(13), color_of(5));
        assert_eq!(rgb_of(9), rgb_of(1));
    }
}
