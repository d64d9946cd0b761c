//! 几何模块

/// 整数尺寸，生命周期 attach 时传入的视口大小
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeI {
    pub width: i32,
    pub height: i32,
}

impl SizeI {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}
