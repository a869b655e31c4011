//! 超分辨率体素掩膜.

use bitvec::boxed::BitBox;
use bitvec::vec::BitVec;
use num::ToPrimitive;

use crate::volume::VolumeDim;
use crate::{Point3, Voxel};

/// 稀疏三维布尔掩膜, 可按任意超分辨率倍率做点查询.
///
/// 掩膜尺寸为体积尺寸按倍率 `r` 缩放后的结果 (见 [`VolumeDim::scaled`]).
/// 存储按 x 方向切成若干 "板" (slab), 每块板是覆盖 `(y, z)` 平面的位图,
/// 仅在第一次写入时分配. 解剖区域通常远小于全脑, 所以大部分板永远不会被分配.
///
/// 掩膜在构建阶段只增不减 (除非显式调用 [`Self::clear`]),
/// 之后在追踪阶段只读.
#[derive(Debug, Clone)]
pub struct VoxelMask {
    ratio: f32,
    dim: VolumeDim,
    slabs: Vec<Option<BitBox>>,
    len: usize,
}

impl VoxelMask {
    /// 在体积 `dim` 上创建倍率为 `ratio` 的空掩膜.
    ///
    /// `ratio` 必须是有限正数, 否则程序 panic.
    pub fn new(dim: VolumeDim, ratio: f32) -> Self {
        assert!(ratio.is_finite() && ratio > 0.0, "超分辨率倍率必须为正数");
        let dim = dim.scaled(ratio);
        Self {
            ratio,
            dim,
            slabs: vec![None; dim.width()],
            len: 0,
        }
    }

    /// 超分辨率倍率.
    #[inline]
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// 缩放后的掩膜尺寸.
    #[inline]
    pub fn dim(&self) -> VolumeDim {
        self.dim
    }

    /// 被标记的掩膜单元个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 掩膜是否为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 清空所有标记, 保留尺寸与倍率.
    pub fn clear(&mut self) {
        self.slabs.fill(None);
        self.len = 0;
    }

    /// 标记一个已经按倍率缩放过的掩膜单元.
    ///
    /// 越界单元被静默忽略. 返回值指示是否标记了新单元.
    pub fn add_cell(&mut self, &[x, y, z]: &Voxel) -> bool {
        self.mark(x as i64, y as i64, z as i64)
    }

    /// 标记体素坐标 `point` 所在的掩膜单元, 即 `round(point * ratio)`.
    ///
    /// 越界 (或无法表示为有限浮点数) 的坐标被静默忽略.
    /// 返回值指示是否标记了新单元.
    pub fn add_point<T: ToPrimitive>(&mut self, [x, y, z]: [T; 3]) -> bool {
        let (Some(x), Some(y), Some(z)) = (x.to_f32(), y.to_f32(), z.to_f32()) else {
            return false;
        };
        match (self.cell_of(x), self.cell_of(y), self.cell_of(z)) {
            (Some(x), Some(y), Some(z)) => self.mark(x, y, z),
            _ => false,
        }
    }

    /// 体素坐标 `(x, y, z)` 所在的掩膜单元是否被标记.
    ///
    /// 坐标先乘以倍率, 再逐轴四舍五入 (远离零方向). 越界坐标总是返回 `false`.
    pub fn contains(&self, x: f32, y: f32, z: f32) -> bool {
        match (self.cell_of(x), self.cell_of(y), self.cell_of(z)) {
            (Some(x), Some(y), Some(z)) => self.get(x, y, z),
            _ => false,
        }
    }

    /// 同 [`Self::contains`].
    #[inline]
    pub fn contains_point(&self, &[x, y, z]: &Point3) -> bool {
        self.contains(x, y, z)
    }

    /// 展平的纤维 `track` (`[x, y, z, x, y, z, ...]`) 是否有任意一点落在掩膜内.
    ///
    /// 末尾不足三个分量的部分被忽略.
    pub fn contains_any(&self, track: &[f32]) -> bool {
        track
            .chunks_exact(3)
            .any(|p| self.contains(p[0], p[1], p[2]))
    }

    /// 体素坐标分量 -> 掩膜单元分量. 非有限值返回 `None`.
    #[inline]
    fn cell_of(&self, v: f32) -> Option<i64> {
        let v = if self.ratio == 1.0 { v } else { v * self.ratio };
        v.is_finite().then(|| v.round() as i64)
    }

    /// `(y, z)` 在板内的位下标.
    #[inline]
    fn bit_index(&self, y: usize, z: usize) -> usize {
        y * self.dim.depth() + z
    }

    fn mark(&mut self, x: i64, y: i64, z: i64) -> bool {
        if !self.dim.is_valid(x, y, z) {
            return false;
        }
        let bit = self.bit_index(y as usize, z as usize);
        let bits = self.dim.height() * self.dim.depth();
        let slab = self.slabs[x as usize]
            .get_or_insert_with(|| BitVec::repeat(false, bits).into_boxed_bitslice());

        let fresh = !slab.replace(bit, true);
        if fresh {
            self.len += 1;
        }
        fresh
    }

    fn get(&self, x: i64, y: i64, z: i64) -> bool {
        if !self.dim.is_valid(x, y, z) {
            return false;
        }
        let bit = self.bit_index(y as usize, z as usize);
        self.slabs[x as usize]
            .as_deref()
            .is_some_and(|slab| slab[bit])
    }

    /// 已分配的板数. 仅用于测试惰性分配.
    #[cfg(test)]
    fn allocated_slabs(&self) -> usize {
        self.slabs.iter().filter(|s| s.is_some()).count()
    }
}
