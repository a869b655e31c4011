//! 被试体数据: 体积几何, 体素尺寸, 各向异性标量场以及 (可选的) 纤维束图谱.

use std::fmt;

use ndarray::{Array3, ArrayView3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Idx3d, Voxel};

mod atlas;

pub use atlas::TrackAtlas;

/// 体积的三维尺寸 (宽, 高, 深), 合法坐标范围为 `[0, w) × [0, h) × [0, d)`.
///
/// 展平后的线性索引为 `x + y * w + z * w * h`, 即 x 增长最快.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolumeDim {
    width: usize,
    height: usize,
    depth: usize,
}

impl VolumeDim {
    /// 构建体积尺寸.
    #[inline]
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// x 方向体素个数.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// y 方向体素个数.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// z 方向体素个数.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// 单个 z 平面的体素个数.
    #[inline]
    pub const fn plane_size(&self) -> usize {
        self.width * self.height
    }

    /// 体素总数.
    #[inline]
    pub const fn size(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// 以 `ndarray` 标准布局表示的形状, 即 `(depth, height, width)`.
    #[inline]
    pub const fn shape(&self) -> (usize, usize, usize) {
        (self.depth, self.height, self.width)
    }

    /// 检查整数坐标是否落在体积内.
    #[inline]
    pub fn is_valid(&self, x: i64, y: i64, z: i64) -> bool {
        (0..self.width as i64).contains(&x)
            && (0..self.height as i64).contains(&y)
            && (0..self.depth as i64).contains(&z)
    }

    /// 按超分辨率倍率 `r` 缩放后的尺寸. `r == 1` 时原样返回, 否则逐轴向上取整.
    pub fn scaled(&self, r: f32) -> Self {
        if r == 1.0 {
            return *self;
        }
        let scale = |n: usize| (n as f64 * r as f64).ceil() as usize;
        Self::new(scale(self.width), scale(self.height), scale(self.depth))
    }

    /// 若 `voxel` 在体积内, 则返回对应的非负索引.
    #[inline]
    pub(crate) fn check_voxel(&self, &[x, y, z]: &Voxel) -> Option<Idx3d> {
        self.is_valid(x as i64, y as i64, z as i64)
            .then_some((x as usize, y as usize, z as usize))
    }

    /// 三维索引 -> 线性索引. 不做越界检查.
    #[inline]
    pub(crate) const fn linear_index(&self, (x, y, z): Idx3d) -> usize {
        x + y * self.width + z * self.plane_size()
    }

    /// 线性索引 -> 体素坐标. 不做越界检查.
    ///
    /// 体积的每个维度都不应超过 `i16::MAX`.
    #[inline]
    pub(crate) fn voxel_at(&self, index: usize) -> Voxel {
        let x = index % self.width;
        let y = (index / self.width) % self.height;
        let z = index / self.plane_size();
        [x as i16, y as i16, z as i16]
    }
}

/// 一次追踪会话所绑定的被试体数据.
///
/// 各向异性标量场 (通常是 FA 或 QA 的第一个分量) 以 `(depth, height, width)`
/// 标准布局保存, 其逻辑遍历顺序与 [`VolumeDim`] 的线性索引一致.
pub struct FibVolume {
    dim: VolumeDim,
    voxel_size: [f32; 3],
    anisotropy: Array3<f32>,
    atlas: Option<Box<dyn TrackAtlas>>,
}

impl fmt::Debug for FibVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibVolume")
            .field("dim", &self.dim)
            .field("voxel_size", &self.voxel_size)
            .field(
                "atlas_bundles",
                &self.atlas.as_ref().map(|a| a.bundle_names().len()),
            )
            .finish_non_exhaustive()
    }
}

impl FibVolume {
    /// 根据几何信息和各向异性标量场创建被试体数据.
    ///
    /// `anisotropy` 的形状必须等于 `dim.shape()`, 否则程序 panic.
    /// `voxel_size` 依次为 x, y, z 方向的体素尺寸 (单位: 毫米).
    pub fn new(dim: VolumeDim, voxel_size: [f32; 3], anisotropy: Array3<f32>) -> Self {
        assert_eq!(anisotropy.dim(), dim.shape(), "各向异性标量场形状与体积尺寸不一致");
        Self {
            dim,
            voxel_size,
            anisotropy,
            atlas: None,
        }
    }

    /// 根据按线性索引排列的裸数据创建被试体数据.
    /// 如果 `raw` 的长度与 `dim` 不符, 则返回 `None`.
    pub fn from_raw(dim: VolumeDim, voxel_size: [f32; 3], raw: Vec<f32>) -> Option<Self> {
        let anisotropy = Array3::from_shape_vec(dim.shape(), raw).ok()?;
        Some(Self::new(dim, voxel_size, anisotropy))
    }

    /// 绑定一个已配准到本体积空间的纤维束图谱.
    #[inline]
    pub fn with_atlas<A: TrackAtlas + 'static>(mut self, atlas: A) -> Self {
        self.load_atlas(atlas);
        self
    }

    /// 绑定 (或替换) 纤维束图谱.
    #[inline]
    pub fn load_atlas<A: TrackAtlas + 'static>(&mut self, atlas: A) {
        self.atlas = Some(Box::new(atlas));
    }

    /// 体积尺寸.
    #[inline]
    pub fn dim(&self) -> VolumeDim {
        self.dim
    }

    /// 体素尺寸, 依次为 x, y, z 方向 (单位: 毫米).
    #[inline]
    pub fn voxel_size(&self) -> [f32; 3] {
        self.voxel_size
    }

    /// 单个体素的实际体积, 以立方毫米为单位.
    #[inline]
    pub fn voxel_volume(&self) -> f32 {
        self.voxel_size.iter().product()
    }

    /// 各向异性标量场视图.
    #[inline]
    pub fn anisotropy(&self) -> ArrayView3<'_, f32> {
        self.anisotropy.view()
    }

    /// 按线性索引顺序迭代各向异性标量值.
    #[inline]
    pub fn anisotropy_iter(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.anisotropy.iter().copied()
    }

    /// 已绑定的纤维束图谱.
    #[inline]
    pub fn atlas(&self) -> Option<&dyn TrackAtlas> {
        self.atlas.as_deref()
    }

    /// 收集所有各向异性值大于 `threshold` 的体素, 按线性索引升序排列.
    pub fn voxels_above(&self, threshold: f32) -> Vec<Voxel> {
        self.anisotropy
            .indexed_iter()
            .filter(|(_, &v)| v > threshold)
            .map(|((z, y, x), _)| [x as i16, y as i16, z as i16])
            .collect()
    }
}
