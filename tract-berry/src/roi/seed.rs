//! 种子管理. 种子不做成员测试, 而是直接作为追踪积分器的起点.

use log::debug;

use super::{RegionRole, RoiMgr};
use crate::consts::WHOLE_BRAIN_LABEL;
use crate::Voxel;

impl RoiMgr<'_> {
    /// 全脑播种: 所有各向异性值大于 `threshold` 的体素都成为单位倍率的种子.
    ///
    /// 这是未指定任何区域时的默认播种策略.
    pub fn set_whole_brain_seed(&mut self, threshold: f32) {
        let seeds = self.handle.voxels_above(threshold);
        debug!(
            "whole brain seeding: {} of {} voxels above {threshold}",
            seeds.len(),
            self.handle.dim().size()
        );
        self.set_regions(&seeds, 1.0, RegionRole::Seed, WHOLE_BRAIN_LABEL);
    }

    /// 所有种子 (掩膜单元坐标), 按注册顺序排列.
    #[inline]
    pub fn seeds(&self) -> &[Voxel] {
        &self.seeds
    }

    /// 每个种子对应的超分辨率倍率, 与 [`Self::seeds`] 一一对应.
    #[inline]
    pub fn seeds_r(&self) -> &[f32] {
        &self.seeds_r
    }

    /// 迭代 `(种子, 倍率)` 对.
    pub fn seed_iter(&self) -> impl ExactSizeIterator<Item = (&Voxel, f32)> + '_ {
        self.seeds.iter().zip(self.seeds_r.iter().copied())
    }
}
