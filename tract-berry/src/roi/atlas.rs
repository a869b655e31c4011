//! 图谱引导的纤维束追踪: 自动生成种子区域和容差 ROA.

use log::{debug, info, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{report, RegionRole, RoiMgr};
use crate::consts::{ATLAS_SEED_DILATION, ATLAS_SEED_SMOOTHING, TOLERANCE_REGION_LABEL};
use crate::error::{RoiError, RoiResult};
use crate::morph_3d::{MorphOp, NeighborShift, RoiRegion};
use crate::Voxel;

/// 从图谱纤维束生成种子区域时的形态学参数.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AtlasSeeding {
    /// 膨胀次数.
    pub dilation: u32,

    /// 膨胀之后的平滑次数.
    pub smoothing: u32,
}

impl Default for AtlasSeeding {
    fn default() -> Self {
        Self {
            dilation: ATLAS_SEED_DILATION,
            smoothing: ATLAS_SEED_SMOOTHING,
        }
    }
}

impl RoiMgr<'_> {
    /// 使用默认形态学参数配置图谱引导追踪. 见 [`Self::set_atlas_with`].
    #[inline]
    pub fn set_atlas(&mut self, track_id: usize, false_distance: f32) -> RoiResult<()> {
        self.set_atlas_with(track_id, false_distance, AtlasSeeding::default())
    }

    /// 以图谱中第 `track_id` 个纤维束为目标, 配置图谱引导追踪.
    ///
    /// `false_distance` 为距离容差 (单位: 体素). 依次执行:
    ///
    /// 1. 记录目标纤维束与容差, 并向报告追加图谱先验说明;
    /// 2. 若尚无种子, 将纤维束栅格化, 按 `seeding` 膨胀并平滑后注册为种子区域;
    /// 3. 将 "脑组织内 (各向异性值大于 0) 但距纤维束超过容差" 的体素注册为 ROA,
    ///   以便在昂贵的图谱距离计算之前快速拒绝.
    ///
    /// # 错误
    ///
    /// 未加载图谱时返回 [`RoiError::AtlasUnavailable`];
    /// `track_id` 越界时返回 [`RoiError::InvalidTrackId`].
    /// 出错时已有的区域, 种子和报告都保持不变.
    pub fn set_atlas_with(
        &mut self,
        track_id: usize,
        false_distance: f32,
        seeding: AtlasSeeding,
    ) -> RoiResult<()> {
        let handle = self.handle;
        let Some(atlas) = handle.atlas() else {
            warn!("cannot map track {track_id}: no tractography atlas loaded");
            return Err(RoiError::AtlasUnavailable);
        };
        let names = atlas.bundle_names();
        let Some(name) = names.get(track_id) else {
            warn!("invalid track_id {track_id}, the atlas has {} bundles", names.len());
            return Err(RoiError::InvalidTrackId {
                track_id,
                bundle_count: names.len(),
            });
        };

        self.false_distance = false_distance;
        self.track_id = track_id;
        let tolerance_mm = (false_distance * handle.voxel_size()[0]) as i32;
        self.report.push_str(&report::atlas_sentence(name, tolerance_mm));
        info!("mapping {name} with a distance tolerance of {tolerance_mm} mm");

        let bundle = atlas.to_voxel(track_id);
        if self.seeds.is_empty() {
            let mut region = RoiRegion::new(handle.dim());
            region.add_points(&bundle);
            for _ in 0..seeding.dilation {
                region.perform(MorphOp::Dilation);
            }
            for _ in 0..seeding.smoothing {
                region.perform(MorphOp::Smoothing);
            }
            let seeds = region.voxels();
            debug!("{name}: {} atlas voxels -> {} seeds", bundle.len(), seeds.len());
            self.set_regions(&seeds, 1.0, RegionRole::Seed, name);
        }

        let roa = self.tolerance_region(&bundle, false_distance);
        debug!("{name}: tolerance region keeps {} voxels", roa.len());
        self.set_regions(&roa, 1.0, RegionRole::Roa, TOLERANCE_REGION_LABEL);
        Ok(())
    }

    /// 脑组织内, 距纤维束 `bundle` 超过 `floor(false_distance) + 1` 的体素.
    ///
    /// 越界的纤维束体素被忽略. 邻域按展平后的线性索引应用, 见 [`NeighborShift`].
    fn tolerance_region(&self, bundle: &[Voxel], false_distance: f32) -> Vec<Voxel> {
        let dim = self.handle.dim();
        let mut mask: Vec<u8> = self
            .handle
            .anisotropy_iter()
            .map(|v| u8::from(v > 0.0))
            .collect();

        let radius = false_distance.max(0.0) as usize + 1;
        let anchors = bundle
            .iter()
            .filter_map(|v| dim.check_voxel(v))
            .map(|pos| dim.linear_index(pos));
        NeighborShift::new(dim, radius).clear_around(&mut mask, anchors);

        let keep = |(i, &v): (usize, &u8)| (v != 0).then(|| dim.voxel_at(i));
        let roa: Vec<Voxel>;
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;
                roa = mask.par_iter().enumerate().filter_map(keep).collect();
            } else {
                roa = mask.iter().enumerate().filter_map(keep).collect();
            }
        }
        roa
    }
}
