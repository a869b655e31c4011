//! 区域集合管理: 注册 ROI/ROA/端点/终止/禁止端点/种子区域, 并在追踪阶段回答查询.

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::phrase;
use crate::mask::VoxelMask;
use crate::volume::FibVolume;
use crate::Voxel;

mod atlas;
mod query;
mod report;
mod seed;

pub use atlas::AtlasSeeding;

/// 区域的语义角色.
///
/// 每个角色都有一个历史沿用的数字编码, 见 [`Self::code`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegionRole {
    /// 纤维必须经过的区域 (ROI). 多个 ROI 之间取 "与".
    Roi,

    /// 纤维不得经过的区域 (ROA). 多个 ROA 之间取 "或".
    Roa,

    /// 端点区域. 约束纤维两个端点的落点.
    End,

    /// 种子区域. 不构建掩膜, 直接交给追踪积分器.
    Seed,

    /// 终止区域. 纤维生长到此处即停止, 但纤维本身可以保留.
    Terminate,

    /// 禁止端点区域. 任一端点落入即判定端点不合格.
    NoEnd,
}

impl RegionRole {
    /// 从数字编码构建. 未知编码返回 `None`.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Roi),
            1 => Some(Self::Roa),
            2 => Some(Self::End),
            3 => Some(Self::Seed),
            4 => Some(Self::Terminate),
            5 => Some(Self::NoEnd),
            _ => None,
        }
    }

    /// 数字编码.
    pub const fn code(&self) -> u8 {
        match self {
            Self::Roi => 0,
            Self::Roa => 1,
            Self::End => 2,
            Self::Seed => 3,
            Self::Terminate => 4,
            Self::NoEnd => 5,
        }
    }

    /// 报告中该角色的开头短语.
    const fn phrase(&self) -> &'static str {
        match self {
            Self::Roi => phrase::ROI,
            Self::Roa => phrase::ROA,
            Self::End => phrase::END,
            Self::Seed => phrase::SEED,
            Self::Terminate => phrase::TERMINATE,
            Self::NoEnd => phrase::NO_END,
        }
    }
}

/// 一次追踪会话的区域集合.
///
/// 绑定到一个被试体数据 `handle`, 生命周期不超过它. 先通过
/// [`Self::set_regions`], [`Self::set_atlas`], [`Self::set_whole_brain_seed`]
/// 等方法单线程地注册区域, 之后冻结, 以 `&self` 在多个追踪线程中并发查询.
#[derive(Debug)]
pub struct RoiMgr<'a> {
    handle: &'a FibVolume,
    report: String,
    seeds: Vec<Voxel>,
    seeds_r: Vec<f32>,
    inclusive: Vec<VoxelMask>,
    end: Vec<VoxelMask>,
    exclusive: Vec<VoxelMask>,
    terminate: Vec<VoxelMask>,
    no_end: Vec<VoxelMask>,
    false_distance: f32,
    track_id: usize,
}

impl<'a> RoiMgr<'a> {
    /// 创建绑定到 `handle` 的空区域集合.
    pub fn new(handle: &'a FibVolume) -> Self {
        Self {
            handle,
            report: String::new(),
            seeds: Vec::new(),
            seeds_r: Vec::new(),
            inclusive: Vec::new(),
            end: Vec::new(),
            exclusive: Vec::new(),
            terminate: Vec::new(),
            no_end: Vec::new(),
            false_distance: 0.0,
            track_id: 0,
        }
    }

    /// 注册一个区域.
    ///
    /// `points` 是掩膜单元坐标, 即已经乘过超分辨率倍率 `r` 的体素坐标.
    /// 对于种子区域, `points` 与 `r` 原样追加到种子列表; 其余角色会在
    /// `(handle.dim(), r)` 上新建一个 [`VoxelMask`]. 越界点被静默忽略.
    ///
    /// 无论哪种角色, 都会向报告追加一句描述, 该描述不影响任何判定.
    pub fn set_regions(&mut self, points: &[Voxel], r: f32, role: RegionRole, name: &str) {
        match role {
            RegionRole::Seed => {
                self.seeds.extend_from_slice(points);
                self.seeds_r.extend(std::iter::repeat(r).take(points.len()));
            }
            _ => {
                let mut mask = VoxelMask::new(self.handle.dim(), r);
                for p in points {
                    mask.add_cell(p);
                }
                debug!(
                    "{role:?} region \"{name}\": {} points, {} cells at ratio {r}",
                    points.len(),
                    mask.len()
                );
                if let Some(regions) = self.regions_mut(role) {
                    regions.push(mask);
                }
            }
        }

        self.report.push_str(role.phrase());
        self.report.push_str(name);
        if role != RegionRole::Seed {
            let geometry = report::region_geometry(points, r, self.handle.voxel_volume());
            self.report.push_str(&geometry);
        }
        self.report.push('.');
    }

    /// 以数字编码注册区域. 未知编码时什么也不做并返回 `false`.
    pub fn set_regions_by_code(&mut self, points: &[Voxel], r: f32, code: u8, name: &str) -> bool {
        match RegionRole::from_code(code) {
            Some(role) => {
                self.set_regions(points, r, role, name);
                true
            }
            None => false,
        }
    }

    /// 角色对应的掩膜集合. 种子没有掩膜, 返回 `None`.
    fn regions_mut(&mut self, role: RegionRole) -> Option<&mut Vec<VoxelMask>> {
        match role {
            RegionRole::Roi => Some(&mut self.inclusive),
            RegionRole::Roa => Some(&mut self.exclusive),
            RegionRole::End => Some(&mut self.end),
            RegionRole::Terminate => Some(&mut self.terminate),
            RegionRole::NoEnd => Some(&mut self.no_end),
            RegionRole::Seed => None,
        }
    }

    /// 角色对应的掩膜集合, 按注册顺序排列. 种子角色返回空切片.
    pub fn regions(&self, role: RegionRole) -> &[VoxelMask] {
        match role {
            RegionRole::Roi => &self.inclusive,
            RegionRole::Roa => &self.exclusive,
            RegionRole::End => &self.end,
            RegionRole::Terminate => &self.terminate,
            RegionRole::NoEnd => &self.no_end,
            RegionRole::Seed => &[],
        }
    }

    /// 绑定的被试体数据.
    #[inline]
    pub fn handle(&self) -> &'a FibVolume {
        self.handle
    }

    /// 累积的区域描述文本, 仅用于溯源记录.
    #[inline]
    pub fn report(&self) -> &str {
        &self.report
    }

    /// 图谱距离容差 (单位: 体素). 为 0 时不做图谱匹配.
    #[inline]
    pub fn false_distance(&self) -> f32 {
        self.false_distance
    }

    /// 图谱中的目标纤维束编号.
    #[inline]
    pub fn track_id(&self) -> usize {
        self.track_id
    }
}

#[cfg(test)]
mod tests {
    use super::{RegionRole, RoiMgr};
    use crate::test_utils::{init_logger, volume};
    use crate::VolumeDim;

    #[test]
    fn test_role_codes() {
        for code in 0..6u8 {
            let role = RegionRole::from_code(code).unwrap();
            assert_eq!(role.code(), code);
        }
        assert_eq!(RegionRole::from_code(6), None);
        assert_eq!(RegionRole::from_code(255), None);
    }

    #[test]
    fn test_set_regions_by_role() {
        init_logger();
        let vol = volume(VolumeDim::new(10, 10, 10), [1.0; 3], 0.0);
        let mut mgr = RoiMgr::new(&vol);

        mgr.set_regions(&[[1, 1, 1]], 1.0, RegionRole::Roi, "a");
        mgr.set_regions(&[[2, 2, 2]], 1.0, RegionRole::Roa, "b");
        mgr.set_regions(&[[3, 3, 3]], 1.0, RegionRole::End, "c");
        mgr.set_regions(&[[4, 4, 4]], 1.0, RegionRole::Terminate, "d");
        mgr.set_regions(&[[5, 5, 5]], 1.0, RegionRole::NoEnd, "e");
        mgr.set_regions(&[[6, 6, 6], [7, 7, 7]], 2.0, RegionRole::Seed, "f");

        assert_eq!(mgr.regions(RegionRole::Roi).len(), 1);
        assert_eq!(mgr.regions(RegionRole::Roa).len(), 1);
        assert_eq!(mgr.regions(RegionRole::End).len(), 1);
        assert_eq!(mgr.regions(RegionRole::Terminate).len(), 1);
        assert_eq!(mgr.regions(RegionRole::NoEnd).len(), 1);
        assert!(mgr.regions(RegionRole::Seed).is_empty());
        assert!(mgr.regions(RegionRole::Roa)[0].contains(2.0, 2.0, 2.0));
        assert!(!mgr.regions(RegionRole::Roa)[0].contains(1.0, 1.0, 1.0));

        assert_eq!(mgr.seeds(), &[[6, 6, 6], [7, 7, 7]]);
        assert_eq!(mgr.seeds_r(), &[2.0, 2.0]);
    }

    #[test]
    fn test_super_resolution_region_uses_mask_cells() {
        let vol = volume(VolumeDim::new(10, 10, 10), [1.0; 3], 0.0);
        let mut mgr = RoiMgr::new(&vol);
        // 掩膜单元 (9, 9, 9) 在 2 倍超分辨率下对应体素坐标 (4.5, 4.5, 4.5)
        mgr.set_regions(&[[9, 9, 9]], 2.0, RegionRole::Roa, "fine");
        assert!(mgr.is_excluded_point(&[4.5, 4.5, 4.5]));
        assert!(mgr.is_excluded_point(&[4.4, 4.6, 4.5]));
        assert!(!mgr.is_excluded_point(&[4.0, 4.0, 4.0]));
        assert!(!mgr.is_excluded_point(&[9.0, 9.0, 9.0]));
    }

    #[test]
    fn test_unknown_code_is_noop() {
        let vol = volume(VolumeDim::new(10, 10, 10), [1.0; 3], 0.0);
        let mut mgr = RoiMgr::new(&vol);
        assert!(!mgr.set_regions_by_code(&[[1, 1, 1]], 1.0, 9, "nothing"));
        assert!(mgr.report().is_empty());
        assert!(mgr.seeds().is_empty());
        for code in 0..6 {
            assert!(mgr.regions(RegionRole::from_code(code).unwrap()).is_empty());
        }

        assert!(mgr.set_regions_by_code(&[[1, 1, 1]], 1.0, 4, "stop"));
        assert!(mgr.is_terminate_point(&[1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_report_sentences() {
        let vol = volume(VolumeDim::new(20, 20, 20), [2.0, 2.0, 2.0], 0.0);
        let mut mgr = RoiMgr::new(&vol);

        mgr.set_regions(&[[2, 4, 6], [4, 6, 8]], 1.0, RegionRole::Roi, "left");
        assert_eq!(
            mgr.report(),
            " An ROI was placed at left (3,5,7) with a volume size of 16 mm cubic."
        );

        let mut mgr = RoiMgr::new(&vol);
        mgr.set_regions(&[[2, 4, 6], [4, 6, 8]], 2.0, RegionRole::End, "right");
        assert_eq!(
            mgr.report(),
            " An ending region was placed at right (1.5,2.5,3.5) with a volume size of 2 mm cubic \
             and a super resolution factor of 2."
        );

        let mut mgr = RoiMgr::new(&vol);
        mgr.set_regions(&[[1, 1, 1]], 1.0, RegionRole::Seed, "seedling");
        mgr.set_regions(&[[1, 1, 1]], 1.0, RegionRole::NoEnd, "n");
        mgr.set_regions(&[[1, 1, 1]], 1.0, RegionRole::Terminate, "t");
        mgr.set_regions(&[[1, 1, 1]], 1.0, RegionRole::Roa, "x");
        assert_eq!(
            mgr.report(),
            " A seeding region was placed at seedling. \
             A no ending region was placed at n (1,1,1) with a volume size of 8 mm cubic. \
             A terminative region was placed at t (1,1,1) with a volume size of 8 mm cubic. \
             An ROA was placed at x (1,1,1) with a volume size of 8 mm cubic."
        );
    }

    #[test]
    fn test_report_without_voxel_size() {
        let vol = volume(VolumeDim::new(5, 5, 5), [0.0, 1.0, 1.0], 0.0);
        let mut mgr = RoiMgr::new(&vol);
        mgr.set_regions(&[[1, 1, 1]], 1.0, RegionRole::Roi, "plain");
        mgr.set_regions(&[], 1.0, RegionRole::Roi, "empty");
        assert_eq!(
            mgr.report(),
            " An ROI was placed at plain. An ROI was placed at empty."
        );
        assert_eq!(mgr.regions(RegionRole::Roi).len(), 2);
    }

    #[test]
    fn test_report_empty_region() {
        let vol = volume(VolumeDim::new(5, 5, 5), [1.0; 3], 0.0);
        let mut mgr = RoiMgr::new(&vol);
        mgr.set_regions(&[], 1.0, RegionRole::Roa, "nothing");
        assert_eq!(
            mgr.report(),
            " An ROA was placed at nothing (nan,nan,nan) with a volume size of 0 mm cubic."
        );
        assert!(mgr.regions(RegionRole::Roa)[0].is_empty());
    }
}
