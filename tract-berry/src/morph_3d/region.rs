use ndarray::{s, Array3, Zip};

use super::MorphOp;
use crate::consts::SMOOTHING_MAJORITY;
use crate::volume::VolumeDim;
use crate::{Idx3d, Voxel};

/// 体积上的稠密体素区域, 供形态学处理使用.
///
/// 内部以 `(z, y, x)` 标准布局的 `Array3<u8>` 保存, 非零即前景.
#[derive(Debug, Clone)]
pub struct RoiRegion {
    dim: VolumeDim,
    data: Array3<u8>,
}

impl RoiRegion {
    /// 在体积 `dim` 上创建空区域.
    pub fn new(dim: VolumeDim) -> Self {
        Self {
            dim,
            data: Array3::zeros(dim.shape()),
        }
    }

    /// 体积尺寸.
    #[inline]
    pub fn dim(&self) -> VolumeDim {
        self.dim
    }

    /// 加入一组体素. 越界体素被静默忽略.
    pub fn add_points(&mut self, voxels: &[Voxel]) {
        let dim = self.dim;
        for pos in voxels.iter().filter_map(|v| dim.check_voxel(v)) {
            self[pos] = 1;
        }
    }

    /// 体素是否属于该区域. 越界时返回 `false`.
    #[inline]
    pub fn contains(&self, voxel: &Voxel) -> bool {
        self.dim.check_voxel(voxel).is_some_and(|pos| self[pos] != 0)
    }

    /// 区域体素个数.
    pub fn len(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// 区域是否为空.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// 按线性索引升序收集区域内的所有体素.
    pub fn voxels(&self) -> Vec<Voxel> {
        self.data
            .indexed_iter()
            .filter(|(_, &v)| v != 0)
            .map(|((z, y, x), _)| [x as i16, y as i16, z as i16])
            .collect()
    }

    /// 执行一次形态学操作.
    pub fn perform(&mut self, op: MorphOp) {
        match op {
            MorphOp::Dilation => self.dilate(),
            MorphOp::Smoothing => self.smooth(),
        }
    }

    /// 按 6-邻域向外扩张一圈.
    pub fn dilate(&mut self) {
        let mut out = self.data.clone();
        for ((z, y, x), _) in self.data.indexed_iter().filter(|(_, &v)| v != 0) {
            for (nx, ny, nz) in self.diamond_neighbours((x, y, z)) {
                out[[nz, ny, nx]] = 1;
            }
        }
        self.data = out;
    }

    /// 平滑: 体素被保留 (或填充) 当且仅当其 3x3x3 邻域 (含自身)
    /// 中至少有 [`SMOOTHING_MAJORITY`] 个前景体素. 体积外视为背景.
    pub fn smooth(&mut self) {
        let mut out = Array3::<u8>::zeros(self.dim.shape());
        let zip = Zip::indexed(&mut out);
        let op = |(z, y, x): Idx3d, v: &mut u8| {
            *v = u8::from(self.block_count((x, y, z)) >= SMOOTHING_MAJORITY);
        };
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                zip.par_for_each(op);
            } else {
                zip.for_each(op);
            }
        }
        self.data = out;
    }

    /// 以 `(x, y, z)` 为中心的 3x3x3 块内 (裁剪到体积内) 的前景体素个数.
    fn block_count(&self, (x, y, z): Idx3d) -> usize {
        let (d, h, w) = self.dim.shape();
        let span = |v: usize, n: usize| v.saturating_sub(1)..=(v + 1).min(n - 1);
        self.data
            .slice(s![span(z, d), span(y, h), span(x, w)])
            .iter()
            .filter(|&&v| v != 0)
            .count()
    }

    /// 6-邻域中不越界的体素.
    #[inline]
    fn diamond_neighbours(&self, (x, y, z): Idx3d) -> Vec<Idx3d> {
        self.check_collect([
            (x.wrapping_sub(1), y, z),
            (x.saturating_add(1), y, z),
            (x, y.wrapping_sub(1), z),
            (x, y.saturating_add(1), z),
            (x, y, z.wrapping_sub(1)),
            (x, y, z.saturating_add(1)),
        ])
    }

    /// 收集 `data` 中不越界的索引.
    #[inline]
    fn check_collect<B: FromIterator<Idx3d>, const N: usize>(&self, data: [Idx3d; N]) -> B {
        let (w, h, d) = (self.dim.width(), self.dim.height(), self.dim.depth());
        data.into_iter()
            .filter(|&(x, y, z)| x < w && y < h && z < d)
            .collect()
    }
}

impl std::ops::Index<Idx3d> for RoiRegion {
    type Output = u8;

    /// 以 `(x, y, z)` 索引. 越界时 panic.
    #[inline]
    fn index(&self, (x, y, z): Idx3d) -> &Self::Output {
        &self.data[[z, y, x]]
    }
}

impl std::ops::IndexMut<Idx3d> for RoiRegion {
    #[inline]
    fn index_mut(&mut self, (x, y, z): Idx3d) -> &mut Self::Output {
        &mut self.data[[z, y, x]]
    }
}
