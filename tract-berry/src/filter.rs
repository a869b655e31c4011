//! 对已完成的纤维做整体判定, 支持批量并行筛选.

use itertools::Itertools;
use log::debug;

use crate::roi::RoiMgr;
use crate::Point3;

impl RoiMgr<'_> {
    /// 完整的纤维 `track` (展平的 `[x, y, z, x, y, z, ...]`) 是否被接受.
    ///
    /// 依次检查: 没有任何点落入 ROA; 经过所有 ROI (以及图谱匹配);
    /// 首尾两点满足端点规则. 不足一个完整点的纤维总是被拒绝.
    pub fn is_accepted(&self, track: &[f32]) -> bool {
        let (Some(first), Some(last)) = (end_point(track, 0), end_point(track, track.len() / 3))
        else {
            return false;
        };
        if track
            .iter()
            .copied()
            .tuples()
            .any(|(x, y, z)| self.is_excluded_point(&[x, y, z]))
        {
            return false;
        }
        self.have_include(track) && self.fulfill_end_point(&first, &last)
    }

    /// 批量筛选, 返回被接受的纤维下标 (升序).
    pub fn filter_tracts<T>(&self, tracts: &[T]) -> Vec<usize>
    where
        T: AsRef<[f32]> + Sync,
    {
        let accepted = |(i, t): (usize, &T)| self.is_accepted(t.as_ref()).then_some(i);
        let kept: Vec<usize>;
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;
                kept = tracts.par_iter().enumerate().filter_map(accepted).collect();
            } else {
                kept = tracts.iter().enumerate().filter_map(accepted).collect();
            }
        }
        debug!("{} of {} tracts accepted", kept.len(), tracts.len());
        kept
    }
}

/// 第 `n` 个点 (`n == len / 3` 时取最后一个点).
#[inline]
fn end_point(track: &[f32], n: usize) -> Option<Point3> {
    let n = n.min((track.len() / 3).checked_sub(1)?);
    let p = &track[n * 3..n * 3 + 3];
    Some([p[0], p[1], p[2]])
}
