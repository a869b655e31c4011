//! 追踪阶段的只读查询. 所有方法只需要 `&self`, 可以跨线程并发调用.

use super::RoiMgr;
use crate::Point3;

impl RoiMgr<'_> {
    /// 点是否落在任一 ROA 内.
    #[inline]
    pub fn is_excluded_point(&self, point: &Point3) -> bool {
        self.exclusive.iter().any(|r| r.contains_point(point))
    }

    /// 点是否落在任一终止区域内. 积分器据此停止延伸纤维, 已生长的部分仍可保留.
    #[inline]
    pub fn is_terminate_point(&self, point: &Point3) -> bool {
        self.terminate.iter().any(|r| r.contains_point(point))
    }

    /// 纤维的两个端点 `p1`, `p2` 是否满足端点约束.
    ///
    /// 1. 任一端点落入任一禁止端点区域, 直接判定失败 (优先于其余规则).
    /// 2. 没有端点区域时总是成功.
    /// 3. 只有一个端点区域时, 任一端点落入即可.
    /// 4. 有两个端点区域时, 两个端点必须分别落在两个区域内 (顺序不限).
    /// 5. 多于两个时按注册顺序扫描, 见下文.
    ///
    /// # 注意
    ///
    /// 多于两个端点区域时, 逐个区域检查: 若区域包含 `p1` 则记 `p1` 命中,
    /// **否则** 若包含 `p2` 则记 `p2` 命中; 两者都命中即成功.
    /// 结果依赖扫描顺序, 与两个区域时的对称规则并不一致: 例如区域 0 只含 `p1`,
    /// 区域 1 同时含 `p1` 与 `p2` 时, `p2` 永远不会被记录.
    /// 为与已有追踪结果保持一致, 这里不做修改.
    pub fn fulfill_end_point(&self, p1: &Point3, p2: &Point3) -> bool {
        if self
            .no_end
            .iter()
            .any(|r| r.contains_point(p1) || r.contains_point(p2))
        {
            return false;
        }

        match self.end.as_slice() {
            [] => true,
            [e] => e.contains_point(p1) || e.contains_point(p2),
            [r0, r1] => {
                (r0.contains_point(p1) && r1.contains_point(p2))
                    || (r1.contains_point(p1) && r0.contains_point(p2))
            }
            regions => {
                let (mut end_point1, mut end_point2) = (false, false);
                for r in regions {
                    if r.contains_point(p1) {
                        end_point1 = true;
                    } else if r.contains_point(p2) {
                        end_point2 = true;
                    }
                    if end_point1 && end_point2 {
                        return true;
                    }
                }
                false
            }
        }
    }

    /// 展平的纤维 `track` 是否经过所有 ROI.
    ///
    /// 若配置了图谱容差 (`false_distance != 0`), 还要求图谱最近纤维束恰为目标纤维束.
    /// 未加载图谱时该项检查视为不匹配.
    pub fn have_include(&self, track: &[f32]) -> bool {
        if !self.inclusive.iter().all(|r| r.contains_any(track)) {
            return false;
        }
        if self.false_distance != 0.0 {
            return self
                .handle
                .atlas()
                .and_then(|atlas| atlas.find_nearest(track, self.false_distance))
                == Some(self.track_id);
        }
        true
    }
}
