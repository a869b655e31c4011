//! 3D 形态学操作.
//!
//! 图谱种子区域需要 "膨胀三次, 平滑两次" 的处理, 容差 ROA 需要按半径预计算的
//! 线性偏移表. 这两部分都在本模块实现.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod region;
mod shift;

pub use region::RoiRegion;
pub use shift::NeighborShift;

/// 可作用于 [`RoiRegion`] 的形态学操作.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MorphOp {
    /// 按 6-邻域 (钻石型) 向外扩张一圈.
    Dilation,

    /// 去除单体素突起, 填补单体素凹陷.
    Smoothing,
}
