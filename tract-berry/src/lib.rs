#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 提供纤维束追踪 (tractography) 中基于空间区域的纤维筛选引擎.
//!
//! 给定被试体数据的几何信息 (以及各向异性标量场), 调用者注册一系列带语义的体素区域
//! (ROI, ROA, 端点区域, 终止区域, 禁止端点区域, 种子区域), 之后在追踪阶段对每个候选点
//! 和每条完成的纤维做接受/拒绝判定.
//!
//! 该 crate 目前仅提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. 本 crate 不负责读取图像文件, 也不负责生成纤维. 纤维追踪积分器、NIfTI 读取、
//!   图谱配准等均由外部协作者完成.
//! 2. 注册阶段是单线程的 (`&mut self`); 冻结之后的所有查询都只需要 `&self`,
//!   可以在多个追踪线程之间直接共享, 无需加锁.
//!
//! # 功能概览
//!
//! ### 超分辨率体素掩膜 ✅
//!
//! 按 x 方向惰性分配的位图, 支持以任意缩放倍率做点查询.
//!
//! 实现位于 `tract-berry/src/mask.rs`.
//!
//! ### 区域集合与端点规则 ✅
//!
//! ROI 取 "与", ROA/终止/禁止端点区域取 "或". 端点规则对 0, 1, 2 和多于 2
//! 个端点区域分别处理.
//!
//! 实现位于 `tract-berry/src/roi`.
//!
//! ### 图谱引导的种子与容差区域 ✅
//!
//! 从参考纤维束图谱中栅格化目标纤维束, 膨胀 + 平滑后作为种子区域;
//! 并用邻域偏移表构造快速拒绝用的容差 ROA.
//!
//! 实现位于 `tract-berry/src/roi/atlas.rs` 和 `tract-berry/src/morph_3d`.
//!
//! ### 批量纤维筛选 ✅
//!
//! 对一批已完成的纤维同时应用 ROA, ROI 和端点规则.
//!
//! 实现位于 `tract-berry/src/filter.rs`.

/// 纤维上的点 (体素坐标系, 依次为 x, y, z). 坐标可以是小数.
pub type Point3 = [f32; 3];

/// 整数体素 (或超分辨率掩膜单元) 坐标, 依次为 x, y, z.
///
/// 使用有符号类型, 因为栅格化结果可能因舍入略微越界到负数方向.
pub type Voxel = [i16; 3];

/// 三维索引, 依次为 x, y, z. 内部使用, 保证非负.
type Idx3d = (usize, usize, usize);

pub mod consts;

mod error;

pub use error::{RoiError, RoiResult};

pub mod volume;

pub use volume::{FibVolume, TrackAtlas, VolumeDim};

mod mask;

pub use mask::VoxelMask;

pub mod morph_3d;

pub mod roi;

pub use roi::{AtlasSeeding, RegionRole, RoiMgr};

mod filter;

pub mod prelude;

#[cfg(test)]
mod test_utils;
