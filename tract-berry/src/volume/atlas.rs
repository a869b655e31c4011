use crate::Voxel;

/// 已配准到被试体空间的参考纤维束图谱.
///
/// 图谱的加载与配准由外部完成. 该 trait 只描述筛选引擎实际用到的三个能力.
/// 因为追踪阶段会在多个线程中并发调用 [`Self::find_nearest`],
/// 实现者必须是 `Send + Sync` 的.
pub trait TrackAtlas: Send + Sync {
    /// 纤维束名称列表. 纤维束编号即该列表的下标.
    fn bundle_names(&self) -> &[String];

    /// 将第 `track_id` 个纤维束的参考纤维栅格化为体素坐标 (单位倍率).
    ///
    /// 结果可以包含重复体素, 也可以包含略微越界的体素.
    fn to_voxel(&self, track_id: usize) -> Vec<Voxel>;

    /// 查找与纤维 `track` (展平的 `[x, y, z, x, y, z, ...]`) 最匹配的纤维束编号.
    ///
    /// 若在 `tolerance` (单位: 体素) 内没有匹配, 则返回 `None`.
    fn find_nearest(&self, track: &[f32], tolerance: f32) -> Option<usize>;
}
