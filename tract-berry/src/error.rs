//! 运行时错误.

/// 配置图谱引导追踪时的错误. 出错时已注册的区域和报告均保持不变.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoiError {
    /// 请求的纤维束编号不在图谱名称列表范围内.
    #[error("invalid track_id {track_id}: the atlas has {bundle_count} bundles")]
    InvalidTrackId {
        /// 请求的纤维束编号.
        track_id: usize,
        /// 图谱中纤维束的个数.
        bundle_count: usize,
    },

    /// 尚未加载纤维束图谱.
    #[error("no tractography atlas is available for this volume")]
    AtlasUnavailable,
}

/// ROI 配置运行时错误.
pub type RoiResult<T> = Result<T, RoiError>;
