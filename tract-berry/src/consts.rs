//! 通用常量.

/// 报告中各类区域的开头短语.
pub mod phrase {
    /// ROI (纤维必须经过的区域).
    pub const ROI: &str = " An ROI was placed at ";

    /// ROA (纤维不得经过的区域).
    pub const ROA: &str = " An ROA was placed at ";

    /// 端点区域.
    pub const END: &str = " An ending region was placed at ";

    /// 种子区域.
    pub const SEED: &str = " A seeding region was placed at ";

    /// 终止区域.
    pub const TERMINATE: &str = " A terminative region was placed at ";

    /// 禁止端点区域.
    pub const NO_END: &str = " A no ending region was placed at ";

    /// 图谱先验说明. 后接纤维束名称.
    pub const ATLAS_PRIOR: &str = " The anatomy prior of a tractography atlas \
        (Yeh et al., Neuroimage 178, 57-68, 2018) was used to map ";
}

/// 全脑种子区域的名称.
pub const WHOLE_BRAIN_LABEL: &str = "whole brain";

/// 图谱容差 ROA 的名称.
pub const TOLERANCE_REGION_LABEL: &str = "track tolerance region";

/// 图谱种子区域默认的膨胀次数.
pub const ATLAS_SEED_DILATION: u32 = 3;

/// 图谱种子区域默认的平滑次数.
pub const ATLAS_SEED_SMOOTHING: u32 = 2;

/// 平滑时, 3x3x3 邻域 (含自身) 内至少有这么多体素被标记, 中心体素才会被保留/填充.
pub const SMOOTHING_MAJORITY: usize = 14;

/// 报告中数值使用的有效数字位数.
pub const REPORT_PRECISION: usize = 2;
