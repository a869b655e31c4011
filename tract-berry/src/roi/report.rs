//! 报告文本. 格式需要与下游报告生成保持一致, 数值按 `%.2g` 的规则输出.

use crate::consts::{phrase, REPORT_PRECISION};
use crate::Voxel;

/// 区域的质心与体积描述. 体素体积为 0 时返回空串.
///
/// `points` 为掩膜单元坐标, 质心需要除以倍率 `r` 换算回体素坐标;
/// 体积为 `n * voxel_volume / r³` 立方毫米.
/// 没有点时质心为 `nan`, 与已有报告的格式保持一致.
pub(super) fn region_geometry(points: &[Voxel], r: f32, voxel_volume: f32) -> String {
    if voxel_volume == 0.0 {
        return String::new();
    }
    let n = points.len() as f32;
    let mut center = [0.0f32; 3];
    for p in points {
        for (c, &v) in center.iter_mut().zip(p) {
            *c += v as f32;
        }
    }
    let [cx, cy, cz] = center.map(|c| c / n / r);
    let volume = n * voxel_volume / r / r / r;

    let mut out = format!(
        " ({},{},{}) with a volume size of {} mm cubic",
        format_g(cx),
        format_g(cy),
        format_g(cz),
        format_g(volume)
    );
    if r != 1.0 {
        out.push_str(" and a super resolution factor of ");
        out.push_str(&format_g(r));
    }
    out
}

/// 图谱先验说明. `tolerance_mm` 为换算成毫米并截断后的容差.
pub(super) fn atlas_sentence(bundle: &str, tolerance_mm: i32) -> String {
    format!(
        "{}{bundle}  with a distance tolerance of {tolerance_mm} (mm).",
        phrase::ATLAS_PRIOR
    )
}

/// 按 [`REPORT_PRECISION`] 位有效数字格式化.
#[inline]
fn format_g(v: f32) -> String {
    format_general(v as f64, REPORT_PRECISION)
}

/// C 语言 `%.{precision}g` 风格的浮点格式化.
///
/// 指数小于 -4 或不小于精度时使用科学计数法, 否则使用定点表示; 两者都去掉末尾的 0.
fn format_general(v: f64, precision: usize) -> String {
    if !v.is_finite() {
        return match v {
            v if v.is_nan() => "nan".to_owned(),
            v if v > 0.0 => "inf".to_owned(),
            _ => "-inf".to_owned(),
        };
    }
    if v == 0.0 {
        return "0".to_owned();
    }

    let p = precision.max(1);
    // 先按科学计数法舍入, 以得到舍入后的指数.
    let sci = format!("{:.*e}", p - 1, v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= p as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs())
    } else {
        let decimals = (p as i32 - 1 - exp) as usize;
        trim_zeros(&format!("{v:.decimals$}")).to_owned()
    }
}

#[inline]
fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
