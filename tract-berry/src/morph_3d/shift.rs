use crate::volume::VolumeDim;

/// 按半径预计算的邻域线性偏移表.
///
/// 对所有满足 `dx² + dy² + dz² <= radius²` 的整数偏移,
/// 保存其在展平体积中的线性增量 `dx + dy * w + dz * w * h`.
///
/// # 注意
///
/// 应用偏移时只按展平数组长度检查越界, 不逐轴检查.
/// 因此靠近体积边缘的偏移可能 "绕回" 到相邻的行或平面.
/// 这是容差 ROA 可以接受的近似.
#[derive(Debug, Clone)]
pub struct NeighborShift {
    radius: usize,
    index_shift: Vec<isize>,
}

impl NeighborShift {
    /// 在体积 `dim` 上构建半径为 `radius` 的偏移表.
    pub fn new(dim: VolumeDim, radius: usize) -> Self {
        let r = radius as isize;
        let (stride_y, stride_z) = (dim.width() as isize, dim.plane_size() as isize);
        let mut index_shift = Vec::with_capacity((2 * radius + 1).pow(3));

        for dz in -r..=r {
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx * dx + dy * dy + dz * dz <= r * r {
                        index_shift.push(dx + dy * stride_y + dz * stride_z);
                    }
                }
            }
        }
        index_shift.shrink_to_fit();
        Self {
            radius,
            index_shift,
        }
    }

    /// 邻域半径.
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// 所有线性偏移, 按 `(dz, dy, dx)` 字典序排列.
    #[inline]
    pub fn shifts(&self) -> &[isize] {
        &self.index_shift
    }

    /// 以线性索引 `center` 为中心, 迭代所有落在 `[0, len)` 内的邻域线性索引.
    pub fn around(&self, center: usize, len: usize) -> impl Iterator<Item = usize> + '_ {
        self.index_shift
            .iter()
            .map(move |&s| center as isize + s)
            .filter(move |&pos| pos >= 0 && (pos as usize) < len)
            .map(|pos| pos as usize)
    }

    /// 将 `mask` 中每个锚点 (线性索引) 的邻域 (按本偏移表) 清零.
    ///
    /// 与 [`Self::around`] 一样只按 `mask` 的长度检查越界.
    /// 代价只与锚点个数和偏移表大小有关, 与体积大小无关.
    pub fn clear_around<I>(&self, mask: &mut [u8], anchors: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let len = mask.len();
        for anchor in anchors {
            for pos in self.around(anchor, len) {
                mask[pos] = 0;
            }
        }
    }
}
