//! 测试辅助.

use crate::{FibVolume, Idx3d, TrackAtlas, Voxel, VolumeDim};

/// 打开调试日志. 可重复调用.
pub(crate) fn init_logger() {
    let _ = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init();
}

/// 各向异性场处处等于 `fill` 的体积.
pub(crate) fn volume(dim: VolumeDim, voxel_size: [f32; 3], fill: f32) -> FibVolume {
    volume_with(dim, voxel_size, |_| fill)
}

/// 各向异性场由 `f((x, y, z))` 给出的体积.
pub(crate) fn volume_with(
    dim: VolumeDim,
    voxel_size: [f32; 3],
    f: impl Fn(Idx3d) -> f32,
) -> FibVolume {
    let raw = (0..dim.size())
        .map(|i| {
            let [x, y, z] = dim.voxel_at(i);
            f((x as usize, y as usize, z as usize))
        })
        .collect();
    FibVolume::from_raw(dim, voxel_size, raw).unwrap()
}

/// 以体素列表直接表示纤维束的图谱.
///
/// `find_nearest` 返回覆盖纤维点最多的纤维束: 纤维点到该纤维束最近体素的距离
/// 不超过 `tolerance` 即视为覆盖.
#[derive(Debug, Clone)]
pub(crate) struct StubAtlas {
    names: Vec<String>,
    bundles: Vec<Vec<Voxel>>,
}

impl StubAtlas {
    pub(crate) fn new(bundles: Vec<(String, Vec<Voxel>)>) -> Self {
        let (names, bundles) = bundles.into_iter().unzip();
        Self { names, bundles }
    }

    fn covered(bundle: &[Voxel], track: &[f32], tolerance: f32) -> usize {
        track
            .chunks_exact(3)
            .filter(|p| {
                bundle.iter().any(|v| {
                    let d2: f32 = v
                        .iter()
                        .zip(p.iter())
                        .map(|(&a, &b)| (a as f32 - b).powi(2))
                        .sum();
                    d2 <= tolerance * tolerance
                })
            })
            .count()
    }
}

impl TrackAtlas for StubAtlas {
    fn bundle_names(&self) -> &[String] {
        &self.names
    }

    fn to_voxel(&self, track_id: usize) -> Vec<Voxel> {
        self.bundles.get(track_id).cloned().unwrap_or_default()
    }

    fn find_nearest(&self, track: &[f32], tolerance: f32) -> Option<usize> {
        self.bundles
            .iter()
            .map(|b| Self::covered(b, track, tolerance))
            .enumerate()
            .filter(|&(_, n)| n > 0)
            .max_by_key(|&(_, n)| n)
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::{volume_with, StubAtlas};
    use crate::{TrackAtlas, VolumeDim};

    #[test]
    fn test_volume_with_layout() {
        let vol = volume_with(VolumeDim::new(3, 2, 2), [1.0; 3], |(x, y, z)| {
            (x + 10 * y + 100 * z) as f32
        });
        assert_eq!(vol.anisotropy()[[1, 1, 2]], 112.0);
        assert_eq!(vol.voxels_above(111.5), vec![[2, 1, 1]]);
    }

    #[test]
    fn test_stub_atlas() {
        let atlas = StubAtlas::new(vec![
            ("a".to_owned(), vec![[0, 0, 0]]),
            ("b".to_owned(), vec![[5, 5, 5], [6, 5, 5]]),
        ]);
        assert_eq!(atlas.bundle_names().len(), 2);
        assert!(atlas.to_voxel(7).is_empty());
        assert_eq!(atlas.find_nearest(&[5.5, 5.0, 5.0], 1.0), Some(1));
        assert_eq!(atlas.find_nearest(&[0.5, 0.0, 0.0, 9.0, 9.0, 9.0], 1.0), Some(0));
        assert_eq!(atlas.find_nearest(&[9.0, 9.0, 9.0], 1.0), None);
    }
}
