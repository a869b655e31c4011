//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Point3, Voxel};

pub use crate::volume::{FibVolume, TrackAtlas, VolumeDim};

pub use crate::mask::VoxelMask;

pub use crate::morph_3d::{MorphOp, NeighborShift, RoiRegion};

pub use crate::roi::{AtlasSeeding, RegionRole, RoiMgr};

pub use crate::error::{RoiError, RoiResult};

pub use crate::consts::{TOLERANCE_REGION_LABEL, WHOLE_BRAIN_LABEL};
