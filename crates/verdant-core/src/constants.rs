//! Single source of truth for shared constants.
//! Tunable values also appear as defaults in `params.rs` and `data/sim.ron`;
//! keep the three in sync.

/// Value substituted for any scalar property of a voxel without a record.
pub const NEUTRAL_SCALAR: f64 = 0.5;

/// Dry soil density in kg/m^3.
pub const DRY_SOIL_DENSITY: f64 = 1600.0;

/// Liquid water density in kg/m^3.
pub const WATER_DENSITY: f64 = 1000.0;

/// Rock density in kg/m^3.
pub const ROCK_DENSITY: f64 = 2600.0;

/// Organic matter density in kg/m^3, used by the clamp/recompute density table.
pub const ORGANIC_DENSITY: f64 = 1300.0;

/// Fraction of soil volume that is pore space (filled by water at humidity 1.0).
pub const SOIL_POROSITY: f64 = 0.5;

/// Edge length of one voxel in meters.
pub const VOXEL_EDGE_M: f64 = 1.0;

/// Volume of one voxel in m^3.
pub const VOXEL_VOLUME_M3: f64 = VOXEL_EDGE_M * VOXEL_EDGE_M * VOXEL_EDGE_M;

/// Degrees of latitude per meter of +z travel (mean meridian arc).
pub const DEGREES_PER_METER_LAT: f64 = 1.0 / 111_320.0;

/// Degrees of longitude per meter of +x travel at the equatorial reference.
pub const DEGREES_PER_METER_LON: f64 = 1.0 / 111_320.0;

/// Default logical tick length in seconds (one simulated hour).
pub const DEFAULT_DT: f64 = 3600.0;

/// Default diffusion rate multiplier.
pub const DIFFUSION_RATE: f64 = 0.1;

/// Coefficient used when a voxel has no composition data.
pub const UNIFORM_CONDUCTIVITY: f64 = 0.1;

/// Water amount below which a water voxel evaporates.
pub const EVAPORATION_THRESHOLD: f64 = 0.01;

/// Maximum water moved into a lower water voxel per tick.
pub const SPILL_MAX_TRANSFER: f64 = 0.1;

/// Water amount above which a water voxel may create a new voxel below it.
pub const SPILL_CREATE_THRESHOLD: f64 = 0.1;

/// Lower bound of the informational water height.
pub const WATER_MIN_HEIGHT: f64 = 0.05;

/// Upper bound of the informational water height.
pub const WATER_MAX_HEIGHT: f64 = 1.0;

/// Default maximum pick ray length in voxels.
pub const PICK_MAX_DISTANCE: f32 = 50.0;

/// Default pick ray sampling increment in voxels.
pub const PICK_STEP: f32 = 0.05;

/// Upper bound on a single explicit diffusion step: rate * dt * max_coefficient * 6 < 1.0.
pub const DIFFUSION_STABILITY_LIMIT: f64 = 1.0;

/// Largest coefficient the composition conductivity model yields when every
/// fraction lies in [0, 1] (heat: 0.2 + 0.6 + 0.4 + 0.2 + 0.05).
pub const MAX_COMPOSITION_CONDUCTIVITY: f64 = 1.45;
