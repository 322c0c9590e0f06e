/// Geometric constants shared by the portal passes and the scripted motion
use glam::Vec3;

/// Ghost position published for spheres that are not partially inside a portal
pub const GHOST_SENTINEL: Vec3 = Vec3::ZERO;

/// Direction used whenever a normalization input has zero length
pub const DEGENERATE_DIRECTION: Vec3 = Vec3::Y;

/// Observer exit distance, in linked-portal radii, measured through the linked sphere
pub const TRANSIT_EXIT_FACTOR: f32 = 2.01;

/// Ghost offset beyond the linked portal surface, in linked-portal radii
pub const GHOST_EXIT_FACTOR: f32 = 1.01;

/// Reference axis crossed with an orbit axis to obtain the orbit arm
pub const ORBIT_REFERENCE_AXIS: Vec3 = Vec3::NEG_Z;

/// Fixed observer up vector
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Default look direction when the observer's look target collapses onto its position
pub const DEFAULT_LOOK_DIRECTION: Vec3 = Vec3::NEG_Z;

/// Drift speed scalar limits and tuning step
pub const MOVER_SPEED_DEFAULT: f32 = 0.005;
pub const MOVER_SPEED_STEP: f32 = 0.00005;
pub const MOVER_SPEED_MAX: f32 = 0.01;

/// Observer walk/look step per tick
pub const MOVEMENT_FACTOR: f32 = 0.02;

/// Antialiasing levels selectable from the keyboard
pub const AA_LEVEL_MIN: u32 = 1;
pub const AA_LEVEL_MAX: u32 = 3;

/// External tick interval in milliseconds
pub const TICK_INTERVAL_MS: f32 = 16.0;
