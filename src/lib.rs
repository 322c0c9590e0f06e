pub mod frame;
pub mod input;
pub mod math;
pub mod observer;
pub mod portal;
pub mod scenario;
pub mod scene;
pub mod uniforms;

pub use frame::{FrameReport, PortalSimulation};
pub use observer::Observer;
pub use scene::{Light, Material, Motion, Scene, Sphere};

/// Configuration defects detected while building a scene.
///
/// All of these abort initialization; none of them can reach per-frame geometry.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("Scene contains no spheres")]
    Empty,
    #[error("Sphere {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },
    #[error("Sphere {index} has non-finite position {position}")]
    InvalidPosition { index: usize, position: glam::Vec3 },
    #[error("Portal {index} has a motion script that moves it")]
    MovingPortal { index: usize },
    #[error("Portal {index} links to itself")]
    SelfLink { index: usize },
    #[error("Portal {index} links to sphere {target}, but the scene only has {count} spheres")]
    LinkOutOfRange {
        index: usize,
        target: usize,
        count: usize,
    },
    #[error("Portal {index} links to sphere {target}, which is not a portal")]
    LinkNotPortal { index: usize, target: usize },
    #[error("Sphere {index} has a motion script referencing invalid sphere {target}")]
    InvalidMotionReference { index: usize, target: usize },
    #[error("Link table has {links} entries for {spheres} spheres")]
    LinkTableMismatch { links: usize, spheres: usize },
    #[error("Scene parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SceneResult<T> = Result<T, SceneError>;
