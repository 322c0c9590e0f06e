/// Scene object table: per-sphere geometric and material state
///
/// All per-sphere data is index aligned; the renderer addresses every array by the
/// same sphere index, so spheres are never added or removed after construction.
use glam::{Mat3, Vec3};

use crate::{
    SceneError, SceneResult,
    math::GHOST_SENTINEL,
    observer::Observer,
    portal::PortalLinks,
};

/// Declarative per-sphere motion, evaluated every tick by the frame orchestrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Accumulate a rotation of `rate` radians per tick about `axis`
    Spin { axis: Vec3, rate: f32 },
    /// Circle `parent` about `axis`; angle is `rate` radians per elapsed millisecond
    Orbit {
        parent: usize,
        axis: Vec3,
        rate: f32,
        arm_length: f32,
    },
    /// Move by `(position(toward) - position(away)) * mover_speed` each tick
    Drift { toward: usize, away: usize },
}

impl Motion {
    /// Whether this motion changes the sphere's position, not just its orientation
    pub fn translates(&self) -> bool {
        !matches!(self, Motion::Spin { .. })
    }

    /// Other spheres this motion reads positions from
    pub fn references(&self) -> impl Iterator<Item = usize> {
        let refs: [Option<usize>; 2] = match *self {
            Motion::Spin { .. } => [None, None],
            Motion::Orbit { parent, .. } => [Some(parent), None],
            Motion::Drift { toward, away } => [Some(toward), Some(away)],
        };
        refs.into_iter().flatten()
    }
}

/// Surface attributes consumed by the external shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub reflectivity: f32,
    pub transmissivity: f32,
    pub texture: Option<u32>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::splat(0.9),
            reflectivity: 0.0,
            transmissivity: 0.0,
            texture: None,
        }
    }
}

/// One sphere of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    /// Name used in logs
    pub name: String,

    /// True world position
    pub position: Vec3,

    /// Rendering-only projected position; [`GHOST_SENTINEL`] when no ghost is shown
    pub ghost_position: Vec3,

    pub radius: f32,

    /// Accumulated texture rotation
    pub orientation: Mat3,

    pub material: Material,

    pub motion: Vec<Motion>,

    /// Portal this sphere partially overlaps this frame
    pub contained_in: Option<usize>,
}

impl Sphere {
    pub fn new(name: impl Into<String>, position: Vec3, radius: f32) -> Self {
        Self {
            name: name.into(),
            position,
            ghost_position: GHOST_SENTINEL,
            radius,
            orientation: Mat3::IDENTITY,
            material: Material::default(),
            motion: Vec::new(),
            contained_in: None,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_orientation(mut self, orientation: Mat3) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion.push(motion);
        self
    }

    /// Whether a ghost image is currently published for this sphere
    pub fn has_ghost(&self) -> bool {
        self.contained_in.is_some()
    }

    /// Drop any ghost from the previous frame
    pub fn clear_ghost(&mut self) {
        self.ghost_position = GHOST_SENTINEL;
        self.contained_in = None;
    }
}

/// Point light forwarded to the shader unchanged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f32,
    pub specular_exponent: f32,
}

/// The validated scene: sphere table, portal link graph, lights and starting observer
#[derive(Debug, Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
    links: PortalLinks,
    lights: Vec<Light>,
    observer: Observer,
}

impl Scene {
    /// Validate and assemble a scene.
    ///
    /// `links[i]` is the portal link of `spheres[i]`. Fails on an empty table,
    /// non-positive radii, non-finite positions, malformed links, motion scripts
    /// that reference missing spheres, and portals scripted to move. Portals may
    /// still spin.
    pub fn new(
        spheres: Vec<Sphere>,
        links: Vec<Option<usize>>,
        lights: Vec<Light>,
        observer: Observer,
    ) -> SceneResult<Self> {
        if spheres.is_empty() {
            return Err(SceneError::Empty);
        }

        if links.len() != spheres.len() {
            return Err(SceneError::LinkTableMismatch {
                links: links.len(),
                spheres: spheres.len(),
            });
        }

        for (index, sphere) in spheres.iter().enumerate() {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }

            if !sphere.position.is_finite() {
                return Err(SceneError::InvalidPosition {
                    index,
                    position: sphere.position,
                });
            }

            if links[index].is_some() && sphere.motion.iter().any(Motion::translates) {
                return Err(SceneError::MovingPortal { index });
            }

            for target in sphere.motion.iter().flat_map(|motion| motion.references()) {
                if target == index || target >= spheres.len() {
                    return Err(SceneError::InvalidMotionReference { index, target });
                }
            }
        }

        let links = PortalLinks::new(links)?;

        log::info!(
            "Scene built with {} spheres, {} portals, {} lights",
            spheres.len(),
            links.portals().count(),
            lights.len()
        );

        Ok(Self {
            spheres,
            links,
            lights,
            observer,
        })
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub(crate) fn spheres_mut(&mut self) -> &mut [Sphere] {
        &mut self.spheres
    }

    pub fn sphere(&self, index: usize) -> Option<&Sphere> {
        self.spheres.get(index)
    }

    pub fn links(&self) -> &PortalLinks {
        &self.links
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Observer pose the scene starts from
    pub fn observer(&self) -> Observer {
        self.observer
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Reset every ghost to the sentinel ahead of a containment pass
    pub fn clear_ghosts(&mut self) {
        for sphere in &mut self.spheres {
            sphere.clear_ghost();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(links: Vec<Option<usize>>) -> SceneResult<Scene> {
        Scene::new(
            vec![
                Sphere::new("a", Vec3::ZERO, 1.0),
                Sphere::new("b", Vec3::new(10.0, 0.0, 0.0), 1.0),
            ],
            links,
            Vec::new(),
            Observer::default(),
        )
    }

    #[test]
    fn test_sphere_defaults() {
        let sphere = Sphere::new("probe", Vec3::new(1.0, 2.0, 3.0), 0.5);

        assert_eq!(sphere.ghost_position, GHOST_SENTINEL);
        assert_eq!(sphere.orientation, Mat3::IDENTITY);
        assert!(sphere.contained_in.is_none());
        assert!(sphere.motion.is_empty());
    }

    #[test]
    fn test_valid_scene() {
        let scene = pair(vec![Some(1), Some(0)]).unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.links().linked(0), Some(1));
    }

    #[test]
    fn test_empty_scene_rejected() {
        let result = Scene::new(Vec::new(), Vec::new(), Vec::new(), Observer::default());
        assert!(matches!(result, Err(SceneError::Empty)));
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        for radius in [0.0, -1.0, f32::NAN] {
            let result = Scene::new(
                vec![Sphere::new("bad", Vec3::ZERO, radius)],
                vec![None],
                Vec::new(),
                Observer::default(),
            );
            assert!(matches!(
                result,
                Err(SceneError::InvalidRadius { index: 0, .. })
            ));
        }
    }

    #[test]
    fn test_link_table_length_mismatch() {
        assert!(matches!(
            pair(vec![None]),
            Err(SceneError::LinkTableMismatch {
                links: 1,
                spheres: 2
            })
        ));
    }

    #[test]
    fn test_motion_reference_validation() {
        let orbiting = Sphere::new("moon", Vec3::ZERO, 0.2).with_motion(Motion::Orbit {
            parent: 5,
            axis: Vec3::Y,
            rate: 0.001,
            arm_length: 1.0,
        });
        let result = Scene::new(vec![orbiting], vec![None], Vec::new(), Observer::default());
        assert!(matches!(
            result,
            Err(SceneError::InvalidMotionReference {
                index: 0,
                target: 5
            })
        ));

        let self_drift =
            Sphere::new("mover", Vec3::ZERO, 0.2).with_motion(Motion::Drift { toward: 0, away: 0 });
        let result = Scene::new(vec![self_drift], vec![None], Vec::new(), Observer::default());
        assert!(matches!(
            result,
            Err(SceneError::InvalidMotionReference { index: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_position_rejected() {
        for position in [Vec3::new(f32::NAN, 0.0, 0.0), Vec3::new(0.0, f32::INFINITY, 0.0)] {
            let result = Scene::new(
                vec![
                    Sphere::new("ok", Vec3::ZERO, 1.0),
                    Sphere::new("bad", position, 1.0),
                ],
                vec![None, None],
                Vec::new(),
                Observer::default(),
            );
            assert!(matches!(
                result,
                Err(SceneError::InvalidPosition { index: 1, .. })
            ));
        }
    }

    #[test]
    fn test_scripted_portal_motion() {
        let drifting_portal = Sphere::new("portal", Vec3::ZERO, 1.0)
            .with_motion(Motion::Drift { toward: 1, away: 2 });
        let result = Scene::new(
            vec![
                drifting_portal,
                Sphere::new("exit", Vec3::new(10.0, 0.0, 0.0), 1.0),
                Sphere::new("anchor", Vec3::new(-10.0, 0.0, 0.0), 1.0),
            ],
            vec![Some(1), Some(0), None],
            Vec::new(),
            Observer::default(),
        );
        assert!(matches!(result, Err(SceneError::MovingPortal { index: 0 })));

        // Spinning only turns the texture, so a spinning portal is fine
        let spinning_portal = Sphere::new("portal", Vec3::ZERO, 1.0).with_motion(Motion::Spin {
            axis: Vec3::Y,
            rate: 0.01,
        });
        let result = Scene::new(
            vec![
                spinning_portal,
                Sphere::new("exit", Vec3::new(10.0, 0.0, 0.0), 1.0),
            ],
            vec![Some(1), Some(0)],
            Vec::new(),
            Observer::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_clear_ghosts() {
        let mut scene = pair(vec![None, None]).unwrap();
        scene.spheres_mut()[0].ghost_position = Vec3::ONE;
        scene.spheres_mut()[0].contained_in = Some(1);

        scene.clear_ghosts();

        assert_eq!(scene.spheres()[0].ghost_position, GHOST_SENTINEL);
        assert!(!scene.spheres()[0].has_ghost());
    }
}
