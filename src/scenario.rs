/// Scene descriptions: the RON scene format and the built-in two-room scene
use std::path::Path;

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::{
    SceneError, SceneResult,
    math::MathUtils,
    observer::Observer,
    scene::{Light, Material, Motion, Scene, Sphere},
};

/// Offsets of the two rooms along X
const ROOM_1: f32 = 0.0;
const ROOM_2: f32 = 2000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub observer: ObserverDescription,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
    pub spheres: Vec<SphereDescription>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverDescription {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    pub position: [f32; 3],
    pub intensity: f32,
    pub specular_exponent: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub name: String,
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
    /// Reflectivity and transmissivity
    #[serde(default)]
    pub reflect_transmit: [f32; 2],
    #[serde(default)]
    pub texture: Option<u32>,
    /// Index of the linked sphere when this sphere is a portal
    #[serde(default)]
    pub portal: Option<usize>,
    #[serde(default)]
    pub rotation: Option<RotationDescription>,
    #[serde(default)]
    pub motion: Vec<MotionDescription>,
}

/// Initial orientation as an axis and an angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationDescription {
    pub axis: [f32; 3],
    pub degrees: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionDescription {
    /// `rate` in radians per tick
    Spin { axis: [f32; 3], rate: f32 },
    /// `rate` in radians per elapsed millisecond
    Orbit {
        parent: usize,
        axis: [f32; 3],
        rate: f32,
        arm_length: f32,
    },
    Drift { toward: usize, away: usize },
}

impl From<MotionDescription> for Motion {
    fn from(description: MotionDescription) -> Self {
        match description {
            MotionDescription::Spin { axis, rate } => Motion::Spin {
                axis: Vec3::from(axis),
                rate,
            },
            MotionDescription::Orbit {
                parent,
                axis,
                rate,
                arm_length,
            } => Motion::Orbit {
                parent,
                axis: Vec3::from(axis),
                rate,
                arm_length,
            },
            MotionDescription::Drift { toward, away } => Motion::Drift { toward, away },
        }
    }
}

impl SphereDescription {
    fn new(name: &str, position: [f32; 3], radius: f32, color: [f32; 3], k_rt: [f32; 2]) -> Self {
        Self {
            name: name.to_string(),
            position,
            radius,
            color,
            reflect_transmit: k_rt,
            texture: None,
            portal: None,
            rotation: None,
            motion: Vec::new(),
        }
    }

    fn textured(mut self, texture: u32) -> Self {
        self.texture = Some(texture);
        self
    }

    fn portal(mut self, target: usize) -> Self {
        self.portal = Some(target);
        self
    }

    fn rotated(mut self, axis: [f32; 3], degrees: f32) -> Self {
        self.rotation = Some(RotationDescription { axis, degrees });
        self
    }

    fn moving(mut self, motion: MotionDescription) -> Self {
        self.motion.push(motion);
        self
    }

    fn to_sphere(&self) -> Sphere {
        let orientation = self.rotation.map_or(Mat3::IDENTITY, |rotation| {
            MathUtils::rotation(Vec3::from(rotation.axis), rotation.degrees.to_radians())
        });

        let mut sphere = Sphere::new(self.name.clone(), Vec3::from(self.position), self.radius)
            .with_material(Material {
                color: Vec3::from(self.color),
                reflectivity: self.reflect_transmit[0],
                transmissivity: self.reflect_transmit[1],
                texture: self.texture,
            })
            .with_orientation(orientation);
        sphere.motion = self.motion.iter().copied().map(Motion::from).collect();
        sphere
    }
}

impl SceneDescription {
    /// Parse a RON scene description
    pub fn parse(content: &str) -> SceneResult<Self> {
        ron::from_str(content).map_err(|e| SceneError::Parse(e.to_string()))
    }

    /// Read and parse a RON scene file
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::info!("Loading scene description from {}", path.display());
        Self::parse(&content)
    }

    pub fn to_ron(&self) -> SceneResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SceneError::Parse(e.to_string()))
    }

    pub fn observer(&self) -> Observer {
        Observer::new(
            Vec3::from(self.observer.position),
            Vec3::from(self.observer.look_at),
        )
    }

    /// Validate the description and build the runtime scene
    pub fn build(&self) -> SceneResult<Scene> {
        let spheres = self.spheres.iter().map(SphereDescription::to_sphere).collect();
        let links = self.spheres.iter().map(|sphere| sphere.portal).collect();
        let lights = self
            .lights
            .iter()
            .map(|light| Light {
                position: Vec3::from(light.position),
                intensity: light.intensity,
                specular_exponent: light.specular_exponent,
            })
            .collect();

        Scene::new(spheres, links, lights, self.observer())
    }

    /// Two mirrored rooms joined by three portal pairs, with a sphere drifting between
    /// the upper portals of room 2 and a small planetary system.
    pub fn two_rooms() -> Self {
        let axis = [0.3, 0.7, 0.0];
        let floor_turn = [0.0, 0.0, 1.0];
        let wall = [0.9, 0.9, 0.9];

        let spheres = vec![
            // Room 1 walls, floor and ceiling
            SphereDescription::new("room 1 floor", [ROOM_1, -500.0, 0.0], 500.0, [0.0, 1.0, 0.0], [0.2, 0.0])
                .textured(0)
                .rotated(floor_turn, 89.0)
                .moving(MotionDescription::Spin {
                    axis: [0.0, 1.0, 0.0],
                    rate: -0.00001,
                }),
            SphereDescription::new("room 1 ceiling", [ROOM_1, 507.0, 0.0], 500.0, [1.0, 1.0, 0.0], [0.02, 0.0])
                .rotated(floor_turn, 89.0),
            SphereDescription::new("room 1 west", [ROOM_1 - 505.0, 5.0, 0.0], 500.0, wall, [0.2, 0.0]),
            SphereDescription::new("room 1 east", [ROOM_1 + 505.0, 5.0, 0.0], 500.0, wall, [0.2, 0.0]),
            SphereDescription::new("room 1 north", [ROOM_1, 5.0, -505.0], 500.0, [0.45, 0.9, 0.82], [0.2, 0.0]),
            SphereDescription::new("room 1 south", [ROOM_1, 5.0, 505.0], 500.0, [0.45, 0.9, 0.82], [0.2, 0.0]),
            // Room 2 walls, floor and ceiling
            SphereDescription::new("room 2 floor", [ROOM_2, -500.0, 0.0], 500.0, wall, [0.2, 0.0])
                .textured(0)
                .rotated(floor_turn, 89.0),
            SphereDescription::new("room 2 ceiling", [ROOM_2, 507.0, 0.0], 500.0, [0.0, 1.0, 1.0], [0.02, 0.0])
                .rotated(floor_turn, 89.0),
            SphereDescription::new("room 2 west", [ROOM_2 - 505.0, 5.0, 0.0], 500.0, [0.98, 0.28, 0.76], [0.2, 0.0]),
            SphereDescription::new("room 2 east", [ROOM_2 + 505.0, 5.0, 0.0], 500.0, [0.98, 0.28, 0.76], [0.2, 0.0]),
            SphereDescription::new("room 2 north", [ROOM_2, 5.0, -505.0], 500.0, wall, [0.2, 0.0]),
            SphereDescription::new("room 2 south", [ROOM_2, 5.0, 505.0], 500.0, wall, [0.2, 0.0]),
            // Room 1 props
            SphereDescription::new("mirror", [-2.0, 1.01, -2.0], 1.0, wall, [0.7, 0.0]),
            SphereDescription::new("glass", [0.0, 0.701, -2.5], 0.7, wall, [0.1, 0.7]),
            SphereDescription::new("reflective", [-2.8, 0.501, -0.5], 0.5, [0.9, 0.0, 0.9], [0.1, 0.0]),
            // Portals
            SphereDescription::new("portal 1", [3.0, 1.11, 3.0], 1.1, wall, [0.0, 0.0]).portal(16),
            SphereDescription::new("portal 2", [ROOM_2 - 3.0, 1.11, -3.0], 1.1, wall, [0.0, 0.0]).portal(15),
            SphereDescription::new("portal 3", [ROOM_2 - 3.2, 4.01, 3.0], 1.1, wall, [0.0, 0.0]).portal(21),
            SphereDescription::new("portal 4", [ROOM_2 + 3.2, 4.01, 3.0], 1.1, wall, [0.0, 0.0]).portal(20),
            SphereDescription::new("portal mover", [ROOM_2, 4.01, 3.0], 0.6, [0.0, 1.0, 0.0], [0.7, 0.0])
                .moving(MotionDescription::Drift { toward: 17, away: 18 }),
            SphereDescription::new("portal 5", [-3.2, 4.01, 3.0], 1.1, wall, [0.1, 0.0]).portal(18),
            SphereDescription::new("portal 6", [3.2, 4.01, 3.0], 1.1, wall, [0.1, 0.0]).portal(17),
            // Planets
            SphereDescription::new("planet 1", [ROOM_2 + 2.0, 2.5, -2.0], 0.6, [1.0, 1.0, 0.0], [0.01, 0.0])
                .textured(3)
                .moving(MotionDescription::Spin {
                    axis: [0.0, 1.0, 0.0],
                    rate: -0.02,
                }),
            SphereDescription::new("planet 2", [ROOM_2, 2.0, 0.0], 0.23, wall, [0.01, 0.0])
                .textured(1)
                .moving(MotionDescription::Orbit {
                    parent: 22,
                    axis,
                    rate: 0.001,
                    arm_length: 1.523,
                })
                .moving(MotionDescription::Spin { axis, rate: 0.03 }),
            SphereDescription::new("planet 3", [ROOM_2 - 2.5, 2.0, 0.0], 0.13, [0.0, 0.0, 1.0], [0.01, 0.0])
                .textured(2)
                .moving(MotionDescription::Orbit {
                    parent: 23,
                    axis,
                    rate: 0.002,
                    arm_length: 0.495,
                })
                .moving(MotionDescription::Spin { axis, rate: -0.04 }),
        ];

        Self {
            observer: ObserverDescription {
                position: [0.0, 1.0, 1.0],
                look_at: [0.0, 1.0, -1.0],
            },
            lights: vec![
                LightDescription {
                    position: [ROOM_1, 5.0, 0.0],
                    intensity: 1.0,
                    specular_exponent: 160.0,
                },
                LightDescription {
                    position: [ROOM_2, 5.0, 0.0],
                    intensity: 1.0,
                    specular_exponent: 160.0,
                },
            ],
            spheres,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_rooms_builds() {
        let scene = SceneDescription::two_rooms().build().unwrap();

        assert_eq!(scene.len(), 25);
        assert_eq!(scene.lights().len(), 2);
        assert_eq!(
            scene.links().portals().collect::<Vec<_>>(),
            vec![15, 16, 17, 18, 20, 21]
        );
        assert!(scene.links().portals().all(|p| scene.links().is_symmetric(p)));
        assert_eq!(scene.spheres()[19].name, "portal mover");
        assert_eq!(scene.observer().position, Vec3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_parse_minimal_scene() {
        let content = r#"(
    observer: (position: (0.0, 1.0, 1.0), look_at: (0.0, 1.0, -1.0)),
    spheres: [
        (name: "entry", position: (0.0, 1.0, 0.0), radius: 1.1, color: (0.9, 0.9, 0.9), portal: Some(1)),
        (name: "exit", position: (50.0, 1.0, 0.0), radius: 1.1, color: (0.9, 0.9, 0.9), portal: Some(0)),
        (
            name: "moon",
            position: (0.0, 3.0, 0.0),
            radius: 0.2,
            color: (0.0, 0.0, 1.0),
            texture: Some(2),
            motion: [
                Orbit(parent: 0, axis: (0.0, 1.0, 0.0), rate: 0.001, arm_length: 2.0),
                Spin(axis: (0.0, 1.0, 0.0), rate: 0.01),
            ],
        ),
    ],
)"#;

        let description = SceneDescription::parse(content).unwrap();
        assert!(description.lights.is_empty());
        assert_eq!(description.spheres.len(), 3);
        assert_eq!(description.spheres[2].texture, Some(2));
        assert_eq!(description.spheres[2].reflect_transmit, [0.0, 0.0]);
        assert!(matches!(
            description.spheres[2].motion[0],
            MotionDescription::Orbit { parent: 0, .. }
        ));

        let scene = description.build().unwrap();
        assert_eq!(scene.links().linked(0), Some(1));
        assert_eq!(scene.spheres()[2].motion.len(), 2);
    }

    #[test]
    fn test_ron_round_trip() {
        let description = SceneDescription::two_rooms();
        let text = description.to_ron().unwrap();
        let parsed = SceneDescription::parse(&text).unwrap();

        assert_eq!(parsed, description);
    }

    #[test]
    fn test_parse_error_reported() {
        let result = SceneDescription::parse("(spheres: [");
        assert!(matches!(result, Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_dangling_link_rejected_at_build() {
        let mut description = SceneDescription::two_rooms();
        description.spheres[15].portal = Some(99);

        assert!(matches!(
            description.build(),
            Err(SceneError::LinkOutOfRange {
                index: 15,
                target: 99,
                ..
            })
        ));

        description.spheres[15].portal = Some(12);
        assert!(matches!(
            description.build(),
            Err(SceneError::LinkNotPortal {
                index: 15,
                target: 12
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = SceneDescription::load("/nonexistent/scene.ron");
        assert!(matches!(result, Err(SceneError::Io(_))));
    }

    #[test]
    fn test_initial_rotation_applied() {
        let scene = SceneDescription::two_rooms().build().unwrap();
        let expected = Mat3::from_rotation_z(89f32.to_radians());

        assert!(scene.spheres()[1].orientation.abs_diff_eq(expected, 1e-6));
        assert_eq!(scene.spheres()[12].orientation, Mat3::IDENTITY);
    }
}
