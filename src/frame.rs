/// Frame orchestration
///
/// One tick runs, in order: input, scripted motion, observer transit, containment
/// and ghost projection, then publication. Motion settles before any overlap test,
/// and the observer is moved before containment so a teleport and the ghosts it sees
/// belong to the same frame.
use crate::{
    SceneResult,
    input::{Controls, InputHandler},
    math::MathUtils,
    observer::Observer,
    portal::{Containment, Transit, apply_transit, project_ghosts},
    scenario::SceneDescription,
    scene::{Motion, Scene},
    uniforms::{FramePacket, SceneSink},
};

/// What happened to the portal system during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub transit: Option<Transit>,
    /// `(sphere index, outcome)` for every sphere that was not free
    pub containments: Vec<(usize, Containment)>,
}

impl FrameReport {
    /// Spheres relocated through a portal this tick, as `(sphere, portal)`
    pub fn relocations(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.containments
            .iter()
            .filter_map(|(index, outcome)| match outcome {
                Containment::Relocated { portal, .. } => Some((*index, *portal)),
                _ => None,
            })
    }
}

/// Owns the scene and observer and advances them one frame at a time
pub struct PortalSimulation {
    scene: Scene,
    observer: Observer,
    input: InputHandler,
    controls: Controls,
    elapsed_ms: f32,
    frame: u64,
}

impl PortalSimulation {
    pub fn new(scene: Scene) -> Self {
        let observer = scene.observer();
        Self {
            scene,
            observer,
            input: InputHandler::new(),
            controls: Controls::new(),
            elapsed_ms: 0.0,
            frame: 0,
        }
    }

    pub fn from_description(description: &SceneDescription) -> SceneResult<Self> {
        Ok(Self::new(description.build()?))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut Observer {
        &mut self.observer
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame at `elapsed_ms` milliseconds since start
    pub fn step(&mut self, elapsed_ms: f32) -> FrameReport {
        self.elapsed_ms = elapsed_ms;
        self.frame += 1;

        self.controls.update(&self.input);
        for movement in self.input.camera_movements() {
            self.observer.process_movement(movement);
        }

        self.scene.clear_ghosts();
        advance_motion(&mut self.scene, elapsed_ms, self.controls.mover_speed);

        let transit = apply_transit(&self.scene, &mut self.observer);

        let containments = project_ghosts(&mut self.scene)
            .into_iter()
            .enumerate()
            .filter(|(_, outcome)| !outcome.is_free())
            .collect::<Vec<_>>();

        log::trace!(
            "Frame {} at {:.1} ms: transit={}, contained={}",
            self.frame,
            elapsed_ms,
            transit.is_some(),
            containments.len()
        );

        FrameReport {
            frame: self.frame,
            transit,
            containments,
        }
    }

    /// Current scene state in publishable form
    pub fn packet(&self) -> FramePacket {
        FramePacket::capture(
            &self.scene,
            &self.observer,
            self.elapsed_ms,
            self.controls.aa_level,
        )
    }

    /// Step one frame and publish the result
    pub fn tick(&mut self, elapsed_ms: f32, sink: &mut dyn SceneSink) -> anyhow::Result<FrameReport> {
        let report = self.step(elapsed_ms);
        sink.publish(&self.packet())?;
        Ok(report)
    }
}

/// Evaluate every sphere's motion script, in ascending sphere index.
///
/// A sphere reading another sphere's position sees that sphere's value for this
/// frame if it has a lower index, and last frame's otherwise.
fn advance_motion(scene: &mut Scene, elapsed_ms: f32, mover_speed: f32) {
    for i in 0..scene.len() {
        for m in 0..scene.spheres()[i].motion.len() {
            let motion = scene.spheres()[i].motion[m];
            let spheres = scene.spheres_mut();

            match motion {
                Motion::Spin { axis, rate } => {
                    spheres[i].orientation = MathUtils::rotation(axis, rate) * spheres[i].orientation;
                }
                Motion::Orbit {
                    parent,
                    axis,
                    rate,
                    arm_length,
                } => {
                    spheres[i].position = spheres[parent].position
                        + MathUtils::orbit_offset(axis, elapsed_ms * rate, arm_length);
                }
                Motion::Drift { toward, away } => {
                    let velocity = (spheres[toward].position - spheres[away].position) * mover_speed;
                    spheres[i].position += velocity;
                }
            }
        }
    }
}
