/// Per-frame scene state handed to the external renderer
///
/// The shader indexes every per-sphere array by the same sphere index, so all arrays
/// in a [`FramePacket`] have exactly one entry per sphere, in table order.
use bytemuck::{Pod, Zeroable};

use crate::{observer::Observer, scene::Scene};

/// Sphere record in upload layout (16-byte aligned rows)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SphereUniform {
    pub position: [f32; 3], // 12 bytes
    pub radius: f32,        // 4 bytes

    pub ghost_position: [f32; 3], // 12 bytes
    pub texture_index: i32,       // 4 bytes

    pub color: [f32; 3],   // 12 bytes
    pub portal_index: i32, // 4 bytes

    /// Orientation columns (mat3x3 stored as 3 vec4 for alignment)
    pub rotation: [[f32; 4]; 3], // 48 bytes

    /// Reflectivity, transmissivity
    pub k_rt: [f32; 2],     // 8 bytes
    pub inside_portal: i32, // 4 bytes
    pub _padding: i32,      // 4 bytes
} // Total: 112 bytes

/// Frame-wide values
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub inverse_view_matrix: [[f32; 4]; 4], // 64 bytes
    pub time: f32,                          // 4 bytes
    pub aa_level: u32,                      // 4 bytes
    pub sphere_count: u32,                  // 4 bytes
    pub light_count: u32,                   // 4 bytes
} // Total: 80 bytes

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],     // 12 bytes
    pub intensity: f32,         // 4 bytes
    pub specular_exponent: f32, // 4 bytes
    pub _padding: [f32; 3],     // 12 bytes
} // Total: 32 bytes

/// Snapshot of the scene published once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct FramePacket {
    pub positions: Vec<[f32; 3]>,
    pub ghost_positions: Vec<[f32; 3]>,
    /// Column-major 3x3 orientations
    pub orientations: Vec<[[f32; 3]; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub reflect_transmit: Vec<[f32; 2]>,
    pub radii: Vec<f32>,
    /// `-1` for untextured spheres
    pub texture_indices: Vec<i32>,
    /// `-1` for ordinary spheres
    pub portal_indices: Vec<i32>,
    /// `-1` when the sphere is not partially inside a portal
    pub inside_portal: Vec<i32>,
    pub inverse_view_matrix: [[f32; 4]; 4],
    /// Elapsed time in milliseconds
    pub time: f32,
    pub aa_level: u32,
    pub lights: Vec<LightUniform>,
}

impl FramePacket {
    pub fn capture(scene: &Scene, observer: &Observer, time: f32, aa_level: u32) -> Self {
        let spheres = scene.spheres();

        Self {
            positions: spheres.iter().map(|s| s.position.to_array()).collect(),
            ghost_positions: spheres.iter().map(|s| s.ghost_position.to_array()).collect(),
            orientations: spheres
                .iter()
                .map(|s| s.orientation.to_cols_array_2d())
                .collect(),
            colors: spheres.iter().map(|s| s.material.color.to_array()).collect(),
            reflect_transmit: spheres
                .iter()
                .map(|s| [s.material.reflectivity, s.material.transmissivity])
                .collect(),
            radii: spheres.iter().map(|s| s.radius).collect(),
            texture_indices: spheres
                .iter()
                .map(|s| s.material.texture.map_or(-1, |t| t as i32))
                .collect(),
            portal_indices: scene.links().as_indices(),
            inside_portal: spheres
                .iter()
                .map(|s| s.contained_in.map_or(-1, |j| j as i32))
                .collect(),
            inverse_view_matrix: observer.inverse_view_matrix().to_cols_array_2d(),
            time,
            aa_level,
            lights: scene
                .lights()
                .iter()
                .map(|light| LightUniform {
                    position: light.position.to_array(),
                    intensity: light.intensity,
                    specular_exponent: light.specular_exponent,
                    _padding: [0.0; 3],
                })
                .collect(),
        }
    }

    /// Number of spheres in the packet
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Array-of-structs view for a single storage buffer upload
    pub fn sphere_uniforms(&self) -> Vec<SphereUniform> {
        (0..self.len())
            .map(|i| {
                let [c0, c1, c2] = self.orientations[i];
                SphereUniform {
                    position: self.positions[i],
                    radius: self.radii[i],
                    ghost_position: self.ghost_positions[i],
                    texture_index: self.texture_indices[i],
                    color: self.colors[i],
                    portal_index: self.portal_indices[i],
                    rotation: [
                        [c0[0], c0[1], c0[2], 0.0],
                        [c1[0], c1[1], c1[2], 0.0],
                        [c2[0], c2[1], c2[2], 0.0],
                    ],
                    k_rt: self.reflect_transmit[i],
                    inside_portal: self.inside_portal[i],
                    _padding: 0,
                }
            })
            .collect()
    }

    pub fn frame_uniform(&self) -> FrameUniform {
        FrameUniform {
            inverse_view_matrix: self.inverse_view_matrix,
            time: self.time,
            aa_level: self.aa_level,
            sphere_count: self.len() as u32,
            light_count: self.lights.len() as u32,
        }
    }
}

/// External renderer boundary: receives one packet per frame
pub trait SceneSink {
    fn publish(&mut self, packet: &FramePacket) -> anyhow::Result<()>;
}

/// Keeps every published packet; useful for recording and inspection
impl SceneSink for Vec<FramePacket> {
    fn publish(&mut self, packet: &FramePacket) -> anyhow::Result<()> {
        self.push(packet.clone());
        Ok(())
    }
}
