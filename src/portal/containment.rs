/// Object containment and ghost projection
///
/// A sphere that partly overlaps a strictly larger portal gets a ghost image on the
/// far side of the link, so it appears to pass continuously through. Once it is
/// entirely inside the portal it is moved to the ghost position for real.
use glam::Vec3;

use crate::{
    math::{GHOST_EXIT_FACTOR, GHOST_SENTINEL, PortalMath},
    scene::Scene,
};

/// Geometric relation between a sphere and a candidate portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Overlap {
    None,
    Partial,
    Full,
}

impl Overlap {
    /// Classify a sphere of radius `radius` at `center` against a portal volume.
    ///
    /// Only a strictly larger portal can contain a sphere; equal radii never overlap.
    pub fn classify(center: Vec3, radius: f32, portal_center: Vec3, portal_radius: f32) -> Self {
        let d = center.distance_to(&portal_center);

        if !(radius < portal_radius && d - radius <= portal_radius) {
            Overlap::None
        } else if d + radius <= portal_radius {
            Overlap::Full
        } else {
            Overlap::Partial
        }
    }
}

/// Per-sphere result of one containment pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Containment {
    Free,
    Partial { portal: usize, ghost: Vec3 },
    Relocated { portal: usize, from: Vec3, to: Vec3 },
}

impl Containment {
    pub fn portal(&self) -> Option<usize> {
        match *self {
            Containment::Free => None,
            Containment::Partial { portal, .. } | Containment::Relocated { portal, .. } => {
                Some(portal)
            }
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Containment::Free)
    }
}

/// Ghost position for a sphere at `center` penetrating a portal at `portal_center`.
///
/// The ghost sits just beyond the linked portal's surface, pushed further out by how
/// deep the sphere has gone into the entry portal, along the direction of travel.
pub fn ghost_position(
    center: Vec3,
    portal_center: Vec3,
    portal_radius: f32,
    exit_center: Vec3,
    exit_radius: f32,
) -> Vec3 {
    let d = center.distance_to(&portal_center);
    let through_distance = GHOST_EXIT_FACTOR * exit_radius + (portal_radius - d);
    exit_center + center.direction_to(&portal_center) * through_distance
}

/// Recompute containment for every sphere.
///
/// Spheres are processed in ascending index; for each, candidate portals are scanned
/// in ascending index and the first partial overlap wins. A relocation is visible
/// to spheres processed after it in the same pass. Returns one outcome per sphere.
pub fn project_ghosts(scene: &mut Scene) -> Vec<Containment> {
    let count = scene.len();
    let mut outcomes = Vec::with_capacity(count);

    for i in 0..count {
        let outcome = match find_portal(scene, i) {
            None => Containment::Free,
            Some((portal, exit, overlap)) => {
                let spheres = scene.spheres();
                let ghost = ghost_position(
                    spheres[i].position,
                    spheres[portal].position,
                    spheres[portal].radius,
                    spheres[exit].position,
                    spheres[exit].radius,
                );

                if overlap == Overlap::Full {
                    Containment::Relocated {
                        portal,
                        from: spheres[i].position,
                        to: ghost,
                    }
                } else {
                    Containment::Partial { portal, ghost }
                }
            }
        };

        let sphere = &mut scene.spheres_mut()[i];
        match outcome {
            Containment::Free => {
                sphere.contained_in = None;
            }
            Containment::Partial { portal, ghost } => {
                sphere.contained_in = Some(portal);
                sphere.ghost_position = ghost;
                log::trace!("'{}' ({}) partially inside portal {}", sphere.name, i, portal);
            }
            Containment::Relocated { portal, from, to } => {
                sphere.contained_in = None;
                sphere.position = to;
                sphere.ghost_position = GHOST_SENTINEL;
                log::info!(
                    "'{}' ({}) passed through portal {}: ({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3})",
                    sphere.name,
                    i,
                    portal,
                    from.x,
                    from.y,
                    from.z,
                    to.x,
                    to.y,
                    to.z
                );
            }
        }

        outcomes.push(outcome);
    }

    outcomes
}

/// First portal (ascending index) that sphere `i` overlaps, with its exit and overlap kind
fn find_portal(scene: &Scene, i: usize) -> Option<(usize, usize, Overlap)> {
    let spheres = scene.spheres();
    let sphere = &spheres[i];

    scene.links().portals().filter(|&j| j != i).find_map(|j| {
        let exit = scene.links().linked(j).filter(|&k| k < spheres.len())?;
        let portal = &spheres[j];
        match Overlap::classify(sphere.position, sphere.radius, portal.position, portal.radius) {
            Overlap::None => None,
            overlap => Some((j, exit, overlap)),
        }
    })
}
