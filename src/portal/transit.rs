/// Observer transit: teleporting the camera through a portal sphere
use glam::Vec3;

use crate::{
    math::{PortalMath, TRANSIT_EXIT_FACTOR},
    observer::Observer,
    scene::{Scene, Sphere},
};

/// A teleport applied to the observer this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transit {
    /// Portal sphere the observer entered
    pub portal: usize,
    /// Linked sphere the observer emerged from
    pub exit: usize,
    pub from: Vec3,
    pub to: Vec3,
}

/// Pose of `observer` after passing through `entry` and emerging from `exit`.
///
/// The observer leaves `exit` on the side opposite to where it entered `entry`,
/// just beyond the exit surface, with its look offset unchanged. Does not check
/// whether the observer is actually inside `entry`.
pub fn transit_pose(entry: &Sphere, exit: &Sphere, observer: &Observer) -> Observer {
    let normal = entry.position.direction_to(&observer.position);
    // Observer on the centre: both directions must come from the same fallback
    let to_center = if observer.position == entry.position {
        -normal
    } else {
        observer.position.direction_to(&entry.position)
    };

    let through_distance = normal.dot(to_center).abs() * TRANSIT_EXIT_FACTOR * exit.radius;
    let exit_position = exit.position + normal * exit.radius + to_center * through_distance;

    let mut moved = *observer;
    moved.relocate(exit_position);
    moved
}

/// Teleport the observer through the first portal (ascending index) whose volume
/// contains it. At most one transit is applied per call.
///
/// A link that does not resolve to a sphere with positive radius is treated as no
/// transit.
pub fn apply_transit(scene: &Scene, observer: &mut Observer) -> Option<Transit> {
    let links = scene.links();

    let (portal, entry) = links.portals().find_map(|index| {
        let sphere = scene.sphere(index)?;
        (sphere.position.distance_to(&observer.position) <= sphere.radius)
            .then_some((index, sphere))
    })?;

    let Some((exit_index, exit)) = links
        .linked(portal)
        .and_then(|target| scene.sphere(target).map(|sphere| (target, sphere)))
        .filter(|(_, sphere)| sphere.radius > 0.0)
    else {
        log::warn!(
            "Observer entered portal '{}' ({}) but its link does not resolve",
            entry.name,
            portal
        );
        return None;
    };

    let from = observer.position;
    *observer = transit_pose(entry, exit, observer);

    log::info!(
        "Observer transit '{}' ({}) -> '{}' ({}): ({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3})",
        entry.name,
        portal,
        exit.name,
        exit_index,
        from.x,
        from.y,
        from.z,
        observer.position.x,
        observer.position.y,
        observer.position.z
    );

    Some(Transit {
        portal,
        exit: exit_index,
        from,
        to: observer.position,
    })
}
