/// Portal transport and ghost-image subsystem
///
/// Both passes scan in ascending sphere index and stop at the first match, so
/// results are deterministic regardless of how many portals overlap.
pub mod containment;
pub mod links;
pub mod transit;

pub use containment::{Containment, Overlap, project_ghosts};
pub use links::PortalLinks;
pub use transit::{Transit, apply_transit, transit_pose};
