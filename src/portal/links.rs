use crate::{SceneError, SceneResult};

/// Sparse directed mapping from a portal sphere to the sphere it leads to.
///
/// Links are conventionally symmetric but need not be: `A -> B, B -> C` is legal.
/// What is rejected at construction is a link to itself, a link past the end of
/// the table, and a link to a sphere that is not a portal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalLinks {
    links: Vec<Option<usize>>,
}

impl PortalLinks {
    pub fn new(links: Vec<Option<usize>>) -> SceneResult<Self> {
        let count = links.len();

        for (index, link) in links.iter().enumerate() {
            let Some(target) = *link else {
                continue;
            };

            if target == index {
                return Err(SceneError::SelfLink { index });
            }
            if target >= count {
                return Err(SceneError::LinkOutOfRange {
                    index,
                    target,
                    count,
                });
            }
            if links[target].is_none() {
                return Err(SceneError::LinkNotPortal { index, target });
            }
            if links[target] != Some(index) {
                log::warn!(
                    "Portal {} links to {}, which leads on to {:?}",
                    index,
                    target,
                    links[target]
                );
            }
        }

        Ok(Self { links })
    }

    /// Linked sphere of `index`, or `None` for ordinary spheres and out-of-range indices
    #[inline]
    pub fn linked(&self, index: usize) -> Option<usize> {
        self.links.get(index).copied().flatten()
    }

    #[inline]
    pub fn is_portal(&self, index: usize) -> bool {
        self.linked(index).is_some()
    }

    /// Portal sphere indices in ascending order
    pub fn portals(&self) -> impl Iterator<Item = usize> + '_ {
        self.links
            .iter()
            .enumerate()
            .filter_map(|(index, link)| link.map(|_| index))
    }

    /// Whether the portal at `index` links back to itself through its target
    pub fn is_symmetric(&self, index: usize) -> bool {
        self.linked(index)
            .is_some_and(|target| self.linked(target) == Some(index))
    }

    /// Link table in upload form, `-1` for no link
    pub fn as_indices(&self) -> Vec<i32> {
        self.links
            .iter()
            .map(|link| link.map_or(-1, |target| target as i32))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
