//! Registry of directed transit edges actually used by some line.

use indexmap::IndexMap;
use railsim_core::{LinkId, StationId};

/// Dense registry mapping ordered station pairs to [`LinkId`]s.
///
/// Two lines that traverse the same ordered pair share one id and hence
/// one link lock.
#[derive(Clone, Debug, Default)]
pub struct LinkRegistry {
    edges: IndexMap<(StationId, StationId), u32>,
}

impl LinkRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `from -> to` with its cost, returning the existing id if
    /// the edge is already known.
    pub fn register(&mut self, from: StationId, to: StationId, cost: u32) -> LinkId {
        let entry = self.edges.entry((from, to));
        let idx = entry.index();
        entry.or_insert(cost);
        LinkId(idx as u32)
    }

    /// Id of `from -> to`, if registered.
    pub fn lookup(&self, from: StationId, to: StationId) -> Option<LinkId> {
        self.edges
            .get_index_of(&(from, to))
            .map(|i| LinkId(i as u32))
    }

    /// Endpoints of a registered link.
    pub fn endpoints(&self, link: LinkId) -> Option<(StationId, StationId)> {
        self.edges.get_index(link.0 as usize).map(|(k, _)| *k)
    }

    /// Transit cost of a registered link.
    pub fn cost(&self, link: LinkId) -> Option<u32> {
        self.edges.get_index(link.0 as usize).map(|(_, c)| *c)
    }

    /// Number of registered links.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// `true` if no link is registered (every line is a single station).
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
