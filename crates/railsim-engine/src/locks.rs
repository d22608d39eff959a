//! Exclusive, non-blocking resource locks.
//!
//! Every lock is one `AtomicU64` slot holding `0` when free or the
//! holder's packed [`TrainId`] when taken. Acquisition is a single
//! compare-exchange and never waits; a train that loses simply retries on
//! a later tick. Release consumes the [`ResourceHandle`] returned by the
//! acquisition, so a train cannot release twice or release something it
//! never acquired. A mismatch that still reaches the table (a handle from
//! a different table) panics with a [`ProtocolViolation`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use railsim_core::{LinkId, ProtocolViolation, StationSide, TrainId};
use railsim_network::RailNetwork;

const FREE: u64 = 0;

/// A lockable resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceId {
    /// The loading bay of a station side.
    Loading(StationSide),
    /// A directed track link.
    Link(LinkId),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading(side) => write!(f, "loading bay {side}"),
            Self::Link(link) => write!(f, "link {link}"),
        }
    }
}

/// Proof of ownership of one resource.
///
/// Not `Clone`: the only way to give a resource back is to move the
/// handle into [`ResourceLockTable::release`].
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceHandle {
    resource: ResourceId,
    holder: TrainId,
}

impl ResourceHandle {
    /// The resource this handle owns.
    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    /// The train that acquired it.
    pub fn holder(&self) -> TrainId {
        self.holder
    }
}

/// Lock slots for every loading bay and every registered link.
#[derive(Debug)]
pub struct ResourceLockTable {
    num_stations: u32,
    loading: Vec<AtomicU64>,
    links: Vec<AtomicU64>,
}

impl ResourceLockTable {
    /// Table with `2 × num_stations` loading locks and `num_links` link locks.
    pub fn new(num_stations: u32, num_links: usize) -> Self {
        Self {
            num_stations,
            loading: (0..2 * num_stations as usize)
                .map(|_| AtomicU64::new(FREE))
                .collect(),
            links: (0..num_links).map(|_| AtomicU64::new(FREE)).collect(),
        }
    }

    /// Table sized for `network`.
    pub fn for_network(network: &RailNetwork) -> Self {
        Self::new(network.num_stations(), network.links().len())
    }

    /// Try to take `resource` for `holder` without blocking.
    ///
    /// Returns `None` if another train holds it.
    ///
    /// # Panics
    ///
    /// Panics if `resource` is outside the table.
    pub fn try_acquire(&self, resource: ResourceId, holder: TrainId) -> Option<ResourceHandle> {
        self.slot(resource)
            .compare_exchange(FREE, holder.packed(), Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ResourceHandle { resource, holder })
    }

    /// Give back a resource.
    ///
    /// # Panics
    ///
    /// Panics with [`ProtocolViolation::ReleaseUnheld`] or
    /// [`ProtocolViolation::ReleaseByNonHolder`] if the slot is not held by
    /// the handle's holder.
    pub fn release(&self, handle: ResourceHandle) {
        let ResourceHandle { resource, holder } = handle;
        if let Err(actual) = self.slot(resource).compare_exchange(
            holder.packed(),
            FREE,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            let violation = match TrainId::unpack(actual) {
                None => ProtocolViolation::ReleaseUnheld {
                    resource: resource.to_string(),
                    releaser: holder,
                },
                Some(other) => ProtocolViolation::ReleaseByNonHolder {
                    resource: resource.to_string(),
                    releaser: holder,
                    holder: other,
                },
            };
            panic!("{violation}");
        }
    }

    /// Current holder of `resource`, if any.
    pub fn holder_of(&self, resource: ResourceId) -> Option<TrainId> {
        TrainId::unpack(self.slot(resource).load(Ordering::Acquire))
    }

    /// Number of resources currently held.
    pub fn held_count(&self) -> usize {
        self.loading
            .iter()
            .chain(&self.links)
            .filter(|s| s.load(Ordering::Acquire) != FREE)
            .count()
    }

    /// Number of loading locks (`2 × num_stations`).
    pub fn loading_lock_count(&self) -> usize {
        self.loading.len()
    }

    /// Number of link locks.
    pub fn link_lock_count(&self) -> usize {
        self.links.len()
    }

    fn slot(&self, resource: ResourceId) -> &AtomicU64 {
        let slot = match resource {
            ResourceId::Loading(side) => self.loading.get(side.index(self.num_stations)),
            ResourceId::Link(link) => self.links.get(link.0 as usize),
        };
        match slot {
            Some(s) => s,
            None => panic!("{resource} is not registered in this lock table"),
        }
    }
}
