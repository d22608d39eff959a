//! Per-train state machine.
//!
//! ```text
//! WaitToLoad --acquire bay--> Loading --timer<=0, release bay--> Loaded
//!     ^                          |  (line ends here: advance node)  |
//!     |                          +------------> WaitToLoad          |
//!     +----- timer<=0, release link, advance node ---- Link <--acquire link
//! ```
//!
//! Each method here is one phase's worth of work for a single train. The
//! scheduler guarantees a train is only ever visited by one worker at a
//! time and that it acts at most once per tick.

use railsim_core::{DrawKey, NodeIdx, ProtocolViolation, RandomSource, TickId, TrainId};
use railsim_network::{LineNetwork, RailNetwork};
use tracing::trace;

use crate::config::DwellConfig;
use crate::locks::{ResourceHandle, ResourceId, ResourceLockTable};
use crate::snapshot::{Position, TrainView};
use crate::stats::StatEvent;

/// What a train is currently doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrainStatus {
    /// At a station, waiting for the loading bay.
    WaitToLoad,
    /// Holding the loading bay, dwell timer running.
    Loading,
    /// Done loading, waiting for the outgoing link.
    Loaded,
    /// Holding a link, transit timer running.
    Link,
}

/// Shared, read-only inputs for one phase.
pub(crate) struct PhaseContext<'a> {
    pub tick: TickId,
    pub network: &'a RailNetwork,
    pub locks: &'a ResourceLockTable,
    pub rng: &'a dyn RandomSource,
    pub dwell: DwellConfig,
}

/// Result of visiting one train in one phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// Nothing happened.
    Idle,
    /// The timer was decremented but has not matured.
    Counted,
    /// A timer matured and the held resource was released.
    Resolved(Option<StatEvent>),
    /// A resource was acquired.
    Acquired(Option<StatEvent>),
    /// An acquisition attempt lost to another train.
    Contended,
}

/// A train actor.
#[derive(Debug)]
pub struct Train {
    id: TrainId,
    node: NodeIdx,
    status: TrainStatus,
    time_left: i64,
    acted: bool,
    held: Option<ResourceHandle>,
    admission_tick: TickId,
}

impl Train {
    /// A train waiting to load at node 0 of its line.
    ///
    /// Trains are admitted two per tick in spawn order: the train with
    /// local id `k` first participates at tick `k / 2`.
    pub fn new(id: TrainId) -> Self {
        Self {
            id,
            node: NodeIdx(0),
            status: TrainStatus::WaitToLoad,
            time_left: 0,
            acted: false,
            held: None,
            admission_tick: TickId(u64::from(id.local / 2)),
        }
    }

    /// Train id.
    pub fn id(&self) -> TrainId {
        self.id
    }

    /// Current node on the line.
    pub fn node(&self) -> NodeIdx {
        self.node
    }

    /// Current status.
    pub fn status(&self) -> TrainStatus {
        self.status
    }

    /// Ticks left on the running timer. Only meaningful while
    /// [`Loading`](TrainStatus::Loading) or [`Link`](TrainStatus::Link).
    pub fn time_left(&self) -> i64 {
        self.time_left
    }

    /// Whether the train already acted in the tick being executed.
    pub fn acted_this_tick(&self) -> bool {
        self.acted
    }

    /// Resource currently owned, if any.
    pub fn held_resource(&self) -> Option<ResourceId> {
        self.held.as_ref().map(ResourceHandle::resource)
    }

    /// First tick at which the train participates.
    pub fn admission_tick(&self) -> TickId {
        self.admission_tick
    }

    /// `true` once `tick` has reached the admission tick.
    pub fn is_admitted(&self, tick: TickId) -> bool {
        tick >= self.admission_tick
    }

    /// Read-only view for reporting.
    pub fn view(&self, line: &LineNetwork) -> TrainView {
        let here = line.station_of(self.node);
        let position = match self.status {
            TrainStatus::Link => Position::Link {
                from: here,
                to: line.station_of(line.next_node(self.node)),
            },
            _ => Position::Station(here),
        };
        TrainView {
            id: self.id,
            status: self.status,
            node: self.node,
            position,
            time_left: self.time_left,
        }
    }

    /// Complete the running activity if its timer has reached zero.
    ///
    /// Shared by early resolution and decrement-and-resolve. Releases the
    /// held resource, moves to the next status, and marks the train as
    /// having acted.
    pub(crate) fn resolve_if_matured(&mut self, ctx: &PhaseContext<'_>) -> StepOutcome {
        if self.acted || self.time_left > 0 {
            return StepOutcome::Idle;
        }
        let Some(line) = ctx.network.line(self.id.line) else {
            return StepOutcome::Idle;
        };
        let event = match self.status {
            TrainStatus::Loading => {
                let side = line.station_of(self.node);
                self.release(ctx.locks);
                if line.ends_at(self.node) {
                    self.node = line.next_node(self.node);
                    self.status = TrainStatus::WaitToLoad;
                } else {
                    self.status = TrainStatus::Loaded;
                }
                Some(StatEvent::Departure {
                    line: self.id.line,
                    side,
                    tick: ctx.tick,
                })
            }
            TrainStatus::Link => {
                self.release(ctx.locks);
                self.node = line.next_node(self.node);
                self.status = TrainStatus::WaitToLoad;
                None
            }
            TrainStatus::WaitToLoad | TrainStatus::Loaded => return StepOutcome::Idle,
        };
        self.acted = true;
        StepOutcome::Resolved(event)
    }

    /// Count down a running timer and resolve it if it reaches zero.
    pub(crate) fn decrement_and_resolve(&mut self, ctx: &PhaseContext<'_>) -> StepOutcome {
        if self.acted || !matches!(self.status, TrainStatus::Loading | TrainStatus::Link) {
            return StepOutcome::Idle;
        }
        self.time_left -= 1;
        if self.time_left > 0 {
            self.acted = true;
            return StepOutcome::Counted;
        }
        self.resolve_if_matured(ctx)
    }

    /// Attempt the acquisition the current status calls for.
    ///
    /// Marks the train as having acted whether or not it succeeded.
    pub(crate) fn advance(&mut self, ctx: &PhaseContext<'_>) -> StepOutcome {
        if self.acted {
            return StepOutcome::Idle;
        }
        self.acted = true;
        let Some(line) = ctx.network.line(self.id.line) else {
            return StepOutcome::Idle;
        };
        match self.status {
            TrainStatus::WaitToLoad => {
                let side = line.station_of(self.node);
                if !self.acquire(ctx, ResourceId::Loading(side)) {
                    return StepOutcome::Contended;
                }
                let popularity = ctx.network.stations().popularity(side.station);
                let draw = ctx.rng.uniform(
                    DrawKey {
                        tick: ctx.tick,
                        train: self.id,
                    },
                    ctx.dwell.draw_range(),
                );
                let dwell = (f64::from(popularity) * f64::from(draw)).floor() as i64;
                self.time_left = dwell - 1;
                self.status = TrainStatus::Loading;
                StepOutcome::Acquired(Some(StatEvent::Arrival {
                    line: self.id.line,
                    side,
                    tick: ctx.tick,
                }))
            }
            TrainStatus::Loaded => {
                // Loaded is never entered at a turnaround, so the link exists.
                let (Some(link), Some(cost)) =
                    (line.link_of(self.node), line.transit_cost(self.node))
                else {
                    return StepOutcome::Idle;
                };
                if !self.acquire(ctx, ResourceId::Link(link)) {
                    return StepOutcome::Contended;
                }
                self.time_left = i64::from(cost) - 1;
                self.status = TrainStatus::Link;
                StepOutcome::Acquired(None)
            }
            TrainStatus::Loading | TrainStatus::Link => StepOutcome::Idle,
        }
    }

    /// Clear the per-tick flag.
    pub(crate) fn end_tick(&mut self) {
        self.acted = false;
    }

    fn acquire(&mut self, ctx: &PhaseContext<'_>, resource: ResourceId) -> bool {
        if let Some(held) = &self.held {
            let violation = ProtocolViolation::DoubleAcquire {
                train: self.id,
                held: held.resource().to_string(),
                requested: resource.to_string(),
            };
            panic!("{violation}");
        }
        match ctx.locks.try_acquire(resource, self.id) {
            Some(handle) => {
                self.held = Some(handle);
                true
            }
            None => {
                trace!(train = %self.id, %resource, tick = ctx.tick.0, "acquisition contended");
                false
            }
        }
    }

    fn release(&mut self, locks: &ResourceLockTable) {
        match self.held.take() {
            Some(handle) => locks.release(handle),
            None => {
                let violation = ProtocolViolation::ReleaseUnheld {
                    resource: format!("resource for {:?}", self.status),
                    releaser: self.id,
                };
                panic!("{violation}");
            }
        }
    }
}
