use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use image::RgbaImage;
use tracing::{debug, warn};

use crate::blink::cycle::{BlinkCycle, PendingMove};
use crate::foundation::core::{BlinkConfig, GeoPoint};
use crate::foundation::error::{BlinkmarkError, BlinkmarkResult};
use crate::schedule::ticker::{ensure_owning_context, TickScheduler, TickToken};
use crate::surface::map::{MarkerHandle, MarkerSurface};
use crate::variant::opacity::opacity_variants;

/// Where a controller is in its life.
///
/// Forward-only, except that stopping the blink returns to `Placed`.
/// `Removed` is terminal; the handle set no longer exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MarkerPhase {
    /// Built, nothing on the map yet.
    Detached,
    /// Variant markers placed, not ticking.
    Placed,
    /// Ticking; exactly one variant is visible at a time.
    Blinking,
    /// Markers removed from the surface; the controller is spent.
    Removed,
}

struct MarkerState {
    config: BlinkConfig,
    source: RgbaImage,
    handles: Vec<Box<dyn MarkerHandle>>,
    cycle: Option<BlinkCycle>,
    pending: Option<PendingMove>,
    scheduled: Option<TickToken>,
    /// Bumped on every start/stop; a tick from an older generation is
    /// stale and must not touch fresh state, even if its cancellation
    /// raced with it already being dequeued.
    generation: u64,
    phase: MarkerPhase,
}

/// A blinking map marker.
///
/// Owns the opacity-variant markers it places and the periodic tick that
/// cycles their visibility. Every mutating call must happen on the
/// execution context owning the scheduler and surface; the controller is
/// deliberately `!Send` on top of that guard.
///
/// Memory scales with `fps x blink_period`: each variant is a full icon
/// copy plus one placed marker, so keep icons small and the frame rate
/// modest.
pub struct BlinkingMarker {
    state: Rc<RefCell<MarkerState>>,
    surface: Rc<dyn MarkerSurface>,
    scheduler: Rc<dyn TickScheduler>,
}

impl BlinkingMarker {
    /// Build a controller for `icon`. Fails fast on a degenerate
    /// configuration, before any image or surface work.
    pub fn new(
        icon: RgbaImage,
        surface: Rc<dyn MarkerSurface>,
        scheduler: Rc<dyn TickScheduler>,
        config: BlinkConfig,
    ) -> BlinkmarkResult<Self> {
        config.validate()?;
        Ok(Self {
            state: Rc::new(RefCell::new(MarkerState {
                config,
                source: icon,
                handles: Vec::new(),
                cycle: None,
                pending: None,
                scheduled: None,
                generation: 0,
                phase: MarkerPhase::Detached,
            })),
            surface,
            scheduler,
        })
    }

    /// [`BlinkingMarker::new`] with the default 10 fps / 2 s timing.
    pub fn with_defaults(
        icon: RgbaImage,
        surface: Rc<dyn MarkerSurface>,
        scheduler: Rc<dyn TickScheduler>,
    ) -> BlinkmarkResult<Self> {
        Self::new(icon, surface, scheduler, BlinkConfig::default())
    }

    pub fn phase(&self) -> MarkerPhase {
        self.state.borrow().phase
    }

    pub fn is_blinking(&self) -> bool {
        self.phase() == MarkerPhase::Blinking
    }

    pub fn variant_count(&self) -> usize {
        self.state.borrow().config.variant_count()
    }

    /// Generate the variant set and place one invisible marker per
    /// variant at `position`.
    ///
    /// Calling again while markers exist logs a warning and changes
    /// nothing; calling after [`BlinkingMarker::remove_marker`] is an
    /// error.
    #[tracing::instrument(skip(self))]
    pub fn add_to_map(&self, position: GeoPoint) -> BlinkmarkResult<()> {
        ensure_owning_context(self.scheduler.as_ref(), "add_to_map")?;
        let mut state = self.state.borrow_mut();
        match state.phase {
            MarkerPhase::Removed => Err(BlinkmarkError::configuration(
                "marker was removed; build a new controller",
            )),
            MarkerPhase::Placed | MarkerPhase::Blinking => {
                warn!("marker icons already placed; ignoring add_to_map");
                Ok(())
            }
            MarkerPhase::Detached => {
                let variants = opacity_variants(&state.source, state.config.variant_count())?;
                let mut handles: Vec<Box<dyn MarkerHandle>> = Vec::with_capacity(variants.len());
                for icon in &variants {
                    match self.surface.place_marker(icon, position) {
                        Ok(mut handle) => {
                            handle.set_visible(false);
                            handles.push(handle);
                        }
                        Err(err) => {
                            // Leave no orphans behind a partial placement.
                            for placed in handles {
                                placed.remove();
                            }
                            return Err(err);
                        }
                    }
                }
                debug!(variants = handles.len(), "marker variants placed");
                state.handles = handles;
                state.phase = MarkerPhase::Placed;
                Ok(())
            }
        }
    }

    /// Start the blink cycle at the most opaque variant. The first tick
    /// runs immediately, not one interval later.
    ///
    /// Starting while already blinking logs a warning and changes
    /// nothing; starting without placed markers is an error.
    #[tracing::instrument(skip(self))]
    pub fn start_blinking(&self) -> BlinkmarkResult<()> {
        ensure_owning_context(self.scheduler.as_ref(), "start_blinking")?;
        {
            let mut state = self.state.borrow_mut();
            match state.phase {
                MarkerPhase::Removed => {
                    return Err(BlinkmarkError::configuration(
                        "marker was removed; build a new controller",
                    ));
                }
                MarkerPhase::Detached => {
                    return Err(BlinkmarkError::configuration(
                        "no markers placed; call add_to_map first",
                    ));
                }
                MarkerPhase::Blinking => {
                    warn!("already blinking; ignoring start_blinking");
                    return Ok(());
                }
                MarkerPhase::Placed => {
                    // A previous run may have left its last variant showing;
                    // start from a fully hidden set so each tick keeps
                    // exactly one variant visible.
                    for handle in state.handles.iter_mut() {
                        handle.set_visible(false);
                    }
                    state.cycle = Some(BlinkCycle::new(state.config.variant_count()));
                    state.generation += 1;
                    state.phase = MarkerPhase::Blinking;
                    debug!(generation = state.generation, "blink started");
                }
            }
        }
        schedule_tick(&self.state, &self.scheduler, Duration::ZERO);
        Ok(())
    }

    /// Stop ticking. The queued tick is cancelled by identity, so nothing
    /// fires afterwards; a later start begins a fresh cycle. No-op when
    /// not blinking.
    #[tracing::instrument(skip(self))]
    pub fn stop_blinking(&self) -> BlinkmarkResult<()> {
        ensure_owning_context(self.scheduler.as_ref(), "stop_blinking")?;
        let mut state = self.state.borrow_mut();
        if state.phase != MarkerPhase::Blinking {
            return Ok(());
        }
        if let Some(token) = state.scheduled.take() {
            self.scheduler.cancel(token);
        }
        state.cycle = None;
        state.generation += 1;
        state.phase = MarkerPhase::Placed;
        debug!("blink stopped");
        Ok(())
    }

    /// Request a position change.
    ///
    /// With `sync` the move waits for the fully transparent phase of the
    /// cycle; without it, the very next tick applies it. Only the latest
    /// request survives; there is no queue.
    pub fn request_move(&self, position: GeoPoint, sync: bool) -> BlinkmarkResult<()> {
        ensure_owning_context(self.scheduler.as_ref(), "request_move")?;
        let mut state = self.state.borrow_mut();
        if state.phase == MarkerPhase::Removed {
            return Err(BlinkmarkError::configuration(
                "marker was removed; build a new controller",
            ));
        }
        state.pending = Some(PendingMove {
            position,
            synchronized: sync,
        });
        Ok(())
    }

    /// Stop blinking if needed, then detach every variant marker from the
    /// surface and release the variant set. Idempotent.
    #[tracing::instrument(skip(self))]
    pub fn remove_marker(&self) -> BlinkmarkResult<()> {
        ensure_owning_context(self.scheduler.as_ref(), "remove_marker")?;
        let mut state = self.state.borrow_mut();
        if state.phase == MarkerPhase::Removed || state.phase == MarkerPhase::Detached {
            return Ok(());
        }
        if let Some(token) = state.scheduled.take() {
            self.scheduler.cancel(token);
        }
        state.cycle = None;
        state.pending = None;
        state.generation += 1;
        for handle in state.handles.drain(..) {
            handle.remove();
        }
        state.phase = MarkerPhase::Removed;
        debug!("marker removed");
        Ok(())
    }
}

impl Drop for BlinkingMarker {
    fn drop(&mut self) {
        // A queued tick only holds a weak reference, but cancel it anyway
        // so the scheduler does not carry a dead callback around.
        if let Some(token) = self.state.borrow_mut().scheduled.take() {
            self.scheduler.cancel(token);
        }
    }
}

fn schedule_tick(
    state: &Rc<RefCell<MarkerState>>,
    scheduler: &Rc<dyn TickScheduler>,
    delay: Duration,
) {
    let weak: Weak<RefCell<MarkerState>> = Rc::downgrade(state);
    let sched = Rc::clone(scheduler);
    let generation = state.borrow().generation;
    let token = scheduler.schedule(
        delay,
        Box::new(move || {
            if let Some(state) = weak.upgrade() {
                run_tick(&state, &sched, generation);
            }
        }),
    );
    state.borrow_mut().scheduled = Some(token);
}

fn run_tick(
    state: &Rc<RefCell<MarkerState>>,
    scheduler: &Rc<dyn TickScheduler>,
    generation: u64,
) {
    let interval = {
        let mut st = state.borrow_mut();
        if st.generation != generation || st.phase != MarkerPhase::Blinking {
            return;
        }
        let mut pending = st.pending.take();
        let step = match st.cycle.as_mut() {
            Some(cycle) => cycle.advance(&mut pending),
            None => return,
        };
        st.pending = pending;
        if let Some(position) = step.move_to {
            for handle in st.handles.iter_mut() {
                handle.set_position(position);
            }
        }
        // Hide before show: on the coincident start tick the current
        // variant must still end up visible.
        st.handles[step.hide].set_visible(false);
        st.handles[step.show].set_visible(true);
        st.config.tick_interval()
    };
    schedule_tick(state, scheduler, interval);
}
