use crate::foundation::core::GeoPoint;

/// A requested-but-not-yet-applied position change. Single slot, last
/// write wins; there is no queue of moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PendingMove {
    pub position: GeoPoint,
    /// When set, the move waits for the fully transparent phase
    /// (`current == 0`) instead of applying on the next tick.
    pub synchronized: bool,
}

/// Effects one tick asks the controller to apply, in order: move first
/// (when present), then the visibility flip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TickStep {
    pub show: usize,
    pub hide: usize,
    pub move_to: Option<GeoPoint>,
}

/// The blink cycle state machine: which variant is visible, which was
/// visible on the previous tick, and which way the index is walking.
///
/// Pure bookkeeping; it never touches the map surface. The controller
/// feeds it the pending-move slot and executes the returned [`TickStep`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct BlinkCycle {
    variant_count: usize,
    current: usize,
    previous: usize,
    direction: i64,
}

impl BlinkCycle {
    /// Start a fresh cycle at the most opaque variant, walking down.
    /// `variant_count` must be >= 1 (validated by the controller config).
    pub(crate) fn new(variant_count: usize) -> Self {
        Self {
            variant_count,
            current: variant_count - 1,
            previous: variant_count - 1,
            direction: -1,
        }
    }

    /// Advance one tick.
    ///
    /// Order matters: the direction is fixed at the endpoints first, then
    /// the pending move is resolved against the pre-advance index, then
    /// the visibility flip is emitted, then the index steps.
    pub(crate) fn advance(&mut self, pending: &mut Option<PendingMove>) -> TickStep {
        if self.current == self.variant_count - 1 {
            self.direction = -1;
        } else if self.current == 0 {
            self.direction = 1;
        }

        let move_to = match *pending {
            Some(m) if !m.synchronized || self.current == 0 => {
                *pending = None;
                Some(m.position)
            }
            _ => None,
        };

        let step = TickStep {
            show: self.current,
            hide: self.previous,
            move_to,
        };

        self.previous = self.current;
        // Clamped so a single-variant cycle stays put instead of walking
        // off the end of the handle list.
        let next = self.current as i64 + self.direction;
        self.current = next.clamp(0, self.variant_count as i64 - 1) as usize;

        step
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blink/cycle.rs"]
mod tests;
