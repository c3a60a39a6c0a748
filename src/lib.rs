//! Blinkmark simulates a blinking ("pulsing") map marker on surfaces that
//! cannot alpha-animate a placed marker icon.
//!
//! The pulse is faked with discrete opacity steps: a set of pre-rendered
//! icon variants is placed on the map once, and a periodic tick flips
//! binary visibility between them fast enough to read as a continuous
//! fade. Position changes can be synchronized with the cycle so a marker
//! never visibly jumps while it is near full opacity.
//!
//! # Pipeline overview
//!
//! 1. **Generate**: one source icon -> N opacity-graded variants
//!    ([`opacity_variants`])
//! 2. **Place**: one invisible marker per variant on the map surface
//!    ([`MarkerSurface`], driven by [`BlinkingMarker::add_to_map`])
//! 3. **Blink**: a self-rescheduling tick cycles visibility and applies
//!    pending moves at the phase the caller asked for ([`BlinkingMarker`])
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single execution context**: all mutations of one controller happen
//!   on the context that owns the map surface. Serialization comes from
//!   running everything on one injectable [`TickScheduler`], not from a
//!   lock; calls from elsewhere fail with a context error.
//! - **Pure cycle, effectful edges**: the blink state machine computes
//!   each tick's effects deterministically; talking to the map surface is
//!   confined to the controller.
//! - **Bounded, owned resources**: variant icons and placed markers are
//!   O(fps x blink period) and owned by exactly one controller; they are
//!   fully released by [`BlinkingMarker::remove_marker`].
#![forbid(unsafe_code)]

mod blink;
mod foundation;
mod schedule;
mod surface;
mod variant;

pub use blink::controller::{BlinkingMarker, MarkerPhase};
pub use foundation::core::{BlinkConfig, GeoPoint, DEFAULT_BLINK_PERIOD_MS, DEFAULT_FPS};
pub use foundation::error::{BlinkmarkError, BlinkmarkResult};
pub use schedule::manual::ManualScheduler;
pub use schedule::ticker::{ensure_owning_context, TickFn, TickScheduler, TickToken};
pub use surface::map::{MarkerHandle, MarkerSurface};
pub use variant::opacity::{apply_uniform_alpha, opacity_variants, variant_alphas};
