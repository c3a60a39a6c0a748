use image::RgbaImage;

use crate::foundation::{core::GeoPoint, error::BlinkmarkResult};

/// One placed marker object on the map surface.
///
/// Handles are created by [`MarkerSurface::place_marker`] and owned by the
/// blink controller; visibility and position mutations must happen on the
/// execution context that owns the surface.
pub trait MarkerHandle {
    /// Show or hide this marker.
    fn set_visible(&mut self, visible: bool);

    /// Move this marker to a new position.
    fn set_position(&mut self, position: GeoPoint);

    /// Detach this marker from the surface, consuming the handle.
    fn remove(self: Box<Self>);
}

/// The external map collaborator markers are placed on.
///
/// Blinkmark never draws anything itself; it hands each pre-masked icon
/// variant to the surface and from then on only toggles the returned
/// handles.
pub trait MarkerSurface {
    /// Place a new marker showing `icon` at `position`.
    ///
    /// The returned handle may start out visible; the controller hides it
    /// immediately after placement.
    fn place_marker(
        &self,
        icon: &RgbaImage,
        position: GeoPoint,
    ) -> BlinkmarkResult<Box<dyn MarkerHandle>>;
}
