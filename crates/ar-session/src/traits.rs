use crate::types::{ArError, ArSupport, RaycastHit, ScreenPoint};

/// The plane-tracking/raycasting subsystem. Implemented by the platform AR
/// runtime on device and by MockPlaneRaycaster in tests.
///
/// The bridge consumes this as `&mut dyn PlaneRaycaster`; the trait is the
/// entire surface the measurement side needs from the AR runtime.
pub trait PlaneRaycaster {
    /// Resolve (or re-resolve) the tracking subsystem handles.
    /// Idempotent; safe to call on an already-initialized session.
    fn initialize(&mut self) -> Result<(), ArError>;

    /// Plane-within-polygon hit test: cast a ray through the screen point
    /// and return the intersection with the nearest tracked surface.
    fn raycast(&mut self, screen: ScreenPoint) -> Result<RaycastHit, ArError>;

    /// Report device capability for the host shell.
    fn support(&self) -> ArSupport;
}
