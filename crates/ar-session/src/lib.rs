pub mod mock_raycaster;
pub mod traits;
pub mod types;

pub use mock_raycaster::MockPlaneRaycaster;
pub use traits::*;
pub use types::*;
