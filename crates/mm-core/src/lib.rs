pub mod config;
pub mod id;
pub mod model;
pub mod scene;
pub mod share;
pub mod store;
pub mod viewport;

pub use config::{CanvasConfig, ConfigError};
pub use id::{ConnectionId, NodeId};
pub use model::*;
pub use scene::{SceneModel, SceneObserver};
pub use store::{MapStore, MapUpdate, SavedMap, StoreError};
pub use viewport::{SurfaceRect, Viewport};
