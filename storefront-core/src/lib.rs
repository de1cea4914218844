pub mod app_config;
pub mod gateway;
pub mod surface;

pub use app_config::{ClearPolicy, Config, GatewayMode};
pub use gateway::{GatewayError, GatewayReply, OrderGateway};
pub use surface::{DisplaySurface, RecordingSurface, StatusKind, StatusMessage, SurfaceState};
