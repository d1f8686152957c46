//! HTTP middleware

pub mod app_root;
pub mod logging;

pub use app_root::{AppRootError, AppRootLayer, MountPoint};
pub use logging::logging_middleware;
