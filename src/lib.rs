//! pixort - image triage tool
//!
//! Displays images from a source directory and sorts them into categories
//! on mouse clicks and key presses, moving files on disk as decisions are
//! made. Rendering is a pure CPU rasterizer (see `pixort_raster`); the
//! window shell only presents the finished pixel buffer.

pub mod config;
pub mod constants;
pub mod files;
pub mod input;
pub mod layout;
pub mod model;
pub mod platform;
pub mod session;

pub use config::AppConfig;
pub use session::SortSession;
