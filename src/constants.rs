//! Global constants for the pixort application.

use pixort_raster::Color;

/// Backing buffer height; width follows at a 16:9 ratio.
pub const BUFFER_HEIGHT: u32 = 720;

/// Backing buffer width.
pub const BUFFER_WIDTH: u32 = BUFFER_HEIGHT * 16 / 9;

/// Target frame duration. Interaction is human-paced, so half of an
/// assumed 60 Hz refresh is plenty.
pub const TARGET_FRAME_SECONDS: f64 = 1.0 / 30.0;

/// Upper bound on the candidate file list snapshotted at session start.
pub const DEFAULT_MAX_FILES: usize = 1024;

/// Side length of the square region-select toggle icon.
pub const TOGGLE_ICON_SIZE: u32 = 64;

/// Width of the strip between the image zone and the category panel that
/// hosts the toggle icon.
pub const TOGGLE_STRIP_WIDTH: u32 = 64;

/// Window and idle-screen background.
pub const BACKGROUND: Color = Color::rgb(24, 24, 28);

/// Neutral fill shown once every candidate has been handled.
pub const COMPLETE_BACKGROUND: Color = Color::rgb(96, 96, 96);

/// Histogram bar color inside category zones.
pub const BAR_COLOR: Color = Color::WHITE;

/// Outline drawn around category zones.
pub const ZONE_OUTLINE: Color = Color::rgb(12, 12, 14);

/// Outline drawn while dragging a region-of-interest rectangle.
pub const ROI_OUTLINE: Color = Color::rgb(255, 255, 0);

/// Toggle icon fill when region-select is off / on.
pub const ICON_IDLE: Color = Color::rgb(70, 70, 80);
pub const ICON_ACTIVE: Color = Color::rgb(220, 180, 40);

/// Thickness of outlined rectangles (zones and ROI drag feedback).
pub const OUTLINE_THICKNESS: u32 = 2;
