//! The sort session state machine.
//!
//! One tick = read one input snapshot, run at most one transition, issue a
//! bounded number of draw calls. Everything is synchronous: image decode
//! and file moves block the tick they happen in, which is acceptable for a
//! human-paced tool.
//!
//! Redraw discipline: transitions repaint only the zones whose content
//! changed (image zone, one category strip, the toggle icon). The whole
//! buffer is repainted only on session start and on completion.

use std::path::PathBuf;

use pixort_raster::{Histogram, PixelBuffer, PixelRange, Quantizer, RasterImage};

use crate::config::AppConfig;
use crate::constants::{
    BACKGROUND, BAR_COLOR, COMPLETE_BACKGROUND, ICON_ACTIVE, ICON_IDLE, OUTLINE_THICKNESS,
    ROI_OUTLINE, ZONE_OUTLINE,
};
use crate::files;
use crate::input::{Input, Key};
use crate::layout::{map_normalized, SessionLayout};
use crate::model::Category;

/// Session mode. `RegionSelect` is a sub-mode of `Sorting`, tracked
/// separately (see [`RegionSelect`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Sorting,
    Complete,
}

/// Region-select sub-mode state: whether it is active, the in-flight drag
/// anchor, and the committed region of interest (in image-zone buffer
/// coordinates). The region persists across images until redrawn.
#[derive(Debug, Default, Clone, Copy)]
struct RegionSelect {
    active: bool,
    anchor: Option<(u32, u32)>,
    roi: Option<PixelRange>,
}

/// The image currently on screen, decoded once and consumed by exactly one
/// decision (accept or skip), then discarded.
struct CurrentImage {
    path: PathBuf,
    image: RasterImage,
    hist: Histogram,
}

/// Holds the candidate list, per-category accumulators and the mode; reacts
/// to input each tick and drives the rasterizer.
///
/// The candidate file list is snapshotted once when sorting starts and
/// never re-scanned.
pub struct SortSession {
    config: AppConfig,
    quantizer: Quantizer,
    mode: Mode,
    initialized: bool,
    layout: Option<SessionLayout>,
    files: Vec<PathBuf>,
    cursor: usize,
    categories: Vec<Category>,
    region: RegionSelect,
    current: Option<CurrentImage>,
    /// Destination paths of every file moved this session, for the optional
    /// restore pass at shutdown.
    moved: Vec<PathBuf>,
}

impl SortSession {
    pub fn new(config: AppConfig) -> Self {
        let categories = config
            .categories
            .iter()
            .map(|c| Category::from_config(c, &config.source_dir))
            .collect();

        Self {
            quantizer: config.histogram_channel.to_quantizer(),
            config,
            mode: Mode::Idle,
            initialized: false,
            layout: None,
            files: Vec::new(),
            cursor: 0,
            categories,
            region: RegionSelect::default(),
            current: None,
            moved: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// One tick. The first call performs one-time setup against the
    /// buffer's dimensions.
    pub fn update_and_render(&mut self, input: &Input, buffer: &mut PixelBuffer) {
        if !self.initialized {
            self.layout = Some(SessionLayout::new(
                buffer.width(),
                buffer.height(),
                self.categories.len(),
            ));
            buffer.par_fill(BACKGROUND);
            self.initialized = true;
        }
        let Some(layout) = self.layout.clone() else {
            return;
        };

        match self.mode {
            Mode::Idle => {
                if input.keyboard.key(Key::Space).pressed {
                    self.start_sorting(&layout, buffer);
                }
            }
            Mode::Sorting => self.update_sorting(input, &layout, buffer),
            Mode::Complete => {}
        }
    }

    /// Final bulk reconciliation at shutdown: when configured, move every
    /// sorted file back to the source directory so a test run is
    /// repeatable.
    pub fn end_program(&mut self) {
        if !self.config.restore_on_exit {
            return;
        }

        log::info!("restoring {} sorted files", self.moved.len());
        for path in std::mem::take(&mut self.moved) {
            if !files::move_file(&path, &self.config.source_dir) {
                log::warn!("could not restore {}", path.display());
            }
        }
    }

    fn start_sorting(&mut self, layout: &SessionLayout, buffer: &mut PixelBuffer) {
        self.files = files::list_files_of_type(
            &self.config.source_dir,
            &self.config.file_extension,
            self.config.max_files,
        );
        log::info!(
            "session start: {} candidates under {}",
            self.files.len(),
            self.config.source_dir.display()
        );

        for (i, category) in self.categories.iter_mut().enumerate() {
            category.zone = layout.category_zone(i);
            category.accepts_moves = files::ensure_dir(&category.dest_dir);
            if !category.accepts_moves {
                log::warn!("category {} will not accept moves", category.name);
            }
        }

        self.mode = Mode::Sorting;
        self.cursor = 0;

        buffer.par_fill(BACKGROUND);
        self.draw_stats(buffer);
        self.draw_toggle_icon(layout, buffer);
        self.load_current(layout, buffer);
    }

    fn update_sorting(&mut self, input: &Input, layout: &SessionLayout, buffer: &mut PixelBuffer) {
        let (mx, my) = map_normalized(input.mouse.x, input.mouse.y, buffer.width(), buffer.height());

        // Clicking the sidebar icon toggles region-select.
        if input.mouse.left.pressed && layout.toggle_icon().contains(mx, my) {
            self.region.active = !self.region.active;
            self.region.anchor = None;
            log::debug!("region select: {}", self.region.active);
            self.draw_toggle_icon(layout, buffer);
            self.redraw_image(layout, buffer);
            return;
        }

        if self.region.active {
            self.update_region_drag(input, (mx, my), layout, buffer);
        } else if input.mouse.left.pressed {
            if let Some(index) = layout.category_at(mx, my) {
                self.commit(index, layout, buffer);
                return;
            }
        }

        // Hotkeys accept regardless of where the mouse is.
        let hotkey_hit = self.categories.iter().position(|c| {
            c.hotkey
                .is_some_and(|key| input.keyboard.key(key).pressed)
        });
        if let Some(index) = hotkey_hit {
            self.commit(index, layout, buffer);
            return;
        }

        if input.keyboard.key(Key::Space).pressed {
            if let Some(current) = &self.current {
                log::debug!("skipped {}", current.path.display());
            }
            self.advance(layout, buffer);
        }
    }

    /// Drag-start on the left button edge inside the image zone,
    /// drag-update while held, drag-end on release. A release without
    /// movement produces an empty rectangle and clears the region.
    fn update_region_drag(
        &mut self,
        input: &Input,
        (mx, my): (u32, u32),
        layout: &SessionLayout,
        buffer: &mut PixelBuffer,
    ) {
        let zone = layout.image_zone();

        if input.mouse.left.pressed {
            if zone.contains(mx, my) {
                self.region.anchor = Some((mx, my));
            }
        } else if input.mouse.left.ended_down {
            if let Some(anchor) = self.region.anchor {
                let rect = drag_rect(anchor, (mx, my)).intersect(&zone);
                self.redraw_image(layout, buffer);
                buffer.draw_outline_rect(rect, OUTLINE_THICKNESS, ROI_OUTLINE, zone);
            }
        } else if let Some(anchor) = self.region.anchor.take() {
            let rect = drag_rect(anchor, (mx, my)).intersect(&zone);
            self.region.roi = if rect.is_empty() { None } else { Some(rect) };
            log::debug!("region of interest: {:?}", self.region.roi);
            self.recompute_current_hist(layout);
            self.redraw_image(layout, buffer);
        }
    }

    fn commit(&mut self, index: usize, layout: &SessionLayout, buffer: &mut PixelBuffer) {
        let Some(current) = self.current.take() else {
            return;
        };

        let category = &mut self.categories[index];
        category.hist.append(&current.hist);
        log::info!("accepted {} into {}", current.path.display(), category.name);

        if category.accepts_moves {
            if files::move_file(&current.path, &category.dest_dir) {
                if let Some(name) = current.path.file_name() {
                    self.moved.push(category.dest_dir.join(name));
                }
            }
        } else {
            log::warn!(
                "category {} has no destination; {} left in place",
                category.name,
                current.path.display()
            );
        }

        let category = &self.categories[index];
        Self::draw_category_zone(category, buffer);
        self.advance(layout, buffer);
    }

    fn advance(&mut self, layout: &SessionLayout, buffer: &mut PixelBuffer) {
        self.cursor += 1;
        self.load_current(layout, buffer);
    }

    /// Decode the candidate at the cursor, skipping past files that fail to
    /// decode; completes the session when the list runs out.
    fn load_current(&mut self, layout: &SessionLayout, buffer: &mut PixelBuffer) {
        while self.cursor < self.files.len() {
            let path = self.files[self.cursor].clone();
            match files::load_image(&path) {
                Ok(image) => {
                    let hist = self.hist_of(&image, layout);
                    self.current = Some(CurrentImage { path, image, hist });
                    self.redraw_image(layout, buffer);
                    return;
                }
                Err(err) => {
                    log::warn!("skipping {}: {}", path.display(), err);
                    self.cursor += 1;
                }
            }
        }

        self.current = None;
        self.complete(buffer);
    }

    fn complete(&mut self, buffer: &mut PixelBuffer) {
        self.mode = Mode::Complete;
        buffer.par_fill(COMPLETE_BACKGROUND);
        log::info!("no more images; session complete");
    }

    fn recompute_current_hist(&mut self, layout: &SessionLayout) {
        let Some(current) = self.current.take() else {
            return;
        };
        let hist = self.hist_of(&current.image, layout);
        self.current = Some(CurrentImage { hist, ..current });
    }

    /// Histogram of an image, restricted to the active region of interest
    /// mapped from image-zone coordinates onto the image's own pixels.
    fn hist_of(&self, image: &RasterImage, layout: &SessionLayout) -> Histogram {
        let region = self
            .region
            .roi
            .and_then(|roi| roi_in_image(roi, layout.image_zone(), image));
        Histogram::of_image(image, region, self.quantizer)
    }

    fn draw_stats(&self, buffer: &mut PixelBuffer) {
        for category in &self.categories {
            Self::draw_category_zone(category, buffer);
        }
    }

    fn draw_category_zone(category: &Category, buffer: &mut PixelBuffer) {
        buffer.fill_rect(category.zone, category.color);
        buffer.draw_histogram(&category.hist, category.zone, BAR_COLOR, None);
        buffer.draw_outline_rect(category.zone, OUTLINE_THICKNESS, ZONE_OUTLINE, category.zone);
    }

    fn draw_toggle_icon(&self, layout: &SessionLayout, buffer: &mut PixelBuffer) {
        let icon = layout.toggle_icon();
        let fill = if self.region.active {
            ICON_ACTIVE
        } else {
            ICON_IDLE
        };
        buffer.fill_rect(icon, fill);
        buffer.draw_outline_rect(icon, OUTLINE_THICKNESS, ZONE_OUTLINE, icon);
    }

    /// Repaint the image zone: the current image stretched to fill the
    /// zone exactly, plus the region-of-interest outline when one is set.
    fn redraw_image(&self, layout: &SessionLayout, buffer: &mut PixelBuffer) {
        let zone = layout.image_zone();
        match &self.current {
            Some(current) => buffer.blit_image_into_range(&current.image, zone),
            None => buffer.fill_rect(zone, BACKGROUND),
        }
        if self.region.active {
            if let Some(roi) = self.region.roi {
                buffer.draw_outline_rect(roi, OUTLINE_THICKNESS, ROI_OUTLINE, zone);
            }
        }
    }
}

/// Rectangle spanned by a drag gesture. Exclusive of the larger coordinate,
/// so a click without movement yields an empty rectangle.
fn drag_rect((ax, ay): (u32, u32), (bx, by): (u32, u32)) -> PixelRange {
    PixelRange::new(ax.min(bx), ax.max(bx), ay.min(by), ay.max(by))
}

/// Map a region in image-zone buffer coordinates onto the image's own
/// coordinates, proportionally (the image is stretched to the zone).
fn roi_in_image(roi: PixelRange, zone: PixelRange, image: &RasterImage) -> Option<PixelRange> {
    let (zw, zh) = (u64::from(zone.width()), u64::from(zone.height()));
    if zw == 0 || zh == 0 {
        return None;
    }

    let map_x = |x: u32| (u64::from(x - zone.x_begin) * u64::from(image.width()) / zw) as u32;
    let map_y = |y: u32| (u64::from(y - zone.y_begin) * u64::from(image.height()) / zh) as u32;

    let mapped = PixelRange::new(
        map_x(roi.x_begin),
        map_x(roi.x_end),
        map_y(roi.y_begin),
        map_y(roi.y_end),
    );
    (!mapped.is_empty()).then_some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use image::{Rgba, RgbaImage};
    use pixort_raster::PixelFormat;

    use crate::config::{AppConfig, CategoryConfig};
    use crate::constants::{BUFFER_HEIGHT, BUFFER_WIDTH};
    use crate::input::ButtonState;

    fn write_png(dir: &Path, name: &str, rgba: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(4, 4, Rgba(rgba)).save(&path).unwrap();
        path
    }

    fn single_category_config(source: &Path) -> AppConfig {
        AppConfig {
            source_dir: source.to_path_buf(),
            categories: vec![CategoryConfig {
                name: "red".to_string(),
                color: [200, 40, 40],
                hotkey: Some('r'),
                dest_dir: None,
            }],
            ..AppConfig::default()
        }
    }

    fn buffer() -> PixelBuffer {
        PixelBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, PixelFormat::XRGB).unwrap()
    }

    fn pressed() -> ButtonState {
        ButtonState {
            pressed: true,
            ended_down: true,
        }
    }

    fn held() -> ButtonState {
        ButtonState {
            pressed: false,
            ended_down: true,
        }
    }

    fn space_input() -> Input {
        let mut input = Input::default();
        input.keyboard.set_key(Key::Space, pressed());
        input
    }

    fn click_at(range: PixelRange) -> Input {
        let cx = (range.x_begin + range.x_end) / 2;
        let cy = (range.y_begin + range.y_end) / 2;
        mouse_input(cx, cy, pressed())
    }

    fn mouse_input(x: u32, y: u32, left: ButtonState) -> Input {
        let mut input = Input::default();
        input.mouse.x = (f64::from(x) + 0.5) / f64::from(BUFFER_WIDTH);
        input.mouse.y = (f64::from(y) + 0.5) / f64::from(BUFFER_HEIGHT);
        input.mouse.left = left;
        input
    }

    fn layout_for(categories: usize) -> SessionLayout {
        SessionLayout::new(BUFFER_WIDTH, BUFFER_HEIGHT, categories)
    }

    #[test]
    fn test_idle_until_space() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SortSession::new(single_category_config(dir.path()));
        let mut buf = buffer();

        session.update_and_render(&Input::default(), &mut buf);
        assert_eq!(session.mode(), Mode::Idle);

        session.update_and_render(&space_input(), &mut buf);
        assert_eq!(session.mode(), Mode::Complete); // empty dir: straight to done
    }

    #[test]
    fn test_end_to_end_three_clicks() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", [255, 0, 0, 255]);
        write_png(dir.path(), "b.png", [0, 255, 0, 255]);
        write_png(dir.path(), "c.png", [0, 0, 255, 255]);

        // Per-image histograms, computed before the files move.
        let mut expected = Histogram::new();
        for name in ["a.png", "b.png", "c.png"] {
            let img = files::load_image(&dir.path().join(name)).unwrap();
            expected.append(&Histogram::of_image(&img, None, Quantizer::Luminance));
        }

        let mut session = SortSession::new(single_category_config(dir.path()));
        let mut buf = buffer();

        session.update_and_render(&space_input(), &mut buf);
        assert_eq!(session.mode(), Mode::Sorting);

        let zone = layout_for(1).category_zone(0);
        for _ in 0..3 {
            session.update_and_render(&click_at(zone), &mut buf);
        }

        assert_eq!(session.mode(), Mode::Complete);
        let dest = dir.path().join("red");
        for name in ["a.png", "b.png", "c.png"] {
            assert!(dest.join(name).exists(), "{name} not moved");
            assert!(!dir.path().join(name).exists());
        }
        assert_eq!(session.categories()[0].hist, expected);
    }

    #[test]
    fn test_skip_leaves_files_in_place() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", [10, 20, 30, 255]);
        write_png(dir.path(), "b.png", [40, 50, 60, 255]);

        let mut session = SortSession::new(single_category_config(dir.path()));
        let mut buf = buffer();

        session.update_and_render(&space_input(), &mut buf);
        session.update_and_render(&space_input(), &mut buf);
        session.update_and_render(&space_input(), &mut buf);

        assert_eq!(session.mode(), Mode::Complete);
        assert!(dir.path().join("a.png").exists());
        assert!(dir.path().join("b.png").exists());
        assert!(session.categories()[0].hist.is_empty());
    }

    #[test]
    fn test_hotkey_accepts_current_image() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", [128, 128, 128, 255]);

        let mut session = SortSession::new(single_category_config(dir.path()));
        let mut buf = buffer();
        session.update_and_render(&space_input(), &mut buf);

        let mut input = Input::default();
        input.keyboard.set_key(Key::R, pressed());
        session.update_and_render(&input, &mut buf);

        assert_eq!(session.mode(), Mode::Complete);
        assert!(dir.path().join("red").join("a.png").exists());
    }

    #[test]
    fn test_undecodable_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"not a png").unwrap();
        write_png(dir.path(), "good.png", [1, 2, 3, 255]);

        let mut session = SortSession::new(single_category_config(dir.path()));
        let mut buf = buffer();
        session.update_and_render(&space_input(), &mut buf);
        assert_eq!(session.mode(), Mode::Sorting);

        let zone = layout_for(1).category_zone(0);
        session.update_and_render(&click_at(zone), &mut buf);

        assert_eq!(session.mode(), Mode::Complete);
        assert!(dir.path().join("red").join("good.png").exists());
        // The broken file was never moved.
        assert!(dir.path().join("bad.png").exists());
    }

    #[test]
    fn test_degraded_category_accumulates_but_does_not_move() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", [9, 9, 9, 255]);

        // A file where the destination directory should be makes
        // create_dir_all fail.
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "x").unwrap();

        let mut config = single_category_config(dir.path());
        config.categories[0].dest_dir = Some(blocker.join("sub"));

        let mut session = SortSession::new(config);
        let mut buf = buffer();
        session.update_and_render(&space_input(), &mut buf);

        let zone = layout_for(1).category_zone(0);
        session.update_and_render(&click_at(zone), &mut buf);

        assert_eq!(session.mode(), Mode::Complete);
        assert!(!session.categories()[0].hist.is_empty());
        assert!(dir.path().join("a.png").exists()); // untouched
    }

    #[test]
    fn test_restore_on_exit_moves_files_back() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", [77, 77, 77, 255]);

        let mut config = single_category_config(dir.path());
        config.restore_on_exit = true;

        let mut session = SortSession::new(config);
        let mut buf = buffer();
        session.update_and_render(&space_input(), &mut buf);
        let zone = layout_for(1).category_zone(0);
        session.update_and_render(&click_at(zone), &mut buf);
        assert!(dir.path().join("red").join("a.png").exists());

        session.end_program();
        assert!(dir.path().join("a.png").exists());
        assert!(!dir.path().join("red").join("a.png").exists());
    }

    #[test]
    fn test_region_select_restricts_histogram() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", [100, 150, 200, 255]);

        let mut session = SortSession::new(single_category_config(dir.path()));
        let mut buf = buffer();
        session.update_and_render(&space_input(), &mut buf);

        let layout = layout_for(1);
        let full_total = 16; // 4x4 image

        // Toggle region-select via the sidebar icon.
        session.update_and_render(&click_at(layout.toggle_icon()), &mut buf);

        // Drag from (100, 100) to (200, 300) inside the image zone.
        session.update_and_render(&mouse_input(100, 100, pressed()), &mut buf);
        session.update_and_render(&mouse_input(150, 200, held()), &mut buf);
        session.update_and_render(&mouse_input(200, 300, ButtonState::default()), &mut buf);

        // The current image's histogram now covers only the mapped region.
        let current = session.current.as_ref().unwrap();
        assert!(current.hist.total() < full_total);
        assert!(current.hist.total() > 0);

        // While region-select is active, category clicks do not commit.
        session.update_and_render(&click_at(layout.category_zone(0)), &mut buf);
        assert_eq!(session.mode(), Mode::Sorting);
        assert!(dir.path().join("a.png").exists());

        // Toggling off re-enables committing.
        session.update_and_render(&click_at(layout.toggle_icon()), &mut buf);
        session.update_and_render(&click_at(layout.category_zone(0)), &mut buf);
        assert_eq!(session.mode(), Mode::Complete);
    }

    #[test]
    fn test_click_without_movement_clears_region() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", [100, 150, 200, 255]);

        let mut session = SortSession::new(single_category_config(dir.path()));
        let mut buf = buffer();
        session.update_and_render(&space_input(), &mut buf);

        let layout = layout_for(1);
        session.update_and_render(&click_at(layout.toggle_icon()), &mut buf);

        session.update_and_render(&mouse_input(100, 100, pressed()), &mut buf);
        session.update_and_render(&mouse_input(100, 100, ButtonState::default()), &mut buf);

        assert!(session.region.roi.is_none());
        assert_eq!(session.current.as_ref().unwrap().hist.total(), 16);
    }

    #[test]
    fn test_roi_in_image_mapping() {
        let zone = PixelRange::new(0, 576, 0, 720);
        let image = RasterImage::from_rgba(RgbaImage::new(576, 720));

        // Identity-sized image: the mapping is one-to-one.
        let roi = PixelRange::new(10, 20, 30, 40);
        assert_eq!(roi_in_image(roi, zone, &image), Some(roi));

        // Smaller image: proportional, empty result suppressed.
        let tiny = RasterImage::from_rgba(RgbaImage::new(4, 4));
        let mapped = roi_in_image(PixelRange::new(0, 576, 0, 720), zone, &tiny).unwrap();
        assert_eq!(mapped, PixelRange::new(0, 4, 0, 4));
        assert!(roi_in_image(PixelRange::new(10, 20, 0, 720), zone, &tiny).is_none());
    }
}
