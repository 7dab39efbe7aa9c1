use std::path::Path;

use image::{Rgb, RgbImage};
use log::{info, warn};

use crate::config::Config;
use crate::draw::draw_segment;
use crate::errors::{ColoringPageError, Result};
use crate::fill::flood_fill;
use crate::history::EditHistory;
use crate::image_io::{load_image, save_image};
use crate::image_utils::{clamp_point, in_bounds};
use crate::pipeline::generate_page;

/// Pointer gesture phase, delivered by the presentation layer in
/// raster-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Press,
    Move,
    Release,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub button: PointerButton,
    pub phase: PointerPhase,
}

/// Interactive editing session.
///
/// Owns every piece of mutable interaction state: the working page, the
/// current fill color, the tool mode, the edit history and the drag anchor.
/// All mutation goes through the methods here, so the presentation layer
/// stays a thin producer of pointer events and toggle calls.
///
/// Undo contract: fills are committed to history, freehand strokes are not.
/// Undoing after drawing therefore reverts to the last fill commit (or the
/// generated baseline) and silently discards the strokes drawn since. This
/// mirrors the original behavior on purpose; see DESIGN.md before changing
/// it.
pub struct Session {
    config: Config,
    page: Option<RgbImage>,
    history: EditHistory,
    fill_color: Rgb<u8>,
    fill_tool_enabled: bool,
    drawing: bool,
    last_point: Option<(u32, u32)>,
    busy: bool,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let fill_color = Rgb(config.fill_color_rgb);
        Self {
            config,
            page: None,
            history: EditHistory::new(),
            fill_color,
            fill_tool_enabled: false,
            drawing: false,
            last_point: None,
            busy: false,
        }
    }

    /// Start a session from an already-generated page, seeding the history
    /// baseline. Used by hosts that produce the page elsewhere.
    pub fn with_page(config: Config, page: RgbImage) -> Self {
        let mut session = Self::new(config);
        session.history.initialize(&page);
        session.page = Some(page);
        session
    }

    pub fn page(&self) -> Option<&RgbImage> {
        self.page.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn fill_color(&self) -> Rgb<u8> {
        self.fill_color
    }

    pub fn fill_tool_enabled(&self) -> bool {
        self.fill_tool_enabled
    }

    /// Load a photo and generate a fresh page from it. On failure the
    /// previous page and history are left untouched.
    pub fn load_photo<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let input = load_image(path)?;
        info!(
            "loaded photo '{}' ({}x{})",
            input.filename,
            input.image.width(),
            input.image.height()
        );
        self.generate_from(&input.image)
    }

    /// Run the outline extraction pipeline and make its output the working
    /// page and the history baseline.
    pub fn generate_from(&mut self, photo: &RgbImage) -> Result<()> {
        self.enter_busy()?;
        let canvas = (
            self.config.canvas_dimensions[0],
            self.config.canvas_dimensions[1],
        );
        let result = generate_page(photo, canvas, &self.config);
        self.busy = false;

        let page = result?;
        self.history.initialize(&page);
        self.page = Some(page);
        self.drawing = false;
        self.last_point = None;
        Ok(())
    }

    /// Save the working page. Failure is reported but leaves the session
    /// fully usable.
    pub fn save_page<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| ColoringPageError::Save("no page to save".to_string()))?;
        save_image(page, path)
    }

    /// Update the current fill color. No history effect.
    pub fn set_fill_color(&mut self, color: [u8; 3]) {
        self.fill_color = Rgb(color);
    }

    /// Toggle between freehand drawing and fill mode. No history effect.
    pub fn set_fill_tool(&mut self, enabled: bool) {
        self.fill_tool_enabled = enabled;
    }

    /// Undo the most recent fill commit. Returns `true` when a snapshot was
    /// restored, `false` when only the baseline remains (no-op).
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(previous) => {
                self.page = Some(previous.clone());
                true
            }
            None => false,
        }
    }

    /// Single entry point for pointer gestures.
    ///
    /// Press/move/release drive freehand drawing; a double-activation
    /// triggers a flood fill, but only while the fill tool is armed, so that
    /// ordinary drags keep drawing.
    pub fn pointer(&mut self, event: PointerEvent) -> Result<()> {
        match event.phase {
            PointerPhase::Press => {
                if event.button == PointerButton::Primary && self.page.is_some() {
                    self.drawing = true;
                    self.last_point = Some(self.clamp_to_page(event.x, event.y));
                }
            }
            PointerPhase::Move => {
                if self.drawing {
                    if let (Some(page), Some(last)) = (self.page.as_mut(), self.last_point) {
                        let current = {
                            let (w, h) = page.dimensions();
                            clamp_point(event.x, event.y, w, h)
                        };
                        draw_segment(
                            page,
                            (last.0 as i32, last.1 as i32),
                            (current.0 as i32, current.1 as i32),
                            self.fill_color,
                        );
                        self.last_point = Some(current);
                    }
                }
            }
            PointerPhase::Release => {
                if event.button == PointerButton::Primary {
                    self.drawing = false;
                    self.last_point = None;
                }
            }
            PointerPhase::Double => {
                if self.fill_tool_enabled {
                    self.fill_at(event.x, event.y)?;
                }
            }
        }
        Ok(())
    }

    /// Flood fill at the seed point and commit the result. All-or-nothing:
    /// an error leaves the working page and the history unchanged.
    fn fill_at(&mut self, x: i32, y: i32) -> Result<()> {
        self.enter_busy()?;
        let result = (|| {
            let page = self
                .page
                .as_ref()
                .ok_or_else(|| ColoringPageError::Fill("no page to fill".to_string()))?;
            let (width, height) = page.dimensions();
            if !in_bounds(x, y, width, height) {
                return Err(ColoringPageError::Fill(format!(
                    "seed point ({}, {}) outside raster bounds {}x{}",
                    x, y, width, height
                )));
            }
            flood_fill(page, (x as u32, y as u32), self.fill_color)
        })();
        self.busy = false;

        match result {
            Ok(filled) => {
                self.history.commit(&filled);
                self.page = Some(filled);
                Ok(())
            }
            Err(e) => {
                warn!("flood fill failed: {}", e);
                Err(e)
            }
        }
    }

    fn clamp_to_page(&self, x: i32, y: i32) -> (u32, u32) {
        let (w, h) = self
            .page
            .as_ref()
            .map(|p| p.dimensions())
            .unwrap_or((1, 1));
        clamp_point(x, y, w, h)
    }

    /// Reentrant stage triggering is impossible under single-threaded event
    /// dispatch, but the invariant is enforced explicitly all the same.
    fn enter_busy(&mut self) -> Result<()> {
        if self.busy {
            return Err(ColoringPageError::Processing(
                "an operation is already in progress".to_string(),
            ));
        }
        self.busy = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const RED: [u8; 3] = [255, 0, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    fn event(x: i32, y: i32, phase: PointerPhase) -> PointerEvent {
        PointerEvent {
            x,
            y,
            button: PointerButton::Primary,
            phase,
        }
    }

    /// White page with a black box outline enclosing (50, 50).
    fn boxed_page() -> RgbImage {
        let mut page = RgbImage::from_pixel(100, 100, WHITE);
        for i in 20..=80 {
            page.put_pixel(i, 20, BLACK);
            page.put_pixel(i, 80, BLACK);
            page.put_pixel(20, i, BLACK);
            page.put_pixel(80, i, BLACK);
        }
        page
    }

    fn fill_session() -> Session {
        let mut session = Session::with_page(Config::default(), boxed_page());
        session.set_fill_tool(true);
        session
    }

    #[test]
    fn generation_seeds_a_single_history_snapshot() {
        let mut photo = RgbImage::from_pixel(400, 300, Rgb([230, 230, 230]));
        for x in 100..300 {
            for y in 100..103 {
                photo.put_pixel(x, y, Rgb([20, 20, 20]));
                photo.put_pixel(x, y + 100, Rgb([20, 20, 20]));
            }
        }

        let mut session = Session::new(Config::default());
        session.generate_from(&photo).unwrap();

        assert_eq!(session.history_len(), 1);
        assert_eq!(session.page().unwrap().dimensions(), (400, 300));
    }

    #[test]
    fn failed_generation_leaves_prior_state_untouched() {
        let mut session = fill_session();
        let before = session.page().unwrap().clone();

        let empty = RgbImage::new(0, 0);
        assert!(session.generate_from(&empty).is_err());

        assert_eq!(session.page().unwrap().as_raw(), before.as_raw());
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn double_click_fill_commits_to_history() {
        let mut session = fill_session();
        session.set_fill_color(RED);
        session.pointer(event(50, 50, PointerPhase::Double)).unwrap();

        assert_eq!(session.page().unwrap().get_pixel(50, 50), &Rgb(RED));
        // Stroke pixels act as barriers and stay black
        assert_eq!(session.page().unwrap().get_pixel(20, 50), &BLACK);
        assert_eq!(session.history_len(), 2);
    }

    #[test]
    fn fill_is_ignored_while_the_tool_is_disarmed() {
        let mut session = fill_session();
        session.set_fill_tool(false);
        session.set_fill_color(RED);
        session.pointer(event(50, 50, PointerPhase::Double)).unwrap();

        assert_eq!(session.page().unwrap().get_pixel(50, 50), &WHITE);
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn failed_fill_changes_nothing() {
        let mut session = fill_session();
        let before = session.page().unwrap().clone();

        assert!(session.pointer(event(-5, 50, PointerPhase::Double)).is_err());
        assert!(session.pointer(event(150, 50, PointerPhase::Double)).is_err());

        assert_eq!(session.page().unwrap().as_raw(), before.as_raw());
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn fill_without_a_page_is_a_fill_error() {
        let mut session = Session::new(Config::default());
        session.set_fill_tool(true);

        let err = session
            .pointer(event(10, 10, PointerPhase::Double))
            .unwrap_err();
        assert!(matches!(err, ColoringPageError::Fill(_)));
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn two_fills_then_undo_restores_the_first_fill() {
        let mut session = fill_session();
        session.set_fill_color(RED);
        session.pointer(event(50, 50, PointerPhase::Double)).unwrap();
        let after_first = session.page().unwrap().clone();

        session.set_fill_color(BLUE);
        session.pointer(event(5, 5, PointerPhase::Double)).unwrap();
        assert_eq!(session.history_len(), 3);

        assert!(session.undo());
        assert_eq!(session.page().unwrap().as_raw(), after_first.as_raw());
        assert_eq!(session.history_len(), 2);
    }

    #[test]
    fn undo_at_baseline_is_a_no_op() {
        let mut session = fill_session();
        let before = session.page().unwrap().clone();

        assert!(!session.undo());
        assert_eq!(session.page().unwrap().as_raw(), before.as_raw());
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn drag_draws_with_the_fill_color() {
        let mut session = Session::with_page(Config::default(), boxed_page());
        session.set_fill_color(RED);

        session.pointer(event(30, 50, PointerPhase::Press)).unwrap();
        session.pointer(event(60, 50, PointerPhase::Move)).unwrap();
        session.pointer(event(60, 50, PointerPhase::Release)).unwrap();

        assert_eq!(session.page().unwrap().get_pixel(45, 50), &Rgb(RED));
        // Freehand strokes are not committed
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn undo_after_drawing_discards_the_strokes() {
        let mut session = fill_session();
        session.set_fill_color(RED);
        session.pointer(event(50, 50, PointerPhase::Double)).unwrap();

        session.set_fill_color(BLUE);
        session.pointer(event(30, 30, PointerPhase::Press)).unwrap();
        session.pointer(event(60, 30, PointerPhase::Move)).unwrap();
        session.pointer(event(60, 30, PointerPhase::Release)).unwrap();
        assert_eq!(session.page().unwrap().get_pixel(45, 30), &Rgb(BLUE));

        // Undo reverts to the fill commit, dropping the uncommitted strokes.
        assert!(session.undo());
        assert_eq!(session.page().unwrap().get_pixel(45, 30), &Rgb(RED));
    }

    #[test]
    fn moves_without_a_press_do_not_draw() {
        let mut session = Session::with_page(Config::default(), boxed_page());
        session.set_fill_color(RED);
        session.pointer(event(40, 50, PointerPhase::Move)).unwrap();
        assert_eq!(session.page().unwrap().get_pixel(40, 50), &WHITE);
    }

    #[test]
    fn save_without_a_page_is_a_save_error() {
        let session = Session::new(Config::default());
        let err = session.save_page("/tmp/whatever.png").unwrap_err();
        assert!(matches!(err, ColoringPageError::Save(_)));
    }
}
