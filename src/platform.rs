//! Desktop shell: window, OS event pump, frame pacing and presentation.
//!
//! The shell owns a fixed-size [`PixelBuffer`] and presents it 1:1 through
//! softbuffer. OS events only update raw input levels; once per frame the
//! levels are folded into an [`Input`] snapshot and handed to the session.
//! The core never sees winit types.

use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use softbuffer::{Context, Surface};
use thiserror::Error;
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

use pixort_raster::{BufferError, PixelBuffer, PixelFormat};

use crate::constants::{BUFFER_HEIGHT, BUFFER_WIDTH, TARGET_FRAME_SECONDS};
use crate::input::{next_input, Input, InputLevels, Key};
use crate::session::SortSession;

/// Fatal shell setup/teardown errors. Per-frame presentation problems are
/// logged and skipped instead.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("could not create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("rendering surface error: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Run the session inside a desktop window until the window closes or
/// Escape is pressed.
pub fn run(mut session: SortSession) -> Result<(), ShellError> {
    let event_loop = EventLoop::new()?;
    let window = Rc::new(
        WindowBuilder::new()
            .with_title("pixort")
            .with_inner_size(PhysicalSize::new(BUFFER_WIDTH, BUFFER_HEIGHT))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    let context = Context::new(window.clone())?;
    let mut surface = Surface::new(&context, window.clone())?;

    let mut buffer = PixelBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, PixelFormat::XRGB)?;
    let mut levels = InputLevels::default();
    let mut input = Input::default();

    let frame = Duration::from_secs_f64(TARGET_FRAME_SECONDS);
    let mut next_tick = Instant::now();

    log::info!("window up, {}x{} @ {:.0} fps", BUFFER_WIDTH, BUFFER_HEIGHT, 1.0 / TARGET_FRAME_SECONDS);

    event_loop.run(|event, elwt| {
        elwt.set_control_flow(ControlFlow::WaitUntil(next_tick));

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(code),
                            state,
                            ..
                        },
                    ..
                } => {
                    if let Some(key) = map_key(code) {
                        levels.set_key_down(key, state == ElementState::Pressed);
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    let is_down = state == ElementState::Pressed;
                    match button {
                        MouseButton::Left => levels.left_down = is_down,
                        MouseButton::Right => levels.right_down = is_down,
                        MouseButton::Middle => levels.middle_down = is_down,
                        _ => {}
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    set_mouse_position(&mut levels, position.x, position.y, &window);
                }
                WindowEvent::RedrawRequested => present(&mut surface, &buffer),
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                if now >= next_tick {
                    input = next_input(&input, &levels);

                    if input.keyboard.key(Key::Escape).pressed {
                        elwt.exit();
                        return;
                    }

                    session.update_and_render(&input, &mut buffer);
                    window.request_redraw();

                    // Fixed cadence; re-anchor rather than burst-catch-up
                    // after a stall.
                    next_tick += frame;
                    if next_tick < now {
                        next_tick = now + frame;
                    }
                }
                elwt.set_control_flow(ControlFlow::WaitUntil(next_tick));
            }
            Event::LoopExiting => session.end_program(),
            _ => {}
        }
    })?;

    Ok(())
}

/// Normalize a cursor position against the window's client area, clamped to
/// `[0, 1)` on both axes as the input contract requires.
fn set_mouse_position(levels: &mut InputLevels, x: f64, y: f64, window: &Window) {
    let size = window.inner_size();
    if size.width == 0 || size.height == 0 {
        return;
    }
    let max_x = f64::from(size.width) - 1.0;
    let max_y = f64::from(size.height) - 1.0;
    levels.mouse_x = x.clamp(0.0, max_x) / f64::from(size.width);
    levels.mouse_y = y.clamp(0.0, max_y) / f64::from(size.height);
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Space => Some(Key::Space),
        KeyCode::KeyR => Some(Key::R),
        KeyCode::KeyG => Some(Key::G),
        KeyCode::KeyB => Some(Key::B),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

/// Copy the pixel buffer to the window surface. Presentation failures are
/// transient (minimized window, surface lost); log and try again next frame.
fn present(surface: &mut Surface<Rc<Window>, Rc<Window>>, buffer: &PixelBuffer) {
    let (Some(w), Some(h)) = (
        NonZeroU32::new(buffer.width()),
        NonZeroU32::new(buffer.height()),
    ) else {
        return;
    };

    if let Err(err) = surface.resize(w, h) {
        log::warn!("surface resize failed: {err}");
        return;
    }

    let mut frame = match surface.buffer_mut() {
        Ok(frame) => frame,
        Err(err) => {
            log::warn!("surface unavailable: {err}");
            return;
        }
    };

    if frame.len() == buffer.pixels().len() {
        frame.copy_from_slice(buffer.pixels());
        if let Err(err) = frame.present() {
            log::warn!("present failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key_covers_tracked_keys() {
        assert_eq!(map_key(KeyCode::Space), Some(Key::Space));
        assert_eq!(map_key(KeyCode::KeyR), Some(Key::R));
        assert_eq!(map_key(KeyCode::Escape), Some(Key::Escape));
        assert_eq!(map_key(KeyCode::KeyQ), None);
    }
}
