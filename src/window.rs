//! SDL2 presentation of rendered frames.
//!
//! The renderer never touches SDL; the window only uploads a finished
//! [`Buffer<Color>`] to a streaming ARGB8888 [`FrameTexture`]. Render targets
//! keep row 0 at the bottom, so rows are flipped on upload.
//!
//! The texture borrows the [`TextureCreator`] it came from, so the caller
//! keeps the creator alive next to the window:
//!
//! ```ignore
//! let creator = window.texture_creator();
//! let mut texture = FrameTexture::new(&creator, width, height)?;
//! window.present(&mut texture, engine.color_buffer())?;
//! ```

use std::time::Duration;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::buffer::Buffer;
use crate::colors::Color;

pub const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    /// Mouse drag with the left button held, in pixels.
    Drag(i32, i32),
    /// Wheel steps, positive away from the user.
    Scroll(f32),
}

/// Sleeps out the rest of each frame to hold a target frame rate.
pub struct FrameLimiter {
    previous_frame_time: u64,
    frame_ms: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, fps: u32) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
            frame_ms: 1000 / u64::from(fps.max(1)),
        }
    }

    /// Waits if the frame finished early and returns the time since the
    /// previous call in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let elapsed = current_time.saturating_sub(self.previous_frame_time);

        if elapsed < self.frame_ms {
            std::thread::sleep(Duration::from_millis(self.frame_ms - elapsed));
            current_time = window.timer().ticks64();
        }

        let delta = current_time.saturating_sub(self.previous_frame_time);
        self.previous_frame_time = current_time;
        delta
    }
}

/// Streaming texture reused across frames, reallocated when the frame size
/// changes.
pub struct FrameTexture<'a> {
    creator: &'a TextureCreator<WindowContext>,
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

impl<'a> FrameTexture<'a> {
    pub fn new(creator: &'a TextureCreator<WindowContext>, width: u32, height: u32) -> Result<Self, String> {
        Ok(Self {
            creator,
            texture: create_streaming(creator, width, height)?,
            width,
            height,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Copy `frame` into the texture, row-flipped.
    pub fn upload(&mut self, frame: &Buffer<Color>) -> Result<(), String> {
        let size = frame_size(frame);
        if size != self.size() {
            self.texture = create_streaming(self.creator, size.0, size.1)?;
            (self.width, self.height) = size;
        }
        self.texture
            .update(None, &frame.to_argb_bytes(true), self.width as usize * 4)
            .map_err(|e| e.to_string())
    }
}

fn create_streaming(
    creator: &TextureCreator<WindowContext>,
    width: u32,
    height: u32,
) -> Result<Texture<'_>, String> {
    creator
        .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
        .map_err(|e| e.to_string())
}

fn frame_size(frame: &Buffer<Color>) -> (u32, u32) {
    (frame.width() as u32, frame.height() as u32)
}

pub struct Window {
    canvas: Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let event_pump = sdl_context.event_pump()?;

        Ok(Self {
            canvas,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drain pending SDL events.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(WindowEvent::Quit),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => events.push(WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32)),
                Event::MouseMotion {
                    mousestate, xrel, yrel, ..
                } if mousestate.is_mouse_button_pressed(MouseButton::Left) => {
                    events.push(WindowEvent::Drag(xrel, yrel))
                }
                Event::MouseWheel { y, .. } => events.push(WindowEvent::Scroll(y as f32)),
                _ => {}
            }
        }
        events
    }

    pub fn texture_creator(&self) -> TextureCreator<WindowContext> {
        self.canvas.texture_creator()
    }

    /// Upload `frame` through `texture` and show it. The frame must match
    /// the window size.
    pub fn present(&mut self, texture: &mut FrameTexture<'_>, frame: &Buffer<Color>) -> Result<(), String> {
        if frame_size(frame) != (self.width, self.height) {
            return Err(format!(
                "frame is {}x{}, window is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            ));
        }

        texture.upload(frame)?;

        self.canvas.clear();
        self.canvas.copy(&texture.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_follows_buffer() {
        assert_eq!(frame_size(&Buffer::new(800, 600, Color::BLACK)), (800, 600));
        assert_eq!(frame_size(&Buffer::single(Color::WHITE)), (1, 1));
    }
}
