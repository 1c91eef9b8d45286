/// Terminal renderer for the housing complex layout
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use hcx_core::{config::SKY_COLOR, AnimationState, Camera, Light, SceneLayout};
use nalgebra::Point3;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod error;
pub mod renderer;

pub use error::{Result, TerminalError};
pub use renderer::{build_drawables, AsciiRenderer, Drawable, Shading};

pub const MIN_WIDTH: u16 = 20;
pub const MIN_HEIGHT: u16 = 8;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: u32 = 2;

/// Raw mode and alternate screen, each released at most once
#[derive(Debug, Default)]
struct TerminalSession {
    raw_mode: bool,
    alternate_screen: bool,
}

impl TerminalSession {
    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw_mode = true;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        self.alternate_screen = true;
        Ok(())
    }

    /// Undo whatever `enter` got through. Safe to call repeatedly.
    fn leave(&mut self) -> io::Result<()> {
        if self.alternate_screen {
            self.alternate_screen = false;
            execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        }
        if self.raw_mode {
            self.raw_mode = false;
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.raw_mode || self.alternate_screen
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    drawables: Vec<Drawable>,
    glows: Vec<Point3<f32>>,
    shading: Shading,
    animation: AnimationState,
    renderer: AsciiRenderer,
    session: TerminalSession,
    last_update: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Build drawables for the current terminal size.
    pub fn new(layout: &SceneLayout) -> Result<Self> {
        let (width, height) = terminal::size()?;
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(TerminalError::ViewportTooSmall {
                width,
                height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }
        Ok(Self::with_size(layout, width, height))
    }

    /// Build drawables for a fixed viewport without touching the terminal.
    pub fn with_size(layout: &SceneLayout, width: u16, height: u16) -> Self {
        let glows = layout
            .lights
            .iter()
            .filter_map(|light| match light {
                Light::Point { position, .. } => Some(*position),
                _ => None,
            })
            .collect();

        let mut camera = Camera::new(1, 1);
        camera.set_viewport(width as u32, height as u32 * CELL_ASPECT);

        let drawables = build_drawables(layout);
        tracing::debug!(
            drawables = drawables.len(),
            triangles = drawables.iter().map(|d| d.mesh.len()).sum::<usize>(),
            "scene tessellated"
        );

        Self {
            drawables,
            glows,
            shading: Shading::from_layout(layout),
            animation: AnimationState::new(camera),
            renderer: AsciiRenderer::new(width as usize, height as usize, SKY_COLOR),
            session: TerminalSession::default(),
            last_update: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }

    pub fn run(&mut self) -> Result<()> {
        if let Err(e) = self.session.enter() {
            self.shutdown()?;
            return Err(e.into());
        }
        tracing::info!("render loop started");

        let result = self.main_loop();

        // Cleanup
        self.shutdown()?;
        result
    }

    /// Stop animating, release drawables and restore the terminal.
    /// Idempotent, and safe after a failed or skipped setup.
    pub fn shutdown(&mut self) -> Result<()> {
        self.animation.stop();
        if !self.drawables.is_empty() {
            tracing::debug!(released = self.drawables.len(), "releasing drawables");
            self.drawables = Vec::new();
            self.glows = Vec::new();
        }
        if self.session.is_active() {
            self.session.leave()?;
            tracing::info!("terminal restored");
        }
        Ok(())
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.animation.is_running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
                tracing::trace!(fps = self.fps, "frame rate");
            }
        }

        Ok(())
    }

    /// Quit keys stop the animation; resizes only change the viewport.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.animation.stop(),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    self.animation.stop()
                }
                _ => {}
            },
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    /// New viewport: camera aspect and frame buffers only, the layout stays.
    pub fn resize(&mut self, width: u16, height: u16) {
        tracing::debug!(width, height, "viewport resized");
        self.animation
            .camera
            .set_viewport(width as u32, height as u32 * CELL_ASPECT);
        self.renderer.resize(width as usize, height as usize);
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_update).as_secs_f32();
        self.last_update = now;
        self.animation.advance_seconds(dt);
    }

    /// Rasterise the current frame into the renderer's buffers.
    pub fn render_frame(&mut self) {
        self.renderer.clear();
        self.renderer
            .render(&self.drawables, &self.animation.camera, &self.shading);
        self.renderer.render_glows(&self.glows, &self.animation.camera);
    }

    fn render(&mut self) -> io::Result<()> {
        self.render_frame();

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Black),
            Print(format!(
                "Housing Complex | FPS: {:.1} | t={:.2} | Q=Quit",
                self.fps, self.animation.elapsed_time
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalApp {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            tracing::warn!(error = %e, "terminal teardown failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hcx_core::{build_housing_complex, ComplexConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layout() -> SceneLayout {
        build_housing_complex(&ComplexConfig::default(), &mut StdRng::seed_from_u64(8))
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_resize_keeps_drawables() {
        let layout = layout();
        let mut app = TerminalApp::with_size(&layout, 80, 24);
        let aspect = app.animation().camera.aspect;
        assert_eq!(app.drawable_count(), layout.len());

        app.handle_event(Event::Resize(120, 24));
        assert_eq!(app.drawable_count(), layout.len());
        assert_eq!(app.renderer().size(), (120, 24));
        assert!(app.animation().camera.aspect > aspect);
    }

    #[test]
    fn test_quit_keys_stop_animation() {
        let layout = layout();
        for event in [
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = TerminalApp::with_size(&layout, 40, 20);
            app.handle_event(event);
            assert!(!app.animation().is_running);
        }

        let mut app = TerminalApp::with_size(&layout, 40, 20);
        app.handle_event(key(KeyCode::Char('w'), KeyModifiers::NONE));
        assert!(app.animation().is_running);
    }

    #[test]
    fn test_render_frame_draws_scene() {
        let layout = layout();
        let mut app = TerminalApp::with_size(&layout, 60, 20);
        app.render_frame();
        assert!(app.renderer().covered_cells() > 0);
    }

    #[test]
    fn test_shutdown_is_idempotent_without_setup() {
        let layout = layout();
        let mut app = TerminalApp::with_size(&layout, 40, 20);
        app.shutdown().unwrap();
        app.shutdown().unwrap();
        assert_eq!(app.drawable_count(), 0);
        assert!(!app.animation().is_running);

        // Rendering after teardown is harmless
        app.render_frame();
        assert_eq!(app.renderer().covered_cells(), 0);
    }
}
