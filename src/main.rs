#![allow(dead_code)]

mod animator;
mod app;
mod constants;
mod field;
mod float_effect;
mod particle;
mod renderer;
mod scheduler;
mod surface;
mod tween;

use animator::ParticleAnimator;
use constants::*;
use float_effect::{FloatEffect, FloatElement};
use renderer::Renderer;
use scheduler::WindowScheduler;
use tween::Timeline;

use std::sync::Arc;
use std::time::Instant;

use glutin::prelude::*;
use glutin::surface::WindowSurface;
use rand::rngs::ThreadRng;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use egui_glow::EguiGlow;

type DotAnimator = ParticleAnimator<Renderer, WindowScheduler, ThreadRng>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    state: Option<AppState>,
    // Kept alive for the lifetime of the app when profiling is enabled
    _profiler: Option<puffin_http::Server>,
}

struct AppState {
    // Window and GL
    window: Arc<Window>,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    egui_glow: EguiGlow,

    // Particle field (absent when the renderer could not be created)
    animator: Option<DotAnimator>,

    // Floating label
    float_element: FloatElement,
    float_effect: FloatEffect,
    tweens: Option<Timeline>,

    started: Instant,
}

impl App {
    fn new() -> Self {
        Self {
            state: None,
            _profiler: start_profiler(),
        }
    }
}

fn start_profiler() -> Option<puffin_http::Server> {
    std::env::var_os(PROFILE_ENV)?;
    puffin::set_scopes_on(true);
    let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    match puffin_http::Server::new(&addr) {
        Ok(server) => {
            log::info!("puffin profiler listening on {}", addr);
            Some(server)
        }
        Err(e) => {
            log::warn!("failed to start puffin profiler: {}", e);
            None
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        } = match app::create_window(event_loop) {
            Ok(context) => context,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        // The window's client area is the container the field is measured against
        let size = window.inner_size();
        let container = (size.width as f32, size.height as f32);

        let surface = Renderer::new(gl.clone())
            .map_err(|e| log::warn!("particle renderer unavailable: {}", e))
            .ok();
        let mut animator = ParticleAnimator::init(
            surface,
            container,
            WindowScheduler::new(window.clone()),
            rand::thread_rng(),
        );
        if let Some(animator) = animator.as_mut() {
            animator.start();
        }

        let started = Instant::now();
        let float_element = FloatElement::new();
        let float_effect = FloatEffect::on_load(
            float_effect::prefers_reduced_motion(),
            Some(&float_element),
            started.elapsed(),
        );

        window.request_redraw();

        self.state = Some(AppState {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
            animator,
            float_element,
            float_effect,
            tweens: None,
            started,
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        let _ = state.egui_glow.on_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                state.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
                if let Some(animator) = state.animator.as_mut() {
                    animator.resize((size.width as f32, size.height as f32));
                }
            }
            WindowEvent::RedrawRequested => {
                state.update_and_render();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_mut() {
            state.teardown();
        }
    }
}

impl AppState {
    fn update_and_render(&mut self) {
        puffin::GlobalProfiler::lock().new_frame();
        puffin::profile_function!();

        let now = self.started.elapsed();

        // Particle field: only runs when this redraw is the frame it asked for
        let mut drew_field = false;
        if let Some(animator) = self.animator.as_mut() {
            if let Some(handle) = animator.scheduler_mut().take_pending() {
                drew_field = animator.frame(handle);
            }
        }
        if !drew_field {
            let [r, g, b, a] = BACKGROUND_COLOR;
            unsafe {
                use glow::HasContext;
                self.gl.clear_color(r, g, b, a);
                self.gl.clear(glow::COLOR_BUFFER_BIT);
            }
        }

        // Floating label
        self.float_effect.tick(now, &mut self.tweens);
        if let Some(timeline) = self.tweens.as_mut() {
            timeline.advance(now);
        }
        self.run_ui();
        self.egui_glow.paint(&self.window);

        // egui is up after its first frame, which makes the tweening utility available
        if self.tweens.is_none() {
            let mut timeline = Timeline::new();
            timeline.advance(now);
            log::debug!("tweening utility ready");
            self.float_effect.on_ready(&mut timeline);
            self.tweens = Some(timeline);
        }

        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            log::warn!("failed to swap buffers: {}", e);
        }

        // The label keeps animating even without a running particle loop
        let field_running = self.animator.as_ref().is_some_and(|a| a.is_running());
        if !field_running && !self.tweens.as_ref().map_or(true, |t| t.is_empty()) {
            self.window.request_redraw();
        }
    }

    fn run_ui(&mut self) {
        puffin::profile_function!();

        let offset_y = self.float_element.offset_y();
        self.egui_glow.run(&self.window, |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("floating_label"),
            ));
            let center = ctx.screen_rect().center() + egui::vec2(0.0, offset_y);
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                FLOAT_LABEL,
                egui::FontId::proportional(FLOAT_LABEL_SIZE),
                egui::Color32::from_rgb(
                    PARTICLE_COLOR_RGB[0],
                    PARTICLE_COLOR_RGB[1],
                    PARTICLE_COLOR_RGB[2],
                ),
            );
        });
    }

    /// Stop the frame loop before the window goes away
    fn teardown(&mut self) {
        if let Some(animator) = self.animator.as_mut() {
            animator.stop();
        }
    }
}
