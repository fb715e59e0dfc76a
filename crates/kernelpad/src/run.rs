//! Orchestrates a playground launch: logging policy, shader-library loading
//! with the fail-safe-inert path, window creation, and the winit event loop
//! that feeds the renderer.
//!
//! Types:
//!
//! - None; this module ties the renderer crate to the desktop at runtime.
//!
//! Functions:
//!
//! - `run` drives the main execution path (or `--list-entries`).
//! - `initialise_tracing` configures logging.
//! - `renderer_config` translates CLI arguments into a `RendererConfig`.
//! - `load_library` reads and compiles the shader source, tolerating failure.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use renderer::{
    DrawOutcome, EntryStage, GpuContext, ImageBindings, RendererConfig, ShaderLibrary,
    ShaderRenderer, SurfaceError, TouchLog, TouchPoint,
};
use tracing_subscriber::EnvFilter;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::cli::Cli;

pub fn initialise_tracing() {
    let default_filter =
        "warn,kernelpad=info,renderer=info,naga=error,wgpu=error,wgpu_core=error,wgpu_hal=error,winit=error";
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let config = renderer_config(&cli);

    if cli.list_entries {
        return list_entries(&config);
    }

    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let (width, height) = config.surface_size;
    let window = WindowBuilder::new()
        .with_title("kernelpad")
        .with_inner_size(PhysicalSize::new(width, height))
        .build(&event_loop)
        .context("failed to create preview window")?;
    let window = Arc::new(window);

    // No GPU, no playground.
    let context = GpuContext::new(window.as_ref(), window.inner_size())?;

    let touches = Arc::new(TouchLog::new());
    let mut shader_renderer =
        ShaderRenderer::new(context, config.images.clone(), Arc::clone(&touches));

    if let Some(library) = load_library(&config.shader_source) {
        shader_renderer.set_library(library);
    }

    match shader_renderer.resolve_pipeline(&config.entry_point) {
        Ok(()) => tracing::info!(entry = %config.entry_point, "compute pipeline resolved"),
        Err(err) => tracing::error!(
            entry = %config.entry_point,
            error = %err,
            "pipeline resolution failed; frames will be skipped"
        ),
    }

    window.request_redraw();

    let mut cursor: Option<PhysicalPosition<f64>> = None;
    let mut pressed = false;

    event_loop
        .run(move |event, elwt| {
            // Drive redraws via vblank by waiting between events.
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            elwt.exit();
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            cursor = Some(position);
                            if pressed {
                                touches.record(touch_point(position));
                            }
                        }
                        WindowEvent::MouseInput { state, button, .. } => match button {
                            MouseButton::Left => {
                                pressed = state == ElementState::Pressed;
                                if pressed {
                                    if let Some(position) = cursor {
                                        touches.record(touch_point(position));
                                    }
                                }
                            }
                            MouseButton::Right if state == ElementState::Pressed => {
                                touches.clear();
                            }
                            _ => {}
                        },
                        WindowEvent::Resized(new_size) => {
                            shader_renderer.resize(new_size);
                        }
                        WindowEvent::RedrawRequested => match shader_renderer.draw() {
                            Ok(DrawOutcome::Presented) | Ok(DrawOutcome::Skipped) => {}
                            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                                shader_renderer.resize(shader_renderer.size());
                            }
                            Err(SurfaceError::OutOfMemory) => {
                                tracing::error!("surface out of memory; exiting");
                                elwt.exit();
                            }
                            Err(SurfaceError::Timeout) => {
                                tracing::warn!("surface timeout; retrying next frame");
                            }
                            Err(other) => {
                                tracing::warn!("surface error: {other:?}; retrying next frame");
                            }
                        },
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    // Schedule the next frame once winit is about to wait again.
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}

fn renderer_config(cli: &Cli) -> RendererConfig {
    RendererConfig {
        surface_size: cli.size,
        shader_source: cli.shader.clone(),
        entry_point: cli.entry.clone(),
        images: ImageBindings {
            input: Some(cli.input.clone()),
            lookup: Some(cli.lookup.clone()),
        },
    }
}

/// Reads and compiles the shader source.
///
/// Read and compile failures are reported once and leave the library unset;
/// the renderer then skips every frame instead of aborting the process.
fn load_library(path: &Path) -> Option<ShaderLibrary> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            tracing::error!(
                path = %path.display(),
                error = %err,
                "failed to read shader source; rendering stays inert"
            );
            return None;
        }
    };

    match ShaderLibrary::compile(&source) {
        Ok(library) => {
            tracing::info!(
                path = %path.display(),
                entry_points = library.entry_points().len(),
                "shader library compiled"
            );
            Some(library)
        }
        Err(err) => {
            tracing::error!(path = %path.display(), "shader compilation failed:\n{err}");
            None
        }
    }
}

fn list_entries(config: &RendererConfig) -> Result<()> {
    let path = &config.shader_source;
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read shader at {}", path.display()))?;
    let library = ShaderLibrary::compile(&source)
        .with_context(|| format!("failed to compile shader at {}", path.display()))?;

    println!("Compute entry points in {}:", path.display());
    let mut found = false;
    for entry in library.entry_points() {
        if entry.stage == EntryStage::Compute {
            found = true;
            println!(
                "  {} (workgroup {}x{}x{})",
                entry.name, entry.workgroup_size[0], entry.workgroup_size[1], entry.workgroup_size[2]
            );
        }
    }
    if !found {
        println!("  none");
    }
    Ok(())
}

fn touch_point(position: PhysicalPosition<f64>) -> TouchPoint {
    TouchPoint {
        x: position.x as f32,
        y: position.y as f32,
    }
}
