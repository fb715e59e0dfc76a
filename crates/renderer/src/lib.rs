//! Renderer crate for KernelPad, an interactive compute-shader playground.
//!
//! The host binary wires the pieces together; this crate owns everything
//! that touches the GPU:
//!
//! ```text
//!   CLI / kernelpad
//!          │ RendererConfig
//!          ▼
//!   GpuContext ──▶ ShaderRenderer ◀── ShaderLibrary (WGSL via naga)
//!          ▲              │
//!   winit events          └─▶ draw(): textures + sampler + uniforms
//!   (resize, touches)                 → compute dispatch → present
//! ```
//!
//! A `ShaderLibrary` is compiled once from WGSL source and holds the entry
//! points it declares; `ShaderRenderer::resolve_pipeline` turns one of them
//! into the active compute pipeline. Each frame the renderer loads the two
//! image resources, snapshots the touch log, and dispatches the kernel over
//! the surface in fixed 16x16 workgroups. When the surface cannot be
//! storage-written directly, the kernel renders into an offscreen target
//! that a full-screen triangle blits to the swapchain.

mod clock;
mod gpu;
mod library;
mod renderer;
mod touch;
mod types;

pub use clock::FrameClock;
pub use gpu::context::GpuContext;
pub use gpu::dispatch::{dispatch_extent, WORKGROUP_SIZE};
pub use gpu::pipeline::PipelineError;
pub use library::{EntryPoint, EntryStage, LibraryError, ShaderLibrary};
pub use renderer::{DrawOutcome, ShaderRenderer};
pub use touch::TouchLog;
pub use types::{ImageBindings, RendererConfig, TouchPoint};

// Hosts match on surface errors without needing a direct wgpu dependency.
pub use wgpu::SurfaceError;
