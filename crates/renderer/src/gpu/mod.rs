//! GPU plumbing behind the playground renderer.
//!
//! - `context` owns wgpu instance/device/surface wiring and resolves how
//!   compute output reaches the screen (direct storage writes vs blit).
//! - `bindings` is the single home of the fixed binding contract between the
//!   renderer and every kernel.
//! - `pipeline` turns a (library, entry point) pair into a compute pipeline
//!   with typed failures.
//! - `dispatch` holds the fixed workgroup shape and the per-frame group
//!   count arithmetic.
//! - `textures` materialises the two image resources (or placeholders) and
//!   the frame sampler.
//! - `uniforms` mirrors the kernel-visible scalars and the touch-point
//!   array into per-frame buffers.
//! - `blit` copies the intermediate storage target to the swapchain on
//!   surfaces that cannot be storage-written directly.

pub(crate) mod bindings;
pub(crate) mod blit;
pub(crate) mod context;
pub(crate) mod dispatch;
pub(crate) mod pipeline;
pub(crate) mod textures;
pub(crate) mod uniforms;
