use std::sync::Arc;

use winit::dpi::PhysicalSize;

use crate::clock::FrameClock;
use crate::gpu::bindings::{self, PipelineLayouts, OUTPUT_FORMAT};
use crate::gpu::blit::BlitPipeline;
use crate::gpu::context::{GpuContext, PresentPath};
use crate::gpu::dispatch::dispatch_extent;
use crate::gpu::pipeline::{self, PipelineError};
use crate::gpu::textures::{frame_sampler, load_frame_textures};
use crate::gpu::uniforms::FrameUniforms;
use crate::library::ShaderLibrary;
use crate::touch::TouchLog;
use crate::types::ImageBindings;

/// What a draw call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// A frame was dispatched and presented.
    Presented,
    /// Prerequisites were missing; nothing was encoded or presented.
    Skipped,
}

/// Present-path resources fixed at construction.
enum PresentResources {
    /// The kernel writes the swapchain texture; nothing extra to hold.
    Direct,
    /// The kernel writes `target`, which `blit` copies to the swapchain.
    Blit {
        blit: BlitPipeline,
        target: StorageTarget,
    },
}

/// Offscreen texture the kernel writes on the blit path.
struct StorageTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: PhysicalSize<u32>,
}

impl StorageTarget {
    fn new(device: &wgpu::Device, size: PhysicalSize<u32>) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("compute target"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OUTPUT_FORMAT,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
            size,
        }
    }
}

/// Drives one compute kernel into the live surface, once per frame.
///
/// Holds the shader library, the pipeline resolved from it, and the inputs
/// the kernel sees: the two image bindings, the touch log, and the frame
/// clock. Without a resolved pipeline, [`draw`](Self::draw) skips silently.
pub struct ShaderRenderer {
    context: GpuContext,
    layouts: PipelineLayouts,
    present: PresentResources,
    library: Option<ShaderLibrary>,
    pipeline: Option<wgpu::ComputePipeline>,
    images: ImageBindings,
    touches: Arc<TouchLog>,
    clock: FrameClock,
}

impl ShaderRenderer {
    /// Wires a renderer to the given context.
    ///
    /// Starts with the built-in shader library installed, so resolving
    /// [`ShaderLibrary::BUILTIN_ENTRY_POINT`] works before any shader file
    /// has been assigned.
    pub fn new(context: GpuContext, images: ImageBindings, touches: Arc<TouchLog>) -> Self {
        let layouts = PipelineLayouts::new(context.device());

        let present = match context.present_path() {
            PresentPath::Direct => PresentResources::Direct,
            PresentPath::Blit => PresentResources::Blit {
                blit: BlitPipeline::new(context.device(), context.config.format),
                target: StorageTarget::new(context.device(), context.size()),
            },
        };

        let library = match ShaderLibrary::builtin() {
            Ok(library) => Some(library),
            Err(err) => {
                tracing::error!(error = %err, "built-in shader library failed to compile");
                None
            }
        };

        Self {
            context,
            layouts,
            present,
            library,
            pipeline: None,
            images,
            touches,
            clock: FrameClock::start(),
        }
    }

    /// Replaces the shader library. No effect on an already-resolved
    /// pipeline until [`resolve_pipeline`](Self::resolve_pipeline) runs.
    pub fn set_library(&mut self, library: ShaderLibrary) {
        tracing::debug!(
            entry_points = library.entry_points().len(),
            "shader library replaced"
        );
        self.library = Some(library);
    }

    /// Resolves the named entry point of the current library into the
    /// active compute pipeline.
    ///
    /// On any failure the previous pipeline is cleared and the renderer
    /// draws nothing until a later resolve succeeds.
    pub fn resolve_pipeline(&mut self, name: &str) -> Result<(), PipelineError> {
        self.pipeline = None;
        let library = self.library.as_ref().ok_or(PipelineError::LibraryMissing)?;
        let pipeline = pipeline::resolve(self.context.device(), &self.layouts, library, name)?;
        self.pipeline = Some(pipeline);
        Ok(())
    }

    /// Current surface size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.context.size()
    }

    /// Tracks a window resize.
    ///
    /// Only the swapchain (and the offscreen target on the blit path) are
    /// touched; dispatch geometry is derived from the live size each frame.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.context.resize(new_size);
        if let PresentResources::Blit { target, .. } = &mut self.present {
            let size = self.context.size();
            if target.size != size {
                *target = StorageTarget::new(self.context.device(), size);
            }
        }
    }

    /// Renders one frame.
    ///
    /// Creates every frame resource fresh, binds the kernel inputs in the
    /// fixed slot order, dispatches, and presents. Missing prerequisites
    /// skip the frame without error; surface loss is returned to the caller,
    /// which decides between resize and shutdown.
    pub fn draw(&mut self) -> Result<DrawOutcome, wgpu::SurfaceError> {
        let Some(pipeline) = self.pipeline.as_ref() else {
            tracing::trace!("no compute pipeline resolved; skipping frame");
            return Ok(DrawOutcome::Skipped);
        };

        let frame = self.context.surface.get_current_texture()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = self.context.device();
        let queue = self.context.queue();

        let textures = load_frame_textures(device, queue, &self.images);
        let sampler = frame_sampler(device);
        let groups = dispatch_extent(self.context.size());
        let seconds = self.clock.elapsed_seconds();
        let touches = self.touches.snapshot();
        let uniforms = FrameUniforms::upload(device, seconds, &touches);

        let output_view = match &self.present {
            PresentResources::Direct => &frame_view,
            PresentResources::Blit { target, .. } => &target.view,
        };

        let texture_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture bind group"),
            layout: &self.layouts.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: bindings::OUTPUT_TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(output_view),
                },
                wgpu::BindGroupEntry {
                    binding: bindings::INPUT_TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(&textures.input.view),
                },
                wgpu::BindGroupEntry {
                    binding: bindings::LOOKUP_TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(&textures.lookup.view),
                },
            ],
        });

        let sampler_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sampler bind group"),
            layout: &self.layouts.sampler_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: bindings::SAMPLER_BINDING,
                resource: wgpu::BindingResource::Sampler(&sampler),
            }],
        });

        let uniform_group = uniforms.bind_group(device, &self.layouts);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame encoder"),
        });

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("kernel dispatch"),
                timestamp_writes: None,
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(bindings::TEXTURE_GROUP, &texture_group, &[]);
            pass.set_bind_group(bindings::SAMPLER_GROUP, &sampler_group, &[]);
            pass.set_bind_group(bindings::UNIFORM_GROUP, &uniform_group, &[]);
            pass.dispatch_workgroups(groups[0], groups[1], groups[2]);
        }

        if let PresentResources::Blit { blit, target } = &self.present {
            blit.encode(device, &mut encoder, &target.view, &frame_view);
        }

        queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        tracing::trace!(
            seconds,
            touches = touches.len(),
            groups_x = groups[0],
            groups_y = groups[1],
            "presented frame"
        );
        Ok(DrawOutcome::Presented)
    }
}
