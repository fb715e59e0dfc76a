use anyhow::{anyhow, Context as AnyhowContext, Result};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::PhysicalSize;

use super::bindings::OUTPUT_FORMAT;

/// How compute output reaches the swapchain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PresentPath {
    /// The kernel writes the acquired swapchain texture directly.
    Direct,
    /// The kernel writes an intermediate storage texture that a render pass
    /// blits to the swapchain.
    Blit,
}

/// Owns the GPU device, its one long-lived queue, and the swapchain surface.
pub struct GpuContext {
    pub(crate) _instance: wgpu::Instance,
    pub(crate) surface: wgpu::Surface<'static>,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    pub(crate) config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    limits: wgpu::Limits,
    present_path: PresentPath,
}

impl GpuContext {
    /// Acquires the default GPU and configures a surface on the given target.
    ///
    /// Fails when no adapter or device is available; the host treats that as
    /// fatal, since nothing can be rendered without a GPU.
    pub fn new<T>(target: &T, initial_size: PhysicalSize<u32>) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let instance = wgpu::Instance::default();

        let window_handle = target
            .window_handle()
            .map_err(|err| anyhow!("failed to acquire window handle: {err}"))?;
        let display_handle = target
            .display_handle()
            .map_err(|err| anyhow!("failed to acquire display handle: {err}"))?;

        let surface = unsafe {
            instance.create_surface_unsafe(wgpu::SurfaceTargetUnsafe::RawHandle {
                raw_display_handle: display_handle.as_raw(),
                raw_window_handle: window_handle.as_raw(),
            })
        }
        .context("failed to create rendering surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("failed to find a suitable GPU adapter")?;

        let limits = adapter.limits();
        let max_dimension = limits.max_texture_dimension_2d;
        let requested_width = initial_size.width.max(1);
        let requested_height = initial_size.height.max(1);
        if requested_width > max_dimension || requested_height > max_dimension {
            anyhow::bail!(
                "GPU max texture dimension is {max_dimension}, requested surface is {requested_width}x{requested_height}"
            );
        }

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("kernelpad device"),
            required_features: wgpu::Features::empty(),
            required_limits: limits.clone(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::default(),
        }))
        .context("failed to create GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);

        // Kernels write rgba8unorm storage texels. When the surface itself can
        // be bound that way the intermediate copy is unnecessary.
        let direct_supported = surface_caps
            .usages
            .contains(wgpu::TextureUsages::STORAGE_BINDING)
            && surface_caps.formats.contains(&OUTPUT_FORMAT);

        let (surface_format, usage, present_path) = if direct_supported {
            (
                OUTPUT_FORMAT,
                wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::STORAGE_BINDING,
                PresentPath::Direct,
            )
        } else {
            let format = surface_caps
                .formats
                .iter()
                .copied()
                .find(|format| !format.is_srgb())
                .unwrap_or(surface_caps.formats[0]);
            (
                format,
                wgpu::TextureUsages::RENDER_ATTACHMENT,
                PresentPath::Blit,
            )
        };

        tracing::info!(
            ?present_path,
            ?surface_format,
            width = requested_width,
            height = requested_height,
            "resolved compute present path"
        );

        let present_mode = surface_caps
            .present_modes
            .iter()
            .copied()
            .find(|mode| *mode == wgpu::PresentMode::Fifo)
            .unwrap_or(surface_caps.present_modes[0]);

        let size = PhysicalSize::new(requested_width, requested_height);
        let config = wgpu::SurfaceConfiguration {
            usage,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&device, &config);

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            size,
            limits,
            present_path,
        })
    }

    /// Current surface size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub(crate) fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub(crate) fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub(crate) fn present_path(&self) -> PresentPath {
        self.present_path
    }

    /// Reconfigures the swapchain to match the new size.
    ///
    /// Zero-sized and over-limit requests are ignored, keeping the previous
    /// configuration; dispatch geometry adapts on its own since it is
    /// derived from [`size`](Self::size) every frame.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        let max_dimension = self.limits.max_texture_dimension_2d;
        if new_size.width > max_dimension || new_size.height > max_dimension {
            tracing::warn!(
                width = new_size.width,
                height = new_size.height,
                max_dimension,
                "resize exceeds GPU max texture dimension; keeping previous size"
            );
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }
}
