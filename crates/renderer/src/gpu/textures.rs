use std::path::Path;

use anyhow::{Context, Result};
use wgpu::util::{DeviceExt, TextureDataOrder};

use crate::types::ImageBindings;

/// A texture plus the view bound into the frame's texture group.
///
/// The texture handle is kept alive alongside the view for the duration of
/// the frame; both drop when the frame's resources go out of scope.
pub(crate) struct TextureBinding {
    pub _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

/// The two image resources resolved for one frame.
pub(crate) struct FrameTextures {
    pub input: TextureBinding,
    pub lookup: TextureBinding,
}

/// Loads the input and color-lookup images for the current frame.
///
/// Resources are frame-scoped: decoded and uploaded fresh on every call,
/// never cached. A missing or undecodable file resolves to a placeholder
/// binding; that must not interrupt the frame cadence, so it is logged at
/// debug level only.
pub(crate) fn load_frame_textures(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    images: &ImageBindings,
) -> FrameTextures {
    FrameTextures {
        input: resolve_binding(device, queue, images.input.as_deref(), "input"),
        lookup: resolve_binding(device, queue, images.lookup.as_deref(), "color lookup"),
    }
}

fn resolve_binding(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: Option<&Path>,
    role: &str,
) -> TextureBinding {
    match path {
        Some(path) => match load_image_texture(device, queue, path, role) {
            Ok(binding) => binding,
            Err(err) => {
                tracing::debug!(
                    role,
                    path = %path.display(),
                    error = %err,
                    "image resource unavailable; binding placeholder"
                );
                placeholder_texture(device, queue, role)
            }
        },
        None => placeholder_texture(device, queue, role),
    }
}

fn load_image_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
    role: &str,
) -> Result<TextureBinding> {
    let image = image::open(path)
        .with_context(|| format!("failed to open {role} image at {}", path.display()))?;

    let rgba = image.to_rgba8();
    let width = rgba.width();
    let height = rgba.height();
    if width == 0 || height == 0 {
        anyhow::bail!(
            "{role} image at {} has zero extent ({width}x{height})",
            path.display()
        );
    }

    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(&format!("{role} texture ({})", path.display())),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        TextureDataOrder::LayerMajor,
        rgba.as_raw(),
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    Ok(TextureBinding {
        _texture: texture,
        view,
    })
}

/// 1x1 opaque white stand-in for an absent image resource.
fn placeholder_texture(device: &wgpu::Device, queue: &wgpu::Queue, role: &str) -> TextureBinding {
    let data = [255u8, 255, 255, 255];
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(&format!("placeholder {role} texture")),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        TextureDataOrder::LayerMajor,
        &data,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    TextureBinding {
        _texture: texture,
        view,
    }
}

/// Sampler offered to the kernel: linear filtering on minification,
/// magnification, and mip level, with repeat addressing on all three axes.
pub(crate) fn frame_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("frame sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
