//! Fixed binding contract between the renderer and every compute kernel.
//!
//! The slots below are a byte-for-byte agreement with the WGSL side and
//! must never be reordered: group 0 carries the textures (output, input,
//! color lookup), group 1 the sampler, group 2 the frame scalars (elapsed
//! time, touch points, touch count).

/// Bind group indices, in the order the draw path sets them.
pub const TEXTURE_GROUP: u32 = 0;
pub const SAMPLER_GROUP: u32 = 1;
pub const UNIFORM_GROUP: u32 = 2;

/// Group 0 bindings.
pub const OUTPUT_TEXTURE_BINDING: u32 = 0;
pub const INPUT_TEXTURE_BINDING: u32 = 1;
pub const LOOKUP_TEXTURE_BINDING: u32 = 2;

/// Group 1 bindings.
pub const SAMPLER_BINDING: u32 = 0;

/// Group 2 bindings.
pub const TIME_BINDING: u32 = 0;
pub const TOUCH_POINTS_BINDING: u32 = 1;
pub const TOUCH_COUNT_BINDING: u32 = 2;

/// Storage format every kernel writes; doubles as the direct-path surface format.
pub const OUTPUT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Bind group layouts shared by every resolved pipeline.
///
/// Built once per renderer so pipeline resolution and the per-frame bind
/// groups agree on the contract by construction.
pub(crate) struct PipelineLayouts {
    pub texture_layout: wgpu::BindGroupLayout,
    pub sampler_layout: wgpu::BindGroupLayout,
    pub uniform_layout: wgpu::BindGroupLayout,
    pub pipeline_layout: wgpu::PipelineLayout,
}

impl PipelineLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture layout"),
            entries: &texture_layout_entries(),
        });

        let sampler_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sampler layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: SAMPLER_BINDING,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            }],
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform layout"),
            entries: &uniform_layout_entries(),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kernel pipeline layout"),
            bind_group_layouts: &[&texture_layout, &sampler_layout, &uniform_layout],
            push_constant_ranges: &[],
        });

        Self {
            texture_layout,
            sampler_layout,
            uniform_layout,
            pipeline_layout,
        }
    }
}

fn texture_layout_entries() -> [wgpu::BindGroupLayoutEntry; 3] {
    let sampled = wgpu::BindingType::Texture {
        sample_type: wgpu::TextureSampleType::Float { filterable: true },
        view_dimension: wgpu::TextureViewDimension::D2,
        multisampled: false,
    };

    [
        wgpu::BindGroupLayoutEntry {
            binding: OUTPUT_TEXTURE_BINDING,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::StorageTexture {
                access: wgpu::StorageTextureAccess::WriteOnly,
                format: OUTPUT_FORMAT,
                view_dimension: wgpu::TextureViewDimension::D2,
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: INPUT_TEXTURE_BINDING,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: sampled,
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: LOOKUP_TEXTURE_BINDING,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: sampled,
            count: None,
        },
    ]
}

fn uniform_layout_entries() -> [wgpu::BindGroupLayoutEntry; 3] {
    let uniform = wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: None,
    };

    [
        wgpu::BindGroupLayoutEntry {
            binding: TIME_BINDING,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: uniform,
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: TOUCH_POINTS_BINDING,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: true },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: TOUCH_COUNT_BINDING,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: uniform,
            count: None,
        },
    ]
}
