use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::types::TouchPoint;

use super::bindings::{self, PipelineLayouts};

/// Elapsed time scalar, group 2 binding 0 on the WGSL side.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct TimeUniform {
    pub seconds: f32,
}

/// One touch point as the kernel sees it, group 2 binding 1.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct TouchPointGpu {
    pub position: [f32; 2],
}

/// Touch count scalar, group 2 binding 2.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct TouchCountUniform {
    pub count: u32,
}

const _: () = assert!(
    std::mem::size_of::<TimeUniform>() == 4,
    "size of TimeUniform does not match WGSL"
);
const _: () = assert!(
    std::mem::size_of::<TouchPointGpu>() == 8,
    "size of TouchPointGpu does not match WGSL"
);
const _: () = assert!(
    std::mem::size_of::<TouchCountUniform>() == 4,
    "size of TouchCountUniform does not match WGSL"
);

/// The frame's uniform and storage buffers, created fresh each draw call.
pub(crate) struct FrameUniforms {
    time: wgpu::Buffer,
    touch_points: wgpu::Buffer,
    touch_count: wgpu::Buffer,
}

impl FrameUniforms {
    /// Uploads the frame's scalars and the touch snapshot.
    pub fn upload(device: &wgpu::Device, seconds: f32, touches: &[TouchPoint]) -> Self {
        let time = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("time uniform"),
            contents: bytemuck::bytes_of(&TimeUniform { seconds }),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let points = gpu_points(touches);
        let touch_points = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("touch point buffer"),
            contents: bytemuck::cast_slice(&points),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let touch_count = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("touch count uniform"),
            contents: bytemuck::bytes_of(&TouchCountUniform {
                count: touches.len() as u32,
            }),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        Self {
            time,
            touch_points,
            touch_count,
        }
    }

    pub fn bind_group(&self, device: &wgpu::Device, layouts: &PipelineLayouts) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform bind group"),
            layout: &layouts.uniform_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: bindings::TIME_BINDING,
                    resource: self.time.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: bindings::TOUCH_POINTS_BINDING,
                    resource: self.touch_points.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: bindings::TOUCH_COUNT_BINDING,
                    resource: self.touch_count.as_entire_binding(),
                },
            ],
        })
    }
}

/// Converts a touch snapshot to its GPU layout.
///
/// Zero-sized buffers cannot be bound, so an empty snapshot uploads one
/// zeroed placeholder point; the bound count still tells the kernel there
/// are no touches.
fn gpu_points(touches: &[TouchPoint]) -> Vec<TouchPointGpu> {
    if touches.is_empty() {
        return vec![TouchPointGpu::zeroed()];
    }
    touches
        .iter()
        .map(|point| TouchPointGpu {
            position: [point.x, point.y],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_uploads_a_single_placeholder_point() {
        let points = gpu_points(&[]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].position, [0.0, 0.0]);
    }

    #[test]
    fn points_convert_in_order() {
        let touches = [
            TouchPoint { x: 1.0, y: 2.0 },
            TouchPoint { x: 3.0, y: 4.0 },
        ];
        let points = gpu_points(&touches);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].position, [1.0, 2.0]);
        assert_eq!(points[1].position, [3.0, 4.0]);
    }
}
