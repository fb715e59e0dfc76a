use std::borrow::Cow;

use thiserror::Error;

use crate::library::{EntryPoint, EntryStage, ShaderLibrary};

use super::bindings::PipelineLayouts;
use super::dispatch::WORKGROUP_SIZE;

/// Why a (library, entry point) pair failed to become a pipeline.
///
/// Every variant leaves the renderer without a usable pipeline; draw calls
/// skip silently until a later resolve succeeds.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no shader library is set; assign one before resolving a pipeline")]
    LibraryMissing,
    #[error("entry point `{name}` not found in the shader library (available: {available})")]
    EntryPointNotFound { name: String, available: String },
    #[error("entry point `{name}` is not a compute entry point")]
    NotAComputeEntryPoint { name: String },
    #[error(
        "entry point `{name}` declares workgroup size {actual:?}, the dispatch contract requires {expected:?}"
    )]
    WorkgroupSizeMismatch {
        name: String,
        actual: [u32; 3],
        expected: [u32; 3],
    },
}

/// Checks that `name` selects a dispatchable entry point of `library`.
pub(crate) fn validate_entry<'a>(
    library: &'a ShaderLibrary,
    name: &str,
) -> Result<&'a EntryPoint, PipelineError> {
    let entry = library
        .entry(name)
        .ok_or_else(|| PipelineError::EntryPointNotFound {
            name: name.to_owned(),
            available: available_names(library),
        })?;

    if entry.stage != EntryStage::Compute {
        return Err(PipelineError::NotAComputeEntryPoint {
            name: name.to_owned(),
        });
    }

    if entry.workgroup_size != WORKGROUP_SIZE {
        return Err(PipelineError::WorkgroupSizeMismatch {
            name: name.to_owned(),
            actual: entry.workgroup_size,
            expected: WORKGROUP_SIZE,
        });
    }

    Ok(entry)
}

/// Builds the compute pipeline for the named entry point.
///
/// The pipeline is derived from the library and name at the moment of this
/// call; swapping the library afterwards does not touch it.
pub(crate) fn resolve(
    device: &wgpu::Device,
    layouts: &PipelineLayouts,
    library: &ShaderLibrary,
    name: &str,
) -> Result<wgpu::ComputePipeline, PipelineError> {
    validate_entry(library, name)?;

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("kernel module"),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(library.source())),
    });

    Ok(
        device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("kernel pipeline"),
            layout: Some(&layouts.pipeline_layout),
            module: &module,
            entry_point: Some(name),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        }),
    )
}

fn available_names(library: &ShaderLibrary) -> String {
    let names: Vec<&str> = library
        .entry_points()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    if names.is_empty() {
        "none".to_owned()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED_ENTRIES: &str = r"
        @group(0) @binding(0) var dest: texture_storage_2d<rgba8unorm, write>;

        @compute @workgroup_size(16, 16, 1)
        fn good(@builtin(global_invocation_id) gid: vec3<u32>) {
            textureStore(dest, gid.xy, vec4<f32>(0.0, 0.0, 0.0, 1.0));
        }

        @compute @workgroup_size(8, 8, 1)
        fn small_groups(@builtin(global_invocation_id) gid: vec3<u32>) {
            textureStore(dest, gid.xy, vec4<f32>(0.0, 0.0, 0.0, 1.0));
        }

        @fragment
        fn shade() -> @location(0) vec4<f32> {
            return vec4<f32>(0.0, 0.0, 0.0, 1.0);
        }
    ";

    fn library() -> ShaderLibrary {
        ShaderLibrary::compile(MIXED_ENTRIES).unwrap()
    }

    #[test]
    fn valid_entry_resolves() {
        let library = library();
        let entry = validate_entry(&library, "good").unwrap();
        assert_eq!(entry.workgroup_size, WORKGROUP_SIZE);
    }

    #[test]
    fn unknown_entry_lists_available_names() {
        let library = library();
        let err = validate_entry(&library, "missing").unwrap_err();
        match err {
            PipelineError::EntryPointNotFound { name, available } => {
                assert_eq!(name, "missing");
                assert!(available.contains("good"));
                assert!(available.contains("shade"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_compute_entry_is_rejected() {
        let library = library();
        let err = validate_entry(&library, "shade").unwrap_err();
        assert!(matches!(err, PipelineError::NotAComputeEntryPoint { .. }));
    }

    #[test]
    fn wrong_workgroup_size_is_rejected() {
        let library = library();
        let err = validate_entry(&library, "small_groups").unwrap_err();
        match err {
            PipelineError::WorkgroupSizeMismatch {
                actual, expected, ..
            } => {
                assert_eq!(actual, [8, 8, 1]);
                assert_eq!(expected, WORKGROUP_SIZE);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
