//! Shader library compilation.
//!
//! A [`ShaderLibrary`] is WGSL source pushed through naga's front-end and
//! validator at load time, so a broken shader is rejected once, with a
//! readable diagnostic, instead of surfacing as a pipeline failure on the
//! first frame. The library keeps an inventory of the entry points it
//! declares; pipeline resolution checks names against that inventory.

use thiserror::Error;
use wgpu::naga;
use wgpu::naga::valid::{Capabilities, ValidationFlags, Validator};

/// Shader stage an entry point was declared for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryStage {
    Compute,
    Vertex,
    Fragment,
    Other,
}

impl From<naga::ShaderStage> for EntryStage {
    fn from(stage: naga::ShaderStage) -> Self {
        match stage {
            naga::ShaderStage::Compute => EntryStage::Compute,
            naga::ShaderStage::Vertex => EntryStage::Vertex,
            naga::ShaderStage::Fragment => EntryStage::Fragment,
            _ => EntryStage::Other,
        }
    }
}

/// A named entry point discovered in a compiled library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryPoint {
    pub name: String,
    pub stage: EntryStage,
    /// Workgroup size declared in the source; `[0, 0, 0]` for non-compute stages.
    pub workgroup_size: [u32; 3],
}

/// Why a shader source failed to become a library.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("WGSL parse error:\n{0}")]
    Parse(String),
    #[error("WGSL validation error: {0}")]
    Validation(String),
}

/// A compiled collection of named shader entry points.
///
/// Replaceable at any time; swapping the library has no effect on an
/// already-resolved pipeline until the caller resolves again.
#[derive(Clone, Debug)]
pub struct ShaderLibrary {
    source: String,
    entry_points: Vec<EntryPoint>,
}

impl ShaderLibrary {
    /// Compiles WGSL source into a library.
    pub fn compile(source: &str) -> Result<Self, LibraryError> {
        let module = naga::front::wgsl::parse_str(source)
            .map_err(|err| LibraryError::Parse(err.emit_to_string(source)))?;

        Validator::new(ValidationFlags::all(), Capabilities::all())
            .validate(&module)
            .map_err(|err| LibraryError::Validation(err.as_inner().to_string()))?;

        let entry_points = module
            .entry_points
            .iter()
            .map(|entry| EntryPoint {
                name: entry.name.clone(),
                stage: entry.stage.into(),
                workgroup_size: entry.workgroup_size,
            })
            .collect();

        Ok(Self {
            source: source.to_owned(),
            entry_points,
        })
    }

    /// Compiles the built-in library that every renderer starts out with.
    ///
    /// The built-in kernel paints an animated gradient, so a freshly wired
    /// playground shows motion before the user's own shader is assigned.
    pub fn builtin() -> Result<Self, LibraryError> {
        Self::compile(BUILTIN_WGSL)
    }

    /// Name of the compute entry point the built-in library declares.
    pub const BUILTIN_ENTRY_POINT: &'static str = "paint";

    /// The WGSL source this library was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every entry point the source declares, in declaration order.
    pub fn entry_points(&self) -> &[EntryPoint] {
        &self.entry_points
    }

    /// Looks up an entry point by name.
    pub fn entry(&self, name: &str) -> Option<&EntryPoint> {
        self.entry_points.iter().find(|entry| entry.name == name)
    }
}

/// Fallback kernel compiled into the binary. Declares the same binding
/// interface as user shaders so it runs against the fixed pipeline layout.
const BUILTIN_WGSL: &str = r"
@group(0) @binding(0) var dest: texture_storage_2d<rgba8unorm, write>;
@group(2) @binding(0) var<uniform> elapsed_seconds: f32;

@compute @workgroup_size(16, 16, 1)
fn paint(@builtin(global_invocation_id) gid: vec3<u32>) {
    let dims = textureDimensions(dest);
    if (gid.x >= dims.x || gid.y >= dims.y) {
        return;
    }
    let uv = vec2<f32>(gid.xy) / vec2<f32>(dims);
    let phase = 6.2831 * (uv.x + uv.y) + elapsed_seconds;
    let rgb = 0.5 + 0.5 * sin(vec3<f32>(0.0, 2.1, 4.2) + phase);
    textureStore(dest, gid.xy, vec4<f32>(rgb, 1.0));
}
";

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ENTRIES: &str = r"
        @group(0) @binding(0) var dest: texture_storage_2d<rgba8unorm, write>;

        @compute @workgroup_size(16, 16, 1)
        fn first(@builtin(global_invocation_id) gid: vec3<u32>) {
            textureStore(dest, gid.xy, vec4<f32>(0.0, 0.0, 0.0, 1.0));
        }

        @compute @workgroup_size(8, 8, 1)
        fn second(@builtin(global_invocation_id) gid: vec3<u32>) {
            textureStore(dest, gid.xy, vec4<f32>(1.0, 1.0, 1.0, 1.0));
        }
    ";

    #[test]
    fn compile_reports_declared_entry_points() {
        let library = ShaderLibrary::compile(TWO_ENTRIES).unwrap();
        let names: Vec<&str> = library
            .entry_points()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, ["first", "second"]);

        let first = library.entry("first").unwrap();
        assert_eq!(first.stage, EntryStage::Compute);
        assert_eq!(first.workgroup_size, [16, 16, 1]);

        let second = library.entry("second").unwrap();
        assert_eq!(second.workgroup_size, [8, 8, 1]);
    }

    #[test]
    fn compile_rejects_malformed_source() {
        let err = ShaderLibrary::compile("@compute fn broken( {").unwrap_err();
        assert!(matches!(err, LibraryError::Parse(_)));
    }

    #[test]
    fn entry_lookup_misses_unknown_names() {
        let library = ShaderLibrary::compile(TWO_ENTRIES).unwrap();
        assert!(library.entry("third").is_none());
    }

    #[test]
    fn builtin_library_declares_the_default_entry_point() {
        let library = ShaderLibrary::builtin().unwrap();
        let entry = library.entry(ShaderLibrary::BUILTIN_ENTRY_POINT).unwrap();
        assert_eq!(entry.stage, EntryStage::Compute);
        assert_eq!(entry.workgroup_size, [16, 16, 1]);
    }
}
