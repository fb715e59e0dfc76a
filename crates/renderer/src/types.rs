use std::path::PathBuf;

/// A 2D point recorded from the host's input path, in physical pixels with
/// the origin at the window's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

/// Paths of the two image resources offered to the kernel each frame.
///
/// Either slot may be unset, and a set slot may point at a file that is
/// missing or undecodable; in all of those cases the corresponding texture
/// binding resolves to a placeholder rather than failing the frame.
#[derive(Clone, Debug, Default)]
pub struct ImageBindings {
    /// Image sampled as the kernel's main input texture.
    pub input: Option<PathBuf>,
    /// Image sampled as the kernel's color-lookup texture.
    pub lookup: Option<PathBuf>,
}

/// Immutable configuration passed to the playground at start-up.
///
/// `RendererConfig` mirrors CLI flags and tells the host which shader file
/// to compile, which entry point to dispatch, how large the preview window
/// should be, and which images to bind.
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Path to the WGSL file providing the compute kernel.
    pub shader_source: PathBuf,
    /// Name of the compute entry point to dispatch each frame.
    pub entry_point: String,
    /// Image resources offered to the kernel.
    pub images: ImageBindings,
}

impl Default for RendererConfig {
    /// Provides an 800x800 configuration with no shader selected.
    fn default() -> Self {
        Self {
            surface_size: (800, 800),
            shader_source: PathBuf::new(),
            entry_point: String::new(),
            images: ImageBindings::default(),
        }
    }
}
