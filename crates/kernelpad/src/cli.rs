use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kernelpad",
    author,
    version,
    about = "Interactive playground for a single WGSL compute shader",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Path to the WGSL file providing the compute kernel.
    #[arg(value_name = "SHADER", default_value = "assets/shaders/playground.wgsl")]
    pub shader: PathBuf,

    /// Name of the compute entry point to dispatch each frame.
    #[arg(long, value_name = "NAME", default_value = "paint")]
    pub entry: String,

    /// Viewport size of the preview window (e.g. `800x800`).
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        default_value = "800x800",
        value_parser = parse_surface_size
    )]
    pub size: (u32, u32),

    /// Image bound as the kernel's input texture.
    #[arg(long, value_name = "PATH", default_value = "assets/textures/input.png")]
    pub input: PathBuf,

    /// Image bound as the kernel's color-lookup texture.
    #[arg(long, value_name = "PATH", default_value = "assets/textures/lookup.png")]
    pub lookup: PathBuf,

    /// Print the compute entry points found in the shader and exit.
    #[arg(long)]
    pub list_entries: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_surface_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{value}`"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width in `{value}`"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height in `{value}`"))?;
    if width == 0 || height == 0 {
        return Err(format!("surface size must be non-zero, got `{value}`"));
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_size_parses_both_separators() {
        assert_eq!(parse_surface_size("800x800").unwrap(), (800, 800));
        assert_eq!(parse_surface_size("1280X720").unwrap(), (1280, 720));
    }

    #[test]
    fn surface_size_rejects_malformed_input() {
        assert!(parse_surface_size("800").is_err());
        assert!(parse_surface_size("800xtall").is_err());
        assert!(parse_surface_size("0x600").is_err());
    }

    #[test]
    fn defaults_select_the_bundled_playground() {
        let cli = Cli::try_parse_from(["kernelpad"]).unwrap();
        assert_eq!(cli.shader, PathBuf::from("assets/shaders/playground.wgsl"));
        assert_eq!(cli.entry, "paint");
        assert_eq!(cli.size, (800, 800));
        assert!(!cli.list_entries);
    }

    #[test]
    fn overrides_are_honoured() {
        let cli = Cli::try_parse_from([
            "kernelpad",
            "demo.wgsl",
            "--entry",
            "ripple",
            "--size",
            "640x480",
        ])
        .unwrap();
        assert_eq!(cli.shader, PathBuf::from("demo.wgsl"));
        assert_eq!(cli.entry, "ripple");
        assert_eq!(cli.size, (640, 480));
    }
}
