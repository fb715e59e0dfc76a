use std::fs;
use std::process::Command;

use tempfile::TempDir;

const PROBE_SHADER: &str = r"
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
fn list_entries_prints_compute_entry_points() {
    let dir = TempDir::new().unwrap();
    let shader = dir.path().join("probe.wgsl");
    fs::write(&shader, PROBE_SHADER).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_kernelpad"))
        .arg(&shader)
        .arg("--list-entries")
        .output()
        .expect("failed to run kernelpad --list-entries");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("first"));
    assert!(stdout.contains("16x16x1"));
    assert!(stdout.contains("second"));
    assert!(stdout.contains("8x8x1"));
}

#[test]
fn list_entries_fails_on_missing_shader() {
    let output = Command::new(env!("CARGO_BIN_EXE_kernelpad"))
        .arg("does-not-exist.wgsl")
        .arg("--list-entries")
        .output()
        .expect("failed to run kernelpad --list-entries");

    assert!(!output.status.success());
}

#[test]
fn list_entries_rejects_broken_shaders() {
    let dir = TempDir::new().unwrap();
    let shader = dir.path().join("broken.wgsl");
    fs::write(&shader, "@compute fn broken( {").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_kernelpad"))
        .arg(&shader)
        .arg("--list-entries")
        .output()
        .expect("failed to run kernelpad --list-entries");

    assert!(!output.status.success());
}
