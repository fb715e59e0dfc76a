use winit::dpi::PhysicalSize;

/// Fixed thread-group shape, shared with the `@workgroup_size` attribute on
/// every kernel entry point.
pub const WORKGROUP_SIZE: [u32; 3] = [16, 16, 1];

/// Workgroup counts covering a surface of the given size.
///
/// Recomputed every frame from the live surface size; a zero dimension
/// yields a zero count, making the dispatch a no-op.
pub fn dispatch_extent(size: PhysicalSize<u32>) -> [u32; 3] {
    [
        size.width.div_ceil(WORKGROUP_SIZE[0]),
        size.height.div_ceil(WORKGROUP_SIZE[1]),
        1,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent(width: u32, height: u32) -> [u32; 3] {
        dispatch_extent(PhysicalSize::new(width, height))
    }

    #[test]
    fn exact_multiples_need_one_group_per_tile() {
        assert_eq!(extent(16, 16), [1, 1, 1]);
        assert_eq!(extent(32, 16), [2, 1, 1]);
    }

    #[test]
    fn partial_tiles_round_up() {
        assert_eq!(extent(17, 16), [2, 1, 1]);
        assert_eq!(extent(1, 1), [1, 1, 1]);
        assert_eq!(extent(800, 800), [50, 50, 1]);
    }

    #[test]
    fn zero_extent_dispatches_nothing() {
        assert_eq!(extent(0, 16), [0, 1, 1]);
        assert_eq!(extent(0, 0), [0, 0, 1]);
    }
}
