use bytemuck::{Pod, Zeroable};

/// Capacity of the site storage buffer, in slots.
pub const MAX_SITE_NUM: u32 = 4096;

/// Bytes per site slot in the storage buffer.
///
/// Must match the WGSL `Site` struct: vec2f position padded to 16, vec4f
/// color. Host code never reads slots back; the stride only sizes the
/// allocation.
pub const SITE_SLOT_BYTES: u64 = 32;

/// Compute shader workgroup size, as declared on `compute_main`.
pub const WORKGROUP_SIZE: u32 = 64;

/// Per-frame uniform record shared by the compute and fragment stages.
///
/// Byte layout is a contract with the WGSL `Params` struct: two u32 then
/// two f32, 16 bytes total. `site_count` and `time_seed` are rewritten
/// every frame (offset 0); the canvas dimensions are written once at setup
/// (offset 8) and never change.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct FrameParams {
    pub site_count: u32,
    pub time_seed: u32,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl FrameParams {
    /// Byte offset of the per-frame `[site_count, time_seed]` pair.
    pub const FRAME_FIELDS_OFFSET: u64 = 0;

    /// Byte offset of the setup-time `[canvas_width, canvas_height]` pair.
    pub const CANVAS_FIELDS_OFFSET: u64 = 8;
}

/// Clamps a requested site count to the storage buffer's capacity.
pub fn clamp_site_count(n: u32) -> u32 {
    if n > MAX_SITE_NUM {
        log::warn!("site count {n} exceeds capacity {MAX_SITE_NUM}; clamped");
        MAX_SITE_NUM
    } else {
        n
    }
}

/// Number of workgroups needed to cover `n` sites: `ceil(n / WORKGROUP_SIZE)`.
///
/// `n = 0` yields a zero dispatch, which the compute pass issues as-is.
pub fn workgroup_count(n: u32) -> u32 {
    n.div_ceil(WORKGROUP_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn frame_params_is_16_bytes() {
        assert_eq!(std::mem::size_of::<FrameParams>(), 16);
    }

    #[test]
    fn field_offsets_match_shader_contract() {
        assert_eq!(std::mem::offset_of!(FrameParams, site_count), 0);
        assert_eq!(std::mem::offset_of!(FrameParams, time_seed), 4);
        assert_eq!(
            std::mem::offset_of!(FrameParams, canvas_width) as u64,
            FrameParams::CANVAS_FIELDS_OFFSET
        );
        assert_eq!(std::mem::offset_of!(FrameParams, canvas_height), 12);
    }

    #[test]
    fn site_buffer_allocation_is_fixed() {
        assert_eq!(MAX_SITE_NUM as u64 * SITE_SLOT_BYTES, 131072);
    }

    // ── dispatch sizing ───────────────────────────────────────────────────

    #[test]
    fn workgroup_count_covers_site_counts() {
        assert_eq!(workgroup_count(0), 0);
        assert_eq!(workgroup_count(1), 1);
        assert_eq!(workgroup_count(63), 1);
        assert_eq!(workgroup_count(64), 1);
        assert_eq!(workgroup_count(65), 2);
        assert_eq!(workgroup_count(1024), 16);
        assert_eq!(workgroup_count(4096), 64);
    }

    #[test]
    fn full_capacity_needs_exactly_64_workgroups() {
        assert_eq!(workgroup_count(MAX_SITE_NUM), MAX_SITE_NUM / WORKGROUP_SIZE);
    }

    // ── clamping ──────────────────────────────────────────────────────────

    #[test]
    fn clamp_passes_in_range_counts_through() {
        assert_eq!(clamp_site_count(0), 0);
        assert_eq!(clamp_site_count(1024), 1024);
        assert_eq!(clamp_site_count(MAX_SITE_NUM), MAX_SITE_NUM);
    }

    #[test]
    fn clamp_caps_out_of_range_counts() {
        assert_eq!(clamp_site_count(MAX_SITE_NUM + 1), MAX_SITE_NUM);
        assert_eq!(clamp_site_count(u32::MAX), MAX_SITE_NUM);
    }
}
