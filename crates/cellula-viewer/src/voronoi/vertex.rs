use bytemuck::{Pod, Zeroable};

/// Full-screen quad vertex: clip-space position + corner tint.
///
/// Byte layout is a contract with the shader's vertex inputs: 20-byte
/// stride, float32x2 position at offset 0 (location 0), float32x3 color at
/// offset 8 (location 1).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// The four corners of the clip-space square, in triangle-strip order
/// (top-left, top-right, bottom-left, bottom-right), uploaded once and
/// never touched again.
pub const FULLSCREEN_QUAD: [QuadVertex; 4] = [
    // top left, orange
    QuadVertex {
        position: [-1.0, 1.0],
        color: [0.9, 0.7, 0.4],
    },
    // top right, purple
    QuadVertex {
        position: [1.0, 1.0],
        color: [0.8, 0.7, 1.0],
    },
    // bottom left, green
    QuadVertex {
        position: [-1.0, -1.0],
        color: [0.5, 1.0, 0.2],
    },
    // bottom right, orange
    QuadVertex {
        position: [1.0, -1.0],
        color: [0.9, 0.7, 0.4],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn stride_is_20_bytes() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 20);
        assert_eq!(QuadVertex::layout().array_stride, 20);
    }

    #[test]
    fn attributes_match_shader_contract() {
        let layout = QuadVertex::layout();
        assert_eq!(layout.attributes.len(), 2);

        let pos = layout.attributes[0];
        assert_eq!(pos.shader_location, 0);
        assert_eq!(pos.offset, 0);
        assert_eq!(pos.format, wgpu::VertexFormat::Float32x2);

        let color = layout.attributes[1];
        assert_eq!(color.shader_location, 1);
        assert_eq!(color.offset, 8);
        assert_eq!(color.format, wgpu::VertexFormat::Float32x3);
    }

    // ── coverage ──────────────────────────────────────────────────────────

    #[test]
    fn quad_covers_clip_space_square() {
        let xs: Vec<f32> = FULLSCREEN_QUAD.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = FULLSCREEN_QUAD.iter().map(|v| v.position[1]).collect();

        assert_eq!(xs.iter().cloned().fold(f32::INFINITY, f32::min), -1.0);
        assert_eq!(xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 1.0);
        assert_eq!(ys.iter().cloned().fold(f32::INFINITY, f32::min), -1.0);
        assert_eq!(ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 1.0);
    }

    #[test]
    fn strip_order_alternates_sides() {
        // TL, TR, BL, BR: triangles (0,1,2) and (1,2,3) tile the square
        // without a degenerate edge.
        assert_eq!(FULLSCREEN_QUAD[0].position, [-1.0, 1.0]);
        assert_eq!(FULLSCREEN_QUAD[1].position, [1.0, 1.0]);
        assert_eq!(FULLSCREEN_QUAD[2].position, [-1.0, -1.0]);
        assert_eq!(FULLSCREEN_QUAD[3].position, [1.0, -1.0]);
    }
}
