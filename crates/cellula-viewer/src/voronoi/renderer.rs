use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use cellula_engine::render::{RenderCtx, RenderTarget};

use super::params::{
    FrameParams, MAX_SITE_NUM, SITE_SLOT_BYTES, clamp_site_count, workgroup_count,
};
use super::vertex::{FULLSCREEN_QUAD, QuadVertex};

/// Background behind the quad. With the quad covering all of clip space it
/// only shows through if the strip is ever cut down, but the render pass
/// clears to it unconditionally.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.3,
    g: 0.3,
    b: 0.4,
    a: 1.0,
};

/// The complete GPU state for the Voronoi pipeline, built once at setup.
///
/// Construction follows the hard dependency chain: buffers → bind-group
/// layout → pipeline layout → shader module → pipelines → bind group. The
/// shader module is compiled exactly once and serves both pipelines; both
/// pipelines share the one pipeline layout, so the compute and fragment
/// stages agree on binding indices by construction. Invalid WGSL or an
/// out-of-memory allocation surfaces through wgpu's uncaptured-error
/// handler during this constructor, before any frame is drawn.
pub struct VoronoiRenderer {
    /// 4-vertex full-screen strip, uploaded once.
    vertex_buffer: wgpu::Buffer,

    /// 16-byte `FrameParams` uniform (binding 0). The canvas half is
    /// written here at setup; the frame half is rewritten by `draw`.
    params_buffer: wgpu::Buffer,

    /// Shared by both pipelines; never rebound after setup.
    bind_group: wgpu::BindGroup,

    compute_pipeline: wgpu::ComputePipeline,
    render_pipeline: wgpu::RenderPipeline,
}

impl VoronoiRenderer {
    pub fn new(ctx: &RenderCtx<'_>, canvas: PhysicalSize<u32>) -> Self {
        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("voronoi quad vbo"),
                contents: bytemuck::cast_slice(&FULLSCREEN_QUAD),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let params_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("voronoi params ubo"),
            size: std::mem::size_of::<FrameParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Canvas dimensions are fixed for the process lifetime; written once.
        let canvas_dims = [canvas.width as f32, canvas.height as f32];
        ctx.queue.write_buffer(
            &params_buffer,
            FrameParams::CANVAS_FIELDS_OFFSET,
            bytemuck::cast_slice(&canvas_dims),
        );

        // Fixed allocation; `site_count` only bounds how many slots are
        // meaningful in a given frame. GPU-only, never mapped or read back.
        let site_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("voronoi site buffer"),
            size: MAX_SITE_NUM as u64 * SITE_SLOT_BYTES,
            usage: wgpu::BufferUsages::STORAGE,
            mapped_at_creation: false,
        });

        // One layout for both stages. The storage entry is declared
        // read-write because the compute stage fills it; the fragment stage
        // only ever reads.
        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("voronoi bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT | wgpu::ShaderStages::COMPUTE,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: std::num::NonZeroU64::new(
                                    std::mem::size_of::<FrameParams>() as u64,
                                ),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT | wgpu::ShaderStages::COMPUTE,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Storage { read_only: false },
                                has_dynamic_offset: false,
                                min_binding_size: std::num::NonZeroU64::new(
                                    MAX_SITE_NUM as u64 * SITE_SLOT_BYTES,
                                ),
                            },
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("voronoi pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        // Compiled once; both pipelines are built from this module.
        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("voronoi shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/voronoi.wgsl").into()),
            });

        let compute_pipeline =
            ctx.device
                .create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                    label: Some("voronoi compute pipeline"),
                    layout: Some(&pipeline_layout),
                    module: &shader,
                    entry_point: Some("compute_main"),
                    compilation_options: Default::default(),
                    cache: None,
                });

        let render_pipeline =
            ctx.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some("voronoi render pipeline"),
                    layout: Some(&pipeline_layout),

                    vertex: wgpu::VertexState {
                        module: &shader,
                        entry_point: Some("vertex_main"),
                        compilation_options: Default::default(),
                        buffers: &[QuadVertex::layout()],
                    },

                    fragment: Some(wgpu::FragmentState {
                        module: &shader,
                        entry_point: Some("fragment_main"),
                        compilation_options: Default::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: ctx.surface_format,
                            blend: None,
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),

                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleStrip,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: None,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },

                    depth_stencil: None,
                    multisample: wgpu::MultisampleState::default(),

                    multiview_mask: None,
                    cache: None,
                });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("voronoi bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: site_buffer.as_entire_binding(),
                },
            ],
        });

        log::info!(
            "voronoi renderer ready: {} site slots, {}x{} canvas",
            MAX_SITE_NUM,
            canvas.width,
            canvas.height
        );

        Self {
            vertex_buffer,
            params_buffer,
            bind_group,
            compute_pipeline,
            render_pipeline,
        }
    }

    /// Records one complete frame: parameter update, compute dispatch over
    /// the active sites, then the full-screen render pass.
    ///
    /// Both passes land in the target's encoder, so once the caller submits
    /// it the queue executes them in order and the fragment stage sees the
    /// site buffer exactly as this frame's dispatch wrote it.
    pub fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        site_count: u32,
        time_seed: u32,
    ) {
        let site_count = clamp_site_count(site_count);

        // Step 1: per-frame uniform fields. The canvas half is untouched.
        ctx.queue.write_buffer(
            &self.params_buffer,
            FrameParams::FRAME_FIELDS_OFFSET,
            bytemuck::cast_slice(&[site_count, time_seed]),
        );

        // Step 2: scatter sites. A zero count dispatches zero workgroups.
        {
            let mut pass = target
                .encoder
                .begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: Some("voronoi compute pass"),
                    timestamp_writes: None,
                });

            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_pipeline(&self.compute_pipeline);
            pass.dispatch_workgroups(workgroup_count(site_count), 1, 1);
        }

        // Step 3: shade the quad from the just-written site buffer.
        {
            let mut pass = target
                .encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("voronoi render pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target.color_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });

            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_pipeline(&self.render_pipeline);
            pass.draw(0..FULLSCREEN_QUAD.len() as u32, 0..1);
        }

        log::debug!(
            "frame recorded: {site_count} sites, seed {time_seed}, {} workgroups",
            workgroup_count(site_count)
        );
    }
}
