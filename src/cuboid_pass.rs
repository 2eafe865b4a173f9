//! # Cuboid Pass
//!
//! Draws every cuboid of a [`FramePlan`] with one shared unit cube.
//!
//! The cube's vertex and index buffers are uploaded once at startup. Each frame,
//! [`CuboidPass::prepare`] writes the frame uniform and all object uniforms in two uploads,
//! and [`CuboidPass::render`] issues one `draw_indexed` per cuboid, selecting its object
//! uniform with a dynamic offset. Draw order is the plan's order.
//!
//! ## Bindings
//!
//! | Group | Binding | Contents | Offset |
//! |---|---|---|---|
//! | 0 | 0 | [`FrameUniform`]: view, projection, lights, shading flag | static |
//! | 1 | 0 | [`ObjectUniform`]: model, normal matrix, color | dynamic, one slot per draw |
//!
//! ## Module Contents
//!
//! - [`CuboidPass`]: shared cube buffers, both uniform bindings, and the render pipeline.

// The plan is the only input per frame; nothing here reads scene or camera state directly.
use crate::frame::FramePlan;
// The depth format is shared with the renderer's depth attachment.
use crate::renderer::Renderer;
use crate::uniform_binding::{ObjectBinding, UniformBinding};
use crate::uniform_buffer::{FrameUniform, ObjectUniform};
// One unit cube, centered on the origin, drawn once per cuboid.
use crate::vertex::{Vertex, CUBE_INDICES, CUBE_VERTICES};
use crate::SHADER_SOURCE;

/// Object slots allocated up front; the full classroom fits without regrowing.
const INITIAL_OBJECT_CAPACITY: usize = 512;

/// GPU resources for drawing cuboids.
///
/// # Fields
///
/// - `vertex_buffer`, `index_buffer`: the shared cube, uploaded once.
/// - `frame_uniform`: group 0, rewritten every frame.
/// - `object_uniforms`: group 1, one aligned slot per draw, grown on demand.
/// - `pipeline`: depth-tested, back-face-culled triangle list.
/// - `draw_count`: number of slots written by the last [`CuboidPass::prepare`].
pub struct CuboidPass {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub frame_uniform: UniformBinding,
    pub object_uniforms: ObjectBinding,
    pub pipeline: wgpu::RenderPipeline,
    draw_count: usize,
}

impl CuboidPass {
    /// Uploads the cube and creates the bindings and pipeline for `surface_format`.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertex Buffer"),
                contents: bytemuck::cast_slice(&CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Cube Index Buffer"),
                contents: bytemuck::cast_slice(&CUBE_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let frame_uniform = UniformBinding::new(device);
        let object_uniforms = ObjectBinding::new(device, INITIAL_OBJECT_CAPACITY);
        let pipeline =
            Self::create_pipeline(device, surface_format, &frame_uniform, &object_uniforms);

        Self {
            vertex_buffer,
            index_buffer,
            frame_uniform,
            object_uniforms,
            pipeline,
            draw_count: 0,
        }
    }

    /// Uploads the frame's uniforms. Must run before [`CuboidPass::render`].
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, plan: &FramePlan) {
        self.frame_uniform
            .update_buffer(queue, FrameUniform::new(plan));

        let objects = plan
            .draws
            .iter()
            .map(ObjectUniform::from)
            .collect::<Vec<_>>();
        self.object_uniforms.update_buffer(device, queue, &objects);
        self.draw_count = objects.len();
    }

    /// Records one indexed draw per prepared cuboid into `renderpass`.
    pub fn render<'rpass>(&'rpass self, renderpass: &mut wgpu::RenderPass<'rpass>) {
        renderpass.set_pipeline(&self.pipeline);
        renderpass.set_bind_group(0, &self.frame_uniform.bind_group, &[]);
        renderpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        renderpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        for index in 0..self.draw_count {
            renderpass.set_bind_group(
                1,
                &self.object_uniforms.bind_group,
                &[self.object_uniforms.offset(index)],
            );
            renderpass.draw_indexed(0..(CUBE_INDICES.len() as _), 0, 0..1);
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        frame_uniform: &UniformBinding,
        object_uniforms: &ObjectBinding,
    ) -> wgpu::RenderPipeline {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Cuboid Shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(SHADER_SOURCE)),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cuboid Pipeline Layout"),
            bind_group_layouts: &[
                &frame_uniform.bind_group_layout,
                &object_uniforms.bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cuboid Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: Some("vertex_main"),
                buffers: &[Vertex::description(&Vertex::vertex_attributes())],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Mirrored placements are not used, so every cuboid keeps its winding.
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Renderer::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: Some("fragment_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        })
    }
}
