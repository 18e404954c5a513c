use bytemuck::{Pod, Zeroable};

use crate::context::GpuContext;
use crate::texture::Texture;

/// Number of segments used to tessellate circles and rings.
const CIRCLE_SEGMENTS: u32 = 48;

/// Vertex for solid-color shapes (no texture).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ShapeVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl ShapeVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// A batch of solid-color geometry built in screen coordinates.
///
/// Positions are converted to NDC as they are pushed, so the mesh can be
/// uploaded as-is. Indices are u16; a single frame of widget chrome stays
/// far below that limit.
pub struct ShapeMesh {
    vertices: Vec<ShapeVertex>,
    indices: Vec<u16>,
    screen_width: f32,
    screen_height: f32,
}

impl ShapeMesh {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            screen_width,
            screen_height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Convert from screen coordinates to NDC (-1 to 1, y flipped).
    fn ndc(&self, x: f32, y: f32) -> [f32; 2] {
        [
            (x / self.screen_width) * 2.0 - 1.0,
            1.0 - (y / self.screen_height) * 2.0,
        ]
    }

    fn push_quad(&mut self, corners: [[f32; 2]; 4], color: [f32; 4]) {
        let base = self.vertices.len() as u16;
        for position in corners {
            self.vertices.push(ShapeVertex { position, color });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Push a filled axis-aligned rectangle.
    pub fn push_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) {
        let tl = self.ndc(x, y);
        let tr = self.ndc(x + width, y);
        let br = self.ndc(x + width, y + height);
        let bl = self.ndc(x, y + height);
        self.push_quad([tl, tr, br, bl], color);
    }

    /// Push a rectangle outline as four edge quads.
    pub fn push_stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        thickness: f32,
        color: [f32; 4],
    ) {
        let t = thickness;
        // Top, bottom, then the left/right edges between them.
        self.push_rect(x, y, width, t, color);
        self.push_rect(x, y + height - t, width, t, color);
        self.push_rect(x, y + t, t, height - 2.0 * t, color);
        self.push_rect(x + width - t, y + t, t, height - 2.0 * t, color);
    }

    /// Push a filled circle as a triangle fan.
    pub fn push_circle(&mut self, cx: f32, cy: f32, radius: f32, color: [f32; 4]) {
        let center_index = self.vertices.len() as u16;
        let position = self.ndc(cx, cy);
        self.vertices.push(ShapeVertex { position, color });

        for i in 0..=CIRCLE_SEGMENTS {
            let angle = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            let position = self.ndc(cx + radius * angle.cos(), cy + radius * angle.sin());
            self.vertices.push(ShapeVertex { position, color });
        }
        for i in 0..CIRCLE_SEGMENTS as u16 {
            self.indices
                .extend_from_slice(&[center_index, center_index + 1 + i, center_index + 2 + i]);
        }
    }

    /// Push a circle outline as an annulus of quads.
    pub fn push_ring(&mut self, cx: f32, cy: f32, radius: f32, thickness: f32, color: [f32; 4]) {
        let inner = (radius - thickness).max(0.0);
        let base = self.vertices.len() as u16;

        for i in 0..=CIRCLE_SEGMENTS {
            let angle = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            let (sin, cos) = angle.sin_cos();
            let outer_pos = self.ndc(cx + radius * cos, cy + radius * sin);
            let inner_pos = self.ndc(cx + inner * cos, cy + inner * sin);
            self.vertices.push(ShapeVertex {
                position: outer_pos,
                color,
            });
            self.vertices.push(ShapeVertex {
                position: inner_pos,
                color,
            });
        }
        for i in 0..CIRCLE_SEGMENTS as u16 {
            let o0 = base + i * 2;
            let i0 = o0 + 1;
            let o1 = o0 + 2;
            let i1 = o0 + 3;
            self.indices.extend_from_slice(&[o0, i0, i1, o0, i1, o1]);
        }
    }
}

/// Pipeline for rendering solid-color 2D shapes.
pub struct ShapePipeline {
    pub render_pipeline: wgpu::RenderPipeline,
}

impl ShapePipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader_source = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.position = vec4<f32>(input.position, 0.0, 1.0);
    output.color = input.color;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return input.color;
}
"#;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shape Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[ShapeVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // No culling for 2D
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self { render_pipeline }
    }

    /// Upload a mesh into a vertex/index buffer pair.
    pub fn create_buffers(
        device: &wgpu::Device,
        mesh: &ShapeMesh,
    ) -> (wgpu::Buffer, wgpu::Buffer, u32) {
        use wgpu::util::DeviceExt;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Vertex Buffer"),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Index Buffer"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        (vertex_buffer, index_buffer, mesh.indices().len() as u32)
    }

    /// Draw an uploaded mesh within an existing render pass.
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        vertex_buffer: &wgpu::Buffer,
        index_buffer: &wgpu::Buffer,
        num_indices: u32,
    ) {
        pass.set_pipeline(&self.render_pipeline);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..num_indices, 0, 0..1);
    }
}

/// Vertex for textured quads.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Pipeline for rendering a texture into a screen-space rectangle.
///
/// Unlike a full image viewer there is no pan/zoom transform; the quad's
/// vertices already carry their final NDC positions.
pub struct QuadPipeline {
    pub render_pipeline: wgpu::RenderPipeline,
    pub texture_bind_group_layout: wgpu::BindGroupLayout,
}

impl QuadPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Quad Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("quad.wgsl").into()),
        });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Quad Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quad Pipeline Layout"),
            bind_group_layouts: &[&texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[QuadVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self {
            render_pipeline,
            texture_bind_group_layout,
        }
    }

    /// Create the bind group for a texture.
    pub fn create_texture_bind_group(
        &self,
        ctx: &GpuContext,
        texture: &Texture,
    ) -> wgpu::BindGroup {
        ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Quad Texture Bind Group"),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }

    /// Build the vertex/index buffers for a quad at a screen-space rectangle.
    pub fn create_quad_buffers(
        device: &wgpu::Device,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> (wgpu::Buffer, wgpu::Buffer, u32) {
        let x1 = (x / screen_width) * 2.0 - 1.0;
        let y1 = 1.0 - (y / screen_height) * 2.0;
        let x2 = ((x + width) / screen_width) * 2.0 - 1.0;
        let y2 = 1.0 - ((y + height) / screen_height) * 2.0;

        let vertices = [
            QuadVertex {
                position: [x1, y1],
                tex_coords: [0.0, 0.0],
            }, // Top-left
            QuadVertex {
                position: [x2, y1],
                tex_coords: [1.0, 0.0],
            }, // Top-right
            QuadVertex {
                position: [x2, y2],
                tex_coords: [1.0, 1.0],
            }, // Bottom-right
            QuadVertex {
                position: [x1, y2],
                tex_coords: [0.0, 1.0],
            }, // Bottom-left
        ];

        let indices: [u16; 6] = [0, 1, 2, 0, 2, 3];

        use wgpu::util::DeviceExt;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        (vertex_buffer, index_buffer, indices.len() as u32)
    }

    /// Draw a textured quad within an existing render pass.
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        texture_bind_group: &wgpu::BindGroup,
        vertex_buffer: &wgpu::Buffer,
        index_buffer: &wgpu::Buffer,
        num_indices: u32,
    ) {
        pass.set_pipeline(&self.render_pipeline);
        pass.set_bind_group(0, texture_bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..num_indices, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_mesh_has_two_triangles() {
        let mut mesh = ShapeMesh::new(100.0, 100.0);
        mesh.push_rect(10.0, 10.0, 20.0, 20.0, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.indices().len(), 6);
    }

    #[test]
    fn rect_corners_map_to_ndc() {
        let mut mesh = ShapeMesh::new(200.0, 100.0);
        mesh.push_rect(0.0, 0.0, 200.0, 100.0, [0.0; 4]);
        // Full-screen rect spans the entire NDC square, y flipped.
        assert_eq!(mesh.vertices()[0].position, [-1.0, 1.0]);
        assert_eq!(mesh.vertices()[2].position, [1.0, -1.0]);
    }

    #[test]
    fn stroke_rect_is_four_quads() {
        let mut mesh = ShapeMesh::new(100.0, 100.0);
        mesh.push_stroke_rect(10.0, 10.0, 50.0, 50.0, 1.0, [0.0; 4]);
        assert_eq!(mesh.vertices().len(), 16);
        assert_eq!(mesh.indices().len(), 24);
    }

    #[test]
    fn circle_fan_is_closed() {
        let mut mesh = ShapeMesh::new(100.0, 100.0);
        mesh.push_circle(50.0, 50.0, 10.0, [0.0; 4]);
        // Center + rim (first rim vertex repeated to close the fan).
        assert_eq!(mesh.vertices().len(), 2 + CIRCLE_SEGMENTS as usize);
        assert_eq!(mesh.indices().len(), CIRCLE_SEGMENTS as usize * 3);
    }
}
