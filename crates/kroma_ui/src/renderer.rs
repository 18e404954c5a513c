//! The renderer abstracts GPU rendering details away from widgets.
//!
//! Widgets record high-level draw commands during their `draw` pass; the
//! renderer executes the recorded list against the `kroma_gpu` pipelines at
//! the end of the frame.

use std::sync::Arc;
use winit::window::Window;

use kroma_gpu::{GpuContext, QuadPipeline, ShapeMesh, ShapePipeline, Texture};
use wgpu_text::glyph_brush::ab_glyph::FontArc;
use wgpu_text::glyph_brush::{Section, Text as GlyphText};
use wgpu_text::{BrushBuilder, TextBrush};

use crate::color::Rgb;
use crate::error::Error;
use crate::gradient;
use crate::layout::{Bounds, Point, Size};
use crate::Element;

/// Pixel resolution of the generated saturation/value plane texture.
const PLANE_TEXTURE_SIZE: (u32, u32) = (256, 192);
/// Pixel width of the generated hue spectrum texture (one sample per degree).
const SPECTRUM_TEXTURE_WIDTH: u32 = 361;

/// System font fallback chain for the text brush.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/Carlito-Regular.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// An RGBA color with f32 components in 0.0..=1.0, used for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::rgb(
            rgb.r as f32 / 255.0,
            rgb.g as f32 / 255.0,
            rgb.b as f32 / 255.0,
        )
    }
}

/// A gradient fill synthesized into a cached texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gradient {
    /// Saturation/value plane for a fixed hue (whole degrees).
    SaturationValue { hue_degrees: u16 },
    /// Full-saturation hue sweep, 0 to 360 left to right.
    HueSpectrum,
}

/// A draw command recorded by a widget.
#[derive(Debug, Clone)]
enum DrawCommand {
    FillRect {
        rect: Bounds,
        color: Color,
    },
    StrokeRect {
        rect: Bounds,
        color: Color,
        width: f32,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        color: Color,
        width: f32,
    },
    Gradient {
        rect: Bounds,
        gradient: Gradient,
    },
    Text {
        content: String,
        position: Point,
        size: f32,
        color: Color,
    },
}

/// A draw prepared for the render pass (buffers already uploaded).
enum Prepared {
    Shapes {
        vertex_buffer: wgpu::Buffer,
        index_buffer: wgpu::Buffer,
        num_indices: u32,
    },
    Quad {
        gradient: Gradient,
        vertex_buffer: wgpu::Buffer,
        index_buffer: wgpu::Buffer,
        num_indices: u32,
    },
}

pub struct Renderer {
    gpu_ctx: GpuContext,
    shape_pipeline: ShapePipeline,
    quad_pipeline: QuadPipeline,
    text_brush: TextBrush<FontArc>,
    width: u32,
    height: u32,
    draw_commands: Vec<DrawCommand>,
    /// Cached plane texture, keyed by its hue; a hue drag replaces it in
    /// place instead of accumulating one texture per degree.
    plane_cache: Option<(u16, Texture, wgpu::BindGroup)>,
    /// The spectrum never changes; generated once on first use.
    spectrum_cache: Option<(Texture, wgpu::BindGroup)>,
}

impl Renderer {
    /// Create a new renderer for the given window.
    pub async fn new(window: Arc<Window>) -> Result<Self, Error> {
        let gpu_ctx = GpuContext::new(window).await?;

        let format = gpu_ctx.surface_config.format;
        let shape_pipeline = ShapePipeline::new(&gpu_ctx.device, format);
        let quad_pipeline = QuadPipeline::new(&gpu_ctx.device, format);

        let width = gpu_ctx.width();
        let height = gpu_ctx.height();

        let font = load_system_font()?;
        let text_brush =
            BrushBuilder::using_font(font).build(&gpu_ctx.device, width, height, format);

        Ok(Self {
            gpu_ctx,
            shape_pipeline,
            quad_pipeline,
            text_brush,
            width,
            height,
            draw_commands: Vec::new(),
            plane_cache: None,
            spectrum_cache: None,
        })
    }

    /// Resize the renderer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.gpu_ctx.resize(width, height);
        self.text_brush
            .resize_view(width as f32, height as f32, &self.gpu_ctx.queue);
    }

    /// Get the current surface size.
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    // -------------------------------------------------------------------
    // Widget-facing recording API
    // -------------------------------------------------------------------

    /// Fill a rectangle with a solid color.
    pub fn fill_rect(&mut self, rect: Bounds, color: Color) {
        self.draw_commands.push(DrawCommand::FillRect { rect, color });
    }

    /// Stroke a rectangle outline.
    pub fn stroke_rect(&mut self, rect: Bounds, color: Color, width: f32) {
        self.draw_commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    /// Fill a circle.
    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.draw_commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    /// Stroke a circle outline.
    pub fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32) {
        self.draw_commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    /// Fill a rectangle with a synthesized gradient.
    pub fn gradient(&mut self, rect: Bounds, gradient: Gradient) {
        self.draw_commands
            .push(DrawCommand::Gradient { rect, gradient });
    }

    /// Draw text with its top-left corner at `position`.
    pub fn text(&mut self, content: &str, position: Point, size: f32, color: Color) {
        self.draw_commands.push(DrawCommand::Text {
            content: content.to_string(),
            position,
            size,
            color,
        });
    }

    // -------------------------------------------------------------------
    // Frame execution
    // -------------------------------------------------------------------

    /// Render an element tree: layout, record draw commands, execute them.
    pub fn render<M>(&mut self, element: &mut Element<M>) {
        self.draw_commands.clear();

        let available = self.size();
        element.layout(available);
        let bounds = Bounds::new(0.0, 0.0, available.width, available.height);
        element.draw(self, bounds);

        self.flush();
    }

    /// Execute the recorded command list against the surface.
    fn flush(&mut self) {
        let commands = std::mem::take(&mut self.draw_commands);

        // Make sure every referenced gradient has a cached texture before
        // the pass starts borrowing the caches.
        for command in &commands {
            if let DrawCommand::Gradient { gradient, .. } = command {
                self.ensure_gradient_texture(*gradient);
            }
        }

        let frame = match self.gpu_ctx.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(e) => {
                log::error!("Failed to get frame: {:?}", e);
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Queue text sections; the brush draws them on top at the end of
        // the pass.
        let text_sections: Vec<Section<'_>> = commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text {
                    content,
                    position,
                    size,
                    color,
                } => Some(
                    Section::default()
                        .add_text(
                            GlyphText::new(content)
                                .with_scale(*size)
                                .with_color(color.to_array()),
                        )
                        .with_screen_position((position.x, position.y)),
                ),
                _ => None,
            })
            .collect();

        if !text_sections.is_empty() {
            let refs: Vec<&Section<'_>> = text_sections.iter().collect();
            if let Err(e) = self
                .text_brush
                .queue(&self.gpu_ctx.device, &self.gpu_ctx.queue, refs)
            {
                log::error!("Failed to queue text: {:?}", e);
            }
        }

        // Upload geometry: consecutive shape commands batch into one mesh,
        // gradients break the batch so draw order is preserved.
        let screen = (self.width as f32, self.height as f32);
        let device = &self.gpu_ctx.device;
        let mut prepared: Vec<Prepared> = Vec::new();
        let mut mesh = ShapeMesh::new(screen.0, screen.1);

        let flush_mesh = |mesh: &mut ShapeMesh, prepared: &mut Vec<Prepared>| {
            if !mesh.is_empty() {
                let (vertex_buffer, index_buffer, num_indices) =
                    ShapePipeline::create_buffers(device, mesh);
                prepared.push(Prepared::Shapes {
                    vertex_buffer,
                    index_buffer,
                    num_indices,
                });
                *mesh = ShapeMesh::new(screen.0, screen.1);
            }
        };

        for command in &commands {
            match command {
                DrawCommand::FillRect { rect, color } => {
                    mesh.push_rect(rect.x, rect.y, rect.width, rect.height, color.to_array());
                }
                DrawCommand::StrokeRect { rect, color, width } => {
                    mesh.push_stroke_rect(
                        rect.x,
                        rect.y,
                        rect.width,
                        rect.height,
                        *width,
                        color.to_array(),
                    );
                }
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    mesh.push_circle(center.x, center.y, *radius, color.to_array());
                }
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    color,
                    width,
                } => {
                    mesh.push_ring(center.x, center.y, *radius, *width, color.to_array());
                }
                DrawCommand::Gradient { rect, gradient } => {
                    flush_mesh(&mut mesh, &mut prepared);
                    let (vertex_buffer, index_buffer, num_indices) =
                        QuadPipeline::create_quad_buffers(
                            device,
                            rect.x,
                            rect.y,
                            rect.width,
                            rect.height,
                            screen.0,
                            screen.1,
                        );
                    prepared.push(Prepared::Quad {
                        gradient: *gradient,
                        vertex_buffer,
                        index_buffer,
                        num_indices,
                    });
                }
                DrawCommand::Text { .. } => {}
            }
        }
        flush_mesh(&mut mesh, &mut prepared);

        let mut encoder = self
            .gpu_ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let background = crate::theme::current_theme().background;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: background.r as f64,
                            g: background.g as f64,
                            b: background.b as f64,
                            a: background.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for draw in &prepared {
                match draw {
                    Prepared::Shapes {
                        vertex_buffer,
                        index_buffer,
                        num_indices,
                    } => {
                        self.shape_pipeline
                            .draw(&mut pass, vertex_buffer, index_buffer, *num_indices);
                    }
                    Prepared::Quad {
                        gradient,
                        vertex_buffer,
                        index_buffer,
                        num_indices,
                    } => {
                        if let Some(bind_group) = self.gradient_bind_group(*gradient) {
                            self.quad_pipeline.draw(
                                &mut pass,
                                bind_group,
                                vertex_buffer,
                                index_buffer,
                                *num_indices,
                            );
                        }
                    }
                }
            }

            self.text_brush.draw(&mut pass);
        }

        self.gpu_ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }

    /// Generate and cache the texture backing a gradient, if missing.
    fn ensure_gradient_texture(&mut self, gradient: Gradient) {
        match gradient {
            Gradient::SaturationValue { hue_degrees } => {
                if matches!(self.plane_cache, Some((cached, _, _)) if cached == hue_degrees) {
                    return;
                }
                let (w, h) = PLANE_TEXTURE_SIZE;
                let pixels = gradient::saturation_plane(hue_degrees as f32, w, h);
                match Texture::from_rgba8(&self.gpu_ctx, &pixels, w, h) {
                    Ok(texture) => {
                        let bind_group = self
                            .quad_pipeline
                            .create_texture_bind_group(&self.gpu_ctx, &texture);
                        self.plane_cache = Some((hue_degrees, texture, bind_group));
                    }
                    Err(e) => log::error!("Failed to create plane texture: {}", e),
                }
            }
            Gradient::HueSpectrum => {
                if self.spectrum_cache.is_some() {
                    return;
                }
                let pixels = gradient::hue_spectrum(SPECTRUM_TEXTURE_WIDTH, 1);
                match Texture::from_rgba8(&self.gpu_ctx, &pixels, SPECTRUM_TEXTURE_WIDTH, 1) {
                    Ok(texture) => {
                        let bind_group = self
                            .quad_pipeline
                            .create_texture_bind_group(&self.gpu_ctx, &texture);
                        self.spectrum_cache = Some((texture, bind_group));
                    }
                    Err(e) => log::error!("Failed to create spectrum texture: {}", e),
                }
            }
        }
    }

    fn gradient_bind_group(&self, gradient: Gradient) -> Option<&wgpu::BindGroup> {
        match gradient {
            Gradient::SaturationValue { hue_degrees } => match &self.plane_cache {
                Some((cached, _, bind_group)) if *cached == hue_degrees => Some(bind_group),
                _ => None,
            },
            Gradient::HueSpectrum => self.spectrum_cache.as_ref().map(|(_, bg)| bg),
        }
    }
}

/// Load the first available system font for the text brush.
fn load_system_font() -> Result<FontArc, Error> {
    for path in FONT_PATHS {
        if let Ok(data) = std::fs::read(path) {
            return FontArc::try_from_vec(data)
                .map_err(|e| Error::Font(format!("Failed to parse font {}: {:?}", path, e)));
        }
    }
    Err(Error::Font(
        "No system fonts found. Please install DejaVu fonts.".to_string(),
    ))
}
