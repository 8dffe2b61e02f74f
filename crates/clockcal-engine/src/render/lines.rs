use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{Camera, Scene};

use super::common::{PipelineDesc, create_pipeline, ensure_vertex_capacity, uniform_layout_entry};

/// Point lights beyond this count are ignored by the line shader.
pub const MAX_POINT_LIGHTS: usize = 4;

/// Renderer for the scene's line geometry.
///
/// Lines carry no normals, so lighting is ambient plus a distance falloff from
/// each point light, evaluated per vertex.
#[derive(Default)]
pub struct LineRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    globals_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,

    // reused every frame
    vertices: Vec<LineVertex>,
    warned_light_overflow: bool,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws every line segment in `scene` as seen from `camera`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &Scene,
        camera: &Camera,
    ) {
        self.vertices.clear();
        for seg in scene.line_segments() {
            let color = seg.color.to_array();
            self.vertices.push(LineVertex { position: seg.a.to_array(), color });
            self.vertices.push(LineVertex { position: seg.b.to_array(), color });
        }
        if self.vertices.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        let globals = self.build_globals(scene, camera);

        ensure_vertex_capacity::<LineVertex>(
            ctx.device,
            "clockcal line vbo",
            &mut self.vbo,
            &mut self.vbo_capacity,
            self.vertices.len(),
        );

        let (Some(pipeline), Some(bind_group), Some(ubo), Some(vbo)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.globals_ubo.as_ref(),
            self.vbo.as_ref(),
        ) else {
            return;
        };

        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&globals));
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.vertices));

        let mut rpass = target.overlay_pass("clockcal line pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..self.vertices.len() as u32, 0..1);
    }

    fn build_globals(&mut self, scene: &Scene, camera: &Camera) -> LineGlobals {
        let ambient = scene.ambient();
        let mut globals = LineGlobals {
            view_proj: camera.view_projection().to_cols_array(),
            ambient: [ambient.r, ambient.g, ambient.b, 1.0],
            lights: [GpuPointLight::zeroed(); MAX_POINT_LIGHTS],
            light_count: [0; 4],
        };

        let mut count = 0usize;
        for light in scene.point_lights() {
            if count == MAX_POINT_LIGHTS {
                if !self.warned_light_overflow {
                    log::warn!("LineRenderer: only {MAX_POINT_LIGHTS} point lights are supported");
                    self.warned_light_overflow = true;
                }
                break;
            }
            let p = light.position;
            let c = light.color.scaled(light.intensity);
            globals.lights[count] = GpuPointLight {
                position: [p.x, p.y, p.z, 1.0],
                color: [c.r, c.g, c.b, 1.0],
            };
            count += 1;
        }
        globals.light_count[0] = count as u32;
        globals
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("clockcal line bgl"),
            entries: &[uniform_layout_entry::<LineGlobals>(wgpu::ShaderStages::VERTEX)],
        });

        let pipeline = create_pipeline(
            ctx.device,
            ctx.surface_format,
            PipelineDesc {
                label: "clockcal line pipeline",
                wgsl: include_str!("shaders/lines.wgsl"),
                bind_group_layout: &bgl,
                buffers: &[LineVertex::layout()],
                topology: wgpu::PrimitiveTopology::LineList,
            },
        );

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("clockcal line globals ubo"),
            size: std::mem::size_of::<LineGlobals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("clockcal line bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.globals_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineVertex {
    position: [f32; 3],
    color: [f32; 4],
}

impl LineVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GpuPointLight {
    position: [f32; 4],
    /// rgb already scaled by intensity
    color: [f32; 4],
}

/// Uniform block (224 bytes), mirrors `Globals` in lines.wgsl.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineGlobals {
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
    lights: [GpuPointLight; MAX_POINT_LIGHTS],
    /// x = number of active lights
    light_count: [u32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec3;
    use crate::paint::Color;
    use crate::scene::{AmbientLight, PointLight};

    #[test]
    fn uniform_block_matches_shader_layout() {
        assert_eq!(std::mem::size_of::<LineGlobals>(), 224);
        assert_eq!(std::mem::size_of::<LineVertex>(), 28);
    }

    #[test]
    fn globals_carry_scene_lights() {
        let mut scene = Scene::new();
        scene.add(AmbientLight::new(Color::WHITE, 0.8));
        scene.add(PointLight::new(Color::WHITE, 5.0, Vec3::new(1.0, 0.0, 2.0)));

        let mut renderer = LineRenderer::new();
        let g = renderer.build_globals(&scene, &Camera::new(1.0));

        assert_eq!(g.light_count[0], 1);
        assert_eq!(g.lights[0].position, [1.0, 0.0, 2.0, 1.0]);
        assert_eq!(g.lights[0].color, [5.0, 5.0, 5.0, 1.0]);
        assert!((g.ambient[0] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn extra_point_lights_are_dropped() {
        let mut scene = Scene::new();
        for i in 0..6 {
            scene.add(PointLight::new(Color::WHITE, 1.0, Vec3::new(i as f32, 0.0, 0.0)));
        }
        let mut renderer = LineRenderer::new();
        let g = renderer.build_globals(&scene, &Camera::new(1.0));
        assert_eq!(g.light_count[0] as usize, MAX_POINT_LIGHTS);
        assert!(renderer.warned_light_overflow);
    }
}
