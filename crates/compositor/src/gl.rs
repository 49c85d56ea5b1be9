//! OpenGL renderer (glow backend).
//!
//! Owns the compiled program, the five textures (frame + four masks), and
//! the fullscreen-quad vertex state. Textures are allocated once and
//! re-uploaded per frame; nothing is recreated on the hot path.
//!
//! # Safety
//!
//! All methods issue raw GL calls and require the context that was passed to
//! [`GlRenderer::new`] to be current on the calling thread. The pipeline
//! establishes this contract at construction and never migrates threads.

use glow::HasContext;
use tracing::debug;
use velvet_common::{FilterSettings, Frame, Resolution};
use velvet_masks::MaskSet;

use crate::error::RenderError;
use crate::shaders::{FRAGMENT_SHADER, VERTEX_SHADER};
use crate::uniforms::{UniformSet, UniformValue};

/// Fullscreen quad as two triangles.
const QUAD_POSITIONS: [f32; 12] = [
    -1.0, -1.0, 1.0, -1.0, 1.0, 1.0, // lower-right triangle
    -1.0, -1.0, 1.0, 1.0, -1.0, 1.0, // upper-left triangle
];
const QUAD_UVS: [f32; 12] = [
    0.0, 0.0, 1.0, 0.0, 1.0, 1.0, //
    0.0, 0.0, 1.0, 1.0, 0.0, 1.0, //
];

/// GPU resources for the single-pass compositing draw.
pub struct GlRenderer {
    gl: glow::Context,
    program: glow::NativeProgram,
    vao: glow::NativeVertexArray,
    position_buffer: glow::NativeBuffer,
    uv_buffer: glow::NativeBuffer,
    frame_tex: glow::NativeTexture,
    mask_textures: [glow::NativeTexture; 4],
    resolution: Resolution,
}

impl GlRenderer {
    /// Compile the program and allocate all GPU resources.
    ///
    /// # Safety
    ///
    /// `gl` must be a valid context, current on this thread, and must remain
    /// current whenever [`render`], [`resize`], or [`destroy`] is called.
    ///
    /// [`render`]: GlRenderer::render
    /// [`resize`]: GlRenderer::resize
    /// [`destroy`]: GlRenderer::destroy
    pub unsafe fn new(gl: glow::Context, resolution: Resolution) -> Result<Self, RenderError> {
        let program = compile_program(&gl, VERTEX_SHADER, FRAGMENT_SHADER)?;

        let vao = gl
            .create_vertex_array()
            .map_err(|e| RenderError::ResourceCreate(format!("create_vertex_array: {e}")))?;
        let position_buffer = gl
            .create_buffer()
            .map_err(|e| RenderError::ResourceCreate(format!("create_buffer(pos): {e}")))?;
        let uv_buffer = gl
            .create_buffer()
            .map_err(|e| RenderError::ResourceCreate(format!("create_buffer(uv): {e}")))?;

        gl.bind_vertex_array(Some(vao));

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(position_buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            as_bytes(&QUAD_POSITIONS),
            glow::STATIC_DRAW,
        );
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, 2 * 4, 0);

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(uv_buffer));
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, as_bytes(&QUAD_UVS), glow::STATIC_DRAW);
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, 2 * 4, 0);

        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        gl.bind_vertex_array(None);

        let frame_tex = create_texture(&gl, resolution, glow::RGBA8 as i32, glow::RGBA)?;
        let mask_textures = [
            create_texture(&gl, resolution, glow::R8 as i32, glow::RED)?,
            create_texture(&gl, resolution, glow::R8 as i32, glow::RED)?,
            create_texture(&gl, resolution, glow::R8 as i32, glow::RED)?,
            create_texture(&gl, resolution, glow::R8 as i32, glow::RED)?,
        ];

        debug!(%resolution, "GL renderer initialized");

        Ok(Self {
            gl,
            program,
            vao,
            position_buffer,
            uv_buffer,
            frame_tex,
            mask_textures,
            resolution,
        })
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Upload the frame and masks, set every uniform, and draw the quad into
    /// the currently bound framebuffer.
    ///
    /// # Safety
    ///
    /// The context passed to [`GlRenderer::new`] must be current.
    pub unsafe fn render(
        &mut self,
        frame: &Frame<'_>,
        masks: &MaskSet,
        settings: &FilterSettings,
    ) -> Result<(), RenderError> {
        if frame.resolution() != self.resolution {
            return Err(RenderError::ResolutionMismatch {
                expected: self.resolution.to_string(),
                got: frame.resolution().to_string(),
            });
        }

        let gl = &self.gl;
        let width = self.resolution.width as i32;
        let height = self.resolution.height as i32;

        // Single-channel mask rows are not 4-byte aligned in general.
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);

        gl.active_texture(glow::TEXTURE0);
        gl.bind_texture(glow::TEXTURE_2D, Some(self.frame_tex));
        gl.tex_sub_image_2d(
            glow::TEXTURE_2D,
            0,
            0,
            0,
            width,
            height,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(frame.data()),
        );

        let mask_planes = [masks.face(), masks.lip(), masks.blush(), masks.eye()];
        for (i, plane) in mask_planes.iter().enumerate() {
            gl.active_texture(glow::TEXTURE1 + i as u32);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.mask_textures[i]));
            gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                width,
                height,
                glow::RED,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(plane.as_bytes()),
            );
        }

        gl.use_program(Some(self.program));
        let uniforms = UniformSet::for_frame(settings, self.resolution);
        for (name, value) in uniforms.iter() {
            let Some(loc) = gl.get_uniform_location(self.program, name) else {
                continue;
            };
            match value {
                UniformValue::F32(v) => gl.uniform_1_f32(Some(&loc), *v),
                UniformValue::Vec2(v) => gl.uniform_2_f32(Some(&loc), v[0], v[1]),
                UniformValue::Vec3(v) => gl.uniform_3_f32(Some(&loc), v[0], v[1], v[2]),
                UniformValue::Sampler(unit) => gl.uniform_1_i32(Some(&loc), *unit),
            }
        }

        gl.viewport(0, 0, width, height);
        gl.bind_vertex_array(Some(self.vao));
        gl.draw_arrays(glow::TRIANGLES, 0, 6);
        gl.bind_vertex_array(None);
        gl.use_program(None);

        Ok(())
    }

    /// Reallocate the five textures for a new output resolution.
    ///
    /// # Safety
    ///
    /// The context passed to [`GlRenderer::new`] must be current.
    pub unsafe fn resize(&mut self, resolution: Resolution) -> Result<(), RenderError> {
        let gl = &self.gl;
        gl.delete_texture(self.frame_tex);
        for tex in self.mask_textures {
            gl.delete_texture(tex);
        }
        self.frame_tex = create_texture(gl, resolution, glow::RGBA8 as i32, glow::RGBA)?;
        self.mask_textures = [
            create_texture(gl, resolution, glow::R8 as i32, glow::RED)?,
            create_texture(gl, resolution, glow::R8 as i32, glow::RED)?,
            create_texture(gl, resolution, glow::R8 as i32, glow::RED)?,
            create_texture(gl, resolution, glow::R8 as i32, glow::RED)?,
        ];
        self.resolution = resolution;
        Ok(())
    }

    /// Release the program, textures, and vertex state.
    ///
    /// # Safety
    ///
    /// The context passed to [`GlRenderer::new`] must be current.
    pub unsafe fn destroy(&mut self) {
        let gl = &self.gl;
        gl.delete_program(self.program);
        gl.delete_texture(self.frame_tex);
        for tex in self.mask_textures {
            gl.delete_texture(tex);
        }
        gl.delete_buffer(self.position_buffer);
        gl.delete_buffer(self.uv_buffer);
        gl.delete_vertex_array(self.vao);
        debug!("GL renderer destroyed");
    }
}

fn as_bytes(floats: &[f32]) -> &[u8] {
    // f32 slices reinterpret safely as bytes for buffer upload
    unsafe { core::slice::from_raw_parts(floats.as_ptr() as *const u8, floats.len() * 4) }
}

unsafe fn create_texture(
    gl: &glow::Context,
    resolution: Resolution,
    internal_format: i32,
    format: u32,
) -> Result<glow::NativeTexture, RenderError> {
    let tex = gl
        .create_texture()
        .map_err(|e| RenderError::ResourceCreate(format!("create_texture: {e}")))?;
    gl.bind_texture(glow::TEXTURE_2D, Some(tex));
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_MIN_FILTER,
        glow::LINEAR as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_MAG_FILTER,
        glow::LINEAR as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_WRAP_S,
        glow::CLAMP_TO_EDGE as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_WRAP_T,
        glow::CLAMP_TO_EDGE as i32,
    );
    gl.tex_image_2d(
        glow::TEXTURE_2D,
        0,
        internal_format,
        resolution.width as i32,
        resolution.height as i32,
        0,
        format,
        glow::UNSIGNED_BYTE,
        None,
    );
    gl.bind_texture(glow::TEXTURE_2D, None);
    Ok(tex)
}

unsafe fn compile_program(
    gl: &glow::Context,
    vert_src: &str,
    frag_src: &str,
) -> Result<glow::NativeProgram, RenderError> {
    let vs = gl
        .create_shader(glow::VERTEX_SHADER)
        .map_err(|e| RenderError::ResourceCreate(format!("create_shader(VS): {e}")))?;
    gl.shader_source(vs, vert_src);
    gl.compile_shader(vs);
    if !gl.get_shader_compile_status(vs) {
        let log = gl.get_shader_info_log(vs);
        gl.delete_shader(vs);
        return Err(RenderError::ShaderCompile {
            stage: "vertex",
            log,
        });
    }

    let fs = gl
        .create_shader(glow::FRAGMENT_SHADER)
        .map_err(|e| RenderError::ResourceCreate(format!("create_shader(FS): {e}")))?;
    gl.shader_source(fs, frag_src);
    gl.compile_shader(fs);
    if !gl.get_shader_compile_status(fs) {
        let log = gl.get_shader_info_log(fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
        return Err(RenderError::ShaderCompile {
            stage: "fragment",
            log,
        });
    }

    let program = gl
        .create_program()
        .map_err(|e| RenderError::ResourceCreate(format!("create_program: {e}")))?;
    gl.attach_shader(program, vs);
    gl.attach_shader(program, fs);
    gl.link_program(program);

    gl.detach_shader(program, vs);
    gl.detach_shader(program, fs);
    gl.delete_shader(vs);
    gl.delete_shader(fs);

    if !gl.get_program_link_status(program) {
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        return Err(RenderError::ProgramLink { log });
    }

    Ok(program)
}
