//! OpenGL dot renderer.
//!
//! Implements `DrawSurface` by collecting circles into an instance buffer and
//! drawing them all with one instanced call when the frame is finished.

use crate::constants::*;
use crate::surface::{DrawSurface, Rgba};
use glam::{Mat4, Vec2};
use glow::*;
use std::mem;
use std::sync::Arc;

const DOT_VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 aCorner;
layout (location = 1) in vec2 aCenter;
layout (location = 2) in float aRadius;
layout (location = 3) in vec4 aColor;

uniform mat4 uProjection;

out vec2 vLocal;
out vec4 vColor;
out float vRadius;

void main() {
    // Pad by one pixel so the antialiased edge is not clipped
    float padded = aRadius + 1.0;
    vec2 pos = aCenter + aCorner * padded;
    gl_Position = uProjection * vec4(pos, 0.0, 1.0);
    vLocal = aCorner * padded;
    vColor = aColor;
    vRadius = aRadius;
}
"#;

const DOT_FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
in vec2 vLocal;
in vec4 vColor;
in float vRadius;
out vec4 FragColor;

void main() {
    float dist = length(vLocal);
    float coverage = clamp(vRadius - dist + 0.5, 0.0, 1.0);
    if (coverage <= 0.0) {
        discard;
    }
    FragColor = vec4(vColor.rgb, vColor.a * coverage);
}
"#;

/// Center (2) + radius (1) + color (4)
const FLOATS_PER_INSTANCE: usize = 7;

pub struct Renderer {
    gl: Arc<glow::Context>,
    program: glow::Program,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    instance_vbo: glow::Buffer,
    projection_loc: glow::UniformLocation,
    instance_data: Vec<f32>,
    width: f32,
    height: f32,
}

impl Renderer {
    pub fn new(gl: Arc<glow::Context>) -> Result<Self, String> {
        unsafe {
            let program = compile_program(&gl, DOT_VERTEX_SHADER_SRC, DOT_FRAGMENT_SHADER_SRC)?;

            let projection_loc = gl
                .get_uniform_location(program, "uProjection")
                .ok_or("Failed to get projection uniform location")?;

            // Quad corners (-1,-1 to 1,1)
            let corners: [f32; 12] = [
                -1.0, -1.0, // bottom-left
                1.0, -1.0, // bottom-right
                1.0, 1.0, // top-right
                -1.0, -1.0, // bottom-left
                1.0, 1.0, // top-right
                -1.0, 1.0, // top-left
            ];

            let vao = gl
                .create_vertex_array()
                .map_err(|e| format!("Failed to create VAO: {}", e))?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&corners), STATIC_DRAW);

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);

            let instance_vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create instance VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(instance_vbo));

            let stride = (FLOATS_PER_INSTANCE * mem::size_of::<f32>()) as i32;

            // Center attribute (2 floats)
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, FLOAT, false, stride, 0);
            gl.vertex_attrib_divisor(1, 1);

            // Radius attribute (1 float)
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 1, FLOAT, false, stride, 8);
            gl.vertex_attrib_divisor(2, 1);

            // Color attribute (4 floats)
            gl.enable_vertex_attrib_array(3);
            gl.vertex_attrib_pointer_f32(3, 4, FLOAT, false, stride, 12);
            gl.vertex_attrib_divisor(3, 1);

            gl.bind_vertex_array(None);

            Ok(Self {
                gl,
                program,
                vao,
                vbo,
                instance_vbo,
                projection_loc,
                instance_data: Vec::with_capacity(PARTICLE_COUNT * FLOATS_PER_INSTANCE),
                width: 0.0,
                height: 0.0,
            })
        }
    }

    /// Pixel-space projection with the origin at the top-left corner
    fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh_gl(0.0, self.width, self.height, 0.0, -1.0, 1.0)
    }

    fn flush(&mut self) {
        puffin::profile_function!();

        if self.instance_data.is_empty() {
            return;
        }

        unsafe {
            self.gl.enable(BLEND);
            self.gl.blend_func(SRC_ALPHA, ONE_MINUS_SRC_ALPHA);

            self.gl.use_program(Some(self.program));
            self.gl.bind_vertex_array(Some(self.vao));

            self.gl.bind_buffer(ARRAY_BUFFER, Some(self.instance_vbo));
            self.gl.buffer_data_u8_slice(
                ARRAY_BUFFER,
                as_u8_slice(&self.instance_data),
                DYNAMIC_DRAW,
            );

            let projection = self.projection_matrix().to_cols_array();
            self.gl
                .uniform_matrix_4_f32_slice(Some(&self.projection_loc), false, &projection);

            let instance_count = self.instance_data.len() / FLOATS_PER_INSTANCE;
            self.gl.draw_arrays_instanced(TRIANGLES, 0, 6, instance_count as i32);

            self.gl.bind_vertex_array(None);
        }
    }
}

impl DrawSurface for Renderer {
    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.instance_data.clear();
        let [r, g, b, a] = BACKGROUND_COLOR;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(COLOR_BUFFER_BIT);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if self.instance_data.len() >= MAX_DOT_INSTANCES * FLOATS_PER_INSTANCE {
            return;
        }
        self.instance_data.extend_from_slice(&[
            center.x, center.y, radius, color.r, color.g, color.b, color.a,
        ]);
    }

    fn finish(&mut self) {
        self.flush();
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.instance_vbo);
        }
    }
}

unsafe fn compile_program(gl: &glow::Context, vertex_src: &str, fragment_src: &str) -> Result<glow::Program, String> {
    let vertex_shader = gl
        .create_shader(VERTEX_SHADER)
        .map_err(|e| format!("Failed to create vertex shader: {}", e))?;
    gl.shader_source(vertex_shader, vertex_src);
    gl.compile_shader(vertex_shader);
    if !gl.get_shader_compile_status(vertex_shader) {
        return Err(gl.get_shader_info_log(vertex_shader));
    }

    let fragment_shader = gl
        .create_shader(FRAGMENT_SHADER)
        .map_err(|e| format!("Failed to create fragment shader: {}", e))?;
    gl.shader_source(fragment_shader, fragment_src);
    gl.compile_shader(fragment_shader);
    if !gl.get_shader_compile_status(fragment_shader) {
        return Err(gl.get_shader_info_log(fragment_shader));
    }

    let program = gl
        .create_program()
        .map_err(|e| format!("Failed to create program: {}", e))?;
    gl.attach_shader(program, vertex_shader);
    gl.attach_shader(program, fragment_shader);
    gl.link_program(program);
    if !gl.get_program_link_status(program) {
        return Err(gl.get_program_info_log(program));
    }

    gl.delete_shader(vertex_shader);
    gl.delete_shader(fragment_shader);

    Ok(program)
}

fn as_u8_slice<T>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, mem::size_of_val(data)) }
}
