//! Textured-quad renderer for the frozen screenshot.
//!
//! One quad in screenshot pixel coordinates, one texture, one shader
//! program. The vertex shader applies the camera transform; the fragment
//! shader samples the screenshot and applies the flashlight dimming. All GL
//! state lives here; navigation code never touches the context.

use std::mem;
use std::sync::Arc;

use glam::Vec2;
use glow::*;

use crate::capture::Screenshot;
use crate::navigation::{Camera, Flashlight, Mouse};

pub struct Renderer {
    gl: Arc<glow::Context>,
    program: NativeProgram,
    vao: NativeVertexArray,
    vbo: NativeBuffer,
    ebo: NativeBuffer,
    texture: NativeTexture,
    camera_pos_loc: NativeUniformLocation,
    camera_scale_loc: NativeUniformLocation,
    window_size_loc: NativeUniformLocation,
    cursor_pos_loc: NativeUniformLocation,
    fl_shadow_loc: NativeUniformLocation,
    fl_radius_loc: NativeUniformLocation,
}

impl Renderer {
    pub fn new(
        gl: Arc<glow::Context>,
        vertex_src: &str,
        fragment_src: &str,
        screenshot: &Screenshot,
    ) -> Result<Self, String> {
        unsafe {
            // Compile and link the quad program
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

            let camera_pos_loc = gl
                .get_uniform_location(program, "cameraPos")
                .ok_or("Failed to get cameraPos uniform location")?;
            let camera_scale_loc = gl
                .get_uniform_location(program, "cameraScale")
                .ok_or("Failed to get cameraScale uniform location")?;
            let screenshot_size_loc = gl
                .get_uniform_location(program, "screenshotSize")
                .ok_or("Failed to get screenshotSize uniform location")?;
            let window_size_loc = gl
                .get_uniform_location(program, "windowSize")
                .ok_or("Failed to get windowSize uniform location")?;
            let cursor_pos_loc = gl
                .get_uniform_location(program, "cursorPos")
                .ok_or("Failed to get cursorPos uniform location")?;
            let fl_shadow_loc = gl
                .get_uniform_location(program, "flShadow")
                .ok_or("Failed to get flShadow uniform location")?;
            let fl_radius_loc = gl
                .get_uniform_location(program, "flRadius")
                .ok_or("Failed to get flRadius uniform location")?;

            // Quad in screenshot pixel coordinates. Two triangles:
            // 3_____0
            // |\    |
            // |  \  |
            // 2____\1
            let w = screenshot.width as f32;
            let h = screenshot.height as f32;
            #[rustfmt::skip]
            let vertices: [f32; 20] = [
                // x    y    z    u    v
                w,   0.0, 0.0, 1.0, 0.0, // top right
                w,   h,   0.0, 1.0, 1.0, // bottom right
                0.0, h,   0.0, 0.0, 1.0, // bottom left
                0.0, 0.0, 0.0, 0.0, 0.0, // top left
            ];
            let indices: [u32; 6] = [0, 1, 3, 1, 2, 3];

            let vao = gl
                .create_vertex_array()
                .map_err(|e| format!("Failed to create VAO: {}", e))?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&vertices), STATIC_DRAW);

            let ebo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create EBO: {}", e))?;
            gl.bind_buffer(ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(ELEMENT_ARRAY_BUFFER, as_u8_slice(&indices), STATIC_DRAW);

            let stride = (5 * mem::size_of::<f32>()) as i32;

            // Position attribute, vec3
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, FLOAT, false, stride, 0);

            // UV attribute, vec2
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, FLOAT, false, stride, 3 * mem::size_of::<f32>() as i32);

            gl.bind_vertex_array(None);

            // Upload the screenshot once; it never changes
            let texture = gl
                .create_texture()
                .map_err(|e| format!("Failed to create texture: {}", e))?;
            gl.active_texture(TEXTURE0);
            gl.bind_texture(TEXTURE_2D, Some(texture));

            gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_MIN_FILTER, NEAREST as i32);
            gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_MAG_FILTER, NEAREST as i32);
            gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_WRAP_S, CLAMP_TO_BORDER as i32);
            gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_WRAP_T, CLAMP_TO_BORDER as i32);

            gl.tex_image_2d(
                TEXTURE_2D,
                0,
                RGBA as i32,
                screenshot.width as i32,
                screenshot.height as i32,
                0,
                RGBA,
                UNSIGNED_BYTE,
                Some(screenshot.image.as_raw()),
            );

            // Static uniforms: sampler unit and screenshot dimensions
            gl.use_program(Some(program));
            gl.uniform_1_i32(gl.get_uniform_location(program, "tex").as_ref(), 0);
            gl.uniform_2_f32(Some(&screenshot_size_loc), w, h);
            gl.use_program(None);

            Ok(Self {
                gl,
                program,
                vao,
                vbo,
                ebo,
                texture,
                camera_pos_loc,
                camera_scale_loc,
                window_size_loc,
                cursor_pos_loc,
                fl_shadow_loc,
                fl_radius_loc,
            })
        }
    }

    pub fn resize(&self, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
    }

    /// Draw one frame of the navigated screenshot.
    pub fn render(
        &self,
        camera: &Camera,
        flashlight: &Flashlight,
        mouse: &Mouse,
        window_size: Vec2,
    ) {
        unsafe {
            self.gl.clear_color(0.1, 0.1, 0.1, 1.0);
            self.gl.clear(COLOR_BUFFER_BIT);

            self.gl.use_program(Some(self.program));

            self.gl
                .uniform_2_f32(Some(&self.camera_pos_loc), camera.position.x, camera.position.y);
            self.gl.uniform_1_f32(Some(&self.camera_scale_loc), camera.scale);
            self.gl
                .uniform_2_f32(Some(&self.window_size_loc), window_size.x, window_size.y);
            self.gl
                .uniform_2_f32(Some(&self.cursor_pos_loc), mouse.current.x, mouse.current.y);
            self.gl.uniform_1_f32(Some(&self.fl_shadow_loc), flashlight.shadow);
            self.gl.uniform_1_f32(Some(&self.fl_radius_loc), flashlight.radius);

            self.gl.active_texture(TEXTURE0);
            self.gl.bind_texture(TEXTURE_2D, Some(self.texture));

            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.draw_elements(TRIANGLES, 6, UNSIGNED_INT, 0);
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.ebo);
            self.gl.delete_texture(self.texture);
        }
    }
}

fn as_u8_slice<T>(data: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(data.as_ptr() as *const u8, data.len() * mem::size_of::<T>())
    }
}
