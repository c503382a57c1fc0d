//! Unit cube geometry and per-cube instance transforms.

use glam::{Mat4, Quat, Vec3};

use crate::options::SceneOptions;

/// One cube corner: position and texture coordinate.
/// Must match `VertexInput` in `textured_cube.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

const fn v(x: f32, y: f32, z: f32, u: f32, t: f32) -> CubeVertex {
    CubeVertex {
        position: [x, y, z],
        uv: [u, t],
    }
}

/// Unit cube centered at the origin as 36 non-indexed vertices, two
/// triangles per face.
pub const CUBE_VERTICES: [CubeVertex; 36] = [
    // -Z
    v(-0.5, -0.5, -0.5, 0.0, 0.0),
    v(0.5, -0.5, -0.5, 1.0, 0.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 0.0),
    // +Z
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 1.0),
    v(0.5, 0.5, 0.5, 1.0, 1.0),
    v(-0.5, 0.5, 0.5, 0.0, 1.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    // -X
    v(-0.5, 0.5, 0.5, 1.0, 0.0),
    v(-0.5, 0.5, -0.5, 1.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(-0.5, 0.5, 0.5, 1.0, 0.0),
    // +X
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, -0.5, -0.5, 0.0, 1.0),
    v(0.5, -0.5, -0.5, 0.0, 1.0),
    v(0.5, -0.5, 0.5, 0.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    // -Y
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(0.5, -0.5, -0.5, 1.0, 1.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0),
    // +Y
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 0.0),
    v(-0.5, 0.5, 0.5, 0.0, 0.0),
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
];

impl CubeVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Per-vertex buffer layout (slot 0).
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-cube model matrix, column major.
/// Must match `InstanceInput` in `textured_cube.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeInstance {
    /// Model matrix columns.
    pub model: [[f32; 4]; 4],
}

impl CubeInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
    ];

    /// Per-instance buffer layout (slot 1).
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// `translate(position) * rotate(axis, angle)`. A zero axis falls back to
/// +Y.
#[must_use]
pub fn model_matrix(position: Vec3, axis: Vec3, angle: f32) -> Mat4 {
    let axis = axis.try_normalize().unwrap_or(Vec3::Y);
    Mat4::from_rotation_translation(Quat::from_axis_angle(axis, angle), position)
}

/// Instance transforms for every configured cube at `elapsed` seconds.
///
/// Cube `i` is rotated by `elapsed + i * rotation_step`; with spin disabled
/// the elapsed term is dropped and the cubes hold their offsets.
#[must_use]
pub fn cube_instances(scene: &SceneOptions, elapsed: f32) -> Vec<CubeInstance> {
    let t = if scene.spin { elapsed } else { 0.0 };
    let step = scene.rotation_step_degrees.to_radians();
    let axis = Vec3::from(scene.rotation_axis);
    scene
        .cube_positions
        .iter()
        .enumerate()
        .map(|(i, &p)| CubeInstance {
            model: model_matrix(Vec3::from(p), axis, t + step * i as f32)
                .to_cols_array_2d(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn cube_is_unit_and_centered() {
        for vert in &CUBE_VERTICES {
            for c in vert.position {
                assert_eq!(c.abs(), 0.5);
            }
            for t in vert.uv {
                assert!(t == 0.0 || t == 1.0);
            }
        }
        let sum: Vec3 = CUBE_VERTICES
            .iter()
            .map(|v| Vec3::from(v.position))
            .sum();
        assert!(sum.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn every_face_has_two_triangles() {
        for (axis, sign) in [(0, -1.0), (0, 1.0), (1, -1.0), (1, 1.0), (2, -1.0), (2, 1.0)] {
            let on_face = CUBE_VERTICES
                .iter()
                .filter(|v| v.position[axis] == 0.5 * sign)
                .count();
            // Six face vertices plus corners shared with neighbor faces.
            assert!(on_face >= 6, "axis {axis} sign {sign}: {on_face}");
        }
    }

    #[test]
    fn layouts_match_struct_sizes() {
        assert_eq!(CubeVertex::layout().array_stride, 20);
        assert_eq!(CubeInstance::layout().array_stride, 64);
        assert_eq!(
            CubeInstance::layout().step_mode,
            wgpu::VertexStepMode::Instance
        );
    }

    #[test]
    fn model_matrix_translates_after_rotating() {
        let m = model_matrix(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, FRAC_PI_2);
        // +X rotated a quarter turn about Y lands on -Z, then moves.
        let p = m.transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 2.0), 1e-5), "{p:?}");
    }

    #[test]
    fn unnormalized_axis_is_normalized() {
        let a = model_matrix(Vec3::ZERO, Vec3::new(2.0, 0.6, 1.0), 0.7);
        let b = model_matrix(Vec3::ZERO, Vec3::new(1.0, 0.3, 0.5), 0.7);
        assert!(a.abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn zero_axis_falls_back_to_y() {
        let a = model_matrix(Vec3::ZERO, Vec3::ZERO, 1.0);
        let b = model_matrix(Vec3::ZERO, Vec3::Y, 1.0);
        assert!(a.abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn instances_follow_positions_and_step() {
        let scene = SceneOptions::default();
        let instances = cube_instances(&scene, 0.0);
        assert_eq!(instances.len(), 10);

        // Cube 0 has no rotation at t = 0.
        let first = Mat4::from_cols_array_2d(&instances[0].model);
        assert!(first.abs_diff_eq(Mat4::IDENTITY, 1e-6));

        let axis = Vec3::from(scene.rotation_axis);
        for (i, inst) in instances.iter().enumerate() {
            let m = Mat4::from_cols_array_2d(&inst.model);
            let expected = model_matrix(
                Vec3::from(scene.cube_positions[i]),
                axis,
                (20.0_f32 * i as f32).to_radians(),
            );
            assert!(m.abs_diff_eq(expected, 1e-5), "cube {i}");
            assert!(m
                .w_axis
                .truncate()
                .abs_diff_eq(Vec3::from(scene.cube_positions[i]), 1e-6));
        }
    }

    #[test]
    fn spin_adds_elapsed_time() {
        let mut scene = SceneOptions::default();
        let spinning = cube_instances(&scene, 1.5);
        let expected = model_matrix(
            Vec3::from(scene.cube_positions[3]),
            Vec3::from(scene.rotation_axis),
            1.5 + 60.0_f32.to_radians(),
        );
        assert!(Mat4::from_cols_array_2d(&spinning[3].model)
            .abs_diff_eq(expected, 1e-5));

        scene.spin = false;
        assert_eq!(cube_instances(&scene, 1.5), cube_instances(&scene, 0.0));
    }
}
