//! Procedural geometry plus the plain GPU-facing vertex, instance and
//! uniform layouts shared by the web and native renderers.
//!
//! Meshes are unit-sized; per-instance scale does the rest. Index buffers are
//! u16 throughout, the largest mesh here is a 16x16 sphere.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::{PI, TAU};

use crate::layout::FoliagePoint;

/// Vertex for lit solid geometry.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Vertex for the textured panel face.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PanelVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Per-instance attributes for the solid and panel pipelines. The colour's
/// fourth component carries the emissive flag (1.0 renders full-bright).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub position: [f32; 3],
    pub scale: f32,
    pub rotation: [f32; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub fn from_parts(position: Vec3, scale: f32, rotation: Quat, color: Vec3, emissive: bool) -> Self {
        Self {
            position: position.to_array(),
            scale,
            rotation: rotation.to_array(),
            color: [color.x, color.y, color.z, if emissive { 1.0 } else { 0.0 }],
        }
    }
}

/// Per-particle attributes for the foliage pipeline; the shader blends and
/// waves these on the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FoliageRaw {
    pub chaos: [f32; 3],
    pub rest: [f32; 3],
    pub color: [f32; 3],
}

impl FoliageRaw {
    pub fn from_point(point: &FoliagePoint) -> Self {
        Self {
            chaos: point.chaos.to_array(),
            rest: point.rest.to_array(),
            color: point.color.to_array(),
        }
    }
}

/// Uniforms shared by every scene pipeline. Matches `SceneUniforms` in the
/// wgsl sources.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SceneUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub time: f32,
    pub progress: f32,
    pub point_size: f32,
    pub _pad: f32,
}

impl SceneUniforms {
    pub fn new(model: Mat4, view: Mat4, proj: Mat4, time: f32, progress: f32, point_size: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            time,
            progress,
            point_size,
            _pad: 0.0,
        }
    }
}

/// Uniforms for the post chain. Matches `PostUniforms` in post.wgsl.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PostUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub grain: f32,
    pub blur_dir: [f32; 2],
    pub bloom_strength: f32,
    pub threshold: f32,
}

/// Indexed triangle mesh.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

/// Unit-radius UV sphere.
pub fn uv_sphere(stacks: u32, slices: u32) -> MeshData {
    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
    for stack in 0..=stacks {
        let phi = PI * stack as f32 / stacks as f32;
        for slice in 0..=slices {
            let theta = TAU * slice as f32 / slices as f32;
            let p = [
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            ];
            vertices.push(MeshVertex {
                position: p,
                normal: p,
            });
        }
    }
    let cols = slices + 1;
    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = (stack * cols + slice) as u16;
            let b = a + cols as u16;
            // counter-clockwise from outside, like the cube and quads
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    MeshData { vertices, indices }
}

/// Unit cube centred on the origin, face normals.
pub fn unit_cube() -> MeshData {
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, right, up) in faces {
        let n = Vec3::from(normal);
        let r = Vec3::from(right);
        let u = Vec3::from(up);
        let base = vertices.len() as u16;
        for (sr, su) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (n + r * sr + u * su) * 0.5;
            vertices.push(MeshVertex {
                position: p.to_array(),
                normal,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    MeshData { vertices, indices }
}

/// Flat quad in the XY plane facing +z, optionally set back along z.
pub fn quad(width: f32, height: f32, z: f32) -> MeshData {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let n = [0.0, 0.0, 1.0];
    MeshData {
        vertices: vec![
            MeshVertex { position: [-hw, -hh, z], normal: n },
            MeshVertex { position: [hw, -hh, z], normal: n },
            MeshVertex { position: [hw, hh, z], normal: n },
            MeshVertex { position: [-hw, hh, z], normal: n },
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Unit disc in the XZ plane facing +y; the floor under the tree.
pub fn disc(segments: u32) -> MeshData {
    let n = [0.0, 1.0, 0.0];
    let mut vertices = vec![MeshVertex {
        position: [0.0; 3],
        normal: n,
    }];
    for s in 0..=segments {
        let a = TAU * s as f32 / segments as f32;
        vertices.push(MeshVertex {
            position: [a.cos(), 0.0, a.sin()],
            normal: n,
        });
    }
    let mut indices = Vec::with_capacity(segments as usize * 3);
    for s in 0..segments {
        indices.extend_from_slice(&[0, (s + 2) as u16, (s + 1) as u16]);
    }
    MeshData { vertices, indices }
}

/// Quad with texture coordinates for the panel face; v runs top to bottom.
pub fn panel_quad(width: f32, height: f32) -> (Vec<PanelVertex>, Vec<u16>) {
    let (hw, hh) = (width / 2.0, height / 2.0);
    (
        vec![
            PanelVertex { position: [-hw, -hh, 0.0], uv: [0.0, 1.0] },
            PanelVertex { position: [hw, -hh, 0.0], uv: [1.0, 1.0] },
            PanelVertex { position: [hw, hh, 0.0], uv: [1.0, 0.0] },
            PanelVertex { position: [-hw, hh, 0.0], uv: [0.0, 0.0] },
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}
