use bytemuck::{Pod, Zeroable};

/// Interleaved vertex handed to the renderer as raw bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Chunk-local position
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, normal, color }
    }
}

/// The six axis-aligned faces of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Right,  // +X
    Left,   // -X
    Top,    // +Y
    Bottom, // -Y
    Front,  // +Z
    Back,   // -Z
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    /// Offset to the neighboring cell this face looks at
    pub fn offset(&self) -> (i32, i32, i32) {
        match self {
            Face::Right => (1, 0, 0),
            Face::Left => (-1, 0, 0),
            Face::Top => (0, 1, 0),
            Face::Bottom => (0, -1, 0),
            Face::Front => (0, 0, 1),
            Face::Back => (0, 0, -1),
        }
    }

    pub fn normal(&self) -> [f32; 3] {
        let (x, y, z) = self.offset();
        [x as f32, y as f32, z as f32]
    }

    /// Two triangles covering the face of the unit cell at `(x, y, z)`
    pub fn triangles(&self, x: f32, y: f32, z: f32) -> [[f32; 3]; 6] {
        match self {
            Face::Right | Face::Left => {
                let fx = if *self == Face::Right { x + 1.0 } else { x };
                [
                    [fx, y, z],
                    [fx, y + 1.0, z],
                    [fx, y + 1.0, z + 1.0],
                    [fx, y, z],
                    [fx, y + 1.0, z + 1.0],
                    [fx, y, z + 1.0],
                ]
            }
            Face::Top | Face::Bottom => {
                let fy = if *self == Face::Top { y + 1.0 } else { y };
                [
                    [x, fy, z],
                    [x, fy, z + 1.0],
                    [x + 1.0, fy, z + 1.0],
                    [x, fy, z],
                    [x + 1.0, fy, z + 1.0],
                    [x + 1.0, fy, z],
                ]
            }
            Face::Front | Face::Back => {
                let fz = if *self == Face::Front { z + 1.0 } else { z };
                [
                    [x, y, fz],
                    [x + 1.0, y + 1.0, fz],
                    [x, y + 1.0, fz],
                    [x, y, fz],
                    [x + 1.0, y, fz],
                    [x + 1.0, y + 1.0, fz],
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 36);
        let vertices = [Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5, 0.5])];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 36);
    }

    #[test]
    fn test_face_triangles_lie_on_face_plane() {
        for face in Face::ALL {
            let (dx, dy, dz) = face.offset();
            for corner in face.triangles(2.0, 3.0, 4.0) {
                if dx != 0 {
                    assert_eq!(corner[0], if dx > 0 { 3.0 } else { 2.0 });
                }
                if dy != 0 {
                    assert_eq!(corner[1], if dy > 0 { 4.0 } else { 3.0 });
                }
                if dz != 0 {
                    assert_eq!(corner[2], if dz > 0 { 5.0 } else { 4.0 });
                }
            }
        }
    }
}
