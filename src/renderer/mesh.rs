use crate::renderer::vertex::{Face, Vertex};
use crate::world::ChunkPos;

/// Vertices per emitted face (two triangles, no index buffer)
pub const VERTICES_PER_FACE: usize = 6;

/// Triangle list for one chunk, in chunk-local coordinates
#[derive(Debug, Clone)]
pub struct ChunkMesh {
    position: ChunkPos,
    /// World position of the chunk's local origin
    origin: [f32; 3],
    vertices: Vec<Vertex>,
}

impl ChunkMesh {
    pub fn new(position: ChunkPos, chunk_size: u32) -> Self {
        let (x, z) = position.origin(chunk_size);
        Self {
            position,
            origin: [x as f32, 0.0, z as f32],
            vertices: Vec::new(),
        }
    }

    pub fn position(&self) -> ChunkPos {
        self.position
    }

    pub fn origin(&self) -> [f32; 3] {
        self.origin
    }

    /// Append one face of the cell at local `(x, y, z)`
    pub fn add_face(&mut self, face: Face, x: u32, y: u32, z: u32, mut color: impl FnMut() -> [f32; 3]) {
        let normal = face.normal();
        for corner in face.triangles(x as f32, y as f32, z as f32) {
            self.vertices.push(Vertex::new(corner, normal, color()));
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw vertex bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    pub fn normals(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.normal)
    }

    pub fn colors(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.color)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_face_emits_six_vertices() {
        let mut mesh = ChunkMesh::new(ChunkPos::new(-1, 2), 16);
        assert!(mesh.is_empty());
        assert_eq!(mesh.origin(), [-16.0, 0.0, 32.0]);

        mesh.add_face(Face::Top, 0, 5, 0, || [1.0, 1.0, 1.0]);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.normals().all(|n| n == [0.0, 1.0, 0.0]));
        assert!(mesh.positions().all(|p| p[1] == 6.0));
        assert_eq!(mesh.as_bytes().len(), 6 * std::mem::size_of::<Vertex>());
    }
}
