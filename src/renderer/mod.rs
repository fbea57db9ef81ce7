//! Chunk geometry
//!
//! Face-culled triangle lists built from resolved block data. Drawing them
//! is left to the embedding renderer.

pub mod mesh;
pub mod mesher;
pub mod vertex;

pub use mesh::{ChunkMesh, VERTICES_PER_FACE};
pub use mesher::{BlockAccess, ChunkMesher};
pub use vertex::{Face, Vertex};
