use cgmath::{InnerSpace, Point3, Vector3};

use crate::constants::interaction::RAY_STEP;
use crate::renderer::Face;
use crate::world::{BlockId, BlockPalette, VoxelPos};

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Ray with a normalized direction. A zero direction stays zero and never hits.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        let direction = if direction.magnitude2() > 0.0 {
            direction.normalize()
        } else {
            direction
        };
        Self { origin, direction }
    }

    pub fn point_at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction * distance
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The first opaque block along the ray
    pub position: VoxelPos,
    pub block: BlockId,
    /// Last empty cell visited before the hit; where a placed block goes
    pub previous: Option<VoxelPos>,
    /// Face of the hit block the ray entered through, when it is unambiguous
    pub face: Option<Face>,
    pub distance: f32,
}

/// March along a ray in fixed steps and return the first cell that is
/// neither air nor transparent.
pub fn cast_ray<F>(ray: &Ray, max_distance: f32, palette: &BlockPalette, mut block_at: F) -> Option<RaycastHit>
where
    F: FnMut(VoxelPos) -> BlockId,
{
    if ray.direction.magnitude2() == 0.0 {
        return None;
    }

    let mut previous: Option<VoxelPos> = None;
    let mut step = 0u32;
    loop {
        let distance = step as f32 * RAY_STEP;
        if distance >= max_distance {
            return None;
        }

        let cell = VoxelPos::from_world_point(ray.point_at(distance));
        if previous != Some(cell) {
            let block = block_at(cell);
            if !palette.is_see_through(block) {
                return Some(RaycastHit {
                    position: cell,
                    block,
                    previous,
                    face: previous.and_then(|prev| entry_face(cell, prev)),
                    distance,
                });
            }
            previous = Some(cell);
        }
        step += 1;
    }
}

fn entry_face(hit: VoxelPos, previous: VoxelPos) -> Option<Face> {
    let delta = (previous.x - hit.x, previous.y - hit.y, previous.z - hit.z);
    Face::ALL.iter().copied().find(|face| face.offset() == delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stone floor at y <= 4, air above
    fn floor(pos: VoxelPos) -> BlockId {
        if pos.y <= 4 {
            BlockId::Stone
        } else {
            BlockId::Air
        }
    }

    #[test]
    fn test_ray_hits_floor_from_above() {
        let ray = Ray::new(Point3::new(0.5, 7.5, 0.5), Vector3::new(0.0, -1.0, 0.0));
        let hit = cast_ray(&ray, 6.0, &BlockPalette::default(), floor).unwrap();
        assert_eq!(hit.position, VoxelPos::new(0, 4, 0));
        assert_eq!(hit.previous, Some(VoxelPos::new(0, 5, 0)));
        assert_eq!(hit.face, Some(Face::Top));
        assert_eq!(hit.block, BlockId::Stone);
        assert!((hit.distance - 2.6).abs() < 1e-3, "distance {}", hit.distance);
    }

    #[test]
    fn test_ray_out_of_reach_misses() {
        let ray = Ray::new(Point3::new(0.5, 20.0, 0.5), Vector3::new(0.0, -1.0, 0.0));
        assert!(cast_ray(&ray, 6.0, &BlockPalette::default(), floor).is_none());
    }

    #[test]
    fn test_ray_passes_through_transparent_blocks() {
        let world = |pos: VoxelPos| match pos.x {
            2 => BlockId::Ice,
            4 => BlockId::Stone,
            _ => BlockId::Air,
        };
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
        let hit = cast_ray(&ray, 6.0, &BlockPalette::default(), world).unwrap();
        assert_eq!(hit.position, VoxelPos::new(4, 0, 0));
        assert_eq!(hit.previous, Some(VoxelPos::new(3, 0, 0)));
        assert_eq!(hit.face, Some(Face::Left));
    }

    #[test]
    fn test_zero_direction_never_hits() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 0.0, 0.0));
        assert!(cast_ray(&ray, 6.0, &BlockPalette::default(), |_| BlockId::Stone).is_none());
    }

    #[test]
    fn test_start_inside_block_has_no_previous() {
        let ray = Ray::new(Point3::new(0.5, 2.5, 0.5), Vector3::new(0.0, -1.0, 0.0));
        let hit = cast_ray(&ray, 6.0, &BlockPalette::default(), floor).unwrap();
        assert_eq!(hit.previous, None);
        assert_eq!(hit.face, None);
        assert_eq!(hit.distance, 0.0);
    }
}
