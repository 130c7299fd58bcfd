use glam::Vec3;
use parry3d::math::{Pose3, Vector};
use parry3d::query::{Ray, RayCast};
use parry3d::shape::TriMesh;

use crate::config::*;
use crate::controller::CharacterBody;
use crate::crouch::CapsuleShape;

/// Static level geometry answering ray queries.
pub struct PhysicsWorld {
    trimesh: TriMesh,
}

impl PhysicsWorld {
    pub fn new(collision_vertices: &[Vec3], collision_indices: &[[u32; 3]]) -> Option<Self> {
        if collision_vertices.is_empty() || collision_indices.is_empty() {
            return None;
        }

        let vertices: Vec<Vector> = collision_vertices
            .iter()
            .map(|v| Vector::new(v.x, v.y, v.z))
            .collect();

        let trimesh = TriMesh::new(vertices, collision_indices.to_vec()).ok()?;
        Some(Self { trimesh })
    }

    /// Builds a world out of axis-aligned boxes given as (min, max) corners.
    pub fn from_boxes(boxes: &[(Vec3, Vec3)]) -> Option<Self> {
        const FACES: [[u32; 4]; 6] = [
            [0, 1, 3, 2], // -X
            [4, 6, 7, 5], // +X
            [0, 4, 5, 1], // -Y
            [2, 3, 7, 6], // +Y
            [0, 2, 6, 4], // -Z
            [1, 5, 7, 3], // +Z
        ];

        let mut vertices = Vec::with_capacity(boxes.len() * 8);
        let mut indices = Vec::with_capacity(boxes.len() * 12);
        for (min, max) in boxes {
            let base = vertices.len() as u32;
            // Corner i takes max on axis x if bit 2 is set, y for bit 1, z for bit 0.
            for i in 0..8u32 {
                vertices.push(Vec3::new(
                    if i & 4 != 0 { max.x } else { min.x },
                    if i & 2 != 0 { max.y } else { min.y },
                    if i & 1 != 0 { max.z } else { min.z },
                ));
            }
            for [a, b, c, d] in FACES {
                indices.push([base + a, base + b, base + c]);
                indices.push([base + a, base + c, base + d]);
            }
        }
        Self::new(&vertices, &indices)
    }

    pub fn cast_ray(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<f32> {
        let ray = Ray::new(
            Vector::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );
        self.trimesh
            .cast_ray(&Pose3::IDENTITY, &ray, max_dist, true)
    }
}

/// Minimal capsule body over a [`PhysicsWorld`]: ground snapping and wall push-out.
///
/// `position` is the body pivot; the capsule spans `center.y ± height / 2` around it.
pub struct StaticBody<'w> {
    world: &'w PhysicsWorld,
    pub position: Vec3,
    capsule: CapsuleShape,
    on_ground: bool,
}

impl<'w> StaticBody<'w> {
    pub fn new(world: &'w PhysicsWorld, position: Vec3, capsule: CapsuleShape) -> Self {
        let mut body = Self {
            world,
            position,
            capsule,
            on_ground: false,
        };
        body.move_by(Vec3::ZERO);
        body
    }

    pub fn capsule(&self) -> CapsuleShape {
        self.capsule
    }

    fn center(&self, position: Vec3) -> Vec3 {
        position + Vec3::new(0.0, self.capsule.center.y, 0.0)
    }

    fn bottom(&self, position: Vec3) -> f32 {
        position.y + self.capsule.center.y - self.capsule.height / 2.0
    }

    fn top(&self, position: Vec3) -> f32 {
        position.y + self.capsule.center.y + self.capsule.height / 2.0
    }
}

impl CharacterBody for StaticBody<'_> {
    fn is_grounded(&self) -> bool {
        self.on_ground
    }

    fn move_by(&mut self, delta: Vec3) {
        let mut final_pos = self.position + delta;
        let mut on_ground = false;

        // Ground check from the capsule center so a growing capsule is lifted out of the floor
        let half = self.capsule.height / 2.0;
        let ground_origin = self.center(final_pos);
        if let Some(toi) =
            self.world.cast_ray(ground_origin, Vec3::NEG_Y, half + GROUND_SNAP_MARGIN)
        {
            on_ground = true;
            let ground_y = ground_origin.y - toi;
            let bottom = self.bottom(final_pos);
            if bottom < ground_y {
                final_pos.y += ground_y - bottom;
            }
        }

        // Wall checks (4 directions, 2 heights: step-over and head)
        let bottom = self.bottom(final_pos);
        let top = self.top(final_pos);
        for height in [bottom + STEP_OVER_HEIGHT, top] {
            let wall_origin = Vec3::new(final_pos.x, height, final_pos.z);
            for (dx, dz) in [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)] {
                let dir = Vec3::new(dx, 0.0, dz);
                if let Some(toi) = self.world.cast_ray(wall_origin, dir, BODY_RADIUS)
                    && toi < BODY_RADIUS
                {
                    final_pos.x -= dx * (BODY_RADIUS - toi);
                    final_pos.z -= dz * (BODY_RADIUS - toi);
                }
            }
        }

        // Ceiling check, only when moving up
        if delta.y > 0.0
            && let Some(toi) = self.world.cast_ray(self.center(final_pos), Vec3::Y, half)
            && toi < half
        {
            final_pos.y -= half - toi;
        }

        self.position = final_pos;
        self.on_ground = on_ground;
    }

    fn raycast_up(&self, origin: Vec3, max_distance: f32) -> bool {
        self.world
            .cast_ray(self.position + origin, Vec3::Y, max_distance)
            .is_some()
    }

    fn set_capsule(&mut self, capsule: CapsuleShape) {
        self.capsule = capsule;
    }
}
