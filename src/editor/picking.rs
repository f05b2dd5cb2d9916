use crate::math::Ray;
use crate::scene::{ObjectId, SceneGraph};

/// Nearest intersection of a pick ray with the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Object whose mesh was hit
    pub object: ObjectId,
    /// Its ancestor directly under the world root
    pub top_level: ObjectId,
    pub distance: f32,
}

/// Cast `ray` against every mesh in the graph
///
/// World-space bounds reject most objects before the per-triangle test.
/// Equal distances resolve to the lower id so the result does not depend
/// on map iteration order.
pub fn pick(graph: &SceneGraph, ray: &Ray) -> Option<PickHit> {
    let mut nearest: Option<(f32, ObjectId)> = None;

    for object in graph.iter() {
        let Some(mesh) = object.mesh.as_ref() else {
            continue;
        };
        let Some(world) = graph.world_matrix(object.id()) else {
            continue;
        };

        if ray.intersect_aabb(&mesh.bounds().transformed(&world)).is_none() {
            continue;
        }

        let closest = mesh
            .triangles()
            .filter_map(|[a, b, c]| {
                ray.intersect_triangle(
                    world.transform_point3(a),
                    world.transform_point3(b),
                    world.transform_point3(c),
                )
            })
            .fold(None, |best: Option<f32>, t| Some(best.map_or(t, |b| b.min(t))));

        if let Some(t) = closest {
            let better = match nearest {
                None => true,
                Some((best_t, best_id)) => t < best_t || (t == best_t && object.id() < best_id),
            };
            if better {
                nearest = Some((t, object.id()));
            }
        }
    }

    let (distance, object) = nearest?;
    let top_level = graph.top_level_ancestor(object)?;
    Some(PickHit {
        object,
        top_level,
        distance,
    })
}
