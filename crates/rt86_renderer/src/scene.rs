//! Scene: an ordered, growable list of spheres with a brute-force
//! nearest-hit query.

use std::collections::TryReserveError;

use crate::{HitRecord, Hittable, Sphere};
use log::debug;
use rt86_math::{Interval, Ray};
use thiserror::Error;

/// Errors raised while building a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to allocate storage for {requested} spheres: {source}")]
    Allocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

/// All spheres in the world.
///
/// Built once before rendering and read-only while rays are traced.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with room for `capacity` spheres.
    pub fn with_capacity(capacity: usize) -> Result<Self, SceneError> {
        let mut spheres = Vec::new();
        spheres
            .try_reserve_exact(capacity)
            .map_err(|source| SceneError::Allocation {
                requested: capacity,
                source,
            })?;
        Ok(Self { spheres })
    }

    /// Append a sphere, doubling the backing storage when full.
    pub fn add(&mut self, sphere: Sphere) -> Result<(), SceneError> {
        let len = self.spheres.len();
        let capacity = self.spheres.capacity();
        if len == capacity {
            let additional = capacity.max(1);
            self.spheres
                .try_reserve_exact(additional)
                .map_err(|source| SceneError::Allocation {
                    requested: len + additional,
                    source,
                })?;
            debug!(
                "Scene storage grown from {} to {} spheres",
                capacity,
                self.spheres.capacity()
            );
        }
        self.spheres.push(sphere);
        Ok(())
    }

    /// Get the sphere at `index`.
    pub fn get(&self, index: usize) -> Option<&Sphere> {
        self.spheres.get(index)
    }

    /// Remove the sphere at `index`, keeping the order of the rest.
    ///
    /// Out-of-range indices leave the scene untouched.
    pub fn remove(&mut self, index: usize) -> Option<Sphere> {
        (index < self.spheres.len()).then(|| self.spheres.remove(index))
    }

    /// Remove all spheres and release their materials.
    pub fn clear(&mut self) {
        self.spheres.clear();
    }

    /// Get the number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Iterate over the spheres in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sphere> {
        self.spheres.iter()
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Sphere;
    type IntoIter = std::slice::Iter<'a, Sphere>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for sphere in &self.spheres {
            // Later candidates must beat the nearest hit so far
            let closest_so_far = closest.map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = sphere.hit(ray, ray_t.with_max(closest_so_far)) {
                closest = Some(rec);
            }
        }

        closest
    }
}
