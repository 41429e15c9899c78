//! Scene composition: from catalog to transform hierarchy.
//!
//! Every body gets three nested nodes:
//!
//! ```text
//! pivot             orbital-plane tilt (moons: also follows the parent body)
//! └─ container      planets: offset to the ellipse center, star stays at the focus
//!    └─ body        the sphere, axial tilt and spin
//!       └─ ring     optional, in the equatorial plane
//! ```
//!
//! Planet orbit curves hang off the star as static lines. Moons get no curve.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::catalog::{BodyKind, Catalog, CelestialBody, Shading};
use crate::config::SceneConfig;
use crate::constants::{FRAC_PI_2, TWO_PI};
use crate::error::{Result, SceneError};
use crate::orbit::OrbitCurve;
use crate::render::{Primitive, PrimitiveFactory, TransformSink};
use crate::utils::{axial_tilt, deg2rad, phase, plane2space};
use crate::{vec3, Num, Quat, Vec3};

mod graph;

pub use graph::{Node, NodeId, SceneGraph};

/// Index of a [`SceneHandle`] within its [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(usize);

impl HandleId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-body animation record
#[derive(Debug, Clone)]
pub struct SceneHandle {
    pub name: String,
    pub kind: BodyKind,
    pub pivot: NodeId,
    pub orbit_container: NodeId,
    /// The body's own sphere
    pub transform: NodeId,
    pub orbit_curve: Option<OrbitCurve>,
    /// Days, signed
    pub orbit_period: Num,
    /// Days, signed
    pub rotation_period: Num,
    /// Days since the scene was composed
    pub elapsed_time: Num,
    /// Body this one orbits. Only read from, never written through.
    pub parent: Option<HandleId>,

    axial_tilt: Quat,
    /// Radians
    meridian_angle: Num,
    /// Days
    spin_offset: Num,
}

/// A composed scene: transform hierarchy plus one handle per body.
///
/// Handles are stored parent-first, which is also the order they are posed
/// and propagated in.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    graph: SceneGraph,
    handles: Vec<SceneHandle>,
    by_name: HashMap<String, HandleId>,
    sky: NodeId,
    light: NodeId,
}

impl Scene {
    /// Builds the whole scene or nothing.
    ///
    /// Fails on the first catalog problem, naming the offending body.
    pub fn compose(catalog: &Catalog, config: SceneConfig) -> Result<Self> {
        let tree = catalog.tree()?;

        let mut builder = Builder {
            config: &config,
            graph: SceneGraph::new(),
            handles: Vec::with_capacity(catalog.len()),
            by_name: HashMap::with_capacity(catalog.len()),
        };

        let sky = builder.graph.add(
            "sky",
            Primitive::Sky {
                radius: config.sky_radius,
                material: config.sky_material.clone(),
            },
            None,
            Vec3::ZERO,
            Quat::IDENTITY,
        );

        let (star, light) = builder.add_star(&catalog.bodies[tree.root()])?;

        // Breadth-first from the star: planets before their moons
        for idx in tree.topological().into_iter().skip(1) {
            let body = &catalog.bodies[idx];

            match body.kind {
                BodyKind::Planet if tree.node(idx).depth == 1 => {
                    builder.add_planet(body, star)?;
                }
                BodyKind::Moon => {
                    builder.add_moon(body)?;
                }
                _ => {
                    return Err(SceneError::UnreachableBody {
                        body: body.name.clone(),
                    });
                }
            }
        }

        let Builder {
            graph,
            handles,
            by_name,
            ..
        } = builder;

        let mut scene = Self {
            config,
            graph,
            handles,
            by_name,
            sky,
            light,
        };
        scene.pose();
        scene.propagate();

        info!(
            bodies = scene.handles.len(),
            nodes = scene.graph.len(),
            "scene composed"
        );

        Ok(scene)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Direct node access, for drivers that place nodes themselves.
    /// Call [`Self::propagate`] afterwards.
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn sky(&self) -> NodeId {
        self.sky
    }

    pub fn light(&self) -> NodeId {
        self.light
    }

    /// Handles in parent-first order
    pub fn handles(&self) -> impl Iterator<Item = &SceneHandle> {
        self.handles.iter()
    }

    pub fn handle_id(&self, name: &str) -> Option<HandleId> {
        self.by_name.get(name).copied()
    }

    pub fn handle(&self, name: &str) -> Option<&SceneHandle> {
        self.handle_id(name).map(|id| &self.handles[id.0])
    }

    pub fn handle_at(&self, id: HandleId) -> &SceneHandle {
        &self.handles[id.0]
    }

    /// Names from `name` up to the star, both included
    pub fn lineage(&self, name: &str) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self.handle_id(name);

        while let Some(id) = current {
            let handle = &self.handles[id.0];
            chain.push(handle.name.as_str());
            current = handle.parent;
        }

        chain
    }

    /// World position of a body's sphere as of the last propagation
    pub fn body_position(&self, name: &str) -> Option<Vec3> {
        self.handle(name)
            .map(|handle| self.graph.world_position(handle.transform))
    }

    /// Moves every body `delta_days` forward (or back, if negative)
    pub fn advance(&mut self, delta_days: Num) {
        for handle in &mut self.handles {
            handle.elapsed_time += delta_days;
        }

        self.pose();
        self.propagate();
    }

    /// Places every body at an absolute time
    pub fn set_elapsed(&mut self, days: Num) {
        for handle in &mut self.handles {
            handle.elapsed_time = days;
        }

        self.pose();
        self.propagate();
    }

    /// Recomputes world transforms, parents before children.
    ///
    /// Moon pivots first pick up the current world position of their parent
    /// body, so a parent moved this frame drags its moons along.
    pub fn propagate(&mut self) {
        self.graph.propagate(self.sky);

        for idx in 0..self.handles.len() {
            let handle = &self.handles[idx];

            if handle.kind == BodyKind::Moon {
                if let Some(parent) = handle.parent {
                    let anchor = self
                        .graph
                        .world_position(self.handles[parent.0].transform);
                    self.graph.node_mut(handle.pivot).translation = anchor;
                }
            }

            self.graph.propagate(handle.pivot);
        }
    }

    /// Sets local transforms from each handle's elapsed time
    fn pose(&mut self) {
        let tolerance = self.config.kepler_tolerance;

        for handle in &self.handles {
            let spin = TWO_PI
                * phase(
                    handle.elapsed_time + handle.spin_offset,
                    handle.rotation_period,
                )
                + handle.meridian_angle;

            let body = self.graph.node_mut(handle.transform);
            body.rotation = handle.axial_tilt * Quat::from_rotation_y(spin);

            let Some(curve) = &handle.orbit_curve else {
                continue;
            };

            let mean_anomaly = TWO_PI * phase(handle.elapsed_time, handle.orbit_period);

            match handle.kind {
                BodyKind::Planet => {
                    let t = curve.parametric_angle(mean_anomaly, tolerance);
                    body.translation = plane2space(curve.params().centered_point(t));
                }
                BodyKind::Moon => {
                    let pivot = self.graph.node_mut(handle.pivot);
                    pivot.rotation = curve.tilt() * Quat::from_rotation_y(mean_anomaly);
                }
                BodyKind::Star => {}
            }
        }
    }

    /// Hands every node to the renderer, parents first
    pub fn realize<F: PrimitiveFactory>(&self, factory: &mut F) {
        for (id, node) in self.graph.iter() {
            factory.create(id, node);
        }
    }

    /// Pushes the current local transforms to the renderer
    pub fn sync<S: TransformSink>(&self, sink: &mut S) {
        for (id, node) in self.graph.iter() {
            sink.set_transform(id, node.translation, node.rotation);
        }
    }
}

struct Builder<'a> {
    config: &'a SceneConfig,
    graph: SceneGraph,
    handles: Vec<SceneHandle>,
    by_name: HashMap<String, HandleId>,
}

impl Builder<'_> {
    fn add_star(&mut self, body: &CelestialBody) -> Result<(HandleId, NodeId)> {
        let pivot = self.pivot(body, Quat::IDENTITY);
        let container = pivot;

        let transform = self.graph.add(
            body.name.clone(),
            Primitive::Sphere {
                radius: self.config.star_radius,
                material: body.material.clone(),
                shading: Shading::Emissive,
            },
            Some(container),
            Vec3::ZERO,
            Quat::IDENTITY,
        );

        let light = self.graph.add(
            format!("{} light", body.name),
            Primitive::PointLight {
                intensity: self.config.star_light_intensity,
            },
            Some(pivot),
            Vec3::ZERO,
            Quat::IDENTITY,
        );

        let id = self.register(body, pivot, container, transform, None, None)?;

        Ok((id, light))
    }

    fn add_planet(&mut self, body: &CelestialBody, star: HandleId) -> Result<HandleId> {
        let curve = self.curve(body, self.config.orbit_radius_scale)?;
        let star_pivot = self.handles[star.0].pivot;

        self.graph.add(
            format!("{} orbit", body.name),
            Primitive::OrbitLine {
                points: curve.space_points(self.config.orbit_segments).collect(),
            },
            Some(star_pivot),
            Vec3::ZERO,
            Quat::IDENTITY,
        );

        let pivot = self.pivot(body, curve.tilt());
        let container = self.graph.add(
            format!("{} container", body.name),
            Primitive::Pivot,
            Some(pivot),
            vec3(curve.params().focus_offset, 0.0, 0.0),
            Quat::IDENTITY,
        );
        let transform = self.sphere(body, container, Vec3::ZERO);

        self.register(body, pivot, container, transform, Some(curve), Some(star))
    }

    fn add_moon(&mut self, body: &CelestialBody) -> Result<HandleId> {
        let parent = body
            .parent
            .as_deref()
            .and_then(|name| self.by_name.get(name).copied())
            .ok_or_else(|| SceneError::MissingParent {
                body: body.name.clone(),
                parent: body.parent.clone().unwrap_or_default(),
            })?;

        // Moons orbit planets only
        if self.handles[parent.0].kind != BodyKind::Planet {
            return Err(SceneError::UnreachableBody {
                body: body.name.clone(),
            });
        }

        let curve = self.curve(body, self.config.moon_orbit_scale)?;

        let pivot = self.pivot(body, curve.tilt());
        let container = self.graph.add(
            format!("{} container", body.name),
            Primitive::Pivot,
            Some(pivot),
            Vec3::ZERO,
            Quat::IDENTITY,
        );
        let radius = curve.params().semi_major;
        let transform = self.sphere(body, container, vec3(radius, 0.0, 0.0));

        self.register(body, pivot, container, transform, Some(curve), Some(parent))
    }

    fn curve(&self, body: &CelestialBody, scale: Num) -> Result<OrbitCurve> {
        let orbit = &body.orbit;

        OrbitCurve::new(
            orbit.semi_major_axis,
            orbit.eccentricity,
            orbit.inclination,
            scale,
        )
        .map_err(|source| SceneError::InvalidOrbitParameters {
            body: body.name.clone(),
            source,
        })
    }

    /// Root-level node carrying the orbital plane
    fn pivot(&mut self, body: &CelestialBody, rotation: Quat) -> NodeId {
        self.graph.add(
            format!("{} pivot", body.name),
            Primitive::Pivot,
            None,
            Vec3::ZERO,
            rotation,
        )
    }

    fn sphere(&mut self, body: &CelestialBody, container: NodeId, translation: Vec3) -> NodeId {
        let scale = self.config.planet_radius_scale;

        let transform = self.graph.add(
            body.name.clone(),
            Primitive::Sphere {
                radius: body.radius * scale,
                material: body.material.clone(),
                shading: body.shading,
            },
            Some(container),
            translation,
            axial_tilt(body.rotation.inclination),
        );

        if let Some(ring) = &body.ring {
            self.graph.add(
                format!("{} ring", body.name),
                Primitive::Ring {
                    inner_radius: ring.inner_radius * scale,
                    outer_radius: ring.outer_radius * scale,
                    material: ring.material.clone(),
                },
                Some(transform),
                Vec3::ZERO,
                Quat::from_rotation_x(-FRAC_PI_2),
            );
        }

        transform
    }

    fn register(
        &mut self,
        body: &CelestialBody,
        pivot: NodeId,
        orbit_container: NodeId,
        transform: NodeId,
        orbit_curve: Option<OrbitCurve>,
        parent: Option<HandleId>,
    ) -> Result<HandleId> {
        if self.by_name.contains_key(&body.name) {
            return Err(SceneError::DuplicateName {
                name: body.name.clone(),
            });
        }

        debug!(
            name = body.name.as_str(),
            kind = ?body.kind,
            parent = body.parent.as_deref(),
            "composed body"
        );

        let id = HandleId(self.handles.len());
        self.handles.push(SceneHandle {
            name: body.name.clone(),
            kind: body.kind,
            pivot,
            orbit_container,
            transform,
            orbit_curve,
            orbit_period: body.orbit.period,
            rotation_period: body.rotation.period,
            elapsed_time: 0.0,
            parent,
            axial_tilt: axial_tilt(body.rotation.inclination),
            meridian_angle: deg2rad(body.rotation.meridian_angle),
            spin_offset: body.rotation.offset,
        });
        self.by_name.insert(body.name.clone(), id);

        Ok(id)
    }
}
