//! Static description of the bodies making up the system.
//!
//! A catalog is a flat list where each body names the body it orbits. It is
//! turned into an explicit [`BodyTree`] once, at load time.

use std::collections::HashMap;

use crate::error::{Result, SceneError};
use crate::Num;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

/// Shading hint handed through to the renderer
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Shading {
    /// Self-luminous, unaffected by lights
    Emissive,
    #[default]
    Lambert,
    Phong,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct OrbitalElements {
    /// Days; a negative period is a retrograde orbit
    pub period: Num,
    /// Planets: relative to Earth's orbit. Moons: scene units from the parent.
    pub semi_major_axis: Num,
    pub eccentricity: Num,
    /// Degrees
    pub inclination: Num,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Rotation {
    /// Days; a negative period spins retrograde
    pub period: Num,
    /// Axial tilt in degrees
    pub inclination: Num,
    /// Spin angle at time zero, degrees
    pub meridian_angle: Num,
    /// Spin phase offset, days
    pub offset: Num,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ring {
    /// km, measured from the body center
    pub inner_radius: Num,
    pub outer_radius: Num,
    pub material: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CelestialBody {
    pub name: String,
    /// `None` only for the star
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<String>,
    pub kind: BodyKind,
    /// km
    pub radius: Num,
    #[cfg_attr(feature = "serde", serde(default))]
    pub orbit: OrbitalElements,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation: Rotation,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ring: Option<Ring>,
    /// Texture reference, opaque to the core
    pub material: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shading: Shading,
}

impl CelestialBody {
    fn new(name: &str, kind: BodyKind, parent: Option<&str>, radius: Num) -> Self {
        Self {
            name: name.to_owned(),
            parent: parent.map(str::to_owned),
            kind,
            radius,
            orbit: OrbitalElements::default(),
            rotation: Rotation::default(),
            ring: None,
            material: format!("res/{}/diffuse.jpg", name.to_lowercase()),
            shading: Shading::default(),
        }
    }

    pub fn star(name: &str, radius: Num) -> Self {
        Self::new(name, BodyKind::Star, None, radius).shading(Shading::Emissive)
    }

    pub fn planet(name: &str, star: &str, radius: Num) -> Self {
        Self::new(name, BodyKind::Planet, Some(star), radius)
    }

    pub fn moon(name: &str, planet: &str, radius: Num) -> Self {
        Self::new(name, BodyKind::Moon, Some(planet), radius)
    }

    pub fn orbit(mut self, period: Num, semi_major_axis: Num, eccentricity: Num, inclination: Num) -> Self {
        self.orbit = OrbitalElements {
            period,
            semi_major_axis,
            eccentricity,
            inclination,
        };
        self
    }

    pub fn spin(mut self, period: Num, inclination: Num) -> Self {
        self.rotation.period = period;
        self.rotation.inclination = inclination;
        self
    }

    pub fn meridian(mut self, meridian_angle: Num) -> Self {
        self.rotation.meridian_angle = meridian_angle;
        self
    }

    pub fn ring(mut self, inner_radius: Num, outer_radius: Num, material: &str) -> Self {
        self.ring = Some(Ring {
            inner_radius,
            outer_radius,
            material: material.to_owned(),
        });
        self
    }

    pub fn texture(mut self, material: &str) -> Self {
        self.material = material.to_owned();
        self
    }

    pub fn shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    pub fn is_star(&self) -> bool {
        self.kind == BodyKind::Star
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    pub bodies: Vec<CelestialBody>,
}

impl Catalog {
    pub fn new(bodies: Vec<CelestialBody>) -> Self {
        Self { bodies }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    pub fn get(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|body| body.name == name)
    }

    /// Resolves every `parent` reference into an index tree rooted at the star.
    ///
    /// Fails on the first duplicate name, on anything other than exactly one
    /// star, on a dangling parent reference and on bodies that cannot reach
    /// the star (parent cycles).
    pub fn tree(&self) -> Result<BodyTree> {
        let mut by_name = HashMap::with_capacity(self.bodies.len());

        for (idx, body) in self.bodies.iter().enumerate() {
            if by_name.insert(body.name.clone(), idx).is_some() {
                return Err(SceneError::DuplicateName {
                    name: body.name.clone(),
                });
            }
        }

        let stars: Vec<usize> = self
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.is_star())
            .map(|(idx, _)| idx)
            .collect();

        let [root] = stars[..] else {
            return Err(SceneError::StarCount { found: stars.len() });
        };

        let mut nodes: Vec<TreeNode> = self
            .bodies
            .iter()
            .enumerate()
            .map(|(body, _)| TreeNode {
                body,
                parent: None,
                children: Vec::new(),
                depth: 0,
            })
            .collect();

        for (idx, body) in self.bodies.iter().enumerate() {
            if idx == root {
                continue;
            }

            let Some(parent_name) = &body.parent else {
                return Err(SceneError::UnreachableBody {
                    body: body.name.clone(),
                });
            };

            let Some(&parent) = by_name.get(parent_name) else {
                return Err(SceneError::MissingParent {
                    body: body.name.clone(),
                    parent: parent_name.clone(),
                });
            };

            nodes[idx].parent = Some(parent);
            nodes[parent].children.push(idx);
        }

        // Walk up from every body; more steps than bodies means a cycle
        for idx in 0..nodes.len() {
            let mut depth = 0;
            let mut current = idx;

            while let Some(parent) = nodes[current].parent {
                depth += 1;
                current = parent;

                if depth > nodes.len() {
                    break;
                }
            }

            if current != root {
                return Err(SceneError::UnreachableBody {
                    body: self.bodies[idx].name.clone(),
                });
            }

            nodes[idx].depth = depth;
        }

        Ok(BodyTree { nodes, root })
    }

    /// The Sun, the eight planets and the larger moons.
    ///
    /// Planet semi-major axes are relative to Earth's orbit; moon distances are
    /// already in scene units, exaggerated so they clear their planet.
    pub fn solar_system() -> Self {
        const SUN: &str = "Sun";

        Self::new(vec![
            CelestialBody::star(SUN, 696_340.0)
                .spin(25.38, 7.25)
                .texture("res/sun/8k_sun.jpg"),
            CelestialBody::planet("Mercury", SUN, 2439.0)
                .orbit(87.97, 0.3871, 0.2056, 7.0049)
                .spin(58.64, 0.01),
            CelestialBody::planet("Venus", SUN, 6051.0)
                .orbit(224.7, 0.7233, 0.0068, 3.3947)
                .spin(-243.0, 177.36),
            CelestialBody::planet("Earth", SUN, 6371.0)
                .orbit(365.0, 1.0, 0.0167, 0.0001)
                .spin(0.99726, -23.4392911)
                .meridian(280.147)
                .shading(Shading::Phong),
            CelestialBody::moon("Moon", "Earth", 1738.0)
                .orbit(27.3, 200.0, 0.0549, 5.15)
                .spin(27.32, 6.7),
            CelestialBody::planet("Mars", SUN, 3396.0)
                .orbit(687.0, 1.5237, 0.0934, 1.8506)
                .spin(1.025, 25.19),
            CelestialBody::moon("Phobos", "Mars", 11.1)
                .orbit(1.5945, 20.0, 0.0151, 1.082)
                .spin(0.31, 37.10),
            CelestialBody::moon("Deimos", "Mars", 6.2)
                .orbit(1.26, 30.0, 0.00033, 1.791)
                .spin(150.0, 36.48),
            CelestialBody::planet("Jupiter", SUN, 69_911.0)
                .orbit(4331.0, 5.2028, 0.0484, 1.3053)
                .spin(0.4135, 3.13),
            CelestialBody::moon("Ganymede", "Jupiter", 2634.0)
                .orbit(7.15, 1890.0, 0.0045045, 0.01)
                .spin(0.1, 1.0),
            CelestialBody::moon("Callisto", "Jupiter", 2410.3)
                .orbit(16.68, 3325.0, 0.0045045, 0.21)
                .spin(0.695, 1.0),
            CelestialBody::moon("Europa", "Jupiter", 1569.0)
                .orbit(3.55, 1183.0, 0.0101, 0.46)
                .spin(0.148, 1.0),
            CelestialBody::moon("Io", "Jupiter", 1821.6)
                .orbit(1.77, 750.0, 0.0041, 0.040)
                .spin(0.073, 1.0)
                .texture("res/io/diffuse.png"),
            CelestialBody::planet("Saturn", SUN, 58_232.0)
                .orbit(10_747.0, 9.5826, 0.0542, 0.0)
                .spin(0.444, 26.73)
                .ring(74_500.0, 120_000.0, "res/saturn/ring.png"),
            CelestialBody::moon("Dione", "Saturn", 561.0)
                .orbit(2.74, 1400.0, 0.05, 0.0049)
                .spin(0.114, 1.0),
            CelestialBody::moon("Titan", "Saturn", 2575.5)
                .orbit(15.945, 2300.0, 0.05, 0.0049)
                .spin(0.664, 1.0),
            CelestialBody::moon("Rhea", "Saturn", 763.0)
                .orbit(4.52, 1700.0, 0.1, 0.34)
                .spin(0.1, 1.0),
            CelestialBody::moon("Iapetus", "Saturn", 735.0)
                .orbit(79.32, 3000.0, 0.1, 15.47)
                .spin(0.1, 1.0),
            CelestialBody::planet("Uranus", SUN, 25_362.0)
                .orbit(30_589.0, 19.1818, 0.0472, 0.0)
                .spin(-0.718, 97.722)
                .ring(67_500.0, 97_000.0, "res/uranus/ring.png"),
            CelestialBody::moon("Titania", "Uranus", 788.0)
                .orbit(8.71, 1130.0, 0.1, 0.34)
                .spin(0.1, 1.0),
            CelestialBody::moon("Oberon", "Uranus", 761.0)
                .orbit(13.46, 1520.0, 0.1, 0.34)
                .spin(0.1, 1.0),
            CelestialBody::moon("Umbriel", "Uranus", 584.0)
                .orbit(4.1, 690.0, 0.1, 0.01)
                .spin(0.1, 1.0),
            CelestialBody::moon("Ariel", "Uranus", 578.0)
                .orbit(2.52, 500.0, 0.1, 0.01)
                .spin(0.1, 1.0),
            CelestialBody::planet("Neptune", SUN, 24_622.0)
                .orbit(59_800.0, 30.0685, 0.0097, 0.0)
                .spin(0.67, 28.3),
            CelestialBody::moon("Triton", "Neptune", 1353.0)
                .orbit(5.88, 920.0, 0.1, 157.0)
                .spin(0.1, 1.0),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Index into [`Catalog::bodies`]
    pub body: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Hops to the star
    pub depth: usize,
}

/// Arena view of a validated catalog; indices match [`Catalog::bodies`].
#[derive(Debug, Clone)]
pub struct BodyTree {
    nodes: Vec<TreeNode>,
    root: usize,
}

impl BodyTree {
    /// Index of the star
    pub fn root(&self) -> usize {
        self.root
    }

    pub fn node(&self, idx: usize) -> &TreeNode {
        &self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Breadth-first from the star: every parent comes before its children
    pub fn topological(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        order.push(self.root);

        let mut cursor = 0;
        while cursor < order.len() {
            let idx = order[cursor];
            order.extend(self.nodes[idx].children.iter().copied());
            cursor += 1;
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn small() -> Vec<CelestialBody> {
        vec![
            CelestialBody::star("Sun", 1.0),
            CelestialBody::planet("Earth", "Sun", 1.0).orbit(365.0, 1.0, 0.0, 0.0),
            CelestialBody::moon("Moon", "Earth", 1.0).orbit(27.0, 200.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn solar_system_is_a_shallow_tree() {
        let catalog = Catalog::solar_system();
        let tree = catalog.tree().unwrap();

        assert_eq!(tree.len(), catalog.len());
        assert_eq!(catalog.bodies[tree.root()].name, "Sun");
        assert_eq!(tree.max_depth(), 2);
    }

    #[test]
    fn solar_system_has_ringed_planets() {
        let catalog = Catalog::solar_system();

        let ringed: Vec<_> = catalog
            .iter()
            .filter(|body| body.ring.is_some())
            .map(|body| body.name.as_str())
            .collect();

        assert_eq!(ringed, ["Saturn", "Uranus"]);
    }

    #[test]
    fn default_material_follows_name() {
        let body = CelestialBody::planet("Mars", "Sun", 1.0);

        assert_eq!(body.material, "res/mars/diffuse.jpg");
    }

    #[test_case("Io", "res/io/diffuse.png")]
    #[test_case("Europa", "res/europa/diffuse.jpg")]
    #[test_case("Sun", "res/sun/8k_sun.jpg")]
    fn solar_system_materials(name: &str, material: &str) {
        let catalog = Catalog::solar_system();

        assert_eq!(catalog.get(name).unwrap().material, material);
    }

    #[test]
    fn unknown_body_is_absent() {
        assert!(Catalog::solar_system().get("Vulcan").is_none());
    }

    #[test]
    fn topological_order_puts_parents_first() {
        let catalog = Catalog::solar_system();
        let tree = catalog.tree().unwrap();
        let order = tree.topological();

        assert_eq!(order.len(), catalog.len());

        for (pos, &idx) in order.iter().enumerate() {
            if let Some(parent) = tree.node(idx).parent {
                let parent_pos = order.iter().position(|&i| i == parent).unwrap();
                assert!(parent_pos < pos);
            }
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut bodies = small();
        bodies.push(CelestialBody::moon("Moon", "Earth", 2.0));

        let err = Catalog::new(bodies).tree().unwrap_err();

        assert_eq!(
            err,
            SceneError::DuplicateName {
                name: "Moon".to_owned()
            }
        );
    }

    #[test]
    fn dangling_parent_is_reported() {
        let mut bodies = small();
        bodies.push(CelestialBody::moon("Phobos", "Mars", 2.0));

        let err = Catalog::new(bodies).tree().unwrap_err();

        assert_eq!(
            err,
            SceneError::MissingParent {
                body: "Phobos".to_owned(),
                parent: "Mars".to_owned(),
            }
        );
    }

    #[test]
    fn star_is_required() {
        let err = Catalog::new(small()[1..].to_vec()).tree().unwrap_err();

        assert_eq!(err, SceneError::StarCount { found: 0 });
    }

    #[test]
    fn parent_cycle_is_rejected() {
        let mut bodies = small();
        bodies.push(CelestialBody::moon("A", "B", 1.0));
        bodies.push(CelestialBody::moon("B", "A", 1.0));

        let err = Catalog::new(bodies).tree().unwrap_err();

        assert_eq!(err.body(), Some("A"));
    }
}
