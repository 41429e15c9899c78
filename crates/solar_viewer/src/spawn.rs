use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_resource::PrimitiveTopology;
use solar_system::{Node, NodeId, Primitive, PrimitiveFactory, Shading};

use crate::body::{OrbitPath, SceneNode, Sky};

const SPHERE_SECTORS: usize = 64;
const SPHERE_STACKS: usize = 32;
const RING_SEGMENTS: usize = 128;

/// Lumens per unit of `star_light_intensity`
const STAR_LUMENS: f32 = 5.0e9;

/// Spawns one entity per scene node, mirroring the scene hierarchy
pub struct Spawner<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
    pub asset_server: &'a AssetServer,
    pub light_range: f32,
    pub entities: Vec<Entity>,
}

impl Spawner<'_, '_, '_> {
    fn sphere(&mut self, radius: f32) -> Handle<Mesh> {
        self.meshes.add(Mesh::from(shape::UVSphere {
            radius,
            sectors: SPHERE_SECTORS,
            stacks: SPHERE_STACKS,
        }))
    }

    fn textured(&mut self, material: &str, shading: Shading) -> Handle<StandardMaterial> {
        let texture: Handle<Image> = self.asset_server.load(material.to_owned());

        let material = match shading {
            Shading::Emissive => StandardMaterial {
                base_color_texture: Some(texture.clone()),
                emissive: Color::WHITE,
                emissive_texture: Some(texture),
                unlit: true,
                ..default()
            },
            Shading::Lambert => StandardMaterial {
                base_color_texture: Some(texture),
                perceptual_roughness: 1.0,
                reflectance: 0.0,
                ..default()
            },
            Shading::Phong => StandardMaterial {
                base_color_texture: Some(texture),
                perceptual_roughness: 0.5,
                reflectance: 0.5,
                ..default()
            },
        };

        self.materials.add(material)
    }
}

impl PrimitiveFactory for Spawner<'_, '_, '_> {
    fn create(&mut self, id: NodeId, node: &Node) {
        let transform = Transform::from_translation(node.translation).with_rotation(node.rotation);

        let mut entity = match &node.primitive {
            Primitive::Pivot => self.commands.spawn(SpatialBundle::from_transform(transform)),
            Primitive::Sphere {
                radius,
                material,
                shading,
            } => {
                let mesh = self.sphere(*radius);
                let material = self.textured(material, *shading);

                let mut entity = self.commands.spawn(PbrBundle {
                    mesh,
                    material,
                    transform,
                    ..default()
                });
                if *shading == Shading::Emissive {
                    entity.insert(NotShadowCaster);
                }
                entity
            }
            Primitive::PointLight { intensity } => self.commands.spawn(PointLightBundle {
                point_light: PointLight {
                    intensity: intensity * STAR_LUMENS,
                    range: self.light_range,
                    shadows_enabled: true,
                    ..default()
                },
                transform,
                ..default()
            }),
            Primitive::Ring {
                inner_radius,
                outer_radius,
                material,
            } => {
                let mesh = self.meshes.add(ring_mesh(*inner_radius, *outer_radius, RING_SEGMENTS));
                let texture = self.asset_server.load(material.to_owned());
                let material = self.materials.add(StandardMaterial {
                    base_color_texture: Some(texture),
                    alpha_mode: AlphaMode::Blend,
                    double_sided: true,
                    cull_mode: None,
                    ..default()
                });

                let mut entity = self.commands.spawn(PbrBundle {
                    mesh,
                    material,
                    transform,
                    ..default()
                });
                entity.insert(NotShadowReceiver);
                entity
            }
            Primitive::OrbitLine { points } => {
                let mut entity = self.commands.spawn(SpatialBundle::from_transform(transform));
                entity.insert(OrbitPath(points.clone()));
                entity
            }
            Primitive::Sky { radius, material } => {
                let mesh = self.sphere(*radius);
                let texture = self.asset_server.load(material.to_owned());
                let material = self.materials.add(StandardMaterial {
                    base_color_texture: Some(texture),
                    unlit: true,
                    cull_mode: None,
                    ..default()
                });

                let mut entity = self.commands.spawn(PbrBundle {
                    mesh,
                    material,
                    transform,
                    ..default()
                });
                entity.insert((Sky, NotShadowCaster, NotShadowReceiver));
                entity
            }
        };

        entity.insert((SceneNode(id), Name::new(node.name.clone())));
        let entity = entity.id();

        if let Some(parent) = node.parent.and_then(|parent| self.entities.get(parent.index())) {
            self.commands.entity(*parent).add_child(entity);
        }

        self.entities.push(entity);
    }
}

/// Flat annulus in the XY plane facing +Z.
///
/// `u` runs from the inner to the outer edge, `v` around the ring.
pub fn annulus(inner: f32, outer: f32, segments: usize) -> (Vec<[f32; 3]>, Vec<[f32; 2]>, Vec<u32>) {
    let segments = segments.max(3);

    let mut positions = Vec::with_capacity(2 * (segments + 1));
    let mut uvs = Vec::with_capacity(2 * (segments + 1));

    for i in 0..=segments {
        let v = i as f32 / segments as f32;
        let dir = glam::Vec2::from_angle(v * std::f32::consts::TAU);

        positions.push((dir * inner).extend(0.0).to_array());
        positions.push((dir * outer).extend(0.0).to_array());
        uvs.push([0.0, v]);
        uvs.push([1.0, v]);
    }

    let mut indices = Vec::with_capacity(6 * segments);
    for i in 0..segments as u32 {
        let inner0 = 2 * i;
        let outer0 = inner0 + 1;
        let inner1 = inner0 + 2;
        let outer1 = inner0 + 3;

        indices.extend([inner0, outer0, outer1, inner0, outer1, inner1]);
    }

    (positions, uvs, indices)
}

fn ring_mesh(inner: f32, outer: f32, segments: usize) -> Mesh {
    let (positions, uvs, indices) = annulus(inner, outer, segments);
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.set_indices(Some(Indices::U32(indices)));

    mesh
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(3)]
    #[test_case(64)]
    #[test_case(128)]
    fn annulus_counts(segments: usize) {
        let (positions, uvs, indices) = annulus(1.0, 2.0, segments);

        assert_eq!(positions.len(), 2 * (segments + 1));
        assert_eq!(uvs.len(), positions.len());
        assert_eq!(indices.len(), 6 * segments);
        assert!(indices.iter().all(|&i| (i as usize) < positions.len()));
    }

    #[test]
    fn annulus_stays_between_radii() {
        let (positions, _, _) = annulus(745.0, 1200.0, 32);

        for [x, y, z] in positions {
            let r = Vec2::new(x, y).length();

            assert_eq!(z, 0.0);
            assert!(r > 744.9 && r < 1200.1, "{r}");
        }
    }

    #[test]
    fn annulus_faces_positive_z() {
        let (positions, _, indices) = annulus(1.0, 2.0, 8);

        for tri in indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| Vec3::from_array(positions[tri[k] as usize]));

            assert!((b - a).cross(c - a).z > 0.0);
        }
    }
}
