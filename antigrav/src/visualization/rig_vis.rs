use bevy::prelude::*;

use crate::rig::skeleton::{Finish, Joint, JointName, Primitive};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{FVec2, FVec3};
use crate::visualization::field_vis::PointerNdc;

/// Tags the entity that carries a joint's transform
#[derive(Component)]
pub(crate) struct RigJoint(pub JointName);

/// Speech bubble shown while the robot waves
#[derive(Component)]
pub(crate) struct SpeechLabel;

/// One shared material per finish
struct FinishMaterials {
    chrome: Handle<StandardMaterial>,
    dark_chrome: Handle<StandardMaterial>,
    gloss_black: Handle<StandardMaterial>,
    white: Handle<StandardMaterial>,
    steel: Handle<StandardMaterial>,
}

impl FinishMaterials {
    fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        Self {
            chrome: materials.add(StandardMaterial {
                base_color: Color::WHITE,
                metallic: 1.0,
                perceptual_roughness: 0.15,
                ..Default::default()
            }),
            dark_chrome: materials.add(StandardMaterial {
                base_color: Color::srgb(0.267, 0.267, 0.267),
                metallic: 1.0,
                perceptual_roughness: 0.2,
                ..Default::default()
            }),
            gloss_black: materials.add(StandardMaterial {
                base_color: Color::BLACK,
                perceptual_roughness: 0.0,
                ..Default::default()
            }),
            white: materials.add(StandardMaterial {
                base_color: Color::WHITE,
                unlit: true,
                ..Default::default()
            }),
            steel: materials.add(StandardMaterial {
                base_color: Color::srgb(0.533, 0.533, 0.533),
                metallic: 0.8,
                ..Default::default()
            }),
        }
    }

    fn get(&self, finish: Finish) -> Handle<StandardMaterial> {
        match finish {
            Finish::Chrome => self.chrome.clone(),
            Finish::DarkChrome => self.dark_chrome.clone(),
            Finish::GlossBlack => self.gloss_black.clone(),
            Finish::White => self.white.clone(),
            Finish::Steel => self.steel.clone(),
        }
    }
}

fn euler(r: FVec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
}

fn part_mesh(primitive: Primitive) -> Mesh {
    match primitive {
        Primitive::Sphere { radius } => Mesh::from(Sphere::new(radius)),
        // bevy cylinders have one radius; the wider end wins
        Primitive::Cylinder { radius_top, radius_bottom, height } => {
            Mesh::from(Cylinder::new(radius_top.max(radius_bottom), height))
        }
        Primitive::Capsule { radius, length } => Mesh::from(Capsule3d::new(radius, length)),
        Primitive::Cuboid { x, y, z } => Mesh::from(Cuboid::new(x, y, z)),
    }
}

/// Spawn a joint entity, its parts as children, then its child joints
fn spawn_joint(parent: &mut ChildBuilder, joint: &Joint, meshes: &mut Assets<Mesh>, finishes: &FinishMaterials) {
    let transform = Transform::from_xyz(joint.offset.x, joint.offset.y, joint.offset.z)
        .with_rotation(euler(joint.rotation));

    parent
        .spawn((SpatialBundle::from_transform(transform), RigJoint(joint.name)))
        .with_children(|node| {
            for part in &joint.parts {
                node.spawn(PbrBundle {
                    mesh: meshes.add(part_mesh(part.primitive)),
                    material: finishes.get(part.finish),
                    transform: Transform::from_xyz(part.offset.x, part.offset.y, part.offset.z)
                        .with_rotation(euler(part.rotation)),
                    ..Default::default()
                });
            }
            for child in &joint.children {
                spawn_joint(node, child, meshes, finishes);
            }
        });
}

/// Startup system: lights, the robot hierarchy and its (hidden) speech bubble
pub(crate) fn setup_rig(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
    });

    // Cool key light from above right, warm fill from the left
    commands.spawn(SpotLightBundle {
        spot_light: SpotLight {
            color: Color::srgb(0.267, 0.667, 1.0),
            intensity: 2_000_000.0,
            outer_angle: 0.3,
            ..Default::default()
        },
        transform: Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });
    commands.spawn(SpotLightBundle {
        spot_light: SpotLight {
            color: Color::srgb(1.0, 0.267, 0.667),
            intensity: 1_000_000.0,
            outer_angle: 0.3,
            ..Default::default()
        },
        transform: Transform::from_xyz(-5.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 200_000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, 0.0, 3.0),
        ..Default::default()
    });

    let finishes = FinishMaterials::new(&mut materials);
    let p = scenario.companion_position;
    let root = &scenario.companion.skeleton.root;

    commands
        .spawn(SpatialBundle::from_transform(Transform::from_xyz(p.x, p.y, p.z)))
        .with_children(|parent| spawn_joint(parent, root, &mut meshes, &finishes));

    let bubble = TextBundle::from_section(
        scenario.companion.params.label.clone(),
        TextStyle {
            font_size: 28.0,
            color: Color::WHITE,
            ..Default::default()
        },
    )
    .with_style(Style {
        position_type: PositionType::Absolute,
        top: Val::Px(40.0),
        right: Val::Px(60.0),
        ..Default::default()
    });
    commands.spawn((
        TextBundle {
            visibility: Visibility::Hidden,
            ..bubble
        },
        SpeechLabel,
    ));
}

/// Left click makes the robot wave
pub(crate) fn wave_input(time: Res<Time>, mouse: Res<ButtonInput<MouseButton>>, mut scenario: ResMut<Scenario>) {
    if mouse.just_pressed(MouseButton::Left) {
        let now = time.elapsed_seconds();
        scenario.companion.trigger_wave(now);
        info!("companion waves at t={now:.2}");
    }
}

pub(crate) fn rig_step(time: Res<Time>, pointer: Res<PointerNdc>, mut scenario: ResMut<Scenario>) {
    scenario
        .companion
        .tick(time.elapsed_seconds(), FVec2::new(pointer.0.x, pointer.0.y));
}

pub(crate) fn sync_rig_joints(scenario: Res<Scenario>, mut joints: Query<(&RigJoint, &mut Transform)>) {
    let skeleton = &scenario.companion.skeleton;
    for (RigJoint(name), mut transform) in &mut joints {
        transform.rotation = euler(skeleton.rotation(*name));
    }
}

pub(crate) fn update_speech_label(
    time: Res<Time>,
    scenario: Res<Scenario>,
    mut labels: Query<&mut Visibility, With<SpeechLabel>>,
) {
    let shown = scenario.companion.label(time.elapsed_seconds()).is_some();
    for mut visibility in &mut labels {
        let wanted = if shown { Visibility::Inherited } else { Visibility::Hidden };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}
