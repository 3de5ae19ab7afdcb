use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::window::PrimaryWindow;

use crate::simulation::scenario::Scenario;
use crate::simulation::states::{FVec2, FrameInput, Viewport};
use crate::visualization::rig_vis::{setup_rig, sync_rig_joints, rig_step, update_speech_label, wave_input};

/// Tags the single point-list entity holding every particle
#[derive(Component)]
struct ParticleCloud;

/// Tags the "<mode> animation" text in the corner
#[derive(Component)]
struct ModeLabel;

/// Flat copy of the particle positions, reused every frame for the upload
#[derive(Resource, Default)]
struct UploadBuffer(Vec<[f32; 3]>);

/// Pointer in normalized device coordinates, +Y up; (0, 0) until the cursor enters
#[derive(Resource, Default, Clone, Copy)]
pub(crate) struct PointerNdc(pub Vec2);

/// Entry point: open the window and run the field + companion until closed
pub fn run(scenario: Scenario) {
    App::new()
        .insert_resource(scenario)
        .init_resource::<UploadBuffer>()
        .init_resource::<PointerNdc>()
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, (setup_field, setup_rig))
        .add_systems(
            Update,
            (
                track_pointer,
                mode_input,
                field_step,
                sync_field_mesh,
                wave_input,
                rig_step,
                sync_rig_joints,
                update_speech_label,
            )
                .chain(),
        )
        .run();
}

/// Startup system: camera, the particle mesh and the mode label
fn setup_field(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut scenario: ResMut<Scenario>,
    mut upload: ResMut<UploadBuffer>,
) {
    let Scenario { field, viewer, .. } = &mut *scenario;

    info!(
        "starting viewer with {} particles, mode {}",
        field.particles.len(),
        field.mode()
    );

    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..Default::default()
        },
        projection: PerspectiveProjection {
            fov: viewer.fov_degrees.to_radians(),
            ..Default::default()
        }
        .into(),
        transform: Transform::from_xyz(0.0, 0.0, viewer.camera_distance).looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    field.particles.upload_positions(&mut upload.0);
    let colors: Vec<[f32; 4]> = field
        .particles
        .colors()
        .iter()
        .map(|c| [c[0], c[1], c[2], 1.0])
        .collect();
    let normals = vec![[0.0, 0.0, 1.0]; upload.0.len()];

    // Positions are rewritten every frame, so keep the mesh in the main world too
    let mut mesh = Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, upload.0.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(mesh),
            material: materials.add(StandardMaterial {
                base_color: Color::WHITE,
                unlit: true,
                ..Default::default()
            }),
            ..Default::default()
        },
        ParticleCloud,
    ));

    commands.spawn((
        TextBundle::from_section(
            format!("{} animation", field.mode()),
            TextStyle {
                font_size: 16.0,
                color: Color::WHITE,
                ..Default::default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            left: Val::Px(20.0),
            ..Default::default()
        }),
        ModeLabel,
    ));
}

/// Cursor -> NDC, and keep the pointer viewport matched to the window aspect
fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerNdc>,
    mut scenario: ResMut<Scenario>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let (w, h) = (window.width(), window.height());
    if w <= 0.0 || h <= 0.0 {
        return;
    }

    if let Some(pos) = window.cursor_position() {
        // Window coordinates are top-left origin, y down
        pointer.0 = Vec2::new(pos.x / w * 2.0 - 1.0, 1.0 - pos.y / h * 2.0);
    }

    let viewport = Viewport::from_camera(scenario.viewer.camera_distance, scenario.viewer.fov_degrees, w / h);
    scenario.viewport = viewport;
}

/// Space or right click advances the field mode
fn mode_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut scenario: ResMut<Scenario>,
) {
    if keys.just_pressed(KeyCode::Space) || mouse.just_pressed(MouseButton::Right) {
        let mode = scenario.field.advance_mode();
        info!("mode -> {mode}");
    }
}

/// Per-frame field update
fn field_step(time: Res<Time>, pointer: Res<PointerNdc>, mut scenario: ResMut<Scenario>) {
    let input = FrameInput {
        elapsed: time.elapsed_seconds(),
        delta: time.delta_seconds(),
        pointer_ndc: FVec2::new(pointer.0.x, pointer.0.y),
        viewport: scenario.viewport,
    };
    scenario.field.tick(&input);
}

/// Push dirty positions into the mesh and apply the cloud's spin
fn sync_field_mesh(
    mut scenario: ResMut<Scenario>,
    mut upload: ResMut<UploadBuffer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut clouds: Query<(&Handle<Mesh>, &mut Transform), With<ParticleCloud>>,
    mut labels: Query<&mut Text, With<ModeLabel>>,
) {
    let field = &mut scenario.field;

    for (handle, mut transform) in &mut clouds {
        transform.rotation = Quat::from_rotation_y(field.particles.rotation_y);

        if !field.particles.is_dirty() {
            continue;
        }
        field.particles.upload_positions(&mut upload.0);
        if let Some(mesh) = meshes.get_mut(handle) {
            mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, upload.0.clone());
        }
    }

    let caption = format!("{} animation", field.mode());
    for mut text in &mut labels {
        if text.sections[0].value != caption {
            text.sections[0].value = caption.clone();
        }
    }
}
