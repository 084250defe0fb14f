//! Movement domain: debug-only test course.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground, Ledge, Wall};
use crate::respawn::{CheckpointRegistry, CheckpointVolume, DeathZone, ExposureZone, HeatSource};
use crate::ui::TooltipVolume;

/// Surface role of a course block.
#[derive(Clone, Copy)]
enum Block {
    Ground,
    Wall,
    /// Standable and graspable
    Ledge,
}

fn spawn_block(
    commands: &mut Commands,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    block: Block,
    center: Vec3,
    size: Vec3,
) {
    let mut entity = commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(center),
        RigidBody::Static,
        Collider::cuboid(size.x, size.y, size.z),
    ));

    match block {
        Block::Ground => {
            entity.insert((
                Ground,
                CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
            ));
        }
        Block::Wall => {
            entity.insert((
                Wall,
                CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]),
            ));
        }
        Block::Ledge => {
            entity.insert((
                Ground,
                Ledge,
                CollisionLayers::new([GameLayer::Ground, GameLayer::Ledge], [GameLayer::Player]),
            ));
        }
    }
}

fn sensor_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player])
}

/// Lay out a straight course along -Z: start pad, wall-run gap, crouch tunnel,
/// ledge climb, a heated hut and a cold stretch. A death plane sits underneath.
pub(crate) fn spawn_test_course(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_color = materials.add(Color::srgb(0.4, 0.5, 0.4));
    let wall_color = materials.add(Color::srgb(0.3, 0.3, 0.4));
    let ledge_color = materials.add(Color::srgb(0.5, 0.4, 0.3));
    let heat_color = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 0.5, 0.1, 0.3),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    let blocks = [
        // Start pad
        (Block::Ground, Vec3::new(0.0, -0.5, -10.0), Vec3::new(12.0, 1.0, 30.0)),
        // Wall-run gap: two walls across a pit
        (Block::Wall, Vec3::new(-4.0, 2.0, -40.0), Vec3::new(1.0, 8.0, 30.0)),
        (Block::Wall, Vec3::new(4.0, 2.0, -40.0), Vec3::new(1.0, 8.0, 30.0)),
        // Landing pad with a low crouch tunnel
        (Block::Ground, Vec3::new(0.0, -0.5, -70.0), Vec3::new(12.0, 1.0, 30.0)),
        (Block::Wall, Vec3::new(0.0, 2.25, -65.0), Vec3::new(6.0, 1.5, 6.0)),
        // Ledge climb
        (Block::Ledge, Vec3::new(0.0, 1.0, -88.0), Vec3::new(12.0, 3.0, 6.0)),
        (Block::Ground, Vec3::new(0.0, 2.0, -106.0), Vec3::new(12.0, 1.0, 30.0)),
        // Cold stretch
        (Block::Ground, Vec3::new(0.0, 2.0, -140.0), Vec3::new(12.0, 1.0, 40.0)),
    ];

    for (kind, center, size) in blocks {
        let material = match kind {
            Block::Ground => ground_color.clone(),
            Block::Wall => wall_color.clone(),
            Block::Ledge => ledge_color.clone(),
        };
        let mesh = meshes.add(Cuboid::new(size.x, size.y, size.z));
        spawn_block(&mut commands, mesh, material, kind, center, size);
    }

    // Level start plus two checkpoints
    let mut registry = CheckpointRegistry::new(Vec3::new(0.0, 1.0, 0.0));
    for point in [Vec3::new(0.0, 1.0, -62.0), Vec3::new(0.0, 3.5, -100.0)] {
        let ordinal = registry.register(point);
        commands.spawn((
            CheckpointVolume { ordinal },
            Transform::from_translation(point),
            Sensor,
            RigidBody::Static,
            Collider::cuboid(12.0, 4.0, 2.0),
            sensor_layers(),
        ));
    }
    info!("Test course ready with {} respawn points", registry.len());
    commands.insert_resource(registry);

    // Tutorial tooltips ahead of each obstacle
    let tooltips = [
        (0, Vec3::new(0.0, 1.0, -4.0)),
        (3, Vec3::new(0.0, 1.0, -14.0)),
        (5, Vec3::new(0.0, 1.0, -22.0)),
        (1, Vec3::new(0.0, 1.0, -58.0)),
        (2, Vec3::new(0.0, 1.0, -80.0)),
        (6, Vec3::new(0.0, 3.5, -117.0)),
    ];
    for (index, point) in tooltips {
        commands.spawn((
            TooltipVolume { index },
            Transform::from_translation(point),
            Sensor,
            RigidBody::Static,
            Collider::cuboid(12.0, 3.0, 3.0),
            sensor_layers(),
        ));
    }

    // Death plane
    commands.spawn((
        DeathZone,
        Transform::from_xyz(0.0, -20.0, -80.0),
        Sensor,
        RigidBody::Static,
        Collider::cuboid(200.0, 2.0, 300.0),
        sensor_layers(),
    ));

    // Doorway that toggles cold exposure, followed by a heated hut
    commands.spawn((
        ExposureZone,
        Transform::from_xyz(0.0, 3.5, -122.0),
        Sensor,
        RigidBody::Static,
        Collider::cuboid(12.0, 3.0, 1.0),
        sensor_layers(),
    ));
    commands.spawn((
        HeatSource,
        Mesh3d(meshes.add(Cuboid::new(4.0, 3.0, 4.0))),
        MeshMaterial3d(heat_color),
        Transform::from_xyz(0.0, 4.0, -150.0),
        Sensor,
        RigidBody::Static,
        Collider::cuboid(4.0, 3.0, 4.0),
        sensor_layers(),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
