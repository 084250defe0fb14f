//! Look domain: camera rig spawning, per-frame rig updates and cursor capture.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::core::ControlScheme;
use crate::look::rig::{LookRig, LookTuning};
use crate::movement::{LocomotionSnapshot, MovementInput, Player};

/// Yaw pivot above the capsule center
#[derive(Component, Debug)]
pub struct LookNeck;

/// Pitch pivot, offset for slide and wall-run poses
#[derive(Component, Debug)]
pub struct LookHead;

/// Camera holder carrying roll and head-bob
#[derive(Component, Debug)]
pub struct LookEyes;

/// Build the neck/head/eyes chain under a freshly spawned player.
pub(crate) fn attach_look_rig(
    mut commands: Commands,
    tuning: Res<LookTuning>,
    players: Query<Entity, Added<Player>>,
) {
    for player in &players {
        commands
            .entity(player)
            .insert(LookRig::default())
            .with_children(|body| {
                body.spawn((LookNeck, Transform::from_xyz(0.0, tuning.eye_height, 0.0)))
                    .with_children(|neck| {
                        neck.spawn((LookHead, Transform::default()))
                            .with_children(|head| {
                                head.spawn((LookEyes, Camera3d::default(), Transform::default()));
                            });
                    });
            });
        debug!("Look rig attached to {:?}", player);
    }
}

pub(crate) fn apply_look(
    time: Res<Time>,
    input: Res<MovementInput>,
    scheme: Res<ControlScheme>,
    tuning: Res<LookTuning>,
    mut players: Query<(&mut Transform, &mut LookRig, &LocomotionSnapshot), With<Player>>,
    mut necks: Query<
        &mut Transform,
        (With<LookNeck>, Without<Player>, Without<LookHead>, Without<LookEyes>),
    >,
    mut heads: Query<
        &mut Transform,
        (With<LookHead>, Without<Player>, Without<LookNeck>, Without<LookEyes>),
    >,
    mut eyes: Query<
        &mut Transform,
        (With<LookEyes>, Without<Player>, Without<LookNeck>, Without<LookHead>),
    >,
) {
    let dt = time.delta_secs();
    let Ok((mut body, mut rig, snapshot)) = players.single_mut() else {
        return;
    };

    let body_yaw = rig.advance(input.look, snapshot, *scheme, dt, &tuning);
    if body_yaw != 0.0 {
        body.rotate_y(body_yaw.to_radians());
    }

    for mut neck in &mut necks {
        neck.rotation = rig.neck_rotation();
    }
    for mut head in &mut heads {
        head.translation = rig.head_offset;
        head.rotation = rig.head_rotation();
    }
    for mut eye in &mut eyes {
        eye.rotation = rig.eye_rotation();
        eye.translation = snapshot.eye_offset.extend(0.0);
    }
}

pub(crate) fn grab_cursor(mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    for mut cursor in &mut cursors {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

pub(crate) fn release_cursor(mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    for mut cursor in &mut cursors {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}
