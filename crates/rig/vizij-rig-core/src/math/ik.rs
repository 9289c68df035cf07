//! Analytic two-bone IK.
//!
//! The chain is root (bone A) → elbow (bone B) → effector. The solver places
//! the elbow in the plane spanned by the root→effector line and the pole
//! target, optionally stretches both bones, and then aims each bone's primary
//! axis at its child with a weighted secondary-axis twist toward the pole side.

use serde::{Deserialize, Serialize};

use super::rotation::{find_quat_between_normals, is_nearly_zero, safe_normalize, slerp_quat};
use super::tolerance::{LENGTH_EPSILON, SMALL_NUMBER};
use crate::value::{Quat, Transform, Vec3};

/// Inputs for [`solve_basic_two_bone_ik`]. Transforms are in a common space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoBoneIk {
    pub root: Transform,
    pub elbow: Transform,
    pub effector: Transform,
    /// Position the elbow bends toward.
    pub pole_vector: Vec3,
    /// Bone-local axis aimed at the child joint.
    pub primary_axis: Vec3,
    /// Bone-local axis turned toward the pole side.
    pub secondary_axis: Vec3,
    pub secondary_axis_weight: f32,
    /// Lengths at or below `LENGTH_EPSILON` are measured from the input pose.
    pub bone_a_length: f32,
    pub bone_b_length: f32,
    pub enable_stretch: bool,
    /// Reach ratio (distance / chain length) where stretching begins.
    pub stretch_start_ratio: f32,
    /// Largest allowed scale of the chain.
    pub stretch_max_ratio: f32,
}

impl Default for TwoBoneIk {
    fn default() -> Self {
        Self {
            root: Transform::identity(),
            elbow: Transform::identity(),
            effector: Transform::identity(),
            pole_vector: Vec3::z(),
            primary_axis: Vec3::x(),
            secondary_axis: Vec3::y(),
            secondary_axis_weight: 1.0,
            bone_a_length: 0.0,
            bone_b_length: 0.0,
            enable_stretch: false,
            stretch_start_ratio: 0.75,
            stretch_max_ratio: 1.25,
        }
    }
}

impl TwoBoneIk {
    #[inline]
    pub fn solve(&self) -> TwoBoneIkResult {
        solve_basic_two_bone_ik(self)
    }
}

/// Solved chain. Effector rotation and all scales are passed through.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TwoBoneIkResult {
    pub root: Transform,
    pub elbow: Transform,
    pub effector: Transform,
}

/// Solve the chain without mutating the input.
pub fn solve_basic_two_bone_ik(ik: &TwoBoneIk) -> TwoBoneIkResult {
    let root_pos = ik.root.translation;
    let upper = resolve_length(ik.bone_a_length, &root_pos, &ik.elbow.translation);
    let lower = resolve_length(ik.bone_b_length, &ik.elbow.translation, &ik.effector.translation);

    let (elbow_pos, effector_pos) = solve_joint_positions(
        &root_pos,
        &ik.elbow.translation,
        &ik.pole_vector,
        &ik.effector.translation,
        upper,
        lower,
        ik.enable_stretch.then_some((ik.stretch_start_ratio, ik.stretch_max_ratio)),
    );

    let mut root = ik.root;
    let elbow_in = ik.elbow.with_translation(elbow_pos);
    let mut elbow = elbow_in;
    let effector = ik.effector.with_translation(effector_pos);

    // Secondary target shared by both bones: the elbow's offset from the
    // midpoint of the root→effector line.
    let bend_target = elbow_pos - (effector_pos + root_pos) * 0.5;

    root.rotation = aim_bone(
        &root,
        &(elbow_pos - root_pos),
        &bend_target,
        &ik.primary_axis,
        &ik.secondary_axis,
        ik.secondary_axis_weight,
    );
    elbow.rotation = aim_bone(
        &elbow_in,
        &(effector_pos - elbow_pos),
        &bend_target,
        &ik.primary_axis,
        &ik.secondary_axis,
        ik.secondary_axis_weight,
    );

    TwoBoneIkResult {
        root,
        elbow,
        effector,
    }
}

fn resolve_length(supplied: f32, from: &Vec3, to: &Vec3) -> f32 {
    if supplied > LENGTH_EPSILON {
        supplied
    } else {
        (to - from).norm()
    }
}

/// Rotate `bone` so its primary axis points along `aim`, then turn its
/// secondary axis toward `bend` (projected off the aim direction). Steps
/// with a near-zero direction are skipped.
fn aim_bone(
    bone: &Transform,
    aim: &Vec3,
    bend: &Vec3,
    primary_axis: &Vec3,
    secondary_axis: &Vec3,
    weight: f32,
) -> Quat {
    let mut rotation = bone.rotation;
    let axis = rotation * primary_axis;
    if is_nearly_zero(aim) || is_nearly_zero(&axis) {
        return rotation;
    }
    let aim_dir = aim.normalize();
    let primary = find_quat_between_normals(&axis.normalize(), &aim_dir);
    rotation = Quat::new_normalize((primary * rotation).into_inner());

    if weight <= SMALL_NUMBER {
        return rotation;
    }
    let axis = rotation * secondary_axis;
    if is_nearly_zero(bend) || is_nearly_zero(&axis) {
        return rotation;
    }
    let bend_dir = safe_normalize(&(bend - aim_dir * bend.dot(&aim_dir)));
    let mut secondary = find_quat_between_normals(&axis.normalize(), &bend_dir);
    if (weight - 1.0).abs() > SMALL_NUMBER {
        secondary = slerp_quat(&Quat::identity(), &secondary, weight.clamp(0.0, 1.0));
    }
    Quat::new_normalize((secondary * rotation).into_inner())
}

/// Planar triangle solve. Returns `(elbow, effector)` positions.
fn solve_joint_positions(
    root: &Vec3,
    elbow: &Vec3,
    pole: &Vec3,
    target: &Vec3,
    mut upper: f32,
    mut lower: f32,
    stretch: Option<(f32, f32)>,
) -> (Vec3, Vec3) {
    let delta = target - root;
    let mut desired_len = delta.norm();
    let desired_dir = if desired_len < LENGTH_EPSILON {
        desired_len = LENGTH_EPSILON;
        Vec3::x()
    } else {
        delta / desired_len
    };

    let bend_dir = bend_direction(&desired_dir, &(pole - root));

    let mut max_len = upper + lower;
    if let Some((start_ratio, max_ratio)) = stretch {
        let range = max_ratio - start_ratio;
        if range > LENGTH_EPSILON && max_len > LENGTH_EPSILON {
            let reach = desired_len / max_len;
            let scale = (max_ratio - 1.0) * ((reach - start_ratio) / range).clamp(0.0, 1.0);
            if scale > LENGTH_EPSILON {
                upper *= 1.0 + scale;
                lower *= 1.0 + scale;
                max_len *= 1.0 + scale;
            }
        }
    }

    if desired_len >= max_len {
        return (root + desired_dir * upper, root + desired_dir * max_len);
    }
    if upper <= LENGTH_EPSILON {
        return (*elbow, *target);
    }

    let cos_angle = (upper * upper + desired_len * desired_len - lower * lower)
        / (2.0 * upper * desired_len);
    let angle = cos_angle.clamp(-1.0, 1.0).acos();
    let line_dist = upper * angle.sin();
    let proj_sq = upper * upper - line_dist * line_dist;
    let mut proj = if proj_sq > 0.0 { proj_sq.sqrt() } else { 0.0 };
    if cos_angle < 0.0 {
        proj = -proj;
    }
    (root + desired_dir * proj + bend_dir * line_dist, *target)
}

/// Unit direction, perpendicular to `dir`, that the elbow bends toward.
fn bend_direction(dir: &Vec3, pole_delta: &Vec3) -> Vec3 {
    if pole_delta.norm() < LENGTH_EPSILON {
        return Vec3::y();
    }
    let plane_normal = dir.cross(pole_delta);
    if plane_normal.norm() < LENGTH_EPSILON {
        // Pole is on the reach line; any perpendicular will do.
        let seed = if dir.z.abs() > dir.x.abs() && dir.z.abs() > dir.y.abs() {
            Vec3::x()
        } else {
            Vec3::z()
        };
        let normal = safe_normalize(&(seed - dir * seed.dot(dir)));
        return normal.cross(dir);
    }
    (pole_delta - dir * pole_delta.dot(dir)).normalize()
}
