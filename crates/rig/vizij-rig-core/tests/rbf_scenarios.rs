use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use approx::assert_relative_eq;
use vizij_rig_core::math::rotation::quat_dot;
use vizij_rig_core::rbf::{RbfCacheState, RbfInterpolator};
use vizij_rig_core::{
    rbf_interpolate, DistanceMetric, KernelType, Quat, RbfSettings, RbfSolveMode, RbfTarget,
    RbfWorkData, Transform, Vec3,
};

fn about_z(angle: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::z_axis(), angle)
}

fn arc_settings() -> RbfSettings {
    RbfSettings {
        distance: DistanceMetric::ArcLength,
        kernel: KernelType::Gaussian,
        smoothing_angle: 45.0,
        ..RbfSettings::default()
    }
}

#[test]
fn halfway_rotation_blends_halfway_value() {
    let targets = vec![
        RbfTarget::new(Quat::identity(), 0.0f32),
        RbfTarget::new(about_z(FRAC_PI_2), 1.0),
    ];
    let mut work = RbfWorkData::new();
    let out = rbf_interpolate(&targets, &about_z(FRAC_PI_4), &arc_settings(), &mut work);
    assert_relative_eq!(out, 0.5, epsilon = 1e-4);
}

#[test]
fn exact_key_match_dominates_with_compact_kernel() {
    // Keys farther apart than sigma contribute nothing under a compact kernel.
    let settings = RbfSettings {
        kernel: KernelType::Quintic,
        smoothing_angle: 30.0,
        ..arc_settings()
    };
    let targets = vec![
        RbfTarget::new(Quat::identity(), 3.0f32),
        RbfTarget::new(about_z(FRAC_PI_2), 7.0),
        RbfTarget::new(Quat::from_axis_angle(&Vec3::x_axis(), FRAC_PI_2), 11.0),
    ];
    let mut work = RbfWorkData::new();
    for target in &targets {
        let out = rbf_interpolate(&targets, &target.key, &settings, &mut work);
        assert_relative_eq!(out, target.value, epsilon = 1e-5);
    }
}

#[test]
fn rotation_output_matches_target_rotation() {
    let pose = Quat::from_euler_angles(0.3, 0.2, -0.4);
    let targets = vec![
        RbfTarget::new(Quat::identity(), Quat::identity()),
        RbfTarget::new(about_z(FRAC_PI_2), pose),
    ];
    let settings = RbfSettings {
        kernel: KernelType::Cubic,
        ..arc_settings()
    };
    let mut work = RbfWorkData::new();
    let out = rbf_interpolate(&targets, &about_z(FRAC_PI_2), &settings, &mut work);
    assert_relative_eq!(quat_dot(&out, &pose).abs(), 1.0, epsilon = 1e-6);
}

#[test]
fn transform_output_blends_channels() {
    let targets = vec![
        RbfTarget::new(Vec3::zeros(), Transform::identity()),
        RbfTarget::new(
            Vec3::new(2.0, 0.0, 0.0),
            Transform::new(Vec3::new(0.0, 4.0, 0.0), about_z(1.0), Vec3::new(3.0, 3.0, 3.0)),
        ),
    ];
    let settings = RbfSettings {
        kernel: KernelType::Linear,
        smoothing_radius: 4.0,
        ..RbfSettings::default()
    };
    let mut work = RbfWorkData::new();
    let out = rbf_interpolate(&targets, &Vec3::new(1.0, 0.0, 0.0), &settings, &mut work);
    assert_relative_eq!(out.translation, Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-5);
    assert_relative_eq!(out.scale, Vec3::new(2.0, 2.0, 2.0), epsilon = 1e-5);
    assert_relative_eq!(out.rotation.angle(), 0.5, epsilon = 1e-4);
}

#[test]
fn empty_target_list_is_neutral() {
    let mut work = RbfWorkData::<Vec3>::new();
    let settings = RbfSettings::default();
    let targets: Vec<RbfTarget<Vec3, Transform>> = Vec::new();
    let out = rbf_interpolate(&targets, &Vec3::x(), &settings, &mut work);
    assert_eq!(out, Transform::identity());

    let interp = RbfInterpolator::build(Vec::<Vec3>::new(), settings.weight_fn::<Vec3>());
    assert!(interp.interpolate(&Vec3::x(), true, true).is_empty());
}

#[test]
fn animated_keys_switch_cache_to_rebuild() {
    let settings = arc_settings();
    let mut work = RbfWorkData::new();
    let mut targets = vec![
        RbfTarget::new(Quat::identity(), 0.0f32),
        RbfTarget::new(about_z(FRAC_PI_2), 1.0),
    ];

    rbf_interpolate(&targets, &Quat::identity(), &settings, &mut work);
    rbf_interpolate(&targets, &Quat::identity(), &settings, &mut work);
    assert_eq!(work.state(), RbfCacheState::Cached);
    assert_eq!(work.metrics().builds, 1);

    targets[1].key = about_z(1.0);
    let out = rbf_interpolate(&targets, &about_z(0.5), &settings, &mut work);
    assert_relative_eq!(out, 0.5, epsilon = 1e-4);
    assert_eq!(work.state(), RbfCacheState::AlwaysRebuild);

    rbf_interpolate(&targets, &Quat::identity(), &settings, &mut work);
    assert_eq!(work.metrics().builds, 3);
}

#[test]
fn exact_mode_falls_back_for_duplicate_keys() {
    let settings = RbfSettings {
        solve_mode: RbfSolveMode::Exact,
        ..arc_settings()
    };
    let targets = vec![
        RbfTarget::new(Quat::identity(), 1.0f32),
        RbfTarget::new(Quat::identity(), 3.0),
    ];
    let mut work = RbfWorkData::new();
    let out = rbf_interpolate(&targets, &Quat::identity(), &settings, &mut work);
    assert_relative_eq!(out, 2.0, epsilon = 1e-5);
    let interp = work.interpolator().expect("built");
    assert_eq!(interp.solve_mode(), RbfSolveMode::Direct);
}

#[test]
fn twist_metric_ignores_swing() {
    let settings = RbfSettings {
        distance: DistanceMetric::TwistAngle,
        twist_axis: Vec3::x(),
        ..arc_settings()
    };
    let targets = vec![
        RbfTarget::new(Quat::identity(), 0.0f32),
        RbfTarget::new(Quat::from_axis_angle(&Vec3::x_axis(), FRAC_PI_2), 1.0),
    ];
    let mut work = RbfWorkData::new();
    // Pure swing about Y keeps the twist at zero, so the identity target wins.
    let swung = Quat::from_axis_angle(&Vec3::y_axis(), 1.2);
    let twisted_only = rbf_interpolate(&targets, &Quat::identity(), &settings, &mut work);
    let swung_out = rbf_interpolate(&targets, &swung, &settings, &mut work);
    assert_relative_eq!(swung_out, twisted_only, epsilon = 1e-4);
}
