//! Inverse and forward solves for the base/shoulder/elbow arm
//!
//! The model is a vertical column of height L1 with a rotating base, a
//! two-link planar arm (L2, L3) in the plane selected by the base angle,
//! and a rigid tool offset forward of and below the wrist.
//!
//! Angles follow these conventions:
//! - shoulder is the pitch of L2 above horizontal
//! - elbow is the bend between L2 and L3, so the forearm pitch is
//!   `shoulder - elbow`
//! - base is the heading of the arm plane, measured from +X toward +Y
//!
//! Unreachable targets are clamped onto the nearest reachable distance and
//! never rejected. [`Kinematics::solve_inverse`] reports when that happened.

use core::f32::consts::PI;

use super::{JointPose, Position};
use crate::config::{ArmGeometry, Calibration};
use crate::math;

/// Lower bound on the shoulder-to-wrist distance
const MIN_DISTANCE: f32 = 0.001;

/// Which of the two elbow configurations IK returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ElbowBranch {
    /// Elbow above the shoulder-wrist line
    #[default]
    Up,
    /// Elbow below the shoulder-wrist line
    Down,
}

/// Whether an inverse solve hit the target or a clamped substitute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reach {
    Exact,
    Clamped,
}

/// Joint solution with its reach status
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InverseSolution {
    pub joints: JointPose,
    pub reach: Reach,
}

/// Kinematics engine
///
/// Holds the immutable link geometry plus the run-time calibration offsets
/// and branch selector.
#[derive(Debug, Clone)]
pub struct Kinematics {
    geometry: ArmGeometry,
    joint_zero: JointPose,
    origin: Position,
    branch: ElbowBranch,
}

impl Kinematics {
    /// Engine with zero offsets and the elbow-up branch
    pub fn new(geometry: ArmGeometry) -> Self {
        Self {
            geometry,
            joint_zero: JointPose::ZERO,
            origin: Position::ORIGIN,
            branch: ElbowBranch::Up,
        }
    }

    /// Engine with the given calibration and branch already applied
    pub fn with_calibration(
        geometry: ArmGeometry,
        calibration: &Calibration,
        branch: ElbowBranch,
    ) -> Self {
        Self {
            geometry,
            joint_zero: calibration.joint_zero(),
            origin: calibration.cartesian_offset(),
            branch,
        }
    }

    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }

    pub fn branch(&self) -> ElbowBranch {
        self.branch
    }

    pub fn set_branch(&mut self, branch: ElbowBranch) {
        self.branch = branch;
    }

    pub fn joint_zero(&self) -> JointPose {
        self.joint_zero
    }

    pub fn set_joint_zero(&mut self, zero: JointPose) {
        self.joint_zero = zero;
    }

    pub fn cartesian_offset(&self) -> Position {
        self.origin
    }

    pub fn set_cartesian_offset(&mut self, offset: Position) {
        self.origin = offset;
    }

    /// Joint angles for a world-frame target, clamping silently
    pub fn inverse(&self, target: Position) -> JointPose {
        self.solve_inverse(target).joints
    }

    /// Joint angles for a world-frame target, with reach status
    pub fn solve_inverse(&self, target: Position) -> InverseSolution {
        let g = &self.geometry;
        let mut reach = Reach::Exact;

        let local = target - self.origin;
        let radial = math::sqrt(local.x * local.x + local.y * local.y);

        let mut r_wc = radial - g.tool_forward;
        if r_wc < 0.0 {
            r_wc = 0.0;
            reach = Reach::Clamped;
        }
        let z_wc = local.z - g.base_height + g.tool_down;

        let raw_distance = math::sqrt(r_wc * r_wc + z_wc * z_wc);
        let distance = raw_distance
            .clamp(g.min_reach(), g.max_reach())
            .max(MIN_DISTANCE);
        if distance != raw_distance {
            reach = Reach::Clamped;
        }

        let (l2, l3) = (g.upper_arm, g.forearm);
        let cos_phi = (l2 * l2 + l3 * l3 - distance * distance) / (2.0 * l2 * l3);
        let phi = math::acos(cos_phi.clamp(-1.0, 1.0));

        let alpha = math::atan2(z_wc, r_wc);
        let cos_beta = (l2 * l2 + distance * distance - l3 * l3) / (2.0 * l2 * distance);
        let beta = math::acos(cos_beta.clamp(-1.0, 1.0));

        let (shoulder, elbow) = match self.branch {
            ElbowBranch::Up => (alpha + beta, PI - phi),
            ElbowBranch::Down => (alpha - beta, phi - PI),
        };
        let base = math::atan2(local.y, local.x);

        InverseSolution {
            joints: JointPose::new(base, shoulder, elbow) - self.joint_zero,
            reach,
        }
    }

    /// World-frame tool position for a joint pose
    pub fn forward(&self, joints: JointPose) -> Position {
        let g = &self.geometry;
        let j = joints + self.joint_zero;

        // Both branches reconstruct to the same forearm pitch
        let forearm = j.shoulder - j.elbow;
        let r_wc = g.upper_arm * math::cos(j.shoulder) + g.forearm * math::cos(forearm);
        let z_wc = g.upper_arm * math::sin(j.shoulder) + g.forearm * math::sin(forearm);

        let radial = r_wc + g.tool_forward;
        let z = z_wc + g.base_height - g.tool_down;

        Position::new(radial * math::cos(j.base), radial * math::sin(j.base), z) + self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f32 = 0.05;

    fn close(a: Position, b: Position) -> bool {
        a.distance(&b) < TOLERANCE
    }

    fn engine(branch: ElbowBranch) -> Kinematics {
        let mut k = Kinematics::new(ArmGeometry::DEFAULT);
        k.set_branch(branch);
        k
    }

    #[test]
    fn test_zero_pose_forward() {
        let k = engine(ElbowBranch::Up);
        // Both links horizontal along +X
        let p = k.forward(JointPose::ZERO);
        assert!(close(p, Position::new(130.0 + 160.0 + 50.0, 0.0, 160.0 - 50.0)));
    }

    #[test]
    fn test_concrete_target() {
        let k = engine(ElbowBranch::Up);
        let target = Position::new(200.0, 0.0, 60.0);
        let solution = k.solve_inverse(target);

        assert_eq!(solution.reach, Reach::Exact);
        assert!(solution.joints.base.abs() < 1e-6);
        assert!(close(k.forward(solution.joints), target));
    }

    /// Forward solve in f64 with the standard library, independent of `math`
    fn reference_forward(j: JointPose) -> (f64, f64, f64) {
        let g = ArmGeometry::DEFAULT;
        let (base, shoulder) = (j.base as f64, j.shoulder as f64);
        let forearm = shoulder - j.elbow as f64;
        let r_wc = g.upper_arm as f64 * shoulder.cos() + g.forearm as f64 * forearm.cos();
        let z_wc = g.upper_arm as f64 * shoulder.sin() + g.forearm as f64 * forearm.sin();
        let radial = r_wc + g.tool_forward as f64;
        (
            radial * base.cos(),
            radial * base.sin(),
            z_wc + g.base_height as f64 - g.tool_down as f64,
        )
    }

    #[test]
    fn test_inverse_lands_on_target() {
        let targets = [
            (200.0, 0.0, 60.0),
            (180.0, 90.0, 140.0),
            (250.0, -120.0, 100.0),
            (300.0, 20.0, 110.0),
        ];
        for branch in [ElbowBranch::Up, ElbowBranch::Down] {
            let k = engine(branch);
            for (x, y, z) in targets {
                let joints = k.inverse(Position::new(x, y, z));
                let (rx, ry, rz) = reference_forward(joints);
                let err = ((rx - x as f64).powi(2) + (ry - y as f64).powi(2) + (rz - z as f64).powi(2))
                    .sqrt();
                assert!(err < 0.05, "({}, {}, {}) off by {} mm", x, y, z, err);
            }
        }
    }

    #[test]
    fn test_branches_are_mirrored() {
        let target = Position::new(180.0, 90.0, 140.0);
        let up = engine(ElbowBranch::Up).inverse(target);
        let down = engine(ElbowBranch::Down).inverse(target);

        assert!(up.elbow > 0.0);
        assert!(down.elbow < 0.0);
        assert!((up.elbow + down.elbow).abs() < 1e-4);
        assert!(up.shoulder > down.shoulder);
        assert!((up.base - down.base).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_reach_is_clamped_to_sphere() {
        let k = engine(ElbowBranch::Up);
        let g = ArmGeometry::DEFAULT;
        let solution = k.solve_inverse(Position::new(1000.0, 0.0, 160.0));
        assert_eq!(solution.reach, Reach::Clamped);

        // Fully extended
        assert!(solution.joints.elbow.abs() < 1e-3);

        let p = k.forward(solution.joints);
        let r_wc = (p.x * p.x + p.y * p.y).sqrt() - g.tool_forward;
        let z_wc = p.z - g.base_height + g.tool_down;
        let d = (r_wc * r_wc + z_wc * z_wc).sqrt();
        assert!((d - g.max_reach()).abs() < TOLERANCE);
    }

    #[test]
    fn test_too_close_is_clamped() {
        let k = engine(ElbowBranch::Up);
        let g = ArmGeometry::DEFAULT;
        // Wrist centre right at the shoulder
        let target = Position::new(g.tool_forward, 0.0, g.base_height - g.tool_down);
        let solution = k.solve_inverse(target);
        assert_eq!(solution.reach, Reach::Clamped);
        assert!(solution.joints.shoulder.is_finite());
        assert!(solution.joints.elbow.is_finite());
    }

    #[test]
    fn test_offsets_applied_symmetrically() {
        let mut k = engine(ElbowBranch::Up);
        k.set_cartesian_offset(Position::new(10.0, -20.0, 5.0));
        k.set_joint_zero(JointPose::new(0.1, -0.05, 0.2));

        let target = Position::new(210.0, 30.0, 90.0);
        let joints = k.inverse(target);
        assert!(close(k.forward(joints), target));

        // Offsets move the kinematic origin, so the bare engine disagrees
        let bare = engine(ElbowBranch::Up);
        assert!(!close(bare.forward(joints), target));
    }

    #[test]
    fn test_with_calibration() {
        let calibration = Calibration {
            base_zero_rad: 0.2,
            offset_z: 15.0,
            ..Default::default()
        };
        let k = Kinematics::with_calibration(ArmGeometry::DEFAULT, &calibration, ElbowBranch::Down);
        assert_eq!(k.branch(), ElbowBranch::Down);
        assert_eq!(k.joint_zero().base, 0.2);
        assert_eq!(k.cartesian_offset().z, 15.0);
    }

    fn reachable_joints() -> impl Strategy<Value = JointPose> {
        (-2.5f32..2.5, 0.2f32..1.2, 0.3f32..1.5)
            .prop_map(|(base, shoulder, elbow)| JointPose::new(base, shoulder, elbow))
    }

    proptest! {
        #[test]
        fn prop_round_trip_both_branches(joints in reachable_joints(), down in any::<bool>()) {
            let branch = if down { ElbowBranch::Down } else { ElbowBranch::Up };
            let k = engine(branch);
            let p = k.forward(joints);
            let solution = k.solve_inverse(p);
            prop_assert_eq!(solution.reach, Reach::Exact);
            let back = k.forward(solution.joints);
            prop_assert!(close(back, p), "{:?} -> {:?}", p, back);
        }

        #[test]
        fn prop_branches_agree_on_target(joints in reachable_joints()) {
            let p = engine(ElbowBranch::Up).forward(joints);
            let up = engine(ElbowBranch::Up);
            let down = engine(ElbowBranch::Down);
            prop_assert!(close(up.forward(up.inverse(p)), p));
            prop_assert!(close(down.forward(down.inverse(p)), p));
        }

        #[test]
        fn prop_elbow_up_recovers_joints(joints in reachable_joints()) {
            let k = engine(ElbowBranch::Up);
            let solved = k.inverse(k.forward(joints));
            prop_assert!((solved.base - joints.base).abs() < 1e-3);
            prop_assert!((solved.shoulder - joints.shoulder).abs() < 1e-3);
            prop_assert!((solved.elbow - joints.elbow).abs() < 1e-3);
        }
    }
}
