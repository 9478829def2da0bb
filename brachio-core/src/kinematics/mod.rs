//! Cartesian ⇄ joint transforms

pub mod pose;
pub mod solver;

pub use pose::{JointPose, Position};
pub use solver::{ElbowBranch, InverseSolution, Kinematics, Reach};
