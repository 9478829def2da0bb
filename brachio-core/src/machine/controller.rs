//! Arm orchestration loop
//!
//! [`ArmController`] owns every axis, the kinematics engine, the
//! interpolator, the tool actuators and the command queue. Each
//! [`poll`](ArmController::poll) runs one control cycle:
//!
//! 1. dispatch the next queued command if the arm is ready for it
//! 2. advance the interpolator and run IK on the waypoint it produces
//! 3. retarget the joints and the slider from that solve
//! 4. update every axis, emitting at most one pulse each
//!
//! Commands run strictly one after another. The next one is taken only once
//! the interpolator has finished, every axis has reached its target and any
//! dwell has elapsed.

use brachio_hal::{DelayUs, InputPin, Monotonic, OutputPin};
use brachio_protocol::{Command, CommandLetter, CommandQueue, DEFAULT_QUEUE_CAPACITY};

use super::reply::{Cycle, Rejection, Reply};
use crate::actuator::Actuator;
use crate::axis::{Axis, AxisController, AxisSet, StepOutcome};
use crate::config::{ArmGeometry, MachineConfig};
use crate::kinematics::{ElbowBranch, JointPose, Kinematics, Position};
use crate::motion::{Interpolator, Waypoint};

/// How `G0`/`G1` coordinates are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Positioning {
    /// `G90`
    #[default]
    Absolute,
    /// `G91`
    Relative,
}

/// Tool outputs switched by `M` commands
pub struct Tools<P> {
    pub fan: Actuator<P>,
    pub suction: Actuator<P>,
    pub gripper: Actuator<P>,
}

/// Top-level arm controller
pub struct ArmController<P, I, C, D, const Q: usize = DEFAULT_QUEUE_CAPACITY>
where
    P: OutputPin,
    I: InputPin,
    C: Monotonic,
    D: DelayUs,
{
    kinematics: Kinematics,
    axes: AxisSet<AxisController<P, I>>,
    interpolator: Interpolator,
    tools: Tools<P>,
    queue: CommandQueue<Q>,
    clock: C,
    delay: D,
    positioning: Positioning,
    feed_rate: f32,
    dwell_until_ms: Option<u64>,
}

impl<P, I, C, D, const Q: usize> ArmController<P, I, C, D, Q>
where
    P: OutputPin,
    I: InputPin,
    C: Monotonic,
    D: DelayUs,
{
    /// Assemble the controller and power the drivers
    ///
    /// The current step counts are taken as the starting pose; the
    /// interpolator is seeded with their forward solve.
    pub fn new(
        geometry: ArmGeometry,
        config: &MachineConfig,
        axes: AxisSet<AxisController<P, I>>,
        tools: Tools<P>,
        clock: C,
        delay: D,
    ) -> Self {
        let branch = if config.kinematics.elbow_down {
            ElbowBranch::Down
        } else {
            ElbowBranch::Up
        };

        let mut arm = Self {
            kinematics: Kinematics::with_calibration(geometry, &config.calibration, branch),
            axes,
            interpolator: Interpolator::new(),
            tools,
            queue: CommandQueue::new(),
            clock,
            delay,
            positioning: Positioning::Absolute,
            feed_rate: config.motion.default_feed_rate,
            dwell_until_ms: None,
        };
        arm.enable_all(true);
        arm.sync_to_axes();
        arm
    }

    /// Queue a command for execution
    pub fn submit(&mut self, cmd: Command) -> Result<(), Rejection> {
        self.queue.push(cmd).map_err(|_| Rejection::QueueFull)
    }

    /// Run one control cycle
    pub fn poll(&mut self) -> Cycle {
        let now_ms = self.clock.now_ms();
        let mut cycle = Cycle::default();

        if self.ready_for_next(now_ms) {
            if let Some(cmd) = self.queue.pop() {
                cycle.reply = Some(self.execute(cmd, now_ms));
            }
        }

        if !self.interpolator.is_finished() {
            self.interpolator.update(now_ms);
            self.retarget(self.interpolator.current());
        }

        let clock = &self.clock;
        let delay = &mut self.delay;
        let halted = &mut cycle.halted;
        self.axes.for_each_mut(|axis, controller| {
            if controller.update(clock.now_us(), &mut *delay) == StepOutcome::LimitHalt {
                *halted.get_mut(axis) = true;
            }
        });

        if cycle.halted.any() {
            self.hold();
        }

        cycle
    }

    /// Execute a command immediately, bypassing the queue
    pub fn execute(&mut self, cmd: Command, now_ms: u64) -> Reply {
        match (cmd.letter, cmd.code) {
            (CommandLetter::G, 0 | 1) => self.linear_move(&cmd, now_ms),
            (CommandLetter::G, 4) => {
                let ms = cmd.t.unwrap_or(0.0);
                if ms < 0.0 {
                    return Reply::Rejected(Rejection::InvalidArgument);
                }
                // `as` saturates; an enormous dwell simply never expires
                self.dwell_until_ms = Some(now_ms.saturating_add(ms as u64));
                Reply::Ok
            }
            (CommandLetter::G, 28) => {
                self.home();
                Reply::Ok
            }
            (CommandLetter::G, 90) => {
                self.positioning = Positioning::Absolute;
                Reply::Ok
            }
            (CommandLetter::G, 91) => {
                self.positioning = Positioning::Relative;
                Reply::Ok
            }
            (CommandLetter::G, 92) => {
                let current = self.interpolator.current();
                let pose = Waypoint::new(
                    cmd.x.unwrap_or(current.x),
                    cmd.y.unwrap_or(current.y),
                    cmd.z.unwrap_or(current.z),
                    cmd.e.unwrap_or(current.e),
                );
                self.set_pose(pose);
                Reply::Ok
            }
            (CommandLetter::M, 3) => self.switch_tool(|t| &mut t.suction, true),
            (CommandLetter::M, 5) => self.switch_tool(|t| &mut t.suction, false),
            (CommandLetter::M, 8) => self.switch_tool(|t| &mut t.gripper, true),
            (CommandLetter::M, 9) => self.switch_tool(|t| &mut t.gripper, false),
            (CommandLetter::M, 106) => self.switch_tool(|t| &mut t.fan, true),
            (CommandLetter::M, 107) => self.switch_tool(|t| &mut t.fan, false),
            (CommandLetter::M, 17) => {
                self.enable_all(true);
                Reply::Ok
            }
            (CommandLetter::M, 18 | 84) => {
                self.enable_all(false);
                Reply::Ok
            }
            (CommandLetter::M, 114) => Reply::Position(self.actual_pose()),
            (CommandLetter::M, 370) => {
                let branch = match cmd.t {
                    Some(t) if t == 0.0 => ElbowBranch::Up,
                    Some(t) if t == 1.0 => ElbowBranch::Down,
                    _ => return Reply::Rejected(Rejection::InvalidArgument),
                };
                self.kinematics.set_branch(branch);
                Reply::Ok
            }
            (CommandLetter::M, 371) => {
                let o = self.kinematics.cartesian_offset();
                self.kinematics.set_cartesian_offset(Position::new(
                    cmd.x.unwrap_or(o.x),
                    cmd.y.unwrap_or(o.y),
                    cmd.z.unwrap_or(o.z),
                ));
                self.sync_to_axes();
                Reply::Ok
            }
            (CommandLetter::M, 372) => {
                let z = self.kinematics.joint_zero();
                self.kinematics.set_joint_zero(JointPose::new(
                    cmd.x.unwrap_or(z.base),
                    cmd.y.unwrap_or(z.shoulder),
                    cmd.z.unwrap_or(z.elbow),
                ));
                self.sync_to_axes();
                Reply::Ok
            }
            (CommandLetter::M, 400) => Reply::Ok,
            (letter, code) => Reply::Unsupported { letter, code },
        }
    }

    fn linear_move(&mut self, cmd: &Command, now_ms: u64) -> Reply {
        if let Some(feed) = cmd.f {
            if feed <= 0.0 {
                return Reply::Rejected(Rejection::InvalidFeedRate);
            }
            self.feed_rate = feed;
        }

        let last = self.interpolator.goal();
        let resolve = |value: Option<f32>, base: f32| match (value, self.positioning) {
            (None, _) => base,
            (Some(v), Positioning::Absolute) => v,
            (Some(v), Positioning::Relative) => base + v,
        };
        let goal = Waypoint::new(
            resolve(cmd.x, last.x),
            resolve(cmd.y, last.y),
            resolve(cmd.z, last.z),
            resolve(cmd.e, last.e),
        );

        self.interpolator.start(goal, self.feed_rate, now_ms);
        // A zero-length segment finishes inside start(); still retarget so the
        // axes settle on the exact solve of the goal.
        self.retarget(self.interpolator.current());
        Reply::Ok
    }

    fn switch_tool(
        &mut self,
        select: impl FnOnce(&mut Tools<P>) -> &mut Actuator<P>,
        on: bool,
    ) -> Reply {
        select(&mut self.tools).set_on(on);
        Reply::Ok
    }

    /// Point every axis at the solve of `waypoint`
    fn retarget(&mut self, waypoint: Waypoint) {
        let joints = self.kinematics.inverse(waypoint.position());
        self.axes.base.step_to_rad(joints.base);
        self.axes.shoulder.step_to_rad(joints.shoulder);
        self.axes.elbow.step_to_rad(joints.elbow);
        self.axes.slider.step_to_mm(waypoint.e);
    }

    /// Declare the current mechanical position as step zero on every axis
    fn home(&mut self) {
        self.axes.for_each_mut(|_, axis| axis.set_position(0));
        self.dwell_until_ms = None;
        self.sync_to_axes();
    }

    /// Redefine the pose without moving
    fn set_pose(&mut self, pose: Waypoint) {
        let joints = self.kinematics.inverse(pose.position());
        let steps =
            |axis: &AxisController<P, I>, rad: f32| (rad * axis.rad_to_step_factor()) as i32;

        let base = steps(&self.axes.base, joints.base);
        let shoulder = steps(&self.axes.shoulder, joints.shoulder);
        let elbow = steps(&self.axes.elbow, joints.elbow);
        let slider = (pose.e * self.axes.slider.config().mm_to_step_factor()) as i32;

        self.axes.base.set_position(base);
        self.axes.shoulder.set_position(shoulder);
        self.axes.elbow.set_position(elbow);
        self.axes.slider.set_position(slider);
        self.interpolator.set_current(pose);
    }

    /// Stop every axis where it stands and drop the live segment
    fn hold(&mut self) {
        self.axes.for_each_mut(|_, axis| {
            let here = axis.position();
            axis.set_position(here);
        });
        self.sync_to_axes();
    }

    /// Reseed the interpolator from the actual axis positions
    fn sync_to_axes(&mut self) {
        let pose = self.actual_pose();
        self.interpolator.set_current(pose);
    }

    fn enable_all(&mut self, on: bool) {
        self.axes.for_each_mut(|_, axis| axis.enable(on));
    }

    fn ready_for_next(&self, now_ms: u64) -> bool {
        let dwell_done = self.dwell_until_ms.map_or(true, |until| now_ms >= until);
        dwell_done
            && self.interpolator.is_finished()
            && !self.axes.iter().any(|(_, axis)| axis.is_moving())
    }

    /// Forward solve of the actual step counts, plus the slider
    pub fn actual_pose(&self) -> Waypoint {
        let joints = JointPose::new(
            self.axes.base.position_rad(),
            self.axes.shoulder.position_rad(),
            self.axes.elbow.position_rad(),
        );
        Waypoint::from_position(self.kinematics.forward(joints), self.axes.slider.position_mm())
    }

    /// Nothing queued, moving or dwelling
    pub fn is_idle(&self) -> bool {
        let now_ms = self.clock.now_ms();
        self.queue.is_empty() && self.ready_for_next(now_ms)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_queue_full(&self) -> bool {
        self.queue.is_full()
    }

    pub fn axis(&self, axis: Axis) -> &AxisController<P, I> {
        self.axes.get(axis)
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn interpolator(&self) -> &Interpolator {
        &self.interpolator
    }

    pub fn tools(&self) -> &Tools<P> {
        &self.tools
    }

    pub fn positioning(&self) -> Positioning {
        self.positioning
    }

    pub fn feed_rate(&self) -> f32 {
        self.feed_rate
    }
}
