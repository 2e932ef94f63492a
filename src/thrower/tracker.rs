//! Drag state machine
//!
//! `GestureTracker` turns pointer start/hold/end reports into a drag of
//! the held ball and, on release, either a throw or a return to the rest
//! slot. It owns the ball handle, the single active [`DragSession`], the
//! pointer subscription and the respawn timer. The embedding loop calls
//! [`GestureTracker::update`] once per rendered frame and
//! [`GestureTracker::fixed_update`] once per physics step.

use crate::capture::input::{
    GesturePhase, PointerChannel, PointerEvent, PointerSample, QueuedEvent, Subscription,
};
use crate::config::ThrowerConfig;
use crate::processing::follow::Follower;
use crate::processing::force::{ForceModel, ReleaseDecision};
use crate::processing::torque::TorqueModel;
use crate::processing::trajectory::{
    BezierControlTriple, ThrowInput, ThrowPath, TrajectoryBuilder,
};
use crate::scene::{HeldObject, ObjectFactory, RestSlot, TargetLocator, Viewport};
use crate::thrower::error::ThrowerResult;
use crate::thrower::respawn::RespawnTimer;
use crate::thrower::session::DragSession;
use glam::{Quat, Vec2, Vec3};
use serde::Serialize;

/// Engine services the tracker depends on
pub struct Collaborators {
    pub viewport: Box<dyn Viewport>,
    pub targets: Box<dyn TargetLocator>,
    pub factory: Box<dyn ObjectFactory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    Dragging,
}

/// Result of one gesture end
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ReleaseOutcome {
    Thrown {
        decision: ReleaseDecision,
        control: BezierControlTriple,
        path: ThrowPath,
    },
    Cancelled {
        decision: ReleaseDecision,
    },
}

impl ReleaseOutcome {
    pub fn decision(&self) -> &ReleaseDecision {
        match self {
            ReleaseOutcome::Thrown { decision, .. }
            | ReleaseOutcome::Cancelled { decision } => decision,
        }
    }

    pub fn path(&self) -> Option<&ThrowPath> {
        match self {
            ReleaseOutcome::Thrown { path, .. } => Some(path),
            ReleaseOutcome::Cancelled { .. } => None,
        }
    }

    pub fn is_thrown(&self) -> bool {
        matches!(self, ReleaseOutcome::Thrown { .. })
    }
}

pub struct GestureTracker {
    config: ThrowerConfig,
    force: ForceModel,
    torque: TorqueModel,
    trajectory: TrajectoryBuilder,

    viewport: Box<dyn Viewport>,
    targets: Box<dyn TargetLocator>,
    factory: Box<dyn ObjectFactory>,

    slot: Option<RestSlot>,
    frame_rotation: Quat,
    held: Option<Box<dyn HeldObject>>,
    session: Option<DragSession>,
    subscription: Option<Subscription>,
    respawn: Option<RespawnTimer>,
}

impl GestureTracker {
    /// Build a tracker with an empty hand. The config is validated first.
    pub fn new(
        config: ThrowerConfig,
        collaborators: Collaborators,
        slot: RestSlot,
    ) -> ThrowerResult<Self> {
        if let Err(e) = config.validate() {
            tracing::warn!("Rejected thrower config: {}", e);
            return Err(e.into());
        }

        Ok(Self {
            force: ForceModel::from_config(&config),
            torque: TorqueModel::new(config.torque_multiplier),
            trajectory: TrajectoryBuilder::from_config(&config),
            config,
            viewport: collaborators.viewport,
            targets: collaborators.targets,
            factory: collaborators.factory,
            slot: Some(slot),
            frame_rotation: Quat::IDENTITY,
            held: None,
            session: None,
            subscription: None,
            respawn: None,
        })
    }

    /// Put a ball in hand, parented to the rest slot
    pub fn with_held(mut self, mut held: Box<dyn HeldObject>) -> Self {
        if let Some(slot) = &self.slot {
            held.attach(slot);
        }
        self.held = Some(held);
        self
    }

    /// Spawn the first ball from the factory
    pub fn with_spawned(mut self) -> Self {
        self.spawn_into_slot();
        self
    }

    pub fn config(&self) -> &ThrowerConfig {
        &self.config
    }

    pub fn state(&self) -> TrackerState {
        if self.session.is_some() {
            TrackerState::Dragging
        } else {
            TrackerState::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn held(&self) -> Option<&dyn HeldObject> {
        self.held.as_deref()
    }

    pub fn rest_slot(&self) -> Option<&RestSlot> {
        self.slot.as_ref()
    }

    /// Orientation of the thrower; forward is local +Z
    pub fn frame_rotation(&self) -> Quat {
        self.frame_rotation
    }

    pub fn set_frame_rotation(&mut self, rotation: Quat) {
        self.frame_rotation = rotation;
    }

    pub fn set_rest_slot(&mut self, slot: RestSlot) {
        self.slot = Some(slot);
    }

    /// Remove the rest slot. A pending respawn is dropped with it, and an
    /// active drag ends with the ball released under gravity.
    pub fn clear_rest_slot(&mut self) {
        self.slot = None;
        self.cancel_respawn();

        if let Some(session) = self.session.take() {
            tracing::info!("Drag {} dropped: rest slot removed", session.id);
            if let Some(held) = self.held.as_mut() {
                held.detach();
                held.set_gravity(true);
            }
        }
    }

    pub fn respawn_pending(&self) -> bool {
        self.respawn.is_some()
    }

    pub fn cancel_respawn(&mut self) {
        if let Some(timer) = self.respawn.take() {
            tracing::debug!("Respawn for session {} cancelled", timer.session);
        }
    }

    /// Listen to `channel`. Replaces any previous subscription.
    pub fn attach(&mut self, channel: &PointerChannel) {
        self.subscription = Some(channel.subscribe());
        tracing::info!("Thrower attached to pointer channel {}", channel.id());
    }

    /// Stop listening; the subscription is released immediately
    pub fn detach(&mut self) {
        if self.subscription.take().is_some() {
            tracing::info!("Thrower detached from pointer channel");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Detach, drop any pending respawn, and put a dragged ball back
    pub fn shutdown(&mut self) {
        self.detach();
        self.cancel_respawn();
        if let Some(session) = self.session.take() {
            tracing::info!("Drag {} abandoned on shutdown", session.id);
            self.return_to_slot();
        }
    }

    /// Per-frame tick: advance the respawn timer, then dispatch queued
    /// pointer events in arrival order
    pub fn update(&mut self, dt: f32) -> Vec<ReleaseOutcome> {
        self.tick_respawn(dt);

        let events = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => Vec::new(),
        };

        let mut outcomes = Vec::new();
        for QueuedEvent { event, connected } in events {
            if let Some(outcome) = self.handle(event, connected, dt) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Physics tick: spin the held ball while dragging
    pub fn fixed_update(&mut self) {
        let (Some(session), Some(held)) = (&self.session, self.held.as_mut()) else {
            return;
        };

        if let Some(torque) = self.torque.torque(
            held.position(),
            session.last_world,
            session.history.average(),
            self.frame_rotation,
        ) {
            held.add_torque(torque);
        }
    }

    /// Dispatch one event. `connected` is the device state when it was emitted.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        connected: bool,
        dt: f32,
    ) -> Option<ReleaseOutcome> {
        match event.phase {
            GesturePhase::Start => {
                self.on_start(&event.sample, connected);
                None
            }
            GesturePhase::Hold => {
                self.on_hold(&event.sample, dt);
                None
            }
            GesturePhase::End => self.on_end(&event.sample),
        }
    }

    pub fn on_start(&mut self, sample: &PointerSample, connected: bool) {
        if !connected {
            tracing::info!("Gesture start ignored: pointer not connected");
            return;
        }
        if self.session.is_some() {
            tracing::debug!("Gesture start ignored: already dragging");
            return;
        }
        let Some(slot) = self.slot else {
            tracing::info!("Gesture start ignored: no rest slot");
            return;
        };
        let Some(held) = self.held.as_mut() else {
            tracing::info!("Gesture start ignored: nothing in hand");
            return;
        };

        let depth = self.viewport.camera_position().distance(slot.position);
        let world = normalized_to_world(&*self.viewport, depth, sample.normalized);

        tracing::debug!("Held position before snap: {:?}", held.position());
        held.set_position(world);
        held.set_rotation(slot.rotation);
        held.set_gravity(false);
        held.clear_velocities();
        tracing::debug!("Held position after snap: {:?}", held.position());

        let follower = Follower::new(self.config.follow_mode, self.config.follow_speed);
        let session =
            DragSession::begin(sample.normalized, world, self.config.history_capacity, follower);
        tracing::info!("Drag {} started at {:?}", session.id, world);
        self.session = Some(session);
    }

    pub fn on_hold(&mut self, sample: &PointerSample, dt: f32) {
        let (Some(session), Some(slot)) = (self.session.as_mut(), &self.slot) else {
            return;
        };

        let depth = self.viewport.camera_position().distance(slot.position);
        let target = normalized_to_world(&*self.viewport, depth, sample.normalized);

        if let Some(held) = self.held.as_mut() {
            let next = session.follower.step(held.position(), target, dt);
            held.set_position(next);
        }
        session.record(sample.normalized, target);
    }

    pub fn on_end(&mut self, sample: &PointerSample) -> Option<ReleaseOutcome> {
        let session = self.session.take()?;

        let average = session.history.average();
        let decision = self.force.evaluate(average);
        tracing::debug!(
            "Drag {} released at {:.0}ms (force={:.3}, dot={:.3}, samples={})",
            session.id,
            sample.process_time_ms,
            decision.force,
            decision.direction_score,
            session.history.len()
        );

        if decision.is_throw() {
            if let Some(outcome) = self.throw(&session, decision) {
                return Some(outcome);
            }
        }

        tracing::info!("Drag {} cancelled (force={:.3})", session.id, decision.force);
        self.return_to_slot();
        Some(ReleaseOutcome::Cancelled { decision })
    }

    /// Convert a normalized pointer position at the rest slot's depth
    pub fn pointer_to_world(&self, normalized: Vec2) -> Option<Vec3> {
        let slot = self.slot.as_ref()?;
        let depth = self.viewport.camera_position().distance(slot.position);
        Some(normalized_to_world(&*self.viewport, depth, normalized))
    }

    fn throw(
        &mut self,
        session: &DragSession,
        decision: ReleaseDecision,
    ) -> Option<ReleaseOutcome> {
        let mut held = self.held.take()?;

        // Re-read from the live history, same as the spin.
        let average = session.history.average();
        let input = ThrowInput {
            start: held.position(),
            average_delta: average,
            force: self.force.force(average),
            frame_rotation: self.frame_rotation,
            charged: held.is_charged(),
            target: self.targets.find(&self.config.target_tag),
        };
        let (control, path) = self.trajectory.build(&input);

        tracing::info!(
            "Drag {} thrown (force={:.3}, charged={}, end={:?}, points={})",
            session.id,
            input.force,
            input.charged,
            control.end,
            path.len()
        );

        held.launch(path.clone());
        held.detach();
        drop(held);

        self.respawn = Some(RespawnTimer::new(session.id, self.config.respawn_delay_secs));

        Some(ReleaseOutcome::Thrown {
            decision,
            control,
            path,
        })
    }

    fn return_to_slot(&mut self) {
        let Some(held) = self.held.as_mut() else {
            return;
        };
        held.clear_velocities();
        if let Some(slot) = &self.slot {
            held.set_position(slot.position);
            held.set_rotation(slot.rotation);
        }
    }

    fn tick_respawn(&mut self, dt: f32) {
        let Some(timer) = self.respawn.as_mut() else {
            return;
        };
        if !timer.tick(dt) {
            return;
        }
        let session = timer.session;
        self.respawn = None;

        if self.held.is_some() {
            tracing::debug!("Respawn for session {} skipped: hand already full", session);
            return;
        }
        if self.spawn_into_slot() {
            tracing::info!("Replacement ball spawned after session {}", session);
        } else {
            tracing::debug!("Respawn for session {} skipped: rest slot gone", session);
        }
    }

    fn spawn_into_slot(&mut self) -> bool {
        let Some(slot) = self.slot else {
            return false;
        };
        let mut ball = self.factory.create(slot.position, slot.rotation);
        ball.attach(&slot);
        self.held = Some(ball);
        true
    }
}

/// Lift a normalized device position into the world.
///
/// The device reports with its axes swapped relative to the screen: the
/// normalized x runs along the screen height and the flipped y along the
/// width.
pub fn normalized_to_world(viewport: &dyn Viewport, depth: f32, normalized: Vec2) -> Vec3 {
    let (width, height) = viewport.size();
    let along_height = normalized.x * height;
    let along_width = (1.0 - normalized.y) * width;
    viewport.screen_to_world(Vec3::new(along_width, along_height, depth))
}
