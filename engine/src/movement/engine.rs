//! Movement & Grounding Engine
//!
//! The state machine at the heart of the controller. Three states —
//! airborne, grounded, sliding — are resolved once per fixed tick from
//! geometry probes against the collision capability, then velocity is
//! shaped, jump arbitration runs, and the position integrates.
//!
//! Probe failures are states, not errors: a sweep that finds nothing means
//! airborne / no step / no ceiling and the tick carries on.
//!
//! Split across the two clocks:
//!
//! - [`MovementEngine::frame_tick`] (variable rate): crouch and sprint
//!   arbitration, crouch blending, jump edge latching — the decisions that
//!   track input freshness.
//! - [`MovementEngine::fixed_tick`] (fixed rate): probes, velocity and
//!   integration — the physics that needs a deterministic timestep.

use glam::Vec3;

use crate::input::InputSnapshot;
use crate::math::approach_eps;
use crate::physics::CollisionQuery;

use super::config::{
    CLASSIC_SPRINT_THRESHOLD, CONTACT_BENEATH_DOT, CrouchMode, GROUNDED_SINK_SPEED, JUMP_DEBOUNCE,
    JumpMode, MovementConfig, SLIDE_EFFECT_SUPPRESS, SLIDE_HOLD_TIME, STEP_SURFACE_FLATNESS,
    SprintMode, VELOCITY_SNAP,
};
use super::state::MovementState;

/// Horizontal frame of reference movement input is projected through.
///
/// First person derives it from the body yaw, third person from the orbit
/// camera's yaw, so "forward" always means what the player sees.
#[derive(Debug, Clone, Copy)]
pub struct MoveBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl MoveBasis {
    /// Basis for a yaw angle in radians. Yaw 0 faces -Z.
    pub fn from_yaw(yaw: f32) -> Self {
        let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
        Self {
            forward,
            right: Vec3::new(-forward.z, 0.0, forward.x),
        }
    }

    /// Project input axes (x strafe, z walk) into world space.
    pub fn project(&self, motion: Vec3) -> Vec3 {
        self.right * motion.x + self.forward * motion.z
    }
}

/// What happened during a fixed tick that other systems react to.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementEvents {
    /// A jump impulse was applied this tick.
    pub jumped: bool,
    /// The character was lifted onto a step; the camera should compensate
    /// by the same delta so the view does not pop.
    pub step_lift: Option<f32>,
}

/// Movement and grounding state machine. Owns [`MovementState`].
#[derive(Debug, Clone)]
pub struct MovementEngine {
    pub config: MovementConfig,
    state: MovementState,
}

impl MovementEngine {
    pub fn new(config: MovementConfig) -> Self {
        let state = MovementState::new(config.player_height, config.move_speed);
        Self { config, state }
    }

    /// Read-only view of the movement state.
    pub fn state(&self) -> &MovementState {
        &self.state
    }

    /// Center of the collision capsule for the current crouch blend.
    pub fn capsule_center(&self, position: Vec3) -> Vec3 {
        position + Vec3::Y * self.state.collider_height * 0.5
    }

    // ========================================================================
    // Variable tick
    // ========================================================================

    /// Per-frame state transitions: crouch arbitration (gated by a ceiling
    /// clearance probe), crouch blending, sprint mode arbitration, top
    /// speed selection and jump edge latching.
    pub fn frame_tick(
        &mut self,
        input: &InputSnapshot,
        movement_locked: bool,
        position: Vec3,
        world: &impl CollisionQuery,
        dt: f32,
    ) {
        let config = &self.config;
        let state = &mut self.state;

        // Crouch arbitration. Standing up is blocked while a ceiling sits
        // within standing clearance; crouch state then holds until clear.
        if config.crouch_mode != CrouchMode::None {
            let blocked = world
                .sphere_sweep(
                    position + Vec3::Y * state.collider_height * 0.5,
                    config.player_radius * 0.9,
                    Vec3::Y,
                    config.player_height * 0.52,
                    config.grounding_layers,
                )
                .is_some();

            if blocked {
                state.is_crouching = input.crouch.pressed || state.crouch_blend >= 0.1;
            } else {
                state.is_crouching = !movement_locked && input.crouch.held;
            }
        } else {
            state.is_crouching = false;
        }

        // Landing-effect suppression window for slides.
        if state.is_sliding {
            state.slide_duration_timer = SLIDE_EFFECT_SUPPRESS;
        } else {
            state.slide_duration_timer = (state.slide_duration_timer - dt).max(0.0);
        }

        // Linear crouch blend over crouch_rate seconds; collider height
        // eases through smooth_up so the transition reads soft.
        let rate = 1.0 / config.crouch_rate.max(0.01);
        let direction = if state.is_crouching { 1.0 } else { -1.0 };
        state.crouch_blend = (state.crouch_blend + direction * dt * rate).clamp(0.0, 1.0);
        state.collider_height = config.collider_height(state.crouch_blend);
        debug_assert!((0.0..=1.0).contains(&state.crouch_blend));

        // Sprint arbitration.
        state.is_sprinting = match config.sprint_mode {
            SprintMode::None => false,
            SprintMode::Normal => input.sprint.held,
            SprintMode::Classic => {
                let mean_axis = (input.motion.x.abs() + input.motion.z.abs()) * 0.5;
                if mean_axis < CLASSIC_SPRINT_THRESHOLD {
                    false
                } else {
                    input.sprint.held
                }
            }
        };
        if config.crouch_mode == CrouchMode::NoSprint && state.is_crouching {
            state.is_sprinting = false;
        }

        state.top_speed = config.top_speed(state.is_crouching, state.is_sprinting);

        // Latch jump edges for the next fixed tick. The press latch is
        // consumed exactly once, so a press edge spanning several fixed
        // ticks still yields a single impulse.
        if input.jump.pressed {
            state.jump_queued = true;
        }
        if input.jump.released {
            state.jump_cut_queued = true;
        }
    }

    // ========================================================================
    // Fixed tick
    // ========================================================================

    /// One deterministic physics step: velocity shaping, grounding probes,
    /// slope/slide classification, snap-to-ground, step-up, ceiling check,
    /// gravity, jump arbitration and position integration.
    pub fn fixed_tick(
        &mut self,
        input: &InputSnapshot,
        basis: MoveBasis,
        movement_locked: bool,
        position: &mut Vec3,
        world: &impl CollisionQuery,
        dt: f32,
    ) -> MovementEvents {
        let mut events = MovementEvents::default();

        self.shape_horizontal_velocity(input, basis, movement_locked, dt);
        self.decay_slide_hold(dt);
        self.probe_ground(*position, world);
        self.snap_to_ground(position, world);
        events.step_lift = self.step_up(position, world);

        if self.state.is_sliding {
            self.state.is_grounded = false;
        }

        self.check_ceiling(*position, world);
        self.apply_gravity(dt);
        self.tick_jump(input, basis, movement_locked, position, world, dt, &mut events);
        self.apply_slide_impulse();

        // The held downward velocity keeps downslope contact, but while a
        // walkable surface supports us it must not integrate into the
        // ground; contact loss flips is_grounded and falling resumes.
        let mut delta = self.state.velocity * dt;
        if self.state.is_grounded && delta.y < 0.0 {
            delta.y = 0.0;
        }
        *position += delta;

        debug_assert!(self.state.velocity.y >= self.config.gravity_cap);
        debug_assert!(!(self.state.is_sliding && self.state.can_jump));

        events
    }

    fn shape_horizontal_velocity(
        &mut self,
        input: &InputSnapshot,
        basis: MoveBasis,
        movement_locked: bool,
        dt: f32,
    ) {
        let config = &self.config;
        let state = &mut self.state;

        if movement_locked {
            // Locked movement decays to rest.
            state.velocity = approach_eps(
                state.velocity,
                Vec3::ZERO,
                config.movement_shift_rate,
                dt,
                VELOCITY_SNAP,
            );
            return;
        }

        let wish = basis
            .project(input.motion * state.top_speed)
            .clamp_length_max(state.top_speed);
        let target = Vec3::new(wish.x, state.velocity.y, wish.z);

        let rate = config.movement_shift_rate
            * if state.is_grounded {
                1.0
            } else {
                config.air_control
            };
        state.velocity = approach_eps(state.velocity, target, rate, dt, VELOCITY_SNAP);
    }

    fn decay_slide_hold(&mut self, dt: f32) {
        let state = &mut self.state;
        if !state.is_grounded {
            if state.slide_hold_timer > 0.0 {
                state.slide_hold_timer -= dt;
            } else {
                state.is_sliding = false;
            }
        }
        if state.is_sliding {
            state.can_jump = false;
        }
    }

    /// Downward capsule probe: classifies the surface below as walkable
    /// ground or a slide slope, per the slope bias.
    fn probe_ground(&mut self, position: Vec3, world: &impl CollisionQuery) {
        let config = &self.config;
        let state = &mut self.state;

        let center = position + Vec3::Y * state.collider_height * 0.5;
        let reach = state.collider_height * 0.51 - config.player_radius * 0.8;

        let mut grounded_queue = false;

        match world.sphere_sweep(
            center,
            config.player_radius * 0.99,
            -Vec3::Y,
            reach,
            config.grounding_layers,
        ) {
            Some(hit) => {
                if config.sliding_on_slopes {
                    if hit.normal.y > config.slope_bias {
                        grounded_queue = true;
                    } else {
                        state.is_grounded = false;
                    }
                } else {
                    grounded_queue = true;
                }

                // Slope decisions only apply to surfaces beneath us.
                if hit.normal.dot(Vec3::Y) > CONTACT_BENEATH_DOT {
                    if config.sliding_on_slopes {
                        if state.velocity.y < 0.0 {
                            if hit.normal.y < config.slope_bias {
                                if !state.is_sliding {
                                    log::debug!("sliding on slope, normal {:?}", hit.normal);
                                }
                                state.is_sliding = true;
                                state.slide_hold_timer = SLIDE_HOLD_TIME;
                                state.slide_normal = hit.normal;
                            } else {
                                state.is_sliding = false;
                                state.slide_normal = Vec3::ZERO;
                                state.can_jump = true;
                            }
                        }
                    } else {
                        state.can_jump = true;
                    }
                }
            }
            None => state.is_grounded = false,
        }

        if grounded_queue {
            state.is_grounded = true;
        }
    }

    /// While falling just above walkable ground, snap down onto it. Without
    /// this the character floats off gentle downslopes in a stair-step
    /// pattern instead of walking them.
    fn snap_to_ground(&mut self, position: &mut Vec3, world: &impl CollisionQuery) {
        let config = &self.config;
        let state = &mut self.state;

        if state.is_grounded || state.velocity.y >= 0.0 {
            return;
        }

        // Faster falls get a shorter snap ray: a genuine fall should not
        // teleport onto terrain far below.
        let reach = config.player_height * 0.5 + state.velocity.y.clamp(-1.0, 0.0);
        if reach <= 0.0 {
            return;
        }

        let center = *position + Vec3::Y * state.collider_height * 0.5;
        if let Some(hit) = world.raycast(center, -Vec3::Y, reach, config.grounding_layers) {
            if config.sliding_on_slopes {
                if hit.normal.y > config.slope_bias {
                    if (1.0 - hit.normal.y) < config.slope_bias {
                        *position = hit.point;
                    }
                    state.is_grounded = true;
                }
            } else {
                state.is_grounded = true;
            }
        }
    }

    /// Ledge climbing: a clear forward probe at step height followed by a
    /// downward probe detects a near-flat ledge above the current footing
    /// and lifts the character onto it.
    fn step_up(&mut self, position: &mut Vec3, world: &impl CollisionQuery) -> Option<f32> {
        let config = &self.config;
        let state = &self.state;

        if state.velocity.length_squared() < 1e-6 {
            return None;
        }
        let travel_dir = self.state.velocity.normalize();

        // Anything solid directly ahead at step height means this is a wall,
        // not a step.
        let blocked = world
            .raycast(
                *position + Vec3::Y * config.step_height,
                travel_dir,
                config.player_radius * 1.2,
                config.grounding_layers,
            )
            .is_some();
        if blocked {
            return None;
        }

        let probe_origin =
            *position + travel_dir * config.player_radius * 1.2 + Vec3::Y * config.step_height;
        let hit = world.raycast(
            probe_origin,
            -Vec3::Y,
            config.step_height,
            config.grounding_layers,
        )?;

        if hit.normal.dot(Vec3::Y) > STEP_SURFACE_FLATNESS && hit.point.y > position.y {
            let lift = hit.point.y - position.y;
            position.y = hit.point.y;
            log::debug!("step-up lift {lift:.3}");
            return config.smooth_stepping.then_some(lift);
        }

        None
    }

    /// Cancels upward velocity against an immovable obstruction overhead,
    /// removing the sticky hang when jumping into geometry.
    fn check_ceiling(&mut self, position: Vec3, world: &impl CollisionQuery) {
        let state = &mut self.state;
        let center = position + Vec3::Y * state.collider_height * 0.5;

        if let Some(hit) = world.raycast(
            center,
            Vec3::Y,
            state.collider_height * 0.55,
            self.config.grounding_layers,
        ) {
            // Dynamic bodies get pushed instead of stopping the jump.
            if hit.kinematic && state.velocity.y > 0.0 {
                state.velocity.y = 0.0;
            }
        }
    }

    fn apply_gravity(&mut self, dt: f32) {
        let v = &mut self.state.velocity;
        v.y = (v.y - self.config.gravity * dt).clamp(self.config.gravity_cap, f32::INFINITY);
    }

    #[allow(clippy::too_many_arguments)]
    fn tick_jump(
        &mut self,
        input: &InputSnapshot,
        basis: MoveBasis,
        movement_locked: bool,
        position: &mut Vec3,
        world: &impl CollisionQuery,
        dt: f32,
        events: &mut MovementEvents,
    ) {
        let config = &self.config;
        let state = &mut self.state;

        if state.jump_cooldown > 0.0 {
            state.jump_cooldown -= dt;
        }

        if !state.is_grounded {
            // Variable-height jump: releasing while ascending halves the
            // remaining upward velocity.
            if !movement_locked && state.velocity.y > 0.0 && state.jump_cut_queued {
                state.velocity.y *= 0.5;
            }
        } else {
            // Downslope stick: while walking down a gentle slope, pull the
            // character onto the surface instead of letting it skip.
            if let Some(hit) = world.raycast(
                *position + Vec3::Y * state.collider_height * 0.5,
                -Vec3::Y,
                config.player_height * 0.66,
                config.grounding_layers,
            ) {
                let moving = input.motion_magnitude() > 0.0;
                if moving && !state.is_sliding && hit.normal.dot(state.velocity) > 0.0 {
                    let n = hit.normal.y;
                    if n > config.slope_bias
                        && state.velocity.y > -2.0
                        && state.velocity.y < 0.0
                        && n < 0.99
                    {
                        position.y = hit.point.y;
                    }
                }
            }

            if !movement_locked
                && config.jump_mode != JumpMode::None
                && state.can_jump
                && !state.is_crouching
                && state.jump_queued
                && state.jump_cooldown <= 0.0
            {
                match config.jump_mode {
                    JumpMode::None => {}
                    JumpMode::Normal => state.velocity.y = config.jump_power,
                    JumpMode::Enhanced => {
                        state.velocity.y = config.jump_power
                            + if state.is_sprinting {
                                config.jump_power * 0.15
                            } else {
                                0.0
                            };
                    }
                    JumpMode::Leaping => {
                        state.velocity.y = config.jump_power;
                        if state.is_sprinting {
                            let mut leap =
                                basis.project(input.motion) * config.sprint_speed * 2.0;
                            leap.y = config.jump_power * 0.5;
                            state.velocity += leap;
                        }
                    }
                }
                state.jump_cooldown = JUMP_DEBOUNCE;
                events.jumped = true;
            }

            // Keep a little downward pressure while moving so downslopes
            // stay in contact, but never let gravity stack while grounded.
            let floor = if input.motion_magnitude() > 0.0 {
                GROUNDED_SINK_SPEED
            } else {
                0.0
            };
            state.velocity.y = state.velocity.y.clamp(floor, f32::INFINITY);
        }

        // Edges are one-shot regardless of whether they fired.
        state.jump_queued = false;
        state.jump_cut_queued = false;
    }

    /// Lateral shunt away from the slide surface, applied per fixed tick.
    fn apply_slide_impulse(&mut self) {
        let state = &mut self.state;
        if self.config.sliding_on_slopes && state.is_sliding {
            state.can_jump = false;
            let n = state.slide_normal;
            state.velocity.x += (1.0 - n.y) * n.x * 0.5;
            state.velocity.z += (1.0 - n.y) * n.z * 0.5;
        }
    }

    /// Drop all motion and timers, keeping configuration. Used on teleport.
    pub fn reset_motion(&mut self) {
        let state = &mut self.state;
        state.velocity = Vec3::ZERO;
        state.is_grounded = false;
        state.is_sliding = false;
        state.slide_normal = Vec3::ZERO;
        state.slide_hold_timer = 0.0;
        state.jump_queued = false;
        state.jump_cut_queued = false;
    }
}
