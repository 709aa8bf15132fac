use glam::Vec2;
use log::debug;
use rapier2d::prelude::*;

use super::body::presets;
use super::collision::CollisionGroups;

/// Halvings used to find the contact point of a blocked step
const CONTACT_SEARCH_STEPS: u32 = 12;

/// The one moving body and the hitbox used to test its moves
#[derive(Debug, Clone, Copy)]
struct PlayerBody {
    handle: RigidBodyHandle,
    half_extents: Vec2,
}

/// Physics world holding the wall tiles and the player body
///
/// There is no gravity and nothing is pushed around: the player moves
/// one axis at a time and stops against the face of any wall in the way.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    /// Query pipeline for the wall overlap tests
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    player: Option<PlayerBody>,
    wall_count: usize,

    /// Set when colliders were added since the query pipeline was refreshed
    queries_stale: bool,
}

impl PhysicsWorld {
    /// Create a new physics world without gravity
    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity: vector![0.0, 0.0],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            player: None,
            wall_count: 0,
            queries_stale: false,
        }
    }

    /// Step the physics simulation forward by one timestep
    ///
    /// Moves the player body to its last requested position and refreshes
    /// the query pipeline.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.queries_stale = false;
    }

    /// Add a solid wall tile centered at `center`
    pub fn add_wall(&mut self, center: Vec2, size: Vec2) -> ColliderHandle {
        let body = self
            .rigid_body_set
            .insert(presets::wall_body(center.x, center.y));
        let collider = presets::wall_collider(size.x, size.y);
        self.wall_count += 1;
        self.queries_stale = true;
        self.collider_set
            .insert_with_parent(collider, body, &mut self.rigid_body_set)
    }

    /// Add the player body with a box hitbox, replacing any previous one
    pub fn add_player(&mut self, position: Vec2, hitbox: Vec2) -> RigidBodyHandle {
        if let Some(old) = self.player.take() {
            self.remove_rigid_body(old.handle);
        }

        let handle = self
            .rigid_body_set
            .insert(presets::player_body(position.x, position.y));
        self.collider_set.insert_with_parent(
            presets::player_collider(hitbox.x, hitbox.y),
            handle,
            &mut self.rigid_body_set,
        );
        self.player = Some(PlayerBody {
            handle,
            half_extents: hitbox / 2.0,
        });
        self.queries_stale = true;
        handle
    }

    /// Move the player by `velocity`, one axis at a time
    ///
    /// The x step is resolved first, then the y step. A step that would push
    /// the hitbox into a wall is shortened so the hitbox ends up against the
    /// wall face. Returns the resulting position, which is also queued as the
    /// body's next position for the following `step`.
    pub fn move_player(&mut self, position: Vec2, velocity: Vec2) -> Vec2 {
        let Some(player) = self.player else {
            debug!("No player body; moving without collision");
            return position + velocity;
        };
        if self.queries_stale {
            self.step();
        }

        let mut result = position;
        if velocity.x != 0.0 {
            result = self.advance_to_contact(result, Vec2::new(velocity.x, 0.0), player);
        }
        if velocity.y != 0.0 {
            result = self.advance_to_contact(result, Vec2::new(0.0, velocity.y), player);
        }

        if let Some(body) = self.rigid_body_set.get_mut(player.handle) {
            body.set_next_kinematic_translation(vector![result.x, result.y]);
        }
        result
    }

    /// Furthest point along `step` the hitbox reaches without entering a wall
    ///
    /// A blocked step is bisected, which leaves a gap of at most
    /// `step / 2^CONTACT_SEARCH_STEPS` to the wall face.
    fn advance_to_contact(&self, from: Vec2, step: Vec2, player: PlayerBody) -> Vec2 {
        if !self.overlaps_wall(from + step, player) {
            return from + step;
        }

        let (mut free, mut blocked) = (0.0_f32, 1.0_f32);
        for _ in 0..CONTACT_SEARCH_STEPS {
            let mid = (free + blocked) / 2.0;
            if self.overlaps_wall(from + step * mid, player) {
                blocked = mid;
            } else {
                free = mid;
            }
        }
        from + step * free
    }

    fn overlaps_wall(&self, position: Vec2, player: PlayerBody) -> bool {
        let shape = SharedShape::cuboid(player.half_extents.x, player.half_extents.y);
        let shape_pos = Isometry::translation(position.x, position.y);
        let filter = QueryFilter::default()
            .exclude_rigid_body(player.handle)
            .groups(CollisionGroups::Player.to_interaction_groups());

        self.query_pipeline
            .intersection_with_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &shape_pos,
                &*shape,
                filter,
            )
            .is_some()
    }

    /// Current translation of the player body
    pub fn player_position(&self) -> Option<Vec2> {
        let player = self.player?;
        self.rigid_body_set.get(player.handle).map(|body| {
            let t = body.translation();
            Vec2::new(t.x, t.y)
        })
    }

    /// Number of wall tiles in the world
    pub fn wall_count(&self) -> usize {
        self.wall_count
    }

    /// Remove a rigid body and all its attached colliders
    fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
