use verdant_core::params::SimParams;
use verdant_core::properties::DIFFUSED_PROPERTIES;
use verdant_world::World;

use crate::passes::diffusion::{diffuse, DiffusionReport};
use crate::passes::gravity::{carry_records, gravity, GravityReport};
use crate::passes::settle;
use crate::passes::water::{spill, SpillReport};

/// Everything one tick did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub gravity: GravityReport,
    /// One report per diffused property, in pass order.
    pub diffusion: Vec<DiffusionReport>,
    pub spill: SpillReport,
}

impl TickReport {
    /// True when gravity moved a voxel. Spill changes are reported
    /// separately through `spill_changed`.
    pub fn changed(&self) -> bool {
        self.gravity.changed()
    }

    /// True when the spill pass evaporated or created a voxel.
    pub fn spill_changed(&self) -> bool {
        self.spill.changed()
    }

    /// True when the grid topology changed for any reason.
    pub fn any_structural_change(&self) -> bool {
        self.changed() || self.spill_changed()
    }
}

/// Advance `world` by one tick of length `dt` seconds.
///
/// Pass order: gravity, diffusion of humidity, heat, water and nutrient,
/// then water spill. Each pass sees the result of the one before it.
pub fn tick(world: &mut World, params: &SimParams, dt: f64) -> TickReport {
    let (grid, store) = world.split_mut();

    let gravity = gravity(grid, dt);
    if params.gravity.carry_records && gravity.changed() {
        let carried = carry_records(store, &gravity);
        log::trace!("gravity: carried {carried} records");
    }

    let mut diffusion = Vec::with_capacity(DIFFUSED_PROPERTIES.len());
    for property in DIFFUSED_PROPERTIES {
        diffusion.push(diffuse(grid, store, property, &params.diffusion, dt));
    }

    let spill = spill(grid, store, &params.water);

    let report = TickReport {
        gravity,
        diffusion,
        spill,
    };
    log::debug!(
        "tick: fell={} evaporated={} created={} voxels={}",
        report.gravity.moves.len(),
        report.spill.evaporated.len(),
        report.spill.created.len(),
        grid.len()
    );
    report
}

/// Driver-facing owner of the tick loop: parameters, tick counter and
/// pause state.
#[derive(Debug, Clone)]
pub struct SimPipeline {
    params: SimParams,
    tick_count: u64,
    paused: bool,
    single_step_requested: bool,
}

impl Default for SimPipeline {
    fn default() -> Self {
        Self::new(SimParams::default())
    }
}

impl SimPipeline {
    pub fn new(params: SimParams) -> Self {
        Self {
            params,
            tick_count: 0,
            paused: false,
            single_step_requested: false,
        }
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Replace parameters. Takes effect on the next step.
    pub fn set_params(&mut self, params: SimParams) {
        self.params = params;
    }

    /// Run one tick of the configured length.
    ///
    /// Returns None if paused and no single step was requested.
    pub fn step(&mut self, world: &mut World) -> Option<TickReport> {
        let dt = self.params.dt;
        self.step_with_dt(world, dt)
    }

    /// Run one tick of an explicit length.
    pub fn step_with_dt(&mut self, world: &mut World, dt: f64) -> Option<TickReport> {
        if self.paused && !self.single_step_requested {
            return None;
        }
        self.single_step_requested = false;

        let report = tick(world, &self.params, dt);
        self.tick_count += 1;
        Some(report)
    }

    /// Clamp every record and recompute masses with the configured tables.
    pub fn settle(&self, world: &mut World) -> usize {
        settle::settle(
            world.store_mut(),
            &self.params.clamp,
            &self.params.densities,
            self.params.voxel_volume,
        )
    }

    /// Pause the simulation.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the simulation.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Request a single step (advances by exactly 1 tick while paused).
    pub fn single_step(&mut self) {
        self.single_step_requested = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
