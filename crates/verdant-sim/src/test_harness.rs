/// End-to-end scenarios run through the public tick entry points.
///
/// Each test builds a small literal world, drives it through `tick` or
/// `SimPipeline`, and checks the observable grid and store afterwards.

#[cfg(test)]
mod tests {
    use glam::IVec3;
    use verdant_core::material::VoxelType;
    use verdant_core::params::SimParams;
    use verdant_core::properties::{Property, PropertyRecord, DIFFUSED_PROPERTIES};
    use verdant_world::grid::VoxelGrid;
    use verdant_world::store::PropertyStore;
    use verdant_world::World;

    use crate::passes::diffusion::diffuse;
    use crate::passes::gravity::gravity;
    use crate::passes::water::spill;
    use crate::{tick, SimPipeline};

    fn shipped_params() -> SimParams {
        verdant_rules::load_params_from_str(include_str!("../../../data/sim.ron"))
            .expect("shipped sim.ron must parse")
    }

    fn water(amount: f64) -> PropertyRecord {
        PropertyRecord {
            water: amount,
            ..PropertyRecord::of_kind(VoxelType::Water)
        }
    }

    /// 3x3 slab at y = 0 with a mix of hot and cold cells.
    fn slab() -> World {
        let mut grid = VoxelGrid::new();
        let mut store = PropertyStore::new();
        for x in 0..3 {
            for z in 0..3 {
                let c = IVec3::new(x, 0, z);
                grid.insert(c);
                let mut r = PropertyRecord::neutral();
                r.heat = if (x + z) % 2 == 0 { 0.9 } else { 0.1 };
                r.nutrient = x as f64 * 0.3;
                r.humidity = z as f64 * 0.4;
                store.insert(c, r);
            }
        }
        World::from_parts(grid, store)
    }

    fn totals(world: &World) -> Vec<f64> {
        DIFFUSED_PROPERTIES
            .iter()
            .map(|&p| world.grid().iter().map(|c| world.store().value(c, p)).sum())
            .collect()
    }

    #[test]
    fn test_diffusion_conserves_every_property_on_slab() {
        let mut world = slab();
        let before = totals(&world);
        let params = SimParams::default();
        let (grid, store) = world.split_mut();
        for &p in &DIFFUSED_PROPERTIES {
            diffuse(grid, store, p, &params.diffusion, 1.0);
        }
        let after = totals(&world);
        for (b, a) in before.iter().zip(&after) {
            assert!((b - a).abs() < 1e-9, "{b} vs {a}");
        }
    }

    #[test]
    fn test_slab_tick_conserves_and_keeps_shape() {
        // A grounded soil slab: no gravity, no water kinds, so a whole tick
        // is diffusion only.
        let mut world = slab();
        let before = totals(&world);
        let report = tick(&mut world, &SimParams::default(), 1.0);
        assert!(!report.any_structural_change());
        assert_eq!(world.voxel_count(), 9);
        let after = totals(&world);
        for (b, a) in before.iter().zip(&after) {
            assert!((b - a).abs() < 1e-9);
        }
    }

    #[test]
    fn test_symmetric_pair_reaches_mean() {
        let a = IVec3::new(0, 0, 0);
        let b = IVec3::new(0, 0, 1);
        let grid: VoxelGrid = [a, b].into_iter().collect();
        let mut hot = PropertyRecord::neutral();
        hot.heat = 10.0;
        let mut cold = PropertyRecord::neutral();
        cold.heat = 0.0;
        let store: PropertyStore = [(a, hot), (b, cold)].into_iter().collect();
        let mut world = World::from_parts(grid, store);

        let mut params = SimParams::default();
        params.diffusion.uniform_coefficient = 1.0;
        params.diffusion.rate = 0.1;
        for _ in 0..400 {
            tick(&mut world, &params, 1.0);
        }
        assert!((world.store().value(a, Property::Heat) - 5.0).abs() < 1e-6);
        assert!((world.store().value(b, Property::Heat) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_supported_column_idempotent() {
        let mut grid: VoxelGrid = (0..3).map(|y| IVec3::new(0, y, 0)).collect();
        let before = grid.clone();
        assert!(!gravity(&mut grid, 3600.0).changed());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_lone_voxel_single_step_fall() {
        let grid: VoxelGrid = [IVec3::new(0, 5, 0)].into_iter().collect();
        let mut world = World::from_parts(grid, PropertyStore::new());
        let report = tick(&mut world, &shipped_params(), 3600.0);
        assert!(report.changed());
        assert!(world.grid().contains(IVec3::new(0, 4, 0)));
        assert!(!world.grid().contains(IVec3::new(0, 5, 0)));
    }

    #[test]
    fn test_evaporation_boundary() {
        let gone = IVec3::new(0, 0, 0);
        let kept = IVec3::new(5, 0, 5);
        let mut grid: VoxelGrid = [gone, kept].into_iter().collect();
        let mut store: PropertyStore = [(gone, water(0.009)), (kept, water(0.011))]
            .into_iter()
            .collect();
        let report = spill(&mut grid, &mut store, &shipped_params().water);
        assert!(!grid.contains(gone));
        assert!(grid.contains(kept));
        assert_eq!(store.record(kept).water, 0.011);
        assert_eq!(report.evaporated, vec![gone]);
    }

    #[test]
    fn test_spill_creates_voxel_below() {
        let src = IVec3::new(2, 3, 2);
        let dst = IVec3::new(2, 2, 2);
        let mut grid: VoxelGrid = [src].into_iter().collect();
        let mut store: PropertyStore = [(src, water(0.5))].into_iter().collect();
        spill(&mut grid, &mut store, &shipped_params().water);
        assert!(grid.contains(dst));
        assert!((store.record(dst).water - 0.25).abs() < 1e-12);
        assert!((store.record(src).water - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_default_substitution() {
        let c = IVec3::new(7, 1, -3);
        let grid: VoxelGrid = [c].into_iter().collect();
        let world = World::from_parts(grid, PropertyStore::new());
        for p in DIFFUSED_PROPERTIES {
            assert_eq!(world.store().value(c, p), 0.5);
        }
        let r = world.store().record(c);
        assert_eq!(r.kind, VoxelType::Soil);
        assert_eq!(r.minerals, 0.5);
        assert_eq!(r.organic, 0.5);
    }

    #[test]
    fn test_falling_water_column_settles_with_pipeline() {
        // Water released above the ground falls and spreads until it rests.
        let top = IVec3::new(0, 4, 0);
        let grid: VoxelGrid = [top].into_iter().collect();
        let store: PropertyStore = [(top, water(0.9))].into_iter().collect();
        let mut world = World::from_parts(grid, store);

        let mut params = shipped_params();
        params.gravity.carry_records = true;
        let mut sim = SimPipeline::new(params);
        for _ in 0..20 {
            sim.step_with_dt(&mut world, 1.0);
            sim.settle(&mut world);
        }
        assert_eq!(sim.tick_count(), 20);
        assert!(world.grid().iter().all(|c| c.y >= 0));
        assert!(world.grid().contains(IVec3::new(0, 0, 0)));
        let final_report = sim.step_with_dt(&mut world, 1.0).expect("not paused");
        assert!(!final_report.changed());
    }
}
