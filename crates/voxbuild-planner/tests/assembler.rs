use voxbuild_core::{
    GridColumn, GridDims, OccupancyGrid, PlanOptions, ShellGrid, TourStrategy, WorkloadWeighting,
};
use voxbuild_planner::{
    extract_shell, to_table, BuildPlanAssembler, ParameterError, PlannerError, Region,
};

fn solid_box(nx: usize, ny: usize, nz: usize) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(GridDims::new(nx, ny, nz));
    grid.fill_box([0, 0, 0], [nx, ny, nz]).unwrap();
    grid
}

fn plan_for(grid: &OccupancyGrid, options: PlanOptions) -> voxbuild_core::BuildPlan {
    let shell = extract_shell(grid).unwrap();
    BuildPlanAssembler::new(options)
        .unwrap()
        .assemble(grid, &shell)
        .unwrap()
}

#[test]
fn test_single_worker_covers_every_layer() {
    let grid = solid_box(4, 3, 4);
    let plan = plan_for(&grid, PlanOptions::with_workers(1));

    assert_eq!(plan.assignments.len(), 1);
    let worker = &plan.assignments[0];
    assert_eq!(worker.x_range, 0..4);
    assert_eq!(worker.z_range, 0..4);
    let ys: Vec<usize> = worker.layers.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![0, 1, 2]);

    // top and bottom layers are fully exposed, the middle one is a ring
    assert_eq!(worker.layers[0].tour.len(), 16);
    assert_eq!(worker.layers[1].tour.len(), 12);
    assert_eq!(worker.layers[2].tour.len(), 16);
    assert!(!worker.layers[1].tour.iter().any(|c| *c == GridColumn::new(1, 1)));
}

#[test]
fn test_depth_splits_order_and_bounds() {
    let grid = solid_box(4, 2, 4);
    let plan = plan_for(&grid, PlanOptions::with_workers(4).depth_splits(2));

    let regions: Vec<_> = plan
        .assignments
        .iter()
        .map(|a| (a.x_range.clone(), a.z_range.clone()))
        .collect();
    assert_eq!(
        regions,
        vec![(0..2, 0..2), (0..2, 2..4), (2..4, 0..2), (2..4, 2..4)]
    );

    for worker in &plan.assignments {
        assert_eq!(worker.layers.len(), 2);
        for layer in &worker.layers {
            assert_eq!(layer.tour.len(), 4);
            for column in layer.tour.iter() {
                assert!(worker.x_range.contains(&(column.x as usize)));
                assert!(worker.z_range.contains(&(column.z as usize)));
            }
            let first = layer.tour.columns()[0];
            assert_eq!(
                first,
                GridColumn::new(worker.x_range.start as i64, worker.z_range.start as i64)
            );
        }
    }
}

#[test]
fn test_globally_empty_layers_are_skipped() {
    let mut grid = OccupancyGrid::new(GridDims::new(3, 3, 3));
    grid.fill_box([0, 0, 0], [3, 1, 3]).unwrap();
    grid.fill_box([0, 2, 0], [3, 3, 3]).unwrap();

    let plan = plan_for(&grid, PlanOptions::with_workers(1));
    let ys: Vec<usize> = plan.assignments[0].layers.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![0, 2]);
}

#[test]
fn test_worker_without_shell_keeps_its_slot() {
    let mut grid = OccupancyGrid::new(GridDims::new(4, 1, 1));
    grid.set(0, 0, 0, true).unwrap();

    let plan = plan_for(&grid, PlanOptions::with_workers(3));
    assert_eq!(plan.assignments.len(), 3);
    assert_eq!(plan.assignments[0].column_count(), 1);
    for worker in &plan.assignments[1..] {
        assert_eq!(worker.layers.len(), 1);
        assert_eq!(worker.layers[0].y, 0);
        assert!(worker.layers[0].tour.is_empty());
    }
}

#[test]
fn test_workers_share_layer_positions() {
    // worker 0 builds y=0 and y=1, worker 1 only y=1
    let grid = OccupancyGrid::from_voxels(&[2, 2, 1], [[0, 0, 0], [0, 1, 0], [1, 1, 0]]).unwrap();
    let plan = plan_for(&grid, PlanOptions::with_workers(2));

    assert_eq!(plan.assignments[0].x_range, 0..1);
    assert_eq!(plan.assignments[1].x_range, 1..2);
    for worker in &plan.assignments {
        let ys: Vec<usize> = worker.layers.iter().map(|l| l.y).collect();
        assert_eq!(ys, vec![0, 1]);
    }
    assert!(plan.assignments[1].layers[0].tour.is_empty());
    assert_eq!(
        plan.assignments[1].layers[1].tour.columns(),
        &[GridColumn::new(1, 0)]
    );

    assert_eq!(
        to_table(&plan, "data"),
        "data = {\n  {\n    {{0,0}},\n    {{0,0}}\n  },\n  {\n    {},\n    {{1,0}}\n  }\n}\n"
    );
}

#[test]
fn test_weighting_changes_the_split() {
    // slice x=1 is solid but mostly buried behind its neighbours
    let mut grid = OccupancyGrid::new(GridDims::new(3, 5, 5));
    grid.fill_box([0, 0, 0], [2, 5, 5]).unwrap();
    grid.fill_box([2, 1, 1], [3, 4, 4]).unwrap();
    let shell = extract_shell(&grid).unwrap();

    let solid = BuildPlanAssembler::new(PlanOptions::with_workers(2)).unwrap();
    assert_eq!(
        solid.regions(&grid).unwrap(),
        vec![Region { x: 0..2, z: 0..5 }, Region { x: 2..3, z: 0..5 }]
    );
    assert_eq!(
        solid.regions(&shell).unwrap(),
        vec![Region { x: 0..1, z: 0..5 }, Region { x: 1..3, z: 0..5 }]
    );

    let mut options = PlanOptions::with_workers(2);
    options.weighting = WorkloadWeighting::Shell;
    let by_shell = BuildPlanAssembler::new(options).unwrap();
    let plan = by_shell.assemble(&grid, &shell).unwrap();
    assert_eq!(plan, by_shell.assemble_shell(&shell).unwrap());
    assert_eq!(plan.assignments[0].x_range, 0..1);

    let plan = solid.assemble(&grid, &shell).unwrap();
    assert_eq!(plan.assignments[0].x_range, 0..2);
}

#[test]
fn test_parallel_matches_sequential() {
    let mut grid = OccupancyGrid::new(GridDims::new(8, 6, 8));
    for x in 0..8 {
        for y in 0..6 {
            for z in 0..8 {
                if (x * 7 + y * 3 + z * 5) % 4 != 0 {
                    grid.set(x, y, z, true).unwrap();
                }
            }
        }
    }

    let parallel = plan_for(&grid, PlanOptions::with_workers(4).depth_splits(2));
    let sequential = plan_for(&grid, PlanOptions::with_workers(4).depth_splits(2).sequential());
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.summary().workers, 4);
}

#[test]
fn test_raster_plan_follows_scan_order() {
    let grid = solid_box(3, 1, 3);
    let mut options = PlanOptions::with_workers(1);
    options.strategy = TourStrategy::Raster;
    let plan = plan_for(&grid, options);

    let tour = &plan.assignments[0].layers[0].tour;
    let mut sorted = tour.columns().to_vec();
    sorted.sort();
    assert_eq!(tour.columns(), sorted.as_slice());
}

#[test]
fn test_degenerate_grid_gives_empty_plan() {
    let grid = OccupancyGrid::new(GridDims::new(0, 4, 4));
    let plan = plan_for(&grid, PlanOptions::with_workers(8));
    assert!(plan.is_empty());
    assert_eq!(plan.summary().columns, 0);

    // worker and depth-split counts are still checked up front
    let err = BuildPlanAssembler::new(PlanOptions::with_workers(3).depth_splits(2)).unwrap_err();
    assert_eq!(
        err,
        PlannerError::from(ParameterError::IndivisibleWorkers {
            workers: 3,
            depth: 2
        })
    );
}

#[test]
fn test_too_many_workers_for_grid() {
    let grid = solid_box(4, 2, 4);
    let shell = extract_shell(&grid).unwrap();

    let err = BuildPlanAssembler::new(PlanOptions::with_workers(8))
        .unwrap()
        .assemble(&grid, &shell)
        .unwrap_err();
    assert_eq!(
        err,
        PlannerError::from(ParameterError::TooManyParts {
            axis: "x".to_string(),
            parts: 8,
            len: 4
        })
    );

    let err = BuildPlanAssembler::new(PlanOptions::with_workers(5).depth_splits(5))
        .unwrap()
        .assemble(&grid, &shell)
        .unwrap_err();
    assert_eq!(
        err,
        PlannerError::from(ParameterError::TooManyParts {
            axis: "z".to_string(),
            parts: 5,
            len: 4
        })
    );
}

#[test]
fn test_mismatched_grids_rejected() {
    let grid = solid_box(3, 3, 3);
    let shell = ShellGrid::new(GridDims::new(3, 3, 4), vec![false; 36]).unwrap();
    let err = BuildPlanAssembler::new(PlanOptions::default())
        .unwrap()
        .assemble(&grid, &shell)
        .unwrap_err();
    assert!(matches!(
        err,
        PlannerError::Parameter(ParameterError::ShapeMismatch { .. })
    ));
}
