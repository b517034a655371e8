use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use voxbuild_core::{GridColumn, GridDims, OccupancyGrid, PlanOptions};
use voxbuild_planner::{extract_shell, plan_tour, BuildPlanAssembler};

fn sphere(n: usize) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(GridDims::new(n, n, n));
    let c = (n as f64 - 1.0) / 2.0;
    let r2 = c * c;
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                let d2 = (x as f64 - c).powi(2) + (y as f64 - c).powi(2) + (z as f64 - c).powi(2);
                if d2 <= r2 {
                    let _ = grid.set(x, y, z, true);
                }
            }
        }
    }
    grid
}

fn ring(radius: i64) -> Vec<GridColumn> {
    let mut columns = Vec::new();
    for x in -radius..=radius {
        for z in -radius..=radius {
            let d2 = x * x + z * z;
            if d2 <= radius * radius && d2 > (radius - 1) * (radius - 1) {
                columns.push(GridColumn::new(x, z));
            }
        }
    }
    columns
}

fn bench_shell(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_shell");
    for n in [16, 32, 48] {
        let grid = sphere(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &grid, |b, grid| {
            b.iter(|| extract_shell(black_box(grid)))
        });
    }
    group.finish();
}

fn bench_tour(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_tour");
    for radius in [8, 16, 32] {
        let columns = ring(radius);
        group.bench_with_input(
            BenchmarkId::from_parameter(columns.len()),
            &columns,
            |b, columns| b.iter(|| plan_tour(black_box(columns))),
        );
    }
    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let grid = sphere(32);
    let shell = extract_shell(&grid).expect("shell");
    let mut group = c.benchmark_group("assemble");
    for (name, options) in [
        ("parallel", PlanOptions::with_workers(4).depth_splits(2)),
        ("sequential", PlanOptions::with_workers(4).depth_splits(2).sequential()),
    ] {
        let assembler = BuildPlanAssembler::new(options).expect("options");
        group.bench_function(name, |b| {
            b.iter(|| assembler.assemble(black_box(&grid), black_box(&shell)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shell, bench_tour, bench_assemble);
criterion_main!(benches);
