use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grid_pack::{Container, Grid, ShapeCatalog, ShapeId};
use std::sync::Arc;

fn catalog_with_shapes() -> (Arc<ShapeCatalog>, Vec<ShapeId>) {
    let catalog = Arc::new(ShapeCatalog::new());
    let shapes = [
        Grid::from_cells(2, 2, [(0, 0), (1, 0), (0, 1), (1, 1)]).unwrap(),
        Grid::from_cells(3, 2, [(0, 0), (1, 0), (2, 0), (0, 1)]).unwrap(),
        Grid::from_cells(1, 4, [(0, 0), (0, 1), (0, 2), (0, 3)]).unwrap(),
        Grid::from_cells(3, 3, [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]).unwrap(),
    ];
    let ids = shapes.iter().map(|s| catalog.intern(s).unwrap()).collect();
    (catalog, ids)
}

fn bench_fill_container(c: &mut Criterion) {
    let (catalog, ids) = catalog_with_shapes();
    c.bench_function("fill_32x32_first_fit", |b| {
        b.iter(|| {
            let mut container = Container::new(32, 32, catalog.clone());
            let mut i = 0;
            while container.try_add(ids[i % ids.len()]).unwrap().is_some() {
                i += 1;
            }
            black_box(container.item_count())
        })
    });
}

fn bench_fill_rotating(c: &mut Criterion) {
    let (catalog, ids) = catalog_with_shapes();
    c.bench_function("fill_32x32_rotating", |b| {
        b.iter(|| {
            let mut container = Container::new(32, 32, catalog.clone());
            let batch: Vec<ShapeId> = ids.iter().cycle().take(200).copied().collect();
            black_box(container.place_multiple(&batch, true).unwrap().len())
        })
    });
}

fn bench_churn(c: &mut Criterion) {
    let (catalog, ids) = catalog_with_shapes();
    let mut container = Container::new(32, 32, catalog);
    let mut live = Vec::new();
    while let Some(index) = container.try_add(ids[0]).unwrap() {
        live.push(index);
    }
    c.bench_function("remove_add_churn", |b| {
        let mut n = 0;
        b.iter(|| {
            let index = live[n % live.len()];
            container.remove(index);
            black_box(container.try_add(ids[0]).unwrap());
            n += 7;
        })
    });
}

criterion_group!(benches, bench_fill_container, bench_fill_rotating, bench_churn);
criterion_main!(benches);
