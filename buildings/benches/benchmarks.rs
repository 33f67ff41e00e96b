use buildings::{Building, BuildingId, BuildingsMobility, HybridBuildings, Position};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn hybrid_loss(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hybrid Loss");

    let hybrid = HybridBuildings::builder().build().unwrap();
    let office = Arc::new(
        Building::builder()
            .id(BuildingId(1))
            .bounds(Position::new(0.0, 0.0, 0.0), Position::new(50.0, 50.0, 30.0))
            .floors(10)
            .rooms(5, 5)
            .build()
            .unwrap(),
    );
    let buildings = [office];

    let enb = BuildingsMobility::locate(Position::new(-1500.0, 0.0, 30.0), &buildings);
    let street = BuildingsMobility::locate(Position::new(-300.0, 10.0, 1.5), &buildings);
    let desk = BuildingsMobility::locate(Position::new(12.0, 37.0, 7.0), &buildings);
    let lobby = BuildingsMobility::locate(Position::new(45.0, 5.0, 1.0), &buildings);

    group.bench_function("outdoor-outdoor", |b| {
        b.iter(|| hybrid.loss(black_box(&enb), black_box(&street)).unwrap())
    });
    group.bench_function("outdoor-indoor", |b| {
        b.iter(|| hybrid.loss(black_box(&enb), black_box(&desk)).unwrap())
    });
    group.bench_function("indoor-indoor", |b| {
        b.iter(|| hybrid.loss(black_box(&desk), black_box(&lobby)).unwrap())
    });
}

criterion_group!(benches, hybrid_loss);
criterion_main!(benches);
