use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use depot::demo;
use freight_rs::engine::Depot;
use freight_rs::entities::{Container, ContainerClass, DepotInstance, InventoryItem};
use freight_rs::routing::FallbackRouter;
use freight_rs::util::{LifecycleConfig, OrderIdScheme};
use rand::SeedableRng;
use rand::prelude::SmallRng;

criterion_main!(benches);
criterion_group!(benches, optimize_bench);

const N_PENDING: [usize; 3] = [50, 200, 800];

/// Depot with enough containers of every class and stock for `n` pending shipments
fn create_depot(n: usize) -> Depot {
    let containers = (0..n as u32)
        .map(|i| Container::new(i + 1, ContainerClass::ALL[i as usize % 3]))
        .collect();
    let inventory = ["Fresh", "Frozen", "Organic"]
        .map(|category| InventoryItem::new(category, u64::MAX / 4, 0))
        .to_vec();
    let instance = DepotInstance {
        containers,
        inventory,
        ..DepotInstance::default()
    };
    let config = LifecycleConfig {
        place_on_confirm: false,
        order_ids: OrderIdScheme::Sequential,
        ..LifecycleConfig::default()
    };
    let mut depot = Depot::in_memory(instance, config);

    let router = FallbackRouter::default();
    let forms = demo::generate_forms(&mut SmallRng::seed_from_u64(0), n);
    for form in &forms {
        let Ok(request) = depot.precheck(form) else {
            continue;
        };
        let route = freight_rs::routing::Route::road_only(router.estimate(&request.destination));
        if let Ok(quote) = depot.stage_quote(request, route) {
            let _ = depot.confirm_shipment(&quote.order_id);
        }
    }
    depot
}

/// Benchmark of a full First-Fit Decreasing pass over all pending shipments
fn optimize_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize_containers");
    group.sample_size(10);
    for n in N_PENDING {
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter_batched(
                || create_depot(n),
                |mut depot| depot.optimize_containers(),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}
