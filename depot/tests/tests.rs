#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use depot::config::DepotConfig;
    use depot::{demo, io};
    use freight_rs::FreightError;
    use freight_rs::engine::{Depot, SharedDepot};
    use freight_rs::entities::{ContainerClass, DepotInstance, ShipmentStatus};
    use freight_rs::routing::{DistanceProvider, FallbackRouter, GeoRouter, StaticGeocoder};
    use freight_rs::storage::JsonFileStore;
    use freight_rs::util::{LifecycleConfig, OrderIdScheme, RouterConfig, assertions};
    use rand::SeedableRng;
    use rand::prelude::SmallRng;
    use test_case::test_case;

    const N_DEMO_ORDERS: usize = 40;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn config(place_on_confirm: bool) -> LifecycleConfig {
        LifecycleConfig {
            place_on_confirm,
            order_ids: OrderIdScheme::Sequential,
            ..LifecycleConfig::default()
        }
    }

    #[test_case(0, true; "seed 0, placed on confirm")]
    #[test_case(1, true; "seed 1, placed on confirm")]
    #[test_case(0, false; "seed 0, placed by optimization")]
    #[test_case(42, false; "seed 42, placed by optimization")]
    #[tokio::test]
    async fn demo_keeps_the_depot_consistent(seed: u64, place_on_confirm: bool) {
        init_logger();
        let shared = SharedDepot::new(Depot::in_memory(
            DepotInstance::default(),
            config(place_on_confirm),
        ));
        let router = Arc::new(GeoRouter::new(
            StaticGeocoder::with_defaults(),
            RouterConfig::default(),
        ));
        let forms = demo::generate_forms(&mut SmallRng::seed_from_u64(seed), N_DEMO_ORDERS);

        let summary = demo::run_demo(shared.clone(), router, forms).await;
        assert_eq!(summary.n_requests, N_DEMO_ORDERS);
        assert_eq!(summary.confirmed.len() + summary.rejected.len(), N_DEMO_ORDERS);

        shared.with_depot(|depot| {
            assert!(assertions::depot_is_consistent(depot.shipments(), depot.yard(), depot.fleet()));
            assert_eq!(depot.shipments().len(), summary.confirmed.len());
            // every container holds at most its capacity
            for c in depot.yard().containers() {
                assert!(c.current_load() <= c.capacity, "container {} overloaded", c.id);
            }
            // placed shipments are Ready, the backlog is still Pending
            for s in depot.shipments() {
                match summary.optimization.backlog.contains(&s.order_id) {
                    true => assert_eq!(s.status, ShipmentStatus::Pending),
                    false => assert_eq!(s.status, ShipmentStatus::Ready),
                }
                assert_eq!(s.container_id.is_some(), s.status == ShipmentStatus::Ready);
            }
        });
    }

    #[tokio::test]
    async fn demo_runs_never_collide_on_order_ids() {
        init_logger();
        let lifecycle = demo::demo_lifecycle(LifecycleConfig::default());
        assert_eq!(lifecycle.order_ids, OrderIdScheme::Sequential);
        assert_eq!(lifecycle.place_on_confirm, LifecycleConfig::default().place_on_confirm);

        let shared = SharedDepot::new(Depot::in_memory(DepotInstance::default(), lifecycle));
        let forms = demo::generate_forms(&mut SmallRng::seed_from_u64(7), N_DEMO_ORDERS);
        let summary = demo::run_demo(shared, Arc::new(FallbackRouter::default()), forms).await;

        assert!(!summary.confirmed.is_empty());
        assert!(
            summary.rejected.iter().all(|r| !r.contains("generated twice")),
            "{:?}",
            summary.rejected
        );
    }

    #[test_case(ContainerClass::Small, 1500, 800; "small")]
    #[test_case(ContainerClass::Medium, 4000, 1500; "medium")]
    #[tokio::test]
    async fn loaded_containers_reject_new_quotes(class: ContainerClass, first: i64, second: i64) {
        let instance = DepotInstance {
            containers: vec![freight_rs::entities::Container::new(1, class)],
            ..DepotInstance::default()
        };
        let mut depot = Depot::in_memory(instance, config(true));
        let router = FallbackRouter::default();
        let mut forms = demo::generate_forms(&mut SmallRng::seed_from_u64(7), 2);
        for (form, weight) in forms.iter_mut().zip([first, second]) {
            form.container_class = class;
            form.category = "Organic".to_string();
            form.weight = weight;
        }

        let quote = depot.submit_shipment(&forms[0], &router).await.unwrap();
        depot.confirm_shipment(&quote.order_id).unwrap();
        let organic_left = depot.ledger().item("Organic").unwrap().quantity;

        let err = depot.submit_shipment(&forms[1], &router).await.unwrap_err();
        assert!(matches!(err, FreightError::Capacity(_)));
        assert_eq!(depot.ledger().item("Organic").unwrap().quantity, organic_left);
    }

    #[test_case("Ankara, Turkey", false; "domestic")]
    #[test_case("Paris, France", true; "abroad")]
    #[test_case("Lisbon, Portugal", false; "unknown place")]
    #[tokio::test]
    async fn sea_legs_only_for_geocoded_foreign_destinations(destination: &str, sea: bool) {
        let router = GeoRouter::new(StaticGeocoder::with_defaults(), RouterConfig::default());
        let route = router.route("Muğla, Turkey", destination).await;
        assert_eq!(route.sea_km > 0, sea, "{route:?}");
        assert_eq!(route.origin_port.is_some(), sea);
        assert_eq!(route.total_km, route.domestic_km + route.sea_km);
    }

    #[tokio::test]
    async fn depot_state_persists_in_the_store_directory() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let router = FallbackRouter::default();
        let order_id = {
            let store = JsonFileStore::open(dir.path()).unwrap();
            let mut depot = Depot::open(DepotInstance::default(), Box::new(store), config(true));
            let forms = demo::generate_forms(&mut SmallRng::seed_from_u64(3), 1);
            let mut form = forms[0].clone();
            form.weight = 100;
            let quote = depot.submit_shipment(&form, &router).await.unwrap();
            depot.confirm_shipment(&quote.order_id).unwrap().order_id
        };
        for key in ["inventory", "shipments", "containers", "fleet"] {
            assert!(dir.path().join(format!("{key}.json")).exists());
        }

        let store = JsonFileStore::open(dir.path()).unwrap();
        let mut depot = Depot::open(DepotInstance::empty(), Box::new(store), config(true));
        assert_eq!(depot.track_shipment(&order_id).unwrap().status, ShipmentStatus::Ready);
        depot.set_shipment_status(&order_id, ShipmentStatus::Delivered).unwrap();
        assert!(depot.yard().containers().iter().all(|c| c.is_empty()));
        assert_eq!(depot.report().completed_shipments, 1);
    }

    #[test]
    fn partial_config_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"prng_seed": 5, "lifecycle": {"place_on_confirm": false, "respect_container_class": true, "order_ids": "sequential"}}"#,
        )
        .unwrap();

        let config: DepotConfig = io::read_json(&path).unwrap();
        assert_eq!(config.prng_seed, Some(5));
        assert!(!config.lifecycle.place_on_confirm);
        assert_eq!(config.lifecycle.order_ids, OrderIdScheme::Sequential);
        assert_eq!(config.router, RouterConfig::default());
        assert_eq!(config.n_demo_orders, DepotConfig::default().n_demo_orders);

        io::write_json(&config, &path).unwrap();
        let reread: DepotConfig = io::read_json(&path).unwrap();
        assert_eq!(reread.lifecycle, config.lifecycle);
        assert_eq!(reread.prng_seed, Some(5));
        assert_eq!(reread.router.ports.len(), config.router.ports.len());
    }

    #[test]
    fn instance_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instance.json");
        io::write_json(&DepotInstance::default(), &path).unwrap();
        let instance: DepotInstance = io::read_json(&path).unwrap();
        assert!(instance.validate().is_ok());
        assert_eq!(instance.origin, "Muğla, Turkey");
        assert_eq!(instance.containers.len(), 4);
    }

    #[test]
    fn generated_forms_respect_the_class_capacity() {
        let forms = demo::generate_forms(&mut SmallRng::seed_from_u64(11), 200);
        assert_eq!(forms.len(), 200);
        assert!(forms.iter().all(|f| f.weight >= 1 && f.weight <= f.container_class.capacity() as i64 / 2));
    }
}
