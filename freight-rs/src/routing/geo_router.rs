use std::time::Duration;

use log::{debug, info, warn};

use crate::routing::{
    Coord, DistanceProvider, FallbackRouter, Geocoder, Port, Route, haversine_km,
};
use crate::util::RouterConfig;

/// Distance provider based on geocoded coordinates.
///
/// Domestic destinations are reached by road. Other destinations are reached by road to the
/// candidate port with the shortest road leg, then by sea. Great-circle distances are inflated
/// to approximate real road and sea routing.
/// Whenever one of the endpoints cannot be geocoded (unknown, failure or timeout),
/// the route is estimated by a [`FallbackRouter`].
pub struct GeoRouter<G> {
    geocoder: G,
    config: RouterConfig,
    fallback: FallbackRouter,
}

impl<G: Geocoder + Sync> GeoRouter<G> {
    pub fn new(geocoder: G, config: RouterConfig) -> Self {
        let fallback = FallbackRouter::with_default_km(config.fallback_km);
        Self {
            geocoder,
            config,
            fallback,
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackRouter) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn is_domestic(&self, destination: &str) -> bool {
        let dest = destination.to_lowercase();
        self.config
            .domestic_keywords
            .iter()
            .any(|kw| dest.contains(&kw.to_lowercase()))
    }

    async fn locate(&self, label: &str) -> Option<Coord> {
        let timeout = Duration::from_millis(self.config.geocode_timeout_ms);
        match tokio::time::timeout(timeout, self.geocoder.locate(label)).await {
            Ok(Ok(Some(coord))) => Some(coord),
            Ok(Ok(None)) => {
                debug!("[ROUTE] no geocoding match for {label}");
                None
            }
            Ok(Err(e)) => {
                warn!("[ROUTE] geocoding {label} failed: {e:#}");
                None
            }
            Err(_) => {
                warn!("[ROUTE] geocoding {label} timed out after {timeout:?}");
                None
            }
        }
    }

    fn road_km(&self, a: Coord, b: Coord) -> u32 {
        (haversine_km(a, b) * self.config.road_factor).round() as u32
    }

    fn sea_km(&self, a: Coord, b: Coord) -> u32 {
        (haversine_km(a, b) * self.config.sea_factor).round() as u32
    }

    /// Port with the shortest road leg from `origin`. Ties go to the port listed first.
    fn nearest_port(&self, origin: Coord) -> Option<(&Port, u32)> {
        self.config
            .ports
            .iter()
            .map(|p| (p, self.road_km(origin, p.coord)))
            .fold(None, |best, (p, km)| match best {
                Some((_, best_km)) if best_km <= km => best,
                _ => Some((p, km)),
            })
    }
}

impl<G: Geocoder + Sync> DistanceProvider for GeoRouter<G> {
    async fn route(&self, origin: &str, destination: &str) -> Route {
        let (from, to) = tokio::join!(self.locate(origin), self.locate(destination));
        let (Some(from), Some(to)) = (from, to) else {
            info!("[ROUTE] falling back to the distance table for {destination}");
            return self.fallback.route(origin, destination).await;
        };

        if self.is_domestic(destination) {
            return Route::road_only(self.road_km(from, to));
        }

        match self.nearest_port(from) {
            Some((port, road_km)) => {
                let sea_km = self.sea_km(port.coord, to);
                debug!(
                    "[ROUTE] {origin} -> {} ({road_km} km road) -> {destination} ({sea_km} km sea)",
                    port.name
                );
                Route::via_port(road_km, sea_km, &port.name)
            }
            None => {
                warn!("[ROUTE] no ports configured, routing {destination} by road");
                Route::road_only(self.road_km(from, to))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::StaticGeocoder;
    use anyhow::{Result, bail};

    const ORIGIN: &str = "Muğla, Turkey";

    fn router() -> GeoRouter<StaticGeocoder> {
        GeoRouter::new(StaticGeocoder::with_defaults(), RouterConfig::default())
    }

    struct FailingGeocoder;

    impl Geocoder for FailingGeocoder {
        async fn locate(&self, _label: &str) -> Result<Option<Coord>> {
            bail!("service unavailable")
        }
    }

    struct SlowGeocoder;

    impl Geocoder for SlowGeocoder {
        async fn locate(&self, label: &str) -> Result<Option<Coord>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(StaticGeocoder::with_defaults().lookup(label))
        }
    }

    #[tokio::test]
    async fn domestic_routes_have_no_sea_leg() {
        let route = router().route(ORIGIN, "Ankara, Turkey").await;
        assert_eq!(route.sea_km, 0);
        assert!(route.origin_port.is_none());
        assert_eq!(route.total_km, route.domestic_km);
        // ~490 km great-circle, inflated for the road
        assert!((550..700).contains(&route.domestic_km), "{route:?}");
    }

    #[tokio::test]
    async fn foreign_routes_leave_through_the_nearest_port() {
        let router = router();
        let route = router.route(ORIGIN, "Berlin, Germany").await;
        assert_eq!(route.origin_port.as_deref(), Some("Izmir"));
        assert!(route.sea_km > 0);
        assert_eq!(route.total_km, route.domestic_km + route.sea_km);

        let origin = StaticGeocoder::with_defaults().lookup(ORIGIN).unwrap();
        let other_ports_km = router
            .config()
            .ports
            .iter()
            .map(|p| router.road_km(origin, p.coord))
            .collect::<Vec<_>>();
        assert!(other_ports_km.iter().all(|km| *km >= route.domestic_km));
    }

    #[tokio::test]
    async fn unknown_destination_falls_back_to_the_table() {
        let route = router().route(ORIGIN, "Lyon, France").await;
        assert_eq!(route, Route::road_only(2500));
    }

    #[tokio::test]
    async fn geocoding_failure_falls_back_to_the_table() {
        let router = GeoRouter::new(FailingGeocoder, RouterConfig::default());
        let route = router.route(ORIGIN, "Berlin, Germany").await;
        assert_eq!(route, Route::road_only(3000));
    }

    #[tokio::test]
    async fn geocoding_timeout_falls_back_to_the_table() {
        let config = RouterConfig {
            geocode_timeout_ms: 10,
            ..RouterConfig::default()
        };
        let router = GeoRouter::new(SlowGeocoder, config);
        let route = router.route(ORIGIN, "Vienna, Austria").await;
        assert_eq!(route, Route::road_only(1400));
    }
}
