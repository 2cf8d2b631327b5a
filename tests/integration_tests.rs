use geocluster::prelude::*;
use geocluster::CacheKey;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answers every nearby lookup with a place named after the query and counts calls.
#[derive(Default)]
struct CountingService {
    nearby_calls: AtomicUsize,
}

impl GeocodingService for CountingService {
    fn nearby_place(
        &self,
        latitude: f64,
        longitude: f64,
        _feature_class: Option<&str>,
        _feature_code: Option<&str>,
    ) -> Result<Value> {
        self.nearby_calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({
            "geonames": [{
                "countryName": "Italy",
                "countryCode": "IT",
                "adminName1": "Latium",
                "name": format!("place@{:.4},{:.4}", latitude, longitude),
                "geonameId": 3169070,
                "lat": latitude,
                "lng": longitude,
                "distance": "0.1"
            }]
        }))
    }

    fn feature(&self, geoname_id: u64) -> Result<Value> {
        Ok(json!({"status": {"message": format!("no feature {}", geoname_id), "value": 15}}))
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn stored(name: &str) -> PlaceRecord {
    PlaceRecord {
        place_name: name.to_string(),
        ..Default::default()
    }
}

fn calls(client: &GeocodingClient<CountingService>) -> usize {
    client.service().nearby_calls.load(Ordering::SeqCst)
}

#[test]
fn test_cache_hit_avoids_service() {
    init_logging();
    let cache = Arc::new(GeocodeCache::new());
    cache.insert(CacheKey::new(10.0, 20.0, Some("P"), None), stored("cached"));

    let client = GeocodingClient::new(CountingService::default(), cache, &Config::default());
    let record = client
        .lookup_nearby_place(10.00001, 20.00001, Some("P"), None)
        .unwrap();

    assert_eq!(record.place_name, "cached");
    assert_eq!(calls(&client), 0);
}

#[test]
fn test_cache_widening_rules() {
    let cache = Arc::new(GeocodeCache::new());
    cache.insert(CacheKey::new(10.0, 20.0, Some("P"), None), stored("cached"));
    let client = GeocodingClient::new(CountingService::default(), cache.clone(), &Config::default());

    // ~1.5 m: hit, not stored again
    client
        .lookup_nearby_place(10.00001, 20.00001, Some("P"), None)
        .unwrap();
    assert_eq!(cache.len(), 1);

    // ~33 m: hit, stored under the new coordinates
    client
        .lookup_nearby_place(10.0003, 20.0, Some("P"), None)
        .unwrap();
    assert_eq!(cache.len(), 2);

    // ~66 m from the first entry but ~33 m from the widened one
    let record = client
        .lookup_nearby_place(10.0006, 20.0, Some("P"), None)
        .unwrap();
    assert_eq!(record.place_name, "cached");
    assert_eq!(calls(&client), 0);

    let stats = cache.stats();
    assert_eq!(stats.hits, 3);
    assert_eq!(stats.widened, 2);
    assert_eq!(stats.misses, 0);
}

#[test]
fn test_shared_cache_between_clients() {
    let config = Config::default();
    let cache = Arc::new(GeocodeCache::from_config(&config));
    let first = GeocodingClient::new(CountingService::default(), cache.clone(), &config);
    let second = GeocodingClient::new(CountingService::default(), cache, &config);

    let a = first.lookup_nearby_populated_place(41.9028, 12.4964).unwrap();
    let b = second
        .lookup_nearby_populated_place(41.90281, 12.49641)
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(calls(&first), 1);
    assert_eq!(calls(&second), 0);
}

#[test]
fn test_cache_from_config_distance() {
    let config = Config::default().with_cache_max_distance(5.0);
    let cache = Arc::new(GeocodeCache::from_config(&config));
    let client = GeocodingClient::new(CountingService::default(), cache, &config);

    client.lookup_nearby_populated_place(45.0, 9.0).unwrap();
    // ~11 m: outside a 5 m radius
    client.lookup_nearby_populated_place(45.0001, 9.0).unwrap();
    assert_eq!(calls(&client), 2);
}

#[test]
fn test_feature_status_propagates() {
    let client = GeocodingClient::new(
        CountingService::default(),
        Arc::new(GeocodeCache::new()),
        &Config::default(),
    );
    let err = client.lookup_feature(42).unwrap_err();
    assert!(matches!(err, GeoError::ServiceStatus { ref value } if value == "15"));
    assert_eq!(err.to_string(), "Geonames: call returned status 15");
}

#[test]
fn test_cluster_then_geocode() {
    init_logging();
    let config = Config::default().with_big_virtual_folders_threshold(3);
    let reducer = ClusterReducer::from_config(&config);

    // two photo spots in Rome ~1.4 km apart, four shots each
    let mut photos = Vec::new();
    for i in 0..4 {
        photos.push(MediaPoint::new(
            41.8902 + i as f64 * 1e-5,
            12.4922,
            format!("colosseo_{i}"),
        ));
        photos.push(MediaPoint::new(
            41.9009 + i as f64 * 1e-5,
            12.4833,
            format!("trevi_{i}"),
        ));
    }

    let clusters = reducer.reduce_to_clusters(photos, 100.0);
    assert!(clusters.iter().all(|c| c.len() <= 3));
    assert_eq!(clusters.iter().map(|c| c.len()).sum::<usize>(), 8);
    for cluster in &clusters {
        let prefix = cluster.members()[0].payload.split('_').next().unwrap();
        assert!(
            cluster
                .members()
                .iter()
                .all(|m| m.payload.starts_with(prefix))
        );
    }

    let client = GeocodingClient::new(
        CountingService::default(),
        Arc::new(GeocodeCache::from_config(&config)),
        &config,
    );
    for cluster in &clusters {
        let place = client.lookup_cluster_place(cluster).unwrap();
        assert_eq!(place.country_code, "IT");
        assert_eq!(place.region_code, config.unspecified_geonames_code);
    }

    // each spot is only a few meters across, so one request per spot
    assert_eq!(calls(&client), 2);
}
