//! Snapshot providers: the boundary that produces dashboard data.
//!
//! The dashboard never builds data itself. It asks the [`SnapshotProvider`]
//! found in context (or the default [`SyntheticProvider`]) through
//! [`load_snapshot`], which validates the result before any renderer sees it.

use std::fmt;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::snapshot::{
    CustomerSegment, HourlyActivity, ProductCategoryEntry, ProductMetric, SatisfactionScore,
    Snapshot, SnapshotError, HOURS_PER_DAY,
};
use super::timing;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    #[error("data source rejected the request: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] SnapshotError),
}

pub trait SnapshotProvider {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Produce one complete snapshot. Resolved once per dashboard mount.
    fn produce(&self) -> LocalBoxFuture<'static, Result<Snapshot, ProviderError>>;
}

/// Run `provider` and reject snapshots that break a data-model invariant.
pub async fn load_snapshot(provider: &dyn SnapshotProvider) -> Result<Rc<Snapshot>, LoadError> {
    let name = provider.name();
    tracing::debug!(provider = name, "requesting snapshot");

    let snapshot = provider.produce().await.map_err(|err| {
        tracing::warn!(provider = name, %err, "provider failed");
        LoadError::from(err)
    })?;

    let snapshot = snapshot.validated().map_err(|err| {
        tracing::warn!(provider = name, %err, "provider returned malformed snapshot");
        LoadError::from(err)
    })?;

    tracing::info!(
        provider = name,
        products = snapshot.product_metrics.len(),
        segments = snapshot.customer_segments.len(),
        "snapshot ready"
    );
    Ok(Rc::new(snapshot))
}

/// Cloneable handle for injecting a provider through Dioxus context.
#[derive(Clone)]
pub struct ProviderHandle(Rc<dyn SnapshotProvider>);

impl ProviderHandle {
    pub fn new(provider: impl SnapshotProvider + 'static) -> Self {
        Self(Rc::new(provider))
    }

    pub fn synthetic() -> Self {
        Self::new(SyntheticProvider::default())
    }

    pub fn provider(&self) -> &dyn SnapshotProvider {
        self.0.as_ref()
    }
}

impl PartialEq for ProviderHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProviderHandle").field(&self.0.name()).finish()
    }
}

/// Generates the café reference dataset; hourly activity is random per call.
#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider {
    seed: Option<u64>,
    latency_ms: u64,
}

impl SyntheticProvider {
    /// Same seed, same snapshot, on every call.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Await a timer before resolving, mimicking a remote source.
    ///
    /// On native targets the delay is a tokio timer, so a non-zero latency
    /// must be awaited inside a tokio runtime with time enabled (the desktop
    /// launcher runs one). Web builds use a browser timeout.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Build a snapshot synchronously from the given generator.
    pub fn generate(rng: &mut impl Rng) -> Snapshot {
        Snapshot {
            total_sales: 125_000.0,
            customer_count: 4_500,
            avg_order_value: 27.78,
            total_items: 8_750,
            sales_growth: 15.4,
            customer_satisfaction: 4.8,
            product_metrics: vec![
                product("Espresso", 4500.0, 4.8, 75.0, 15.0),
                product("Latte", 6200.0, 4.6, 82.0, 22.0),
                product("Cappuccino", 5100.0, 4.7, 78.0, 18.0),
                product("Mocha", 3800.0, 4.5, 70.0, 12.0),
                product("Cold Brew", 4200.0, 4.9, 85.0, 25.0),
            ],
            customer_segments: vec![
                segment("Regular", 45.0),
                segment("Occasional", 30.0),
                segment("New", 15.0),
                segment("Lost", 10.0),
            ],
            peak_hours: hourly_activity(rng),
            product_performance: vec![
                category_entry("Coffee", 400.0, "Beverages"),
                category_entry("Tea", 300.0, "Beverages"),
                category_entry("Pastries", 350.0, "Food"),
                category_entry("Sandwiches", 250.0, "Food"),
                category_entry("Desserts", 200.0, "Food"),
                category_entry("Smoothies", 150.0, "Beverages"),
            ],
            satisfaction_metrics: vec![
                score("Taste", 90.0),
                score("Service", 85.0),
                score("Ambience", 88.0),
                score("Speed", 82.0),
                score("Value", 86.0),
            ],
        }
    }
}

impl SnapshotProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn produce(&self) -> LocalBoxFuture<'static, Result<Snapshot, ProviderError>> {
        let seed = self.seed;
        let latency_ms = self.latency_ms;
        async move {
            if latency_ms > 0 {
                timing::sleep_ms(latency_ms).await;
            }
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Ok(Self::generate(&mut rng))
        }
        .boxed_local()
    }
}

/// Hands out a fixed outcome; useful for tests and static embeds.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    outcome: Result<Snapshot, ProviderError>,
}

impl FixtureProvider {
    pub fn ok(snapshot: Snapshot) -> Self {
        Self {
            outcome: Ok(snapshot),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl SnapshotProvider for FixtureProvider {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn produce(&self) -> LocalBoxFuture<'static, Result<Snapshot, ProviderError>> {
        futures::future::ready(self.outcome.clone()).boxed_local()
    }
}

fn hourly_activity(rng: &mut impl Rng) -> Vec<HourlyActivity> {
    (0..HOURS_PER_DAY as u8)
        .map(|hour| HourlyActivity {
            hour,
            traffic: rng.gen_range(20..120),
            revenue: rng.gen_range(200.0..1200.0),
            orders: rng.gen_range(10..60),
        })
        .collect()
}

fn product(name: &str, value: f64, satisfaction: f64, profit: f64, growth: f64) -> ProductMetric {
    ProductMetric {
        name: name.into(),
        value,
        satisfaction,
        profit,
        growth,
    }
}

fn segment(name: &str, value: f64) -> CustomerSegment {
    CustomerSegment {
        name: name.into(),
        value,
    }
}

fn category_entry(name: &str, size: f64, category: &str) -> ProductCategoryEntry {
    ProductCategoryEntry {
        name: name.into(),
        size,
        category: category.into(),
    }
}

fn score(aspect: &str, score: f64) -> SatisfactionScore {
    SatisfactionScore {
        aspect: aspect.into(),
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn synthetic_snapshots_satisfy_invariants() {
        for seed in 0..32 {
            let snapshot = block_on(SyntheticProvider::default().with_seed(seed).produce()).unwrap();
            assert_eq!(snapshot.validate(), Ok(()), "seed {seed}");
        }
    }

    #[test]
    fn hourly_values_stay_in_generator_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            let snapshot = SyntheticProvider::generate(&mut rng);
            assert_eq!(snapshot.peak_hours.len(), HOURS_PER_DAY);
            for (idx, entry) in snapshot.peak_hours.iter().enumerate() {
                assert_eq!(usize::from(entry.hour), idx);
                assert!((20..120).contains(&entry.traffic));
                assert!((200.0..1200.0).contains(&entry.revenue));
                assert!((10..60).contains(&entry.orders));
            }
        }
    }

    #[test]
    fn seeded_provider_is_deterministic() {
        let provider = SyntheticProvider::default().with_seed(42);
        let first = block_on(provider.produce()).unwrap();
        let second = block_on(provider.produce()).unwrap();
        assert_eq!(first, second);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn latency_resolves_under_a_tokio_timer() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let delayed = SyntheticProvider::default().with_seed(1).with_latency_ms(5);
        let started = std::time::Instant::now();
        let snapshot = runtime.block_on(load_snapshot(&delayed)).unwrap();
        assert!(started.elapsed() >= std::time::Duration::from_millis(5));

        let immediate = block_on(load_snapshot(&SyntheticProvider::default().with_seed(1))).unwrap();
        assert_eq!(snapshot, immediate);
    }

    #[test]
    fn load_rejects_malformed_snapshot() {
        let mut broken = SyntheticProvider::generate(&mut StdRng::seed_from_u64(1));
        broken.peak_hours.pop();
        let provider = FixtureProvider::ok(broken);
        let err = block_on(load_snapshot(&provider)).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Malformed(SnapshotError::HourCount { count: 23 })
        ));
    }

    #[test]
    fn load_surfaces_provider_failure() {
        let provider = FixtureProvider::failing(ProviderError::Unavailable("offline".into()));
        let err = block_on(load_snapshot(&provider)).unwrap_err();
        assert_eq!(
            err,
            LoadError::Provider(ProviderError::Unavailable("offline".into()))
        );
    }

    #[test]
    fn handles_compare_by_identity() {
        let a = ProviderHandle::synthetic();
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, ProviderHandle::synthetic());
    }
}
