//! Prometheus metrics.
//!
//! Request counts and latency are labelled by route template, never by
//! raw path, so entry ids do not explode the series count.

use prometheus_client::encoding::{EncodeLabelSet, EncodeLabelValue, text::encode};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{Histogram, exponential_buckets};
use prometheus_client::registry::Registry;

/// Labels for request series.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RouteLabels {
    pub method: String,
    pub route: String,
    pub status: u16,
}

/// Entry write operations tracked by [`Metrics::record_entry_op`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum EntryOp {
    Create,
    Update,
    Publish,
    Unpublish,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct EntryOpLabels {
    op: EntryOp,
}

/// Kernel metrics registry.
pub struct Metrics {
    registry: Registry,
    requests: Family<RouteLabels, Counter>,
    request_seconds: Family<RouteLabels, Histogram>,
    entry_ops: Family<EntryOpLabels, Counter>,
    entry_conflicts: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let requests = Family::<RouteLabels, Counter>::default();
        registry.register("http_requests", "HTTP requests served", requests.clone());

        // 0.5ms .. ~1s
        let request_seconds = Family::<RouteLabels, Histogram>::new_with_constructor(|| {
            Histogram::new(exponential_buckets(0.0005, 2.0, 12))
        });
        registry.register(
            "http_request_duration_seconds",
            "HTTP request latency",
            request_seconds.clone(),
        );

        let entry_ops = Family::<EntryOpLabels, Counter>::default();
        registry.register(
            "entry_operations",
            "Successful content entry writes by operation",
            entry_ops.clone(),
        );

        let entry_conflicts = Counter::default();
        registry.register(
            "entry_conflicts",
            "Entry updates refused for a stale version",
            entry_conflicts.clone(),
        );

        Self {
            registry,
            requests,
            request_seconds,
            entry_ops,
            entry_conflicts,
        }
    }

    /// Count and time one request. `route` is the matched route template.
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration_secs: f64) {
        let labels = RouteLabels {
            method: method.to_string(),
            route: route.to_string(),
            status,
        };
        self.requests.get_or_create(&labels).inc();
        self.request_seconds
            .get_or_create(&labels)
            .observe(duration_secs);
    }

    pub fn record_entry_op(&self, op: EntryOp) {
        self.entry_ops.get_or_create(&EntryOpLabels { op }).inc();
    }

    pub fn record_entry_conflict(&self) {
        self.entry_conflicts.inc();
    }

    pub fn entry_conflicts(&self) -> u64 {
        self.entry_conflicts.get()
    }

    /// Render the registry in Prometheus text format.
    pub fn encode(&self) -> String {
        let mut buffer = String::new();
        // Writing into a String cannot fail
        if let Err(e) = encode(&mut buffer, &self.registry) {
            tracing::error!(error = %e, "failed to encode metrics");
        }
        buffer
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_registered() {
        let output = Metrics::new().encode();
        assert!(output.contains("entry_conflicts_total"));
        assert!(output.contains("entry_operations"));
    }

    #[test]
    fn test_request_labelled_by_route() {
        let metrics = Metrics::new();
        metrics.record_request("GET", "/api/entries/{id}", 404, 0.002);

        let output = metrics.encode();
        assert!(output.contains("http_requests_total"));
        assert!(output.contains(r#"route="/api/entries/{id}""#));
        assert!(output.contains(r#"status="404""#));
    }

    #[test]
    fn test_entry_ops_by_operation() {
        let metrics = Metrics::new();
        metrics.record_entry_op(EntryOp::Publish);
        metrics.record_entry_op(EntryOp::Publish);
        metrics.record_entry_conflict();

        let output = metrics.encode();
        assert!(output.contains(r#"entry_operations_total{op="Publish"} 2"#));
        assert_eq!(metrics.entry_conflicts(), 1);
    }
}
