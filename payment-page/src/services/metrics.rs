use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Safe to call more than once.
///
/// When another recorder already owns the global slot (several apps in one
/// test binary), the handle renders an empty registry instead of failing.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        let builder = PrometheusBuilder::new();
        let recorder = builder.build_recorder();
        let handle = recorder.handle();

        match metrics::set_global_recorder(recorder) {
            Ok(()) => {
                metrics::describe_counter!(
                    "payment_page_actions_total",
                    "Visitor actions by channel and outcome"
                );
            }
            Err(_) => tracing::warn!("Metrics recorder already installed"),
        }

        handle
    });
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}
