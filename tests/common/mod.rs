//! Common test utilities and helpers

pub mod fixtures;

/// Logging utilities for tests
pub mod logging {
    use std::sync::Once;
    use tracing::{debug, info};

    static INIT: Once = Once::new();

    /// Initialize test logging
    pub fn init_test_logging() {
        INIT.call_once(|| {
            // Another test harness may already own the global subscriber
            let _ = tracing::subscriber::set_global_default(
                tracing_subscriber::fmt()
                    .with_env_filter("academy_dashboard=debug,test=debug")
                    .with_test_writer()
                    .finish(),
            );
        });
    }

    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }

    pub fn log_test_data<T: std::fmt::Debug>(label: &str, data: &T) {
        debug!("📊 {}: {:?}", label, data);
    }
}
