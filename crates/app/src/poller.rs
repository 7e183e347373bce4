//! Background poller: refreshes the switch state on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ports::{HttpClient, TemplateRenderer};
use crate::switch::RestSwitch;

/// Default interval between two refreshes.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);

/// Spawn a task calling [`RestSwitch::refresh_state`] every `interval`.
///
/// The first refresh happens immediately. Failures are logged and the loop
/// keeps going; abort the returned handle to stop it.
pub fn spawn_poller<H, T>(switch: Arc<RestSwitch<H, T>>, interval: Duration) -> JoinHandle<()>
where
    H: HttpClient + Send + Sync + 'static,
    T: TemplateRenderer + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let previous = switch.state();
            // Failures are already logged by the switch.
            let Ok(state) = switch.refresh_state().await else {
                continue;
            };
            if state == previous {
                continue;
            }
            if state.is_known() {
                tracing::info!(
                    switch = switch.name(),
                    from = %previous,
                    to = %state,
                    "switch state changed",
                );
            } else {
                tracing::warn!(
                    switch = switch.name(),
                    from = %previous,
                    "resource answered with an unrecognised state",
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{HttpResponse, TemplateError, TransportError};
    use restswitch_domain::config::SwitchConfig;
    use restswitch_domain::entity::SwitchState;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves the bodies in order, then refuses connections.
    struct ScriptedHttp {
        bodies: Mutex<Vec<&'static str>>,
        calls: AtomicUsize,
    }

    impl ScriptedHttp {
        fn new(bodies: &[&'static str]) -> Self {
            let mut bodies = bodies.to_vec();
            bodies.reverse();
            Self {
                bodies: Mutex::new(bodies),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl HttpClient for ScriptedHttp {
        async fn get(
            &self,
            _url: &str,
            _timeout: Duration,
        ) -> Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let body = self.bodies.lock().unwrap().pop();
            match body {
                Some(body) => Ok(HttpResponse::new(200, body)),
                None => Err(TransportError::Connect("connection refused".into())),
            }
        }

        async fn post(
            &self,
            _url: &str,
            _body: String,
            _timeout: Duration,
        ) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::new(200, ""))
        }
    }

    struct PlainTemplates;

    impl TemplateRenderer for PlainTemplates {
        fn validate(&self, _template: &str) -> Result<(), TemplateError> {
            Ok(())
        }

        fn render(&self, template: &str) -> Result<String, TemplateError> {
            Ok(template.to_string())
        }

        fn render_with_possible_json(&self, _: &str, _: &str, error_value: &str) -> String {
            error_value.to_string()
        }
    }

    fn switch(http: &Arc<ScriptedHttp>) -> Arc<RestSwitch<Arc<ScriptedHttp>, PlainTemplates>> {
        Arc::new(RestSwitch::new(
            SwitchConfig::new("http://host/switch"),
            Arc::clone(http),
            PlainTemplates,
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn should_refresh_immediately_then_on_every_tick() {
        let http = Arc::new(ScriptedHttp::new(&["OFF", "ON", "ON"]));
        let switch = switch(&http);
        let handle = spawn_poller(Arc::clone(&switch), Duration::from_secs(30));

        tokio::time::sleep(Duration::from_secs(65)).await;
        handle.abort();

        assert_eq!(http.calls.load(Ordering::SeqCst), 3);
        assert_eq!(switch.state(), SwitchState::On);
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_polling_after_failures() {
        let http = Arc::new(ScriptedHttp::new(&["ON"]));
        let switch = switch(&http);
        let handle = spawn_poller(Arc::clone(&switch), Duration::from_secs(10));

        tokio::time::sleep(Duration::from_secs(35)).await;
        handle.abort();

        assert_eq!(http.calls.load(Ordering::SeqCst), 4);
        assert_eq!(switch.state(), SwitchState::On);
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_polling_after_unrecognised_body() {
        let http = Arc::new(ScriptedHttp::new(&["ON", "standby", "OFF"]));
        let switch = switch(&http);
        let handle = spawn_poller(Arc::clone(&switch), Duration::from_secs(10));

        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(switch.state(), SwitchState::Unknown);

        tokio::time::sleep(Duration::from_secs(10)).await;
        handle.abort();

        assert_eq!(http.calls.load(Ordering::SeqCst), 3);
        assert_eq!(switch.state(), SwitchState::Off);
    }
}
