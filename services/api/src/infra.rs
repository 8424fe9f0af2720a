use metrics_exporter_prometheus::PrometheusHandle;
use room_comfort::config::NarrationMode;
use room_comfort::narration::{Narrator, TemplateNarrator};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    /// `None` leaves the response `reason` empty.
    pub(crate) narrator: Option<Arc<dyn Narrator>>,
}

pub(crate) fn narrator_for(mode: NarrationMode) -> Option<Arc<dyn Narrator>> {
    match mode {
        NarrationMode::Template => Some(Arc::new(TemplateNarrator)),
        NarrationMode::Off => None,
    }
}
