use std::sync::Arc;

use tokio::sync::Mutex;

use crate::export::raster::Rasterizer;
use crate::export::CaptureOptions;
use crate::llm_client::TextGenerator;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single live session. Never hold the guard across an `.await`.
    pub session: Arc<Mutex<Session>>,
    /// Rewrites text. Default: `LlmClient`; tests swap in a stub.
    pub generator: Arc<dyn TextGenerator>,
    /// Captures a rendered document for export. Default: `BoxRasterizer`.
    pub rasterizer: Arc<dyn Rasterizer>,
    pub capture: CaptureOptions,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, rasterizer: Arc<dyn Rasterizer>) -> Self {
        AppState {
            session: Arc::new(Mutex::new(Session::new())),
            generator,
            rasterizer,
            capture: CaptureOptions::default(),
        }
    }
}
