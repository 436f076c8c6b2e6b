use std::sync::Arc;

use crate::config::Config;
use crate::pdf::PdfRenderer;
use crate::photos::PhotoStore;
use crate::resumes::store::ResumeStore;
use crate::sync::DraftSync;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Default: PgResumeStore.
    pub store: Arc<dyn ResumeStore>,
    /// Profile photo storage. Default: S3PhotoStore.
    pub photos: Arc<dyn PhotoStore>,
    /// Headless-browser print service. Default: HttpPdfRenderer.
    pub pdf: Arc<dyn PdfRenderer>,
    /// Pending autosaves, one debouncer per resume.
    pub drafts: DraftSync,
    pub config: Config,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ResumeStore>,
        photos: Arc<dyn PhotoStore>,
        pdf: Arc<dyn PdfRenderer>,
        config: Config,
    ) -> Self {
        let drafts = DraftSync::new(Arc::clone(&store), config.draft_sync_quiet);
        AppState {
            store,
            photos,
            pdf,
            drafts,
            config,
        }
    }
}
