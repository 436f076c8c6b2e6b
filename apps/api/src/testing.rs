//! In-memory doubles of the collaborator traits, for handler and sync tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, ResumeRecord};
use crate::pdf::{PdfError, PdfOptions, PdfRenderer};
use crate::photos::{validate_upload, PhotoError, PhotoStore};
use crate::resumes::store::{NewResume, ResumeStore, ResumeUpdate};
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Default)]
pub struct MemoryResumeStore {
    records: Mutex<HashMap<Uuid, ResumeRecord>>,
    document_writes: AtomicUsize,
    fail_updates: AtomicBool,
}

impl MemoryResumeStore {
    /// Number of `update_document` calls that hit an existing resume.
    pub fn document_writes(&self) -> usize {
        self.document_writes.load(Ordering::SeqCst)
    }

    /// Makes `update` fail like a dropped database connection.
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn create(&self, new: NewResume) -> Result<ResumeRecord, AppError> {
        let now = Utc::now();
        let record = ResumeRecord {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            title: new.title,
            template_key: new.template_key,
            style_settings: new.style_settings,
            document: new.document,
            created_at: now,
            updated_at: now,
        };
        self.records
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, AppError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ResumeRecord>, AppError> {
        let mut list: Vec<ResumeRecord> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(list)
    }

    async fn update(
        &self,
        id: Uuid,
        update: ResumeUpdate,
    ) -> Result<Option<ResumeRecord>, AppError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!("connection reset")));
        }
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = update.title {
            record.title = title;
        }
        if let Some(key) = update.template_key {
            record.template_key = key;
        }
        if let Some(style) = update.style_settings {
            record.style_settings = style;
        }
        if let Some(document) = update.document {
            record.document = document;
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn update_document(
        &self,
        id: Uuid,
        document: &ResumeDocument,
    ) -> Result<bool, AppError> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&id) {
            Some(record) => {
                record.document = document.clone();
                record.updated_at = Utc::now();
                self.document_writes.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.records.lock().unwrap().remove(&id).is_some())
    }
}

/// Keeps uploads in memory and hands out fake CDN URLs.
pub struct FakePhotoStore {
    pub max_bytes: usize,
    pub uploads: Mutex<Vec<(String, Bytes)>>,
    /// When set, `url` fails like an unreachable bucket.
    pub fail_urls: bool,
}

impl FakePhotoStore {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            uploads: Mutex::new(Vec::new()),
            fail_urls: false,
        }
    }
}

#[async_trait]
impl PhotoStore for FakePhotoStore {
    async fn upload(
        &self,
        user_id: Uuid,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, PhotoError> {
        validate_upload(content_type, bytes.len(), self.max_bytes)?;
        let file_id = format!("{user_id}/{}", Uuid::new_v4());
        self.uploads.lock().unwrap().push((file_id.clone(), bytes));
        Ok(file_id)
    }

    async fn url(&self, file_id: &str) -> Result<String, PhotoError> {
        if self.fail_urls {
            return Err(PhotoError::Presign("bucket unreachable".to_string()));
        }
        Ok(format!("https://photos.test/{file_id}"))
    }
}

/// Records the HTML it was asked to print.
#[derive(Default)]
pub struct FakePdfRenderer {
    pub printed: Mutex<Vec<String>>,
    pub fail: bool,
}

pub const FAKE_PDF: &[u8] = b"%PDF-1.7 fake";

#[async_trait]
impl PdfRenderer for FakePdfRenderer {
    async fn render(&self, html: &str, _options: &PdfOptions) -> Result<Bytes, PdfError> {
        if self.fail {
            return Err(PdfError::Upstream {
                status: 503,
                message: "printer offline".to_string(),
            });
        }
        self.printed.lock().unwrap().push(html.to_string());
        Ok(Bytes::from_static(FAKE_PDF))
    }
}

/// Handles on the doubles behind a test router.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryResumeStore>,
    pub photos: Arc<FakePhotoStore>,
    pub pdf: Arc<FakePdfRenderer>,
}

pub fn test_app() -> TestApp {
    test_app_with(FakePhotoStore::new(Config::for_tests().max_photo_bytes), FakePdfRenderer::default())
}

pub fn test_app_with(photos: FakePhotoStore, pdf: FakePdfRenderer) -> TestApp {
    let store = Arc::new(MemoryResumeStore::default());
    let photos = Arc::new(photos);
    let pdf = Arc::new(pdf);
    let state = AppState::new(
        store.clone(),
        photos.clone(),
        pdf.clone(),
        Config::for_tests(),
    );
    TestApp {
        router: build_router(state.clone()),
        state,
        store,
        photos,
        pdf,
    }
}
