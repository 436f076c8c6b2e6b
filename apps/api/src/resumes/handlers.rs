//! Axum route handlers for the resume builder.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, ResumeRecord, StyleSettings};
use crate::pdf::PdfOptions;
use crate::render::templates::templates;
use crate::render::{html_document, lookup, RenderContext, TemplateDescriptor};
use crate::resumes::store::{NewResume, ResumeUpdate};
use crate::sections::drag::{DragOutcome, DragSession};
use crate::sections::{move_adjacent, split, Direction, Regions, Scope, SectionKey, SectionOrder};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeRequest {
    pub user_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub template_key: Option<String>,
    #[serde(default)]
    pub style_settings: Option<StyleSettings>,
    #[serde(default)]
    pub document: Option<ResumeDocument>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateResumeRequest {
    pub title: Option<String>,
    pub template_key: Option<String>,
    pub style_settings: Option<StyleSettings>,
    pub document: Option<ResumeDocument>,
}

/// Section keys arrive as plain strings so a stale or foreign key is a no-op
/// rather than a rejected request.
#[derive(Debug, Deserialize)]
pub struct MoveSectionRequest {
    pub section: String,
    pub direction: Direction,
    #[serde(default)]
    pub scope: Option<Scope>,
}

#[derive(Debug, Deserialize)]
pub struct DropSectionRequest {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub scope: Option<Scope>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderResponse {
    pub changed: bool,
    pub section_order: SectionOrder,
    pub regions: Regions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub template_key: String,
    #[serde(default)]
    pub style_settings: StyleSettings,
    #[serde(default)]
    pub document: ResumeDocument,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadResponse {
    pub file_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// The template registered under `key`, or the configured default.
fn resolve_template(key: &str, default_key: &str) -> &'static TemplateDescriptor {
    if let Some(template) = lookup(key) {
        return template;
    }
    warn!("Unknown template '{key}', falling back to '{default_key}'");
    lookup(default_key).unwrap_or(&templates()[0])
}

fn require_known_template(key: &str) -> Result<(), AppError> {
    if lookup(key).is_none() {
        return Err(AppError::Validation(format!("Unknown template '{key}'")));
    }
    Ok(())
}

fn require_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    Ok(title.to_string())
}

async fn load(state: &AppState, id: Uuid) -> Result<ResumeRecord, AppError> {
    state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// Photo URL for templates that show one. A failed lookup degrades to the
/// initials placeholder.
async fn photo_url(
    state: &AppState,
    template: &TemplateDescriptor,
    document: &ResumeDocument,
) -> Option<String> {
    if !template.show_photo {
        return None;
    }
    let file_id = document.personal_info.photo_file_id.as_deref()?;
    match state.photos.url(file_id).await {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Photo {file_id} unavailable, rendering initials: {e}");
            None
        }
    }
}

async fn render_html(
    state: &AppState,
    template_key: &str,
    document: &ResumeDocument,
    style: &StyleSettings,
) -> String {
    let template = resolve_template(template_key, &state.config.default_template);
    let photo = photo_url(state, template, document).await;
    let ctx = RenderContext {
        document,
        style,
        photo_url: photo.as_deref(),
    };
    html_document(template, &ctx)
}

fn parse_key(raw: &str) -> Option<SectionKey> {
    match raw.parse::<SectionKey>() {
        Ok(key) => Some(key),
        Err(e) => {
            debug!("Ignoring reorder request: {e}");
            None
        }
    }
}

/// Applies `edit` to the latest version of the document (an unsaved draft
/// wins over the stored copy) and persists it when the order changed.
async fn reorder(
    state: &AppState,
    id: Uuid,
    edit: impl FnOnce(&mut ResumeDocument, &[SectionKey]) -> bool,
) -> Result<ReorderResponse, AppError> {
    let record = load(state, id).await?;
    let template = resolve_template(&record.template_key, &state.config.default_template);
    let draft = state.drafts.take(id).await;
    let mut document = draft.clone().unwrap_or(record.document);

    let changed = edit(&mut document, template.sidebar_sections);
    if changed || draft.is_some() {
        let update = ResumeUpdate {
            document: Some(document.clone()),
            ..Default::default()
        };
        let saved = match state.store.update(id, update).await {
            Ok(saved) => saved,
            Err(e) => {
                // Requeue the unsaved edits; the reorder itself is lost.
                if let Some(draft) = draft {
                    state.drafts.push(id, draft);
                }
                return Err(e);
            }
        };
        saved.ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    }

    let section_order = document.section_order();
    let regions = split(&section_order, template.sidebar_sections);
    Ok(ReorderResponse {
        changed,
        section_order,
        regions,
    })
}

/// The region holding `key` on sidebar templates; the whole order otherwise.
fn default_scope(key: SectionKey, sidebar: &[SectionKey]) -> Scope {
    if sidebar.is_empty() {
        Scope::All
    } else if sidebar.contains(&key) {
        Scope::Sidebar
    } else {
        Scope::Main
    }
}

fn attachment_name(title: &str) -> String {
    let slug: String = title
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{slug}.pdf")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<&'static [TemplateDescriptor]> {
    Json(templates())
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(request): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let title = require_title(&request.title)?;
    let template_key = request
        .template_key
        .unwrap_or_else(|| state.config.default_template.clone());
    require_known_template(&template_key)?;

    let record = state
        .store
        .create(NewResume {
            user_id: request.user_id,
            title,
            template_key,
            style_settings: request.style_settings.unwrap_or_default(),
            document: request.document.unwrap_or_default(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/resumes?user_id=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    Ok(Json(state.store.list_by_user(params.user_id).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    Ok(Json(load(&state, id).await?))
}

/// PUT /api/v1/resumes/:id
///
/// Explicit save. Any pending draft is discarded so it cannot overwrite this.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    let title = request.title.as_deref().map(require_title).transpose()?;
    if let Some(key) = &request.template_key {
        require_known_template(key)?;
    }

    state.drafts.cancel(id).await;
    let record = state
        .store
        .update(
            id,
            ResumeUpdate {
                title,
                template_key: request.template_key,
                style_settings: request.style_settings,
                document: request.document,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(record))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.drafts.cancel(id).await;
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/resumes/:id/draft
///
/// Autosave. The write happens once edits pause; the response only
/// acknowledges that the draft was queued.
pub async fn handle_save_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(document): Json<ResumeDocument>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    load(&state, id).await?;
    state.drafts.push(id, document);
    debug!("Draft of resume {id} queued ({} pending)", state.drafts.pending_count());
    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "queued" }))))
}

/// POST /api/v1/resumes/:id/sections/move
pub async fn handle_move_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MoveSectionRequest>,
) -> Result<Json<ReorderResponse>, AppError> {
    let section = parse_key(&request.section);
    let response = reorder(&state, id, |doc, sidebar| match section {
        Some(section) => {
            let scope = request
                .scope
                .unwrap_or_else(|| default_scope(section, sidebar));
            move_adjacent(doc, section, request.direction, scope, sidebar)
        }
        None => false,
    })
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/resumes/:id/sections/drop
///
/// Completes a drag gesture: the dragged section is dropped on `target`.
pub async fn handle_drop_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DropSectionRequest>,
) -> Result<Json<ReorderResponse>, AppError> {
    let source = parse_key(&request.source);
    let target = parse_key(&request.target);
    let response = reorder(&state, id, |doc, sidebar| {
        let (Some(source), Some(target)) = (source, target) else {
            return false;
        };
        let scope = request
            .scope
            .unwrap_or_else(|| default_scope(source, sidebar));
        let mut session = DragSession::new(scope);
        session.start(source);
        session.hover(target);
        matches!(
            session.release(doc, sidebar),
            DragOutcome::Dropped { changed: true }
        )
    })
    .await?;
    Ok(Json(response))
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_preview_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let record = load(&state, id).await?;
    let html = render_html(
        &state,
        &record.template_key,
        &record.document,
        &record.style_settings,
    )
    .await;
    Ok(Html(html))
}

/// POST /api/v1/render/preview
///
/// Renders an unsaved document, e.g. while the user browses templates.
pub async fn handle_render_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Html<String> {
    Html(
        render_html(
            &state,
            &request.template_key,
            &request.document,
            &request.style_settings,
        )
        .await,
    )
}

/// GET /api/v1/resumes/:id/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let record = load(&state, id).await?;
    let html = render_html(
        &state,
        &record.template_key,
        &record.document,
        &record.style_settings,
    )
    .await;
    let pdf = state.pdf.render(&html, &PdfOptions::default()).await?;
    info!("Exported resume {id} as PDF ({} bytes)", pdf.len());

    let disposition = format!("attachment; filename=\"{}\"", attachment_name(&record.title));
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

/// POST /api/v1/photos?user_id=
///
/// Multipart upload; the image is read from the `file` field (or the first
/// field carrying a content type).
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<PhotoUploadResponse>), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let content_type = match field.content_type() {
            Some(ct) => ct.to_string(),
            None if field.name() == Some("file") => String::new(),
            None => continue,
        };
        let bytes = field.bytes().await.map_err(multipart_error)?;
        let file_id = state
            .photos
            .upload(params.user_id, bytes, &content_type)
            .await?;
        return Ok((StatusCode::CREATED, Json(PhotoUploadResponse { file_id })));
    }
    Err(AppError::Validation("No image found in upload".to_string()))
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
