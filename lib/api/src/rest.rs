use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use relevant_core::{
    ContentId, ContentItem, RelevanceEngine, RelevanceQuery, Term, TermId, Vocabulary,
};
use relevant_storage::StorageManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Multi-select input in either normalized or checkbox-group form.
///
/// Checkbox groups follow the convention that an option is selected when
/// its value equals its key; everything else (0, false, null) is unchecked.
/// The engine only ever sees the normalized set.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SelectionInput {
    List(Vec<String>),
    Checkboxes(std::collections::HashMap<String, serde_json::Value>),
}

impl SelectionInput {
    pub fn into_set(self) -> BTreeSet<String> {
        match self {
            SelectionInput::List(values) => values.into_iter().collect(),
            SelectionInput::Checkboxes(map) => map
                .into_iter()
                .filter(|(key, value)| value.as_str() == Some(key.as_str()))
                .map(|(key, _)| key)
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct VocabularyRequest {
    label: String,
}

#[derive(Deserialize)]
struct UpsertTermsRequest {
    terms: Vec<TermRequest>,
}

#[derive(Deserialize)]
struct TermRequest {
    id: TermId,
    vocabulary: String,
}

#[derive(Deserialize)]
struct UpsertContentRequest {
    items: Vec<ContentItem>,
}

#[derive(Deserialize)]
struct RelevantRequest {
    vocabularies: Option<SelectionInput>,
    types: Option<SelectionInput>,
    #[serde(default)]
    exclude: Vec<ContentId>,
    limit: Option<usize>,
    timeout_ms: Option<u64>,
    view_mode: Option<String>,
}

#[derive(Serialize)]
struct StatusResponse {
    items: usize,
    terms: usize,
    vocabularies: usize,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(storage: Arc<StorageManager>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(storage.clone()))
                .route("/status", web::get().to(status))
                .route("/vocabularies", web::get().to(list_vocabularies))
                .route("/vocabularies/{vid}", web::put().to(upsert_vocabulary))
                .route("/terms", web::put().to(upsert_terms))
                .route("/types", web::get().to(list_types))
                .route("/content", web::put().to(upsert_content))
                .route("/content/{id}", web::get().to(get_content))
                .route("/content/{id}", web::delete().to(delete_content))
                .route("/content/{id}/relevant", web::post().to(find_relevant))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn status(storage: web::Data<Arc<StorageManager>>) -> ActixResult<HttpResponse> {
    let index = storage.index();
    Ok(HttpResponse::Ok().json(StatusResponse {
        items: index.count(),
        terms: index.term_count(),
        vocabularies: index.vocabulary_count(),
    }))
}

async fn list_vocabularies(storage: web::Data<Arc<StorageManager>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(storage.index().list_vocabularies()))
}

async fn upsert_vocabulary(
    storage: web::Data<Arc<StorageManager>>,
    path: web::Path<String>,
    req: web::Json<VocabularyRequest>,
) -> ActixResult<HttpResponse> {
    let vid = path.into_inner();
    storage
        .index()
        .upsert_vocabulary(Vocabulary::new(vid, req.into_inner().label));
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

async fn upsert_terms(
    storage: web::Data<Arc<StorageManager>>,
    req: web::Json<UpsertTermsRequest>,
) -> ActixResult<HttpResponse> {
    let terms = req.into_inner().terms;
    let count = terms.len();
    storage
        .index()
        .upsert_terms(terms.into_iter().map(|t| Term::new(t.id, t.vocabulary)));
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok", "upserted": count})))
}

async fn list_types(storage: web::Data<Arc<StorageManager>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(storage.index().list_types()))
}

async fn upsert_content(
    storage: web::Data<Arc<StorageManager>>,
    req: web::Json<UpsertContentRequest>,
) -> ActixResult<HttpResponse> {
    let items = req.into_inner().items;
    let count = items.len();
    let index = storage.index();
    for item in items {
        index.upsert(item);
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok", "upserted": count})))
}

async fn get_content(
    storage: web::Data<Arc<StorageManager>>,
    path: web::Path<ContentId>,
) -> ActixResult<HttpResponse> {
    match storage.index().get(path.into_inner()) {
        Some(item) => Ok(HttpResponse::Ok().json(item)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Content item not found"
        }))),
    }
}

async fn delete_content(
    storage: web::Data<Arc<StorageManager>>,
    path: web::Path<ContentId>,
) -> ActixResult<HttpResponse> {
    let removed = storage.index().remove(path.into_inner());
    if removed {
        Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Content item not found"
        })))
    }
}

/// The relevance endpoint runs the lenient execute boundary: a failed query
/// is logged inside the engine and surfaces here as an empty result set, so
/// the rendering side simply omits its related-content section.
async fn find_relevant(
    storage: web::Data<Arc<StorageManager>>,
    path: web::Path<ContentId>,
    req: web::Json<RelevantRequest>,
) -> ActixResult<HttpResponse> {
    let reference = path.into_inner();
    let req = req.into_inner();

    let mut query = RelevanceQuery::new(reference);
    if let Some(vocabularies) = req.vocabularies {
        query = query.vocabularies(vocabularies.into_set());
    }
    if let Some(types) = req.types {
        query = query.allowed_types(types.into_set());
    }
    for id in req.exclude {
        query = query.exclude(id);
    }
    if let Some(limit) = req.limit {
        query = query.max_results(limit);
    }
    if let Some(timeout_ms) = req.timeout_ms {
        query = query.timeout(Duration::from_millis(timeout_ms));
    }

    let index = storage.index();
    let engine = RelevanceEngine::new(index.as_ref());
    let hits = engine.execute(&query);

    if let Some(view_mode) = req.view_mode {
        let resolved = match engine.resolve(&hits, Some(&view_mode)) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(reference, "failed to resolve display items: {e}");
                Vec::new()
            }
        };
        return Ok(HttpResponse::Ok().json(serde_json::json!({"results": resolved})));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({"results": hits})))
}
