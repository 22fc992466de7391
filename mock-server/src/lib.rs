use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const RESOURCE: &str = "/sample";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SampleQuery {
    pub name: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl SampleQuery {
    fn matches(&self, sample: &Sample) -> bool {
        self.name.as_ref().is_none_or(|name| &sample.name == name)
            && self.status.as_ref().is_none_or(|status| &sample.status == status)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePage {
    pub content: Vec<Sample>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub number: usize,
    pub size: usize,
}

#[derive(Debug, Deserialize)]
pub struct PatchOperation {
    pub op: String,
    pub path: String,
    #[serde(default)]
    pub value: Option<Value>,
}

/// Records in insertion order.
pub type Db = Arc<RwLock<Vec<Sample>>>;

const DEFAULT_PAGE_SIZE: usize = 20;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    let routes = Router::new()
        .route("/count", get(count))
        .route("/count-all", get(count_all))
        .route("/get-one", get(get_one))
        .route("/get-many", get(get_many))
        .route("/get-page", get(get_page))
        .route("/delete", delete(delete_one))
        .route("/delete-many", delete(delete_many))
        .route("/save", post(save))
        .route("/save-many", post(save_many))
        .route("/update", put(update))
        .route("/update-many", put(update_many))
        .route("/edit", patch(edit))
        .route("/edit-many", patch(edit_many))
        .route(
            "/{id}",
            get(get_by_id).delete(delete_by_id).put(update_by_id).patch(edit_by_id),
        )
        .route_layer(middleware::from_fn(require_token));
    Router::new().nest(RESOURCE, routes).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_token(request: Request, next: Next) -> Result<Response, StatusCode> {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.is_empty());
    if !authorized {
        tracing::debug!(path = %request.uri().path(), "rejecting request without token");
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

async fn count(State(db): State<Db>, Query(query): Query<SampleQuery>) -> Json<usize> {
    let samples = db.read().await;
    Json(samples.iter().filter(|s| query.matches(s)).count())
}

async fn count_all(State(db): State<Db>) -> Json<usize> {
    Json(db.read().await.len())
}

async fn get_by_id(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Sample>, StatusCode> {
    let samples = db.read().await;
    samples
        .iter()
        .find(|s| s.id.as_deref() == Some(id.as_str()))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_one(State(db): State<Db>, Query(query): Query<SampleQuery>) -> Result<Json<Sample>, StatusCode> {
    let samples = db.read().await;
    samples.iter().find(|s| query.matches(s)).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_many(State(db): State<Db>, Query(query): Query<SampleQuery>) -> Json<Vec<Sample>> {
    let samples = db.read().await;
    Json(samples.iter().filter(|s| query.matches(s)).cloned().collect())
}

async fn get_page(State(db): State<Db>, Query(query): Query<SampleQuery>) -> Json<SamplePage> {
    let samples = db.read().await;
    let matching: Vec<&Sample> = samples.iter().filter(|s| query.matches(s)).collect();
    let number = query.page.unwrap_or(0);
    let size = query.size.filter(|size| *size > 0).unwrap_or(DEFAULT_PAGE_SIZE);
    let content = match number.checked_mul(size) {
        Some(offset) => matching.iter().skip(offset).take(size).map(|s| (*s).clone()).collect(),
        None => Vec::new(),
    };
    Json(SamplePage {
        content,
        total_elements: matching.len(),
        total_pages: matching.len().div_ceil(size),
        number,
        size,
    })
}

async fn delete_by_id(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<String>, StatusCode> {
    let mut samples = db.write().await;
    let index = samples
        .iter()
        .position(|s| s.id.as_deref() == Some(id.as_str()))
        .ok_or(StatusCode::NOT_FOUND)?;
    samples.remove(index);
    Ok(Json(id))
}

async fn delete_one(State(db): State<Db>, Query(query): Query<SampleQuery>) -> Result<Json<String>, StatusCode> {
    let mut samples = db.write().await;
    let index = samples.iter().position(|s| query.matches(s)).ok_or(StatusCode::NOT_FOUND)?;
    let removed = samples.remove(index);
    Ok(Json(removed.id.unwrap_or_default()))
}

async fn delete_many(State(db): State<Db>, Query(query): Query<SampleQuery>) -> Json<Vec<String>> {
    let mut samples = db.write().await;
    let mut deleted = Vec::new();
    samples.retain(|s| {
        if query.matches(s) {
            deleted.push(s.id.clone().unwrap_or_default());
            false
        } else {
            true
        }
    });
    Json(deleted)
}

fn assign_id(mut sample: Sample) -> Sample {
    sample.id = Some(Uuid::new_v4().to_string());
    sample
}

async fn save(State(db): State<Db>, Json(input): Json<Sample>) -> (StatusCode, Json<Sample>) {
    let sample = assign_id(input);
    db.write().await.push(sample.clone());
    (StatusCode::CREATED, Json(sample))
}

async fn save_many(State(db): State<Db>, Json(input): Json<Vec<Sample>>) -> (StatusCode, Json<Vec<Sample>>) {
    let saved: Vec<Sample> = input.into_iter().map(assign_id).collect();
    db.write().await.extend(saved.iter().cloned());
    (StatusCode::CREATED, Json(saved))
}

fn position(samples: &[Sample], id: Option<&str>) -> Result<usize, StatusCode> {
    let id = id.ok_or(StatusCode::BAD_REQUEST)?;
    samples.iter().position(|s| s.id.as_deref() == Some(id)).ok_or(StatusCode::NOT_FOUND)
}

async fn update_by_id(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(mut input): Json<Sample>,
) -> Result<Json<Sample>, StatusCode> {
    let mut samples = db.write().await;
    let index = position(&samples, Some(id.as_str()))?;
    input.id = Some(id);
    samples[index] = input.clone();
    Ok(Json(input))
}

async fn update(State(db): State<Db>, Json(input): Json<Sample>) -> Result<Json<Sample>, StatusCode> {
    let mut samples = db.write().await;
    let index = position(&samples, input.id.as_deref())?;
    samples[index] = input.clone();
    Ok(Json(input))
}

async fn update_many(State(db): State<Db>, Json(input): Json<Vec<Sample>>) -> Result<Json<Vec<Sample>>, StatusCode> {
    let mut samples = db.write().await;
    let indexes = input
        .iter()
        .map(|s| position(&samples, s.id.as_deref()))
        .collect::<Result<Vec<_>, _>>()?;
    for (index, sample) in indexes.into_iter().zip(&input) {
        samples[index] = sample.clone();
    }
    Ok(Json(input))
}

/// Applies top-level `add`, `replace` and `remove` operations. `id` is never
/// patched.
fn apply_patch(sample: &Sample, operations: &[PatchOperation]) -> Result<Sample, StatusCode> {
    let mut value = serde_json::to_value(sample).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let fields = value.as_object_mut().ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    for operation in operations {
        let field = operation.path.strip_prefix('/').ok_or(StatusCode::BAD_REQUEST)?;
        if field == "id" || field.is_empty() || field.contains('/') {
            return Err(StatusCode::BAD_REQUEST);
        }
        match (operation.op.as_str(), &operation.value) {
            ("add" | "replace", Some(v)) => {
                fields.insert(field.to_string(), v.clone());
            }
            ("remove", _) => {
                fields.remove(field);
            }
            _ => return Err(StatusCode::BAD_REQUEST),
        }
    }
    let mut patched: Sample = serde_json::from_value(value).map_err(|_| StatusCode::BAD_REQUEST)?;
    patched.id = sample.id.clone();
    Ok(patched)
}

async fn edit_by_id(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(operations): Json<Vec<PatchOperation>>,
) -> Result<Json<Sample>, StatusCode> {
    let mut samples = db.write().await;
    let index = position(&samples, Some(id.as_str()))?;
    let patched = apply_patch(&samples[index], &operations)?;
    samples[index] = patched.clone();
    Ok(Json(patched))
}

async fn edit(
    State(db): State<Db>,
    Query(query): Query<SampleQuery>,
    Json(operations): Json<Vec<PatchOperation>>,
) -> Result<Json<Sample>, StatusCode> {
    let mut samples = db.write().await;
    let index = samples.iter().position(|s| query.matches(s)).ok_or(StatusCode::NOT_FOUND)?;
    let patched = apply_patch(&samples[index], &operations)?;
    samples[index] = patched.clone();
    Ok(Json(patched))
}

async fn edit_many(
    State(db): State<Db>,
    Query(query): Query<SampleQuery>,
    Json(operations): Json<Vec<PatchOperation>>,
) -> Result<Json<Vec<Sample>>, StatusCode> {
    let mut samples = db.write().await;
    let mut patched = Vec::new();
    for sample in samples.iter().filter(|s| query.matches(s)) {
        patched.push(apply_patch(sample, &operations)?);
    }
    let mut updates = patched.iter();
    for sample in samples.iter_mut().filter(|s| query.matches(s)) {
        if let Some(update) = updates.next() {
            *sample = update.clone();
        }
    }
    Ok(Json(patched))
}
