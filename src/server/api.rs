use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_typed_multipart::{TypedMultipart, TypedMultipartError};
use log::info;
use tokio::task::spawn_blocking;
use tokio::time::timeout;
use uuid::Uuid;

use super::error::{ApiError, Result};
use super::state::AppState;
use super::types::*;
use crate::compare::{self, CompareError};
use crate::db::{NAME_MAX_LEN, Person};
use crate::{metrics, vectorizer};

/// 创建人员
#[utoipa::path(
    post,
    path = "/api/v1/person/create/",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, body = Person),
        (status = 400, body = String),
    )
)]
pub async fn create_person_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CreatePersonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Person>)> {
    let Json(data) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let name = required_name("name", data.name)?;
    let last_name = required_name("last_name", data.last_name)?;

    let person = state.db.create(&name, &last_name).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

/// 列出所有人员 ID
#[utoipa::path(
    get,
    path = "/api/v1/persons/",
    responses(
        (status = 200, body = Vec<PersonId>),
        (status = 404, body = String),
    )
)]
pub async fn list_persons_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PersonId>>> {
    let ids = state.db.list().await?;
    if ids.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(ids.into_iter().map(|id| PersonId { id }).collect()))
}

/// 获取人员详情
#[utoipa::path(
    get,
    path = "/api/v1/person/detail/{id}/",
    params(("id" = String, Path, description = "人员 UUID")),
    responses(
        (status = 200, body = Person),
        (status = 400, body = String),
        (status = 404, body = String),
    )
)]
pub async fn get_person_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Person>> {
    let id = parse_id(&id)?;
    let person = state.db.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(person))
}

/// 上传图片，计算并覆盖人员的特征向量
#[utoipa::path(
    put,
    path = "/api/v1/person/detail/{id}/",
    params(("id" = String, Path, description = "人员 UUID")),
    request_body(content = SetVectorForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = Person),
        (status = 400, body = String),
        (status = 404, body = String),
        (status = 503, body = String),
    )
)]
pub async fn set_vector_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    data: std::result::Result<TypedMultipart<SetVectorRequest>, TypedMultipartError>,
) -> Result<Json<Person>> {
    let id = parse_id(&id)?;
    if state.db.get(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let TypedMultipart(data) = data.map_err(|e| ApiError::Validation(e.to_string()))?;
    let bytes = data
        .vector
        .ok_or_else(|| ApiError::Validation("missing image under key 'vector'".to_string()))?;

    info!("正在计算人员 {id} 的向量，图片大小 {} 字节", bytes.len());
    let vector = vectorize(&state, bytes).await?;
    if vector.is_empty() {
        return Err(ApiError::Validation(
            "image has fewer than 100 pixels, derived vector is empty".to_string(),
        ));
    }

    let person = state.db.set_vector(id, &vector).await?;
    Ok(Json(person))
}

/// 删除人员
#[utoipa::path(
    delete,
    path = "/api/v1/person/detail/{id}/",
    params(("id" = String, Path, description = "人员 UUID")),
    responses(
        (status = 200, body = String),
        (status = 400, body = String),
        (status = 404, body = String),
    )
)]
pub async fn delete_person_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<&'static str>> {
    let id = parse_id(&id)?;
    if !state.db.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json("200 OK"))
}

/// 计算两个人员特征向量的欧氏距离
#[utoipa::path(
    get,
    path = "/api/v1/persons/compare/{pair}/",
    params(("pair" = String, Path, description = "格式为 `usr_1=<id>&usr_2=<id>`")),
    responses(
        (status = 200, body = f64),
        (status = 400, body = String),
        (status = 404, body = String),
        (status = 422, body = String),
    )
)]
pub async fn compare_handler(
    State(state): State<Arc<AppState>>,
    Path(pair): Path<String>,
) -> Result<Json<f64>> {
    let pair: ComparePair = pair.parse().map_err(|_| ApiError::NotFound)?;
    let id1 = parse_id(&pair.usr_1)?;
    let id2 = parse_id(&pair.usr_2)?;

    let a = state.db.get_vector(id1).await?;
    let b = state.db.get_vector(id2).await?;

    let result = compare::euclidean_opt(a.as_deref(), b.as_deref());
    metrics::inc_compare_count(match &result {
        Ok(_) => "ok",
        Err(CompareError::MissingVector) => "missing_vector",
        Err(CompareError::LengthMismatch { .. }) => "length_mismatch",
    });
    Ok(Json(result?))
}

/// Prometheus 指标
#[utoipa::path(get, path = "/metrics", responses((status = 200, body = String)))]
pub async fn metrics_handler() -> Result<String> {
    Ok(metrics::gather_text().context("导出指标失败")?)
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| ApiError::InvalidId)
}

/// 必填的姓名字段，去掉首尾空白后不能为空，且不能超过 [`NAME_MAX_LEN`] 个字符
fn required_name(field: &str, value: Option<String>) -> Result<String> {
    let value = value
        .ok_or_else(|| ApiError::Validation(format!("{field}: This field is required.")))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::Validation(format!("{field}: This field may not be blank.")));
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Err(ApiError::Validation(format!(
            "{field}: Ensure this field has no more than {NAME_MAX_LEN} characters."
        )));
    }
    Ok(value.to_string())
}

/// 在阻塞线程池中计算向量，超时后直接返回，不等待解码结束
async fn vectorize(state: &AppState, bytes: Bytes) -> Result<Vec<f64>> {
    let start = Instant::now();
    let task = spawn_blocking(move || vectorizer::derive(&bytes));
    let result = match timeout(state.decode_timeout, task).await {
        Ok(joined) => joined.context("向量化任务异常退出")?,
        Err(_) => {
            metrics::inc_vectorize_count("timeout");
            return Err(ApiError::Timeout);
        }
    };

    match result {
        Ok(vector) => {
            let outcome = if vector.is_empty() { "empty" } else { "ok" };
            metrics::inc_vectorize_count(outcome);
            metrics::observe_vectorize_duration(vector.len(), start.elapsed().as_secs_f32());
            Ok(vector)
        }
        Err(err) => {
            metrics::inc_vectorize_count("decode_error");
            Err(err.into())
        }
    }
}
