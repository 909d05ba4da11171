use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use thiserror::Error;

use crate::compare::CompareError;
use crate::db::DbError;
use crate::vectorizer::VectorizeError;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// API错误类型
#[derive(Debug, Error)]
pub enum ApiError {
    /// ID 不是合法的 UUID，不会查询数据库
    #[error("id does not match UUID pattern")]
    InvalidId,
    /// 缺少字段或者字段不合法
    #[error("{0}")]
    Validation(String),
    #[error("404 Not Found")]
    NotFound,
    #[error(transparent)]
    Vectorize(#[from] VectorizeError),
    #[error(transparent)]
    Compare(#[from] CompareError),
    #[error("image processing timed out")]
    Timeout,
    /// 非预期的错误，统一返回 500
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::Validation(_) | Self::Vectorize(_) => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::Compare(CompareError::MissingVector) => StatusCode::NOT_FOUND,
            Self::Compare(CompareError::LengthMismatch { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(_) => Self::NotFound,
            err => Self::Internal(err.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(err) => {
                error!("请求处理失败: {err:?}");
                "500 Internal Server Error".to_string()
            }
            err => err.to_string(),
        };
        (status, Json(message)).into_response()
    }
}
