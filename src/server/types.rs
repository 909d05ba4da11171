use std::str::FromStr;

use axum::body::Bytes;
use axum_typed_multipart::TryFromMultipart;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// 创建人员的请求体
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePersonRequest {
    /// 名，最多 50 个字符
    pub name: Option<String>,
    /// 姓，最多 50 个字符
    pub last_name: Option<String>,
}

/// 上传图片的请求参数
#[derive(TryFromMultipart)]
pub struct SetVectorRequest {
    pub vector: Option<Bytes>,
}

/// 上传图片表单（用于API文档）
#[derive(Debug, ToSchema)]
#[allow(unused)]
pub struct SetVectorForm {
    /// 用于计算特征向量的图片
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub vector: String,
}

/// 人员 ID 列表中的一项
#[derive(Debug, Serialize, ToSchema)]
pub struct PersonId {
    pub id: Uuid,
}

/// 比较接口路径中的 `usr_1=<id>&usr_2=<id>` 部分
#[derive(Debug, PartialEq)]
pub struct ComparePair {
    pub usr_1: String,
    pub usr_2: String,
}

impl FromStr for ComparePair {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("usr_1=").ok_or(())?;
        let (usr_1, usr_2) = rest.split_once("&usr_2=").ok_or(())?;
        Ok(Self { usr_1: usr_1.to_string(), usr_2: usr_2.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compare_pair() {
        let pair: ComparePair = "usr_1=a&usr_2=b".parse().unwrap();
        assert_eq!(pair, ComparePair { usr_1: "a".into(), usr_2: "b".into() });

        assert!("usr_2=a&usr_1=b".parse::<ComparePair>().is_err());
        assert!("usr_1=a".parse::<ComparePair>().is_err());
        assert!("a&b".parse::<ComparePair>().is_err());
    }
}
