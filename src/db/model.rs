use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::DbError;

/// 姓名字段的最大长度（字符数）
pub const NAME_MAX_LEN: usize = 50;

/// 人员表中的一行
#[derive(Debug, FromRow)]
pub struct PersonRecord {
    /// 人员 ID
    pub id: Uuid,
    /// 名
    pub name: String,
    /// 姓
    pub last_name: String,
    /// f64 数组的原始字节，`None` 表示从未设置
    pub vector: Option<Vec<u8>>,
}

/// 人员
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Person {
    /// 创建时分配，不可修改
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    /// 由上传图片计算出的特征向量
    pub vector: Option<Vec<f64>>,
}

impl TryFrom<PersonRecord> for Person {
    type Error = DbError;

    fn try_from(record: PersonRecord) -> Result<Self, Self::Error> {
        let vector = match record.vector {
            Some(bytes) => Some(decode_vector(record.id, &bytes)?),
            None => None,
        };
        Ok(Self { id: record.id, name: record.name, last_name: record.last_name, vector })
    }
}

pub fn encode_vector(vector: &[f64]) -> &[u8] {
    bytemuck::cast_slice(vector)
}

pub fn decode_vector(id: Uuid, bytes: &[u8]) -> Result<Vec<f64>, DbError> {
    if bytes.len() % size_of::<f64>() != 0 {
        return Err(DbError::CorruptVector { id, len: bytes.len() });
    }
    // 从数据库读出的 Vec<u8> 不保证 8 字节对齐，不能直接 cast
    Ok(bytemuck::pod_collect_to_vec(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_bytes_are_bit_exact() {
        let vector = vec![0.0, 1.0, 1.0 / 255.0, 0.123456789012345, f64::MIN_POSITIVE];
        let bytes = encode_vector(&vector).to_vec();
        assert_eq!(bytes.len(), vector.len() * 8);
        assert_eq!(decode_vector(Uuid::nil(), &bytes).unwrap(), vector);
    }

    #[test]
    fn unaligned_bytes_are_decoded() {
        let vector = vec![0.5, 0.25];
        let mut bytes = vec![0u8];
        bytes.extend_from_slice(encode_vector(&vector));
        assert_eq!(decode_vector(Uuid::nil(), &bytes[1..]).unwrap(), vector);
    }

    #[test]
    fn truncated_bytes_are_rejected() {
        let err = decode_vector(Uuid::nil(), &[0u8; 12]).unwrap_err();
        assert!(matches!(err, DbError::CorruptVector { len: 12, .. }));
    }

    #[test]
    fn missing_vector_stays_none() {
        let record = PersonRecord {
            id: Uuid::nil(),
            name: "Ada".into(),
            last_name: "Lovelace".into(),
            vector: None,
        };
        assert_eq!(Person::try_from(record).unwrap().vector, None);
    }
}
