use ndarray::ArrayView1;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CompareError {
    /// 任意一侧没有向量（空向量视为没有）
    #[error("One of the objects has no value in the 'vector' field")]
    MissingVector,
    /// 两个向量长度不同，不做补齐或截断
    #[error("vector lengths differ: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// 计算两个向量的欧氏距离
pub fn euclidean(a: &[f64], b: &[f64]) -> Result<f64, CompareError> {
    if a.is_empty() || b.is_empty() {
        return Err(CompareError::MissingVector);
    }
    if a.len() != b.len() {
        return Err(CompareError::LengthMismatch { left: a.len(), right: b.len() });
    }
    let diff = &ArrayView1::from(a) - &ArrayView1::from(b);
    Ok(diff.dot(&diff).sqrt())
}

/// 对存储中可能缺失的向量进行比较
pub fn euclidean_opt(a: Option<&[f64]>, b: Option<&[f64]>) -> Result<f64, CompareError> {
    euclidean(a.unwrap_or_default(), b.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_zero_distance() {
        for v in [vec![1.0], vec![0.25, 0.5, 0.75], vec![0.3; 1000]] {
            assert_eq!(euclidean(&v, &v), Ok(0.0));
        }
    }

    #[test]
    fn known_distance() {
        assert_eq!(euclidean(&[0.0, 0.0], &[0.6, 0.8]), Ok(1.0));
        assert_eq!(euclidean(&[1.0], &[0.0]), Ok(1.0));
    }

    #[test]
    fn symmetric() {
        let a = [0.1, 0.9, 0.33, 0.0, 1.0];
        let b = [0.7, 0.2, 0.5, 0.45, 0.05];
        assert_eq!(euclidean(&a, &b), euclidean(&b, &a));
    }

    #[test]
    fn empty_is_missing() {
        assert_eq!(euclidean(&[], &[1.0]), Err(CompareError::MissingVector));
        assert_eq!(euclidean(&[1.0], &[]), Err(CompareError::MissingVector));
        assert_eq!(euclidean_opt(None, Some(&[1.0][..])), Err(CompareError::MissingVector));
        assert_eq!(euclidean_opt(Some(&[][..]), Some(&[][..])), Err(CompareError::MissingVector));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert_eq!(
            euclidean(&[1.0, 0.0], &[1.0]),
            Err(CompareError::LengthMismatch { left: 2, right: 1 })
        );
    }
}
