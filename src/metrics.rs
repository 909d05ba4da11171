use std::sync::LazyLock;

use prometheus::*;

static METRIC_VECTORIZE_COUNT: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "personvec_vectorize_count",
        "count of uploaded images by vectorize outcome",
        &["outcome"]
    )
    .unwrap()
});

static METRIC_VECTORIZE_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "personvec_vectorize_duration",
        "duration of decoding and vectorizing an image in seconds",
        &["size"]
    )
    .unwrap()
});

static METRIC_COMPARE_COUNT: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "personvec_compare_count",
        "count of vector comparisons by outcome",
        &["outcome"]
    )
    .unwrap()
});

/// 向量化结果计数，`outcome` 为 ok / empty / decode_error / timeout
pub fn inc_vectorize_count(outcome: &str) {
    METRIC_VECTORIZE_COUNT.with_label_values(&[outcome]).inc();
}

/// 记录向量化耗时，按向量长度换算出的像素数量分组
pub fn observe_vectorize_duration(vector_len: usize, duration: f32) {
    let size = to_fixed_size(vector_len * crate::vectorizer::PIXELS_PER_ELEMENT);

    METRIC_VECTORIZE_DURATION.with_label_values(&[size]).observe(duration as f64);
}

pub fn inc_compare_count(outcome: &str) {
    METRIC_COMPARE_COUNT.with_label_values(&[outcome]).inc();
}

/// 以文本格式导出所有指标
pub fn gather_text() -> Result<String> {
    TextEncoder::new().encode_to_string(&gather())
}

/// 将图像面积范围调整到几个固定值
fn to_fixed_size(area: usize) -> &'static str {
    if area <= 128 * 128 {
        "128"
    } else if area <= 256 * 256 {
        "256"
    } else if area <= 512 * 512 {
        "512"
    } else if area <= 768 * 768 {
        "768"
    } else if area <= 1024 * 1024 {
        "1024"
    } else if area <= 1536 * 1536 {
        "1536"
    } else if area <= 2048 * 2048 {
        "2048"
    } else {
        "2048+"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_size_buckets() {
        assert_eq!(to_fixed_size(0), "128");
        assert_eq!(to_fixed_size(128 * 128 + 1), "256");
        assert_eq!(to_fixed_size(4096 * 4096), "2048+");
    }

    #[test]
    fn counters_show_up_in_text() {
        inc_vectorize_count("ok");
        inc_compare_count("ok");
        observe_vectorize_duration(1, 0.01);
        let text = gather_text().unwrap();
        assert!(text.contains("personvec_vectorize_count"));
        assert!(text.contains("personvec_compare_count"));
        assert!(text.contains("personvec_vectorize_duration"));
    }
}
