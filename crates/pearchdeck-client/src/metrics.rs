use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, register_histogram, CounterVec, Histogram};

pub static SEARCHES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pearchdeck_searches_total",
        "Search attempts by outcome",
        &["outcome"]
    )
    .unwrap()
});

pub static SEARCH_DURATION_SEC: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "pearchdeck_search_duration_seconds",
        "Search round-trip time",
        vec![0.5, 1.0, 2.5, 5.0, 10.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0]
    )
    .unwrap()
});

pub fn record_outcome(outcome: &str, elapsed_secs: Option<f64>) {
    SEARCHES_TOTAL.with_label_values(&[outcome]).inc();
    if let Some(secs) = elapsed_secs {
        SEARCH_DURATION_SEC.observe(secs);
    }
}

/// Text exposition of the default registry.
pub fn gather_text() -> prometheus::Result<String> {
    use prometheus::Encoder;
    let mut buf = Vec::new();
    prometheus::TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_show_up_in_exposition() {
        record_outcome("completed", Some(1.2));
        record_outcome("cancelled", None);
        let text = gather_text().unwrap();
        assert!(text.contains("pearchdeck_searches_total{outcome=\"completed\"}"));
        assert!(text.contains("pearchdeck_searches_total{outcome=\"cancelled\"}"));
        assert!(text.contains("pearchdeck_search_duration_seconds_count"));
    }
}
