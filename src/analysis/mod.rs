pub mod analytics;
pub mod keywords;
pub mod optimizer;
pub mod readability;
pub mod seo;
pub mod structure;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
