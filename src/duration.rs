use regex::Regex;
use std::sync::OnceLock;

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern compiles")
    })
}

/// Parses an ISO-8601 time duration such as `PT1H2M10S` into seconds.
///
/// Only the hour/minute/second designators are understood. Anything that does
/// not contain a `PT` section, or that overflows `u64` seconds, parses as zero.
pub fn parse_duration(value: &str) -> u64 {
    let Some(captures) = duration_pattern().captures(value) else {
        return 0;
    };

    let component = |index: usize| -> u64 {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    component(1)
        .checked_mul(3600)
        .and_then(|hours| component(2).checked_mul(60)?.checked_add(hours))
        .and_then(|total| total.checked_add(component(3)))
        .unwrap_or(0)
}
