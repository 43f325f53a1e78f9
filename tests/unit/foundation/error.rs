use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CaptionError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CaptionError::font_load("x")
            .to_string()
            .contains("font load error:")
    );
    assert!(
        CaptionError::color("x")
            .to_string()
            .contains("color parse error:")
    );
    assert!(
        CaptionError::raster("x")
            .to_string()
            .contains("raster error:")
    );
    assert!(
        CaptionError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn font_not_found_names_the_font() {
    let err = CaptionError::font_not_found("Serif-Bold");
    assert!(err.to_string().contains("'Serif-Bold'"));
}

#[test]
fn only_font_errors_are_fatal() {
    assert!(CaptionError::font_not_found("a").is_fatal());
    assert!(CaptionError::font_load("a").is_fatal());
    assert!(!CaptionError::raster("a").is_fatal());
    assert!(!CaptionError::color("a").is_fatal());
    assert!(!CaptionError::validation("a").is_fatal());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CaptionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
