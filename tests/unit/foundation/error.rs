use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BlinkmarkError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        BlinkmarkError::context("x")
            .to_string()
            .contains("execution context error:")
    );
    assert!(
        BlinkmarkError::surface("x")
            .to_string()
            .contains("surface error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BlinkmarkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
