use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LanemixError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LanemixError::config("x")
            .to_string()
            .contains("config error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LanemixError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn other_keeps_context_chain() {
    let err: LanemixError = anyhow::anyhow!("inner").context("outer").into();
    assert_eq!(err.to_string(), "outer");
    let LanemixError::Other(inner) = err else {
        panic!("expected Other");
    };
    assert_eq!(inner.root_cause().to_string(), "inner");
}

#[test]
fn constructors_build_matching_variants() {
    assert!(matches!(
        LanemixError::validation("bad row"),
        LanemixError::Validation(msg) if msg == "bad row"
    ));
    assert!(matches!(
        LanemixError::config(String::from("bad env")),
        LanemixError::Config(msg) if msg == "bad env"
    ));
}
