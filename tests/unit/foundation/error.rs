use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PostError::calendar("x")
            .to_string()
            .contains("calendar parse error:")
    );
    assert!(PostError::logo("x").to_string().contains("logo not found:"));
    assert!(
        PostError::rasterize("x")
            .to_string()
            .contains("rasterize error:")
    );
    assert!(PostError::template("x").to_string().contains("template error:"));
    assert!(PostError::config("x").to_string().contains("config error:"));
    assert_eq!(
        PostError::UnknownLevel("Z9".to_string()).to_string(),
        "unknown competition level 'Z9'"
    );
    assert_eq!(
        PostError::UnsupportedMatchCount(7).to_string(),
        "no generic template configured for 7 matches"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PostError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn scopes_follow_the_taxonomy() {
    assert_eq!(PostError::calendar("x").scope(), ErrorScope::Run);
    assert_eq!(PostError::config("x").scope(), ErrorScope::Run);
    assert_eq!(
        PostError::UnknownLevel("x".to_string()).scope(),
        ErrorScope::Date
    );
    assert_eq!(PostError::UnsupportedMatchCount(5).scope(), ErrorScope::Job);
    assert_eq!(PostError::logo("x").scope(), ErrorScope::Job);
    assert_eq!(PostError::rasterize("x").scope(), ErrorScope::Job);
    assert_eq!(PostError::template("x").scope(), ErrorScope::Job);
}
