use git_autotag::boundary::BoundaryWarning;
use git_autotag::domain::TagNaming;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_new_commits_display() {
    let warning = BoundaryWarning::NoNewCommits {
        baseline_tag: "v1.0.0".to_string(),
        branch_tip: "abc1234def5678".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No new commits"),
        "Message should contain 'No new commits', got: {}",
        display_msg
    );
    assert!(display_msg.contains("v1.0.0"));
    assert!(
        display_msg.contains("abc1234") && !display_msg.contains("abc1234d"),
        "Message should contain shortened commit hash 'abc1234', got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_short_hash_kept_whole() {
    let warning = BoundaryWarning::NoNewCommits {
        baseline_tag: "v1.0.0".to_string(),
        branch_tip: "abc".to_string(),
    };
    assert!(warning.to_string().contains("(branch tip: abc)"));
}

#[test]
fn test_boundary_warning_unparsable_tag_display() {
    let warning = BoundaryWarning::UnparsableTag {
        tag: "release-123".to_string(),
        reason: "Invalid format".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("release-123"));
    assert!(display_msg.contains("Invalid format"));
}

#[test]
fn test_boundary_warning_out_of_scope_display() {
    let warning = BoundaryWarning::OutOfScopeTag {
        tag: "web/v2.0.0".to_string(),
        scope: "api".to_string(),
    };
    assert_eq!(
        warning.to_string(),
        "Skipping tag 'web/v2.0.0' outside scope 'api/'"
    );
}

// ============================================================================
// Tag naming produces the matching warnings
// ============================================================================

#[test]
fn test_tag_naming_reports_unparsable_tags() {
    let naming = TagNaming::default();
    for tag in ["foo", "", "v1.0.x", "V1.0.0"] {
        assert!(
            matches!(
                naming.parse(tag),
                Err(BoundaryWarning::UnparsableTag { .. })
            ),
            "'{}' should be reported as unparsable",
            tag
        );
    }
}

#[test]
fn test_tag_naming_reports_out_of_scope_tags() {
    let naming = TagNaming::new(true, Some("api".to_string()));
    assert!(matches!(
        naming.parse("v1.0.0"),
        Err(BoundaryWarning::OutOfScopeTag { .. })
    ));
    assert!(matches!(
        naming.parse("web/v1.0.0"),
        Err(BoundaryWarning::OutOfScopeTag { .. })
    ));
    assert!(naming.parse("api/v1.0.0").is_ok());
}
