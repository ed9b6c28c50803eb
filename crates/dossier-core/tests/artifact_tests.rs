use dossier_core::{Artifact, Citation, SourceList, SESSION_SEPARATOR};

mod artifact {
    use super::*;

    #[test]
    fn test_new_artifact_is_empty() {
        let artifact = Artifact::new();
        assert!(artifact.is_empty());
        assert_eq!(artifact.as_str(), "");
    }

    #[test]
    fn test_append_preserves_arrival_order() {
        let mut artifact = Artifact::new();
        artifact.append("one ");
        artifact.append("two ");
        artifact.append("three");
        assert_eq!(artifact.as_str(), "one two three");
    }

    #[test]
    fn test_begin_session_on_empty_buffer_adds_no_separator() {
        let mut artifact = Artifact::new();
        artifact.begin_session();
        artifact.append("# First report");
        assert_eq!(artifact.as_str(), "# First report");
    }

    #[test]
    fn test_begin_session_separates_prior_content() {
        let mut artifact = Artifact::new();
        artifact.begin_session();
        artifact.append("first");
        artifact.begin_session();
        artifact.append("second");
        assert_eq!(
            artifact.as_str(),
            format!("first{SESSION_SEPARATOR}second")
        );
    }
}

mod sources {
    use super::*;

    #[test]
    fn test_merge_keeps_first_appearance_order() {
        let mut sources = SourceList::new();
        sources.merge(vec![
            Citation::new("https://a.com", "A"),
            Citation::new("https://b.com", "B"),
        ]);
        sources.merge(vec![Citation::new("https://c.com", "C")]);

        let uris: Vec<&str> = sources.iter().map(|c| c.uri.as_str()).collect();
        assert_eq!(uris, vec!["https://a.com", "https://b.com", "https://c.com"]);
    }

    #[test]
    fn test_merge_deduplicates_by_uri() {
        let mut sources = SourceList::new();
        let added = sources.merge(vec![
            Citation::new("https://a.com", "A"),
            Citation::new("https://a.com", "A again"),
        ]);
        assert_eq!(added, 1);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources.as_slice()[0].title, "A");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut sources = SourceList::new();
        sources.merge(vec![Citation::new("https://a.com", "A")]);
        let before = sources.len();

        let added = sources.merge(vec![Citation::new("https://a.com", "A")]);
        assert_eq!(added, 0);
        assert_eq!(sources.len(), before);
    }

    #[test]
    fn test_contains_uri() {
        let mut sources = SourceList::new();
        sources.merge(vec![Citation::new("https://a.com", "A")]);
        assert!(sources.contains_uri("https://a.com"));
        assert!(!sources.contains_uri("https://b.com"));
    }
}

mod citation {
    use super::*;

    #[test]
    fn test_hostname_from_uri() {
        let citation = Citation::new("https://research.example.org/papers/42", "Paper");
        assert_eq!(citation.hostname(), "research.example.org");
    }

    #[test]
    fn test_hostname_falls_back_to_raw_uri() {
        let citation = Citation::new("not a url", "Odd");
        assert_eq!(citation.hostname(), "not a url");
    }
}
