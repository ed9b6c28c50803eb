use dossier_core::{ChunkPayload, Citation, Config, GeminiClient, ProviderError, StreamChunk};

mod gemini {
    use super::*;

    #[test]
    fn test_client_creation() {
        let _client = GeminiClient::new("test-key");
    }

    #[test]
    fn test_client_with_model() {
        let _client = GeminiClient::new("test-key").with_model("gemini-2.5-pro");
    }

    #[test]
    fn test_client_with_base_url() {
        let _client =
            GeminiClient::new("test-key").with_base_url("https://proxy.example.com/v1beta");
    }

    #[test]
    fn test_from_env_missing() {
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("GOOGLE_API_KEY");
        let result = GeminiClient::from_env();
        assert!(matches!(result, Err(ProviderError::MissingApiKey)));
    }

    #[test]
    fn test_from_config_uses_configured_key() {
        let mut config = Config::default();
        config.provider.api_key = Some("configured-key".to_string());
        config.provider.model = Some("gemini-2.5-pro".to_string());
        assert!(GeminiClient::from_config(&config).is_ok());
    }
}

mod chunks {
    use super::*;

    #[test]
    fn test_text_chunk() {
        let chunk = StreamChunk::text("hello");
        assert_eq!(chunk.payload, ChunkPayload::Text("hello".to_string()));
        assert!(!chunk.is_final);
        assert!(chunk.citations.is_empty());
    }

    #[test]
    fn test_suppressed_chunk() {
        let chunk = StreamChunk::suppressed();
        assert_eq!(chunk.payload, ChunkPayload::Suppressed);
        assert!(!chunk.is_final);
    }

    #[test]
    fn test_done_chunk() {
        let chunk = StreamChunk::done();
        assert!(chunk.is_final);
        assert!(chunk.citations.is_empty());
    }

    #[test]
    fn test_with_citations() {
        let chunk =
            StreamChunk::text("body").with_citations(vec![Citation::new("https://a.com", "A")]);
        assert_eq!(chunk.citations.len(), 1);
    }
}
