//! Plan request client: the two typed model calls.

use std::collections::BTreeMap;
use std::sync::Arc;
use taskweaver_core::error::Result;
use taskweaver_core::message::Message;
use taskweaver_core::plan::{KeywordSuggestion, PlanResult};
use taskweaver_core::provider::{Provider, ProviderRequest, ResponseFormat};
use tracing::debug;

use crate::{parse, prompt};

/// Wraps a [`Provider`] behind the keyword and plan contracts.
///
/// One request per call, no retries.
#[derive(Clone)]
pub struct PlanClient {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl PlanClient {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.2,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    async fn request(&self, stage: &str, prompt: String) -> Result<String> {
        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![Message::system(prompt)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: Some(ResponseFormat::JsonObject),
        };

        let response = self.provider.complete(request).await?;
        debug!(
            stage,
            provider = self.provider.name(),
            model = %response.model,
            total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
            "Model replied"
        );
        Ok(response.message.content)
    }

    /// Ask for search keywords and files the user may have missed.
    ///
    /// `missing_files` are returned exactly as the model wrote them.
    pub async fn generate_keywords(
        &self,
        task: &str,
        selected_files: &[String],
        all_files: &[String],
    ) -> Result<KeywordSuggestion> {
        let content = self
            .request(
                "keywords",
                prompt::keyword_prompt(task, selected_files, all_files),
            )
            .await?;
        Ok(parse::parse_keywords(&content)?)
    }

    /// Ask for the implementation plan, given the loaded file contents.
    pub async fn generate_plan(
        &self,
        task: &str,
        file_contents: &BTreeMap<String, String>,
        all_files: &[String],
    ) -> Result<PlanResult> {
        let content = self
            .request("plan", prompt::plan_prompt(task, file_contents, all_files))
            .await?;
        Ok(parse::parse_plan(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ScriptedProvider, make_text_response};
    use taskweaver_core::error::{Error, PlanError, ProviderError};
    use taskweaver_core::message::Role;

    fn client(provider: Arc<ScriptedProvider>) -> PlanClient {
        PlanClient::new(provider, "gpt-4o-mini")
    }

    #[tokio::test]
    async fn keywords_request_shape() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(make_text_response(
            r#"{"keywords":["SidebarProvider"],"missing_files":["src/extension.ts"]}"#,
        ))]));
        let suggestion = client(provider.clone())
            .generate_keywords(
                "add a button",
                &["src/SidebarProvider.ts".into()],
                &["src/SidebarProvider.ts".into(), "src/extension.ts".into()],
            )
            .await
            .unwrap();

        assert_eq!(suggestion.keywords, vec!["SidebarProvider"]);
        assert_eq!(suggestion.missing_files, vec!["src/extension.ts"]);

        let request = provider.request(0);
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.response_format, Some(ResponseFormat::JsonObject));
        assert!((request.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn client_does_not_filter_missing_files() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(make_text_response(
            r#"{"keywords":[],"missing_files":["invented/file.ts"]}"#,
        ))]));
        let suggestion = client(provider)
            .generate_keywords("t", &[], &["src/a.ts".into()])
            .await
            .unwrap();
        assert_eq!(suggestion.missing_files, vec!["invented/file.ts"]);
    }

    #[tokio::test]
    async fn malformed_keywords_reply() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(make_text_response(
            "sorry, no JSON today",
        ))]));
        let err = client(provider)
            .generate_keywords("t", &[], &[])
            .await
            .unwrap_err();
        match err {
            Error::Plan(PlanError::MalformedResponse { stage, .. }) => {
                assert_eq!(stage, "keywords")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(
            ProviderError::AuthenticationFailed("bad key".into()),
        )]));
        let err = client(provider)
            .generate_plan("t", &BTreeMap::new(), &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ProviderError::AuthenticationFailed(_))
        ));
    }

    #[tokio::test]
    async fn plan_request_carries_file_contents() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(make_text_response(
            r#"{"steps":[{"step_number":1,"description":"Edit a.ts"}],"missing_information":""}"#,
        ))]));
        let mut contents = BTreeMap::new();
        contents.insert("src/a.ts".to_string(), "const marker = 42;".to_string());

        let plan = client(provider.clone())
            .with_max_tokens(Some(2048))
            .generate_plan("t", &contents, &["src/a.ts".into()])
            .await
            .unwrap();

        assert_eq!(plan.steps.len(), 1);
        assert!(!plan.show_missing_information);
        assert!(provider.prompt(0).contains("const marker = 42;"));
        assert_eq!(provider.request(0).max_tokens, Some(2048));
    }
}
