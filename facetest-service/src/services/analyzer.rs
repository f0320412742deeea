//! One analysis per request: prompt, single model call, interpretation,
//! and the fallback that keeps the user from ever seeing an error page.

use crate::analysis::{self, age::AgeAnalysis, animal::AnimalAnalysis, AnalysisError, TestKind};
use crate::catalog;
use crate::intake::ImageDataUrl;
use crate::prompts;
use crate::services::metrics;
use crate::services::providers::VisionProvider;
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct FaceAnalyzer {
    provider: Arc<dyn VisionProvider>,
}

impl FaceAnalyzer {
    pub fn new(provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn VisionProvider> {
        &self.provider
    }

    pub async fn animal(&self, image: &ImageDataUrl) -> Result<AnimalAnalysis, AppError> {
        let prompt = prompts::animal_prompt(catalog::all());
        let result = self
            .ask(TestKind::Animal, &prompt, image)
            .await
            .and_then(|text| analysis::animal::interpret(&text));

        settle(TestKind::Animal, result, || {
            analysis::animal::fallback(&mut rand::thread_rng())
        })
    }

    pub async fn age(&self, image: &ImageDataUrl) -> Result<AgeAnalysis, AppError> {
        let result = self
            .ask(TestKind::Age, prompts::AGE_PROMPT, image)
            .await
            .and_then(|text| analysis::age::interpret(&text));

        settle(TestKind::Age, result, || {
            analysis::age::fallback(&mut rand::thread_rng())
        })
    }

    async fn ask(
        &self,
        kind: TestKind,
        prompt: &str,
        image: &ImageDataUrl,
    ) -> Result<String, AnalysisError> {
        let start = Instant::now();
        let response = self
            .provider
            .generate(prompt, image, &kind.params())
            .await;
        metrics::observe_provider_latency(kind.label(), start.elapsed().as_secs_f64());

        let response = response?;
        tracing::debug!(
            test = kind.label(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            finish_reason = ?response.finish_reason,
            "Model replied"
        );

        Ok(response.text)
    }
}

/// Map an interpretation result to what the client sees: the result, a 400
/// for "no face", or a fabricated result for every other failure.
fn settle<T>(
    kind: TestKind,
    result: Result<T, AnalysisError>,
    fallback: impl FnOnce() -> T,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            metrics::record_analysis(kind.label(), "model");
            Ok(value)
        }
        Err(AnalysisError::NoFace) => {
            tracing::info!(test = kind.label(), "No face detected in upload");
            metrics::record_analysis(kind.label(), "no_face");
            Err(AppError::bad_request(analysis::NO_FACE_MESSAGE))
        }
        Err(err) => {
            tracing::warn!(
                test = kind.label(),
                reason = err.reason(),
                error = %err,
                "Analysis failed, serving fallback result"
            );
            metrics::record_analysis(kind.label(), "fallback");
            metrics::record_fallback(kind.label(), err.reason());
            Ok(fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockVisionProvider;
    use crate::services::providers::ProviderError;

    fn image() -> ImageDataUrl {
        ImageDataUrl::parse("data:image/jpeg;base64,/9j/4AAQ").unwrap()
    }

    #[tokio::test]
    async fn uses_animal_sampling_parameters() {
        let mock = Arc::new(MockVisionProvider::replying(
            r#"{"mainAnimalId": "cat", "mainSimilarity": 88}"#,
        ));
        let analyzer = FaceAnalyzer::new(mock.clone());

        let result = analyzer.animal(&image()).await.unwrap();

        assert_eq!(result.main_match.animal.id, "cat");
        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.last_params(), Some(TestKind::Animal.params()));
    }

    #[tokio::test]
    async fn provider_error_becomes_fallback() {
        let mock = Arc::new(MockVisionProvider::failing(ProviderError::NetworkError(
            "connection reset".into(),
        )));
        let analyzer = FaceAnalyzer::new(mock.clone());

        let result = analyzer.age(&image()).await.unwrap();

        assert!((20..50).contains(&result.estimated_age));
        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.last_params(), Some(TestKind::Age.params()));
    }

    #[tokio::test]
    async fn no_face_is_bad_request() {
        let analyzer = FaceAnalyzer::new(Arc::new(MockVisionProvider::replying(
            r#"{"estimatedAge": 0}"#,
        )));

        let err = analyzer.age(&image()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(
            err.to_string(),
            format!("Bad request: {}", analysis::NO_FACE_MESSAGE)
        );
    }
}
