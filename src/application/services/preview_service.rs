//! Preview resolution with last-token-wins stale-result discard.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::entities::SharedPreview;
use crate::domain::ports::ImageFetchPort;

use super::candidate_resolver::CandidateResolver;

/// Terminal outcome of one `apply` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Resolution started; the badge placeholder is visible.
    Loading,
    /// A candidate loaded and was published.
    Loaded,
    /// A newer request took the token; this one was discarded.
    Superseded,
    /// Every candidate failed.
    Exhausted,
}

/// Notification that a preview request changed state, for redraw scheduling.
#[derive(Debug, Clone)]
pub struct PreviewEvent {
    /// The identifier the request was for.
    pub id: String,
    /// What happened.
    pub outcome: PreviewOutcome,
}

/// Resolves identifiers into the shared preview model.
///
/// Any number of `apply` calls may be in flight; the token inside the
/// model decides which one owns the visible state. Nothing is cancelled,
/// stale completions are simply discarded.
pub struct PreviewService {
    resolver: CandidateResolver,
    fetcher: Arc<dyn ImageFetchPort>,
    model: SharedPreview,
    default_id: String,
    events: mpsc::UnboundedSender<PreviewEvent>,
}

impl PreviewService {
    /// Creates a service publishing into `model` and notifying `events`.
    #[must_use]
    pub fn new(
        resolver: CandidateResolver,
        fetcher: Arc<dyn ImageFetchPort>,
        model: SharedPreview,
        default_id: String,
        events: mpsc::UnboundedSender<PreviewEvent>,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            model,
            default_id,
            events,
        }
    }

    /// Returns the shared model this service publishes into.
    #[must_use]
    pub fn model(&self) -> SharedPreview {
        self.model.clone()
    }

    /// Returns the configured default identifier.
    #[must_use]
    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// Resets the preview to the configured default identifier.
    pub async fn reset(&self) {
        self.apply("").await;
    }

    /// Shows the best available image for `id`.
    ///
    /// An empty `id` falls back to the default identifier. Candidates are
    /// attempted strictly in order; the first success is published if, and
    /// only if, `id` is still the most recent request at that point.
    pub async fn apply(&self, id: &str) {
        let id = if id.is_empty() {
            self.default_id.clone()
        } else {
            id.to_string()
        };

        self.model.write().begin(id.clone());
        self.notify(&id, PreviewOutcome::Loading);

        let candidates = self.resolver.candidates(&id).await;

        for url in candidates {
            if !self.model.read().is_current(&id) {
                debug!(id = %id, "Request superseded; abandoning");
                self.notify(&id, PreviewOutcome::Superseded);
                return;
            }

            match self.fetcher.fetch(&url).await {
                Ok(fetched) => {
                    let published = self.model.write().publish(&id, fetched.image);
                    if published {
                        debug!(id = %id, url = %url, source = %fetched.source, "Preview published");
                        self.notify(&id, PreviewOutcome::Loaded);
                    } else {
                        debug!(id = %id, "Request superseded after load; discarding");
                        self.notify(&id, PreviewOutcome::Superseded);
                    }
                    return;
                }
                Err(e) => {
                    debug!(id = %id, url = %url, error = %e, "Candidate failed; trying next");
                }
            }
        }

        if self.model.write().exhaust(&id) {
            debug!(id = %id, "All candidates failed");
            self.notify(&id, PreviewOutcome::Exhausted);
        } else {
            self.notify(&id, PreviewOutcome::Superseded);
        }
    }

    fn notify(&self, id: &str, outcome: PreviewOutcome) {
        let _ = self.events.send(PreviewEvent {
            id: id.to_string(),
            outcome,
        });
    }
}

impl std::fmt::Debug for PreviewService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewService")
            .field("default_id", &self.default_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        FetchedImage, ImageId, ImageSource, PreviewContent, shared_preview,
    };
    use crate::domain::errors::FetchError;
    use crate::domain::ports::MockImageFetchPort;
    use crate::infrastructure::config::CollectionConfig;
    use crate::infrastructure::index::testing::StaticDocuments;
    use crate::infrastructure::index::{MetadataIndexLoader, SecondaryIndexLoader};
    use tokio::sync::Notify;

    fn fetched(url: &str) -> FetchedImage {
        FetchedImage {
            id: ImageId::from_url(url),
            image: Arc::new(image::DynamicImage::new_rgb8(4, 4)),
            source: ImageSource::Network,
        }
    }

    fn resolver() -> CandidateResolver {
        let documents: Arc<dyn crate::domain::ports::DocumentPort> =
            Arc::new(StaticDocuments::new());
        CandidateResolver::new(
            Arc::new(MetadataIndexLoader::new(
                vec![],
                "dweb.link".to_string(),
                documents.clone(),
            )),
            Arc::new(SecondaryIndexLoader::new("idx.json".to_string(), documents)),
            CollectionConfig::default(),
        )
    }

    fn service(
        fetcher: Arc<dyn ImageFetchPort>,
    ) -> (PreviewService, mpsc::UnboundedReceiver<PreviewEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = PreviewService::new(
            resolver(),
            fetcher,
            shared_preview(),
            "8929".to_string(),
            tx,
        );
        (service, rx)
    }

    #[tokio::test]
    async fn first_successful_candidate_wins() {
        let mut fetcher = MockImageFetchPort::new();
        // Thumb PNG fails, thumb JPEG succeeds; the full-size templates are
        // never attempted.
        let mut seq = mockall::Sequence::new();
        fetcher
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|url| url.ends_with("thumbs/42.png"))
            .returning(|_| Err(FetchError::Status(404)));
        fetcher
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|url| url.ends_with("thumbs/42.jpg"))
            .returning(|url| Ok(fetched(url)));

        let (service, _rx) = service(Arc::new(fetcher));
        service.apply("42").await;

        let model = service.model();
        let model = model.read();
        assert!(matches!(model.content(), PreviewContent::Image(id, _) if id == "42"));
        assert!(!model.is_loading());
    }

    #[tokio::test]
    async fn exhaustion_marks_unavailable() {
        let mut fetcher = MockImageFetchPort::new();
        fetcher
            .expect_fetch()
            .times(4)
            .returning(|_| Err(FetchError::Status(404)));

        let (service, mut rx) = service(Arc::new(fetcher));
        service.apply("42").await;

        let model = service.model();
        assert!(matches!(
            model.read().content(),
            PreviewContent::Unavailable(id) if id == "42"
        ));

        assert_eq!(rx.recv().await.unwrap().outcome, PreviewOutcome::Loading);
        assert_eq!(rx.recv().await.unwrap().outcome, PreviewOutcome::Exhausted);
    }

    #[tokio::test]
    async fn empty_id_applies_the_default() {
        let mut fetcher = MockImageFetchPort::new();
        fetcher
            .expect_fetch()
            .withf(|url| url.contains("8929"))
            .returning(|url| Ok(fetched(url)));

        let (service, _rx) = service(Arc::new(fetcher));
        service.apply("").await;

        let model = service.model();
        assert!(matches!(
            model.read().content(),
            PreviewContent::Image(id, _) if id == "8929"
        ));
    }

    /// Fetcher that blocks requests for a chosen identifier until released.
    struct GatedFetcher {
        gate: Arc<Notify>,
        gated_id: String,
    }

    #[async_trait::async_trait]
    impl ImageFetchPort for GatedFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
            if url.contains(&self.gated_id) {
                self.gate.notified().await;
            }
            Ok(fetched(url))
        }
    }

    #[tokio::test]
    async fn late_success_from_superseded_request_is_discarded() {
        let gate = Arc::new(Notify::new());
        let fetcher = Arc::new(GatedFetcher {
            gate: gate.clone(),
            gated_id: "7".to_string(),
        });

        let (service, _rx) = service(fetcher);
        let service = Arc::new(service);
        let model = service.model();

        // apply("7") stalls inside its first candidate fetch.
        let first = tokio::spawn({
            let service = service.clone();
            async move { service.apply("7").await }
        });
        tokio::task::yield_now().await;

        // apply("8") supersedes and completes.
        service.apply("8").await;
        assert!(matches!(
            model.read().content(),
            PreviewContent::Image(id, _) if id == "8"
        ));

        // Release the stalled fetch; its success must be discarded.
        gate.notify_one();
        first.await.unwrap();

        let model = model.read();
        assert!(matches!(model.content(), PreviewContent::Image(id, _) if id == "8"));
        assert!(!model.is_loading());
    }

    #[tokio::test]
    async fn metadata_entry_is_attempted_before_templates() {
        let documents: Arc<dyn crate::domain::ports::DocumentPort> = Arc::new(
            StaticDocuments::new().with(
                "meta.json",
                serde_json::json!([{"id": 7, "image": "https://pinned.example/7.png"}]),
            ),
        );
        let resolver = CandidateResolver::new(
            Arc::new(MetadataIndexLoader::new(
                vec!["meta.json".to_string()],
                "dweb.link".to_string(),
                documents.clone(),
            )),
            Arc::new(SecondaryIndexLoader::new("idx.json".to_string(), documents)),
            CollectionConfig::default(),
        );

        let mut fetcher = MockImageFetchPort::new();
        fetcher
            .expect_fetch()
            .times(1)
            .withf(|url| url == "https://pinned.example/7.png")
            .returning(|url| Ok(fetched(url)));

        let (tx, _rx) = mpsc::unbounded_channel();
        let service = PreviewService::new(
            resolver,
            Arc::new(fetcher),
            shared_preview(),
            "8929".to_string(),
            tx,
        );

        service.apply("7").await;
        let model = service.model();
        assert!(matches!(
            model.read().content(),
            PreviewContent::Image(id, _) if id == "7"
        ));
    }
}
