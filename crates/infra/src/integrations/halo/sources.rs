//! Consultant and project sources backed by HaloPSA list endpoints

use std::sync::Arc;

use async_trait::async_trait;
use capacal_core::{ConsultantSource, ProjectSource};
use capacal_domain::{CapacalError, Consultant, EndpointConfig, Project, Result};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::api::{ApiClient, EnvelopeExtractor};
use crate::normalize::{ConsultantNormalizer, ProjectNormalizer};

/// Fetches agents and maps them to consultants
pub struct HaloConsultantSource {
    client: Arc<ApiClient>,
    endpoint: EndpointConfig,
    extractor: EnvelopeExtractor,
    normalizer: ConsultantNormalizer,
}

impl HaloConsultantSource {
    pub fn new(
        client: Arc<ApiClient>,
        endpoint: EndpointConfig,
        normalizer: ConsultantNormalizer,
    ) -> Self {
        let extractor = EnvelopeExtractor::for_list_key(&endpoint.list_key);
        Self { client, endpoint, extractor, normalizer }
    }
}

#[async_trait]
impl ConsultantSource for HaloConsultantSource {
    #[instrument(skip(self), fields(path = %self.endpoint.path))]
    async fn consultants(&self) -> Result<Vec<Consultant>> {
        let records = fetch(&self.client, &self.endpoint, &self.extractor).await?;
        Ok(normalize_records(&records, "consultant", |record| self.normalizer.normalize(record)))
    }
}

/// Fetches projects and maps them with type inference
pub struct HaloProjectSource {
    client: Arc<ApiClient>,
    endpoint: EndpointConfig,
    extractor: EnvelopeExtractor,
    normalizer: ProjectNormalizer,
}

impl HaloProjectSource {
    pub fn new(client: Arc<ApiClient>, endpoint: EndpointConfig, normalizer: ProjectNormalizer) -> Self {
        let extractor = EnvelopeExtractor::for_list_key(&endpoint.list_key);
        Self { client, endpoint, extractor, normalizer }
    }
}

#[async_trait]
impl ProjectSource for HaloProjectSource {
    #[instrument(skip(self), fields(path = %self.endpoint.path))]
    async fn projects(&self) -> Result<Vec<Project>> {
        let records = fetch(&self.client, &self.endpoint, &self.extractor).await?;
        Ok(normalize_records(&records, "project", |record| self.normalizer.normalize(record)))
    }
}

async fn fetch(
    client: &ApiClient,
    endpoint: &EndpointConfig,
    extractor: &EnvelopeExtractor,
) -> Result<Vec<Value>> {
    client
        .fetch_list(&endpoint.path, &endpoint.query_pairs(), extractor)
        .await
        .map_err(CapacalError::from)
}

/// Keep the records that normalize; log and skip the rest.
fn normalize_records<T>(
    records: &[Value],
    entity: &'static str,
    normalize: impl Fn(&Value) -> Option<T>,
) -> Vec<T> {
    let mut skipped = 0usize;
    let normalized: Vec<T> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let item = normalize(record);
            if item.is_none() {
                skipped += 1;
                warn!(entity, index, "skipping record without id");
            }
            item
        })
        .collect();

    if skipped > 0 {
        warn!(entity, skipped, kept = normalized.len(), "some records could not be normalized");
    }
    normalized
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::integrations::halo::HaloConnector;
    use capacal_domain::{Config, ProjectType};

    fn config_for(server: &MockServer) -> Config {
        let mut config = Config::default();
        config.halo.base_url = Some(server.uri());
        config.halo.client_id = Some("calendar".into());
        config.halo.client_secret = Some("s3cret".into());
        config.halo.timeout_seconds = 5;
        config
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/auth/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "tok", "expires_in": 3600})),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn consultants_are_fetched_and_normalized() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/Agent"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "agents": [
                    {"id": 1, "name": "Ada", "hours_per_day": 6},
                    {"name": "No id"},
                    {"id": 2, "name": "Grace"}
                ]
            })))
            .mount(&server)
            .await;

        let connector = HaloConnector::from_config(&config_for(&server)).unwrap();
        let consultants = connector.consultant_source().consultants().await.unwrap();

        assert_eq!(consultants.len(), 2);
        assert_eq!(consultants[0].hours_per_day, Some(6.0));
        assert_eq!(consultants[1].id, "2");
    }

    #[tokio::test]
    async fn projects_use_configured_query_and_mapping() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/Projects"))
            .and(query_param("includeclosed", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 10, "title": "Support", "kind": "Managed Service", "budget_hours": 40},
                {"id": 11, "title": "Go-live", "kind": "Project", "startdate": "2025-03-03", "enddate": "2025-03-07"}
            ])))
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.halo.projects.query.insert("includeclosed".into(), "false".into());
        config.mapping.project.name = "title".into();
        config.mapping.project.type_field = "kind".into();
        config.mapping.project.start_date = "startdate".into();
        config.mapping.project.end_date = "enddate".into();
        config.mapping.type_labels.retainer = "managed service".into();

        let connector = HaloConnector::from_config(&config).unwrap();
        let projects = connector.project_source().projects().await.unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Support");
        assert_eq!(projects[0].project_type, ProjectType::Retainer);
        assert_eq!(projects[1].project_type, ProjectType::Scooped);
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_as_error() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/Projects"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let connector = HaloConnector::from_config(&config_for(&server)).unwrap();
        let err = connector.project_source().projects().await.unwrap_err();

        assert!(matches!(err, CapacalError::Network(_)));
    }

    #[tokio::test]
    async fn missing_credentials_are_config_errors() {
        let connector = HaloConnector::from_config(&Config::default()).unwrap();
        let err = connector.consultant_source().consultants().await.unwrap_err();

        assert!(matches!(err, CapacalError::Config(_)));
    }
}
