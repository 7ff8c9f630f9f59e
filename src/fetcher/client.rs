use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::config::Config;
use crate::fetcher::errors::FetchError;
use crate::fetcher::types::{Collection, EpisodeDetail, EpisodeListItem, SeasonRef};

const USER_AGENT: &str = "castnotes/0.1 (+https://github.com/castnotes/castnotes)";

/// The API caps episode listings; one page at this size covers any season.
const EPISODE_PAGE_LIMIT: &str = "300";

/// Authenticated JSON client for the podcast-hosting API.
///
/// Cheap to clone (the inner reqwest client is reference-counted), which is
/// what the orchestrator's fan-out relies on.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    token: String,
    podcast_id: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            base: Url::parse(config.api_base())?,
            token: config.api_token().to_string(),
            podcast_id: config.podcast_id().to_string(),
        })
    }

    /// GET the configured podcast's seasons list.
    #[instrument(skip(self))]
    pub async fn seasons(&self) -> Result<Vec<SeasonRef>, FetchError> {
        let url = self
            .base
            .join(&format!("/podcasts/{}/seasons", self.podcast_id))?;
        let list: Collection<SeasonRef> = self.get_json(url).await?;
        Ok(list.collection)
    }

    /// GET one season's episode listing.
    #[instrument(skip(self))]
    pub async fn season_episodes(
        &self,
        season_id: &str,
    ) -> Result<Vec<EpisodeListItem>, FetchError> {
        let mut url = self.base.join(&format!("/seasons/{season_id}/episodes"))?;
        url.query_pairs_mut().append_pair("limit", EPISODE_PAGE_LIMIT);
        let list: Collection<EpisodeListItem> = self.get_json(url).await?;
        Ok(list.collection)
    }

    /// GET one episode's full detail record.
    #[instrument(skip(self))]
    pub async fn episode(&self, episode_id: &str) -> Result<EpisodeDetail, FetchError> {
        let url = self.base.join(&format!("/episodes/{episode_id}"))?;
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}
