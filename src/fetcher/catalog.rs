use tracing::{info, instrument};
use url::Url;

use crate::fetcher::client::ApiClient;
use crate::fetcher::errors::FetchError;
use crate::fetcher::types::{EpisodeRecord, SeasonEpisodes, SeasonRef};
use crate::notes;
use crate::notes::render;

/// Fetch and assemble the whole catalog: every season, every published
/// visible episode, show notes extracted.
///
/// Fan-outs are eager and unbounded: every child task is spawned before any
/// is awaited, and the aggregate is joined as a unit. One failing child
/// fails the whole call with no partial results; already-spawned siblings
/// run to completion on the runtime (there is deliberately no cancellation
/// here).
#[instrument(skip(client))]
pub async fn fetch_catalog(client: &ApiClient) -> Result<Vec<SeasonEpisodes>, FetchError> {
    let seasons = client.seasons().await?;
    info!("assembling catalog for {} seasons", seasons.len());

    let handles: Vec<_> = seasons
        .into_iter()
        .map(|season| {
            let client = client.clone();
            tokio::spawn(async move { fetch_season(&client, season).await })
        })
        .collect();

    let mut catalog = Vec::with_capacity(handles.len());
    for handle in handles {
        catalog.push(handle.await.map_err(|e| FetchError::Task(e.to_string()))??);
    }
    Ok(catalog)
}

#[instrument(skip(client, season), fields(season = season.number))]
async fn fetch_season(
    client: &ApiClient,
    season: SeasonRef,
) -> Result<SeasonEpisodes, FetchError> {
    let season_id = season_id_from_href(&season)?;
    let listing = client.season_episodes(&season_id).await?;

    let handles: Vec<_> = listing
        .into_iter()
        .filter(|item| item.is_listable())
        .map(|item| {
            let client = client.clone();
            tokio::spawn(async move { fetch_episode(&client, &item.id).await })
        })
        .collect();

    let mut episodes = Vec::with_capacity(handles.len());
    for handle in handles {
        episodes.push(handle.await.map_err(|e| FetchError::Task(e.to_string()))??);
    }

    info!(
        season = season.number,
        episodes = episodes.len(),
        "season assembled"
    );
    Ok(SeasonEpisodes {
        season_number: season.number,
        episodes,
    })
}

/// The seasons endpoint hands back a `href` instead of an id; the id is its
/// final non-empty path segment.
fn season_id_from_href(season: &SeasonRef) -> Result<String, FetchError> {
    let url = Url::parse(&season.href)?;
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| FetchError::SeasonRef {
            number: season.number,
            href: season.href.clone(),
        })
}

#[instrument(skip(client))]
async fn fetch_episode(client: &ApiClient, episode_id: &str) -> Result<EpisodeRecord, FetchError> {
    let detail = client.episode(episode_id).await?;

    let extract = notes::extract(&detail.long_description)?;
    let transcript_html = render::markdown_to_html(&detail.transcription);
    let description_html = render::markdown_to_html(&detail.description);
    let keywords = detail
        .keywords
        .collection
        .into_iter()
        .map(|keyword| keyword.value)
        .collect();

    Ok(EpisodeRecord {
        simplecast_id: episode_id.to_string(),
        slug: detail.slug,
        title: detail.title,
        season_number: detail.season.number,
        episode_number: detail.number,
        duration: detail.duration,
        image: detail.image_url,
        keywords,
        transcript_html,
        description_html,
        summary_html: extract.summary_html,
        resources: extract.resources,
        guests: extract.guests,
        homework: extract.homework,
    })
}
