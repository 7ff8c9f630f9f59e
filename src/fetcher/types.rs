use serde::{Deserialize, Serialize};

use crate::notes::{GuestRecord, ResourceRecord};

/// Generic wrapper the hosting API puts around every list payload.
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    pub collection: Vec<T>,
}

/// One entry of the podcast's seasons list. The season id is not a field of
/// its own; it has to be resolved from the final path segment of `href`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonRef {
    pub href: String,
    pub number: u32,
}

/// Season episode listing entry; only the fields the filter needs.
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeListItem {
    pub id: String,
    pub status: String,
    pub is_hidden: bool,
}

impl EpisodeListItem {
    /// Only published, non-hidden episodes make it into the catalog.
    pub fn is_listable(&self) -> bool {
        self.status == "published" && !self.is_hidden
    }
}

#[derive(Debug, Deserialize)]
pub struct SeasonNumber {
    pub number: u32,
}

#[derive(Debug, Deserialize)]
pub struct Keyword {
    pub value: String,
}

/// Full episode detail record as served by the API. `long_description` is
/// the show-notes document fed through the extraction pipeline;
/// `transcription` and `description` are flat markdown fields.
#[derive(Debug, Deserialize)]
pub struct EpisodeDetail {
    pub slug: String,
    #[serde(default)]
    pub transcription: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    pub number: u32,
    pub duration: u32,
    pub title: String,
    pub season: SeasonNumber,
    pub keywords: Collection<Keyword>,
}

/// Fully assembled episode: flat API fields plus everything the show-notes
/// pipeline extracted. Only the orchestrator builds these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeRecord {
    pub simplecast_id: String,
    pub slug: String,
    pub title: String,
    pub season_number: u32,
    pub episode_number: u32,
    pub duration: u32,
    pub image: String,
    pub keywords: Vec<String>,
    pub transcript_html: String,
    pub description_html: String,
    pub summary_html: String,
    pub resources: Vec<ResourceRecord>,
    pub guests: Vec<GuestRecord>,
    pub homework: Vec<String>,
}

/// One season's worth of assembled episodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonEpisodes {
    pub season_number: u32,
    pub episodes: Vec<EpisodeRecord>,
}
