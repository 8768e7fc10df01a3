//! Recommendation orchestration.
//!
//! One request runs straight through: intent extraction, anchor resolution,
//! place search, then an optional summary. Provider failures are absorbed by
//! the stages; only [`Recommendation::NoKeyword`] and
//! [`Recommendation::NoPlaces`] are reported as terminal states.

use localguide_core::{Coordinate, RankedResultSet, RegionPolicy};
use localguide_kakao::PlaceSearch;
use localguide_llm::{KeywordParse, LanguageModel, PlaceNameParse};
use serde::Serialize;

use crate::finder::PlaceFinder;
use crate::geo::{Anchor, GeoResolver};
use crate::intent::IntentExtractor;

/// Category used in the place-name prompt when the caller gives none.
const FALLBACK_CATEGORY: &str = "기타";

/// How the search anchor is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnchorMode {
    /// Resolve the request's location text.
    #[default]
    Location,
    /// Resolve the location text, then snap onto the nearest station.
    NearestStation,
    /// Use a coordinate the caller already has, e.g. from device GPS.
    Device(Coordinate),
}

/// What the language model is asked to pull out of the user text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// A short search keyword; falls back to the region's default keyword.
    #[default]
    Keyword,
    /// A full branch-qualified place name; no fallback exists.
    QualifiedPlaceName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub user_text: String,
    pub location_text: String,
    pub anchor_mode: AnchorMode,
    pub category: Option<String>,
    pub mode: ExtractionMode,
    pub summarize: bool,
}

impl RecommendationRequest {
    #[must_use]
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            location_text: String::new(),
            anchor_mode: AnchorMode::Location,
            category: None,
            mode: ExtractionMode::Keyword,
            summarize: true,
        }
    }

    #[must_use]
    pub fn at(mut self, location_text: impl Into<String>) -> Self {
        self.location_text = location_text.into();
        self
    }

    #[must_use]
    pub fn anchored_by(mut self, anchor_mode: AnchorMode) -> Self {
        self.anchor_mode = anchor_mode;
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: ExtractionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn without_summary(mut self) -> Self {
        self.summarize = false;
        self
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    Found {
        result: RankedResultSet,
        keyword: String,
        anchor: Anchor,
        /// The model's description line in qualified-place-name mode.
        model_answer: Option<String>,
    },
    /// Qualified-place-name mode could not read a place name.
    NoKeyword,
    /// Every reformulation came back empty.
    NoPlaces { keyword: String, anchor: Anchor },
}

/// Composes the resolver, finder and extractor over shared providers.
///
/// `S` is cloned into each stage, so wrap a real client in an `Arc`.
pub struct RecommendationPipeline<S, M> {
    geo: GeoResolver<S>,
    finder: PlaceFinder<S>,
    intent: IntentExtractor<M>,
    region: RegionPolicy,
}

impl<S, M> RecommendationPipeline<S, M>
where
    S: PlaceSearch + Clone,
    M: LanguageModel,
{
    #[must_use]
    pub fn new(search: S, model: M, region: RegionPolicy) -> Self {
        Self {
            geo: GeoResolver::new(search.clone(), region.clone()),
            finder: PlaceFinder::new(search, region.clone()),
            intent: IntentExtractor::new(model),
            region,
        }
    }

    #[must_use]
    pub fn geo(&self) -> &GeoResolver<S> {
        &self.geo
    }

    #[must_use]
    pub fn finder(&self) -> &PlaceFinder<S> {
        &self.finder
    }

    #[must_use]
    pub fn region(&self) -> &RegionPolicy {
        &self.region
    }

    pub async fn recommend(&self, request: &RecommendationRequest) -> Recommendation {
        let category = request.category.as_deref().map(str::trim).filter(|c| !c.is_empty());

        let (keyword, model_answer) = match request.mode {
            ExtractionMode::Keyword => match self.intent.extract_keyword(&request.user_text).await {
                KeywordParse::Found(keyword) => (keyword, None),
                KeywordParse::NoKeyword => {
                    tracing::info!(
                        default = %self.region.default_keyword,
                        "no keyword extracted, using default"
                    );
                    (self.region.default_keyword.clone(), None)
                }
            },
            ExtractionMode::QualifiedPlaceName => {
                let parsed = self
                    .intent
                    .extract_qualified_place_name(
                        &self.region.name,
                        category.unwrap_or(FALLBACK_CATEGORY),
                        &request.user_text,
                    )
                    .await;
                match parsed {
                    PlaceNameParse::Found { name, description } => (name, description),
                    PlaceNameParse::Missing => {
                        tracing::info!("no place name extracted");
                        return Recommendation::NoKeyword;
                    }
                }
            }
        };

        let anchor = match request.anchor_mode {
            AnchorMode::Device(coordinate) => Anchor::device(coordinate),
            AnchorMode::Location => self.geo.resolve(&request.location_text).await,
            AnchorMode::NearestStation => self.geo.resolve_station(&request.location_text).await,
        };

        let search_anchor = anchor.is_specific().then_some(anchor.coordinate);
        let places = self
            .finder
            .find_places(
                &keyword,
                category,
                search_anchor,
                self.region.search_radius_m,
                self.region.result_limit,
            )
            .await;

        let result = RankedResultSet::new(places, self.region.result_limit);
        if result.is_empty() {
            tracing::info!(keyword = %keyword, anchor = %anchor.coordinate, "no places found");
            return Recommendation::NoPlaces { keyword, anchor };
        }

        let summary = if request.summarize {
            self.intent.summarize(&request.user_text, &result.places).await
        } else {
            None
        };

        let result = result.with_summary(summary);
        tracing::info!(
            keyword = %keyword,
            anchor = %anchor.coordinate,
            count = result.places.len(),
            "recommendation ready"
        );
        Recommendation::Found {
            result,
            keyword,
            anchor,
            model_answer,
        }
    }
}
