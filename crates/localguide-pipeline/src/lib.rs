//! The recommendation pipeline: read intent from user text, resolve an
//! anchor, search for nearby places, and optionally summarize them.
//!
//! Every stage is generic over the [`PlaceSearch`](localguide_kakao::PlaceSearch)
//! and [`LanguageModel`](localguide_llm::LanguageModel) seams.

pub mod finder;
pub mod geo;
pub mod intent;
pub mod pipeline;
pub mod variants;

#[cfg(test)]
mod test_support;

pub use finder::PlaceFinder;
pub use geo::{Anchor, AnchorOrigin, GeoResolver};
pub use intent::IntentExtractor;
pub use pipeline::{
    AnchorMode, ExtractionMode, Recommendation, RecommendationPipeline, RecommendationRequest,
};
pub use variants::QueryVariants;
