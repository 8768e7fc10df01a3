//! `recommend` command: run the full pipeline and print the outcome.

use std::fmt::Write as _;

use localguide_core::{Coordinate, Place};
use localguide_pipeline::{
    Anchor, AnchorMode, ExtractionMode, Recommendation, RecommendationRequest,
};

use crate::Pipeline;

/// Parsed `recommend` flags, before validation.
#[derive(Debug)]
pub(crate) struct RecommendArgs {
    pub text: String,
    pub location: String,
    pub station: bool,
    pub device: Option<(f64, f64)>,
    pub category: Option<String>,
    pub qualified: bool,
    pub summarize: bool,
}

/// Turns CLI flags into a pipeline request.
///
/// # Errors
///
/// Returns an error if the device coordinate is outside valid degree ranges.
pub(crate) fn build_request(args: RecommendArgs) -> anyhow::Result<RecommendationRequest> {
    let anchor_mode = match args.device {
        Some((lon, lat)) => AnchorMode::Device(Coordinate::new(lon, lat)?),
        None if args.station => AnchorMode::NearestStation,
        None => AnchorMode::Location,
    };
    let mode = if args.qualified {
        ExtractionMode::QualifiedPlaceName
    } else {
        ExtractionMode::Keyword
    };

    let mut request = RecommendationRequest::new(args.text)
        .at(args.location)
        .anchored_by(anchor_mode)
        .mode(mode);
    if let Some(category) = args.category {
        request = request.category(category);
    }
    if !args.summarize {
        request = request.without_summary();
    }
    Ok(request)
}

pub(crate) async fn run_recommend(
    pipeline: &Pipeline,
    request: &RecommendationRequest,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = pipeline.recommend(request).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render(&outcome));
    }
    Ok(())
}

pub(crate) fn render_anchor(anchor: &Anchor) -> String {
    format!("{} [{}]", anchor.coordinate, anchor.origin.as_str())
}

pub(crate) fn render_places(places: &[Place]) -> String {
    let mut out = String::new();
    for (i, place) in places.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, place.name);
        let _ = writeln!(out, "   {}", place.address);

        let mut details = Vec::new();
        if let Some(category) = &place.category {
            details.push(category.clone());
        }
        if let Some(phone) = &place.phone {
            details.push(phone.clone());
        }
        if let Some(distance) = place.distance_m {
            details.push(format!("{distance}m"));
        }
        if let Some(url) = &place.url {
            details.push(url.clone());
        }
        if !details.is_empty() {
            let _ = writeln!(out, "   {}", details.join(" | "));
        }
    }
    out
}

fn render(outcome: &Recommendation) -> String {
    match outcome {
        Recommendation::Found {
            result,
            keyword,
            anchor,
            model_answer,
        } => {
            let mut out = format!("keyword: {keyword}\nanchor:  {}\n", render_anchor(anchor));
            if let Some(answer) = model_answer {
                let _ = writeln!(out, "model:   {answer}");
            }
            out.push('\n');
            out.push_str(&render_places(&result.places));
            if let Some(summary) = &result.summary {
                let _ = write!(out, "\n{summary}\n");
            }
            out
        }
        Recommendation::NoKeyword => {
            "Could not understand the request. Try naming a place or a kind of food.\n".to_string()
        }
        Recommendation::NoPlaces { keyword, anchor } => format!(
            "No places found for '{keyword}' near {}. Try rephrasing the request.\n",
            render_anchor(anchor)
        ),
    }
}
