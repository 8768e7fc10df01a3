//! `anchor`, `station` and `places` commands: single pipeline stages, no
//! language model involved.

use crate::recommend::{render_anchor, render_places};
use crate::Pipeline;

pub(crate) async fn run_anchor(
    pipeline: &Pipeline,
    location: &str,
    snap_to_station: bool,
    json: bool,
) -> anyhow::Result<()> {
    let anchor = if snap_to_station {
        pipeline.geo().resolve_station(location).await
    } else {
        pipeline.geo().resolve(location).await
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&anchor)?);
    } else {
        println!("{}", render_anchor(&anchor));
    }
    Ok(())
}

#[derive(Debug, Default)]
pub(crate) struct PlacesOptions {
    pub location: String,
    pub category: Option<String>,
    pub radius_m: Option<u32>,
    pub limit: Option<usize>,
}

pub(crate) async fn run_places(
    pipeline: &Pipeline,
    keyword: &str,
    options: &PlacesOptions,
    json: bool,
) -> anyhow::Result<()> {
    let region = pipeline.region();
    let anchor = pipeline.geo().resolve(&options.location).await;
    let places = pipeline
        .finder()
        .find_places(
            keyword,
            options.category.as_deref(),
            anchor.is_specific().then_some(anchor.coordinate),
            options.radius_m.unwrap_or(region.search_radius_m),
            options.limit.unwrap_or(region.result_limit),
        )
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&places)?);
    } else if places.is_empty() {
        println!("No places found for '{keyword}' near {}.", render_anchor(&anchor));
    } else {
        println!("anchor: {}\n", render_anchor(&anchor));
        print!("{}", render_places(&places));
    }
    Ok(())
}
