//! Exchange coverage boundaries.
//!
//! The boundary service answers with
//! `{"points": [{"lat": 51.2, "lng": -0.56}, ...]}` for an exchange id.

use std::fmt;

use anyhow::{Context, Result, bail};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::fetch::{HttpClient, fetch_bytes};

const ID_SLOT: &str = "{id}";

/// One vertex. Coordinates keep the number text the service sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Point {
    pub lat: serde_json::Number,
    pub lng: serde_json::Number,
}

/// Ordered outline of an exchange's coverage area.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    /// Decodes a boundary service response.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl fmt::Display for Polygon {
    /// Space-separated `lat lng` pairs, the GeoRSS polygon form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} {}", point.lat, point.lng)?;
        }
        Ok(())
    }
}

/// Boundary URL for `exchange_id`.
///
/// `{id}` may only appear in query values of the template; the id is
/// form-encoded there, so ids containing `&`, `#` or spaces stay one value.
pub fn bounds_url(template: &str, exchange_id: &str) -> Result<Url> {
    let mut url =
        Url::parse(template).with_context(|| format!("invalid boundary URL '{template}'"))?;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if !pairs.iter().any(|(_, value)| value.contains(ID_SLOT)) {
        bail!("boundary URL '{template}' has no {ID_SLOT} query value");
    }

    url.query_pairs_mut().clear().extend_pairs(
        pairs
            .iter()
            .map(|(key, value)| (key, value.replace(ID_SLOT, exchange_id))),
    );
    Ok(url)
}

/// Fetches and decodes the boundary of one exchange.
#[tracing::instrument(skip(client, url_template))]
pub async fn fetch_polygon<C: HttpClient + ?Sized>(
    client: &C,
    url_template: &str,
    exchange_id: &str,
) -> Result<Polygon> {
    let url = bounds_url(url_template, exchange_id)?;
    let bytes = fetch_bytes(client, url.as_str()).await?;
    let polygon = Polygon::from_json(&bytes)
        .with_context(|| format!("malformed boundary for exchange '{exchange_id}'"))?;

    if polygon.points.is_empty() {
        warn!("Boundary has no points");
    } else {
        debug!(points = polygon.points.len(), "Boundary fetched");
    }

    Ok(polygon)
}
