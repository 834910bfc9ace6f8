//! Viewer pages: a map that loads one of the generated feeds.
//!
//! The page template is an HTML file with `{{title}}`, `{{center_lat}}`,
//! `{{center_lng}}`, `{{slug}}`, `{{feed}}` and `{{updated}}` slots.

use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::escape::escape;

use crate::atom::RunTimestamp;
use crate::output::feed_file_name;
use crate::sources::{MapCenter, Source};

#[derive(Debug, Clone)]
pub struct ViewerTemplate {
    source: String,
}

impl ViewerTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read viewer template '{}'", path.display()))?;
        Ok(Self::new(source))
    }

    /// Fills the template for the feed of `source`.
    pub fn render(&self, source: &Source, center: MapCenter, updated: RunTimestamp) -> String {
        self.source
            .replace("{{title}}", &escape(source.title))
            .replace("{{center_lat}}", &center.lat.to_string())
            .replace("{{center_lng}}", &center.lng.to_string())
            .replace("{{slug}}", source.slug)
            .replace("{{feed}}", &feed_file_name(source.slug))
            .replace("{{updated}}", &updated.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{COMBINED, UK_MIDPOINT};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_render_fills_every_slot() {
        let template = ViewerTemplate::new(
            "<title>{{title}}</title>\
             <div data-lat=\"{{center_lat}}\" data-lng=\"{{center_lng}}\" \
             data-feed=\"{{feed}}\" id=\"{{slug}}\">{{updated}}</div>",
        );
        let updated = RunTimestamp::at(Utc.with_ymd_and_hms(2011, 3, 14, 0, 0, 0).unwrap());

        let page = template.render(&COMBINED, UK_MIDPOINT, updated);

        assert_eq!(
            page,
            "<title>Exchanges with super-fast broadband available now, soon, or sometime in the future</title>\
             <div data-lat=\"54.00366\" data-lng=\"-2.547855\" data-feed=\"all.atom\" id=\"all\">\
             2011-03-14T00:00:00Z</div>"
        );
    }

    #[test]
    fn test_shipped_template_has_every_slot() {
        let template = include_str!("../template.html");
        for slot in ["{{title}}", "{{center_lat}}", "{{center_lng}}", "{{feed}}", "{{updated}}"] {
            assert!(template.contains(slot), "missing {slot}");
        }
    }

    #[test]
    fn test_load_missing_template_is_an_error() {
        let err = ViewerTemplate::load(Path::new("/nonexistent/template.html")).unwrap_err();
        assert!(err.to_string().contains("viewer template"));
    }
}
