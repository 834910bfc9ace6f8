//! Atom feed rendering with GeoRSS polygons.

use std::fmt;

use chrono::{DateTime, Utc};
use quick_xml::escape::escape;

use crate::boundary::Polygon;
use crate::exchange::Exchange;
use crate::sources::Source;

const FEED_ID_BASE: &str = "uri:flother.com/blog/2011/broadband-telephone-exchanges/";
const ENTRY_TAG_BASE: &str = "tag:flother.com/blog/2011/broadband-telephone-exchanges,";

/// The single "updated" time of a run, stamped on every feed and entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTimestamp(DateTime<Utc>);

impl RunTimestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn at(time: DateTime<Utc>) -> Self {
        Self(time)
    }
}

impl fmt::Display for RunTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

/// A rendered `<entry>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry(String);

impl FeedEntry {
    pub fn new(exchange: &Exchange, polygon: &Polygon, updated: RunTimestamp) -> Self {
        let availability = exchange.availability.to_string();
        Self(format!(
            "    <entry>\n        \
                 <id>{ENTRY_TAG_BASE}{id}</id>\n        \
                 <title>{name}</title>\n        \
                 <updated>{updated}</updated>\n        \
                 <summary>{availability}</summary>\n        \
                 <georss:polygon>{polygon}</georss:polygon>\n    \
             </entry>",
            id = escape(exchange.id.as_str()),
            name = escape(exchange.name.as_str()),
            availability = escape(availability.as_str()),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wraps `entries`, in order, in a feed document for `source`.
pub fn render_feed(source: &Source, entries: &[FeedEntry], updated: RunTimestamp) -> String {
    let body = entries
        .iter()
        .map(FeedEntry::as_str)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <feed xmlns=\"http://www.w3.org/2005/Atom\"\n        \
               xmlns:georss=\"http://www.georss.org/georss\">\n    \
             <id>{FEED_ID_BASE}{slug}</id>\n    \
             <title>{title}</title>\n    \
             <updated>{updated}</updated>\n\
         {body}\n\
         </feed>\n",
        slug = source.slug,
        title = escape(source.title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::Availability;
    use crate::sources::SOURCES;
    use chrono::TimeZone;

    fn timestamp() -> RunTimestamp {
        RunTimestamp::at(Utc.with_ymd_and_hms(2011, 3, 14, 9, 26, 53).unwrap())
    }

    fn exchange(id: &str, name: &str) -> Exchange {
        Exchange {
            id: id.to_string(),
            name: name.to_string(),
            availability: Availability::Text("Now".to_string()),
        }
    }

    fn polygon() -> Polygon {
        Polygon::from_json(br#"{"points":[{"lat":51.2,"lng":-0.56},{"lat":51.3,"lng":-0.57}]}"#)
            .unwrap()
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(timestamp().to_string(), "2011-03-14T09:26:53Z");
    }

    #[test]
    fn test_entry_contents() {
        let entry = FeedEntry::new(&exchange("12345", "Aldershot"), &polygon(), timestamp());
        let xml = entry.as_str();

        assert!(xml.starts_with("    <entry>\n        <id>"));
        assert!(xml.contains(
            "<id>tag:flother.com/blog/2011/broadband-telephone-exchanges,12345</id>"
        ));
        assert!(xml.contains("<title>Aldershot</title>"));
        assert!(xml.contains("<updated>2011-03-14T09:26:53Z</updated>"));
        assert!(xml.contains("<summary>Now</summary>"));
        assert!(xml.contains("<georss:polygon>51.2 -0.56 51.3 -0.57</georss:polygon>"));
        assert!(xml.ends_with("    </entry>"));
    }

    #[test]
    fn test_entry_escapes_text() {
        let entry = FeedEntry::new(
            &exchange("7", "Hook & <Wood>"),
            &Polygon::default(),
            timestamp(),
        );
        assert!(entry.as_str().contains("<title>Hook &amp; &lt;Wood&gt;</title>"));
    }

    #[test]
    fn test_feed_keeps_entry_order() {
        let entries = vec![
            FeedEntry::new(&exchange("2", "Bath"), &polygon(), timestamp()),
            FeedEntry::new(&exchange("1", "Aldershot"), &polygon(), timestamp()),
        ];
        let feed = render_feed(&SOURCES[0], &entries, timestamp());

        let bath = feed.find("<title>Bath</title>").unwrap();
        let aldershot = feed.find("<title>Aldershot</title>").unwrap();
        assert!(bath < aldershot);
        assert!(feed.contains("<title>Exchanges with super-fast broadband available now</title>"));
        assert!(feed.contains("xmlns:georss=\"http://www.georss.org/georss\""));
        assert!(feed.contains(
            "<id>uri:flother.com/blog/2011/broadband-telephone-exchanges/accepting_orders</id>"
        ));
        assert!(feed.trim_end().ends_with("</feed>"));
    }

    #[test]
    fn test_empty_feed() {
        let feed = render_feed(&SOURCES[1], &[], timestamp());
        assert!(!feed.contains("<entry>"));
        assert!(feed.contains("<updated>2011-03-14T09:26:53Z</updated>"));
    }
}
