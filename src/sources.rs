//! The fixed set of exchange lists and the names of the combined outputs.

/// One published exchange list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    /// Title of the feed and viewer page built from this list.
    pub title: &'static str,
    /// Filename-safe identifier; completes the sheet URL and names the outputs.
    pub slug: &'static str,
}

/// Every exchange list, in the order they are processed and combined.
pub const SOURCES: [Source; 3] = [
    Source {
        title: "Exchanges with super-fast broadband available now",
        slug: "accepting_orders",
    },
    Source {
        title: "Exchanges with super-fast broadband available soon",
        slug: "coming_soon",
    },
    Source {
        title: "Exchanges with super-fast broadband available eventually",
        slug: "future_exchanges",
    },
];

/// Outputs holding every exchange from every list.
pub const COMBINED: Source = Source {
    title: "Exchanges with super-fast broadband available now, soon, or sometime in the future",
    slug: "all",
};

/// Initial framing point for the viewer map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCenter {
    pub lat: f64,
    pub lng: f64,
}

/// Centre point of the UK.
pub const UK_MIDPOINT: MapCenter = MapCenter {
    lat: 54.00366,
    lng: -2.547855,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_are_unique_and_filename_safe() {
        let mut slugs: Vec<_> = SOURCES.iter().map(|s| s.slug).collect();
        slugs.push(COMBINED.slug);
        for slug in &slugs {
            assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), SOURCES.len() + 1);
    }

    #[test]
    fn test_source_order() {
        let slugs: Vec<_> = SOURCES.iter().map(|s| s.slug).collect();
        assert_eq!(slugs, ["accepting_orders", "coming_soon", "future_exchanges"]);
    }
}
