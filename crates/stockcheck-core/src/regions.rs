//! Regions queried for store stock: four Hong Kong zones and Macau.

/// A geographic partition of the store network, as the stock endpoint
/// understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSpec {
    /// Upstream region identifier passed as `regionId`.
    pub region_id: i64,
    /// Label attached to every store record returned for this region.
    pub display_name: &'static str,
    /// ISO country code passed as `countryId`.
    pub country_code: &'static str,
}

pub const DEFAULT_REGIONS: [RegionSpec; 5] = [
    RegionSpec {
        region_id: 1347,
        display_name: "Hong Kong",
        country_code: "HK",
    },
    RegionSpec {
        region_id: 1350,
        display_name: "Kowloon",
        country_code: "HK",
    },
    RegionSpec {
        region_id: 1353,
        display_name: "New Territories",
        country_code: "HK",
    },
    RegionSpec {
        region_id: 1356,
        display_name: "Islands/Remote Areas",
        country_code: "HK",
    },
    RegionSpec {
        region_id: 1365,
        display_name: "Macau",
        country_code: "MO",
    },
];
