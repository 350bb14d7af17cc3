//! Catalogue of commercial venue categories.
//!
//! Each category carries the configuration the normalizer needs (base
//! quality, free flag, presentation hints) and the keywords directory
//! adapters use to search for and recognise the brand.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Configuration for one venue category or brand.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VenueCategory {
    /// Stable key, e.g. `starbucks`.
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Queries sent to a place directory for this category.
    pub search_keywords: &'static [&'static str],
    /// Case-insensitive substrings a venue name must contain to count as this
    /// brand. Empty for generic categories that accept any result.
    pub brand_keywords: &'static [&'static str],
    /// Quality before rating and price adjustments.
    pub base_quality: f64,
    /// Whether restroom use is free without a purchase.
    pub is_free: bool,
    /// Marker icon.
    pub icon: &'static str,
    /// Marker colour as a hex string.
    pub color: &'static str,
}

/// Icon used for public facilities.
pub const PUBLIC_FACILITY_ICON: &str = "🚽";

/// Colour used for public facilities.
pub const PUBLIC_FACILITY_COLOR: &str = "#28a745";

const CAFE_ICON: &str = "☕";

const GENERIC_CAFE: VenueCategory = VenueCategory {
    key: "cafe",
    label: "Café",
    search_keywords: &["카페", "cafe"],
    brand_keywords: &[],
    base_quality: 2.0,
    is_free: false,
    icon: CAFE_ICON,
    color: "#8B4513",
};

/// Every category the engine knows about.
pub static CATALOGUE: [VenueCategory; 7] = [
    VenueCategory {
        key: "starbucks",
        label: "Starbucks",
        search_keywords: &["스타벅스", "Starbucks"],
        brand_keywords: &["스타벅스", "starbucks"],
        base_quality: 3.0,
        is_free: false,
        icon: CAFE_ICON,
        color: "#00704A",
    },
    VenueCategory {
        key: "twosome",
        label: "A Twosome Place",
        search_keywords: &["투썸플레이스", "A Twosome Place"],
        brand_keywords: &["투썸플레이스", "twosome"],
        base_quality: 3.0,
        is_free: false,
        icon: CAFE_ICON,
        color: "#8B4513",
    },
    VenueCategory {
        key: "ediya",
        label: "EDIYA Coffee",
        search_keywords: &["이디야커피", "EDIYA COFFEE"],
        brand_keywords: &["이디야", "ediya"],
        base_quality: 2.0,
        is_free: false,
        icon: CAFE_ICON,
        color: "#FF6B35",
    },
    VenueCategory {
        key: "pascucci",
        label: "Caffè Pascucci",
        search_keywords: &["파스쿠찌", "PASCUCCI"],
        brand_keywords: &["파스쿠찌", "pascucci"],
        base_quality: 3.0,
        is_free: false,
        icon: CAFE_ICON,
        color: "#8B0000",
    },
    VenueCategory {
        key: "coffeebean",
        label: "The Coffee Bean",
        search_keywords: &["커피빈", "Coffee Bean"],
        brand_keywords: &["커피빈", "coffee bean"],
        base_quality: 3.0,
        is_free: false,
        icon: CAFE_ICON,
        color: "#4B0082",
    },
    GENERIC_CAFE,
    VenueCategory {
        key: "department_store",
        label: "Department store",
        search_keywords: &["백화점", "department store"],
        brand_keywords: &[],
        base_quality: 3.0,
        is_free: true,
        icon: "🏬",
        color: "#6B46C1",
    },
];

impl VenueCategory {
    /// Look up a category by key, ignoring case and surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use savemetoilet_core::VenueCategory;
    ///
    /// let starbucks = VenueCategory::lookup("Starbucks").expect("known brand");
    /// assert_eq!(starbucks.base_quality, 3.0);
    /// assert!(VenueCategory::lookup("unknown").is_none());
    /// ```
    #[must_use]
    pub fn lookup(key: &str) -> Option<&'static Self> {
        let wanted = key.trim();
        CATALOGUE
            .iter()
            .find(|category| category.key.eq_ignore_ascii_case(wanted))
    }

    /// Generic café configuration used for unknown category keys.
    #[must_use]
    pub const fn fallback() -> &'static Self {
        &GENERIC_CAFE
    }

    /// Resolve `key` or fall back to the generic café configuration.
    #[must_use]
    pub fn lookup_or_fallback(key: &str) -> &'static Self {
        Self::lookup(key).unwrap_or_else(Self::fallback)
    }

    /// Resolve a list of keys, dropping unknown ones and duplicates.
    #[must_use]
    pub fn resolve_all<S: AsRef<str>>(keys: &[S]) -> Vec<&'static Self> {
        let mut resolved: Vec<&'static Self> = Vec::new();
        for key in keys {
            match Self::lookup(key.as_ref()) {
                Some(category) if !resolved.iter().any(|seen| seen.key == category.key) => {
                    resolved.push(category);
                }
                Some(_) => {}
                None => log::debug!("ignoring unknown venue category {:?}", key.as_ref()),
            }
        }
        resolved
    }

    /// Whether `name` belongs to this brand.
    ///
    /// Generic categories accept every name.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        if self.brand_keywords.is_empty() {
            return true;
        }
        let lowered = name.to_lowercase();
        self.brand_keywords
            .iter()
            .any(|keyword| lowered.contains(&keyword.to_lowercase()))
    }
}
