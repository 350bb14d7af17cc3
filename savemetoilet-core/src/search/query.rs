//! Immutable input to one orchestration call.

use geo::Coord;

use crate::category::VenueCategory;
use crate::filter::SearchFilters;
use crate::normalize::is_valid_wgs84;
use crate::profile::UrgencyProfile;

use super::SearchError;

/// A single search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Search origin with `x = longitude` and `y = latitude`.
    pub origin: Coord<f64>,
    /// Active urgency profile.
    pub profile: UrgencyProfile,
    /// Radius passed to source adapters, in metres.
    pub radius_meters: f64,
    /// Inclusion rules applied after ranking.
    pub filters: SearchFilters,
    /// Venue categories commercial adapters should search.
    pub categories: Vec<&'static VenueCategory>,
}

impl SearchQuery {
    /// Build a query from loosely typed inputs.
    ///
    /// Unknown profile keys resolve to `moderate` and unknown category keys
    /// are dropped.
    ///
    /// # Examples
    /// ```
    /// use savemetoilet_core::{SearchFilters, SearchQuery, UrgencyLevel};
    ///
    /// let query = SearchQuery::new(
    ///     37.5665,
    ///     126.9780,
    ///     "emergency",
    ///     300.0,
    ///     SearchFilters::default(),
    ///     &["starbucks", "unknown"],
    /// );
    /// assert_eq!(query.profile.level, UrgencyLevel::Emergency);
    /// assert_eq!(query.categories.len(), 1);
    /// ```
    #[must_use]
    pub fn new<S: AsRef<str>>(
        latitude: f64,
        longitude: f64,
        profile_key: &str,
        radius_meters: f64,
        filters: SearchFilters,
        category_keys: &[S],
    ) -> Self {
        Self {
            origin: Coord {
                x: longitude,
                y: latitude,
            },
            profile: UrgencyProfile::from_key(profile_key),
            radius_meters,
            filters,
            categories: VenueCategory::resolve_all(category_keys),
        }
    }

    /// Build a query using the profile's defaults.
    ///
    /// The radius is the smaller of the profile radius and
    /// `filters.max_distance`. Categories are the profile defaults, or none
    /// when commercial venues are excluded.
    #[must_use]
    pub fn for_profile(origin: Coord<f64>, profile: UrgencyProfile, filters: SearchFilters) -> Self {
        let radius_meters = profile.default_radius_meters.min(filters.max_distance);
        let categories = if filters.include_commercial {
            VenueCategory::resolve_all(profile.default_categories)
        } else {
            Vec::new()
        };
        Self {
            origin,
            profile,
            radius_meters,
            filters,
            categories,
        }
    }

    /// Check that the origin and radius are usable.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidOrigin`] for non-finite or out-of-range
    /// coordinates and [`SearchError::InvalidRadius`] for a radius that is not
    /// a positive finite number.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !is_valid_wgs84(self.origin.y, self.origin.x) {
            return Err(SearchError::InvalidOrigin {
                latitude: self.origin.y,
                longitude: self.origin.x,
            });
        }
        if !self.radius_meters.is_finite() || self.radius_meters <= 0.0 {
            return Err(SearchError::InvalidRadius {
                radius_meters: self.radius_meters,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::UrgencyLevel;
    use rstest::rstest;

    const CITY_HALL: Coord<f64> = Coord {
        x: 126.9780,
        y: 37.5665,
    };

    #[rstest]
    #[case(UrgencyLevel::Emergency, 1000.0, 300.0)]
    #[case(UrgencyLevel::Relaxed, 1000.0, 1000.0)]
    #[case(UrgencyLevel::Relaxed, 400.0, 400.0)]
    fn radius_is_capped_by_max_distance(
        #[case] level: UrgencyLevel,
        #[case] max_distance: f64,
        #[case] expected: f64,
    ) {
        let filters = SearchFilters {
            max_distance,
            ..SearchFilters::default()
        };
        let query = SearchQuery::for_profile(CITY_HALL, level.profile(), filters);
        assert_eq!(query.radius_meters, expected);
    }

    #[rstest]
    fn excluding_commercial_disables_categories() {
        let filters = SearchFilters {
            include_commercial: false,
            ..SearchFilters::default()
        };
        let query = SearchQuery::for_profile(CITY_HALL, UrgencyLevel::Relaxed.profile(), filters);
        assert!(query.categories.is_empty());
    }

    #[rstest]
    fn relaxed_profile_searches_generic_cafes() {
        let query = SearchQuery::for_profile(
            CITY_HALL,
            UrgencyLevel::Relaxed.profile(),
            SearchFilters::default(),
        );
        let keys: Vec<_> = query.categories.iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["starbucks", "twosome", "ediya", "cafe"]);
    }

    #[rstest]
    #[case(f64::NAN, 126.9)]
    #[case(37.5, f64::INFINITY)]
    #[case(120.0, 126.9)]
    fn invalid_origins_are_rejected(#[case] latitude: f64, #[case] longitude: f64) {
        let query = SearchQuery::new(
            latitude,
            longitude,
            "moderate",
            500.0,
            SearchFilters::default(),
            &["starbucks"],
        );
        assert!(matches!(
            query.validate(),
            Err(SearchError::InvalidOrigin { .. })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    #[case(f64::NAN)]
    fn non_positive_radius_is_rejected(#[case] radius: f64) {
        let query = SearchQuery::new(
            37.5665,
            126.978,
            "moderate",
            radius,
            SearchFilters::default(),
            &["starbucks"],
        );
        assert!(matches!(
            query.validate(),
            Err(SearchError::InvalidRadius { .. })
        ));
    }
}
