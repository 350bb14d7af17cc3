//! Built-in sample locations returned when every source fails.

use geo::Coord;

use crate::category::{PUBLIC_FACILITY_COLOR, PUBLIC_FACILITY_ICON, VenueCategory};
use crate::entry::{BucketThresholds, Entry, EntryKind, Facilities, Source};
use crate::geo_math::distance_meters;

/// Seoul City Hall, used when a query has no usable origin.
pub const DEFAULT_ORIGIN: Coord<f64> = Coord {
    x: 126.9780,
    y: 37.5665,
};

struct Sample {
    key: &'static str,
    name: &'static str,
    category: Option<&'static str>,
    latitude: f64,
    longitude: f64,
    address: &'static str,
    phone: Option<&'static str>,
    hours: &'static str,
    quality: u8,
    facilities: Facilities,
}

const fn facilities(baby_changing: bool, wifi: Option<bool>, parking: Option<bool>) -> Facilities {
    Facilities {
        disabled_access: Some(true),
        baby_changing: Some(baby_changing),
        separate_gender: Some(true),
        wifi,
        parking,
    }
}

static SAMPLES: [Sample; 6] = [
    Sample {
        key: "starbucks_1",
        name: "스타벅스 강남역점",
        category: Some("starbucks"),
        latitude: 37.5675,
        longitude: 126.9790,
        address: "서울시 강남구 강남대로 396",
        phone: Some("02-1234-5678"),
        hours: "06:00-22:00",
        quality: 3,
        facilities: facilities(true, Some(true), Some(false)),
    },
    Sample {
        key: "starbucks_2",
        name: "스타벅스 명동점",
        category: Some("starbucks"),
        latitude: 37.5685,
        longitude: 126.9770,
        address: "서울시 중구 명동길 123",
        phone: Some("02-2345-6789"),
        hours: "06:30-22:30",
        quality: 3,
        facilities: facilities(true, Some(true), Some(true)),
    },
    Sample {
        key: "twosome_1",
        name: "A Twosome Place 시청점",
        category: Some("twosome"),
        latitude: 37.5655,
        longitude: 126.9790,
        address: "서울시 중구 세종대로 110",
        phone: Some("02-3456-7890"),
        hours: "07:00-23:00",
        quality: 3,
        facilities: facilities(true, Some(true), Some(false)),
    },
    Sample {
        key: "ediya_1",
        name: "EDIYA Coffee 종각점",
        category: Some("ediya"),
        latitude: 37.5695,
        longitude: 126.9800,
        address: "서울시 종로구 종로 51",
        phone: Some("02-4567-8901"),
        hours: "06:00-22:00",
        quality: 2,
        facilities: facilities(false, Some(true), Some(false)),
    },
    Sample {
        key: "public_1",
        name: "강남구청 공중화장실",
        category: None,
        latitude: 37.5645,
        longitude: 126.9800,
        address: "서울시 강남구 학동로 426",
        phone: None,
        hours: "24h",
        quality: 2,
        facilities: facilities(false, None, None),
    },
    Sample {
        key: "public_2",
        name: "시청역 지하 공중화장실",
        category: None,
        latitude: 37.5635,
        longitude: 126.9760,
        address: "서울시 중구 시청역 지하1층",
        phone: None,
        hours: "05:30-00:30",
        quality: 1,
        facilities: facilities(false, None, None),
    },
];

impl Sample {
    fn to_entry(&self, origin: Coord<f64>, thresholds: &BucketThresholds) -> Entry {
        let location = Coord {
            x: self.longitude,
            y: self.latitude,
        };
        let distance = distance_meters(origin, location);
        let category = self.category.map(VenueCategory::lookup_or_fallback);
        let kind = if category.is_some() {
            EntryKind::CommercialVenue
        } else {
            EntryKind::PublicFacility
        };
        Entry {
            id: format!("{}_{}", Source::BuiltInSample.id_prefix(), self.key),
            name: self.name.to_owned(),
            kind,
            location,
            address: self.address.to_owned(),
            is_free: category.map_or(true, |c| c.is_free),
            quality_score: self.quality,
            quality_precise: f64::from(self.quality),
            distance_meters: distance,
            urgency_bucket: thresholds.bucket_for(distance),
            urgency_score: 0.0,
            source: Source::BuiltInSample,
            hours: Some(self.hours.to_owned()),
            phone: self.phone.map(str::to_owned),
            facilities: self.facilities,
            category: category.map(|c| c.key.to_owned()),
            icon: category.map_or(PUBLIC_FACILITY_ICON, |c| c.icon).to_owned(),
            color: category.map_or(PUBLIC_FACILITY_COLOR, |c| c.color).to_owned(),
        }
    }
}

/// Sample entries around central Seoul with distances measured from
/// `origin`.
///
/// The list is never empty.
#[must_use]
pub fn sample_entries(origin: Coord<f64>, thresholds: &BucketThresholds) -> Vec<Entry> {
    SAMPLES
        .iter()
        .map(|sample| sample.to_entry(origin, thresholds))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn samples_cover_both_kinds() {
        let entries = sample_entries(DEFAULT_ORIGIN, &BucketThresholds::default());
        assert_eq!(entries.len(), 6);
        assert_eq!(
            entries
                .iter()
                .filter(|e| e.kind == EntryKind::PublicFacility)
                .count(),
            2
        );
        assert!(entries.iter().all(|e| e.source == Source::BuiltInSample));
        assert!(entries.iter().all(|e| e.id.starts_with("sample_")));
    }

    #[rstest]
    fn distances_are_recomputed_for_each_origin() {
        let thresholds = BucketThresholds::default();
        let near = sample_entries(DEFAULT_ORIGIN, &thresholds);
        let far = sample_entries(Coord { x: 129.0756, y: 35.1796 }, &thresholds);
        assert!(near.iter().all(|e| e.distance_meters < 1_000.0));
        assert!(far.iter().all(|e| e.distance_meters > 300_000.0));
        assert!(far.iter().all(|e| e.urgency_bucket == crate::UrgencyBucket::Low));
    }

    #[rstest]
    fn public_samples_are_free() {
        let entries = sample_entries(DEFAULT_ORIGIN, &BucketThresholds::default());
        assert!(
            entries
                .iter()
                .filter(|e| e.kind == EntryKind::PublicFacility)
                .all(|e| e.is_free)
        );
    }
}
