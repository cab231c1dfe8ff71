//! # Trend Aggregation
//!
//! Time-bucketed price series and corpus-wide market summaries over a
//! listing snapshot.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::config::{TREND_WINDOW_MAX_DAYS, TREND_WINDOW_MIN_DAYS};
use crate::error::{CoreError, Result};
use crate::market::listing::{city_matches, ListingSummary};
use crate::valuation::AssessmentLabel;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub avg_price: f64,
    pub avg_price_per_sqm: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct GroupStats {
    pub count: usize,
    pub avg_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketOverview {
    pub total_listings: usize,
    pub avg_price: f64,
    pub avg_price_per_sqm: f64,
    pub below_market_count: usize,
    pub at_market_count: usize,
    pub above_market_count: usize,
    pub by_city: HashMap<String, GroupStats>,
    pub by_property_type: HashMap<String, GroupStats>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoomStats {
    pub rooms: String,
    pub count: usize,
    pub avg_price: f64,
}

/// Daily price trend over the trailing `window_days` window, ending now.
/// City filter is a case-insensitive substring, kind is exact. Days with no
/// qualifying listings are absent, not zero-filled.
pub fn trend(
    listings: &[ListingSummary],
    city: Option<&str>,
    property_type: Option<&str>,
    window_days: i64,
) -> Result<Vec<TrendPoint>> {
    trend_at(listings, city, property_type, window_days, Utc::now())
}

/// Deterministic variant of [`trend`] with an explicit reference instant.
pub fn trend_at(
    listings: &[ListingSummary],
    city: Option<&str>,
    property_type: Option<&str>,
    window_days: i64,
    now: DateTime<Utc>,
) -> Result<Vec<TrendPoint>> {
    if !(TREND_WINDOW_MIN_DAYS..=TREND_WINDOW_MAX_DAYS).contains(&window_days) {
        return Err(CoreError::InvalidParameter(format!(
            "trend window must be {}..={} days, got {}",
            TREND_WINDOW_MIN_DAYS, TREND_WINDOW_MAX_DAYS, window_days
        )));
    }

    let start = now - Duration::days(window_days);
    // (price sum, price count, pps sum, pps count, listing count) per day
    let mut buckets: HashMap<NaiveDate, (f64, usize, f64, usize, usize)> = HashMap::new();

    for listing in listings {
        if !listing.is_active || listing.captured_at < start || listing.captured_at > now {
            continue;
        }
        if let Some(city) = city {
            if !city_matches(listing.city.as_deref(), city) {
                continue;
            }
        }
        if let Some(kind) = property_type {
            if listing.property_type.as_deref() != Some(kind) {
                continue;
            }
        }

        let bucket = buckets.entry(listing.captured_at.date_naive()).or_default();
        if let Some(price) = listing.price {
            bucket.0 += price;
            bucket.1 += 1;
        }
        if let Some(pps) = listing.price_per_sqm {
            bucket.2 += pps;
            bucket.3 += 1;
        }
        bucket.4 += 1;
    }

    let mut points: Vec<TrendPoint> = buckets
        .into_iter()
        .map(|(date, (price_sum, price_n, pps_sum, pps_n, count))| TrendPoint {
            date,
            avg_price: mean(price_sum, price_n),
            avg_price_per_sqm: mean(pps_sum, pps_n),
            count,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    Ok(points)
}

/// Corpus-wide summary: totals, averages, assessment distribution, and
/// per-city / per-kind breakdowns. Listings with an unknown city or kind
/// are excluded from the respective breakdown, never bucketed under a
/// sentinel key.
pub fn overview(listings: &[ListingSummary]) -> MarketOverview {
    let active: Vec<&ListingSummary> = listings.iter().filter(|l| l.is_active).collect();

    let (price_sum, price_n) = active
        .iter()
        .filter_map(|l| l.price)
        .fold((0.0, 0usize), |(s, n), p| (s + p, n + 1));
    let (pps_sum, pps_n) = active
        .iter()
        .filter_map(|l| l.price_per_sqm)
        .fold((0.0, 0usize), |(s, n), p| (s + p, n + 1));

    let count_label = |label: AssessmentLabel| {
        active.iter().filter(|l| l.assessment == Some(label)).count()
    };

    let mut by_city: HashMap<String, (f64, usize, usize)> = HashMap::new();
    let mut by_kind: HashMap<String, (f64, usize, usize)> = HashMap::new();
    for listing in &active {
        if let Some(city) = &listing.city {
            accumulate(by_city.entry(city.clone()).or_default(), listing.price);
        }
        if let Some(kind) = &listing.property_type {
            accumulate(by_kind.entry(kind.clone()).or_default(), listing.price);
        }
    }

    MarketOverview {
        total_listings: active.len(),
        avg_price: mean(price_sum, price_n),
        avg_price_per_sqm: mean(pps_sum, pps_n),
        below_market_count: count_label(AssessmentLabel::BelowMarket),
        at_market_count: count_label(AssessmentLabel::AtMarket),
        above_market_count: count_label(AssessmentLabel::AboveMarket),
        by_city: finish_groups(by_city),
        by_property_type: finish_groups(by_kind),
    }
}

/// Cities with active listings, descending by listing count.
pub fn cities(listings: &[ListingSummary]) -> Vec<CityCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for listing in listings.iter().filter(|l| l.is_active) {
        if let Some(city) = &listing.city {
            *counts.entry(city.clone()).or_default() += 1;
        }
    }
    let mut result: Vec<CityCount> =
        counts.into_iter().map(|(city, count)| CityCount { city, count }).collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.city.cmp(&b.city)));
    result
}

/// Distribution of room layout descriptors, ascending by descriptor.
pub fn room_distribution(listings: &[ListingSummary], city: Option<&str>) -> Vec<RoomStats> {
    let mut groups: HashMap<String, (f64, usize, usize)> = HashMap::new();
    for listing in listings.iter().filter(|l| l.is_active) {
        let Some(rooms) = &listing.rooms else {
            continue;
        };
        if let Some(city) = city {
            if !city_matches(listing.city.as_deref(), city) {
                continue;
            }
        }
        accumulate(groups.entry(rooms.clone()).or_default(), listing.price);
    }

    let mut result: Vec<RoomStats> = groups
        .into_iter()
        .map(|(rooms, (price_sum, price_n, count))| RoomStats {
            rooms,
            count,
            avg_price: mean(price_sum, price_n),
        })
        .collect();
    result.sort_by(|a, b| a.rooms.cmp(&b.rooms));
    result
}

fn accumulate(entry: &mut (f64, usize, usize), price: Option<f64>) {
    if let Some(price) = price {
        entry.0 += price;
        entry.1 += 1;
    }
    entry.2 += 1;
}

fn finish_groups(groups: HashMap<String, (f64, usize, usize)>) -> HashMap<String, GroupStats> {
    groups
        .into_iter()
        .map(|(key, (price_sum, price_n, count))| {
            (key, GroupStats { count, avg_price: mean(price_sum, price_n) })
        })
        .collect()
}

fn mean(sum: f64, n: usize) -> f64 {
    if n > 0 {
        sum / n as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::listing::tests::listing;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap()
    }

    fn captured(id: i64, days_ago: i64) -> ListingSummary {
        let mut l = listing(id);
        l.captured_at = now() - Duration::days(days_ago);
        l
    }

    #[test]
    fn buckets_by_calendar_day_sorted_ascending() {
        let corpus = vec![captured(1, 1), captured(2, 1), captured(3, 10)];
        let points = trend_at(&corpus, None, None, 90, now()).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points[0].date < points[1].date);
        assert_eq!(points[0].count, 1); // 10 days ago
        assert_eq!(points[1].count, 2); // yesterday
    }

    #[test]
    fn counts_sum_to_qualifying_listings_and_dates_stay_in_window() {
        let corpus =
            vec![captured(1, 0), captured(2, 5), captured(3, 89), captured(4, 120)];
        let points = trend_at(&corpus, None, None, 90, now()).unwrap();
        let total: usize = points.iter().map(|p| p.count).sum();
        assert_eq!(total, 3); // 120-day-old listing outside the window

        let start = (now() - Duration::days(90)).date_naive();
        for point in &points {
            assert!(point.date >= start && point.date <= now().date_naive());
        }
    }

    #[test]
    fn window_bounds_are_enforced() {
        assert!(trend_at(&[], None, None, 6, now()).is_err());
        assert!(trend_at(&[], None, None, 366, now()).is_err());
        assert!(trend_at(&[], None, None, 7, now()).is_ok());
        assert!(trend_at(&[], None, None, 365, now()).is_ok());
    }

    #[test]
    fn city_and_kind_filters() {
        let mut brno = captured(2, 1);
        brno.city = Some("Brno".to_string());
        let mut house = captured(3, 1);
        house.property_type = Some("house".to_string());
        let corpus = vec![captured(1, 1), brno, house];

        let points = trend_at(&corpus, Some("praha"), None, 90, now()).unwrap();
        assert_eq!(points.iter().map(|p| p.count).sum::<usize>(), 2);

        let points = trend_at(&corpus, None, Some("house"), 90, now()).unwrap();
        assert_eq!(points.iter().map(|p| p.count).sum::<usize>(), 1);
    }

    #[test]
    fn averages_ignore_unknown_values() {
        let mut priced = captured(1, 1);
        priced.price = Some(8_000_000.0);
        priced.price_per_sqm = Some(100_000.0);
        let mut unpriced = captured(2, 1);
        unpriced.price = None;
        unpriced.price_per_sqm = None;

        let points = trend_at(&[priced, unpriced], None, None, 90, now()).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].count, 2);
        assert_eq!(points[0].avg_price, 8_000_000.0);
        assert_eq!(points[0].avg_price_per_sqm, 100_000.0);
    }

    #[test]
    fn overview_counts_labels_and_groups() {
        use crate::valuation::AssessmentLabel;

        let mut below = listing(1);
        below.assessment = Some(AssessmentLabel::BelowMarket);
        below.price = Some(6_000_000.0);
        let mut above = listing(2);
        above.assessment = Some(AssessmentLabel::AboveMarket);
        above.city = Some("Brno".to_string());
        above.price = Some(4_000_000.0);
        let mut anonymous = listing(3);
        anonymous.city = None;
        anonymous.property_type = None;
        anonymous.assessment = None;
        let mut inactive = listing(4);
        inactive.is_active = false;

        let summary = overview(&[below, above, anonymous, inactive]);
        assert_eq!(summary.total_listings, 3);
        assert_eq!(summary.below_market_count, 1);
        assert_eq!(summary.at_market_count, 0);
        assert_eq!(summary.above_market_count, 1);

        // Unknown city/kind excluded from breakdowns
        assert_eq!(summary.by_city.len(), 2);
        assert_eq!(summary.by_city["Praha"].count, 1);
        assert_eq!(summary.by_city["Brno"].avg_price, 4_000_000.0);
        assert_eq!(summary.by_property_type["apartment"].count, 2);
    }

    #[test]
    fn empty_corpus_overview_is_all_zero() {
        let summary = overview(&[]);
        assert_eq!(summary.total_listings, 0);
        assert_eq!(summary.avg_price, 0.0);
        assert!(summary.by_city.is_empty());
    }

    #[test]
    fn cities_ordered_by_count_descending() {
        let mut brno_a = listing(2);
        brno_a.city = Some("Brno".to_string());
        let mut brno_b = listing(3);
        brno_b.city = Some("Brno".to_string());
        let corpus = vec![listing(1), brno_a, brno_b];

        let result = cities(&corpus);
        assert_eq!(result[0], CityCount { city: "Brno".to_string(), count: 2 });
        assert_eq!(result[1], CityCount { city: "Praha".to_string(), count: 1 });
    }

    #[test]
    fn room_distribution_groups_by_descriptor() {
        let mut three_one = listing(2);
        three_one.rooms = Some("3+1".to_string());
        three_one.price = Some(9_000_000.0);
        let mut no_rooms = listing(3);
        no_rooms.rooms = None;
        let corpus = vec![listing(1), three_one, no_rooms];

        let result = room_distribution(&corpus, None);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].rooms, "2+kk");
        assert_eq!(result[1].rooms, "3+1");
        assert_eq!(result[1].avg_price, 9_000_000.0);
    }
}
