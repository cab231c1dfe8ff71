//! # Price Heatmap
//!
//! Spatial aggregation of price per m² into fixed-size angular grid cells,
//! normalized to [0,1] for direct use by a map overlay.

use serde::Serialize;
use std::collections::HashMap;

use crate::market::listing::{city_matches, ListingSummary};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub lat: f64,
    pub lng: f64,
    /// Cell average price per m² divided by the maximum cell average.
    pub intensity: f64,
}

/// Bucket active listings with a known position and price per m² into cells
/// of `grid_size` degrees, average per cell, and normalize by the maximum
/// average. An empty qualifying set yields an empty vec; an all-zero set
/// yields zero intensities rather than dividing by zero.
pub fn heatmap(
    listings: &[ListingSummary],
    city: Option<&str>,
    grid_size: f64,
) -> Vec<HeatmapCell> {
    let mut cells: HashMap<(i64, i64), (f64, u32)> = HashMap::new();

    for listing in listings {
        if !listing.is_active {
            continue;
        }
        let (Some(position), Some(price_per_sqm)) = (listing.position, listing.price_per_sqm)
        else {
            continue;
        };
        if let Some(city) = city {
            if !city_matches(listing.city.as_deref(), city) {
                continue;
            }
        }

        let key = (
            (position.lat / grid_size).round() as i64,
            (position.lng / grid_size).round() as i64,
        );
        let entry = cells.entry(key).or_insert((0.0, 0));
        entry.0 += price_per_sqm;
        entry.1 += 1;
    }

    let averages: Vec<((i64, i64), f64)> = cells
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect();

    let max_average = averages.iter().map(|(_, avg)| *avg).fold(0.0, f64::max);

    let mut result: Vec<HeatmapCell> = averages
        .into_iter()
        .map(|((lat_key, lng_key), avg)| HeatmapCell {
            lat: lat_key as f64 * grid_size,
            lng: lng_key as f64 * grid_size,
            intensity: if max_average > 0.0 { avg / max_average } else { 0.0 },
        })
        .collect();

    // Stable output for a fixed snapshot
    result.sort_by(|a, b| {
        (a.lat, a.lng).partial_cmp(&(b.lat, b.lng)).unwrap_or(std::cmp::Ordering::Equal)
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::geo::GeoPoint;
    use crate::market::listing::tests::listing;

    fn at(id: i64, lat: f64, lng: f64, pps: Option<f64>) -> ListingSummary {
        let mut l = listing(id);
        l.position = Some(GeoPoint { lat, lng });
        l.price_per_sqm = pps;
        l
    }

    #[test]
    fn empty_corpus_yields_empty_heatmap() {
        assert!(heatmap(&[], None, 0.01).is_empty());
    }

    #[test]
    fn single_cell_has_intensity_one() {
        let corpus = vec![at(1, 50.08, 14.43, Some(120_000.0))];
        let cells = heatmap(&corpus, None, 0.01);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].intensity, 1.0);
    }

    #[test]
    fn intensities_are_normalized_to_unit_interval() {
        let corpus = vec![
            at(1, 50.08, 14.43, Some(120_000.0)),
            at(2, 50.08, 14.43, Some(100_000.0)), // same cell, avg 110k
            at(3, 50.20, 14.60, Some(55_000.0)),
            at(4, 49.20, 16.61, Some(80_000.0)),
        ];
        let cells = heatmap(&corpus, None, 0.01);
        assert_eq!(cells.len(), 3);
        for cell in &cells {
            assert!((0.0..=1.0).contains(&cell.intensity));
        }
        let max = cells.iter().map(|c| c.intensity).fold(0.0, f64::max);
        assert_eq!(max, 1.0);

        // The dense Praha cell carries the max average
        let praha = cells.iter().find(|c| (c.lat - 50.08).abs() < 1e-9).unwrap();
        assert_eq!(praha.intensity, 1.0);
        let cheap = cells.iter().find(|c| (c.lat - 50.2).abs() < 1e-9).unwrap();
        assert!((cheap.intensity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn listings_without_position_or_price_per_sqm_are_skipped() {
        let mut no_pos = listing(1);
        no_pos.position = None;
        let no_pps = at(2, 50.08, 14.43, None);
        assert!(heatmap(&[no_pos, no_pps], None, 0.01).is_empty());
    }

    #[test]
    fn all_zero_averages_do_not_divide_by_zero() {
        let corpus = vec![at(1, 50.08, 14.43, Some(0.0))];
        let cells = heatmap(&corpus, None, 0.01);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].intensity, 0.0);
    }

    #[test]
    fn city_filter_restricts_cells() {
        let mut brno = at(2, 49.20, 16.61, Some(80_000.0));
        brno.city = Some("Brno".to_string());
        let corpus = vec![at(1, 50.08, 14.43, Some(120_000.0)), brno];

        let cells = heatmap(&corpus, Some("praha"), 0.01);
        assert_eq!(cells.len(), 1);
        assert!((cells[0].lat - 50.08).abs() < 1e-9);
    }

    #[test]
    fn cell_coordinates_snap_to_grid() {
        let corpus = vec![at(1, 50.0843, 14.4312, Some(120_000.0))];
        let cells = heatmap(&corpus, None, 0.01);
        assert!((cells[0].lat - 50.08).abs() < 1e-9);
        assert!((cells[0].lng - 14.43).abs() < 1e-9);
    }
}
