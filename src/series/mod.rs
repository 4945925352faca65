//! Synthetic annual bleaching-index series.
//!
//! The dashboard's time-series tab plots an illustrative series, not
//! observations: one uniformly random index value in [0, 100) per
//! (year-end, region) pair. The random source is injected so callers can
//! pin a seed and reproduce output exactly.

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

use crate::core::stats;
use crate::core::{Error, Result, SeriesPoint, AGGREGATE_REGION};

/// Exclusive upper bound of the simulated bleaching index.
pub const INDEX_MAX: f64 = 100.0;

/// Year-end (December 31) dates falling inside `[start, end]`.
pub fn year_end_dates(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if end < start {
        return Err(Error::InvalidRange { start, end });
    }
    Ok((start.year()..=end.year())
        .filter_map(|year| NaiveDate::from_ymd_opt(year, 12, 31))
        .filter(|date| *date >= start && *date <= end)
        .collect())
}

/// Generate one point per (year-end, region) pair within the range.
///
/// With `aggregate` set, regions collapse to their per-date arithmetic mean
/// and each date yields a single point for [`AGGREGATE_REGION`]. A
/// single-region filter is simply a one-element `regions` slice. Pure apart
/// from draws on the injected `rng`.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    end: NaiveDate,
    regions: &[String],
    aggregate: bool,
) -> Result<Vec<SeriesPoint>> {
    if regions.is_empty() {
        return Err(Error::EmptyRegionSet);
    }

    let dates = year_end_dates(start, end)?;
    let mut points = Vec::with_capacity(dates.len() * regions.len());
    for date in &dates {
        for region in regions {
            points.push(SeriesPoint {
                date: *date,
                region: region.clone(),
                index_value: rng.gen_range(0.0..INDEX_MAX),
            });
        }
    }

    if aggregate {
        aggregate_by_date(&points)
    } else {
        Ok(points)
    }
}

/// Collapse points to one mean value per date.
fn aggregate_by_date(points: &[SeriesPoint]) -> Result<Vec<SeriesPoint>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for point in points {
        by_date.entry(point.date).or_default().push(point.index_value);
    }

    by_date
        .into_iter()
        .map(|(date, values)| {
            Ok(SeriesPoint {
                date,
                region: AGGREGATE_REGION.to_string(),
                index_value: stats::mean(&values)?,
            })
        })
        .collect()
}

/// Series generator owning a seedable random source.
///
/// `from_seed` pins output for tests and the CLI's `--seed` flag;
/// `from_entropy` gives the non-reproducible default the dashboard used.
pub struct SeriesGenerator {
    rng: StdRng,
}

impl SeriesGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn generate(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        regions: &[String],
        aggregate: bool,
    ) -> Result<Vec<SeriesPoint>> {
        generate(&mut self.rng, start, end, regions, aggregate)
    }
}

#[cfg(test)]
mod tests {
    use super::{generate, year_end_dates, SeriesGenerator, INDEX_MAX};
    use crate::core::{Error, AGGREGATE_REGION};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn regions(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn year_ends_are_inclusive_of_both_endpoints() {
        let dates = year_end_dates(date(1999, 12, 31), date(2001, 12, 31)).unwrap();
        assert_eq!(
            dates,
            vec![date(1999, 12, 31), date(2000, 12, 31), date(2001, 12, 31)]
        );
    }

    #[test]
    fn range_without_a_year_end_yields_no_dates() {
        let dates = year_end_dates(date(2000, 1, 1), date(2000, 6, 30)).unwrap();
        assert!(dates.is_empty());
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = year_end_dates(date(2002, 1, 1), date(2000, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }

    #[test]
    fn point_count_is_dates_times_regions() {
        let mut generator = SeriesGenerator::from_seed(7);
        let points = generator
            .generate(
                date(2000, 1, 1),
                date(2002, 1, 1),
                &regions(&["A", "B"]),
                false,
            )
            .unwrap();
        // Two year-ends (2000, 2001) in range, two regions.
        assert_eq!(points.len(), 4);
    }

    #[test]
    fn values_stay_inside_the_index_interval() {
        let mut generator = SeriesGenerator::from_seed(11);
        let points = generator
            .generate(
                date(1980, 1, 1),
                date(2020, 8, 31),
                &regions(&["Maldives"]),
                false,
            )
            .unwrap();
        assert_eq!(points.len(), 40);
        assert!(points
            .iter()
            .all(|p| p.index_value >= 0.0 && p.index_value < INDEX_MAX));
    }

    #[test]
    fn empty_region_set_is_rejected() {
        let mut generator = SeriesGenerator::from_seed(3);
        let err = generator
            .generate(date(2000, 1, 1), date(2001, 1, 1), &[], false)
            .unwrap_err();
        assert!(matches!(err, Error::EmptyRegionSet));
    }

    #[test]
    fn aggregate_replaces_regions_with_their_mean() {
        let seed = 99;
        let names = regions(&["A", "B", "C"]);
        let start = date(2000, 1, 1);
        let end = date(2003, 1, 1);

        let per_region = SeriesGenerator::from_seed(seed)
            .generate(start, end, &names, false)
            .unwrap();
        let aggregated = SeriesGenerator::from_seed(seed)
            .generate(start, end, &names, true)
            .unwrap();

        assert_eq!(aggregated.len(), 3);
        for point in &aggregated {
            assert_eq!(point.region, AGGREGATE_REGION);
            let values: Vec<f64> = per_region
                .iter()
                .filter(|p| p.date == point.date)
                .map(|p| p.index_value)
                .collect();
            assert_eq!(values.len(), 3);
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            assert!((point.index_value - mean).abs() < 1e-12);
        }
    }

    #[test]
    fn same_seed_reproduces_the_series() {
        let names = regions(&["A", "B"]);
        let run = |seed| {
            SeriesGenerator::from_seed(seed)
                .generate(date(1990, 1, 1), date(1995, 1, 1), &names, false)
                .unwrap()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn raw_generate_accepts_any_rng() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(5);
        let points = generate(
            &mut rng,
            date(2000, 1, 1),
            date(2000, 12, 31),
            &regions(&["Palau"]),
            false,
        )
        .unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, date(2000, 12, 31));
    }
}
