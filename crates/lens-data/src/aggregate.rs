//! The four aggregate views over the joined table.
//!
//! Each aggregator checks its own column requirements, derives whatever
//! transient exploded copy it needs, and returns a fully-gridded view:
//! every observed (dimension x dimension) cell carries a value, with
//! zero-fill where the combination was never counted. The viewership view
//! is the one exception, keeping never-observed combinations as `None` so
//! the presenter can tell "no data" from a genuine zero sum.

use std::collections::{BTreeMap, BTreeSet};

use lens_core::error::Result;
use lens_core::intervals::year_interval;
use lens_core::models::{JoinedRecord, TitleType};
use serde::Serialize;
use tracing::{debug, warn};

use crate::explode::{explode_genres, ExplosionStats};
use crate::schema::{
    JoinedTable, COL_AGE_GROUP, COL_GENRES, COL_REGION, COL_RELEASE_YEAR, COL_TYPE,
    COL_VIEWERSHIP,
};

// ── Views ─────────────────────────────────────────────────────────────────────

/// Movie/show counts per 5-year release interval.
#[derive(Debug, Clone, Serialize)]
pub struct TypeByInterval {
    /// Observed interval starts, ascending.
    pub intervals: Vec<i32>,
    /// Movie count per interval, zero-filled.
    pub movies: Vec<u64>,
    /// Show count per interval, zero-filled.
    pub shows: Vec<u64>,
    /// Rows excluded for an invalid year or unrecognized type label.
    pub rows_excluded: usize,
}

/// Show-genre counts per 5-year release interval.
#[derive(Debug, Clone, Serialize)]
pub struct GenrePopularity {
    /// Observed interval starts, ascending.
    pub intervals: Vec<i32>,
    /// Observed genres, sorted.
    pub genres: Vec<String>,
    /// `counts[genre][interval]`, zero-filled over the full grid.
    pub counts: Vec<Vec<u64>>,
    /// Exploded rows excluded for an invalid year.
    pub rows_excluded: usize,
    /// Counters from the genre explosion pass.
    pub explosion: ExplosionStats,
}

/// One genre's count within a region.
#[derive(Debug, Clone, Serialize)]
pub struct GenreSlice {
    pub genre: String,
    pub count: u64,
}

/// Genre counts for one region, over the full observed genre set.
#[derive(Debug, Clone, Serialize)]
pub struct RegionSlices {
    pub region: String,
    pub total: u64,
    pub slices: Vec<GenreSlice>,
}

/// Per-region genre distribution.
#[derive(Debug, Clone, Serialize)]
pub struct RegionGenreDistribution {
    /// Observed genres across all regions, sorted.
    pub genres: Vec<String>,
    /// Regions with a nonzero total, sorted by region label.
    pub regions: Vec<RegionSlices>,
    /// Regions observed in the joined table whose genre total was zero;
    /// they get a notice instead of an empty chart.
    pub skipped_regions: Vec<String>,
    /// Exploded rows excluded for a missing region label.
    pub rows_excluded: usize,
    /// Counters from the genre explosion pass.
    pub explosion: ExplosionStats,
}

/// Summed viewership per (age group x region).
#[derive(Debug, Clone, Serialize)]
pub struct ViewershipByAgeRegion {
    /// Observed age groups, sorted.
    pub age_groups: Vec<String>,
    /// Observed regions, sorted.
    pub regions: Vec<String>,
    /// `totals[age][region]`; `None` marks a combination never observed,
    /// distinct from an observed zero sum.
    pub totals: Vec<Vec<Option<u64>>>,
    /// Rows excluded for a missing age-group or region label.
    pub rows_excluded: usize,
}

// ── Aggregators ───────────────────────────────────────────────────────────────

/// Count titles per (release interval, type).
pub fn type_by_interval(table: &JoinedTable) -> Result<TypeByInterval> {
    table.require_columns(&[COL_TYPE, COL_RELEASE_YEAR])?;

    let mut grid: BTreeMap<i32, (u64, u64)> = BTreeMap::new();
    let mut excluded = 0usize;
    for record in &table.rows {
        let (Some(title_type), Some(bucket)) = (
            record.title_type,
            record.release_year.and_then(year_interval),
        ) else {
            excluded += 1;
            continue;
        };
        let cell = grid.entry(bucket).or_default();
        match title_type {
            TitleType::Movie => cell.0 += 1,
            TitleType::Show => cell.1 += 1,
        }
    }

    if excluded > 0 {
        warn!(
            "Content-type view: excluded {} rows with an invalid year or type",
            excluded
        );
    }
    debug!("Content-type view covers {} intervals", grid.len());

    let intervals: Vec<i32> = grid.keys().copied().collect();
    let movies: Vec<u64> = grid.values().map(|c| c.0).collect();
    let shows: Vec<u64> = grid.values().map(|c| c.1).collect();
    Ok(TypeByInterval {
        intervals,
        movies,
        shows,
        rows_excluded: excluded,
    })
}

/// Count show genres per (release interval, genre).
pub fn genre_popularity(table: &JoinedTable) -> Result<GenrePopularity> {
    table.require_columns(&[COL_TYPE, COL_RELEASE_YEAR, COL_GENRES])?;

    // Each aggregator derives its own transient copy of the rows it needs.
    let shows: Vec<JoinedRecord> = table
        .rows
        .iter()
        .filter(|r| r.title_type == Some(TitleType::Show))
        .cloned()
        .collect();
    let (exploded, explosion) = explode_genres(&shows);

    let mut counts: BTreeMap<(i32, String), u64> = BTreeMap::new();
    let mut intervals: BTreeSet<i32> = BTreeSet::new();
    let mut genres: BTreeSet<String> = BTreeSet::new();
    let mut excluded = 0usize;
    for record in &exploded {
        let Some(bucket) = record.release_year.and_then(year_interval) else {
            excluded += 1;
            continue;
        };
        intervals.insert(bucket);
        genres.insert(record.genre.clone());
        *counts.entry((bucket, record.genre.clone())).or_insert(0) += 1;
    }

    if excluded > 0 {
        warn!(
            "Genre-popularity view: excluded {} exploded rows with an invalid year",
            excluded
        );
    }

    let intervals: Vec<i32> = intervals.into_iter().collect();
    let genres: Vec<String> = genres.into_iter().collect();
    let matrix: Vec<Vec<u64>> = genres
        .iter()
        .map(|genre| {
            intervals
                .iter()
                .map(|&bucket| {
                    counts
                        .get(&(bucket, genre.clone()))
                        .copied()
                        .unwrap_or(0)
                })
                .collect()
        })
        .collect();

    Ok(GenrePopularity {
        intervals,
        genres,
        counts: matrix,
        rows_excluded: excluded,
        explosion,
    })
}

/// Count genres per region, skipping regions with nothing to show.
pub fn genre_by_region(table: &JoinedTable) -> Result<RegionGenreDistribution> {
    table.require_columns(&[COL_GENRES, COL_REGION])?;

    // Region universe comes from the joined rows, so a region whose genre
    // fields were all rejected or empty still gets its skip notice.
    let observed_regions: BTreeSet<String> = table
        .rows
        .iter()
        .filter_map(|r| r.viewer_region.clone())
        .collect();

    let (exploded, explosion) = explode_genres(&table.rows);

    let mut counts: BTreeMap<(String, String), u64> = BTreeMap::new();
    let mut genres: BTreeSet<String> = BTreeSet::new();
    let mut excluded = 0usize;
    for record in &exploded {
        let Some(region) = record.viewer_region.clone() else {
            excluded += 1;
            continue;
        };
        genres.insert(record.genre.clone());
        *counts.entry((region, record.genre.clone())).or_insert(0) += 1;
    }

    if excluded > 0 {
        warn!(
            "Region-genre view: excluded {} exploded rows with no region label",
            excluded
        );
    }

    let genres: Vec<String> = genres.into_iter().collect();
    let mut regions = Vec::new();
    let mut skipped_regions = Vec::new();
    for region in observed_regions {
        let slices: Vec<GenreSlice> = genres
            .iter()
            .map(|genre| GenreSlice {
                genre: genre.clone(),
                count: counts
                    .get(&(region.clone(), genre.clone()))
                    .copied()
                    .unwrap_or(0),
            })
            .collect();
        let total: u64 = slices.iter().map(|s| s.count).sum();
        if total == 0 {
            warn!("No genre data available for {}; skipping its chart", region);
            skipped_regions.push(region);
        } else {
            regions.push(RegionSlices {
                region,
                total,
                slices,
            });
        }
    }

    Ok(RegionGenreDistribution {
        genres,
        regions,
        skipped_regions,
        rows_excluded: excluded,
        explosion,
    })
}

/// Sum viewership counts per (age group, region).
pub fn viewership_by_age_region(table: &JoinedTable) -> Result<ViewershipByAgeRegion> {
    table.require_columns(&[COL_AGE_GROUP, COL_REGION, COL_VIEWERSHIP])?;

    let mut sums: BTreeMap<(String, String), u64> = BTreeMap::new();
    let mut age_groups: BTreeSet<String> = BTreeSet::new();
    let mut regions: BTreeSet<String> = BTreeSet::new();
    let mut excluded = 0usize;
    for record in &table.rows {
        let (Some(age), Some(region)) = (
            record.viewer_age_group.clone(),
            record.viewer_region.clone(),
        ) else {
            excluded += 1;
            continue;
        };
        age_groups.insert(age.clone());
        regions.insert(region.clone());
        // An observed row with an absent count still marks the combination;
        // it just contributes nothing to the sum.
        let count = record.viewership_count.unwrap_or(0);
        *sums.entry((age, region)).or_insert(0) += count;
    }

    if excluded > 0 {
        warn!(
            "Viewership view: excluded {} rows with no age group or region",
            excluded
        );
    }

    let age_groups: Vec<String> = age_groups.into_iter().collect();
    let regions: Vec<String> = regions.into_iter().collect();
    let totals: Vec<Vec<Option<u64>>> = age_groups
        .iter()
        .map(|age| {
            regions
                .iter()
                .map(|region| sums.get(&(age.clone(), region.clone())).copied())
                .collect()
        })
        .collect();

    Ok(ViewershipByAgeRegion {
        age_groups,
        regions,
        totals,
        rows_excluded: excluded,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::error::LensError;

    fn all_columns() -> Vec<String> {
        [
            "show_id",
            "title",
            COL_TYPE,
            COL_RELEASE_YEAR,
            COL_GENRES,
            COL_REGION,
            COL_AGE_GROUP,
            COL_VIEWERSHIP,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn record(
        id: &str,
        title_type: Option<TitleType>,
        year: Option<i32>,
        genres: Option<&str>,
        region: Option<&str>,
        age: Option<&str>,
        count: Option<u64>,
    ) -> JoinedRecord {
        JoinedRecord {
            show_id: id.to_string(),
            title: None,
            title_type,
            release_year: year,
            genres: genres.map(|g| g.to_string()),
            viewer_region: region.map(|r| r.to_string()),
            viewer_age_group: age.map(|a| a.to_string()),
            viewership_count: count,
        }
    }

    /// The two-row scenario: one 2012 movie with one genre, one 2017 show
    /// with two, both watched in the US by 18-25s.
    fn scenario_table() -> JoinedTable {
        JoinedTable::from_parts(
            all_columns(),
            vec![
                record(
                    "1",
                    Some(TitleType::Movie),
                    Some(2012),
                    Some("['Drama']"),
                    Some("US"),
                    Some("18-25"),
                    Some(100),
                ),
                record(
                    "2",
                    Some(TitleType::Show),
                    Some(2017),
                    Some("['Drama', 'Comedy']"),
                    Some("US"),
                    Some("18-25"),
                    Some(200),
                ),
            ],
        )
    }

    // ── type_by_interval ──────────────────────────────────────────────────────

    #[test]
    fn test_type_by_interval_scenario() {
        let view = type_by_interval(&scenario_table()).unwrap();
        assert_eq!(view.intervals, vec![2010, 2015]);
        assert_eq!(view.movies, vec![1, 0]);
        assert_eq!(view.shows, vec![0, 1]);
        assert_eq!(view.rows_excluded, 0);
    }

    #[test]
    fn test_type_by_interval_grid_is_complete() {
        let view = type_by_interval(&scenario_table()).unwrap();
        // Every observed interval has a value for both types, zero included.
        assert_eq!(view.movies.len(), view.intervals.len());
        assert_eq!(view.shows.len(), view.intervals.len());
    }

    #[test]
    fn test_type_by_interval_excludes_invalid_rows() {
        let table = JoinedTable::from_parts(
            all_columns(),
            vec![
                record("1", Some(TitleType::Movie), Some(2012), None, None, None, None),
                // Negative year: invalid for bucketing.
                record("2", Some(TitleType::Movie), Some(-50), None, None, None, None),
                // Missing year.
                record("3", Some(TitleType::Show), None, None, None, None, None),
                // Unrecognized type label became None during validation.
                record("4", None, Some(2012), None, None, None, None),
            ],
        );
        let view = type_by_interval(&table).unwrap();
        assert_eq!(view.intervals, vec![2010]);
        assert_eq!(view.movies, vec![1]);
        assert_eq!(view.rows_excluded, 3);
    }

    #[test]
    fn test_type_by_interval_missing_column() {
        let table = JoinedTable::from_parts(
            vec!["show_id".to_string(), COL_RELEASE_YEAR.to_string()],
            vec![],
        );
        let err = type_by_interval(&table).unwrap_err();
        assert!(matches!(err, LensError::MissingColumn(ref c) if c == COL_TYPE));
    }

    // ── genre_popularity ──────────────────────────────────────────────────────

    #[test]
    fn test_genre_popularity_scenario() {
        let view = genre_popularity(&scenario_table()).unwrap();
        // Only the show contributes; the 2012 movie's Drama is filtered out.
        assert_eq!(view.intervals, vec![2015]);
        assert_eq!(view.genres, vec!["Comedy", "Drama"]);
        assert_eq!(view.counts, vec![vec![1], vec![1]]);
        assert_eq!(view.explosion.exploded_rows, 2);
    }

    #[test]
    fn test_genre_popularity_zero_fills_grid() {
        let table = JoinedTable::from_parts(
            all_columns(),
            vec![
                record("1", Some(TitleType::Show), Some(2001), Some("['Drama']"), None, None, None),
                record("2", Some(TitleType::Show), Some(2017), Some("['Comedy']"), None, None, None),
            ],
        );
        let view = genre_popularity(&table).unwrap();
        assert_eq!(view.intervals, vec![2000, 2015]);
        assert_eq!(view.genres, vec!["Comedy", "Drama"]);
        // Comedy never appears in 2000, Drama never in 2015; both cells exist.
        assert_eq!(view.counts, vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn test_genre_popularity_counts_rejected_literals() {
        let table = JoinedTable::from_parts(
            all_columns(),
            vec![record(
                "1",
                Some(TitleType::Show),
                Some(2017),
                Some("not a list"),
                None,
                None,
                None,
            )],
        );
        let view = genre_popularity(&table).unwrap();
        assert!(view.genres.is_empty());
        assert_eq!(view.explosion.rejected_rows, 1);
    }

    #[test]
    fn test_genre_popularity_missing_genres_column() {
        let table = JoinedTable::from_parts(
            vec![
                "show_id".to_string(),
                COL_TYPE.to_string(),
                COL_RELEASE_YEAR.to_string(),
            ],
            vec![],
        );
        let err = genre_popularity(&table).unwrap_err();
        assert!(matches!(err, LensError::MissingColumn(ref c) if c == COL_GENRES));
    }

    // ── genre_by_region ───────────────────────────────────────────────────────

    #[test]
    fn test_genre_by_region_scenario() {
        let view = genre_by_region(&scenario_table()).unwrap();
        // Both rows explode here, movie included: Drama 2, Comedy 1.
        assert_eq!(view.genres, vec!["Comedy", "Drama"]);
        assert_eq!(view.regions.len(), 1);
        let us = &view.regions[0];
        assert_eq!(us.region, "US");
        assert_eq!(us.total, 3);
        assert_eq!(us.slices[0].genre, "Comedy");
        assert_eq!(us.slices[0].count, 1);
        assert_eq!(us.slices[1].genre, "Drama");
        assert_eq!(us.slices[1].count, 2);
        assert!(view.skipped_regions.is_empty());
    }

    #[test]
    fn test_genre_by_region_skips_zero_total_region() {
        let table = JoinedTable::from_parts(
            all_columns(),
            vec![
                record("1", None, None, Some("['Drama']"), Some("US"), None, None),
                // EU only has a row whose genre literal is rejected.
                record("2", None, None, Some("not a list"), Some("EU"), None, None),
            ],
        );
        let view = genre_by_region(&table).unwrap();
        assert_eq!(view.regions.len(), 1);
        assert_eq!(view.regions[0].region, "US");
        assert_eq!(view.skipped_regions, vec!["EU"]);
    }

    #[test]
    fn test_genre_by_region_zero_slices_present() {
        let table = JoinedTable::from_parts(
            all_columns(),
            vec![
                record("1", None, None, Some("['Drama']"), Some("US"), None, None),
                record("2", None, None, Some("['Comedy']"), Some("EU"), None, None),
            ],
        );
        let view = genre_by_region(&table).unwrap();
        // Each region's slice list spans the full genre set.
        for region in &view.regions {
            assert_eq!(region.slices.len(), view.genres.len());
        }
        let eu = view.regions.iter().find(|r| r.region == "EU").unwrap();
        let drama = eu.slices.iter().find(|s| s.genre == "Drama").unwrap();
        assert_eq!(drama.count, 0);
    }

    #[test]
    fn test_genre_by_region_missing_region_column() {
        let table = JoinedTable::from_parts(
            vec!["show_id".to_string(), COL_GENRES.to_string()],
            vec![],
        );
        let err = genre_by_region(&table).unwrap_err();
        assert!(matches!(err, LensError::MissingColumn(ref c) if c == COL_REGION));
    }

    // ── viewership_by_age_region ──────────────────────────────────────────────

    #[test]
    fn test_viewership_scenario() {
        let view = viewership_by_age_region(&scenario_table()).unwrap();
        assert_eq!(view.age_groups, vec!["18-25"]);
        assert_eq!(view.regions, vec!["US"]);
        assert_eq!(view.totals, vec![vec![Some(300)]]);
    }

    #[test]
    fn test_viewership_unobserved_combination_is_none() {
        let table = JoinedTable::from_parts(
            all_columns(),
            vec![
                record("1", None, None, None, Some("US"), Some("18-25"), Some(100)),
                record("2", None, None, None, Some("EU"), Some("26-35"), Some(50)),
            ],
        );
        let view = viewership_by_age_region(&table).unwrap();
        assert_eq!(view.age_groups, vec!["18-25", "26-35"]);
        assert_eq!(view.regions, vec!["EU", "US"]);
        // Observed cells carry sums; never-observed ones are None, not 0.
        assert_eq!(view.totals[0][1], Some(100));
        assert_eq!(view.totals[1][0], Some(50));
        assert_eq!(view.totals[0][0], None);
        assert_eq!(view.totals[1][1], None);
    }

    #[test]
    fn test_viewership_absent_count_is_observed_zero() {
        let table = JoinedTable::from_parts(
            all_columns(),
            vec![record("1", None, None, None, Some("US"), Some("18-25"), None)],
        );
        let view = viewership_by_age_region(&table).unwrap();
        // The combination was observed, so the cell is a zero sum, not None.
        assert_eq!(view.totals, vec![vec![Some(0)]]);
    }

    #[test]
    fn test_viewership_excludes_unlabeled_rows() {
        let table = JoinedTable::from_parts(
            all_columns(),
            vec![
                record("1", None, None, None, Some("US"), Some("18-25"), Some(100)),
                record("2", None, None, None, None, Some("18-25"), Some(50)),
            ],
        );
        let view = viewership_by_age_region(&table).unwrap();
        assert_eq!(view.totals, vec![vec![Some(100)]]);
        assert_eq!(view.rows_excluded, 1);
    }

    #[test]
    fn test_viewership_missing_count_column() {
        let table = JoinedTable::from_parts(
            vec![
                "show_id".to_string(),
                COL_AGE_GROUP.to_string(),
                COL_REGION.to_string(),
            ],
            vec![],
        );
        let err = viewership_by_age_region(&table).unwrap_err();
        assert!(matches!(err, LensError::MissingColumn(ref c) if c == COL_VIEWERSHIP));
    }
}
