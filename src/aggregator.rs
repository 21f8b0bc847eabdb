//! Per-swimmer point totals.
//!
//! Aggregates a standardized table into one row per swimmer and meet,
//! summing place and bonus points over individual events. Relay results
//! are excluded before grouping.

use crate::constants::fields::{
    AGGREGATION_KEYS, BONUS_POINTS, DATE, EVENT, MEET_NAME, PB_POINTS, PLACE_POINTS,
    QUALIFICATION, QUALIFICATION_ADV_COUNT, QUALIFICATION_DEV_COUNT, SWIMMER_NAME, TIME_POINTS,
    TOTAL_POINTS,
};
use crate::constants::markers::{ADVANCED, DEVELOPING, RELAY};
use crate::error::{Result, SwimError};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// How a standardized table records bonus points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusScheme {
    /// Separate `PBPoints` and `TimePoints` columns
    Split,
    /// One `BonusPoints` column, as written by older standardizers
    Combined,
}

impl BonusScheme {
    /// Detect the scheme from the columns present, preferring the split layout
    pub fn detect(df: &DataFrame) -> Option<Self> {
        if has_column(df, PB_POINTS) && has_column(df, TIME_POINTS) {
            Some(BonusScheme::Split)
        } else if has_column(df, BONUS_POINTS) {
            Some(BonusScheme::Combined)
        } else {
            None
        }
    }
}

/// Required columns absent from a standardized table
pub fn missing_columns(df: &DataFrame) -> Vec<String> {
    let mut missing: Vec<String> = AGGREGATION_KEYS
        .iter()
        .chain([EVENT, PLACE_POINTS, QUALIFICATION].iter())
        .filter(|name| !has_column(df, name))
        .map(|name| name.to_string())
        .collect();

    if BonusScheme::detect(df).is_none() {
        missing.push(format!("{PB_POINTS}+{TIME_POINTS} or {BONUS_POINTS}"));
    }

    missing
}

/// Aggregate a standardized table read from `source`.
///
/// Rows missing any grouping key are dropped. Point columns are coerced to
/// integers with non-numeric values counted as zero. Output is ordered by
/// swimmer name, meet name and date.
pub fn aggregate(df: DataFrame, source: &Path) -> Result<DataFrame> {
    let missing = missing_columns(&df);
    let Some(scheme) = BonusScheme::detect(&df).filter(|_| missing.is_empty()) else {
        return Err(SwimError::MissingColumns {
            path: source.to_path_buf(),
            missing,
        });
    };

    debug!(
        "Aggregating {} standardized rows from {} ({:?} bonus columns)",
        df.height(),
        source.display(),
        scheme
    );

    let bonus_columns: &[&str] = match scheme {
        BonusScheme::Split => &[PB_POINTS, TIME_POINTS],
        BonusScheme::Combined => &[BONUS_POINTS],
    };

    let mut prepared: Vec<Expr> = AGGREGATION_KEYS
        .iter()
        .map(|name| col(*name).cast(DataType::String))
        .collect();
    prepared.extend(
        [PLACE_POINTS]
            .iter()
            .chain(bonus_columns.iter())
            .map(|name| integer_points(name)),
    );
    prepared.push(qualifies(ADVANCED).alias(QUALIFICATION_ADV_COUNT));
    prepared.push(qualifies(DEVELOPING).alias(QUALIFICATION_DEV_COUNT));

    let keys_present = AGGREGATION_KEYS
        .iter()
        .fold(lit(true), |acc, name| acc.and(col(*name).is_not_null()));
    let individual = col(EVENT)
        .cast(DataType::String)
        .str()
        .contains_literal(lit(RELAY))
        .fill_null(lit(false))
        .not();

    let mut sums = vec![col(PLACE_POINTS).sum()];
    sums.extend(bonus_columns.iter().map(|name| col(*name).sum()));
    sums.push(col(QUALIFICATION_ADV_COUNT).sum());
    sums.push(col(QUALIFICATION_DEV_COUNT).sum());

    let bonus_total = match scheme {
        BonusScheme::Split => (col(PB_POINTS) + col(TIME_POINTS)).alias(BONUS_POINTS),
        BonusScheme::Combined => col(BONUS_POINTS),
    };

    let mut output: Vec<Expr> = AGGREGATION_KEYS.iter().map(|name| col(*name)).collect();
    output.push(col(PLACE_POINTS));
    if scheme == BonusScheme::Split {
        output.push(col(PB_POINTS));
        output.push(col(TIME_POINTS));
    }
    output.extend([
        col(BONUS_POINTS),
        col(QUALIFICATION_ADV_COUNT),
        col(QUALIFICATION_DEV_COUNT),
        (col(PLACE_POINTS) + col(BONUS_POINTS)).alias(TOTAL_POINTS),
    ]);

    let aggregated = df
        .lazy()
        .with_columns(prepared)
        .filter(keys_present.and(individual))
        .group_by_stable(
            AGGREGATION_KEYS
                .iter()
                .map(|name| col(*name))
                .collect::<Vec<_>>(),
        )
        .agg(sums)
        .with_column(bonus_total)
        .select(output)
        .sort_by_exprs(
            [col(SWIMMER_NAME), col(MEET_NAME), col(DATE)],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    debug!("Aggregated into {} swimmer rows", aggregated.height());

    Ok(aggregated)
}

fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Points as whole numbers, non-numeric and missing values as zero
fn integer_points(name: &str) -> Expr {
    col(name)
        .cast(DataType::Float64)
        .fill_null(lit(0.0))
        .cast(DataType::Int64)
}

/// 1 when the qualification mentions the tier, else 0
fn qualifies(tier: &str) -> Expr {
    col(QUALIFICATION)
        .cast(DataType::String)
        .fill_null(lit(""))
        .str()
        .contains_literal(lit(tier))
        .cast(DataType::Int64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> &'static Path {
        Path::new("standardized_test.csv")
    }

    fn int_at(df: &DataFrame, name: &str, row: usize) -> Option<i64> {
        df.column(name).unwrap().i64().unwrap().get(row)
    }

    fn str_at<'a>(df: &'a DataFrame, name: &str, row: usize) -> Option<&'a str> {
        df.column(name).unwrap().str().unwrap().get(row)
    }

    fn split_frame() -> DataFrame {
        df! {
            "MeetName" => &["Spring", "Spring", "Spring", "Spring"],
            "Date" => &["2025-07-01", "2025-07-01", "2025-07-01", "2025-07-01"],
            "Event" => &[
                "Girls 10 & Under 50 SC Meter Freestyle",
                "Girls 10 & Under 50 SC Meter Backstroke",
                "Mixed 10 & Under 200 SC Meter Freestyle Relay",
                "Girls 10 & Under 50 SC Meter Freestyle",
            ],
            "Gender" => &[Some("Girls"), Some("Girls"), Some("Mixed"), Some("Girls")],
            "AgeGroup" => &["10 & Under", "10 & Under", "10 & Under", "10 & Under"],
            "SwimmerName" => &["Ada", "Ada", "Ada", "Bea"],
            "Age" => &["10", "10", "10", "9"],
            "Team" => &["SHRK", "SHRK", "SHRK", "SHRK"],
            "Qualification" => &[Some("ADV"), None, Some("ADV"), Some("DEV")],
            "PlacePoints" => &[Some(5.0), Some(3.0), Some(10.0), None],
            "PBPoints" => &[None, Some(2i64), None, Some(1)],
            "TimePoints" => &[None::<i64>, None, None, Some(3)],
        }
        .unwrap()
    }

    #[test]
    fn test_sums_individual_events_per_swimmer() {
        let out = aggregate(split_frame(), source()).unwrap();

        assert_eq!(out.height(), 2);
        assert_eq!(str_at(&out, SWIMMER_NAME, 0), Some("Ada"));
        assert_eq!(int_at(&out, PLACE_POINTS, 0), Some(8));
        assert_eq!(int_at(&out, BONUS_POINTS, 0), Some(2));
        assert_eq!(int_at(&out, TOTAL_POINTS, 0), Some(10));
        assert_eq!(int_at(&out, QUALIFICATION_ADV_COUNT, 0), Some(1));
        assert_eq!(int_at(&out, QUALIFICATION_DEV_COUNT, 0), Some(0));

        assert_eq!(str_at(&out, SWIMMER_NAME, 1), Some("Bea"));
        assert_eq!(int_at(&out, PLACE_POINTS, 1), Some(0));
        assert_eq!(int_at(&out, PB_POINTS, 1), Some(1));
        assert_eq!(int_at(&out, TIME_POINTS, 1), Some(3));
        assert_eq!(int_at(&out, TOTAL_POINTS, 1), Some(4));
        assert_eq!(int_at(&out, QUALIFICATION_DEV_COUNT, 1), Some(1));
    }

    #[test]
    fn test_relay_only_swimmers_disappear() {
        let df = df! {
            "MeetName" => &["Spring"],
            "Date" => &["2025-07-01"],
            "Event" => &["Mixed 10 & Under 200 SC Meter Freestyle Relay"],
            "Gender" => &["Mixed"],
            "AgeGroup" => &["10 & Under"],
            "SwimmerName" => &["Relay Team A"],
            "Age" => &["10"],
            "Team" => &["SHRK"],
            "Qualification" => &["ADV"],
            "PlacePoints" => &[10.0],
            "PBPoints" => &[1i64],
            "TimePoints" => &[6i64],
        }
        .unwrap();

        let out = aggregate(df, source()).unwrap();
        assert_eq!(out.height(), 0);
    }

    #[test]
    fn test_rows_missing_keys_are_dropped() {
        let df = df! {
            "MeetName" => &["Spring", "Spring"],
            "Date" => &["2025-07-01", "2025-07-01"],
            "Event" => &["Boys 200 SC Meter IM", "Open 25 Yard Doggy Paddle"],
            "Gender" => &[Some("Boys"), None],
            "AgeGroup" => &[Some("12 & Over"), None],
            "SwimmerName" => &["Cal", "Dee"],
            "Age" => &["13", "13"],
            "Team" => &["SHRK", "SHRK"],
            "Qualification" => &[None::<&str>, None],
            "PlacePoints" => &["7", "5"],
            "PBPoints" => &[None::<i64>, None],
            "TimePoints" => &[None::<i64>, None],
        }
        .unwrap();

        let out = aggregate(df, source()).unwrap();
        assert_eq!(out.height(), 1);
        assert_eq!(str_at(&out, SWIMMER_NAME, 0), Some("Cal"));
        assert_eq!(int_at(&out, PLACE_POINTS, 0), Some(7));
    }

    #[test]
    fn test_combined_bonus_column() {
        let df = df! {
            "MeetName" => &["Spring", "Spring"],
            "Date" => &["2025-07-01", "2025-07-01"],
            "Event" => &["Girls 13 & Over 100 SC Meter Butterfly", "Girls 13 & Over 100 SC Meter IM"],
            "Gender" => &["Girls", "Girls"],
            "AgeGroup" => &["13 & Over", "13 & Over"],
            "SwimmerName" => &["Eve", "Eve"],
            "Age" => &["14", "14"],
            "Team" => &["SHRK", "SHRK"],
            "Qualification" => &["", "ADV"],
            "PlacePoints" => &[5i64, 3],
            "BonusPoints" => &[Some("0"), Some("n/a")],
        }
        .unwrap();

        let out = aggregate(df, source()).unwrap();
        assert!(out.column(PB_POINTS).is_err());
        assert_eq!(int_at(&out, PLACE_POINTS, 0), Some(8));
        assert_eq!(int_at(&out, BONUS_POINTS, 0), Some(0));
        assert_eq!(int_at(&out, TOTAL_POINTS, 0), Some(8));
        assert_eq!(int_at(&out, QUALIFICATION_ADV_COUNT, 0), Some(1));
    }

    #[test]
    fn test_missing_columns_are_rejected() {
        let df = df! {
            "MeetName" => &["Spring"],
            "SwimmerName" => &["Ada"],
        }
        .unwrap();

        match aggregate(df, source()) {
            Err(SwimError::MissingColumns { path, missing }) => {
                assert_eq!(path, source());
                assert!(missing.contains(&"Team".to_string()));
                assert!(missing.contains(&"Event".to_string()));
                assert_eq!(
                    missing.last().map(String::as_str),
                    Some("PBPoints+TimePoints or BonusPoints")
                );
            }
            other => panic!("Expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_output_sorted_by_swimmer_then_meet() {
        let df = df! {
            "MeetName" => &["Meet meet2", "Meet meet1", "Meet meet1"],
            "Date" => &["2025-07-01", "2025-07-01", "2025-07-01"],
            "Event" => &["Boys 200 SC Meter IM", "Boys 200 SC Meter IM", "Boys 200 SC Meter IM"],
            "Gender" => &["Boys", "Boys", "Boys"],
            "AgeGroup" => &["12 & Over", "12 & Over", "12 & Over"],
            "SwimmerName" => &["Zed", "Zed", "Abe"],
            "Age" => &["13", "13", "13"],
            "Team" => &["SHRK", "SHRK", "SHRK"],
            "Qualification" => &["", "", ""],
            "PlacePoints" => &[1i64, 2, 3],
            "PBPoints" => &[0i64, 0, 0],
            "TimePoints" => &[0i64, 0, 0],
        }
        .unwrap();

        let out = aggregate(df, source()).unwrap();
        let names: Vec<_> = (0..out.height())
            .map(|row| {
                (
                    str_at(&out, SWIMMER_NAME, row).unwrap().to_string(),
                    str_at(&out, MEET_NAME, row).unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(
            names,
            vec![
                ("Abe".to_string(), "Meet meet1".to_string()),
                ("Zed".to_string(), "Meet meet1".to_string()),
                ("Zed".to_string(), "Meet meet2".to_string()),
            ]
        );
    }
}
