//! Aggregation stage tests, fed by the standardization stage

use super::{sample_sheet, test_pipeline, write_sheet};
use crate::constants::fields;
use crate::processor::writer::read_csv;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_aggregate_standardized_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let raw_dir = temp_dir.path().join("raw");
    let standardized_dir = temp_dir.path().join("standardized");
    let aggregated_dir = temp_dir.path().join("aggregated");
    fs::create_dir_all(&raw_dir).unwrap();
    write_sheet(&raw_dir, "2025-meet3-results.csv", &sample_sheet());

    let pipeline = test_pipeline();
    pipeline
        .run_standardization(&raw_dir, &standardized_dir)
        .unwrap();
    let stats = pipeline
        .run_aggregation(&standardized_dir, &aggregated_dir)
        .unwrap();

    assert_eq!(stats.files_processed, 1);
    let output = aggregated_dir.join("aggregated_2025-meet3-results.csv");
    assert_eq!(stats.outputs, vec![output.clone()]);

    let df = read_csv(&output).unwrap();
    let names: Vec<_> = df
        .column(fields::SWIMMER_NAME)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|n| n.unwrap().to_string())
        .collect();
    // Relay team and the swimmer from the unknown event are not aggregated
    assert_eq!(names, vec!["Ada Lovelace", "Bea Smith", "Cara Jones"]);

    let place = df.column(fields::PLACE_POINTS).unwrap().i64().unwrap();
    let bonus = df.column(fields::BONUS_POINTS).unwrap().i64().unwrap();
    let total = df.column(fields::TOTAL_POINTS).unwrap().i64().unwrap();
    let adv = df.column(fields::QUALIFICATION_ADV_COUNT).unwrap().i64().unwrap();
    let dev = df.column(fields::QUALIFICATION_DEV_COUNT).unwrap().i64().unwrap();

    assert_eq!(place.get(0), Some(8));
    assert_eq!(bonus.get(0), Some(11));
    assert_eq!(total.get(0), Some(19));
    assert_eq!(adv.get(0), Some(1));
    assert_eq!(dev.get(0), Some(1));

    assert_eq!(total.get(1), Some(4));
    assert_eq!(total.get(2), Some(0));
}

#[test]
fn test_aggregate_file_legacy_bonus_column() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_sheet(
        temp_dir.path(),
        "standardized_legacy.csv",
        "MeetName,Date,Event,Gender,AgeGroup,SwimmerName,Age,Team,Qualification,PlacePoints,BonusPoints\n\
         Winter,2024-07-01,Boys 12 & Under 50 SC Meter Butterfly,Boys,12 & Under,Finn,12,ORCA,ADV,5,8\n\
         Winter,2024-07-01,Boys 12 & Under 100 SC Meter IM,Boys,12 & Under,Finn,12,ORCA,,2,\n",
    );
    let out_dir = temp_dir.path().join("aggregated");
    fs::create_dir_all(&out_dir).unwrap();

    let outcome = test_pipeline().aggregate_file(&input, &out_dir).unwrap();
    assert_eq!(outcome.output_path, out_dir.join("aggregated_legacy.csv"));
    assert_eq!(outcome.rows_written, 1);

    let df = read_csv(&outcome.output_path).unwrap();
    assert!(df.column(fields::PB_POINTS).is_err());
    assert_eq!(
        df.column(fields::TOTAL_POINTS).unwrap().i64().unwrap().get(0),
        Some(15)
    );
}

#[test]
fn test_empty_standardized_directory() {
    let temp_dir = TempDir::new().unwrap();
    let standardized_dir = temp_dir.path().join("standardized");
    fs::create_dir_all(&standardized_dir).unwrap();

    let stats = test_pipeline()
        .run_aggregation(&standardized_dir, &temp_dir.path().join("aggregated"))
        .unwrap();

    assert_eq!(stats.files_processed, 0);
    assert_eq!(stats.files_failed, 0);
    assert!(stats.outputs.is_empty());
}
