use std::fs;

use mc_check::{check_image, Report};
use memcard::testimage::{valid_card_image, CardImageSpec};
use tempfile::tempdir;

#[test]
fn reports_a_valid_image_from_disk() {
    let tempdir = tempdir().expect("temp dir");
    let path = tempdir.path().join("card.mc2");
    fs::write(&path, valid_card_image(&CardImageSpec::default())).expect("write image");

    let card = check_image(&path).expect("read image");
    let report = Report::from_card(&card);

    assert!(report.valid);
    assert_eq!(report.reason, "");

    let sb = report.superblock.as_ref().expect("superblock present");
    assert_eq!(sb.version, "1.2.0.0");
    assert_eq!(sb.cluster_size, 1024);
    assert_eq!(sb.card_type, 2);
}

#[test]
fn json_report_carries_verdict_and_geometry() {
    let tempdir = tempdir().expect("temp dir");
    let path = tempdir.path().join("card.mc2");
    fs::write(&path, valid_card_image(&CardImageSpec::default())).expect("write image");

    let card = check_image(&path).expect("read image");
    let json = serde_json::to_value(Report::from_card(&card)).expect("serialize report");

    assert_eq!(json["valid"], true);
    assert_eq!(json["reason"], "");
    assert_eq!(json["superblock"]["page_size"], 512);
    assert_eq!(json["superblock"]["pages_per_cluster"], 2);
    assert_eq!(json["superblock"]["flags"]["ecc"], true);
    assert_eq!(json["superblock"]["flags"]["bad_blocks"], true);
    assert_eq!(json["superblock"]["flags"]["erase_zeros"], false);
    assert_eq!(
        json["superblock"]["indirect_fat_clusters"]
            .as_array()
            .expect("fat cluster array")
            .len(),
        32
    );
}

#[test]
fn too_small_image_reports_without_a_superblock() {
    let tempdir = tempdir().expect("temp dir");
    let path = tempdir.path().join("stub.mc2");
    fs::write(&path, vec![0u8; 128]).expect("write image");

    let card = check_image(&path).expect("read image");
    let report = Report::from_card(&card);

    assert!(!report.valid);
    assert_eq!(report.reason, "The memory card must have at least 341 bytes.");
    assert!(report.superblock.is_none());

    // The superblock key disappears entirely from the JSON form.
    let json = serde_json::to_value(&report).expect("serialize report");
    assert!(json.get("superblock").is_none());
}

#[test]
fn invalid_image_report_keeps_the_decoded_fields() {
    let tempdir = tempdir().expect("temp dir");
    let path = tempdir.path().join("card.mc2");
    let spec = CardImageSpec {
        version: "1.a.0.0",
        ..CardImageSpec::default()
    };
    fs::write(&path, valid_card_image(&spec)).expect("write image");

    let card = check_image(&path).expect("read image");
    let report = Report::from_card(&card);

    assert!(!report.valid);
    assert_eq!(
        report.reason,
        "The version 1.a.0.0 is invalid and not in the format 1.x.0.0 on the memory card."
    );
    // Field access still works even though the verdict failed.
    let sb = report.superblock.as_ref().expect("superblock present");
    assert_eq!(sb.version, "1.a.0.0");
}
