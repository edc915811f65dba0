use memcard::testimage::{valid_card_image, CardImageSpec, SIGNATURE};
use memcard::{InvalidReason, MemoryCard, Verdict};

#[test]
fn round_trip_of_a_synthetic_valid_card() {
    let image = valid_card_image(&CardImageSpec::default());
    let card = MemoryCard::new(image.clone());

    assert_eq!(card.verdict(), &Verdict::Valid);
    assert_eq!(card.reason(), "");
    assert_eq!(card.bytes(), image.as_slice());

    let sb = card.superblock().expect("superblock decoded");
    assert_eq!(sb.magic.as_bytes(), SIGNATURE);
    assert_eq!(sb.version, "1.2.0.0");
    assert_eq!(sb.cluster_size, 1024);
}

#[test]
fn every_cascade_stage_maps_to_its_message() {
    let too_small = MemoryCard::new(vec![0u8; 64]);
    assert_eq!(
        too_small.verdict(),
        &Verdict::Invalid(InvalidReason::TooSmall)
    );
    assert_eq!(
        too_small.reason(),
        "The memory card must have at least 341 bytes."
    );

    let mut unformatted = valid_card_image(&CardImageSpec::default());
    unformatted[0] = 0;
    assert_eq!(
        MemoryCard::new(unformatted).reason(),
        "The memory card is not formatted."
    );

    let wrong_type = CardImageSpec {
        card_type: 1,
        ..CardImageSpec::default()
    };
    assert_eq!(
        MemoryCard::new(valid_card_image(&wrong_type)).reason(),
        "The memory card must be for the PlayStation 2."
    );

    let bad_version = CardImageSpec {
        version: "2.0.0.0",
        ..CardImageSpec::default()
    };
    assert_eq!(
        MemoryCard::new(valid_card_image(&bad_version)).reason(),
        "The version 2.0.0.0 is invalid and not in the format 1.x.0.0 on the memory card."
    );

    let truncated = CardImageSpec {
        image_len: 4096,
        ..CardImageSpec::default()
    };
    assert_eq!(
        MemoryCard::new(valid_card_image(&truncated)).reason(),
        "The memory card must be larger than the total size of usable clusters."
    );
}

#[test]
fn first_failure_wins_over_later_stages() {
    // Wrong type and bad version at once: the type check fires first.
    let spec = CardImageSpec {
        card_type: 0,
        version: "1.x.0.0",
        ..CardImageSpec::default()
    };
    let card = MemoryCard::new(valid_card_image(&spec));
    assert_eq!(
        card.verdict(),
        &Verdict::Invalid(InvalidReason::WrongCardType)
    );
}

#[test]
fn garbled_version_bytes_are_reported_verbatim() {
    let mut image = valid_card_image(&CardImageSpec::default());
    // "1.2.0.0" -> "1.z.0.0" directly in the header bytes.
    image[30] = b'z';

    let card = MemoryCard::new(image);
    assert_eq!(
        card.verdict(),
        &Verdict::Invalid(InvalidReason::BadVersion("1.z.0.0".to_string()))
    );
    assert_eq!(
        card.reason(),
        "The version 1.z.0.0 is invalid and not in the format 1.x.0.0 on the memory card."
    );
}

#[test]
fn cluster_size_boundary_is_exclusive() {
    // 512-byte pages * 2 per cluster * 8 clusters = 8192 bytes.
    let at_boundary = CardImageSpec {
        image_len: 8192,
        ..CardImageSpec::default()
    };
    assert!(!MemoryCard::new(valid_card_image(&at_boundary)).is_valid());

    let one_byte_larger = CardImageSpec {
        image_len: 8193,
        ..CardImageSpec::default()
    };
    assert!(MemoryCard::new(valid_card_image(&one_byte_larger)).is_valid());
}

#[test]
fn oversized_images_are_not_penalized() {
    // Modded cards come in arbitrary sizes; anything beyond the
    // cluster area is fine.
    let oversized = CardImageSpec {
        image_len: 64 * 1024,
        ..CardImageSpec::default()
    };
    assert!(MemoryCard::new(valid_card_image(&oversized)).is_valid());
}
