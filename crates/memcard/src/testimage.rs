//! Builders for synthetic card images.
//!
//! Used by the test suites and the example binaries; real card dumps
//! are several megabytes, so the fixtures here shrink the geometry to
//! a few kilobytes while keeping every superblock field in place.

use byteorder::{ByteOrder, LittleEndian};

use crate::superblock::PS2_CARD_TYPE;

/// The formatted-card signature phrase.
pub const SIGNATURE: &[u8; 28] = b"Sony PS2 Memory Card Format ";

/// Knobs for [`valid_card_image`]. The defaults describe a tiny but
/// fully valid card: 512-byte pages, 2 pages per cluster, 8 clusters,
/// with room left over for the reserved area.
#[derive(Debug, Clone)]
pub struct CardImageSpec {
    pub version: &'static str,
    pub page_size: u16,
    pub pages_per_cluster: u16,
    pub pages_per_erase_block: u16,
    pub clusters_per_card: i32,
    pub root_dir_offset: i32,
    pub root_dir_cluster: i32,
    pub backup_block_1: i32,
    pub backup_block_2: i32,
    pub card_type: u8,
    pub card_flags: u8,
    /// Total image length; must be at least 341 for the card to be
    /// considered at all.
    pub image_len: usize,
}

impl Default for CardImageSpec {
    fn default() -> Self {
        Self {
            version: "1.2.0.0",
            page_size: 512,
            pages_per_cluster: 2,
            pages_per_erase_block: 16,
            clusters_per_card: 8,
            root_dir_offset: 41,
            root_dir_cluster: 0,
            backup_block_1: 1023,
            backup_block_2: 1022,
            card_type: PS2_CARD_TYPE,
            card_flags: 0b0000_1001,
            image_len: 9216,
        }
    }
}

/// Builds a card image whose superblock decodes to `spec`.
///
/// The first indirect FAT slot points at cluster 8 and the bad-block
/// table is filled with -1 sentinels, matching a freshly formatted
/// card.
pub fn valid_card_image(spec: &CardImageSpec) -> Vec<u8> {
    let mut image = vec![0u8; spec.image_len];

    image[..SIGNATURE.len()].copy_from_slice(SIGNATURE);
    image[28..28 + spec.version.len()].copy_from_slice(spec.version.as_bytes());

    LittleEndian::write_u16(&mut image[40..42], spec.page_size);
    LittleEndian::write_u16(&mut image[42..44], spec.pages_per_cluster);
    LittleEndian::write_u16(&mut image[44..46], spec.pages_per_erase_block);
    LittleEndian::write_i32(&mut image[48..52], spec.clusters_per_card);
    LittleEndian::write_i32(&mut image[52..56], spec.root_dir_offset);
    LittleEndian::write_i32(&mut image[60..64], spec.root_dir_cluster);
    LittleEndian::write_i32(&mut image[64..68], spec.backup_block_1);
    LittleEndian::write_i32(&mut image[68..72], spec.backup_block_2);

    LittleEndian::write_i32(&mut image[80..84], 8);
    for slot in (208..336).step_by(4) {
        LittleEndian::write_i32(&mut image[slot..slot + 4], -1);
    }

    image[336] = spec.card_type;
    image[337] = spec.card_flags;

    image
}
