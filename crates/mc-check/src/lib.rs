//! Report building for the `mc-check` binary.
//!
//! The binary stays thin; everything worth testing lives here.

use std::path::Path;

use memcard::{CardFlags, MemoryCard, SuperBlock};
use serde::Serialize;

/// Machine-readable validation report for one card image.
#[derive(Debug, Serialize)]
pub struct Report {
    pub valid: bool,
    /// First cascade failure, empty for a valid card.
    pub reason: String,
    /// Absent when the image was too small to decode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superblock: Option<SuperBlockReport>,
}

#[derive(Debug, Serialize)]
pub struct SuperBlockReport {
    pub version: String,
    pub page_size: u16,
    pub pages_per_cluster: u16,
    pub cluster_size: u32,
    pub pages_per_erase_block: u16,
    pub clusters_per_card: i32,
    pub root_dir_offset: i32,
    pub root_dir_cluster: i32,
    pub backup_block_1: i32,
    pub backup_block_2: i32,
    pub indirect_fat_clusters: Vec<i32>,
    pub bad_block_erase_list: Vec<i32>,
    pub card_type: u8,
    pub flags: FlagsReport,
}

#[derive(Debug, Serialize)]
pub struct FlagsReport {
    pub ecc: bool,
    pub bad_blocks: bool,
    pub erase_zeros: bool,
}

impl From<CardFlags> for FlagsReport {
    fn from(flags: CardFlags) -> Self {
        Self {
            ecc: flags.ecc,
            bad_blocks: flags.bad_blocks,
            erase_zeros: flags.erase_zeros,
        }
    }
}

impl From<&SuperBlock> for SuperBlockReport {
    fn from(sb: &SuperBlock) -> Self {
        Self {
            version: sb.version.clone(),
            page_size: sb.page_size,
            pages_per_cluster: sb.pages_per_cluster,
            cluster_size: sb.cluster_size,
            pages_per_erase_block: sb.pages_per_erase_block,
            clusters_per_card: sb.clusters_per_card,
            root_dir_offset: sb.root_dir_offset,
            root_dir_cluster: sb.root_dir_cluster,
            backup_block_1: sb.backup_block_1,
            backup_block_2: sb.backup_block_2,
            indirect_fat_clusters: sb.indirect_fat_clusters.clone(),
            bad_block_erase_list: sb.bad_block_erase_list.clone(),
            card_type: sb.card_type,
            flags: sb.card_flags.into(),
        }
    }
}

impl Report {
    pub fn from_card(card: &MemoryCard) -> Self {
        Self {
            valid: card.is_valid(),
            reason: card.reason(),
            superblock: card.superblock().map(SuperBlockReport::from),
        }
    }
}

/// Reads a card image from disk and runs the validation cascade.
pub fn check_image(path: &Path) -> std::io::Result<MemoryCard> {
    let data = std::fs::read(path)?;
    Ok(MemoryCard::new(data))
}
