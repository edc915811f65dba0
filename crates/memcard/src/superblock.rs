//! Decoder for the 340-byte superblock at the start of a card image.
//!
//! Every field lives at a fixed little-endian offset; the constants
//! below are the single source of truth for the layout, shared by all
//! decoders in this module.

use crate::bytes::{checksum_range, read_ascii_string, read_i32, read_i32_list, read_u16, BytesError};

/// Size of the superblock region in bytes.
pub const SUPERBLOCK_SIZE: usize = 340;

/// Expected value of `card_type` for a PlayStation 2 card.
pub const PS2_CARD_TYPE: u8 = 2;

// "Sony PS2 Memory Card Format " occupies bytes [0, 28). The sum of
// those 28 bytes is 2426; checking the first byte alone rules out most
// unformatted images without summing.
const MAGIC_START: usize = 0;
const MAGIC_END: usize = 28;
const MAGIC_FIRST_BYTE: u8 = b'S';
const MAGIC_CHECKSUM: u64 = 2426;

const VERSION_START: usize = 28;
const VERSION_END: usize = 40;

const PAGE_SIZE_OFFSET: usize = 40;
const PAGES_PER_CLUSTER_OFFSET: usize = 42;
const PAGES_PER_ERASE_BLOCK_OFFSET: usize = 44;
const CLUSTERS_PER_CARD_OFFSET: usize = 48;
const ROOT_DIR_OFFSET_OFFSET: usize = 52;
const ROOT_DIR_CLUSTER_OFFSET: usize = 60;
const BACKUP_BLOCK_1_OFFSET: usize = 64;
const BACKUP_BLOCK_2_OFFSET: usize = 68;

// Both tables hold 32 entries of 4 bytes each.
const IFC_LIST_START: usize = 80;
const IFC_LIST_END: usize = 208;
const BAD_BLOCK_LIST_START: usize = 208;
const BAD_BLOCK_LIST_END: usize = 336;

const CARD_TYPE_OFFSET: usize = 336;
const CARD_FLAGS_OFFSET: usize = 337;

const FLAG_ECC: u8 = 1 << 0;
const FLAG_BAD_BLOCKS: u8 = 1 << 3;
const FLAG_ERASE_ZEROS: u8 = 1 << 4;

/// Capability bits from byte 337 of the superblock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFlags {
    /// Card supports error-correcting codes.
    pub ecc: bool,
    /// Card may contain bad blocks.
    pub bad_blocks: bool,
    /// Erased blocks read back as all zero bits instead of all ones.
    pub erase_zeros: bool,
}

impl From<u8> for CardFlags {
    fn from(flags: u8) -> Self {
        Self {
            ecc: flags & FLAG_ECC != 0,
            bad_blocks: flags & FLAG_BAD_BLOCKS != 0,
            erase_zeros: flags & FLAG_ERASE_ZEROS != 0,
        }
    }
}

/// Immutable snapshot of the card's superblock.
///
/// All fields are decoded once by [`SuperBlock::parse`]; the three
/// `is_*` facts are computed at the same time and never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperBlock {
    /// ASCII signature phrase from the first 28 bytes.
    pub magic: String,
    /// Format version string, NUL padding stripped.
    pub version: String,
    /// Bytes per page.
    pub page_size: u16,
    /// Pages per allocation cluster.
    pub pages_per_cluster: u16,
    /// Pages erased in one physical operation.
    pub pages_per_erase_block: u16,
    /// Total addressable clusters on the card.
    pub clusters_per_card: i32,
    /// Offset of the allocatable area.
    pub root_dir_offset: i32,
    /// First cluster of the root directory, relative to `root_dir_offset`.
    pub root_dir_cluster: i32,
    /// First block used as scratch space during an erase.
    pub backup_block_1: i32,
    /// Second block used as scratch space during an erase.
    pub backup_block_2: i32,
    /// Indirect FAT cluster table, 32 entries, unused slots opaque.
    pub indirect_fat_clusters: Vec<i32>,
    /// Defective erase-block table, 32 entries, -1 marks an unused slot.
    pub bad_block_erase_list: Vec<i32>,
    /// Card type byte; 2 identifies a PS2 card.
    pub card_type: u8,
    /// Capability bits.
    pub card_flags: CardFlags,
    /// Derived: `page_size * pages_per_cluster`.
    pub cluster_size: u32,
    /// Signature phrase checks out.
    pub is_formatted: bool,
    /// Version string matches `1.<digits>.0.0`.
    pub is_valid_version: bool,
    /// Image is strictly larger than `cluster_size * clusters_per_card`.
    pub is_valid_card_size: bool,
}

impl SuperBlock {
    /// Decodes the superblock from a full card image.
    ///
    /// `card` must be the whole image, not just the header: the card
    /// size fact compares the image length against the cluster area.
    /// Fails only when the image cannot hold a superblock.
    pub fn parse(card: &[u8]) -> Result<Self, BytesError> {
        if card.is_empty() {
            return Err(BytesError::InvalidBuffer);
        }
        if card.len() < SUPERBLOCK_SIZE {
            return Err(BytesError::OutOfBounds {
                offset: 0,
                len: SUPERBLOCK_SIZE,
                available: card.len(),
            });
        }

        let magic = read_ascii_string(&card[MAGIC_START..MAGIC_END])?;
        let version = read_ascii_string(&card[VERSION_START..VERSION_END])?;

        let page_size = read_u16(card, PAGE_SIZE_OFFSET)?;
        let pages_per_cluster = read_u16(card, PAGES_PER_CLUSTER_OFFSET)?;
        let pages_per_erase_block = read_u16(card, PAGES_PER_ERASE_BLOCK_OFFSET)?;
        let clusters_per_card = read_i32(card, CLUSTERS_PER_CARD_OFFSET)?;

        let root_dir_offset = read_i32(card, ROOT_DIR_OFFSET_OFFSET)?;
        let root_dir_cluster = read_i32(card, ROOT_DIR_CLUSTER_OFFSET)?;
        let backup_block_1 = read_i32(card, BACKUP_BLOCK_1_OFFSET)?;
        let backup_block_2 = read_i32(card, BACKUP_BLOCK_2_OFFSET)?;

        let indirect_fat_clusters = read_i32_list(card, IFC_LIST_START, IFC_LIST_END, false)?;
        let bad_block_erase_list =
            read_i32_list(card, BAD_BLOCK_LIST_START, BAD_BLOCK_LIST_END, false)?;

        let card_type = card[CARD_TYPE_OFFSET];
        let card_flags = CardFlags::from(card[CARD_FLAGS_OFFSET]);

        let cluster_size = u32::from(page_size) * u32::from(pages_per_cluster);

        // The three validity facts are independent; each is computed
        // regardless of the others so callers can query them
        // individually.
        let is_formatted = check_formatted(card)?;
        let is_valid_version = check_version(&version);
        let is_valid_card_size = check_card_size(card.len(), cluster_size, clusters_per_card);

        Ok(Self {
            magic,
            version,
            page_size,
            pages_per_cluster,
            pages_per_erase_block,
            clusters_per_card,
            root_dir_offset,
            root_dir_cluster,
            backup_block_1,
            backup_block_2,
            indirect_fat_clusters,
            bad_block_erase_list,
            card_type,
            card_flags,
            cluster_size,
            is_formatted,
            is_valid_version,
            is_valid_card_size,
        })
    }
}

fn check_formatted(card: &[u8]) -> Result<bool, BytesError> {
    // A wrong first byte settles it without summing the other 27.
    if card[MAGIC_START] != MAGIC_FIRST_BYTE {
        return Ok(false);
    }
    Ok(checksum_range(card, MAGIC_START, MAGIC_END)? == MAGIC_CHECKSUM)
}

fn check_version(version: &str) -> bool {
    let Some(rest) = version.strip_prefix("1.") else {
        return false;
    };
    let Some(minor) = rest.strip_suffix(".0.0") else {
        return false;
    };
    !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit())
}

fn check_card_size(card_len: usize, cluster_size: u32, clusters_per_card: i32) -> bool {
    // Signed 64-bit math: a negative cluster count must not wrap into
    // a huge unsigned value and fail the comparison by accident.
    let total_cluster_bytes = i64::from(cluster_size) * i64::from(clusters_per_card);
    card_len as i64 > total_cluster_bytes
}
