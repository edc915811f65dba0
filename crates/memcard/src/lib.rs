//! Decoding and validation for PS2 memory-card images.
//!
//! The crate is split leaf-first: [`bytes`] knows nothing about the
//! card format and only offers bounds-validated little-endian readers;
//! [`superblock`] interprets the 340-byte header on top of it;
//! [`card`] owns a whole image and runs the validation cascade down to
//! a single verdict.
//!
//! Directory enumeration (walking the FAT cluster chain to list saved
//! games) is intentionally absent; `SuperBlock` exposes the fields a
//! future walker would need (`root_dir_cluster`, `cluster_size`,
//! `clusters_per_card`, `indirect_fat_clusters`).

pub mod bytes;
pub mod card;
pub mod superblock;
pub mod testimage;

pub use bytes::BytesError;
pub use card::{InvalidReason, MemoryCard, Verdict, MIN_CARD_SIZE};
pub use superblock::{CardFlags, SuperBlock, PS2_CARD_TYPE, SUPERBLOCK_SIZE};
