//! Card-level validation: one buffer, one verdict.

use crate::superblock::{SuperBlock, PS2_CARD_TYPE, SUPERBLOCK_SIZE};

/// Minimum image length for a card to be considered at all. The
/// superblock occupies 340 bytes and a real card always carries data
/// beyond it.
pub const MIN_CARD_SIZE: usize = SUPERBLOCK_SIZE + 1;

/// Why a card failed validation; one variant per cascade stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// The image cannot hold a superblock plus any data.
    TooSmall,
    /// The signature phrase does not check out.
    NotFormatted,
    /// The card type byte is not the PS2 one.
    WrongCardType,
    /// The version string does not match `1.x.0.0`; carries the
    /// decoded string, garbled or not.
    BadVersion(String),
    /// The image is not larger than the addressable cluster area.
    BadClusterSize,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InvalidReason::TooSmall => {
                write!(f, "The memory card must have at least {MIN_CARD_SIZE} bytes.")
            }
            InvalidReason::NotFormatted => {
                write!(f, "The memory card is not formatted.")
            }
            InvalidReason::WrongCardType => {
                write!(f, "The memory card must be for the PlayStation 2.")
            }
            InvalidReason::BadVersion(version) => {
                write!(
                    f,
                    "The version {version} is invalid and not in the format 1.x.0.0 on the memory card."
                )
            }
            InvalidReason::BadClusterSize => {
                write!(
                    f,
                    "The memory card must be larger than the total size of usable clusters."
                )
            }
        }
    }
}

/// Outcome of the validation cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(InvalidReason),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// The human-readable reason, empty for a valid card.
    pub fn reason(&self) -> String {
        match self {
            Verdict::Valid => String::new(),
            Verdict::Invalid(reason) => reason.to_string(),
        }
    }
}

/// An owned card image with its decoded superblock and verdict.
///
/// Construction runs the whole cascade eagerly; the verdict is a pure
/// function of the bytes and nothing here can change after `new`
/// returns.
#[derive(Debug, Clone)]
pub struct MemoryCard {
    bytes: Vec<u8>,
    superblock: Option<SuperBlock>,
    verdict: Verdict,
}

impl MemoryCard {
    /// Takes ownership of a card image and validates it.
    ///
    /// Never fails: an unusable image yields an `Invalid` verdict, not
    /// an error. Images shorter than [`MIN_CARD_SIZE`] are rejected
    /// before the superblock is decoded.
    pub fn new(bytes: Vec<u8>) -> Self {
        if bytes.len() < MIN_CARD_SIZE {
            return Self {
                bytes,
                superblock: None,
                verdict: Verdict::Invalid(InvalidReason::TooSmall),
            };
        }

        // The length gate above is the only way parsing can fail, so
        // an error here still maps to the size verdict.
        let (superblock, verdict) = match SuperBlock::parse(&bytes) {
            Ok(sb) => {
                let verdict = run_cascade(&sb);
                (Some(sb), verdict)
            }
            Err(_) => (None, Verdict::Invalid(InvalidReason::TooSmall)),
        };

        Self {
            bytes,
            superblock,
            verdict,
        }
    }

    /// The raw image this card was built from.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The decoded superblock, absent when the image was too small.
    pub fn superblock(&self) -> Option<&SuperBlock> {
        self.superblock.as_ref()
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid()
    }

    /// First cascade failure as user-facing text, empty when valid.
    pub fn reason(&self) -> String {
        self.verdict.reason()
    }
}

/// Fixed-order cascade over an already-decoded superblock; the first
/// failing stage wins and later stages are not consulted.
fn run_cascade(sb: &SuperBlock) -> Verdict {
    if !sb.is_formatted {
        return Verdict::Invalid(InvalidReason::NotFormatted);
    }
    if sb.card_type != PS2_CARD_TYPE {
        return Verdict::Invalid(InvalidReason::WrongCardType);
    }
    if !sb.is_valid_version {
        return Verdict::Invalid(InvalidReason::BadVersion(sb.version.clone()));
    }
    if !sb.is_valid_card_size {
        return Verdict::Invalid(InvalidReason::BadClusterSize);
    }
    Verdict::Valid
}
