//! Persistent high score on two cells of a byte store.
//!
//! Cell 0 holds the high byte and cell 1 the low byte. An erased store reads
//! 0xFFFF, which is treated as a high score of zero.

/// Trait for abstracting non-volatile byte storage (EEPROM, flash emulation).
///
/// Writes are fire-and-forget. Handle any hardware errors internally.
pub trait ByteStore {
    /// Reads the byte at `address`.
    fn read_byte(&mut self, address: usize) -> u8;

    /// Writes `value` to `address`.
    fn write_byte(&mut self, address: usize, value: u8);
}

/// Value an erased store reads back as.
pub const BLANK_SENTINEL: u16 = 0xFFFF;

/// Largest storable high score; one below the erased sentinel.
pub const MAX_HI_SCORE: u16 = BLANK_SENTINEL - 1;

const HIGH_BYTE: usize = 0;
const LOW_BYTE: usize = 1;

/// High-score accessor over a [`ByteStore`].
///
/// Scores are stored as-is up to [`MAX_HI_SCORE`]. Larger values are stored
/// as [`MAX_HI_SCORE`], so writing 65535 reads back as 65534 rather than as
/// the erased sentinel.
pub struct HiScoreStore<S: ByteStore> {
    store: S,
}

impl<S: ByteStore> HiScoreStore<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the persisted high score; a blank store reads as 0.
    pub fn read_hi_score(&mut self) -> u16 {
        let value = u16::from_be_bytes([
            self.store.read_byte(HIGH_BYTE),
            self.store.read_byte(LOW_BYTE),
        ]);
        if value == BLANK_SENTINEL { 0 } else { value }
    }

    /// Persists `value`, capped at [`MAX_HI_SCORE`].
    pub fn write_hi_score(&mut self, value: u16) {
        let [high, low] = value.min(MAX_HI_SCORE).to_be_bytes();
        self.store.write_byte(HIGH_BYTE, high);
        self.store.write_byte(LOW_BYTE, low);
    }

    /// Persists `score` if it beats the stored value. Returns the high score
    /// after the call.
    pub fn commit_if_higher(&mut self, score: u16) -> u16 {
        let current = self.read_hi_score();
        let score = score.min(MAX_HI_SCORE);
        if score > current {
            self.write_hi_score(score);
            score
        } else {
            current
        }
    }

    /// Zeroes the persisted high score.
    pub fn reset(&mut self) {
        self.write_hi_score(0);
    }

    /// Returns a reference to the underlying store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Returns the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Two-cell in-RAM [`ByteStore`], starting erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStore {
    cells: [u8; 2],
    writes: u32,
}

impl MemoryStore {
    /// Creates an erased store.
    pub const fn blank() -> Self {
        Self {
            cells: [0xFF; 2],
            writes: 0,
        }
    }

    /// Creates a store holding `cells`.
    pub const fn with_cells(cells: [u8; 2]) -> Self {
        Self { cells, writes: 0 }
    }

    /// Raw cell contents.
    pub fn cells(&self) -> [u8; 2] {
        self.cells
    }

    /// Number of byte writes performed.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::blank()
    }
}

impl ByteStore for MemoryStore {
    fn read_byte(&mut self, address: usize) -> u8 {
        self.cells.get(address).copied().unwrap_or(0xFF)
    }

    fn write_byte(&mut self, address: usize, value: u8) {
        if let Some(cell) = self.cells.get_mut(address) {
            *cell = value;
            self.writes += 1;
        }
    }
}
