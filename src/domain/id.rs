//! Short identifier generation.
//!
//! One [`IdGenerator`] is created per parse and threaded through the builder.
//! Ids are unique per generator: every id encodes the generator's random tag,
//! its worker number and a monotonically increasing sequence counter.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{instrument, trace};

use crate::domain::error::IdError;

/// Default 64-symbol alphabet.
pub const DEFAULT_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_-";

/// Worker number used by [`IdGenerator::default`].
pub const DEFAULT_WORKER: u8 = 1;

/// Seed used by [`IdGenerator::default`].
pub const DEFAULT_SEED: u64 = 2342;

const ALPHABET_LEN: usize = 64;
const MAX_WORKER: u8 = 31;
// 30 bits of per-instance entropy -> 5 symbols
const TAG_BITS: u32 = 30;

#[derive(Debug, Clone)]
struct ShortId {
    alphabet: Vec<char>,
    worker: u8,
    tag: u64,
    counter: u64,
}

impl ShortId {
    fn new(worker: u8, alphabet: &str, seed: u64) -> Result<Self, IdError> {
        let symbols: Vec<char> = alphabet.chars().collect();
        let unique = symbols.iter().collect::<HashSet<_>>().len();
        if symbols.len() != ALPHABET_LEN || unique != ALPHABET_LEN {
            return Err(IdError::InvalidAlphabet {
                len: symbols.len(),
                unique,
            });
        }
        if worker > MAX_WORKER {
            return Err(IdError::InvalidWorker(worker));
        }

        Ok(Self {
            alphabet: shuffle(symbols, seed),
            worker,
            tag: rand::random::<u64>() & ((1 << TAG_BITS) - 1),
            counter: 0,
        })
    }

    fn generate(&mut self) -> Result<String, IdError> {
        self.counter = self
            .counter
            .checked_add(1)
            .ok_or(IdError::SequenceExhausted)?;

        let mut id = String::with_capacity(8);
        self.encode(self.tag, &mut id);
        self.encode(u64::from(self.worker), &mut id);
        self.encode(self.counter, &mut id);
        Ok(id)
    }

    /// Appends `value` in base 64, least significant symbol first, at least one symbol.
    fn encode(&self, mut value: u64, out: &mut String) {
        loop {
            // masked to 6 bits, always a valid index
            out.push(self.alphabet[(value & 0x3f) as usize]);
            value >>= 6;
            if value == 0 {
                break;
            }
        }
    }
}

/// Seeded permutation of the alphabet; the same seed always yields the same order.
fn shuffle(mut symbols: Vec<char>, seed: u64) -> Vec<char> {
    let mut rng = StdRng::seed_from_u64(seed);
    symbols.shuffle(&mut rng);
    symbols
}

/// Stateful id source for a single parse.
///
/// A generator built from invalid parameters is not rejected at construction
/// time; it returns the construction error from every [`next_id`](Self::next_id) call.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    inner: Result<ShortId, IdError>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_WORKER, DEFAULT_ALPHABET, DEFAULT_SEED)
    }
}

impl IdGenerator {
    pub fn new(worker: u8, alphabet: &str, seed: u64) -> Self {
        Self {
            inner: ShortId::new(worker, alphabet, seed),
        }
    }

    /// True when the generator was constructed in a failed state.
    pub fn is_failed(&self) -> bool {
        self.inner.is_err()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn next_id(&mut self) -> Result<String, IdError> {
        match &mut self.inner {
            Ok(sid) => {
                let id = sid.generate()?;
                trace!(%id, "generated id");
                Ok(id)
            }
            Err(e) => Err(e.clone()),
        }
    }
}
