//! PRESENT is an ultra-lightweight block cipher aimed at constrained
//! hardware such as RFID tags and sensor nodes.
//!
//! PRESENT works on 64-bit blocks, and supports key sizes of 80 and 128
//! bits. It is a substitution-permutation network: each round XORs a round
//! key into the state, substitutes every 4-bit nibble of the state through a
//! single S-box, and reroutes the state bits through a fixed wire
//! permutation. After the last round one more round key is added as
//! whitening. The round keys are derived on the fly by mutating a key
//! register between rounds.
//!
//! The specification for this cipher is available as the [CHES 2007
//! paper](https://doi.org/10.1007/978-3-540-74735-2_31).
//!
//! State and key buffers are exchanged as little-endian byte arrays: byte 0
//! holds the least significant byte of the 64-bit state, and the round key
//! consumed by [`add_round_key`] is the highest-addressed 8 bytes of the key
//! register. The published test vectors are reproduced bit-exact under this
//! convention.

use {
    crate::{BlockCipher, BlockDecrypt, BlockEncrypt},
    docext::docext,
    std::fmt,
};

/// PRESENT block size in bytes.
pub const BLOCK_BYTES: usize = 8;

/// Round count fixed by the paper.
pub const ROUNDS: u8 = 31;

/// Key register size of [`Present80`] in bytes.
pub const PRESENT80_KEY_BYTES: usize = 10;

/// Key register size of [`Present128`] in bytes.
pub const PRESENT128_KEY_BYTES: usize = 16;

const PRESENT80_KEY_WORDS: usize = 5;
const PRESENT128_KEY_WORDS: usize = 8;

/// The substitution table, defined in Section 3 of the PRESENT
/// specification.
pub const S_BOX: [u8; 16] = [
    0xc, 0x5, 0x6, 0xb, 0x9, 0x0, 0xa, 0xd, 0x3, 0xe, 0xf, 0x8, 0x4, 0x7, 0x1, 0x2,
];

/// Inverse [substitution table](S_BOX).
pub const INV_S_BOX: [u8; 16] = [
    0x5, 0xe, 0xf, 0x8, 0xc, 0x1, 0x2, 0xd, 0xb, 0x4, 0x6, 0x3, 0x0, 0x7, 0x9, 0xa,
];

/// [PRESENT block cipher](self) with 80-bit keys.
#[derive(Debug, Clone)]
pub struct Present80 {
    rounds: u8,
}

impl Present80 {
    /// Create the cipher with the full 31 rounds from the paper.
    pub fn new() -> Self {
        Self { rounds: ROUNDS }
    }

    /// Create a reduced-round variant of the cipher.
    ///
    /// Reduced-round variants are useful for cryptanalysis and remain
    /// invertible, but only the full 31-round cipher is covered by the
    /// published test vectors. Round counts outside `1..=31` are rejected.
    pub fn with_rounds(rounds: u8) -> Result<Self, RoundCountOutOfRange> {
        if (1..=ROUNDS).contains(&rounds) {
            Ok(Self { rounds })
        } else {
            Err(RoundCountOutOfRange)
        }
    }
}

impl Default for Present80 {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockEncrypt for Present80 {
    type EncryptionBlock = [u8; BLOCK_BYTES];
    type EncryptionKey = [u8; PRESENT80_KEY_BYTES];

    fn encrypt(&self, data: &mut Self::EncryptionBlock, key: &Self::EncryptionKey) {
        encrypt::<PRESENT80_KEY_BYTES, PRESENT80_KEY_WORDS>(data, key, self.rounds)
    }
}

impl BlockDecrypt for Present80 {
    type DecryptionBlock = [u8; BLOCK_BYTES];
    type DecryptionKey = [u8; PRESENT80_KEY_BYTES];

    fn decrypt(&self, data: &mut Self::DecryptionBlock, key: &Self::DecryptionKey) {
        decrypt::<PRESENT80_KEY_BYTES, PRESENT80_KEY_WORDS>(data, key, self.rounds)
    }
}

impl BlockCipher for Present80 {
    type Block = [u8; BLOCK_BYTES];
    type Key = [u8; PRESENT80_KEY_BYTES];
}

/// [PRESENT block cipher](self) with 128-bit keys.
#[derive(Debug, Clone)]
pub struct Present128 {
    rounds: u8,
}

impl Present128 {
    /// Create the cipher with the full 31 rounds from the paper.
    pub fn new() -> Self {
        Self { rounds: ROUNDS }
    }

    /// Create a reduced-round variant of the cipher.
    ///
    /// Reduced-round variants are useful for cryptanalysis and remain
    /// invertible, but only the full 31-round cipher is covered by the
    /// published test vectors. Round counts outside `1..=31` are rejected.
    pub fn with_rounds(rounds: u8) -> Result<Self, RoundCountOutOfRange> {
        if (1..=ROUNDS).contains(&rounds) {
            Ok(Self { rounds })
        } else {
            Err(RoundCountOutOfRange)
        }
    }
}

impl Default for Present128 {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockEncrypt for Present128 {
    type EncryptionBlock = [u8; BLOCK_BYTES];
    type EncryptionKey = [u8; PRESENT128_KEY_BYTES];

    fn encrypt(&self, data: &mut Self::EncryptionBlock, key: &Self::EncryptionKey) {
        encrypt::<PRESENT128_KEY_BYTES, PRESENT128_KEY_WORDS>(data, key, self.rounds)
    }
}

impl BlockDecrypt for Present128 {
    type DecryptionBlock = [u8; BLOCK_BYTES];
    type DecryptionKey = [u8; PRESENT128_KEY_BYTES];

    fn decrypt(&self, data: &mut Self::DecryptionBlock, key: &Self::DecryptionKey) {
        decrypt::<PRESENT128_KEY_BYTES, PRESENT128_KEY_WORDS>(data, key, self.rounds)
    }
}

impl BlockCipher for Present128 {
    type Block = [u8; BLOCK_BYTES];
    type Key = [u8; PRESENT128_KEY_BYTES];
}

/// Returned when a requested round count falls outside `1..=31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundCountOutOfRange;

impl fmt::Display for RoundCountOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round count outside of 1..={ROUNDS}")
    }
}

/// PRESENT encryption routine defined in Section 3 of the specification.
///
/// Runs `rounds` rounds of [AddRoundKey](add_round_key),
/// [sBoxLayer](sub_layer), and [pLayer](permutation_layer) over the state,
/// updating the key register with [the schedule](update_key) between rounds,
/// and finishes with a whitening [AddRoundKey](add_round_key).
///
/// The state is transformed in place. The key register is copied onto the
/// stack first, so the caller's key bytes are left untouched.
pub fn encrypt<
    const KEY_BYTES: usize, // Key register size in bytes.
    const KEY_WORDS: usize, // KEY_BYTES / 2.
>(
    data: &mut [u8; BLOCK_BYTES],
    key: &[u8; KEY_BYTES],
    rounds: u8,
) {
    let mut subkey = *key;
    for round in 1..=rounds {
        add_round_key(data, &subkey);
        sub_layer(data);
        permutation_layer(data);
        update_key::<KEY_BYTES, KEY_WORDS>(&mut subkey, round);
    }
    add_round_key(data, &subkey);
}

/// PRESENT decryption routine, the mirror image of [`encrypt`].
///
/// The last round key of the encryption is needed first, so the key register
/// is walked through the whole forward schedule before the main loop. The
/// loop then strips one round at a time: undo the permutation, undo the
/// substitution, step the register back with [the reverse
/// schedule](update_key_reverse), and add the recovered round key.
pub fn decrypt<
    const KEY_BYTES: usize, // Key register size in bytes.
    const KEY_WORDS: usize, // KEY_BYTES / 2.
>(
    data: &mut [u8; BLOCK_BYTES],
    key: &[u8; KEY_BYTES],
    rounds: u8,
) {
    let mut subkey = *key;
    for round in 1..=rounds {
        update_key::<KEY_BYTES, KEY_WORDS>(&mut subkey, round);
    }
    add_round_key(data, &subkey);

    for round in (1..=rounds).rev() {
        inv_permutation_layer(data);
        inv_sub_layer(data);
        update_key_reverse::<KEY_BYTES, KEY_WORDS>(&mut subkey, round);
        add_round_key(data, &subkey);
    }
}

/// The AddRoundKey transformation.
///
/// XORs the top 64 bits of the key register into the state. In the
/// little-endian buffer layout those are the highest-addressed 8 bytes,
/// byte-aligned with the state.
pub fn add_round_key<const KEY_BYTES: usize>(
    data: &mut [u8; BLOCK_BYTES],
    key: &[u8; KEY_BYTES],
) {
    data.iter_mut()
        .zip(&key[KEY_BYTES - BLOCK_BYTES..])
        .for_each(|(b, k)| {
            *b ^= k;
        })
}

/// The sBoxLayer transformation.
///
/// Replaces each of the sixteen 4-bit nibbles of the state independently
/// with the corresponding nibble from the [S-box](S_BOX). Both nibbles of a
/// byte are looked up and reassembled in one step.
pub fn sub_layer(data: &mut [u8; BLOCK_BYTES]) {
    for b in data.iter_mut() {
        *b = S_BOX[usize::from(*b >> 4)] << 4 | S_BOX[usize::from(*b & 0x0f)];
    }
}

/// The inverse sBoxLayer transformation.
///
/// Replaces each nibble with the corresponding nibble from the [inverse
/// S-box](INV_S_BOX). Inverse of [`sub_layer`].
pub fn inv_sub_layer(data: &mut [u8; BLOCK_BYTES]) {
    for b in data.iter_mut() {
        *b = INV_S_BOX[usize::from(*b >> 4)] << 4 | INV_S_BOX[usize::from(*b & 0x0f)];
    }
}

/// The pLayer transformation, a fixed wire permutation of the 64 state bits.
///
/// The bit at position $i$ moves to position $P(i) = 16 i \bmod 63$, with
/// bit 63 fixed (bit 0 is fixed too, since $P(0) = 0$). Rather than walking
/// single bits through the formula, the state is gathered into four 16-bit
/// output words: input bits whose in-byte position has low nibble value $k$
/// all land in output word $k$, so word $k$ collects bit $k$ and bit $k + 4$
/// of every state byte, in byte order. The words are stored back through
/// explicit little-endian conversion.
#[docext]
pub fn permutation_layer(data: &mut [u8; BLOCK_BYTES]) {
    let mut words = [0u16; BLOCK_BYTES / 2];
    for (i, b) in data.iter().enumerate() {
        for (k, word) in words.iter_mut().enumerate() {
            *word |= u16::from(b >> k & 1) << (2 * i);
            *word |= u16::from(b >> (k + 4) & 1) << (2 * i + 1);
        }
    }
    for (pair, word) in data.chunks_exact_mut(2).zip(words) {
        pair.copy_from_slice(&word.to_le_bytes());
    }
}

/// The inverse pLayer transformation.
///
/// The bit at position $j$ moves back to position $P^{-1}(j) = 4 j \bmod
/// 63$, with bit 63 fixed. This scatters the four 16-bit words of the
/// permuted state back into bytes: byte $i$ recovers its bit $k$ and bit
/// $k + 4$ from bits $2 i$ and $2 i + 1$ of word $k$. Inverse of
/// [`permutation_layer`].
#[docext]
pub fn inv_permutation_layer(data: &mut [u8; BLOCK_BYTES]) {
    let mut words = [0u16; BLOCK_BYTES / 2];
    for (word, pair) in words.iter_mut().zip(data.chunks_exact(2)) {
        *word = u16::from_le_bytes([pair[0], pair[1]]);
    }
    for (i, b) in data.iter_mut().enumerate() {
        *b = 0;
        for (k, word) in words.iter().enumerate() {
            *b |= ((word >> (2 * i) & 1) as u8) << k;
            *b |= ((word >> (2 * i + 1) & 1) as u8) << (k + 4);
        }
    }
}

/// One forward step of the key schedule, defined in Section 3 of the
/// specification.
///
/// Rotates the key register left by 61 bits, substitutes the top nibble
/// through the [S-box](S_BOX) (the 128-bit schedule substitutes the top two
/// nibbles), and XORs the round counter into the register. The counter
/// spans bits 19..15 of the 80-bit register and bits 66..62 of the 128-bit
/// one.
pub fn update_key<
    const KEY_BYTES: usize, // Key register size in bytes.
    const KEY_WORDS: usize, // KEY_BYTES / 2.
>(
    key: &mut [u8; KEY_BYTES],
    round: u8,
) {
    // A left rotation by 61 is a right rotation by the remaining width.
    rotate_key_right::<KEY_BYTES, KEY_WORDS>(key, KEY_BYTES * 8 - 61);
    substitute_top_nibbles(key, &S_BOX);
    xor_round_counter(key, round);
}

/// One backward step of the key schedule.
///
/// Undoes [`update_key`] for the same round counter by applying the inverse
/// of each step in reverse order: XOR the counter back out (XOR is its own
/// inverse), substitute the top nibble(s) through the [inverse
/// S-box](INV_S_BOX), and rotate the register right by 61 bits.
pub fn update_key_reverse<
    const KEY_BYTES: usize, // Key register size in bytes.
    const KEY_WORDS: usize, // KEY_BYTES / 2.
>(
    key: &mut [u8; KEY_BYTES],
    round: u8,
) {
    xor_round_counter(key, round);
    substitute_top_nibbles(key, &INV_S_BOX);
    rotate_key_right::<KEY_BYTES, KEY_WORDS>(key, 61);
}

/// Substitute the most significant nibble of the key register, and in the
/// 128-bit schedule the nibble below it as well.
fn substitute_top_nibbles<const KEY_BYTES: usize>(key: &mut [u8; KEY_BYTES], sbox: &[u8; 16]) {
    let top = KEY_BYTES - 1;
    let high = sbox[usize::from(key[top] >> 4)];
    let low = if KEY_BYTES > PRESENT80_KEY_BYTES {
        sbox[usize::from(key[top] & 0x0f)]
    } else {
        key[top] & 0x0f
    };
    key[top] = high << 4 | low;
}

/// XOR the 5-bit round counter into the key register.
fn xor_round_counter<const KEY_BYTES: usize>(key: &mut [u8; KEY_BYTES], round: u8) {
    // The counter starts at bit 15 of the 80-bit register and bit 62 of the
    // 128-bit one, so it always straddles a byte boundary.
    let bit = if KEY_BYTES > PRESENT80_KEY_BYTES { 62 } else { 15 };
    key[bit / 8] ^= round << (bit % 8);
    key[bit / 8 + 1] ^= round >> (8 - bit % 8);
}

/// Rotate the key register right by `count` bits.
///
/// The register is viewed as little-endian 16-bit words, so the rotation
/// splits into a whole-word part and a bit part: word $i$ of the result
/// takes its low bits from word $i + \lfloor count / 16 \rfloor$ and its
/// high bits from the word after that, wrapping around the register. `count`
/// must not be a multiple of 16.
#[docext]
fn rotate_key_right<
    const KEY_BYTES: usize, // Key register size in bytes.
    const KEY_WORDS: usize, // KEY_BYTES / 2.
>(
    key: &mut [u8; KEY_BYTES],
    count: usize,
) {
    let words = load_key_words::<KEY_BYTES, KEY_WORDS>(key);
    let skip = count / 16;
    let bits = count % 16;
    let mut rotated = [0u16; KEY_WORDS];
    for (i, word) in rotated.iter_mut().enumerate() {
        *word = words[(i + skip) % KEY_WORDS] >> bits
            | words[(i + skip + 1) % KEY_WORDS] << (16 - bits);
    }
    store_key_words(key, &rotated);
}

fn load_key_words<const KEY_BYTES: usize, const KEY_WORDS: usize>(
    key: &[u8; KEY_BYTES],
) -> [u16; KEY_WORDS] {
    let mut words = [0; KEY_WORDS];
    for (word, pair) in words.iter_mut().zip(key.chunks_exact(2)) {
        *word = u16::from_le_bytes([pair[0], pair[1]]);
    }
    words
}

fn store_key_words<const KEY_BYTES: usize, const KEY_WORDS: usize>(
    key: &mut [u8; KEY_BYTES],
    words: &[u16; KEY_WORDS],
) {
    for (pair, word) in key.chunks_exact_mut(2).zip(words) {
        pair.copy_from_slice(&word.to_le_bytes());
    }
}
