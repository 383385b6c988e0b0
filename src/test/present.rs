//! Tests for the PRESENT block cipher. The known-answer vectors are the
//! ones published with the cipher, rendered byte-by-byte in the
//! little-endian buffer convention. The randomized tests ensure that
//! ```
//! decrypt(encrypt(plaintext, key)) == plaintext
//! ```
//! and the other way around, for both key widths and for reduced round
//! counts.

use {
    crate::{
        present::{self, BLOCK_BYTES, INV_S_BOX, S_BOX},
        BlockCipher,
        BlockDecrypt,
        BlockEncrypt,
        Present128,
        Present80,
    },
    core::fmt,
    rand::{
        distributions::{Distribution, Standard},
        Rng,
    },
};

/// The 80-bit test vectors from the paper's appendix.
const VECTORS_80: [([u8; 8], [u8; 10], [u8; 8]); 4] = [
    (
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        [0x45, 0x84, 0x22, 0x7b, 0x38, 0xc1, 0x79, 0x55],
    ),
    (
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        [0x49, 0x50, 0x94, 0xf5, 0xc0, 0x46, 0x2c, 0xe7],
    ),
    (
        [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        [0x7b, 0x41, 0x68, 0x2f, 0xc7, 0xff, 0x12, 0xa1],
    ),
    (
        [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff],
        [0xd2, 0x10, 0x32, 0x21, 0xd3, 0xdc, 0x33, 0x33],
    ),
];

/// The 128-bit vectors for the same plaintext and key patterns, as produced
/// by the reference implementation.
const VECTORS_128: [([u8; 8], [u8; 16], [u8; 8]); 4] = [
    (
        [0x00; 8],
        [0x00; 16],
        [0xaf, 0x00, 0x69, 0x2e, 0x2a, 0x70, 0xdb, 0x96],
    ),
    (
        [0x00; 8],
        [0xff; 16],
        [0xd8, 0xa5, 0x72, 0x02, 0x71, 0x8c, 0x23, 0x13],
    ),
    (
        [0xff; 8],
        [0x00; 16],
        [0x63, 0xd5, 0xed, 0xe5, 0xe5, 0x19, 0x60, 0x3c],
    ),
    (
        [0xff; 8],
        [0xff; 16],
        [0xb4, 0xe5, 0x18, 0x42, 0xbd, 0x9f, 0x8d, 0x62],
    ),
];

#[test]
fn present_80_known_answers() {
    let cipher = Present80::new();
    for (plaintext, key, ciphertext) in VECTORS_80 {
        let mut block = plaintext;
        cipher.encrypt(&mut block, &key);
        assert_eq!(block, ciphertext, "wrong ciphertext for key {key:02x?}");
        cipher.decrypt(&mut block, &key);
        assert_eq!(block, plaintext, "wrong plaintext for key {key:02x?}");
    }
}

#[test]
fn present_128_known_answers() {
    let cipher = Present128::new();
    for (plaintext, key, ciphertext) in VECTORS_128 {
        let mut block = plaintext;
        cipher.encrypt(&mut block, &key);
        assert_eq!(block, ciphertext, "wrong ciphertext for key {key:02x?}");
        cipher.decrypt(&mut block, &key);
        assert_eq!(block, plaintext, "wrong plaintext for key {key:02x?}");
    }
}

#[test]
fn present_80_round_trip() {
    round_trip(Present80::new(), 10_000);
}

#[test]
fn present_128_round_trip() {
    round_trip(Present128::new(), 10_000);
}

#[test]
fn reduced_round_variants_invert() {
    for rounds in [1, 16, 31] {
        round_trip(Present80::with_rounds(rounds).unwrap(), 100);
        round_trip(Present128::with_rounds(rounds).unwrap(), 100);
    }
}

#[test]
fn out_of_range_round_counts_are_rejected() {
    assert!(Present80::with_rounds(0).is_err());
    assert!(Present80::with_rounds(32).is_err());
    assert!(Present128::with_rounds(0).is_err());
    assert!(Present128::with_rounds(32).is_err());
}

#[test]
fn sbox_is_a_bijection() {
    for nibble in 0u8..16 {
        assert_eq!(INV_S_BOX[usize::from(S_BOX[usize::from(nibble)])], nibble);
        assert_eq!(S_BOX[usize::from(INV_S_BOX[usize::from(nibble)])], nibble);
    }
}

#[test]
fn permutation_is_a_bijection() {
    // Walk a single set bit through every position.
    for bit in 0..64 {
        let mut block = [0u8; BLOCK_BYTES];
        block[bit / 8] = 1 << (bit % 8);
        let original = block;
        present::permutation_layer(&mut block);
        present::inv_permutation_layer(&mut block);
        assert_eq!(block, original, "bit {bit} did not return to its position");
    }
}

#[test]
fn permutation_fixes_the_outermost_bits() {
    // Bits 0 and 63 are the fixed points of the permutation.
    let mut block = [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80];
    present::permutation_layer(&mut block);
    assert_eq!(block, [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80]);
}

#[test]
fn key_schedule_inverts() {
    let mut rng = rand::thread_rng();
    for round in 1..=present::ROUNDS {
        let key: [u8; 10] = rng.gen();
        let mut register = key;
        present::update_key::<10, 5>(&mut register, round);
        present::update_key_reverse::<10, 5>(&mut register, round);
        assert_eq!(register, key, "80-bit schedule did not invert at round {round}");

        let key: [u8; 16] = rng.gen();
        let mut register = key;
        present::update_key::<16, 8>(&mut register, round);
        present::update_key_reverse::<16, 8>(&mut register, round);
        assert_eq!(register, key, "128-bit schedule did not invert at round {round}");
    }
}

#[test]
fn zero_key_still_diffuses() {
    let mut block = [0; BLOCK_BYTES];
    Present80::new().encrypt(&mut block, &[0; 10]);
    assert_ne!(block, [0; BLOCK_BYTES]);
}

/// Test that a block cipher is invertible by making sure that
/// ```
/// decrypt(encrypt(plaintext, key)) == plaintext
/// ```
/// and vice versa for `iterations` random plaintext/key pairs.
fn round_trip<Cip>(cip: Cip, iterations: usize)
where
    Cip: BlockCipher<Block = [u8; BLOCK_BYTES]>,
    Cip::Key: fmt::Debug + Copy,
    Standard: Distribution<Cip::Key>,
{
    let mut rng = rand::thread_rng();
    for _ in 0..iterations {
        let plaintext = rng.gen::<[u8; BLOCK_BYTES]>();
        let key = rng.gen::<Cip::Key>();

        let mut block = plaintext;
        cip.encrypt(&mut block, &key);
        cip.decrypt(&mut block, &key);
        assert_eq!(
            block, plaintext,
            "decrypt(encrypt(..)) was not the identity for key {key:?}"
        );

        let mut block = plaintext;
        cip.decrypt(&mut block, &key);
        cip.encrypt(&mut block, &key);
        assert_eq!(
            block, plaintext,
            "encrypt(decrypt(..)) was not the identity for key {key:?}"
        );
    }
}
