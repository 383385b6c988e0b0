pub mod present;

pub use present::{Present128, Present80, RoundCountOutOfRange};

/// A block cipher encrypts and decrypts data in blocks of fixed size.
///
/// A block cipher alone cannot handle data of arbitrary length. Chaining
/// blocks together is the job of a mode of operation, which is deliberately
/// out of scope for this crate: the types here are raw block primitives.
///
/// The encrypt and decrypt methods must be inverses of each other for every
/// key: decrypting an encrypted block with the same key yields the original
/// block.
pub trait BlockCipher:
    BlockEncrypt<EncryptionBlock = Self::Block, EncryptionKey = Self::Key>
    + BlockDecrypt<DecryptionBlock = Self::Block, DecryptionKey = Self::Key>
{
    type Block;
    type Key;
}

/// The encryption half of a [block cipher](BlockCipher).
pub trait BlockEncrypt {
    type EncryptionBlock;
    type EncryptionKey;

    /// Encrypt the plaintext block in place. The key is only read.
    fn encrypt(&self, data: &mut Self::EncryptionBlock, key: &Self::EncryptionKey);
}

/// The decryption half of a [block cipher](BlockCipher).
pub trait BlockDecrypt {
    type DecryptionBlock;
    type DecryptionKey;

    /// Decrypt the ciphertext block in place. The key is only read.
    fn decrypt(&self, data: &mut Self::DecryptionBlock, key: &Self::DecryptionKey);
}
