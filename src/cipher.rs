mod block;

pub use block::{
    present,
    BlockCipher,
    BlockDecrypt,
    BlockEncrypt,
    Present128,
    Present80,
    RoundCountOutOfRange,
};
