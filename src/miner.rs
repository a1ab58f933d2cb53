//! Proof-of-work nonce search

use crate::blockchain::{Block, BlockFields};
use crate::hash::{digest_parts, meets_difficulty};
use std::time::Instant;
use tracing::{debug, info};

/// Searches nonces 0, 1, 2, ... until the digest of `fields` meets `difficulty`.
///
/// The fields are encoded once and only the nonce suffix changes per attempt.
/// There is no upper bound on the number of attempts; a difficulty above the
/// digest length never terminates.
pub fn search_nonce(fields: &BlockFields, difficulty: u32) -> (u64, String) {
    let prefix = fields.encode_prefix();
    let mut nonce: u64 = 0;
    loop {
        let digest = digest_parts(&[prefix.as_slice(), nonce.to_le_bytes().as_slice()]);
        if meets_difficulty(&digest, difficulty) {
            return (nonce, digest);
        }
        nonce = nonce.wrapping_add(1);
    }
}

/// Mines `fields` into a finished block.
pub fn mine_block(fields: BlockFields, difficulty: u32) -> Block {
    debug!(index = fields.index, difficulty, "mining block");
    let start_time = Instant::now();
    let (nonce, digest) = search_nonce(&fields, difficulty);
    info!(
        index = fields.index,
        nonce,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Block mined: {}",
        digest
    );
    let block = Block::from_parts(fields, nonce);
    debug_assert_eq!(block.digest(), digest);
    block
}
