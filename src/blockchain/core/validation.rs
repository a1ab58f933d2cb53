use crate::blockchain::core::block::Block;
use crate::error::ChainError;

/// Checks digest integrity of every block and the link from each block to its
/// parent. Proof-of-work targets are not re-checked here.
pub fn validate_chain(blocks: &[Block]) -> Result<(), ChainError> {
    if let Some(genesis) = blocks.first() {
        validate_digest(genesis)?;
    }

    for pair in blocks.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        validate_digest(current)?;
        if current.previous_digest() != previous.digest() {
            return Err(ChainError::InvalidBlockLinkage {
                index: current.index(),
            });
        }
    }
    Ok(())
}

fn validate_digest(block: &Block) -> Result<(), ChainError> {
    if block.calculate_digest() != block.digest() {
        return Err(ChainError::DigestMismatch {
            index: block.index(),
        });
    }
    Ok(())
}
