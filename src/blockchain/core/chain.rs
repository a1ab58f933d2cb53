use crate::blockchain::core::block::Block;
use crate::blockchain::core::validation::validate_chain;
use crate::error::ChainError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Difficulty used when no configuration overrides it.
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Read-only copy of a block for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub index: u64,
    /// Unix time in milliseconds, exactly as hashed.
    pub timestamp_ms: u64,
    /// Calendar form of `timestamp_ms`; absent if chrono cannot represent it.
    pub timestamp: Option<DateTime<Utc>>,
    pub previous_digest: String,
    pub digest: String,
    pub payload: Vec<String>,
}

impl From<&Block> for BlockSummary {
    fn from(block: &Block) -> Self {
        BlockSummary {
            index: block.index(),
            timestamp_ms: block.timestamp(),
            timestamp: block.timestamp_utc(),
            previous_digest: block.previous_digest().to_string(),
            digest: block.digest().to_string(),
            payload: block.payload().to_vec(),
        }
    }
}

/// Append-only chain of mined message blocks plus the roster of members.
///
/// The chain always starts with the genesis block, which is not mined.
/// Every later block is mined at `difficulty` before it becomes visible.
#[derive(Debug, Clone)]
pub struct Ledger {
    blocks: Vec<Block>,
    members: Vec<String>,
    difficulty: u32,
}

impl Ledger {
    pub fn new(difficulty: u32) -> Self {
        let genesis = Block::genesis(now_millis());
        info!(difficulty, "created ledger, genesis {}", genesis.digest());
        Ledger {
            blocks: vec![genesis],
            members: Vec::new(),
            difficulty,
        }
    }

    /// Registers a participant. Names are not checked for uniqueness.
    pub fn add_member(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!(member = %name, "registered member");
        self.members.push(name);
    }

    /// Mines a block carrying `payload` on top of the tip and appends it.
    ///
    /// Blocks the caller until proof-of-work completes.
    pub fn add_record(&mut self, payload: Vec<String>) -> &Block {
        let tip = self.tip();
        let timestamp = now_millis().max(tip.timestamp());
        let candidate = Block::new(tip.index() + 1, timestamp, tip.digest(), payload);

        let block = candidate.mine(self.difficulty);
        info!(
            index = block.index(),
            messages = block.payload().len(),
            "appended block {}",
            block.digest()
        );
        self.blocks.push(block);
        self.tip()
    }

    /// Like [`Ledger::is_valid`], but names the first block that fails.
    pub fn validate(&self) -> Result<(), ChainError> {
        let result = validate_chain(&self.blocks);
        if let Err(err) = &result {
            warn!("chain validation failed: {}", err);
        }
        result
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn snapshot(&self) -> Vec<BlockSummary> {
        self.blocks.iter().map(BlockSummary::from).collect()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: the genesis block is present from construction.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn tip(&self) -> &Block {
        // The genesis block is never removed.
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(DEFAULT_DIFFICULTY)
    }
}

fn now_millis() -> u64 {
    Utc::now().timestamp_millis() as u64
}
