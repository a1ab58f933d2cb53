use crate::hash::digest_parts;
use crate::miner::mine_block;
use chrono::{DateTime, Utc};

/// Previous digest recorded by the genesis block.
pub const GENESIS_PREVIOUS_DIGEST: &str = "0";
/// Sole message carried by the genesis block.
pub const GENESIS_MESSAGE: &str = "Genesis block";

/// The hashed content of a block, everything except the nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFields {
    pub index: u64,
    /// Unix time in milliseconds.
    pub timestamp: u64,
    pub previous_digest: String,
    pub payload: Vec<String>,
}

impl BlockFields {
    /// Length-prefixed encoding of the fields. The nonce is appended after
    /// this prefix when hashing, so miners can encode once per block.
    pub fn encode_prefix(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64 + self.previous_digest.len());
        buf.extend_from_slice(&self.index.to_le_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        put_bytes(&mut buf, self.previous_digest.as_bytes());
        buf.extend_from_slice(&(self.payload.len() as u64).to_le_bytes());
        for message in &self.payload {
            put_bytes(&mut buf, message.as_bytes());
        }
        buf
    }

    pub fn digest_with_nonce(&self, nonce: u64) -> String {
        let prefix = self.encode_prefix();
        digest_parts(&[prefix.as_slice(), nonce.to_le_bytes().as_slice()])
    }
}

fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
    buf.extend_from_slice(bytes);
}

/// A block of messages. Fields are only reachable through accessors, so a
/// block handed out by the ledger cannot be altered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub(crate) fields: BlockFields,
    pub(crate) nonce: u64,
    pub(crate) digest: String,
}

impl Block {
    /// Builds an unmined block with nonce 0 and its digest already computed.
    pub fn new(
        index: u64,
        timestamp: u64,
        previous_digest: impl Into<String>,
        payload: Vec<String>,
    ) -> Self {
        Self::from_fields(BlockFields {
            index,
            timestamp,
            previous_digest: previous_digest.into(),
            payload,
        })
    }

    pub fn from_fields(fields: BlockFields) -> Self {
        Self::from_parts(fields, 0)
    }

    pub(crate) fn from_parts(fields: BlockFields, nonce: u64) -> Self {
        let digest = fields.digest_with_nonce(nonce);
        Block {
            fields,
            nonce,
            digest,
        }
    }

    pub fn genesis(timestamp: u64) -> Self {
        Block::new(
            0,
            timestamp,
            GENESIS_PREVIOUS_DIGEST,
            vec![GENESIS_MESSAGE.to_string()],
        )
    }

    /// Recomputes the digest from the stored fields and nonce.
    pub fn calculate_digest(&self) -> String {
        self.fields.digest_with_nonce(self.nonce)
    }

    /// Consumes the candidate and returns it with a nonce whose digest starts
    /// with `difficulty` zero hex characters.
    pub fn mine(self, difficulty: u32) -> Block {
        mine_block(self.fields, difficulty)
    }

    pub fn fields(&self) -> &BlockFields {
        &self.fields
    }

    pub fn index(&self) -> u64 {
        self.fields.index
    }

    pub fn timestamp(&self) -> u64 {
        self.fields.timestamp
    }

    /// The timestamp as a calendar time, or `None` when the stored
    /// milliseconds fall outside the range chrono can represent.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.fields.timestamp)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn previous_digest(&self) -> &str {
        &self.fields.previous_digest
    }

    pub fn payload(&self) -> &[String] {
        &self.fields.payload
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}
