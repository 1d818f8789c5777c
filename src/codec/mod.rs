//! Boundary codec — the lossless (structure, bytes) ↔ wire round trip.
//!
//! The wire layout of [`JsonWireCodec`] is a length-prefixed frame:
//!
//! ```text
//! [header_len: u32 LE][structure header: JSON][payload bytes]
//! ```
//!
//! The header is the serialized [`Structure`] of the payload; decode
//! re-derives the expected payload length from it and refuses frames whose
//! payload does not match, so a corrupted round trip can never yield a
//! mis-sized array.

use tracing::trace;

use crate::adapter::Block;
use crate::model::Structure;
use crate::{Error, Result};

/// Size of the header-length prefix.
const HEADER_LEN_SIZE: usize = 4;

// ============================================================================
// Codec Trait
// ============================================================================

/// Turns a structure + byte buffer into a wire representation and back.
///
/// Implementations must be lossless for every supported kind, item width,
/// and shape — including zero-dimensional scalars and empty selections.
pub trait Codec: Send + Sync + 'static {
    fn encode(&self, block: &Block) -> Result<Vec<u8>>;
    fn decode(&self, wire: &[u8]) -> Result<Block>;
}

// ============================================================================
// JsonWireCodec
// ============================================================================

/// Reference codec: JSON structure header, raw payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWireCodec;

impl JsonWireCodec {
    pub fn new() -> Self {
        JsonWireCodec
    }
}

impl Codec for JsonWireCodec {
    fn encode(&self, block: &Block) -> Result<Vec<u8>> {
        // never emit a frame whose header lies about its payload
        block.validate()?;
        let header = serde_json::to_vec(&block.structure)?;
        let mut wire =
            Vec::with_capacity(HEADER_LEN_SIZE + header.len() + block.data.len());
        wire.extend_from_slice(&(header.len() as u32).to_le_bytes());
        wire.extend_from_slice(&header);
        wire.extend_from_slice(&block.data);
        trace!(header_len = header.len(), wire_len = wire.len(), "encoded block");
        Ok(wire)
    }

    fn decode(&self, wire: &[u8]) -> Result<Block> {
        if wire.len() < HEADER_LEN_SIZE {
            return Err(Error::MalformedFrame(format!(
                "frame is {} bytes, need at least {HEADER_LEN_SIZE}",
                wire.len()
            )));
        }
        let mut len_buf = [0u8; HEADER_LEN_SIZE];
        len_buf.copy_from_slice(&wire[..HEADER_LEN_SIZE]);
        let header_len = u32::from_le_bytes(len_buf) as usize;

        if wire.len() < HEADER_LEN_SIZE + header_len {
            return Err(Error::MalformedFrame(format!(
                "header length {header_len} exceeds frame of {} bytes",
                wire.len()
            )));
        }

        let structure: Structure =
            serde_json::from_slice(&wire[HEADER_LEN_SIZE..HEADER_LEN_SIZE + header_len])?;
        let data = wire[HEADER_LEN_SIZE + header_len..].to_vec();
        trace!(payload_len = data.len(), "decoded block");

        let block = Block { structure, data };
        // truncated or padded payloads surface here, not as a wrong array
        block.validate()?;
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::adapter::{Adapter, ArrayAdapter};
    use crate::model::Array;
    use crate::slice::Slice;

    use super::*;

    fn sample_block() -> Block {
        ArrayAdapter::from_array(Array::from_vec((0u16..6).collect()))
            .unwrap()
            .read(&Slice::all())
            .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let block = sample_block();
        let codec = JsonWireCodec::new();
        let wire = codec.encode(&block).unwrap();
        let decoded = codec.decode(&wire).unwrap();
        assert_eq!(decoded, block);
    }

    #[test]
    fn test_scalar_round_trip() {
        let block = ArrayAdapter::from_array(Array::scalar(true))
            .unwrap()
            .read(&Slice::all())
            .unwrap();
        let codec = JsonWireCodec::new();
        let decoded = codec.decode(&codec.encode(&block).unwrap()).unwrap();
        assert_eq!(decoded, block);
        assert!(decoded.structure.as_array().unwrap().is_scalar());
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let codec = JsonWireCodec::new();
        let mut wire = codec.encode(&sample_block()).unwrap();
        wire.pop();
        assert!(matches!(
            codec.decode(&wire),
            Err(Error::StructureMismatch { .. })
        ));
    }

    #[test]
    fn test_garbage_header_rejected() {
        let codec = JsonWireCodec::new();
        let mut wire = codec.encode(&sample_block()).unwrap();
        wire[HEADER_LEN_SIZE] = b'!';
        assert!(matches!(codec.decode(&wire), Err(Error::Codec(_))));
    }

    #[test]
    fn test_short_frame_rejected() {
        let codec = JsonWireCodec::new();
        assert!(matches!(
            codec.decode(&[0, 1]),
            Err(Error::MalformedFrame(_))
        ));
        // header length pointing past the end of the frame
        let wire = u32::MAX.to_le_bytes().to_vec();
        assert!(matches!(codec.decode(&wire), Err(Error::MalformedFrame(_))));
    }

    #[test]
    fn test_mismatched_block_refused_at_encode() {
        let mut block = sample_block();
        block.data.pop();
        assert!(matches!(
            JsonWireCodec::new().encode(&block),
            Err(Error::StructureMismatch { .. })
        ));
    }
}
