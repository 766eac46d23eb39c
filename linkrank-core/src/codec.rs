//! Request Codec
//!
//! Decodes the two mutation bodies the transport receives and encodes
//! rankings and mutation stats on the way back. Both JSON and MessagePack are accepted.
//!
//! - insert: a map of source document to its outlink list,
//!   `{"http://a/": ["http://b/", "http://c/"]}`
//! - delete: a list of documents, `["http://a/"]`
//!
//! Decoding happens before the graph is locked, so a malformed body never
//! touches the graph. Map entries keep their order from the body.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::{MutationStats, NodeId, OutlinkBatch};
use crate::rank::Ranking;

/// Wire format of a request or response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Json,
    MessagePack,
}

impl Encoding {
    /// Pick the encoding for a `Content-Type` header value.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type.split(';').next()?.trim();
        match mime {
            "application/json" | "text/json" => Some(Encoding::Json),
            "application/msgpack" | "application/x-msgpack" | "application/vnd.msgpack" => {
                Some(Encoding::MessagePack)
            }
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Encoding::Json => "application/json",
            Encoding::MessagePack => "application/msgpack",
        }
    }

    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> {
        match self {
            Encoding::Json => Ok(serde_json::from_slice(body)?),
            Encoding::MessagePack => Ok(rmp_serde::from_slice(body)?),
        }
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let encoded = match self {
            Encoding::Json => serde_json::to_vec(value).map_err(|e| e.to_string()),
            Encoding::MessagePack => rmp_serde::to_vec_named(value).map_err(|e| e.to_string()),
        };
        encoded.map_err(GraphError::Encode)
    }
}

/// Decode an insert body.
pub fn decode_outlinks(body: &[u8], encoding: Encoding) -> Result<OutlinkBatch> {
    encoding.decode(body)
}

/// Decode a delete body.
pub fn decode_ids(body: &[u8], encoding: Encoding) -> Result<Vec<NodeId>> {
    encoding.decode(body)
}

/// Encode a ranking as a list of `{id, score}` entries.
pub fn encode_ranking(ranking: &Ranking, encoding: Encoding) -> Result<Vec<u8>> {
    encoding.encode(ranking)
}

/// Encode the outcome of an insert or delete.
pub fn encode_stats(stats: &MutationStats, encoding: Encoding) -> Result<Vec<u8>> {
    encoding.encode(stats)
}
