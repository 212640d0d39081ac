//! JSON allocation lists
//!
//! ```json
//! [
//!   { "address": "0x70997970c51812dc3a010c7d01b50e0d17dc79c8", "quota": 2 },
//!   { "address": "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc", "quota": "18446744073709551615" }
//! ]
//! ```

use serde::Deserialize;

use crate::{
    error::Result,
    leaf::{Entry, parse_quota},
    types::parse_address,
};

#[derive(Debug, Deserialize)]
struct RawAllocation {
    address: String,
    quota: RawQuota,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawQuota {
    Number(u64),
    Text(String),
}

/// Parse a JSON allocation list into entries, preserving order.
pub fn parse_allocations(json: &str) -> Result<Vec<Entry>> {
    let raw: Vec<RawAllocation> = serde_json::from_str(json)?;
    raw.into_iter()
        .map(|allocation| {
            let identity = parse_address(&allocation.address)?;
            let quota = match allocation.quota {
                RawQuota::Number(quota) => quota,
                RawQuota::Text(text) => parse_quota(&text)?,
            };
            Ok(Entry::new(identity, quota))
        })
        .collect()
}
