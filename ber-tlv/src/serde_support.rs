//! Serde adapters for byte payloads

pub(crate) mod bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(value: &::bytes::Bytes, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serde_bytes::serialize(&value[..], serializer)
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<::bytes::Bytes, D::Error>
    where
        D: Deserializer<'de>,
    {
        let buf = serde_bytes::ByteBuf::deserialize(deserializer)?;
        Ok(::bytes::Bytes::from(buf.into_vec()))
    }
}
