use std::fmt;

use rand::RngCore;

use crate::cbor::Cbor;
use crate::error::CborError;
use crate::tags::TAG_CID;

/// Correlation id binding a response to the request it answers.
///
/// 32 random bytes; carries no meaning beyond identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cid([u8; 32]);

impl Cid {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CborError> {
        if hex.len() != 64 || !hex.is_ascii() {
            return Err(CborError::InvalidLength {
                what: "cid hex",
                expected: 64,
                found: hex.len(),
            });
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|e| CborError::Unsupported(format!("cid hex: {}", e)))?;
        }
        Ok(Self(bytes))
    }

    /// First 8 hex characters.
    pub fn short_id(&self) -> String {
        self.to_hex()[..8].to_string()
    }

    pub fn to_cbor(&self) -> Cbor {
        Cbor::tagged(TAG_CID, self.0.to_vec())
    }
}

impl Default for Cid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cid({})", self.to_hex())
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CID({})", self.short_id())
    }
}

impl From<Cid> for Cbor {
    fn from(cid: Cid) -> Self {
        cid.to_cbor()
    }
}

impl From<&Cid> for Cbor {
    fn from(cid: &Cid) -> Self {
        cid.to_cbor()
    }
}

impl TryFrom<Cbor> for Cid {
    type Error = CborError;

    fn try_from(cbor: Cbor) -> Result<Self, Self::Error> {
        match cbor.expect_tag(TAG_CID)? {
            Cbor::Bytes(bytes) => {
                let bytes: [u8; 32] =
                    bytes
                        .as_slice()
                        .try_into()
                        .map_err(|_| CborError::InvalidLength {
                            what: "cid",
                            expected: 32,
                            found: bytes.len(),
                        })?;
                Ok(Self(bytes))
            }
            other => Err(CborError::WrongType {
                expected: "bytes",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_unique() {
        assert_ne!(Cid::new(), Cid::new());
    }

    #[test]
    fn hex_roundtrip() {
        let cid = Cid::new();
        assert_eq!(Cid::from_hex(&cid.to_hex()).unwrap(), cid);
        assert!(Cid::from_hex("abc").is_err());
        assert!(Cid::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn cbor_roundtrip() {
        let cid = Cid::from_bytes([7u8; 32]);
        let cbor = cid.to_cbor();
        assert_eq!(cbor.as_tagged().map(|(t, _)| t), Some(TAG_CID));
        assert_eq!(Cid::try_from(cbor).unwrap(), cid);
    }

    #[test]
    fn cbor_rejects_short_payload() {
        let cbor = Cbor::tagged(TAG_CID, vec![1u8, 2, 3]);
        assert!(matches!(
            Cid::try_from(cbor),
            Err(CborError::InvalidLength { found: 3, .. })
        ));
    }

    #[test]
    fn display_is_short() {
        let cid = Cid::from_bytes([0xab; 32]);
        assert_eq!(cid.to_string(), "CID(abababab)");
    }
}
