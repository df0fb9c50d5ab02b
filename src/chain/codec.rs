//! ABI codec
//!
//! Thin schema layer over `alloy-dyn-abi`: every call result is decoded
//! against an explicit list of [`TypeTag`]s, and any mismatch between the
//! schema and the bytes returned by the node is a hard [`CodecError`].

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{keccak256, Address, Bytes, U256};
use std::fmt;
use thiserror::Error;

// ============================================
// TYPES
// ============================================

/// ABI type of one value in a call result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Address,
    /// Unsigned integer of the given bit width (8..=256, multiple of 8)
    Uint(usize),
    String,
}

impl TypeTag {
    pub const UINT8: TypeTag = TypeTag::Uint(8);
    pub const UINT32: TypeTag = TypeTag::Uint(32);
    pub const UINT112: TypeTag = TypeTag::Uint(112);
    pub const UINT256: TypeTag = TypeTag::Uint(256);

    fn is_dynamic(&self) -> bool {
        matches!(self, TypeTag::String)
    }

    /// Wire type used when decoding. Addresses are read as whole words and
    /// strings as raw bytes so both can be checked in [`from_sol_value`].
    fn decode_type(&self) -> DynSolType {
        match self {
            TypeTag::Address => DynSolType::Uint(256),
            TypeTag::Uint(bits) => DynSolType::Uint(*bits),
            TypeTag::String => DynSolType::Bytes,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Address => write!(f, "address"),
            TypeTag::Uint(bits) => write!(f, "uint{}", bits),
            TypeTag::String => write!(f, "string"),
        }
    }
}

/// A decoded (or to-be-encoded) ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Address(Address),
    Uint(U256, usize),
    String(String),
}

impl AbiValue {
    pub fn as_address(&self) -> Option<Address> {
        match self {
            AbiValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(v, _) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn to_sol_value(&self) -> DynSolValue {
        match self {
            AbiValue::Address(a) => DynSolValue::Address(*a),
            AbiValue::Uint(v, bits) => DynSolValue::Uint(*v, *bits),
            AbiValue::String(s) => DynSolValue::String(s.clone()),
        }
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("expected {expected} bytes for static schema, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("value #{index} does not fit in uint{bits}")]
    ValueOutOfRange { index: usize, bits: usize },

    #[error("value #{index} has non-zero bits above the 20-byte address")]
    DirtyAddress { index: usize },

    #[error("value #{index} is not valid UTF-8")]
    InvalidUtf8 { index: usize },

    #[error("value #{index} is not a {expected}")]
    UnexpectedType { index: usize, expected: TypeTag },

    #[error("malformed ABI data: {0}")]
    Malformed(#[from] alloy_dyn_abi::Error),
}

// ============================================
// ENCODING
// ============================================

/// Selector of `signature` followed by the encoded arguments.
pub fn encode_call(signature: &str, args: &[AbiValue]) -> Bytes {
    let selector = &keccak256(signature.as_bytes())[..4];
    let mut data = Vec::with_capacity(4 + 32 * args.len());
    data.extend_from_slice(selector);
    data.extend_from_slice(&encode_tuple(args));
    data.into()
}

/// Parameter encoding of `values`, the layout a contract uses for its returns.
pub fn encode_tuple(values: &[AbiValue]) -> Bytes {
    if values.is_empty() {
        return Bytes::new();
    }
    let tuple = DynSolValue::Tuple(values.iter().map(AbiValue::to_sol_value).collect());
    tuple.abi_encode_params().into()
}

// ============================================
// DECODING
// ============================================

/// Decodes `data` against `types`.
pub fn decode(types: &[TypeTag], data: &[u8]) -> Result<Vec<AbiValue>, CodecError> {
    if !types.iter().any(TypeTag::is_dynamic) {
        let expected = 32 * types.len();
        if data.len() != expected {
            return Err(CodecError::LengthMismatch { expected, actual: data.len() });
        }
    }

    let schema = DynSolType::Tuple(types.iter().map(TypeTag::decode_type).collect());
    let decoded = schema.abi_decode_params(data)?;

    let values = match decoded {
        DynSolValue::Tuple(values) => values,
        other => vec![other],
    };

    types
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (tag, value))| from_sol_value(index, *tag, value))
        .collect()
}

fn from_sol_value(index: usize, tag: TypeTag, value: DynSolValue) -> Result<AbiValue, CodecError> {
    match (tag, value) {
        (TypeTag::Address, DynSolValue::Uint(word, _)) => {
            if word.bit_len() > 160 {
                return Err(CodecError::DirtyAddress { index });
            }
            Ok(AbiValue::Address(Address::from_slice(&word.to_be_bytes::<32>()[12..])))
        }
        (TypeTag::Uint(bits), DynSolValue::Uint(v, _)) => {
            if v.bit_len() > bits {
                return Err(CodecError::ValueOutOfRange { index, bits });
            }
            Ok(AbiValue::Uint(v, bits))
        }
        (TypeTag::String, DynSolValue::Bytes(raw)) => String::from_utf8(raw)
            .map(AbiValue::String)
            .map_err(|_| CodecError::InvalidUtf8 { index }),
        (expected, _) => Err(CodecError::UnexpectedType { index, expected }),
    }
}
