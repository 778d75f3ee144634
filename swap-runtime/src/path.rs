//! Packed Uniswap V3 router paths.
//!
//! A path is `token0 ++ fee0 ++ token1 ++ fee1 ++ ... ++ tokenN`, where each
//! token is its 20-byte address and each fee a 3-byte big-endian `uint24`.
//! The router parses this layout byte for byte.

use alloy::primitives::{Address, Bytes};

use crate::error::RoutingError;
use crate::types::FeeTier;

const ADDR_SIZE: usize = 20;
const FEE_SIZE: usize = 3;
const HOP_SIZE: usize = ADDR_SIZE + FEE_SIZE;

/// A single decoded `(token_in, fee, token_out)` segment of a packed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathHop {
    pub token_in: Address,
    pub fee: FeeTier,
    pub token_out: Address,
}

/// Encode an ordered token list and per-hop fees into a router path.
///
/// Requires at least two tokens and exactly one fee per hop.
pub fn encode_path(tokens: &[Address], fees: &[FeeTier]) -> Result<Bytes, RoutingError> {
    if tokens.len() < 2 || fees.len() != tokens.len() - 1 {
        return Err(RoutingError::ShapeMismatch {
            tokens: tokens.len(),
            fees: fees.len(),
            expected: tokens.len().saturating_sub(1),
        });
    }

    let mut encoded = Vec::with_capacity(ADDR_SIZE + fees.len() * HOP_SIZE);
    for (token, fee) in tokens.iter().zip(fees) {
        encoded.extend_from_slice(token.as_slice());
        encoded.extend_from_slice(&fee.as_u32().to_be_bytes()[1..]);
    }
    encoded.extend_from_slice(tokens[tokens.len() - 1].as_slice());

    Ok(Bytes::from(encoded))
}

/// Decode a packed router path back into its hops.
pub fn decode_path(path: &[u8]) -> Result<Vec<PathHop>, RoutingError> {
    if path.len() < ADDR_SIZE + HOP_SIZE || (path.len() - ADDR_SIZE) % HOP_SIZE != 0 {
        return Err(RoutingError::MalformedPath(format!(
            "length {} is not 20 + 23·n bytes",
            path.len()
        )));
    }

    let hops = (path.len() - ADDR_SIZE) / HOP_SIZE;
    let mut decoded = Vec::with_capacity(hops);
    for i in 0..hops {
        let start = i * HOP_SIZE;
        let token_in = Address::from_slice(&path[start..start + ADDR_SIZE]);
        let fee_bytes = &path[start + ADDR_SIZE..start + HOP_SIZE];
        let raw_fee = u32::from_be_bytes([0, fee_bytes[0], fee_bytes[1], fee_bytes[2]]);
        let fee = FeeTier::try_from(raw_fee)
            .map_err(|_| RoutingError::MalformedPath(format!("hop {i} has fee {raw_fee}")))?;
        let token_out = Address::from_slice(&path[start + HOP_SIZE..start + HOP_SIZE + ADDR_SIZE]);
        decoded.push(PathHop {
            token_in,
            fee,
            token_out,
        });
    }
    Ok(decoded)
}

/// Number of pools a packed path traverses.
pub fn hop_count(path: &[u8]) -> Result<usize, RoutingError> {
    decode_path(path).map(|hops| hops.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const A: Address = address!("0x1111111111111111111111111111111111111111");
    const B: Address = address!("0x2222222222222222222222222222222222222222");
    const C: Address = address!("0x3333333333333333333333333333333333333333");

    #[test]
    fn test_encode_two_hop_layout() {
        let path = encode_path(&[A, B, C], &[FeeTier::Low, FeeTier::Medium]).unwrap();
        assert_eq!(path.len(), 66);

        let mut expected = Vec::new();
        expected.extend_from_slice(A.as_slice());
        expected.extend_from_slice(&[0x00, 0x01, 0xF4]);
        expected.extend_from_slice(B.as_slice());
        expected.extend_from_slice(&[0x00, 0x0B, 0xB8]);
        expected.extend_from_slice(C.as_slice());
        assert_eq!(path.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_encode_single_hop() {
        let path = encode_path(&[A, B], &[FeeTier::High]).unwrap();
        assert_eq!(path.len(), 43);
        assert_eq!(&path[20..23], &[0x00, 0x27, 0x10]);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let first = encode_path(&[A, B, C], &[FeeTier::Lowest, FeeTier::High]).unwrap();
        let second = encode_path(&[A, B, C], &[FeeTier::Lowest, FeeTier::High]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let result = encode_path(&[A, B, C], &[FeeTier::Low]);
        assert!(matches!(
            result,
            Err(RoutingError::ShapeMismatch {
                tokens: 3,
                fees: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_too_few_tokens_rejected() {
        assert!(matches!(
            encode_path(&[A], &[]),
            Err(RoutingError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            encode_path(&[], &[]),
            Err(RoutingError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_path() {
        let path = encode_path(&[A, B, C], &[FeeTier::Low, FeeTier::Medium]).unwrap();
        let hops = decode_path(&path).unwrap();
        assert_eq!(
            hops,
            vec![
                PathHop {
                    token_in: A,
                    fee: FeeTier::Low,
                    token_out: B
                },
                PathHop {
                    token_in: B,
                    fee: FeeTier::Medium,
                    token_out: C
                },
            ]
        );
        assert_eq!(hop_count(&path).unwrap(), 2);
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        assert!(matches!(
            decode_path(&[0u8; 20]),
            Err(RoutingError::MalformedPath(_))
        ));
        assert!(matches!(
            decode_path(&[0u8; 44]),
            Err(RoutingError::MalformedPath(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_fee() {
        let mut raw = Vec::new();
        raw.extend_from_slice(A.as_slice());
        raw.extend_from_slice(&[0x00, 0x09, 0xC4]); // 2500
        raw.extend_from_slice(B.as_slice());
        assert!(matches!(
            decode_path(&raw),
            Err(RoutingError::MalformedPath(_))
        ));
    }
}
