//! Canonical binary order-entry records.
//!
//! Packed fixed-layout structs, no padding, integers big-endian on the
//! wire. Field widths follow the gateway's session layer: the login
//! request carries a 20-byte password plus requested session and sequence
//! fields, and orders are tokenised 49-byte records.

use splice_types::Credentials;
use zerocopy::byteorder::{NetworkEndian, U32};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

use crate::fix::NewOrderSingle;

pub const LOGIN_REQUEST_TYPE: u8 = b'U';
pub const ACCEPT_TYPE: u8 = b'A';
pub const NEW_ORDER_TYPE: u8 = b'O';

/// Demo pricing carried over from gateway bring-up: $100.0000 in the
/// 4-decimal fixed-point wire convention, one-hour time-in-force.
pub const DEMO_PRICE: u32 = 1_000_000;
pub const DEMO_TIME_IN_FORCE: u32 = 3600;

pub const FIRM: [u8; 4] = *b"FIRM";

pub const TOKEN_LEN: usize = 14;
pub const SESSION_ID_LEN: usize = 6;

/// Session login request, sent first on the downstream connection.
#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes, Unaligned)]
pub struct LoginRequest {
    pub message_type: u8,
    pub username: [u8; 6],
    pub password: [u8; 20],
    pub requested_session: [u8; 4],
    pub requested_sequence_number: [u8; 20],
}

impl LoginRequest {
    pub const SIZE: usize = 51;

    /// Space-padded credentials; session field all spaces, sequence field
    /// `'0'` then spaces (next-sequence semantics).
    pub fn new(credentials: &Credentials) -> Self {
        let mut requested_sequence_number = [b' '; 20];
        requested_sequence_number[0] = b'0';
        Self {
            message_type: LOGIN_REQUEST_TYPE,
            username: pad_field(credentials.username.as_bytes()),
            password: pad_field(credentials.password.as_bytes()),
            requested_session: [b' '; 4],
            requested_sequence_number,
        }
    }
}

/// Positive login acknowledgement. Shared by both order dialects.
#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes, Unaligned)]
pub struct Accepted {
    pub message_type: u8,
    pub session_id: [u8; SESSION_ID_LEN],
}

impl Accepted {
    pub const SIZE: usize = 7;
}

/// Tokenised new-order record.
#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes, Unaligned)]
pub struct NewOrder {
    pub message_type: u8,
    pub order_token: [u8; TOKEN_LEN],
    pub buy_sell_indicator: u8,
    pub shares: U32<NetworkEndian>,
    pub stock: [u8; 8],
    pub price: U32<NetworkEndian>,
    pub time_in_force: U32<NetworkEndian>,
    pub firm: [u8; 4],
    pub display: u8,
    pub capacity: u8,
    pub intermarket_sweep_eligibility: u8,
    pub minimum_quantity: U32<NetworkEndian>,
    pub cross_type: u8,
    pub customer_type: u8,
}

impl NewOrder {
    pub const SIZE: usize = 49;

    /// Build the wire record for one parsed FIX order. Every field is
    /// zero-initialised before population.
    pub fn from_fix(order: &NewOrderSingle, token: [u8; TOKEN_LEN]) -> Self {
        let mut record = Self::new_zeroed();
        record.message_type = NEW_ORDER_TYPE;
        record.order_token = token;
        record.buy_sell_indicator = order.side.as_byte();
        record.shares = U32::new(order.quantity);
        record.stock = order.symbol;
        record.price = U32::new(DEMO_PRICE);
        record.time_in_force = U32::new(DEMO_TIME_IN_FORCE);
        record.firm = FIRM;
        record.display = b'Y';
        record.capacity = b'A';
        record.intermarket_sweep_eligibility = b'N';
        record.minimum_quantity = U32::new(0);
        record.cross_type = b'N';
        record.customer_type = b'R';
        record
    }
}

/// Per-session order token sequence: `ORD` + 10-digit zero-padded counter
/// starting at 1, space-padded to the 14-byte field.
pub struct TokenSequence {
    next: u64,
}

impl TokenSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_token(&mut self) -> [u8; TOKEN_LEN] {
        let mut token = [b' '; TOKEN_LEN];
        token[..3].copy_from_slice(b"ORD");
        let mut value = self.next;
        self.next += 1;
        for slot in token[3..13].iter_mut().rev() {
            *slot = b'0' + (value % 10) as u8;
            value /= 10;
        }
        token
    }
}

impl Default for TokenSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Left-align into a space-padded fixed-width field, truncating overlong
/// values.
pub(crate) fn pad_field<const N: usize>(value: &[u8]) -> [u8; N] {
    let mut field = [b' '; N];
    let n = value.len().min(N);
    field[..n].copy_from_slice(&value[..n]);
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_record_sizes() {
        assert_eq!(size_of::<LoginRequest>(), LoginRequest::SIZE);
        assert_eq!(size_of::<Accepted>(), Accepted::SIZE);
        assert_eq!(size_of::<NewOrder>(), NewOrder::SIZE);
        assert_eq!(NewOrder::SIZE, 49);
    }

    #[test]
    fn test_login_layout() {
        let login = LoginRequest::new(&Credentials {
            username: "USER01".into(),
            password: "PASSWORD1234567890".into(),
        });
        let bytes = login.as_bytes();
        assert_eq!(bytes.len(), 51);
        assert_eq!(bytes[0], b'U');
        assert_eq!(&bytes[1..7], b"USER01");
        assert_eq!(&bytes[7..27], b"PASSWORD1234567890  ");
        assert_eq!(&bytes[27..31], b"    ");
        assert_eq!(bytes[31], b'0');
        assert_eq!(&bytes[32..51], [b' '; 19]);
    }

    #[test]
    fn test_token_sequence() {
        let mut tokens = TokenSequence::new();
        assert_eq!(&tokens.next_token(), b"ORD0000000001 ");
        assert_eq!(&tokens.next_token(), b"ORD0000000002 ");
        let mut skipped = TokenSequence::new();
        for _ in 0..41 {
            skipped.next_token();
        }
        assert_eq!(&skipped.next_token(), b"ORD0000000042 ");
    }

    #[test]
    fn test_accepted_roundtrip() {
        let ack = Accepted {
            message_type: ACCEPT_TYPE,
            session_id: *b"ABC123",
        };
        let parsed = Accepted::read_from(ack.as_bytes()).unwrap();
        assert_eq!(parsed.message_type, b'A');
        assert_eq!(&parsed.session_id, b"ABC123");
    }
}
