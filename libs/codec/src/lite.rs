//! Lightweight binary order dialect.
//!
//! The shorter login and order layouts kept for test gateways: a 17-byte
//! login, an untokenised 14-byte order, and a single-byte `N` rejection.
//! The positive acknowledgement is the same `'A' + session_id[6]` record
//! as the canonical dialect ([`crate::ouch::Accepted`]).

use splice_types::Credentials;
use zerocopy::byteorder::{NetworkEndian, U32};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

use crate::fix::NewOrderSingle;
use crate::ouch::pad_field;

pub const LOGIN_REQUEST_TYPE: u8 = b'L';
pub const REJECT_TYPE: u8 = b'N';
pub const NEW_ORDER_TYPE: u8 = b'O';

#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes, Unaligned)]
pub struct LoginRequest {
    pub message_type: u8,
    pub username: [u8; 6],
    pub password: [u8; 10],
}

impl LoginRequest {
    pub const SIZE: usize = 17;

    pub fn new(credentials: &Credentials) -> Self {
        Self {
            message_type: LOGIN_REQUEST_TYPE,
            username: pad_field(credentials.username.as_bytes()),
            password: pad_field(credentials.password.as_bytes()),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes, Unaligned)]
pub struct NewOrder {
    pub message_type: u8,
    pub buy_sell_indicator: u8,
    pub shares: U32<NetworkEndian>,
    pub symbol: [u8; 8],
}

impl NewOrder {
    pub const SIZE: usize = 14;

    pub fn from_fix(order: &NewOrderSingle) -> Self {
        Self {
            message_type: NEW_ORDER_TYPE,
            buy_sell_indicator: order.side.as_byte(),
            shares: U32::new(order.quantity),
            symbol: order.symbol,
        }
    }
}
