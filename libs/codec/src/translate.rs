//! Per-session FIX→OUCH translation.

use splice_types::Dialect;
use zerocopy::AsBytes;

use crate::fix::{self, NewOrderSingle};
use crate::ouch::TokenSequence;
use crate::{lite, ouch};

/// Translates recognised `NewOrderSingle` messages into binary order
/// records; everything else in the frame is silently dropped. One of these
/// lives per session, carrying the session's order-token sequence.
pub struct Translator {
    dialect: Dialect,
    tokens: TokenSequence,
}

impl Translator {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            tokens: TokenSequence::new(),
        }
    }

    /// Scan one frame for FIX messages and append the wire bytes of each
    /// translated order to `out`. Returns the number of orders emitted.
    ///
    /// The token counter advances once per emitted order, never for
    /// skipped input, so emitted tokens are gapless.
    pub fn translate_frame(&mut self, payload: &[u8], out: &mut Vec<u8>) -> usize {
        let mut emitted = 0;
        for msg in fix::messages(payload) {
            let Some(order) = NewOrderSingle::parse(msg) else {
                continue;
            };
            match self.dialect {
                Dialect::Ouch5 => {
                    let record = ouch::NewOrder::from_fix(&order, self.tokens.next_token());
                    out.extend_from_slice(record.as_bytes());
                }
                Dialect::Lite => {
                    out.extend_from_slice(lite::NewOrder::from_fix(&order).as_bytes());
                }
            }
            emitted += 1;
        }
        emitted
    }
}
