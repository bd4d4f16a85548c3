use anchor_lang::prelude::*;

use crate::constants::FIRST_REQUEST_ID;
use crate::error::ErrorCode;

/// Links an issued randomness request to the round waiting on it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct DrawRequest {
    pub request_id: u64,
    pub round: u64,
}

/// Two-phase bridge to the off-chain oracle.
///
/// `request` only records the pending id; the oracle learns about it from the
/// `DrawRequested` event and later calls back through `resolve`, which
/// authenticates the caller before consuming the entry. A consumed or
/// discarded id can never resolve again.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq, InitSpace)]
pub struct RandomnessGateway {
    /// The only signer allowed to deliver randomness.
    pub oracle: Pubkey,

    /// Oracle key the requests are addressed to.
    pub key_hash: [u8; 32],

    /// Oracle subscription billed for the requests.
    pub subscription_id: u64,

    /// Slots the oracle waits before answering a request.
    pub request_confirmations: u16,

    /// Compute units the oracle should budget for its callback.
    pub callback_compute_limit: u32,

    /// Id handed to the next request.
    pub next_request_id: u64,

    /// The outstanding request; `None` once it is consumed or discarded.
    pub pending: Option<DrawRequest>,
}

impl RandomnessGateway {
    pub fn has_outstanding(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn request(&mut self, round: u64) -> Result<DrawRequest> {
        require!(self.pending.is_none(), ErrorCode::UpkeepNotNeeded);

        let request_id = self.next_request_id.max(FIRST_REQUEST_ID);
        self.next_request_id = request_id.checked_add(1).ok_or(ErrorCode::Overflow)?;

        let request = DrawRequest { request_id, round };
        self.pending = Some(request);
        Ok(request)
    }

    /// Consumes the pending request if `caller` is the oracle and `request_id` matches.
    pub(crate) fn resolve(&mut self, caller: Pubkey, request_id: u64) -> Result<DrawRequest> {
        require_keys_eq!(caller, self.oracle, ErrorCode::UnauthorizedOracle);

        match self.pending {
            Some(request) if request.request_id == request_id => {
                self.pending = None;
                Ok(request)
            }
            _ => err!(ErrorCode::UnknownRequest),
        }
    }

    /// Drops the outstanding request without fulfilling it.
    pub(crate) fn discard(&mut self) -> Result<DrawRequest> {
        self.pending
            .take()
            .ok_or_else(|| error!(ErrorCode::NoOutstandingRequest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> RandomnessGateway {
        RandomnessGateway {
            oracle: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    #[test]
    fn ids_are_positive_and_monotonic() {
        let mut gateway = gateway();
        let oracle = gateway.oracle;

        let first = gateway.request(0).unwrap();
        assert_eq!(first.request_id, FIRST_REQUEST_ID);
        gateway.resolve(oracle, first.request_id).unwrap();

        let second = gateway.request(1).unwrap();
        assert!(second.request_id > first.request_id);
        assert_eq!(second.round, 1);
    }

    #[test]
    fn only_one_request_may_be_outstanding() {
        let mut gateway = gateway();
        let first = gateway.request(0).unwrap();

        assert_eq!(
            gateway.request(0).unwrap_err(),
            ErrorCode::UpkeepNotNeeded.into()
        );
        assert_eq!(gateway.pending, Some(first));
    }

    #[test]
    fn resolve_rejects_strangers_before_touching_the_table() {
        let mut gateway = gateway();
        let request = gateway.request(0).unwrap();

        let err = gateway
            .resolve(Pubkey::new_unique(), request.request_id)
            .unwrap_err();
        assert_eq!(err, ErrorCode::UnauthorizedOracle.into());
        assert_eq!(gateway.pending, Some(request));
    }

    #[test]
    fn resolve_consumes_exactly_once() {
        let mut gateway = gateway();
        let oracle = gateway.oracle;
        let request = gateway.request(3).unwrap();

        assert_eq!(
            gateway.resolve(oracle, request.request_id + 1).unwrap_err(),
            ErrorCode::UnknownRequest.into()
        );
        assert_eq!(gateway.resolve(oracle, request.request_id).unwrap(), request);
        assert_eq!(
            gateway.resolve(oracle, request.request_id).unwrap_err(),
            ErrorCode::UnknownRequest.into()
        );
        assert!(!gateway.has_outstanding());
    }

    #[test]
    fn discarded_request_cannot_resolve() {
        let mut gateway = gateway();
        let oracle = gateway.oracle;
        let request = gateway.request(0).unwrap();

        assert_eq!(gateway.discard().unwrap(), request);
        assert_eq!(
            gateway.resolve(oracle, request.request_id).unwrap_err(),
            ErrorCode::UnknownRequest.into()
        );
        assert_eq!(
            gateway.discard().unwrap_err(),
            ErrorCode::NoOutstandingRequest.into()
        );
    }
}
