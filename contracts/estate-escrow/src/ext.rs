use near_sdk::{ext_contract, AccountId};

use crate::TokenId;

// Property token interface for cross-contract calls
#[allow(dead_code)]
#[ext_contract(ext_estate_token)]
pub trait EstateToken {
    fn transfer(&mut self, receiver_id: AccountId, token_id: TokenId);
}
