use crate::*;

#[near_bindgen]
impl Contract {
    /// Account of the property token contract
    pub fn nft_address(&self) -> AccountId {
        self.nft_address.clone()
    }

    pub fn seller(&self) -> AccountId {
        self.seller.clone()
    }

    pub fn inspector(&self) -> AccountId {
        self.inspector.clone()
    }

    pub fn lender(&self) -> AccountId {
        self.lender.clone()
    }

    pub fn is_listed(&self, token_id: TokenId) -> bool {
        self.listed.get(&token_id).unwrap_or(false)
    }

    /// Buyer of a listing, None when the token is not listed
    pub fn buyer(&self, token_id: TokenId) -> Option<AccountId> {
        self.buyers.get(&token_id)
    }

    pub fn purchase_price(&self, token_id: TokenId) -> U128 {
        U128(self.purchase_prices.get(&token_id).unwrap_or(0))
    }

    pub fn escrow_amount(&self, token_id: TokenId) -> U128 {
        U128(self.escrow_amounts.get(&token_id).unwrap_or(0))
    }

    pub fn inspection_passed(&self, token_id: TokenId) -> bool {
        self.inspection_states.get(&token_id).unwrap_or(false)
    }

    pub fn approval(&self, token_id: TokenId, account_id: AccountId) -> bool {
        self.approvals
            .get(&ApprovalKey {
                token_id,
                account_id,
            })
            .unwrap_or(false)
    }

    /// Funds currently held by the contract, in yoctoNEAR
    pub fn get_balance(&self) -> U128 {
        U128(self.held_balance)
    }
}
