use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::collections::LookupMap;
use near_sdk::json_types::U128;
use near_sdk::serde::Serialize;
use near_sdk::{
    env, log, near, near_bindgen, AccountId, BorshStorageKey, Gas, NearToken, PanicOnDefault,
    Promise, PromiseError,
};

mod events;
mod ext;
mod views;

use ext::ext_estate_token;

pub type TokenId = u64;

/// Gas for the cross-contract token transfer on the property contract.
pub const TOKEN_TRANSFER_GAS: Gas = Gas::from_tgas(30);

/// Gas for the local callback after a token transfer.
pub const TRANSFER_CALLBACK_GAS: Gas = Gas::from_tgas(20);

#[derive(BorshSerialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh")]
enum StorageKey {
    Listed,
    Buyers,
    PurchasePrices,
    EscrowAmounts,
    InspectionPassed,
    Approvals,
}

/// Key for the per-listing, per-participant approval flags
#[derive(Clone, Debug, PartialEq, Eq)]
#[near(serializers = [borsh])]
pub struct ApprovalKey {
    pub token_id: TokenId,
    pub account_id: AccountId,
}

/// Escrow contract for tokenized property sales. Holds custody of the
/// property token and the sale funds until the inspection has passed and
/// buyer, seller and lender have all approved.
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
#[borsh(crate = "near_sdk::borsh")]
#[near_bindgen]
pub struct Contract {
    seller: AccountId,
    nft_address: AccountId,
    inspector: AccountId,
    lender: AccountId,

    // Listing records, keyed by token id
    listed: LookupMap<TokenId, bool>,
    buyers: LookupMap<TokenId, AccountId>,
    purchase_prices: LookupMap<TokenId, u128>,
    escrow_amounts: LookupMap<TokenId, u128>,
    inspection_states: LookupMap<TokenId, bool>,
    approvals: LookupMap<ApprovalKey, bool>,

    // Funds held by the contract, in yoctoNEAR
    held_balance: u128,
}

#[near_bindgen]
impl Contract {
    #[init]
    pub fn new(
        seller: AccountId,
        nft_address: AccountId,
        inspector: AccountId,
        lender: AccountId,
    ) -> Self {
        Self {
            seller,
            nft_address,
            inspector,
            lender,
            listed: LookupMap::new(StorageKey::Listed),
            buyers: LookupMap::new(StorageKey::Buyers),
            purchase_prices: LookupMap::new(StorageKey::PurchasePrices),
            escrow_amounts: LookupMap::new(StorageKey::EscrowAmounts),
            inspection_states: LookupMap::new(StorageKey::InspectionPassed),
            approvals: LookupMap::new(StorageKey::Approvals),
            held_balance: 0,
        }
    }

    /// List a property for sale and take custody of the token (only the
    /// seller can call). The escrow account must already be approved as the
    /// token's operator. The listing record is only written once the token
    /// transfer has succeeded.
    pub fn list(
        &mut self,
        token_id: TokenId,
        buyer: AccountId,
        purchase_price: U128,
        escrow_amount: U128,
    ) -> Promise {
        self.assert_seller();
        assert!(!self.is_listed(token_id), "Token is already listed");

        ext_estate_token::ext(self.nft_address.clone())
            .with_static_gas(TOKEN_TRANSFER_GAS)
            .transfer(env::current_account_id(), token_id)
            .then(
                Self::ext(env::current_account_id())
                    .with_static_gas(TRANSFER_CALLBACK_GAS)
                    .on_listing_transfer(token_id, buyer, purchase_price, escrow_amount),
            )
    }

    /// Callback after pulling the token into custody during `list`
    #[private]
    pub fn on_listing_transfer(
        &mut self,
        token_id: TokenId,
        buyer: AccountId,
        purchase_price: U128,
        escrow_amount: U128,
        #[callback_result] result: Result<(), PromiseError>,
    ) {
        if result.is_err() {
            env::panic_str("Token transfer into escrow failed, listing aborted");
        }

        self.listed.insert(&token_id, &true);
        self.buyers.insert(&token_id, &buyer);
        self.purchase_prices.insert(&token_id, &purchase_price.0);
        self.escrow_amounts.insert(&token_id, &escrow_amount.0);

        events::emit::property_listed(token_id, &buyer, purchase_price, escrow_amount);
    }

    /// Buyer's earnest deposit, held by the contract until the sale settles.
    /// The attached deposit must cover the listing's escrow amount.
    #[payable]
    pub fn deposit_earnest(&mut self, token_id: TokenId) {
        let buyer = self.expect_buyer(token_id);
        assert_eq!(
            env::predecessor_account_id(),
            buyer,
            "Only the buyer can deposit earnest"
        );

        let attached = env::attached_deposit().as_yoctonear();
        let required = self
            .escrow_amounts
            .get(&token_id)
            .unwrap_or_else(|| env::panic_str("Token is not listed"));
        assert!(
            attached >= required,
            "Attached deposit is below the escrow amount"
        );

        self.held_balance += attached;

        events::emit::earnest_deposited(token_id, &buyer, U128(attached));
    }

    /// Record the inspection result (only the inspector can call)
    pub fn update_inspection_status(&mut self, token_id: TokenId, passed: bool) {
        self.assert_inspector();
        self.assert_listed(token_id);

        self.inspection_states.insert(&token_id, &passed);

        events::emit::inspection_updated(token_id, passed);
    }

    /// Record the caller's approval of the sale
    pub fn approve_sale(&mut self, token_id: TokenId) {
        self.assert_listed(token_id);

        let caller = env::predecessor_account_id();
        self.approvals.insert(
            &ApprovalKey {
                token_id,
                account_id: caller.clone(),
            },
            &true,
        );

        events::emit::sale_approved(token_id, &caller);
    }

    /// Top up the funds held for a sale. The lender sends the balance of
    /// the purchase price here before finalization.
    #[payable]
    pub fn fund_sale(&mut self, token_id: TokenId) {
        self.assert_listed(token_id);

        let attached = env::attached_deposit().as_yoctonear();
        assert!(attached > 0, "No deposit attached");

        self.held_balance += attached;

        events::emit::sale_funded(token_id, &env::predecessor_account_id(), U128(attached));
    }

    /// Complete the sale: transfer the token to the buyer and pay the held
    /// funds out to the seller. Requires a passed inspection, approvals from
    /// buyer, seller and lender, and held funds covering the purchase price.
    pub fn finalise_sale(&mut self, token_id: TokenId) -> Promise {
        self.assert_listed(token_id);
        assert!(
            self.inspection_passed(token_id),
            "Inspection has not passed"
        );

        let buyer = self.expect_buyer(token_id);
        for party in [buyer.clone(), self.seller.clone(), self.lender.clone()] {
            assert!(
                self.approval(token_id, party.clone()),
                "Sale is not approved by {}",
                party
            );
        }

        let price = self
            .purchase_prices
            .get(&token_id)
            .unwrap_or_else(|| env::panic_str("Token is not listed"));
        assert!(
            self.held_balance >= price,
            "Held funds are below the purchase price"
        );

        ext_estate_token::ext(self.nft_address.clone())
            .with_static_gas(TOKEN_TRANSFER_GAS)
            .transfer(buyer, token_id)
            .then(
                Self::ext(env::current_account_id())
                    .with_static_gas(TRANSFER_CALLBACK_GAS)
                    .on_sale_transfer(token_id),
            )
    }

    /// Callback after handing the token to the buyer during `finalise_sale`.
    /// Pays the entire held balance out to the seller and clears the listing.
    #[private]
    pub fn on_sale_transfer(
        &mut self,
        token_id: TokenId,
        #[callback_result] result: Result<(), PromiseError>,
    ) {
        if result.is_err() {
            log!(
                "Token transfer to the buyer failed, sale {} remains open",
                token_id
            );
            return;
        }

        let buyer = self.expect_buyer(token_id);
        let payout = self.held_balance;
        self.held_balance = 0;
        self.clear_listing(token_id, &buyer);

        Promise::new(self.seller.clone()).transfer(NearToken::from_yoctonear(payout));

        events::emit::sale_finalised(token_id, &buyer, U128(payout));
    }
}

impl Contract {
    fn assert_seller(&self) {
        assert_eq!(
            env::predecessor_account_id(),
            self.seller,
            "Only the seller can call this method"
        );
    }

    fn assert_inspector(&self) {
        assert_eq!(
            env::predecessor_account_id(),
            self.inspector,
            "Only the inspector can call this method"
        );
    }

    fn assert_listed(&self, token_id: TokenId) {
        assert!(self.is_listed(token_id), "Token is not listed");
    }

    fn expect_buyer(&self, token_id: TokenId) -> AccountId {
        self.buyers
            .get(&token_id)
            .unwrap_or_else(|| env::panic_str("Token is not listed"))
    }

    fn clear_listing(&mut self, token_id: TokenId, buyer: &AccountId) {
        self.listed.remove(&token_id);
        self.buyers.remove(&token_id);
        self.purchase_prices.remove(&token_id);
        self.escrow_amounts.remove(&token_id);
        self.inspection_states.remove(&token_id);

        for party in [buyer, &self.seller, &self.lender] {
            self.approvals.remove(&ApprovalKey {
                token_id,
                account_id: party.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests;
