use crate::*;
use near_sdk::serde_json::json;

const EVENT_STANDARD: &str = "estate-escrow";
const EVENT_STANDARD_VERSION: &str = "1.0.0";

pub mod emit {
    use super::*;
    use near_sdk::{env, log};

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct PropertyListedEventData<'a> {
        pub token_id: TokenId,
        pub buyer: &'a AccountId,
        pub purchase_price: U128,
        pub escrow_amount: U128,
        pub timestamp: u64,
    }

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct EarnestDepositedEventData<'a> {
        pub token_id: TokenId,
        pub buyer: &'a AccountId,
        pub amount: U128,
        pub timestamp: u64,
    }

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct InspectionUpdatedEventData {
        pub token_id: TokenId,
        pub passed: bool,
        pub timestamp: u64,
    }

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct SaleApprovedEventData<'a> {
        pub token_id: TokenId,
        pub account_id: &'a AccountId,
        pub timestamp: u64,
    }

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct SaleFundedEventData<'a> {
        pub token_id: TokenId,
        pub sender_id: &'a AccountId,
        pub amount: U128,
        pub timestamp: u64,
    }

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct SaleFinalisedEventData<'a> {
        pub token_id: TokenId,
        pub buyer: &'a AccountId,
        pub payout: U128,
        pub timestamp: u64,
    }

    fn log_event<T: Serialize>(event: &str, data: T) {
        let event = json!({
            "standard": EVENT_STANDARD,
            "version": EVENT_STANDARD_VERSION,
            "event": event,
            "data": [data]
        });

        log!("EVENT_JSON:{}", event.to_string());
    }

    pub fn property_listed(
        token_id: TokenId,
        buyer: &AccountId,
        purchase_price: U128,
        escrow_amount: U128,
    ) {
        log_event(
            "property_listed",
            PropertyListedEventData {
                token_id,
                buyer,
                purchase_price,
                escrow_amount,
                timestamp: env::block_timestamp(),
            },
        );
    }

    pub fn earnest_deposited(token_id: TokenId, buyer: &AccountId, amount: U128) {
        log_event(
            "earnest_deposited",
            EarnestDepositedEventData {
                token_id,
                buyer,
                amount,
                timestamp: env::block_timestamp(),
            },
        );
    }

    pub fn inspection_updated(token_id: TokenId, passed: bool) {
        log_event(
            "inspection_updated",
            InspectionUpdatedEventData {
                token_id,
                passed,
                timestamp: env::block_timestamp(),
            },
        );
    }

    pub fn sale_approved(token_id: TokenId, account_id: &AccountId) {
        log_event(
            "sale_approved",
            SaleApprovedEventData {
                token_id,
                account_id,
                timestamp: env::block_timestamp(),
            },
        );
    }

    pub fn sale_funded(token_id: TokenId, sender_id: &AccountId, amount: U128) {
        log_event(
            "sale_funded",
            SaleFundedEventData {
                token_id,
                sender_id,
                amount,
                timestamp: env::block_timestamp(),
            },
        );
    }

    pub fn sale_finalised(token_id: TokenId, buyer: &AccountId, payout: U128) {
        log_event(
            "sale_finalised",
            SaleFinalisedEventData {
                token_id,
                buyer,
                payout,
                timestamp: env::block_timestamp(),
            },
        );
    }
}
