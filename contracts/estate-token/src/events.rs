use crate::*;
use near_sdk::serde_json::json;

const EVENT_STANDARD: &str = "estate-token";
const EVENT_STANDARD_VERSION: &str = "1.0.0";

pub mod emit {
    use super::*;
    use near_sdk::{env, log};

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct PropertyMintedEventData<'a> {
        pub token_id: TokenId,
        pub owner_id: &'a AccountId,
        pub token_uri: &'a str,
        pub timestamp: u64,
    }

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct OperatorApprovedEventData<'a> {
        pub token_id: TokenId,
        pub owner_id: &'a AccountId,
        pub operator_id: &'a AccountId,
        pub timestamp: u64,
    }

    #[derive(Serialize)]
    #[serde(crate = "near_sdk::serde")]
    struct PropertyTransferredEventData<'a> {
        pub token_id: TokenId,
        pub old_owner_id: &'a AccountId,
        pub new_owner_id: &'a AccountId,
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

    pub fn property_minted(token_id: TokenId, owner_id: &AccountId, token_uri: &str) {
        log_event(
            "property_minted",
            PropertyMintedEventData {
                token_id,
                owner_id,
                token_uri,
                timestamp: env::block_timestamp(),
            },
        );
    }

    pub fn operator_approved(token_id: TokenId, owner_id: &AccountId, operator_id: &AccountId) {
        log_event(
            "operator_approved",
            OperatorApprovedEventData {
                token_id,
                owner_id,
                operator_id,
                timestamp: env::block_timestamp(),
            },
        );
    }

    pub fn property_transferred(
        token_id: TokenId,
        old_owner_id: &AccountId,
        new_owner_id: &AccountId,
    ) {
        log_event(
            "property_transferred",
            PropertyTransferredEventData {
                token_id,
                old_owner_id,
                new_owner_id,
                timestamp: env::block_timestamp(),
            },
        );
    }
}
