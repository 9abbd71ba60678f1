use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::collections::LookupMap;
use near_sdk::serde::Serialize;
use near_sdk::{env, near_bindgen, AccountId, BorshStorageKey, PanicOnDefault};

mod events;

pub type TokenId = u64;

#[derive(BorshSerialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh")]
enum StorageKey {
    TokensById,
    TokenUris,
    Approvals,
}

/// Property token contract. Each token is one property instance with a
/// metadata URI and a single approved-operator slot.
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
#[borsh(crate = "near_sdk::borsh")]
#[near_bindgen]
pub struct Contract {
    owner_id: AccountId,
    tokens_by_id: LookupMap<TokenId, AccountId>,
    token_uris: LookupMap<TokenId, String>,
    approvals: LookupMap<TokenId, AccountId>,
    next_token_id: TokenId,
}

#[near_bindgen]
impl Contract {
    #[init]
    pub fn new(owner_id: AccountId) -> Self {
        Self {
            owner_id,
            tokens_by_id: LookupMap::new(StorageKey::TokensById),
            token_uris: LookupMap::new(StorageKey::TokenUris),
            approvals: LookupMap::new(StorageKey::Approvals),
            next_token_id: 1,
        }
    }

    /// Mint the next property token to the contract owner. Ids are
    /// sequential starting at 1.
    pub fn mint(&mut self, token_uri: String) -> TokenId {
        self.assert_owner();

        let token_id = self.next_token_id;
        self.next_token_id += 1;

        self.tokens_by_id.insert(&token_id, &self.owner_id);
        self.token_uris.insert(&token_id, &token_uri);

        events::emit::property_minted(token_id, &self.owner_id, &token_uri);

        token_id
    }

    /// Approve an operator for a single token (only the token owner can call)
    pub fn approve(&mut self, account_id: AccountId, token_id: TokenId) {
        let owner = self.expect_owner_of(token_id);
        assert_eq!(
            env::predecessor_account_id(),
            owner,
            "Only the token owner can approve an operator"
        );

        self.approvals.insert(&token_id, &account_id);

        events::emit::operator_approved(token_id, &owner, &account_id);
    }

    /// Transfer a token. The caller must be the token owner or its approved
    /// operator. The approval slot is cleared on transfer.
    pub fn transfer(&mut self, receiver_id: AccountId, token_id: TokenId) {
        let owner = self.expect_owner_of(token_id);
        let caller = env::predecessor_account_id();

        let approved = self.approvals.get(&token_id);
        assert!(
            caller == owner || approved.as_ref() == Some(&caller),
            "Caller is neither the token owner nor the approved operator"
        );

        self.tokens_by_id.insert(&token_id, &receiver_id);
        self.approvals.remove(&token_id);

        events::emit::property_transferred(token_id, &owner, &receiver_id);
    }

    /// Get the owner of a token
    pub fn owner_of(&self, token_id: TokenId) -> Option<AccountId> {
        self.tokens_by_id.get(&token_id)
    }

    /// Get the metadata URI of a token
    pub fn token_uri(&self, token_id: TokenId) -> Option<String> {
        self.token_uris.get(&token_id)
    }

    /// Get the approved operator of a token
    pub fn approved_operator(&self, token_id: TokenId) -> Option<AccountId> {
        self.approvals.get(&token_id)
    }

    /// Number of tokens minted so far
    pub fn total_supply(&self) -> u64 {
        self.next_token_id - 1
    }
}

impl Contract {
    fn assert_owner(&self) {
        assert_eq!(
            env::predecessor_account_id(),
            self.owner_id,
            "Only the contract owner can mint"
        );
    }

    fn expect_owner_of(&self, token_id: TokenId) -> AccountId {
        self.tokens_by_id
            .get(&token_id)
            .unwrap_or_else(|| env::panic_str("Token not found"))
    }
}
