
#[cfg(test)]
use crate::*;
#[cfg(test)]
use near_sdk::test_utils::{accounts, VMContextBuilder};
#[cfg(test)]
use near_sdk::{testing_env, NearToken};

// Role accounts used across the unit tests:
// seller = accounts(0), token contract = accounts(1),
// inspector = accounts(2), lender = accounts(3), buyer = accounts(4)

#[cfg(test)]
pub fn get_context(predecessor: AccountId, deposit: NearToken) -> VMContextBuilder {
    let mut builder = VMContextBuilder::new();
    builder
        .predecessor_account_id(predecessor)
        .attached_deposit(deposit);
    builder
}

#[cfg(test)]
pub fn set_context(predecessor: AccountId, deposit: NearToken) {
    testing_env!(get_context(predecessor, deposit).build());
}

#[cfg(test)]
pub fn setup_contract() -> Contract {
    set_context(accounts(0), NearToken::from_near(0));

    Contract::new(accounts(0), accounts(1), accounts(2), accounts(3))
}

/// Contract with token 1 already listed for the buyer at 10 NEAR with a
/// 5 NEAR escrow amount, the custody transfer having succeeded.
#[cfg(test)]
pub fn listed_contract() -> Contract {
    let mut contract = setup_contract();

    contract.on_listing_transfer(
        1,
        accounts(4),
        U128(NearToken::from_near(10).as_yoctonear()),
        U128(NearToken::from_near(5).as_yoctonear()),
        Ok(()),
    );

    contract
}

#[cfg(test)]
mod deployment_tests {
    use super::*;

    #[test]
    fn test_initialization() {
        let contract = setup_contract();

        assert_eq!(contract.seller(), accounts(0));
        assert_eq!(contract.nft_address(), accounts(1));
        assert_eq!(contract.inspector(), accounts(2));
        assert_eq!(contract.lender(), accounts(3));
    }

    #[test]
    fn test_initial_state_is_empty() {
        let contract = setup_contract();

        assert!(!contract.is_listed(1));
        assert_eq!(contract.buyer(1), None);
        assert_eq!(contract.get_balance().0, 0);
        assert!(!contract.inspection_passed(1));
    }
}
