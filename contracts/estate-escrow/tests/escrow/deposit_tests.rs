use anyhow::Result;
use serde_json::json;

use crate::helpers::{near, yocto_str, EscrowEnv, TOKEN_ID};

#[tokio::test]
async fn updates_contract_balance() -> Result<()> {
    let env = EscrowEnv::setup().await?;

    env.deposit_earnest(near(5)).await?;

    assert_eq!(env.escrow_balance().await?, yocto_str(5));

    Ok(())
}

#[tokio::test]
async fn rejects_deposit_below_escrow_amount() -> Result<()> {
    let env = EscrowEnv::setup().await?;

    let outcome = env
        .buyer
        .call(env.escrow.id(), "deposit_earnest")
        .args_json(json!({ "token_id": TOKEN_ID }))
        .deposit(near(1))
        .max_gas()
        .transact()
        .await?;
    assert!(outcome.is_failure());

    // nothing was credited
    assert_eq!(env.escrow_balance().await?, "0");

    Ok(())
}

#[tokio::test]
async fn rejects_deposit_from_non_buyer() -> Result<()> {
    let env = EscrowEnv::setup().await?;

    let outcome = env
        .lender
        .call(env.escrow.id(), "deposit_earnest")
        .args_json(json!({ "token_id": TOKEN_ID }))
        .deposit(near(5))
        .max_gas()
        .transact()
        .await?;
    assert!(outcome.is_failure());

    Ok(())
}
