use anyhow::Result;
use near_workspaces::network::Sandbox;
use near_workspaces::types::NearToken;
use near_workspaces::{Account, Contract, Worker};
use serde_json::json;

/// The property under escrow in every scenario.
pub const TOKEN_ID: u64 = 1;

pub const PROPERTY_URI: &str =
    "https://ipfs.io/ipfs/QmTudSYeM7mz3PkYEWXWqPjomRPHogcMFSq7XAvsvsgAPS";

pub fn near(n: u128) -> NearToken {
    NearToken::from_near(n)
}

/// Yocto amount as the string form `U128` views and arguments use.
pub fn yocto_str(n: u128) -> String {
    near(n).as_yoctonear().to_string()
}

pub struct EscrowEnv {
    pub worker: Worker<Sandbox>,
    pub token: Contract,
    pub escrow: Contract,
    pub buyer: Account,
    pub seller: Account,
    pub inspector: Account,
    pub lender: Account,
}

async fn create_signer(worker: &Worker<Sandbox>, name: &str) -> Result<Account> {
    let root = worker.root_account()?;
    let account = root
        .create_subaccount(name)
        .initial_balance(near(50))
        .transact()
        .await?
        .into_result()?;
    Ok(account)
}

impl EscrowEnv {
    /// Fresh contracts and one listed property, re-run before every case:
    /// token 1 is minted by the seller, the escrow is approved as its
    /// operator, and the property is listed for the buyer at 10 NEAR with
    /// a 5 NEAR escrow amount.
    pub async fn setup() -> Result<EscrowEnv> {
        let worker = near_workspaces::sandbox().await?;

        let buyer = create_signer(&worker, "buyer").await?;
        let seller = create_signer(&worker, "seller").await?;
        let inspector = create_signer(&worker, "inspector").await?;
        let lender = create_signer(&worker, "lender").await?;

        let token_wasm = near_workspaces::compile_project("../estate-token").await?;
        let token = worker.dev_deploy(&token_wasm).await?;
        token
            .call("new")
            .args_json(json!({ "owner_id": seller.id() }))
            .transact()
            .await?
            .into_result()?;

        seller
            .call(token.id(), "mint")
            .args_json(json!({ "token_uri": PROPERTY_URI }))
            .max_gas()
            .transact()
            .await?
            .into_result()?;

        let escrow_wasm = near_workspaces::compile_project("./").await?;
        let escrow = worker.dev_deploy(&escrow_wasm).await?;
        escrow
            .call("new")
            .args_json(json!({
                "seller": seller.id(),
                "nft_address": token.id(),
                "inspector": inspector.id(),
                "lender": lender.id(),
            }))
            .transact()
            .await?
            .into_result()?;

        seller
            .call(token.id(), "approve")
            .args_json(json!({ "account_id": escrow.id(), "token_id": TOKEN_ID }))
            .max_gas()
            .transact()
            .await?
            .into_result()?;

        seller
            .call(escrow.id(), "list")
            .args_json(json!({
                "token_id": TOKEN_ID,
                "buyer": buyer.id(),
                "purchase_price": yocto_str(10),
                "escrow_amount": yocto_str(5),
            }))
            .max_gas()
            .transact()
            .await?
            .into_result()?;

        Ok(EscrowEnv {
            worker,
            token,
            escrow,
            buyer,
            seller,
            inspector,
            lender,
        })
    }

    pub async fn owner_of(&self, token_id: u64) -> Result<Option<String>> {
        let owner = self
            .token
            .view("owner_of")
            .args_json(json!({ "token_id": token_id }))
            .await?
            .json()?;
        Ok(owner)
    }

    pub async fn escrow_balance(&self) -> Result<String> {
        let balance = self
            .escrow
            .view("get_balance")
            .args_json(json!({}))
            .await?
            .json()?;
        Ok(balance)
    }

    pub async fn deposit_earnest(&self, amount: NearToken) -> Result<()> {
        self.buyer
            .call(self.escrow.id(), "deposit_earnest")
            .args_json(json!({ "token_id": TOKEN_ID }))
            .deposit(amount)
            .max_gas()
            .transact()
            .await?
            .into_result()?;
        Ok(())
    }

    pub async fn pass_inspection(&self) -> Result<()> {
        self.inspector
            .call(self.escrow.id(), "update_inspection_status")
            .args_json(json!({ "token_id": TOKEN_ID, "passed": true }))
            .max_gas()
            .transact()
            .await?
            .into_result()?;
        Ok(())
    }

    pub async fn approve_sale(&self, signer: &Account) -> Result<()> {
        signer
            .call(self.escrow.id(), "approve_sale")
            .args_json(json!({ "token_id": TOKEN_ID }))
            .max_gas()
            .transact()
            .await?
            .into_result()?;
        Ok(())
    }
}
