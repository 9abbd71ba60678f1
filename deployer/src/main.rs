mod config;

use anyhow::{Context, Result};
use near_workspaces::network::Sandbox;
use near_workspaces::types::NearToken;
use near_workspaces::{Account, Worker};
use serde_json::json;
use tracing::info;

use config::Config;

/// Metadata URIs follow the original collection layout: one JSON document
/// per property id.
const PROPERTY_METADATA_BASE: &str =
    "https://ipfs.io/ipfs/QmQVcpsjrA6cr1iJjZAodYwmPekYgbnXGo4DFubJiLc2EB";

/// (token id, purchase price in NEAR, escrow amount in NEAR)
const LISTINGS: [(u64, u128, u128); 3] = [(1, 20, 10), (2, 10, 5), (3, 15, 5)];

const SIGNER_BALANCE: NearToken = NearToken::from_near(50);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "estate_deployer=info".into()),
        )
        .init();

    info!("Estate deployer starting...");

    let config = Config::from_env().context("Failed to load configuration")?;

    let worker = near_workspaces::sandbox()
        .await
        .context("Failed to start the local sandbox")?;

    // The four signer roles, funded from the sandbox root account
    let buyer = create_signer(&worker, "buyer").await?;
    let seller = create_signer(&worker, "seller").await?;
    let inspector = create_signer(&worker, "inspector").await?;
    let lender = create_signer(&worker, "lender").await?;
    info!(
        "Signers ready: buyer={}, seller={}, inspector={}, lender={}",
        buyer.id(),
        seller.id(),
        inspector.id(),
        lender.id()
    );

    info!("Deploying the property token contract...");
    let token_wasm = config.load_token_wasm().await?;
    let token = worker
        .dev_deploy(&token_wasm)
        .await
        .context("Failed to deploy the property token contract")?;
    token
        .call("new")
        .args_json(json!({ "owner_id": seller.id() }))
        .transact()
        .await?
        .into_result()
        .context("Failed to initialize the property token contract")?;
    info!("Property token contract deployed at {}", token.id());

    info!("Minting 3 properties...");
    for id in 1..=3u64 {
        seller
            .call(token.id(), "mint")
            .args_json(json!({
                "token_uri": format!("{PROPERTY_METADATA_BASE}/{id}.json"),
            }))
            .max_gas()
            .transact()
            .await?
            .into_result()
            .with_context(|| format!("Failed to mint property {id}"))?;
        info!("Property {id} has been minted");
    }

    info!("Deploying the escrow contract...");
    let escrow_wasm = config.load_escrow_wasm().await?;
    let escrow = worker
        .dev_deploy(&escrow_wasm)
        .await
        .context("Failed to deploy the escrow contract")?;
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
        .into_result()
        .context("Failed to initialize the escrow contract")?;
    info!("Escrow contract deployed at {}", escrow.id());

    info!("Approving the escrow contract as operator for each property...");
    for id in 1..=3u64 {
        seller
            .call(token.id(), "approve")
            .args_json(json!({ "account_id": escrow.id(), "token_id": id }))
            .max_gas()
            .transact()
            .await?
            .into_result()
            .with_context(|| format!("Failed to approve the escrow for property {id}"))?;
        info!("Property {id} approved");
    }

    info!("Listing the properties...");
    for (id, price, escrow_amount) in LISTINGS {
        seller
            .call(escrow.id(), "list")
            .args_json(json!({
                "token_id": id,
                "buyer": buyer.id(),
                "purchase_price": NearToken::from_near(price).as_yoctonear().to_string(),
                "escrow_amount": NearToken::from_near(escrow_amount).as_yoctonear().to_string(),
            }))
            .max_gas()
            .transact()
            .await?
            .into_result()
            .with_context(|| format!("Failed to list property {id}"))?;
        info!("Property {id} listed at {price} NEAR ({escrow_amount} NEAR held in escrow)");
    }

    info!("Deploy script is complete");

    Ok(())
}

async fn create_signer(worker: &Worker<Sandbox>, name: &str) -> Result<Account> {
    let root = worker.root_account()?;
    let account = root
        .create_subaccount(name)
        .initial_balance(SIGNER_BALANCE)
        .transact()
        .await?
        .into_result()
        .with_context(|| format!("Failed to create the {name} account"))?;
    Ok(account)
}
