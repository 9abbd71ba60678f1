use anyhow::{ensure, Context, Result};
use std::env;
use std::path::PathBuf;

/// Deployer configuration loaded from environment variables. Everything has
/// a default; the deployer takes no flags.
#[derive(Debug, Clone)]
pub struct Config {
    // Prebuilt contract wasm; compiled from source when unset
    pub token_wasm: Option<PathBuf>,
    pub escrow_wasm: Option<PathBuf>,

    // Crate paths used when compiling the contracts
    pub token_project: String,
    pub escrow_project: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let config = Self {
            token_wasm: env::var("ESTATE_TOKEN_WASM").ok().map(PathBuf::from),
            escrow_wasm: env::var("ESTATE_ESCROW_WASM").ok().map(PathBuf::from),
            token_project: env::var("ESTATE_TOKEN_PROJECT")
                .unwrap_or_else(|_| "./contracts/estate-token".to_string()),
            escrow_project: env::var("ESTATE_ESCROW_PROJECT")
                .unwrap_or_else(|_| "./contracts/estate-escrow".to_string()),
        };
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for wasm in [&self.token_wasm, &self.escrow_wasm].into_iter().flatten() {
            ensure!(
                wasm.is_file(),
                "Configured wasm file does not exist: {}",
                wasm.display()
            );
        }
        Ok(())
    }

    pub async fn load_token_wasm(&self) -> Result<Vec<u8>> {
        Self::load(&self.token_wasm, &self.token_project).await
    }

    pub async fn load_escrow_wasm(&self) -> Result<Vec<u8>> {
        Self::load(&self.escrow_wasm, &self.escrow_project).await
    }

    async fn load(prebuilt: &Option<PathBuf>, project: &str) -> Result<Vec<u8>> {
        match prebuilt {
            Some(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read wasm at {}", path.display())),
            None => near_workspaces::compile_project(project)
                .await
                .with_context(|| format!("Failed to compile contract at {project}")),
        }
    }
}
