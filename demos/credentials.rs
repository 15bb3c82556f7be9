use anyhow::Context;
use binance_sdk::spot::Credentials as SpotCredentials;
use clap::Args;

#[derive(Debug, Args)]
pub struct Credentials {
    /// API key. Falls back to BINANCE_API_KEY (a `.env` file is honoured).
    #[arg(long)]
    api_key: Option<String>,
    /// API secret. Falls back to BINANCE_API_SECRET.
    #[arg(long)]
    api_secret: Option<String>,
}

impl Credentials {
    pub fn get(&self) -> anyhow::Result<SpotCredentials> {
        let _ = dotenvy::dotenv();
        match (self.api_key.as_ref(), self.api_secret.as_ref()) {
            (Some(key), Some(secret)) => Ok(SpotCredentials::new(key, secret)),
            (Some(_), None) | (None, Some(_)) => Err(anyhow::anyhow!(
                "--api-key and --api-secret must be given together"
            )),
            (None, None) => SpotCredentials::from_env()
                .context("Missing credentials. Use --api-key/--api-secret or BINANCE_API_KEY/BINANCE_API_SECRET"),
        }
    }
}
