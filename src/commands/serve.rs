use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::fetcher::IssueFetcher;
use crate::server::{self, AppState};

pub async fn run(config: &Config, fetcher: IssueFetcher, bind: Option<&str>) -> Result<()> {
    let addr = config.bind_addr(bind)?;

    if !fetcher.has_credential() {
        info!("No Linear API key configured, serving setup instructions");
    }

    let state = AppState::new(fetcher, config.revalidate());
    server::serve(addr, state).await
}
