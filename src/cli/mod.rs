//! CLI command handling
//!
//! Starts the collection service and relays its output to stdout.

mod activate;

pub use activate::ServiceActivator;

use crate::commands::RelayOptions;
use crate::common::config::Config;
use crate::common::Result;
use crate::ipc::transport;
use crate::relay::{self, RelaySettings, RelaySummary};

/// Generate a bug report and stream it to stdout
pub async fn run(options: RelayOptions) -> Result<RelaySummary> {
    let mut config = Config::load()?;
    options.apply(&mut config);

    if options.no_activate {
        tracing::debug!("Skipping service activation");
    } else {
        ServiceActivator::from_config(&config.service).activate().await;
    }

    let settings = RelaySettings::from_config(&config);
    let endpoint = settings.endpoint.as_str();
    let mut stdout = tokio::io::stdout();

    relay::run_relay(&settings, || transport::connect(endpoint), &mut stdout).await
}
