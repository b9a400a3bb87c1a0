//! CLI argument definitions
//!
//! Every option overrides the matching configuration file value.

use clap::Args;

use crate::common::config::Config;

#[derive(Args, Debug, Default)]
pub struct RelayOptions {
    /// Service socket name or path (default: dumpstate)
    #[arg(long, value_name = "NAME")]
    pub endpoint: Option<String>,

    /// Service to start before connecting (default: dumpstatez)
    #[arg(long, value_name = "NAME")]
    pub service: Option<String>,

    /// Maximum connection attempts, one second apart (default: 20)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub attempts: Option<u32>,

    /// Give up when no data arrives for this many seconds (default: 600)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Do not request a service start, only connect
    #[arg(long)]
    pub no_activate: bool,
}

impl RelayOptions {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.name = endpoint.clone();
        }
        if let Some(service) = &self.service {
            config.service.name = service.clone();
        }
        if let Some(attempts) = self.attempts {
            config.retry.max_attempts = attempts;
        }
        if let Some(timeout) = self.timeout {
            config.transfer.inactivity_timeout_secs = timeout;
        }
    }
}
