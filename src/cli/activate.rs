//! Service activation
//!
//! Asks the init system to start the collection service by writing the
//! control property (`setprop ctl.start <service>` on Android). The request
//! is fire-and-forget: whether the service actually came up is discovered by
//! the connect loop.

use std::io;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

use crate::common::config::ServiceConfig;

/// One-shot request to start a named service
#[derive(Debug, Clone)]
pub struct ServiceActivator {
    program: String,
    property: String,
    service: String,
}

impl ServiceActivator {
    pub fn new(
        program: impl Into<String>,
        property: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            property: property.into(),
            service: service.into(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            &config.control_program,
            &config.control_property,
            &config.name,
        )
    }

    /// Build the control command
    ///
    /// stdout is discarded: it carries the bug report.
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(&self.property)
            .arg(&self.service)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());
        command
    }

    /// Send the start request and report how the control program exited
    pub async fn request(&self) -> io::Result<ExitStatus> {
        self.command().status().await
    }

    /// Send the start request, logging instead of failing
    pub async fn activate(&self) {
        tracing::debug!(
            service = %self.service,
            "Requesting start via {} {}",
            self.program,
            self.property
        );

        match self.request().await {
            Ok(status) if status.success() => {}
            Ok(status) => {
                tracing::warn!(service = %self.service, %status, "Service start request failed")
            }
            Err(e) => {
                tracing::warn!(
                    service = %self.service,
                    "Failed to run {}: {}",
                    self.program,
                    e
                )
            }
        }
    }
}
