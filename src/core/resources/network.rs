//=========================================================================
// Network Handle
//=========================================================================
//
// Session-owned network subsystem instance. Created last during startup,
// released first during shutdown. Protocol handling lives elsewhere; this
// handle only carries the configured peer address.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Network =============================================================

pub struct Network {
    address: String,
}

impl Network {
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        info!(target: "session", "Network subsystem up (peer address {})", address);

        #[cfg(test)]
        crate::testing::record("open network");

        Self { address }
    }

    /// Address used when joining a networked game.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
        debug!(target: "session", "Network peer address set to {}", self.address);
    }
}

impl Drop for Network {
    fn drop(&mut self) {
        debug!(target: "session", "Network subsystem shut down");

        #[cfg(test)]
        crate::testing::record("release network");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
