use std::net::{SocketAddr, UdpSocket};

use crate::schedule::types::Constraints;

// Connecting a UDP socket only asks the kernel for a route; nothing is sent.
const ROUTE_PROBE: ([u8; 4], u16) = ([1, 1, 1, 1], 53);

/// Whether the host currently has a route to the outside world.
pub fn network_available() -> bool {
    let probe = SocketAddr::from(ROUTE_PROBE);
    UdpSocket::bind(("0.0.0.0", 0))
        .and_then(|socket| socket.connect(probe))
        .is_ok()
}

impl Constraints {
    pub fn satisfied(&self) -> bool {
        self.check(network_available)
    }

    fn check(&self, network: impl FnOnce() -> bool) -> bool {
        !self.require_network || network()
    }
}
