//! DNS resolver initialization.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::{system_conf, TokioAsyncResolver};
use log::{debug, warn};

use crate::error_handling::InitializationError;

/// Builds the shared resolver used for every TXT query of a run.
///
/// With `nameservers` empty the system configuration (`/etc/resolv.conf`) is
/// used, falling back to the library defaults if it cannot be read. Explicit
/// nameservers replace it entirely and are queried on port 53.
///
/// Each query gets a single attempt bounded by `timeout`. `ndots` is 0 so
/// scanned names are never expanded with search domains.
///
/// # Errors
///
/// `InitializationError::DnsResolverError` if `timeout` is zero.
pub fn init_resolver(
    timeout: Duration,
    nameservers: &[IpAddr],
) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    if timeout.is_zero() {
        return Err(InitializationError::DnsResolverError(
            "DNS timeout must be greater than zero".to_string(),
        ));
    }

    let (config, mut opts) = if nameservers.is_empty() {
        match system_conf::read_system_conf() {
            Ok(system) => system,
            Err(e) => {
                warn!("could not read system DNS configuration ({e}), using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        }
    } else {
        debug!("using nameservers {nameservers:?}");
        let mut config = ResolverConfig::new();
        for ip in nameservers {
            let socket_addr = SocketAddr::new(*ip, 53);
            config.add_name_server(NameServerConfig::new(socket_addr, Protocol::Udp));
            config.add_name_server(NameServerConfig::new(socket_addr, Protocol::Tcp));
        }
        (config, ResolverOpts::default())
    };

    opts.timeout = timeout;
    opts.attempts = 1;
    opts.ndots = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(config, opts)))
}
