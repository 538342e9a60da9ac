//! Transport collaborators.
//!
//! The backends do not speak to the network themselves; they consume one
//! of the two small interfaces here. Both interfaces are assumed correct
//! as primitives: no retry, no timeout policy and no authentication logic
//! lives above them in this crate.

use error::Error;
use serde_json;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use ureq;

/// One-shot HTTP request execution.
pub trait HttpRequest {
    /// Issue a single request and hand back the decoded response body.
    fn request(
        &mut self,
        method: &str,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, Error>;
}

/// A blocking HTTP API transport.
///
/// Paths are joined onto the configured base URL and the API key rides
/// as a query parameter. Responses without a JSON body decode to `null`
/// rather than failing, since several ingestion endpoints acknowledge
/// with an empty 202.
pub struct Api {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl Api {
    /// Create a transport rooted at `base_url` authenticating with
    /// `api_key`.
    pub fn new<S>(base_url: S, api_key: S) -> Api
    where
        S: Into<String>,
    {
        Api {
            agent: ureq::Agent::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

impl HttpRequest for Api {
    fn request(
        &mut self,
        method: &str,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, Error> {
        let url = format!("{}{}?api_key={}", self.base_url, path, self.api_key);
        debug!("{} {}", method, url);
        let response = self.agent.request(method, &url).send_json(body)?;
        let text = response.into_string()?;
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::Null))
    }
}

/// Datagram line delivery.
pub trait LineSender {
    /// Deliver every line of one flush together.
    fn send_lines(&mut self, lines: &[String]) -> Result<(), Error>;
}

/// A UDP line sender.
///
/// Multiple lines ride in a single packet, newline separated. An empty
/// flush sends nothing.
pub struct UdpSender {
    socket: UdpSocket,
    addr: SocketAddr,
}

impl UdpSender {
    /// Create a sender aimed at `addr`, e.g. `"localhost:8125"`.
    pub fn new<A>(addr: A) -> Result<UdpSender, Error>
    where
        A: ToSocketAddrs,
    {
        let addr = addr.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "no address for datagram target",
            )
        })?;
        let socket = if addr.is_ipv4() {
            UdpSocket::bind("0.0.0.0:0")?
        } else {
            UdpSocket::bind("[::]:0")?
        };
        Ok(UdpSender {
            socket: socket,
            addr: addr,
        })
    }
}

impl LineSender for UdpSender {
    fn send_lines(&mut self, lines: &[String]) -> Result<(), Error> {
        if lines.is_empty() {
            return Ok(());
        }
        let packet = lines.join("\n");
        self.socket.send_to(packet.as_bytes(), self.addr)?;
        trace!("flushed {} lines to {}", lines.len(), self.addr);
        Ok(())
    }
}
