use super::service::MuxService;
use may::coroutine::JoinHandle;
use may_minihttp::HttpServerWithHeaders;
use std::any::Any;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Maximum request headers accepted per request
pub const MAX_REQUEST_HEADERS: usize = 32;

const READY_POLL_INTERVAL: Duration = Duration::from_millis(5);

impl MuxService {
    /// Bind `addr` and serve this mux on the `may` runtime.
    ///
    /// Every connection gets its own clone of the service; the dispatcher
    /// behind it is shared.
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not resolve or cannot be bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")
            })?;
        let routes = self.dispatcher().router().len();
        let handle = HttpServerWithHeaders::<_, MAX_REQUEST_HEADERS>(self).start(addr)?;
        info!(addr = %addr, routes, "Mux listening");
        Ok(ServerHandle { addr, handle })
    }
}

/// A running mux: its bound address and the accept-loop coroutine
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Poll until the listener accepts a TCP connection or `timeout` elapses.
    ///
    /// # Errors
    ///
    /// `TimedOut` when no connection succeeded in time.
    pub fn wait_ready(&self, timeout: Duration) -> io::Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("mux on {} not accepting connections", self.addr),
                ));
            }
            thread::sleep(READY_POLL_INTERVAL);
        }
    }

    /// Cancel the accept loop and wait for it to unwind.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the panic message if the accept loop had
    /// panicked before it was cancelled.
    pub fn stop(self) -> io::Result<()> {
        // SAFETY: cancelling unwinds the accept coroutine; it owns no state
        // that outlives it and this handle is the only one.
        unsafe {
            self.handle.coroutine().cancel();
        }
        match self.handle.join() {
            Ok(()) => {}
            Err(payload) => {
                // cancellation unwinds with a non-string payload
                if let Some(message) = panic_message(payload.as_ref()) {
                    error!(addr = %self.addr, panic = %message, "Mux accept loop panicked");
                    return Err(io::Error::other(format!(
                        "mux on {} panicked: {message}",
                        self.addr
                    )));
                }
            }
        }
        info!(addr = %self.addr, "Mux stopped");
        Ok(())
    }

    /// Block until the accept loop ends; it only ends on panic or cancel.
    ///
    /// # Errors
    ///
    /// Returns the panic payload if the accept loop panicked.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

/// Text of a `panic!` payload; `None` for anything else
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_from_str_and_string() {
        let literal: Box<dyn Any + Send> = Box::new("accept failed");
        assert_eq!(panic_message(literal.as_ref()), Some("accept failed"));

        let formatted: Box<dyn Any + Send> = Box::new(format!("bad fd {}", 7));
        assert_eq!(panic_message(formatted.as_ref()), Some("bad fd 7"));
    }

    #[test]
    fn test_panic_message_ignores_other_payloads() {
        #[derive(Debug)]
        struct Cancelled;
        let payload: Box<dyn Any + Send> = Box::new(Cancelled);
        assert_eq!(panic_message(payload.as_ref()), None);
    }
}
