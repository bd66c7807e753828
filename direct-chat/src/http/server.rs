//! HTTP server.
//!
//! Listens for requests and maps them to a handler, if any exists for the requested path.
//! If no handler matches, return `404 - Not Found`.

use super::{Error, Handler, Request, Response, Router};

use crate::colors::MaybeColorize;
use crate::config::get_config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::{TcpListener, TcpStream};
use tokio::select;
use tokio::signal::ctrl_c;
use tracing::{debug, error, info};

/// HTTP server.
pub struct Server {
    router: Arc<Router>,
}

impl Server {
    /// Create new HTTP server from a list of routes.
    pub fn new(handlers: Vec<Handler>) -> Result<Self, Error> {
        Ok(Server {
            router: Arc::new(Router::new(handlers)?),
        })
    }

    /// Bind to the configured host and port and serve until Ctrl-C.
    pub async fn launch(self) -> Result<(), Error> {
        let config = get_config();
        let addr = format!("{}:{}", config.general.host, config.general.port);

        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve requests from an already bound listener until Ctrl-C.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Error> {
        info!("Starting {} {}", "direct-chat".green(), "server".purple());
        self.router.log_routes();
        info!("Listening on {}", listener.local_addr()?);

        loop {
            select! {
                _ = ctrl_c() => {
                    info!("Shutting down...");
                    return Ok(());
                }

                result = listener.accept() => {
                    match result {
                        Ok((stream, peer)) => {
                            let router = self.router.clone();
                            tokio::spawn(async move {
                                Self::handle_connection(router, stream, peer).await;
                            });
                        }

                        Err(err) => error!("accept failed: {}", err),
                    }
                }
            }
        }
    }

    async fn handle_connection(router: Arc<Router>, stream: TcpStream, peer: SocketAddr) {
        let mut stream = BufReader::new(BufWriter::new(stream));
        debug!("{} new connection from {:?}", "http".purple(), peer);

        loop {
            let request = match Request::read(&mut stream).await {
                Ok(request) => request,
                Err(Error::MalformedRequest(reason)) => {
                    debug!("{} malformed request from {:?}: {}", "http".purple(), peer, reason);
                    let _ = Self::send_response(&mut stream, Response::bad_request()).await;
                    return;
                }
                Err(err) => {
                    debug!("{} client {:?} disconnected: {}", "http".purple(), peer, err);
                    return;
                }
            };

            let start = Instant::now();

            let (controller_name, response) = match router.find(request.path()) {
                Some((handler, params)) => {
                    let request = request.clone().with_params(params);
                    (handler.controller_name(), handler.handle_internal(request).await)
                }

                None => (std::any::type_name::<Self>(), Response::not_found()),
            };

            Self::log(&request, controller_name, &response, start.elapsed());

            if let Err(err) = Self::send_response(&mut stream, response).await {
                debug!("{} error {:?}", peer, err);
                return;
            }

            if !request.keep_alive() {
                return;
            }
        }
    }

    fn log(request: &Request, controller_name: &str, response: &Response, duration: Duration) {
        let code = response.status().code();
        let code = match code {
            500.. => code.to_string().red(),
            400.. => code.to_string().yellow(),
            _ => code.to_string(),
        };
        let duration = (duration.as_secs_f64() * 1000.0) as f32;

        info!(
            "{} {} {} {} ({:.3} ms)",
            request.method().to_string().purple(),
            request.path().purple(),
            controller_name.green(),
            code,
            duration,
        );
    }

    async fn send_response(
        mut stream: impl AsyncWrite + Unpin,
        response: Response,
    ) -> Result<(), Error> {
        response.send(&mut stream).await?;
        stream.flush().await?;

        Ok(())
    }
}
