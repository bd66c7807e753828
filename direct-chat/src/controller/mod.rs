//! Controllers handle requests matched by the router.
use async_trait::async_trait;

pub mod chat;
pub mod error;
pub mod session;

pub use chat::ChatController;
pub use error::Error;
pub use session::{Session, SESSION_COOKIE};

use crate::http::{Error as HttpError, Handler, Request, Response};

use tracing::error;

/// The HTTP controller.
///
/// The most basic version of a controller handles all requests
/// which match the path it's assigned to.
#[async_trait]
pub trait Controller: Sync + Send {
    fn route(self, path: &str) -> Result<Handler, HttpError>
    where
        Self: Sized + 'static,
    {
        Handler::route(path, self)
    }

    /// Call the controller and turn errors into error pages.
    async fn handle_internal(&self, request: Request) -> Response {
        match self.handle(&request).await {
            Ok(response) => response,
            Err(err) => {
                error!("{}", err);

                match err {
                    Error::HttpError(err) if err.code() == 400 => Response::bad_request(),
                    err => Response::internal_error(err),
                }
            }
        }
    }

    /// Handle the request. Implement this function to define how your controller
    /// will respond to requests.
    async fn handle(&self, request: &Request) -> Result<Response, Error>;

    /// The name of this controller. Used for logging.
    fn controller_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A controller serving a page: `GET` renders it, everything else is `405`.
#[async_trait]
#[allow(unused_variables)]
pub trait PageController: Controller {
    async fn get(&self, request: &Request) -> Result<Response, Error>;

    async fn post(&self, request: &Request) -> Result<Response, Error> {
        Ok(Response::method_not_allowed())
    }

    async fn handle(&self, request: &Request) -> Result<Response, Error> {
        if request.get() {
            PageController::get(self, request).await
        } else if request.post() {
            PageController::post(self, request).await
        } else {
            Ok(Response::method_not_allowed())
        }
    }
}
