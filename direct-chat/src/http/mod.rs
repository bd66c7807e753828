//! HTTP/1.1 plumbing: request parsing, responses, routing and the server loop.
pub mod cookies;
pub mod error;
pub mod handler;
pub mod head;
pub mod request;
pub mod response;
pub mod router;
pub mod server;

pub use cookies::{Cookie, Cookies};
pub use error::Error;
pub use handler::{Handler, Params};
pub use head::{Head, Method, Version};
pub use request::Request;
pub use response::{Body, Response, Status};
pub use router::Router;
pub use server::Server;
