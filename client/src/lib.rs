// storefront/client/src/lib.rs

//! Storefront client: the state mirror a shop front-end keeps, with the cart
//! persisted locally and everything else fetched from the REST API.

pub mod api;
pub mod config;
pub mod error;
pub mod persist;
pub mod session;
pub mod state;

pub use api::{ApiClient, HomePageData};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use persist::CartFile;
pub use session::Storefront;
pub use state::{reduce, Action, ClientState, Notification, NotificationKind};
