pub mod admin;
pub mod http;

use crate::store::SharedStore;

/// App state for HTTP handlers. The route set is mounted once at the root
/// and once under /debug; `prefix` is whatever the mount point is, so
/// rendered links and redirects stay inside the right tree.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub prefix: &'static str,
}
