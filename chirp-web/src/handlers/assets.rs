//! Static page and PWA resources.

use axum::{
    http::{header, HeaderValue},
    Router,
};
use std::path::PathBuf;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeader;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::AssetSettings;
use crate::AppState;

const MANIFEST_CONTENT_TYPE: &str = "application/manifest+json";
const SCRIPT_CONTENT_TYPE: &str = "application/javascript";

type UncachedFile = SetResponseHeader<SetResponseHeader<ServeFile, HeaderValue>, HeaderValue>;

/// Routes for the page, manifest, service worker and icons.
///
/// Missing files fall through to the file service's own 404. `ServeDir`
/// rejects `..` segments, so icon requests cannot leave the icons directory.
pub fn routes(assets: &AssetSettings) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(assets.index_path()))
        .route_service(
            "/manifest.json",
            uncached_file(assets.manifest_path(), MANIFEST_CONTENT_TYPE),
        )
        .route_service(
            "/service-worker.js",
            uncached_file(assets.service_worker_path(), SCRIPT_CONTENT_TYPE),
        )
        .nest_service("/icons", ServeDir::new(assets.icons_dir()))
}

/// Serve `path` with a fixed content type and `Cache-Control: no-cache`, so
/// browsers revalidate manifests and service workers on every load.
fn uncached_file(path: PathBuf, content_type: &'static str) -> UncachedFile {
    ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static(content_type),
        ))
        .service(ServeFile::new(path))
}
