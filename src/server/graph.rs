//! Dispatch graph construction.
//!
//! ```text
//! Director
//!   ├─ default  → SharedData(/wsdls) → catalog "Unsecured services"
//!   ├─ "secure" → BasicAuth → SharedData(/wsdls) → catalog "Secured services"
//!   └─ "exit"   → ShutdownTrigger → ShutdownHandle::shutdown
//! ```

use std::sync::Arc;

use crate::app::{catalog, Catalog, SharedData};
use crate::config::ServerConfig;
use crate::http::{AxumApp, SharedHandler};
use crate::lifecycle::{ShutdownHandle, ShutdownTrigger};
use crate::routing::{Director, RouteTable, RouteTableError};
use crate::security::BasicAuth;

/// Mount name of the authenticated application.
pub const SECURE_MOUNT: &str = "secure";

/// Mount name of the shutdown trigger.
pub const EXIT_MOUNT: &str = "exit";

/// One independently built application instance with its shared files.
fn application(config: &ServerConfig, name: &str) -> SharedData<AxumApp> {
    let app = AxumApp::new(catalog::router(Catalog::new(name, &config.catalog)));
    SharedData::new(
        app,
        config.static_files.url_prefix.clone(),
        config.static_files.directory.clone(),
    )
}

/// Build the full dispatch graph, with `/exit` bound to `shutdown`.
pub fn build_dispatch_graph(
    config: &ServerConfig,
    shutdown: ShutdownHandle,
) -> Result<Director, RouteTableError> {
    let unsecured = application(config, "Unsecured services");
    let secured = BasicAuth::new(
        application(config, "Secured services"),
        config.auth.realm.clone(),
    );

    let routes = RouteTable::new([
        (SECURE_MOUNT, Arc::new(secured) as SharedHandler),
        (
            EXIT_MOUNT,
            Arc::new(ShutdownTrigger::for_handle(shutdown)) as SharedHandler,
        ),
    ])?;

    Ok(Director::new(Arc::new(unsecured), routes))
}
