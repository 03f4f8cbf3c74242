//! Application bootstrap shared by the `reel-app` binary and the CLI.

use anyhow::Context;
use reel_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry holding every application module
pub fn build_registry() -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry).context("failed to register modules")?;
    Ok(registry)
}

/// Initialize modules, serve HTTP until shutdown, then stop modules.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "reel bootstrap starting"
    );

    let registry = build_registry()?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = reel_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served?;

    tracing::info!("reel shutdown complete");
    Ok(())
}
