pub mod movies;

use reel_kernel::ModuleRegistry;

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) -> anyhow::Result<()> {
    registry.register(movies::create_module())?;
    Ok(())
}
