pub mod books;

use hondana_kernel::ModuleRegistry;

/// Register all feature modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(books::create_module());
}
