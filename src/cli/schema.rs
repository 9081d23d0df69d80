use bookgraph::{Catalog, MemoryStore, PaginationConfig, SchemaBuilder};
use std::sync::Arc;

/// Print the schema SDL; the schema shape does not depend on the store
pub fn run() -> anyhow::Result<()> {
    let catalog = Catalog::new(Arc::new(MemoryStore::new()), PaginationConfig::default());
    let schema = SchemaBuilder::new(catalog).build()?;
    println!("{}", schema.sdl());
    Ok(())
}
