pub use sea_orm_migration::prelude::*;

mod m20250820_000001_taxonomy;
mod m20250820_000002_lancamentos;
mod m20250905_000001_entry_flags;
mod m20250912_000001_socios;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250820_000001_taxonomy::Migration),
            Box::new(m20250820_000002_lancamentos::Migration),
            Box::new(m20250905_000001_entry_flags::Migration),
            Box::new(m20250912_000001_socios::Migration),
        ]
    }
}
