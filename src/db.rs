use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};

use crate::entities::{api_key, assessment, course, student};

pub async fn connect(url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url);
    options.max_connections(max_connections).sqlx_logging(false);

    Database::connect(options).await
}

/// Creates every application table that does not exist yet. SQLite has no
/// separate migration step, the schema is derived from the entities.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, student::Entity).await?;
    create_table(db, course::Entity).await?;
    create_table(db, assessment::Entity).await?;
    create_table(db, api_key::Entity).await?;

    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;

    Ok(())
}
