use crate::storage::entity;
use log::info;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::time::Duration;

pub async fn establish_connection(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.max_connections(10)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Info);

    let db = Database::connect(opt).await?;

    // 启用 WAL 模式
    if db.get_database_backend() == sea_orm::DatabaseBackend::Sqlite {
        let _ = db
            .execute(sea_orm::Statement::from_string(
                sea_orm::DatabaseBackend::Sqlite,
                "PRAGMA journal_mode=WAL;".to_string(),
            ))
            .await?;
        // 级联删除依赖外键约束
        db.execute(sea_orm::Statement::from_string(
            sea_orm::DatabaseBackend::Sqlite,
            "PRAGMA foreign_keys=ON;".to_string(),
        ))
        .await?;
    }

    // 创建表（如果不存在）。顺序满足外键依赖。
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::country::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::city::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::program_category::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::program::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::program_day::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::day_tour::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::additional_service::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::program_service::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::profile::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::customer_booking::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::approval_token::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    // 唯一索引：同一程序与服务只允许一条关联
    let _ = db
        .execute(sea_orm::Statement::from_string(
            builder,
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_program_services_unique ON program_services(program_id, service_id);".to_string(),
        ))
        .await?;

    // 唯一索引：令牌摘要按其定位，必须唯一
    let _ = db
        .execute(sea_orm::Statement::from_string(
            builder,
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_approval_tokens_sha256 ON approval_tokens(token_sha256);".to_string(),
        ))
        .await?;

    info!("Database connection established with WAL mode and tables initialized.");

    Ok(db)
}
