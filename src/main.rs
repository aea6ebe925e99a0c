use shopfloor_api::config::Config;
use shopfloor_api::LocalService;
use tracing::info;

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: sqlx::PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    let config = Config::from_secrets(&secrets);
    info!("Настройки прочитаны");
    let router = LocalService::new(pool, config).start().await?;
    info!("Сервис учета заказов готов к работе");
    Ok(router.into())
}
