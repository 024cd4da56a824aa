use ap_invoice_dashboard::service::UploadTiming;
use ap_invoice_dashboard::{build_router, create_store, AppConfig, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // 生成内存数据
    let store = Arc::new(create_store(config.fixtures.seed)?);
    info!("Data store ready");

    let state = AppState::new(store, UploadTiming::from(&config.upload));
    let app = build_router(state);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /api/invoices              - filtered + sorted invoice table");
    info!("  GET  /api/invoices/export.csv   - CSV of the same view");
    info!("  GET  /api/invoices/:id          - invoice detail");
    info!("  POST /api/invoices/:id/review   - review preview");
    info!("  GET  /api/vendors/:id/invoices  - vendor portal");
    info!("  GET  /api/emails                - email inbox");
    info!("  GET  /api/dashboard             - dashboard summary");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
