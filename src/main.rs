use anyhow::Context;
use product_store::{
    app::{create_router, product::ProductService, AppState},
    infrastructure::{config::load_config, database::DatabaseManager, logger::Logger},
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("加载配置失败")?;
    let _guards = Logger::init(&config.logging).context("初始化日志失败")?;

    info!("启动商品存储服务...");

    let db = DatabaseManager::new(&config.database.url)
        .await
        .map_err(|e| {
            error!("数据库连接失败: {}", e);
            e
        })
        .context("数据库连接失败")?;
    db.sync_schema().await.context("创建数据表失败")?;

    let state = AppState {
        product_service: ProductService::new(&db),
    };
    let app = create_router(state);

    let addr = config.http.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 服务运行在 http://{}", listener.local_addr()?);
    info!("   GET    /products      - 获取商品列表");
    info!("   POST   /products      - 添加商品");
    info!("   PUT    /products/:id  - 更新商品");
    info!("   DELETE /products/:id  - 删除商品");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    db.close().await;
    served?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("无法监听 Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到停止信号，正在关闭...");
}
