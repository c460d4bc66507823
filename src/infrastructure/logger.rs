//! 日志基础设施

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化全局日志。`RUST_LOG` 优先于配置中的级别。
    ///
    /// 返回的 guard 必须在进程退出前一直持有，否则文件日志会丢失。
    pub fn init(config: &LoggingConfig) -> std::io::Result<Vec<WorkerGuard>> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

        let mut guards = Vec::new();

        let file_layer = match &config.log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let file_appender = rolling::daily(dir, &config.file_prefix);
                let (writer, guard) = non_blocking(file_appender);
                guards.push(guard);
                Some(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(false)
                        .with_thread_ids(true),
                )
            }
            None => None,
        };

        let console_layer = config
            .console_output
            .then(|| fmt::layer().with_writer(std::io::stdout).with_ansi(true));

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();

        Ok(guards)
    }
}
