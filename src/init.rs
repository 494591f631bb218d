use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write;

/// 整个App初始化方法
pub fn init() {
    log_init();
}

/// 初始化日志，stdout 只留给重建出的命令
fn log_init() {
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env)
        .target(Target::Stderr)
        .format(|fmt, record| {
            writeln!(
                fmt,
                "[{} {}] {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                &record.args()
            )
        })
        .init();
}
