//! 进程级的运行环境: 日志后端和会话计数.
//!
//! 由调用者显式创建一次, 再以引用传给 [`Dispatcher`](crate::Dispatcher).

use crate::{AkryptConfig, AkryptError, LogSink};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub struct Environment {
    config: AkryptConfig,
    opened: AtomicUsize,
    live: AtomicUsize,
    wiped: AtomicUsize,
    running: AtomicBool,
}

impl Environment {
    pub fn init(config: AkryptConfig) -> Result<Self, AkryptError> {
        let level = config.level_filter()?;

        let target = match config.log_sink {
            LogSink::Stdout => Some(env_logger::Target::Stdout),
            LogSink::Stderr => Some(env_logger::Target::Stderr),
            LogSink::Off => None,
        };
        if let Some(target) = target {
            if let Err(e) = env_logger::builder()
                .filter_level(level)
                .parse_default_env()
                .target(target)
                .try_init()
            {
                log::debug!("logger already installed, {e}");
            }
        }

        log::debug!("environment initialized, log level `{level}`");

        Ok(Self {
            config,
            opened: AtomicUsize::new(0),
            live: AtomicUsize::new(0),
            wiped: AtomicUsize::new(0),
            running: AtomicBool::new(true),
        })
    }

    pub fn config(&self) -> &AkryptConfig {
        &self.config
    }

    pub fn sessions_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn live_sessions(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Released sessions whose key schedule and chaining state were observed
    /// zeroed at release.
    pub fn sessions_wiped(&self) -> usize {
        self.wiped.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub(crate) fn acquire(&self) {
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn release(&self, wiped: bool) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        if wiped {
            self.wiped.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Flushes the logger and reports sessions still open. Dropping the
    /// environment does the same.
    pub fn shutdown(self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }

        let live = self.live_sessions();
        if live > 0 {
            log::warn!("environment shut down with {live} sessions still open");
        }
        log::debug!(
            "environment shut down, {} sessions served",
            self.sessions_opened()
        );
        log::logger().flush();
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}
