use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static PERF_LOG_ENABLED: AtomicBool = AtomicBool::new(true);

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 读取性能日志开关
///
/// 开关：
/// - 默认开启
/// - `STOCK_RETURN_ADVISOR_PERF=0` 关闭阶段耗时日志
pub fn configure_from_env() {
    let enabled = match std::env::var("STOCK_RETURN_ADVISOR_PERF") {
        Ok(v) => is_true(&v),
        Err(_) => true,
    };
    PERF_LOG_ENABLED.store(enabled, Ordering::Relaxed);
}

/// 性能统计 Guard：记录阶段 elapsed_ms + 处理行数
///
/// 使用方式：
/// ```ignore
/// let mut perf = stock_return_advisor::perf::PerfGuard::new("recommend");
/// // do work...
/// perf.set_rows(table.len());
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    rows: usize,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            rows: 0,
        }
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if !PERF_LOG_ENABLED.load(Ordering::Relaxed) {
            return;
        }

        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            rows = self.rows,
            "done"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_true() {
        assert!(is_true("1"));
        assert!(is_true(" Yes "));
        assert!(!is_true("0"));
        assert!(!is_true("off"));
    }
}
