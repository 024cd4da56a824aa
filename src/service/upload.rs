//! 供应商门户的模拟上传
//!
//! idle -> uploading (每个 tick 进度 +step, 封顶 100) -> success -> idle。
//! 只有 idle 状态才能开始新的上传。

use crate::config::UploadConfig;
use crate::error::DashboardError;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadPhase {
    Idle,
    Uploading,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadState {
    pub phase: UploadPhase,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            phase: UploadPhase::Idle,
            progress: 0,
            file_name: None,
        }
    }
}

impl UploadState {
    pub fn start(&mut self, file_name: Option<String>) -> Result<(), DashboardError> {
        if self.phase != UploadPhase::Idle {
            return Err(DashboardError::UploadBusy);
        }
        self.phase = UploadPhase::Uploading;
        self.progress = 0;
        self.file_name = file_name;
        Ok(())
    }

    /// 进度前进一步, 返回是否有变化
    pub fn tick(&mut self, step: u8) -> bool {
        if self.phase != UploadPhase::Uploading || self.progress >= 100 {
            return false;
        }
        self.progress = self.progress.saturating_add(step).min(100);
        true
    }

    pub fn complete(&mut self) -> bool {
        if self.phase != UploadPhase::Uploading {
            return false;
        }
        self.phase = UploadPhase::Success;
        self.progress = 100;
        true
    }

    pub fn reset(&mut self) {
        *self = UploadState::default();
    }
}

/// 上传节奏
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTiming {
    pub tick: Duration,
    pub step_percent: u8,
    pub complete_after: Duration,
    pub reset_after: Duration,
}

impl Default for UploadTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            step_percent: 5,
            complete_after: Duration::from_secs(2),
            reset_after: Duration::from_secs(3),
        }
    }
}

impl From<&UploadConfig> for UploadTiming {
    fn from(cfg: &UploadConfig) -> Self {
        Self {
            tick: Duration::from_millis(cfg.tick_ms),
            step_percent: cfg.step_percent,
            complete_after: Duration::from_millis(cfg.complete_after_ms),
            reset_after: Duration::from_millis(cfg.reset_after_ms),
        }
    }
}

/// 上传状态的持有者, 状态变化通过 watch 通道广播
pub struct UploadTracker {
    state: watch::Sender<UploadState>,
    timing: UploadTiming,
}

impl UploadTracker {
    pub fn new(mut timing: UploadTiming) -> Self {
        // interval 不接受零周期
        timing.tick = timing.tick.max(Duration::from_millis(1));
        let (state, _) = watch::channel(UploadState::default());
        Self { state, timing }
    }

    pub fn current(&self) -> UploadState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    /// 开始上传并启动后台计时任务; 非 idle 时返回 UploadBusy
    pub fn start(self: &Arc<Self>, file_name: Option<String>) -> Result<UploadState, DashboardError> {
        let mut outcome = Ok(());
        self.state.send_if_modified(|state| match state.start(file_name) {
            Ok(()) => true,
            Err(e) => {
                outcome = Err(e);
                false
            }
        });
        outcome?;

        tracing::info!("Upload started, completes in {:?}", self.timing.complete_after);
        let me = Arc::clone(self);
        tokio::spawn(async move { me.drive().await });
        Ok(self.current())
    }

    async fn drive(&self) {
        let timing = self.timing;
        let deadline = time::sleep_until(Instant::now() + timing.complete_after);
        tokio::pin!(deadline);

        let mut interval = time::interval(timing.tick);
        // 第一个 tick 立即返回
        interval.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => break,
                _ = interval.tick() => {
                    self.state.send_if_modified(|state| state.tick(timing.step_percent));
                }
            }
        }

        self.state.send_if_modified(UploadState::complete);
        tracing::info!("Upload finished");

        time::sleep(timing.reset_after).await;
        self.state.send_modify(UploadState::reset);
        tracing::debug!("Upload state reset to idle");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_only_from_idle() {
        let mut state = UploadState::default();
        state.start(Some("invoice.pdf".into())).unwrap();
        assert_eq!(state.phase, UploadPhase::Uploading);
        assert!(matches!(state.start(None), Err(DashboardError::UploadBusy)));

        state.complete();
        assert!(matches!(state.start(None), Err(DashboardError::UploadBusy)));

        state.reset();
        assert_eq!(state, UploadState::default());
        assert!(state.start(None).is_ok());
    }

    #[test]
    fn progress_caps_at_100() {
        let mut state = UploadState::default();
        assert!(!state.tick(5));
        state.start(None).unwrap();
        for _ in 0..30 {
            state.tick(5);
        }
        assert_eq!(state.progress, 100);
        assert!(!state.tick(5));
    }

    #[tokio::test(start_paused = true)]
    async fn tracker_runs_full_cycle() {
        let tracker = Arc::new(UploadTracker::new(UploadTiming::default()));
        let started = tracker.start(Some("INV-001.pdf".into())).unwrap();
        assert_eq!(started.phase, UploadPhase::Uploading);
        assert_eq!(started.progress, 0);
        assert!(matches!(tracker.start(None), Err(DashboardError::UploadBusy)));

        time::sleep(Duration::from_millis(1050)).await;
        let halfway = tracker.current();
        assert_eq!(halfway.phase, UploadPhase::Uploading);
        assert_eq!(halfway.progress, 50);

        time::sleep(Duration::from_millis(1000)).await;
        let done = tracker.current();
        assert_eq!(done.phase, UploadPhase::Success);
        assert_eq!(done.progress, 100);

        time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(tracker.current(), UploadState::default());
        assert!(tracker.start(None).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_changes() {
        let tracker = Arc::new(UploadTracker::new(UploadTiming::default()));
        let mut rx = tracker.subscribe();
        tracker.start(None).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().phase, UploadPhase::Uploading);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_tick_still_completes_and_resets() {
        let timing = UploadTiming {
            tick: Duration::ZERO,
            step_percent: 5,
            complete_after: Duration::from_millis(50),
            reset_after: Duration::from_millis(50),
        };
        let tracker = Arc::new(UploadTracker::new(timing));
        tracker.start(None).unwrap();

        time::sleep(Duration::from_millis(60)).await;
        assert_eq!(tracker.current().phase, UploadPhase::Success);

        time::sleep(Duration::from_millis(60)).await;
        assert_eq!(tracker.current(), UploadState::default());
        assert!(tracker.start(None).is_ok());
    }
}
