//! 자정 기준 로그 파일 회전 스케줄러
//!
//! 분할 출력마다 하나의 백그라운드 태스크가 로컬 자정까지 남은 시간을
//! 계산해 대기한 뒤 파일 세트를 다시 엽니다. 대기 시간은 매 주기마다
//! 벽시계에서 다시 계산하므로 서머타임 전환이나 프로세스 시작 시각과
//! 무관하게 날짜 스탬프가 실제 로컬 날짜를 따라갑니다.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, LocalResult, TimeZone};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::error;

use crate::error::SplitLogError;
use crate::split::SplitInner;

/// 회전 태스크 명령
#[derive(Debug)]
pub(crate) enum RotateCommand {
    /// 즉시 파일 세트 재구성
    Reopen,
    /// 태스크 종료
    Shutdown,
}

/// 자정 계산이 불가능한 경계 상황에서 쓰는 대체 대기 시간
const FALLBACK_WAIT: Duration = Duration::from_secs(60 * 60 * 24);

/// 다음 로컬 자정까지 남은 시간 계산
///
/// 서머타임 전환으로 자정이 두 번 존재하면 이른 쪽을, 자정이 사라진
/// 날이면 01:00을 기준으로 삼습니다.
pub(crate) fn duration_until_next_midnight(now: DateTime<Local>) -> Duration {
    let Some(tomorrow) = now.date_naive().succ_opt() else {
        return FALLBACK_WAIT;
    };

    let next = [0, 1].iter().find_map(|&hour| {
        let naive = tomorrow.and_hms_opt(hour, 0, 0)?;
        match Local.from_local_datetime(&naive) {
            LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => Some(t),
            LocalResult::None => None,
        }
    });

    match next {
        Some(next) => next
            .signed_duration_since(now)
            .to_std()
            // 시계가 뒤로 가는 극단적 경우에도 바쁜 대기는 피함
            .unwrap_or(Duration::from_secs(1))
            .max(Duration::from_secs(1)),
        None => FALLBACK_WAIT,
    }
}

/// 회전 스케줄러 태스크 시작
///
/// 자정 대기와 명령 채널을 함께 기다립니다. `Shutdown` 명령이나 채널
/// 닫힘(모든 송신자 드롭)으로 종료되며, 종료 후에는 어떤 재열기도
/// 시도하지 않습니다.
pub(crate) fn spawn(inner: Arc<SplitInner>, mut commands: mpsc::UnboundedReceiver<RotateCommand>) {
    tokio::spawn(async move {
        loop {
            let wait = duration_until_next_midnight(Local::now());

            tokio::select! {
                _ = sleep(wait) => {
                    if !reopen_and_report(&inner) {
                        return;
                    }
                }
                cmd = commands.recv() => {
                    match cmd {
                        Some(RotateCommand::Reopen) => {
                            if !reopen_and_report(&inner) {
                                return;
                            }
                        }
                        Some(RotateCommand::Shutdown) | None => return,
                    }
                }
            }
        }
    });
}

/// 재열기 수행, 실패는 보고하고 계속 진행
///
/// 실패한 회전은 다음 자정에 자연히 재시도되며 그때까지 기존(어제)
/// 핸들로 계속 기록합니다. 반환값이 false면 출력이 닫힌 것이므로 태스크를
/// 종료해야 합니다.
fn reopen_and_report(inner: &Arc<SplitInner>) -> bool {
    match inner.reopen() {
        Ok(()) => true,
        Err(SplitLogError::Closed) => false,
        Err(e) => {
            error!(error = %e, "로그 파일 회전 실패");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_duration_until_next_midnight_bounds() {
        let wait = duration_until_next_midnight(Local::now());

        // 항상 양수이고, 서머타임을 감안해도 25시간을 넘지 않음
        assert!(wait >= Duration::from_secs(1));
        assert!(wait <= Duration::from_secs(25 * 60 * 60));
    }

    #[test]
    fn test_wakeup_lands_on_day_boundary() {
        let now = Local::now();
        let wait = duration_until_next_midnight(now);

        let wake = now
            + chrono::Duration::from_std(wait).expect("Test assertion failed");

        // 깨어나는 시각은 다음 날의 자정(또는 서머타임 전환일의 01:00)
        assert_eq!(wake.date_naive(), now.date_naive().succ_opt().expect("Test assertion failed"));
        assert!(wake.hour() <= 1);
        assert_eq!(wake.minute(), 0);
        assert_eq!(wake.second(), 0);
    }
}
