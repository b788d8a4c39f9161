//! 로거 초기화 통합 테스트
//!
//! 전역 기본 디스패처 설치는 프로세스당 한 번이므로 별도의 테스트
//! 바이너리에서 실행합니다.

use anyhow::Result;
use splitlog::LogConfig;
use tempfile::TempDir;

#[tokio::test]
async fn test_init_installs_global_logger() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = LogConfig {
        format: "json".to_string(),
        outputs: vec!["split".to_string()],
        log_path: temp_dir.path().to_string_lossy().into_owned(),
        file_prefix: "boot".to_string(),
        ..LogConfig::default()
    };

    let guard = splitlog::init(config)?;

    tracing::info!(user = "kim", "사용자 인증 성공");
    tracing::error!(error = "timeout", "데이터베이스 연결 실패");
    // 기본 레벨이 info이므로 debug는 걸러져야 함
    tracing::debug!("걸러질 메시지");

    guard.shutdown();

    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let info = std::fs::read_to_string(
        temp_dir.path().join(format!("boot-info-{}.log", date)),
    )?;
    let error = std::fs::read_to_string(
        temp_dir.path().join(format!("boot-error-{}.log", date)),
    )?;

    // 초기화 완료 기록과 이후 이벤트가 레벨별 파일에 남아야 함
    assert!(info.contains("로거 초기화 완료"));
    assert!(info.contains("사용자 인증 성공"));
    assert!(!info.contains("걸러질 메시지"));
    assert!(error.contains("데이터베이스 연결 실패"));
    assert!(!error.contains("사용자 인증 성공"));

    // 종료 후의 이벤트는 파일에 도달하지 않음 (에러는 엔진이 삼킴)
    tracing::info!("닫힌 뒤 메시지");
    let info_after = std::fs::read_to_string(
        temp_dir.path().join(format!("boot-info-{}.log", date)),
    )?;
    assert!(!info_after.contains("닫힌 뒤 메시지"));

    // 전역 설치는 한 번만 성공
    let second = splitlog::init(LogConfig::default());
    assert!(second.is_err());

    Ok(())
}
