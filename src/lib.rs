//! 레벨별 분할 로그 출력 라이브러리
//!
//! tracing 기반 구조화 로깅에 레벨별 파일 분리와 날짜별 자동 회전을
//! 더하는 얇은 파사드입니다.
//!
//! # 주요 기능
//! - **레벨별 로그 분리**: INFO/WARN/ERROR를 각각 별도 파일에 기록
//! - **날짜별 파일 관리**: 로컬 자정마다 새 날짜 파일로 회전
//! - **제로값 안전 설정 병합**: 설정 파일의 빈 값은 기본값을 덮지 않음
//! - **스레드 안전**: 동시 쓰기와 회전이 하나의 락으로 직렬화
//!
//! # 사용 예시
//!
//! ```no_run
//! use splitlog::{LogConfig, SplitLogError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), SplitLogError> {
//!     let guard = splitlog::init(LogConfig {
//!         outputs: vec!["console".to_string(), "split".to_string()],
//!         log_path: "./logs".to_string(),
//!         file_prefix: "app".to_string(),
//!         ..LogConfig::default()
//!     })?;
//!
//!     tracing::info!(port = 50051, "서버 시작");
//!     tracing::error!(error = "timeout", "연결 실패");
//!
//!     guard.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! # 출력 파일
//!
//! ```text
//! logs/
//! ├── app-info-2026-08-06.log
//! ├── app-warn-2026-08-06.log
//! └── app-error-2026-08-06.log
//! ```
//!
//! 크기 제한이나 압축, 보관 정책이 필요하면 외부 회전 도구와 함께
//! 사용하십시오. 이 크레이트는 날짜별 분리만 담당합니다.

pub mod config;
pub mod error;
pub mod layer;
pub mod level;
pub mod logger;
mod rotation;
pub mod split;
pub mod sql;

pub use config::LogConfig;
pub use error::{SplitLogError, SplitResult};
pub use layer::{split_layer, BoxedLayer, EncoderFormat, SplitGuard, StreamWriter};
pub use level::{LogLevel, LogStream};
pub use logger::{init, layers, LoggerGuard};
pub use split::SplitOutput;
