//! 분할 로그 출력 에러 타입
//!
//! 구성 단계와 런타임 단계의 실패를 구분하는 표준화된 에러 타입을 제공합니다.
//!
//! # 설계 원칙
//! - Zero Panic: unwrap() 대신 Result 사용
//! - 생성 실패는 호출자에게 그대로 전파 (부분 초기화된 값 반환 금지)
//! - 회전 실패는 격리: 스케줄러는 계속 동작

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 분할 로그 출력 전체 에러 타입
#[derive(Error, Debug)]
pub enum SplitLogError {
    /// 로그 디렉토리를 생성하거나 접근할 수 없음
    #[error("로그 디렉토리 생성 실패: {}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 날짜별 로그 파일을 열 수 없음
    #[error("로그 파일 열기 실패: {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 이미 닫힌 분할 출력에 대한 작업
    #[error("분할 로그 출력이 이미 닫힘")]
    Closed,

    /// 설정 오류
    #[error("설정 오류: {message}")]
    Config { message: String },
}

/// Result 타입 별칭
pub type SplitResult<T> = Result<T, SplitLogError>;

impl SplitLogError {
    /// 설정 오류 생성 헬퍼
    pub(crate) fn config<S: Into<String>>(message: S) -> Self {
        SplitLogError::Config {
            message: message.into(),
        }
    }
}
