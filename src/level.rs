//! 로그 레벨과 출력 스트림 매핑
//!
//! 로그 레벨 정의와 레벨별 출력 스트림(info/warn/error) 분류를 담당합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;

/// 로그 레벨 열거형
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    /// 상세한 추적 정보 (개발환경)
    Trace = 0,
    /// 디버깅 정보 (개발/스테이징)
    Debug = 1,
    /// 일반 정보 (모든 환경)
    Info = 2,
    /// 경고 상황 (복구 가능한 오류)
    Warn = 3,
    /// 오류 상황 (복구 불가능한 오류)
    Error = 4,
    /// 시스템 중단 수준 오류
    Fatal = 5,
}

impl LogLevel {
    /// 로그 레벨을 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// 이 레벨의 로그가 기록될 출력 스트림 반환
    ///
    /// WARN 미만은 info, WARN은 warn, ERROR 이상은 error 스트림으로
    /// 분류됩니다. 모든 레벨이 정확히 하나의 스트림에 대응합니다.
    pub fn stream(&self) -> LogStream {
        match self {
            LogLevel::Trace | LogLevel::Debug | LogLevel::Info => LogStream::Info,
            LogLevel::Warn => LogStream::Warn,
            LogLevel::Error | LogLevel::Fatal => LogStream::Error,
        }
    }

    /// tracing 엔진의 레벨로 변환
    ///
    /// Fatal은 엔진의 최고 심각도인 ERROR에 대응합니다.
    pub fn to_tracing(&self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error | LogLevel::Fatal => Level::ERROR,
        }
    }

    /// tracing 엔진의 레벨 필터로 변환
    pub fn to_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.to_tracing())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(()),
        }
    }
}

/// 분할 출력 스트림 열거형
///
/// 하나의 분할 출력이 관리하는 세 개의 파일 각각에 대응합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogStream {
    Info,
    Warn,
    Error,
}

impl LogStream {
    /// 파일 이름에 들어가는 스트림 식별자 반환
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStream::Info => "info",
            LogStream::Warn => "warn",
            LogStream::Error => "error",
        }
    }

    /// tracing 엔진 레벨에 대한 스트림 분류
    ///
    /// 전체 함수: 엔진의 모든 레벨이 정확히 하나의 스트림으로 매핑됩니다.
    pub fn for_level(level: &Level) -> Self {
        if *level == Level::WARN {
            LogStream::Warn
        } else if *level == Level::ERROR {
            LogStream::Error
        } else {
            LogStream::Info
        }
    }
}

impl fmt::Display for LogStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_as_str() {
        assert_eq!(LogLevel::Trace.as_str(), "TRACE");
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Fatal.as_str(), "FATAL");
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("info".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("Fatal".parse::<LogLevel>(), Ok(LogLevel::Fatal));
        assert!("unknown".parse::<LogLevel>().is_err());
        assert!("".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_stream_mapping_is_total() {
        // WARN 미만 → info
        assert_eq!(LogLevel::Trace.stream(), LogStream::Info);
        assert_eq!(LogLevel::Debug.stream(), LogStream::Info);
        assert_eq!(LogLevel::Info.stream(), LogStream::Info);
        // WARN → warn
        assert_eq!(LogLevel::Warn.stream(), LogStream::Warn);
        // ERROR 이상 → error
        assert_eq!(LogLevel::Error.stream(), LogStream::Error);
        assert_eq!(LogLevel::Fatal.stream(), LogStream::Error);
    }

    #[test]
    fn test_stream_for_tracing_level() {
        assert_eq!(LogStream::for_level(&Level::TRACE), LogStream::Info);
        assert_eq!(LogStream::for_level(&Level::DEBUG), LogStream::Info);
        assert_eq!(LogStream::for_level(&Level::INFO), LogStream::Info);
        assert_eq!(LogStream::for_level(&Level::WARN), LogStream::Warn);
        assert_eq!(LogStream::for_level(&Level::ERROR), LogStream::Error);
    }

    #[test]
    fn test_stream_as_str() {
        assert_eq!(LogStream::Info.as_str(), "info");
        assert_eq!(LogStream::Warn.as_str(), "warn");
        assert_eq!(LogStream::Error.as_str(), "error");
    }

    #[test]
    fn test_to_tracing_level() {
        assert_eq!(LogLevel::Debug.to_tracing(), Level::DEBUG);
        assert_eq!(LogLevel::Fatal.to_tracing(), Level::ERROR);
    }
}
