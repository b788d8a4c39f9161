//! 로깅 설정 관리
//!
//! 설정 파라미터 정의와 제로값 안전 병합 규칙을 담당합니다.
//! 애플리케이션 설정 파일(YAML/JSON/TOML)에서 직접 역직렬화할 수 있습니다.

use serde::{Deserialize, Serialize};

use crate::error::{SplitLogError, SplitResult};
use crate::level::LogLevel;

/// 유효한 출력 대상 이름
pub const OUTPUT_CONSOLE: &str = "console";
/// 단일 날짜별 파일 출력
pub const OUTPUT_FILE: &str = "file";
/// 레벨별 분할 파일 출력
pub const OUTPUT_SPLIT: &str = "split";

/// 로깅 시스템 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// 로그 레벨: trace, debug, info, warn, error, fatal (기본값: info)
    pub level: String,

    /// 출력 형식: json 또는 console (기본값: console)
    pub format: String,

    /// 출력 대상: console, file, split (기본값: [console])
    pub outputs: Vec<String>,

    /// 로그 파일 디렉토리 (기본값: ./logs)
    pub log_path: String,

    /// 로그 파일 이름 접두사 (기본값: app)
    pub file_prefix: String,

    /// 호출 위치(파일:라인) 포함 여부 (기본값: true)
    pub add_caller: bool,

    /// 개발 모드: 스레드 정보 추가 출력 (기본값: false)
    pub development: bool,

    /// 색상 출력 여부, console 형식에서만 적용 (기본값: true)
    pub color_enabled: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "console".to_string(),
            outputs: vec![OUTPUT_CONSOLE.to_string()],
            log_path: "./logs".to_string(),
            file_prefix: "app".to_string(),
            add_caller: true,
            development: false,
            color_enabled: true,
        }
    }
}

impl LogConfig {
    /// 주어진 설정을 현재 설정 위에 병합
    ///
    /// 병합 규칙:
    /// - 문자열: 빈 문자열은 덮어쓰지 않음
    /// - 벡터: 빈 벡터는 덮어쓰지 않음
    /// - bool: 항상 덮어씀 (미설정과 false를 구분할 수 없음)
    pub fn merge(mut self, other: LogConfig) -> LogConfig {
        if !other.level.is_empty() {
            self.level = other.level;
        }
        if !other.format.is_empty() {
            self.format = other.format;
        }
        if !other.outputs.is_empty() {
            self.outputs = other.outputs;
        }
        if !other.log_path.is_empty() {
            self.log_path = other.log_path;
        }
        if !other.file_prefix.is_empty() {
            self.file_prefix = other.file_prefix;
        }
        // bool 타입은 항상 덮어씀
        self.add_caller = other.add_caller;
        self.development = other.development;
        self.color_enabled = other.color_enabled;

        self
    }

    /// 환경변수에서 설정 로드
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SPLITLOG_LEVEL") {
            if !val.is_empty() {
                config.level = val;
            }
        }

        if let Ok(val) = std::env::var("SPLITLOG_FORMAT") {
            if !val.is_empty() {
                config.format = val;
            }
        }

        if let Ok(val) = std::env::var("SPLITLOG_OUTPUTS") {
            let outputs: Vec<String> = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !outputs.is_empty() {
                config.outputs = outputs;
            }
        }

        if let Ok(val) = std::env::var("SPLITLOG_PATH") {
            if !val.is_empty() {
                config.log_path = val;
            }
        }

        if let Ok(val) = std::env::var("SPLITLOG_PREFIX") {
            if !val.is_empty() {
                config.file_prefix = val;
            }
        }

        if let Ok(val) = std::env::var("SPLITLOG_ADD_CALLER") {
            config.add_caller = val.to_lowercase() == "true";
        }

        if let Ok(val) = std::env::var("SPLITLOG_DEVELOPMENT") {
            config.development = val.to_lowercase() == "true";
        }

        if let Ok(val) = std::env::var("SPLITLOG_COLOR") {
            config.color_enabled = val.to_lowercase() == "true";
        }

        config
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> SplitResult<()> {
        if self.level.parse::<LogLevel>().is_err() {
            return Err(SplitLogError::config(format!(
                "알 수 없는 로그 레벨: {}",
                self.level
            )));
        }

        if self.format != "json" && self.format != "console" {
            return Err(SplitLogError::config(format!(
                "알 수 없는 출력 형식: {}",
                self.format
            )));
        }

        for output in &self.outputs {
            match output.as_str() {
                OUTPUT_CONSOLE | OUTPUT_FILE | OUTPUT_SPLIT => {}
                unknown => {
                    return Err(SplitLogError::config(format!(
                        "알 수 없는 출력 대상: {unknown}"
                    )));
                }
            }
        }

        let uses_files = self
            .outputs
            .iter()
            .any(|o| o == OUTPUT_FILE || o == OUTPUT_SPLIT);
        if uses_files {
            if self.log_path.is_empty() {
                return Err(SplitLogError::config(
                    "파일 출력에는 log_path가 필요함",
                ));
            }
            if self.file_prefix.is_empty() {
                return Err(SplitLogError::config(
                    "파일 출력에는 file_prefix가 필요함",
                ));
            }
        }

        Ok(())
    }
}
