//! 로거 조립 파사드
//!
//! 설정에 따라 콘솔, 단일 파일, 분할 파일 출력을 조합해 하나의 tracing
//! 구독자로 만들어 줍니다. 전역 상태는 엔진의 기본 디스패처 슬롯만
//! 사용하며, 이 크레이트 자체는 싱글턴을 들고 있지 않습니다.

use std::path::Path;
use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Registry;

use crate::config::{LogConfig, OUTPUT_CONSOLE, OUTPUT_FILE, OUTPUT_SPLIT};
use crate::error::{SplitLogError, SplitResult};
use crate::layer::{split_layer, BoxedLayer, EncoderFormat, SplitGuard};
use crate::level::LogLevel;
use crate::split;

/// 로거 종료 핸들
///
/// 조립 과정에서 만들어진 모든 분할 출력의 종료 핸들을 소유합니다.
/// `shutdown` 호출이나 드롭으로 파일이 닫히고 회전 태스크가 중지되며,
/// 중복 호출은 무해합니다.
pub struct LoggerGuard {
    splits: Vec<SplitGuard>,
}

impl LoggerGuard {
    /// 모든 분할 출력을 닫음 (멱등)
    pub fn shutdown(&self) {
        for guard in &self.splits {
            guard.close();
        }
    }

    /// 분할 출력 종료 핸들 목록 반환
    pub fn splits(&self) -> &[SplitGuard] {
        &self.splits
    }
}

/// 설정에 따라 구독자 레이어 목록 조립
///
/// 반환된 목록에는 레벨 필터가 포함되어 있어 그대로 구독자에 얹으면
/// 됩니다. 자신의 구독자를 직접 조립하는 임베더를 위한 진입점이며,
/// 전역 기본 디스패처는 건드리지 않습니다.
///
/// `RUST_LOG`가 설정되어 있으면 설정 파일의 레벨 대신 환경변수 필터를
/// 사용합니다.
pub fn layers<S>(config: &LogConfig) -> SplitResult<(Vec<BoxedLayer<S>>, LoggerGuard)>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    config.validate()?;

    let format = config
        .format
        .parse::<EncoderFormat>()
        .map_err(|_| SplitLogError::config(format!("알 수 없는 출력 형식: {}", config.format)))?;

    let mut layers: Vec<BoxedLayer<S>> = vec![level_filter_layer(config)?];
    let mut splits = Vec::new();

    for output in &config.outputs {
        match output.as_str() {
            OUTPUT_CONSOLE => layers.push(console_layer(config, format)),
            OUTPUT_FILE => layers.push(file_layer(config, format)?),
            OUTPUT_SPLIT => {
                let (layer, guard) =
                    split_layer(&config.log_path, config.file_prefix.clone(), format)?;
                layers.push(layer);
                splits.push(guard);
            }
            unknown => {
                return Err(SplitLogError::config(format!(
                    "알 수 없는 출력 대상: {unknown}"
                )));
            }
        }
    }

    // 출력이 하나도 없으면 콘솔로 대체
    if layers.len() == 1 {
        layers.push(console_layer(config, format));
    }

    Ok((layers, LoggerGuard { splits }))
}

/// 로깅 시스템 초기화
///
/// 기본값 위에 환경변수, 그 위에 호출자 설정을 제로값 안전 규칙으로
/// 병합한 뒤 구독자를 조립해 전역 기본 디스패처로 설치합니다. 프로세스당
/// 한 번만 성공하며, 반환된 핸들은 사용이 끝날 때 `shutdown`으로 닫아야
/// 합니다.
///
/// 분할 출력이 포함되면 tokio 런타임 안에서 호출해야 합니다.
pub fn init(config: LogConfig) -> SplitResult<LoggerGuard> {
    let config = LogConfig::from_env().merge(config);

    let (layers, guard) = layers::<Registry>(&config)?;
    let subscriber = tracing_subscriber::registry().with(layers);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SplitLogError::config(format!("전역 로거 설정 실패: {e}")))?;

    tracing::info!(
        level = %config.level,
        format = %config.format,
        outputs = ?config.outputs,
        path = %config.log_path,
        prefix = %config.file_prefix,
        "로거 초기화 완료"
    );

    Ok(guard)
}

/// 레벨 필터 레이어 생성
fn level_filter_layer<S>(config: &LogConfig) -> SplitResult<BoxedLayer<S>>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() {
        return Ok(EnvFilter::from_default_env().boxed());
    }

    let level = config
        .level
        .parse::<LogLevel>()
        .map_err(|_| SplitLogError::config(format!("알 수 없는 로그 레벨: {}", config.level)))?;

    Ok(level.to_filter().boxed())
}

/// 표준 출력 콘솔 레이어 생성
fn console_layer<S>(config: &LogConfig, format: EncoderFormat) -> BoxedLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    match format {
        EncoderFormat::Json => fmt::layer()
            .json()
            .with_ansi(false)
            .with_file(config.add_caller)
            .with_line_number(config.add_caller)
            .with_thread_ids(config.development)
            .with_thread_names(config.development)
            .with_writer(std::io::stdout)
            .boxed(),
        EncoderFormat::Console => fmt::layer()
            .with_ansi(config.color_enabled)
            .with_file(config.add_caller)
            .with_line_number(config.add_caller)
            .with_thread_ids(config.development)
            .with_thread_names(config.development)
            .with_writer(std::io::stdout)
            .boxed(),
    }
}

/// 단일 날짜별 파일 레이어 생성
///
/// 분할 없이 `{접두사}-{날짜}.log` 한 파일에 모든 레벨을 기록합니다.
/// 분할 출력과 같은 이어쓰기 열기 규칙을 쓰지만 회전 태스크는 없습니다.
fn file_layer<S>(config: &LogConfig, format: EncoderFormat) -> SplitResult<BoxedLayer<S>>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let directory = Path::new(&config.log_path);
    split::ensure_directory(directory)?;

    let path = directory.join(format!("{}-{}.log", config.file_prefix, split::today_stamp()));
    let writer = Arc::new(split::open_log_file(&path)?);

    Ok(match format {
        EncoderFormat::Json => fmt::layer()
            .json()
            .with_ansi(false)
            .with_file(config.add_caller)
            .with_line_number(config.add_caller)
            .with_writer(writer)
            .boxed(),
        EncoderFormat::Console => fmt::layer()
            .with_ansi(false)
            .with_file(config.add_caller)
            .with_line_number(config.add_caller)
            .with_writer(writer)
            .boxed(),
    })
}
