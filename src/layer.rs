//! tracing 엔진 결합 계층
//!
//! 분할 출력을 tracing-subscriber 레이어로 감싸서 레벨별 파일 분리를
//! 엔진의 구독자 체인에 끼워 넣습니다. 스트림마다 심각도 필터가 걸린
//! fmt 레이어를 하나씩 만들고 셋을 하나의 팬아웃 레이어로 합칩니다.

use std::io;
use std::path::Path;
use std::str::FromStr;

use tracing::{Metadata, Subscriber};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::registry::LookupSpan;

use crate::error::SplitResult;
use crate::level::LogStream;
use crate::split::SplitOutput;

/// 박스된 구독자 레이어 타입 별칭
pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// 인코더 형식 선택
///
/// 분할 출력 입장에서는 불투명한 값으로, 그대로 fmt 레이어에 전달됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderFormat {
    /// 구조화된 JSON 한 줄 인코딩
    Json,
    /// 사람이 읽는 텍스트 인코딩
    Console,
}

impl FromStr for EncoderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(EncoderFormat::Json),
            "console" => Ok(EncoderFormat::Console),
            _ => Err(()),
        }
    }
}

/// 특정 스트림에 바인딩된 바이트 작성기
///
/// 엔진이 인코딩을 마친 페이로드를 분할 출력의 해당 스트림으로
/// 전달합니다. 복제본은 모두 같은 분할 출력을 공유합니다.
#[derive(Clone)]
pub struct StreamWriter {
    output: SplitOutput,
    stream: LogStream,
}

impl StreamWriter {
    /// 지정된 스트림에 대한 작성기 생성
    pub fn new(output: &SplitOutput, stream: LogStream) -> Self {
        Self {
            output: output.clone(),
            stream,
        }
    }
}

impl io::Write for StreamWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(self.stream, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        // 버퍼링은 하부 핸들에 위임되므로 여기서 할 일이 없음
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for StreamWriter {
    type Writer = StreamWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// 분할 출력 종료 핸들
///
/// 소유자가 명시적으로 들고 있다가 사용이 끝나면 `close`를 호출합니다.
/// 드롭 시에도 최선 노력으로 닫히며, 중복 호출은 무해합니다.
pub struct SplitGuard {
    output: SplitOutput,
}

impl SplitGuard {
    /// 파일 세트를 닫고 회전 태스크를 중지 (멱등)
    pub fn close(&self) {
        self.output.close();
    }

    /// 내부 분할 출력 참조 반환
    ///
    /// 테스트에서 `reopen`으로 회전을 강제할 때 사용합니다.
    pub fn output(&self) -> &SplitOutput {
        &self.output
    }
}

impl Drop for SplitGuard {
    fn drop(&mut self) {
        self.output.close();
    }
}

/// 레벨별 분할 파일 레이어 생성
///
/// 세 심각도 대역(WARN 미만 / WARN / ERROR 이상)마다 심각도 필터가 걸린
/// fmt 레이어를 만들어 하나로 합친 레이어와, 파일 세트를 닫는 종료
/// 핸들을 반환합니다. 생성 실패 시 레이어도 핸들도 반환하지 않습니다.
///
/// tokio 런타임 안에서 호출해야 합니다 (회전 태스크가 함께 시작됨).
pub fn split_layer<S>(
    directory: impl AsRef<Path>,
    file_prefix: impl Into<String>,
    format: EncoderFormat,
) -> SplitResult<(BoxedLayer<S>, SplitGuard)>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let output = SplitOutput::new(directory, file_prefix)?;

    let info = stream_layer(&output, LogStream::Info, format);
    let warn = stream_layer(&output, LogStream::Warn, format);
    let error = stream_layer(&output, LogStream::Error, format);

    let layer = info.and_then(warn).and_then(error).boxed();

    Ok((layer, SplitGuard { output }))
}

/// 단일 스트림에 대한 심각도 필터 레이어 생성
fn stream_layer<S>(output: &SplitOutput, stream: LogStream, format: EncoderFormat) -> BoxedLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let writer = StreamWriter::new(output, stream);
    let filter =
        filter_fn(move |meta: &Metadata<'_>| LogStream::for_level(meta.level()) == stream);

    match format {
        EncoderFormat::Json => fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
        EncoderFormat::Console => fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_encoder_format_from_str() {
        assert_eq!("json".parse::<EncoderFormat>(), Ok(EncoderFormat::Json));
        assert_eq!("JSON".parse::<EncoderFormat>(), Ok(EncoderFormat::Json));
        assert_eq!(
            "console".parse::<EncoderFormat>(),
            Ok(EncoderFormat::Console)
        );
        assert!("yaml".parse::<EncoderFormat>().is_err());
    }

    #[tokio::test]
    async fn test_stream_writer_routes_bytes() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let output =
            SplitOutput::new(temp_dir.path(), "app").expect("Test assertion failed");

        let mut writer = StreamWriter::new(&output, LogStream::Error);
        writer
            .write_all(b"boom\n")
            .expect("Test assertion failed");
        writer.flush().expect("Test assertion failed");

        let path = temp_dir
            .path()
            .join(format!("app-error-{}.log", crate::split::today_stamp()));
        let content = std::fs::read_to_string(&path).expect("Test assertion failed");
        assert_eq!(content, "boom\n");

        output.close();
    }

    #[tokio::test]
    async fn test_split_guard_close_is_idempotent() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let (_layer, guard) = split_layer::<tracing_subscriber::Registry>(
            temp_dir.path(),
            "app",
            EncoderFormat::Json,
        )
        .expect("Test assertion failed");

        guard.close();
        guard.close();

        assert!(guard.output().write(LogStream::Info, b"x\n").is_err());
    }
}
