//! 레벨별 분할 로그 출력
//!
//! INFO/WARN/ERROR 레벨 로그를 각각 별도의 날짜별 파일에 기록합니다.
//!
//! # 주요 기능
//! - 레벨별 파일 분리: {접두사}-info-{날짜}.log 형태의 세 파일
//! - 자정에 새 날짜 파일로 자동 회전
//! - 스레드 안전: 동시 쓰기 지원
//!
//! # 출력 파일 예시
//!
//! ```text
//! logs/
//! ├── app-info-2026-08-06.log
//! ├── app-warn-2026-08-06.log
//! └── app-error-2026-08-06.log
//! ```

use std::fs::{DirBuilder, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::error::{SplitLogError, SplitResult};
use crate::level::LogStream;
use crate::rotation::{self, RotateCommand};

/// 오늘 날짜의 로컬 타임존 날짜 스탬프 (YYYY-MM-DD)
pub(crate) fn today_stamp() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// 스트림별 날짜 스탬프 로그 파일 경로 생성
fn stream_log_path(directory: &Path, prefix: &str, stream: LogStream, date: &str) -> PathBuf {
    directory.join(format!("{}-{}-{}.log", prefix, stream.as_str(), date))
}

/// 로그 디렉토리 생성 (상위 디렉토리 포함, Unix에서는 0o755)
pub(crate) fn ensure_directory(directory: &Path) -> SplitResult<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
        .create(directory)
        .map_err(|source| SplitLogError::DirectoryCreation {
            path: directory.to_path_buf(),
            source,
        })
}

/// 로그 파일 열기 (없으면 생성, 있으면 이어쓰기, Unix에서는 0o644)
pub(crate) fn open_log_file(path: &Path) -> SplitResult<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path).map_err(|source| SplitLogError::FileOpen {
        path: path.to_path_buf(),
        source,
    })
}

/// 하루치 로그 파일 세 개의 핸들 묶음
///
/// 핸들은 항상 셋이 한 단위로 교체됩니다. 부분 열기에 실패하면 이미 열린
/// 핸들은 드롭으로 닫히고 에러만 반환됩니다.
struct FileSet {
    info: File,
    warn: File,
    error: File,
}

impl FileSet {
    /// 지정된 날짜 스탬프로 세 파일을 모두 열기
    fn open(directory: &Path, prefix: &str, date: &str) -> SplitResult<Self> {
        let info = open_log_file(&stream_log_path(directory, prefix, LogStream::Info, date))?;
        let warn = open_log_file(&stream_log_path(directory, prefix, LogStream::Warn, date))?;
        let error = open_log_file(&stream_log_path(directory, prefix, LogStream::Error, date))?;

        Ok(Self { info, warn, error })
    }

    fn handle_mut(&mut self, stream: LogStream) -> &mut File {
        match stream {
            LogStream::Info => &mut self.info,
            LogStream::Warn => &mut self.warn,
            LogStream::Error => &mut self.error,
        }
    }
}

/// 분할 출력 내부 상태
///
/// 쓰기, 재열기, 닫기는 모두 `files` 락 하나로 상호 배제됩니다.
/// 회전 태스크도 동일한 락을 거치는 일반 경로입니다.
pub(crate) struct SplitInner {
    directory: PathBuf,
    file_prefix: String,
    /// 닫힌 후에는 None. 열려 있는 동안에는 항상 유효한 세 핸들.
    files: Mutex<Option<FileSet>>,
}

impl SplitInner {
    /// 지정된 스트림의 현재 핸들에 쓰기
    fn write(&self, stream: LogStream, buf: &[u8]) -> io::Result<usize> {
        let mut files = self.files.lock();
        match files.as_mut() {
            Some(set) => set.handle_mut(stream).write(buf),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "분할 로그 출력이 이미 닫힘",
            )),
        }
    }

    /// 현재 날짜 스탬프로 세 핸들을 모두 교체
    ///
    /// 새 세트는 락 밖에서 열고 락 안에서 맞바꿉니다. 쓰기 경로는 교체
    /// 전이나 후의 완전한 세트만 관찰하며, 열기에 실패하면 기존 세트가
    /// 그대로 유지됩니다.
    pub(crate) fn reopen(&self) -> SplitResult<()> {
        if self.files.lock().is_none() {
            return Err(SplitLogError::Closed);
        }

        let new_set = FileSet::open(&self.directory, &self.file_prefix, &today_stamp())?;

        let mut files = self.files.lock();
        match files.as_mut() {
            Some(slot) => {
                // 이전 세트는 드롭으로 닫힘 (핸들별 닫기 실패는 서로 무관)
                *slot = new_set;
                Ok(())
            }
            None => Err(SplitLogError::Closed),
        }
    }

    /// 세 핸들을 모두 닫기. 이미 닫혔으면 아무것도 하지 않음.
    fn close(&self) {
        let mut files = self.files.lock();
        *files = None;
    }
}

/// 레벨별 분할 로그 출력
///
/// 세 개의 날짜별 파일 핸들을 소유하고 접근을 직렬화합니다. 생성 시
/// 자정 회전을 담당하는 백그라운드 태스크가 함께 시작되므로 tokio 런타임
/// 안에서 생성해야 합니다.
///
/// 복제는 동일한 핸들 세트를 공유하는 가벼운 참조를 만듭니다.
#[derive(Clone)]
pub struct SplitOutput {
    inner: Arc<SplitInner>,
    command_tx: mpsc::UnboundedSender<RotateCommand>,
}

impl SplitOutput {
    /// 새 분할 출력 생성
    ///
    /// 디렉토리를 만들고(필요 시 상위 포함) 오늘 날짜의 세 파일을 연 뒤
    /// 회전 스케줄러 태스크를 시작합니다. 실패 시 부분 초기화된 값을
    /// 반환하지 않습니다.
    pub fn new<P: AsRef<Path>>(directory: P, file_prefix: impl Into<String>) -> SplitResult<Self> {
        let directory = directory.as_ref().to_path_buf();
        let file_prefix = file_prefix.into();

        ensure_directory(&directory)?;

        let files = FileSet::open(&directory, &file_prefix, &today_stamp())?;

        let inner = Arc::new(SplitInner {
            directory,
            file_prefix,
            files: Mutex::new(Some(files)),
        });

        // 자정 회전 스케줄러 시작
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        rotation::spawn(inner.clone(), command_rx);

        Ok(Self { inner, command_tx })
    }

    /// 로그 디렉토리 경로 반환
    pub fn directory(&self) -> &Path {
        &self.inner.directory
    }

    /// 파일 이름 접두사 반환
    pub fn file_prefix(&self) -> &str {
        &self.inner.file_prefix
    }

    /// 지정된 스트림에 바이트 기록
    ///
    /// 페이로드는 호출자가 이미 인코딩을 마친 상태여야 합니다. 플러시나
    /// 동기화는 수행하지 않으며, 하부 I/O 에러는 그대로 전파됩니다.
    /// 닫힌 뒤의 호출은 명확한 I/O 에러를 반환합니다.
    pub fn write(&self, stream: LogStream, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(stream, buf)
    }

    /// 현재 날짜 스탬프로 세 파일을 다시 열기
    ///
    /// 회전 스케줄러가 자정마다 호출하며, 테스트에서 회전을 강제할 때도
    /// 사용할 수 있습니다.
    pub fn reopen(&self) -> SplitResult<()> {
        self.inner.reopen()
    }

    /// 백그라운드 재구성 요청 (논블로킹)
    ///
    /// 실제 재열기는 회전 태스크가 수행하고, 실패는 회전과 동일하게
    /// 보고 후 무시됩니다.
    pub fn request_reopen(&self) {
        let _ = self.command_tx.send(RotateCommand::Reopen);
    }

    /// 분할 출력 닫기
    ///
    /// 세 핸들을 모두 닫고 회전 태스크에 종료를 알립니다. 멱등:
    /// 두 번째 호출은 아무것도 하지 않습니다. 이후의 `write`는 에러를
    /// 반환합니다.
    pub fn close(&self) {
        let _ = self.command_tx.send(RotateCommand::Shutdown);
        self.inner.close();
    }
}
