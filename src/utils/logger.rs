use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::Once;
use std::sync::OnceLock;

// 전역 로거 인스턴스를 저장할 정적 변수
static LOGGER: OnceLock<Mutex<Option<File>>> = OnceLock::new();
static INIT: Once = Once::new();

pub struct Logger;

/// 출력 접두사로부터 로그 파일 경로를 만든다.
///
/// 디렉토리면 `<dir>/result.log`, 파일 접두사면 `<prefix>_result.log`.
pub fn log_path_for(output_path: &str) -> PathBuf {
    let is_dir_like = output_path.ends_with('/');
    let output_path = output_path.trim_end_matches('/');
    let path = Path::new(output_path);

    if is_dir_like || path.is_dir() {
        path.join("result.log")
    } else {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("ossim");

        dir.join(format!("{file_name}_result.log"))
    }
}

impl Logger {
    pub fn init(output_path: &str) {
        INIT.call_once(|| {
            let log_path = log_path_for(output_path);

            // 디렉토리가 없으면 생성
            let log_dir = log_path.parent().unwrap_or_else(|| Path::new("."));
            if !log_dir.as_os_str().is_empty() && !log_dir.exists() {
                if let Err(e) = fs::create_dir_all(log_dir) {
                    eprintln!("Cannot create log directory: {e}");
                    LOGGER.get_or_init(|| Mutex::new(None));
                    return;
                }
            }

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&log_path);

            match file {
                Ok(file) => {
                    println!("Writing log to '{}'.", log_path.display());
                    LOGGER.get_or_init(|| Mutex::new(Some(file)));
                }
                Err(e) => {
                    eprintln!("Cannot open log file: {e}");
                    LOGGER.get_or_init(|| Mutex::new(None));
                }
            }
        });
    }

    fn write_to_file(prefix: &str, message: &str) {
        if let Some(logger) = LOGGER.get() {
            if let Ok(mut file_guard) = logger.lock() {
                if let Some(file) = file_guard.as_mut() {
                    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                    if let Err(e) = writeln!(file, "[{stamp}] {prefix}{message}") {
                        eprintln!("Failed to write log file: {e}");
                    }
                }
            }
        }
    }

    pub fn log(message: &str) {
        println!("{message}");
        Self::write_to_file("", message);
    }

    pub fn log_error(message: &str) {
        eprintln!("{message}");
        Self::write_to_file("ERROR: ", message);
    }

    pub fn flush() -> std::io::Result<()> {
        if let Some(logger) = LOGGER.get() {
            if let Ok(mut file_guard) = logger.lock() {
                if let Some(file) = file_guard.as_mut() {
                    file.flush()?;
                }
            }
        }
        Ok(())
    }
}

// 매크로 정의
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::utils::Logger::log(&message);
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::utils::Logger::log_error(&message);
    }};
}
