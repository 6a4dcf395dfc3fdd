use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP错误: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP请求失败，状态码: {status}，URL: {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("流读取错误: {0}")]
    Stream(String),
    #[error("文件不存在: {0}")]
    FileNotFound(PathBuf),
    #[error("未检测到 ffmpeg，请安装后重试，或设置 FFMPEG_PATH 环境变量指向可执行文件")]
    FfmpegNotFound,
    #[error("ffmpeg 执行失败: {0}")]
    Ffmpeg(String),
}
