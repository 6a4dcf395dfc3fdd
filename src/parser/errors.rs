use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("未找到 yt-dlp，请安装后重试，或设置 YTDLP_PATH 环境变量指向可执行文件")]
    YtDlpNotFound,
    #[error("元数据获取失败: {0}")]
    Provider(String),
    #[error("元数据解析失败: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}
