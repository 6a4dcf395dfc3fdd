use std::path::Path;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use error::DownloadError;

pub mod error;
pub mod progress;

/// 把单条流下载到本地文件，通过回调上报进度（0.0..=1.0）
pub struct StreamDownloader {
    client: reqwest::Client,
}

impl StreamDownloader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// 下载 url 到 output，每写入一块数据回调一次下载进度。
    /// 回调是无状态的，仅用于渲染；Content-Length 缺失时只在结束时上报 1.0。
    /// 不做重试、不做断点续传，失败时残留的半成品文件由调用方自行处理。
    pub async fn download_to_file(
        &self,
        url: &str,
        output: &Path,
        on_progress: impl Fn(f64),
    ) -> Result<(), DownloadError> {
        debug!("开始下载: {} -> {:?}", url, output);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        let total_size = response.content_length().unwrap_or(0);
        let mut file = tokio::fs::File::create(output).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| DownloadError::Stream(e.to_string()))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if total_size > 0 {
                on_progress(downloaded as f64 / total_size as f64);
            }
        }

        file.flush().await?;
        on_progress(1.0);

        debug!("下载完成: {:?} ({} 字节)", output, downloaded);
        Ok(())
    }
}

impl Default for StreamDownloader {
    fn default() -> Self {
        Self::new()
    }
}
