use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, error, info};

use crate::downloader::error::DownloadError;

pub struct MediaMerger;

impl MediaMerger {
    /// 合并一条视频流和一条音频流为单个输出文件。
    /// moov atom 前置（faststart），便于边下边播。
    pub async fn merge_av(
        video_path: &Path,
        audio_path: &Path,
        output_path: &Path,
        video_codec: &str,
        audio_codec: &str,
    ) -> Result<(), DownloadError> {
        // 检查输入文件是否存在
        if !video_path.exists() {
            return Err(DownloadError::FileNotFound(video_path.to_path_buf()));
        }
        if !audio_path.exists() {
            return Err(DownloadError::FileNotFound(audio_path.to_path_buf()));
        }

        debug!("开始合并视频和音频 -> 输出路径: {:?}", output_path);

        // 获取 ffmpeg 路径（支持环境变量）
        let ffmpeg_cmd = std::env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string());

        // 检查 ffmpeg 是否可用
        let ffmpeg_check = Command::new(&ffmpeg_cmd)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        if !ffmpeg_check.map(|s| s.success()).unwrap_or(false) {
            error!("未检测到 ffmpeg，安装方法参考: https://ffmpeg.org/download.html");
            return Err(DownloadError::FfmpegNotFound);
        }

        let output = Command::new(&ffmpeg_cmd)
            .arg("-i")
            .arg(video_path)
            .arg("-i")
            .arg(audio_path)
            .arg("-c:v")
            .arg(video_codec)
            .arg("-c:a")
            .arg(audio_codec)
            .arg("-movflags")
            .arg("+faststart")
            .arg("-y") // 自动覆盖
            .arg(output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let err_msg = String::from_utf8_lossy(&output.stderr);
            error!("ffmpeg 合并失败，错误日志如下:\n{}", err_msg);
            return Err(DownloadError::Ffmpeg(err_msg.to_string()));
        }

        info!("视频与音频合并成功，输出文件: {:?}", output_path);
        Ok(())
    }
}
