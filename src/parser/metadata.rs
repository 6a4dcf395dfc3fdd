use std::process::Stdio;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::parser::errors::ParseError;
use crate::parser::models::{AudioStreamInfo, VideoMeta, VideoQuality, VideoStreamInfo};

/// 通过 yt-dlp 获取视频元数据的客户端。
/// 一次 `--dump-json` 调用同时拿到标题和全部流描述。
pub struct MetadataClient {
    ytdlp_cmd: String,
}

impl MetadataClient {
    pub fn new() -> Self {
        // 支持通过环境变量覆盖 yt-dlp 路径
        let ytdlp_cmd = std::env::var("YTDLP_PATH").unwrap_or_else(|_| "yt-dlp".to_string());
        Self { ytdlp_cmd }
    }

    /// 获取单个URL的标题和可用流列表
    pub async fn fetch(&self, url: &str) -> Result<VideoMeta, ParseError> {
        debug!("调用 yt-dlp 获取元数据: {}", url);

        let output = Command::new(&self.ytdlp_cmd)
            .arg("--no-progress")
            .arg("--dump-json")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ParseError::YtDlpNotFound
                } else {
                    ParseError::Io(e)
                }
            })?;

        if !output.status.success() {
            let err_msg = String::from_utf8_lossy(&output.stderr);
            return Err(ParseError::Provider(err_msg.trim().to_string()));
        }

        let doc = String::from_utf8_lossy(&output.stdout);
        meta_from_json(&doc)
    }
}

impl Default for MetadataClient {
    fn default() -> Self {
        Self::new()
    }
}

// yt-dlp --dump-json 输出的字段，只取需要的部分
#[derive(Debug, Deserialize)]
struct RawVideoInfo {
    title: String,
    #[serde(default)]
    formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    url: Option<String>,
    vcodec: Option<String>,
    acodec: Option<String>,
    height: Option<u32>,
    ext: Option<String>,
    // 码率字段为 kbps 浮点数
    tbr: Option<f64>,
    vbr: Option<f64>,
    abr: Option<f64>,
    filesize: Option<u64>,
    filesize_approx: Option<f64>,
}

impl RawFormat {
    fn is_video_only(&self) -> bool {
        self.has_codec(&self.vcodec) && !self.has_codec(&self.acodec)
    }

    fn is_audio_only(&self) -> bool {
        self.has_codec(&self.acodec) && !self.has_codec(&self.vcodec)
    }

    fn has_codec(&self, codec: &Option<String>) -> bool {
        matches!(codec.as_deref(), Some(c) if c != "none")
    }

    fn size(&self) -> Option<u64> {
        self.filesize
            .or_else(|| self.filesize_approx.map(|s| s.round() as u64))
    }
}

fn kbps_to_bits(kbps: f64) -> u64 {
    (kbps * 1000.0).round() as u64
}

/// 把 yt-dlp 的 JSON 文档转换为内部元数据模型。
/// 纯视频流只保留 mp4 容器，并按清晰度、码率降序排列；
/// 纯音频流按码率降序排列（与选择器的稳定平局规则配合）。
pub fn meta_from_json(doc: &str) -> Result<VideoMeta, ParseError> {
    let raw: RawVideoInfo = serde_json::from_str(doc)?;

    let mut video_streams: Vec<VideoStreamInfo> = raw
        .formats
        .iter()
        .filter(|f| f.is_video_only())
        .filter(|f| f.ext.as_deref() == Some("mp4"))
        .filter_map(|f| {
            let url = f.url.clone()?;
            let height = f.height?;
            let bitrate = f.vbr.or(f.tbr)?;
            Some(VideoStreamInfo {
                quality: VideoQuality::from_height(height),
                bitrate: kbps_to_bits(bitrate),
                container: f.ext.clone().unwrap_or_else(|| "mp4".to_string()),
                size: f.size(),
                url,
            })
        })
        .collect();

    let mut audio_streams: Vec<AudioStreamInfo> = raw
        .formats
        .iter()
        .filter(|f| f.is_audio_only())
        .filter_map(|f| {
            let url = f.url.clone()?;
            let bitrate = f.abr.or(f.tbr)?;
            Some(AudioStreamInfo {
                bitrate: kbps_to_bits(bitrate),
                container: f.ext.clone().unwrap_or_else(|| "m4a".to_string()),
                size: f.size(),
                url,
            })
        })
        .collect();

    video_streams.sort_by(|a, b| {
        b.quality
            .cmp(&a.quality)
            .then_with(|| b.bitrate.cmp(&a.bitrate))
    });
    audio_streams.sort_by(|a, b| b.bitrate.cmp(&a.bitrate));

    debug!(
        "解析到 {} 条视频流, {} 条音频流",
        video_streams.len(),
        audio_streams.len()
    );

    Ok(VideoMeta {
        title: raw.title,
        video_streams,
        audio_streams,
    })
}
