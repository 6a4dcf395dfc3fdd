use std::fmt;

use crate::common::utils::FormatTool;

// 视频清晰度选项（按分辨率排序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VideoQuality {
    Q144P,
    Q240P,
    Q360P,
    Q480P,
    Q720P,
    Q1080P,
    Q1440P,
    Q4K, // 2160p
    Q8K, // 4320p
}

impl VideoQuality {
    /// 根据提供方上报的像素高度映射到清晰度档位，非标准高度向下取档
    pub fn from_height(height: u32) -> Self {
        match height {
            h if h >= 4320 => Self::Q8K,
            h if h >= 2160 => Self::Q4K,
            h if h >= 1440 => Self::Q1440P,
            h if h >= 1080 => Self::Q1080P,
            h if h >= 720 => Self::Q720P,
            h if h >= 480 => Self::Q480P,
            h if h >= 360 => Self::Q360P,
            h if h >= 240 => Self::Q240P,
            _ => Self::Q144P,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Q144P => "144p",
            Self::Q240P => "240p",
            Self::Q360P => "360p",
            Self::Q480P => "480p",
            Self::Q720P => "720p",
            Self::Q1080P => "1080p",
            Self::Q1440P => "1440p",
            Self::Q4K => "2160p",
            Self::Q8K => "4320p",
        }
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 纯视频流（无音轨），来自提供方的单次请求
#[derive(Debug, Clone, PartialEq)]
pub struct VideoStreamInfo {
    pub quality: VideoQuality,
    pub bitrate: u64, // bits/sec
    pub container: String,
    pub size: Option<u64>,
    pub url: String,
}

/// 纯音频流（无视频轨）
#[derive(Debug, Clone, PartialEq)]
pub struct AudioStreamInfo {
    pub bitrate: u64, // bits/sec
    pub container: String,
    pub size: Option<u64>,
    pub url: String,
}

/// 一条视频流与比特率最接近的音频流的配对结果。
/// 由格式选择器产生，展示给用户选择，下载结束后即丢弃。
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedFormat {
    pub video: VideoStreamInfo,
    pub audio: AudioStreamInfo,
}

impl fmt::Display for CombinedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (Video: {} + Audio: {}, Audio Bitrate: {}kbps)",
            self.video.quality,
            self.video.container,
            FormatTool::format_size_opt(self.video.size),
            FormatTool::format_size_opt(self.audio.size),
            self.audio.bitrate / 1000,
        )
    }
}

/// 单个URL解析出的元数据：标题 + 供格式选择器使用的原始流列表
#[derive(Debug, Clone)]
pub struct VideoMeta {
    pub title: String,
    pub video_streams: Vec<VideoStreamInfo>,
    pub audio_streams: Vec<AudioStreamInfo>,
}
