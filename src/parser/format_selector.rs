use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::debug;

use crate::parser::models::{AudioStreamInfo, CombinedFormat, VideoStreamInfo};

/// 格式选择器：把提供方给出的纯视频流/纯音频流列表
/// 组合成一份去重、按清晰度降序排列的可选格式列表。
/// 纯函数，无副作用；空输入得到空输出，由调用方处理"无可选项"。
pub fn combine_streams(
    videos: &[VideoStreamInfo],
    audios: &[AudioStreamInfo],
) -> Vec<CombinedFormat> {
    dedup_and_rank(pair_streams(videos, audios))
}

/// 第一步：为每条视频流挑选比特率差值最小的音频流。
/// 差值相同时取音频列表中靠前的一条（稳定，先到先得）。
/// 输出条数等于视频流条数，尚未去重。
pub fn pair_streams(
    videos: &[VideoStreamInfo],
    audios: &[AudioStreamInfo],
) -> Vec<CombinedFormat> {
    videos
        .iter()
        .filter_map(|video| {
            // min_by_key 在相等时返回最先出现的元素
            audios
                .iter()
                .min_by_key(|audio| audio.bitrate.abs_diff(video.bitrate))
                .map(|audio| CombinedFormat {
                    video: video.clone(),
                    audio: audio.clone(),
                })
        })
        .collect()
}

/// 第二步 + 第三步：按视频清晰度分组，每组只保留音频比特率最高的一条
/// （相同时保留先出现的），再按清晰度降序排列。
/// 同一清晰度可能对应多条不同编码/码率的视频流，展示时每档只留最优配对。
pub fn dedup_and_rank(pairs: Vec<CombinedFormat>) -> Vec<CombinedFormat> {
    let mut best_per_quality = BTreeMap::new();
    for pair in pairs {
        match best_per_quality.entry(pair.video.quality) {
            Entry::Vacant(entry) => {
                entry.insert(pair);
            }
            Entry::Occupied(mut entry) => {
                if pair.audio.bitrate > entry.get().audio.bitrate {
                    entry.insert(pair);
                }
            }
        }
    }

    debug!("去重后可选格式数: {}", best_per_quality.len());
    best_per_quality.into_values().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::models::VideoQuality;

    fn video(quality: VideoQuality, kbps: u64) -> VideoStreamInfo {
        VideoStreamInfo {
            quality,
            bitrate: kbps * 1000,
            container: "mp4".to_string(),
            size: Some(1_000_000),
            url: format!("http://example.com/v/{}/{}", quality, kbps),
        }
    }

    fn audio(kbps: u64) -> AudioStreamInfo {
        AudioStreamInfo {
            bitrate: kbps * 1000,
            container: "m4a".to_string(),
            size: Some(100_000),
            url: format!("http://example.com/a/{}", kbps),
        }
    }

    #[test]
    fn pairing_keeps_one_entry_per_video_stream() {
        let videos = vec![
            video(VideoQuality::Q1080P, 5000),
            video(VideoQuality::Q1080P, 4500),
            video(VideoQuality::Q720P, 2500),
        ];
        let audios = vec![audio(160), audio(128)];

        let pairs = pair_streams(&videos, &audios);
        assert_eq!(pairs.len(), videos.len());
    }

    #[test]
    fn pairing_picks_closest_audio_bitrate() {
        let videos = vec![video(VideoQuality::Q720P, 300)];
        let audios = vec![audio(128), audio(256), audio(512)];

        let pairs = pair_streams(&videos, &audios);
        assert_eq!(pairs[0].audio.bitrate, 256_000);
    }

    #[test]
    fn pairing_breaks_ties_on_list_order() {
        // 200k 与 100k、300k 的差值都是 100k，取列表中靠前的
        let videos = vec![video(VideoQuality::Q480P, 200)];
        let audios = vec![audio(300), audio(100)];

        let pairs = pair_streams(&videos, &audios);
        assert_eq!(pairs[0].audio.bitrate, 300_000);
    }

    #[test]
    fn pairing_with_no_audio_yields_nothing() {
        let videos = vec![video(VideoQuality::Q720P, 2500)];
        let pairs = pair_streams(&videos, &[]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn dedup_keeps_highest_audio_bitrate_per_quality() {
        let pairs = vec![
            CombinedFormat {
                video: video(VideoQuality::Q1080P, 5000),
                audio: audio(128),
            },
            CombinedFormat {
                video: video(VideoQuality::Q1080P, 4500),
                audio: audio(160),
            },
        ];

        let ranked = dedup_and_rank(pairs);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].audio.bitrate, 160_000);
    }

    #[test]
    fn dedup_tie_keeps_first_candidate() {
        let first = CombinedFormat {
            video: video(VideoQuality::Q1080P, 5000),
            audio: audio(160),
        };
        let second = CombinedFormat {
            video: video(VideoQuality::Q1080P, 4500),
            audio: audio(160),
        };

        let ranked = dedup_and_rank(vec![first.clone(), second]);
        assert_eq!(ranked, vec![first]);
    }

    #[test]
    fn combine_orders_by_quality_descending() {
        let videos = vec![
            video(VideoQuality::Q360P, 800),
            video(VideoQuality::Q1080P, 5000),
            video(VideoQuality::Q720P, 2500),
        ];
        let audios = vec![audio(160), audio(128)];

        let choices = combine_streams(&videos, &audios);
        let qualities: Vec<_> = choices.iter().map(|c| c.video.quality).collect();
        assert_eq!(
            qualities,
            vec![
                VideoQuality::Q1080P,
                VideoQuality::Q720P,
                VideoQuality::Q360P
            ]
        );
    }

    #[test]
    fn combine_with_empty_videos_is_empty() {
        let audios = vec![audio(128)];
        assert!(combine_streams(&[], &audios).is_empty());
    }
}
