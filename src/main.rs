use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};

use tube_downloader::Result;
use tube_downloader::cli::{self, Cli};
use tube_downloader::common::utils::sanitize_filename;
use tube_downloader::downloader::progress::{ProgressRenderer, fraction_callback};
use tube_downloader::downloader::StreamDownloader;
use tube_downloader::parser::MetadataClient;
use tube_downloader::parser::format_selector;
use tube_downloader::post_process::MediaMerger;

// 合并输出固定为 web 优化的 mp4
const VIDEO_CODEC: &str = "libx264";
const AUDIO_CODEC: &str = "aac";

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Cli::parse();

    // 初始化日志
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => default_output_dir()?,
    };
    debug!("输出目录: {:?}", output_dir);

    let metadata_client = MetadataClient::new();
    let downloader = StreamDownloader::new();

    // 交互主循环：空输入退出，单次迭代的任何错误只打断本次下载
    loop {
        let url = prompt_line("Enter video URL (or press Enter without typing to exit): ")?;
        let url = url.trim().to_string();
        if url.is_empty() {
            break;
        }

        if let Err(e) = process_url(&url, &metadata_client, &downloader, &output_dir).await {
            println!("{}", format!("An error occurred: {}", e).red());
        }
        println!();
    }

    Ok(())
}

/// 处理单个URL：解析元数据 -> 选择格式 -> 下载双流 -> 合并
async fn process_url(
    url: &str,
    metadata_client: &MetadataClient,
    downloader: &StreamDownloader,
    output_dir: &Path,
) -> Result<()> {
    println!("Fetching video information...");
    let meta = metadata_client.fetch(url).await?;
    info!("标题: << {} >>", meta.title);

    println!("Getting available download formats...");
    let choices = format_selector::combine_streams(&meta.video_streams, &meta.audio_streams);
    if choices.is_empty() {
        return Err("no downloadable video/audio format combination found".into());
    }

    println!("\nAvailable formats:");
    for (i, choice) in choices.iter().enumerate() {
        println!("{}. {}", i + 1, choice);
    }

    let answer = prompt_line("\nEnter the number of the format you want to download: ")?;
    let index = cli::parse_selection(&answer, choices.len())?;
    let selected = &choices[index];
    debug!("选中格式: {}", selected);

    tokio::fs::create_dir_all(output_dir).await?;

    let safe_title = sanitize_filename(&meta.title);
    let file_name = format!("{}.mp4", safe_title);
    let output_path = output_dir.join(&file_name);
    let video_path = output_dir.join(format!("{}_video.{}", safe_title, selected.video.container));
    let audio_path = output_dir.join(format!("{}_audio.{}", safe_title, selected.audio.container));

    if output_path.exists() {
        let answer = prompt_line(&format!(
            "File '{}' already exists. Do you want to overwrite it? (Y/N): ",
            file_name
        ))?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Download cancelled.");
            return Ok(());
        }
    }

    println!("\nDownloading: {}\n", meta.title);

    // 两条进度条共用一个渲染器，回调交错更新也不会互相覆盖
    let renderer = ProgressRenderer::new();
    let video_pb = renderer.add_bar("Video");
    let audio_pb = renderer.add_bar("Audio");

    downloader
        .download_to_file(&selected.video.url, &video_path, fraction_callback(video_pb.clone()))
        .await?;
    video_pb.finish();

    downloader
        .download_to_file(&selected.audio.url, &audio_path, fraction_callback(audio_pb.clone()))
        .await?;
    audio_pb.finish();

    println!("Combining video and audio...");
    MediaMerger::merge_av(&video_path, &audio_path, &output_path, VIDEO_CODEC, AUDIO_CODEC).await?;

    // 合并成功后删除中间文件
    tokio::fs::remove_file(&video_path).await?;
    tokio::fs::remove_file(&audio_path).await?;

    println!(
        "{}",
        format!("\nDownload and combination complete: {}", output_path.display()).green()
    );
    Ok(())
}

// 默认输出到可执行文件旁的 videos 目录
fn default_output_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let base = exe.parent().ok_or("cannot locate executable directory")?;
    Ok(base.join("videos"))
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}
