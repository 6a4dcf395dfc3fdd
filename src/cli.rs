use clap::Parser;
use std::path::PathBuf;

/// 交互式视频下载工具
#[derive(Parser, Debug)]
#[command(name = "tubedl")]
#[command(version = "0.1.0")]
#[command(about = "Interactive YouTube video downloader", long_about = None)]
pub struct Cli {
    /// 视频保存目录（默认: 可执行文件旁的 videos 目录）
    #[arg(long, value_name = "DIR")]
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,
}

/// 校验用户输入的格式编号（1-based），返回列表下标。
/// 非数字、0、负数、越界都在下载开始前拒绝。
pub fn parse_selection(input: &str, count: usize) -> Result<usize, String> {
    let input = input.trim();
    let choice: usize = input
        .parse()
        .map_err(|_| format!("Invalid choice '{}'. Please enter a valid number.", input))?;
    if choice < 1 || choice > count {
        return Err(format!(
            "Invalid choice {}. Please enter a number between 1 and {}.",
            choice, count
        ));
    }
    Ok(choice - 1)
}
