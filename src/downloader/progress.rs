use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

// 进度条内部刻度，回调上报的是 0.0..=1.0 的小数
const BAR_SCALE: u64 = 1000;

/// 终端进度渲染器。MultiProgress 内部对输出做了串行化，
/// 视频和音频两条进度回调交错更新也不会打乱渲染。
pub struct ProgressRenderer {
    multi_pb: MultiProgress,
}

impl ProgressRenderer {
    pub fn new() -> Self {
        Self {
            multi_pb: MultiProgress::new(),
        }
    }

    pub fn add_bar(&self, label: &str) -> ProgressBar {
        let pb = self.multi_pb.add(ProgressBar::new(BAR_SCALE));
        pb.set_style(
            ProgressStyle::with_template("{msg:>5} [{bar:50.cyan/blue}] {percent:>3}%")
                .expect("进度条模板不合法")
                .progress_chars("██░"),
        );
        pb.set_message(label.to_string());
        pb
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// 把进度条包装成下载器需要的小数进度回调
pub fn fraction_callback(pb: ProgressBar) -> impl Fn(f64) {
    move |fraction: f64| {
        let position = (fraction.clamp(0.0, 1.0) * BAR_SCALE as f64) as u64;
        pb.set_position(position);
    }
}
