pub struct FormatTool;

impl FormatTool {
    // 格式化文件大小
    pub fn format_size(size: u64) -> String {
        if size >= 1024 * 1024 * 1024 {
            format!("{:.2}GB", size as f64 / 1024.0 / 1024.0 / 1024.0)
        } else if size >= 1024 * 1024 {
            format!("{:.1}MB", size as f64 / 1024.0 / 1024.0)
        } else {
            format!("{:.1}KB", size as f64 / 1024.0)
        }
    }

    // 大小未知时显示占位符
    pub fn format_size_opt(size: Option<u64>) -> String {
        match size {
            Some(size) => Self::format_size(size),
            None => "?MB".to_string(),
        }
    }
}

/// 把标题替换为合法文件名：文件系统保留字符和控制字符替换为下划线
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_reserved_characters() {
        assert_eq!(
            sanitize_filename("a/b\\c:d*e?f\"g<h>i|j"),
            "a_b_c_d_e_f_g_h_i_j"
        );
    }

    #[test]
    fn sanitize_keeps_ordinary_titles() {
        assert_eq!(
            sanitize_filename("Never Gonna Give You Up"),
            "Never Gonna Give You Up"
        );
    }

    #[test]
    fn sanitize_replaces_control_characters() {
        assert_eq!(sanitize_filename("a\tb\nc"), "a_b_c");
    }

    #[test]
    fn format_size_picks_unit() {
        assert_eq!(FormatTool::format_size(512), "0.5KB");
        assert_eq!(FormatTool::format_size(50 * 1024 * 1024), "50.0MB");
        assert_eq!(FormatTool::format_size(3 * 1024 * 1024 * 1024), "3.00GB");
        assert_eq!(FormatTool::format_size_opt(None), "?MB");
    }
}
