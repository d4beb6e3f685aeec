use metadata_providers::{FormatEntry, FormatKind, SearchResults, VideoDetail};

pub(crate) const SEARCH_PROMPT: &str = "検索キーワードを入力してください。";
pub(crate) const SEARCH_TIMEOUT_MESSAGE: &str =
    "検索がタイムアウトしました。後で再試行してください。";

pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    escaped
}

pub(crate) fn home_page() -> String {
    r#"<h1>YouTube動画検索サイト</h1>
<form method="get" action="/search">
    <input name="q" placeholder="検索キーワードを入力" required>
    <button type="submit">検索</button>
</form>"#
        .to_string()
}

pub(crate) fn search_results_page(results: &SearchResults) -> String {
    let mut html = String::from("<h1>検索結果</h1><ul>");

    for result in results {
        html.push_str(&format!(
            r#"<li><a href="/video/{}">{}</a></li>"#,
            escape(&result.id),
            escape(&result.title),
        ));
    }

    html.push_str(r#"</ul><a href="/">戻る</a>"#);
    html
}

pub(crate) fn video_detail_page(video: &VideoDetail) -> String {
    let mut html = format!(
        "<h1>{}</h1><h2>利用可能なフォーマット</h2>",
        escape(&video.title)
    );

    html.push_str(
        r#"<table border="1"><tr><th>タイプ</th><th>ID</th><th>解像度</th><th>拡張子</th><th>サイズ</th><th>ビットレート</th><th>リンク</th></tr>"#,
    );

    for format in &video.formats {
        html.push_str(&format_row(format));
    }

    html.push_str(r#"</table><a href="/">ホームに戻る</a>"#);
    html
}

fn format_row(format: &FormatEntry) -> String {
    let kind = match format.kind {
        FormatKind::Audio => "音声",
        FormatKind::Video => "動画",
    };

    let size = match format.size_bytes {
        Some(bytes) if bytes > 0 => format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0)),
        _ => "不明".to_string(),
    };

    let bitrate = match format.bitrate_kbps {
        Some(kbps) => format!("{} kbps", kbps),
        None => "不明".to_string(),
    };

    format!(
        r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href="{}" target="_blank">再生/DL</a></td></tr>"#,
        kind,
        or_unknown(&format.format_id),
        escape(&format.resolution),
        or_unknown(&format.extension),
        size,
        bitrate,
        escape(&format.download_url),
    )
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        "不明".to_string()
    } else {
        escape(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metadata_providers::VideoSummary;

    #[test]
    fn should_render_search_results_as_video_links() {
        let results = vec![VideoSummary {
            id: "jfKfPfyJRdk".into(),
            title: "lofi <radio>".into(),
        }];

        let html = search_results_page(&results);

        assert!(html.contains(r#"<a href="/video/jfKfPfyJRdk">lofi &lt;radio&gt;</a>"#));
    }

    #[test]
    fn should_render_unknown_markers_for_missing_format_fields() {
        let video = VideoDetail {
            title: "title".into(),
            formats: vec![FormatEntry {
                kind: FormatKind::Video,
                format_id: "18".into(),
                resolution: "640x360".into(),
                extension: "mp4".into(),
                size_bytes: None,
                bitrate_kbps: None,
                download_url: "https://example.com/dl".into(),
            }],
        };

        let html = video_detail_page(&video);

        assert!(html.contains("<td>不明</td><td>不明</td>"));
        assert!(html.contains(r#"<a href="https://example.com/dl" target="_blank">再生/DL</a>"#));
    }

    #[test]
    fn should_render_size_and_bitrate_when_present() {
        let video = VideoDetail {
            title: "title".into(),
            formats: vec![FormatEntry {
                kind: FormatKind::Audio,
                format_id: "139".into(),
                resolution: "low, audio only".into(),
                extension: "m4a".into(),
                size_bytes: Some(2 * 1024 * 1024),
                bitrate_kbps: Some(48.0),
                download_url: "https://example.com/dl".into(),
            }],
        };

        let html = video_detail_page(&video);

        assert!(html.contains("<td>音声</td>"));
        assert!(html.contains("<td>2.00 MB</td>"));
        assert!(html.contains("<td>48 kbps</td>"));
    }

    #[test]
    fn should_escape_markup_in_text() {
        assert_eq!("&lt;b&gt;&amp;&quot;&#39;&gt;", escape(r#"<b>&"'>"#));
    }
}
