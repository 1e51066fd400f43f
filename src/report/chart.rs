//! Word-frequency bar chart rendering.
//!
//! Renders a fixed-size SVG: title, one bar per word scaled against the
//! maximum count, the word and its count labeling each bar, and plain
//! x/y axes.

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const BAR_WIDTH: u32 = 60;
const BAR_GAP: u32 = 20;
const MARGIN: u32 = 50;
const BAR_COLOR: &str = "rgba(54, 162, 235, 0.8)";

/// Render the frequency entries as an SVG bar chart.
///
/// Returns a complete standalone SVG document. An empty entry list renders
/// the frame and title with no bars.
pub fn render_chart(entries: &[(String, usize)]) -> String {
    let baseline = HEIGHT - MARGIN;
    let max_count = entries.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#,
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <text x="{}" y="30" text-anchor="middle" font-family="sans-serif" font-size="20" font-weight="bold">Most Frequent Words in Meeting</text>"#,
        WIDTH / 2
    ));
    svg.push('\n');

    for (i, (word, count)) in entries.iter().enumerate() {
        let scale = HEIGHT - 2 * MARGIN;
        let bar_height = (*count as f64 / max_count as f64 * f64::from(scale)).round() as u32;
        let x = MARGIN + i as u32 * (BAR_WIDTH + BAR_GAP);
        let y = baseline - bar_height;

        svg.push_str(&format!(
            r#"  <rect x="{x}" y="{y}" width="{BAR_WIDTH}" height="{bar_height}" fill="{BAR_COLOR}"/>"#
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="12">{}</text>"#,
            x + BAR_WIDTH / 2,
            baseline + 15,
            escape(word)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="12">{count}</text>"#,
            x + BAR_WIDTH / 2,
            y.saturating_sub(5)
        ));
        svg.push('\n');
    }

    // Axes
    svg.push_str(&format!(
        r#"  <line x1="{MARGIN}" y1="{baseline}" x2="{MARGIN}" y2="{MARGIN}" stroke="black"/>"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <line x1="{MARGIN}" y1="{baseline}" x2="{}" y2="{baseline}" stroke="black"/>"#,
        WIDTH - MARGIN
    ));
    svg.push_str("\n</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, usize)]) -> Vec<(String, usize)> {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_chart_contains_one_bar_per_word() {
        let svg = render_chart(&entries(&[("budget", 5), ("roadmap", 2)]));
        assert_eq!(svg.matches("<rect").count(), 3); // background + 2 bars
        assert!(svg.contains(">budget</text>"));
        assert!(svg.contains(">roadmap</text>"));
        assert!(svg.contains(">5</text>"));
        assert!(svg.contains(">2</text>"));
    }

    #[test]
    fn test_tallest_bar_spans_the_plot_area() {
        let svg = render_chart(&entries(&[("budget", 4)]));
        // One bar at max count: full 500px plot height, starting at y=50.
        assert!(svg.contains(r#"<rect x="50" y="50" width="60" height="500""#));
    }

    #[test]
    fn test_bars_scale_relative_to_max() {
        let svg = render_chart(&entries(&[("budget", 4), ("launch", 1)]));
        assert!(svg.contains(r#"height="500""#));
        assert!(svg.contains(r#"height="125""#));
    }

    #[test]
    fn test_empty_entries_render_frame_only() {
        let svg = render_chart(&[]);
        assert_eq!(svg.matches("<rect").count(), 1);
        assert!(svg.contains("Most Frequent Words"));
        assert!(svg.contains("<line"));
    }

    #[test]
    fn test_words_are_escaped() {
        let svg = render_chart(&entries(&[("a<b", 1)]));
        assert!(svg.contains("a&lt;b"));
        assert!(!svg.contains("<b</text>"));
    }

    #[test]
    fn test_chart_is_well_formed_svg() {
        let svg = render_chart(&entries(&[("word", 1)]));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
