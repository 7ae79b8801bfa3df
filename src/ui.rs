use crate::heatmap::WEEKDAY_LABELS;
use crate::models::{ChallengeResponse, ColorBucket, HeatmapLayout};
use std::fmt::Write;

const SQUARE_SIZE: u32 = 10;
const GAP: u32 = 3;

pub fn render_index(layout: &HeatmapLayout, challenge: &ChallengeResponse) -> String {
    let progress = &challenge.progress;
    let summary = match progress.goal {
        Some(goal) => format!(
            "{}/{} workouts in the last {} days",
            progress.completed, goal, progress.window_days
        ),
        None => "No challenge set yet. Configure one with PUT /api/challenge.".to_string(),
    };

    INDEX_HTML
        .replace("{{TODAY}}", &layout.today)
        .replace("{{PERCENT}}", &progress.percent.to_string())
        .replace("{{LABEL}}", &escape_html(&progress.label))
        .replace("{{SUMMARY}}", &summary)
        .replace("{{CURRENT_STREAK}}", &challenge.current_streak.to_string())
        .replace("{{LONGEST_STREAK}}", &challenge.longest_streak.to_string())
        .replace("{{COLUMNS}}", &layout.column_count.to_string())
        .replace("{{SQUARE}}", &SQUARE_SIZE.to_string())
        .replace("{{GAP}}", &GAP.to_string())
        .replace("{{GRID}}", &render_grid(layout))
}

pub fn bucket_color(bucket: ColorBucket) -> &'static str {
    match bucket {
        ColorBucket::Empty => "var(--muted)",
        ColorBucket::Low => "#d1fae5",
        ColorBucket::Mid => "#a7f3d0",
        ColorBucket::High => "#6ee7b7",
        ColorBucket::Max => "#34d399",
    }
}

/// CSS grid markup: row 1 holds month labels, column 1 weekday labels.
fn render_grid(layout: &HeatmapLayout) -> String {
    let mut out = String::new();

    for span in &layout.month_spans {
        let _ = write!(
            out,
            r#"<div class="month" style="grid-row:1;grid-column:{} / span {}">{}</div>"#,
            span.display_column() + 1,
            span.column_span,
            escape_html(&span.month)
        );
    }

    for (row, label) in WEEKDAY_LABELS.iter().enumerate() {
        let _ = write!(
            out,
            r#"<div class="weekday" style="grid-row:{};grid-column:1">{label}</div>"#,
            row + 2
        );
    }

    for slot in &layout.slots {
        let Some(day) = slot.day.and_then(|index| layout.days.get(index)) else {
            continue;
        };
        let _ = write!(
            out,
            r#"<div class="square" title="{}: {} workout(s)" style="grid-row:{};grid-column:{};background:{}"></div>"#,
            day.cell.date,
            day.cell.count,
            slot.row + 2,
            slot.column + 2,
            bucket_color(day.bucket)
        );
    }

    out
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Workout Activity</title>
  <style>
    :root {
      --bg: #f4f7f5;
      --ink: #1f2a24;
      --accent: #10b981;
      --border: #d9e2dc;
      --muted: #e5e7eb;
      --card: #ffffff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Helvetica Neue", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      display: grid;
      gap: 24px;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      border: 1px solid var(--border);
      padding: 24px;
    }

    .challenge {
      display: flex;
      align-items: center;
      gap: 24px;
    }

    .ring {
      width: 120px;
      height: 120px;
      border-radius: 50%;
      background: conic-gradient(var(--accent) {{PERCENT}}%, var(--border) {{PERCENT}}% 100%);
      display: grid;
      place-items: center;
    }

    .ring span {
      width: 90px;
      height: 90px;
      border-radius: 50%;
      background: var(--card);
      display: grid;
      place-items: center;
      font-weight: 800;
    }

    .muted {
      color: #6b7280;
      font-size: 0.85rem;
    }

    .scroll {
      overflow-x: auto;
      padding-bottom: 16px;
    }

    .heatmap {
      display: grid;
      grid-template-columns: 40px repeat({{COLUMNS}}, {{SQUARE}}px);
      gap: {{GAP}}px;
      min-width: fit-content;
    }

    .month {
      font-size: 12px;
      font-weight: 600;
    }

    .weekday {
      font-size: 10px;
      text-align: right;
    }

    .square {
      width: {{SQUARE}}px;
      height: {{SQUARE}}px;
      border-radius: 2px;
    }
  </style>
</head>
<body>
  <main class="app">
    <section class="card challenge">
      <div class="ring" title="{{PERCENT}}%"><span>{{PERCENT}}%</span></div>
      <div>
        <h2>{{LABEL}}</h2>
        <div>{{SUMMARY}}</div>
        <div class="muted">Current streak: {{CURRENT_STREAK}} days &middot; Longest: {{LONGEST_STREAK}} days</div>
      </div>
    </section>
    <section class="card">
      <h2>Past year activity</h2>
      <div class="scroll">
        <div class="heatmap" aria-label="Workout activity heatmap">{{GRID}}</div>
      </div>
      <div class="muted">Darker = more workouts that day. Updated {{TODAY}}.</div>
    </section>
  </main>
</body>
</html>
"#;
