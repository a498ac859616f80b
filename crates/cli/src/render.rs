use std::fmt::Write;

use vidwatch_session::{SessionView, WatchView};

pub fn render_text(view: &SessionView) -> String {
    match view {
        SessionView::Uninitialized => String::new(),
        SessionView::NotFound { .. } => {
            "Content Not Found\nThe requested content could not be loaded.\n".to_string()
        }
        SessionView::Watching(watch) => {
            let mut out = String::new();
            if let Some(breadcrumb) = view.breadcrumb() {
                let _ = writeln!(out, "{breadcrumb}");
            }
            render_watch(&mut out, watch);
            out
        }
    }
}

fn render_watch(out: &mut String, w: &WatchView) {
    if let Some(badge) = &w.badge {
        let _ = writeln!(out, "{badge}");
    }
    let _ = writeln!(out, "{}: {}", w.provider_name, w.video_url);
    let _ = writeln!(out, "\n{}", w.overview);

    if !w.seasons.is_empty() {
        let _ = writeln!(out, "\nSeasons");
        for season in &w.seasons {
            let marker = if w.season == Some(season.number) { '*' } else { ' ' };
            let _ = writeln!(out, "{marker} {}", season.label());
        }
    }

    if !w.episodes.is_empty() {
        let _ = writeln!(out, "\nEpisodes");
        for ep in &w.episodes {
            let marker = if w.episode == Some(ep.number) { '*' } else { ' ' };
            let mut meta = Vec::new();
            if let Some(runtime) = ep.runtime_label() {
                meta.push(runtime);
            }
            if let Some(date) = ep.air_date {
                meta.push(date.format("%Y-%m-%d").to_string());
            }
            let line = format!("{marker} E{} {} {}", ep.number, ep.name, meta.join(" "));
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }

    let _ = writeln!(out, "\nRecommendations");
    if w.recommendations.is_empty() {
        let _ = writeln!(out, "  No recommendations available");
    }
    for (i, rec) in w.recommendations.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {} ({})", i + 1, rec.title, rec.media_type);
    }
}
