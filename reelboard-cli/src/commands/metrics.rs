//! `metrics`, once or continuously.

use std::fmt::Write;
use std::time::Duration;

use log::debug;
use reelboard_lib::model::Metrics;
use reelboard_lib::poll::MetricsPoller;
use reelboard_lib::poll::PollUpdate;

use super::App;
use crate::error::CliError;

pub async fn show(app: &App) -> Result<(), CliError> {
    let metrics = app.client.metrics().await?;
    print!("{}", format_metrics(&metrics));
    Ok(())
}

/// Prints a snapshot every `interval` until Ctrl-C.
pub async fn watch(app: &App, interval: Duration) -> Result<(), CliError> {
    let mut poller = MetricsPoller::spawn(app.client.clone(), interval);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                debug!("Interrupted, stopping metrics poller");
                break;
            }
            update = poller.changed() => match update {
                Some(update) => print_update(&update),
                None => break,
            },
        }
    }

    poller.shutdown().await;
    Ok(())
}

fn print_update(update: &PollUpdate) {
    let at = update.fetched_at.format("%H:%M:%S");
    match &update.result {
        Ok(metrics) => print!("[{}] #{}\n{}\n", at, update.sequence, format_metrics(metrics)),
        Err(e) => eprintln!("[{}] #{} refresh failed: {}", at, update.sequence, e),
    }
}

fn format_metrics(metrics: &Metrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Users      {:>10}", metrics.total_users);
    let _ = writeln!(out, "Creators   {:>10}", metrics.total_creators);
    let _ = writeln!(out, "Films      {:>10}", metrics.total_films);
    let _ = writeln!(out, "Playlists  {:>10}", metrics.total_playlists);
    let _ = writeln!(out, "Views      {:>10}", metrics.total_views);

    if !metrics.top_films.is_empty() {
        let _ = writeln!(out, "\nTop films");
        for (rank, film) in metrics.top_films.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {} ({} views)", rank + 1, film.title, film.views);
        }
    }

    if let Some(last) = metrics.daily_views.last() {
        let _ = writeln!(out, "\nViews on {}: {}", last.date, last.count);
    }
    out
}

#[cfg(test)]
mod tests {
    use reelboard_lib::model::TopFilm;

    use super::*;

    #[test]
    fn test_format_metrics() {
        let metrics = Metrics {
            total_users: 1200,
            total_films: 3,
            top_films: vec![TopFilm {
                id: "f1".into(),
                title: "Alien".into(),
                views: 99,
            }],
            ..Default::default()
        };

        let text = format_metrics(&metrics);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Users            1200");
        assert_eq!(lines[2], "Films               3");
        assert!(text.contains("  1. Alien (99 views)"));
        assert!(!text.contains("Views on"));
    }
}
