use std::fmt::Write;

use dashboard_core::{ChannelCardView, ChannelStatus, DashboardViewModel, UploadStatus, UploadView};

pub fn render(view: &DashboardViewModel) -> String {
    let mut text = String::new();
    text.push_str("\n=== Product Recommendation Dashboard ===\n");
    render_upload(&mut text, &view.upload);
    for card in &view.cards {
        render_card(&mut text, card);
    }
    text
}

fn render_upload(text: &mut String, upload: &UploadView) {
    let selected = upload
        .selected_file
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "none".to_string());
    let action = if upload.busy { "Uploading..." } else { "Upload Data" };
    let _ = writeln!(text, "[Upload] file: {selected} | {action}");

    match &upload.status {
        UploadStatus::Success(message) => {
            let _ = writeln!(text, "  {message}");
        }
        UploadStatus::Error(message) => {
            let _ = writeln!(text, "  Upload Error: {message}");
        }
        UploadStatus::Idle | UploadStatus::Uploading => {}
    }
}

fn render_card(text: &mut String, card: &ChannelCardView) {
    let _ = writeln!(text, "--- {} ---", card.title);
    match &card.status {
        ChannelStatus::Loading => text.push_str("  Loading recommendations...\n"),
        ChannelStatus::Error(message) => {
            let _ = writeln!(text, "  Error: {message}");
        }
        ChannelStatus::Success(results) if !results.is_empty() => {
            for item in results {
                let _ = writeln!(text, "  - {item}");
            }
        }
        ChannelStatus::Idle | ChannelStatus::Success(_) => {
            text.push_str("  No recommendations found.\n");
        }
    }
}
