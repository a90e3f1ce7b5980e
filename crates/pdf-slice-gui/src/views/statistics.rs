use eframe::egui;
use pdf_slice::{ExportReport, SliceDiagnostic, SliceStatistics};

pub fn show_statistics(
    ui: &mut egui::Ui,
    stats: Option<&SliceStatistics>,
    last_report: Option<&ExportReport>,
) {
    egui::CollapsingHeader::new("📊 Statistics")
        .default_open(true)
        .show(ui, |ui| {
            if let Some(stats) = stats {
                ui.label(format!("Image: {}x{}", stats.image.width, stats.image.height));
                ui.label(format!("A3 chunk height: {:.1}px", stats.chunk_height));
                ui.label(format!("Cut-lines: {}", stats.line_count));
                ui.label(format!("Pages: {}", stats.page_count));

                if stats.total_padding_rows > 0 {
                    ui.label(format!("Padding rows: {}", stats.total_padding_rows));
                }

                let tall = stats.slices.iter().filter(|slice| slice.tall).count();
                if tall > 0 {
                    ui.colored_label(
                        egui::Color32::YELLOW,
                        format!("{} slice(s) taller than A3", tall),
                    );
                }
            } else {
                ui.label("No image loaded");
                ui.label("Open an image to see how it will be split");
            }
        });

    if let Some(report) = last_report {
        egui::CollapsingHeader::new("Last export")
            .default_open(false)
            .show(ui, |ui| {
                ui.label(report.output_path.display().to_string());
                ui.label(format!("{} page(s)", report.page_count));
                for diagnostic in &report.diagnostics {
                    match diagnostic {
                        SliceDiagnostic::TallSlice { index, height, .. } => {
                            ui.label(format!("Page {}: {}px, past A3 proportions", index + 1, height));
                        }
                    }
                }
            });
    }
}
