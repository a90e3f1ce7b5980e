use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Open,
    AddLine,
    RemoveSelected,
    SavePdf,
}

pub struct ToolbarState {
    pub has_image: bool,
    pub has_selection: bool,
    /// An export or load is in flight
    pub busy: bool,
}

pub fn show_toolbar(ui: &mut egui::Ui, state: &ToolbarState) -> Option<ToolbarAction> {
    let mut action = None;
    let ready = state.has_image && !state.busy;

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!state.busy, egui::Button::new("📂 Open..."))
            .clicked()
        {
            action = Some(ToolbarAction::Open);
        }

        ui.separator();

        if ui
            .add_enabled(ready, egui::Button::new("➕ Add Line"))
            .clicked()
        {
            action = Some(ToolbarAction::AddLine);
        }

        if ui
            .add_enabled(
                ready && state.has_selection,
                egui::Button::new("➖ Remove Selected"),
            )
            .clicked()
        {
            action = Some(ToolbarAction::RemoveSelected);
        }

        ui.separator();

        if ui
            .add_enabled(ready, egui::Button::new("💾 Save PDF..."))
            .clicked()
        {
            action = Some(ToolbarAction::SavePdf);
        }

        if state.busy {
            ui.separator();
            ui.spinner();
        }
    });

    action
}
