//! Dashboard shell: login screen, sidebar navigation, and the two order
//! listings rendered through one shared view routine.

use std::time::Duration;

use chrono::Utc;
use client_core::{OrderListModel, StatusUpdate, HOME_PAGE_SIZE, ORDER_PAGE_SIZE};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::{Color32, RichText};
use shared::domain::{format_date_id, OrderId, OrderStatus, StatusColor};
use shared::protocol::DriverProfile;

use crate::backend_bridge::commands::{BackendCommand, DashboardView};
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

enum AppViewState {
    Login,
    Main,
}

struct ResultDialog {
    title: String,
    message: String,
    success: bool,
}

impl ResultDialog {
    fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Berhasil".to_string(),
            message: message.into(),
            success: true,
        }
    }

    fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            success: false,
        }
    }
}

enum ListAction {
    Edit(OrderId),
    SetStatus(OrderStatus),
    RequestSave,
    PrevPage,
    NextPage,
    GotoPage(usize),
}

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view_state: AppViewState,
    active_view: DashboardView,
    email: String,
    password: String,
    login_error: Option<String>,
    status: String,
    home: OrderListModel,
    orders_view: OrderListModel,
    profile: Option<DriverProfile>,
    result_dialog: Option<ResultDialog>,
}

impl DashboardApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view_state: AppViewState::Login,
            active_view: DashboardView::Home,
            email: String::new(),
            password: String::new(),
            login_error: None,
            status: String::new(),
            // The summary view shows ten rows and leaves them stale after a
            // save; the full listing shows five and patches in place.
            home: OrderListModel::new(HOME_PAGE_SIZE, false),
            orders_view: OrderListModel::new(ORDER_PAGE_SIZE, true),
            profile: None,
            result_dialog: None,
        }
    }

    fn model(&self, view: DashboardView) -> &OrderListModel {
        match view {
            DashboardView::Home => &self.home,
            DashboardView::Orders => &self.orders_view,
        }
    }

    fn model_mut(&mut self, view: DashboardView) -> &mut OrderListModel {
        match view {
            DashboardView::Home => &mut self.home,
            DashboardView::Orders => &mut self.orders_view,
        }
    }

    fn open_view(&mut self, view: DashboardView) {
        self.active_view = view;
        self.model_mut(view).begin_load();
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchOrders { view },
            &mut self.status,
        );
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendStartupFailed(message) => {
                    self.status = message;
                }
                UiEvent::LoginOk => {
                    self.view_state = AppViewState::Main;
                    self.password.clear();
                    self.login_error = None;
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::FetchProfile,
                        &mut self.status,
                    );
                    self.open_view(DashboardView::Home);
                }
                UiEvent::LoginFailed(message) => {
                    self.login_error = Some(message);
                }
                UiEvent::LoggedOut => {
                    self.reset_to_login(String::new());
                }
                UiEvent::SessionExpired => {
                    self.reset_to_login("Sesi berakhir, silakan login kembali.".to_string());
                }
                UiEvent::OrdersLoaded { view, orders } => {
                    self.model_mut(view).apply_loaded(orders);
                }
                UiEvent::OrdersLoadFailed { view, message } => {
                    self.model_mut(view).apply_load_failed();
                    self.result_dialog = Some(ResultDialog::failure(
                        "Gagal Mendapatkan Data Order",
                        message,
                    ));
                }
                UiEvent::OrderStatusUpdated {
                    view,
                    order_id,
                    status,
                } => {
                    self.model_mut(view)
                        .apply_save_ok(&StatusUpdate { order_id, status });
                    self.result_dialog =
                        Some(ResultDialog::success("Berhasil Mengubah Status Order."));
                }
                UiEvent::OrderStatusUpdateFailed { view, message } => {
                    self.model_mut(view).apply_save_failed();
                    self.result_dialog = Some(ResultDialog::failure(
                        "Gagal Mengubah Status Order",
                        message,
                    ));
                }
                UiEvent::ProfileLoaded(profile) => {
                    self.profile = Some(profile);
                }
                UiEvent::ProfileLoadFailed(message) => {
                    self.result_dialog = Some(ResultDialog::failure(
                        "Gagal Mendapatkan Data Profil",
                        message,
                    ));
                }
            }
        }
    }

    fn reset_to_login(&mut self, status: String) {
        self.view_state = AppViewState::Login;
        self.active_view = DashboardView::Home;
        self.home = OrderListModel::new(HOME_PAGE_SIZE, false);
        self.orders_view = OrderListModel::new(ORDER_PAGE_SIZE, true);
        self.profile = None;
        self.result_dialog = None;
        self.status = status;
    }

    fn show_login(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.heading("Akucuciin Driver");
                ui.add_space(16.0);
                ui.label("Email");
                ui.add(egui::TextEdit::singleline(&mut self.email).desired_width(240.0));
                ui.label("Password");
                ui.add(
                    egui::TextEdit::singleline(&mut self.password)
                        .password(true)
                        .desired_width(240.0),
                );
                if let Some(error) = &self.login_error {
                    ui.colored_label(Color32::from_rgb(211, 47, 47), error);
                }
                ui.add_space(8.0);
                if ui.button("Login").clicked() {
                    self.login_error = None;
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::Login {
                            email: self.email.clone(),
                            password: self.password.clone(),
                        },
                        &mut self.status,
                    );
                }
                if !self.status.is_empty() {
                    ui.add_space(8.0);
                    ui.label(&self.status);
                }
            });
        });
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar").show(ctx, |ui| {
            ui.heading("Akucuciin");
            if let Some(profile) = &self.profile {
                ui.label(&profile.name);
                ui.small(&profile.email);
            }
            ui.separator();

            let mut target: Option<DashboardView> = None;
            if ui
                .selectable_label(self.active_view == DashboardView::Home, "Dashboard")
                .clicked()
            {
                target = Some(DashboardView::Home);
            }
            if ui
                .selectable_label(self.active_view == DashboardView::Orders, "Order")
                .clicked()
            {
                target = Some(DashboardView::Orders);
            }
            if let Some(view) = target {
                if view != self.active_view {
                    self.open_view(view);
                }
            }

            ui.separator();
            if ui.button("Logout").clicked() {
                dispatch_backend_command(&self.cmd_tx, BackendCommand::Logout, &mut self.status);
            }
        });

        if !self.status.is_empty() {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.label(&self.status);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let view = self.active_view;
            match view {
                DashboardView::Home => {
                    ui.heading("Selamat Datang di Dashboard Driver!");
                    ui.label(format!("Hari ini: {}", format_date_id(&Utc::now())));
                    ui.label(format!(
                        "Jumlah pesanan hari ini: {}",
                        self.home.orders().len()
                    ));
                    ui.separator();
                    ui.strong("ORDER AKUCUCIIN HARI INI");
                }
                DashboardView::Orders => {
                    ui.heading("DAFTAR ORDER AKUCUCIIN");
                }
            }
            ui.add_space(8.0);
            let model = match view {
                DashboardView::Home => &mut self.home,
                DashboardView::Orders => &mut self.orders_view,
            };
            Self::show_order_list(ui, model, view);
        });

        self.show_confirm_dialog(ctx);
        self.show_result_dialog(ctx);
    }

    /// One routine backs both listings; page size and save behavior live in
    /// the model, not here.
    fn show_order_list(ui: &mut egui::Ui, model: &mut OrderListModel, view: DashboardView) {
        if model.is_loading() {
            ui.label("Loading...");
            return;
        }
        if model.orders().is_empty() {
            ui.label("Belum ada order.");
            return;
        }

        let mut actions: Vec<ListAction> = Vec::new();
        let editing_id = model.editing_order_id().cloned();
        let edited_status = model.edited_status();
        let first_index = (model.current_page() - 1) * model.page_size();
        let fallback = ui.visuals().text_color();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (offset, order) in model.visible_page().iter().enumerate() {
                let row_in_edit = editing_id.as_ref() == Some(&order.id);
                let header = format!(
                    "{}. {} - {} - {}",
                    first_index + offset + 1,
                    order.customer.name,
                    order.status,
                    format_date_id(&order.created_at)
                );
                egui::CollapsingHeader::new(header)
                    .id_salt((view, order.id.as_str()))
                    .show(ui, |ui| {
                        ui.label(format!("Order Id: {}", order.id));
                        ui.label(format!("Tanggal: {}", format_date_id(&order.created_at)));
                        ui.label(format!("Email: {}", order.customer.email));
                        ui.label(format!("Telephone: {}", order.customer.telephone));
                        ui.label(format!("Alamat: {}", order.customer.address));
                        ui.label(format!(
                            "Kode Promo: {}",
                            order.coupon_code.as_deref().unwrap_or("-")
                        ));
                        ui.label(format!("Laundry: {}", order.laundry_partner.name));
                        ui.label(format!("Paket: {}", order.package.name));

                        ui.horizontal(|ui| {
                            ui.label("Status:");
                            if row_in_edit {
                                let mut chosen = edited_status.unwrap_or(order.status);
                                egui::ComboBox::from_id_salt((view, order.id.as_str(), "status"))
                                    .selected_text(
                                        RichText::new(chosen.as_str())
                                            .color(status_color(chosen, fallback)),
                                    )
                                    .show_ui(ui, |ui| {
                                        for option in OrderStatus::ALL {
                                            ui.selectable_value(
                                                &mut chosen,
                                                option,
                                                RichText::new(option.as_str())
                                                    .color(status_color(option, fallback)),
                                            );
                                        }
                                    });
                                if Some(chosen) != edited_status {
                                    actions.push(ListAction::SetStatus(chosen));
                                }
                                if ui.button("Simpan").clicked() {
                                    actions.push(ListAction::RequestSave);
                                }
                            } else {
                                ui.colored_label(
                                    status_color(order.status, fallback),
                                    order.status.as_str(),
                                );
                                if ui.button("Edit").clicked() {
                                    actions.push(ListAction::Edit(order.id.clone()));
                                }
                            }
                        });
                    });
            }
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(model.current_page() > 1, egui::Button::new("Prev"))
                .clicked()
            {
                actions.push(ListAction::PrevPage);
            }
            for page in 1..=model.page_count() {
                if ui
                    .selectable_label(page == model.current_page(), page.to_string())
                    .clicked()
                {
                    actions.push(ListAction::GotoPage(page));
                }
            }
            if ui
                .add_enabled(
                    model.current_page() < model.page_count(),
                    egui::Button::new("Next"),
                )
                .clicked()
            {
                actions.push(ListAction::NextPage);
            }
        });

        for action in actions {
            match action {
                ListAction::Edit(order_id) => {
                    model.begin_edit(&order_id);
                }
                ListAction::SetStatus(status) => model.set_edited_status(status),
                ListAction::RequestSave => model.request_save(),
                ListAction::PrevPage => model.prev_page(),
                ListAction::NextPage => model.next_page(),
                ListAction::GotoPage(page) => model.goto_page(page),
            }
        }
    }

    fn show_confirm_dialog(&mut self, ctx: &egui::Context) {
        let view = self.active_view;
        if !self.model(view).is_confirming() {
            return;
        }

        let mut decision: Option<bool> = None;
        egui::Window::new("Konfirmasi")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Yakin ingin mengubah data order ini?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Ubah").clicked() {
                        decision = Some(true);
                    }
                    if ui.button("Batal").clicked() {
                        decision = Some(false);
                    }
                });
            });

        match decision {
            Some(true) => {
                if let Some(update) = self.model_mut(view).confirm_save() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::UpdateOrderStatus {
                            view,
                            order_id: update.order_id,
                            status: update.status,
                        },
                        &mut self.status,
                    );
                }
            }
            Some(false) => self.model_mut(view).cancel_save(),
            None => {}
        }
    }

    fn show_result_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.result_dialog else {
            return;
        };
        let title = dialog.title.clone();
        let message = dialog.message.clone();
        let button = if dialog.success { "Ok" } else { "Coba Lagi" };

        let mut close = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button(button).clicked() {
                    close = true;
                }
            });
        if close {
            self.result_dialog = None;
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        match self.view_state {
            AppViewState::Login => self.show_login(ctx),
            AppViewState::Main => self.show_main(ctx),
        }
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

/// Maps the shared palette classes onto concrete colors; `Default` falls back
/// to the theme's text color.
fn status_color(status: OrderStatus, fallback: Color32) -> Color32 {
    match status.color() {
        StatusColor::Warning => Color32::from_rgb(237, 108, 2),
        StatusColor::Info => Color32::from_rgb(2, 136, 209),
        StatusColor::Primary => Color32::from_rgb(25, 118, 210),
        StatusColor::Success => Color32::from_rgb(46, 125, 50),
        StatusColor::Error => Color32::from_rgb(211, 47, 47),
        StatusColor::Neutral => Color32::GRAY,
        StatusColor::Default => fallback,
    }
}
