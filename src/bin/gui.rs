#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use finance_calculator_toolbox::{
    app,
    calculator::CalculatorKind,
    config::{self, Theme},
    format::{Formatter, MAX_DECIMALS},
    forms::FormSet,
    i18n::{self, keys},
    logging,
    report::Report,
};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};
use tracing::{info, warn};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/ko/uk)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let loaded = config::load_or_default();
    let app_cfg = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&app_cfg.log_level);
    if let Err(e) = &loaded {
        warn!("config load failed, using defaults: {e}");
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(900.0, 600.0))
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Finance Calculator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx, app_cfg.font_path.as_deref()) {
                warn!("font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg, cli_lang))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글/키릴 문자를 표시하기 위한 폰트를 우선 적용한다.
/// 1) 설정의 사용자 폰트
/// 2) assets/fonts/ 아래 폰트
/// 3) Windows 시스템 폰트(맑은 고딕/굴림 등)
/// 4) 모두 실패 시 Err. egui 기본 폰트는 그대로 유지된다.
fn setup_fonts(ctx: &egui::Context, user_font: Option<&str>) -> Result<(), String> {
    if let Some(path) = user_font {
        return load_custom_font(ctx, path);
    }

    for cand in ["assets/fonts/malgun.ttf", "assets/fonts/NotoSansKR-Regular.ttf"] {
        let p = Path::new(cand);
        if p.exists() {
            let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
            apply_font_bytes(ctx, bytes, "app_font");
            return Ok(());
        }
    }

    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "system_font");
                return Ok(());
            }
        }
    }

    Err("Font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

/// 설정 테마를 egui Visuals로 바꾼다. `System`은 OS 테마를 따르고, 모르면 egui 기본값.
fn visuals_for(theme: Theme, system: Option<eframe::Theme>) -> egui::Visuals {
    match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
        Theme::System => system
            .map(|t| t.egui_visuals())
            .unwrap_or_default(),
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    fmt: Formatter,
    tab: CalculatorKind,
    forms: FormSet,
    report: Report,
    status: Option<String>,
    show_settings_modal: bool,
    lang_input: String,
    theme_input: Theme,
    decimals_input: usize,
    symbol_input: String,
    font_input: String,
    window_alpha: f32,
}

impl GuiApp {
    fn new(config: config::Config, cli_lang: Option<String>) -> Self {
        let tr = app::translator_for(&config, cli_lang.as_deref());
        info!(lang = tr.language_code(), "gui started");
        Self {
            fmt: Formatter::from_settings(&config.display),
            forms: FormSet::new(&config),
            report: Report::new(),
            tab: CalculatorKind::SimpleInterest,
            status: None,
            show_settings_modal: false,
            lang_input: config.language.clone(),
            theme_input: config.theme,
            decimals_input: config.display.decimals,
            symbol_input: config.display.currency_symbol.clone().unwrap_or_default(),
            font_input: config.font_path.clone().unwrap_or_default(),
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            tr,
            config,
        }
    }

    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading(self.tr.t(keys::GUI_NAV_HEADING));
            ui.add_space(8.0);
        });
        for kind in CalculatorKind::ALL {
            let selected = self.tab == kind;
            let button = egui::Button::new(self.tr.calculator_title(kind))
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = kind;
            }
            ui.add_space(4.0);
        }
        ui.separator();
        ui.label(self.tr.tf(
            keys::EXPORT_ENTRIES,
            &[("count", self.report.len().to_string())],
        ));
    }

    /// 선택된 계산기 화면. 입력 변경만으로는 결과가 바뀌지 않는다.
    fn ui_calculator(&mut self, ui: &mut egui::Ui) {
        let kind = self.tab;
        let tr = &self.tr;
        let fmt = &self.fmt;
        let form = self.forms.get_mut(kind);
        let formula = tr.t(&keys::formula(kind));

        heading_with_tip(ui, tr.calculator_title(kind), formula);
        ui.label(egui::RichText::new(formula).monospace());
        ui.add_space(8.0);

        let mut submit = false;
        egui::Grid::new(("calc_form", kind.id()))
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for field in form.fields_mut() {
                    label_with_tip(ui, tr.t(&keys::field(field.name)), field.name);
                    let resp =
                        ui.add(egui::TextEdit::singleline(&mut field.text).desired_width(180.0));
                    if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }
                    ui.end_row();
                }
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button(tr.t(keys::CALC_RUN)).clicked() {
                submit = true;
            }
            if ui.button(tr.t(keys::CALC_CLEAR)).clicked() {
                form.clear();
                submit = false;
            }
            let can_add = form.result().is_some();
            if ui
                .add_enabled(can_add, egui::Button::new(tr.t(keys::CALC_ADD_TO_REPORT)))
                .clicked()
                && self.report.add_form(form)
            {
                self.status = Some(tr.t(keys::CALC_ADDED_TO_REPORT).to_string());
            }
        });
        if submit {
            // 실패 시 폼이 오류를 기록하고 이전 결과를 유지한다.
            let _ = form.submit();
        }

        ui.separator();
        if let Some(err) = form.last_error() {
            ui.colored_label(
                ui.visuals().error_fg_color,
                format!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.calc_error(err)),
            );
            if form.result().is_some() {
                ui.label(tr.t(keys::CALC_PREVIOUS_KEPT));
            }
        }
        let lines = form.result_lines(tr, fmt);
        if lines.is_empty() {
            ui.weak(tr.t(keys::CALC_NO_RESULT));
        }
        for line in lines {
            ui.label(egui::RichText::new(line).strong().size(18.0));
        }
    }

    fn export_report(&mut self) {
        if self.report.is_empty() {
            self.status = Some(self.tr.t(keys::EXPORT_EMPTY).to_string());
            return;
        }
        if let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("TOML", &["toml"])
            .set_file_name("calculations.csv")
            .save_file()
        {
            self.save_report(&path);
        }
    }

    fn save_report(&mut self, path: &Path) {
        self.status = Some(match self.report.save(path, &self.fmt) {
            Ok(_) => self.tr.tf(
                keys::EXPORT_SAVED,
                &[
                    ("count", self.report.len().to_string()),
                    ("path", path.display().to_string()),
                ],
            ),
            Err(e) => {
                warn!("report export failed: {e}");
                format!("{}: {}", self.tr.t(keys::ERROR_PREFIX), self.tr.report_error(&e))
            }
        });
    }

    /// 설정 창의 입력값을 설정에 반영하고 저장한다.
    fn apply_settings(&mut self, ctx: &egui::Context) {
        let font_changed = self.config.font_path.as_deref().unwrap_or_default() != self.font_input.trim();
        self.config.language = self.lang_input.clone();
        self.config.theme = self.theme_input;
        self.config.window_alpha = self.window_alpha;
        self.config.display.decimals = self.decimals_input;
        let symbol = self.symbol_input.trim();
        self.config.display.currency_symbol = (!symbol.is_empty()).then(|| symbol.to_string());
        let font = self.font_input.trim();
        self.config.font_path = (!font.is_empty()).then(|| font.to_string());
        self.config = self.config.clone().normalized();

        // 저장 후에는 CLI 인자 대신 설정의 언어를 따른다.
        self.tr = app::translator_for(&self.config, None);
        self.fmt = Formatter::from_settings(&self.config.display);

        if font_changed {
            if let Some(path) = self.config.font_path.as_deref() {
                if let Err(e) = load_custom_font(ctx, path) {
                    warn!("font error: {e}");
                }
            }
        }

        self.status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED).to_string(),
            Err(e) => {
                warn!("settings save failed: {e}");
                format!("{}: {}", self.tr.t(keys::ERROR_PREFIX), self.tr.config_error(&e))
            }
        });
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings_modal;
        let mut save = false;
        egui::Window::new(self.tr.t(keys::MAIN_MENU_SETTINGS))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                let tr = &self.tr;
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(tr.t(keys::SETTINGS_LANGUAGE));
                        egui::ComboBox::from_id_source("lang_choice")
                            .selected_text(self.lang_input.as_str())
                            .show_ui(ui, |ui| {
                                ui.selectable_value(
                                    &mut self.lang_input,
                                    "auto".into(),
                                    tr.t(keys::GUI_LANG_AUTO),
                                );
                                ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                                ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                                ui.selectable_value(&mut self.lang_input, "uk".into(), "Українська");
                            });
                        ui.end_row();

                        ui.label(tr.t(keys::SETTINGS_THEME));
                        ui.horizontal(|ui| {
                            for (theme, key) in [
                                (Theme::System, keys::GUI_THEME_SYSTEM),
                                (Theme::Light, keys::GUI_THEME_LIGHT),
                                (Theme::Dark, keys::GUI_THEME_DARK),
                            ] {
                                ui.selectable_value(&mut self.theme_input, theme, tr.t(key));
                            }
                        });
                        ui.end_row();

                        ui.label(tr.t(keys::SETTINGS_DECIMALS));
                        ui.add(
                            egui::DragValue::new(&mut self.decimals_input)
                                .clamp_range(0..=MAX_DECIMALS),
                        );
                        ui.end_row();

                        ui.label(tr.t(keys::SETTINGS_CURRENCY_SYMBOL));
                        ui.add(egui::TextEdit::singleline(&mut self.symbol_input).desired_width(60.0));
                        ui.end_row();

                        ui.label(tr.t(keys::GUI_ALPHA));
                        ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0));
                        ui.end_row();

                        ui.label(tr.t(keys::GUI_FONT));
                        ui.add(egui::TextEdit::singleline(&mut self.font_input).desired_width(220.0));
                        ui.end_row();
                    });
                ui.separator();
                if ui.button(tr.t(keys::GUI_SAVE)).clicked() {
                    save = true;
                }
            });
        self.show_settings_modal = open;
        if save {
            self.apply_settings(ctx);
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut Frame) {
        // 매 프레임 새 Visuals에서 투명도를 적용한다.
        let mut visuals = visuals_for(self.theme_input, frame.info().system_theme);
        visuals.window_fill = visuals.window_fill.linear_multiply(self.window_alpha);
        visuals.panel_fill = visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_visuals(visuals);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(self.tr.t(keys::EXPORT_BUTTON)).clicked() {
                    self.export_report();
                }
                if ui.button(self.tr.t(keys::MAIN_MENU_SETTINGS)).clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status.as_deref().unwrap_or_default());
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(200.0)
            .max_width(400.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_calculator(ui));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finance_calculator_toolbox::calculator::fields;

    #[test]
    fn new_app_prefills_default_compoundings() {
        let cfg = config::Config {
            default_compoundings_per_year: 12,
            ..Default::default()
        };
        let app = GuiApp::new(cfg, Some("en".into()));
        let form = app.forms.get(CalculatorKind::CompoundInterest);
        assert_eq!(form.text(fields::COMPOUNDINGS_PER_YEAR), Some("12"));
        assert_eq!(app.tab, CalculatorKind::SimpleInterest);
        assert!(app.report.is_empty());
    }

    #[test]
    fn cli_language_wins_over_config() {
        let cfg = config::Config {
            language: "ko".into(),
            ..Default::default()
        };
        let app = GuiApp::new(cfg, Some("uk".into()));
        assert_eq!(app.tr.language_code(), "uk");
    }

    #[test]
    fn visuals_follow_theme_setting() {
        assert!(visuals_for(Theme::Dark, None).dark_mode);
        assert!(!visuals_for(Theme::Light, Some(eframe::Theme::Dark)).dark_mode);
        assert!(!visuals_for(Theme::System, Some(eframe::Theme::Light)).dark_mode);
        assert!(visuals_for(Theme::System, Some(eframe::Theme::Dark)).dark_mode);
    }

    #[test]
    fn save_report_reports_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = GuiApp::new(config::Config::default(), Some("en".into()));
        let form = app.forms.get_mut(CalculatorKind::Loan);
        form.set(fields::AMOUNT, "12000");
        form.set(fields::RATE, "0");
        form.set(fields::YEARS, "1");
        form.submit().unwrap();
        assert!(app.report.add_form(app.forms.get(CalculatorKind::Loan)));

        let path = dir.path().join("out.csv");
        app.save_report(&path);
        let status = app.status.clone().unwrap();
        assert!(status.starts_with("Saved 1 entries"), "{status}");
        let csv = fs::read_to_string(&path).unwrap();
        assert!(csv.contains("loan,output,monthly_payment,1000.00"));

        app.save_report(&dir.path().join("out.xlsx"));
        assert_eq!(
            app.status.as_deref(),
            Some("Error: Unsupported report format: \"xlsx\" (.csv / .toml)")
        );

        app.save_report(&dir.path().join("missing").join("out.csv"));
        let status = app.status.clone().unwrap();
        assert!(status.starts_with("Error: File error: "), "{status}");
        assert_eq!(app.report.len(), 1);
    }
}
