use std::collections::HashSet;
use std::time::Duration;

use eframe::{egui, Frame};
use egui::Context;

use reqwest::blocking::Client;
use reqwest::Result;
use serde::Deserialize;

const SERVER: &str = "http://127.0.0.1:5000";

/// One line as returned by the server.
#[derive(Debug, Deserialize)]
struct Line {
    text: String,
    syllables: usize,
    origin: String,
}

/// A haiku as returned by `/v1/haiku`.
#[derive(Debug, Deserialize)]
struct Haiku {
    lines: Vec<Line>,
}

/// REST context holding a reusable blocking HTTP client.
struct RESTContext {
    client: Client,
}

impl RESTContext {
    /// Creates a new REST context with a timeout.
    fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::new(5, 0))
            .build()?;
        Ok(Self { client })
    }

    /// Sends a GET request to `/v1/haiku` with query parameters.
    fn get_haiku(&self, params: &[(String, String)]) -> Result<Haiku> {
        self.client
            .get(format!("{SERVER}/v1/haiku"))
            .query(params)
            .send()?
            .error_for_status()?
            .json()
    }

    /// Sends a GET request to `/v1/corpora`.
    fn get_corpora(&self) -> Result<String> {
        let response = self.client
            .get(format!("{SERVER}/v1/corpora"))
            .send()?
            .error_for_status()?;
        response.text()
    }

    /// Sends a GET request to `/v1/loaded_corpora`.
    fn get_loaded_corpora(&self) -> Result<String> {
        let response = self.client
            .get(format!("{SERVER}/v1/loaded_corpora"))
            .send()?
            .error_for_status()?;
        response.text()
    }

    /// Sends a PUT request to `/v1/load_corpora` with query parameters.
    fn put_load_corpora(&self, param: &str) -> Result<String> {
        let response = self.client
            .put(format!("{SERVER}/v1/load_corpora"))
            .query(&[("names", param)])
            .send()?
            .error_for_status()?;
        response.text()
    }
}

/// Splits a newline separated server listing.
fn split_names(body: &str) -> Vec<String> {
    body.split('\n')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Global UI state (MUST persist between frames in egui).
struct HaikuUI {
    rest: RESTContext,
    haiku: Option<Haiku>,
    status: Option<String>,
    selected_corpora: HashSet<String>,
    available_corpora: Vec<String>,

    use_max_attempts: bool,
    max_attempts: usize,
    strict_known_only: bool,
}

impl HaikuUI {
    /// Initializes the UI with sane defaults.
    fn new() -> Result<Self> {
        let mut ui = Self {
            rest: RESTContext::new()?,
            haiku: None,
            status: None,
            selected_corpora: HashSet::new(),
            available_corpora: Vec::new(),

            use_max_attempts: false,
            max_attempts: 300,
            strict_known_only: false,
        };
        ui.get_corpora();
        ui.get_loaded_corpora();
        ui.get_haiku();
        Ok(ui)
    }

    /// Builds the query parameters for the API.
    ///
    /// max_attempts is only sent when the checkbox is enabled.
    fn build_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if self.use_max_attempts {
            params.push(("max_attempts".into(), self.max_attempts.to_string()));
        }
        params.push(("strict_known_only".into(), self.strict_known_only.to_string()));
        params
    }

    /// Performs the generation request.
    fn get_haiku(&mut self) {
        let params = self.build_query();
        match self.rest.get_haiku(&params) {
            Ok(haiku) => {
                self.status = None;
                self.haiku = Some(haiku);
            }
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }

    fn get_corpora(&mut self) {
        match self.rest.get_corpora() {
            Ok(body) => self.available_corpora = split_names(&body),
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }

    fn get_loaded_corpora(&mut self) {
        match self.rest.get_loaded_corpora() {
            Ok(body) => self.selected_corpora = split_names(&body).into_iter().collect(),
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }

    fn put_load_corpora(&mut self, corpora: Vec<String>) {
        match self.rest.put_load_corpora(&corpora.join(",")) {
            Ok(body) => self.status = Some(body),
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }
}

impl eframe::App for HaikuUI {
    /// UI update loop (called every frame).
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                match &self.haiku {
                    Some(haiku) => {
                        for line in &haiku.lines {
                            ui.label(egui::RichText::new(&line.text).size(22.0))
                                .on_hover_text(&line.origin);
                        }
                        let counts: Vec<String> = haiku.lines.iter().map(|l| l.syllables.to_string()).collect();
                        ui.label(egui::RichText::new(counts.join(" \u{2022} ")).weak());
                    }
                    None => {
                        ui.label("Click Generate to start");
                    }
                }

                ui.add_space(12.0);
                if ui.add_sized([200.0, 40.0], egui::Button::new("Generate")).clicked() {
                    self.get_haiku();
                }
                if let Some(status) = &self.status {
                    ui.label(status);
                }
            });

            ui.separator();

            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.checkbox(&mut self.use_max_attempts, "Limit attempts");
                    if self.use_max_attempts {
                        ui.add(
                            egui::DragValue::new(&mut self.max_attempts)
                                .range(1..=5000)
                                .speed(1),
                        );
                    } else {
                        ui.label("Default attempt budget");
                    }
                    ui.end_row();

                    ui.label("Dictionary words only");
                    ui.checkbox(&mut self.strict_known_only, "");
                    ui.end_row();
                });

            ui.separator();

            let mut selection_changed = false;
            for corpus in &self.available_corpora {
                let mut checked = self.selected_corpora.contains(corpus);
                if ui.checkbox(&mut checked, corpus).changed() {
                    if checked {
                        selection_changed = true;
                        self.selected_corpora.insert(corpus.clone());
                    } else if self.selected_corpora.len() > 1 {
                        selection_changed = true;
                        self.selected_corpora.remove(corpus);
                    }
                }
            }

            if selection_changed {
                let corpora = self.selected_corpora.iter().cloned().collect::<Vec<_>>();
                self.put_load_corpora(corpora);
            }
        });
    }
}

/// Application entry point.
fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([440.0, 420.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "rs-haiku",
        options,
        Box::new(|_| Ok(Box::new(HaikuUI::new()?))),
    )
}
