use std::path::PathBuf;
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};

use serde::{Deserialize, Serialize};
use rs_haiku_core::model::generation_input::GenerationInput;
use rs_haiku_core::model::generator::Generator;

/// Largest syllable target accepted by `/v1/line`.
const MAX_LINE_SYLLABLES: usize = 32;

/// Struct representing the tuning query parameters shared by generation endpoints
#[derive(Deserialize)]
struct GenerateParams {
	max_attempts: Option<usize>,
	strict_known_only: Option<bool>,
}

#[derive(Deserialize)]
struct LineParams {
	syllables: Option<usize>,
	max_attempts: Option<usize>,
	strict_known_only: Option<bool>,
}

#[derive(Deserialize)]
struct TextQuery {
	text: Option<String>,
}

#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>,
}

#[derive(Deserialize)]
struct DictionaryQuery {
	name: Option<String>,
}

#[derive(Serialize)]
struct TokenCount {
	token: String,
	syllables: usize,
	known: bool,
}

#[derive(Serialize)]
struct SyllableReport {
	tokens: Vec<TokenCount>,
	total: usize,
}

/// Server settings read from the environment.
struct Settings {
	data_folder: PathBuf,
	bind: String,
	dictionary: Option<PathBuf>,
}

impl Settings {
	fn from_env() -> Self {
		Self {
			data_folder: PathBuf::from(std::env::var("RS_HAIKU_DATA").unwrap_or_else(|_| "./data".to_owned())),
			bind: std::env::var("RS_HAIKU_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_owned()),
			dictionary: std::env::var("RS_HAIKU_DICTIONARY").ok().map(PathBuf::from),
		}
	}
}

struct SharedData {
	generator: Generator,
	data_folder: PathBuf,
}

/// Turns tuning query parameters into validated generation parameters.
fn generation_input(max_attempts: Option<usize>, strict_known_only: Option<bool>) -> Result<GenerationInput, String> {
	let mut input = GenerationInput::default();
	if let Some(max_attempts) = max_attempts {
		input.set_max_attempts(max_attempts)?;
	}
	input.strict_known_only = strict_known_only.unwrap_or(false);
	Ok(input)
}

/// HTTP GET endpoint `/v1/haiku`
///
/// Generates a 5-7-5 haiku and returns it as JSON.
#[get("/v1/haiku")]
async fn get_haiku(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = match generation_input(query.max_attempts, query.strict_known_only) {
		Ok(i) => i,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	HttpResponse::Ok().json(shared_data.generator.generate_haiku(&input))
}

/// HTTP GET endpoint `/v1/line`
///
/// Generates a single line of `syllables` syllables and returns it as JSON.
#[get("/v1/line")]
async fn get_line(data: web::Data<RwLock<SharedData>>, query: web::Query<LineParams>) -> impl Responder {
	let syllables = match query.syllables {
		Some(s) if (1..=MAX_LINE_SYLLABLES).contains(&s) => s,
		Some(_) => return HttpResponse::BadRequest().body(format!("syllables must be between 1 and {MAX_LINE_SYLLABLES}")),
		None => return HttpResponse::BadRequest().body("Missing syllables"),
	};
	let input = match generation_input(query.max_attempts, query.strict_known_only) {
		Ok(i) => i,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	HttpResponse::Ok().json(shared_data.generator.build_line(syllables, &input))
}

/// HTTP GET endpoint `/v1/syllables`
///
/// Counts the syllables of each token of `text`.
#[get("/v1/syllables")]
async fn get_syllables(data: web::Data<RwLock<SharedData>>, query: web::Query<TextQuery>) -> impl Responder {
	let text = match &query.text {
		Some(t) => t,
		None => return HttpResponse::BadRequest().body("Missing text"),
	};

	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	let oracle = shared_data.generator.oracle();

	let tokens: Vec<TokenCount> = text
		.split_whitespace()
		.filter(|t| t.chars().any(|c| c.is_ascii_alphabetic()))
		.map(|t| TokenCount { token: t.to_owned(), syllables: oracle.count(t), known: oracle.is_known_word(t) })
		.collect();

	HttpResponse::Ok().json(SyllableReport { total: oracle.count_phrase(text), tokens })
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	match Generator::available_corpora(&shared_data.data_folder) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	HttpResponse::Ok().body(shared_data.generator.corpus().names().join("\n"))
}

#[put("/v1/load_corpora")]
async fn put_corpora(data: web::Data<RwLock<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();
	if names.iter().any(|name| name.contains(['/', '\\'])) {
		return HttpResponse::BadRequest().body("Corpus names cannot contain path separators");
	}

	let mut shared_data = match data.write() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let folder = shared_data.data_folder.clone();
	match shared_data.generator.load_corpora(&folder, &names) {
		Ok(_) => HttpResponse::Ok().body("Corpora loaded successfully"),
		Err(e) => {
			error!("Failed to load corpora {names:?}: {e}");
			HttpResponse::InternalServerError().body(format!("Failed to load corpora: {e}"))
		}
	}
}

#[put("/v1/load_dictionary")]
async fn put_dictionary(data: web::Data<RwLock<SharedData>>, query: web::Query<DictionaryQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() && !s.contains(['/', '\\']) => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or invalid dictionary name"),
	};

	let mut shared_data = match data.write() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let folder = shared_data.data_folder.join("dictionaries");
	let path = match ["json", "txt", "dict"]
		.iter()
		.map(|extension| folder.join(format!("{name}.{extension}")))
		.find(|path| path.is_file())
	{
		Some(p) => p,
		None => return HttpResponse::NotFound().body(format!("No dictionary named {name}")),
	};

	match shared_data.generator.load_dictionary(&path) {
		Ok(_) => HttpResponse::Ok().body("Dictionary loaded successfully"),
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to load dictionary: {e}")),
	}
}

/// Main entry point for the server.
///
/// Loads every corpus of the data folder (and the optional dictionary),
/// wraps the generator in a `RwLock` so generation only takes read locks,
/// and starts an Actix-web HTTP server.
///
/// # Notes
/// - `RS_HAIKU_DATA`: data folder (default `./data`)
/// - `RS_HAIKU_BIND`: bind address (default `127.0.0.1:5000`)
/// - `RS_HAIKU_DICTIONARY`: optional syllable dictionary path
/// - A missing or empty data folder is not fatal: the server then only
///   serves fallback lines until corpora are loaded.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let settings = Settings::from_env();

	let mut generator = match Generator::from_folder(&settings.data_folder) {
		Ok(g) => g,
		Err(e) => {
			error!("Could not load corpora from {}: {e}", settings.data_folder.display());
			Generator::default()
		}
	};
	if let Some(path) = &settings.dictionary {
		if let Err(e) = generator.load_dictionary(path) {
			error!("Could not load dictionary {}: {e}", path.display());
		}
	}

	let shared_data = SharedData { generator, data_folder: settings.data_folder };
	let shared_generator = web::Data::new(RwLock::new(shared_data));

	info!("Listening on {}", settings.bind);
	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET", "PUT"]))
			.app_data(shared_generator.clone())
			.service(get_haiku)
			.service(get_line)
			.service(get_syllables)
			.service(get_corpora)
			.service(get_loaded_corpora)
			.service(put_corpora)
			.service(put_dictionary)
	})
		.bind(settings.bind.as_str())?
		.run()
		.await
}
