use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use markov_core::io::{join_records, read_records};
use markov_core::{GenerationInput, MarkovChain, ModelError, Mode};

mod config;

use config::ServerConfig;

/// Query parameters of the `/v1/predict` endpoint
#[derive(Deserialize)]
struct PredictParams {
	token: Option<String>,
	mode: Option<Mode>,
}

/// Query parameters of the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed: Option<String>,
	mode: Option<Mode>,
	max_pieces: Option<usize>,
}

#[derive(Serialize, Deserialize)]
struct PredictResponse {
	token: String,
}

#[derive(Serialize, Deserialize)]
struct GenerateResponse {
	sentence: String,
}

#[derive(Serialize, Deserialize)]
struct VocabularyResponse {
	size: usize,
	tokens: Vec<String>,
}

/// Trained model shared by every worker.
///
/// The model is read-only; only the random source needs the lock.
struct SharedData {
	model: MarkovChain,
	rng: Mutex<StdRng>,
}

impl SharedData {
	fn new(model: MarkovChain, seed: Option<u64>) -> Self {
		let rng = match seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		Self { model, rng: Mutex::new(rng) }
	}
}

/// Maps a model error to an HTTP response.
///
/// Unknown tokens and empty seeds are caller mistakes; a degenerate row
/// is a gap of the training corpus.
fn model_error_response(e: &ModelError) -> HttpResponse {
	match e {
		ModelError::UnknownToken(_) | ModelError::EmptySeed => HttpResponse::BadRequest().body(e.to_string()),
		ModelError::DegenerateRow(_) => HttpResponse::UnprocessableEntity().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/predict`
///
/// Returns the token following `token`.
#[get("/v1/predict")]
async fn get_predict(data: web::Data<SharedData>, query: web::Query<PredictParams>) -> impl Responder {
	let token = match &query.token {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty token"),
	};
	let mode = query.mode.unwrap_or_default();

	let mut rng = match data.rng.lock() {
		Ok(rng) => rng,
		Err(_) => return HttpResponse::InternalServerError().body("Random source lock failed"),
	};

	match data.model.predict(token, mode, &mut *rng) {
		Ok(next) => HttpResponse::Ok().json(PredictResponse { token: next.to_owned() }),
		Err(e) => {
			warn!("Prediction from '{token}' rejected: {e}");
			model_error_response(&e)
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a sentence continuing `seed`.
#[get("/v1/generate")]
async fn get_generate(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let seed = match &query.seed {
		Some(s) => s.as_str(),
		None => return HttpResponse::BadRequest().body("Missing seed"),
	};

	let mut input = GenerationInput::new(query.mode.unwrap_or_default());
	if let Some(max_pieces) = query.max_pieces {
		if let Err(e) = input.set_max_pieces(max_pieces) {
			return HttpResponse::BadRequest().body(e.to_string());
		}
	}

	let mut rng = match data.rng.lock() {
		Ok(rng) => rng,
		Err(_) => return HttpResponse::InternalServerError().body("Random source lock failed"),
	};

	match data.model.generate_with(seed, &input, &mut *rng) {
		Ok(sentence) => HttpResponse::Ok().json(GenerateResponse { sentence }),
		Err(e) => {
			warn!("Generation from '{seed}' rejected: {e}");
			model_error_response(&e)
		}
	}
}

/// HTTP GET endpoint `/v1/vocabulary`
#[get("/v1/vocabulary")]
async fn get_vocabulary(data: web::Data<SharedData>) -> impl Responder {
	let vocabulary = data.model.vocabulary();
	HttpResponse::Ok().json(VocabularyResponse {
		size: vocabulary.len(),
		tokens: vocabulary.iter().map(str::to_owned).collect(),
	})
}

/// Main entry point for the server.
///
/// Trains the model on the configured record file, then serves it.
///
/// # Notes
/// - Configuration comes from `MARKOV_*` environment variables.
/// - The model is trained once; restart the server to retrain.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	let config = ServerConfig::from_env()?;
	let records = read_records(&config.corpus_path)?;
	let model = MarkovChain::new(&join_records(&records));
	let shared_data = web::Data::new(SharedData::new(model, config.seed));

	info!("Listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
			.app_data(shared_data.clone())
			.service(get_predict)
			.service(get_generate)
			.service(get_vocabulary)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await?;

	Ok(())
}
