use std::{
    fs, io, process,
    sync::{Mutex, MutexGuard},
};

use actix_web::{
    http::StatusCode,
    web::{self, Data},
    App, HttpServer, Responder, ResponseError,
};
use clap::Parser;
use hangman::{
    parse_words, AddWordsRequest, CreateGameResponse, Game, GameResponse, UpdateGameRequest,
    UpdateGameResponse, WordSource,
};
use hashbrown::HashMap;
use uuid::Uuid;

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("game not found for id {0}")]
    GameNotFound(Uuid),
    #[error(transparent)]
    InvalidGuess(#[from] hangman::Error),
    #[error("guesses must be unique - {0} has already been guessed")]
    DuplicateGuess(String),
    #[error("game state is unavailable")]
    Poisoned,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::GameNotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidGuess(_) | Error::DuplicateGuess(_) => StatusCode::BAD_REQUEST,
            Error::Poisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[clap(version, about = "Serve games of hangman over HTTP")]
struct Args {
    /// path to a word list added to every new game
    #[clap(short, long)]
    words: Vec<String>,

    /// start games without the built-in words
    #[clap(long)]
    no_defaults: bool,

    #[clap(long, default_value = "127.0.0.1")]
    host: String,

    #[clap(short, long, default_value_t = 8080)]
    port: u16,
}

struct AppStateWithGameDb {
    games: Mutex<HashMap<Uuid, Game>>,
    word_list: Vec<String>,
    defaults: bool,
}

impl AppStateWithGameDb {
    fn new(word_list: Vec<String>, defaults: bool) -> Self {
        Self {
            games: Mutex::new(HashMap::new()),
            word_list,
            defaults,
        }
    }

    fn games(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Game>>> {
        self.games.lock().map_err(|_| Error::Poisoned)
    }

    fn build_game(&self) -> Game {
        let mut source = if self.defaults {
            WordSource::new()
        } else {
            WordSource::empty()
        };
        source.add_words(self.word_list.iter().cloned());

        let mut game = Game::new(source);
        game.reset();
        game
    }
}

#[actix_web::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()).await {
        eprintln!("{e}");
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut word_list = Vec::new();
    for path in &args.words {
        word_list.extend(read_words(path)?);
    }
    log::info!("loaded {} extra words", word_list.len());

    let data = Data::new(AppStateWithGameDb::new(word_list, !args.no_defaults));

    log::info!("listening on {}:{}", args.host, args.port);
    HttpServer::new(move || App::new().app_data(data.clone()).configure(routes))
        .bind((args.host.as_str(), args.port))?
        .run()
        .await?;

    Ok(())
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(create_game))
        .route("/{game}", web::get().to(read_game))
        .route("/{game}", web::put().to(update_game))
        .route("/{game}/skip", web::post().to(skip_word))
        .route("/{game}/words", web::post().to(add_words));
}

async fn create_game(data: Data<AppStateWithGameDb>) -> Result<impl Responder> {
    let game = data.build_game();
    let id = Uuid::new_v4();
    let response = CreateGameResponse::new(id, &game);

    data.games()?.insert(id, game);
    log::info!("created game {id}");

    Ok(web::Json(response))
}

async fn read_game(id: web::Path<Uuid>, data: Data<AppStateWithGameDb>) -> Result<impl Responder> {
    let id = id.into_inner();
    let games = data.games()?;
    let game = games.get(&id).ok_or(Error::GameNotFound(id))?;

    Ok(web::Json(current_state(game)))
}

async fn update_game(
    id: web::Path<Uuid>,
    request: web::Json<UpdateGameRequest>,
    data: Data<AppStateWithGameDb>,
) -> Result<impl Responder> {
    let id = id.into_inner();
    let UpdateGameRequest { letter } = request.into_inner();

    let mut games = data.games()?;
    let game = games.get_mut(&id).ok_or(Error::GameNotFound(id))?;

    // Guesses against a finished game just get the final word back.

    if game.is_game_over() {
        return Ok(web::Json(current_state(game)));
    }

    if game.has_guessed(&letter) {
        return Err(Error::DuplicateGuess(letter));
    }

    let correct = game.try_letter(&letter)?;

    // A solved round rolls straight into the next one. If there is no next one, the game is
    // over and the player has won only if nothing was ever skipped.

    if game.is_round_over() {
        let word = game.current_word().unwrap_or_default().to_owned();
        game.reset();
        if game.is_game_over() {
            return Ok(web::Json(UpdateGameResponse::finalize(word, game.did_win())));
        }
        return Ok(web::Json(UpdateGameResponse::round_won(word, game)));
    }

    if game.is_game_over() {
        return Ok(web::Json(current_state(game)));
    }

    Ok(web::Json(UpdateGameResponse::guess(game, correct)))
}

async fn skip_word(id: web::Path<Uuid>, data: Data<AppStateWithGameDb>) -> Result<impl Responder> {
    let id = id.into_inner();
    let mut games = data.games()?;
    let game = games.get_mut(&id).ok_or(Error::GameNotFound(id))?;

    let skipped = game.current_word().unwrap_or_default().to_owned();
    game.reset();
    if game.is_game_over() {
        return Ok(web::Json(UpdateGameResponse::finalize(skipped, game.did_win())));
    }

    Ok(web::Json(UpdateGameResponse::update(game)))
}

async fn add_words(
    id: web::Path<Uuid>,
    request: web::Json<AddWordsRequest>,
    data: Data<AppStateWithGameDb>,
) -> Result<impl Responder> {
    let id = id.into_inner();
    let AddWordsRequest { words } = request.into_inner();

    let mut games = data.games()?;
    let game = games.get_mut(&id).ok_or(Error::GameNotFound(id))?;

    log::debug!("adding {} words to game {id}", words.len());
    game.add_words(words);

    Ok(web::Json(GameResponse::new(game)))
}

fn current_state(game: &Game) -> UpdateGameResponse {
    if game.is_game_over() {
        let word = game.current_word().unwrap_or_default();
        UpdateGameResponse::finalize(word, game.did_win())
    } else {
        UpdateGameResponse::update(game)
    }
}

fn read_words(path: &str) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_words(&text))
}
