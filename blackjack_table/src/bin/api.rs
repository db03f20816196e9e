//! HTTP card-dealing service: create a shoe, then deal cards from it as
//! JSON. A peripheral demo of the engine, one shoe per server.

use actix_web::{
    body::BoxBody,
    error, get,
    http::{header::ContentType, StatusCode},
    post, web, App, HttpResponse, HttpServer,
};
use blackjack_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::info;

/// Shoe parameters, deserialized from the request body. Raw signed values so
/// malformed sizes surface as the engine's invalid-size failure.
#[derive(Debug, Deserialize)]
struct ShoeConfig {
    decks: i64,
    cutoff: Option<i64>,
}

/// A dealt card on the wire.
#[derive(Serialize)]
struct CardMessage {
    name: String,
    rank: String,
    suit: String,
    #[serde(rename = "shoeID")]
    shoe_id: u32,
    #[serde(rename = "deckID")]
    deck_id: u8,
    glyph: String,
}

impl From<&DealtCard> for CardMessage {
    fn from(dealt: &DealtCard) -> Self {
        CardMessage {
            name: dealt.card().name(),
            rank: dealt.rank().glyph().to_string(),
            suit: dealt.suit().name().to_string(),
            shoe_id: dealt.id().shoe().value(),
            deck_id: dealt.id().deck(),
            glyph: dealt.card().unicode_glyph().to_string(),
        }
    }
}

/// An enum that handles user facing errors.
#[derive(Debug)]
enum UserError {
    InternalError,
    ShoeNotCreated,
    ShoeExhausted,
    BadShoe(String),
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserError::InternalError => write!(f, "an internal error occured"),
            UserError::ShoeNotCreated => {
                write!(f, "unable to deal, a shoe has not been created")
            }
            UserError::ShoeExhausted => write!(f, "the shoe is exhausted"),
            UserError::BadShoe(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for UserError {}

impl From<GameError> for UserError {
    fn from(error: GameError) -> Self {
        match error {
            GameError::Exhausted => UserError::ShoeExhausted,
            other => UserError::BadShoe(other.to_string()),
        }
    }
}

impl error::ResponseError for UserError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            UserError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            UserError::ShoeNotCreated => StatusCode::BAD_REQUEST,
            UserError::ShoeExhausted => StatusCode::CONFLICT,
            UserError::BadShoe(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// A handler that builds a fresh shoe from the posted parameters, replacing
/// any previous one.
#[post("/shoe")]
async fn create_shoe(
    params: web::Json<ShoeConfig>,
    app_shoe: web::Data<Mutex<Option<Shoe>>>,
) -> Result<HttpResponse, UserError> {
    let config = params.into_inner();
    let shoe = Shoe::from_raw_sizes(config.decks, config.cutoff.unwrap_or(0))?;
    info!(
        decks = config.decks,
        remaining = shoe.count_remaining(),
        "shoe created"
    );

    let mut guard = if let Ok(g) = app_shoe.lock() {
        g
    } else {
        return Err(UserError::InternalError);
    };
    *guard = Some(shoe);
    Ok(HttpResponse::Ok().body("shoe created successfully"))
}

/// A handler that deals the next card from the shoe as JSON.
#[get("/deal")]
async fn deal_card(
    app_shoe: web::Data<Mutex<Option<Shoe>>>,
) -> Result<HttpResponse, UserError> {
    let mut guard = if let Ok(g) = app_shoe.lock() {
        g
    } else {
        return Err(UserError::InternalError);
    };

    if let Some(shoe) = guard.as_mut() {
        let dealt = shoe.next_card()?;
        info!(card = %dealt, remaining = shoe.count_remaining(), "card dealt");
        return Ok(HttpResponse::Ok().json(CardMessage::from(&dealt)));
    }

    Err(UserError::ShoeNotCreated)
}

/// A handler reporting how many cards remain in play.
#[get("/remaining")]
async fn remaining(
    app_shoe: web::Data<Mutex<Option<Shoe>>>,
) -> Result<HttpResponse, UserError> {
    let guard = if let Ok(g) = app_shoe.lock() {
        g
    } else {
        return Err(UserError::InternalError);
    };

    if let Some(shoe) = guard.as_ref() {
        return Ok(
            HttpResponse::Ok().json(serde_json::json!({ "remaining": shoe.count_remaining() }))
        );
    }

    Err(UserError::ShoeNotCreated)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let address = "127.0.0.1";
    let port = 8080;
    info!("listening at {}:{}", address, port);

    let app_shoe: web::Data<Mutex<Option<Shoe>>> = web::Data::new(Mutex::new(None));

    HttpServer::new(move || {
        App::new()
            .app_data(app_shoe.clone())
            .service(create_shoe)
            .service(deal_card)
            .service(remaining)
    })
    .bind((address, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_message_carries_the_wire_fields() {
        let dealt = DealtCard::new(
            CardId::new(ShoeId::new(3), 1, 12),
            blackjack_core::Card::new(Rank::Ace, Suit::Spades),
        );
        let message = CardMessage::from(&dealt);
        assert_eq!(message.name, "Ace of Spades");
        assert_eq!(message.rank, "A");
        assert_eq!(message.suit, "Spades");
        assert_eq!(message.shoe_id, 3);
        assert_eq!(message.deck_id, 1);
        assert_eq!(message.glyph, "🂡");

        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"shoeID\":3"));
        assert!(json.contains("\"deckID\":1"));
    }
}
