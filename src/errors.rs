use thiserror::Error;

/// the full error taxonomy the engine can raise, grouped by the category
/// the external caller needs to react to (validation vs. state vs.
/// authorization vs. transient). `Display` renders the stable error code
/// so transport layers can forward it to clients without inventing their
/// own strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("STALE_ACTION")]
    StaleAction,
    #[error("NOT_YOUR_TURN")]
    NotYourTurn,
    #[error("INVALID_ACTION")]
    InvalidAction(String),
    #[error("INSUFFICIENT_CHIPS")]
    InsufficientChips,
    #[error("BUYIN_OUT_OF_RANGE")]
    BuyinOutOfRange,
    #[error("SEAT_TAKEN")]
    SeatTaken,
    #[error("TABLE_FULL")]
    TableFull,
    #[error("GAME_NOT_FOUND")]
    GameNotFound,
    #[error("INVALID_GAME_STATE")]
    InvalidGameState(String),
    #[error("GAME_PAUSED")]
    GamePaused,
    #[error("INSUFFICIENT_PLAYERS")]
    InsufficientPlayers,
    #[error("NOT_AUTHORIZED")]
    NotAuthorized,
    #[error("NOT_SEATED")]
    NotSeated,
    #[error("ROOM_IN_PLAY")]
    RoomInPlay,
    #[error("INVALID_CONFIG: {0}")]
    InvalidConfig(String),
    #[error("TRANSACTION_CONFLICT")]
    TransactionConflict,
    #[error("INVALID_CARD_ENCODING: {0}")]
    InvalidCardEncoding(String),
    #[error("STORAGE_ERROR: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
